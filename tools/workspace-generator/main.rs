use clap::Parser;
use kumiki::prelude::*;
use kumiki::schema::{Check, FieldDef, SocketKind};
use kumiki::workspace::Variable;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use std::fs;

/// A CLI tool to generate random, valid block workspaces
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_workspace.json")]
    output: String,

    /// Number of top-level statement chains
    #[arg(long, default_value_t = 3)]
    chains: usize,

    /// Maximum number of statements per chain
    #[arg(long, default_value_t = 5)]
    max_length: usize,

    /// Maximum nesting depth of value blocks
    #[arg(long, default_value_t = 3)]
    depth: usize,

    /// Number of workspace variables (at least one is always created)
    #[arg(long, default_value_t = 2)]
    variables: usize,
}

const WORDS: &[&str] = &[
    "hello", "world", "prompt", "answer", "it's", "say \"hi\"", "line\nbreak", "topic",
];

struct WorkspaceGenerator<'a> {
    registry: &'a BlockRegistry,
    rng: ThreadRng,
    variables: Vec<Variable>,
    max_depth: usize,
    next_id: usize,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if cli.max_length == 0 {
        eprintln!("Error: --max-length must be at least 1");
        std::process::exit(1);
    }

    let registry = BlockRegistry::standard()?;
    let mut generator = WorkspaceGenerator {
        registry: &registry,
        rng: rand::rng(),
        // Variable blocks need at least one variable to reference.
        variables: (0..cli.variables.max(1))
            .map(|i| Variable::new(&format!("var{}", i), &format!("item {}", i)))
            .collect(),
        max_depth: cli.depth,
        next_id: 0,
    };

    println!(
        "Generating workspace ({} chains, up to {} statements each)...",
        cli.chains, cli.max_length
    );
    let workspace = generator.workspace(cli.chains, cli.max_length);

    let json_output = serde_json::to_string_pretty(&WorkspaceDocument::from(&workspace))?;
    // The generated document must pass validation.
    json_output.as_str().into_workspace(&registry)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated {} blocks and saved them to '{}'",
        workspace.block_count(),
        cli.output
    );
    Ok(())
}

impl WorkspaceGenerator<'_> {
    fn workspace(&mut self, chains: usize, max_length: usize) -> Workspace {
        let mut workspace = Workspace {
            top_blocks: Vec::new(),
            variables: self.variables.clone(),
        };
        for i in 0..chains {
            let length = self.rng.random_range(1..=max_length);
            // Pairs and messages only make sense inside their composite blocks.
            let statements = self.kinds_where(|t| t.connections.previous == Some(Check::Any));
            let mut head: Option<Block> = None;
            for _ in 0..length {
                let Some(kind) = statements.choose(&mut self.rng).copied() else {
                    break;
                };
                let block = self.block(kind, 0);
                head = Some(match head {
                    Some(head) => head.with_next(block),
                    None => block,
                });
            }
            if let Some(head) = head {
                workspace.top_blocks.push(head.at(20.0, 20.0 + 150.0 * i as f64));
            }
        }
        workspace
    }

    fn kinds_where(&self, predicate: impl Fn(&BlockType) -> bool) -> Vec<BlockKind> {
        self.registry
            .iter()
            .filter(|t| predicate(t))
            .map(|t| t.kind)
            .collect()
    }

    fn fresh_id(&mut self) -> String {
        self.next_id += 1;
        format!("b{}", self.next_id)
    }

    /// A block of `kind` with random fields, and random children up to the depth limit.
    fn block(&mut self, kind: BlockKind, depth: usize) -> Block {
        let registry = self.registry;
        let definition = registry.get(kind);
        let id = self.fresh_id();
        let mut block = Block::new(kind).with_id(&id);

        for field in definition.fields() {
            if let Some(value) = self.field_value(field) {
                block = block.with_field(field.name(), value);
            }
        }

        if depth >= self.max_depth {
            return block;
        }
        for socket in definition.sockets() {
            // Leave some sockets empty so defaults get exercised.
            if self.rng.random_bool(0.3) {
                continue;
            }
            let candidates = match socket.kind {
                SocketKind::Value => self.kinds_where(|t| {
                    t.connections
                        .output
                        .is_some_and(|output| socket.check.accepts(output))
                }),
                SocketKind::Statement => self.kinds_where(|t| {
                    t.connections
                        .previous
                        .is_some_and(|previous| socket.check.accepts(previous))
                }),
                SocketKind::Dummy => continue,
            };
            let Some(kind) = candidates.choose(&mut self.rng).copied() else {
                continue;
            };
            let mut child = self.block(kind, depth + 1);
            if socket.kind == SocketKind::Statement {
                for _ in 0..self.rng.random_range(0..3) {
                    let sibling = self.block(kind, depth + 1);
                    child = child.with_next(sibling);
                }
            }
            block = block.with_input(socket.name, child);
        }
        block
    }

    fn field_value(&mut self, field: &FieldDef) -> Option<FieldValue> {
        match field {
            FieldDef::Text { .. } => WORDS.choose(&mut self.rng).map(|w| FieldValue::from(*w)),
            FieldDef::Number { .. } => {
                let value: f64 = self.rng.random_range(-100.0..100.0);
                Some(FieldValue::Number((value * 4.0).round() / 4.0))
            }
            FieldDef::Dropdown { options, .. } => options
                .choose(&mut self.rng)
                .map(|(_, value)| FieldValue::from(*value)),
            FieldDef::Variable { .. } => self
                .variables
                .choose(&mut self.rng)
                .map(|v| FieldValue::Variable(VariableRef::new(v.id.clone()))),
        }
    }
}
