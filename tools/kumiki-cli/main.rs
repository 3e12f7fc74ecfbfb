use clap::Parser;
use kumiki::prelude::*;
use kumiki::workspace::storage::{self, FileStore};
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Transpile a block workspace document into Python
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workspace JSON file. Omit to use the stored workspace (requires --store)
    workspace_path: Option<String>,

    /// Write the generated Python to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Generator options as a JSON file
    #[arg(long)]
    config: Option<String>,

    /// Omit the header comment
    #[arg(long)]
    no_header: bool,

    /// Omit the import lines
    #[arg(long)]
    no_imports: bool,

    /// Omit the `name = None` variable declarations
    #[arg(long)]
    no_variables: bool,

    /// Print the block tree of every top-level chain to stderr
    #[arg(long)]
    tree: bool,

    /// Directory used as the workspace store: an imported workspace is saved
    /// there, and the stored one is loaded when no path is given
    #[arg(long, value_name = "DIR")]
    store: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let total_start = Instant::now();

    // --- 1. Registry and options ---
    let registry = BlockRegistry::standard()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to build block registry: {}", e)));

    let mut options = match &cli.config {
        Some(path) => GeneratorOptions::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load options: {}", e))),
        None => GeneratorOptions::default(),
    };
    if cli.no_header {
        options.header = None;
    }
    if cli.no_imports {
        options.include_imports = false;
    }
    if cli.no_variables {
        options.declare_variables = false;
    }

    // --- 2. Loading and validation ---
    let load_start = Instant::now();
    let mut store = cli.store.as_deref().map(FileStore::new);
    let workspace = match (&cli.workspace_path, &store) {
        (Some(path), _) => {
            let json = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read workspace file '{}': {}", path, e))
            });
            json.as_str()
                .into_workspace(&registry)
                .unwrap_or_else(|e| exit_with_error(&format!("Invalid workspace: {}", e)))
        }
        (None, Some(store)) => storage::load(store, &registry)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load stored workspace: {}", e)))
            .unwrap_or_else(|| exit_with_error("The store holds no workspace.")),
        (None, None) => exit_with_error("Provide a workspace path or --store <DIR>."),
    };
    let load_duration = load_start.elapsed();

    if let (Some(store), Some(_)) = (store.as_mut(), &cli.workspace_path) {
        storage::save(&workspace, store)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to store workspace: {}", e)));
    }

    if cli.tree {
        for block in workspace.ordered_top_blocks() {
            eprint!("{}", DisplayBlock::new(block));
        }
    }

    // --- 3. Generation ---
    let generate_start = Instant::now();
    let code = Generator::builder(&registry)
        .with_options(options)
        .build()
        .workspace_to_code(&workspace)
        .unwrap_or_else(|e| exit_with_error(&format!("Code generation failed: {}", e)));
    let generate_duration = generate_start.elapsed();

    match &cli.output {
        Some(path) => {
            fs::write(path, &code).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write output file '{}': {}", path, e))
            });
            eprintln!("Wrote {} lines of Python to '{}'", code.lines().count(), path);
        }
        None => print!("{}", code),
    }

    if cli.verbose {
        eprintln!("\n--- Performance Summary ---");
        eprintln!("Blocks:               {}", workspace.block_count());
        eprintln!("Loading:              {:?}", load_duration);
        eprintln!("Generation:           {:?}", generate_duration);
        eprintln!("-----------------------------");
        eprintln!("Total Execution:      {:?}", total_start.elapsed());
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
