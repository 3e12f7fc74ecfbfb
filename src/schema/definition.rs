use super::{BlockKind, Category};
use crate::ast::{FieldValue, Order};
use crate::error::RegistryError;
use ahash::AHashSet;
use itertools::Itertools;

/// A Python import a block's code depends on (`from module import name`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PyImport {
    pub module: &'static str,
    pub name: &'static str,
}

impl PyImport {
    pub const fn new(module: &'static str, name: &'static str) -> Self {
        Self { module, name }
    }
}

/// A connection type constraint. `Any` accepts every counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Any,
    Types(&'static [&'static str]),
}

impl Check {
    /// Whether two connection points with these checks may be joined.
    pub fn accepts(self, other: Check) -> bool {
        match (self, other) {
            (Check::Any, _) | (_, Check::Any) => true,
            (Check::Types(ours), Check::Types(theirs)) => ours.iter().any(|t| theirs.contains(t)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketKind {
    Value,
    Statement,
    Dummy,
}

/// A socket (input) of a block type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketDef {
    pub name: &'static str,
    pub kind: SocketKind,
    pub check: Check,
    /// Python text substituted when nothing is connected.
    pub default: Option<&'static str>,
    /// Precedence of the default text when it is embedded as a value.
    pub default_order: Order,
    /// Import the default text relies on.
    pub default_import: Option<PyImport>,
}

impl SocketDef {
    pub const fn value(name: &'static str) -> Self {
        Self {
            name,
            kind: SocketKind::Value,
            check: Check::Any,
            default: None,
            default_order: Order::Atomic,
            default_import: None,
        }
    }

    pub const fn statement(name: &'static str) -> Self {
        Self {
            name,
            kind: SocketKind::Statement,
            check: Check::Any,
            default: None,
            default_order: Order::Atomic,
            default_import: None,
        }
    }

    pub const fn dummy() -> Self {
        Self {
            name: "",
            kind: SocketKind::Dummy,
            check: Check::Any,
            default: None,
            default_order: Order::Atomic,
            default_import: None,
        }
    }

    pub const fn check(mut self, types: &'static [&'static str]) -> Self {
        self.check = Check::Types(types);
        self
    }

    /// Sets an atomic default, such as a literal or a name.
    pub const fn defaults_to(mut self, code: &'static str) -> Self {
        self.default = Some(code);
        self.default_order = Order::Atomic;
        self
    }

    /// Sets a default expression whose outermost operator has precedence `order`.
    pub const fn defaults_to_expression(mut self, code: &'static str, order: Order) -> Self {
        self.default = Some(code);
        self.default_order = order;
        self
    }

    pub const fn requires(mut self, import: PyImport) -> Self {
        self.default_import = Some(import);
        self
    }
}

/// A field (editable widget) of a block type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDef {
    Text {
        name: &'static str,
        default: &'static str,
    },
    Number {
        name: &'static str,
        default: f64,
    },
    /// `(label, value)` pairs; the first option is the default.
    Dropdown {
        name: &'static str,
        options: &'static [(&'static str, &'static str)],
    },
    Variable {
        name: &'static str,
        default_name: &'static str,
    },
}

impl FieldDef {
    pub fn name(&self) -> &'static str {
        match self {
            FieldDef::Text { name, .. }
            | FieldDef::Number { name, .. }
            | FieldDef::Dropdown { name, .. }
            | FieldDef::Variable { name, .. } => name,
        }
    }

    /// The value a freshly created block carries in this field.
    pub fn default_value(&self) -> Option<FieldValue> {
        match self {
            FieldDef::Text { default, .. } => Some(FieldValue::from(*default)),
            FieldDef::Number { default, .. } => Some(FieldValue::Number(*default)),
            FieldDef::Dropdown { options, .. } => {
                options.first().map(|(_, value)| FieldValue::from(*value))
            }
            FieldDef::Variable { .. } => None,
        }
    }

    /// Checks that a stored value fits this field.
    pub fn validate(&self, value: &FieldValue) -> Result<(), String> {
        match (self, value) {
            (FieldDef::Text { .. }, FieldValue::Text(_)) => Ok(()),
            (FieldDef::Number { .. }, v) if v.as_number().is_some() => Ok(()),
            (FieldDef::Dropdown { options, .. }, FieldValue::Text(s)) => {
                if options.iter().any(|(_, v)| v == s) {
                    Ok(())
                } else {
                    Err(format!(
                        "'{}' is not one of [{}]",
                        s,
                        options.iter().map(|(_, v)| *v).join(", ")
                    ))
                }
            }
            (FieldDef::Variable { .. }, FieldValue::Variable(_)) => Ok(()),
            (def, other) => Err(format!(
                "expected a {} value, found {}",
                def.value_kind(),
                other
            )),
        }
    }

    fn value_kind(&self) -> &'static str {
        match self {
            FieldDef::Text { .. } => "text",
            FieldDef::Number { .. } => "number",
            FieldDef::Dropdown { .. } => "dropdown",
            FieldDef::Variable { .. } => "variable",
        }
    }
}

/// One placeholder argument of a display template.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Field(FieldDef),
    Socket(SocketDef),
}

/// A piece of a parsed display template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Text(String),
    /// Index into [`BlockType::args`].
    Arg(usize),
}

/// Connection points of a block type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Connections {
    pub output: Option<Check>,
    pub previous: Option<Check>,
    pub next: Option<Check>,
}

/// The declarative description of one block type.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockType {
    pub kind: BlockKind,
    pub category: Category,
    pub colour: u16,
    /// Display message with `%1`, `%2`, ... placeholders for `args`.
    pub message: &'static str,
    pub args: Vec<Argument>,
    pub connections: Connections,
    pub tooltip: &'static str,
    /// Imports required whenever this block is emitted.
    pub imports: &'static [PyImport],
    template: Vec<TemplatePart>,
}

impl BlockType {
    pub fn new(kind: BlockKind, category: Category, message: &'static str) -> Self {
        Self {
            kind,
            category,
            colour: category.colour(),
            message,
            args: Vec::new(),
            connections: Connections::default(),
            tooltip: "",
            imports: &[],
            template: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.args.push(Argument::Field(field));
        self
    }

    pub fn socket(mut self, socket: SocketDef) -> Self {
        self.args.push(Argument::Socket(socket));
        self
    }

    pub fn output(mut self, check: Check) -> Self {
        self.connections.output = Some(check);
        self
    }

    /// Gives the block previous and next statement connections with the same check.
    pub fn statement(mut self, check: Check) -> Self {
        self.connections.previous = Some(check);
        self.connections.next = Some(check);
        self
    }

    pub fn colour(mut self, hue: u16) -> Self {
        self.colour = hue;
        self
    }

    pub fn tooltip(mut self, tooltip: &'static str) -> Self {
        self.tooltip = tooltip;
        self
    }

    pub fn imports(mut self, imports: &'static [PyImport]) -> Self {
        self.imports = imports;
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Named sockets, skipping dummy rows.
    pub fn sockets(&self) -> impl Iterator<Item = &SocketDef> {
        self.args.iter().filter_map(|arg| match arg {
            Argument::Socket(s) if s.kind != SocketKind::Dummy => Some(s),
            _ => None,
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.args.iter().filter_map(|arg| match arg {
            Argument::Field(f) => Some(f),
            Argument::Socket(_) => None,
        })
    }

    pub fn socket_def(&self, name: &str) -> Option<&SocketDef> {
        self.sockets().find(|s| s.name == name)
    }

    pub fn field_def(&self, name: &str) -> Option<&FieldDef> {
        self.fields().find(|f| f.name() == name)
    }

    /// The parsed display template. Empty until the registry has been built.
    pub fn template(&self) -> &[TemplatePart] {
        &self.template
    }

    /// Renders the display template with `[NAME]` markers for arguments.
    pub fn display_label(&self) -> String {
        self.template
            .iter()
            .map(|part| match part {
                TemplatePart::Text(text) => text.clone(),
                TemplatePart::Arg(index) => match &self.args[*index] {
                    Argument::Field(f) => format!("[{}]", f.name()),
                    Argument::Socket(s) if s.kind == SocketKind::Dummy => String::new(),
                    Argument::Socket(s) => format!("[{}]", s.name),
                },
            })
            .filter(|s| !s.is_empty())
            .join(" ")
    }

    /// The tooltip followed by the documented defaults of its optional inputs.
    pub fn full_tooltip(&self) -> String {
        let defaults = self
            .sockets()
            .filter(|s| s.kind == SocketKind::Value)
            .filter_map(|s| s.default.map(|d| format!("{}={}", s.name, d)))
            .join(", ");
        if defaults.is_empty() {
            self.tooltip.to_string()
        } else {
            format!("{} (defaults: {})", self.tooltip, defaults)
        }
    }

    /// Validates the definition and parses its template. Called once by the registry builder.
    pub(super) fn prepare(&mut self) -> Result<(), RegistryError> {
        let type_name = self.type_name().to_string();

        if self.connections.output.is_some() && self.connections.previous.is_some() {
            return Err(RegistryError::ConflictingConnections { type_name });
        }

        let mut seen = AHashSet::new();
        for arg in &self.args {
            let name = match arg {
                Argument::Field(f) => f.name(),
                Argument::Socket(s) if s.kind == SocketKind::Dummy => continue,
                Argument::Socket(s) => s.name,
            };
            if !seen.insert(name) {
                return Err(RegistryError::DuplicateArgument {
                    type_name,
                    name: name.to_string(),
                });
            }
        }

        let template = parse_template(self.message, self.args.len())
            .map_err(|message| RegistryError::InvalidTemplate { type_name, message })?;
        self.template = template;
        Ok(())
    }
}

/// Splits a `%N` message into text and argument parts, checking that every
/// argument is referenced exactly once.
fn parse_template(message: &str, arg_count: usize) -> Result<Vec<TemplatePart>, String> {
    let mut parts = Vec::new();
    let mut referenced = vec![false; arg_count];
    let mut text = String::new();
    let mut chars = message.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            text.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            text.push('%');
            continue;
        }
        let mut digits = String::new();
        while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
            digits.push(d);
            chars.next();
        }
        let number: usize = digits
            .parse()
            .map_err(|_| "'%' must be followed by an argument number".to_string())?;
        if number == 0 || number > arg_count {
            return Err(format!(
                "placeholder %{} is out of range (1..={})",
                number, arg_count
            ));
        }
        if referenced[number - 1] {
            return Err(format!("placeholder %{} is used more than once", number));
        }
        referenced[number - 1] = true;
        flush(&mut text, &mut parts);
        parts.push(TemplatePart::Arg(number - 1));
    }
    flush(&mut text, &mut parts);

    if let Some(missing) = referenced.iter().position(|r| !r) {
        return Err(format!("argument {} is never placed", missing + 1));
    }
    Ok(parts)
}

fn flush(text: &mut String, parts: &mut Vec<TemplatePart>) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        parts.push(TemplatePart::Text(trimmed.to_string()));
    }
    text.clear();
}
