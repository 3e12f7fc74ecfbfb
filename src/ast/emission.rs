use super::Order;

/// The result of emitting a single block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// One or more complete statements, each terminated by a newline.
    Statement(String),
    /// An expression together with the precedence of its outermost operator.
    Expression { code: String, order: Order },
    /// A single element of an aggregate (a dict entry, a prompt message).
    /// Standing alone it renders as its own line.
    Item(String),
}

impl Emission {
    pub fn expression(code: impl Into<String>, order: Order) -> Self {
        Emission::Expression {
            code: code.into(),
            order,
        }
    }

    pub fn statement(code: impl Into<String>) -> Self {
        Emission::Statement(code.into())
    }

    pub fn item(code: impl Into<String>) -> Self {
        Emission::Item(code.into())
    }

    /// The order of this emission when it is embedded as a value.
    /// Statements and items are treated as atomic text.
    pub fn order(&self) -> Order {
        match self {
            Emission::Expression { order, .. } => *order,
            Emission::Statement(_) | Emission::Item(_) => Order::Atomic,
        }
    }

    /// Renders the emission as statement text, turning a naked expression
    /// or item into its own line.
    pub fn into_statement(self) -> String {
        match self {
            Emission::Statement(code) => code,
            Emission::Expression { code, .. } | Emission::Item(code) => format!("{}\n", code),
        }
    }

    /// Renders the emission as a value, without a trailing newline.
    pub fn into_value(self) -> String {
        match self {
            Emission::Statement(code) => code.trim_end().to_string(),
            Emission::Expression { code, .. } | Emission::Item(code) => code,
        }
    }
}
