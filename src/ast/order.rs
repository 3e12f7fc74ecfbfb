use std::fmt;

/// Python operator precedence of an emitted expression.
///
/// Each order has a binding power; a higher power binds tighter. An expression
/// embedded in a position that requires a tighter binding than it provides is
/// wrapped in parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// `'abc'`, `42`, `True`, names, `{...}` displays
    Atomic,
    /// Tuple, list and dict displays
    Collection,
    /// Conversions such as f-strings
    StringConversion,
    /// `a.b`, `a[b]`
    Member,
    /// `f(a)`
    FunctionCall,
    /// `a ** b`
    Exponentiation,
    /// `-a`, `+a`
    UnarySign,
    /// `~a`
    BitwiseNot,
    /// `a * b`, `a / b`, `a // b`, `a % b`
    Multiplicative,
    /// `a + b`, `a - b`
    Additive,
    /// `a << b`, `a >> b`
    BitwiseShift,
    /// `a & b`
    BitwiseAnd,
    /// `a ^ b`
    BitwiseXor,
    /// `a | b`
    BitwiseOr,
    /// `in`, `not in`, `is`, `<`, `==`, ...
    Relational,
    /// `not a`
    LogicalNot,
    /// `a and b`
    LogicalAnd,
    /// `a or b`
    LogicalOr,
    /// `a if b else c`
    Conditional,
    /// `lambda: a`
    Lambda,
    /// No precedence requirement (call arguments, displays, statement positions).
    None,
}

impl Order {
    /// Binding strength of this order. Member access and calls share the
    /// strength of Python primaries.
    pub const fn binding_power(self) -> u8 {
        match self {
            Order::Atomic => 18,
            Order::Collection | Order::StringConversion => 17,
            Order::Member | Order::FunctionCall => 16,
            Order::Exponentiation => 15,
            Order::UnarySign | Order::BitwiseNot => 14,
            Order::Multiplicative => 13,
            Order::Additive => 12,
            Order::BitwiseShift => 11,
            Order::BitwiseAnd => 10,
            Order::BitwiseXor => 9,
            Order::BitwiseOr => 8,
            Order::Relational => 7,
            Order::LogicalNot => 6,
            Order::LogicalAnd => 5,
            Order::LogicalOr => 4,
            Order::Conditional => 3,
            Order::Lambda => 2,
            Order::None => 0,
        }
    }

    /// Whether an expression of this order must be parenthesized when placed
    /// in a position requiring `required`.
    pub const fn needs_parens_in(self, required: Order) -> bool {
        self.binding_power() < required.binding_power()
    }

    /// Wraps `code` in parentheses if this order binds looser than `required`.
    pub fn wrap(self, code: String, required: Order) -> String {
        if self.needs_parens_in(required) {
            format!("({})", code)
        } else {
            code
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Order::Atomic => "atomic",
            Order::Collection => "collection",
            Order::StringConversion => "string conversion",
            Order::Member => "member access",
            Order::FunctionCall => "function call",
            Order::Exponentiation => "exponentiation",
            Order::UnarySign => "unary sign",
            Order::BitwiseNot => "bitwise not",
            Order::Multiplicative => "multiplicative",
            Order::Additive => "additive",
            Order::BitwiseShift => "bitwise shift",
            Order::BitwiseAnd => "bitwise and",
            Order::BitwiseXor => "bitwise xor",
            Order::BitwiseOr => "bitwise or",
            Order::Relational => "relational",
            Order::LogicalNot => "logical not",
            Order::LogicalAnd => "logical and",
            Order::LogicalOr => "logical or",
            Order::Conditional => "conditional",
            Order::Lambda => "lambda",
            Order::None => "none",
        };
        write!(f, "{}", name)
    }
}
