//! Python literals and identifiers.

use crate::ast::Order;
use ahash::{AHashMap, AHashSet};

/// Words a generated variable name must never shadow.
const RESERVED_WORDS: &[&str] = &[
    // Keywords
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield", "match", "case", "print", "exec",
    // Builtins
    "abs", "all", "any", "bin", "bool", "bytearray", "bytes", "callable", "chr", "classmethod",
    "compile", "complex", "delattr", "dict", "dir", "divmod", "enumerate", "eval", "filter",
    "float", "format", "frozenset", "getattr", "globals", "hasattr", "hash", "help", "hex", "id",
    "input", "int", "isinstance", "issubclass", "iter", "len", "list", "locals", "map", "max",
    "min", "next", "object", "oct", "open", "ord", "pow", "property", "range", "repr",
    "reversed", "round", "set", "setattr", "slice", "sorted", "staticmethod", "str", "sum",
    "super", "tuple", "type", "vars", "zip", "__import__", "self",
];

/// Quotes `text` as a Python string literal.
///
/// Single quotes are preferred; double quotes are used when the text contains
/// a single quote but no double quote.
pub fn quote(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    if !escaped.contains('\'') {
        format!("'{}'", escaped)
    } else if !escaped.contains('"') {
        format!("\"{}\"", escaped)
    } else {
        format!("'{}'", escaped.replace('\'', "\\'"))
    }
}

/// Formats a number literal together with the order of the resulting expression.
///
/// Integer literals report the tightest order below member access, so they are
/// parenthesized as receivers of `.attr`.
pub fn format_number(value: f64) -> (String, Order) {
    if value.is_nan() {
        return ("float('nan')".to_string(), Order::FunctionCall);
    }
    if value.is_infinite() {
        return if value > 0.0 {
            ("float('inf')".to_string(), Order::FunctionCall)
        } else {
            ("-float('inf')".to_string(), Order::UnarySign)
        };
    }
    let code = format!("{}", value);
    let order = if value.is_sign_negative() {
        Order::UnarySign
    } else if code.bytes().all(|b| b.is_ascii_digit()) {
        // `5.keys()` reads the dot as a decimal point.
        Order::Exponentiation
    } else {
        Order::Atomic
    };
    (code, order)
}

/// Turns an arbitrary display name into a Python identifier, ignoring collisions.
pub fn legalize(name: &str) -> String {
    let mut legal: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if legal.is_empty() {
        return "unnamed".to_string();
    }
    if legal.starts_with(|c: char| c.is_ascii_digit()) {
        legal.insert_str(0, "my_");
    }
    legal
}

/// Assigns unique Python identifiers to variable ids for one generation run.
#[derive(Debug, Default)]
pub struct NameDb {
    by_id: AHashMap<String, String>,
    taken: AHashSet<String>,
}

impl NameDb {
    /// A database where the reserved words and `extra_reserved` are already taken.
    pub fn new<'a>(extra_reserved: impl IntoIterator<Item = &'a str>) -> Self {
        let taken = RESERVED_WORDS
            .iter()
            .map(|word| word.to_string())
            .chain(extra_reserved.into_iter().map(str::to_string))
            .collect();
        Self {
            by_id: AHashMap::new(),
            taken,
        }
    }

    /// The identifier for `id`, assigning one derived from `name` on first use.
    pub fn declare(&mut self, id: &str, name: &str) -> &str {
        if !self.by_id.contains_key(id) {
            let base = legalize(name);
            let mut candidate = base.clone();
            let mut suffix = 2;
            while self.taken.contains(&candidate) {
                candidate = format!("{}{}", base, suffix);
                suffix += 1;
            }
            self.taken.insert(candidate.clone());
            self.by_id.insert(id.to_string(), candidate);
        }
        &self.by_id[id]
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_prefers_single_quotes() {
        assert_eq!(quote("hello"), "'hello'");
        assert_eq!(quote("it's"), "\"it's\"");
        assert_eq!(quote("it's \"x\""), "'it\\'s \"x\"'");
        assert_eq!(quote("a\\b\nc"), "'a\\\\b\\nc'");
    }

    #[test]
    fn numbers_keep_whole_values_integral() {
        assert_eq!(format_number(5.0), ("5".to_string(), Order::Exponentiation));
        assert_eq!(format_number(-0.0), ("-0".to_string(), Order::UnarySign));
        assert_eq!(format_number(0.25), ("0.25".to_string(), Order::Atomic));
        assert_eq!(format_number(-3.0), ("-3".to_string(), Order::UnarySign));
        assert_eq!(format_number(f64::INFINITY).0, "float('inf')");
        assert_eq!(format_number(f64::NEG_INFINITY).1, Order::UnarySign);
    }

    #[test]
    fn names_are_legalized_and_deduplicated() {
        let mut names = NameDb::new(["ChatOpenAI"]);
        assert_eq!(names.declare("a", "my var"), "my_var");
        assert_eq!(names.declare("b", "my var"), "my_var2");
        assert_eq!(names.declare("c", "list"), "list2");
        assert_eq!(names.declare("d", "1st"), "my_1st");
        assert_eq!(names.declare("e", ""), "unnamed");
        assert_eq!(names.declare("f", "ChatOpenAI"), "ChatOpenAI2");
        assert_eq!(names.declare("a", "ignored"), "my_var");
        assert_eq!(names.get("b"), Some("my_var2"));
    }
}
