//! Identifier escaping.
//!
//! Registry names that collide with Rust keywords get a trailing underscore.
//! The same escape is applied at every declaration and every use, so a
//! parameter named `type` is `type_` in both the signature and the call.

use std::borrow::Cow;

/// Strict and reserved keywords across editions 2015 to 2024.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Escape `name` if it is a Rust keyword.
pub fn escape(name: &str) -> Cow<'_, str> {
    if is_keyword(name) {
        Cow::Owned(format!("{name}_"))
    } else {
        Cow::Borrowed(name)
    }
}
