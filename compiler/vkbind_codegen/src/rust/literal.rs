//! Constant literal normalization.
//!
//! Registry values are C expressions such as `(~0U)` or `1000.0F`. The
//! normalized form is a valid Rust expression for the constant's type:
//!
//! - one pair of enclosing parentheses is removed (repeatedly)
//! - `~` becomes `!`
//! - integer suffixes (`U`, `L`, `UL`, `ULL`, `LL`) and float suffixes
//!   (`f`, `F`) are dropped from numeric tokens
//! - an integral literal of float type gains a `.0`
//!
//! String constants pass through unchanged.

use vkbind_registry::ConstantType;

/// Normalize `literal` for a constant of type `ty`.
pub fn normalize(literal: &str, ty: ConstantType) -> String {
    let literal = strip_parens(literal.trim());
    if ty == ConstantType::Str || literal.starts_with('"') {
        return literal.to_string();
    }

    let chars: Vec<char> = literal.chars().collect();
    let mut out = String::with_capacity(literal.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_alphabetic() || c == '_' {
            // Identifiers are copied whole so their digits are never
            // mistaken for numbers.
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.extend(&chars[start..i]);
        } else if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(char::is_ascii_digit)) {
            let end = number_end(&chars, i);
            out.extend(&chars[i..end]);
            i = end;
            while i < chars.len() && matches!(chars[i], 'u' | 'U' | 'l' | 'L' | 'f' | 'F') {
                i += 1;
            }
        } else if c == '~' {
            out.push('!');
            i += 1;
        } else {
            out.push(c);
            i += 1;
        }
    }

    if ty.is_float() && is_integral(&out) {
        out.push_str(".0");
    }
    out
}

/// End of the numeric token starting at `start`, excluding any suffix.
fn number_end(chars: &[char], start: usize) -> usize {
    let mut i = start;
    if chars[i] == '0' && matches!(chars.get(i + 1), Some('x' | 'X')) {
        i += 2;
        while i < chars.len() && chars[i].is_ascii_hexdigit() {
            i += 1;
        }
        return i;
    }

    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
        i += 1;
    }
    if i < chars.len() && matches!(chars[i], 'e' | 'E') {
        let mut j = i + 1;
        if j < chars.len() && matches!(chars[j], '+' | '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            i = j;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
        }
    }
    i
}

/// Remove enclosing parentheses, as long as they wrap the whole expression.
fn strip_parens(mut s: &str) -> &str {
    while let Some(inner) = s.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
        if !balanced(inner) {
            break;
        }
        s = inner.trim();
    }
    s
}

fn balanced(s: &str) -> bool {
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

fn is_integral(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
