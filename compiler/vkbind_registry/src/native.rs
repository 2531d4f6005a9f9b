//! Native scalar vocabulary of the registry's C headers.
//!
//! These names never appear as registry entities but are valid endpoints of
//! typedef chains and base-type rows.

const PRIMITIVES: &[&str] = &[
    "void", "char", "bool", "float", "double", "int", "unsigned", "size_t", "int8_t", "uint8_t",
    "int16_t", "uint16_t", "int32_t", "uint32_t", "int64_t", "uint64_t", "int8", "uint8", "int16",
    "uint16", "int32", "uint32", "int64", "uint64", "float32", "float64",
];

/// Whether `name` is a native C scalar spelling.
pub fn is_primitive(name: &str) -> bool {
    PRIMITIVES.contains(&name)
}

/// Strip `const` qualifiers and pointer levels from a native type spelling,
/// leaving the named type: `const char* const*` gives `char`.
pub fn base_name(spelling: &str) -> &str {
    let head = spelling.split('*').next().unwrap_or(spelling);
    let head = head.trim();
    let head = head.strip_prefix("const ").unwrap_or(head);
    let head = head.strip_suffix(" const").unwrap_or(head);
    head.trim()
}
