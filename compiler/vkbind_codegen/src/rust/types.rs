//! Type Mapping: Native Spellings → Rust Types
//!
//! Maps the C spellings used in the registry to Rust types:
//!
//! - Typedefs and base types are resolved first, so `VkFlags` becomes `u32`
//! - Native scalars map to fixed-width Rust types or `::core::ffi` aliases
//! - Pointer levels map to `*const`/`*mut`, innermost first
//! - Declared entity names (structs, handles, ...) are kept as written

use vkbind_registry::{native, Registry, TypeResolver};

use super::names;

/// Type mapper for converting registry spellings to Rust types.
pub struct RustTypeMapper<'a> {
    registry: &'a Registry,
    resolver: &'a TypeResolver<'a>,
}

impl<'a> RustTypeMapper<'a> {
    pub fn new(registry: &'a Registry, resolver: &'a TypeResolver<'a>) -> Self {
        Self { registry, resolver }
    }

    /// Map a native spelling such as `const VkInstanceCreateInfo*` to Rust.
    ///
    /// Pointer levels of the resolved name sit inside the levels written in
    /// `spelling`, so a typedef to `void*` used as `T*` gives
    /// `*mut *mut c_void`. A typedef whose target is itself a pointer to a
    /// typedef keeps resolving until the named type no longer changes.
    pub fn map(&self, spelling: &str, owner: &str) -> String {
        let (base, levels) = self.resolve_spelling(spelling);

        let mut ty = match basic(&base) {
            Some(rust) => rust.to_string(),
            None => {
                if !self.registry.defines_type(&base) {
                    tracing::debug!(owner, ty = %base, "type is not declared, passing through");
                }
                names::escape(&base).into_owned()
            }
        };
        for pointee_const in &levels {
            ty = if *pointee_const {
                format!("*const {ty}")
            } else {
                format!("*mut {ty}")
            };
        }
        ty
    }

    /// Whether `spelling` resolves to a bare `void`, i.e. no value at all.
    pub fn is_void(&self, spelling: &str) -> bool {
        let (base, levels) = self.resolve_spelling(spelling);
        levels.is_empty() && base == "void"
    }

    /// Resolve the named type of `spelling` to a fixed point. Returns the
    /// final name and every pointer level met on the way, innermost first.
    fn resolve_spelling(&self, spelling: &str) -> (String, Vec<bool>) {
        let outer = Spelling::parse(spelling);
        let mut base = outer.base.to_string();
        let mut levels = outer.levels;

        // The builder rejects typedef cycles; the bound only guards a
        // hand-assembled registry.
        let steps = self.registry.typedefs().len() + self.registry.base_type_count();
        for _ in 0..=steps {
            let resolved = self.resolver.resolve(&base);
            let inner = Spelling::parse(&resolved);
            if inner.base == base && inner.levels.is_empty() {
                break;
            }
            let mut nested = inner.levels;
            nested.extend(levels);
            levels = nested;
            let next = inner.base.to_string();
            if next == base {
                break;
            }
            base = next;
        }
        (base, levels)
    }
}

/// The Rust spelling of a native scalar, if `name` is one.
pub fn basic(name: &str) -> Option<&'static str> {
    let rust = match name {
        "uint8_t" | "uint8" => "u8",
        "uint16_t" | "uint16" => "u16",
        "uint32_t" | "uint32" => "u32",
        "uint64_t" | "uint64" => "u64",
        "int8_t" | "int8" => "i8",
        "int16_t" | "int16" => "i16",
        "int32_t" | "int32" => "i32",
        "int64_t" | "int64" => "i64",
        "size_t" => "usize",
        "float" | "float32" => "f32",
        "double" | "float64" => "f64",
        "bool" => "bool",
        "int" => "::core::ffi::c_int",
        "unsigned" => "::core::ffi::c_uint",
        "char" => "::core::ffi::c_char",
        "void" => "::core::ffi::c_void",
        _ => return None,
    };
    Some(rust)
}

/// A native spelling split into its named type and pointer levels.
#[derive(Debug, PartialEq, Eq)]
struct Spelling<'s> {
    base: &'s str,
    /// One entry per `*`, innermost first: whether the pointee is `const`.
    levels: Vec<bool>,
}

impl<'s> Spelling<'s> {
    fn parse(spelling: &'s str) -> Self {
        let mut segments = spelling.split('*');
        let head = segments.next().unwrap_or_default();
        let base = native::base_name(head);
        let base = base.strip_prefix("struct ").unwrap_or(base).trim();

        let mut pointee_const = is_const(head);
        let mut levels = Vec::new();
        for qualifier in segments {
            levels.push(pointee_const);
            pointee_const = is_const(qualifier);
        }
        Self { base, levels }
    }
}

fn is_const(segment: &str) -> bool {
    segment.split_whitespace().any(|word| word == "const")
}
