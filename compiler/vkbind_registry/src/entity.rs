//! Registry entities.
//!
//! Every entity is created once by the builder and never mutated afterwards.
//! Type references are kept as native spellings (`const char*`, `VkFlags`);
//! following them to a scalar is the resolver's job, not the model's.

use std::fmt;
use std::num::NonZeroU32;

use serde::Deserialize;

/// Semantic scalar type of a constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum ConstantType {
    #[serde(rename = "uint32", alias = "uint32_t", alias = "u32")]
    U32,
    #[serde(rename = "uint64", alias = "uint64_t", alias = "u64")]
    U64,
    #[serde(rename = "int32", alias = "int32_t", alias = "i32")]
    I32,
    #[serde(rename = "int64", alias = "int64_t", alias = "i64")]
    I64,
    #[serde(rename = "float32", alias = "float", alias = "f32")]
    F32,
    #[serde(rename = "float64", alias = "double", alias = "f64")]
    F64,
    #[serde(rename = "string", alias = "str")]
    Str,
}

impl ConstantType {
    /// Whether literals of this type are floating point.
    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

/// How a constant gets its value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstantDef {
    /// A literal in its native spelling, e.g. `1U` or `(~0ULL)`.
    Value { ty: ConstantType, literal: String },
    /// A synonym for another constant.
    Alias(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Constant {
    pub name: String,
    pub def: ConstantDef,
}

impl Constant {
    /// The aliased constant's name, if this is an alias.
    pub fn alias(&self) -> Option<&str> {
        match &self.def {
            ConstantDef::Alias(target) => Some(target),
            ConstantDef::Value { .. } => None,
        }
    }
}

/// Whether an enumeration is a plain enumeration or a set of combinable bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumKind {
    #[default]
    Enum,
    Bitmask,
}

/// Storage width of an enumeration's values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EnumWidth {
    #[default]
    W32,
    W64,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Enumeration {
    pub name: String,
    pub kind: EnumKind,
    pub width: EnumWidth,
    /// Declared members in emission order. Values may repeat.
    pub values: Vec<EnumValue>,
}

/// A struct or union member.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Member {
    pub name: String,
    /// Native type spelling, possibly with `const` and `*`.
    pub ty: String,
    pub count: NonZeroU32,
}

impl Member {
    pub fn is_array(&self) -> bool {
        self.count.get() > 1
    }
}

/// Shape shared by structs and unions. Member order is ABI.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Aggregate {
    pub name: String,
    pub members: Vec<Member>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    pub name: String,
    /// Pointer-sized when true, a 64-bit integer otherwise.
    pub dispatchable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeDef {
    pub name: String,
    pub target: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FuncPointer {
    pub name: String,
    pub return_type: String,
    pub params: Vec<Param>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Prototype {
    pub return_type: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Command {
    pub prototype: Prototype,
    pub params: Vec<Param>,
    /// Set for pure synonyms; such commands have no entry point of their own.
    pub alias: Option<String>,
}

impl Command {
    pub fn name(&self) -> &str {
        &self.prototype.name
    }
}

/// The registry collections, used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Constants,
    Enums,
    Structs,
    Unions,
    Handles,
    TypeDefs,
    BaseTypes,
    FuncPointers,
    Commands,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Constants => "constants",
            Self::Enums => "enums",
            Self::Structs => "structs",
            Self::Unions => "unions",
            Self::Handles => "handles",
            Self::TypeDefs => "typedefs",
            Self::BaseTypes => "base_types",
            Self::FuncPointers => "func_pointers",
            Self::Commands => "commands",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
