//! The registry document as read from disk.
//!
//! These types mirror the JSON layout one-to-one and carry no invariants;
//! the builder turns them into checked [`crate::entity`] values.

use serde::Deserialize;

use crate::entity::{ConstantType, EnumKind};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawRegistry {
    pub constants: Vec<RawConstant>,
    pub enums: Vec<RawEnum>,
    pub structs: Vec<RawAggregate>,
    pub unions: Vec<RawAggregate>,
    pub handles: Vec<RawHandle>,
    pub typedefs: Vec<RawTypeDef>,
    pub base_types: Vec<RawTypeDef>,
    pub func_pointers: Vec<RawFunction>,
    pub commands: Vec<RawFunction>,
}

impl RawRegistry {
    /// Parse a registry document.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConstant {
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: Option<ConstantType>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawEnum {
    pub name: String,
    #[serde(default)]
    pub kind: EnumKind,
    #[serde(default)]
    pub bitwidth: Option<u8>,
    #[serde(default)]
    pub values: Vec<RawEnumValue>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawEnumValue {
    pub name: String,
    pub value: i64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawAggregate {
    pub name: String,
    #[serde(default)]
    pub members: Vec<RawMember>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawMember {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default = "one")]
    pub count: u32,
}

fn one() -> u32 {
    1
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawHandle {
    pub name: String,
    #[serde(default)]
    pub dispatchable: bool,
}

/// A typedef or base-type row: `name` stands for `type`.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTypeDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// A function-pointer type or a command.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawFunction {
    pub name: String,
    #[serde(default = "void")]
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<RawParam>,
    #[serde(default)]
    pub alias: Option<String>,
}

fn void() -> String {
    "void".to_string()
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawParam {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}
