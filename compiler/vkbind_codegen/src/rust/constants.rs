//! Constant projection.
//!
//! Each constant becomes `pub const NAME: T = value;`. An alias names its
//! target as the value and takes the type of the end of its alias chain.

use vkbind_registry::{ConstantDef, ConstantType};

use super::literal;
use crate::context::EmitContext;

pub fn emit_constants(ctx: &mut EmitContext<'_>) {
    let registry = ctx.registry;
    for constant in registry.constants() {
        let name = ctx.ident(&constant.name);
        let Some(ty) = registry.constant_type(constant) else {
            tracing::warn!(constant = %constant.name, "constant has no resolvable type, skipping");
            continue;
        };
        let value = match &constant.def {
            ConstantDef::Value { ty, literal } => literal::normalize(literal, *ty),
            ConstantDef::Alias(target) => ctx.ident(target).into_owned(),
        };
        ctx.writeln(&format!("pub const {name}: {} = {value};", rust_type(ty)));
    }
}

pub fn rust_type(ty: ConstantType) -> &'static str {
    match ty {
        ConstantType::U32 => "u32",
        ConstantType::U64 => "u64",
        ConstantType::I32 => "i32",
        ConstantType::I64 => "i64",
        ConstantType::F32 => "f32",
        ConstantType::F64 => "f64",
        ConstantType::Str => "&str",
    }
}
