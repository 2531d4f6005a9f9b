//! Enumeration projection.
//!
//! Enumerations are open sets in C: a driver may return a value the headers
//! never listed. They become transparent newtypes with one associated const
//! per enumerant, so any bit pattern is a valid value. Bitmasks go through
//! `bitflags!` instead, which gives them set operations.

use vkbind_registry::{EnumKind, EnumWidth, Enumeration};

use crate::context::EmitContext;

/// Member emitted for an enumeration that lists no values.
const EMPTY_MEMBER: &str = "None";

pub fn emit_enums(ctx: &mut EmitContext<'_>) {
    let registry = ctx.registry;
    for (i, enumeration) in registry.enums().iter().enumerate() {
        if i > 0 {
            ctx.newline();
        }
        match enumeration.kind {
            EnumKind::Enum => emit_value_enum(ctx, enumeration),
            EnumKind::Bitmask => emit_bitmask(ctx, enumeration),
        }
    }
}

fn emit_value_enum(ctx: &mut EmitContext<'_>, enumeration: &Enumeration) {
    let name = ctx.ident(&enumeration.name);
    let repr = storage(enumeration);

    ctx.writeln("#[repr(transparent)]");
    ctx.writeln("#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]");
    ctx.writeln(&format!("pub struct {name}(pub {repr});"));
    ctx.newline();
    ctx.writeln(&format!("impl {name} {{"));
    ctx.indent();
    for (member, value) in members(enumeration) {
        ctx.writeln(&format!("pub const {}: Self = Self({value});", ctx.ident(member)));
    }
    ctx.dedent();
    ctx.writeln("}");
}

fn emit_bitmask(ctx: &mut EmitContext<'_>, enumeration: &Enumeration) {
    let name = ctx.ident(&enumeration.name);
    let repr = storage(enumeration);

    ctx.writeln("::bitflags::bitflags! {");
    ctx.indent();
    ctx.writeln("#[repr(transparent)]");
    ctx.writeln("#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]");
    ctx.writeln(&format!("pub struct {name}: {repr} {{"));
    ctx.indent();
    for (member, value) in members(enumeration) {
        ctx.writeln(&format!("const {} = {value};", ctx.ident(member)));
    }
    ctx.dedent();
    ctx.writeln("}");
    ctx.dedent();
    ctx.writeln("}");
}

/// The underlying Rust integer of an enumeration.
pub fn storage(enumeration: &Enumeration) -> &'static str {
    match (enumeration.kind, enumeration.width) {
        (EnumKind::Enum, EnumWidth::W32) => "i32",
        (EnumKind::Enum, EnumWidth::W64) => "i64",
        (EnumKind::Bitmask, EnumWidth::W32) => "u32",
        (EnumKind::Bitmask, EnumWidth::W64) => "u64",
    }
}

/// Members in declaration order, with values already rendered for the
/// storage type. An empty enumeration yields the single `None = 0` member.
fn members(enumeration: &Enumeration) -> Vec<(&str, String)> {
    if enumeration.values.is_empty() {
        return vec![(EMPTY_MEMBER, "0".to_string())];
    }
    enumeration
        .values
        .iter()
        .map(|v| (v.name.as_str(), render_value(v.value, enumeration)))
        .collect()
}

/// Values wrap into the storage type the way C's implicit conversion does,
/// so `0x80000000` in a 32-bit enum is `-2147483648`.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "C conversion semantics")]
fn render_value(value: i64, enumeration: &Enumeration) -> String {
    match (enumeration.kind, enumeration.width) {
        (EnumKind::Enum, EnumWidth::W32) => (value as i32).to_string(),
        (EnumKind::Enum, EnumWidth::W64) => value.to_string(),
        (EnumKind::Bitmask, EnumWidth::W32) => (value as u32).to_string(),
        (EnumKind::Bitmask, EnumWidth::W64) => (value as u64).to_string(),
    }
}
