//! Struct and union projection.
//!
//! Both are `#[repr(C)]` and `Copy`. Array members differ: a union member
//! keeps a fixed-size array, while a struct member is flattened into one
//! field per element (`name_0`, `name_1`, ...). The field layout is the same
//! either way.

use vkbind_registry::{Aggregate, Member};

use crate::context::EmitContext;

pub fn emit_structs(ctx: &mut EmitContext<'_>) {
    let registry = ctx.registry;
    for (i, aggregate) in registry.structs().iter().enumerate() {
        if i > 0 {
            ctx.newline();
        }
        emit_aggregate(ctx, aggregate, "struct", |ctx, member| {
            let ty = ctx.rust_type(&member.ty, &aggregate.name);
            if member.is_array() {
                for element in 0..member.count.get() {
                    ctx.writeln(&format!("pub {}_{element}: {ty},", member.name));
                }
            } else {
                ctx.writeln(&format!("pub {}: {ty},", ctx.ident(&member.name)));
            }
        });
    }
}

pub fn emit_unions(ctx: &mut EmitContext<'_>) {
    let registry = ctx.registry;
    for (i, aggregate) in registry.unions().iter().enumerate() {
        if i > 0 {
            ctx.newline();
        }
        emit_aggregate(ctx, aggregate, "union", |ctx, member| {
            let ty = ctx.rust_type(&member.ty, &aggregate.name);
            let name = ctx.ident(&member.name);
            if member.is_array() {
                ctx.writeln(&format!("pub {name}: [{ty}; {}],", member.count));
            } else {
                ctx.writeln(&format!("pub {name}: {ty},"));
            }
        });
    }
}

fn emit_aggregate(
    ctx: &mut EmitContext<'_>,
    aggregate: &Aggregate,
    keyword: &str,
    mut emit_member: impl FnMut(&mut EmitContext<'_>, &Member),
) {
    ctx.writeln("#[repr(C)]");
    ctx.writeln("#[derive(Clone, Copy)]");
    ctx.writeln(&format!("pub {keyword} {} {{", ctx.ident(&aggregate.name)));
    ctx.indent();
    for member in &aggregate.members {
        emit_member(ctx, member);
    }
    ctx.dedent();
    ctx.writeln("}");
}
