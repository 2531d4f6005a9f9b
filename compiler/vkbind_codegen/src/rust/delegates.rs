//! Function-pointer type projection.
//!
//! `PFN_*` types are nullable in C, so they become
//! `Option<unsafe extern "system" fn(..)>`, which has the same layout as a
//! plain function pointer.

use vkbind_registry::FuncPointer;

use crate::context::EmitContext;

pub fn emit_delegates(ctx: &mut EmitContext<'_>) {
    let registry = ctx.registry;
    for (i, func) in registry.func_pointers().iter().enumerate() {
        if i > 0 {
            ctx.newline();
        }
        emit_delegate(ctx, func);
    }
}

fn emit_delegate(ctx: &mut EmitContext<'_>, func: &FuncPointer) {
    let name = ctx.ident(&func.name);
    let ret = ctx.return_suffix(&func.return_type, &func.name);

    if func.params.is_empty() {
        ctx.writeln(&format!(
            "pub type {name} = Option<unsafe extern \"system\" fn(){ret}>;"
        ));
        return;
    }

    ctx.writeln(&format!("pub type {name} = Option<"));
    ctx.indent();
    ctx.writeln("unsafe extern \"system\" fn(");
    ctx.indent();
    for param in &func.params {
        let ty = ctx.rust_type(&param.ty, &func.name);
        ctx.writeln(&format!("{}: {ty},", ctx.ident(&param.name)));
    }
    ctx.dedent();
    ctx.writeln(&format!("){ret},"));
    ctx.dedent();
    ctx.writeln(">;");
}
