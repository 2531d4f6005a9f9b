//! Command table projection.
//!
//! Commands are resolved at runtime, so they are emitted as one table type:
//!
//! - a private `<name>Fn` signature per command
//! - `Commands`, holding an `Option<<name>Fn>` slot per command
//! - `Commands::load`, which fills every slot through a caller-supplied
//!   symbol loader
//! - one forwarding method per command, which panics if its slot is empty
//!
//! Aliased commands get no slot and no method; callers use the name the
//! alias points at.

use std::borrow::Cow;

use vkbind_registry::Command;

use crate::context::EmitContext;

/// Name of the emitted table type.
pub const TABLE: &str = "Commands";

/// Inherent methods of the table that a forwarder must not shadow.
const TABLE_METHODS: &[&str] = &["load", "unbound"];

pub fn emit_commands(ctx: &mut EmitContext<'_>) {
    let registry = ctx.registry;
    let commands: Vec<&Command> = registry
        .commands()
        .iter()
        .filter(|c| c.alias.is_none())
        .collect();
    tracing::debug!(
        bound = commands.len(),
        aliased = registry.commands().len() - commands.len(),
        "emitting command table"
    );

    for command in &commands {
        emit_signature(ctx, command);
    }
    if !commands.is_empty() {
        ctx.newline();
    }

    emit_table(ctx, &commands);
    ctx.newline();
    ctx.writeln(&format!("impl {TABLE} {{"));
    ctx.indent();
    emit_unbound(ctx, &commands);
    ctx.newline();
    emit_load(ctx, &commands);
    for command in &commands {
        ctx.newline();
        emit_forwarder(ctx, command);
    }
    ctx.dedent();
    ctx.writeln("}");
    ctx.newline();
    emit_default(ctx);
}

/// Name of a command's forwarding method. Commands that collide with the
/// table's own methods get a trailing underscore, like keywords do.
fn method_name<'c>(ctx: &EmitContext<'_>, command: &'c Command) -> Cow<'c, str> {
    if TABLE_METHODS.contains(&command.name()) {
        Cow::Owned(format!("{}_", command.name()))
    } else {
        ctx.ident(command.name())
    }
}

fn signature_name(command: &Command) -> String {
    format!("{}Fn", command.name())
}

/// `name: T, ...` for a declaration.
fn parameter_list(ctx: &EmitContext<'_>, command: &Command) -> String {
    command
        .params
        .iter()
        .map(|p| format!("{}: {}", ctx.ident(&p.name), ctx.rust_type(&p.ty, command.name())))
        .collect::<Vec<_>>()
        .join(", ")
}

fn emit_signature(ctx: &mut EmitContext<'_>, command: &Command) {
    let params = parameter_list(ctx, command);
    let ret = ctx.return_suffix(&command.prototype.return_type, command.name());
    ctx.writeln(&format!(
        "type {} = unsafe extern \"system\" fn({params}){ret};",
        signature_name(command)
    ));
}

fn emit_table(ctx: &mut EmitContext<'_>, commands: &[&Command]) {
    ctx.writeln("/// Runtime-resolved entry points, one slot per command.");
    ctx.writeln("#[derive(Clone, Copy)]");
    ctx.writeln(&format!("pub struct {TABLE} {{"));
    ctx.indent();
    for command in commands {
        ctx.writeln(&format!(
            "{}: Option<{}>,",
            ctx.ident(command.name()),
            signature_name(command)
        ));
    }
    ctx.dedent();
    ctx.writeln("}");
}

fn emit_unbound(ctx: &mut EmitContext<'_>, commands: &[&Command]) {
    ctx.writeln("/// A table with every slot empty.");
    ctx.writeln("pub const fn unbound() -> Self {");
    ctx.indent();
    ctx.writeln("Self {");
    ctx.indent();
    for command in commands {
        ctx.writeln(&format!("{}: None,", ctx.ident(command.name())));
    }
    ctx.dedent();
    ctx.writeln("}");
    ctx.dedent();
    ctx.writeln("}");
}

fn emit_load(ctx: &mut EmitContext<'_>, commands: &[&Command]) {
    ctx.writeln("/// Fill every slot with the address `loader` returns for its name.");
    ctx.writeln("/// A null address leaves the slot empty.");
    ctx.writeln("///");
    ctx.writeln("/// # Safety");
    ctx.writeln("///");
    ctx.writeln("/// Every non-null address must point to a function with the signature");
    ctx.writeln("/// the registry declares for that name.");
    ctx.writeln("pub unsafe fn load<F>(mut loader: F) -> Self");
    ctx.writeln("where");
    ctx.indent();
    ctx.writeln("F: FnMut(&::core::ffi::CStr) -> *const ::core::ffi::c_void,");
    ctx.dedent();
    ctx.writeln("{");
    ctx.indent();
    if commands.is_empty() {
        ctx.writeln("let _ = &mut loader;");
    }
    ctx.writeln("Self {");
    ctx.indent();
    for command in commands {
        ctx.writeln(&format!(
            "{}: unsafe {{ ::core::mem::transmute::<*const ::core::ffi::c_void, Option<{}>>(loader(c\"{}\")) }},",
            ctx.ident(command.name()),
            signature_name(command),
            command.name()
        ));
    }
    ctx.dedent();
    ctx.writeln("}");
    ctx.dedent();
    ctx.writeln("}");
}

fn emit_forwarder(ctx: &mut EmitContext<'_>, command: &Command) {
    let slot = ctx.ident(command.name());
    let name = method_name(ctx, command);
    let params = parameter_list(ctx, command);
    let ret = ctx.return_suffix(&command.prototype.return_type, command.name());
    let args = command
        .params
        .iter()
        .map(|p| ctx.ident(&p.name))
        .collect::<Vec<_>>()
        .join(", ");

    ctx.writeln(&format!("/// Calls `{}`.", command.name()));
    ctx.writeln("///");
    ctx.writeln("/// # Safety");
    ctx.writeln("///");
    ctx.writeln("/// The caller upholds the command's native contract.");
    ctx.writeln("///");
    ctx.writeln("/// # Panics");
    ctx.writeln("///");
    ctx.writeln("/// Panics if the command was not bound by [`Self::load`].");
    if params.is_empty() {
        ctx.writeln(&format!("pub unsafe fn {name}(&self){ret} {{"));
    } else {
        ctx.writeln(&format!("pub unsafe fn {name}(&self, {params}){ret} {{"));
    }
    ctx.indent();
    ctx.writeln(&format!(
        "unsafe {{ (self.{slot}.expect(\"{} is not bound\"))({args}) }}",
        command.name()
    ));
    ctx.dedent();
    ctx.writeln("}");
}

fn emit_default(ctx: &mut EmitContext<'_>) {
    ctx.writeln(&format!("impl Default for {TABLE} {{"));
    ctx.indent();
    ctx.writeln("fn default() -> Self {");
    ctx.indent();
    ctx.writeln("Self::unbound()");
    ctx.dedent();
    ctx.writeln("}");
    ctx.dedent();
    ctx.writeln("}");
}
