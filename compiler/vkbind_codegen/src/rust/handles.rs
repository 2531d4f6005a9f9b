//! Handle projection.
//!
//! Dispatchable handles are pointers to driver objects; non-dispatchable
//! handles are 64-bit values whose meaning is up to the driver. Both become
//! transparent newtypes with a null value.

use vkbind_registry::Handle;

use crate::context::EmitContext;

const DISPATCHABLE: &str = "*mut ::core::ffi::c_void";
const NON_DISPATCHABLE: &str = "u64";

pub fn emit_handles(ctx: &mut EmitContext<'_>) {
    let registry = ctx.registry;
    for (i, handle) in registry.handles().iter().enumerate() {
        if i > 0 {
            ctx.newline();
        }
        emit_handle(ctx, handle);
    }
}

fn emit_handle(ctx: &mut EmitContext<'_>, handle: &Handle) {
    let name = ctx.ident(&handle.name);
    let (repr, null) = if handle.dispatchable {
        (DISPATCHABLE, "::core::ptr::null_mut()")
    } else {
        (NON_DISPATCHABLE, "0")
    };

    ctx.writeln("#[repr(transparent)]");
    ctx.writeln("#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]");
    ctx.writeln(&format!("pub struct {name}(pub {repr});"));
    ctx.newline();

    ctx.writeln(&format!("impl {name} {{"));
    ctx.indent();
    ctx.writeln(&format!("pub const NULL: Self = Self({null});"));
    ctx.newline();
    ctx.writeln("pub fn is_null(self) -> bool {");
    ctx.indent();
    ctx.writeln("self == Self::NULL");
    ctx.dedent();
    ctx.writeln("}");
    ctx.dedent();
    ctx.writeln("}");
    ctx.newline();

    ctx.writeln(&format!("impl Default for {name} {{"));
    ctx.indent();
    ctx.writeln("fn default() -> Self {");
    ctx.indent();
    ctx.writeln("Self::NULL");
    ctx.dedent();
    ctx.writeln("}");
    ctx.dedent();
    ctx.writeln("}");
    ctx.newline();

    ctx.writeln(&format!("impl From<{repr}> for {name} {{"));
    ctx.indent();
    ctx.writeln(&format!("fn from(raw: {repr}) -> Self {{"));
    ctx.indent();
    ctx.writeln("Self(raw)");
    ctx.dedent();
    ctx.writeln("}");
    ctx.dedent();
    ctx.writeln("}");
    ctx.newline();

    ctx.writeln(&format!("impl PartialEq<{repr}> for {name} {{"));
    ctx.indent();
    ctx.writeln(&format!("fn eq(&self, other: &{repr}) -> bool {{"));
    ctx.indent();
    ctx.writeln("self.0 == *other");
    ctx.dedent();
    ctx.writeln("}");
    ctx.dedent();
    ctx.writeln("}");
}
