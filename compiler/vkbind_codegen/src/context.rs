//! Emission context and output buffer.
//!
//! The `EmitContext` holds the registry being projected, the shared type
//! resolver, and the text buffer for one artifact.

use std::borrow::Cow;

use vkbind_registry::{Registry, TypeResolver};

use crate::rust::names;
use crate::rust::types::RustTypeMapper;

/// Emission context for a single artifact.
pub struct EmitContext<'a> {
    /// Registry being projected.
    pub registry: &'a Registry,
    /// Resolver shared by every artifact of one generation run.
    pub resolver: &'a TypeResolver<'a>,
    /// Current indentation level.
    indent: usize,
    /// Generated code output.
    output: String,
}

impl<'a> EmitContext<'a> {
    pub fn new(registry: &'a Registry, resolver: &'a TypeResolver<'a>) -> Self {
        Self {
            registry,
            resolver,
            indent: 0,
            output: String::with_capacity(16 * 1024),
        }
    }

    /// Spell a native type in Rust. `owner` names the entity being emitted
    /// and only shows up in diagnostics.
    pub fn rust_type(&self, spelling: &str, owner: &str) -> String {
        RustTypeMapper::new(self.registry, self.resolver).map(spelling, owner)
    }

    /// Return-type suffix for a function signature: empty when the type
    /// resolves to `void`, otherwise ` -> T`.
    pub fn return_suffix(&self, spelling: &str, owner: &str) -> String {
        let mapper = RustTypeMapper::new(self.registry, self.resolver);
        if mapper.is_void(spelling) {
            String::new()
        } else {
            format!(" -> {}", mapper.map(spelling, owner))
        }
    }

    /// A registry name as a Rust identifier.
    #[inline]
    pub fn ident<'n>(&self, name: &'n str) -> Cow<'n, str> {
        names::escape(name)
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write a line to output (with indentation and newline).
    pub fn writeln(&mut self, s: &str) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
        self.output.push_str(s);
        self.output.push('\n');
    }

    /// Write a newline.
    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// Take the generated output.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
