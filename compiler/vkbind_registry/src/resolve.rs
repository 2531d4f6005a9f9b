//! Typedef and base-type resolution.
//!
//! Resolution maps a registry type name to the scalar name the emitter should
//! spell:
//!
//! 1. a base-type row wins immediately;
//! 2. a typedef is followed to its target, and the walk repeats;
//! 3. anything else (enums, structs, handles, native primitives) is returned
//!    unchanged.
//!
//! Each query walks the chain once, however deep it is, and the answer is
//! memoized. The memo sits behind a lock so one resolver can serve emitters
//! running on several threads.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::registry::Registry;

pub struct TypeResolver<'r> {
    registry: &'r Registry,
    memo: RwLock<FxHashMap<String, String>>,
}

impl<'r> TypeResolver<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            memo: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Resolve `name` to its terminal scalar name.
    pub fn resolve(&self, name: &str) -> String {
        if let Some(hit) = self.memo.read().get(name) {
            return hit.clone();
        }

        let resolved = self.walk(name).to_string();
        tracing::trace!(name, resolved = %resolved, "resolved type");
        self.memo
            .write()
            .insert(name.to_string(), resolved.clone());
        resolved
    }

    /// The chain of names visited while resolving `name`, starting with
    /// `name` itself and ending with the resolved name.
    pub fn chain(&self, name: &str) -> Vec<String> {
        let mut chain = vec![name.to_string()];
        let mut current = name;
        for _ in 0..=self.registry.typedefs().len() {
            if let Some(base) = self.registry.base_type(current) {
                chain.push(base.to_string());
                return chain;
            }
            match self.registry.typedef(current) {
                Some(typedef) => {
                    current = &typedef.target;
                    chain.push(current.to_string());
                }
                None => return chain,
            }
        }
        chain
    }

    /// Number of memoized answers.
    pub fn cached(&self) -> usize {
        self.memo.read().len()
    }

    fn walk<'a>(&'a self, name: &'a str) -> &'a str {
        let mut current = name;
        // The builder rejects typedef cycles; the bound only keeps a
        // hand-assembled registry from spinning forever.
        for _ in 0..=self.registry.typedefs().len() {
            if let Some(base) = self.registry.base_type(current) {
                return base;
            }
            match self.registry.typedef(current) {
                Some(typedef) => current = &typedef.target,
                None => return current,
            }
        }
        current
    }
}
