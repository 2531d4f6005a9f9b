//! The `resolve` command: show how type names resolve and what Rust type
//! they project to.

use std::fmt;
use std::path::Path;

use vkbind_codegen::rust::RustTypeMapper;
use vkbind_registry::{Registry, TypeResolver};

use crate::GenerateError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub name: String,
    /// Every name visited, starting with `name`.
    pub chain: Vec<String>,
    /// The projected Rust type.
    pub rust: String,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.chain.join(" -> "), self.rust)
    }
}

pub fn resolve_types(registry: &Path, names: &[String]) -> Result<Vec<Resolution>, GenerateError> {
    let registry = Registry::load(registry)?;
    Ok(resolve_in(&registry, names))
}

/// Resolve `names` against an already built registry.
pub fn resolve_in(registry: &Registry, names: &[String]) -> Vec<Resolution> {
    let resolver = TypeResolver::new(registry);
    let mapper = RustTypeMapper::new(registry, &resolver);
    names
        .iter()
        .map(|name| Resolution {
            name: name.clone(),
            chain: resolver.chain(name),
            rust: mapper.map(name, "resolve"),
        })
        .collect()
}
