//! The `stats` command: collection sizes of a registry.

use std::fmt;
use std::path::Path;

use vkbind_registry::{EnumKind, Registry};

use crate::GenerateError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub constants: usize,
    pub constant_aliases: usize,
    pub enums: usize,
    pub bitmasks: usize,
    pub enumerants: usize,
    pub structs: usize,
    pub unions: usize,
    pub handles: usize,
    pub dispatchable_handles: usize,
    pub typedefs: usize,
    pub base_types: usize,
    pub func_pointers: usize,
    pub commands: usize,
    pub command_aliases: usize,
}

impl RegistryStats {
    pub fn of(registry: &Registry) -> Self {
        Self {
            constants: registry.constants().len(),
            constant_aliases: registry.constants().iter().filter(|c| c.alias().is_some()).count(),
            enums: registry.enums().len(),
            bitmasks: registry
                .enums()
                .iter()
                .filter(|e| e.kind == EnumKind::Bitmask)
                .count(),
            enumerants: registry.enums().iter().map(|e| e.values.len()).sum(),
            structs: registry.structs().len(),
            unions: registry.unions().len(),
            handles: registry.handles().len(),
            dispatchable_handles: registry.handles().iter().filter(|h| h.dispatchable).count(),
            typedefs: registry.typedefs().len(),
            base_types: registry.base_type_count(),
            func_pointers: registry.func_pointers().len(),
            commands: registry.commands().len(),
            command_aliases: registry.commands().iter().filter(|c| c.alias.is_some()).count(),
        }
    }
}

impl fmt::Display for RegistryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("constants", self.constants, Some(("aliases", self.constant_aliases))),
            ("enums", self.enums, Some(("bitmasks", self.bitmasks))),
            ("enumerants", self.enumerants, None),
            ("structs", self.structs, None),
            ("unions", self.unions, None),
            ("handles", self.handles, Some(("dispatchable", self.dispatchable_handles))),
            ("typedefs", self.typedefs, None),
            ("base types", self.base_types, None),
            ("func pointers", self.func_pointers, None),
            ("commands", self.commands, Some(("aliases", self.command_aliases))),
        ];
        for (label, count, detail) in rows {
            write!(f, "{label:<14}{count:>6}")?;
            if let Some((what, n)) = detail {
                write!(f, "  ({n} {what})")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub fn registry_stats(registry: &Path) -> Result<RegistryStats, GenerateError> {
    let registry = Registry::load(registry)?;
    Ok(RegistryStats::of(&registry))
}
