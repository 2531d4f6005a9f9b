//! Registry model builder.
//!
//! Turns a [`RawRegistry`] into a checked [`Registry`] in two passes:
//!
//! 1. **Lowering** - each raw row becomes an entity; local invariants
//!    (non-empty names, unique names, element counts, bit widths) are checked.
//! 2. **Cross-referencing** - aliases and typedef targets are checked against
//!    the lowered model, including cycle detection.
//!
//! Problems from both passes are collected; any problem fails the whole build.

use std::num::NonZeroU32;
use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::entity::{
    Aggregate, Collection, Command, Constant, ConstantDef, EnumValue, EnumWidth, Enumeration,
    FuncPointer, Handle, Member, Param, Prototype, TypeDef,
};
use crate::error::{BuildError, Location, ProblemKind, Problems};
use crate::native;
use crate::raw::{RawAggregate, RawConstant, RawEnum, RawFunction, RawParam, RawRegistry};
use crate::registry::{NameIndex, Registry};

impl Registry {
    /// Read and build a registry from a JSON document on disk.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let source = std::fs::read_to_string(path).map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }

    /// Build a registry from a JSON document.
    pub fn from_json(source: &str) -> Result<Self, BuildError> {
        let raw = RawRegistry::from_json(source)?;
        Self::build(raw)
    }

    /// Build a registry from an already parsed document.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn build(raw: RawRegistry) -> Result<Self, BuildError> {
        let mut builder = RegistryBuilder::default();
        let registry = builder.lower(raw);
        tracing::debug!(problems = builder.problems.len(), "lowering complete");

        builder.check_references(&registry);
        tracing::debug!(problems = builder.problems.len(), "cross-referencing complete");

        if !builder.problems.is_empty() {
            return Err(BuildError::Invalid(builder.problems));
        }

        tracing::info!(
            constants = registry.constants.len(),
            enums = registry.enums.len(),
            structs = registry.structs.len(),
            unions = registry.unions.len(),
            handles = registry.handles.len(),
            typedefs = registry.typedefs.len(),
            base_types = registry.base_types.len(),
            func_pointers = registry.func_pointers.len(),
            commands = registry.commands.len(),
            "registry built"
        );
        Ok(registry)
    }
}

#[derive(Default)]
struct RegistryBuilder {
    problems: Problems,
    /// Document position of each lowered constant. Constants that fail to
    /// lower are dropped, so positions in the model can lag behind.
    constant_rows: Vec<usize>,
    /// Constants that were declared but failed to lower. Aliases to them
    /// are not reported a second time.
    unlowered_constants: FxHashSet<String>,
}

impl RegistryBuilder {
    // === Lowering ===

    fn lower(&mut self, raw: RawRegistry) -> Registry {
        self.check_names(Collection::Constants, raw.constants.iter().map(|c| c.name.as_str()));
        self.check_names(Collection::Enums, raw.enums.iter().map(|e| e.name.as_str()));
        self.check_names(Collection::Structs, raw.structs.iter().map(|s| s.name.as_str()));
        self.check_names(Collection::Unions, raw.unions.iter().map(|u| u.name.as_str()));
        self.check_names(Collection::Handles, raw.handles.iter().map(|h| h.name.as_str()));
        self.check_names(Collection::TypeDefs, raw.typedefs.iter().map(|t| t.name.as_str()));
        self.check_names(Collection::BaseTypes, raw.base_types.iter().map(|t| t.name.as_str()));
        self.check_names(
            Collection::FuncPointers,
            raw.func_pointers.iter().map(|f| f.name.as_str()),
        );
        self.check_names(Collection::Commands, raw.commands.iter().map(|c| c.name.as_str()));

        let mut constants = Vec::with_capacity(raw.constants.len());
        for (i, raw_constant) in raw.constants.into_iter().enumerate() {
            let name = raw_constant.name.clone();
            match self.lower_constant(i, raw_constant) {
                Some(constant) => {
                    self.constant_rows.push(i);
                    constants.push(constant);
                }
                None => {
                    self.unlowered_constants.insert(name);
                }
            }
        }

        let enums: Vec<Enumeration> = raw
            .enums
            .into_iter()
            .enumerate()
            .map(|(i, e)| self.lower_enum(i, e))
            .collect();

        let structs = self.lower_aggregates(Collection::Structs, raw.structs);
        let unions = self.lower_aggregates(Collection::Unions, raw.unions);

        let handles: Vec<Handle> = raw
            .handles
            .into_iter()
            .map(|h| Handle {
                name: h.name,
                dispatchable: h.dispatchable,
            })
            .collect();

        let typedefs: Vec<TypeDef> = raw
            .typedefs
            .into_iter()
            .map(|t| TypeDef {
                name: t.name,
                target: t.ty,
            })
            .collect();

        let base_types: FxHashMap<String, String> =
            raw.base_types.into_iter().map(|t| (t.name, t.ty)).collect();

        let func_pointers: Vec<FuncPointer> = raw
            .func_pointers
            .into_iter()
            .enumerate()
            .map(|(i, f)| self.lower_func_pointer(i, f))
            .collect();

        let commands: Vec<Command> = raw
            .commands
            .into_iter()
            .enumerate()
            .map(|(i, c)| self.lower_command(i, c))
            .collect();

        let index = NameIndex {
            constants: index_of(constants.iter().map(|c| c.name.as_str())),
            enums: index_of(enums.iter().map(|e| e.name.as_str())),
            structs: index_of(structs.iter().map(|s| s.name.as_str())),
            unions: index_of(unions.iter().map(|u| u.name.as_str())),
            handles: index_of(handles.iter().map(|h| h.name.as_str())),
            typedefs: index_of(typedefs.iter().map(|t| t.name.as_str())),
            func_pointers: index_of(func_pointers.iter().map(|f| f.name.as_str())),
            commands: index_of(commands.iter().map(Command::name)),
        };

        Registry {
            constants,
            enums,
            structs,
            unions,
            handles,
            typedefs,
            func_pointers,
            commands,
            base_types,
            index,
        }
    }

    /// Report empty and duplicate names within one collection.
    fn check_names<'a>(&mut self, collection: Collection, names: impl Iterator<Item = &'a str>) {
        let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
        for (index, name) in names.enumerate() {
            if name.trim().is_empty() {
                self.problems.push(
                    Location::new(collection, index, name),
                    ProblemKind::EmptyName { what: "entity" },
                );
                continue;
            }
            if let Some(&first) = seen.get(name) {
                self.problems.push(
                    Location::new(collection, index, name),
                    ProblemKind::DuplicateName { first },
                );
            } else {
                seen.insert(name, index);
            }
        }
    }

    /// Report empty and repeated names among an entity's members.
    fn check_member_names<'a>(
        &mut self,
        location: &Location,
        what: &'static str,
        names: impl Iterator<Item = &'a str>,
    ) {
        let mut seen = FxHashSet::default();
        for name in names {
            if name.trim().is_empty() {
                self.problems
                    .push(location.clone(), ProblemKind::EmptyName { what });
            } else if !seen.insert(name) {
                self.problems.push(
                    location.clone(),
                    ProblemKind::DuplicateMember {
                        member: name.to_string(),
                    },
                );
            }
        }
    }

    fn lower_constant(&mut self, index: usize, raw: RawConstant) -> Option<Constant> {
        // An alias ignores any value or type given alongside it.
        let def = match (raw.alias, raw.ty, raw.value) {
            (Some(target), _, _) => ConstantDef::Alias(target),
            (None, Some(ty), Some(literal)) => ConstantDef::Value { ty, literal },
            (None, _, _) => {
                self.problems.push(
                    Location::new(Collection::Constants, index, &raw.name),
                    ProblemKind::MissingConstantValue,
                );
                return None;
            }
        };
        Some(Constant {
            name: raw.name,
            def,
        })
    }

    fn lower_enum(&mut self, index: usize, raw: RawEnum) -> Enumeration {
        let location = Location::new(Collection::Enums, index, &raw.name);
        let width = match raw.bitwidth {
            None | Some(32) => EnumWidth::W32,
            Some(64) => EnumWidth::W64,
            Some(width) => {
                self.problems
                    .push(location.clone(), ProblemKind::InvalidBitWidth { width });
                EnumWidth::W32
            }
        };
        self.check_member_names(&location, "enumerant", raw.values.iter().map(|v| v.name.as_str()));

        Enumeration {
            name: raw.name,
            kind: raw.kind,
            width,
            values: raw
                .values
                .into_iter()
                .map(|v| EnumValue {
                    name: v.name,
                    value: v.value,
                })
                .collect(),
        }
    }

    fn lower_aggregates(&mut self, collection: Collection, raw: Vec<RawAggregate>) -> Vec<Aggregate> {
        raw.into_iter()
            .enumerate()
            .map(|(index, aggregate)| {
                let location = Location::new(collection, index, &aggregate.name);
                // A Rust union needs at least one field.
                if collection == Collection::Unions && aggregate.members.is_empty() {
                    self.problems.push(location.clone(), ProblemKind::EmptyUnion);
                }
                self.check_member_names(
                    &location,
                    "member",
                    aggregate.members.iter().map(|m| m.name.as_str()),
                );

                let members = aggregate
                    .members
                    .into_iter()
                    .map(|m| {
                        let count = NonZeroU32::new(m.count).unwrap_or_else(|| {
                            self.problems.push(
                                location.clone(),
                                ProblemKind::ZeroElementCount {
                                    member: m.name.clone(),
                                },
                            );
                            NonZeroU32::MIN
                        });
                        Member {
                            name: m.name,
                            ty: m.ty,
                            count,
                        }
                    })
                    .collect();

                Aggregate {
                    name: aggregate.name,
                    members,
                }
            })
            .collect()
    }

    fn lower_params(&mut self, location: &Location, raw: Vec<RawParam>) -> Vec<Param> {
        self.check_member_names(location, "parameter", raw.iter().map(|p| p.name.as_str()));
        raw.into_iter()
            .map(|p| Param {
                name: p.name,
                ty: p.ty,
            })
            .collect()
    }

    fn lower_func_pointer(&mut self, index: usize, raw: RawFunction) -> FuncPointer {
        let location = Location::new(Collection::FuncPointers, index, &raw.name);
        if let Some(target) = raw.alias {
            self.problems
                .push(location.clone(), ProblemKind::UnexpectedAlias { target });
        }
        let params = self.lower_params(&location, raw.parameters);
        FuncPointer {
            name: raw.name,
            return_type: raw.return_type,
            params,
        }
    }

    fn lower_command(&mut self, index: usize, raw: RawFunction) -> Command {
        let location = Location::new(Collection::Commands, index, &raw.name);
        let params = self.lower_params(&location, raw.parameters);
        Command {
            prototype: Prototype {
                return_type: raw.return_type,
                name: raw.name,
            },
            params,
            alias: raw.alias,
        }
    }

    // === Cross-referencing ===

    fn check_references(&mut self, registry: &Registry) {
        self.check_constant_aliases(registry);
        self.check_command_aliases(registry);
        self.check_typedefs(registry);
    }

    fn check_constant_aliases(&mut self, registry: &Registry) {
        for (row, constant) in self.constant_rows.iter().zip(&registry.constants) {
            if constant.alias().is_none() {
                continue;
            }
            let location = Location::new(Collection::Constants, *row, &constant.name);
            let next = |name: &str| registry.constant(name).and_then(Constant::alias);
            if let Some(kind) = walk_alias_chain(&constant.name, constant.alias(), next, |name| {
                registry.constant(name).is_some() || self.unlowered_constants.contains(name)
            }) {
                self.problems.push(location, kind);
            }
        }
    }

    fn check_command_aliases(&mut self, registry: &Registry) {
        for (index, command) in registry.commands.iter().enumerate() {
            if command.alias.is_none() {
                continue;
            }
            let location = Location::new(Collection::Commands, index, command.name());
            let next = |name: &str| registry.command(name).and_then(|c| c.alias.as_deref());
            if let Some(kind) = walk_alias_chain(command.name(), command.alias.as_deref(), next, |name| {
                registry.command(name).is_some()
            }) {
                self.problems.push(location, kind);
            }
        }
    }

    fn check_typedefs(&mut self, registry: &Registry) {
        for (index, typedef) in registry.typedefs.iter().enumerate() {
            let location = Location::new(Collection::TypeDefs, index, &typedef.name);
            let target = native::base_name(&typedef.target);
            if !registry.defines_type(target) {
                self.problems.push(
                    location,
                    ProblemKind::UnknownTypedefTarget {
                        target: typedef.target.clone(),
                    },
                );
                continue;
            }

            // Mirror resolution: a base-type row ends the chain before the
            // typedef table is consulted.
            let mut visited = FxHashSet::default();
            visited.insert(typedef.name.as_str());
            let mut current = target;
            while registry.base_type(current).is_none() {
                let Some(next) = registry.typedef(current) else {
                    break;
                };
                if !visited.insert(current) {
                    self.problems.push(
                        location,
                        ProblemKind::TypedefCycle {
                            target: current.to_string(),
                        },
                    );
                    break;
                }
                current = native::base_name(&next.target);
            }
        }
    }
}

/// Follow an alias chain starting at `start`. Returns the problem that stops
/// the chain from reaching a non-alias entity, if any.
fn walk_alias_chain<'a>(
    start: &'a str,
    first: Option<&'a str>,
    next: impl Fn(&str) -> Option<&'a str>,
    exists: impl Fn(&str) -> bool,
) -> Option<ProblemKind> {
    let mut visited = FxHashSet::default();
    visited.insert(start);
    let mut target = first;
    while let Some(name) = target {
        if !exists(name) {
            return Some(ProblemKind::UnknownAlias {
                target: name.to_string(),
            });
        }
        if !visited.insert(name) {
            return Some(ProblemKind::AliasCycle {
                target: name.to_string(),
            });
        }
        target = next(name);
    }
    None
}

fn index_of<'a>(names: impl Iterator<Item = &'a str>) -> FxHashMap<String, usize> {
    let mut index = FxHashMap::default();
    for (i, name) in names.enumerate() {
        index.entry(name.to_string()).or_insert(i);
    }
    index
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
