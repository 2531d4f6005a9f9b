//! The built registry model.
//!
//! # Design
//!
//! - Collections are `Vec`s in declaration order; emission order follows them.
//! - `FxHashMap` name indices give O(1) lookup without disturbing that order.
//! - The model is read-only once built; resolution state lives in
//!   [`crate::TypeResolver`], not here.

use rustc_hash::FxHashMap;

use crate::entity::{
    Aggregate, Command, Constant, ConstantDef, ConstantType, Enumeration, FuncPointer, Handle,
    TypeDef,
};
use crate::native;

#[derive(Clone, Debug, Default)]
pub struct Registry {
    pub(crate) constants: Vec<Constant>,
    pub(crate) enums: Vec<Enumeration>,
    pub(crate) structs: Vec<Aggregate>,
    pub(crate) unions: Vec<Aggregate>,
    pub(crate) handles: Vec<Handle>,
    pub(crate) typedefs: Vec<TypeDef>,
    pub(crate) func_pointers: Vec<FuncPointer>,
    pub(crate) commands: Vec<Command>,

    /// Native type name -> scalar type name.
    pub(crate) base_types: FxHashMap<String, String>,

    pub(crate) index: NameIndex,
}

/// Name -> position indices, one per collection that is looked up by name.
#[derive(Clone, Debug, Default)]
pub(crate) struct NameIndex {
    pub(crate) constants: FxHashMap<String, usize>,
    pub(crate) enums: FxHashMap<String, usize>,
    pub(crate) structs: FxHashMap<String, usize>,
    pub(crate) unions: FxHashMap<String, usize>,
    pub(crate) handles: FxHashMap<String, usize>,
    pub(crate) typedefs: FxHashMap<String, usize>,
    pub(crate) func_pointers: FxHashMap<String, usize>,
    pub(crate) commands: FxHashMap<String, usize>,
}

impl Registry {
    // === Collections ===

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn enums(&self) -> &[Enumeration] {
        &self.enums
    }

    pub fn structs(&self) -> &[Aggregate] {
        &self.structs
    }

    pub fn unions(&self) -> &[Aggregate] {
        &self.unions
    }

    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    pub fn typedefs(&self) -> &[TypeDef] {
        &self.typedefs
    }

    pub fn func_pointers(&self) -> &[FuncPointer] {
        &self.func_pointers
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Number of rows in the base-type table.
    pub fn base_type_count(&self) -> usize {
        self.base_types.len()
    }

    // === Lookup Methods ===

    #[inline]
    pub fn constant(&self, name: &str) -> Option<&Constant> {
        self.index.constants.get(name).map(|&i| &self.constants[i])
    }

    #[inline]
    pub fn enumeration(&self, name: &str) -> Option<&Enumeration> {
        self.index.enums.get(name).map(|&i| &self.enums[i])
    }

    #[inline]
    pub fn structure(&self, name: &str) -> Option<&Aggregate> {
        self.index.structs.get(name).map(|&i| &self.structs[i])
    }

    #[inline]
    pub fn union(&self, name: &str) -> Option<&Aggregate> {
        self.index.unions.get(name).map(|&i| &self.unions[i])
    }

    #[inline]
    pub fn handle(&self, name: &str) -> Option<&Handle> {
        self.index.handles.get(name).map(|&i| &self.handles[i])
    }

    #[inline]
    pub fn typedef(&self, name: &str) -> Option<&TypeDef> {
        self.index.typedefs.get(name).map(|&i| &self.typedefs[i])
    }

    #[inline]
    pub fn func_pointer(&self, name: &str) -> Option<&FuncPointer> {
        self.index.func_pointers.get(name).map(|&i| &self.func_pointers[i])
    }

    #[inline]
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.index.commands.get(name).map(|&i| &self.commands[i])
    }

    /// The base-type table entry for `name`.
    #[inline]
    pub fn base_type(&self, name: &str) -> Option<&str> {
        self.base_types.get(name).map(String::as_str)
    }

    /// Whether `name` denotes a type this registry can account for: a declared
    /// entity, a typedef, a base type, or a native primitive.
    pub fn defines_type(&self, name: &str) -> bool {
        native::is_primitive(name)
            || self.base_types.contains_key(name)
            || self.index.typedefs.contains_key(name)
            || self.index.enums.contains_key(name)
            || self.index.structs.contains_key(name)
            || self.index.unions.contains_key(name)
            || self.index.handles.contains_key(name)
            || self.index.func_pointers.contains_key(name)
    }

    /// Follow a constant's alias chain to the constant that holds the value.
    ///
    /// The builder rejects broken and cyclic chains, so this returns `None`
    /// only for names that are not constants at all.
    pub fn alias_root<'a>(&'a self, constant: &'a Constant) -> Option<&'a Constant> {
        let mut current = constant;
        for _ in 0..=self.constants.len() {
            match &current.def {
                ConstantDef::Value { .. } => return Some(current),
                ConstantDef::Alias(target) => current = self.constant(target)?,
            }
        }
        None
    }

    /// The scalar type of a constant, following aliases.
    pub fn constant_type(&self, constant: &Constant) -> Option<ConstantType> {
        match self.alias_root(constant)?.def {
            ConstantDef::Value { ty, .. } => Some(ty),
            ConstantDef::Alias(_) => None,
        }
    }
}
