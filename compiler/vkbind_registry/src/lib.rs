//! API registry model for vkbind.
//!
//! This crate owns everything on the registry side of the pipeline:
//!
//! ```text
//!   registry.json
//!        ↓
//!   RawRegistry        (serde document, no invariants)
//!        ↓
//!   Registry::build    (lowering + cross-reference checks, all-or-nothing)
//!        ↓
//!   Registry           (immutable collections + name indices)
//!        ↓
//!   TypeResolver       (typedef / base-type resolution, memoized)
//! ```
//!
//! The model stays target-agnostic: type names are kept in their native
//! spelling, and turning them into a target language is the emitter's job.

mod builder;
pub mod entity;
mod error;
pub mod native;
pub mod raw;
mod registry;
mod resolve;

pub use entity::{
    Aggregate, Collection, Command, Constant, ConstantDef, ConstantType, EnumKind, EnumValue,
    EnumWidth, Enumeration, FuncPointer, Handle, Member, Param, Prototype, TypeDef,
};
pub use error::{BuildError, Location, Problem, ProblemKind, Problems};
pub use raw::RawRegistry;
pub use registry::Registry;
pub use resolve::TypeResolver;
