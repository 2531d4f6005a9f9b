//! Bindings generated by vkbind from `registry.json`.
//!
//! Nothing here is written by hand: the build script emits the seven
//! artifacts and this crate only gives them a module to live in, the same
//! way a downstream binding crate would.

#[allow(
    non_camel_case_types,
    non_snake_case,
    non_upper_case_globals,
    dead_code,
    clippy::all,
    clippy::pedantic
)]
pub mod vk {
    include!(concat!(env!("OUT_DIR"), "/constants.rs"));
    include!(concat!(env!("OUT_DIR"), "/delegates.rs"));
    include!(concat!(env!("OUT_DIR"), "/enums.rs"));
    include!(concat!(env!("OUT_DIR"), "/unions.rs"));
    include!(concat!(env!("OUT_DIR"), "/structs.rs"));
    include!(concat!(env!("OUT_DIR"), "/handles.rs"));
    include!(concat!(env!("OUT_DIR"), "/commands.rs"));
}
