//! Generate bindings for `registry.json` into `OUT_DIR`.

use std::env::var;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use vkbind_codegen::{emit, EmitOptions};
use vkbind_registry::Registry;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=registry.json");

    let manifest_dir = PathBuf::from(var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(var("OUT_DIR")?);

    let registry = Registry::load(&manifest_dir.join("registry.json"))?;
    for file in emit(&registry, &EmitOptions::default()) {
        let mut out = File::create(out_dir.join(file.file_name()))?;
        out.write_all(file.code.as_bytes())?;
    }
    Ok(())
}
