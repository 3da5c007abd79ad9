//! Manifest utility for Phytotrust model bundles.
//!
//! Hashes the resources of a model directory and writes `manifest.json`,
//! which binds them for verification at startup.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin write_manifest -- <model_dir>
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use phytotrust::adapters::bundle::Manifest;

fn usage() -> String {
    "Usage: write_manifest <model_dir>".to_string()
}

fn parse_args() -> Result<PathBuf> {
    let mut args = std::env::args().skip(1);
    let dir = match args.next().as_deref() {
        None | Some("-h") | Some("--help") => bail!(usage()),
        Some(dir) => PathBuf::from(dir),
    };
    if args.next().is_some() {
        bail!(usage());
    }
    Ok(dir)
}

fn main() -> Result<()> {
    let model_dir = parse_args()?;

    let manifest = Manifest::generate(&model_dir)
        .with_context(|| format!("Failed to hash resources in {model_dir:?}"))?;
    let path = manifest
        .write(&model_dir)
        .with_context(|| format!("Failed to write manifest into {model_dir:?}"))?;

    for (name, digest) in &manifest.files {
        println!("{digest}  {name}");
    }
    println!("Wrote manifest: {path:?}");

    Ok(())
}
