//! Example: load an OBJ file with the core API and normalize it
//!
//! Usage: cargo run --example load_obj -- path/to/file.obj

use std::env;

use anyhow::{bail, Context, Result};
use objview_core::Mesh;

fn main() -> Result<()> {
    env_logger::init();

    let Some(path) = env::args().nth(1) else {
        bail!("usage: load_obj <obj-file>");
    };

    let mut mesh = Mesh::new();
    let counts = mesh
        .count_from_path(&path)
        .with_context(|| format!("counting {path}"))?;
    println!(
        "{path}: {} vertices, {} faces (triangulated)",
        counts.vertices, counts.faces
    );

    if let Err(err) = mesh.parse_from_path(&path) {
        mesh.clear();
        return Err(err).with_context(|| format!("parsing {path}"));
    }

    mesh.center()?;
    mesh.scale_to_fit(1.0)?;
    println!(
        "Normalized: centroid {}, radius {:.6}",
        mesh.centroid()?,
        mesh.bounding_radius()?
    );
    Ok(())
}
