//! Command-line host for the objview mesh model.
//!
//! Loads an OBJ file, applies the requested transforms and reports the
//! result on the terminal.
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use log::{info, warn};
use objview_core::{Axis, Mesh, MeshResult};

/// An axis symbol paired with an amount, written `SYM=VALUE`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisValue {
    pub symbol: char,
    pub value: f64,
}

/// Parse `x=1.5`, `Z=-0.25` and the like
pub fn parse_axis_value(input: &str) -> Result<AxisValue, String> {
    let (symbol, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected SYM=VALUE, got `{input}`"))?;
    let mut chars = symbol.trim().chars();
    let symbol = match (chars.next(), chars.next()) {
        (Some(symbol), None) if Axis::from_symbol(symbol).is_some() => symbol,
        _ => return Err(format!("`{symbol}` is not one of x y z X Y Z")),
    };
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("`{value}`: {err}"))?;
    Ok(AxisValue { symbol, value })
}

/// Load an OBJ mesh and apply transforms to it
#[derive(Debug, Clone, Parser)]
#[command(name = "objview", version)]
pub struct Cli {
    /// OBJ file to load
    pub file: PathBuf,

    /// Rotation about an axis, e.g. `x=1.5708`; uppercase rotates the other way
    #[arg(long = "rotate", value_name = "SYM=RADIANS", value_parser = parse_axis_value)]
    pub rotations: Vec<AxisValue>,

    /// Translation along an axis, e.g. `y=2`; uppercase moves the other way
    #[arg(long = "translate", value_name = "SYM=DISTANCE", value_parser = parse_axis_value)]
    pub translations: Vec<AxisValue>,

    /// Move the centroid to the origin before rotating
    #[arg(long)]
    pub center: bool,

    /// Scale so the farthest vertex ends at this distance from the origin
    #[arg(long, value_name = "RADIUS")]
    pub fit: Option<f64>,

    /// Print every vertex after the transforms
    #[arg(long)]
    pub dump: bool,
}

/// Owns the mesh and drives it from the command line options
pub struct TerminalApp {
    mesh: Mesh,
    cli: Cli,
}

impl TerminalApp {
    pub fn new(cli: Cli) -> Self {
        Self {
            mesh: Mesh::new(),
            cli,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Load the file and apply center, rotations, translations and fit in
    /// that order
    pub fn load_and_transform(&mut self) -> MeshResult<()> {
        self.mesh.load(&self.cli.file)?;
        info!(
            "Loaded {} ({} vertices)",
            self.cli.file.display(),
            self.mesh.vertex_count()
        );

        if self.cli.center {
            self.mesh.center()?;
        }
        if !self.cli.rotations.is_empty() {
            for rotation in &self.cli.rotations {
                self.mesh.set_rotation(rotation.value, rotation.symbol);
            }
            self.mesh.apply_rotation();
        }
        for translation in &self.cli.translations {
            self.mesh.translate(translation.value, translation.symbol);
        }
        if let Some(radius) = self.cli.fit {
            self.mesh.scale_to_fit(radius)?;
        }
        Ok(())
    }

    /// Run the whole load/transform cycle.
    ///
    /// Returns `Ok(false)` when the file could not be used; the mesh is
    /// cleared and a message goes to `err`. `Err` is reserved for failures
    /// writing to the terminal.
    pub fn run(&mut self, out: &mut impl Write, err: &mut impl Write) -> Result<bool> {
        if let Err(error) = self.load_and_transform() {
            warn!("{}: {error}", self.cli.file.display());
            self.mesh.clear();
            queue!(
                err,
                SetForegroundColor(Color::Red),
                Print(format!("file incorrect: {}\n", self.cli.file.display())),
                ResetColor
            )
            .context("writing error report")?;
            err.flush()?;
            return Ok(false);
        }

        self.report(out).context("writing mesh report")?;
        Ok(true)
    }

    fn report(&self, out: &mut impl Write) -> std::io::Result<()> {
        let mesh = &self.mesh;
        queue!(
            out,
            SetForegroundColor(Color::Green),
            Print(format!("{}\n", self.cli.file.display())),
            ResetColor,
            Print(format!("vertices: {}\n", mesh.vertex_count())),
            Print(format!(
                "faces: {} ({} populated)\n",
                mesh.face_count(),
                mesh.populated_faces().count()
            )),
        )?;
        if let Ok(radius) = mesh.bounding_radius() {
            queue!(out, Print(format!("radius: {radius:.6}\n")))?;
        }
        if self.cli.dump {
            for vertex in mesh.vertices().iter().skip(1) {
                queue!(
                    out,
                    Print(format!("v {:.6} {:.6} {:.6}\n", vertex.x, vertex.y, vertex.z))
                )?;
            }
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::Point3;

    fn fixture(name: &str) -> String {
        format!(
            "{}/../objview-core/tests/fixtures/{name}",
            env!("CARGO_MANIFEST_DIR")
        )
    }

    fn run(args: &[&str]) -> (TerminalApp, bool, String, String) {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut app = TerminalApp::new(cli);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let ok = app.run(&mut out, &mut err).unwrap();
        (
            app,
            ok,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_parse_axis_value() {
        assert_eq!(
            parse_axis_value("x=1.5"),
            Ok(AxisValue {
                symbol: 'x',
                value: 1.5
            })
        );
        assert_eq!(
            parse_axis_value("Z=-2").map(|v| (v.symbol, v.value)),
            Ok(('Z', -2.0))
        );
        assert!(parse_axis_value("x").is_err());
        assert!(parse_axis_value("w=1").is_err());
        assert!(parse_axis_value("xy=1").is_err());
        assert!(parse_axis_value("y=abc").is_err());
    }

    #[test]
    fn test_cli_collects_repeated_options() {
        let cli = Cli::try_parse_from([
            "objview",
            "cube.obj",
            "--rotate",
            "x=0.5",
            "--rotate",
            "Y=0.25",
            "--fit",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.rotations.len(), 2);
        assert_eq!(cli.fit, Some(2.0));
        assert!(!cli.center);
    }

    #[test]
    fn test_report_for_cube() {
        let path = fixture("cube.obj");
        let (app, ok, out, err) = run(&["objview", path.as_str()]);
        assert!(ok);
        assert!(err.is_empty());
        assert!(out.contains("vertices: 8\n"));
        assert!(out.contains("faces: 12 (6 populated)\n"));
        assert_eq!(app.mesh().vertex_count(), 8);
    }

    #[test]
    fn test_transforms_run_in_order() {
        let path = fixture("cube.obj");
        let (app, ok, out, _) = run(&[
            "objview",
            path.as_str(),
            "--center",
            "--rotate",
            "x=1.5707963267948966",
            "--translate",
            "x=2",
            "--dump",
        ]);
        assert!(ok);
        assert_abs_diff_eq!(
            app.mesh().vertices()[1],
            Point3::new(3.0, 1.0, 1.0),
            epsilon = 1e-5
        );
        assert!(out.contains("v 3.000000 1.000000 1.000000\n"));
    }

    #[test]
    fn test_bad_file_clears_mesh() {
        let path = fixture("invalid_vertex_index.obj");
        let (app, ok, out, err) = run(&["objview", path.as_str(), "--fit", "1"]);
        assert!(!ok);
        assert!(out.is_empty());
        assert!(err.contains("file incorrect"));
        assert!(app.mesh().is_empty());
    }
}
