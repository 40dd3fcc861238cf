//! Two-pass reader for the vertex/face subset of Wavefront OBJ.
//!
//! The counting pass sizes the mesh, the data pass fills it. Only `v` and
//! `f` records are read; every other line is skipped.
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::{debug, trace};
use nalgebra::Point3;
use nom::{
    character::complete::{char, i64 as integer, multispace0, multispace1},
    combinator::{all_consuming, opt, rest},
    multi::separated_list0,
    number::complete::double,
    sequence::{delimited, preceded, terminated},
    IResult,
};

use crate::error::{MeshError, MeshResult};
use crate::geometry::{Face, Mesh, MeshCounts, Vertex};

const VERTEX_MARKER: &str = "v ";
const FACE_MARKER: &str = "f ";

/// What a raw source line holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A `v` record, with the text after the marker
    Vertex(&'a str),
    /// An `f` record, with the text after the marker
    Face(&'a str),
    Ignored,
}

impl<'a> LineKind<'a> {
    pub fn classify(line: &'a str) -> Self {
        if let Some(body) = line.strip_prefix(VERTEX_MARKER) {
            LineKind::Vertex(body)
        } else if let Some(body) = line.strip_prefix(FACE_MARKER) {
            LineKind::Face(body)
        } else {
            LineKind::Ignored
        }
    }
}

/// Faces a record contributes under fan triangulation
fn triangulated_face_count(tokens: usize) -> usize {
    match tokens {
        0 | 1 => 0,
        2 => 1,
        n => n - 2,
    }
}

/// Split a source on `\n`, dropping a trailing `\r`.
///
/// Bytes that are not UTF-8 are replaced, not rejected, so they only
/// matter when they sit inside a `v` or `f` record.
fn source_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader.split(b'\n').map(|line| {
        line.map(|mut bytes| {
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            String::from_utf8_lossy(&bytes).into_owned()
        })
    })
}

/// Count `v` and `f` records without storing anything
pub fn count_records<R: BufRead>(reader: R) -> MeshResult<MeshCounts> {
    let mut counts = MeshCounts::default();
    for line in source_lines(reader) {
        let line = line?;
        match LineKind::classify(&line) {
            LineKind::Vertex(_) => counts.vertices += 1,
            LineKind::Face(body) => {
                counts.faces += triangulated_face_count(body.split_whitespace().count());
            }
            LineKind::Ignored => {}
        }
    }
    Ok(counts)
}

fn coordinates(input: &str) -> IResult<&str, Vec<f64>> {
    delimited(multispace0, separated_list0(multispace1, double), multispace0)(input)
}

/// Parse the body of a `v` record.
///
/// On failure returns how many leading tokens were numeric.
pub fn parse_vertex(body: &str) -> Result<Vertex, usize> {
    let (remaining, values) = coordinates(body).map_err(|_| 0usize)?;
    match values[..] {
        [x, y, z] if remaining.is_empty() => Ok(Point3::new(x, y, z)),
        _ => Err(values.len()),
    }
}

fn face_token(input: &str) -> IResult<&str, i64> {
    // `v/vt/vn` references keep only the vertex part
    all_consuming(terminated(integer, opt(preceded(char('/'), rest))))(input)
}

/// Parse one token of an `f` record into its raw (possibly negative) index
pub fn parse_face_index(token: &str) -> Option<i64> {
    face_token(token).ok().map(|(_, index)| index)
}

/// Map a raw index onto the vertices parsed so far.
///
/// Negative values count back from the most recent vertex. Returns `None`
/// when the result does not name an existing vertex.
pub fn resolve_index(index: i64, seen: usize) -> Option<usize> {
    let resolved = if index < 0 {
        i64::try_from(seen).ok()? + 1 + index
    } else {
        index
    };
    usize::try_from(resolved)
        .ok()
        .filter(|&resolved| resolved != 0 && resolved <= seen)
}

impl Mesh {
    /// Counting pass over a file
    pub fn count_from_path(&mut self, path: impl AsRef<Path>) -> MeshResult<MeshCounts> {
        let file = File::open(path)?;
        self.count_from_reader(BufReader::new(file))
    }

    /// Counting pass: set `vertex_count` and `face_count` from the source
    pub fn count_from_reader<R: BufRead>(&mut self, reader: R) -> MeshResult<MeshCounts> {
        self.vertex_count = 0;
        self.face_count = 0;
        let counts = count_records(reader)?;
        self.vertex_count = counts.vertices;
        self.face_count = counts.faces;
        debug!("Counted {} vertices and {} faces", counts.vertices, counts.faces);
        Ok(counts)
    }

    /// Data pass over a file
    pub fn parse_from_path(&mut self, path: impl AsRef<Path>) -> MeshResult<()> {
        let file = File::open(path)?;
        self.parse_from_reader(BufReader::new(file))
    }

    /// Data pass: fill the arrays sized by the last counting pass.
    ///
    /// Each `f` record becomes one face entry; it is not triangulated. On
    /// error the arrays hold whatever was written before the failing line.
    pub fn parse_from_reader<R: BufRead>(&mut self, reader: R) -> MeshResult<()> {
        self.vertices = vec![Point3::origin(); self.vertex_count + 1];
        self.faces = vec![Face::default(); self.face_count + 1];

        let mut seen = 0usize;
        let mut slot = 1usize;

        for (number, line) in source_lines(reader).enumerate() {
            let line = line?;
            let number = number + 1;
            match LineKind::classify(&line) {
                LineKind::Vertex(body) => {
                    let vertex = parse_vertex(body).map_err(|found| MeshError::MalformedVertex {
                        line: number,
                        found,
                    })?;
                    let target = self
                        .vertices
                        .get_mut(seen + 1)
                        .ok_or(MeshError::CapacityExceeded {
                            line: number,
                            what: "vertices",
                            capacity: self.vertex_count,
                        })?;
                    *target = vertex;
                    seen += 1;
                }
                LineKind::Face(body) => {
                    let indices = parse_face_record(body, seen, number)?;
                    let advances = indices.len() > 1;
                    match self.faces.get_mut(slot) {
                        Some(face) => {
                            face.count = indices.len();
                            face.indices.extend(indices);
                        }
                        None if advances => {
                            return Err(MeshError::CapacityExceeded {
                                line: number,
                                what: "faces",
                                capacity: self.face_count,
                            });
                        }
                        None => trace!("Dropping degenerate face on line {number}"),
                    }
                    if advances {
                        slot += 1;
                    }
                }
                LineKind::Ignored => trace!("Skipping line {number}"),
            }
        }

        debug!("Parsed {} vertices into {} face slots", seen, slot - 1);
        Ok(())
    }

    /// Run both passes over a file.
    ///
    /// On failure the mesh is cleared before the error is returned.
    pub fn load(&mut self, path: impl AsRef<Path>) -> MeshResult<()> {
        let path = path.as_ref();
        let result = self
            .count_from_path(path)
            .and_then(|_| self.parse_from_path(path));
        if let Err(err) = &result {
            debug!("Loading {} failed: {err}", path.display());
            self.clear();
        }
        result
    }
}

fn parse_face_record(body: &str, seen: usize, line: usize) -> MeshResult<Vec<usize>> {
    body.split_whitespace()
        .map(|token| {
            let index = parse_face_index(token).ok_or_else(|| MeshError::MalformedIndex {
                line,
                token: token.to_string(),
            })?;
            resolve_index(index, seen).ok_or(MeshError::InvalidIndex {
                line,
                index,
                available: seen,
            })
        })
        .collect()
}
