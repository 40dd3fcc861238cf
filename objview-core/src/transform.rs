//! Rotation, translation, centering and scale-to-fit over the vertex array
use log::debug;
use nalgebra::{Point3, Rotation3, Vector3};

use crate::error::{MeshError, MeshResult};
use crate::geometry::Mesh;

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Direction selected by the case of an axis symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Sign::Positive => value,
            Sign::Negative => -value,
        }
    }
}

impl Axis {
    /// Decode an axis symbol: `x y z` are positive, `X Y Z` negative
    pub fn from_symbol(symbol: char) -> Option<(Self, Sign)> {
        let axis = match symbol.to_ascii_lowercase() {
            'x' => Axis::X,
            'y' => Axis::Y,
            'z' => Axis::Z,
            _ => return None,
        };
        let sign = if symbol.is_ascii_uppercase() {
            Sign::Negative
        } else {
            Sign::Positive
        };
        Some((axis, sign))
    }

    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Rotation angles (in radians) waiting to be applied
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PendingRotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PendingRotation {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Overwrite the angle for one axis
    pub fn set(&mut self, axis: Axis, angle: f64) {
        match axis {
            Axis::X => self.x = angle,
            Axis::Y => self.y = angle,
            Axis::Z => self.z = angle,
        }
    }

    /// Rotation about X, then Y, then Z
    pub fn rotation(&self) -> Rotation3<f64> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), self.z);

        // Rightmost factor acts first
        rz * ry * rx
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Rotate,
    Translate,
}

/// A single pending rotate or translate request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub kind: TransformKind,
    pub axis: Axis,
    pub sign: Sign,
    pub magnitude: f64,
}

impl Transform {
    /// Build a rotation request; `None` for an unrecognized symbol
    pub fn rotate(angle: f64, symbol: char) -> Option<Self> {
        Self::from_symbol(TransformKind::Rotate, angle, symbol)
    }

    /// Build a translation request; `None` for an unrecognized symbol
    pub fn translate(distance: f64, symbol: char) -> Option<Self> {
        Self::from_symbol(TransformKind::Translate, distance, symbol)
    }

    fn from_symbol(kind: TransformKind, magnitude: f64, symbol: char) -> Option<Self> {
        let (axis, sign) = Axis::from_symbol(symbol)?;
        Some(Self {
            kind,
            axis,
            sign,
            magnitude,
        })
    }

    pub fn signed_magnitude(&self) -> f64 {
        self.sign.apply(self.magnitude)
    }
}

impl Mesh {
    /// Store a pending rotation for the axis named by `symbol`.
    ///
    /// Vertices do not move until [`Mesh::apply_rotation`]. Unknown symbols
    /// are ignored.
    pub fn set_rotation(&mut self, angle: f64, symbol: char) {
        if let Some(transform) = Transform::rotate(angle, symbol) {
            self.apply(transform);
        }
    }

    /// Rotate every vertex by the pending angles and reset them
    pub fn apply_rotation(&mut self) {
        let rotation = self.rotation.rotation();
        for vertex in self.active_vertices_mut() {
            *vertex = rotation * *vertex;
        }
        debug!("Applied rotation {:?}", self.rotation);
        self.rotation = PendingRotation::zero();
    }

    /// Shift every vertex along the axis named by `symbol`.
    ///
    /// Lowercase adds `distance`, uppercase subtracts it, anything else is
    /// ignored.
    pub fn translate(&mut self, distance: f64, symbol: char) {
        if let Some(transform) = Transform::translate(distance, symbol) {
            self.apply(transform);
        }
    }

    pub fn apply(&mut self, transform: Transform) {
        let amount = transform.signed_magnitude();
        match transform.kind {
            TransformKind::Rotate => self.rotation.set(transform.axis, amount),
            TransformKind::Translate => {
                let mut offset = Vector3::zeros();
                offset[transform.axis.index()] = amount;
                self.shift(&offset);
            }
        }
    }

    fn shift(&mut self, offset: &Vector3<f64>) {
        for vertex in self.active_vertices_mut() {
            *vertex += *offset;
        }
    }

    /// Arithmetic mean of all vertices
    pub fn centroid(&self) -> MeshResult<Point3<f64>> {
        let vertices = self.active_vertices();
        if self.vertex_count == 0 || vertices.is_empty() {
            return Err(MeshError::EmptyModel);
        }
        let sum = vertices
            .iter()
            .fold(Vector3::zeros(), |sum, vertex| sum + vertex.coords);
        Ok(Point3::from(sum / vertices.len() as f64))
    }

    /// Largest distance from the origin to any vertex
    pub fn bounding_radius(&self) -> MeshResult<f64> {
        let vertices = self.active_vertices();
        if self.vertex_count == 0 || vertices.is_empty() {
            return Err(MeshError::EmptyModel);
        }
        Ok(vertices
            .iter()
            .map(|vertex| vertex.coords.norm())
            .fold(0.0, f64::max))
    }

    /// Move the centroid to the origin
    pub fn center(&mut self) -> MeshResult<()> {
        let centroid = self.centroid()?;
        self.shift(&-centroid.coords);
        debug!("Centered mesh, centroid was {centroid}");
        Ok(())
    }

    /// Scale uniformly so the farthest vertex lies at `radius` from the origin.
    ///
    /// A mesh collapsed onto the origin is left as is.
    pub fn scale_to_fit(&mut self, radius: f64) -> MeshResult<()> {
        let max_distance = self.bounding_radius()?;
        if max_distance > 0.0 {
            let factor = radius / max_distance;
            for vertex in self.active_vertices_mut() {
                vertex.coords *= factor;
            }
            debug!("Scaled mesh by {factor}");
        }
        Ok(())
    }
}
