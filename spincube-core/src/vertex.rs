/// Model-space vertices and their transformations
use nalgebra::{Matrix3, Point3};

use crate::projection::NdcPoint;
use crate::transform::Transform;

/// A point in model space.
///
/// Two API surfaces are offered: the value-returning methods (`translate`,
/// `rotate_xz`, ...) leave `self` alone and return a new vertex, while the
/// `*_mut` methods change `self` in place and return it for chaining.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn z(&self) -> f32 {
        self.position.z
    }

    pub fn translate(&self, dx: f32, dy: f32, dz: f32) -> Self {
        let mut v = *self;
        v.translate_mut(dx, dy, dz);
        v
    }

    /// Single-argument translation: the value moves the vertex along z only.
    pub fn translate_z(&self, dz: f32) -> Self {
        self.translate(0.0, 0.0, dz)
    }

    pub fn rotate_yz(&self, angle: f32) -> Self {
        self.transformed(&Transform::yz_rotation(angle))
    }

    pub fn rotate_xz(&self, angle: f32) -> Self {
        self.transformed(&Transform::xz_rotation(angle))
    }

    pub fn rotate_xy(&self, angle: f32) -> Self {
        self.transformed(&Transform::xy_rotation(angle))
    }

    /// Rotate in YZ by `ax`, then XZ by `ay`, then XY by `az`.
    pub fn rotate(&self, ax: f32, ay: f32, az: f32) -> Self {
        self.transformed(&Transform::rotation_matrix(ax, ay, az))
    }

    /// Perspective divide. A zero `z` gives infinite or NaN components.
    pub fn project(&self) -> NdcPoint {
        NdcPoint::new(self.position.x / self.position.z, self.position.y / self.position.z)
    }

    pub fn translate_mut(&mut self, dx: f32, dy: f32, dz: f32) -> &mut Self {
        self.position.x += dx;
        self.position.y += dy;
        self.position.z += dz;
        self
    }

    pub fn translate_z_mut(&mut self, dz: f32) -> &mut Self {
        self.translate_mut(0.0, 0.0, dz)
    }

    pub fn rotate_yz_mut(&mut self, angle: f32) -> &mut Self {
        self.transform_mut(&Transform::yz_rotation(angle))
    }

    pub fn rotate_xz_mut(&mut self, angle: f32) -> &mut Self {
        self.transform_mut(&Transform::xz_rotation(angle))
    }

    pub fn rotate_xy_mut(&mut self, angle: f32) -> &mut Self {
        self.transform_mut(&Transform::xy_rotation(angle))
    }

    pub fn rotate_mut(&mut self, ax: f32, ay: f32, az: f32) -> &mut Self {
        self.transform_mut(&Transform::rotation_matrix(ax, ay, az))
    }

    fn transformed(&self, matrix: &Matrix3<f32>) -> Self {
        let mut v = *self;
        v.transform_mut(matrix);
        v
    }

    fn transform_mut(&mut self, matrix: &Matrix3<f32>) -> &mut Self {
        self.position = Point3::from(matrix * self.position.coords);
        self
    }
}

impl From<Point3<f32>> for Vertex {
    fn from(position: Point3<f32>) -> Self {
        Self { position }
    }
}
