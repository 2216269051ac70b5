/// Plane rotation matrices used by [`Vertex`](crate::Vertex)
use nalgebra::Matrix3;

/// Rotation builder for the three coordinate planes.
///
/// Every plane rotation maps the pair `(u, v)` to
/// `(u·cosθ − v·sinθ, u·sinθ + v·cosθ)` and leaves the third axis alone.
pub struct Transform;

impl Transform {
    /// Rotation of the (y, z) pair, x untouched
    pub fn yz_rotation(angle: f32) -> Matrix3<f32> {
        let (s, c) = angle.sin_cos();
        Matrix3::new(
            1.0, 0.0, 0.0, //
            0.0, c, -s, //
            0.0, s, c,
        )
    }

    /// Rotation of the (x, z) pair, y untouched
    pub fn xz_rotation(angle: f32) -> Matrix3<f32> {
        let (s, c) = angle.sin_cos();
        Matrix3::new(
            c, 0.0, -s, //
            0.0, 1.0, 0.0, //
            s, 0.0, c,
        )
    }

    /// Rotation of the (x, y) pair, z untouched
    pub fn xy_rotation(angle: f32) -> Matrix3<f32> {
        let (s, c) = angle.sin_cos();
        Matrix3::new(
            c, -s, 0.0, //
            s, c, 0.0, //
            0.0, 0.0, 1.0,
        )
    }

    /// Combined rotation: YZ by `ax` first, then XZ by `ay`, then XY by `az`.
    pub fn rotation_matrix(ax: f32, ay: f32, az: f32) -> Matrix3<f32> {
        Self::xy_rotation(az) * Self::xz_rotation(ay) * Self::yz_rotation(ax)
    }
}
