//! Mathematical utilities and nalgebra extensions for north alignment

use nalgebra::{Matrix3, Matrix4, Quaternion, Rotation3, UnitQuaternion, Vector3};

/// Mathematical constants
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;
pub const TAU: f32 = core::f32::consts::TAU;

/// Extension trait for Vector3 operations
pub trait Vector3Ext {
    /// Projection onto the world horizontal (XZ) plane
    fn horizontal(&self) -> Vector3<f32>;

    /// Unit direction of the horizontal projection; `None` when the vector
    /// is vertical or zero
    fn horizontal_direction(&self) -> Option<Vector3<f32>>;

    /// Signed angle from `self` to `other` about `up`, in radians.
    ///
    /// The magnitude is the unsigned angle between the two vectors, i.e.
    /// `acos(a·b / (|a||b|))`. The result is negative when `cross(self, other)`
    /// points along `up` (including the collinear case), positive otherwise.
    /// Either vector having zero length yields NaN.
    fn signed_angle_about(&self, other: &Vector3<f32>, up: &Vector3<f32>) -> f32;
}

impl Vector3Ext for Vector3<f32> {
    fn horizontal(&self) -> Vector3<f32> {
        Vector3::new(self.x, 0.0, self.z)
    }

    fn horizontal_direction(&self) -> Option<Vector3<f32>> {
        let horizontal = self.horizontal();
        if !horizontal.iter().all(|c| c.is_finite()) {
            return None;
        }
        // Rescale first so huge inputs do not overflow the length
        let scale = horizontal.amax();
        if scale <= f32::EPSILON {
            return None;
        }
        Some((horizontal / scale).normalize())
    }

    fn signed_angle_about(&self, other: &Vector3<f32>, up: &Vector3<f32>) -> f32 {
        if self.magnitude_squared() == 0.0 || other.magnitude_squared() == 0.0 {
            return f32::NAN;
        }

        // Same value as acos(a·b / |a||b|), without acos losing precision near 0 and π
        let cross = self.cross(other);
        let angle = cross.magnitude().atan2(self.dot(other));

        if cross.dot(up) >= 0.0 {
            -angle
        } else {
            angle
        }
    }
}

/// Wraps an angle in radians into `[0, 2π)`.
pub fn normalize_radians(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Extension trait for UnitQuaternion operations
pub trait QuaternionExt: Sized {
    /// Re-normalize a quaternion that may have drifted off the unit sphere
    fn renormalized(&self) -> Option<Self>;

    /// Build a unit quaternion from a raw platform quaternion
    ///
    /// Any finite, non-zero quaternion is accepted regardless of magnitude.
    /// Returns `None` for zero-length or non-finite input.
    fn try_from_raw(raw: Quaternion<f32>) -> Option<Self>;

    /// Extract the rotation of a 4x4 world transform, discarding scale
    ///
    /// Returns `None` when a basis column has zero length.
    fn try_from_transform(transform: &Matrix4<f32>) -> Option<Self>;
}

impl QuaternionExt for UnitQuaternion<f32> {
    fn renormalized(&self) -> Option<Self> {
        Self::try_from_raw(*self.quaternion())
    }

    fn try_from_raw(raw: Quaternion<f32>) -> Option<Self> {
        if !raw.coords.iter().all(|c| c.is_finite()) {
            return None;
        }
        // Scaling by the largest component keeps the norm from overflowing
        let scale = raw.coords.amax();
        if scale == 0.0 {
            return None;
        }

        let scaled = raw / scale;
        Some(UnitQuaternion::new_unchecked(scaled / scaled.norm()))
    }

    fn try_from_transform(transform: &Matrix4<f32>) -> Option<Self> {
        let mut basis: Matrix3<f32> = transform.fixed_view::<3, 3>(0, 0).into_owned();
        for mut column in basis.column_iter_mut() {
            let scale = column.magnitude();
            if !scale.is_finite() || scale <= f32::EPSILON {
                return None;
            }
            column /= scale;
        }

        let rotation = Rotation3::from_matrix_unchecked(basis);
        UnitQuaternion::from_rotation_matrix(&rotation).renormalized()
    }
}
