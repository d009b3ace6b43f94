//! Fixed frame conventions and device axes in AR-world coordinates
//!
//! The camera-pose source reports the orientation of the camera sensor, which
//! on most handsets is mounted a quarter turn away from the device's portrait
//! axes. This module names that fixed offset and the fixed output axis, and
//! extracts the device's local axes expressed in the AR world frame.
//!
//! # Example
//! ```
//! use nalgebra::UnitQuaternion;
//! use north_align::{CameraConvention, DeviceAxes, device_orientation};
//!
//! let camera = UnitQuaternion::identity();
//! let device = device_orientation(&camera, CameraConvention::LandscapeRight);
//! let axes = DeviceAxes::of(&device);
//!
//! // The quarter turn swings the device's up axis onto world -X
//! assert!((axes.up.x + 1.0).abs() < 1e-6);
//! assert!(axes.up.y.abs() < 1e-6);
//! ```

use core::f32::consts::FRAC_PI_2;

use nalgebra::{Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Fixed rotation between the camera-pose source's camera space and the
/// device's portrait axes.
///
/// The offset is a property of the collaborator's coordinate system, not of
/// the alignment algorithm. A port to a different camera-pose source picks
/// the variant matching that source.
///
/// # Conventions
/// - **LandscapeRight**: camera space is the device held in landscape with the
///   home side on the right, so a quarter turn about camera +Z recovers the
///   portrait axes (ARKit `ARCamera.transform`)
/// - **LandscapeLeft**: mirror of the above, a quarter turn about camera -Z
/// - **Portrait**: camera space already matches the device axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraConvention {
    /// Quarter turn about camera +Z
    #[default]
    LandscapeRight,
    /// Quarter turn about camera -Z
    LandscapeLeft,
    /// No offset
    Portrait,
}

impl CameraConvention {
    /// Rotation composed on the right of the camera orientation to obtain
    /// the device orientation.
    pub fn offset(self) -> UnitQuaternion<f32> {
        match self {
            CameraConvention::LandscapeRight => {
                UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2)
            }
            CameraConvention::LandscapeLeft => {
                UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -FRAC_PI_2)
            }
            CameraConvention::Portrait => UnitQuaternion::identity(),
        }
    }
}

/// Axis of the emitted alignment rotation: world down, `(0, -1, 0)`.
///
/// Consumers (marker placement, scene graph) expect a rotation about world
/// down so that positive angles turn clockwise when viewed from above, the
/// same sense as a compass bearing.
pub fn alignment_axis() -> Unit<Vector3<f32>> {
    Unit::new_unchecked(Vector3::new(0.0, -1.0, 0.0))
}

/// World up of the gravity-aligned AR frame.
pub fn world_up() -> Vector3<f32> {
    Vector3::y()
}

/// Applies the camera convention offset to a camera orientation.
#[inline]
pub fn device_orientation(
    camera: &UnitQuaternion<f32>,
    convention: CameraConvention,
) -> UnitQuaternion<f32> {
    camera * convention.offset()
}

/// The device's local axes expressed in AR-world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceAxes {
    /// Local X (towards the right edge in portrait)
    pub right: Vector3<f32>,
    /// Local Y (towards the top edge in portrait)
    pub up: Vector3<f32>,
    /// Local Z (out of the screen)
    pub forward: Vector3<f32>,
}

impl DeviceAxes {
    /// Rotates the unit axes by `orientation`.
    pub fn of(orientation: &UnitQuaternion<f32>) -> Self {
        Self {
            right: orientation * Vector3::x(),
            up: orientation * Vector3::y(),
            forward: orientation * Vector3::z(),
        }
    }

    /// Largest absolute vertical component of the up and forward axes.
    pub fn verticality(&self) -> f32 {
        self.up.y.abs().max(self.forward.y.abs())
    }
}
