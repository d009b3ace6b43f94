//! Core types for north alignment

use crate::axes::{CameraConvention, alignment_axis};
use crate::compass;
use crate::math::{RAD_TO_DEG, TAU};
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Default limit on the vertical component of the device axes.
pub const DEFAULT_VERTICAL_LIMIT: f32 = 0.9;

/// Aligner settings
///
/// # Example
/// ```
/// use north_align::{AlignerSettings, CameraConvention};
///
/// let settings = AlignerSettings {
///     camera_convention: CameraConvention::Portrait,
///     vertical_limit: 0.85,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignerSettings {
    /// Fixed offset between the camera-pose source's camera space and the device axes
    pub camera_convention: CameraConvention,
    /// Vertical component of the device up or forward axis at which the
    /// orientation is considered too close to vertical (typically 0.9)
    ///
    /// Near vertical, the horizontal projection of the up axis is short and its
    /// direction is dominated by noise.
    pub vertical_limit: f32,
}

impl Default for AlignerSettings {
    fn default() -> Self {
        Self {
            camera_convention: CameraConvention::default(),
            vertical_limit: DEFAULT_VERTICAL_LIMIT,
        }
    }
}

/// Why no alignment could be produced for a frame
///
/// These are transient per-frame conditions. They are reported through
/// tracing and [`OrientationAligner::try_align`](crate::OrientationAligner::try_align);
/// the per-frame API collapses all of them to `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unavailable {
    /// No compass heading received yet
    NoHeading,
    /// Compass heading was NaN or infinite
    InvalidHeading,
    /// No live camera frame
    NoCameraFrame,
    /// Camera orientation could not be normalized
    InvalidOrientation,
    /// Device pointed too far up or down
    NearVertical {
        /// Vertical component of the device up axis
        up_y: f32,
        /// Vertical component of the device forward axis
        forward_y: f32,
    },
    /// Horizontal projection of the up axis has zero length
    DegenerateProjection,
}

/// Rotation aligning the AR world frame with true north
///
/// The quaternion rotates AR-world +X onto the true-north direction, about
/// world down. Each emission is authoritative; nothing is accumulated between
/// frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    /// Unit rotation about world down
    pub quaternion: UnitQuaternion<f32>,
    /// Rotation angle about world down in radians, within `[0, 2π)`
    pub angle: f32,
    /// Signed angle from AR-world +X to the projected device up axis, in radians
    pub local_heading: f32,
    /// Compass heading the alignment was computed against, in degrees
    pub true_heading: f32,
}

impl Alignment {
    /// Build an alignment from a normalized angle about world down
    pub fn from_angle(angle: f32, local_heading: f32, true_heading: f32) -> Self {
        debug_assert!((0.0..TAU).contains(&angle));
        Self {
            quaternion: UnitQuaternion::from_axis_angle(&alignment_axis(), angle),
            angle,
            local_heading,
            true_heading,
        }
    }

    /// Rotation angle about world down in degrees
    pub fn angle_degrees(&self) -> f32 {
        self.angle * RAD_TO_DEG
    }

    /// True-north unit vector in AR-world coordinates
    pub fn north(&self) -> Vector3<f32> {
        self.quaternion * Vector3::x()
    }

    /// Apply the alignment rotation to an AR-world vector
    pub fn orient(&self, vector: &Vector3<f32>) -> Vector3<f32> {
        self.quaternion * vector
    }

    /// Compass bearing of an AR-world vector, in degrees
    pub fn bearing_of(&self, vector: &Vector3<f32>) -> Option<f32> {
        compass::bearing(&self.quaternion, vector)
    }
}
