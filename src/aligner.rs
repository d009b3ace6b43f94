//! True-north alignment of the AR world frame

use nalgebra::{UnitQuaternion, Vector3};

use crate::axes::{DeviceAxes, device_orientation, world_up};
use crate::cell::HeadingSource;
use crate::math::{DEG_TO_RAD, QuaternionExt, Vector3Ext, normalize_radians};
use crate::types::{AlignerSettings, Alignment, Unavailable};

/// Combines the latest compass heading with the current camera orientation
///
/// The AR session's world frame is gravity aligned (Y up) but its horizontal
/// rotation is arbitrary, fixed when tracking started. The aligner measures
/// where the device's up axis points in that frame, compares it with the
/// compass heading, and emits the rotation about world down that takes
/// AR-world +X onto true north.
///
/// Each call is a pure function of its two inputs; the aligner holds only its
/// settings.
///
/// # Example
/// ```
/// use nalgebra::{UnitQuaternion, Vector3};
/// use north_align::OrientationAligner;
///
/// let aligner = OrientationAligner::new();
///
/// // Device leaned about 57° back from upright
/// let camera = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -1.0)
///     * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -std::f32::consts::FRAC_PI_2);
///
/// let alignment = aligner.align(Some(45.0), Some(camera));
/// assert!(alignment.is_some());
///
/// // No heading yet, no alignment
/// assert!(aligner.align(None, Some(camera)).is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OrientationAligner {
    settings: AlignerSettings,
}

impl OrientationAligner {
    /// Create an aligner with default settings
    pub fn new() -> Self {
        Self::with_settings(AlignerSettings::default())
    }

    /// Create an aligner with the specified settings
    pub fn with_settings(settings: AlignerSettings) -> Self {
        Self { settings }
    }

    /// Get current settings
    pub fn settings(&self) -> AlignerSettings {
        self.settings
    }

    /// Replace settings
    pub fn set_settings(&mut self, settings: AlignerSettings) {
        self.settings = settings;
    }

    /// Compute the alignment for one camera frame
    ///
    /// # Arguments
    /// * `true_heading` - Latest compass heading in degrees clockwise from true north
    /// * `camera` - Camera orientation relative to the AR world frame
    ///
    /// # Returns
    /// `None` when either input is missing, the device is close to vertical,
    /// or the horizontal projection degenerates. The next frame is the retry.
    pub fn align(
        &self,
        true_heading: Option<f32>,
        camera: Option<UnitQuaternion<f32>>,
    ) -> Option<Alignment> {
        match self.try_align(true_heading, camera) {
            Ok(alignment) => Some(alignment),
            Err(reason) => {
                tracing::trace!(?reason, "Alignment unavailable");
                None
            }
        }
    }

    /// Compute the alignment against the latest value of a heading source
    pub fn align_from<H: HeadingSource + ?Sized>(
        &self,
        heading: &H,
        camera: Option<UnitQuaternion<f32>>,
    ) -> Option<Alignment> {
        self.align(heading.true_heading(), camera)
    }

    /// Same as [`align`](Self::align), reporting why a frame was skipped
    pub fn try_align(
        &self,
        true_heading: Option<f32>,
        camera: Option<UnitQuaternion<f32>>,
    ) -> Result<Alignment, Unavailable> {
        let true_heading = true_heading.ok_or(Unavailable::NoHeading)?;
        if !true_heading.is_finite() {
            return Err(Unavailable::InvalidHeading);
        }

        let camera = camera.ok_or(Unavailable::NoCameraFrame)?;
        // Platform quaternions drift off the unit sphere between frames
        let camera = camera
            .renormalized()
            .ok_or(Unavailable::InvalidOrientation)?;

        let device = device_orientation(&camera, self.settings.camera_convention);
        let axes = DeviceAxes::of(&device);

        if axes.verticality() >= self.settings.vertical_limit {
            return Err(Unavailable::NearVertical {
                up_y: axes.up.y,
                forward_y: axes.forward.y,
            });
        }

        let local_heading = Self::local_heading(&axes.up);
        if local_heading.is_nan() {
            return Err(Unavailable::DegenerateProjection);
        }

        let relative = local_heading - true_heading * DEG_TO_RAD;
        Ok(Alignment::from_angle(
            normalize_radians(relative),
            local_heading,
            true_heading,
        ))
    }

    /// Signed angle about world up from AR-world +X to the horizontal
    /// projection of the device up axis; NaN when the projection vanishes
    fn local_heading(up: &Vector3<f32>) -> f32 {
        Vector3::<f32>::x().signed_angle_about(&up.horizontal(), &world_up())
    }
}
