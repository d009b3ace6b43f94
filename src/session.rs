//! Wiring between the compass callback, the frame loop and consumers
//!
//! The compass thread writes headings through a shared [`HeadingCell`]; the
//! frame loop calls [`AlignmentSession::on_camera_frame`] once per rendered
//! frame. Consumers read the last published [`Alignment`].
//!
//! # Example
//! ```
//! use std::thread;
//! use nalgebra::{UnitQuaternion, Vector3};
//! use north_align::AlignmentSession;
//!
//! let session = AlignmentSession::new();
//!
//! // Compass callback on its own thread
//! let heading = session.heading_cell();
//! thread::spawn(move || heading.update(120.0).unwrap())
//!     .join()
//!     .unwrap();
//!
//! // Frame loop
//! let camera = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -1.0)
//!     * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -std::f32::consts::FRAC_PI_2);
//! let alignment = session.on_camera_frame(Some(camera));
//!
//! assert!(alignment.is_some());
//! assert_eq!(session.alignment(), alignment);
//! ```

use std::sync::Arc;

use nalgebra::{Matrix4, UnitQuaternion};

use crate::aligner::OrientationAligner;
use crate::cell::{HeadingCell, HeadingSource, Latest};
use crate::error::Result;
use crate::math::QuaternionExt;
use crate::types::{AlignerSettings, Alignment};

/// Per-session alignment state
#[derive(Debug, Default)]
pub struct AlignmentSession {
    aligner: OrientationAligner,
    heading: Arc<HeadingCell>,
    published: Arc<Latest<Alignment>>,
}

impl AlignmentSession {
    /// Create a session with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with the specified aligner settings
    pub fn with_settings(settings: AlignerSettings) -> Self {
        Self {
            aligner: OrientationAligner::with_settings(settings),
            ..Self::default()
        }
    }

    /// The aligner used for each frame
    pub fn aligner(&self) -> &OrientationAligner {
        &self.aligner
    }

    /// Shared handle for the compass callback
    pub fn heading_cell(&self) -> Arc<HeadingCell> {
        Arc::clone(&self.heading)
    }

    /// Shared handle to the published alignment
    pub fn alignment_cell(&self) -> Arc<Latest<Alignment>> {
        Arc::clone(&self.published)
    }

    /// Record a compass reading in degrees clockwise from true north
    ///
    /// See [`HeadingCell::update`] for how readings are stored.
    pub fn on_heading(&self, degrees: f32) -> Result<()> {
        self.heading.update(degrees)
    }

    /// Latest compass heading, if any
    pub fn true_heading(&self) -> Option<f32> {
        self.heading.true_heading()
    }

    /// Run the aligner for one camera frame
    ///
    /// A successful alignment is published and returned. On failure the last
    /// published alignment stays in place and `None` is returned.
    pub fn on_camera_frame(&self, camera: Option<UnitQuaternion<f32>>) -> Option<Alignment> {
        let alignment = self.aligner.align_from(&*self.heading, camera)?;

        // Nothing published since the session started or tracking restarted
        if self.published.get().is_none() {
            tracing::info!(
                angle = alignment.angle_degrees(),
                true_heading = alignment.true_heading,
                "First north alignment"
            );
        }

        self.published.publish(alignment);
        Some(alignment)
    }

    /// Run the aligner for a camera frame given as a 4x4 world transform
    ///
    /// A transform whose rotation cannot be recovered counts as a missing frame.
    pub fn on_camera_transform(&self, transform: &Matrix4<f32>) -> Option<Alignment> {
        self.on_camera_frame(UnitQuaternion::try_from_transform(transform))
    }

    /// Last published alignment
    pub fn alignment(&self) -> Option<Alignment> {
        self.published.get()
    }

    /// The AR world frame was re-established; earlier alignments no longer apply
    pub fn restart_tracking(&self) {
        tracing::info!("Tracking restarted, clearing alignment");
        self.published.clear();
    }
}
