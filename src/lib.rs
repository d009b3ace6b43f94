//! North Align - true-north alignment for augmented-reality world frames
//!
//! An AR session tracks the device in a gravity-aligned world frame whose
//! horizontal rotation is arbitrary, fixed wherever tracking happened to
//! start. This library combines the compass heading with the camera pose to
//! recover the rotation that takes that world frame onto true north, once
//! per rendered frame.
//!
//! # Features
//!
//! - Stateless per-frame alignment with a near-vertical degeneracy guard
//! - Lock-free latest-heading cell for the compass callback thread
//! - Session wiring that publishes the most recent alignment
//! - Accessory marker placement and compass bearings of AR-world vectors
//! - Camera-space conventions for landscape and portrait pose sources
//! - TOML configuration
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::{UnitQuaternion, Vector3};
//! use north_align::{HeadingReadout, OrientationAligner};
//!
//! let aligner = OrientationAligner::new();
//!
//! // Latest compass reading, degrees clockwise from true north
//! let heading = Some(212.0);
//!
//! // Camera orientation reported by the AR session for this frame
//! let camera = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -0.8)
//!     * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -std::f32::consts::FRAC_PI_2);
//!
//! if let Some(alignment) = aligner.align(heading, Some(camera)) {
//!     // True north expressed in AR-world coordinates
//!     let north = alignment.north();
//!     assert!(north.y.abs() < 1e-6);
//!
//!     println!("{}", HeadingReadout::new(heading, Some(&alignment)));
//! }
//! ```

mod aligner;
pub mod axes;
mod cell;
pub mod compass;
pub mod config;
mod error;
pub mod marker;
mod math;
mod readout;
mod session;
mod types;

// Re-export all public types and functions
pub use aligner::OrientationAligner;
pub use axes::{CameraConvention, DeviceAxes, alignment_axis, device_orientation, world_up};
pub use cell::{HeadingCell, HeadingSource, Latest};
pub use compass::{bearing, heading_difference, normalize_heading};
pub use config::AlignerConfig;
pub use error::{Error, Result};
pub use marker::{AccessoryId, CameraFrame, Marker, MarkerBoard, RangingSample};
pub use math::{DEG_TO_RAD, QuaternionExt, RAD_TO_DEG, TAU, Vector3Ext, normalize_radians};
pub use readout::HeadingReadout;
pub use session::AlignmentSession;
pub use types::*;
