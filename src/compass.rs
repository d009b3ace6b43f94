//! Compass heading utilities
//!
//! Headings are degrees clockwise from true north, as delivered by the
//! platform compass, kept in `[0, 360)`.

use crate::axes::world_up;
use crate::math::{RAD_TO_DEG, Vector3Ext};
use nalgebra::{UnitQuaternion, Vector3};

/// Wraps a heading in degrees into `[0, 360)`.
///
/// # Example
/// ```
/// use north_align::compass::normalize_heading;
///
/// assert_eq!(normalize_heading(370.0), 10.0);
/// assert_eq!(normalize_heading(-90.0), 270.0);
/// ```
pub fn normalize_heading(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest signed turn from `from` to `to`, in degrees within `(-180, 180]`.
///
/// Positive values are clockwise turns.
pub fn heading_difference(from: f32, to: f32) -> f32 {
    let delta = normalize_heading(to - from);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Calculate the compass bearing of an AR-world vector
///
/// `alignment` is the rotation that takes AR-world +X onto true north.
/// Only the horizontal component of `vector` is considered.
///
/// # Returns
/// Bearing in degrees clockwise from true north (`[0, 360)`), or `None` when
/// the vector has no horizontal component.
///
/// # Example
/// ```
/// use nalgebra::{UnitQuaternion, Vector3};
/// use north_align::compass::bearing;
///
/// // True north along AR-world +X, so world +Z is 90° clockwise of it
/// let alignment = UnitQuaternion::identity();
/// let east = bearing(&alignment, &Vector3::new(0.0, 0.5, 2.0)).unwrap();
/// assert!((east - 90.0).abs() < 1e-4);
/// ```
pub fn bearing(alignment: &UnitQuaternion<f32>, vector: &Vector3<f32>) -> Option<f32> {
    let horizontal = vector.horizontal_direction()?;
    let north = (alignment * Vector3::x()).horizontal_direction()?;

    // clockwise from above is a negative turn about world up, which the
    // signed-angle convention reports as positive
    let angle = north.signed_angle_about(&horizontal, &world_up());
    Some(normalize_heading(angle * RAD_TO_DEG))
}
