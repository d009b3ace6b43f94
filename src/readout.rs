//! Text readout of the current heading and alignment

use core::fmt;

use nalgebra::UnitQuaternion;

use crate::compass::normalize_heading;
use crate::types::Alignment;

/// Heading and alignment rotation formatted for an on-screen label
///
/// # Example
/// ```
/// use north_align::{Alignment, HeadingReadout};
///
/// let readout = HeadingReadout::new(Some(271.6), None);
/// assert_eq!(readout.heading_text(), "272°");
/// assert_eq!(readout.orientation_text(), "N/A");
///
/// let alignment = Alignment::from_angle(0.0, 0.0, 0.0);
/// let readout = HeadingReadout::new(None, Some(&alignment));
/// assert_eq!(readout.to_string(), "Heading: N/A\nOrientation: 1.00 0.00 0.00 0.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingReadout {
    heading: Option<f32>,
    orientation: Option<UnitQuaternion<f32>>,
}

impl HeadingReadout {
    pub fn new(heading: Option<f32>, alignment: Option<&Alignment>) -> Self {
        Self {
            heading,
            orientation: alignment.map(|a| a.quaternion),
        }
    }

    /// Heading rounded to whole degrees within `[0, 360)`
    pub fn heading_text(&self) -> String {
        match self.heading {
            Some(heading) => format!("{:.0}°", normalize_heading(heading.round())),
            None => "N/A".to_string(),
        }
    }

    /// Alignment quaternion as `w x y z`
    pub fn orientation_text(&self) -> String {
        match self.orientation {
            Some(q) => format!(
                "{:.2} {:.2} {:.2} {:.2}",
                unsigned_zero(q.w),
                unsigned_zero(q.i),
                unsigned_zero(q.j),
                unsigned_zero(q.k)
            ),
            None => "N/A".to_string(),
        }
    }
}

/// Components that round to zero print as `0.00`, never `-0.00`
fn unsigned_zero(value: f32) -> f32 {
    if (value * 100.0).round() == 0.0 { 0.0 } else { value }
}

impl fmt::Display for HeadingReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Heading: {}\nOrientation: {}",
            self.heading_text(),
            self.orientation_text()
        )
    }
}
