//! Accessory markers placed in the AR world
//!
//! The ranging collaborator reports where each accessory sits in AR-world
//! coordinates. A [`MarkerBoard`] keeps one marker per accessory and turns
//! each marker to face true north whenever an alignment is available, so a
//! consumer can draw it with a compass rose or label its bearing.
//!
//! # Example
//! ```
//! use nalgebra::Point3;
//! use north_align::{Alignment, MarkerBoard, RangingSample};
//!
//! let mut board = MarkerBoard::new();
//! let alignment = Alignment::from_angle(0.0, 0.0, 0.0);
//!
//! let sample = RangingSample::new("tag-1", Some(Point3::new(0.0, 0.0, 4.0)));
//! board.place(&sample, Some(&alignment));
//!
//! // North along AR-world +X, so +Z is due east
//! let bearing = board.bearing_to(&"tag-1".into(), &Point3::origin(), &alignment);
//! assert!((bearing.unwrap() - 90.0).abs() < 1e-3);
//! ```

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use nalgebra::{Matrix4, Point3, UnitQuaternion};

use crate::math::QuaternionExt;
use crate::types::Alignment;

/// Identifier of a ranged accessory
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccessoryId(String);

impl AccessoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccessoryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AccessoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for AccessoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One location sample from the ranging collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct RangingSample {
    pub accessory: AccessoryId,
    /// AR-world position, when the ranging session could resolve one
    pub world_position: Option<Point3<f32>>,
}

impl RangingSample {
    pub fn new(accessory: impl Into<AccessoryId>, world_position: Option<Point3<f32>>) -> Self {
        Self {
            accessory: accessory.into(),
            world_position,
        }
    }

    /// Sample positioned by a 4x4 AR-world transform
    pub fn from_transform(accessory: impl Into<AccessoryId>, transform: &Matrix4<f32>) -> Self {
        Self::new(accessory, Some(CameraFrame::translation_of(transform)))
    }
}

/// Pose split out of a 4x4 AR-world transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// Rotation with scale removed
    pub orientation: UnitQuaternion<f32>,
    pub position: Point3<f32>,
}

impl CameraFrame {
    /// Decompose a transform; `None` when an axis has zero scale
    pub fn from_transform(transform: &Matrix4<f32>) -> Option<Self> {
        Some(Self {
            orientation: UnitQuaternion::try_from_transform(transform)?,
            position: Self::translation_of(transform),
        })
    }

    fn translation_of(transform: &Matrix4<f32>) -> Point3<f32> {
        Point3::new(transform[(0, 3)], transform[(1, 3)], transform[(2, 3)])
    }
}

/// Marker shown at an accessory's location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: Point3<f32>,
    /// Identity until the first alignment, then the latest alignment rotation
    pub orientation: UnitQuaternion<f32>,
    /// Whether `orientation` came from an alignment
    pub north_aligned: bool,
    /// Number of samples applied to the marker
    pub updates: u32,
}

/// Markers keyed by accessory
#[derive(Debug, Default)]
pub struct MarkerBoard {
    markers: HashMap<AccessoryId, Marker>,
}

impl MarkerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or move the marker for a ranging sample
    ///
    /// A sample without a position keeps the marker where it was; a new
    /// accessory without a position is not placed. The marker takes the
    /// alignment rotation when one is given and keeps its previous
    /// orientation otherwise.
    ///
    /// # Returns
    /// The updated marker, or `None` when nothing was placed.
    pub fn place(&mut self, sample: &RangingSample, alignment: Option<&Alignment>) -> Option<&Marker> {
        match self.markers.entry(sample.accessory.clone()) {
            Entry::Occupied(entry) => {
                let marker = entry.into_mut();
                if let Some(position) = sample.world_position {
                    marker.position = position;
                }
                if let Some(alignment) = alignment {
                    marker.orientation = alignment.quaternion;
                    marker.north_aligned = true;
                }
                marker.updates = marker.updates.saturating_add(1);
                Some(&*marker)
            }
            Entry::Vacant(entry) => {
                let Some(position) = sample.world_position else {
                    tracing::trace!(accessory = %sample.accessory, "No position for new accessory");
                    return None;
                };

                tracing::debug!(
                    accessory = %sample.accessory,
                    x = position.x,
                    y = position.y,
                    z = position.z,
                    "Placing marker"
                );
                let marker = entry.insert(Marker {
                    position,
                    orientation: alignment.map_or_else(UnitQuaternion::identity, |a| a.quaternion),
                    north_aligned: alignment.is_some(),
                    updates: 1,
                });
                Some(&*marker)
            }
        }
    }

    pub fn get(&self, accessory: &AccessoryId) -> Option<&Marker> {
        self.markers.get(accessory)
    }

    pub fn remove(&mut self, accessory: &AccessoryId) -> Option<Marker> {
        let removed = self.markers.remove(accessory);
        if removed.is_some() {
            tracing::debug!(%accessory, "Removed marker");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AccessoryId, &Marker)> {
        self.markers.iter()
    }

    /// Compass bearing from `from` to an accessory's marker, in degrees
    ///
    /// `None` for an unknown accessory or one directly above or below `from`.
    pub fn bearing_to(
        &self,
        accessory: &AccessoryId,
        from: &Point3<f32>,
        alignment: &Alignment,
    ) -> Option<f32> {
        let marker = self.markers.get(accessory)?;
        alignment.bearing_of(&(marker.position - from))
    }

    /// Straight-line distance from `from` to an accessory's marker
    pub fn distance_to(&self, accessory: &AccessoryId, from: &Point3<f32>) -> Option<f32> {
        self.markers
            .get(accessory)
            .map(|marker| (marker.position - from).magnitude())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn id(name: &str) -> AccessoryId {
        AccessoryId::from(name)
    }

    #[test]
    fn test_new_accessory_without_position_is_not_placed() {
        let mut board = MarkerBoard::new();
        assert!(board.place(&RangingSample::new("a", None), None).is_none());
        assert!(board.is_empty());
    }

    #[test]
    fn test_marker_without_alignment_is_identity() {
        let mut board = MarkerBoard::new();
        let marker = *board
            .place(&RangingSample::new("a", Some(Point3::new(1.0, 0.0, 2.0))), None)
            .unwrap();

        assert_eq!(marker.orientation, UnitQuaternion::identity());
        assert!(!marker.north_aligned);
        assert_eq!(marker.updates, 1);
    }

    #[test]
    fn test_missing_position_keeps_last_known() {
        let mut board = MarkerBoard::new();
        let position = Point3::new(1.0, 0.5, -2.0);
        board.place(&RangingSample::new("a", Some(position)), None);

        let marker = board.place(&RangingSample::new("a", None), None).unwrap();
        assert_eq!(marker.position, position);
        assert_eq!(marker.updates, 2);
    }

    #[test]
    fn test_orientation_follows_alignment() {
        let mut board = MarkerBoard::new();
        let sample = RangingSample::new("a", Some(Point3::new(3.0, 0.0, 0.0)));
        let alignment = Alignment::from_angle(1.0, 0.0, 0.0);

        board.place(&sample, None);
        let marker = board.place(&sample, Some(&alignment)).unwrap();
        assert_eq!(marker.orientation, alignment.quaternion);
        assert!(marker.north_aligned);

        // Without a new alignment the orientation stays
        let marker = board.place(&sample, None).unwrap();
        assert_eq!(marker.orientation, alignment.quaternion);
    }

    #[test]
    fn test_markers_are_independent() {
        let mut board = MarkerBoard::new();
        board.place(&RangingSample::new("a", Some(Point3::new(1.0, 0.0, 0.0))), None);
        board.place(&RangingSample::new("b", Some(Point3::new(0.0, 0.0, 1.0))), None);
        assert_eq!(board.len(), 2);

        let removed = board.remove(&id("a")).unwrap();
        assert_eq!(removed.position, Point3::new(1.0, 0.0, 0.0));
        assert!(board.get(&id("a")).is_none());
        assert!(board.get(&id("b")).is_some());
        assert_eq!(board.iter().count(), 1);
    }

    #[test]
    fn test_bearing_and_distance() {
        let mut board = MarkerBoard::new();
        let alignment = Alignment::from_angle(0.0, 0.0, 0.0);
        board.place(&RangingSample::new("a", Some(Point3::new(-3.0, 1.0, 0.0))), None);

        let from = Point3::new(1.0, 0.0, 0.0);
        let bearing = board.bearing_to(&id("a"), &from, &alignment).unwrap();
        assert!((bearing - 180.0).abs() < 1e-3, "got {}", bearing);

        let distance = board.distance_to(&id("a"), &from).unwrap();
        assert!((distance - 17f32.sqrt()).abs() < 1e-5);

        assert!(board.bearing_to(&id("missing"), &from, &alignment).is_none());
    }

    #[test]
    fn test_camera_frame_from_transform() {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.8f32);
        let mut transform = rotation.to_homogeneous() * Matrix4::new_scaling(2.0);
        transform[(0, 3)] = 1.0;
        transform[(1, 3)] = 2.0;
        transform[(2, 3)] = 3.0;
        transform[(3, 3)] = 1.0;

        let frame = CameraFrame::from_transform(&transform).unwrap();
        assert_eq!(frame.position, Point3::new(1.0, 2.0, 3.0));
        assert!(frame.orientation.angle_to(&rotation) < 1e-3);

        let sample = RangingSample::from_transform("a", &transform);
        assert_eq!(sample.world_position, Some(Point3::new(1.0, 2.0, 3.0)));
    }
}
