use approx::assert_relative_eq;
use core::f32::consts::{FRAC_PI_2, PI};
use nalgebra::{UnitQuaternion, Vector3};
use north_align::{
    AlignerSettings, CameraConvention, DeviceAxes, OrientationAligner, QuaternionExt,
    Unavailable, Vector3Ext, device_orientation, heading_difference,
};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

const EPSILON: f32 = 1e-5;
const SWEEP: usize = 2000;

/// Camera orientation for a device whose up axis is turned `yaw` about world
/// up from AR-world +X, with the screen tilted `tilt` out of the horizontal plane
fn camera_for(yaw: f32, tilt: f32) -> UnitQuaternion<f32> {
    let device = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw)
        * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), tilt)
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -FRAC_PI_2);
    device * CameraConvention::LandscapeRight.offset().inverse()
}

fn random_camera(rng: &mut Pcg64) -> UnitQuaternion<f32> {
    UnitQuaternion::from_euler_angles(
        rng.random_range(-PI..PI),
        rng.random_range(-FRAC_PI_2..FRAC_PI_2),
        rng.random_range(-PI..PI),
    )
}

fn device_axes(camera: &UnitQuaternion<f32>) -> DeviceAxes {
    DeviceAxes::of(&device_orientation(camera, CameraConvention::LandscapeRight))
}

/// Every emitted quaternion is a unit rotation about world down
#[test]
fn test_output_is_unit_rotation_about_down() {
    let aligner = OrientationAligner::new();
    let mut rng = Pcg64::seed_from_u64(7);
    let mut emitted = 0;

    for _ in 0..SWEEP {
        let camera = random_camera(&mut rng);
        let heading = rng.random_range(0.0..360.0);

        if let Some(alignment) = aligner.align(Some(heading), Some(camera)) {
            emitted += 1;
            assert!(
                (alignment.quaternion.norm() - 1.0).abs() < EPSILON,
                "Quaternion norm {} for heading {}",
                alignment.quaternion.norm(),
                heading
            );
            assert!((0.0..2.0 * PI).contains(&alignment.angle));

            // Rotation about Y only: the vertical axis is left alone
            let up = alignment.orient(&Vector3::y());
            assert_relative_eq!(up, Vector3::y(), epsilon = EPSILON);
        }
    }

    assert!(emitted > SWEEP / 4, "only {} of {} frames aligned", emitted, SWEEP);
}

/// Orientations at or beyond the vertical limit never align; all others do
#[test]
fn test_degeneracy_guard() {
    let aligner = OrientationAligner::new();
    let mut rng = Pcg64::seed_from_u64(11);

    for _ in 0..SWEEP {
        let camera = random_camera(&mut rng);
        let axes = device_axes(&camera);
        let result = aligner.try_align(Some(90.0), Some(camera));

        if axes.up.y.abs() >= 0.9 || axes.forward.y.abs() >= 0.9 {
            assert!(
                matches!(result, Err(Unavailable::NearVertical { .. })),
                "up.y {} forward.y {} should be near vertical, got {:?}",
                axes.up.y,
                axes.forward.y,
                result
            );
        } else {
            assert!(result.is_ok(), "expected alignment, got {:?}", result);
        }
    }
}

/// Guard thresholds apply symmetrically to pointing up and down
#[test]
fn test_guard_boundaries() {
    let aligner = OrientationAligner::new();

    // Screen tilted until the forward axis is 0.95 vertical, either way
    let steep = 0.95f32.asin();
    assert!(aligner.align(Some(0.0), Some(camera_for(0.4, steep))).is_none());
    assert!(aligner.align(Some(0.0), Some(camera_for(0.4, -steep))).is_none());

    let shallow = 0.85f32.asin();
    assert!(aligner.align(Some(0.0), Some(camera_for(0.4, shallow))).is_some());
    assert!(aligner.align(Some(0.0), Some(camera_for(0.4, -shallow))).is_some());
}

/// A tighter limit rejects orientations the default accepts
#[test]
fn test_configurable_limit() {
    let strict = OrientationAligner::with_settings(AlignerSettings {
        vertical_limit: 0.5,
        ..Default::default()
    });
    let camera = camera_for(1.0, 0.7);

    assert!(OrientationAligner::new().align(Some(0.0), Some(camera)).is_some());
    assert!(strict.align(Some(0.0), Some(camera)).is_none());
}

/// Headings of 359° and 1° give alignments 2° apart, not 358°
#[test]
fn test_heading_wraparound() {
    let aligner = OrientationAligner::new();
    let camera = camera_for(0.6, 0.3);

    let before = aligner.align(Some(359.0), Some(camera)).unwrap();
    let after = aligner.align(Some(1.0), Some(camera)).unwrap();

    assert_relative_eq!(before.quaternion.angle_to(&after.quaternion), 2f32.to_radians(), epsilon = 1e-3);

    let turn = heading_difference(before.angle_degrees(), after.angle_degrees());
    assert_relative_eq!(turn.abs(), 2.0, epsilon = 1e-3);
}

/// Up axis along +X with a heading of 0° is the identity alignment
#[test]
fn test_identity_fixture() {
    let aligner = OrientationAligner::with_settings(AlignerSettings {
        camera_convention: CameraConvention::Portrait,
        ..Default::default()
    });
    let device = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -FRAC_PI_2);

    let alignment = aligner.align(Some(0.0), Some(device)).unwrap();
    assert_eq!(alignment.angle, 0.0);
    assert_relative_eq!(alignment.north(), Vector3::x(), epsilon = EPSILON);
    assert_relative_eq!(
        alignment.quaternion.into_inner(),
        UnitQuaternion::identity().into_inner(),
        epsilon = EPSILON
    );

    // Same pose through the landscape offset
    let landscape = OrientationAligner::new();
    let camera = camera_for(0.0, 0.0);
    let alignment = landscape.align(Some(0.0), Some(camera)).unwrap();
    assert_relative_eq!(alignment.north(), Vector3::x(), epsilon = EPSILON);
}

/// Missing inputs never produce an alignment
#[test]
fn test_absence_propagates() {
    let aligner = OrientationAligner::new();
    let camera = camera_for(0.2, 0.2);

    assert!(aligner.align(None, Some(camera)).is_none());
    assert!(aligner.align(Some(120.0), None).is_none());
    assert!(aligner.align(None, None).is_none());
}

/// The projected device up axis has a compass bearing equal to the heading
#[test]
fn test_device_up_bearing_matches_heading() {
    let aligner = OrientationAligner::new();
    let mut rng = Pcg64::seed_from_u64(42);
    let mut checked = 0;

    for _ in 0..SWEEP {
        let camera = random_camera(&mut rng);
        let heading: f32 = rng.random_range(0.0..360.0);

        let Some(alignment) = aligner.align(Some(heading), Some(camera)) else {
            continue;
        };
        checked += 1;

        let up = device_axes(&camera.renormalized().unwrap()).up.horizontal();
        let bearing = alignment.bearing_of(&up).unwrap();
        assert!(
            heading_difference(heading, bearing).abs() < 1e-2,
            "heading {} but device up bears {}",
            heading,
            bearing
        );
    }

    assert!(checked > 0);
}

/// Turning the device about world up moves the alignment the opposite way
#[test]
fn test_yaw_moves_alignment() {
    let aligner = OrientationAligner::new();
    let heading = 75.0;

    let reference = aligner.align(Some(heading), Some(camera_for(0.0, 0.5))).unwrap();
    for yaw_deg in [10.0f32, 45.0, 120.0, -60.0] {
        let turned = aligner
            .align(Some(heading), Some(camera_for(yaw_deg.to_radians(), 0.5)))
            .unwrap();

        // Positive yaw lowers the local heading, and the alignment angle with it
        let delta = heading_difference(reference.angle_degrees(), turned.angle_degrees());
        assert_relative_eq!(delta, -yaw_deg, epsilon = 1e-2);
    }
}

/// The alignment depends only on the heading relative to the device
#[test]
fn test_turning_device_and_compass_together_is_invariant() {
    let aligner = OrientationAligner::new();
    let reference = aligner.align(Some(30.0), Some(camera_for(0.0, 0.4))).unwrap();

    // Device turned 40° clockwise (a negative turn about up) and the compass agrees
    let turned = aligner
        .align(Some(70.0), Some(camera_for(-40f32.to_radians(), 0.4)))
        .unwrap();

    assert_relative_eq!(turned.north(), reference.north(), epsilon = 1e-4);
}
