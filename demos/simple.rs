use nalgebra::{UnitQuaternion, Vector3};
use north_align::{HeadingReadout, OrientationAligner};

const FRAME_PERIOD: f32 = 1.0 / 60.0; // 60 fps

fn main() {
    let aligner = OrientationAligner::new();
    let heading = Some(212.0); // replace this with the latest compass heading in degrees

    for frame in 0..10 {
        // this loop should repeat each time the AR session delivers a camera frame
        let lean = -0.8 + 0.02 * frame as f32 * FRAME_PERIOD;
        let camera = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), lean)
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -std::f32::consts::FRAC_PI_2); // replace this with the camera orientation

        let alignment = aligner.align(heading, Some(camera));

        if let Some(alignment) = &alignment {
            let north = alignment.north();
            println!(
                "North: {:.2}, {:.2}, {:.2} ({:.1}° about world down)",
                north.x,
                north.y,
                north.z,
                alignment.angle_degrees()
            );
        }
        println!("{}", HeadingReadout::new(heading, alignment.as_ref()));
    }
}
