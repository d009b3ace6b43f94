//! Synthetic AR session replay
//!
//! Drives an alignment session the way an application would: a compass
//! thread delivering noisy headings, a frame loop at 60 fps while the user
//! sweeps the device around, and two ranged accessories whose markers are
//! kept facing true north.
//!
//! Settings come from `north-align.toml` in the working directory when it
//! exists. Set `RUST_LOG=north_align=debug` for library logging.
//!
//! Run with: `cargo run --example replay`

use nalgebra::{Point3, UnitQuaternion, Vector3};
use north_align::{
    AlignerConfig, AlignmentSession, CameraConvention, HeadingReadout, MarkerBoard, RangingSample,
};
use rand::prelude::*;
use rand_pcg::Pcg64;
use std::error::Error;
use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::thread;
use std::time::Duration;
use tracing::info;

const FRAME_RATE: f32 = 60.0;
const DURATION: f32 = 6.0; // seconds
const TRUE_NORTH_OFFSET: f32 = 57.0; // degrees between AR-world +X and true north

/// Camera orientation for the device leaned back by `tilt` and turned `yaw` about world up
fn camera_pose(yaw: f32, tilt: f32, convention: CameraConvention) -> UnitQuaternion<f32> {
    let device = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw)
        * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), tilt)
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -FRAC_PI_2);
    device * convention.offset().inverse()
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "replay=info,north_align=info".into()),
        )
        .init();

    let config = AlignerConfig::load_or_default("north-align.toml")?;
    let settings = config.aligner;
    info!(?settings, "Starting replay");

    let session = Arc::new(AlignmentSession::with_settings(settings));
    let yaw_bits = Arc::new(AtomicU32::new(0f32.to_bits()));
    let done = Arc::new(AtomicBool::new(false));

    // Compass callback: 20 Hz, heading follows the device with a few degrees of noise
    let compass = {
        let heading = session.heading_cell();
        let yaw_bits = Arc::clone(&yaw_bits);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut rng = Pcg64::seed_from_u64(7);
            while !done.load(Ordering::Relaxed) {
                let yaw = f32::from_bits(yaw_bits.load(Ordering::Relaxed));
                let reading = TRUE_NORTH_OFFSET - yaw.to_degrees() + rng.random_range(-3.0..3.0);
                if let Err(error) = heading.update(reading.rem_euclid(360.0)) {
                    tracing::warn!(%error, "Dropped compass reading");
                }
                thread::sleep(Duration::from_millis(50));
            }
        })
    };

    let mut board = MarkerBoard::new();
    let accessories = [
        RangingSample::new("kitchen", Some(Point3::new(4.0, 0.2, 0.0))),
        RangingSample::new("garage", Some(Point3::new(-1.0, -0.5, -6.0))),
    ];

    let frames = (DURATION * FRAME_RATE) as usize;
    let mut aligned_frames = 0;

    for frame in 0..frames {
        let time = frame as f32 / FRAME_RATE;
        let yaw = 0.25 * time * 2.0 * PI;
        // The user occasionally points the phone at the floor
        let tilt = if (2.0..2.5).contains(&time) { -1.45 } else { 0.5 };
        yaw_bits.store(yaw.to_bits(), Ordering::Relaxed);

        let camera = camera_pose(yaw, tilt, settings.camera_convention);
        if session.on_camera_frame(Some(camera)).is_some() {
            aligned_frames += 1;
        }

        // Markers follow the last published alignment, even through skipped frames
        let alignment = session.alignment();
        for sample in &accessories {
            board.place(sample, alignment.as_ref());
        }

        if frame % FRAME_RATE as usize == 0 {
            println!("t = {:.1}s", time);
            println!("{}", HeadingReadout::new(session.true_heading(), alignment.as_ref()));

            if let Some(alignment) = alignment {
                for (id, _) in board.iter() {
                    if let (Some(bearing), Some(distance)) = (
                        board.bearing_to(id, &Point3::origin(), &alignment),
                        board.distance_to(id, &Point3::origin()),
                    ) {
                        println!("  {}: {:.0}° at {:.1} m", id, bearing, distance);
                    }
                }
            }
        }

        thread::sleep(Duration::from_secs_f32(1.0 / FRAME_RATE));
    }

    done.store(true, Ordering::Relaxed);
    compass.join().map_err(|_| "compass thread panicked")?;

    info!(aligned_frames, frames, "Replay finished");
    Ok(())
}
