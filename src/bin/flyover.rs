//! Headless demo sortie
//!
//! Drives the simulation through a scripted 30-second flight: climb out,
//! gear up, a banked turn, two missiles and a bomb. Prints a status line
//! every five simulated seconds and a summary at the end. An optional
//! argument names a JSON config file.
//!
//! ```text
//! cargo run --bin flyover [config.json]
//! RUST_LOG=debug cargo run --bin flyover
//! ```

use std::process;

use barnstormer_engine::flight::FlightStatus;
use barnstormer_engine::game::{FlightSim, SimConfig};
use barnstormer_engine::input::{FlightKeys, KeyCode};

const FRAME_DT: f32 = 1.0 / 60.0;
const FLIGHT_FRAMES: u32 = 1800;

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("failed to load {path}: {err}");
                process::exit(1);
            }
        },
        None => SimConfig::default(),
    };

    let mut sim = FlightSim::new(&config);
    let mut keys = FlightKeys::new();
    let mut impacts = 0usize;

    println!("taking off with {} obstacles in the world", sim.world.collision.len());

    for frame in 0..FLIGHT_FRAMES {
        script_input(frame, &mut keys);
        let report = sim.advance(&mut keys, FRAME_DT);
        impacts += report.events.iter().filter(|e| e.hit.is_some()).count();

        if let Some(hit) = report.crash {
            println!("crashed ({hit:?}) after {:.1} s", sim.elapsed());
            break;
        }

        if frame % 300 == 299 {
            let p = sim.body.position;
            println!(
                "t={:5.1}s  pos=({:7.1}, {:5.1}, {:7.1})  throttle={:.2}  {}",
                sim.elapsed(),
                p.x,
                p.y,
                p.z,
                sim.body.throttle,
                status_label(report.status),
            );
        }
    }

    println!(
        "sortie over: {:.1} s flown, {} projectile impacts, {} obstacles left",
        sim.elapsed(),
        impacts,
        sim.world.collision.len()
    );
}

fn status_label(status: FlightStatus) -> &'static str {
    match status {
        FlightStatus::Flying => "flying",
        FlightStatus::Stalling => "STALL",
        FlightStatus::Crashed => "crashed",
    }
}

/// Scripted control timeline, in frames at 60 Hz.
fn script_input(frame: u32, keys: &mut FlightKeys) {
    // Full power for the first five seconds, then cruise.
    keys.throttle_up = frame < 300;
    // Nose up briefly once the speed is there.
    keys.pitch_up = (300..420).contains(&frame);
    // One banked turn to the right.
    keys.roll_right = (600..780).contains(&frame);

    match frame {
        150 => {
            keys.handle_key(KeyCode::G, true); // gear up
        }
        900 => {
            keys.handle_key(KeyCode::Numpad4, true);
        }
        960 => {
            keys.handle_key(KeyCode::Numpad6, true);
        }
        1200 => {
            keys.handle_key(KeyCode::B, true);
        }
        _ => {}
    }
}
