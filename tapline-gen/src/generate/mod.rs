//! Note generation strategies
//!
//! Both generators honor the same contract: produce a note sequence ordered
//! non-decreasingly by time, with every lane in 1..=4, parameterized by a
//! difficulty profile.

pub mod onset_driven;
pub mod synthetic;

pub use onset_driven::OnsetDrivenGenerator;
pub use synthetic::SyntheticGenerator;

use rand::Rng;

/// Number of lanes in the play field
pub const LANE_COUNT: u8 = 4;

/// Draw a lane uniformly from 1..=4
pub(crate) fn random_lane<R: Rng>(rng: &mut R) -> u8 {
    rng.gen_range(1..=LANE_COUNT)
}

/// Round a note time to millisecond precision for the persisted document
pub(crate) fn round_time(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}
