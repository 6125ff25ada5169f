//! # Noise schedules
//!
//! How much of the original signal survives at each diffusion step, and the
//! closed-form mixing of signal and noise built on top of it.

use core::fmt;
use core::str::FromStr;

use burn::config::Config;
use serde::{Deserialize, Serialize};

use crate::Error;

pub mod ddim;
pub mod forward;
pub mod schedule;

pub use schedule::{alpha_bar_at, build_schedule, Schedule};

/// This represents how beta grows from its minimum value to the maximum
/// over the course of the diffusion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleShape {
    /// Beta interpolated linearly.
    #[default]
    Linear,
    /// Alpha bar follows a squared cosine, no beta accumulation.
    Cosine,
    /// Beta grows with the square of the step, heavier noise late.
    Quadratic,
    /// Beta follows a logistic curve: slow, fast, slow.
    Sigmoid,
}

impl ScheduleShape {
    pub const ALL: [ScheduleShape; 4] = [
        ScheduleShape::Linear,
        ScheduleShape::Cosine,
        ScheduleShape::Quadratic,
        ScheduleShape::Sigmoid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScheduleShape::Linear => "linear",
            ScheduleShape::Cosine => "cosine",
            ScheduleShape::Quadratic => "quadratic",
            ScheduleShape::Sigmoid => "sigmoid",
        }
    }
}

impl fmt::Display for ScheduleShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown names are rejected. Callers that want the linear fallback ask for
/// it with `unwrap_or_default()`.
impl FromStr for ScheduleShape {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let name = s.trim();
        ScheduleShape::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownShape(name.to_string()))
    }
}

/// The configuration of a noise schedule.
#[derive(Config, Debug)]
pub struct ScheduleConfig {
    /// The number of diffusion steps, at least 2.
    pub steps: usize,
    /// How beta evolves over the steps.
    #[config(default = "ScheduleShape::Linear")]
    pub shape: ScheduleShape,
}

impl ScheduleConfig {
    /// Builds the [schedule](Schedule) described by this configuration.
    pub fn init(&self) -> crate::Result<Schedule> {
        build_schedule(self.steps, self.shape)
    }
}
