use clap::ValueEnum;
use diffusion_schedule::schedulers::ScheduleShape;

pub mod kde;
pub mod sample;
pub mod schedule;
pub mod shuffle;

/// Command-line spelling of [`ScheduleShape`].
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ShapeArg {
    Linear,
    Cosine,
    Quadratic,
    Sigmoid,
}

impl From<ShapeArg> for ScheduleShape {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Linear => ScheduleShape::Linear,
            ShapeArg::Cosine => ScheduleShape::Cosine,
            ShapeArg::Quadratic => ScheduleShape::Quadratic,
            ShapeArg::Sigmoid => ScheduleShape::Sigmoid,
        }
    }
}
