pub mod advance;
pub mod color;
pub mod dynamics;
pub mod error;
pub mod pendulum;
pub mod simulation;
pub mod snapshot;
pub mod stepper;
pub mod trail;
pub mod world_gen;

pub use error::{PendulumError, PendulumResult};
pub use pendulum::{PendulumConfig, PendulumState};
pub use stepper::{step, StepOutput};
pub use trail::{TrailBuffer, TrailSegment, MAX_TRAIL_LENGTH};
