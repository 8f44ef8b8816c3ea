use crate::color::{rainbow_color, rainbow_frequency, Rgb};
use crate::dynamics::next_state;
use crate::error::{PendulumError, PendulumResult};
use crate::pendulum::PendulumState;
use crate::trail::{TrailBuffer, TrailSegment};
use nalgebra::Vector2;

/// Everything a renderer needs from one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutput {
    pub p1: Vector2<f64>,
    pub p2: Vector2<f64>,
    pub segment: TrailSegment,
    pub color: Rgb,
}

/// Advances `state` by one step and appends the path of the second bob to
/// `trail`.
///
/// On any error neither `state` nor `trail` is touched.
pub fn step(
    state: &mut PendulumState,
    trail: &mut TrailBuffer,
    tick: u64,
) -> PendulumResult<StepOutput> {
    let (_, old_p2) = state.joint_positions();
    let next = next_state(state)?;
    let (p1, p2) = next.joint_positions();
    if !(p1.iter().all(|c| c.is_finite()) && p2.iter().all(|c| c.is_finite())) {
        return Err(PendulumError::Diverged {
            quantity: "joint position",
        });
    }
    *state = next;

    let color = rainbow_color(tick, rainbow_frequency(state.dt()));
    let segment = TrailSegment {
        start: old_p2,
        end: p2,
        color,
    };
    trail.push(segment);

    Ok(StepOutput {
        p1,
        p2,
        segment,
        color,
    })
}
