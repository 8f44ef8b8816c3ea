use legion::*;
use log::{debug, warn};

use crate::{
    pendulum::PendulumState,
    simulation::SimulationData,
    stepper::{step, StepOutput},
    trail::TrailBuffer,
};

/// Result of the latest tick for one pendulum.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LastStep {
    pub output: Option<StepOutput>,
    // Set when the latest tick was rejected; the pendulum held its state.
    pub paused: bool,
}

#[system(par_for_each)]
pub fn advance_pendulums(
    state: &mut PendulumState,
    trail: &mut TrailBuffer,
    last_step: &mut LastStep,
    #[resource] simulation_data: &SimulationData,
) {
    advance_single_pendulum(state, trail, last_step, simulation_data.tick);
}

pub fn advance_single_pendulum(
    state: &mut PendulumState,
    trail: &mut TrailBuffer,
    last_step: &mut LastStep,
    tick: u64,
) {
    match step(state, trail, tick) {
        Ok(output) => {
            debug!(
                "Tick {}: theta=({}, {}) p2=({}, {})",
                tick, state.theta1, state.theta2, output.p2.x, output.p2.y
            );
            last_step.output = Some(output);
            last_step.paused = false;
        }
        Err(err) => {
            warn!("Tick {} skipped: {}", tick, err);
            last_step.paused = true;
        }
    }
}
