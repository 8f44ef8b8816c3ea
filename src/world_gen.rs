use crate::{
    advance::LastStep,
    error::PendulumResult,
    pendulum::{PendulumConfig, PendulumState},
    trail::{TrailBuffer, MAX_TRAIL_LENGTH},
};
use legion::{Entity, World};
use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg64;

pub struct GenerationConfig {
    pub pendulums: usize,
    pub seed: u64,
    pub trail_capacity: usize,
    pub pendulum: PendulumConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            pendulums: 1,
            seed: 0xcafef00dd15ea5e5,
            trail_capacity: MAX_TRAIL_LENGTH,
            pendulum: PendulumConfig::default(),
        }
    }
}

/// Spawns `config.pendulums` pendulums with random initial angles. The
/// same seed always yields the same world.
pub fn init_world(world: &mut World, config: &GenerationConfig) -> PendulumResult<Vec<Entity>> {
    let mut rng = Pcg64::seed_from_u64(config.seed);
    let mut pendulums = std::vec::Vec::<(PendulumState, TrailBuffer, LastStep)>::new();
    pendulums.reserve(config.pendulums);

    while pendulums.len() < config.pendulums {
        let state = PendulumState::with_random_angles(&config.pendulum, &mut rng)?;
        info!(
            "Pendulum {} starts at theta=({:.4}, {:.4})",
            pendulums.len(),
            state.theta1,
            state.theta2
        );
        pendulums.push((
            state,
            TrailBuffer::with_capacity(config.trail_capacity),
            LastStep::default(),
        ));
    }
    Ok(world.extend(pendulums).to_vec())
}
