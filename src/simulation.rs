use legion::*;
use log::{debug, info};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationData {
    /// Index passed to the stepper on the next tick, starting at 0.
    pub tick: u64,
    pub last_simulated: i64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Wall-clock seconds per tick when pacing.
    pub tick_duration: f64,
    pub realtime: bool,
    pub tick_limit: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            tick_duration: 1. / 240.,
            realtime: true,
            tick_limit: None,
        }
    }
}

impl SimulationData {
    pub fn is_finished(&self, simulation_config: &SimulationConfig) -> bool {
        simulation_config
            .tick_limit
            .map_or(false, |limit| self.tick >= limit)
    }
}

fn now_micros() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as i64)
        .unwrap_or_default()
}

pub fn init_simulation(resources: &mut Resources, simulation_config: SimulationConfig) {
    info!(
        "Simulation at {:.1} ticks/s, realtime: {}",
        1. / simulation_config.tick_duration,
        simulation_config.realtime
    );
    resources.insert(SimulationData {
        tick: 0,
        last_simulated: now_micros(),
    });
    resources.insert(simulation_config);
}

#[system]
pub fn advance_time(
    #[resource] simulation_data: &mut SimulationData,
    #[resource] simulation_config: &SimulationConfig,
) {
    simulation_data.tick += 1;
    if !simulation_config.realtime {
        return;
    }
    let current_time = now_micros();
    let tick_time = current_time - simulation_data.last_simulated;
    debug!("Tick time: {}us", tick_time);
    let tick_cap = (simulation_config.tick_duration * 1e6) as i64;
    let us_to_sleep = std::cmp::max(0, tick_cap - tick_time) as u64;
    std::thread::sleep(Duration::from_micros(us_to_sleep));
    simulation_data.last_simulated = current_time + (us_to_sleep as i64);
}

/// Steps every pendulum, publishes snapshots, then moves to the next tick.
pub fn simulation_schedule() -> Schedule {
    Schedule::builder()
        .add_system(crate::advance::advance_pendulums_system())
        .add_system(crate::snapshot::capture_frames_system())
        .add_system(advance_time_system())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_advances_one_tick_per_execution() {
        let mut world = World::default();
        let mut resources = Resources::default();
        init_simulation(
            &mut resources,
            SimulationConfig {
                realtime: false,
                tick_limit: Some(3),
                ..Default::default()
            },
        );
        let mut schedule = Schedule::builder()
            .add_system(advance_time_system())
            .build();

        let mut executions = 0;
        loop {
            {
                let data = resources.get::<SimulationData>().unwrap();
                let config = resources.get::<SimulationConfig>().unwrap();
                if data.is_finished(&config) {
                    break;
                }
            }
            schedule.execute(&mut world, &mut resources);
            executions += 1;
        }
        assert_eq!(executions, 3);
    }

    #[test]
    fn unlimited_never_finishes() {
        let data = SimulationData {
            tick: u64::MAX,
            last_simulated: 0,
        };
        assert!(!data.is_finished(&SimulationConfig::default()));
    }
}
