use double_pendulum::{
    simulation::{init_simulation, simulation_schedule, SimulationConfig, SimulationData},
    snapshot::{Frames, SnapshotConfig},
    world_gen::{init_world, GenerationConfig},
};
use legion::{Resources, World};
use log::{info, LevelFilter};
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use std::error::Error;

// One minute at 240 ticks per second.
const TICK_LIMIT: u64 = 240 * 60;
const REPORT_EVERY: u64 = 240;

fn init_logging() -> Result<(), Box<dyn Error>> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S%.3f)} {l} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}

pub fn main() -> Result<(), Box<dyn Error>> {
    init_logging()?;

    // Initialize world.
    let mut world = World::default();
    let generation_config = GenerationConfig::default();
    init_world(&mut world, &generation_config)?;

    let mut resources = Resources::default();
    init_simulation(
        &mut resources,
        SimulationConfig {
            tick_duration: generation_config.pendulum.dt,
            tick_limit: Some(TICK_LIMIT),
            ..Default::default()
        },
    );
    resources.insert(SnapshotConfig::default());
    resources.insert(Frames::default());

    let mut schedule = simulation_schedule();

    'running: loop {
        schedule.execute(&mut world, &mut resources);

        let simulation_data = match resources.get::<SimulationData>() {
            Some(data) => *data,
            None => break 'running,
        };
        if simulation_data.tick % REPORT_EVERY == 0 {
            if let Some(frames) = resources.get::<Frames>() {
                for frame in frames.frames.iter() {
                    info!(
                        "Tick {}: p1=({:.2}, {:.2}) p2=({:.2}, {:.2}) color={:?} trail={}{}",
                        frame.tick,
                        frame.p1.x,
                        frame.p1.y,
                        frame.p2.x,
                        frame.p2.y,
                        frame.bob_color,
                        frame.trail_len,
                        if frame.paused { " (paused)" } else { "" }
                    );
                }
            }
        }
        if let Some(simulation_config) = resources.get::<SimulationConfig>() {
            if simulation_data.is_finished(&simulation_config) {
                break 'running;
            }
        }
    }
    info!("Stopped after {} ticks", TICK_LIMIT);
    Ok(())
}
