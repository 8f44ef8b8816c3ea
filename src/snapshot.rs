//! Render-facing copies of the simulation, published once per tick.
//!
//! Renderers read `Frames` between schedule executions instead of touching
//! the pendulum components, so they always see a consistent tick.

use crate::{
    advance::LastStep, color::Rgb, pendulum::PendulumState, simulation::SimulationData,
    trail::TrailBuffer, trail::TrailSegment,
};
use legion::IntoQuery;
use legion::{system, world::SubWorld, Entity};
use nalgebra::Vector2;

pub const TRAIL_LINE_WIDTH: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapshotConfig {
    /// Screen position of the pivot; every published point is offset by it.
    pub anchor: Vector2<f64>,
    pub include_trail: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        SnapshotConfig {
            anchor: Vector2::new(400., 400.),
            include_trail: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub entity: Entity,
    pub tick: u64,
    pub anchor: Vector2<f64>,
    pub p1: Vector2<f64>,
    pub p2: Vector2<f64>,
    pub bob_radii: (f64, f64),
    // Fill of the second bob; None until the first successful step.
    pub bob_color: Option<Rgb>,
    pub paused: bool,
    pub trail_len: usize,
    pub line_width: f32,
    /// Oldest first. Empty unless `SnapshotConfig::include_trail` is set.
    pub trail: Vec<TrailSegment>,
}

#[derive(Default)]
pub struct Frames {
    pub frames: Vec<FrameSnapshot>,
}

fn translate(segment: &TrailSegment, anchor: Vector2<f64>) -> TrailSegment {
    TrailSegment {
        start: segment.start + anchor,
        end: segment.end + anchor,
        color: segment.color,
    }
}

pub fn snapshot(
    entity: Entity,
    state: &PendulumState,
    trail: &TrailBuffer,
    last_step: &LastStep,
    tick: u64,
    config: &SnapshotConfig,
) -> FrameSnapshot {
    let (p1, p2) = state.joint_positions();
    FrameSnapshot {
        entity,
        tick,
        anchor: config.anchor,
        p1: p1 + config.anchor,
        p2: p2 + config.anchor,
        bob_radii: state.bob_radii(),
        bob_color: last_step.output.map(|o| o.color),
        paused: last_step.paused,
        trail_len: trail.len(),
        line_width: TRAIL_LINE_WIDTH,
        trail: if config.include_trail {
            trail.iter().map(|s| translate(s, config.anchor)).collect()
        } else {
            vec![]
        },
    }
}

#[system]
#[read_component(Entity)]
#[read_component(PendulumState)]
#[read_component(TrailBuffer)]
#[read_component(LastStep)]
pub fn capture_frames(
    world: &mut SubWorld,
    #[resource] simulation_data: &SimulationData,
    #[resource] snapshot_config: &SnapshotConfig,
    #[resource] frames: &mut Frames,
) {
    frames.frames.clear();
    for (entity, state, trail, last_step) in
        <(Entity, &PendulumState, &TrailBuffer, &LastStep)>::query().iter(world)
    {
        frames.frames.push(snapshot(
            *entity,
            state,
            trail,
            last_step,
            simulation_data.tick,
            snapshot_config,
        ));
    }
}
