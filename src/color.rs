use std::f64::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const CHANNEL_PHASES: [f64; 3] = [0., 2. * PI / 3., 4. * PI / 3.];

/// Color frequency for a given step duration.
pub fn rainbow_frequency(dt: f64) -> f64 {
    dt / 10.
}

fn channel(frequency: f64, tick: u64, phase: f64) -> u8 {
    let value = (frequency * tick as f64 + phase).sin() * 127. + 128.;
    // Truncates toward zero.
    value.max(0.).min(255.) as u8
}

/// Cycles through the rainbow as `tick` increases.
pub fn rainbow_color(tick: u64, frequency: f64) -> Rgb {
    Rgb {
        r: channel(frequency, tick, CHANNEL_PHASES[0]),
        g: channel(frequency, tick, CHANNEL_PHASES[1]),
        b: channel(frequency, tick, CHANNEL_PHASES[2]),
    }
}
