use crate::dynamics::Integrator;
use crate::error::{PendulumError, PendulumResult};
use nalgebra::Vector2;
use rand::Rng;

/// Physical parameters and initial velocities of a double pendulum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendulumConfig {
    pub length1: f64,
    pub length2: f64,
    pub mass1: f64,
    pub mass2: f64,
    pub gravity: f64,
    pub dt: f64,
    pub omega1: f64,
    pub omega2: f64,
    // Multiplier applied to both velocities every step. 1.0 disables it.
    pub damping: f64,
    pub integrator: Integrator,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        PendulumConfig {
            length1: 180.,
            length2: 150.,
            mass1: 50.,
            mass2: 12.,
            gravity: 0.,
            dt: 1. / 240.,
            omega1: 0.01,
            omega2: 0.02,
            damping: 1.,
            integrator: Integrator::Reference,
        }
    }
}

/// Parameters are fixed at construction; only the angles and angular
/// velocities change, and only through a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendulumState {
    length1: f64,
    length2: f64,
    mass1: f64,
    mass2: f64,
    gravity: f64,
    dt: f64,
    damping: f64,
    integrator: Integrator,
    pub(crate) theta1: f64,
    pub(crate) theta2: f64,
    pub(crate) omega1: f64,
    pub(crate) omega2: f64,
}

fn require_positive(name: &'static str, value: f64) -> PendulumResult<()> {
    if value.is_finite() && value > 0. {
        Ok(())
    } else {
        Err(PendulumError::InvalidParameter { name, value })
    }
}

fn require_finite(name: &'static str, value: f64) -> PendulumResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PendulumError::InvalidParameter { name, value })
    }
}

impl PendulumState {
    /// Builds a pendulum at the given initial angles, with the initial
    /// velocities taken from `config`.
    ///
    /// Fails with `InvalidParameter` if a length, mass or `dt` is not strictly
    /// positive, if damping is outside (0, 1], or if any value is not finite.
    pub fn new(config: &PendulumConfig, theta1: f64, theta2: f64) -> PendulumResult<Self> {
        require_positive("length1", config.length1)?;
        require_positive("length2", config.length2)?;
        require_positive("mass1", config.mass1)?;
        require_positive("mass2", config.mass2)?;
        require_positive("dt", config.dt)?;
        require_positive("damping", config.damping)?;
        if config.damping > 1. {
            return Err(PendulumError::InvalidParameter {
                name: "damping",
                value: config.damping,
            });
        }
        require_finite("gravity", config.gravity)?;
        require_finite("theta1", theta1)?;
        require_finite("theta2", theta2)?;
        require_finite("omega1", config.omega1)?;
        require_finite("omega2", config.omega2)?;

        Ok(PendulumState {
            length1: config.length1,
            length2: config.length2,
            mass1: config.mass1,
            mass2: config.mass2,
            gravity: config.gravity,
            dt: config.dt,
            damping: config.damping,
            integrator: config.integrator,
            theta1,
            theta2,
            omega1: config.omega1,
            omega2: config.omega2,
        })
    }

    /// Same as `new`, with both angles drawn uniformly from [0, 2π).
    pub fn with_random_angles<R: Rng>(config: &PendulumConfig, rng: &mut R) -> PendulumResult<Self> {
        let theta1 = rng.gen_range(0.0..std::f64::consts::TAU);
        let theta2 = rng.gen_range(0.0..std::f64::consts::TAU);
        PendulumState::new(config, theta1, theta2)
    }

    /// Positions of both bobs relative to the pivot. θ = 0 hangs straight down.
    pub fn joint_positions(&self) -> (Vector2<f64>, Vector2<f64>) {
        let p1 = Vector2::new(
            self.length1 * self.theta1.sin(),
            self.length1 * self.theta1.cos(),
        );
        let p2 = p1
            + Vector2::new(
                self.length2 * self.theta2.sin(),
                self.length2 * self.theta2.cos(),
            );
        (p1, p2)
    }

    pub fn bob_radii(&self) -> (f64, f64) {
        (2. * self.mass1.sqrt(), 2. * self.mass2.sqrt())
    }

    /// True when every angle and velocity is a finite number.
    pub fn is_finite(&self) -> bool {
        self.theta1.is_finite()
            && self.theta2.is_finite()
            && self.omega1.is_finite()
            && self.omega2.is_finite()
    }

    pub fn length1(&self) -> f64 {
        self.length1
    }

    pub fn length2(&self) -> f64 {
        self.length2
    }

    pub fn mass1(&self) -> f64 {
        self.mass1
    }

    pub fn mass2(&self) -> f64 {
        self.mass2
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn integrator(&self) -> Integrator {
        self.integrator
    }

    pub fn theta1(&self) -> f64 {
        self.theta1
    }

    pub fn theta2(&self) -> f64 {
        self.theta2
    }

    pub fn omega1(&self) -> f64 {
        self.omega1
    }

    pub fn omega2(&self) -> f64 {
        self.omega2
    }
}
