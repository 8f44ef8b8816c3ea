//! Equations of motion of the double pendulum and the per-step integration.

use crate::error::{PendulumError, PendulumResult};
use crate::pendulum::PendulumState;

/// Denominators closer to zero than this reject the step.
pub const SINGULARITY_EPSILON: f64 = 1e-9;

/// How accelerations are folded into velocities and angles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Integrator {
    /// `v += a; θ += v`. The step size never enters the update; this is the
    /// behavior the reference trajectories were recorded with.
    Reference,
    /// `v += a*dt; θ += v*dt`.
    TimeScaled,
}

impl Default for Integrator {
    fn default() -> Self {
        Integrator::Reference
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Accelerations {
    pub theta1: f64,
    pub theta2: f64,
}

fn checked_denominator(denominator: f64) -> PendulumResult<f64> {
    if denominator.abs() < SINGULARITY_EPSILON || !denominator.is_finite() {
        return Err(PendulumError::SingularConfiguration { denominator });
    }
    Ok(denominator)
}

/// Angular accelerations of both arms for the current angles and velocities.
///
/// Both are computed from the same state, before either velocity changes.
pub fn accelerations(state: &PendulumState) -> PendulumResult<Accelerations> {
    let g = state.gravity();
    let (m1, m2) = (state.mass1(), state.mass2());
    let (a1, a2) = (state.theta1(), state.theta2());
    let (v1, v2) = (state.omega1(), state.omega2());
    let (l1, l2) = (state.length1(), state.length2());

    // Shared by both denominators.
    let mass_term = 2. * m1 + m2 - m2 * (2. * a1 - 2. * a2).cos();
    let d1 = checked_denominator(l1 * mass_term)?;
    let d2 = checked_denominator(l2 * mass_term)?;

    let theta1 = {
        let n1 = -g * (2. * m1 + m2) * a1.sin();
        let n2 = m2 * g * (a1 - 2. * a2).sin();
        let n3 = 2. * (a1 - a2).sin() * m2;
        let n4 = v2 * v2 * l2 + v1 * v1 * l1 * (a1 - a2).cos();
        (n1 - n2 - n3 * n4) / d1
    };
    let theta2 = {
        let n1 = 2. * (a1 - a2).sin();
        let n2 = v1 * v1 * l1 * (m1 + m2);
        let n3 = g * (m1 + m2) * a1.cos();
        let n4 = v2 * v2 * l2 * m2 * (a1 - a2).cos();
        n1 * (n2 + n3 + n4) / d2
    };

    if !theta1.is_finite() || !theta2.is_finite() {
        return Err(PendulumError::Diverged {
            quantity: "acceleration",
        });
    }
    Ok(Accelerations { theta1, theta2 })
}

/// Applies one integration step in place.
pub fn integrate(state: &mut PendulumState, accel: Accelerations) {
    let scale = match state.integrator() {
        Integrator::Reference => 1.,
        Integrator::TimeScaled => state.dt(),
    };
    state.omega1 += accel.theta1 * scale;
    state.omega2 += accel.theta2 * scale;

    let damping = state.damping();
    state.omega1 *= damping;
    state.omega2 *= damping;

    state.theta1 += state.omega1 * scale;
    state.theta2 += state.omega2 * scale;
}

/// The state one step after `state`, which is left as it was.
pub fn next_state(state: &PendulumState) -> PendulumResult<PendulumState> {
    let accel = accelerations(state)?;
    let mut next = *state;
    integrate(&mut next, accel);
    if !next.is_finite() {
        return Err(PendulumError::Diverged {
            quantity: "angle or velocity",
        });
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pendulum::PendulumConfig;
    use approx::assert_relative_eq;

    fn state(theta1: f64, theta2: f64, omega1: f64, omega2: f64, gravity: f64) -> PendulumState {
        let config = PendulumConfig {
            gravity,
            omega1,
            omega2,
            ..Default::default()
        };
        PendulumState::new(&config, theta1, theta2).unwrap()
    }

    #[test]
    fn hanging_at_rest_has_no_acceleration() {
        let accel = accelerations(&state(0., 0., 0.01, 0.02, 0.)).unwrap();
        assert_eq!(accel.theta1, 0.);
        assert_eq!(accel.theta2, 0.);
    }

    #[test]
    fn zero_gravity_reduces_to_velocity_coupling() {
        let s = state(0.7, -1.3, 0.05, -0.08, 0.);
        let accel = accelerations(&s).unwrap();

        let (m1, m2, l1, l2) = (s.mass1(), s.mass2(), s.length1(), s.length2());
        let (a1, a2, v1, v2) = (s.theta1(), s.theta2(), s.omega1(), s.omega2());
        let delta = a1 - a2;
        let mass_term = 2. * m1 + m2 - m2 * (2. * delta).cos();
        let expected1 =
            -2. * delta.sin() * m2 * (v2 * v2 * l2 + v1 * v1 * l1 * delta.cos()) / (l1 * mass_term);
        let expected2 = 2. * delta.sin()
            * (v1 * v1 * l1 * (m1 + m2) + v2 * v2 * l2 * m2 * delta.cos())
            / (l2 * mass_term);

        assert_relative_eq!(accel.theta1, expected1, epsilon = 1e-15);
        assert_relative_eq!(accel.theta2, expected2, epsilon = 1e-15);
    }

    #[test]
    fn gravity_terms_match_the_coupled_equations() {
        let g = 9.81;
        let s = state(0.9, -2.1, 0.03, -0.07, g);
        let accel = accelerations(&s).unwrap();

        let (m1, m2, l1, l2) = (s.mass1(), s.mass2(), s.length1(), s.length2());
        let (a1, a2, v1, v2) = (0.9f64, -2.1f64, 0.03f64, -0.07f64);
        let den = 2. * m1 + m2 - m2 * (2. * a1 - 2. * a2).cos();

        let expected1 = (-g * (2. * m1 + m2) * a1.sin()
            - m2 * g * (a1 - 2. * a2).sin()
            - 2. * (a1 - a2).sin() * m2 * (v2 * v2 * l2 + v1 * v1 * l1 * (a1 - a2).cos()))
            / (l1 * den);
        let expected2 = 2. * (a1 - a2).sin()
            * (v1 * v1 * l1 * (m1 + m2)
                + g * (m1 + m2) * a1.cos()
                + v2 * v2 * l2 * m2 * (a1 - a2).cos())
            / (l2 * den);

        assert_relative_eq!(accel.theta1, expected1, max_relative = 1e-12);
        assert_relative_eq!(accel.theta2, expected2, max_relative = 1e-12);

        // Gravity contributes on top of the velocity coupling.
        let weightless = accelerations(&state(0.9, -2.1, 0.03, -0.07, 0.)).unwrap();
        assert!((accel.theta1 - weightless.theta1).abs() > 1e-6);
        assert!((accel.theta2 - weightless.theta2).abs() > 1e-6);
    }

    #[test]
    fn gravity_pulls_a_displaced_arm_back() {
        let accel = accelerations(&state(0.5, 0.5, 0., 0., 9.81)).unwrap();
        assert!(accel.theta1 < 0.);
    }

    #[test]
    fn vanishing_mass_is_singular() {
        let config = PendulumConfig {
            length1: 1.,
            mass1: 1e-12,
            ..Default::default()
        };
        let s = PendulumState::new(&config, 0.3, 0.3).unwrap();
        assert!(matches!(
            accelerations(&s),
            Err(PendulumError::SingularConfiguration { .. })
        ));
    }

    #[test]
    fn overflowing_step_is_rejected_without_touching_the_state() {
        let s = state(1., 2., 1e200, 1e200, 0.);
        assert!(matches!(
            next_state(&s),
            Err(PendulumError::Diverged { .. })
        ));
        assert_eq!(s.omega1(), 1e200);
    }

    #[test]
    fn next_state_leaves_the_input_alone() {
        let s = state(0.4, 1.3, 0.01, 0.02, 2.);
        let next = next_state(&s).unwrap();
        let mut expected = s;
        integrate(&mut expected, accelerations(&s).unwrap());
        assert_eq!(next, expected);
        assert_eq!(s.theta1(), 0.4);
    }

    #[test]
    fn reference_integration_ignores_dt() {
        let mut s = state(0., 0., 0.01, 0.02, 0.);
        integrate(
            &mut s,
            Accelerations {
                theta1: 0.5,
                theta2: -0.25,
            },
        );
        assert_relative_eq!(s.omega1, 0.51);
        assert_relative_eq!(s.omega2, -0.23);
        assert_relative_eq!(s.theta1, 0.51);
        assert_relative_eq!(s.theta2, -0.23);
    }

    #[test]
    fn time_scaled_integration_uses_dt() {
        let config = PendulumConfig {
            dt: 0.5,
            omega1: 1.,
            omega2: 0.,
            integrator: Integrator::TimeScaled,
            ..Default::default()
        };
        let mut s = PendulumState::new(&config, 0., 0.).unwrap();
        integrate(
            &mut s,
            Accelerations {
                theta1: 2.,
                theta2: 4.,
            },
        );
        assert_relative_eq!(s.omega1, 2.);
        assert_relative_eq!(s.omega2, 2.);
        assert_relative_eq!(s.theta1, 1.);
        assert_relative_eq!(s.theta2, 1.);
    }

    #[test]
    fn damping_scales_velocity_before_the_angle_update() {
        let config = PendulumConfig {
            damping: 0.5,
            omega1: 1.,
            omega2: 2.,
            ..Default::default()
        };
        let mut s = PendulumState::new(&config, 0., 0.).unwrap();
        integrate(
            &mut s,
            Accelerations {
                theta1: 1.,
                theta2: 0.,
            },
        );
        assert_relative_eq!(s.omega1, 1.);
        assert_relative_eq!(s.omega2, 1.);
        assert_relative_eq!(s.theta1, 1.);
        assert_relative_eq!(s.theta2, 1.);
    }
}
