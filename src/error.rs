use thiserror::Error;

pub type PendulumResult<T> = Result<T, PendulumError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum PendulumError {
    /// A physical parameter is outside its allowed range.
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// An acceleration denominator vanished; the step was not applied.
    #[error("singular configuration, acceleration denominator is {denominator}")]
    SingularConfiguration { denominator: f64 },

    /// The step produced a non-finite angle, velocity or position; the step
    /// was not applied.
    #[error("step diverged: {quantity} is not finite")]
    Diverged { quantity: &'static str },
}
