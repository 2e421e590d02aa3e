pub mod common;
pub mod damped_pendulum;
pub mod double_pendulum;
pub mod exponential;
pub mod pendulum;
pub mod sine;
