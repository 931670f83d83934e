//! quickmath-core: Round engine, scoring, and timer.
//!
//! This crate holds everything about a quiz round that is not rendering or
//! persistence: equation generation, round construction, the tick-driven
//! timer, scoring against stored best times, and the session orchestrator
//! that ties them together behind the [`traits::ScoreStore`] and
//! [`traits::Presenter`] seams.

pub mod equation;
pub mod error;
pub mod expression;
pub mod model;
pub mod rng;
pub mod round;
pub mod scoring;
pub mod session;
pub mod timer;
pub mod traits;

pub use error::SessionError;
pub use session::{GameSession, SessionConfig};
