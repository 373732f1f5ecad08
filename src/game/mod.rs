//! The Qwinto game: configuration, round state machine, rendering.

pub mod config;
pub mod render;
pub mod state;

pub use config::{QwintoConfig, QwintoGame, QwintoGameBuilder, ReturnsMode, MAX_RAW_SCORE};
pub use render::action_to_string;
pub use state::QwintoState;
