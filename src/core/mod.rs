//! Core scheduling types for the render loop

mod run_state;
mod scheduler;
mod shutdown;

pub use run_state::RunState;
pub use scheduler::{Scheduler, IDLE_INTERVAL, POLL_INTERVAL};
pub use shutdown::ShutdownToken;
