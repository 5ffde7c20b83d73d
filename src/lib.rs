pub mod about;
#[cfg(feature = "gui")]
pub mod app;
pub mod engine;
pub mod engine_shell;
pub mod error;
pub mod forms;
pub mod input;
pub mod logging;
pub mod number_base;
pub mod report;
pub mod searching;
pub mod set_ops;
pub mod sorting;
pub mod trace;

pub use discrete_protocol as protocol;
