//! Live plotting of growing CSV logs, plus a synthetic signal source that
//! produces such logs.

pub mod app;
pub mod config;
pub mod control;
pub mod data;
pub mod error;
pub mod signal;
pub mod state;
pub mod ui;
