//! State Management
//!
//! Global application state shared by the shell and pages.

pub mod global;

pub use global::{provide_global_state, use_global_state, GlobalState};
