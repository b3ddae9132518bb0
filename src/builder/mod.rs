//! Interactive topology builder.
//!
//! This module contains the console prompt plumbing and the entry session
//! that walks an operator through describing a range: teams, networks,
//! hosts, and services.

pub mod console;
pub mod session;

// Re-export key types and functions for easier access
pub use console::{Console, InputError};
pub use session::{confirmed, run};
