//! Library components of the `sleep-health` command-line tool.

pub mod legends;
pub mod logging;
pub mod plan;
