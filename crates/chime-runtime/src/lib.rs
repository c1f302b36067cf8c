//! Process runtime and OS-level concerns for chime.
//!
//! Implements the `chime-core` ports against the real operating system:
//! launching playback processes under a timeout and periodically sweeping
//! the stat cache.
#![deny(unsafe_code)]

pub mod process;
mod sweeper;

pub use process::{TokioProcessSupervisor, shutdown_child};
pub use sweeper::CacheSweeper;
