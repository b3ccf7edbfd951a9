//! # nxprof core
//!
//! Everything between the command line and the switches:
//!
//! * [`inventory`]: hostname list to YAML inventory and back.
//! * [`session`]: the [`session::Connector`] seam and its SSH implementation.
//! * [`tasks`]: the per-switch collection task.
//! * [`reconcile`]: merging both `show` outputs into one profile map.
//! * [`runner`]: fixed-size worker pool running the task over every host.
//! * [`report`]: CSV output.

pub mod inventory;
pub mod reconcile;
pub mod report;
pub mod runner;
pub mod session;
pub mod tasks;
