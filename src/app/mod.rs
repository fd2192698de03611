//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the monitoring cycle: averaging, threshold
//! classification, event logging and the log dump.  All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod commands;
pub mod dump;
pub mod events;
pub mod ports;
pub mod service;
