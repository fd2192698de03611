//! TrackWatch firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod classify;
pub mod config;
pub mod error;
pub mod event_log;
pub mod events;
pub mod record;
pub mod sensors;

pub mod pins;

// Adapters and drivers compile on every target; the hardware-facing
// parts are cfg-gated inside and fall back to simulation on the host.
pub mod adapters;
pub mod drivers;
