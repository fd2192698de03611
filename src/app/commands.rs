//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (the user button,
//! a host harness) that the [`MonitorService`](super::service::MonitorService)
//! interprets and acts upon.  Configuration is read once at boot and is not
//! a command.

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Print every stored record.
    DumpLog,
}
