//! Peripheral drivers and one-shot hardware initialisation.

pub mod button;
pub mod dht22;
pub mod hw_init;
pub mod indicator;
