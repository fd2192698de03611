//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements           | Connects to              |
//! |----------------|----------------------|--------------------------|
//! | `hardware`     | SensorPort           | ESP32 ADC, DHT22         |
//! |                | IndicatorPort        | Red / green LEDs         |
//! | `log_sink`     | EventSink            | Serial log output        |
//! | `display`      | EventSink            | 16×2 character display   |
//! | `eeprom`       | EepromPort           | NVS blob (emulated)      |
//! | `nvs`          | ConfigPort           | NVS / in-memory store    |
//! |                | StoragePort          |                          |
//! | `time`         | ClockPort            | System RTC / timer       |

pub mod display;
pub mod eeprom;
pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod time;
