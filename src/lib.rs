//! Serial Modbus RTU register diagnostic reader.
//!
//! Reads a range of holding or input registers from a single unit on a
//! serial line and prints the result: raw unsigned values for holding
//! registers, two's-complement signed `(address, value)` pairs for input
//! registers. Protocol framing, CRC and request/response correlation are
//! delegated to the underlying Modbus client.

pub mod cli;
pub mod config;
pub mod modbus;
pub mod output;
pub mod reader;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use modbus::{ModbusClientTrait, ReadRequest, RegisterKind, RtuClient};
pub use output::{DataFormatter, JsonFormatter, PlainFormatter};
pub use utils::convert::{signed16, signed_value};
pub use utils::error::ModbusError;

pub const VERSION: &str = "0.1.0";
