pub mod convert;
pub mod error;

pub use convert::{signed16, signed_value};
pub use error::ModbusError;
