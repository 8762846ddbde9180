pub mod client;
pub mod types;

pub use client::{ModbusClientTrait, RtuClient, RESPONSE_TIMEOUT};
pub use types::{ReadRequest, RegisterKind};
