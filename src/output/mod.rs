pub mod formatters;

pub use formatters::{DataFormatter, JsonFormatter, PlainFormatter};
