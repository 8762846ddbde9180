use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::ModbusError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegisterKind {
    Input,
    Holding,
}

impl fmt::Display for RegisterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterKind::Input => write!(f, "input"),
            RegisterKind::Holding => write!(f, "holding"),
        }
    }
}

impl FromStr for RegisterKind {
    type Err = ModbusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(RegisterKind::Input),
            "holding" => Ok(RegisterKind::Holding),
            other => Err(ModbusError::InvalidData(format!(
                "unknown register type '{}', expected 'input' or 'holding'",
                other
            ))),
        }
    }
}

/// One read, fully described. Built once from command-line input and never
/// mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRequest {
    pub unit_id: u8,
    pub start: u16,
    pub count: u16,
    pub kind: RegisterKind,
}

impl ReadRequest {
    /// Build a request from the positional register range.
    ///
    /// A single element is a bare start address with a count of 1. With two
    /// elements the second is used directly as the register count - it is
    /// NOT an end address, so `[3, 8]` reads 8 registers starting at 3.
    pub fn from_range(range: &[u16], unit_id: u8, kind: RegisterKind) -> Result<Self, ModbusError> {
        let start = *range
            .first()
            .ok_or_else(|| ModbusError::InvalidData("register range is empty".to_string()))?;

        let count = if range.len() >= 2 { range[1] } else { 1 };
        if count == 0 {
            return Err(ModbusError::InvalidData(
                "register count must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            unit_id,
            start,
            count,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_element_range_reads_one_register() {
        let request = ReadRequest::from_range(&[5], 1, RegisterKind::Input).unwrap();
        assert_eq!(request.start, 5);
        assert_eq!(request.count, 1);
    }

    #[test]
    fn test_second_element_is_a_count_not_an_end_address() {
        let request = ReadRequest::from_range(&[3, 8], 1, RegisterKind::Holding).unwrap();
        assert_eq!(request.start, 3);
        assert_eq!(request.count, 8);
    }

    #[test]
    fn test_empty_range_is_rejected() {
        assert!(ReadRequest::from_range(&[], 1, RegisterKind::Input).is_err());
    }

    #[test]
    fn test_zero_count_is_rejected() {
        assert!(ReadRequest::from_range(&[3, 0], 1, RegisterKind::Input).is_err());
    }

    #[test]
    fn test_register_kind_round_trip() {
        assert_eq!("input".parse::<RegisterKind>().unwrap(), RegisterKind::Input);
        assert_eq!(
            "holding".parse::<RegisterKind>().unwrap(),
            RegisterKind::Holding
        );
        assert!("coil".parse::<RegisterKind>().is_err());
        assert_eq!(RegisterKind::Holding.to_string(), "holding");
    }
}
