use chrono::Utc;

use crate::modbus::types::ReadRequest;
use crate::utils::convert::signed16;
use crate::utils::error::ModbusError;

/// Render surface for read results. The readers only ever emit one of the
/// three shapes below, so formatters stay small.
pub trait DataFormatter: Send + Sync {
    /// Raw unsigned register values, address order.
    fn format_holding(&self, request: &ReadRequest, registers: &[u16]) -> String;

    /// One `(address, signed value)` pair per register, addresses counting
    /// up from the request's start.
    fn format_input(&self, request: &ReadRequest, registers: &[u16]) -> String;

    fn format_error(&self, request: &ReadRequest, error: &ModbusError) -> String;
}

/// Classic console output, matching what field operators expect from the
/// old reader: a bare value list for holding registers, `address value`
/// lines for input registers.
pub struct PlainFormatter;

impl DataFormatter for PlainFormatter {
    fn format_holding(&self, _request: &ReadRequest, registers: &[u16]) -> String {
        let values = registers
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{}]", values)
    }

    fn format_input(&self, request: &ReadRequest, registers: &[u16]) -> String {
        registers
            .iter()
            .enumerate()
            .map(|(idx, register)| {
                let address = u32::from(request.start) + idx as u32;
                format!("{} {}", address, signed16(*register))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_error(&self, _request: &ReadRequest, error: &ModbusError) -> String {
        format!("Exception: {}", error)
    }
}

/// Machine-readable output, one JSON object per read.
pub struct JsonFormatter;

impl JsonFormatter {
    fn envelope(request: &ReadRequest) -> serde_json::Value {
        serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "unit_id": request.unit_id,
            "register_type": request.kind.to_string(),
            "start_address": request.start,
            "count": request.count,
        })
    }
}

impl DataFormatter for JsonFormatter {
    fn format_holding(&self, request: &ReadRequest, registers: &[u16]) -> String {
        let mut payload = Self::envelope(request);
        payload["registers"] = serde_json::json!(registers);
        payload.to_string()
    }

    fn format_input(&self, request: &ReadRequest, registers: &[u16]) -> String {
        let pairs: Vec<serde_json::Value> = registers
            .iter()
            .enumerate()
            .map(|(idx, register)| {
                serde_json::json!({
                    "address": u32::from(request.start) + idx as u32,
                    "value": signed16(*register),
                })
            })
            .collect();

        let mut payload = Self::envelope(request);
        payload["registers"] = serde_json::json!(pairs);
        payload.to_string()
    }

    fn format_error(&self, request: &ReadRequest, error: &ModbusError) -> String {
        let mut payload = Self::envelope(request);
        payload["error"] = serde_json::json!(error.to_string());
        payload.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modbus::types::RegisterKind;

    fn input_request() -> ReadRequest {
        ReadRequest {
            unit_id: 1,
            start: 5,
            count: 3,
            kind: RegisterKind::Input,
        }
    }

    #[test]
    fn test_plain_holding_is_a_raw_value_list() {
        let request = ReadRequest {
            unit_id: 1,
            start: 0,
            count: 3,
            kind: RegisterKind::Holding,
        };
        let out = PlainFormatter.format_holding(&request, &[10, 20, 30]);
        assert_eq!(out, "[10, 20, 30]");
    }

    #[test]
    fn test_plain_input_pairs_count_up_from_start() {
        let out = PlainFormatter.format_input(&input_request(), &[10, 20, 30]);
        assert_eq!(out, "5 10\n6 20\n7 30");
    }

    #[test]
    fn test_plain_input_values_are_sign_converted() {
        let out = PlainFormatter.format_input(&input_request(), &[65535, 32768]);
        assert_eq!(out, "5 -1\n6 -32768");
    }

    #[test]
    fn test_plain_error_render() {
        let error = ModbusError::DeviceException("Illegal data address".to_string());
        let out = PlainFormatter.format_error(&input_request(), &error);
        assert_eq!(out, "Exception: Device exception: Illegal data address");
    }

    #[test]
    fn test_json_holding_render() {
        let request = ReadRequest {
            unit_id: 7,
            start: 3,
            count: 2,
            kind: RegisterKind::Holding,
        };
        let out = JsonFormatter.format_holding(&request, &[1, 2]);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["unit_id"], 7);
        assert_eq!(value["register_type"], "holding");
        assert_eq!(value["registers"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_json_input_render_carries_signed_pairs() {
        let out = JsonFormatter.format_input(&input_request(), &[65535]);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["registers"][0]["address"], 5);
        assert_eq!(value["registers"][0]["value"], -1);
    }

    #[test]
    fn test_json_error_render() {
        let out = JsonFormatter.format_error(&input_request(), &ModbusError::Timeout);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["error"], "Timeout occurred");
        assert!(value.get("registers").is_none());
    }
}
