//! The two diagnostic read operations.
//!
//! Each entry point issues exactly one protocol read. A failed read is
//! rendered through the formatter and the function still returns `Ok`;
//! only connection-open failures propagate to the caller.

use log::info;
use std::io::Write;

use crate::modbus::client::ModbusClientTrait;
use crate::modbus::types::ReadRequest;
use crate::output::formatters::DataFormatter;
use crate::utils::error::ModbusError;

async fn ensure_connected(client: &mut dyn ModbusClientTrait) -> Result<(), ModbusError> {
    if !client.is_connected() {
        client.connect().await?;
    }
    Ok(())
}

/// Read holding registers and render the raw unsigned values.
pub async fn read_holding_registers(
    client: &mut dyn ModbusClientTrait,
    request: &ReadRequest,
    formatter: &dyn DataFormatter,
    out: &mut dyn Write,
) -> Result<(), ModbusError> {
    info!(
        "Reading {} holding registers from unit #{}, starting at register {}",
        request.count, request.unit_id, request.start
    );
    ensure_connected(client).await?;

    match client
        .read_holding_registers(request.unit_id, request.start, request.count)
        .await
    {
        Ok(registers) => writeln!(out, "{}", formatter.format_holding(request, &registers))?,
        Err(error) => writeln!(out, "{}", formatter.format_error(request, &error))?,
    }
    Ok(())
}

/// Read input registers and render `(address, signed value)` pairs.
pub async fn read_input_registers(
    client: &mut dyn ModbusClientTrait,
    request: &ReadRequest,
    formatter: &dyn DataFormatter,
    out: &mut dyn Write,
) -> Result<(), ModbusError> {
    info!(
        "Reading {} input registers from unit #{}, starting at register {}",
        request.count, request.unit_id, request.start
    );
    ensure_connected(client).await?;

    match client
        .read_input_registers(request.unit_id, request.start, request.count)
        .await
    {
        Ok(registers) => writeln!(out, "{}", formatter.format_input(request, &registers))?,
        Err(error) => writeln!(out, "{}", formatter.format_error(request, &error))?,
    }
    Ok(())
}
