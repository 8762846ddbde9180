use async_trait::async_trait;
use log::{debug, error, info};
use std::time::Duration;
use tokio_modbus::client::{rtu, Context, Reader};
use tokio_modbus::prelude::*;
use tokio_serial::SerialStream;

use crate::utils::error::ModbusError;

/// Response deadline for a single request. The link parameters themselves
/// are fixed: 8 data bits, no parity, 1 stop bit.
pub const RESPONSE_TIMEOUT: Duration = Duration::from_secs(1);

#[async_trait]
pub trait ModbusClientTrait: Send {
    async fn connect(&mut self) -> Result<(), ModbusError>;

    fn is_connected(&self) -> bool;

    async fn read_holding_registers(
        &mut self,
        unit_id: u8,
        start: u16,
        count: u16,
    ) -> Result<Vec<u16>, ModbusError>;

    async fn read_input_registers(
        &mut self,
        unit_id: u8,
        start: u16,
        count: u16,
    ) -> Result<Vec<u16>, ModbusError>;

    async fn close(&mut self) -> Result<(), ModbusError>;
}

/// Modbus RTU client over a serial line.
///
/// Construction only records the link settings; the port is opened by
/// `connect`, so callers can check `is_connected` and open on demand.
pub struct RtuClient {
    port_name: String,
    baud_rate: u32,
    ctx: Option<Context>,
}

impl RtuClient {
    pub fn new(port_name: &str, baud_rate: u32) -> Self {
        Self {
            port_name: port_name.to_string(),
            baud_rate,
            ctx: None,
        }
    }

    fn context(&mut self) -> Result<&mut Context, ModbusError> {
        self.ctx
            .as_mut()
            .ok_or_else(|| ModbusError::ConnectionError("not connected".to_string()))
    }
}

#[async_trait]
impl ModbusClientTrait for RtuClient {
    async fn connect(&mut self) -> Result<(), ModbusError> {
        info!("🔌 Connecting to Modbus RTU port: {}", self.port_name);
        info!(
            "⚙️  Configuration: {} baud, 8 data bits, no parity, 1 stop bit",
            self.baud_rate
        );

        let builder = tokio_serial::new(self.port_name.as_str(), self.baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .stop_bits(tokio_serial::StopBits::One)
            .parity(tokio_serial::Parity::None)
            .timeout(RESPONSE_TIMEOUT);

        let stream = SerialStream::open(&builder).map_err(|e| {
            error!("❌ Failed to open serial port {}: {}", self.port_name, e);
            ModbusError::ConnectionError(format!(
                "Failed to open port {}: {}",
                self.port_name, e
            ))
        })?;

        self.ctx = Some(rtu::attach(stream));
        info!("Modbus RTU connection established successfully");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.ctx.is_some()
    }

    async fn read_holding_registers(
        &mut self,
        unit_id: u8,
        start: u16,
        count: u16,
    ) -> Result<Vec<u16>, ModbusError> {
        debug!(
            "Holding register read: unit {} start {} count {}",
            unit_id, start, count
        );
        let ctx = self.context()?;
        ctx.set_slave(Slave(unit_id));

        let response =
            tokio::time::timeout(RESPONSE_TIMEOUT, ctx.read_holding_registers(start, count))
                .await?;
        match response {
            Ok(Ok(registers)) => Ok(registers),
            Ok(Err(exception)) => Err(ModbusError::DeviceException(exception.to_string())),
            Err(e) => Err(ModbusError::CommunicationError(e.to_string())),
        }
    }

    async fn read_input_registers(
        &mut self,
        unit_id: u8,
        start: u16,
        count: u16,
    ) -> Result<Vec<u16>, ModbusError> {
        debug!(
            "Input register read: unit {} start {} count {}",
            unit_id, start, count
        );
        let ctx = self.context()?;
        ctx.set_slave(Slave(unit_id));

        let response =
            tokio::time::timeout(RESPONSE_TIMEOUT, ctx.read_input_registers(start, count))
                .await?;
        match response {
            Ok(Ok(registers)) => Ok(registers),
            Ok(Err(exception)) => Err(ModbusError::DeviceException(exception.to_string())),
            Err(e) => Err(ModbusError::CommunicationError(e.to_string())),
        }
    }

    async fn close(&mut self) -> Result<(), ModbusError> {
        if let Some(mut ctx) = self.ctx.take() {
            ctx.disconnect()
                .await
                .map_err(|e| ModbusError::ConnectionError(format!("Disconnect failed: {}", e)))?;
            info!("Serial connection closed");
        }
        Ok(())
    }
}
