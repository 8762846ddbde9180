use clap::ArgMatches;
use std::io::{self, Write};

use crate::config::Config;
use crate::modbus::client::{ModbusClientTrait, RtuClient};
use crate::modbus::types::{ReadRequest, RegisterKind};
use crate::output::formatters::{DataFormatter, JsonFormatter, PlainFormatter};
use crate::reader;
use crate::utils::error::ModbusError;

/// Dispatch one invocation: at most one connect, one read, one close.
pub async fn run(matches: &ArgMatches) -> Result<(), ModbusError> {
    if matches.get_flag("list-ports") {
        return list_serial_ports();
    }

    let config = Config::from_matches(matches)?;

    let range: Vec<u16> = matches
        .get_many::<u16>("register_range")
        .map(|values| values.copied().collect())
        .unwrap_or_default();
    let request = ReadRequest::from_range(&range, config.unit_id, config.register_type)?;

    if matches.get_flag("debug") {
        println!(
            "debug: would read {} {} register(s) from unit #{} starting at address {} ({} @ {} baud)",
            request.count,
            request.kind,
            request.unit_id,
            request.start,
            config.serial_port,
            config.baud_rate
        );
        return Ok(());
    }

    let formatter: Box<dyn DataFormatter> = if matches.get_flag("json") {
        Box::new(JsonFormatter)
    } else {
        Box::new(PlainFormatter)
    };

    let mut client = RtuClient::new(&config.serial_port, config.baud_rate);
    let mut stdout = io::stdout().lock();

    match request.kind {
        RegisterKind::Holding => {
            reader::read_holding_registers(&mut client, &request, formatter.as_ref(), &mut stdout)
                .await?
        }
        RegisterKind::Input => {
            reader::read_input_registers(&mut client, &request, formatter.as_ref(), &mut stdout)
                .await?
        }
    }
    stdout.flush()?;

    client.close().await
}

fn list_serial_ports() -> Result<(), ModbusError> {
    let ports = serialport::available_ports().map_err(|e| {
        ModbusError::CommunicationError(format!("Port enumeration failed: {}", e))
    })?;

    println!("📡 Available serial ports:");
    if ports.is_empty() {
        println!("   No serial ports found");
        return Ok(());
    }

    for (index, port) in ports.iter().enumerate() {
        println!("   {}. {}", index + 1, port.port_name);
        if let serialport::SerialPortType::UsbPort(usb_info) = &port.port_type {
            if let Some(manufacturer) = &usb_info.manufacturer {
                println!("      Manufacturer: {}", manufacturer);
            }
            if let Some(serial_number) = &usb_info.serial_number {
                println!("      Serial number: {}", serial_number);
            }
        }
    }
    Ok(())
}
