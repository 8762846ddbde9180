use clap::{value_parser, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("regprobe")
        .version(crate::VERSION)
        .about("Read Modbus RTU holding/input registers from a serial device")
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Print the intended read call instead of executing it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port-id")
                .help("Serial device name (Default: /dev/ttyUSB0)")
                .default_value("/dev/ttyUSB0"),
        )
        .arg(
            Arg::new("baud")
                .short('b')
                .long("baud-rate")
                .help("Serial baud rate (Default: 9600)")
                .default_value("9600")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("unit")
                .short('u')
                .long("unit-id")
                .help("Unit ID number on the Modbus line (Default: 1)")
                .default_value("1")
                .value_parser(value_parser!(u8).range(1..)),
        )
        .arg(
            Arg::new("register-type")
                .short('r')
                .long("register-type")
                .help("Register type input/holding (Default: input)")
                .default_value("input")
                .value_parser(["input", "holding"]),
        )
        .arg(
            Arg::new("start-address")
                .short('s')
                .long("start-address")
                .value_name("N")
                .help("Starting register address (Default: 0)")
                .default_value("0")
                .value_parser(value_parser!(u16)),
        )
        .arg(
            Arg::new("num-regs")
                .short('n')
                .long("num-regs")
                .value_name("N")
                .help("Number of registers to read (Default: 1)")
                .default_value("1")
                .value_parser(value_parser!(u16)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Load serial settings from a TOML file"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Emit results as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-ports")
                .long("list-ports")
                .help("List available serial ports and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("register_range")
                .value_name("N")
                .help("Register range <start_reg> [<count>]")
                .num_args(1..=2)
                .required_unless_present("list-ports")
                .value_parser(value_parser!(u16)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_is_a_usage_error() {
        assert!(build_cli().try_get_matches_from(["regprobe"]).is_err());
    }

    #[test]
    fn test_range_takes_one_or_two_values() {
        assert!(build_cli().try_get_matches_from(["regprobe", "3"]).is_ok());
        assert!(build_cli()
            .try_get_matches_from(["regprobe", "3", "8"])
            .is_ok());
        assert!(build_cli()
            .try_get_matches_from(["regprobe", "3", "8", "9"])
            .is_err());
    }

    #[test]
    fn test_register_type_values_are_validated() {
        assert!(build_cli()
            .try_get_matches_from(["regprobe", "-r", "coil", "0"])
            .is_err());
        assert!(build_cli()
            .try_get_matches_from(["regprobe", "-r", "holding", "0"])
            .is_ok());
    }

    #[test]
    fn test_unit_id_must_be_positive() {
        assert!(build_cli()
            .try_get_matches_from(["regprobe", "-u", "0", "0"])
            .is_err());
    }

    #[test]
    fn test_list_ports_needs_no_range() {
        assert!(build_cli()
            .try_get_matches_from(["regprobe", "--list-ports"])
            .is_ok());
    }

    #[test]
    fn test_debug_and_json_flags_parse() {
        let matches = build_cli().get_matches_from(["regprobe", "-d", "--json", "0"]);
        assert!(matches.get_flag("debug"));
        assert!(matches.get_flag("json"));
    }
}
