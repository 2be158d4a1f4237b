use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

/// Parses a field value in decimal, or hex/binary with a `0x`/`0b` prefix
fn parse_field_value(input: &str) -> Result<u32, String> {
    let input = input.trim();
    let (digits, radix) = if let Some(hex) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        (hex, 16)
    } else if let Some(bin) = input
        .strip_prefix("0b")
        .or_else(|| input.strip_prefix("0B"))
    {
        (bin, 2)
    } else {
        (input, 10)
    };
    u32::from_str_radix(digits, radix).map_err(|e| format!("Invalid field value '{}': {}", input, e))
}

fn positive_usize(input: &str) -> Result<usize, String> {
    match input.parse::<usize>() {
        Ok(0) => Err(String::from("Value must be at least 1")),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("Invalid count '{}': {}", input, e)),
    }
}

fn field_args() -> [Arg; 3] {
    [
        Arg::new("modulus")
            .short('m')
            .long("modulus")
            .help("Binary field modulus polynomial as bits (e.g. 0x11D)")
            .value_name("POLY")
            .default_value("0x11D")
            .value_parser(parse_field_value)
            .global(true),
        Arg::new("generator")
            .short('g')
            .long("generator")
            .help("Generator of the field's multiplicative group")
            .value_name("ELEM")
            .default_value("0x02")
            .value_parser(parse_field_value)
            .global(true),
        Arg::new("seed")
            .short('s')
            .long("seed")
            .help("Seed for the random number generator (default: OS entropy)")
            .value_name("N")
            .value_parser(value_parser!(u64))
            .global(true),
    ]
}

pub fn build_cli() -> Command {
    Command::new("rsdemo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Exercise Reed-Solomon codes over binary extension fields")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .args(field_args())
        .subcommand(
            Command::new("example")
                .about("Encode, corrupt and decode one random message")
                .arg(
                    Arg::new("message-len")
                        .short('k')
                        .long("message-len")
                        .help("Number of message values")
                        .value_name("N")
                        .default_value("8")
                        .value_parser(positive_usize),
                )
                .arg(
                    Arg::new("ecc-len")
                        .short('e')
                        .long("ecc-len")
                        .help("Number of error correction values")
                        .value_name("N")
                        .default_value("5")
                        .value_parser(positive_usize),
                ),
        )
        .subcommand(
            Command::new("stress")
                .about("Run randomized decode trials over random code parameters")
                .arg(
                    Arg::new("rounds")
                        .short('r')
                        .long("rounds")
                        .help("Number of random code parameter sets")
                        .value_name("N")
                        .default_value("10")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("trials")
                        .short('n')
                        .long("trials")
                        .help("Decode attempts per round")
                        .value_name("N")
                        .default_value("100")
                        .value_parser(positive_usize),
                )
                .arg(
                    Arg::new("max-codeword-len")
                        .long("max-codeword-len")
                        .help("Upper bound on codeword length (capped by the field size)")
                        .value_name("N")
                        .default_value("255")
                        .value_parser(positive_usize),
                )
                .arg(
                    Arg::new("threads")
                        .short('t')
                        .long("threads")
                        .help("Number of CPU threads for computation (0 = auto-detect)")
                        .value_name("N")
                        .default_value("0")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("no-parallel")
                        .long("no-parallel")
                        .help("Run all rounds on a single thread")
                        .action(ArgAction::SetTrue),
                ),
        )
}

pub fn parse_args() -> ArgMatches {
    build_cli().get_matches()
}
