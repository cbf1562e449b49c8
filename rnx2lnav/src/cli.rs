use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};
use lnav::prelude::*;
use std::str::FromStr;

/// Default output file
const DEFAULT_OUTPUT: &str = "Navigation Message Bitstream.txt";

pub struct Cli {
    /// arguments passed by user
    pub matches: ArgMatches,
}

impl Cli {
    pub fn new() -> Self {
        Self {
            matches: {
                Command::new("rnx2lnav")
                    .version(env!("CARGO_PKG_VERSION"))
                    .about("GPS LNAV navigation message generator")
                    .arg_required_else_help(true)
                    .color(ColorChoice::Always)
                    .next_help_heading("Input/Output")
                    .arg(
                        Arg::new("filepath")
                            .short('f')
                            .long("fp")
                            .required(true)
                            .help("Input RINEX navigation file (V2 or V3)"),
                    )
                    .arg(
                        Arg::new("almanac")
                            .short('a')
                            .long("almanac")
                            .required(true)
                            .help("Input SEM almanac file"),
                    )
                    .arg(
                        Arg::new("output")
                            .short('o')
                            .long("output")
                            .action(ArgAction::Set)
                            .help("Custom output file. Defaults to \"Navigation Message Bitstream.txt\""),
                    )
                    .next_help_heading("Message")
                    .arg(
                        Arg::new("time")
                            .short('t')
                            .long("time")
                            .required(true)
                            .help("Ephemeris reference time, expects %Y-%m-%dT%H:%M:%S description (GPST)"),
                    )
                    .arg(
                        Arg::new("prn")
                            .short('p')
                            .long("prn")
                            .required(true)
                            .value_parser(value_parser!(u8).range(1..=32))
                            .help("PRN of the transmitting satellite"),
                    )
                    .arg(
                        Arg::new("message")
                            .short('m')
                            .long("message")
                            .action(ArgAction::Set)
                            .help("Special message (22 characters at most)"),
                    )
                    .get_matches()
            },
        }
    }
    pub fn rinex_path(&self) -> &str {
        self.matches
            .get_one::<String>("filepath")
            .map(|s| s.as_str())
            .unwrap_or_default()
    }
    pub fn almanac_path(&self) -> &str {
        self.matches
            .get_one::<String>("almanac")
            .map(|s| s.as_str())
            .unwrap_or_default()
    }
    pub fn output_path(&self) -> &str {
        self.matches
            .get_one::<String>("output")
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_OUTPUT)
    }
    pub fn sv(&self) -> SV {
        let prn = self.matches.get_one::<u8>("prn").copied().unwrap_or(1);
        SV::new(Constellation::GPS, prn)
    }
    pub fn message(&self) -> Option<&String> {
        self.matches.get_one::<String>("message")
    }
    /// Ephemeris reference epoch, in GPST
    pub fn epoch(&self) -> Option<Epoch> {
        let s = self.matches.get_one::<String>("time")?;
        Epoch::from_str(&format!("{} GPST", s.trim())).ok()
    }
}
