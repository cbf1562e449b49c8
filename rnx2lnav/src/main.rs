//! Command line tool to generate the GPS LNAV bitstream
//! of one satellite, from a RINEX navigation file and a SEM almanac.
mod cli;
use cli::Cli;

use env_logger::{Builder, Env, Target};

#[macro_use]
extern crate log;

use lnav::prelude::{sem, Encoder, NavigationFile};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error")]
    StdioError(#[from] std::io::Error),
    #[error("lnav error")]
    LnavError(#[from] lnav::Error),
    #[error("invalid epoch: expecting %Y-%m-%dT%H:%M:%S")]
    InvalidEpoch,
}

pub fn main() -> Result<(), Error> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::new();
    let sv = cli.sv();
    let epoch = cli.epoch().ok_or(Error::InvalidEpoch)?;

    let nav = NavigationFile::from_file(cli.rinex_path())?;
    info!(
        "{}: {} GPS ephemerides",
        cli.rinex_path(),
        nav.ephemerides.len()
    );

    let almanac = sem::from_file(cli.almanac_path())?;
    info!(
        "{}: week {} toa {}, {} satellites",
        cli.almanac_path(),
        almanac.week,
        almanac.toa,
        almanac.records.len()
    );

    let mut encoder = Encoder::from_records(&nav.ephemerides, sv, epoch, &almanac)?
        .with_ionosphere(nav.ionosphere);

    if let Some(message) = cli.message() {
        if message.chars().count() > 22 {
            warn!("special message will be truncated to 22 characters");
        }
        encoder = encoder.with_message(message);
    }

    let message = encoder.encode().map_err(|e| {
        error!("{}({}) - encoding failure: {}", sv, epoch, e);
        e
    })?;

    let missing = message.diagnostics().count();
    if missing > 0 {
        warn!("{}({}) - {} dummy almanac page(s)", sv, epoch, missing);
    }

    let output = cli.output_path();
    message.to_file(output)?;
    info!("{} generated", output);
    Ok(())
}
