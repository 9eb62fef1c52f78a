use std::path::PathBuf;

use anyhow::Result;
use cipher::builder::{AlgorithmIdentifier, Edition};
use cipher::mac::{MacVariant, PaddingScheme};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::error::MyError;

pub trait Cmd {
    const NAME: &'static str;

    fn cmd() -> Command;

    fn run(&self, m: &ArgMatches) -> Result<()>;
}

mod config;
pub use config::MacConfig;

mod mac;
pub use mac::MacCmd;

mod pad;
pub use pad::PadCmd;

mod list;
pub use list::ListCmd;

fn input_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("msg")
            .value_name("MESSAGE")
            .action(ArgAction::Set)
            .required(false)
            .value_parser(value_parser!(String))
            .help("the message that need to authentication"),
    )
    .arg(
        Arg::new("file")
            .short('f')
            .long("file")
            .required(false)
            .value_parser(value_parser!(PathBuf))
            .help("the file that need to authentication, appended after the MESSAGE"),
    )
}

fn algorithm_arg() -> Arg {
    Arg::new("algorithm")
        .short('a')
        .long("algorithm")
        .required(false)
        .value_parser(value_parser!(String))
        .help("block cipher name, see the `list` subcommand")
}

fn padding_arg() -> Arg {
    Arg::new("padding")
        .short('p')
        .long("padding")
        .required(false)
        .value_parser(value_parser!(u8).range(1..=4))
        .help("padding method 1~4")
}

fn read_input(m: &ArgMatches) -> Result<Vec<u8>> {
    let mut data = m
        .get_one::<String>("msg")
        .map(|x| x.as_bytes().to_vec())
        .unwrap_or_default();

    if let Some(p) = m.get_one::<PathBuf>("file") {
        data.extend(std::fs::read(p)?);
    } else if m.get_one::<String>("msg").is_none() {
        anyhow::bail!(MyError::MissingInput);
    }

    Ok(data)
}

fn parse_hex(name: &str, s: &str) -> Result<Vec<u8>, MyError> {
    hex::decode(s.trim()).map_err(|e| MyError::InvalidHex {
        name: name.to_string(),
        msg: e.to_string(),
    })
}

fn algorithm(m: &ArgMatches, config: &MacConfig) -> Result<AlgorithmIdentifier, MyError> {
    let name = m
        .get_one::<String>("algorithm")
        .map(|x| x.as_str())
        .unwrap_or(config.algorithm.as_str());
    AlgorithmIdentifier::from_name(name).map_err(|_| MyError::UnknownAlgorithm(name.to_string()))
}

fn padding(m: &ArgMatches, config: &MacConfig) -> Result<PaddingScheme, MyError> {
    let p = m.get_one::<u8>("padding").copied().unwrap_or(config.padding);
    PaddingScheme::try_from(p).map_err(|_| MyError::InvalidOption {
        name: "padding".to_string(),
        value: p.to_string(),
    })
}

fn variant(m: &ArgMatches, config: &MacConfig) -> Result<MacVariant, MyError> {
    let v = m.get_one::<u8>("variant").copied().unwrap_or(config.variant);
    MacVariant::try_from(v).map_err(|_| MyError::InvalidOption {
        name: "variant".to_string(),
        value: v.to_string(),
    })
}

fn edition(m: &ArgMatches, config: &MacConfig) -> Result<Edition, MyError> {
    let e = m.get_one::<u16>("edition").copied().unwrap_or(config.edition);
    Edition::try_from(e).map_err(|_| MyError::InvalidOption {
        name: "edition".to_string(),
        value: e.to_string(),
    })
}
