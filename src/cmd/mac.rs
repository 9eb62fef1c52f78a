use super::{
    algorithm, algorithm_arg, edition, input_args, padding, padding_arg, parse_hex, read_input,
    variant, Cmd, MacConfig,
};
use anyhow::Result;
use cipher::builder::{CipherRegistry, MacBuilder};
use cipher::mac::KeyInduction;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

#[derive(Clone)]
pub struct MacCmd;

impl Cmd for MacCmd {
    const NAME: &'static str = "mac";

    fn cmd() -> Command {
        input_args(Command::new(Self::NAME).about("GB/T 15852.1 MAC using a block cipher"))
            .arg(
                Arg::new("key")
                    .short('k')
                    .long("key")
                    .required(true)
                    .value_parser(value_parser!(String))
                    .help("the first key in hex"),
            )
            .arg(
                Arg::new("key2")
                    .long("key2")
                    .required(false)
                    .value_parser(value_parser!(String))
                    .help("the second key in hex, derived from the first key if absent"),
            )
            .arg(
                Arg::new("iv")
                    .long("iv")
                    .required(false)
                    .value_parser(value_parser!(String))
                    .help("the initial vector in hex, all zeros if absent"),
            )
            .arg(algorithm_arg())
            .arg(
                Arg::new("variant")
                    .short('v')
                    .long("variant")
                    .required(false)
                    .value_parser(value_parser!(u8).range(1..=8))
                    .help("MAC algorithm 1~8"),
            )
            .arg(padding_arg())
            .arg(
                Arg::new("bits")
                    .short('b')
                    .long("bits")
                    .required(false)
                    .value_parser(value_parser!(usize))
                    .help("MAC bit length, a full block if absent"),
            )
            .arg(
                Arg::new("edition")
                    .short('e')
                    .long("edition")
                    .required(false)
                    .value_parser(value_parser!(u16))
                    .help("the standard edition, 2008 or 2020"),
            )
            .arg(
                Arg::new("legacy")
                    .long("legacy")
                    .action(ArgAction::SetTrue)
                    .help("derive the second key of algorithm 2 by complementing the first key"),
            )
            .arg(
                Arg::new("length")
                    .long("length")
                    .required(false)
                    .value_parser(value_parser!(u64))
                    .help("the message byte length used by padding method 3, the input length if absent"),
            )
    }

    fn run(&self, m: &ArgMatches) -> Result<()> {
        let data = read_input(m)?;
        let mac = self.compute(m, MacConfig::config(), &data)?;
        println!("{}", hex::encode_upper(mac));
        Ok(())
    }
}

impl MacCmd {
    pub fn compute(&self, m: &ArgMatches, config: &MacConfig, data: &[u8]) -> Result<Vec<u8>> {
        let id = algorithm(m, config)?;
        let v = variant(m, config)?;
        let p = padding(m, config)?;

        let mut builder = MacBuilder::new(id)
            .edition(edition(m, config)?)
            .variant(v)
            .padding(p);
        if let Some(bits) = m.get_one::<usize>("bits").copied() {
            builder = builder.mac_bits(bits);
        } else if config.mac_bits != 0 {
            builder = builder.mac_bits(config.mac_bits);
        }
        if m.get_flag("legacy") {
            builder = builder.key_induction(KeyInduction::Legacy);
        }

        let key = m
            .get_one::<String>("key")
            .map(|x| parse_hex("key", x))
            .transpose()?
            .unwrap_or_default();
        let len = m.get_one::<u64>("length").copied().unwrap_or(data.len() as u64);
        let mut params = builder
            .parameters(&key)
            .with_total_length_bits(len.wrapping_mul(8) as u32);
        if let Some(k) = m.get_one::<String>("key2") {
            params = params.with_key2(&parse_hex("key2", k)?);
        }
        if let Some(iv) = m.get_one::<String>("iv") {
            params = params.with_iv(&parse_hex("iv", iv)?);
        }

        log::debug!("compute {} MAC with {:?}", id.name(), params);

        let mut mac = builder.build(&CipherRegistry::default())?;
        mac.init(&params)?;
        mac.update(data)?;
        Ok(mac.mac()?)
    }
}
