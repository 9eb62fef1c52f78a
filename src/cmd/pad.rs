use super::{
    algorithm, algorithm_arg, input_args, padding, padding_arg, read_input, Cmd, MacConfig,
};
use anyhow::Result;
use cipher::mac::tool;
use clap::{ArgMatches, Command};

#[derive(Clone)]
pub struct PadCmd;

impl Cmd for PadCmd {
    const NAME: &'static str = "pad";

    fn cmd() -> Command {
        input_args(Command::new(Self::NAME).about("pad the message and print it block by block"))
            .arg(algorithm_arg())
            .arg(padding_arg())
    }

    fn run(&self, m: &ArgMatches) -> Result<()> {
        let data = read_input(m)?;
        for blk in self.blocks(m, MacConfig::config(), &data)? {
            println!("{blk}");
        }
        Ok(())
    }
}

impl PadCmd {
    pub fn blocks(&self, m: &ArgMatches, config: &MacConfig, data: &[u8]) -> Result<Vec<String>> {
        let n = algorithm(m, config)?.block_size();
        let padded = tool::padding(padding(m, config)?, data, n);
        Ok(padded.chunks(n).map(hex::encode_upper).collect())
    }
}
