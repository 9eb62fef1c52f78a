use super::Cmd;
use anyhow::Result;
use cipher::builder::CipherRegistry;
use clap::{ArgMatches, Command};

#[derive(Clone)]
pub struct ListCmd;

impl Cmd for ListCmd {
    const NAME: &'static str = "list";

    fn cmd() -> Command {
        Command::new(Self::NAME).about("list the supported block ciphers")
    }

    fn run(&self, _m: &ArgMatches) -> Result<()> {
        for line in self.lines(&CipherRegistry::default()) {
            println!("{line}");
        }
        Ok(())
    }
}

impl ListCmd {
    pub fn lines(&self, registry: &CipherRegistry) -> Vec<String> {
        registry
            .algorithms()
            .into_iter()
            .map(|id| {
                format!(
                    "{:<8} key: {:>3} bits, block: {:>3} bits",
                    id.name(),
                    id.key_size() * 8,
                    id.block_size() * 8
                )
            })
            .collect()
    }
}
