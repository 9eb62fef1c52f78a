use clap::{value_parser, Arg, Command};
use gbmac::cmd::{Cmd, ListCmd, MacCmd, MacConfig, PadCmd};
use log::LevelFilter;

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let version = env!("GBMAC_VERSION_INFO");
    let app = Command::new("gbmac")
        .version(version)
        .about("GB/T 15852.1 message authentication codes using block ciphers")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .required(false)
                .value_parser(value_parser!(String))
                .help("the JSON configuration file that overrides the default MAC options"),
        )
        .subcommand(MacCmd::cmd())
        .subcommand(PadCmd::cmd())
        .subcommand(ListCmd::cmd())
        .get_matches();

    let config = app.get_one::<String>("config").map(|x| x.as_str());
    if gbmac::log_error(MacConfig::config_with_file(config).map_err(anyhow::Error::from)).is_none() {
        std::process::exit(0x1);
    }

    if let Some((s, m)) = app.subcommand() {
        let res = match s {
            MacCmd::NAME => MacCmd.run(m),
            PadCmd::NAME => PadCmd.run(m),
            ListCmd::NAME => ListCmd.run(m),
            name => Err(anyhow::anyhow!("unsupport for {}", name)),
        };

        if gbmac::log_error(res).is_none() {
            std::process::exit(0x1);
        }
    } else {
        println!("{} {}", env!("CARGO_PKG_NAME"), version);
    }
}
