// Command line access to the name availability checks. Talks to a running server the same way the
// rename forms do, which makes it handy for scripting and for poking at a deployment.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod check_name;
mod client_config;
mod http_transport;

use clap::{Command, arg};
use secret_santa::name_check::{RenameContext, RenameTarget};


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Secret Santa")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Secret Santa console client")
        .subcommand_required(true)
        .arg(arg!(--"config" <config_file> "Path to the configuration file: yaml-serialized ClientConfig."))
        .arg(arg!(--"server" <server_url> "Server URL. Overrides the configuration file."))
        .subcommand(
            Command::new("check-name")
                .about("Checks whether an exchange can be renamed to the given name.")
                .arg(arg!(<name> "New exchange name"))
                .arg(arg!(--"current" <current_name> "Current exchange name")),
        )
        .subcommand(
            Command::new("check-participant-name")
                .about("Checks whether a participant can be renamed within an exchange.")
                .arg(arg!(<exchange_slug> "Exchange slug, as seen in the exchange URL"))
                .arg(arg!(<old_name> "Current participant name"))
                .arg(arg!(<new_name> "New participant name")),
        )
        .get_matches();

    let mut config = match matches.get_one::<String>("config") {
        Some(config_file) => client_config::read_config_file(config_file)?,
        None => Default::default(),
    };
    if let Some(server_url) = matches.get_one::<String>("server") {
        config = config.with_server_url(server_url.clone());
    }

    let (target, candidate) = match matches.subcommand() {
        Some(("check-name", sub_matches)) => (
            RenameTarget::Exchange {
                current_name: sub_matches.get_one::<String>("current").cloned(),
            },
            required_arg(sub_matches, "name")?,
        ),
        Some(("check-participant-name", sub_matches)) => (
            RenameTarget::Participant(RenameContext {
                exchange_slug: required_arg(sub_matches, "exchange_slug")?,
                old_name: required_arg(sub_matches, "old_name")?,
            }),
            required_arg(sub_matches, "new_name")?,
        ),
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    };
    async_std::task::block_on(check_name::run(&config, target, candidate))
}

fn required_arg(matches: &clap::ArgMatches, id: &str) -> anyhow::Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Missing argument <{id}>"))
}
