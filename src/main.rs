mod auth;
mod cli;
mod config;
mod copy;
mod files;
mod google_drive;
mod interactive;
mod listing;
mod log;
mod names;
mod parse_url;
mod query;
mod readline;
mod redirect_listener;
mod requests;
mod setup;
mod titles;
mod user;

use anyhow::Result;

fn run() -> Result<()> {
    let matches = cli::app().get_matches();
    log::set_level(log::level_from_verbosity(matches.occurrences_of("verbose")));

    let config_path = matches.value_of("config");

    match matches.subcommand() {
        ("setup", Some(sub)) => setup::run(config_path, sub.is_present("auth")),
        ("auth", _) => {
            let loaded = config::load(config_path)?;
            auth::reauthorize(&loaded)
        }
        ("destinations", _) => {
            let loaded = config::load(config_path)?;
            interactive::print_destinations(&loaded.config.destinations);
            Ok(())
        }
        (_, sub) => {
            let loaded = config::load(config_path)?;
            log::info(format!("Loaded config file from {:?}", loaded.path));
            interactive::run(&loaded, &cli::copy_options(sub))
        }
    }
}

fn main() {
    if let Err(e) = run() {
        log::error(format!("{:#}", e));
        std::process::exit(1);
    }
}
