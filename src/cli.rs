use crate::{interactive::Options, setup};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

pub fn app() -> App<'static, 'static> {
    App::new("drive-copy")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Finds a movie or show folder across Google shared drives and copies it to a destination folder")
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .takes_value(true)
                .help("Configuration file (Default: ~/.config/drive-copy/config.toml)"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Prints more logs, use twice for debug output"),
        )
        .subcommand(copy_subcommand())
        .subcommand(auth_subcommand())
        .subcommand(destinations_subcommand())
        .subcommand(setup::root_subcommand())
}

fn copy_subcommand() -> App<'static, 'static> {
    SubCommand::with_name("copy")
        .about("Searches folders by title and copies the selected one (the default)")
        .arg(
            Arg::with_name("search")
                .long("search")
                .value_name("TERM")
                .takes_value(true)
                .help("Title to search for instead of asking"),
        )
        .arg(
            Arg::with_name("imdb")
                .long("imdb")
                .conflicts_with("no-imdb")
                .help("Look up alternate titles on IMDb without asking"),
        )
        .arg(
            Arg::with_name("no-imdb")
                .long("no-imdb")
                .help("Search the given title only, without asking"),
        )
        .arg(
            Arg::with_name("yes")
                .short("y")
                .long("yes")
                .help("Copy without asking for confirmation"),
        )
        .arg(
            Arg::with_name("clean")
                .long("clean")
                .help("Hide per-episode and \"(digital)\" folders from the results"),
        )
}

fn auth_subcommand() -> App<'static, 'static> {
    SubCommand::with_name("auth")
        .about("Only will update access token for the client. Usefull when the cached session can't be refreshed")
}

fn destinations_subcommand() -> App<'static, 'static> {
    SubCommand::with_name("destinations").about("Lists the configured destination folders")
}

pub fn copy_options(matches: Option<&ArgMatches>) -> Options {
    let matches = match matches {
        Some(m) => m,
        None => return Options::default(),
    };

    let imdb = if matches.is_present("imdb") {
        Some(true)
    } else if matches.is_present("no-imdb") {
        Some(false)
    } else {
        None
    };

    Options {
        search: matches.value_of("search").map(|s| s.to_string()),
        imdb,
        assume_yes: matches.is_present("yes"),
        clean: matches.is_present("clean"),
    }
}
