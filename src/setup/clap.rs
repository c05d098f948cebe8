use clap::{App, Arg, SubCommand};

pub fn root_subcommand() -> App<'static, 'static> {
    SubCommand::with_name("setup")
        .about("Creates the configuration file interactively.")
        .usage("drive-copy setup [FLAGS]")
        .after_help("Destinations can be added later by editing the `[[destinations]]` entries of the file")
        .arg(
            Arg::with_name("auth")
                .long("auth")
                .help("Also authorize the app with Google right away"),
        )
}
