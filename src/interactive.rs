/* Asks what to search, which folder to copy and where, then copies it */

use crate::{
    auth,
    config::{Config, Destination, Loaded},
    copy::{self, CopyReport},
    google_drive::DriveApi,
    listing::{self, FolderRecord},
    log, query, readline,
    titles::{self, Imdb, TitleSearch},
};
use anyhow::{bail, Result};
use colored::Colorize;

#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Search term given on the command line
    pub search: Option<String>,
    /// Whether to ask IMDb for alternate titles, `None` asks the user
    pub imdb: Option<bool>,
    pub assume_yes: bool,
    pub clean: bool,
}

pub fn run(loaded: &Loaded, options: &Options) -> Result<()> {
    let config = &loaded.config;
    if config.destinations.is_empty() {
        bail!(
            "No destinations configured in {:?}.\nTip: add `[[destinations]]` entries or run `drive-copy setup`.",
            loaded.path
        );
    }

    let drive = auth::connect(loaded)?;

    let search = match &options.search {
        Some(s) => s.clone(),
        None => readline::prompt_required("Search for folders")?,
    };
    let use_imdb = match options.imdb {
        Some(b) => b,
        None => readline::prompt_yes("Use IMDb to find alternate titles?")?,
    };

    let candidates = if use_imdb {
        let imdb = Imdb::new();
        let found = candidates(&search, Some(&imdb), config.search.max_imdb_results)?;
        println!("Alternate titles:");
        for title in &found {
            println!("- {}", title);
        }
        found
    } else {
        println!("Not using IMDb");
        candidates(&search, None, config.search.max_imdb_results)?
    };

    let query = query::build_folder_query(&candidates)?;
    log::debug(query.clone());

    println!("{}", "Searching for folders...".dimmed());
    let folders = filter_records(listing::list_files(&drive, &query), config, options.clean)?;

    if folders.is_empty() {
        println!("No folders found");
        return Ok(());
    }

    print_folders(&folders);
    let source = &folders[readline::prompt_index("\nSelect a folder to copy", folders.len())?];

    print_destinations(&config.destinations);
    let destination = &config.destinations[readline::prompt_index("\nSelect a destination folder", config.destinations.len())?];

    println!("\nCopy {} to {}?", source.name.bold(), destination.name.bold());
    if !options.assume_yes && !readline::prompt_unless_no("Proceed")? {
        println!("\nExiting...");
        return Ok(());
    }

    copy_selected(&drive, source, destination)
}

fn copy_selected<D: DriveApi + ?Sized>(drive: &D, source: &FolderRecord, destination: &Destination) -> Result<()> {
    println!("\nCopying {} to {}", source.name, destination.name);
    let report = copy::copy_folder(drive, &source.id, &source.name, &destination.id)?;

    print_report(&report, source, destination);
    Ok(())
}

/// Search terms for `search`: the title as typed, its separator variants and,
/// with `lookup`, those of the alternate titles found.
///
/// The typed title must be usable in a query. Alternate titles that are not
/// are dropped.
pub fn candidates(search: &str, lookup: Option<&dyn TitleSearch>, max_results: usize) -> Result<Vec<String>> {
    let search = search.trim();
    if search.is_empty() {
        bail!("Nothing to search for");
    }
    if !query::is_safe_candidate(search) {
        return Err(query::QueryError::UnsafeCandidate(search.to_string()).into());
    }

    let (safe, dropped): (Vec<String>, Vec<String>) = titles::expand(search, lookup, max_results)
        .into_iter()
        .partition(|c| query::is_safe_candidate(c));

    for title in dropped {
        log::warn(format!("Skipping alternate title {:?}: quotes cannot be searched", title));
    }

    Ok(safe)
}

pub fn filter_records(records: Vec<FolderRecord>, config: &Config, clean: bool) -> Result<Vec<FolderRecord>> {
    let records = listing::without_excluded_drives(records, &config.exclude_drive_ids);

    if clean || config.search.skip_episode_folders {
        return listing::clean_results(records);
    }

    Ok(records)
}

pub fn describe(index: usize, folder: &FolderRecord) -> Vec<String> {
    let mut lines = vec![
        format!("{}. Name: {}", index + 1, folder.name),
        format!("    Drive Name: {}", folder.drive_name.as_deref().unwrap_or("-")),
        format!("    Parent Names: {}", folder.parent_names.join(", ")),
    ];
    if let Some(size) = folder.size_mb {
        lines.push(format!("    Size: {} MB", size));
    }

    lines
}

fn print_folders(folders: &[FolderRecord]) {
    println!("\nFound {} folders", folders.len().to_string().bold());
    for (i, folder) in folders.iter().enumerate() {
        for line in describe(i, folder) {
            println!("{}", line);
        }
        println!();
    }
}

pub fn print_destinations(destinations: &[Destination]) {
    println!("\nDestination folders:");
    for (i, dst) in destinations.iter().enumerate() {
        println!("{}. {}", i + 1, dst.name);
    }
}

fn print_report(report: &CopyReport, source: &FolderRecord, destination: &Destination) {
    println!(
        "\n{} copied to {} ({} folders, {} files)",
        source.name.green(),
        destination.name.green(),
        report.folders_created,
        report.files_copied
    );
    println!("{}", report.url());

    if !report.is_clean() {
        println!(
            "{}",
            format!("{} copies are still listed under the source folder as well:", report.reparent_failures.len()).yellow()
        );
        for failure in &report.reparent_failures {
            println!("- {} ({}): {}", failure.file_name, failure.copy_id, failure.error);
        }
    }
}
