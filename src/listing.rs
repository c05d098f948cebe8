/*
    Searches every reachable drive for entries matching a filter and resolves,
    for each of them, the name of its drive and the names of its parents
*/

use crate::google_drive::{types::{File, ListRequest}, DriveApi};
use crate::log;
use anyhow::Result;
use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub struct FolderRecord {
    pub id: String,
    pub name: String,
    pub mime_type: Option<String>,
    /// Whole megabytes, rounded down
    pub size_mb: Option<u64>,
    pub drive_id: Option<String>,
    pub drive_name: Option<String>,
    pub parents: Vec<String>,
    pub parent_names: Vec<String>,
}

pub fn size_in_mb(size: &str) -> Option<u64> {
    size.trim().parse::<u64>().ok().map(|bytes| bytes / 1_000_000)
}

/* Every drive and parent name costs a request of its own, nothing is cached between records */
fn enrich<D: DriveApi + ?Sized>(drive: &D, file: File) -> Result<FolderRecord> {
    let drive_name = match &file.drive_id {
        Some(id) => Some(drive.get_drive(id)?.name),
        None => None,
    };

    let mut parent_names = Vec::with_capacity(file.parents.len());
    for parent in &file.parents {
        parent_names.push(drive.get_file(parent)?.name);
    }

    Ok(FolderRecord {
        size_mb: file.size.as_deref().and_then(size_in_mb),
        id: file.id,
        name: file.name,
        mime_type: file.mime_type,
        drive_id: file.drive_id,
        drive_name,
        parents: file.parents,
        parent_names,
    })
}

fn enrich_page<D: DriveApi + ?Sized>(drive: &D, files: Vec<File>) -> Result<Vec<FolderRecord>> {
    let mut records = Vec::with_capacity(files.len());
    for file in files {
        log::debug(format!("Found file: {}", file.name));
        records.push(enrich(drive, file)?);
    }

    Ok(records)
}

/// Lists every entry matching `query` across all pages.
///
/// A failing request ends the listing early: the pages gathered so far are
/// returned and the page being processed is dropped.
pub fn list_files<D: DriveApi + ?Sized>(drive: &D, query: &str) -> Vec<FolderRecord> {
    log::info("Listing files".to_string());

    let request = ListRequest::search(query);
    let mut records: Vec<FolderRecord> = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = drive
            .list_files(&request.with_page_token(page_token.take()))
            .and_then(|list| Ok((enrich_page(drive, list.files)?, list.next_page_token)));

        match page {
            Ok((page_records, next)) => {
                records.extend(page_records);
                match next {
                    Some(token) if !token.is_empty() => page_token = Some(token),
                    _ => break,
                }
            }
            Err(e) => {
                log::error(format!("An error occurred: {}", e));
                break;
            }
        }
    }

    log::info(format!("Found {} files", records.len()));
    records
}

pub fn without_excluded_drives(records: Vec<FolderRecord>, excluded: &[String]) -> Vec<FolderRecord> {
    records
        .into_iter()
        .filter(|r| match &r.drive_id {
            Some(id) => !excluded.contains(id),
            None => true,
        })
        .collect()
}

/* Drops per-episode folders (`S01E02`) and "(digital)" extras folders */
pub fn clean_results(records: Vec<FolderRecord>) -> Result<Vec<FolderRecord>> {
    let episode = Regex::new(r"S\d\dE\d\d")?;

    log::info("Removing season/episode folders".to_string());
    let records: Vec<FolderRecord> = records.into_iter().filter(|r| !episode.is_match(&r.name)).collect();

    log::info("Removing identified non video folders".to_string());
    Ok(records.into_iter().filter(|r| !r.name.contains("(digital)")).collect())
}
