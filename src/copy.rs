/*
    Recreates a remote folder tree under another folder. Folders are created,
    files are copied server-side with cleaned names, depth first, one request
    at a time.
*/

use crate::google_drive::{types::ListRequest, DriveApi};
use crate::{log, names};
use anyhow::Result;

pub fn folder_url(folder_id: &str) -> String {
    format!("https://drive.google.com/drive/folders/{}", folder_id)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReparentFailure {
    pub file_name: String,
    pub copy_id: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CopyReport {
    /// Id of the copy of the top-level folder
    pub root_id: String,
    pub folders_created: usize,
    pub files_copied: usize,
    /// Copies left under both parents
    pub reparent_failures: Vec<ReparentFailure>,
}

impl CopyReport {
    pub fn url(&self) -> String {
        folder_url(&self.root_id)
    }

    pub fn is_clean(&self) -> bool {
        self.reparent_failures.is_empty()
    }
}

/// Copies folder `src_id` (named `src_name`) with everything below it into `dst`.
///
/// Failing to create a folder or to copy a file aborts the copy and leaves
/// what was already copied in place. Failing to re-parent a copy is recorded
/// in the report and the copy goes on.
pub fn copy_folder<D: DriveApi + ?Sized>(drive: &D, src_id: &str, src_name: &str, dst: &str) -> Result<CopyReport> {
    let mut report = CopyReport::default();
    let root_id = copy_tree(drive, src_id, src_name, dst, &mut report)?;
    report.root_id = root_id;

    log::info(format!(
        "Copied folder {} to {}: {} folders, {} files",
        src_name, dst, report.folders_created, report.files_copied
    ));
    Ok(report)
}

fn copy_tree<D: DriveApi + ?Sized>(
    drive: &D,
    src_id: &str,
    src_name: &str,
    dst: &str,
    report: &mut CopyReport,
) -> Result<String> {
    let request = ListRequest::children(src_id);
    let mut list = drive.list_files(&request)?;

    // created before looking at any child, so empty folders are copied too
    let dst_parent_id = drive.create_folder(src_name, dst)?.id;
    report.folders_created += 1;
    log::info(format!("Created folder: {}", src_name));

    loop {
        log::info(format!("Found {} files", list.files.len()));

        for file in &list.files {
            if file.is_folder() {
                log::debug(format!("file {} is a folder", file.name));
                copy_tree(drive, &file.id, &file.name, &dst_parent_id, report)?;
                continue;
            }

            let clone = drive.copy_file(&file.id, &names::sanitize(&file.name), &dst_parent_id)?;
            report.files_copied += 1;
            log::debug(format!("Copied {} as {}", file.name, clone.name));

            if let Err(e) = drive.update_parents(&clone.id, &dst_parent_id, src_id) {
                log::error(format!("Error updating file {}: {}", file.name, e));
                report.reparent_failures.push(ReparentFailure {
                    file_name: file.name.clone(),
                    copy_id: clone.id.clone(),
                    error: e.to_string(),
                });
            }
        }

        match list.next_page_token.take() {
            Some(token) if !token.is_empty() => {
                list = drive.list_files(&request.with_page_token(Some(token)))?;
            }
            _ => break,
        }
    }

    Ok(dst_parent_id)
}
