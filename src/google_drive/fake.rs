/* In-memory drive used by the tests of the listing and copying code */

use super::errors::DriveError;
use super::types::{Drive, File, FileList, ListRequest, FOLDER_MIME_TYPE};
use super::DriveApi;
use anyhow::Result;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

#[derive(Default)]
struct State {
    files: Vec<File>,
    next_id: usize,
    calls: Vec<String>,
}

#[derive(Default)]
pub struct FakeDrive {
    state: RefCell<State>,
    drives: HashMap<String, String>,
    page_size: usize,
    /// Listing calls (0-based, counted across the whole run) that fail
    failing_list_calls: HashSet<usize>,
    /// Names of copies that cannot be re-parented
    failing_reparents: HashSet<String>,
    failing_copies: HashSet<String>,
}

fn not_found(id: &str) -> anyhow::Error {
    DriveError::Api {
        status: 404,
        message: format!("File not found: {}.", id),
    }
    .into()
}

impl FakeDrive {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    pub fn with_drive(mut self, id: &str, name: &str) -> Self {
        self.drives.insert(id.to_string(), name.to_string());
        self
    }

    pub fn failing_list_call(mut self, call: usize) -> Self {
        self.failing_list_calls.insert(call);
        self
    }

    pub fn failing_reparent(mut self, name: &str) -> Self {
        self.failing_reparents.insert(name.to_string());
        self
    }

    pub fn failing_copy(mut self, name: &str) -> Self {
        self.failing_copies.insert(name.to_string());
        self
    }

    pub fn add_folder(&self, id: &str, name: &str, parent: &str) {
        self.insert(File {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: Some(FOLDER_MIME_TYPE.to_string()),
            size: None,
            parents: vec![parent.to_string()],
            drive_id: None,
        });
    }

    pub fn add_file(&self, id: &str, name: &str, parent: &str, size: &str) {
        self.insert(File {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: Some("video/x-matroska".to_string()),
            size: Some(size.to_string()),
            parents: vec![parent.to_string()],
            drive_id: None,
        });
    }

    pub fn insert(&self, file: File) {
        self.state.borrow_mut().files.push(file);
    }

    pub fn file(&self, id: &str) -> Option<File> {
        self.state.borrow().files.iter().find(|f| f.id == id).cloned()
    }

    pub fn children(&self, parent: &str) -> Vec<File> {
        self.state
            .borrow()
            .files
            .iter()
            .filter(|f| f.parents.iter().any(|p| p == parent))
            .cloned()
            .collect()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn list_calls(&self) -> usize {
        self.count("list ")
    }

    fn record(&self, call: String) {
        self.state.borrow_mut().calls.push(call);
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        format!("{}-{}", prefix, state.next_id)
    }
}

impl DriveApi for FakeDrive {
    /* `'<id>' in parents` lists children, anything else lists every folder */
    fn list_files(&self, request: &ListRequest) -> Result<FileList> {
        let call = self.list_calls();
        self.record(format!("list {}", request.query));

        if self.failing_list_calls.contains(&call) {
            return Err(DriveError::Api {
                status: 500,
                message: "Internal Error".to_string(),
            }
            .into());
        }

        let matching: Vec<File> = match request.query.strip_suffix("' in parents") {
            Some(rest) => self.children(rest.trim_start_matches('\'')),
            None => self
                .state
                .borrow()
                .files
                .iter()
                .filter(|f| f.is_folder())
                .cloned()
                .collect(),
        };

        let start = request
            .page_token
            .as_ref()
            .and_then(|t| t.parse::<usize>().ok())
            .unwrap_or(0);
        let end = (start + self.page_size).min(matching.len());
        let next_page_token = if end < matching.len() {
            Some(end.to_string())
        } else {
            None
        };

        Ok(FileList {
            files: matching[start..end].to_vec(),
            next_page_token,
        })
    }

    fn get_drive(&self, drive_id: &str) -> Result<Drive> {
        self.record(format!("get_drive {}", drive_id));

        match self.drives.get(drive_id) {
            Some(name) => Ok(Drive {
                id: drive_id.to_string(),
                name: name.clone(),
            }),
            None => Err(not_found(drive_id)),
        }
    }

    fn get_file(&self, file_id: &str) -> Result<File> {
        self.record(format!("get_file {}", file_id));
        self.file(file_id).ok_or_else(|| not_found(file_id))
    }

    fn create_folder(&self, name: &str, parent_id: &str) -> Result<File> {
        self.record(format!("create_folder {} {}", name, parent_id));

        let folder = File {
            id: self.next_id("folder"),
            name: name.to_string(),
            mime_type: Some(FOLDER_MIME_TYPE.to_string()),
            size: None,
            parents: vec![parent_id.to_string()],
            drive_id: None,
        };
        self.insert(folder.clone());

        Ok(folder)
    }

    fn copy_file(&self, file_id: &str, name: &str, parent_id: &str) -> Result<File> {
        self.record(format!("copy_file {} {} {}", file_id, name, parent_id));

        let source = self.file(file_id).ok_or_else(|| not_found(file_id))?;
        if self.failing_copies.contains(&source.name) {
            return Err(DriveError::Api {
                status: 403,
                message: "The user does not have sufficient permissions for this file.".to_string(),
            }
            .into());
        }

        let copy = File {
            id: self.next_id("copy"),
            name: name.to_string(),
            parents: vec![parent_id.to_string()],
            ..source
        };
        self.insert(copy.clone());

        Ok(copy)
    }

    fn update_parents(&self, file_id: &str, add_parent: &str, remove_parent: &str) -> Result<File> {
        self.record(format!("update_parents {} +{} -{}", file_id, add_parent, remove_parent));

        let copy = self.file(file_id).ok_or_else(|| not_found(file_id))?;
        if self.failing_reparents.contains(&copy.name) {
            return Err(DriveError::Api {
                status: 500,
                message: "Backend Error".to_string(),
            }
            .into());
        }

        let mut state = self.state.borrow_mut();
        let file = match state.files.iter_mut().find(|f| f.id == file_id) {
            Some(f) => f,
            None => return Err(not_found(file_id)),
        };
        if !file.parents.iter().any(|p| p == add_parent) {
            file.parents.push(add_parent.to_string());
        }
        file.parents.retain(|p| p != remove_parent);

        Ok(file.clone())
    }
}
