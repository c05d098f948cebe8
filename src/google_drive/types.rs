use serde::{Deserialize, Serialize};

pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Fields requested when searching folders across every drive.
pub const SEARCH_FIELDS: &str = "nextPageToken, files(id, name, size, mimeType, parents, driveId)";
/// Fields requested when walking the children of a folder.
pub const CHILDREN_FIELDS: &str = "nextPageToken, files(id, name, mimeType, parents)";
pub const CHILDREN_PAGE_SIZE: u32 = 1000;

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<File>,
    pub next_page_token: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct File {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub mime_type: Option<String>,
    /// Byte count, the API sends int64 values as strings
    pub size: Option<String>,
    #[serde(default)]
    pub parents: Vec<String>,
    pub drive_id: Option<String>,
}

impl File {
    pub fn is_folder(&self) -> bool {
        self.mime_type.as_deref() == Some(FOLDER_MIME_TYPE)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Drive {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct FileUploadBody {
    pub name: String,
    pub parents: Vec<String>,
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/* One `files.list` call. Every request asks for items of shared drives too */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListRequest {
    pub query: String,
    pub fields: String,
    pub page_size: Option<u32>,
    pub page_token: Option<String>,
    /// Search the corpus of every drive the user can reach, not only "My Drive"
    pub all_drives: bool,
}

impl ListRequest {
    pub fn search(query: &str) -> Self {
        Self {
            query: query.to_string(),
            fields: SEARCH_FIELDS.to_string(),
            page_size: None,
            page_token: None,
            all_drives: true,
        }
    }

    pub fn children(folder_id: &str) -> Self {
        Self {
            query: format!("'{}' in parents", folder_id),
            fields: CHILDREN_FIELDS.to_string(),
            page_size: Some(CHILDREN_PAGE_SIZE),
            page_token: None,
            all_drives: false,
        }
    }

    pub fn with_page_token(&self, token: Option<String>) -> Self {
        Self {
            page_token: token,
            ..self.clone()
        }
    }
}
