pub mod errors;
pub mod types;
#[cfg(test)]
pub mod fake;

use crate::{files, log, requests};
use anyhow::{bail, Result};
use errors::DriveError;
use reqwest::blocking::RequestBuilder;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::PathBuf;
use types::{Drive, File, FileList, FileUploadBody, ListRequest, FOLDER_MIME_TYPE};

const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
const AUTH_URI: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";
/// Seconds before the real expiry at which a token is already treated as expired
const EXPIRY_MARGIN: i64 = 60;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds)
    pub expires_at: Option<i64>,
}

impl Session {
    pub fn is_valid_at(&self, now: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at - EXPIRY_MARGIN > now,
            None => false,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
}

impl TokenResponse {
    /* Google omits the refresh token on refreshes, keep the one we already had */
    pub fn into_session(self, now: i64, previous_refresh_token: Option<String>) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh_token),
            expires_at: self.expires_in.map(|secs| now + secs),
        }
    }
}

/// The operations of Drive API v3 the tool relies on.
pub trait DriveApi {
    fn list_files(&self, request: &ListRequest) -> Result<FileList>;
    fn get_drive(&self, drive_id: &str) -> Result<Drive>;
    fn get_file(&self, file_id: &str) -> Result<File>;
    fn create_folder(&self, name: &str, parent_id: &str) -> Result<File>;
    fn copy_file(&self, file_id: &str, name: &str, parent_id: &str) -> Result<File>;
    fn update_parents(&self, file_id: &str, add_parent: &str, remove_parent: &str) -> Result<File>;
}

pub struct Client {
    http: reqwest::blocking::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth: RefCell<Option<Session>>,
    session_file: Option<PathBuf>,
}

impl Client {
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            client_id,
            client_secret,
            redirect_uri,
            auth: RefCell::new(None),
            session_file: None,
        }
    }

    /* Sessions refreshed while running are written back to this file */
    pub fn persist_sessions_to(&mut self, path: PathBuf) {
        self.session_file = Some(path);
    }

    pub fn get_user_authorization_url(&self, scope: &str) -> String {
        format!(
            "{}?client_id={}&response_type=code&redirect_uri={}&scope={}&access_type=offline&prompt=consent",
            AUTH_URI,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(scope)
        )
    }

    pub fn authorize_with_code(&self, code: &str) -> Result<Session> {
        let response: TokenResponse = requests::post_form(
            &self.http,
            TOKEN_URI,
            &[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ],
        )?;

        let session = response.into_session(chrono::Utc::now().timestamp(), None);
        self.set_session(session.clone());

        Ok(session)
    }

    pub fn set_session(&self, s: Session) {
        *self.auth.borrow_mut() = Some(s);
    }

    pub fn session(&self) -> Option<Session> {
        self.auth.borrow().clone()
    }

    pub fn refresh_token(&self) -> Result<Session> {
        let refresh_token = match self.session().and_then(|s| s.refresh_token) {
            Some(t) => t,
            None => bail!("No refresh token for client is provided"),
        };

        let response: TokenResponse = requests::post_form(
            &self.http,
            TOKEN_URI,
            &[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
            ],
        )?;

        let session = response.into_session(chrono::Utc::now().timestamp(), Some(refresh_token));
        self.set_session(session.clone());

        if let Some(path) = &self.session_file {
            files::write_toml(&session, path)?;
        }

        Ok(session)
    }

    fn access_token(&self) -> Result<String> {
        match self.session() {
            Some(s) => Ok(s.access_token),
            None => bail!("Client is not authorized.\nTip: try to run `drive-copy auth`."),
        }
    }

    /* Sends an authorized request, refreshing the session once when the API answers 401 */
    fn authorized<T, F>(&self, build: F) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        F: Fn(&reqwest::blocking::Client) -> RequestBuilder,
    {
        let token = self.access_token()?;

        match requests::send(build(&self.http).bearer_auth(&token)) {
            Err(e) if DriveError::is_unauthorized(&e) => {
                log::info("Access token was rejected, refreshing it".to_string());
                let session = self.refresh_token()?;
                requests::send(build(&self.http).bearer_auth(&session.access_token))
            }
            other => other,
        }
    }
}

impl DriveApi for Client {
    fn list_files(&self, request: &ListRequest) -> Result<FileList> {
        let mut query: Vec<(&str, String)> = vec![
            ("q", request.query.clone()),
            ("fields", request.fields.clone()),
            ("supportsAllDrives", "true".to_string()),
            ("includeItemsFromAllDrives", "true".to_string()),
        ];
        if request.all_drives {
            query.push(("corpora", "allDrives".to_string()));
        }
        if let Some(size) = request.page_size {
            query.push(("pageSize", size.to_string()));
        }
        if let Some(token) = &request.page_token {
            query.push(("pageToken", token.clone()));
        }

        self.authorized(|http| http.get(format!("{}/files", DRIVE_API_BASE)).query(&query))
    }

    fn get_drive(&self, drive_id: &str) -> Result<Drive> {
        self.authorized(|http| {
            http.get(format!("{}/drives/{}", DRIVE_API_BASE, drive_id))
                .query(&[("fields", "id, name")])
        })
    }

    fn get_file(&self, file_id: &str) -> Result<File> {
        self.authorized(|http| {
            http.get(format!("{}/files/{}", DRIVE_API_BASE, file_id))
                .query(&[("supportsAllDrives", "true"), ("fields", "id, name")])
        })
    }

    fn create_folder(&self, name: &str, parent_id: &str) -> Result<File> {
        let body = FileUploadBody {
            name: name.to_string(),
            parents: vec![parent_id.to_string()],
            mime_type: Some(FOLDER_MIME_TYPE.to_string()),
        };

        self.authorized(|http| {
            http.post(format!("{}/files", DRIVE_API_BASE))
                .query(&[("supportsAllDrives", "true"), ("fields", "id, name, mimeType, parents")])
                .json(&body)
        })
    }

    fn copy_file(&self, file_id: &str, name: &str, parent_id: &str) -> Result<File> {
        let body = FileUploadBody {
            name: name.to_string(),
            parents: vec![parent_id.to_string()],
            mime_type: None,
        };

        self.authorized(|http| {
            http.post(format!("{}/files/{}/copy", DRIVE_API_BASE, file_id))
                .query(&[("supportsAllDrives", "true"), ("fields", "id, name, mimeType, parents")])
                .json(&body)
        })
    }

    fn update_parents(&self, file_id: &str, add_parent: &str, remove_parent: &str) -> Result<File> {
        self.authorized(|http| {
            http.patch(format!("{}/files/{}", DRIVE_API_BASE, file_id))
                .query(&[
                    ("addParents", add_parent),
                    ("removeParents", remove_parent),
                    ("fields", "id, parents"),
                    ("supportsAllDrives", "true"),
                ])
                .json(&serde_json::json!({}))
        })
    }
}
