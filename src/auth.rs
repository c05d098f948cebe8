use crate::{
    config::Loaded,
    files,
    google_drive::{Client, Session, DRIVE_SCOPE},
    log, parse_url, redirect_listener,
};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const REDIRECT_URI: &str = "http://localhost:8080";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Creds {
    pub client_id: String,
    pub client_secret: String,
}

/* Layout of the client secrets file downloaded from Google Cloud Console */
#[derive(Deserialize)]
struct ClientSecrets {
    installed: Option<Creds>,
    web: Option<Creds>,
}

pub fn read_creds(path: &Path) -> Result<Creds> {
    let secrets = files::read_json::<ClientSecrets>(path)?;

    match secrets.installed.or(secrets.web) {
        Some(creds) => Ok(creds),
        None => bail!(
            "No `installed` or `web` client in '{}'. Download the OAuth client secrets of a desktop app.",
            path.display()
        ),
    }
}

/* What to do with the cached session at startup */
#[derive(Debug, PartialEq)]
pub enum Startup {
    UseCached(Session),
    Refresh(Session),
    Authorize,
}

pub fn plan(cached: Option<Session>, now: i64) -> Startup {
    match cached {
        Some(s) if s.is_valid_at(now) => Startup::UseCached(s),
        Some(s) if s.refresh_token.is_some() => Startup::Refresh(s),
        _ => Startup::Authorize,
    }
}

/// Builds an authorized client, refreshing or re-running the consent flow as
/// needed. The session ends up in the token cache either way.
pub fn connect(loaded: &Loaded) -> Result<Client> {
    let creds = read_creds(&loaded.client_secrets_path())?;
    let session_file = loaded.token_cache_path();

    let mut client = Client::new(creds.client_id, creds.client_secret, REDIRECT_URI.to_string());
    client.persist_sessions_to(session_file.clone());

    let cached = if session_file.exists() {
        match files::read_toml::<Session>(&session_file) {
            Ok(s) => Some(s),
            Err(e) => {
                log::warn(format!("Ignoring unreadable session cache.\nDetails: {}", e));
                None
            }
        }
    } else {
        None
    };

    match plan(cached, chrono::Utc::now().timestamp()) {
        Startup::UseCached(s) => {
            client.set_session(s);
        }
        Startup::Refresh(s) => {
            client.set_session(s);
            match client.refresh_token() {
                Ok(_) => log::info("Authorization for client is updated.".to_string()),
                Err(e) => {
                    log::warn(format!("App was unable to update Google API Access Token.\nDetails: {}", e));
                    authorize(&client, &session_file)?;
                }
            }
        }
        Startup::Authorize => {
            authorize(&client, &session_file)?;
        }
    }

    log::info("Service created".to_string());
    Ok(client)
}

/* Runs the consent flow unconditionally and overwrites the token cache */
pub fn reauthorize(loaded: &Loaded) -> Result<()> {
    let creds = read_creds(&loaded.client_secrets_path())?;
    let client = Client::new(creds.client_id, creds.client_secret, REDIRECT_URI.to_string());

    authorize(&client, &loaded.token_cache_path())?;
    Ok(())
}

fn authorize(client: &Client, session_file: &Path) -> Result<Session> {
    let user_consent_url = client.get_user_authorization_url(DRIVE_SCOPE);

    let code = get_auth_code(&user_consent_url)?;
    let session = client.authorize_with_code(&code)?;

    println!("App is authorized. Saving session to '{}'.", session_file.display());
    files::write_toml(&session, session_file)?;

    Ok(session)
}

fn get_auth_code(user_consent_url: &str) -> Result<String> {
    println!(
        "\nPlease, authorize application via this link:\n  {}\n",
        user_consent_url
    );
    if let Err(e) = webbrowser::open(user_consent_url) {
        log::debug(format!("Unable to open the browser: {}", e));
    }

    let url = redirect_listener::get_callback()?;
    code_from_callback(&url)
}

pub fn code_from_callback(url: &str) -> Result<String> {
    let query = parse_url::get_query(url)?;

    if let Some(code) = query.get("code") {
        return Ok(code.to_string());
    }

    if let Some(err) = query.get("error") {
        bail!("Google API refused the authorization: {}", err);
    }

    bail!("There was no authorization code in Google API Callback");
}
