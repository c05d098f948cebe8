use crate::google_drive::errors::DriveError;
use anyhow::{bail, Result};
use reqwest::{
    blocking::{Client, RequestBuilder},
    header::CONTENT_TYPE,
    StatusCode,
};
use serde_json::Value;

pub fn send<T>(request: RequestBuilder) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let resp = match request.send() {
        Ok(resp) => resp,
        Err(e) => bail!("Failed to send request to '{}'.\n{}", e.url().map(|u| u.as_str()).unwrap_or("?"), e),
    };

    let status = resp.status();
    let body = resp.text()?;

    parse_body(status, &body)
}

pub fn parse_body<T>(status: StatusCode, body: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    if status == StatusCode::UNAUTHORIZED {
        return Err(DriveError::Unauthorized.into());
    }

    if !status.is_success() {
        return Err(DriveError::Api {
            status: status.as_u16(),
            message: error_message(body),
        }
        .into());
    }

    match serde_json::from_str::<T>(body) {
        Ok(r) => Ok(r),
        Err(e) => Err(DriveError::Decode(e.to_string()).into()),
    }
}

/* POSTs an url-encoded form, as the OAuth token endpoint wants it */
pub fn post_form<T>(client: &Client, uri: &str, params: &[(&str, &str)]) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let body = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<String>>()
        .join("&");

    send(
        client
            .post(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body),
    )
}

/*
    Google answers with `{"error": {"message": ...}}` on Drive endpoints and with
    `{"error": "...", "error_description": "..."}` on OAuth ones
*/
pub fn error_message(body: &str) -> String {
    let json = match serde_json::from_str::<Value>(body) {
        Ok(json) => json,
        Err(_) => return body.trim().to_string(),
    };

    if let Some(message) = json["error"]["message"].as_str() {
        return message.to_string();
    }

    match (json["error"].as_str(), json["error_description"].as_str()) {
        (Some(err), Some(description)) => format!("{}: {}", err, description),
        (Some(err), None) => err.to_string(),
        _ => body.trim().to_string(),
    }
}
