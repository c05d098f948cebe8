use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriveError {
    #[error("Request to the API failed with status 401")]
    Unauthorized,
    #[error("Request to the API failed with status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Unable to deserialize HTTP response.\n{0}")]
    Decode(String),
}

impl DriveError {
    pub fn is_unauthorized(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<DriveError>(), Some(DriveError::Unauthorized))
    }
}
