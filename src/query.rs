use crate::google_drive::types::FOLDER_MIME_TYPE;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum QueryError {
    #[error("At least one title is needed to build a search query")]
    NoCandidates,
    #[error("Title {0:?} contains a quote or backslash and would break the search query")]
    UnsafeCandidate(String),
}

/* Candidates are embedded as they are, nothing is escaped */
pub fn is_safe_candidate(candidate: &str) -> bool {
    !candidate.contains('\'') && !candidate.contains('\\')
}

/// Builds a `files.list` filter matching non-trashed folders whose name
/// contains any of `candidates`.
pub fn build_folder_query<S: AsRef<str>>(candidates: &[S]) -> Result<String, QueryError> {
    let candidates: Vec<&str> = candidates.iter().map(|c| c.as_ref()).collect();

    if candidates.is_empty() {
        return Err(QueryError::NoCandidates);
    }

    if let Some(unsafe_candidate) = candidates.iter().find(|c| !is_safe_candidate(c)) {
        return Err(QueryError::UnsafeCandidate(unsafe_candidate.to_string()));
    }

    let names = candidates
        .iter()
        .map(|c| format!("name contains '{}'", c))
        .collect::<Vec<String>>()
        .join(" or ");

    Ok(format!(
        "mimeType = '{}' and ({}) and trashed = false",
        FOLDER_MIME_TYPE, names
    ))
}
