mod imdb;

pub use imdb::Imdb;

use crate::log;
use anyhow::Result;
use std::collections::BTreeSet;

pub const DEFAULT_MAX_RESULTS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct TitleMatch {
    pub title: String,
}

/// Free-text title lookup in a movie metadata service.
pub trait TitleSearch {
    fn search(&self, title: &str) -> Result<Vec<TitleMatch>>;
}

/* The ways release folders usually spell a title: dots, underscores or dashes instead of spaces */
pub fn separator_variants(title: &str) -> [String; 3] {
    [
        title.replace(' ', "."),
        title.replace(' ', "_"),
        title.replace(' ', "-"),
    ]
}

/// Returns the title, its separator variants, and the separator variants of
/// the first `max_results` titles `search` finds. A failing search only
/// loses the alternate titles.
pub fn expand(title: &str, search: Option<&dyn TitleSearch>, max_results: usize) -> BTreeSet<String> {
    let mut candidates = BTreeSet::new();
    candidates.insert(title.to_string());
    candidates.extend(separator_variants(title).iter().cloned());

    let search = match search {
        Some(s) => s,
        None => return candidates,
    };

    match search.search(title) {
        Ok(matches) => {
            log::debug(format!("Metadata search found {} titles for {:?}", matches.len(), title));

            for found in matches.iter().take(max_results) {
                candidates.extend(separator_variants(&found.title).iter().cloned());
            }
        }
        Err(e) => log::warn(format!("Unable to look up alternate titles for {:?}: {}", title, e)),
    }

    candidates
}
