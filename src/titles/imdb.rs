use super::{TitleMatch, TitleSearch};
use anyhow::{bail, Result};
use serde::Deserialize;

const SUGGESTION_API: &str = "https://v3.sg.media-imdb.com/suggestion";

#[derive(Deserialize, Debug)]
struct Suggestions {
    #[serde(default, rename = "d")]
    items: Vec<Suggestion>,
}

#[derive(Deserialize, Debug)]
struct Suggestion {
    id: String,
    #[serde(rename = "l")]
    label: Option<String>,
}

/* Title lookups through the suggestion endpoint that backs IMDb's search box */
pub struct Imdb {
    http: reqwest::blocking::Client,
}

impl Imdb {
    pub fn new() -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
        }
    }

    pub fn suggestion_url(title: &str) -> String {
        let query = title.trim().to_lowercase();
        let bucket = match query.chars().next() {
            Some(c) if c.is_ascii_alphanumeric() => c,
            _ => 'x',
        };

        format!("{}/{}/{}.json", SUGGESTION_API, bucket, urlencoding::encode(&query))
    }

    /* Keeps titles (`tt` ids) in response order, people and companies are dropped */
    fn titles(body: Suggestions) -> Vec<TitleMatch> {
        body.items
            .into_iter()
            .filter(|s| s.id.starts_with("tt"))
            .filter_map(|s| s.label)
            .map(|title| TitleMatch { title })
            .collect()
    }
}

impl TitleSearch for Imdb {
    fn search(&self, title: &str) -> Result<Vec<TitleMatch>> {
        let uri = Imdb::suggestion_url(title);

        let resp = match self.http.get(&uri).send() {
            Ok(resp) => resp,
            Err(e) => bail!("Failed to GET '{}'.\n{}", uri, e),
        };

        if !resp.status().is_success() {
            bail!("Failed to GET '{}'. Status: {}", uri, resp.status());
        }

        match resp.json::<Suggestions>() {
            Ok(body) => Ok(Imdb::titles(body)),
            Err(e) => bail!("Unable to deserialize HTTP response.\n{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_bucketed_by_first_letter() {
        assert_eq!(
            Imdb::suggestion_url("The Thing"),
            "https://v3.sg.media-imdb.com/suggestion/t/the%20thing.json"
        );
        assert_eq!(
            Imdb::suggestion_url("  2001 "),
            "https://v3.sg.media-imdb.com/suggestion/2/2001.json"
        );
        assert_eq!(
            Imdb::suggestion_url("Élite"),
            "https://v3.sg.media-imdb.com/suggestion/x/%C3%A9lite.json"
        );
    }

    #[test]
    fn only_titles_are_kept() {
        let body = r#"{
            "d": [
                {"i": {"height": 1, "imageUrl": "", "width": 1}, "id": "tt0084787", "l": "The Thing", "q": "feature", "y": 1982},
                {"id": "nm0000110", "l": "John Carpenter", "s": "Actor"},
                {"id": "tt0905372", "l": "The Thing", "q": "feature", "y": 2011},
                {"id": "tt9999999"}
            ],
            "q": "the%20thing",
            "v": 1
        }"#;

        let titles = Imdb::titles(serde_json::from_str(body).unwrap());

        assert_eq!(
            titles,
            vec![
                TitleMatch { title: "The Thing".to_string() },
                TitleMatch { title: "The Thing".to_string() },
            ]
        );
    }

    #[test]
    fn missing_results_are_empty() {
        let titles = Imdb::titles(serde_json::from_str(r#"{"q": "zzzz", "v": 1}"#).unwrap());
        assert!(titles.is_empty());
    }
}
