use std::collections::HashMap;
use regex::Regex;
use anyhow::{Result, bail};

/* Extracts query variables from a request target like `/?code=abc&scope=...` */
pub fn get_query(url: &str) -> Result<HashMap<String, String>> {
    let url_re = Regex::new(r"^[^?]*\?")?;
    let mut vars: HashMap<String, String> = HashMap::new();

    if !url_re.is_match(url) {
        return Ok(vars);
    }

    let query = url_re.replace(url, "");

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let var = pair.split('=').collect::<Vec<&str>>();
        if var.len() == 2 {
            let raw = var[1].replace('+', " ");
            let value = urlencoding::decode(&raw)?;
            vars.insert(var[0].to_string(), value.to_string());
            continue;
        }
        bail!("Unable to process URL Query: malformed URL");
    }

    Ok(vars)
}
