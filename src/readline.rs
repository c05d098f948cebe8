/* Some functions to get user input conveniently */

use anyhow::{bail, Result};
use std::io;
use std::io::prelude::*;

pub fn prompt(prompt: &str) -> Result<Option<String>> {
    print!("{}: ", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let ans = line.trim().to_string();
    if ans.is_empty() {
        return Ok(None);
    }

    Ok(Some(ans))
}

pub fn prompt_default(prompt_text: &str, default: &str) -> Result<String> {
    if let Some(ans) = prompt(&format!("{} (Default: {:?})", prompt_text, default))? {
        return Ok(ans);
    }

    Ok(default.to_string())
}

pub fn prompt_required(prompt_text: &str) -> Result<String> {
    match prompt(prompt_text)? {
        Some(ans) => Ok(ans),
        None => bail!("No answer given for '{}'", prompt_text),
    }
}

/* Only an explicit "y" counts as yes */
pub fn prompt_yes(prompt_text: &str) -> Result<bool> {
    Ok(is_yes(prompt(&format!("{} (y/n)", prompt_text))?.as_deref()))
}

/* Anything but an explicit "n" counts as yes */
pub fn prompt_unless_no(prompt_text: &str) -> Result<bool> {
    Ok(!is_no(prompt(&format!("{} (y/n)", prompt_text))?.as_deref()))
}

/* Asks for a 1-based position in a list of `len` items and returns it 0-based */
pub fn prompt_index(prompt_text: &str, len: usize) -> Result<usize> {
    let ans = prompt(prompt_text)?.unwrap_or_default();
    parse_index(&ans, len)
}

pub fn is_yes(ans: Option<&str>) -> bool {
    matches!(ans, Some(a) if a.trim().eq_ignore_ascii_case("y"))
}

pub fn is_no(ans: Option<&str>) -> bool {
    matches!(ans, Some(a) if a.trim().eq_ignore_ascii_case("n"))
}

pub fn parse_index(ans: &str, len: usize) -> Result<usize> {
    let number = match ans.trim().parse::<usize>() {
        Ok(n) => n,
        Err(e) => bail!("'{}' is not a number.\nDetails: {}", ans.trim(), e),
    };

    if number == 0 || number > len {
        bail!("Selection {} is out of range (1-{})", number, len);
    }

    Ok(number - 1)
}
