//! `rescache normalize` – print a normalized base URL.

use anyhow::Result;
use rescache_core::url_model;

pub fn normalize_output(base: &str, json: bool) -> Result<String> {
    let url = url_model::normalize(base)?;
    if json {
        let value = serde_json::json!({ "input": base, "base": url });
        Ok(serde_json::to_string_pretty(&value)? + "\n")
    } else {
        Ok(format!("{url}\n"))
    }
}

pub fn run_normalize(base: &str, json: bool) -> Result<()> {
    print!("{}", normalize_output(base, json)?);
    Ok(())
}
