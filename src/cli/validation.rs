//! CLI argument validation functions
//!
//! Custom value parsers for arguments clap cannot check on its own.

use std::fs;
use std::path::PathBuf;

use reqwest::Url;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

/// Task ids are positive integers
pub fn validate_task_id(id_str: &str) -> Result<i32, String> {
    let id: i32 = id_str
        .trim()
        .parse()
        .map_err(|_| format!("Task id must be a positive number, got: '{}'", id_str))?;

    if id <= 0 {
        return Err(format!("Task id must be greater than 0, got: {}", id));
    }

    Ok(id)
}

/// Page size accepted by the backend (1-1000)
pub fn validate_limit(limit_str: &str) -> Result<u32, String> {
    let limit: u32 = limit_str
        .parse()
        .map_err(|_| format!("Limit must be a number between 1 and 1000, got: '{}'", limit_str))?;

    if !(1..=1000).contains(&limit) {
        return Err(format!("Limit must be between 1 and 1000, got: {}", limit));
    }

    Ok(limit)
}

/// Title must contain something other than whitespace and fit in 255 characters
pub fn validate_title(title: &str) -> Result<String, String> {
    let trimmed = title.trim();

    if trimmed.is_empty() {
        return Err("Title cannot be empty".to_string());
    }

    if trimmed.chars().count() > 255 {
        return Err("Title cannot be longer than 255 characters".to_string());
    }

    Ok(trimmed.to_string())
}

/// Absolute http(s) URL usable as a base for request paths
pub fn validate_base_url(url_str: &str) -> Result<String, String> {
    let url = Url::parse(url_str).map_err(|e| format!("Invalid URL '{}': {}", url_str, e))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!(
            "Base URL must use http or https, got scheme '{}'",
            url.scheme()
        ));
    }

    if url.cannot_be_a_base() {
        return Err(format!("'{}' cannot be used as a base URL", url_str));
    }

    Ok(url_str.to_string())
}
