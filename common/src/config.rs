//! Configuration management via environment variables
//!
//! Helpers for reading `CPF_*` overrides. An empty variable is treated as
//! unset; a variable that is set but unparseable is a configuration error
//! rather than being silently ignored.

use std::str::FromStr;

use crate::error::{CommonError, CommonResult};

/// Get an environment variable, treating empty values as unset.
///
/// # Example
/// ```
/// use cpf_common::config::get_env;
///
/// let title = get_env("CPF_TITLE").unwrap_or_else(|| "cpf".to_string());
/// ```
pub fn get_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Get an environment variable and parse it.
///
/// Returns `Ok(None)` when the variable is unset, and a
/// [`CommonError::Config`] naming the variable when it cannot be parsed.
pub fn get_env_parse<T>(name: &str) -> CommonResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_env(name) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|err| {
            CommonError::Config(format!("environment variable {name}='{raw}': {err}"))
        }),
    }
}

/// Parse a boolean flag the way shells usually spell them.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Get a boolean environment variable (see [`parse_flag`]).
pub fn get_env_flag(name: &str) -> CommonResult<Option<bool>> {
    match get_env(name) {
        None => Ok(None),
        Some(raw) => parse_flag(&raw).map(Some).ok_or_else(|| {
            CommonError::Config(format!(
                "environment variable {name}='{raw}' is not a boolean"
            ))
        }),
    }
}
