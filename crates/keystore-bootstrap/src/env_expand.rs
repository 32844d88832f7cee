//! Environment variable expansion for configuration values
//!
//! Keystore passwords (and sometimes locations) are injected through the
//! environment rather than written into the config file. Supported forms:
//! - `${VAR}` - Required variable, error if missing or empty
//! - `${VAR:-default}` - Use default if VAR is unset or empty
//! - `$$` - Literal `$` character

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Errors that can occur during environment variable expansion
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvExpandError {
    /// A required environment variable is not set
    #[error("environment variable '{name}' is not set")]
    MissingVariable { name: String },

    /// A required environment variable is set but empty
    #[error("environment variable '{name}' is empty")]
    EmptyVariable { name: String },
}

/// Regex for matching ${VAR} or ${VAR:-default} patterns
static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("invalid env var pattern")
});

/// Expand `${VAR}` and `${VAR:-default}` references in `input`.
///
/// # Errors
///
/// - `EnvExpandError::MissingVariable` - A required variable is not set
/// - `EnvExpandError::EmptyVariable` - A required variable is set but empty
pub fn expand_env_vars(input: &str) -> Result<String, EnvExpandError> {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;

    for caps in VAR_PATTERN.captures_iter(input) {
        let matched = caps.get(0).expect("group 0 always present");
        let name = &caps[1];
        let fallback = caps.get(2).map(|d| d.as_str());

        out.push_str(&input[last..matched.start()]);
        last = matched.end();

        match std::env::var(name) {
            Ok(value) if !value.is_empty() => out.push_str(&value),
            Ok(_) => match fallback {
                Some(default) => out.push_str(default),
                None => {
                    return Err(EnvExpandError::EmptyVariable {
                        name: name.to_string(),
                    })
                }
            },
            Err(_) => match fallback {
                Some(default) => out.push_str(default),
                None => {
                    return Err(EnvExpandError::MissingVariable {
                        name: name.to_string(),
                    })
                }
            },
        }
    }

    out.push_str(&input[last..]);

    // Unescape $$ after expansion so defaults containing $$ behave the same
    // as literal input.
    Ok(out.replace("$$", "$"))
}
