use std::path::{Path, PathBuf};

use crate::nicknames::DuplicatePolicy;
use crate::{ClientError, ClientResult};

pub const NICKNAMES_ENV: &str = "NAMESAKE_NICKNAMES";
pub const DUPLICATE_POLICY_ENV: &str = "NAMESAKE_DUPLICATE_POLICY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NicknameSource {
    Bundled,
    File(PathBuf),
}

impl NicknameSource {
    pub fn describe(&self) -> String {
        match self {
            Self::Bundled => crate::nicknames::BUNDLED_SOURCE_LABEL.to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Explicit path first, then `NAMESAKE_NICKNAMES`, then the bundled table.
pub fn resolve_nickname_source(path_override: Option<&Path>) -> ClientResult<NicknameSource> {
    let candidate = match path_override {
        Some(path) => path.to_path_buf(),
        None => match std::env::var_os(NICKNAMES_ENV) {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => return Ok(NicknameSource::Bundled),
        },
    };

    absolutize(&candidate).map(NicknameSource::File)
}

pub fn resolve_duplicate_policy(
    policy_override: Option<DuplicatePolicy>,
) -> ClientResult<DuplicatePolicy> {
    if let Some(policy) = policy_override {
        return Ok(policy);
    }

    let Some(raw) = std::env::var_os(DUPLICATE_POLICY_ENV) else {
        return Ok(DuplicatePolicy::default());
    };
    let value = raw.to_string_lossy();
    DuplicatePolicy::parse(&value).ok_or_else(|| {
        ClientError::invalid_argument_with_recovery(
            &format!("`{DUPLICATE_POLICY_ENV}` must be `merge` or `overwrite`, got `{value}`."),
            vec![format!("Unset `{DUPLICATE_POLICY_ENV}` or set it to `merge`.")],
        )
    })
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::registry_unreadable(path, &error.to_string()))
}
