use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const NICKNAMES_HELP_COMMAND: &str = "namesake nicknames check --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is_invalid_input(&self) -> bool {
        self.code == "invalid_input"
    }

    pub fn is_registry_load_failure(&self) -> bool {
        self.code == "registry_load_failed"
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `namesake {cmd} --help` for usage."),
            None => "Run `namesake --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn missing_field(field: &str) -> Self {
        Self::new(
            "invalid_input",
            &format!("Field `{field}` is missing; all five name fields are required."),
            vec![
                "Provide bill first/last name, ship first/last name, and name on card.".to_string(),
            ],
        )
        .with_data(json!({
            "field": field,
        }))
    }

    pub fn card_token_count(token_count: usize) -> Self {
        Self::new(
            "invalid_input",
            "Name on card must contain 2 to 3 words.",
            vec!["Pass the name printed on the card, e.g. `Deborah Egli`.".to_string()],
        )
        .with_data(json!({
            "field": "name_on_card",
            "token_count": token_count,
        }))
    }

    pub fn registry_empty_canonical(source: &str, row: usize) -> Self {
        Self::new(
            "registry_load_failed",
            &format!("Nickname table `{source}` row {row} has an empty canonical name."),
            vec![
                "Start every row with the canonical name, followed by its nicknames.".to_string(),
                format!("Run `{NICKNAMES_HELP_COMMAND}` for the table format."),
            ],
        )
        .with_data(json!({
            "source": source,
            "row": row,
        }))
    }

    pub fn registry_malformed(source: &str, detail: &str) -> Self {
        Self::new(
            "registry_load_failed",
            &format!("Nickname table `{source}` could not be parsed: {detail}"),
            vec!["Check that the table is comma-separated UTF-8 text.".to_string()],
        )
        .with_data(json!({
            "source": source,
        }))
    }

    pub fn registry_unreadable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "registry_load_failed",
            &format!("Cannot read nickname table at `{location}`: {detail}"),
            vec![format!(
                "Verify `{location}` exists, or unset `NAMESAKE_NICKNAMES` to use the bundled table."
            )],
        )
        .with_data(json!({
            "source": location,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::ClientError;

    #[test]
    fn card_token_count_error_carries_count() {
        let error = ClientError::card_token_count(1);
        assert!(error.is_invalid_input());
        assert_eq!(error.to_string(), "Name on card must contain 2 to 3 words.");
        let count = error
            .data
            .as_ref()
            .and_then(|data| data.get("token_count"))
            .and_then(serde_json::Value::as_u64);
        assert_eq!(count, Some(1));
    }

    #[test]
    fn command_hint_is_attached_when_known() {
        let error = ClientError::invalid_argument_for_command("bad", Some("classify"));
        assert_eq!(error.code, "invalid_argument");
        assert_eq!(
            error.recovery_steps,
            vec!["Run `namesake classify --help` for usage.".to_string()]
        );
        assert!(error.data.is_some());
    }
}
