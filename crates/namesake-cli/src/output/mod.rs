mod error_text;
mod json;
mod mode;
mod text;

use std::io;

use namesake_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::{write_stderr_text, write_stdout_text};

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_text(&body)
}

/// JSON failures stay on stdout so callers parse one stream; text failures
/// go to stderr.
pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => write_stdout_text(&json::render_error_json(error)?),
        OutputMode::Text => write_stderr_text(&error_text::render_error(error)),
    }
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "classify" => text::render_classify(&success.data),
        "batch" => text::render_batch(&success.data),
        "nicknames check" => text::render_nickname_check(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
