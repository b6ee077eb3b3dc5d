mod cli;
mod dispatch;
mod logging;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use namesake_client::ClientError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "namesake - billing, shipping and card name agreement

Usage:
  namesake <command>

Start here:
  namesake classify <bill_first> <bill_last> <ship_first> <ship_last> <name_on_card>
  namesake batch <path>
  namesake nicknames check <name> <name>
  namesake --help
";

fn main() -> ExitCode {
    logging::init();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                if write_stdout_text(&err.to_string()).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }
            let command_hint = command_path_from_args(&raw_args);
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                ClientError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = error.code.as_str(), "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

/// Strips clap's trailing boilerplate (Usage line, "For more information" hint)
/// so our "What to do next" section is the single source of guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let non_flags: Vec<&str> = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect();

    let hint = match non_flags.as_slice() {
        ["classify", ..] => Some("classify"),
        ["batch", ..] => Some("batch"),
        ["nicknames", "check", ..] => Some("nicknames check"),
        ["nicknames", ..] => Some("nicknames"),
        _ => None,
    };
    hint.map(std::string::ToString::to_string)
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.code.starts_with("internal_") {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}
