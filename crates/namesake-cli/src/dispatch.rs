use namesake_client::commands;
use namesake_client::setup::SetupOptions;
use namesake_client::{ClientResult, SuccessEnvelope, TransactionNames};

use crate::cli::{Cli, Commands, NicknamesCommand};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    let setup = SetupOptions {
        nicknames_override: cli.nicknames.as_deref(),
        duplicate_policy: cli.on_duplicate.map(Into::into),
    };

    match &cli.command {
        Commands::Classify {
            bill_first_name,
            bill_last_name,
            ship_first_name,
            ship_last_name,
            name_on_card,
            ..
        } => commands::classify::run(
            TransactionNames::new(
                bill_first_name,
                bill_last_name,
                ship_first_name,
                ship_last_name,
                name_on_card,
            ),
            setup,
        ),
        Commands::Batch { path, .. } => commands::batch::run(path.clone(), setup),
        Commands::Nicknames { command } => match command {
            NicknamesCommand::Check { left, right, .. } => {
                commands::nicknames::check(left, right, setup)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use crate::cli::parse_from;

    use super::dispatch;

    #[test]
    fn dispatches_to_expected_command_names() {
        let temp = tempdir();
        assert!(temp.is_ok());
        if let Ok(temp_dir) = temp {
            let table = temp_dir.path().join("nicknames.csv");
            assert!(fs::write(&table, "alanson,al\n").is_ok());
            let table_arg = table.display().to_string();
            let pinned = ["--nicknames", table_arg.as_str(), "--on-duplicate", "merge"];

            let cases: [(Vec<&str>, &str); 2] = [
                (
                    vec![
                        "namesake",
                        "classify",
                        "Al",
                        "Smith",
                        "Alanson",
                        "Smith",
                        "Alanson Smith",
                    ],
                    "classify",
                ),
                (vec!["namesake", "nicknames", "check", "al", "alanson"], "nicknames check"),
            ];

            for (mut args, expected_command) in cases {
                args.extend(pinned);
                let parsed = parse_from(args);
                assert!(parsed.is_ok());
                if let Ok(cli) = parsed {
                    let response = dispatch(&cli);
                    assert!(response.is_ok());
                    if let Ok(success) = response {
                        assert_eq!(success.command, expected_command);
                        assert_eq!(success.data["nickname_source"]["canonical_names"], 1);
                    }
                }
            }
        }
    }

    #[test]
    fn classification_errors_surface_from_dispatch() {
        let temp = tempdir();
        assert!(temp.is_ok());
        if let Ok(temp_dir) = temp {
            let table = temp_dir.path().join("nicknames.csv");
            assert!(fs::write(&table, "alanson,al\n").is_ok());
            let table_arg = table.display().to_string();

            let parsed = parse_from([
                "namesake",
                "--nicknames",
                table_arg.as_str(),
                "--on-duplicate",
                "merge",
                "classify",
                "a",
                "b",
                "c",
                "d",
                "oneword",
            ]);
            assert!(parsed.is_ok());
            if let Ok(cli) = parsed {
                let response = dispatch(&cli);
                assert!(response.is_err());
                if let Err(error) = response {
                    assert_eq!(error.code, "invalid_input");
                }
            }
        }
    }
}
