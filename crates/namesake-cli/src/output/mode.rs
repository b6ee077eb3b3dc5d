use crate::cli::{Commands, NicknamesCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Classify { json, .. } | Commands::Batch { json, .. } => *json,
        Commands::Nicknames {
            command: NicknamesCommand::Check { json, .. },
        } => *json,
    };

    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}
