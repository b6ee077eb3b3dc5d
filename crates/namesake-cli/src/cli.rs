use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use namesake_client::DuplicatePolicy;

pub fn parse_name_field(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err("name fields must not be empty".to_string());
    }
    Ok(value.to_string())
}

/// Extended help shown after `namesake classify --help`.
pub const CLASSIFY_AFTER_HELP: &str = "\
Result codes:
  1  billing, shipping and card name all name the same person
  2  two of the three agree, one diverges
  3  all three are different people

How names are compared:
  Fields are trimmed and lowercased. Two names match when they are
  registered nicknames of each other (e.g. al / alanson) or are at most
  2 single-character edits apart (e.g. egni / egli).

  A first-name field may carry a middle name after the first space
  (\"Anna J\"). Middle names are only compared when both sides have one.
  The name on card must be 2 or 3 words; the billing name also matches a
  card printed \"Last First\".

Example:
  namesake classify Deborah Egli Debbie Egli \"Debbie Egli\"
";

/// Extended help shown after `namesake batch --help`.
pub const BATCH_AFTER_HELP: &str = "\
Input:
  A CSV file with one header row. Required headers, in any order:
    bill_first_name,bill_last_name,ship_first_name,ship_last_name,name_on_card
  Use `-` as the path to read stdin.

  Rows that cannot be classified (missing cells, card name not 2-3 words)
  are reported individually; the rest of the batch still runs.
";

/// Extended help shown after `namesake nicknames check --help`.
pub const NICKNAMES_AFTER_HELP: &str = "\
Nickname table format:
  Headerless CSV, one canonical name per row followed by its nicknames:
    alanson,al
    charles,charlie,chuck
  The table is chosen from --nicknames, then $NAMESAKE_NICKNAMES, then
  the table bundled with namesake.
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DuplicatePolicyArg {
    Merge,
    Overwrite,
}

impl From<DuplicatePolicyArg> for DuplicatePolicy {
    fn from(value: DuplicatePolicyArg) -> Self {
        match value {
            DuplicatePolicyArg::Merge => DuplicatePolicy::Merge,
            DuplicatePolicyArg::Overwrite => DuplicatePolicy::Overwrite,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "namesake",
    version,
    about = "billing, shipping and card name agreement for transactions",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Nickname table to load instead of $NAMESAKE_NICKNAMES or the bundled table
    #[arg(long, global = true, value_name = "PATH")]
    pub nicknames: Option<PathBuf>,
    /// How repeated canonical names in the nickname table are combined
    #[arg(long = "on-duplicate", global = true, value_enum, value_name = "POLICY")]
    pub on_duplicate: Option<DuplicatePolicyArg>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify one transaction's names as 1, 2 or 3 distinct identities
    #[command(after_help = CLASSIFY_AFTER_HELP)]
    Classify {
        #[arg(value_parser = parse_name_field)]
        bill_first_name: String,
        #[arg(value_parser = parse_name_field)]
        bill_last_name: String,
        #[arg(value_parser = parse_name_field)]
        ship_first_name: String,
        #[arg(value_parser = parse_name_field)]
        ship_last_name: String,
        #[arg(value_parser = parse_name_field)]
        name_on_card: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Classify every row of a transaction CSV
    #[command(after_help = BATCH_AFTER_HELP)]
    Batch {
        /// CSV path, or `-` for stdin
        path: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect the nickname table
    #[command(arg_required_else_help = true)]
    Nicknames {
        #[command(subcommand)]
        command: NicknamesCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum NicknamesCommand {
    /// Show whether two names are nicknames, typos, or different names
    #[command(after_help = NICKNAMES_AFTER_HELP)]
    Check {
        left: String,
        right: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
