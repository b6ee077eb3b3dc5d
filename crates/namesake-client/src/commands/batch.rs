use tracing::{info, warn};

use crate::ClientResult;
use crate::batch::{BatchRow, parse_rows, read_source};
use crate::classify::{Classification, IdentityClassifier, TransactionNames};
use crate::commands::common::nickname_source_info;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{BatchData, BatchRowError, BatchRowResult, BatchSummary};
use crate::setup::{SetupOptions, load_registry};

#[derive(Debug, Default)]
pub struct BatchOptions<'a> {
    pub path: String,
    pub setup: SetupOptions<'a>,
    pub stdin_override: Option<String>,
}

pub fn run(path: String, setup: SetupOptions<'_>) -> ClientResult<SuccessEnvelope> {
    run_with_options(BatchOptions {
        path,
        setup,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: BatchOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_registry(options.setup)?;
    let content = read_source(&options.path, options.stdin_override)?;
    let rows = parse_rows(&content)?;
    let classifier = setup.classifier();

    let mut summary = BatchSummary {
        rows_read: rows.len(),
        ..BatchSummary::default()
    };
    let results = rows
        .iter()
        .map(|row| classify_row(&classifier, row, &mut summary))
        .collect::<Vec<BatchRowResult>>();

    info!(
        rows_read = summary.rows_read,
        rows_invalid = summary.rows_invalid,
        "classified batch"
    );

    let data = BatchData {
        path: options.path,
        summary,
        rows: results,
        nickname_source: nickname_source_info(&setup),
    };

    success("batch", data)
}

fn classify_row(
    classifier: &IdentityClassifier,
    row: &BatchRow,
    summary: &mut BatchSummary,
) -> BatchRowResult {
    let names = TransactionNames {
        bill_first_name: row.bill_first_name.as_deref(),
        bill_last_name: row.bill_last_name.as_deref(),
        ship_first_name: row.ship_first_name.as_deref(),
        ship_last_name: row.ship_last_name.as_deref(),
        name_on_card: row.name_on_card.as_deref(),
    };

    match classifier.classify(&names) {
        Ok(classification) => {
            match classification {
                Classification::SingleIdentity => summary.single_identity += 1,
                Classification::TwoIdentities => summary.two_identities += 1,
                Classification::ThreeIdentities => summary.three_identities += 1,
            }
            BatchRowResult {
                row: row.row,
                code: Some(classification.code()),
                error: None,
            }
        }
        Err(error) => {
            warn!(row = row.row, code = error.code.as_str(), "{}", error.message);
            summary.rows_invalid += 1;
            BatchRowResult {
                row: row.row,
                code: None,
                error: Some(BatchRowError {
                    code: error.code,
                    message: error.message,
                }),
            }
        }
    }
}
