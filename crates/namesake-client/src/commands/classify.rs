use crate::ClientResult;
use crate::classify::TransactionNames;
use crate::commands::common::nickname_source_info;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ClassifyData;
use crate::setup::{SetupOptions, load_registry};

#[derive(Debug, Default)]
pub struct ClassifyOptions<'a> {
    pub names: TransactionNames<'a>,
    pub setup: SetupOptions<'a>,
}

pub fn run(names: TransactionNames<'_>, setup: SetupOptions<'_>) -> ClientResult<SuccessEnvelope> {
    run_with_options(ClassifyOptions { names, setup })
}

#[doc(hidden)]
pub fn run_with_options(options: ClassifyOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_registry(options.setup)?;
    let outcome = setup.classifier().compare(&options.names)?;

    let data = ClassifyData {
        code: outcome.classification.code(),
        classification: outcome.classification.as_str().to_string(),
        bill_vs_ship: outcome.bill_vs_ship,
        bill_vs_card: outcome.bill_vs_card,
        ship_vs_card: outcome.ship_vs_card,
        nickname_source: nickname_source_info(&setup),
    };

    success("classify", data)
}
