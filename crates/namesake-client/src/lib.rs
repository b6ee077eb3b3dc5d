mod batch;
pub mod classify;
pub mod commands;
pub mod contracts;
pub mod error;
pub mod nicknames;
pub mod normalize;
pub mod setup;
pub mod state;

pub use classify::{Classification, ComparisonOutcome, IdentityClassifier, TransactionNames};
pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};
pub use nicknames::{DuplicatePolicy, NicknameRegistry};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
