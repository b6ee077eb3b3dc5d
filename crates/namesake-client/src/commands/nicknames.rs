use crate::ClientResult;
use crate::classify::edit_distance;
use crate::commands::common::nickname_source_info;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::NicknameCheckData;
use crate::normalize::normalize_token;
use crate::setup::{SetupOptions, load_registry};

/// Reports how two raw names compare after normalization.
pub fn check(left: &str, right: &str, setup: SetupOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_registry(setup)?;
    let classifier = setup.classifier();
    let left = normalize_token(left);
    let right = normalize_token(right);

    let data = NicknameCheckData {
        nicknames: setup.registry.is_nickname_of(&left, &right),
        edit_distance: edit_distance(&left, &right),
        equivalent: classifier.equivalent(&left, &right),
        nickname_source: nickname_source_info(&setup),
        left,
        right,
    };

    success("nicknames check", data)
}
