use crate::contracts::types::NicknameSourceInfo;
use crate::setup::SetupContext;

pub(crate) fn nickname_source_info(setup: &SetupContext) -> NicknameSourceInfo {
    NicknameSourceInfo {
        source: setup.source.describe(),
        duplicate_policy: setup.duplicate_policy.as_str().to_string(),
        canonical_names: setup.registry.len(),
    }
}
