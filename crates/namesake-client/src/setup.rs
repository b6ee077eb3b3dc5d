use std::path::Path;
use std::sync::Arc;

use crate::ClientResult;
use crate::classify::IdentityClassifier;
use crate::nicknames::{DuplicatePolicy, NicknameRegistry};
use crate::state::{NicknameSource, resolve_duplicate_policy, resolve_nickname_source};

#[derive(Debug, Clone, Copy, Default)]
pub struct SetupOptions<'a> {
    pub nicknames_override: Option<&'a Path>,
    pub duplicate_policy: Option<DuplicatePolicy>,
}

/// A loaded registry plus where it came from.
#[derive(Debug, Clone)]
pub struct SetupContext {
    pub source: NicknameSource,
    pub duplicate_policy: DuplicatePolicy,
    pub registry: Arc<NicknameRegistry>,
}

impl SetupContext {
    pub fn classifier(&self) -> IdentityClassifier {
        IdentityClassifier::with_shared_registry(Arc::clone(&self.registry))
    }
}

pub fn load_registry(options: SetupOptions<'_>) -> ClientResult<SetupContext> {
    let source = resolve_nickname_source(options.nicknames_override)?;
    let duplicate_policy = resolve_duplicate_policy(options.duplicate_policy)?;

    let registry = match &source {
        NicknameSource::Bundled => NicknameRegistry::bundled(duplicate_policy)?,
        NicknameSource::File(path) => NicknameRegistry::from_path(path, duplicate_policy)?,
    };

    Ok(SetupContext {
        source,
        duplicate_policy,
        registry: Arc::new(registry),
    })
}
