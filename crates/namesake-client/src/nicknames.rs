use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::normalize::normalize_token;
use crate::{ClientError, ClientResult};

pub const BUNDLED_SOURCE_LABEL: &str = "bundled";

const BUNDLED_NICKNAMES: &str = include_str!("../data/nicknames.csv");

/// How a canonical name that appears on more than one row is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Later rows add their nicknames to the ones already registered.
    #[default]
    Merge,
    /// Later rows replace the nicknames registered by earlier rows.
    Overwrite,
}

impl DuplicatePolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Overwrite => "overwrite",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "merge" => Some(Self::Merge),
            "overwrite" => Some(Self::Overwrite),
            _ => None,
        }
    }
}

/// Canonical name -> interchangeable nicknames.
///
/// Storage is directional but [`NicknameRegistry::is_nickname_of`] answers
/// symmetrically. The registry is immutable once built.
#[derive(Debug, Clone, Default)]
pub struct NicknameRegistry {
    entries: HashMap<String, BTreeSet<String>>,
}

impl NicknameRegistry {
    /// Builds a registry from rows of `canonical, nickname, nickname, ...`.
    pub fn build<I, R, S>(rows: I, policy: DuplicatePolicy) -> ClientResult<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::default();
        let mut row_count = 0usize;
        for (index, row) in rows.into_iter().enumerate() {
            let fields = row
                .into_iter()
                .map(|value| normalize_token(value.as_ref()))
                .collect::<Vec<String>>();
            registry.insert_row("rows", index + 1, fields, policy)?;
            row_count += 1;
        }

        registry.log_loaded("rows", row_count, policy);
        Ok(registry)
    }

    /// Parses a headerless, variable-width CSV table.
    pub fn from_csv_str(
        source: &str,
        content: &str,
        policy: DuplicatePolicy,
    ) -> ClientResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut registry = Self::default();
        let mut row_count = 0usize;
        for (index, result_row) in reader.records().enumerate() {
            let record = result_row
                .map_err(|error| ClientError::registry_malformed(source, &error.to_string()))?;
            let row = record
                .position()
                .map(|position| position.line() as usize)
                .unwrap_or(index + 1);
            let fields = record.iter().map(normalize_token).collect::<Vec<String>>();
            registry.insert_row(source, row, fields, policy)?;
            row_count += 1;
        }

        registry.log_loaded(source, row_count, policy);
        Ok(registry)
    }

    pub fn from_path(path: &Path, policy: DuplicatePolicy) -> ClientResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|error| ClientError::registry_unreadable(path, &error.to_string()))?;
        Self::from_csv_str(&path.display().to_string(), &content, policy)
    }

    /// The table compiled into this library.
    pub fn bundled(policy: DuplicatePolicy) -> ClientResult<Self> {
        Self::from_csv_str(BUNDLED_SOURCE_LABEL, BUNDLED_NICKNAMES, policy)
    }

    /// True when either name is registered as a nickname of the other.
    pub fn is_nickname_of(&self, left: &str, right: &str) -> bool {
        self.entries
            .get(left)
            .is_some_and(|alternates| alternates.contains(right))
            || self
                .entries
                .get(right)
                .is_some_and(|alternates| alternates.contains(left))
    }

    pub fn alternates_of(&self, canonical: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(canonical)
    }

    /// Number of canonical names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert_row(
        &mut self,
        source: &str,
        row: usize,
        fields: Vec<String>,
        policy: DuplicatePolicy,
    ) -> ClientResult<()> {
        let mut fields = fields.into_iter();
        let canonical = match fields.next() {
            Some(value) if !value.is_empty() => value,
            _ => return Err(ClientError::registry_empty_canonical(source, row)),
        };
        // Trailing commas leave empty cells behind.
        let alternates = fields
            .filter(|value| !value.is_empty())
            .collect::<BTreeSet<String>>();

        match self.entries.get_mut(&canonical) {
            Some(existing) => {
                debug!(
                    source,
                    row,
                    canonical = canonical.as_str(),
                    policy = policy.as_str(),
                    "canonical name repeated in nickname table"
                );
                match policy {
                    DuplicatePolicy::Merge => existing.extend(alternates),
                    DuplicatePolicy::Overwrite => *existing = alternates,
                }
            }
            None => {
                self.entries.insert(canonical, alternates);
            }
        }

        Ok(())
    }

    fn log_loaded(&self, source: &str, rows: usize, policy: DuplicatePolicy) {
        debug!(
            source,
            rows,
            canonical_names = self.entries.len(),
            policy = policy.as_str(),
            "loaded nickname table"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{DuplicatePolicy, NicknameRegistry};

    #[test]
    fn lookups_are_symmetric_over_directional_storage() {
        let built = NicknameRegistry::build([vec!["Alanson", " AL "]], DuplicatePolicy::Merge);
        assert!(built.is_ok());
        if let Ok(registry) = built {
            assert!(registry.is_nickname_of("al", "alanson"));
            assert!(registry.is_nickname_of("alanson", "al"));
            assert!(!registry.is_nickname_of("alanson", "alanson"));
            assert!(!registry.is_nickname_of("al", "al"));
            assert_eq!(registry.len(), 1);
        }
    }

    #[test]
    fn repeated_canonical_rows_merge_by_default() {
        let rows = vec![vec!["robert", "bob"], vec!["robert", "rob", "bobby"]];
        let built = NicknameRegistry::build(rows, DuplicatePolicy::default());
        assert!(built.is_ok());
        if let Ok(registry) = built {
            assert!(registry.is_nickname_of("robert", "bob"));
            assert!(registry.is_nickname_of("robert", "bobby"));
            assert_eq!(registry.alternates_of("robert").map(|set| set.len()), Some(3));
        }
    }

    #[test]
    fn repeated_canonical_rows_overwrite_when_requested() {
        let rows = vec![vec!["robert", "bob"], vec!["robert", "rob"]];
        let built = NicknameRegistry::build(rows, DuplicatePolicy::Overwrite);
        assert!(built.is_ok());
        if let Ok(registry) = built {
            assert!(!registry.is_nickname_of("robert", "bob"));
            assert!(registry.is_nickname_of("robert", "rob"));
        }
    }

    #[test]
    fn empty_canonical_fails_the_build() {
        let rows = vec![vec!["robert", "bob"], vec!["  ", "al"]];
        let built = NicknameRegistry::build(rows, DuplicatePolicy::Merge);
        assert!(built.is_err());
        if let Err(error) = built {
            assert!(error.is_registry_load_failure());
            let row = error
                .data
                .as_ref()
                .and_then(|data| data.get("row"))
                .and_then(serde_json::Value::as_u64);
            assert_eq!(row, Some(2));
        }

        let empty_row: Vec<Vec<&str>> = vec![Vec::new()];
        assert!(NicknameRegistry::build(empty_row, DuplicatePolicy::Merge).is_err());
    }

    #[test]
    fn csv_rows_are_variable_width_and_skip_empty_nicknames() {
        let content = "Charles,Charlie,Chuck\nAlanson,Al,\n\nDeborah,Debbie,Deb,Debby\n";
        let built = NicknameRegistry::from_csv_str("inline", content, DuplicatePolicy::Merge);
        assert!(built.is_ok());
        if let Ok(registry) = built {
            assert_eq!(registry.len(), 3);
            assert!(registry.is_nickname_of("chuck", "charles"));
            assert!(registry.is_nickname_of("debby", "deborah"));
            assert_eq!(registry.alternates_of("alanson").map(|set| set.len()), Some(1));
            assert!(!registry.is_nickname_of("alanson", ""));
        }
    }

    #[test]
    fn csv_row_with_blank_canonical_reports_its_line() {
        let content = "charles,chuck\n,al\n";
        let built = NicknameRegistry::from_csv_str("inline", content, DuplicatePolicy::Merge);
        assert!(built.is_err());
        if let Err(error) = built {
            assert!(error.message.contains("row 2"));
        }
    }

    #[test]
    fn bundled_table_loads() {
        let built = NicknameRegistry::bundled(DuplicatePolicy::Merge);
        assert!(built.is_ok());
        if let Ok(registry) = built {
            assert!(!registry.is_empty());
            assert!(registry.is_nickname_of("al", "alanson"));
            assert!(registry.is_nickname_of("deborah", "debbie"));
        }
    }

    #[test]
    fn duplicate_policy_parses_known_values() {
        assert_eq!(DuplicatePolicy::parse("Merge"), Some(DuplicatePolicy::Merge));
        assert_eq!(
            DuplicatePolicy::parse(" overwrite "),
            Some(DuplicatePolicy::Overwrite)
        );
        assert_eq!(DuplicatePolicy::parse("append"), None);
    }
}
