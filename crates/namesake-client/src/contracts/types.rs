use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct NicknameSourceInfo {
    pub source: String,
    pub duplicate_policy: String,
    pub canonical_names: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyData {
    pub code: u8,
    pub classification: String,
    pub bill_vs_ship: bool,
    pub bill_vs_card: bool,
    pub ship_vs_card: Option<bool>,
    pub nickname_source: NicknameSourceInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchData {
    pub path: String,
    pub summary: BatchSummary,
    pub rows: Vec<BatchRowResult>,
    pub nickname_source: NicknameSourceInfo,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub rows_read: usize,
    pub single_identity: usize,
    pub two_identities: usize,
    pub three_identities: usize,
    pub rows_invalid: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchRowResult {
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<BatchRowError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchRowError {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NicknameCheckData {
    pub left: String,
    pub right: String,
    pub nicknames: bool,
    pub edit_distance: usize,
    pub equivalent: bool,
    pub nickname_source: NicknameSourceInfo,
}
