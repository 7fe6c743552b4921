/// Caller constraints on a history query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFilter {
    /// Peer handle to match, normally a canonical address
    pub address: String,
    /// Maximum number of messages returned, at least 1
    pub limit: usize,
    /// Case-insensitive substring the message text must contain
    pub keyword: Option<String>,
    /// Inclusive lower bound as `YYYY-MM-DD`; dropped if it does not parse
    pub since: Option<String>,
}

impl QueryFilter {
    pub const DEFAULT_LIMIT: usize = 10;

    /// A filter for `address`, clamping `limit` to at least 1
    pub fn new(address: impl Into<String>, limit: usize) -> Self {
        Self { address: address.into(), limit: limit.max(1), keyword: None, since: None }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_since(mut self, since: impl Into<String>) -> Self {
        self.since = Some(since.into());
        self
    }
}
