use std::fmt;
use std::str::FromStr;

/// Maximum number of characters of page content carried in a notification.
pub const SNIPPET_CHARS: usize = 200;

/// Supported notification sink kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Slack,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::Slack => write!(f, "slack"),
        }
    }
}

impl FromStr for SinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slack" => Ok(SinkKind::Slack),
            other => Err(format!("unsupported notification type '{other}'")),
        }
    }
}

/// Result of fetching and checking one URL during one cycle.
///
/// `keyword_found == false` covers both "page fetched, keyword absent" and
/// "every attempt failed"; only the latter leaves `content` empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub url: String,
    pub keyword_found: bool,
    pub content: String,
}

impl FetchOutcome {
    pub fn found(url: impl Into<String>, content: String) -> Self {
        Self {
            url: url.into(),
            keyword_found: true,
            content,
        }
    }

    pub fn missing(url: impl Into<String>, content: String) -> Self {
        Self {
            url: url.into(),
            keyword_found: false,
            content,
        }
    }

    /// Outcome used when no HTTP response could be obtained at all.
    pub fn unreachable(url: impl Into<String>) -> Self {
        Self::missing(url, String::new())
    }
}

/// Alert text for a URL whose keyword was not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub url: String,
    pub keyword: String,
    pub snippet: String,
}

impl NotificationMessage {
    pub fn new(url: &str, keyword: &str, content: &str) -> Self {
        Self {
            url: url.to_string(),
            keyword: keyword.to_string(),
            snippet: snippet(content, SNIPPET_CHARS),
        }
    }

    pub fn from_outcome(outcome: &FetchOutcome, keyword: &str) -> Self {
        Self::new(&outcome.url, keyword, &outcome.content)
    }
}

impl fmt::Display for NotificationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Keyword '{}' not found on {}. Current content snippet: '{}'",
            self.keyword, self.url, self.snippet
        )
    }
}

/// First `max_chars` characters of `content`, never splitting a code point.
pub fn snippet(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => content[..idx].to_string(),
        None => content.to_string(),
    }
}
