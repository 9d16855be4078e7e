//! Frontend Models
//!
//! Data structures exchanged with the counters endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Endpoint action names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetData,
    IncrementView,
    Like,
    Unlike,
    Bookmark,
    Unbookmark,
    Rate,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::GetData => "getData",
            Action::IncrementView => "incrementView",
            Action::Like => "like",
            Action::Unlike => "unlike",
            Action::Bookmark => "bookmark",
            Action::Unbookmark => "unbookmark",
            Action::Rate => "rate",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Query-string request
    Get,
    /// JSON body request
    Post,
}

/// Counter snapshot returned by `getData`.
///
/// Counts are plain JSON numbers; the sheet may hand back `1234.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NovelStats {
    pub views: f64,
    pub likes: f64,
    pub bookmarks: f64,
    pub rating: f64,
}

impl NovelStats {
    /// Canned counters served in demo mode
    pub const DEMO: NovelStats = NovelStats {
        views: 1234.0,
        likes: 56.0,
        bookmarks: 78.0,
        rating: 4.5,
    };
}

/// Response envelope shared by every action
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Envelope {
    pub fn demo() -> Self {
        Self {
            success: true,
            data: serde_json::to_value(NovelStats::DEMO).ok(),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Counters, if this is a successful response carrying a full snapshot
    pub fn stats(&self) -> Option<NovelStats> {
        if !self.success {
            return None;
        }
        let data = self.data.clone()?;
        serde_json::from_value(data).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names() {
        assert_eq!(Action::GetData.to_string(), "getData");
        assert_eq!(Action::IncrementView.to_string(), "incrementView");
        assert_eq!(Action::Unbookmark.as_str(), "unbookmark");
    }

    #[test]
    fn test_demo_envelope() {
        let envelope = Envelope::demo();
        assert!(envelope.success);
        assert_eq!(envelope.stats(), Some(NovelStats::DEMO));
        assert_eq!(
            envelope.data,
            Some(serde_json::json!({"views": 1234.0, "likes": 56.0, "bookmarks": 78.0, "rating": 4.5}))
        );
    }

    #[test]
    fn test_decode_success() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"success": true, "data": {"views": 10, "likes": 2, "bookmarks": 1, "rating": 3.25}}"#,
        )
        .unwrap();
        let stats = envelope.stats().unwrap();
        assert_eq!(stats.views, 10.0);
        assert_eq!(stats.rating, 3.25);
    }

    #[test]
    fn test_decode_float_and_negative_counts() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"success": true, "data": {"views": 1234.0, "likes": 56, "bookmarks": -2, "rating": 4}}"#,
        )
        .unwrap();
        let stats = envelope.stats().unwrap();
        assert_eq!(stats.views, 1234.0);
        assert_eq!(stats.likes, 56.0);
        assert_eq!(stats.bookmarks, -2.0);
        assert_eq!(stats.rating, 4.0);
    }

    #[test]
    fn test_decode_write_ack() {
        let envelope: Envelope = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(envelope.success);
        assert!(envelope.stats().is_none());
    }

    #[test]
    fn test_decode_failure() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"success": false, "error": "Novel not found"}"#).unwrap();
        assert_eq!(envelope.error.as_deref(), Some("Novel not found"));
        assert!(envelope.stats().is_none());
    }

    #[test]
    fn test_failed_envelope_hides_data() {
        let envelope = Envelope {
            success: false,
            ..Envelope::demo()
        };
        assert!(envelope.stats().is_none());
    }

    #[test]
    fn test_partial_data_is_not_stats() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"success": true, "data": {"views": 3}}"#).unwrap();
        assert!(envelope.stats().is_none());
    }
}
