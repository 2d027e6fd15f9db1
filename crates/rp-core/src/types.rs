//! Core domain types for the client listing API

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest page the clients listing endpoint accepts
pub const CLIENTS_LIMIT_MAX: u32 = 500;

/// Minimal client descriptor returned by the listing API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSummary {
    pub id: String,
    pub name: String,
    pub hostname: String,
    pub os_kernel: String,
    /// `connected` or `disconnected` on servers that report it
    pub connection_state: String,
    /// Set while the client is disconnected
    pub disconnected_at: Option<String>,
}

impl ClientSummary {
    /// Whether the client can currently receive commands
    pub fn is_connected(&self) -> bool {
        let disconnected_at = self.disconnected_at.as_deref().unwrap_or_default();
        disconnected_at.is_empty() && self.connection_state != "disconnected"
    }
}

/// Metadata accompanying a listing page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub count: u64,
}

/// One page of clients
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientsPage {
    pub data: Vec<ClientSummary>,
    pub meta: PageMeta,
}

/// Page window of a listing query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
}

impl Pagination {
    /// First page with the given size, capped at [`CLIENTS_LIMIT_MAX`]
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: limit.min(CLIENTS_LIMIT_MAX),
            offset: 0,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::with_limit(CLIENTS_LIMIT_MAX)
    }
}

/// `filter[<field>]=<value>` pairs of a listing query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(Vec<(String, String)>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter; empty values are skipped
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.0.push((field.into(), value));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", field, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_state() {
        let online = ClientSummary {
            id: "1".to_string(),
            ..ClientSummary::default()
        };
        assert!(online.is_connected());

        let gone = ClientSummary {
            disconnected_at: Some("2021-05-04T10:00:00Z".to_string()),
            ..online.clone()
        };
        assert!(!gone.is_connected());

        let flagged = ClientSummary {
            connection_state: "disconnected".to_string(),
            ..online
        };
        assert!(!flagged.is_connected());
    }

    #[test]
    fn test_pagination_is_capped() {
        assert_eq!(Pagination::with_limit(10_000).limit, CLIENTS_LIMIT_MAX);
        assert_eq!(Pagination::with_limit(2).limit, 2);
    }

    #[test]
    fn test_filters_skip_empty_values() {
        let filters = Filters::new().with("name", "web*").with("*", "");
        assert_eq!(filters.iter().count(), 1);
        assert_eq!(filters.to_string(), "name=web*");
    }

    #[test]
    fn test_decode_page() {
        let page: ClientsPage = serde_json::from_str(
            r#"{"data":[{"id":"a","name":"alpha","disconnected_at":null}],"meta":{"count":1}}"#,
        )
        .unwrap();
        assert_eq!(page.data.len(), 1);
        assert!(page.data[0].is_connected());
        assert_eq!(page.meta.count, 1);
    }
}
