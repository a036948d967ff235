//! InkyBay shop endpoints and their request bodies.
//!
//! A body is serialized exactly once; the resulting bytes are what gets both
//! signed and sent.

use std::fmt;
use std::str::FromStr;

use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};

use crate::error::InkyBayError;

/// Upstream endpoints the signer will build requests for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Search,
    History,
    Info,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Search, Operation::History, Operation::Info];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Search => "search",
            Operation::History => "history",
            Operation::Info => "info",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = InkyBayError;

    // Exact match only: " search" or "Search" are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| InkyBayError::InvalidOperation {
                operation: s.to_string(),
            })
    }
}

pub const DEFAULT_SEARCH_TYPE: &str = "all";

/// Body of a `search` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub srckey: String,
    #[serde(rename = "type")]
    pub search_type: String,
}

impl SearchQuery {
    pub fn new(srckey: impl Into<String>) -> Self {
        Self {
            srckey: srckey.into(),
            search_type: DEFAULT_SEARCH_TYPE.to_string(),
        }
    }

    #[must_use]
    pub fn with_type(mut self, search_type: impl Into<String>) -> Self {
        self.search_type = search_type.into();
        self
    }
}

/// Body of a `history` or `info` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopLookup {
    pub shop: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopQuery {
    Search(SearchQuery),
    History(ShopLookup),
    Info(ShopLookup),
}

impl ShopQuery {
    pub fn history(shop: impl Into<String>) -> Self {
        ShopQuery::History(ShopLookup { shop: shop.into() })
    }

    pub fn info(shop: impl Into<String>) -> Self {
        ShopQuery::Info(ShopLookup { shop: shop.into() })
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            ShopQuery::Search(_) => Operation::Search,
            ShopQuery::History(_) => Operation::History,
            ShopQuery::Info(_) => Operation::Info,
        }
    }

    /// Serialize the body to the bytes that will be signed and sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized to JSON.
    pub fn to_body(&self) -> Result<Vec<u8>, Report<InkyBayError>> {
        let bytes = match self {
            ShopQuery::Search(query) => serde_json::to_vec(query),
            ShopQuery::History(lookup) | ShopQuery::Info(lookup) => serde_json::to_vec(lookup),
        };
        bytes.change_context(InkyBayError::InvalidRequest {
            message: format!("Failed to serialize {} body", self.operation()),
        })
    }
}

impl From<SearchQuery> for ShopQuery {
    fn from(query: SearchQuery) -> Self {
        ShopQuery::Search(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_from_str() {
        assert_eq!("search".parse::<Operation>().ok(), Some(Operation::Search));
        assert_eq!(
            "history".parse::<Operation>().ok(),
            Some(Operation::History)
        );
        assert_eq!("info".parse::<Operation>().ok(), Some(Operation::Info));
    }

    #[test]
    fn test_operation_rejects_unknown_and_near_misses() {
        for bad in ["invalid-op", "", "Search", " search", "info.php", "search/../info"] {
            let err = bad.parse::<Operation>().expect_err("should reject");
            match err {
                InkyBayError::InvalidOperation { operation } => assert_eq!(operation, bad),
                other => panic!("Expected InvalidOperation, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_operation_display_matches_wire_name() {
        for op in Operation::ALL {
            assert_eq!(op.to_string().parse::<Operation>().ok(), Some(op));
        }
    }

    #[test]
    fn test_search_body_bytes() {
        let body = ShopQuery::from(SearchQuery::new("abc"))
            .to_body()
            .expect("should serialize search body");
        assert_eq!(body, br#"{"srckey":"abc","type":"all"}"#);
    }

    #[test]
    fn test_search_with_type() {
        let body = ShopQuery::from(SearchQuery::new("shop.example").with_type("domain"))
            .to_body()
            .expect("should serialize search body");
        assert_eq!(body, br#"{"srckey":"shop.example","type":"domain"}"#);
    }

    #[test]
    fn test_lookup_bodies() {
        let history = ShopQuery::history("demo.myshopify.com");
        assert_eq!(history.operation(), Operation::History);
        assert_eq!(
            history.to_body().expect("should serialize history body"),
            br#"{"shop":"demo.myshopify.com"}"#
        );

        let info = ShopQuery::info("demo.myshopify.com");
        assert_eq!(info.operation(), Operation::Info);
    }
}
