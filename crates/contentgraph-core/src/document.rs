//! # Content Document Model
//!
//! The inbound document shape and its structural invariants.
//!
//! Field names follow the wire format of the upstream publishing feed:
//! `uuid`, `title`, `body`, `byline`, `publishedDate`, `mainImage`,
//! `brands: [{ "id": ... }]`. A document with a non-empty body is an
//! "article" — the only variant the mapper currently handles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors produced by document validation and mapping.
///
/// Mapping is pure and has no failure path other than structurally
/// invalid input; callers report these to the client, never retry them.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The document identifier is empty.
    #[error("document identifier must not be empty")]
    EmptyIdentifier,
}

// =============================================================================
// BRAND REFERENCE
// =============================================================================

/// A reference to a brand concept, carried as an externally-namespaced
/// URI (e.g. `http://api.ft.com/things/<uuid>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandRef {
    /// The brand URI as supplied by the publisher.
    pub id: String,
}

impl BrandRef {
    /// Create a brand reference from a URI string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

// =============================================================================
// CONTENT DOCUMENT
// =============================================================================

/// An inbound content document.
///
/// The `uuid` is the globally unique identifier and the graph key for
/// the document's node. All other fields are optional on the wire;
/// absent scalars default to empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    /// Globally unique document identifier. Must be non-empty.
    pub uuid: String,

    /// Document title.
    #[serde(default)]
    pub title: String,

    /// Body text. Presence of a non-empty body marks the document as
    /// an article; anything else is skipped by the mapper.
    #[serde(default)]
    pub body: String,

    /// Byline credit.
    #[serde(default)]
    pub byline: String,

    /// Publication timestamp. Absent for unpublished content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<DateTime<Utc>>,

    /// Identifier of the main image, when one exists. An empty string
    /// is treated the same as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,

    /// Ordered brand references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub brands: Vec<BrandRef>,
}

impl ContentDocument {
    /// Validate the document's structural invariants.
    ///
    /// Returns `ContentError::EmptyIdentifier` when `uuid` is empty.
    /// Identifier consistency against a path-addressed write is the
    /// API layer's concern, not this crate's.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.uuid.is_empty() {
            return Err(ContentError::EmptyIdentifier);
        }
        Ok(())
    }

    /// Whether this document is an article (non-empty body).
    ///
    /// Non-articles map to zero statements — skipped, not rejected.
    #[must_use]
    pub fn is_article(&self) -> bool {
        !self.body.is_empty()
    }

    /// The main image identifier, if present and non-empty.
    #[must_use]
    pub fn main_image_uuid(&self) -> Option<&str> {
        match self.main_image.as_deref() {
            Some("") | None => None,
            Some(uuid) => Some(uuid),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
