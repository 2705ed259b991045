//! # Mapper
//!
//! Pure translation of a content document into an ordered list of
//! idempotent Cypher MERGE statements.
//!
//! Statement order for one document is fixed:
//! `[self-upsert, image-edge, brand-edges…]`. The self-upsert both sets
//! the scalar properties and declares the node's labels, so as long as
//! the order is preserved within a batch, an edge statement never
//! merges the document node into an untyped transient state.

use crate::document::{ContentDocument, ContentError};
use crate::statement::Statement;

// =============================================================================
// URI EXTRACTION
// =============================================================================

/// The known namespace prefix for brand concept URIs.
pub const THINGS_URI_PREFIX: &str = "http://api.ft.com/things/";

/// Extract a bare identifier from a brand URI.
///
/// This is a documented best-effort lossy transform: the known prefix
/// is stripped when present; any other string passes through whole and
/// becomes the concept key as-is. No validation is attempted.
#[must_use]
pub fn brand_uri_to_uuid(uri: &str) -> &str {
    uri.strip_prefix(THINGS_URI_PREFIX).unwrap_or(uri)
}

// =============================================================================
// CYPHER TEMPLATES
// =============================================================================

const UPSERT_ARTICLE: &str = "\
MERGE (c:Content {uuid: $uuid})
SET c:Article
SET c.uuid = $uuid,
    c.title = $title,
    c.headline = $title,
    c.prefLabel = $title,
    c.body = $body,
    c.byline = $byline,
    c.publishedDate = $publishedDate,
    c.publishedDateEpoch = $publishedDateEpoch";

// Variant for documents without a publication timestamp: the two date
// properties are omitted rather than written as sentinels, which would
// poison epoch range queries.
const UPSERT_ARTICLE_UNDATED: &str = "\
MERGE (c:Content {uuid: $uuid})
SET c:Article
SET c.uuid = $uuid,
    c.title = $title,
    c.headline = $title,
    c.prefLabel = $title,
    c.body = $body,
    c.byline = $byline";

const UPSERT_MAIN_IMAGE: &str = "\
MERGE (c:Content {uuid: $uuid})
MERGE (i:Content {uuid: $imageUuid})
SET i:Image
MERGE (c)-[:HAS_MAINIMAGE]->(i)";

const UPSERT_BRAND: &str = "\
MERGE (c:Content {uuid: $uuid})
MERGE (b:Concept {uuid: $brandUuid})
SET b:Brand
MERGE (c)-[:HAS_BRAND]->(b)";

// =============================================================================
// MAPPING
// =============================================================================

/// Map a document to its ordered graph mutation statements.
///
/// Pure and deterministic: no I/O, no shared state. The only failure is
/// a structurally invalid document (empty identifier). A document with
/// an empty body is not an article and maps to an empty list — the
/// caller logs and skips it, nothing is rejected.
pub fn map_document(doc: &ContentDocument) -> Result<Vec<Statement>, ContentError> {
    doc.validate()?;

    if !doc.is_article() {
        return Ok(Vec::new());
    }

    let mut statements = Vec::with_capacity(1 + doc.brands.len() + 1);
    statements.push(self_upsert(doc));

    if let Some(image_uuid) = doc.main_image_uuid() {
        statements.push(
            Statement::new(UPSERT_MAIN_IMAGE)
                .param("uuid", doc.uuid.as_str())
                .param("imageUuid", image_uuid),
        );
    }

    for brand in &doc.brands {
        statements.push(
            Statement::new(UPSERT_BRAND)
                .param("uuid", doc.uuid.as_str())
                .param("brandUuid", brand_uri_to_uuid(&brand.id)),
        );
    }

    Ok(statements)
}

/// Build the property-setting upsert for the document node itself.
///
/// `title` feeds three property aliases (`title`, `headline`,
/// `prefLabel`) that downstream readers expect. The derived
/// `publishedDateEpoch` is Unix seconds, for fast range queries.
fn self_upsert(doc: &ContentDocument) -> Statement {
    let base = match doc.published_date {
        Some(published) => Statement::new(UPSERT_ARTICLE)
            .param("publishedDate", published.to_rfc3339())
            .param("publishedDateEpoch", published.timestamp()),
        None => Statement::new(UPSERT_ARTICLE_UNDATED),
    };

    base.param("uuid", doc.uuid.as_str())
        .param("title", doc.title.as_str())
        .param("body", doc.body.as_str())
        .param("byline", doc.byline.as_str())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::BrandRef;
    use crate::statement::ParamValue;
    use chrono::{TimeZone, Utc};

    fn article(uuid: &str) -> ContentDocument {
        ContentDocument {
            uuid: uuid.to_string(),
            title: "Foo".to_string(),
            body: "<p>body text</p>".to_string(),
            byline: "By Someone".to_string(),
            published_date: Some(Utc.with_ymd_and_hms(2014, 7, 21, 11, 30, 0).single().expect("ts")),
            main_image: None,
            brands: vec![],
        }
    }

    #[test]
    fn empty_body_maps_to_no_statements() {
        let mut doc = article("u-1");
        doc.body = String::new();

        let statements = map_document(&doc).expect("map");
        assert!(statements.is_empty());
    }

    #[test]
    fn empty_uuid_is_rejected() {
        let mut doc = article("u-1");
        doc.uuid = String::new();
        assert!(map_document(&doc).is_err());
    }

    #[test]
    fn self_upsert_carries_all_scalar_properties() {
        let doc = article("u-1");
        let statements = map_document(&doc).expect("map");
        assert_eq!(statements.len(), 1);

        let first = &statements[0];
        assert_eq!(first.get("uuid").and_then(ParamValue::as_str), Some("u-1"));
        assert_eq!(first.get("title").and_then(ParamValue::as_str), Some("Foo"));
        assert_eq!(
            first.get("body").and_then(ParamValue::as_str),
            Some("<p>body text</p>")
        );
        assert_eq!(
            first.get("byline").and_then(ParamValue::as_str),
            Some("By Someone")
        );
        assert_eq!(
            first.get("publishedDate").and_then(ParamValue::as_str),
            Some("2014-07-21T11:30:00+00:00")
        );
        // Derived epoch is Unix seconds of the published timestamp.
        assert_eq!(
            first.get("publishedDateEpoch").and_then(ParamValue::as_int),
            Some(1_405_942_200)
        );
    }

    #[test]
    fn undated_document_omits_date_properties() {
        let mut doc = article("u-1");
        doc.published_date = None;

        let statements = map_document(&doc).expect("map");
        let first = &statements[0];
        assert_eq!(first.get("publishedDate"), None);
        assert_eq!(first.get("publishedDateEpoch"), None);
        assert!(!first.cypher().contains("publishedDate"));
    }

    #[test]
    fn main_image_produces_edge_statement() {
        let mut doc = article("u-1");
        doc.main_image = Some("img-9".to_string());

        let statements = map_document(&doc).expect("map");
        assert_eq!(statements.len(), 2);

        let image = &statements[1];
        assert!(image.cypher().contains("HAS_MAINIMAGE"));
        assert_eq!(image.get("uuid").and_then(ParamValue::as_str), Some("u-1"));
        assert_eq!(
            image.get("imageUuid").and_then(ParamValue::as_str),
            Some("img-9")
        );
    }

    #[test]
    fn empty_main_image_is_skipped() {
        let mut doc = article("u-1");
        doc.main_image = Some(String::new());

        let statements = map_document(&doc).expect("map");
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn brands_produce_edge_statements_in_input_order() {
        let mut doc = article("u-1");
        doc.brands = vec![
            BrandRef::new("http://api.ft.com/things/b-1"),
            BrandRef::new("http://api.ft.com/things/b-2"),
        ];

        let statements = map_document(&doc).expect("map");
        assert_eq!(statements.len(), 3);
        assert_eq!(
            statements[1].get("brandUuid").and_then(ParamValue::as_str),
            Some("b-1")
        );
        assert_eq!(
            statements[2].get("brandUuid").and_then(ParamValue::as_str),
            Some("b-2")
        );
        for brand in &statements[1..] {
            assert!(brand.cypher().contains("HAS_BRAND"));
        }
    }

    #[test]
    fn statement_order_is_self_then_image_then_brands() {
        let mut doc = article("u-1");
        doc.main_image = Some("img-1".to_string());
        doc.brands = vec![BrandRef::new("http://api.ft.com/things/b-1")];

        let statements = map_document(&doc).expect("map");
        assert_eq!(statements.len(), 3);
        assert!(statements[0].cypher().starts_with("MERGE (c:Content"));
        assert!(statements[0].cypher().contains("SET c:Article"));
        assert!(statements[1].cypher().contains("HAS_MAINIMAGE"));
        assert!(statements[2].cypher().contains("HAS_BRAND"));
    }

    #[test]
    fn brand_uri_prefix_is_stripped() {
        assert_eq!(
            brand_uri_to_uuid("http://api.ft.com/things/0d9dcc20"),
            "0d9dcc20"
        );
    }

    #[test]
    fn non_prefixed_brand_uri_passes_through() {
        assert_eq!(
            brand_uri_to_uuid("urn:brand:something-else"),
            "urn:brand:something-else"
        );
    }

    #[test]
    fn mapping_is_deterministic() {
        let mut doc = article("u-1");
        doc.main_image = Some("img-1".to_string());
        doc.brands = vec![BrandRef::new("http://api.ft.com/things/b-1")];

        let first = map_document(&doc).expect("map");
        let second = map_document(&doc).expect("map");
        assert_eq!(first, second);
    }

    #[test]
    fn statements_are_merge_only() {
        let mut doc = article("u-1");
        doc.main_image = Some("img-1".to_string());
        doc.brands = vec![BrandRef::new("b-1")];

        for stmt in map_document(&doc).expect("map") {
            assert!(stmt.cypher().starts_with("MERGE"));
            assert!(!stmt.cypher().contains("CREATE"));
            assert!(!stmt.cypher().contains("DELETE"));
        }
    }
}
