//! Textual projections of search responses
//!
//! Produces the two string shapes downstream consumers depend on: the
//! human view (score header plus hit blocks) printed to a terminal, and
//! the tool-call view (hit blocks plus facet counts) returned to an LLM
//! as a tool response body.

use super::{Hit, ProjectionError, SearchResponse};
use serde_json::Value;

/// Description text is cut to this many characters in a hit block
const DESCRIPTION_LIMIT: usize = 750;

/// Width of the divider between the score header and the hit blocks
const HEADER_DIVIDER_WIDTH: usize = 100;

fn hit_id(source: &Value) -> Result<String, ProjectionError> {
    // The engine stores product ids as keywords but source documents may
    // carry them as numbers; accept both.
    match source.get("product_id") {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(ProjectionError::MissingField {
            field: "product_id",
            hit_id: "<unknown>".to_string(),
        }),
    }
}

fn str_field<'a>(
    source: &'a Value,
    field: &'static str,
    hit_id: &str,
) -> Result<&'a str, ProjectionError> {
    source
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ProjectionError::MissingField {
            field,
            hit_id: hit_id.to_string(),
        })
}

fn f64_field(source: &Value, field: &'static str, hit_id: &str) -> Result<f64, ProjectionError> {
    source
        .get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| ProjectionError::MissingField {
            field,
            hit_id: hit_id.to_string(),
        })
}

/// Render one hit block: id, name, class, truncated description, rating,
/// one per line, closed by a `---` divider. The score is deliberately not
/// part of the block.
pub fn format_hit(hit: &Hit) -> Result<String, ProjectionError> {
    let id = hit_id(&hit.source)?;
    let name = str_field(&hit.source, "product_name", &id)?;
    let class = str_field(&hit.source, "product_class", &id)?;
    let description = str_field(&hit.source, "product_description", &id)?;
    let rating = f64_field(&hit.source, "average_rating", &id)?;

    let truncated: String = description.chars().take(DESCRIPTION_LIMIT).collect();

    let mut block = Vec::new();
    block.push(format!("Product ID: {}", id));
    block.push(format!("Product Name: {}", name));
    block.push(format!("Product Class: {}", class));
    // The truncation marker is unconditional, even for short descriptions
    block.push(format!("Product Description: {}...", truncated));
    block.push(format!("Average Rating: {}", rating));
    block.push("---".to_string());
    Ok(block.join("\n"))
}

/// Render the verbose human view: total/max/min score header, divider,
/// then the hit blocks in engine order. An empty hit list yields a
/// zero-results message instead of a min-score over nothing.
pub fn format_for_human(response: &SearchResponse) -> Result<String, ProjectionError> {
    let total = response.hits.total.value;
    if response.hits.hits.is_empty() {
        return Ok(format!("Total Hits: {}\n\nNo matching products.", total));
    }

    let max_score = response.hits.max_score.ok_or_else(|| {
        ProjectionError::MalformedResponse(
            "max_score is null for a non-empty hit list".to_string(),
        )
    })?;
    let min_score = response
        .hits
        .hits
        .iter()
        .map(|hit| hit.score)
        .fold(f64::INFINITY, f64::min);

    let mut out = Vec::new();
    out.push(format!("Total Hits: {}", total));
    out.push(format!("Max Score: {}", max_score));
    out.push(format!("Min Score: {}", min_score));
    out.push("=".repeat(HEADER_DIVIDER_WIDTH));
    for hit in &response.hits.hits {
        out.push(format_hit(hit)?);
    }
    Ok(out.join("\n"))
}

/// Render the compact tool-call view: hit blocks without the score
/// header, followed by facet counts. Buckets with an empty-string key
/// (the engine's "no value" bucket) are skipped.
pub fn format_for_toolcall(response: &SearchResponse) -> Result<String, ProjectionError> {
    let blocks = response
        .hits
        .hits
        .iter()
        .map(format_hit)
        .collect::<Result<Vec<_>, _>>()?;
    let hits = blocks.join("\n");

    let mut facets = Vec::new();
    for (name, aggregation) in &response.aggregations {
        facets.push(format!("\n{}:", name));
        for bucket in &aggregation.buckets {
            if !bucket.key.is_empty() {
                facets.push(format!("  {}: {}", bucket.key, bucket.doc_count));
            }
        }
    }

    Ok(format!("{}\n\nFacet Counts:\n{}", hits, facets.join("\n")))
}
