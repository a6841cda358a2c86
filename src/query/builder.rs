//! Query builder
//!
//! Assembles the engine query body: a gating `multi_match` in `must`,
//! phrase and exact-field variants in `should` that boost ranking without
//! gating inclusion, one filter clause per supplied optional parameter,
//! and a `product_class` facet aggregation.

use super::{QueryError, SearchParameters};
use serde_json::{json, Value};

/// Primary searchable fields
const SEARCH_FIELDS: [&str; 2] = ["product_name", "product_description"];

/// Exact-match (standard analyzer) variants of the searchable fields
const EXACT_FIELDS: [&str; 2] = ["product_name.exact", "product_description.exact"];

/// Field the facet aggregation is computed over
const FACET_FIELD: &str = "product_class";

/// Maximum number of facet buckets requested
const FACET_SIZE: usize = 10;

/// Build the engine query body for the given parameters.
///
/// The `must` clause gates inclusion; the `should` clauses only reward
/// phrase and literal matches with a higher score. Filters never affect
/// scoring. An empty or whitespace-only query string is rejected rather
/// than issuing a degenerate match-everything query.
pub fn build_query(params: &SearchParameters) -> Result<Value, QueryError> {
    if params.query_string.trim().is_empty() {
        return Err(QueryError::EmptyQueryString);
    }

    let mut filter = Vec::new();
    if let Some(availability) = &params.availability {
        filter.push(json!({
            "term": {
                "availability": availability
            }
        }));
    }
    if let Some(product_class) = &params.product_class {
        filter.push(json!({
            "term": {
                "product_class": product_class
            }
        }));
    }
    if let Some(min_average_rating) = params.min_average_rating {
        filter.push(json!({
            "range": {
                "average_rating": { "gte": min_average_rating }
            }
        }));
    }

    Ok(json!({
        "query": {
            "bool": {
                "should": [
                    {
                        "multi_match": {
                            "query": params.query_string,
                            "type": "phrase",
                            "fields": SEARCH_FIELDS
                        }
                    },
                    {
                        "multi_match": {
                            "query": params.query_string,
                            "fields": EXACT_FIELDS
                        }
                    }
                ],
                "must": [
                    {
                        "multi_match": {
                            "query": params.query_string,
                            "fields": SEARCH_FIELDS
                        }
                    }
                ],
                "filter": filter
            }
        },
        "aggs": {
            FACET_FIELD: {
                "terms": {
                    "field": FACET_FIELD,
                    "size": FACET_SIZE
                }
            }
        },
        "size": params.num_results
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_clauses(query: &Value) -> &Vec<Value> {
        query["query"]["bool"]["filter"]
            .as_array()
            .expect("filter is always an array")
    }

    #[test]
    fn test_query_string_only_has_empty_filter() {
        let params = SearchParameters::new("standing desk");
        let query = build_query(&params).unwrap();
        assert!(filter_clauses(&query).is_empty());
    }

    #[test]
    fn test_must_clause_always_present() {
        let params = SearchParameters::new("standing desk")
            .with_product_class(Some("Desks".to_string()));
        let query = build_query(&params).unwrap();

        let must = query["query"]["bool"]["must"].as_array().unwrap();
        assert_eq!(must.len(), 1);
        assert_eq!(must[0]["multi_match"]["query"], "standing desk");
        assert_eq!(
            must[0]["multi_match"]["fields"],
            json!(["product_name", "product_description"])
        );
    }

    #[test]
    fn test_should_clauses_phrase_and_exact() {
        let params = SearchParameters::new("standing desk");
        let query = build_query(&params).unwrap();

        let should = query["query"]["bool"]["should"].as_array().unwrap();
        assert_eq!(should.len(), 2);
        assert_eq!(should[0]["multi_match"]["type"], "phrase");
        assert_eq!(
            should[1]["multi_match"]["fields"],
            json!(["product_name.exact", "product_description.exact"])
        );
    }

    #[test]
    fn test_filter_count_matches_supplied_parameters() {
        let params = SearchParameters::new("desk")
            .with_availability(Some("Texas".to_string()))
            .with_product_class(Some("Desks".to_string()))
            .with_min_average_rating(Some(3.5));
        let query = build_query(&params).unwrap();

        let filter = filter_clauses(&query);
        assert_eq!(filter.len(), 3);
        assert_eq!(filter[0]["term"]["availability"], "Texas");
        assert_eq!(filter[1]["term"]["product_class"], "Desks");
        assert_eq!(filter[2]["range"]["average_rating"]["gte"], 3.5);
    }

    #[test]
    fn test_min_rating_only_filter() {
        let params = SearchParameters::new("desk").with_min_average_rating(Some(4.0));
        let query = build_query(&params).unwrap();

        let filter = filter_clauses(&query);
        assert_eq!(filter.len(), 1);
        assert_eq!(filter[0]["range"]["average_rating"]["gte"], 4.0);
        assert!(filter[0]["range"]["average_rating"].get("lte").is_none());
    }

    #[test]
    fn test_aggregation_always_requested() {
        let params = SearchParameters::new("desk")
            .with_product_class(Some("Desks".to_string()));
        let query = build_query(&params).unwrap();

        assert_eq!(query["aggs"]["product_class"]["terms"]["field"], "product_class");
        assert_eq!(query["aggs"]["product_class"]["terms"]["size"], 10);
    }

    #[test]
    fn test_size_cap_from_num_results() {
        let params = SearchParameters::new("desk").with_num_results(5);
        let query = build_query(&params).unwrap();
        assert_eq!(query["size"], 5);
    }

    #[test]
    fn test_empty_query_string_rejected() {
        let result = build_query(&SearchParameters::new(""));
        assert!(matches!(result, Err(QueryError::EmptyQueryString)));
    }

    #[test]
    fn test_whitespace_query_string_rejected() {
        let result = build_query(&SearchParameters::new("   "));
        assert!(matches!(result, Err(QueryError::EmptyQueryString)));
    }
}
