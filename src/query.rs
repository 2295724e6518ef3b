//! Filter state and the query engine.
//!
//! The engine is a pure predicate over one record ([`matches`]) and an
//! order-preserving filter over the catalog ([`filter_records`]).

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::model::SystemRecord;

pub const DEFAULT_CATEGORY: &str = "Stone Tile";
pub const DEFAULT_APPLICATION: &str = "Exterior Floors";

/// Separator placed between haystack fields.
const HAYSTACK_SEPARATOR: &str = " | ";

/// The user's current filter selection. Empty strings mean "any".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: String,
    pub application: String,
    pub substrate: String,
    pub tile_type: String,
    pub query: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::with_defaults(DEFAULT_CATEGORY, DEFAULT_APPLICATION)
    }
}

impl FilterState {
    /// Start state for the given default category and application.
    pub fn with_defaults(category: &str, application: &str) -> Self {
        Self {
            category: category.to_string(),
            application: application.to_string(),
            substrate: String::new(),
            tile_type: String::new(),
            query: String::new(),
        }
    }

    /// A state that filters nothing.
    pub fn any() -> Self {
        Self::with_defaults("", "")
    }
}

/// Trim and lowercase.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Normalized query words; empty when the query is blank.
pub fn query_words(query: &str) -> Vec<String> {
    normalize(query)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Build the normalized search text of a record.
pub fn haystack(record: &SystemRecord) -> String {
    [
        record.system_id.as_str(),
        record.cbp_method.as_str(),
        record.industry_method.as_str(),
        record.category.as_str(),
        record.tile_type.as_str(),
        record.application_type.as_str(),
        record.substrate.as_str(),
        record.description.as_str(),
    ]
    .into_iter()
    .chain(record.keywords.iter().map(String::as_str))
    .chain(record.product_names())
    .map(normalize)
    .collect::<Vec<_>>()
    .join(HAYSTACK_SEPARATOR)
}

fn field_passes(wanted: &str, actual: &str) -> bool {
    wanted.is_empty() || wanted == actual
}

/// Whether `record` passes every active filter in `state`.
///
/// Category and secondary filters are exact, case-sensitive comparisons. Every
/// word of the query must occur as a substring of the record's haystack.
pub fn matches(record: &SystemRecord, state: &FilterState) -> bool {
    if !field_passes(&state.category, &record.category)
        || !field_passes(&state.application, &record.application_type)
        || !field_passes(&state.substrate, &record.substrate)
        || !field_passes(&state.tile_type, &record.tile_type)
    {
        return false;
    }

    let words = query_words(&state.query);
    if words.is_empty() {
        return true;
    }
    let hay = haystack(record);
    words.iter().all(|w| hay.contains(w.as_str()))
}

/// All matching records, in catalog order.
pub fn filter_records<'a>(catalog: &'a Catalog, state: &FilterState) -> Vec<&'a SystemRecord> {
    catalog
        .records()
        .iter()
        .filter(|r| matches(r, state))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn record() -> SystemRecord {
        let mut products = IndexMap::new();
        products.insert("mortar".to_string(), vec!["FlexBond Pro".to_string()]);
        SystemRecord {
            system_id: "ST-101".into(),
            cbp_method: "EF-101".into(),
            industry_method: "TCNA F101".into(),
            category: "Stone Tile".into(),
            application_type: "Exterior Floors".into(),
            substrate: "Concrete Slab".into(),
            tile_type: "Natural Stone".into(),
            description: "Bonded installation over concrete".into(),
            keywords: vec!["Granite".into()],
            products,
            documents: vec![],
        }
    }

    #[test]
    fn haystack_joins_normalized_fields_in_order() {
        let hay = haystack(&record());
        assert!(hay.starts_with("st-101 | ef-101 | tcna f101 | stone tile | natural stone"));
        assert!(hay.ends_with("granite | flexbond pro"));
    }

    #[test]
    fn query_is_trimmed_lowercased_and_split() {
        assert_eq!(query_words("  Stone\t  EXTERIOR \n"), vec!["stone", "exterior"]);
        assert!(query_words("   ").is_empty());
    }

    #[test]
    fn words_match_as_substrings_not_whole_words() {
        let mut st = FilterState::any();
        st.query = "gran conc".into();
        assert!(matches(&record(), &st));
        st.query = "flexbond".into();
        assert!(matches(&record(), &st));
    }

    #[test]
    fn every_word_must_be_present() {
        let mut st = FilterState::any();
        st.query = "granite wall".into();
        assert!(!matches(&record(), &st));
    }

    #[test]
    fn secondary_filters_are_exact_and_case_sensitive() {
        let mut st = FilterState::any();
        st.substrate = "concrete slab".into();
        assert!(!matches(&record(), &st));
        st.substrate = "Concrete Slab".into();
        assert!(matches(&record(), &st));
        st.tile_type = "Porcelain".into();
        assert!(!matches(&record(), &st));
    }

    #[test]
    fn unknown_category_matches_nothing() {
        let mut st = FilterState::any();
        st.category = "Nope".into();
        assert!(!matches(&record(), &st));
    }

    #[test]
    fn default_state_uses_fixed_defaults() {
        let st = FilterState::default();
        assert_eq!(st.category, DEFAULT_CATEGORY);
        assert_eq!(st.application, DEFAULT_APPLICATION);
        assert!(st.substrate.is_empty() && st.tile_type.is_empty() && st.query.is_empty());
    }
}
