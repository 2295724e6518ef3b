//! Catalog store: the loaded records, the category list, and the option sets
//! derived from them. Built once and read-only afterwards.

mod source;

pub use source::{DataSource, FsSource, LoadError, ReaderSource, read_catalog_doc};

use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::model::{CatalogDoc, SystemRecord};

/// Distinct, non-empty, ascending values of the three secondary attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSets {
    pub applications: Vec<String>,
    pub substrates: Vec<String>,
    pub tile_types: Vec<String>,
}

/// The validated, immutable catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<SystemRecord>,
    categories: Vec<String>,
    /// `system_id` → position in `records`.
    index: IndexMap<String, usize>,
    options: OptionSets,
}

impl Catalog {
    /// Build a catalog from a parsed document, rejecting duplicate identifiers.
    pub fn from_doc(doc: CatalogDoc) -> Result<Self, LoadError> {
        let mut index = IndexMap::with_capacity(doc.systems.len());
        for (i, rec) in doc.systems.iter().enumerate() {
            if index.insert(rec.system_id.clone(), i).is_some() {
                return Err(LoadError::DuplicateId(rec.system_id.clone()));
            }
        }
        let options = OptionSets {
            applications: distinct_values(&doc.systems, |r| &r.application_type),
            substrates: distinct_values(&doc.systems, |r| &r.substrate),
            tile_types: distinct_values(&doc.systems, |r| &r.tile_type),
        };
        debug!(
            applications = options.applications.len(),
            substrates = options.substrates.len(),
            tile_types = options.tile_types.len(),
            "derived option sets"
        );
        Ok(Self {
            records: doc.systems,
            categories: doc.categories,
            index,
            options,
        })
    }

    /// Acquire the catalog from an external data source.
    pub fn load(source: &mut dyn DataSource) -> Result<Self, LoadError> {
        let doc = read_catalog_doc(source)?;
        let catalog = Self::from_doc(doc)?;
        info!(
            origin = %source.origin(),
            systems = catalog.records.len(),
            categories = catalog.categories.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn records(&self) -> &[SystemRecord] {
        &self.records
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn options(&self) -> &OptionSets {
        &self.options
    }

    /// Look up a record by its identifier.
    pub fn find(&self, system_id: &str) -> Option<&SystemRecord> {
        self.index.get(system_id).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Distinct non-empty values of one field, sorted ascending.
pub fn distinct_values<F>(records: &[SystemRecord], field: F) -> Vec<String>
where
    F: Fn(&SystemRecord) -> &String,
{
    records
        .iter()
        .map(field)
        .filter(|v| !v.is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, app: &str, sub: &str) -> SystemRecord {
        SystemRecord {
            system_id: id.into(),
            application_type: app.into(),
            substrate: sub.into(),
            ..Default::default()
        }
    }

    #[test]
    fn options_are_distinct_sorted_and_non_empty() {
        let doc = CatalogDoc {
            categories: vec!["Stone Tile".into()],
            systems: vec![
                rec("a", "Interior Walls", "Concrete"),
                rec("b", "Exterior Floors", ""),
                rec("c", "Interior Walls", "Wood"),
                rec("d", "", "Concrete"),
            ],
        };
        let cat = Catalog::from_doc(doc).unwrap();
        assert_eq!(
            cat.options().applications,
            vec!["Exterior Floors", "Interior Walls"]
        );
        assert_eq!(cat.options().substrates, vec!["Concrete", "Wood"]);
        assert!(cat.options().tile_types.is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let doc = CatalogDoc {
            categories: vec![],
            systems: vec![rec("a", "", ""), rec("a", "", "")],
        };
        let err = Catalog::from_doc(doc).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateId(ref id) if id == "a"));
    }

    #[test]
    fn find_by_id() {
        let doc = CatalogDoc {
            categories: vec![],
            systems: vec![rec("a", "", ""), rec("b", "X", "")],
        };
        let cat = Catalog::from_doc(doc).unwrap();
        assert_eq!(cat.find("b").map(|r| r.application_type.as_str()), Some("X"));
        assert!(cat.find("zzz").is_none());
    }

    #[test]
    fn categories_are_not_derived_from_records() {
        let doc = CatalogDoc {
            categories: vec!["Stone Tile".into(), "Glass Tile".into()],
            systems: vec![],
        };
        let cat = Catalog::from_doc(doc).unwrap();
        assert_eq!(cat.categories(), ["Stone Tile", "Glass Tile"]);
        assert!(cat.is_empty());
    }

    #[test]
    fn load_reports_malformed_json() {
        let mut src = ReaderSource::new("<test>", "{ not json".as_bytes());
        let err = Catalog::load(&mut src).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
        assert!(err.to_string().contains("<test>"));
    }
}
