use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// CatalogDoc – the raw JSON document
// ────────────────────────────────────────────────────────────────────────────

/// Top-level shape of the catalog JSON document.
///
/// `categories` is supplied separately from the records and may name
/// categories that no record uses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDoc {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub systems: Vec<SystemRecord>,
}

// ────────────────────────────────────────────────────────────────────────────
// SystemRecord
// ────────────────────────────────────────────────────────────────────────────

/// One installation system in the catalog.
///
/// Missing or `null` fields load as empty strings and empty collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub system_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cbp_method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub industry_method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub application_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub substrate: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tile_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    /// Role name (e.g. `"mortar"`) to product names. Keeps the JSON key order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: IndexMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub documents: Vec<Document>,
}

impl SystemRecord {
    /// Iterate every product name across all roles, in mapping order.
    pub fn product_names(&self) -> impl Iterator<Item = &str> {
        self.products.values().flatten().map(String::as_str)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// A document attached to a system (data sheet, drawing, installation guide, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Type label shown next to the title, e.g. `"PDF"` or `"DWG"`.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub doc_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Document {
    /// The URL if it points somewhere real.
    ///
    /// Only absolute `http` and `https` URLs qualify. `None`, blank strings,
    /// the `"#"` placeholder and every other scheme count as "no link".
    pub fn real_url(&self) -> Option<&str> {
        let url = self.url.as_deref()?.trim();
        let (scheme, rest) = url.split_once("://")?;
        let web = scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https");
        (web && !rest.is_empty() && !url.chars().any(char::is_control)).then_some(url)
    }
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
