//! Toolkit-independent view layer.
//!
//! The controller projects the catalog, the filter state and the query result
//! into the plain models below and hands them to a [`View`]. Implementations
//! decide how to draw them: [`HtmlView`] produces markup, [`TextView`] produces
//! terminal text, and the egui viewer keeps them for its next frame.

mod html;
mod text;

pub use html::{HtmlView, render_page};
pub use text::{TextView, terminal_safe};

use serde::Serialize;

use crate::catalog::Catalog;
use crate::model::SystemRecord;
use crate::query::FilterState;

/// Caption shown under every category choice.
pub const CATEGORY_CAPTION: &str = "Filter systems by category";
/// Label of the "no filter" choice in every select.
pub const ANY_LABEL: &str = "Any";
/// Separator between the parts of a card's description line.
pub const DESCRIPTION_SEPARATOR: &str = " • ";

/// Identifies one input control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ControlId {
    Query,
    Category,
    Application,
    Substrate,
    TileType,
}

impl ControlId {
    /// Element id / key used by renderers.
    pub fn key(self) -> &'static str {
        match self {
            ControlId::Query => "q",
            ControlId::Category => "category",
            ControlId::Application => "application",
            ControlId::Substrate => "substrate",
            ControlId::TileType => "tileType",
        }
    }
}

/// One radio-style choice in the category list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryChoice {
    pub name: String,
    pub element_id: String,
    pub checked: bool,
}

impl CategoryChoice {
    pub fn new(name: &str, selected: &str) -> Self {
        Self {
            name: name.to_string(),
            element_id: category_element_id(name),
            checked: name == selected,
        }
    }
}

/// `"cat_"` followed by the name with each run of non-word characters
/// collapsed into `_`.
pub fn category_element_id(name: &str) -> String {
    let mut id = String::from("cat_");
    let mut in_run = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            id.push(ch);
            in_run = false;
        } else if !in_run {
            id.push('_');
            in_run = true;
        }
    }
    id
}

/// A select control: the "any" choice plus the distinct values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectModel {
    pub control: ControlId,
    pub label: String,
    pub values: Vec<String>,
    pub selected: String,
}

impl SelectModel {
    /// `(value, label, selected)` for each choice to draw.
    ///
    /// A selected value that is missing from `values` is appended so the
    /// control never hides an active filter.
    pub fn choices(&self) -> Vec<(&str, &str, bool)> {
        let mut out = Vec::with_capacity(self.values.len() + 2);
        out.push(("", ANY_LABEL, self.selected.is_empty()));
        for v in &self.values {
            out.push((v.as_str(), v.as_str(), *v == self.selected));
        }
        if !self.selected.is_empty() && !self.values.contains(&self.selected) {
            out.push((self.selected.as_str(), self.selected.as_str(), true));
        }
        out
    }

    pub fn selected_label(&self) -> &str {
        if self.selected.is_empty() {
            ANY_LABEL
        } else {
            &self.selected
        }
    }
}

/// What one result card shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardModel {
    pub system_id: String,
    pub cbp_method: String,
    pub industry_method: String,
    pub application_type: String,
    /// `substrate • tile type • description`.
    pub description_line: String,
}

impl From<&SystemRecord> for CardModel {
    fn from(r: &SystemRecord) -> Self {
        Self {
            system_id: r.system_id.clone(),
            cbp_method: r.cbp_method.clone(),
            industry_method: r.industry_method.clone(),
            application_type: r.application_type.clone(),
            description_line: [
                r.substrate.as_str(),
                r.tile_type.as_str(),
                r.description.as_str(),
            ]
            .join(DESCRIPTION_SEPARATOR),
        }
    }
}

/// The result region: count, empty indicator and cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultsModel {
    pub count: usize,
    pub cards: Vec<CardModel>,
}

impl ResultsModel {
    pub fn from_records(records: &[&SystemRecord]) -> Self {
        Self {
            count: records.len(),
            cards: records.iter().map(|r| CardModel::from(*r)).collect(),
        }
    }

    /// The empty-state indicator is shown exactly when nothing matched.
    pub fn show_empty(&self) -> bool {
        self.count == 0
    }
}

/// Where a document's "open" action leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DocLink {
    Url(String),
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRow {
    pub title: String,
    pub doc_type: String,
    pub link: DocLink,
}

/// Contents of the documents dialog for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelModel {
    pub system_id: String,
    pub title: String,
    pub subtitle: String,
    pub rows: Vec<DocumentRow>,
}

/// A one-off message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Notice {
    /// A document without a real URL was activated.
    NoRealLink,
    /// An export artifact was handed to the sink.
    Exported { filename: String },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::NoRealLink => "Demo link. Replace '#' with real PDF/DWG URLs.".to_string(),
            Notice::Exported { filename } => format!("Saved {filename}"),
        }
    }
}

/// A renderer for the finder UI. Every method receives plain data and fully
/// replaces the region it draws.
pub trait View {
    /// Draw the category list.
    fn render_categories(&mut self, choices: &[CategoryChoice]);
    /// Draw (or re-populate) the three secondary selects.
    fn render_options(&mut self, selects: &[SelectModel]);
    /// Make every control display the given state.
    fn sync_controls(&mut self, state: &FilterState);
    /// Draw count, empty indicator and cards.
    fn render_results(&mut self, results: &ResultsModel);
    /// Show the documents dialog, or hide it for `None`.
    fn render_panel(&mut self, panel: Option<&PanelModel>);
    /// Surface a message to the user.
    fn notify(&mut self, notice: &Notice);
}

/// Category choices for the current selection.
pub fn category_choices(catalog: &Catalog, state: &FilterState) -> Vec<CategoryChoice> {
    catalog
        .categories()
        .iter()
        .map(|c| CategoryChoice::new(c, &state.category))
        .collect()
}

/// Select models for the three secondary filters.
pub fn select_models(catalog: &Catalog, state: &FilterState) -> Vec<SelectModel> {
    let opts = catalog.options();
    vec![
        SelectModel {
            control: ControlId::Application,
            label: "Application".to_string(),
            values: opts.applications.clone(),
            selected: state.application.clone(),
        },
        SelectModel {
            control: ControlId::Substrate,
            label: "Substrate".to_string(),
            values: opts.substrates.clone(),
            selected: state.substrate.clone(),
        },
        SelectModel {
            control: ControlId::TileType,
            label: "Tile Type".to_string(),
            values: opts.tile_types.clone(),
            selected: state.tile_type.clone(),
        },
    ]
}

/// Update checked/selected flags of already rendered controls to `state`.
pub fn sync_models(choices: &mut [CategoryChoice], selects: &mut [SelectModel], state: &FilterState) {
    for c in choices {
        c.checked = c.name == state.category;
    }
    for s in selects {
        s.selected = match s.control {
            ControlId::Application => state.application.clone(),
            ControlId::Substrate => state.substrate.clone(),
            ControlId::TileType => state.tile_type.clone(),
            ControlId::Query | ControlId::Category => continue,
        };
    }
}
