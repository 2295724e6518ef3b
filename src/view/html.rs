//! Static HTML renderer.
//!
//! Every interpolated value goes through `html_escape`: text content with
//! [`encode_text`], attribute values with [`encode_double_quoted_attribute`].

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use super::{
    CATEGORY_CAPTION, CategoryChoice, DocLink, Notice, PanelModel, ResultsModel, SelectModel,
    View, sync_models,
};
use crate::query::FilterState;

/// Keeps the latest model of every region and turns them into markup.
#[derive(Debug, Clone, Default)]
pub struct HtmlView {
    pub choices: Vec<CategoryChoice>,
    pub selects: Vec<SelectModel>,
    pub query: String,
    pub results: ResultsModel,
    pub panel: Option<PanelModel>,
    pub notices: Vec<Notice>,
}

impl HtmlView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories_html(&self) -> String {
        let mut out = String::new();
        for c in &self.choices {
            let _ = write!(
                out,
                r#"<label class="radioItem" for="{id}">
  <input type="radio" name="category" id="{id}" value="{value}"{checked} />
  <div><span>{name}</span><div><small>{caption}</small></div></div>
</label>
"#,
                id = attr(&c.element_id),
                value = attr(&c.name),
                checked = if c.checked { " checked" } else { "" },
                name = text(&c.name),
                caption = CATEGORY_CAPTION,
            );
        }
        out
    }

    pub fn select_html(select: &SelectModel) -> String {
        let mut out = format!(
            r#"<select id="{}" aria-label="{}">"#,
            select.control.key(),
            attr(&select.label)
        );
        for (value, label, selected) in select.choices() {
            let _ = write!(
                out,
                r#"<option value="{}"{}>{}</option>"#,
                attr(value),
                if selected { " selected" } else { "" },
                text(label)
            );
        }
        out.push_str("</select>");
        out
    }

    pub fn count_text(&self) -> String {
        self.results.count.to_string()
    }

    pub fn results_html(&self) -> String {
        let mut out = String::new();
        for card in &self.results.cards {
            let id = attr(&card.system_id);
            let _ = write!(
                out,
                r#"<div class="card">
  <div class="cardGrid">
    <div class="kv">
      <div class="k">CBP Method</div>
      <div class="v">{cbp}</div>
      <div class="k">Industry Method</div>
      <div class="v">{industry}</div>
    </div>
    <div>
      <div class="kv">
        <div class="k">Application Type</div>
        <div class="v">{application}</div>
      </div>
      <div class="kv">
        <div class="k">Application Description</div>
        <div class="desc">{desc}</div>
      </div>
    </div>
    <div class="actions">
      <button class="btn ghost" data-action="docs" data-id="{id}">View Documents</button>
      <button class="btn primary" data-action="download" data-id="{id}">Download Now</button>
    </div>
  </div>
</div>
"#,
                cbp = text(&card.cbp_method),
                industry = text(&card.industry_method),
                application = text(&card.application_type),
                desc = text(&card.description_line),
                id = id,
            );
        }
        out
    }

    pub fn notices_html(&self) -> String {
        let mut out = String::new();
        for n in &self.notices {
            let _ = writeln!(out, r#"<div class="notice">{}</div>"#, text(&n.message()));
        }
        out
    }

    pub fn panel_html(&self) -> String {
        let Some(panel) = &self.panel else {
            return String::from(r#"<div id="modalBackdrop" class="modalBackdrop hidden"></div>"#);
        };
        let no_link = Notice::NoRealLink.message();
        let mut rows = String::new();
        for (i, row) in panel.rows.iter().enumerate() {
            // Placeholder rows get no href so they cannot navigate anywhere.
            let action = match &row.link {
                DocLink::Url(url) => format!(
                    r#"<a class="btn ghost" data-open="{i}" href="{}" target="_blank" rel="noopener noreferrer">Open</a>"#,
                    attr(url)
                ),
                DocLink::Placeholder => format!(
                    r#"<button class="btn ghost" data-open="{i}" type="button" disabled title="{}">Open</button><small class="noLink">{}</small>"#,
                    attr(&no_link),
                    text(&no_link)
                ),
            };
            let _ = write!(
                rows,
                r#"<div class="docRow">
  <div class="docMeta"><div class="docTitle">{title}</div><div class="docType">{ty}</div></div>
  {action}
</div>
"#,
                title = text(&row.title),
                ty = text(&row.doc_type),
            );
        }
        format!(
            r#"<div id="modalBackdrop" class="modalBackdrop">
<div class="modal" role="dialog" aria-modal="true">
  <div class="modalHead">
    <div><div id="modalTitle">{title}</div><div id="modalSub">{sub}</div></div>
    <button id="closeModal" class="btn ghost" data-action="close">Close</button>
  </div>
  <div id="modalBody">
{rows}  </div>
  <button id="modalDownload" class="btn primary" data-action="download" data-id="{id}">Download Package</button>
</div>
</div>"#,
            title = text(&panel.title),
            sub = text(&panel.subtitle),
            id = attr(&panel.system_id),
        )
    }
}

impl View for HtmlView {
    fn render_categories(&mut self, choices: &[CategoryChoice]) {
        self.choices = choices.to_vec();
    }

    fn render_options(&mut self, selects: &[SelectModel]) {
        self.selects = selects.to_vec();
    }

    fn sync_controls(&mut self, state: &FilterState) {
        self.query = state.query.clone();
        sync_models(&mut self.choices, &mut self.selects, state);
    }

    fn render_results(&mut self, results: &ResultsModel) {
        self.results = results.clone();
    }

    fn render_panel(&mut self, panel: Option<&PanelModel>) {
        self.panel = panel.cloned();
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}

/// Compose a standalone page from the regions of `view`.
pub fn render_page(view: &HtmlView, title: &str) -> String {
    let selects: String = view.selects.iter().map(HtmlView::select_html).collect();
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="referrer" content="no-referrer" />
<title>{title}</title>
<style>.hidden{{display:none}}</style>
</head>
<body>
<header>
  <h1>{title}</h1>
  <input id="q" type="search" placeholder="Search systems, methods, products…" value="{query}" />
  <button id="resetBtn" data-action="reset">Reset</button>
</header>
<aside>
  <div id="catList">
{categories}</div>
  <div id="filters">{selects}</div>
  <button id="resetSideBtn" data-action="reset">Reset filters</button>
</aside>
<main>
  <div class="resultHead"><span id="count">{count}</span> systems</div>
  <div id="empty" class="empty{empty_class}">No systems match the current filters.</div>
  <div id="results">
{results}</div>
</main>
<div id="notices" role="status">
{notices}</div>
{panel}
</body>
</html>
"#,
        title = text(title),
        query = attr(&view.query),
        categories = view.categories_html(),
        selects = selects,
        count = view.count_text(),
        empty_class = if view.results.show_empty() { "" } else { " hidden" },
        results = view.results_html(),
        notices = view.notices_html(),
        panel = view.panel_html(),
    )
}
