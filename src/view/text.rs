//! Plain terminal renderer used by the CLI.

use std::borrow::Cow;
use std::fmt::Write as _;

use super::{
    CategoryChoice, DocLink, Notice, PanelModel, ResultsModel, SelectModel, View, sync_models,
};
use crate::query::FilterState;

/// Replace control characters (escape sequences, newlines, ...) with spaces so
/// catalog text cannot drive the terminal.
pub fn terminal_safe(s: &str) -> Cow<'_, str> {
    if s.chars().any(char::is_control) {
        Cow::Owned(
            s.chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(s)
    }
}

/// Accumulates rendered regions as plain text.
#[derive(Debug, Clone, Default)]
pub struct TextView {
    pub choices: Vec<CategoryChoice>,
    pub selects: Vec<SelectModel>,
    pub results: String,
    pub panel: String,
    pub notices: Vec<String>,
    pub query: String,
}

impl TextView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories_text(&self) -> String {
        let mut out = String::new();
        for c in &self.choices {
            let mark = if c.checked { "(x)" } else { "( )" };
            let _ = writeln!(out, "{mark} {}", terminal_safe(&c.name));
        }
        out
    }

    pub fn options_text(&self) -> String {
        let mut out = String::new();
        for s in &self.selects {
            let _ = writeln!(out, "{} [{}]:", s.label, terminal_safe(s.selected_label()));
            for (_, label, selected) in s.choices() {
                let mark = if selected { '*' } else { ' ' };
                let _ = writeln!(out, "  {mark} {}", terminal_safe(label));
            }
        }
        out
    }
}

impl View for TextView {
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
        self.results.clear();
        let _ = writeln!(self.results, "{} systems", results.count);
        if results.show_empty() {
            let _ = writeln!(self.results, "No systems match the current filters.");
            return;
        }
        for card in &results.cards {
            let _ = writeln!(self.results);
            let _ = writeln!(self.results, "[{}]", terminal_safe(&card.system_id));
            let _ = writeln!(self.results, "  CBP Method:       {}", terminal_safe(&card.cbp_method));
            let _ = writeln!(self.results, "  Industry Method:  {}", terminal_safe(&card.industry_method));
            let _ = writeln!(self.results, "  Application Type: {}", terminal_safe(&card.application_type));
            let _ = writeln!(self.results, "  {}", terminal_safe(&card.description_line));
        }
    }

    fn render_panel(&mut self, panel: Option<&PanelModel>) {
        self.panel.clear();
        let Some(p) = panel else { return };
        let _ = writeln!(self.panel, "{}", terminal_safe(&p.title));
        let _ = writeln!(self.panel, "{}", terminal_safe(&p.subtitle));
        for (i, row) in p.rows.iter().enumerate() {
            let target = match &row.link {
                DocLink::Url(url) => terminal_safe(url),
                DocLink::Placeholder => Cow::Borrowed("(no link)"),
            };
            let _ = writeln!(
                self.panel,
                "  {:>2}. [{}] {} - {}",
                i + 1,
                terminal_safe(&row.doc_type),
                terminal_safe(&row.title),
                target
            );
        }
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(terminal_safe(&notice.message()).into_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::CardModel;

    #[test]
    fn control_sequences_do_not_reach_the_terminal() {
        let mut v = TextView::new();
        v.render_results(&ResultsModel {
            count: 1,
            cards: vec![CardModel {
                system_id: "S-1".into(),
                cbp_method: "\u{1b}[31mred\u{1b}[0m".into(),
                industry_method: "line\nbreak".into(),
                application_type: "Floors".into(),
                description_line: "a\u{7}b".into(),
            }],
        });
        assert!(!v.results.contains('\u{1b}'));
        assert!(!v.results.contains('\u{7}'));
        assert!(v.results.contains("CBP Method:        [31mred [0m"));
        assert!(v.results.contains("line break"));
    }

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(terminal_safe("Stone Tile"), Cow::Borrowed("Stone Tile")));
    }
}
