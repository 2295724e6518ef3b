//! The controller owns the filter state and keeps the view in step with it.
//!
//! Startup is a strict sequence (see [`Controller::init`]): the catalog is
//! acquired, controls are populated and pre-selected from the default state,
//! input handlers are subscribed, and the first result list is drawn. After
//! that the filter state changes only through the named setters, each of
//! which re-renders.

use anyhow::Result;
use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::model::SystemRecord;
use crate::panel::{
    CloseTrigger, DocumentsPanel, ExportArtifact, ExportSink, LinkOpener, LinkOutcome,
    export_record,
};
use crate::query::{FilterState, filter_records};
use crate::view::{ControlId, Notice, ResultsModel, View, category_choices, select_models};

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A control's value changed.
    Input { control: ControlId, value: String },
    /// Either reset button.
    Reset,
    /// "View documents" on a card.
    ViewDocuments(String),
    /// "Download" on a card.
    Download(String),
    /// "Open" on the N-th row of the documents dialog.
    OpenDocument(usize),
    /// "Download" inside the documents dialog.
    DownloadOpen,
    Close(CloseTrigger),
}

/// Input handler registered for one control.
pub type Handler<V> = fn(&mut Controller<V>, String);

pub struct Controller<V: View> {
    catalog: Catalog,
    state: FilterState,
    defaults: FilterState,
    view: V,
    panel: DocumentsPanel,
    sink: Box<dyn ExportSink>,
    opener: Box<dyn LinkOpener>,
    subscriptions: Vec<(ControlId, Handler<V>)>,
}

impl<V: View> Controller<V> {
    /// A controller with nothing drawn and no handlers subscribed.
    pub fn new(
        catalog: Catalog,
        defaults: FilterState,
        view: V,
        sink: Box<dyn ExportSink>,
        opener: Box<dyn LinkOpener>,
    ) -> Self {
        Self {
            catalog,
            state: defaults.clone(),
            defaults,
            view,
            panel: DocumentsPanel::new(),
            sink,
            opener,
            subscriptions: Vec::new(),
        }
    }

    /// Build a fully initialized controller: populate, wire, first render.
    pub fn init(
        catalog: Catalog,
        defaults: FilterState,
        view: V,
        sink: Box<dyn ExportSink>,
        opener: Box<dyn LinkOpener>,
    ) -> Self {
        let mut c = Self::new(catalog, defaults, view, sink, opener);
        c.populate();
        c.wire();
        let count = c.render();
        debug!(count, "initial render");
        c
    }

    /// Draw the category list and the option lists, pre-selected from the
    /// current state.
    pub fn populate(&mut self) {
        let choices = category_choices(&self.catalog, &self.state);
        self.view.render_categories(&choices);
        let selects = select_models(&self.catalog, &self.state);
        self.view.render_options(&selects);
        self.view.sync_controls(&self.state);
    }

    /// Subscribe the named setter of every control.
    pub fn wire(&mut self) {
        self.subscribe(ControlId::Query, |c, v| c.set_query(v));
        self.subscribe(ControlId::Category, |c, v| c.set_category(v));
        self.subscribe(ControlId::Application, |c, v| c.set_application(v));
        self.subscribe(ControlId::Substrate, |c, v| c.set_substrate(v));
        self.subscribe(ControlId::TileType, |c, v| c.set_tile_type(v));
    }

    pub fn subscribe(&mut self, control: ControlId, handler: Handler<V>) {
        self.subscriptions.push((control, handler));
    }

    pub fn is_wired(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Recompute the result list and redraw it. Returns the match count.
    pub fn render(&mut self) -> usize {
        let results = ResultsModel::from_records(&filter_records(&self.catalog, &self.state));
        self.view.render_results(&results);
        results.count
    }

    pub fn set_category(&mut self, name: impl Into<String>) {
        self.state.category = name.into();
        self.after_change();
    }

    pub fn set_application(&mut self, value: impl Into<String>) {
        self.state.application = value.into();
        self.after_change();
    }

    pub fn set_substrate(&mut self, value: impl Into<String>) {
        self.state.substrate = value.into();
        self.after_change();
    }

    pub fn set_tile_type(&mut self, value: impl Into<String>) {
        self.state.tile_type = value.into();
        self.after_change();
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.state.query = text.into();
        self.after_change();
    }

    fn after_change(&mut self) {
        self.view.sync_controls(&self.state);
        let count = self.render();
        trace!(state = ?self.state, count, "filters changed");
    }

    /// Restore the default filters, resync every control and re-render.
    pub fn reset(&mut self) {
        self.state = self.defaults.clone();
        self.view.sync_controls(&self.state);
        self.render();
        debug!("filters reset");
    }

    /// Route one user event.
    pub fn handle(&mut self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::Input { control, value } => self.dispatch(control, value),
            UiEvent::Reset => self.reset(),
            UiEvent::ViewDocuments(id) => {
                self.open_documents(&id);
            }
            UiEvent::Download(id) => {
                self.download(&id)?;
            }
            UiEvent::OpenDocument(index) => {
                self.open_document(index)?;
            }
            UiEvent::DownloadOpen => {
                self.download_open()?;
            }
            UiEvent::Close(trigger) => self.close(trigger),
        }
        Ok(())
    }

    fn dispatch(&mut self, control: ControlId, value: String) {
        let handlers: Vec<Handler<V>> = self
            .subscriptions
            .iter()
            .filter(|(c, _)| *c == control)
            .map(|(_, h)| *h)
            .collect();
        if handlers.is_empty() {
            debug!(?control, "input ignored, no handler subscribed");
            return;
        }
        for h in handlers {
            h(self, value.clone());
        }
    }

    /// Show the documents of the record with `system_id`. Unknown ids do
    /// nothing.
    pub fn open_documents(&mut self, system_id: &str) -> bool {
        let Some(record) = self.catalog.find(system_id) else {
            debug!(system_id, "documents requested for unknown system");
            return false;
        };
        let model = self.panel.open(record);
        self.view.render_panel(Some(model));
        true
    }

    pub fn close(&mut self, trigger: CloseTrigger) {
        if self.panel.close(trigger) {
            self.view.render_panel(None);
        }
    }

    /// Activate the N-th document link of the open dialog.
    pub fn open_document(&mut self, index: usize) -> Result<Option<LinkOutcome>> {
        let outcome = self.panel.activate_link(index, self.opener.as_mut())?;
        if outcome == Some(LinkOutcome::NoRealLink) {
            self.view.notify(&Notice::NoRealLink);
        }
        Ok(outcome)
    }

    /// Export the record with `system_id` to the sink. Unknown ids do nothing.
    pub fn download(&mut self, system_id: &str) -> Result<Option<ExportArtifact>> {
        let Some(record) = self.catalog.find(system_id) else {
            debug!(system_id, "download requested for unknown system");
            return Ok(None);
        };
        let artifact = export_record(record);
        self.sink.deliver(&artifact)?;
        self.view.notify(&Notice::Exported {
            filename: artifact.filename.clone(),
        });
        Ok(Some(artifact))
    }

    /// Export the record whose documents are currently open.
    pub fn download_open(&mut self) -> Result<Option<ExportArtifact>> {
        match self.panel.open_system_id().map(str::to_string) {
            Some(id) => self.download(&id),
            None => Ok(None),
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn panel(&self) -> &DocumentsPanel {
        &self.panel
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Records matching the current state.
    pub fn results(&self) -> Vec<&SystemRecord> {
        filter_records(&self.catalog, &self.state)
    }
}
