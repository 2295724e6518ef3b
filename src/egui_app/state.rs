#![cfg(feature = "egui")]

use eframe::egui;
use tracing::warn;

use crate::controller::{Controller, UiEvent};
use crate::panel::LinkOpener;
use crate::query::FilterState;
use crate::view::{
    CategoryChoice, Notice, PanelModel, ResultsModel, SelectModel, View, sync_models,
};

/// Holds the latest models so the next frame can draw them.
#[derive(Debug, Clone, Default)]
pub struct EguiView {
    pub categories: Vec<CategoryChoice>,
    pub selects: Vec<SelectModel>,
    pub query: String,
    pub results: ResultsModel,
    pub panel: Option<PanelModel>,
    /// Message shown until the user dismisses it.
    pub message: Option<String>,
}

impl View for EguiView {
    fn render_categories(&mut self, choices: &[CategoryChoice]) {
        self.categories = choices.to_vec();
    }

    fn render_options(&mut self, selects: &[SelectModel]) {
        self.selects = selects.to_vec();
    }

    fn sync_controls(&mut self, state: &FilterState) {
        self.query = state.query.clone();
        sync_models(&mut self.categories, &mut self.selects, state);
    }

    fn render_results(&mut self, results: &ResultsModel) {
        self.results = results.clone();
    }

    fn render_panel(&mut self, panel: Option<&PanelModel>) {
        self.panel = panel.cloned();
    }

    fn notify(&mut self, notice: &Notice) {
        self.message = Some(notice.message());
    }
}

/// Opens links through egui, which asks the platform for a new tab/window.
pub struct EguiLinkOpener {
    ctx: egui::Context,
}

impl EguiLinkOpener {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl LinkOpener for EguiLinkOpener {
    fn open(&mut self, url: &str) -> anyhow::Result<()> {
        self.ctx.open_url(egui::OpenUrl::new_tab(url));
        Ok(())
    }
}

/// Interactive finder window.
pub struct FinderApp {
    controller: Controller<EguiView>,
}

impl FinderApp {
    pub fn new(controller: Controller<EguiView>) -> Self {
        Self { controller }
    }
}

impl eframe::App for FinderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events: Vec<UiEvent> = Vec::new();
        super::ui::draw(ctx, self.controller.view_mut(), &mut events);
        for event in events {
            if let Err(e) = self.controller.handle(event) {
                warn!("{e:#}");
                self.controller.view_mut().message = Some(format!("Error: {e}"));
            }
        }
    }
}
