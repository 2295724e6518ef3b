//! Egui-based interactive finder (feature = "egui").

#![cfg(feature = "egui")]

mod state;
mod ui;

pub use state::{EguiLinkOpener, EguiView, FinderApp};

use eframe::egui;

use crate::catalog::Catalog;
use crate::config::FinderConfig;
use crate::controller::Controller;
use crate::panel::DirSink;

/// Open the finder window and block until it is closed.
pub fn run(catalog: Catalog, config: &FinderConfig) -> anyhow::Result<()> {
    let defaults = config.default_filters();
    let export_dir = config.export_dir.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "CBP Systems Finder",
        options,
        Box::new(move |cc| {
            let opener = EguiLinkOpener::new(cc.egui_ctx.clone());
            let controller = Controller::init(
                catalog,
                defaults,
                EguiView::default(),
                Box::new(DirSink::new(&export_dir)),
                Box::new(opener),
            );
            Ok(Box::new(FinderApp::new(controller)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}
