#![cfg(feature = "egui")]

use eframe::egui::{self, RichText};

use super::state::EguiView;
use crate::controller::UiEvent;
use crate::panel::CloseTrigger;
use crate::view::{CATEGORY_CAPTION, CardModel, ControlId, DocLink, PanelModel};

/// Draw one frame and collect what the user did.
pub(super) fn draw(ctx: &egui::Context, view: &mut EguiView, events: &mut Vec<UiEvent>) {
    egui::TopBottomPanel::top("search").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("CBP Systems Finder");
            ui.separator();
            let mut query = view.query.clone();
            let resp = ui.add(
                egui::TextEdit::singleline(&mut query)
                    .hint_text("Search systems, methods, products…")
                    .desired_width(360.0),
            );
            if resp.changed() {
                events.push(UiEvent::Input {
                    control: ControlId::Query,
                    value: query,
                });
            }
            if ui.button("Reset").clicked() {
                events.push(UiEvent::Reset);
            }
        });
    });

    egui::SidePanel::left("filters")
        .resizable(false)
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.label(RichText::new("Category").strong());
            for c in &view.categories {
                let resp = ui.radio(c.checked, c.name.as_str()).on_hover_text(CATEGORY_CAPTION);
                if resp.clicked() && !c.checked {
                    events.push(UiEvent::Input {
                        control: ControlId::Category,
                        value: c.name.clone(),
                    });
                }
            }
            ui.separator();
            for s in &view.selects {
                ui.label(RichText::new(s.label.as_str()).strong());
                egui::ComboBox::from_id_salt(s.control.key())
                    .selected_text(s.selected_label())
                    .width(220.0)
                    .show_ui(ui, |ui| {
                        for (value, label, selected) in s.choices() {
                            if ui.selectable_label(selected, label).clicked() && !selected {
                                events.push(UiEvent::Input {
                                    control: s.control,
                                    value: value.to_string(),
                                });
                            }
                        }
                    });
                ui.add_space(6.0);
            }
            ui.separator();
            if ui.button("Reset filters").clicked() {
                events.push(UiEvent::Reset);
            }
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.label(RichText::new(format!("{} systems", view.results.count)).strong());
        if view.results.show_empty() {
            ui.label("No systems match the current filters.");
            return;
        }
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                for card in &view.results.cards {
                    draw_card(ui, card, events);
                }
            });
    });

    let mut dismiss = false;
    match &view.panel {
        Some(panel) => draw_panel(ctx, panel, view.message.as_deref(), &mut dismiss, events),
        None => {
            if let Some(msg) = view.message.as_deref() {
                egui::Window::new("Notice")
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_TOP, [0.0, 16.0])
                    .show(ctx, |ui| {
                        ui.label(msg);
                        if ui.button("OK").clicked() {
                            dismiss = true;
                        }
                    });
            }
        }
    }
    if dismiss {
        view.message = None;
    }
}

fn draw_card(ui: &mut egui::Ui, card: &CardModel, events: &mut Vec<UiEvent>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new("CBP Method").weak());
                ui.label(RichText::new(card.cbp_method.as_str()).strong());
                ui.label(RichText::new("Industry Method").weak());
                ui.label(card.industry_method.as_str());
            });
            ui.separator();
            ui.vertical(|ui| {
                ui.label(RichText::new("Application Type").weak());
                ui.label(card.application_type.as_str());
                ui.label(RichText::new("Application Description").weak());
                ui.label(card.description_line.as_str());
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Download Now").clicked() {
                    events.push(UiEvent::Download(card.system_id.clone()));
                }
                if ui.button("View Documents").clicked() {
                    events.push(UiEvent::ViewDocuments(card.system_id.clone()));
                }
            });
        });
    });
    ui.add_space(4.0);
}

fn draw_panel(
    ctx: &egui::Context,
    panel: &PanelModel,
    message: Option<&str>,
    dismiss: &mut bool,
    events: &mut Vec<UiEvent>,
) {
    let escape = ctx.input(|i| i.key_pressed(egui::Key::Escape));
    let resp = egui::Modal::new(egui::Id::new("documents")).show(ctx, |ui| {
        ui.set_width(480.0);
        ui.heading(panel.title.as_str());
        ui.label(RichText::new(panel.subtitle.as_str()).weak());
        ui.separator();
        if panel.rows.is_empty() {
            ui.label("No documents.");
        }
        for (i, row) in panel.rows.iter().enumerate() {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(row.title.as_str()).strong());
                    ui.label(RichText::new(row.doc_type.as_str()).weak());
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let open = ui.button("Open");
                    let open = match &row.link {
                        DocLink::Url(url) => open.on_hover_text(url.as_str()),
                        DocLink::Placeholder => open,
                    };
                    if open.clicked() {
                        events.push(UiEvent::OpenDocument(i));
                    }
                });
            });
        }
        if let Some(msg) = message {
            ui.separator();
            ui.horizontal(|ui| {
                ui.label(RichText::new(msg).italics());
                if ui.small_button("OK").clicked() {
                    *dismiss = true;
                }
            });
        }
        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Download Package").clicked() {
                events.push(UiEvent::DownloadOpen);
            }
            if ui.button("Close").clicked() {
                events.push(UiEvent::Close(CloseTrigger::CloseButton));
            }
        });
    });
    if resp.should_close() {
        let trigger = if escape {
            CloseTrigger::Escape
        } else {
            CloseTrigger::Backdrop
        };
        events.push(UiEvent::Close(trigger));
    }
}
