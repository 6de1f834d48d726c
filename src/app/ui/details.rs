use eframe::egui::{Align, Layout, RichText, ScrollArea, Ui};

use crate::util::format_rejections;

use super::super::ViewModel;

struct HistoryRow {
    happened_at: String,
    summary: String,
    note: Option<String>,
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        let Some(selected_id) = self.selected.clone() else {
            return;
        };
        let Some(company) = self.board.company(&selected_id) else {
            // the board was reloaded and the company is gone
            self.selected = None;
            return;
        };

        let name = company.name.clone();
        let url = company.url.clone();
        let rejections = self.board.rejections_for(&selected_id);
        let history = self
            .board
            .events_for(&selected_id)
            .into_iter()
            .map(|event| {
                let summary = match &event.stage {
                    Some(stage) => format!("{} ({stage})", event.kind.label()),
                    None => event.kind.label().to_owned(),
                };
                HistoryRow {
                    happened_at: event.happened_at.clone(),
                    summary,
                    note: event.note.clone(),
                }
            })
            .collect::<Vec<_>>();

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.heading(&name);
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Close").clicked() {
                    self.select_company(None);
                }
            });
        });

        ui.label(format_rejections(rejections));
        if let Some(url) = &url {
            ui.hyperlink_to(url.clone(), url.clone());
        }

        ui.separator();
        ui.label(RichText::new("History").strong());
        ui.add_space(4.0);

        if history.is_empty() {
            ui.label("No events logged yet");
            return;
        }

        ScrollArea::vertical().show(ui, |ui| {
            for row in &history {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&row.happened_at).weak());
                    ui.label(&row.summary);
                });
                if let Some(note) = &row.note {
                    ui.label(RichText::new(note).weak().italics());
                }
                ui.add_space(2.0);
            }
        });
    }
}
