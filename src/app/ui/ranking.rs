use eframe::egui::{self, ScrollArea, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::ViewModel;

struct RankedRow {
    company_id: String,
    name: String,
    rejections: u32,
}

impl ViewModel {
    pub(in crate::app) fn draw_ranking(&mut self, ui: &mut Ui) {
        ui.add_space(6.0);
        ui.heading("Top by rejections");
        ui.add_space(4.0);
        ui.add(egui::TextEdit::singleline(&mut self.search).hint_text("search companies"));
        ui.separator();

        let rows = self.ranked_rows();
        if rows.is_empty() {
            if self.search.trim().is_empty() {
                ui.label("No companies yet");
            } else {
                ui.label("No company matches the search");
            }
            return;
        }

        let mut hovered_row: Option<String> = None;
        ScrollArea::vertical().show(ui, |ui| {
            for row in &rows {
                let emphasized = self.highlighted.as_deref() == Some(row.company_id.as_str())
                    || self.hovered_company.as_deref() == Some(row.company_id.as_str());

                let response = ui.selectable_label(
                    emphasized,
                    format!("{}  ({})", row.name, row.rejections),
                );
                if response.hovered() {
                    hovered_row = Some(row.company_id.clone());
                }
                if response.clicked() {
                    self.select_company(Some(row.company_id.clone()));
                }
            }
        });

        // hovering a row lights up the matching bubble; leaving clears it
        if hovered_row != self.highlighted {
            self.set_highlight(hovered_row);
        }
    }

    fn ranked_rows(&self) -> Vec<RankedRow> {
        let query = self.search.trim();

        if query.is_empty() {
            return self
                .board
                .top_by_rejections(self.top_limit)
                .into_iter()
                .map(|company| RankedRow {
                    company_id: company.id.clone(),
                    name: company.name.clone(),
                    rejections: self.board.rejections_for(&company.id),
                })
                .collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut rows = self
            .board
            .companies
            .iter()
            .filter(|company| {
                matcher
                    .fuzzy_match(&company.name, query)
                    .or_else(|| {
                        matcher.fuzzy_match(
                            &company.name.to_ascii_lowercase(),
                            &query.to_ascii_lowercase(),
                        )
                    })
                    .is_some()
            })
            .map(|company| RankedRow {
                company_id: company.id.clone(),
                name: company.name.clone(),
                rejections: self.board.rejections_for(&company.id),
            })
            .collect::<Vec<_>>();

        rows.sort_by(|a, b| {
            b.rejections
                .cmp(&a.rejections)
                .then_with(|| a.name.cmp(&b.name))
        });
        rows
    }
}
