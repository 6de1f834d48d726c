use std::collections::VecDeque;
use std::sync::mpsc::TryRecvError;
use std::time::Duration;

use eframe::egui::{self, Align, Context, Layout, TextureOptions};

use crate::track::CompanyBoard;
use crate::util::format_rejections;

use super::super::{ViewModel, field, logos};

impl ViewModel {
    pub(in crate::app) fn new(board: CompanyBoard, top_limit: usize) -> Self {
        let field = field::BubbleField::new(&board.bubble_seeds());
        let logo_rx = logos::spawn_loader(&board);

        Self {
            board,
            field,
            logo_rx,
            selected: None,
            highlighted: None,
            hovered_company: None,
            search: String::new(),
            top_limit: top_limit.max(1),
            show_fps_bar: true,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        source_label: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        self.update_fps_counter(ctx);
        self.apply_logo_results(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("rejection radar");
                    ui.separator();
                    ui.label(format!("board: {source_label}"));
                    ui.label(format!("companies: {}", self.board.company_count()));
                    ui.label(format_rejections(self.board.total_rejections()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload board"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.toggle_value(&mut self.show_fps_bar, "fps");
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::SidePanel::right("companies")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.draw_ranking(ui));

        if self.selected.is_some() {
            egui::SidePanel::left("details")
                .resizable(true)
                .default_width(320.0)
                .show(ctx, |ui| self.draw_details(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading rejection board...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_field(ui);
            }
        });
    }

    pub(in crate::app) fn select_company(&mut self, company_id: Option<String>) {
        self.selected = company_id;
    }

    pub(in crate::app) fn set_highlight(&mut self, company_id: Option<String>) {
        self.field.set_highlight(company_id.as_deref());
        self.highlighted = company_id;
    }

    /// Drains logo decode results queued by the loader thread and turns
    /// them into textures. Runs at the start of the frame so the simulation
    /// and render pass observe a settled bubble list.
    fn apply_logo_results(&mut self, ctx: &Context) {
        let Some(rx) = &self.logo_rx else {
            return;
        };

        let mut disconnected = false;
        loop {
            match rx.try_recv() {
                Ok(payload) => {
                    let texture = ctx.load_texture(
                        format!("logo-{}", payload.company_id),
                        payload.image,
                        TextureOptions::LINEAR,
                    );
                    if let Some(bubble) = self
                        .field
                        .bubbles
                        .iter_mut()
                        .find(|bubble| bubble.id == payload.company_id)
                    {
                        bubble.logo = Some(texture);
                    }
                }
                Err(TryRecvError::Empty) => {
                    // results may still be in flight; poll again shortly
                    ctx.request_repaint_after(Duration::from_millis(150));
                    break;
                }
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        if disconnected {
            self.logo_rx = None;
        }
    }
}
