use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};

use crate::track::{BoardSource, CompanyBoard, collect_board};

mod field;
mod logos;
mod ui;

pub struct RejectionRadarApp {
    source: BoardSource,
    top_limit: usize,
    state: AppState,
    reload_rx: Option<Receiver<Result<CompanyBoard, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<CompanyBoard, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

pub(in crate::app) struct ViewModel {
    board: CompanyBoard,
    field: field::BubbleField,
    logo_rx: Option<Receiver<logos::LogoPayload>>,
    selected: Option<String>,
    highlighted: Option<String>,
    hovered_company: Option<String>,
    search: String,
    top_limit: usize,
    show_fps_bar: bool,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

impl RejectionRadarApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, source: BoardSource, top_limit: usize) -> Self {
        let state = Self::start_load(source.clone());
        Self {
            source,
            top_limit,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(source: BoardSource) -> Receiver<Result<CompanyBoard, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = collect_board(&source).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source: BoardSource) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(source),
        }
    }
}

impl eframe::App for RejectionRadarApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(board) => {
                            AppState::Ready(Box::new(ViewModel::new(board, self.top_limit)))
                        }
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading rejection board...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load rejection board");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.source.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.source.label(), &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.source.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(board) => AppState::Ready(Box::new(ViewModel::new(
                                    board,
                                    self.top_limit,
                                ))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
