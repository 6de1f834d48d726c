use eframe::egui::Context;

use super::super::ViewModel;

const SAMPLE_WINDOW: usize = 120;
const MAX_PLAUSIBLE_FPS: f32 = 480.0;

impl ViewModel {
    pub(in crate::app) fn update_fps_counter(&mut self, ctx: &Context) {
        let dt = ctx.input(|input| input.stable_dt);
        self.record_frame(dt);
    }

    /// Folds one frame delta into the rolling window. Zero-length frames
    /// are discarded; spuriously short ones are capped rather than letting
    /// a single outlier dominate the average.
    fn record_frame(&mut self, dt: f32) {
        if dt <= f32::EPSILON {
            return;
        }

        self.fps_current = (1.0 / dt).min(MAX_PLAUSIBLE_FPS);
        self.fps_samples.push_back(self.fps_current);
        while self.fps_samples.len() > SAMPLE_WINDOW {
            self.fps_samples.pop_front();
        }
    }

    pub(in crate::app) fn fps_display_text(&self) -> Option<String> {
        if !self.show_fps_bar {
            return None;
        }

        let mut parts = vec![format!("FPS {:.0}", self.fps_current)];

        if !self.fps_samples.is_empty() {
            let average = self.fps_samples.iter().sum::<f32>() / self.fps_samples.len() as f32;
            parts.push(format!("avg {:.1}", average));
        }

        if self.fps_current > f32::EPSILON {
            parts.push(format!("{:.1} ms", 1000.0 / self.fps_current));
        }

        Some(parts.join(" | "))
    }
}
