use eframe::egui::{
    self, Align2, Color32, CursorIcon, FontId, Painter, Rect, Sense, Stroke, Ui, pos2, vec2,
};
use tracing::debug;

use crate::util::{format_rejections, truncate_label};

use super::super::ViewModel;
use super::Tooltip;

const BACKGROUND: Color32 = Color32::from_rgb(15, 15, 18);
const BUBBLE_FILL: Color32 = Color32::from_rgb(39, 39, 42);
const BUBBLE_STROKE: Color32 = Color32::from_rgb(63, 63, 70);
const ACCENT: Color32 = Color32::from_rgb(167, 139, 250);
const LABEL: Color32 = Color32::from_rgb(113, 113, 122);
const TOOLTIP_FILL: Color32 = Color32::from_rgb(24, 24, 28);
const NAME_CHARS: usize = 8;

impl ViewModel {
    /// One frame over the bubble field: pointer effects, simulation tick,
    /// camera refit, draw, then the screen-space tooltip. The mutations
    /// must stay in this order; a reordering would at best show one-frame-
    /// stale visuals and at worst tear the interaction state.
    pub(in crate::app) fn draw_field(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        painter.rect_filled(rect, 0.0, BACKGROUND);

        self.field.note_viewport(rect.size());
        self.handle_field_zoom(ui, rect, &response);
        self.handle_field_pan(&response);

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|pos| rect.contains(*pos));
        let (pressed, released) = ui.input(|input| {
            (
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
            )
        });

        match pointer {
            Some(pos) => {
                if pressed {
                    self.field.pointer_down(rect, pos);
                }
                self.field.pointer_moved(rect, pos);
                if released
                    && let Some(company_id) = self.field.pointer_up(rect, pos)
                {
                    self.select_company(Some(company_id));
                }
            }
            None => self.field.pointer_left(),
        }

        let moving = self.field.tick();

        if self.field.needs_refit && !self.field.bubbles.is_empty() {
            self.field.camera.fit(rect, &self.field.bubbles);
            self.field.needs_refit = false;
            debug!(scale = self.field.camera.scale, "camera refit");
        }

        let camera = self.field.camera;
        let highlighted_id = self.highlighted.as_deref();
        let hovered = pointer.and_then(|pos| self.field.hover_payload(rect, pos));

        for bubble in &self.field.bubbles {
            let center = camera.to_screen(rect, bubble.pos);
            let radius = bubble.radius * camera.scale;
            if !circle_visible(rect, center, radius) {
                continue;
            }

            let highlight = bubble.highlighted || highlighted_id == Some(bubble.id.as_str());
            let hovered_here = hovered
                .as_ref()
                .is_some_and(|tooltip| tooltip.company_id == bubble.id);

            if highlight {
                painter.circle_stroke(
                    center,
                    radius + 6.0,
                    Stroke::new(4.0, Color32::from_rgba_unmultiplied(167, 139, 250, 60)),
                );
                painter.circle_stroke(
                    center,
                    radius + 2.0,
                    Stroke::new(2.0, Color32::from_rgba_unmultiplied(167, 139, 250, 140)),
                );
            }

            painter.circle_filled(center, radius, BUBBLE_FILL);

            if let Some(texture) = &bubble.logo {
                let logo_rect = Rect::from_center_size(center, vec2(radius * 2.0, radius * 2.0));
                painter.image(
                    texture.id(),
                    logo_rect,
                    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            } else {
                let font_size = ((bubble.radius * 0.5).min(14.0) * camera.scale).max(4.0);
                painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    truncate_label(&bubble.name, NAME_CHARS),
                    FontId::proportional(font_size),
                    LABEL,
                );
            }

            let stroke = if highlight || hovered_here {
                Stroke::new(2.0, ACCENT)
            } else {
                Stroke::new(1.0, BUBBLE_STROKE)
            };
            painter.circle_stroke(center, radius, stroke);
        }

        if let Some(tooltip) = &hovered {
            ui.output_mut(|output| output.cursor_icon = CursorIcon::PointingHand);
            draw_tooltip(&painter, rect, tooltip);
        }
        self.hovered_company = hovered.map(|tooltip| tooltip.company_id);

        if moving || self.field.drag.is_some() {
            ui.ctx().request_repaint();
        }
    }

    fn handle_field_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.field.camera.zoom_around(rect, pointer, factor);
    }

    fn handle_field_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.field.camera.pan(response.drag_delta());
        }
    }
}

fn circle_visible(rect: Rect, center: eframe::egui::Pos2, radius: f32) -> bool {
    !(center.x + radius < rect.left()
        || center.x - radius > rect.right()
        || center.y + radius < rect.top()
        || center.y - radius > rect.bottom())
}

fn draw_tooltip(painter: &Painter, viewport: Rect, tooltip: &Tooltip) {
    let title = painter.layout_no_wrap(
        tooltip.name.clone(),
        FontId::proportional(13.0),
        Color32::from_gray(235),
    );
    let detail = painter.layout_no_wrap(
        format_rejections(tooltip.rejections),
        FontId::proportional(12.0),
        LABEL,
    );
    let hint = painter.layout_no_wrap(
        "click to open details".to_owned(),
        FontId::proportional(10.0),
        ACCENT,
    );

    let padding = vec2(10.0, 8.0);
    let spacing = 3.0;
    let width = title.size().x.max(detail.size().x).max(hint.size().x);
    let height = title.size().y + detail.size().y + hint.size().y + 2.0 * spacing;

    let mut frame = Rect::from_min_size(
        tooltip.at + vec2(12.0, 12.0),
        vec2(width, height) + padding * 2.0,
    );
    // nudge back inside the viewport near the right/bottom edges
    frame = frame.translate(vec2(
        (viewport.right() - frame.right()).min(0.0),
        (viewport.bottom() - frame.bottom()).min(0.0),
    ));

    painter.rect_filled(frame.expand(1.0), 6.0, BUBBLE_STROKE);
    painter.rect_filled(frame, 6.0, TOOLTIP_FILL);

    let mut cursor = frame.min + padding;
    let title_height = title.size().y;
    let detail_height = detail.size().y;
    painter.galley(cursor, title, Color32::from_gray(235));
    cursor.y += title_height + spacing;
    painter.galley(cursor, detail, LABEL);
    cursor.y += detail_height + spacing;
    painter.galley(cursor, hint, ACCENT);
}
