use eframe::egui::{Pos2, Rect, Vec2, vec2};

use super::Bubble;

const FIT_PADDING: f32 = 80.0;
const MAX_FIT_SCALE: f32 = 1.2;
const MIN_USER_SCALE: f32 = 0.05;
const MAX_USER_SCALE: f32 = 6.0;

/// The world↔screen transform. All coordinate conversion goes through
/// `to_world`/`to_screen`; the two are exact algebraic inverses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct Camera {
    pub scale: f32,
    pub offset: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl Camera {
    pub(in crate::app) fn to_screen(&self, viewport: Rect, world: Vec2) -> Pos2 {
        viewport.center() + self.offset + world * self.scale
    }

    pub(in crate::app) fn to_world(&self, viewport: Rect, screen: Pos2) -> Vec2 {
        (screen - viewport.center() - self.offset) / self.scale
    }

    /// Recomputes the transform wholesale so every bubble extent plus
    /// padding fits the viewport, capped so small content is not over-
    /// zoomed. The bounding box midpoint lands on the viewport center.
    pub(in crate::app) fn fit(&mut self, viewport: Rect, bubbles: &[Bubble]) {
        if bubbles.is_empty() {
            return;
        }

        let mut min_x = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for bubble in bubbles {
            min_x = min_x.min(bubble.pos.x - bubble.radius);
            max_x = max_x.max(bubble.pos.x + bubble.radius);
            min_y = min_y.min(bubble.pos.y - bubble.radius);
            max_y = max_y.max(bubble.pos.y + bubble.radius);
        }

        let content_width = max_x - min_x + 2.0 * FIT_PADDING;
        let content_height = max_y - min_y + 2.0 * FIT_PADDING;
        let scale = (viewport.width() / content_width)
            .min(viewport.height() / content_height)
            .min(MAX_FIT_SCALE);

        self.scale = scale;
        self.offset = vec2(min_x + max_x, min_y + max_y) * -0.5 * scale;
    }

    /// Scroll zoom that keeps the world point under the pointer fixed.
    pub(in crate::app) fn zoom_around(&mut self, viewport: Rect, pointer: Pos2, factor: f32) {
        let world_before = self.to_world(viewport, pointer);
        self.scale = (self.scale * factor).clamp(MIN_USER_SCALE, MAX_USER_SCALE);
        self.offset = pointer - viewport.center() - world_before * self.scale;
    }

    pub(in crate::app) fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::super::test_bubble;
    use super::*;

    fn viewport() -> Rect {
        Rect::from_min_size(pos2(3.0, 7.0), vec2(800.0, 600.0))
    }

    #[test]
    fn to_screen_inverts_to_world() {
        let cameras = [
            Camera::default(),
            Camera {
                scale: 0.37,
                offset: vec2(12.5, -40.0),
            },
            Camera {
                scale: 1.2,
                offset: vec2(-250.0, 99.0),
            },
        ];

        for camera in cameras {
            for screen in [
                pos2(0.0, 0.0),
                pos2(403.0, 307.0),
                pos2(799.0, 1.0),
                pos2(-35.5, 612.25),
            ] {
                let round_trip = camera.to_screen(viewport(), camera.to_world(viewport(), screen));
                assert!(
                    (round_trip - screen).length() < 0.001,
                    "{screen:?} round-tripped to {round_trip:?}"
                );
            }
        }
    }

    #[test]
    fn fit_caps_the_scale_for_small_content() {
        let bubbles = vec![test_bubble(0.0, 0.0, 24.0)];
        let mut camera = Camera::default();
        camera.fit(viewport(), &bubbles);

        assert_eq!(camera.scale, 1.2);
        // content centered at the origin maps to the viewport center
        let screen = camera.to_screen(viewport(), Vec2::ZERO);
        assert!((screen - viewport().center()).length() < 0.001);
    }

    #[test]
    fn fit_scales_down_wide_content_with_padding() {
        let bubbles = vec![
            test_bubble(-500.0, 0.0, 50.0),
            test_bubble(500.0, 0.0, 50.0),
        ];
        let mut camera = Camera::default();
        camera.fit(viewport(), &bubbles);

        let content_width = 1100.0 + 2.0 * 80.0;
        assert!((camera.scale - 800.0 / content_width).abs() < 0.0001);

        // both extremes land inside the viewport
        for bubble in &bubbles {
            let screen = camera.to_screen(viewport(), bubble.pos);
            assert!(viewport().contains(screen));
        }
    }

    #[test]
    fn fit_centers_an_off_origin_cluster() {
        let bubbles = vec![
            test_bubble(200.0, 300.0, 30.0),
            test_bubble(400.0, 500.0, 30.0),
        ];
        let mut camera = Camera::default();
        camera.fit(viewport(), &bubbles);

        let midpoint = vec2(300.0, 400.0);
        let screen = camera.to_screen(viewport(), midpoint);
        assert!((screen - viewport().center()).length() < 0.001);
    }

    #[test]
    fn fit_on_empty_field_is_a_no_op() {
        let mut camera = Camera {
            scale: 0.5,
            offset: vec2(10.0, 20.0),
        };
        camera.fit(viewport(), &[]);
        assert_eq!(camera.scale, 0.5);
        assert_eq!(camera.offset, vec2(10.0, 20.0));
    }

    #[test]
    fn zoom_around_keeps_the_pointer_world_point_fixed() {
        let mut camera = Camera {
            scale: 0.8,
            offset: vec2(40.0, -15.0),
        };
        let pointer = pos2(250.0, 120.0);
        let world_before = camera.to_world(viewport(), pointer);

        camera.zoom_around(viewport(), pointer, 1.15);

        let world_after = camera.to_world(viewport(), pointer);
        assert!((world_after - world_before).length() < 0.001);
        assert!((camera.scale - 0.92).abs() < 0.0001);
    }
}
