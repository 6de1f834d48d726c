use eframe::egui::{Pos2, Rect, Vec2};

use super::{BubbleField, Tooltip};

/// World-space displacement below which a press/release pair counts as a
/// click instead of a drag.
pub(in crate::app) const CLICK_DISTANCE: f32 = 15.0;

pub(in crate::app) struct DragState {
    pub index: usize,
    grab_offset: Vec2,
    press_world: Vec2,
}

impl BubbleField {
    /// Topmost bubble strictly containing the world point. Later bubbles
    /// draw on top, so the scan runs back to front.
    pub(in crate::app) fn hit_test(&self, world: Vec2) -> Option<usize> {
        self.bubbles
            .iter()
            .enumerate()
            .rev()
            .find(|(_, bubble)| (world - bubble.pos).length() < bubble.radius)
            .map(|(index, _)| index)
    }

    pub(in crate::app) fn pointer_down(&mut self, viewport: Rect, screen: Pos2) {
        let world = self.camera.to_world(viewport, screen);
        if let Some(index) = self.hit_test(world) {
            self.drag = Some(DragState {
                index,
                grab_offset: world - self.bubbles[index].pos,
                press_world: world,
            });
        }
    }

    /// Moves the dragged bubble so the grab offset captured at press time
    /// stays constant; the bubble never snaps to the pointer.
    pub(in crate::app) fn pointer_moved(&mut self, viewport: Rect, screen: Pos2) {
        let world = self.camera.to_world(viewport, screen);
        if let Some(drag) = &self.drag
            && let Some(bubble) = self.bubbles.get_mut(drag.index)
        {
            bubble.pos = world - drag.grab_offset;
            bubble.vel = Vec2::ZERO;
        }
    }

    /// Ends a drag. Returns the bubble's company id when the pointer
    /// travelled less than `CLICK_DISTANCE` in world space since the press,
    /// i.e. the gesture was a click-select rather than a rearrange.
    pub(in crate::app) fn pointer_up(&mut self, viewport: Rect, screen: Pos2) -> Option<String> {
        let drag = self.drag.take()?;
        let world = self.camera.to_world(viewport, screen);
        if (world - drag.press_world).length() < CLICK_DISTANCE {
            self.bubbles.get(drag.index).map(|bubble| bubble.id.clone())
        } else {
            None
        }
    }

    pub(in crate::app) fn pointer_left(&mut self) {
        self.drag = None;
    }

    /// Tooltip payload for the bubble under the pointer, if any. Suppressed
    /// while dragging.
    pub(in crate::app) fn hover_payload(&self, viewport: Rect, screen: Pos2) -> Option<Tooltip> {
        if self.drag.is_some() {
            return None;
        }

        let world = self.camera.to_world(viewport, screen);
        self.hit_test(world).map(|index| {
            let bubble = &self.bubbles[index];
            Tooltip {
                company_id: bubble.id.clone(),
                name: bubble.name.clone(),
                rejections: bubble.rejections,
                at: screen,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::super::{BubbleField, seed};
    use super::*;

    // Centered on the origin with the default identity camera, screen and
    // world coordinates coincide.
    fn viewport() -> Rect {
        Rect::from_center_size(pos2(0.0, 0.0), vec2(800.0, 600.0))
    }

    fn field_at(positions: &[(f32, f32, f32)]) -> BubbleField {
        let seeds = positions
            .iter()
            .enumerate()
            .map(|(index, _)| seed(&format!("company-{index}"), index as u32))
            .collect::<Vec<_>>();
        let mut field = BubbleField::new(&seeds);
        for (bubble, &(x, y, radius)) in field.bubbles.iter_mut().zip(positions) {
            bubble.pos = vec2(x, y);
            bubble.radius = radius;
        }
        field
    }

    #[test]
    fn center_always_hits_and_radius_plus_epsilon_misses() {
        let field = field_at(&[(100.0, 50.0, 30.0)]);

        assert_eq!(field.hit_test(vec2(100.0, 50.0)), Some(0));
        assert_eq!(field.hit_test(vec2(100.0 + 30.1, 50.0)), None);
        // strictly-less-than containment: the rim itself is a miss
        assert_eq!(field.hit_test(vec2(130.0, 50.0)), None);
    }

    #[test]
    fn overlapping_bubbles_resolve_to_the_topmost() {
        let field = field_at(&[(0.0, 0.0, 40.0), (20.0, 0.0, 40.0)]);

        // the overlap region belongs to the most recently added bubble
        assert_eq!(field.hit_test(vec2(10.0, 0.0)), Some(1));
        // outside the second bubble the first still wins
        assert_eq!(field.hit_test(vec2(-30.0, 0.0)), Some(0));
    }

    #[test]
    fn short_press_release_is_a_click() {
        let mut field = field_at(&[(0.0, 0.0, 40.0)]);

        field.pointer_down(viewport(), pos2(10.0, 0.0));
        field.pointer_moved(viewport(), pos2(15.0, 0.0));
        let selected = field.pointer_up(viewport(), pos2(15.0, 0.0));

        assert_eq!(selected.as_deref(), Some("company-0"));
        assert!(field.drag.is_none());
    }

    #[test]
    fn long_drag_moves_the_bubble_and_selects_nothing() {
        let mut field = field_at(&[(0.0, 0.0, 40.0)]);

        field.pointer_down(viewport(), pos2(10.0, 0.0));
        field.pointer_moved(viewport(), pos2(110.0, 60.0));
        let selected = field.pointer_up(viewport(), pos2(110.0, 60.0));

        assert!(selected.is_none());
        // grab offset held constant: the bubble follows at pointer - (10, 0)
        assert!((field.bubbles[0].pos - vec2(100.0, 60.0)).length() < 0.001);
    }

    #[test]
    fn press_on_empty_space_starts_no_drag() {
        let mut field = field_at(&[(0.0, 0.0, 40.0)]);

        field.pointer_down(viewport(), pos2(300.0, 300.0));
        assert!(field.drag.is_none());
        assert!(field.pointer_up(viewport(), pos2(300.0, 300.0)).is_none());
    }

    #[test]
    fn pointer_leave_cancels_the_drag() {
        let mut field = field_at(&[(0.0, 0.0, 40.0)]);

        field.pointer_down(viewport(), pos2(0.0, 0.0));
        assert!(field.drag.is_some());
        field.pointer_left();
        assert!(field.drag.is_none());
    }

    #[test]
    fn hover_payload_reports_the_bubble_and_screen_position() {
        let mut field = field_at(&[(50.0, -20.0, 30.0)]);
        field.bubbles[0].rejections = 7;

        let tooltip = field.hover_payload(viewport(), pos2(50.0, -20.0)).unwrap();
        assert_eq!(tooltip.company_id, "company-0");
        assert_eq!(tooltip.rejections, 7);
        assert_eq!(tooltip.at, pos2(50.0, -20.0));

        assert!(field.hover_payload(viewport(), pos2(200.0, 200.0)).is_none());
    }

    #[test]
    fn hover_payload_is_suppressed_while_dragging() {
        let mut field = field_at(&[(0.0, 0.0, 40.0)]);
        field.pointer_down(viewport(), pos2(0.0, 0.0));
        assert!(field.hover_payload(viewport(), pos2(0.0, 0.0)).is_none());
    }

    #[test]
    fn dragged_bubble_still_collides_with_the_rest() {
        let mut field = field_at(&[(0.0, 0.0, 40.0), (200.0, 0.0, 40.0)]);

        field.pointer_down(viewport(), pos2(0.0, 0.0));
        field.pointer_moved(viewport(), pos2(170.0, 0.0));
        field.tick();

        // the parked bubble is pushed away from the dragged one
        assert!(field.bubbles[1].pos.x > 200.0);
    }
}
