use eframe::egui::Vec2;

use super::Bubble;

const CENTER_PULL: f32 = 0.0004;
const VELOCITY_DAMPING: f32 = 0.9;
const MIN_MOTION_SQ: f32 = 0.000_001;

pub(in crate::app) const COLLISION_SLACK: f32 = 4.0;

/// Semi-implicit Euler step: pull toward the world origin, damp, integrate.
/// The dragged bubble, if any, is pinned by the pointer instead.
pub(in crate::app) fn step(bubbles: &mut [Bubble], dragged: Option<usize>) -> bool {
    let mut any_motion = false;

    for (index, bubble) in bubbles.iter_mut().enumerate() {
        if Some(index) == dragged {
            continue;
        }

        bubble.vel += -bubble.pos * CENTER_PULL;
        bubble.vel *= VELOCITY_DAMPING;
        bubble.pos += bubble.vel;

        if bubble.vel.length_sq() > MIN_MOTION_SQ {
            any_motion = true;
        }
    }

    any_motion
}

/// One O(N²) relaxation pass. Each overlapping pair is pushed apart along
/// the line between centers, the larger bubble moving less. Overlap is
/// reduced, not eliminated; convergence comes from running this every tick.
/// Coincident centers are left for the centering force to drift apart.
pub(in crate::app) fn resolve_collisions(bubbles: &mut [Bubble]) -> bool {
    let mut any_correction = false;

    for i in 0..bubbles.len() {
        for j in (i + 1)..bubbles.len() {
            let delta = bubbles[j].pos - bubbles[i].pos;
            let distance = delta.length();
            let min_distance = bubbles[i].radius + bubbles[j].radius + COLLISION_SLACK;
            if distance <= 0.0 || distance >= min_distance {
                continue;
            }

            let direction = delta / distance;
            let overlap = min_distance - distance;
            let radius_sum = bubbles[i].radius + bubbles[j].radius;
            let push_i = direction * (overlap * bubbles[j].radius / radius_sum);
            let push_j = direction * (overlap * bubbles[i].radius / radius_sum);

            bubbles[i].pos -= push_i;
            bubbles[j].pos += push_j;
            any_correction = true;
        }
    }

    any_correction
}
