use std::f32::consts::TAU;

use eframe::egui::{Pos2, TextureHandle, Vec2, vec2};

use crate::track::BubbleSeed;

pub(in crate::app) mod camera;
pub(in crate::app) mod input;
pub(in crate::app) mod physics;
mod view;

use camera::Camera;
use input::DragState;

pub(in crate::app) const MIN_RADIUS: f32 = 24.0;
pub(in crate::app) const MAX_RADIUS: f32 = 80.0;
const SEED_RING_RADIUS: f32 = 120.0;
const SEED_PHASE: f32 = 0.1;

/// One simulated bubble. Lives in world space; the camera maps it to the
/// screen each frame.
pub(in crate::app) struct Bubble {
    pub id: String,
    pub name: String,
    pub rejections: u32,
    pub url: Option<String>,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub highlighted: bool,
    pub logo: Option<TextureHandle>,
}

pub(in crate::app) struct Tooltip {
    pub company_id: String,
    pub name: String,
    pub rejections: u32,
    pub at: Pos2,
}

pub(in crate::app) struct BubbleField {
    pub bubbles: Vec<Bubble>,
    pub camera: Camera,
    pub needs_refit: bool,
    pub(in crate::app) drag: Option<DragState>,
    viewport_size: Option<Vec2>,
}

/// Maps a rejection count into `[MIN_RADIUS, MAX_RADIUS]`. Square-root
/// easing keeps low-weight bubbles legible instead of letting one outlier
/// flatten the rest; a degenerate weight range lands on the midpoint.
/// Normalization runs in f64: adjacent weights above 2^24 collapse to the
/// same f32 and would divide by zero.
pub(in crate::app) fn radius_for(rejections: u32, min_weight: u32, max_weight: u32) -> f32 {
    if max_weight <= min_weight {
        return MIN_RADIUS + (MAX_RADIUS - MIN_RADIUS) * 0.5;
    }

    let span = (max_weight - min_weight) as f64;
    let t = (rejections.saturating_sub(min_weight) as f64 / span).clamp(0.0, 1.0) as f32;
    MIN_RADIUS + t.sqrt() * (MAX_RADIUS - MIN_RADIUS)
}

impl BubbleField {
    pub(in crate::app) fn new(seeds: &[BubbleSeed]) -> Self {
        let mut bubbles = Vec::with_capacity(seeds.len());

        if !seeds.is_empty() {
            let min_weight = seeds.iter().map(|seed| seed.rejections).min().unwrap_or(0);
            let max_weight = seeds.iter().map(|seed| seed.rejections).max().unwrap_or(0);

            for (index, seed) in seeds.iter().enumerate() {
                let angle = TAU * index as f32 / seeds.len() as f32 + SEED_PHASE;
                bubbles.push(Bubble {
                    id: seed.id.clone(),
                    name: seed.name.clone(),
                    rejections: seed.rejections,
                    url: seed.url.clone(),
                    pos: vec2(angle.cos(), angle.sin()) * SEED_RING_RADIUS,
                    vel: Vec2::ZERO,
                    radius: radius_for(seed.rejections, min_weight, max_weight),
                    highlighted: false,
                    logo: None,
                });
            }

            physics::resolve_collisions(&mut bubbles);
        }

        Self {
            bubbles,
            camera: Camera::default(),
            needs_refit: true,
            drag: None,
            viewport_size: None,
        }
    }

    /// One simulation step: integrate every bubble except the dragged one,
    /// then run a single collision relaxation pass. Returns whether anything
    /// still moved.
    pub(in crate::app) fn tick(&mut self) -> bool {
        let dragged = self.drag.as_ref().map(|drag| drag.index);
        let integrated = physics::step(&mut self.bubbles, dragged);
        let separated = physics::resolve_collisions(&mut self.bubbles);
        integrated || separated
    }

    /// Flags a refit when the viewport dimensions change between frames.
    pub(in crate::app) fn note_viewport(&mut self, size: Vec2) {
        if self
            .viewport_size
            .is_none_or(|previous| (previous - size).length_sq() > f32::EPSILON)
        {
            self.viewport_size = Some(size);
            self.needs_refit = true;
        }
    }

    pub(in crate::app) fn set_highlight(&mut self, company_id: Option<&str>) {
        for bubble in &mut self.bubbles {
            bubble.highlighted = company_id == Some(bubble.id.as_str());
        }
    }

    pub(in crate::app) fn bubble_by_id(&self, company_id: &str) -> Option<&Bubble> {
        self.bubbles.iter().find(|bubble| bubble.id == company_id)
    }
}

#[cfg(test)]
pub(in crate::app) fn test_bubble(x: f32, y: f32, radius: f32) -> Bubble {
    Bubble {
        id: format!("bubble-{x}-{y}"),
        name: "test".to_owned(),
        rejections: 0,
        url: None,
        pos: vec2(x, y),
        vel: Vec2::ZERO,
        radius,
        highlighted: false,
        logo: None,
    }
}

#[cfg(test)]
pub(in crate::app) fn seed(id: &str, rejections: u32) -> BubbleSeed {
    BubbleSeed {
        id: id.to_owned(),
        name: id.to_owned(),
        rejections,
        logo: None,
        url: None,
    }
}
