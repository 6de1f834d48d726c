use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use anyhow::{Context as _, Result};
use eframe::egui::ColorImage;
use image::imageops::FilterType;
use tracing::warn;

use crate::track::CompanyBoard;

const LOGO_TEXTURE_SIZE: u32 = 256;

pub(in crate::app) struct LogoPayload {
    pub company_id: String,
    pub image: ColorImage,
}

/// Decodes company logos on a background thread. Results arrive over the
/// channel and are applied to bubbles at the start of a frame; a failed
/// decode is logged and the bubble keeps its placeholder forever.
pub(in crate::app) fn spawn_loader(board: &CompanyBoard) -> Option<Receiver<LogoPayload>> {
    let jobs = board
        .companies
        .iter()
        .filter_map(|company| {
            company
                .logo
                .clone()
                .map(|path| (company.id.clone(), path))
        })
        .collect::<Vec<(String, PathBuf)>>();

    if jobs.is_empty() {
        return None;
    }

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for (company_id, path) in jobs {
            match decode_logo(&path) {
                Ok(image) => {
                    if tx.send(LogoPayload { company_id, image }).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!(
                        %company_id,
                        path = %path.display(),
                        %error,
                        "logo decode failed, keeping placeholder"
                    );
                }
            }
        }
    });

    Some(rx)
}

fn decode_logo(path: &Path) -> Result<ColorImage> {
    let decoded = image::open(path)
        .with_context(|| format!("failed to decode logo {}", path.display()))?;
    let resized = decoded.resize_to_fill(LOGO_TEXTURE_SIZE, LOGO_TEXTURE_SIZE, FilterType::Triangle);
    let mut rgba = resized.to_rgba8();
    mask_to_circle(&mut rgba);

    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Zeroes alpha outside the inscribed circle so the texture reads as a
/// clipped disc when drawn over the bubble.
fn mask_to_circle(image: &mut image::RgbaImage) {
    let (width, height) = image.dimensions();
    let center_x = (width as f32 - 1.0) * 0.5;
    let center_y = (height as f32 - 1.0) * 0.5;
    let radius = width.min(height) as f32 * 0.5;
    let radius_sq = radius * radius;

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = x as f32 - center_x;
        let dy = y as f32 - center_y;
        if dx * dx + dy * dy > radius_sq {
            pixel.0[3] = 0;
        }
    }
}
