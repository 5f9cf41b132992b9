use ab_glyph::{FontVec, PxScale};
use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, Rgba, RgbaImage, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::fs;
use std::path::Path;

use crate::constants::splash;

/// Compose the splash image: transparent canvas, rounded icon, label.
pub fn generate(icon: &RgbImage, out_path: &Path) -> Result<()> {
    let mut canvas = RgbaImage::from_pixel(
        splash::CANVAS_SIZE,
        splash::CANVAS_SIZE,
        Rgba([0, 0, 0, 0]),
    );

    let small = imageops::resize(
        icon,
        splash::ICON_SIZE,
        splash::ICON_SIZE,
        FilterType::Lanczos3,
    );
    let rounded = round_corners(&small, splash::CORNER_RADIUS);
    imageops::overlay(
        &mut canvas,
        &rounded,
        splash::ICON_OFFSET.0,
        splash::ICON_OFFSET.1,
    );

    draw_label(&mut canvas, splash::LABEL);

    canvas
        .save(out_path)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    Ok(())
}

/// Cut rounded corners into an opaque image.
///
/// The alpha mask starts fully opaque; each corner is replaced with the
/// matching quadrant of a filled circle of the given radius, so the
/// image fades to transparent exactly outside the corner arcs.
pub fn round_corners(img: &RgbImage, radius: u32) -> RgbaImage {
    let (width, height) = img.dimensions();
    let diameter = radius * 2;

    let mut circle = GrayImage::new(diameter, diameter);
    draw_filled_circle_mut(
        &mut circle,
        (radius as i32, radius as i32),
        radius as i32,
        Luma([255]),
    );

    let mut mask = GrayImage::from_pixel(width, height, Luma([255]));
    let quadrant = |x, y| imageops::crop_imm(&circle, x, y, radius, radius).to_image();
    imageops::replace(&mut mask, &quadrant(0, 0), 0, 0);
    imageops::replace(&mut mask, &quadrant(0, radius), 0, (height - radius) as i64);
    imageops::replace(&mut mask, &quadrant(radius, 0), (width - radius) as i64, 0);
    imageops::replace(
        &mut mask,
        &quadrant(radius, radius),
        (width - radius) as i64,
        (height - radius) as i64,
    );

    let mut out = RgbaImage::new(width, height);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let rgb = img.get_pixel(x, y);
        let alpha = mask.get_pixel(x, y)[0];
        *px = Rgba([rgb[0], rgb[1], rgb[2], alpha]);
    }

    out
}

/// Render the label centered on the canvas, white on transparent.
///
/// Tries the configured system fonts first; when none loads, falls back
/// to the built-in block glyphs so the splash never ships without its
/// label.
fn draw_label(canvas: &mut RgbaImage, text: &str) {
    let white = Rgba([255, 255, 255, 255]);
    let center_x = splash::CANVAS_SIZE as i32 / 2;

    match load_system_font() {
        Some(font) => {
            let scale = PxScale::from(splash::LABEL_SIZE);
            let (text_w, _) = text_size(scale, &font, text);
            let x = center_x - text_w as i32 / 2;
            draw_text_mut(canvas, white, x, splash::LABEL_TOP, scale, &font, text);
        }
        None => {
            println!("No system font found, falling back to built-in glyphs");
            draw_block_label(canvas, text, center_x, splash::LABEL_TOP, white);
        }
    }
}

fn load_system_font() -> Option<FontVec> {
    for path in splash::FONT_PATHS {
        if let Ok(data) = fs::read(path) {
            // Face 0 for .ttc collections; the index is ignored for plain .ttf
            if let Ok(font) = FontVec::try_from_vec_and_index(data, 0) {
                return Some(font);
            }
        }
    }
    None
}

const GLYPH_ROWS: usize = 7;
const GLYPH_COLS: u32 = 5;

/// 5x7 block glyphs, one bit per cell, MSB = leftmost column
fn glyph(c: char) -> Option<[u8; GLYPH_ROWS]> {
    let rows = match c {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        ' ' => [0; GLYPH_ROWS],
        _ => return None,
    };
    Some(rows)
}

/// Fallback label renderer: block glyphs built from filled rectangles,
/// scaled so the glyph grid matches the configured label height.
fn draw_block_label(canvas: &mut RgbaImage, text: &str, center_x: i32, top: i32, color: Rgba<u8>) {
    let cell = (splash::LABEL_SIZE / (GLYPH_ROWS as f32 + 1.0)) as i32;
    let advance = (GLYPH_COLS as i32 + 1) * cell;
    let text_w = advance * text.chars().count() as i32 - cell;
    let mut x = center_x - text_w / 2;

    for c in text.chars() {
        if let Some(rows) = glyph(c.to_ascii_uppercase()) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_COLS {
                    if bits & (1 << (GLYPH_COLS - 1 - col)) != 0 {
                        let rect = Rect::at(x + col as i32 * cell, top + row as i32 * cell)
                            .of_size(cell as u32, cell as u32);
                        draw_filled_rect_mut(canvas, rect, color);
                    }
                }
            }
        }
        x += advance;
    }
}
