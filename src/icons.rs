use anyhow::{bail, Context, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::{icon, paths};
use crate::manifest::{Manifest, ManifestImage};
use crate::splash;

/// Target form factor for an icon variant
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Idiom {
    Iphone,
    Ipad,
    IosMarketing,
}

/// One entry of the icon size matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconSpec {
    /// Logical point size (square)
    pub points: f32,
    /// Display density multiplier
    pub scale: u32,
    pub idiom: Idiom,
}

/// Full iOS icon matrix: iPhone entries, then iPad, then the App Store
/// marketing entry. Manifest records follow this order.
pub const ICON_SPECS: [IconSpec; 15] = [
    IconSpec { points: 20.0, scale: 2, idiom: Idiom::Iphone },
    IconSpec { points: 20.0, scale: 3, idiom: Idiom::Iphone },
    IconSpec { points: 29.0, scale: 2, idiom: Idiom::Iphone },
    IconSpec { points: 29.0, scale: 3, idiom: Idiom::Iphone },
    IconSpec { points: 40.0, scale: 2, idiom: Idiom::Iphone },
    IconSpec { points: 40.0, scale: 3, idiom: Idiom::Iphone },
    IconSpec { points: 60.0, scale: 2, idiom: Idiom::Iphone },
    IconSpec { points: 60.0, scale: 3, idiom: Idiom::Iphone },
    IconSpec { points: 20.0, scale: 1, idiom: Idiom::Ipad },
    IconSpec { points: 29.0, scale: 1, idiom: Idiom::Ipad },
    IconSpec { points: 40.0, scale: 1, idiom: Idiom::Ipad },
    IconSpec { points: 76.0, scale: 1, idiom: Idiom::Ipad },
    IconSpec { points: 76.0, scale: 2, idiom: Idiom::Ipad },
    IconSpec { points: 83.5, scale: 2, idiom: Idiom::Ipad },
    IconSpec { points: 1024.0, scale: 1, idiom: Idiom::IosMarketing },
];

impl IconSpec {
    /// Physical pixel edge length: points x scale
    pub fn pixel_size(&self) -> u32 {
        (self.points * self.scale as f32) as u32
    }

    /// Size label as it appears in Contents.json ("20x20", "83.5x83.5")
    pub fn size_label(&self) -> String {
        if self.points.fract() == 0.0 {
            format!("{}x{}", self.points as u32, self.points as u32)
        } else {
            format!("{}x{}", self.points, self.points)
        }
    }

    pub fn scale_label(&self) -> String {
        format!("{}x", self.scale)
    }

    /// Output filename per the platform convention
    pub fn filename(&self) -> String {
        format!("Icon-App-{}@{}.png", self.size_label(), self.scale_label())
    }

    fn manifest_record(&self) -> ManifestImage {
        ManifestImage {
            size: self.size_label(),
            idiom: self.idiom,
            filename: self.filename(),
            scale: self.scale_label(),
        }
    }
}

/// Strip any transparency from the decoded source.
///
/// Sources with an alpha channel are composited over the app's dark
/// backdrop; opaque sources are converted to RGB directly. Every
/// derived icon asset must be alpha-free per the App Store icon rules.
pub fn flatten(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut out = RgbImage::from_pixel(width, height, Rgb(icon::BACKGROUND));

    for (x, y, px) in rgba.enumerate_pixels() {
        let alpha = px[3] as u32;
        let dst = out.get_pixel_mut(x, y);
        for channel in 0..3 {
            let src = px[channel] as u32;
            let bg = icon::BACKGROUND[channel] as u32;
            dst[channel] = ((src * alpha + bg * (255 - alpha) + 127) / 255) as u8;
        }
    }

    out
}

/// Run the full icon pipeline rooted at `root` (the project directory).
///
/// Writes the resized icon set plus Contents.json, the generic
/// assets/icon.png copy, and the splash composite. Aborts on the first
/// failure, leaving any already-written files in place.
pub fn run(root: &Path) -> Result<()> {
    let source = root.join(paths::SOURCE_ICON);
    if !source.exists() {
        bail!("Source icon not found at {}", source.display());
    }

    let img = image::open(&source)
        .with_context(|| format!("Failed to decode source icon {}", source.display()))?;
    let flat = flatten(img);

    let iconset_dir = root.join(paths::APPICONSET_DIR);
    fs::create_dir_all(&iconset_dir)
        .with_context(|| format!("Failed to create {}", iconset_dir.display()))?;

    let mut records = Vec::with_capacity(ICON_SPECS.len());
    for spec in &ICON_SPECS {
        let px = spec.pixel_size();
        let resized = imageops::resize(&flat, px, px, FilterType::Lanczos3);
        let path = iconset_dir.join(spec.filename());
        resized
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        records.push(spec.manifest_record());
    }

    Manifest::new(records).save(&iconset_dir.join("Contents.json"))?;
    println!("Updated AppIcon Contents.json");

    let assets_dir = root.join(paths::ASSETS_DIR);
    fs::create_dir_all(&assets_dir)
        .with_context(|| format!("Failed to create {}", assets_dir.display()))?;

    let generic = imageops::resize(
        &flat,
        icon::GENERIC_ICON_SIZE,
        icon::GENERIC_ICON_SIZE,
        FilterType::Lanczos3,
    );
    let generic_path = assets_dir.join("icon.png");
    generic
        .save(&generic_path)
        .with_context(|| format!("Failed to write {}", generic_path.display()))?;
    println!("Updated assets/icon.png");

    println!("Generating splash screen...");
    splash::generate(&flat, &assets_dir.join("splash-icon.png"))?;
    println!("Updated assets/splash-icon.png");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_table_shape() {
        assert_eq!(ICON_SPECS.len(), 15);

        let iphone = ICON_SPECS.iter().filter(|s| s.idiom == Idiom::Iphone).count();
        let ipad = ICON_SPECS.iter().filter(|s| s.idiom == Idiom::Ipad).count();
        let marketing = ICON_SPECS
            .iter()
            .filter(|s| s.idiom == Idiom::IosMarketing)
            .count();
        assert_eq!((iphone, ipad, marketing), (8, 6, 1));
    }

    #[test]
    fn test_table_order_is_phone_then_pad_then_marketing() {
        let rank = |idiom: Idiom| match idiom {
            Idiom::Iphone => 0,
            Idiom::Ipad => 1,
            Idiom::IosMarketing => 2,
        };

        for pair in ICON_SPECS.windows(2) {
            assert!(rank(pair[0].idiom) <= rank(pair[1].idiom));
        }
    }

    #[test]
    fn test_filenames_are_unique() {
        let mut names: Vec<String> = ICON_SPECS.iter().map(|s| s.filename()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ICON_SPECS.len());
    }

    #[test]
    fn test_pixel_size() {
        let spec = IconSpec { points: 83.5, scale: 2, idiom: Idiom::Ipad };
        assert_eq!(spec.pixel_size(), 167);

        let spec = IconSpec { points: 60.0, scale: 3, idiom: Idiom::Iphone };
        assert_eq!(spec.pixel_size(), 180);
    }

    #[test]
    fn test_labels_and_filename() {
        let spec = IconSpec { points: 20.0, scale: 2, idiom: Idiom::Iphone };
        assert_eq!(spec.size_label(), "20x20");
        assert_eq!(spec.scale_label(), "2x");
        assert_eq!(spec.filename(), "Icon-App-20x20@2x.png");

        let spec = IconSpec { points: 83.5, scale: 2, idiom: Idiom::Ipad };
        assert_eq!(spec.size_label(), "83.5x83.5");
        assert_eq!(spec.filename(), "Icon-App-83.5x83.5@2x.png");
    }

    #[test]
    fn test_flatten_opaque_source_passes_through() {
        let src = RgbImage::from_pixel(4, 4, Rgb([200, 100, 50]));
        let flat = flatten(DynamicImage::ImageRgb8(src));
        assert_eq!(*flat.get_pixel(0, 0), Rgb([200, 100, 50]));
    }

    #[test]
    fn test_flatten_composites_over_dark_background() {
        let mut src = image::RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        src.put_pixel(0, 0, Rgba([255, 255, 255, 0]));
        src.put_pixel(1, 0, Rgba([255, 255, 255, 128]));

        let flat = flatten(DynamicImage::ImageRgba8(src));

        // Fully transparent pixel becomes the backdrop
        assert_eq!(*flat.get_pixel(0, 0), Rgb(icon::BACKGROUND));
        // Fully opaque pixel keeps its color
        assert_eq!(*flat.get_pixel(1, 1), Rgb([255, 255, 255]));
        // Half-transparent pixel blends between the two
        let blended = flat.get_pixel(1, 0);
        assert!(blended[0] > icon::BACKGROUND[0] && blended[0] < 255);
    }
}
