use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::icons::Idiom;

/// Xcode `Contents.json` for an .appiconset
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Manifest {
    pub images: Vec<ManifestImage>,
    pub info: ManifestInfo,
}

/// One record per generated icon file, in generation order
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ManifestImage {
    pub size: String,
    pub idiom: Idiom,
    pub filename: String,
    pub scale: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ManifestInfo {
    pub version: u32,
    pub author: String,
}

impl Default for ManifestInfo {
    fn default() -> Self {
        ManifestInfo {
            version: 1,
            author: "xcode".to_string(),
        }
    }
}

impl Manifest {
    pub fn new(images: Vec<ManifestImage>) -> Self {
        Manifest {
            images,
            info: ManifestInfo::default(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize icon manifest")?;

        fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let manifest: Manifest = serde_json::from_str(&contents)
            .context("Failed to parse icon manifest")?;

        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_defaults() {
        let info = ManifestInfo::default();
        assert_eq!(info.version, 1);
        assert_eq!(info.author, "xcode");
    }

    #[test]
    fn test_idiom_serialization() {
        let record = ManifestImage {
            size: "1024x1024".to_string(),
            idiom: Idiom::IosMarketing,
            filename: "Icon-App-1024x1024@1x.png".to_string(),
            scale: "1x".to_string(),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"idiom\":\"ios-marketing\""));

        let back: ManifestImage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_record_field_order() {
        // Xcode writes size/idiom/filename/scale; keep that order stable
        let record = ManifestImage {
            size: "20x20".to_string(),
            idiom: Idiom::Iphone,
            filename: "Icon-App-20x20@2x.png".to_string(),
            scale: "2x".to_string(),
        };

        let json = serde_json::to_string(&record).unwrap();
        let size_pos = json.find("\"size\"").unwrap();
        let idiom_pos = json.find("\"idiom\"").unwrap();
        let filename_pos = json.find("\"filename\"").unwrap();
        let scale_pos = json.find("\"scale\"").unwrap();
        assert!(size_pos < idiom_pos && idiom_pos < filename_pos && filename_pos < scale_pos);
    }
}
