//! Asset preflight check

use crate::config::GameConfig;
use crate::preflight::check::{CheckResult, Findings, PreflightCheck};
use crate::sim::SpawnBand;

/// Checks that every texture exists, decodes, and fits the playfield
pub struct AssetCheck;

impl AssetCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AssetCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl PreflightCheck for AssetCheck {
    fn name(&self) -> &'static str {
        "Assets"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Reads every texture header and checks the scaled sizes")
    }

    fn run(&self, config: &GameConfig) -> CheckResult {
        let mut findings = Findings::new();
        let [width, height] = config.playfield();
        let assets = &config.assets;

        for (name, asset) in assets.entries() {
            let path = assets.resolve(asset);
            let (image_w, image_h) = match image::image_dimensions(&path) {
                Ok(size) => size,
                Err(e) => {
                    findings.fail(format!("{}: {}: {}", name, path.display(), e));
                    continue;
                }
            };
            let drawn_w = image_w as f32 * asset.scale;
            let drawn_h = image_h as f32 * asset.scale;
            findings.ok(format!(
                "{}: {} ({}x{}, drawn {:.0}x{:.0})",
                name,
                path.display(),
                image_w,
                image_h,
                drawn_w,
                drawn_h
            ));

            match name {
                "meteor" => match SpawnBand::new(height, drawn_h) {
                    Ok(band) => findings.note(format!(
                        "Meteor spawn band: y in [{:.1}, {:.1})",
                        band.min(),
                        band.max()
                    )),
                    Err(e) => findings.fail(e.to_string()),
                },
                "background" if drawn_w < width || drawn_h < height => findings.warn(format!(
                    "Background {:.0}x{:.0} does not cover the {}x{} playfield",
                    drawn_w, drawn_h, width, height
                )),
                _ => {}
            }
        }

        findings.finish(
            "All textures readable",
            "Textures readable with warnings",
            "Missing or unusable textures",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_root_fails() {
        let mut config = GameConfig::builtin("test");
        config.assets.root = "does/not/exist".into();
        let result = AssetCheck::new().run(&config);
        assert!(result.status.is_fail());
        assert_eq!(result.details.len(), 5);
    }

    #[test]
    fn test_shipped_assets_pass() {
        let config = GameConfig::builtin("test");
        let result = AssetCheck::new().run(&config);
        assert!(result.status.is_ok(), "{:#?}", result.details);
    }

    #[test]
    fn test_oversized_meteor_fails() {
        let mut config = GameConfig::builtin("test");
        config.assets.meteor.scale = 10.0;
        let result = AssetCheck::new().run(&config);
        assert!(result.status.is_fail());
    }
}
