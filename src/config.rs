use serde::Deserialize;

use crate::policy::{PHOTO_FALLBACK, PREFERRED_FPS};
use crate::resolution::{
    Resolution, SelectionPolicy, FALLBACK_RESOLUTION, MIN_WIDTH, TARGET_RESOLUTION,
};

/// Plugin configuration, read from `plugins.camera-capture` in `tauri.conf.json`.
///
/// ```json
/// {
///   "plugins": {
///     "camera-capture": {
///       "targetResolution": { "width": 1920, "height": 1080 },
///       "minWidth": 1280,
///       "preferredFps": 30
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub target_resolution: Resolution,
    pub fallback_resolution: Resolution,
    pub min_width: u32,
    pub preferred_fps: u32,
    pub photo_fallback: Resolution,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_resolution: TARGET_RESOLUTION,
            fallback_resolution: FALLBACK_RESOLUTION,
            min_width: MIN_WIDTH,
            preferred_fps: PREFERRED_FPS,
            photo_fallback: PHOTO_FALLBACK,
        }
    }
}

impl Config {
    pub fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            target: self.target_resolution,
            fallback: self.fallback_resolution,
            min_width: self.min_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.selection_policy(), SelectionPolicy::default());
        assert_eq!(config.preferred_fps, 30);
        assert_eq!(config.photo_fallback, Resolution::new(1920, 1080));
    }

    #[test]
    fn test_partial_config_overrides() {
        let config: Config = serde_json::from_str(
            r#"{ "targetResolution": { "width": 3840, "height": 2160 }, "minWidth": 1920 }"#,
        )
        .unwrap();
        let policy = config.selection_policy();
        assert_eq!(policy.target, Resolution::new(3840, 2160));
        assert_eq!(policy.min_width, 1920);
        assert_eq!(policy.fallback, FALLBACK_RESOLUTION);
    }
}
