use serde::{Deserialize, Serialize};

use crate::resolution::Resolution;
use crate::session::Facing;

/// Photo size used when a device reports no still-capture sizes.
pub const PHOTO_FALLBACK: Resolution = Resolution::new(1920, 1080);
/// Preview frame rate preferred for smooth playback.
pub const PREFERRED_FPS: u32 = 30;

/// Auto-exposure target frame-rate range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FpsRange {
    pub min: u32,
    pub max: u32,
}

impl FpsRange {
    pub const fn fixed(fps: u32) -> Self {
        Self { min: fps, max: fps }
    }

    pub fn contains(&self, fps: u32) -> bool {
        self.min <= fps && fps <= self.max
    }
}

/// Lock the preview to `preferred_fps` when some advertised range covers it,
/// otherwise take the range reaching the highest frame rate.
pub fn select_fps_range(ranges: &[FpsRange], preferred_fps: u32) -> Option<FpsRange> {
    if ranges.iter().any(|range| range.contains(preferred_fps)) {
        return Some(FpsRange::fixed(preferred_fps));
    }

    // max_by_key keeps the last maximum; the first one is wanted.
    ranges
        .iter()
        .copied()
        .fold(None, |best: Option<FpsRange>, range| match best {
            Some(current) if current.max >= range.max => Some(current),
            _ => Some(range),
        })
}

/// Largest still-capture size, or `fallback` when there is none.
pub fn select_photo_size(catalog: &[Resolution], fallback: Resolution) -> Resolution {
    catalog
        .iter()
        .copied()
        .fold(None, |best: Option<Resolution>, size| match best {
            Some(current) if current.area() >= size.area() => Some(current),
            _ => Some(size),
        })
        .unwrap_or(fallback)
}

/// Image-quality settings requested on every camera open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enhancements {
    pub continuous_auto_focus: bool,
    pub auto_exposure: bool,
    pub auto_white_balance: bool,
    pub high_quality_noise_reduction: bool,
    pub high_quality_edges: bool,
    pub video_stabilization: bool,
    pub optical_stabilization: bool,
}

impl Enhancements {
    /// Back lenses stabilise in the video pipeline, front lenses optically.
    pub fn for_facing(facing: Facing) -> Self {
        Self {
            continuous_auto_focus: true,
            auto_exposure: true,
            auto_white_balance: true,
            high_quality_noise_reduction: true,
            high_quality_edges: true,
            video_stabilization: facing.is_back(),
            optical_stabilization: !facing.is_back(),
        }
    }

    pub fn stabilization(&self) -> bool {
        self.video_stabilization || self.optical_stabilization
    }
}

/// Reported to the frontend as `quality`.
pub fn quality_label(enhanced: bool) -> &'static str {
    if enhanced {
        "enhanced"
    } else {
        "standard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: u32, max: u32) -> FpsRange {
        FpsRange { min, max }
    }

    #[test]
    fn test_preferred_fps_locked_when_covered() {
        let ranges = [range(15, 15), range(7, 30), range(60, 60)];
        assert_eq!(select_fps_range(&ranges, 30), Some(FpsRange::fixed(30)));
    }

    #[test]
    fn test_highest_range_when_preferred_missing() {
        let ranges = [range(10, 24), range(5, 25), range(1, 15)];
        assert_eq!(select_fps_range(&ranges, 30), Some(range(5, 25)));
    }

    #[test]
    fn test_highest_range_tie_keeps_first() {
        let ranges = [range(10, 24), range(20, 24)];
        assert_eq!(select_fps_range(&ranges, 30), Some(range(10, 24)));
    }

    #[test]
    fn test_no_ranges() {
        assert_eq!(select_fps_range(&[], 30), None);
    }

    #[test]
    fn test_photo_size_largest_area() {
        let catalog = [
            Resolution::new(1920, 1080),
            Resolution::new(4032, 3024),
            Resolution::new(3024, 4032),
        ];
        assert_eq!(
            select_photo_size(&catalog, PHOTO_FALLBACK),
            Resolution::new(4032, 3024)
        );
    }

    #[test]
    fn test_photo_size_fallback() {
        assert_eq!(select_photo_size(&[], PHOTO_FALLBACK), PHOTO_FALLBACK);
    }

    #[test]
    fn test_enhancements_stabilization_by_lens() {
        let back = Enhancements::for_facing(Facing::Back);
        assert!(back.video_stabilization && !back.optical_stabilization);
        let front = Enhancements::for_facing(Facing::Front);
        assert!(!front.video_stabilization && front.optical_stabilization);
        for settings in [back, front] {
            assert!(settings.continuous_auto_focus);
            assert!(settings.auto_exposure);
            assert!(settings.auto_white_balance);
            assert!(settings.stabilization());
        }
    }

    #[test]
    fn test_quality_label() {
        assert_eq!(quality_label(true), "enhanced");
        assert_eq!(quality_label(false), "standard");
    }
}
