use serde::{Deserialize, Serialize};

/// Preferred preview size (1080p).
pub const TARGET_RESOLUTION: Resolution = Resolution::new(1920, 1080);
/// Used when a device reports no output sizes at all (720p).
pub const FALLBACK_RESOLUTION: Resolution = Resolution::new(1280, 720);
/// Quality floor for the closest aspect ratio phase.
pub const MIN_WIDTH: u32 = 1280;

/// Pixel dimensions of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel area, widened so large sensors cannot overflow.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The constants [`select`] runs with, grouped so they can be configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub target: Resolution,
    pub fallback: Resolution,
    pub min_width: u32,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            target: TARGET_RESOLUTION,
            fallback: FALLBACK_RESOLUTION,
            min_width: MIN_WIDTH,
        }
    }
}

impl SelectionPolicy {
    pub fn select(&self, catalog: &[Resolution]) -> Resolution {
        select(catalog, self.target, self.fallback, self.min_width)
    }
}

/// Pick the best resolution a device supports for `target`.
///
/// An exact match wins. Otherwise the entry at least `min_width` wide whose
/// aspect ratio is closest to the target's is returned, with ties going to
/// the larger entry. When nothing clears `min_width` the largest entry is
/// returned, and an empty catalog yields `fallback`.
///
/// The result is always a member of `catalog` unless it is empty.
pub fn select(
    catalog: &[Resolution],
    target: Resolution,
    fallback: Resolution,
    min_width: u32,
) -> Resolution {
    if catalog.is_empty() {
        log::warn!("Empty resolution catalog, using fallback {}", fallback);
        return fallback;
    }

    // Stable, so equal areas keep the device's order.
    let mut sorted = catalog.to_vec();
    sorted.sort_by(|a, b| b.area().cmp(&a.area()));

    if let Some(exact) = sorted.iter().find(|size| **size == target) {
        log::debug!("Exact resolution match {}", exact);
        return *exact;
    }

    let target_ratio = target.aspect_ratio();
    let mut best = sorted[0];
    let mut min_diff = f64::INFINITY;

    for size in sorted.iter().filter(|size| size.width >= min_width) {
        let ratio_diff = (size.aspect_ratio() - target_ratio).abs();
        if ratio_diff < min_diff {
            min_diff = ratio_diff;
            best = *size;
        }
    }

    if sorted.iter().all(|size| size.width < min_width) {
        log::warn!(
            "No resolution at least {} wide, using largest available {}",
            min_width,
            best
        );
    }
    log::debug!(
        "Available sizes: {:?}",
        catalog.iter().map(ToString::to_string).collect::<Vec<_>>()
    );
    log::debug!("Selected optimal size: {}", best);

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn res(width: u32, height: u32) -> Resolution {
        Resolution::new(width, height)
    }

    #[test]
    fn test_exact_match_wins() {
        let catalog = [res(4032, 3024), res(1920, 1080), res(1280, 720)];
        let chosen = select(&catalog, res(1920, 1080), FALLBACK_RESOLUTION, MIN_WIDTH);
        assert_eq!(chosen, res(1920, 1080));
    }

    #[test]
    fn test_ratio_tie_keeps_larger_entry() {
        let catalog = [res(4032, 3024), res(1600, 1200)];
        let chosen = select(&catalog, res(1920, 1080), FALLBACK_RESOLUTION, 1280);
        assert_eq!(chosen, res(4032, 3024));
    }

    #[test]
    fn test_ratio_tie_independent_of_input_order() {
        let catalog = [res(1600, 1200), res(4032, 3024)];
        let chosen = select(&catalog, res(1920, 1080), FALLBACK_RESOLUTION, 1280);
        assert_eq!(chosen, res(4032, 3024));
    }

    #[test]
    fn test_empty_catalog_returns_fallback() {
        let chosen = select(&[], res(1920, 1080), res(1280, 720), MIN_WIDTH);
        assert_eq!(chosen, res(1280, 720));
    }

    #[test]
    fn test_nothing_above_floor_returns_largest() {
        let chosen = select(&[res(640, 480)], res(1920, 1080), FALLBACK_RESOLUTION, 1280);
        assert_eq!(chosen, res(640, 480));

        let catalog = [res(320, 240), res(800, 600), res(640, 360)];
        let chosen = select(&catalog, res(1920, 1080), FALLBACK_RESOLUTION, 1280);
        assert_eq!(chosen, res(800, 600));
    }

    #[test]
    fn test_floor_beats_perfect_ratio() {
        // 1280x720 is a perfect 16:9 but sits below the floor.
        let catalog = [res(1280, 720), res(1600, 1200)];
        let chosen = select(&catalog, res(1920, 1080), FALLBACK_RESOLUTION, 1600);
        assert_eq!(chosen, res(1600, 1200));
    }

    #[test]
    fn test_closest_ratio_preferred_over_area() {
        let catalog = [res(4032, 3024), res(2560, 1440), res(1280, 960)];
        let chosen = select(&catalog, res(1920, 1080), FALLBACK_RESOLUTION, MIN_WIDTH);
        assert_eq!(chosen, res(2560, 1440));
    }

    #[test]
    fn test_ratio_uses_real_division() {
        // Integer division would make 4:3 and 16:9 both collapse to 1.
        let catalog = [res(1600, 1200), res(1280, 720)];
        let chosen = select(&catalog, res(3840, 2160), FALLBACK_RESOLUTION, MIN_WIDTH);
        assert_eq!(chosen, res(1280, 720));
    }

    #[test]
    fn test_duplicates_are_tolerated() {
        let catalog = [res(1280, 720), res(1280, 720), res(640, 480)];
        let chosen = select(&catalog, res(1920, 1080), FALLBACK_RESOLUTION, MIN_WIDTH);
        assert_eq!(chosen, res(1280, 720));
    }

    #[test]
    fn test_zero_height_target_does_not_panic() {
        let catalog = [res(1920, 1080), res(4000, 3000)];
        let chosen = select(&catalog, res(1920, 0), FALLBACK_RESOLUTION, MIN_WIDTH);
        assert_eq!(chosen, res(4000, 3000));
    }

    #[test]
    fn test_policy_defaults() {
        let policy = SelectionPolicy::default();
        assert_eq!(policy.target, res(1920, 1080));
        assert_eq!(policy.fallback, res(1280, 720));
        assert_eq!(policy.min_width, 1280);
        assert_eq!(policy.select(&[]), res(1280, 720));
    }

    #[test]
    fn test_display() {
        assert_eq!(res(1920, 1080).to_string(), "1920x1080");
    }

    fn resolution_strategy() -> impl Strategy<Value = Resolution> {
        (1u32..8192, 1u32..8192).prop_map(|(w, h)| Resolution::new(w, h))
    }

    proptest! {
        #[test]
        fn prop_result_is_member(
            catalog in prop::collection::vec(resolution_strategy(), 1..32),
            target in resolution_strategy(),
            min_width in 0u32..4096,
        ) {
            let chosen = select(&catalog, target, FALLBACK_RESOLUTION, min_width);
            prop_assert!(catalog.contains(&chosen));
        }

        #[test]
        fn prop_contained_target_is_returned(
            mut catalog in prop::collection::vec(resolution_strategy(), 0..32),
            target in resolution_strategy(),
            index in any::<prop::sample::Index>(),
            min_width in 0u32..4096,
        ) {
            let at = index.index(catalog.len() + 1);
            catalog.insert(at, target);
            prop_assert_eq!(select(&catalog, target, FALLBACK_RESOLUTION, min_width), target);
        }

        #[test]
        fn prop_empty_catalog_is_fallback(
            target in resolution_strategy(),
            fallback in resolution_strategy(),
            min_width in any::<u32>(),
        ) {
            prop_assert_eq!(select(&[], target, fallback, min_width), fallback);
        }

        #[test]
        fn prop_selection_is_idempotent(
            catalog in prop::collection::vec(resolution_strategy(), 0..32),
            target in resolution_strategy(),
            min_width in 0u32..4096,
        ) {
            let first = select(&catalog, target, FALLBACK_RESOLUTION, min_width);
            let second = select(&catalog, target, FALLBACK_RESOLUTION, min_width);
            prop_assert_eq!(first, second);
        }
    }
}
