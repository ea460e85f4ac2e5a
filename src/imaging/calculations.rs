//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any pixel data.
//!
//! Both aspect-aware resize modes share one decision rule: compare the
//! target ratio `width / height` with the source ratio `src_w / src_h`. The
//! comparison is done by cross-multiplication so ties are exact. The axis that
//! needs more (or less) scaling is clamped to the target, and the other is
//! derived proportionally with floor division.

/// Orders the target ratio `tgt_w / tgt_h` against the source ratio `src_w / src_h`.
fn compare_ratios(source: (u32, u32), target: (u32, u32)) -> std::cmp::Ordering {
    let (src_w, src_h) = (source.0 as u64, source.1 as u64);
    let (tgt_w, tgt_h) = (target.0 as u64, target.1 as u64);
    (tgt_w * src_h).cmp(&(src_w * tgt_h))
}

/// `value * numerator / denominator` with floor division, never below 1.
fn scale_axis(value: u32, numerator: u32, denominator: u32) -> u32 {
    let scaled = value as u64 * numerator as u64 / denominator as u64;
    scaled.clamp(1, u32::MAX as u64) as u32
}

/// Calculate dimensions that completely cover the target area (crop-fill).
///
/// One dimension matches the target exactly, the other may exceed it.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `target` - Target area dimensions (width, height)
pub fn fill_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    if compare_ratios(source, target).is_gt() {
        // Target is wider: width matches, height overflows
        (tgt_w, scale_axis(src_h, tgt_w, src_w))
    } else {
        // Target is taller or equal: height matches, width overflows
        (scale_axis(src_w, tgt_h, src_h), tgt_h)
    }
}

/// Calculate dimensions that fit entirely inside the target area (fit-extend).
///
/// One dimension matches the target exactly, the other may fall short.
pub fn fit_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    if compare_ratios(source, target).is_lt() {
        // Target is taller: width matches, height falls short
        (tgt_w, scale_axis(src_h, tgt_w, src_w))
    } else {
        (scale_axis(src_w, tgt_h, src_h), tgt_h)
    }
}

/// Top-left offset that centers `inner` inside `outer`.
///
/// Offsets are `outer / 2 - inner / 2` per axis with integer division, so an
/// odd leftover pixel lands on the bottom/right side. Negative offsets mean
/// `inner` overflows and gets cropped.
pub fn center_offset(outer: (u32, u32), inner: (u32, u32)) -> (i64, i64) {
    (
        outer.0 as i64 / 2 - inner.0 as i64 / 2,
        outer.1 as i64 / 2 - inner.1 as i64 / 2,
    )
}

/// Source-pixel window `(x, y, width, height)` that ends up visible when
/// `source` is scaled to `scaled` and center-cropped to `target`.
///
/// Matches the crop [`center_offset`] produces, widened to whole source
/// pixels. `scaled` must cover `target` on both axes.
pub fn crop_window(
    source: (u32, u32),
    scaled: (u32, u32),
    target: (u32, u32),
) -> (u32, u32, u32, u32) {
    let (x, width) = window_axis(source.0, scaled.0, target.0);
    let (y, height) = window_axis(source.1, scaled.1, target.1);
    (x, y, width, height)
}

fn window_axis(source: u32, scaled: u32, target: u32) -> (u32, u32) {
    let (source, scaled) = (source as u64, scaled as u64);
    let start = scaled / 2 - (target as u64 / 2).min(scaled / 2);
    let end = (start + target as u64).min(scaled);

    let first = start * source / scaled;
    let last = (end * source).div_ceil(scaled).clamp(first + 1, source);
    (first as u32, (last - first) as u32)
}

/// Dimensions after capping the area to `max_pixels`, or `None` when the
/// image already fits the budget.
///
/// The scale factor is `sqrt(max_pixels / area)`; each axis is truncated
/// independently, so the aspect ratio is only preserved up to rounding.
/// Neither axis drops below 1. For extreme aspect ratios the longer axis is
/// shortened further so the area stays within budget (for any budget >= 1).
pub fn capped_dimensions(dims: (u32, u32), max_pixels: u64) -> Option<(u32, u32)> {
    let (width, height) = dims;
    let area = width as u64 * height as u64;
    if area == 0 {
        return None;
    }

    let k = (max_pixels as f64 / area as f64).sqrt();
    if k >= 1.0 {
        return None;
    }

    let new_w = ((width as f64 * k) as u32).max(1);
    let new_h = ((height as f64 * k) as u32).max(1);
    // Clamping one axis up to 1 can push the area over budget; shrink the other
    let new_w = new_w.min(axis_budget(max_pixels, new_h));
    let new_h = new_h.min(axis_budget(max_pixels, new_w));
    Some((new_w, new_h))
}

/// Largest length (at least 1) that keeps `length * other <= max_pixels`.
fn axis_budget(max_pixels: u64, other: u32) -> u32 {
    let length = (max_pixels / u64::from(other)).max(1);
    u32::try_from(length).unwrap_or(u32::MAX)
}

/// Whether an image of `dims` is at least as large as `canvas` on both axes.
///
/// Used to tell if a previously generated image still matches the current
/// canvas size.
pub fn covers_canvas(dims: (u32, u32), canvas: (u32, u32)) -> bool {
    dims.0 >= canvas.0 && dims.1 >= canvas.1
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // fill_dimensions tests
    // =========================================================================

    #[test]
    fn fill_wider_source_to_square_target() {
        // 800x600 → 400x400: height matches, width = 800 * 400 / 600 = 533
        assert_eq!(fill_dimensions((800, 600), (400, 400)), (533, 400));
    }

    #[test]
    fn fill_taller_source_to_landscape_target() {
        // 600x800 → 500x400: width matches, height = 800 * 500 / 600 = 666
        assert_eq!(fill_dimensions((600, 800), (500, 400)), (500, 666));
    }

    #[test]
    fn fill_same_aspect_ratio() {
        assert_eq!(fill_dimensions((800, 600), (400, 300)), (400, 300));
    }

    #[test]
    fn fill_always_covers_target() {
        for source in [(1, 1000), (1000, 1), (37, 91), (640, 480)] {
            for target in [(512, 512), (1024, 576), (3, 7)] {
                let (w, h) = fill_dimensions(source, target);
                assert!(w >= target.0 && h >= target.1, "{source:?} → {target:?}");
            }
        }
    }

    // =========================================================================
    // fit_dimensions tests
    // =========================================================================

    #[test]
    fn fit_wider_source_into_square() {
        // 800x600 → 400x400: width matches, height = 600 * 400 / 800 = 300
        assert_eq!(fit_dimensions((800, 600), (400, 400)), (400, 300));
    }

    #[test]
    fn fit_taller_source_into_landscape() {
        // 600x800 → 500x400: height matches, width = 600 * 400 / 800 = 300
        assert_eq!(fit_dimensions((600, 800), (500, 400)), (300, 400));
    }

    #[test]
    fn fit_never_exceeds_target() {
        for source in [(1, 1000), (1000, 1), (37, 91), (640, 480)] {
            for target in [(512, 512), (1024, 576), (3, 7)] {
                let (w, h) = fit_dimensions(source, target);
                assert!(w <= target.0 && h <= target.1, "{source:?} → {target:?}");
            }
        }
    }

    #[test]
    fn fit_extreme_ratio_clamps_to_one_pixel() {
        // 1000x1 into 10x10 would floor to height 0
        assert_eq!(fit_dimensions((1000, 1), (10, 10)), (10, 1));
    }

    // =========================================================================
    // center_offset tests
    // =========================================================================

    #[test]
    fn center_offset_even_split() {
        assert_eq!(center_offset((10, 10), (4, 10)), (3, 0));
    }

    #[test]
    fn center_offset_odd_remainder_goes_right() {
        // 5 / 2 - 2 / 2 = 1: one column on the left, two on the right
        assert_eq!(center_offset((5, 4), (2, 4)), (1, 0));
    }

    #[test]
    fn center_offset_negative_when_overflowing() {
        assert_eq!(center_offset((2, 2), (8, 2)), (-3, 0));
    }

    // =========================================================================
    // crop_window tests
    // =========================================================================

    #[test]
    fn crop_window_without_scaling_matches_center_offset() {
        // 8x2 cropped to 2x2: offset -3, so columns 3 and 4
        assert_eq!(crop_window((8, 2), (8, 2), (2, 2)), (3, 0, 2, 2));
    }

    #[test]
    fn crop_window_covers_fractional_source_pixels() {
        // Rows 19980..20020 of 40000 scaled rows map to source rows 499.5..500.5
        assert_eq!(crop_window((1, 1000), (40, 40000), (40, 40)), (0, 499, 1, 2));
    }

    #[test]
    fn crop_window_stays_inside_source() {
        for (source, target) in [((3, 977), (64, 64)), ((1000, 1), (7, 9)), ((5, 5), (5, 5))] {
            let scaled = fill_dimensions(source, target);
            let (x, y, w, h) = crop_window(source, scaled, target);
            assert!(w >= 1 && h >= 1);
            assert!(x + w <= source.0 && y + h <= source.1, "{source:?} -> {target:?}");
        }
    }

    // =========================================================================
    // capped_dimensions tests
    // =========================================================================

    #[test]
    fn capped_within_budget_is_none() {
        assert_eq!(capped_dimensions((2048, 2048), 2048 * 2048), None);
        assert_eq!(capped_dimensions((100, 50), 5000), None);
    }

    #[test]
    fn capped_halves_each_axis() {
        // k = sqrt(1250 / 5000) = 0.5
        assert_eq!(capped_dimensions((100, 50), 1250), Some((50, 25)));
    }

    #[test]
    fn capped_truncates_each_axis() {
        let (w, h) = capped_dimensions((4000, 3000), 2048 * 2048).unwrap();
        assert!(w as u64 * h as u64 <= 2048 * 2048);
        assert!(w < 4000 && h < 3000);
    }

    #[test]
    fn capped_extreme_ratio_stays_within_budget() {
        // k = sqrt(1000 / 5000) truncates the short axis to 0, clamped to 1
        assert_eq!(capped_dimensions((5000, 1), 1000), Some((1000, 1)));
        assert_eq!(capped_dimensions((1, 5000), 1000), Some((1, 1000)));
        assert_eq!(capped_dimensions((9000, 3), 10), Some((10, 1)));
    }

    #[test]
    fn capped_zero_area_is_none() {
        assert_eq!(capped_dimensions((0, 10), 100), None);
    }

    // =========================================================================
    // covers_canvas tests
    // =========================================================================

    #[test]
    fn covers_canvas_requires_both_axes() {
        assert!(covers_canvas((1024, 1024), (1024, 1024)));
        assert!(covers_canvas((1200, 1100), (1024, 1024)));
        assert!(!covers_canvas((1000, 2000), (1024, 1024)));
        assert!(!covers_canvas((2000, 1000), (1024, 1024)));
    }
}
