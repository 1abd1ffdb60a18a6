//! Pure dimension math for the downsampling rule.

/// Target dimensions for fitting `dims` inside a `max_edge` square.
///
/// Returns `None` when both edges are already within bounds (the caller
/// must not touch the file). Otherwise scales the longer edge down to
/// `max_edge`, preserving aspect ratio with round-to-nearest, and never
/// collapsing the short edge below 1.
pub fn fit_within(dims: (u32, u32), max_edge: u32) -> Option<(u32, u32)> {
    let (width, height) = dims;
    if width <= max_edge && height <= max_edge {
        return None;
    }
    if width >= height {
        let scaled = (height as u64 * max_edge as u64 + width as u64 / 2) / width as u64;
        Some((max_edge, (scaled as u32).max(1)))
    } else {
        let scaled = (width as u64 * max_edge as u64 + height as u64 / 2) / height as u64;
        Some(((scaled as u32).max(1), max_edge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_image_scales_on_width() {
        assert_eq!(fit_within((1000, 500), 400), Some((400, 200)));
    }

    #[test]
    fn tall_image_scales_on_height() {
        assert_eq!(fit_within((500, 1000), 400), Some((200, 400)));
    }

    #[test]
    fn within_bounds_is_a_noop() {
        assert_eq!(fit_within((300, 200), 400), None);
        assert_eq!(fit_within((400, 400), 400), None);
    }

    #[test]
    fn one_oversized_edge_triggers_resize() {
        // Height fits, width does not.
        assert_eq!(fit_within((800, 100), 400), Some((400, 50)));
    }

    #[test]
    fn square_oversize() {
        assert_eq!(fit_within((1200, 1200), 400), Some((400, 400)));
    }

    #[test]
    fn rounding_is_nearest_not_truncation() {
        // 999 * 400 / 1000 = 399.6 → 400
        assert_eq!(fit_within((1000, 999), 400), Some((400, 400)));
    }

    #[test]
    fn extreme_aspect_never_collapses_to_zero() {
        assert_eq!(fit_within((100_000, 10), 400), Some((400, 1)));
    }
}
