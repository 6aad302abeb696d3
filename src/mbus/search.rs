//! Byte pattern search within a frame.

use crate::mbus::frame::FrameView;

/// Position of the leftmost occurrence of `needle` in `haystack`.
///
/// Only full matches count: a position with fewer than `needle.len()` bytes
/// left in the view is never compared. An empty needle matches nowhere.
///
/// Leftmost matters for OBIS lookups, since a code can reappear later in a
/// frame as part of a value and only the first occurrence is the tag.
///
/// ```rust
/// use mbus_meter::mbus::frame::FrameView;
/// use mbus_meter::mbus::search::find;
///
/// let buffer = [0x7E, 0x09, 0x06, 0x09, 0x06, 0x7E];
/// let view = FrameView::new(&buffer, 0, buffer.len()).unwrap();
/// assert_eq!(find(&view, &[0x09, 0x06]), Some(1));
/// assert_eq!(find(&view, &[0x06, 0x7E, 0x00]), None);
/// ```
pub fn find(haystack: &FrameView<'_>, needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_needle_longer_than_haystack() {
        let buffer = [0x09, 0x06];
        let view = FrameView::new(&buffer, 0, 2).unwrap();
        assert_eq!(find(&view, &[0x09, 0x06, 0x01]), None);
    }

    #[test]
    fn test_search_stays_inside_view() {
        // The match would straddle the end of the view into the rest of the buffer.
        let buffer = [0x7E, 0x01, 0x09, 0x06, 0x01];
        let view = FrameView::new(&buffer, 0, 3).unwrap();
        assert_eq!(find(&view, &[0x09, 0x06]), None);
    }

    proptest! {
        #[test]
        fn prop_find_returns_leftmost_match(
            prefix in proptest::collection::vec(0u8..4, 0..32),
            needle in proptest::collection::vec(0u8..4, 1..4),
            suffix in proptest::collection::vec(0u8..4, 0..32),
        ) {
            let mut buffer = prefix.clone();
            buffer.extend_from_slice(&needle);
            buffer.extend_from_slice(&suffix);
            let view = FrameView::new(&buffer, 0, buffer.len()).unwrap();

            let found = find(&view, &needle);
            let expected = buffer.windows(needle.len()).position(|w| w == needle.as_slice());
            prop_assert_eq!(found, expected);
            prop_assert!(found.unwrap() <= prefix.len());
        }
    }
}
