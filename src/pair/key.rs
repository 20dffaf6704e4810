//! Identifier extraction
//!
//! A noisy image and its clean counterpart share everything in their
//! filename up to the last underscore segment: `scene_01_noisy.png` and
//! `scene_01_gt.png` both carry the identifier `scene_01`.

/// Derive the pairing key for a filename.
///
/// The extension is stripped, the remaining name is split on underscores
/// and the final segment is dropped. A name without underscores yields the
/// empty key; empty-key collisions are ordinary catalog collisions.
pub fn pair_key(filename: &str) -> String {
    let stem = filename
        .rsplit_once('.')
        .map_or(filename, |(stem, _ext)| stem);

    match stem.rsplit_once('_') {
        Some((head, _tail)) => head.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_basic() {
        assert_eq!(pair_key("sceneA_001_noisy.jpg"), "sceneA_001");
        assert_eq!(pair_key("scene_01_gt.png"), "scene_01");
    }

    #[test]
    fn test_pair_key_matches_across_variants() {
        // Clean and noisy names with different suffixes and extensions
        // must map to the same key.
        assert_eq!(pair_key("park_12_noisy.png"), "park_12");
        assert_eq!(pair_key("park_12_clean.jpg"), "park_12");
    }

    #[test]
    fn test_pair_key_single_underscore() {
        assert_eq!(pair_key("a_1.png"), "a");
        assert_eq!(pair_key("a_2.png"), "a");
    }

    #[test]
    fn test_pair_key_no_underscore_is_empty() {
        assert_eq!(pair_key("photo.png"), "");
        assert_eq!(pair_key("x.jpeg"), "");
    }

    #[test]
    fn test_pair_key_trailing_underscore() {
        assert_eq!(pair_key("scene_.png"), "scene");
    }

    #[test]
    fn test_pair_key_leading_underscore() {
        assert_eq!(pair_key("_1.png"), "");
    }

    #[test]
    fn test_pair_key_dotted_stem() {
        // Only the final extension is stripped.
        assert_eq!(pair_key("a.b_c.png"), "a.b");
    }

    #[test]
    fn test_pair_key_no_extension() {
        assert_eq!(pair_key("scene_01_noisy"), "scene_01");
    }
}
