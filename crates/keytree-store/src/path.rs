//! Colon-delimited paths.
//!
//! A path such as `"a:b:c"` addresses key `c` of the store at `b` of the
//! store at `a`. Segments are routed one hop at a time, so the helpers here
//! only ever split off the first segment.

use crate::error::{Result, StoreError};

/// Segment separator.
pub const SEPARATOR: char = ':';

/// Default limit on the number of segments in a path.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Split a path into its first segment and the remainder.
///
/// The remainder is `None` for a single-segment path. `"a:"` has two
/// segments, the second one empty.
pub fn split_first(path: &str) -> (&str, Option<&str>) {
    match path.split_once(SEPARATOR) {
        Some((key, rest)) => (key, Some(rest)),
        None => (path, None),
    }
}

/// Number of segments in a path. The empty path has none.
pub fn depth(path: &str) -> usize {
    if path.is_empty() {
        0
    } else {
        path.matches(SEPARATOR).count() + 1
    }
}

/// Join segments into a path.
pub fn join<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut path = String::new();
    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            path.push(SEPARATOR);
        }
        path.push_str(segment.as_ref());
    }
    path
}

/// Whether `key` can name a single slot.
pub fn is_valid_key(key: &str) -> bool {
    !key.contains(SEPARATOR)
}

/// Reject paths deeper than `max`.
pub fn check_depth(path: &str, max: usize) -> Result<()> {
    let depth = depth(path);
    if depth > max {
        return Err(StoreError::PathTooDeep { depth, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_split_first() {
        assert_eq!(split_first("a"), ("a", None));
        assert_eq!(split_first("a:b"), ("a", Some("b")));
        assert_eq!(split_first("a:b:c"), ("a", Some("b:c")));
        assert_eq!(split_first("a:"), ("a", Some("")));
        assert_eq!(split_first(""), ("", None));
    }

    #[test]
    fn test_depth() {
        assert_eq!(depth(""), 0);
        assert_eq!(depth("a"), 1);
        assert_eq!(depth("a:b:c"), 3);
        assert_eq!(depth("a::c"), 3);
    }

    #[test]
    fn test_join() {
        assert_eq!(join(["a", "b", "c"]), "a:b:c");
        assert_eq!(join(Vec::<String>::new()), "");
        assert_eq!(join(vec!["only".to_string()]), "only");
    }

    #[test]
    fn test_check_depth() {
        assert!(check_depth("a:b", 2).is_ok());
        assert_eq!(
            check_depth("a:b:c", 2),
            Err(StoreError::PathTooDeep { depth: 3, max: 2 })
        );
    }

    #[test]
    fn test_valid_key() {
        assert!(is_valid_key("name"));
        assert!(!is_valid_key("a:b"));
    }

    proptest! {
        #[test]
        fn test_split_join_agree(segments in prop::collection::vec("[a-z]{1,8}", 1..8)) {
            let joined = join(&segments);
            prop_assert_eq!(depth(&joined), segments.len());

            let (first, rest) = split_first(&joined);
            prop_assert_eq!(first, segments[0].as_str());
            prop_assert_eq!(rest.map(str::to_string), (segments.len() > 1).then(|| join(&segments[1..])));
        }
    }
}
