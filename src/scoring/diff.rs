//! Character-level diff between a transcript and its target.
//!
//! Lets a caller highlight which letters were dropped or added. Both sides
//! are normalized first so cosmetic differences never show up as edits.

use serde::Serialize;
use similar::{Algorithm, ChangeTag, TextDiff};

use super::normalize::normalize;

/// How a run of characters relates to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentKind {
    Equal,
    /// Present in the target but not spoken.
    Missing,
    /// Spoken but not in the target.
    Extra,
}

/// A maximal run of characters with the same [`SegmentKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffSegment {
    pub kind: SegmentKind,
    pub text: String,
}

/// Diff the normalized `spoken` text against the normalized `target`.
///
/// Concatenating the `Equal` and `Missing` segments yields the normalized
/// target; `Equal` and `Extra` yield the normalized transcript.
pub fn char_diff(spoken: &str, target: &str) -> Vec<DiffSegment> {
    let spoken = normalize(spoken);
    let target = normalize(target);

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_chars(&target, &spoken);

    let mut segments: Vec<DiffSegment> = Vec::new();
    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => SegmentKind::Equal,
            ChangeTag::Delete => SegmentKind::Missing,
            ChangeTag::Insert => SegmentKind::Extra,
        };
        match segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(change.value()),
            _ => segments.push(DiffSegment {
                kind,
                text: change.value().to_owned(),
            }),
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(segments: &[DiffSegment], skip: SegmentKind) -> String {
        segments
            .iter()
            .filter(|s| s.kind != skip)
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn test_identical_is_one_equal_segment() {
        let segments = char_diff("Hello!", "hello");
        assert_eq!(
            segments,
            vec![DiffSegment {
                kind: SegmentKind::Equal,
                text: "hello".to_owned()
            }]
        );
    }

    #[test]
    fn test_single_missing_letter() {
        let segments = char_diff("beutiful", "beautiful");
        let kinds: Vec<SegmentKind> = segments.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SegmentKind::Equal, SegmentKind::Missing, SegmentKind::Equal]
        );
        assert_eq!(segments[1].text, "a");
    }

    #[test]
    fn test_segments_reconstruct_both_sides() {
        let spoken = "I lick apple";
        let target = "I like apples";
        let segments = char_diff(spoken, target);
        assert_eq!(collect(&segments, SegmentKind::Extra), normalize(target));
        assert_eq!(collect(&segments, SegmentKind::Missing), normalize(spoken));
    }

    #[test]
    fn test_empty_spoken_is_all_missing() {
        let segments = char_diff("", "cat");
        assert_eq!(
            segments,
            vec![DiffSegment {
                kind: SegmentKind::Missing,
                text: "cat".to_owned()
            }]
        );
    }

    #[test]
    fn test_both_empty() {
        assert!(char_diff("", "?").is_empty());
    }
}
