//! Record segmentation: split one OCR page into per-record line groups.
//!
//! Record boundaries are anchored on a single high-precision signal, a line
//! that opens with a customer ID and carries an email address. Every other
//! field moves around between form layouts.

use tracing::{debug, trace};

use crate::models::config::DEFAULT_MIN_GROUP_LEN;
use crate::text::{clean_text, normalize_line_endings};

use super::rules::patterns::{EMAIL_LOOSE, RECORD_ID_PREFIX};

/// Decides whether a trimmed, non-empty line opens a new record.
pub trait RecordStartDetector: Send + Sync {
    fn is_record_start(&self, line: &str) -> bool;
}

impl<F> RecordStartDetector for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_record_start(&self, line: &str) -> bool {
        self(line)
    }
}

/// Default anchor: five-digit ID at line start plus an email on the same line.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdEmailAnchor;

impl RecordStartDetector for IdEmailAnchor {
    fn is_record_start(&self, line: &str) -> bool {
        RECORD_ID_PREFIX.is_match(line) && EMAIL_LOOSE.is_match(line)
    }
}

/// Lines believed to belong to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineGroup {
    lines: Vec<String>,
    normalized: String,
}

impl LineGroup {
    fn new(lines: Vec<String>) -> Self {
        let normalized = clean_text(&lines.join("\n"));
        Self { lines, normalized }
    }

    /// Trimmed source lines, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Source lines rejoined with line breaks.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Normalized text used for field extraction.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

/// Counters describing one segmentation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentationStats {
    /// Lines recognized as record starts.
    pub start_lines: usize,
    /// Groups discarded for being shorter than the minimum length.
    pub dropped_groups: usize,
    /// Lines seen before the first record start.
    pub orphan_lines: usize,
}

/// Output of [`Segmenter::segment`].
#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    /// Kept groups, in document order.
    pub groups: Vec<LineGroup>,
    pub stats: SegmentationStats,
}

/// Line-by-line record segmenter.
#[derive(Debug, Clone)]
pub struct Segmenter<D = IdEmailAnchor> {
    detector: D,
    min_group_len: usize,
}

impl Segmenter {
    /// Segmenter using the ID + email anchor.
    pub fn new() -> Self {
        Self::with_detector(IdEmailAnchor)
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: RecordStartDetector> Segmenter<D> {
    /// Segmenter using a custom record-start detector.
    pub fn with_detector(detector: D) -> Self {
        Self {
            detector,
            min_group_len: DEFAULT_MIN_GROUP_LEN,
        }
    }

    /// Set the minimum normalized length for a group to be kept.
    pub fn with_min_group_len(mut self, min_group_len: usize) -> Self {
        self.min_group_len = min_group_len;
        self
    }

    pub fn min_group_len(&self) -> usize {
        self.min_group_len
    }

    /// Split `text` into record line groups.
    ///
    /// Blank lines are skipped without closing the open group. Lines before
    /// the first record start have no reliable owner and are dropped.
    pub fn segment(&self, text: &str) -> Segmentation {
        let mut out = Segmentation::default();
        let mut buffer: Option<Vec<String>> = None;

        for line in normalize_line_endings(text).split('\n') {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if self.detector.is_record_start(line) {
                out.stats.start_lines += 1;
                if let Some(lines) = buffer.replace(vec![line.to_string()]) {
                    self.finish_group(lines, &mut out);
                }
            } else if let Some(lines) = buffer.as_mut() {
                lines.push(line.to_string());
            } else {
                trace!("Dropping line before first record start: {:?}", line);
                out.stats.orphan_lines += 1;
            }
        }

        if let Some(lines) = buffer.take() {
            self.finish_group(lines, &mut out);
        }

        debug!(
            "Segmented {} record starts into {} groups ({} dropped, {} orphan lines)",
            out.stats.start_lines,
            out.groups.len(),
            out.stats.dropped_groups,
            out.stats.orphan_lines
        );

        out
    }

    fn finish_group(&self, lines: Vec<String>, out: &mut Segmentation) {
        let group = LineGroup::new(lines);
        if group.normalized().len() < self.min_group_len {
            debug!(
                "Dropping {}-character group below minimum of {}",
                group.normalized().len(),
                self.min_group_len
            );
            out.stats.dropped_groups += 1;
        } else {
            out.groups.push(group);
        }
    }
}
