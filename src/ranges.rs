//! Page-range expression parsing.
//!
//! Translates user-entered range strings like `"1, 3-5, 8"` into validated,
//! clamped, zero-based page intervals. Expressions are 1-based and inclusive
//! on the user-facing side; intervals are 0-based and half-open on the way
//! out, which is what the append primitive consumes.
//!
//! Parsing is deliberately lenient: malformed tokens, out-of-range singles,
//! and inverted ranges are dropped silently instead of failing the whole
//! expression. The only observable effect of bad input is fewer selected
//! pages. Callers that want to distinguish "nothing selected" from "nothing
//! requested" can compare the result against the raw expression themselves.
//!
//! # Examples
//!
//! ```
//! use pdfstitch::ranges::{PageInterval, parse_page_ranges};
//!
//! let intervals = parse_page_ranges("1, 3-5, 8", 10);
//! assert_eq!(
//!     intervals,
//!     vec![
//!         PageInterval::new(0, 1),
//!         PageInterval::new(2, 5),
//!         PageInterval::new(7, 8),
//!     ]
//! );
//! ```

/// A contiguous run of pages, zero-based, half-open `[start, end)`.
///
/// Invariant: `start < end` and `end` never exceeds the page count the
/// interval was parsed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInterval {
    /// First page of the run (0-based, inclusive).
    pub start: usize,
    /// One past the last page of the run (exclusive).
    pub end: usize,
}

impl PageInterval {
    /// Create a new interval.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of pages covered by the interval.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if the interval covers no pages.
    ///
    /// Intervals produced by [`parse_page_ranges`] are never empty.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Parse a page-range expression against a known page count.
///
/// The expression is a comma-separated list of parts, each either a single
/// 1-based page number (`"8"`) or a dash-separated inclusive range
/// (`"3-5"`). Surviving parts become intervals in left-to-right order; no
/// deduplication or sorting is applied, so overlapping or repeated parts
/// legally produce repeated page extraction.
///
/// Per part:
/// - whitespace is trimmed; empty parts are skipped
/// - `"A-B"` splits on the first `-`; `start = A - 1` is clamped to 0 and
///   `end = B` is clamped to `max_pages`; the part survives only if
///   `start < end` after clamping
/// - a lone `"A"` survives only if `0 <= A - 1 < max_pages`
/// - any part that fails integer parsing is dropped silently
///
/// An empty or fully-invalid expression yields an empty list; this function
/// never fails.
pub fn parse_page_ranges(expression: &str, max_pages: usize) -> Vec<PageInterval> {
    let mut intervals = Vec::new();

    for part in expression.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some((first, second)) = part.split_once('-') {
            let (Ok(a), Ok(b)) = (
                first.trim().parse::<i64>(),
                second.trim().parse::<i64>(),
            ) else {
                continue;
            };

            // 1-based inclusive to 0-based exclusive, then clamp.
            let start = (a - 1).max(0) as usize;
            let end = (b.max(0) as usize).min(max_pages);
            if start < end {
                intervals.push(PageInterval::new(start, end));
            }
        } else {
            let Ok(a) = part.parse::<i64>() else {
                continue;
            };

            let page = a - 1;
            if page >= 0 && (page as usize) < max_pages {
                intervals.push(PageInterval::new(page as usize, page as usize + 1));
            }
        }
    }

    intervals
}
