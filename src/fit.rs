//! Middle-ellipsis fitting search.
//!
//! Finds a `prefix + ellipsis + suffix` rendition of a text that fits a
//! container, seeding the search with a linear estimate and refining it two
//! characters at a time (one from each side) so both ends stay balanced.

use log::{debug, trace};

use crate::measure::Measure;
use crate::text::{char_len, char_prefix, char_suffix};

/// Default ellipsis glyph (U+2026 HORIZONTAL ELLIPSIS).
pub const DEFAULT_ELLIPSIS: &str = "\u{2026}";

/// A fitting candidate this close to the container edge is accepted as is.
pub const DEFAULT_SLACK: f64 = 10.0;

/// Upper bound on candidates measured per run.
pub const DEFAULT_MAX_ATTEMPTS: usize = 20;

/// Offset change per refinement step, one char per side.
const STEP: usize = 2;

/// Tuning knobs of the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Accept a fitting candidate once less than this much room is left.
    pub slack: f64,
    /// Maximum number of candidates measured in one run.
    pub max_attempts: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            slack: DEFAULT_SLACK,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// One measured candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    /// Char budget the candidate was built from; 0 for the bare ellipsis.
    pub offset: usize,
    /// Measured width of `candidate`.
    pub width: f64,
    pub candidate: String,
}

/// Outcome of one fitting run.
#[derive(Debug, Clone, PartialEq)]
pub struct Fit {
    /// The string to display.
    pub text: String,
    /// Width of the untruncated text, if it was measured.
    pub full_width: Option<f64>,
    /// Candidates in the order they were measured.
    pub attempts: Vec<Attempt>,
    /// Index into `attempts` of the candidate shown, `None` when untruncated.
    pub chosen: Option<usize>,
    /// Total measurements taken, including the full-text check.
    pub measurements: usize,
}

impl Fit {
    fn unchanged(text: &str, full_width: Option<f64>) -> Self {
        Self {
            text: text.to_string(),
            full_width,
            attempts: Vec::new(),
            chosen: None,
            measurements: usize::from(full_width.is_some()),
        }
    }

    /// Whether the ellipsis was substituted into the text.
    pub fn is_truncated(&self) -> bool {
        !self.attempts.is_empty()
    }

    /// The attempt that produced `text`, if any.
    pub fn chosen(&self) -> Option<&Attempt> {
        self.attempts.get(self.chosen?)
    }
}

/// Fit `text` into `container_width`, truncating its middle with `ellipsis`.
///
/// Never fails: when nothing fits the first measured candidate is returned
/// even though it overflows.
pub fn fit_text<M>(
    text: &str,
    ellipsis: &str,
    container_width: f64,
    measurer: &mut M,
    options: &FitOptions,
) -> Fit
where
    M: Measure + ?Sized,
{
    if text.is_empty() {
        return Fit::unchanged(text, None);
    }

    let container_width = container_width.max(0.0);
    let full_width = measurer.measure(text);
    if full_width <= container_width {
        trace!("fits as is ({full_width} <= {container_width})");
        return Fit::unchanged(text, Some(full_width));
    }

    let len = char_len(text);
    let ellipsis_len = char_len(ellipsis);
    let mut offset = initial_offset(container_width, full_width, len);
    let mut attempts: Vec<Attempt> = Vec::new();

    while attempts.len() < options.max_attempts {
        if attempts.iter().any(|a| a.offset == offset) {
            break;
        }

        if offset <= 1 {
            let width = measurer.measure(ellipsis);
            trace!("offset {offset}: ellipsis alone, width {width}");
            attempts.push(Attempt {
                offset: 0,
                width,
                candidate: ellipsis.to_string(),
            });
            break;
        }

        let Some(candidate) = assemble(text, len, ellipsis, ellipsis_len, offset) else {
            // Nothing left to cut; the full text is already known not to fit.
            break;
        };
        let width = measurer.measure(&candidate);
        trace!("offset {offset}: {candidate:?} width {width}");
        attempts.push(Attempt {
            offset,
            width,
            candidate,
        });

        if width >= container_width {
            offset -= STEP;
        } else if container_width - width < options.slack {
            break;
        } else {
            offset += STEP;
        }
    }

    let measurements = 1 + attempts.len();
    let chosen = select(&attempts, container_width);
    let text = chosen
        .map(|i| attempts[i].candidate.clone())
        .unwrap_or_else(|| ellipsis.to_string());

    Fit {
        text,
        full_width: Some(full_width),
        attempts,
        chosen,
        measurements,
    }
}

/// Linear estimate of how many chars fit, assuming uniform char width.
fn initial_offset(container_width: f64, full_width: f64, len: usize) -> usize {
    // full_width > container_width >= 0 here, so the ratio is in [0, 1).
    (container_width / full_width * len as f64).floor() as usize
}

/// Build the candidate for `offset`, or `None` if it would keep every char.
fn assemble(
    text: &str,
    len: usize,
    ellipsis: &str,
    ellipsis_len: usize,
    offset: usize,
) -> Option<String> {
    let budget = offset as isize - ellipsis_len as isize;
    // Suffix keeps floor(budget / 2) chars, not offset - floor(budget / 2),
    // so both sides stay within one char of each other.
    let head = ((budget + 1).div_euclid(2) - 1).max(0) as usize;
    let tail = budget.div_euclid(2).max(0) as usize;
    if head + tail >= len {
        return None;
    }

    let prefix = char_prefix(text, head).trim_end();
    let suffix = char_suffix(text, tail).trim_start();

    let mut candidate = String::with_capacity(prefix.len() + ellipsis.len() + suffix.len());
    candidate.push_str(prefix);
    candidate.push_str(ellipsis);
    candidate.push_str(suffix);
    Some(candidate)
}

/// Index of the widest fitting attempt, falling back to the first one measured.
fn select(attempts: &[Attempt], container_width: f64) -> Option<usize> {
    let best = attempts
        .iter()
        .enumerate()
        .filter(|(_, a)| a.width < container_width)
        .max_by_key(|(_, a)| a.offset)
        .map(|(i, _)| i);

    if best.is_none() && !attempts.is_empty() {
        // Kept for compatibility: the fallback may overflow the container.
        debug!(
            "no candidate fits {container_width}; falling back to first attempt ({} attempts)",
            attempts.len()
        );
    }

    best.or_else(|| (!attempts.is_empty()).then_some(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::fake::FixedWidth;

    const FILE_NAME: &str = "thisisverylooooooongfilename.tsx";

    fn fit_mono(text: &str, container_width: f64) -> Fit {
        let mut measurer = FixedWidth::new(8.0);
        fit_text(
            text,
            DEFAULT_ELLIPSIS,
            container_width,
            &mut measurer,
            &FitOptions::default(),
        )
    }

    /// Split a truncated result around the ellipsis and check both sides.
    fn assert_prefix_ellipsis_suffix(original: &str, result: &str, ellipsis: &str) {
        assert_eq!(result.matches(ellipsis).count(), 1, "in {result:?}");
        let (prefix, suffix) = result.split_once(ellipsis).unwrap();
        assert!(original.starts_with(prefix), "{prefix:?} of {original:?}");
        assert!(original.ends_with(suffix), "{suffix:?} of {original:?}");
    }

    #[test]
    fn test_empty_text_takes_no_measurement() {
        let mut measurer = FixedWidth::new(8.0);
        let fit = fit_text("", DEFAULT_ELLIPSIS, 0.0, &mut measurer, &FitOptions::default());
        assert_eq!(fit.text, "");
        assert_eq!(fit.measurements, 0);
        assert_eq!(measurer.calls, 0);
    }

    #[test]
    fn test_fast_path_returns_text_unchanged() {
        let fit = fit_mono(FILE_NAME, 256.0); // exactly the full width
        assert_eq!(fit.text, FILE_NAME);
        assert!(!fit.is_truncated());
        assert!(fit.attempts.is_empty());
        assert_eq!(fit.measurements, 1);
        assert_eq!(fit.chosen(), None);

        let fit = fit_mono(FILE_NAME, 1000.0);
        assert_eq!(fit.text, FILE_NAME);
    }

    #[test]
    fn test_file_name_scenario() {
        // 32 chars * 8 = 256 > 120, seed offset floor(120 / 256 * 32) = 15
        let fit = fit_mono(FILE_NAME, 120.0);
        assert_eq!(fit.text, "thisis…ame.tsx");
        assert_eq!(fit.attempts.len(), 1);
        assert_eq!(fit.attempts[0].offset, 15);
        assert_eq!(fit.attempts[0].width, 112.0);
        assert_eq!(fit.measurements, 2);

        let (prefix, suffix) = fit.text.split_once(DEFAULT_ELLIPSIS).unwrap();
        assert!(char_len(prefix).abs_diff(char_len(suffix)) <= 1);
        assert_prefix_ellipsis_suffix(FILE_NAME, &fit.text, DEFAULT_ELLIPSIS);
    }

    #[test]
    fn test_grows_until_too_wide_then_picks_largest_fit() {
        // Seed offset 7 fits with 12 to spare, offset 9 overflows, 7 is revisited.
        let fit = fit_mono(FILE_NAME, 60.0);
        let offsets: Vec<usize> = fit.attempts.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![7, 9]);
        assert_eq!(fit.text, "th…tsx");
        assert_eq!(fit.chosen().map(|a| a.width), Some(48.0));
    }

    #[test]
    fn test_shrinks_from_too_wide_seed() {
        let fit = fit_mono("hello world", 50.0);
        assert_eq!(fit.text, "he…ld");
        assert_prefix_ellipsis_suffix("hello world", &fit.text, DEFAULT_ELLIPSIS);
    }

    #[test]
    fn test_whitespace_at_cut_is_trimmed() {
        let text = "a      b c d e f g h";
        let fit = fit_mono(text, 80.0);
        assert_eq!(fit.text, "a…e f g h");
        // Offsets are never measured twice, even when trimming makes
        // two candidates identical.
        let mut offsets: Vec<usize> = fit.attempts.iter().map(|a| a.offset).collect();
        offsets.dedup();
        assert_eq!(offsets.len(), fit.attempts.len());
    }

    #[test]
    fn test_chosen_is_tracked_by_position_not_text() {
        // Offsets 12 and 14 both trim down to "a…f g h"; the larger one wins.
        let fit = fit_mono("a      b c d e f g h", 70.0);
        let offsets: Vec<usize> = fit.attempts.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![8, 10, 12, 14, 16]);
        assert_eq!(fit.attempts[2].candidate, fit.attempts[3].candidate);
        assert_eq!(fit.text, "a…f g h");
        assert_eq!(fit.chosen, Some(3));
        assert_eq!(fit.chosen().map(|a| a.offset), Some(14));
    }

    #[test]
    fn test_multi_char_ellipsis_counts_against_budget() {
        let mut measurer = FixedWidth::new(8.0);
        let fit = fit_text(FILE_NAME, "...", 120.0, &mut measurer, &FitOptions::default());
        assert_eq!(fit.text, "thisi...me.tsx");
        assert_prefix_ellipsis_suffix(FILE_NAME, &fit.text, "...");
    }

    #[test]
    fn test_degenerate_floor_is_ellipsis() {
        // Narrower than the ellipsis itself: the seed offset is 0
        let fit = fit_mono(FILE_NAME, 4.0);
        assert_eq!(fit.text, DEFAULT_ELLIPSIS);
        assert_eq!(fit.attempts.len(), 1);
        assert_eq!(fit.attempts[0].offset, 0);

        let fit = fit_mono(FILE_NAME, 0.0);
        assert_eq!(fit.text, DEFAULT_ELLIPSIS);
    }

    #[test]
    fn test_falls_back_to_first_attempt_when_nothing_fits() {
        // A very wide ellipsis makes every candidate overflow.
        let mut measurer = FixedWidth::new(8.0).with_special('…', 50.0);
        let fit = fit_text(
            FILE_NAME,
            DEFAULT_ELLIPSIS,
            40.0,
            &mut measurer,
            &FitOptions::default(),
        );
        let offsets: Vec<usize> = fit.attempts.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![5, 3, 0]);
        assert!(fit.attempts.iter().all(|a| a.width >= 40.0));
        assert_eq!(fit.text, "t…sx");
        assert_eq!(fit.chosen, Some(0));
    }

    /// Reports a large width for one exact string and a small one otherwise.
    struct AlwaysRoomy {
        full: String,
        calls: usize,
    }

    impl Measure for AlwaysRoomy {
        fn measure(&mut self, text: &str) -> f64 {
            self.calls += 1;
            if text == self.full { 1000.0 } else { 10.0 }
        }
    }

    #[test]
    fn test_attempts_are_capped() {
        let text = "x".repeat(200);
        let mut measurer = AlwaysRoomy {
            full: text.clone(),
            calls: 0,
        };
        let fit = fit_text(
            &text,
            DEFAULT_ELLIPSIS,
            100.0,
            &mut measurer,
            &FitOptions::default(),
        );
        assert_eq!(fit.attempts.len(), DEFAULT_MAX_ATTEMPTS);
        assert_eq!(fit.measurements, DEFAULT_MAX_ATTEMPTS + 1);
        assert_eq!(measurer.calls, DEFAULT_MAX_ATTEMPTS + 1);
        // Every candidate fit, so the last (largest) offset wins
        assert_eq!(fit.chosen().map(|a| a.offset), Some(20 + 2 * 19));
    }

    #[test]
    fn test_custom_attempt_cap() {
        let text = "x".repeat(200);
        let mut measurer = AlwaysRoomy {
            full: text.clone(),
            calls: 0,
        };
        let options = FitOptions {
            max_attempts: 3,
            ..FitOptions::default()
        };
        let fit = fit_text(&text, DEFAULT_ELLIPSIS, 100.0, &mut measurer, &options);
        assert_eq!(fit.attempts.len(), 3);
    }

    #[test]
    fn test_stops_before_reproducing_the_text() {
        // Candidates always fit, the text is short: growth stops once the
        // prefix and suffix would cover the whole text.
        let text = "abcdefghij";
        let mut measurer = AlwaysRoomy {
            full: text.to_string(),
            calls: 0,
        };
        let fit = fit_text(text, DEFAULT_ELLIPSIS, 500.0, &mut measurer, &FitOptions::default());
        assert!(fit.attempts.len() < DEFAULT_MAX_ATTEMPTS);
        assert!(fit.is_truncated());
        assert_prefix_ellipsis_suffix(text, &fit.text, DEFAULT_ELLIPSIS);
        assert!(char_len(&fit.text) <= char_len(text));
    }

    #[test]
    fn test_zero_width_measurer_keeps_everything() {
        struct Unlaid;
        impl Measure for Unlaid {
            fn measure(&mut self, _: &str) -> f64 {
                0.0
            }
        }
        let fit = fit_text(FILE_NAME, DEFAULT_ELLIPSIS, 0.0, &mut Unlaid, &FitOptions::default());
        assert_eq!(fit.text, FILE_NAME);
    }

    #[test]
    fn test_idempotent_under_stable_width() {
        for width in [0.0, 4.0, 30.0, 60.0, 120.0, 200.0, 255.0] {
            assert_eq!(fit_mono(FILE_NAME, width), fit_mono(FILE_NAME, width));
        }
    }

    #[test]
    fn test_truncated_results_keep_order() {
        for width in (8..256).step_by(3) {
            let fit = fit_mono(FILE_NAME, f64::from(width));
            assert!(fit.attempts.len() <= DEFAULT_MAX_ATTEMPTS);
            if fit.text != FILE_NAME && fit.text != DEFAULT_ELLIPSIS {
                assert_prefix_ellipsis_suffix(FILE_NAME, &fit.text, DEFAULT_ELLIPSIS);
            }
        }
    }

    #[test]
    fn test_assemble_budget() {
        let len = char_len(FILE_NAME);
        assert_eq!(
            assemble(FILE_NAME, len, "…", 1, 15).as_deref(),
            Some("thisis…ame.tsx")
        );
        // Ellipsis longer than the offset: both sides clamp to empty
        assert_eq!(assemble(FILE_NAME, len, "...", 3, 2).as_deref(), Some("..."));
        assert_eq!(assemble("abcd", 4, "…", 1, 10), None);
    }
}
