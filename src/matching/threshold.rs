use serde::Serialize;
use tracing::{info, warn};

use crate::core::pair::PairScore;
use crate::matching::similarity::count_to_f64;
use crate::utils::validation::{validate_selection_config, ConfigError};

/// Default lower bound of the target match count
pub const DEFAULT_MIN_PAIRS: usize = 500;

/// Default upper bound of the target match count
pub const DEFAULT_MAX_PAIRS: usize = 1000;

/// Default distance between adjacent thresholds
pub const DEFAULT_STEP: f64 = 0.01;

/// Default first (strictest) threshold of the scan
pub const DEFAULT_START: f64 = 0.99;

/// Default last (most permissive) threshold of the scan
pub const DEFAULT_FLOOR: f64 = 0.30;

/// Thresholds are snapped to this many decimal places so that
/// `start - k * step` lands exactly on the decimal value it names.
const SNAP_SCALE: f64 = 1e9;

/// Configuration for the threshold search
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionConfig {
    /// Smallest acceptable number of matched pairs (inclusive)
    pub min_pairs: usize,
    /// Largest acceptable number of matched pairs (inclusive)
    pub max_pairs: usize,
    /// Distance between adjacent thresholds
    pub step: f64,
    /// First threshold tried by the descending scan
    pub start: f64,
    /// Last threshold tried by the descending scan
    pub floor: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_pairs: DEFAULT_MIN_PAIRS,
            max_pairs: DEFAULT_MAX_PAIRS,
            step: DEFAULT_STEP,
            start: DEFAULT_START,
            floor: DEFAULT_FLOOR,
        }
    }
}

impl SelectionConfig {
    /// Is `count` inside the target band?
    #[must_use]
    pub fn in_band(&self, count: usize) -> bool {
        (self.min_pairs..=self.max_pairs).contains(&count)
    }

    /// Midpoint of the target band, used by the fallback
    #[must_use]
    pub fn target_midpoint(&self) -> f64 {
        (count_to_f64(self.min_pairs) + count_to_f64(self.max_pairs)) / 2.0
    }

    /// Thresholds of the main scan: `start, start - step, …` down to and
    /// including `floor`.
    #[must_use]
    pub fn descending_thresholds(&self) -> Vec<f64> {
        let steps = self.steps_between(1e-9).floor();
        grid_len(steps + 1.0)
            .map(|k| snap(self.start - count_to_f64(k) * self.step))
            .collect()
    }

    /// Thresholds of the fallback: `floor, floor + step, …` strictly below `start`.
    ///
    /// When `floor == start` the grid would be empty, so it is `[floor]`.
    #[must_use]
    pub fn fallback_thresholds(&self) -> Vec<f64> {
        let steps = self.steps_between(-1e-9).ceil();
        let grid: Vec<f64> = grid_len(steps)
            .map(|k| snap(self.floor + count_to_f64(k) * self.step))
            .collect();
        if grid.is_empty() {
            vec![snap(self.floor)]
        } else {
            grid
        }
    }

    /// Number of steps from `floor` to `start`, nudged by `slack` to absorb
    /// floating-point error in the division.
    fn steps_between(&self, slack: f64) -> f64 {
        ((self.start - self.floor) / self.step + slack).max(0.0)
    }
}

fn grid_len(len: f64) -> std::ops::Range<usize> {
    // Validation bounds the grid size, so the cast cannot truncate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let len = len.max(0.0) as usize;
    0..len
}

fn snap(t: f64) -> f64 {
    (t * SNAP_SCALE).round() / SNAP_SCALE
}

/// One observation of the threshold scan
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScanStep {
    pub threshold: f64,
    pub count: usize,
}

/// Match count as a function of threshold.
///
/// Every pair has a crossing threshold (see [`PairScore::crossing_threshold`])
/// at and below which it matches. Sorting those once turns each count into a
/// binary search.
#[derive(Debug, Clone)]
pub struct MatchCurve {
    /// Crossing thresholds, sorted in descending order
    crossings: Vec<f64>,
}

impl MatchCurve {
    #[must_use]
    pub fn new(scores: &[PairScore]) -> Self {
        let mut crossings: Vec<f64> = scores.iter().map(PairScore::crossing_threshold).collect();
        crossings.sort_by(|a, b| b.total_cmp(a));
        Self { crossings }
    }

    /// Number of pairs matched at threshold `t`
    #[must_use]
    pub fn count_at(&self, t: f64) -> usize {
        self.crossings.partition_point(|&c| c >= t)
    }

    /// Total number of pairs behind the curve
    #[must_use]
    pub fn len(&self) -> usize {
        self.crossings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.crossings.is_empty()
    }
}

/// Outcome of the threshold search
#[derive(Debug, Clone)]
pub struct ThresholdResult<'a> {
    /// The threshold that was chosen
    pub threshold: f64,

    /// Pairs matched at `threshold`, in table order
    pub selected_pairs: Vec<&'a PairScore>,

    /// True when no scanned threshold landed in the target band
    pub fallback: bool,

    /// Counts observed by the descending scan, strictest first
    pub scan: Vec<ScanStep>,
}

impl ThresholdResult<'_> {
    /// Number of selected pairs
    #[must_use]
    pub fn count(&self) -> usize {
        self.selected_pairs.len()
    }
}

/// Choose the strictest threshold whose match count lands in
/// `[min_pairs, max_pairs]` and return the pairs matched at it.
///
/// The scan runs from `start` down to `floor`. If no threshold hits the band,
/// the fallback picks the threshold in `[floor, start)` whose count is closest
/// to the band's midpoint, preferring the lowest threshold on ties. The band
/// is a target: after a fallback the count may lie outside it.
///
/// # Errors
///
/// Returns `ConfigError` if the configuration is inconsistent (see
/// [`validate_selection_config`]).
pub fn select<'a>(
    scores: &'a [PairScore],
    config: &SelectionConfig,
) -> Result<ThresholdResult<'a>, ConfigError> {
    validate_selection_config(config)?;

    if scores.is_empty() {
        warn!("No pairs to select from (fewer than two records)");
    }

    let curve = MatchCurve::new(scores);
    let mut scan = Vec::new();
    let mut chosen = None;

    for t in config.descending_thresholds() {
        let count = curve.count_at(t);
        info!("Threshold {t:.3}: {count} pairs with at least 2 conditions");
        scan.push(ScanStep {
            threshold: t,
            count,
        });

        if config.in_band(count) {
            info!("Selected threshold {t:.3} with {count} pairs");
            chosen = Some(t);
            break;
        }
    }

    let (threshold, fallback) = match chosen {
        Some(t) => (t, false),
        None => {
            let best = closest_to_midpoint(&curve, config);
            warn!(
                "Fallback: no threshold gave {}..={} pairs; selected threshold {:.3} with {} pairs",
                config.min_pairs, config.max_pairs, best.threshold, best.count
            );
            (best.threshold, true)
        }
    };

    let selected_pairs = scores
        .iter()
        .filter(|row| row.is_match_at(threshold))
        .collect();

    Ok(ThresholdResult {
        threshold,
        selected_pairs,
        fallback,
        scan,
    })
}

/// Fallback grid point whose count is nearest the band midpoint; the first
/// (lowest) threshold wins ties.
fn closest_to_midpoint(curve: &MatchCurve, config: &SelectionConfig) -> ScanStep {
    let midpoint = config.target_midpoint();
    let mut best: Option<(f64, ScanStep)> = None;

    for t in config.fallback_thresholds() {
        let count = curve.count_at(t);
        let distance = (count_to_f64(count) - midpoint).abs();
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((
                distance,
                ScanStep {
                    threshold: t,
                    count,
                },
            ));
        }
    }

    // fallback_thresholds() is never empty
    best.map_or(
        ScanStep {
            threshold: config.floor,
            count: curve.count_at(config.floor),
        },
        |(_, step)| step,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(c1: f64, c2: f64, c3: f64, c4: bool) -> PairScore {
        PairScore {
            name_1: "a".to_string(),
            email_1: "a@x".to_string(),
            name_2: "b".to_string(),
            email_2: "b@x".to_string(),
            c1,
            c2,
            c3,
            c4,
        }
    }

    /// Pairs that start matching at 0.95, 0.85, 0.75, 0.65, 0.55 and 0.45
    fn ladder() -> Vec<PairScore> {
        [0.95, 0.85, 0.75, 0.65, 0.55, 0.45]
            .iter()
            .map(|&c| pair(c, c, 0.0, false))
            .collect()
    }

    fn config(min_pairs: usize, max_pairs: usize) -> SelectionConfig {
        SelectionConfig {
            min_pairs,
            max_pairs,
            ..SelectionConfig::default()
        }
    }

    #[test]
    fn test_default_grids() {
        let cfg = SelectionConfig::default();

        let desc = cfg.descending_thresholds();
        assert_eq!(desc.len(), 70);
        assert!((desc[0] - 0.99).abs() < f64::EPSILON);
        assert!((desc[69] - 0.30).abs() < f64::EPSILON);
        assert!(desc.windows(2).all(|w| w[0] > w[1]));

        let asc = cfg.fallback_thresholds();
        assert_eq!(asc.len(), 69);
        assert!((asc[0] - 0.30).abs() < f64::EPSILON);
        assert!((asc[68] - 0.98).abs() < f64::EPSILON);
    }

    #[test]
    fn test_grid_lands_on_decimal_values() {
        // 0.33 must be the same double as the literal, not 0.3299999999999994
        let desc = SelectionConfig::default().descending_thresholds();
        assert!(desc.iter().any(|&t| t.to_bits() == 0.33_f64.to_bits()));
        assert_eq!(desc[69].to_bits(), 0.30_f64.to_bits());
    }

    #[test]
    fn test_floor_equal_to_start() {
        let cfg = SelectionConfig {
            start: 0.5,
            floor: 0.5,
            ..SelectionConfig::default()
        };
        assert_eq!(cfg.descending_thresholds(), vec![0.5]);
        assert_eq!(cfg.fallback_thresholds(), vec![0.5]);
    }

    #[test]
    fn test_match_curve_agrees_with_votes() {
        let scores = vec![
            pair(0.9, 0.5, 0.7, true),
            pair(0.9, 0.5, 0.7, false),
            pair(0.31, 0.99, 0.2, false),
            pair(0.0, 0.0, 0.0, true),
            pair(1.0, 1.0, 1.0, true),
        ];
        let curve = MatchCurve::new(&scores);
        assert_eq!(curve.len(), 5);

        for t in SelectionConfig::default().descending_thresholds() {
            let direct = scores.iter().filter(|r| r.is_match_at(t)).count();
            assert_eq!(curve.count_at(t), direct, "count mismatch at {t}");
        }
    }

    #[test]
    fn test_counts_monotone_as_threshold_decreases() {
        let scores = ladder();
        let curve = MatchCurve::new(&scores);
        let counts: Vec<usize> = SelectionConfig::default()
            .descending_thresholds()
            .into_iter()
            .map(|t| curve.count_at(t))
            .collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_select_highest_threshold_in_band() {
        let scores = ladder();
        let result = select(&scores, &config(1, 2)).unwrap();

        assert!(!result.fallback);
        assert!((result.threshold - 0.95).abs() < 1e-12);
        assert_eq!(result.count(), 1);
        assert!((result.selected_pairs[0].c1 - 0.95).abs() < f64::EPSILON);

        // Scan stopped at the chosen threshold
        let last = result.scan.last().unwrap();
        assert!((last.threshold - 0.95).abs() < 1e-12);
        assert_eq!(result.scan.len(), 5);
    }

    #[test]
    fn test_select_wider_band() {
        let scores = ladder();
        let result = select(&scores, &config(3, 4)).unwrap();
        assert!(!result.fallback);
        assert!((result.threshold - 0.75).abs() < 1e-12);
        assert_eq!(result.count(), 3);
    }

    #[test]
    fn test_selected_pairs_keep_table_order() {
        let scores = vec![
            pair(0.5, 0.5, 0.0, false),
            pair(0.9, 0.9, 0.0, false),
            pair(0.6, 0.6, 0.0, false),
        ];
        let result = select(&scores, &config(3, 3)).unwrap();
        assert_eq!(result.count(), 3);
        let c1s: Vec<f64> = result.selected_pairs.iter().map(|p| p.c1).collect();
        assert_eq!(c1s, vec![0.5, 0.9, 0.6]);
    }

    #[test]
    fn test_fallback_closest_to_midpoint() {
        // Nothing can reach 100 pairs; midpoint 150 is closest to the
        // largest count (6), first reached at 0.45
        let scores = ladder();
        let result = select(&scores, &config(100, 200)).unwrap();

        assert!(result.fallback);
        assert!((result.threshold - 0.30).abs() < 1e-12);
        assert_eq!(result.count(), 6);
        assert_eq!(result.scan.len(), 70);
    }

    #[test]
    fn test_fallback_prefers_lowest_threshold_on_tie() {
        // Every pair matches everywhere, so all counts tie
        let scores = vec![pair(1.0, 1.0, 1.0, true); 4];
        let result = select(&scores, &config(10, 20)).unwrap();
        assert!(result.fallback);
        assert!((result.threshold - 0.30).abs() < 1e-12);
        assert_eq!(result.count(), 4);
    }

    #[test]
    fn test_fallback_band_overshoot() {
        // Every threshold over-matches; closest count to midpoint 1.5 is the
        // strictest threshold with the fewest matches
        let scores = vec![
            pair(0.99, 0.99, 0.0, false),
            pair(0.99, 0.99, 0.0, false),
            pair(0.99, 0.99, 0.0, false),
            pair(0.5, 0.5, 0.0, false),
        ];
        let result = select(&scores, &config(1, 2)).unwrap();
        assert!(result.fallback);
        assert_eq!(result.count(), 3);
        assert!((result.threshold - 0.51).abs() < 1e-12);
    }

    #[test]
    fn test_select_empty_table() {
        let result = select(&[], &SelectionConfig::default()).unwrap();
        assert!(result.fallback);
        assert_eq!(result.count(), 0);
        assert!((result.threshold - 0.30).abs() < 1e-12);

        // A band that admits zero is hit immediately
        let result = select(&[], &config(0, 10)).unwrap();
        assert!(!result.fallback);
        assert!((result.threshold - 0.99).abs() < 1e-12);
    }

    #[test]
    fn test_select_rejects_invalid_config() {
        let cfg = SelectionConfig {
            step: 0.0,
            ..SelectionConfig::default()
        };
        assert!(select(&[], &cfg).is_err());
        assert!(select(&[], &config(10, 5)).is_err());
    }
}
