//! Centralized validation and input limits.

use crate::matching::threshold::SelectionConfig;

/// Maximum number of pairs a single scoring run may hold in memory
pub const MAX_PAIRS: usize = 20_000_000;

/// Maximum number of records accepted from a single input: the largest count
/// whose pairs still fit within [`MAX_PAIRS`]
pub const MAX_RECORDS: usize = 6_325;

/// Record count above which scoring logs a warning about run time
pub const LARGE_INPUT_WARNING: usize = 5_000;

/// Maximum number of thresholds a single scan may visit
pub const MAX_THRESHOLD_STEPS: f64 = 100_000.0;

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

/// Threshold search configuration errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Step must be a positive number, got {0}")]
    InvalidStep(f64),
    #[error("Threshold {name} must be within [0, 1], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
    #[error("Floor threshold {floor} is above start threshold {start}")]
    FloorAboveStart { floor: f64, start: f64 },
    #[error("min_pairs ({min}) is greater than max_pairs ({max})")]
    InvertedBand { min: usize, max: usize },
    #[error("Step {step} yields too many thresholds between {floor} and {start}")]
    TooManySteps { step: f64, floor: f64, start: f64 },
}

/// Validate a threshold search configuration.
///
/// # Examples
///
/// ```
/// use dev_dedup::matching::SelectionConfig;
/// use dev_dedup::utils::validation::validate_selection_config;
///
/// assert!(validate_selection_config(&SelectionConfig::default()).is_ok());
///
/// let inverted = SelectionConfig { min_pairs: 10, max_pairs: 5, ..SelectionConfig::default() };
/// assert!(validate_selection_config(&inverted).is_err());
/// ```
///
/// # Errors
///
/// Returns `ConfigError::InvalidStep` if `step` is not positive and finite,
/// `ConfigError::ThresholdOutOfRange` if `start` or `floor` leave `[0, 1]`,
/// `ConfigError::FloorAboveStart` if the scan range is inverted,
/// `ConfigError::InvertedBand` if `min_pairs > max_pairs`, or
/// `ConfigError::TooManySteps` if the step is too fine for the range.
pub fn validate_selection_config(config: &SelectionConfig) -> Result<(), ConfigError> {
    if !(config.step.is_finite() && config.step > 0.0) {
        return Err(ConfigError::InvalidStep(config.step));
    }

    for (name, value) in [("start", config.start), ("floor", config.floor)] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::ThresholdOutOfRange { name, value });
        }
    }

    if config.floor > config.start {
        return Err(ConfigError::FloorAboveStart {
            floor: config.floor,
            start: config.start,
        });
    }

    if config.min_pairs > config.max_pairs {
        return Err(ConfigError::InvertedBand {
            min: config.min_pairs,
            max: config.max_pairs,
        });
    }

    if (config.start - config.floor) / config.step > MAX_THRESHOLD_STEPS {
        return Err(ConfigError::TooManySteps {
            step: config.step,
            floor: config.floor,
            start: config.start,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_record_limit() {
        assert!(check_record_limit(0).is_none());
        assert!(check_record_limit(MAX_RECORDS - 1).is_none());
        assert!(check_record_limit(MAX_RECORDS).is_some());
    }

    #[test]
    fn test_record_limit_fits_pair_limit() {
        use crate::matching::scoring::pair_count;

        assert!(LARGE_INPUT_WARNING < MAX_RECORDS);
        assert!(pair_count(MAX_RECORDS).unwrap() <= MAX_PAIRS);
        assert!(pair_count(MAX_RECORDS + 1).unwrap() > MAX_PAIRS);
    }

    #[test]
    fn test_validate_selection_config() {
        let ok = SelectionConfig::default();
        assert_eq!(validate_selection_config(&ok), Ok(()));

        let bad_step = SelectionConfig {
            step: -0.01,
            ..ok.clone()
        };
        assert_eq!(
            validate_selection_config(&bad_step),
            Err(ConfigError::InvalidStep(-0.01))
        );

        let nan_step = SelectionConfig {
            step: f64::NAN,
            ..ok.clone()
        };
        assert!(validate_selection_config(&nan_step).is_err());

        let out_of_range = SelectionConfig {
            start: 1.5,
            ..ok.clone()
        };
        assert!(matches!(
            validate_selection_config(&out_of_range),
            Err(ConfigError::ThresholdOutOfRange { name: "start", .. })
        ));

        let inverted_range = SelectionConfig {
            start: 0.2,
            floor: 0.3,
            ..ok.clone()
        };
        assert!(matches!(
            validate_selection_config(&inverted_range),
            Err(ConfigError::FloorAboveStart { .. })
        ));

        let too_fine = SelectionConfig {
            step: 1e-9,
            ..ok.clone()
        };
        assert!(matches!(
            validate_selection_config(&too_fine),
            Err(ConfigError::TooManySteps { .. })
        ));

        let inverted_band = SelectionConfig {
            min_pairs: 2,
            max_pairs: 1,
            ..ok
        };
        assert_eq!(
            validate_selection_config(&inverted_band),
            Err(ConfigError::InvertedBand { min: 2, max: 1 })
        );
    }
}
