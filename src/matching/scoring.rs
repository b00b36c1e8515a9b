use thiserror::Error;
use tracing::{debug, warn};

use crate::core::identity::NormalizedIdentity;
use crate::core::pair::PairScore;
use crate::core::record::DeveloperRecord;
use crate::matching::similarity::ratio;
use crate::utils::validation::{LARGE_INPUT_WARNING, MAX_PAIRS};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScoreError {
    #[error("Too many pairs: {records} records give more than {max} pairs", max = MAX_PAIRS)]
    TooManyPairs { records: usize },
}

/// Number of unordered pairs among `n` records, or `None` on overflow
#[must_use]
pub fn pair_count(n: usize) -> Option<usize> {
    if n < 2 {
        return Some(0);
    }
    n.checked_mul(n - 1).map(|x| x / 2)
}

/// Score every unordered pair of records.
///
/// Pairs are produced in combinatorial order: `(0,1), (0,2), …, (0,n-1),
/// (1,2), …`. Each record is normalized once up front. Zero or one record
/// yields an empty table.
///
/// # Errors
///
/// Returns `ScoreError::TooManyPairs` before any work is done if the input
/// would produce more than [`MAX_PAIRS`] pairs.
pub fn score_pairs(records: &[DeveloperRecord]) -> Result<Vec<PairScore>, ScoreError> {
    let n = records.len();
    let pairs = pair_count(n)
        .filter(|&p| p <= MAX_PAIRS)
        .ok_or(ScoreError::TooManyPairs { records: n })?;

    if n > LARGE_INPUT_WARNING {
        warn!(
            "Scoring {} records means {} pairwise comparisons; this may take a while",
            n, pairs
        );
    }

    let identities: Vec<NormalizedIdentity> =
        records.iter().map(DeveloperRecord::normalized).collect();

    let mut rows = Vec::with_capacity(pairs);
    for i in 0..n {
        for j in (i + 1)..n {
            rows.push(score_pair(
                &records[i],
                &identities[i],
                &records[j],
                &identities[j],
            ));
        }
    }

    debug!("Scored {} pairs from {} records", rows.len(), n);
    Ok(rows)
}

/// Compute the four similarity signals for one pair
#[must_use]
pub fn score_pair(
    record_a: &DeveloperRecord,
    a: &NormalizedIdentity,
    record_b: &DeveloperRecord,
    b: &NormalizedIdentity,
) -> PairScore {
    let c1 = ratio(&a.full_name, &b.full_name);
    let c2 = ratio(&a.local_part, &b.local_part);
    let c3 = (ratio(&a.first_name, &b.first_name) + ratio(&a.last_name, &b.last_name)) / 2.0;
    let c4 = a.initial_and_last_in(&b.local_part) || b.initial_and_last_in(&a.local_part);

    PairScore {
        name_1: record_a.display_name.clone(),
        email_1: a.email_lower.clone(),
        name_2: record_b.display_name.clone(),
        email_2: b.email_lower.clone(),
        c1,
        c2,
        c3,
        c4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::MAX_RECORDS;
    use std::collections::HashSet;

    fn records(rows: &[(&str, &str)]) -> Vec<DeveloperRecord> {
        rows.iter()
            .map(|(name, email)| DeveloperRecord::new(*name, *email))
            .collect()
    }

    #[test]
    fn test_pair_count() {
        assert_eq!(pair_count(0), Some(0));
        assert_eq!(pair_count(1), Some(0));
        assert_eq!(pair_count(2), Some(1));
        assert_eq!(pair_count(5), Some(10));
        assert_eq!(pair_count(usize::MAX), None);
    }

    #[test]
    fn test_score_pairs_enumeration_order() {
        let recs = records(&[("A", "a@x"), ("B", "b@x"), ("C", "c@x"), ("D", "d@x")]);
        let rows = score_pairs(&recs).unwrap();

        let order: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.name_1.as_str(), r.name_2.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("A", "B"),
                ("A", "C"),
                ("A", "D"),
                ("B", "C"),
                ("B", "D"),
                ("C", "D")
            ]
        );
    }

    #[test]
    fn test_score_pairs_count_and_uniqueness() {
        for n in 0..12 {
            let recs: Vec<DeveloperRecord> = (0..n)
                .map(|i| DeveloperRecord::new(format!("Dev {i}"), format!("dev{i}@x.com")))
                .collect();
            let rows = score_pairs(&recs).unwrap();
            assert_eq!(Some(rows.len()), pair_count(n));

            let unique: HashSet<(String, String)> = rows
                .iter()
                .map(|r| (r.name_1.clone(), r.name_2.clone()))
                .collect();
            assert_eq!(unique.len(), rows.len());
            assert!(rows.iter().all(|r| r.name_1 != r.name_2));
        }
    }

    #[test]
    fn test_identical_rows_form_one_pair() {
        let recs = records(&[
            ("Jane Doe", "jane.doe@x.com"),
            ("Jane Doe", "jane.doe@x.com"),
        ]);
        let rows = score_pairs(&recs).unwrap();
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert!((row.c1 - 1.0).abs() < f64::EPSILON);
        assert!((row.c2 - 1.0).abs() < f64::EPSILON);
        assert!((row.c3 - 1.0).abs() < f64::EPSILON);
        assert!(row.c4);
    }

    #[test]
    fn test_initial_plus_last_name_in_local_part() {
        let recs = records(&[
            ("John Smith", "jsmith@x.com"),
            ("J Smith", "jsmith2@x.com"),
        ]);
        let row = &score_pairs(&recs).unwrap()[0];
        assert!(row.c4);
        // Full names "john smith" vs "j smith": LCS 7 of 17 characters total
        assert!((row.c1 - 14.0 / 17.0).abs() < 1e-12);
        // Last names agree, first names "john" vs "j"
        assert!((row.c3 - (0.4 + 1.0) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_token_name_lowers_c3() {
        let recs = records(&[
            ("Linus", "linus@x.com"),
            ("Linus Torvalds", "torvalds@x.com"),
        ]);
        let row = &score_pairs(&recs).unwrap()[0];
        // First names identical, empty vs non-empty last name scores zero
        assert!((row.c3 - 0.5).abs() < f64::EPSILON);
        // "l" + "" in "torvalds"
        assert!(row.c4);
    }

    #[test]
    fn test_emails_are_lowercased_and_names_kept() {
        let recs = records(&[("Seán O'Brien", " SOBrien@X.com"), ("Other", "o@x.com")]);
        let row = &score_pairs(&recs).unwrap()[0];
        assert_eq!(row.name_1, "Seán O'Brien");
        assert_eq!(row.email_1, "sobrien@x.com");
    }

    #[test]
    fn test_scores_in_unit_range() {
        let recs = records(&[
            ("Seán O'Brien", "sobrien@x.com"),
            ("Sean OBrien", "sean@y.org"),
            ("", ""),
            ("Ann", "no-at"),
        ]);
        for row in score_pairs(&recs).unwrap() {
            for c in [row.c1, row.c2, row.c3] {
                assert!((0.0..=1.0).contains(&c), "{row:?}");
            }
        }
    }

    #[test]
    fn test_rejects_inputs_beyond_pair_limit() {
        let recs = vec![DeveloperRecord::new("", ""); MAX_RECORDS + 1];
        assert_eq!(
            score_pairs(&recs),
            Err(ScoreError::TooManyPairs {
                records: MAX_RECORDS + 1
            })
        );
    }

    #[test]
    fn test_score_on_threshold_boundary_votes() {
        // 17 shared characters of 25 + 25 is exactly 0.68
        let recs = records(&[
            ("abcdefghijklmnopqrstuvwxy", "abcdefghijklmnopqrstuvwxy@x.com"),
            ("abcdefghijklmnopq01234567", "abcdefghijklmnopq01234567@y.org"),
        ]);
        let row = &score_pairs(&recs).unwrap()[0];
        assert_eq!(row.c1, 0.68);
        assert_eq!(row.c2, 0.68);
        assert!(row.votes(0.68) >= 2);
        assert!(row.is_match_at(0.68));
    }
}
