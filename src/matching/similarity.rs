/// Safely convert usize to f64 for ratio calculations
///
/// String lengths in this crate are far below 2^52, so the conversion is exact.
#[inline]
pub(crate) fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Normalized edit similarity of two strings, in `[0, 1]`.
///
/// This is the InDel ratio `2·M / (len(a) + len(b))`, where `M` is the length
/// of the longest common subsequence of the two strings' characters. The value
/// is first formed as a percentage, `100 · (1 - distance / (len(a) + len(b)))`
/// with `distance = len(a) + len(b) - 2·M`, and then divided by 100. That
/// rounding path is the one the 0-100 fuzzy "ratio" scores take, so written
/// scores agree with them to the last bit (`34/50` is exactly `0.68`).
///
/// Two empty strings are identical (`1.0`); an empty and a non-empty string
/// share nothing (`0.0`).
///
/// # Examples
///
/// ```
/// use dev_dedup::matching::similarity::ratio;
///
/// assert_eq!(ratio("", ""), 1.0);
/// assert_eq!(ratio("", "abc"), 0.0);
/// assert_eq!(ratio("smith", "smith"), 1.0);
/// assert!((ratio("kitten", "sitting") - 8.0 / 13.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let len_sum = a.len() + b.len();
    if len_sum == 0 {
        return 1.0;
    }

    let lcs = longest_common_subsequence(&a, &b);
    let distance = len_sum - 2 * lcs;
    let percent = 100.0 * (1.0 - count_to_f64(distance) / count_to_f64(len_sum));
    percent / 100.0
}

/// Length of the longest common subsequence of `a` and `b`.
///
/// Uses a single rolling DP row sized by the shorter input.
fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if inner.is_empty() {
        return 0;
    }

    // row[j] = LCS of the processed prefix of `outer` and inner[..j]
    let mut row = vec![0usize; inner.len() + 1];

    for &oc in outer {
        let mut diagonal = 0;
        for (j, &ic) in inner.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if oc == ic {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }

    row[inner.len()]
}
