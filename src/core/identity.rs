use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

/// Comparison keys derived from a [`DeveloperRecord`](crate::core::record::DeveloperRecord).
///
/// Every field is always present; inputs that are empty or malformed degrade
/// to empty strings rather than failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedIdentity {
    /// Normalized display name (see [`normalize_name`])
    pub full_name: String,

    /// First whitespace-separated token of the normalized name
    pub first_name: String,

    /// Last token of the normalized name, empty for single-token names
    pub last_name: String,

    /// First character of `first_name`
    pub first_initial: Option<char>,

    /// Trimmed, lowercased email address
    pub email_lower: String,

    /// Part of the email before the first `@` (the whole email if there is none)
    pub local_part: String,
}

impl NormalizedIdentity {
    /// Does this identity's initial and last name both occur in `local_part`?
    ///
    /// An absent initial or empty last name is contained in any string, so a
    /// single-token name only needs its initial to appear.
    #[must_use]
    pub fn initial_and_last_in(&self, local_part: &str) -> bool {
        let initial_found = self.first_initial.map_or(true, |c| local_part.contains(c));
        initial_found && local_part.contains(self.last_name.as_str())
    }
}

/// Normalize a raw `(display name, email)` pair into comparison keys.
///
/// # Examples
///
/// ```
/// use dev_dedup::core::identity::normalize;
///
/// let id = normalize("Seán O'Brien", " SOBrien@Example.com ");
/// assert_eq!(id.full_name, "sean obrien");
/// assert_eq!(id.first_name, "sean");
/// assert_eq!(id.last_name, "obrien");
/// assert_eq!(id.first_initial, Some('s'));
/// assert_eq!(id.email_lower, "sobrien@example.com");
/// assert_eq!(id.local_part, "sobrien");
/// ```
#[must_use]
pub fn normalize(display_name: &str, email: &str) -> NormalizedIdentity {
    let full_name = normalize_name(display_name);
    let email_lower = email.trim().to_lowercase();
    let local_part = local_part(&email_lower).to_string();

    let tokens: Vec<&str> = full_name.split(' ').filter(|t| !t.is_empty()).collect();
    let first_name = tokens.first().map(|t| (*t).to_string()).unwrap_or_default();
    let last_name = match tokens.as_slice() {
        [_, .., last] => (*last).to_string(),
        _ => String::new(),
    };
    let first_initial = first_name.chars().next();

    NormalizedIdentity {
        full_name,
        first_name,
        last_name,
        first_initial,
        email_lower,
        local_part,
    }
}

/// Canonicalize a display name for comparison.
///
/// Steps, in order:
/// 1. Remove ASCII punctuation
/// 2. NFKD-decompose and drop combining marks (`é` -> `e`)
/// 3. Full Unicode case fold (`ß` -> `ss`)
/// 4. Collapse whitespace runs to one space and trim
///
/// The result is a fixed point for names whose punctuation is ASCII. NFKD runs
/// after the punctuation strip, so compatibility punctuation such as the
/// fullwidth apostrophe survives one pass as `'` and is removed by the next
/// (`"Ｏ＇Ｂｒｉｅｎ"` -> `"o'brien"` -> `"obrien"`).
#[must_use]
pub fn normalize_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let without_punctuation: String = name.chars().filter(|c| !c.is_ascii_punctuation()).collect();
    let without_marks: String = without_punctuation
        .nfkd()
        .filter(|&c| canonical_combining_class(c) == 0)
        .collect();
    let folded = caseless::default_case_fold_str(&without_marks);

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Return the part of an email before the first `@`, or all of it if there is no `@`
#[must_use]
pub fn local_part(email: &str) -> &str {
    email.split_once('@').map_or(email, |(local, _)| local)
}
