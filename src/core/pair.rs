/// Column names of a pair table, in order
pub const PAIR_COLUMNS: [&str; 8] = [
    "name_1", "email_1", "name_2", "email_2", "c1", "c2", "c3", "c4",
];

/// Minimum number of votes for a pair to count as a match
pub const MIN_VOTES: u8 = 2;

/// Similarity signals for one unordered pair of developer records.
///
/// `name_1`/`email_1` always belong to the record that comes first in the
/// input. Names are the original display names; emails are trimmed and
/// lowercased.
#[derive(Debug, Clone, PartialEq)]
pub struct PairScore {
    pub name_1: String,
    pub email_1: String,
    pub name_2: String,
    pub email_2: String,

    /// Edit similarity of the normalized full names
    pub c1: f64,

    /// Edit similarity of the email local parts
    pub c2: f64,

    /// Mean of first-name and last-name edit similarities
    pub c3: f64,

    /// Initial and last name of one record both occur in the other's local part
    pub c4: bool,
}

impl PairScore {
    /// Number of signals that agree at threshold `t`
    ///
    /// `c1`, `c2` and `c3` vote when they reach `t`; `c4` votes on its own.
    #[must_use]
    pub fn votes(&self, t: f64) -> u8 {
        u8::from(self.c1 >= t) + u8::from(self.c2 >= t) + u8::from(self.c3 >= t) + u8::from(self.c4)
    }

    /// Is this pair a match at threshold `t`?
    #[must_use]
    pub fn is_match_at(&self, t: f64) -> bool {
        self.votes(t) >= MIN_VOTES
    }

    /// Highest threshold at which this pair is still a match.
    ///
    /// The pair matches at `t` iff `t <= crossing_threshold()`. With `c4` set
    /// one more vote is needed, so this is the largest of the three scores;
    /// otherwise two are needed and it is the second largest.
    #[must_use]
    pub fn crossing_threshold(&self) -> f64 {
        let mut scores = [self.c1, self.c2, self.c3];
        scores.sort_by(|a, b| b.total_cmp(a));
        if self.c4 {
            scores[0]
        } else {
            scores[1]
        }
    }
}
