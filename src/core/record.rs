use crate::core::identity::{normalize, NormalizedIdentity};

/// A single developer identity as recorded in the input table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeveloperRecord {
    /// Display name exactly as it appears in the input (column 0)
    pub display_name: String,

    /// Email address exactly as it appears in the input (column 1)
    pub email: String,
}

impl DeveloperRecord {
    pub fn new(display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
        }
    }

    /// Derive the comparison keys for this record
    #[must_use]
    pub fn normalized(&self) -> NormalizedIdentity {
        normalize(&self.display_name, &self.email)
    }
}
