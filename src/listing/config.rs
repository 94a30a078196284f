//! Configuration types for listings

/// Configuration for a listing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingConfig {
    /// List entries whose name starts with `.`, including `.` and `..`
    pub show_hidden: bool,
    pub long_format: bool,
    pub recursive: bool,
    /// Count the entries that would be listed instead of printing them
    pub count_only: bool,
}

impl ListingConfig {
    /// Apply the precedence rules between flags: counting wins over long format.
    pub fn normalized(self) -> Self {
        Self {
            long_format: self.long_format && !self.count_only,
            ..self
        }
    }
}
