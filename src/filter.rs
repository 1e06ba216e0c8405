//! Package filter configuration
//!
//! Decides which declared packages are handed to the package manager.

/// Filter applied to every declared package before updating it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateFilter {
    /// Packages to exclude from updates
    pub exclude: Vec<String>,
    /// If non-empty, only update these packages
    pub only: Vec<String>,
}

impl UpdateFilter {
    /// Create a new UpdateFilter that lets every package through
    pub fn new() -> Self {
        Self::default()
    }

    /// Set packages to exclude
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Set packages to include (only list)
    pub fn with_only(mut self, only: Vec<String>) -> Self {
        self.only = only;
        self
    }

    /// Check if a package should be updated
    pub fn should_process_package(&self, name: &str) -> bool {
        if !self.only.is_empty() {
            return self.only.iter().any(|p| p == name);
        }
        !self.exclude.iter().any(|p| p == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_filter_allows_everything() {
        let filter = UpdateFilter::new();
        assert!(filter.should_process_package("lodash"));
        assert!(filter.should_process_package("Serilog"));
    }

    #[test]
    fn test_exclude() {
        let filter = UpdateFilter::new().with_exclude(vec!["lodash".to_string()]);
        assert!(!filter.should_process_package("lodash"));
        assert!(filter.should_process_package("react"));
    }

    #[test]
    fn test_only() {
        let filter = UpdateFilter::new().with_only(vec!["react".to_string()]);
        assert!(filter.should_process_package("react"));
        assert!(!filter.should_process_package("lodash"));
    }

    #[test]
    fn test_only_takes_precedence_over_exclude() {
        let filter = UpdateFilter::new()
            .with_only(vec!["react".to_string()])
            .with_exclude(vec!["react".to_string()]);
        assert!(filter.should_process_package("react"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let filter = UpdateFilter::new().with_exclude(vec!["Serilog".to_string()]);
        assert!(filter.should_process_package("serilog"));
    }
}
