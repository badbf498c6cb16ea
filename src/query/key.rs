use std::fmt;

/// Identifies a cache entry: a resource name followed by its parameters,
/// e.g. `club:42` or `clubs:chess:-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(resource: &str) -> Self {
        Self(vec![resource.to_string()])
    }

    pub fn with(mut self, part: impl fmt::Display) -> Self {
        self.0.push(part.to_string());
        self
    }

    /// Appends an optional parameter; `None` is written as `-` so positions stay stable.
    pub fn with_opt<T: fmt::Display>(self, part: Option<T>) -> Self {
        match part {
            Some(value) => self.with(value),
            None => self.with("-"),
        }
    }

    pub fn resource(&self) -> &str {
        &self.0[0]
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(":"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_compare_by_all_parts() {
        let a = QueryKey::new("club").with(42);
        assert_eq!(a, QueryKey::new("club").with("42"));
        assert_ne!(a, QueryKey::new("club").with(43));
        assert_eq!(a.to_string(), "club:42");
        assert_eq!(a.resource(), "club");
    }

    #[test]
    fn prefix_matching_is_segment_based() {
        let key = QueryKey::new("club-members").with(1);
        assert!(key.starts_with(&QueryKey::new("club-members")));
        assert!(!key.starts_with(&QueryKey::new("club")));
        assert_eq!(QueryKey::new("clubs").with_opt(None::<i64>).to_string(), "clubs:-");
    }
}
