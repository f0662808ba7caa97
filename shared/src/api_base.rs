use std::ops::Index;

use crate::constants::{CONVENTIONAL_API_PREFIX, ROOT_BASE};

/// Strips a single trailing slash so bases can be concatenated with
/// slash-prefixed paths.
pub fn normalize_base(value: &str) -> String {
    value.strip_suffix('/').unwrap_or(value).to_string()
}

/// Joins a candidate base and a request path, making sure the path carries
/// exactly the leading slash the base lacks.
pub fn join_path(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Ordered list of base URL prefixes to try when reaching the backend API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateBases {
    bases: Vec<String>,
}

impl CandidateBases {
    /// Builds `[override, "/api", ""]`, leaving out the override when it is
    /// absent or empty.
    pub fn from_override(base_override: Option<&str>) -> Self {
        let mut bases = Vec::with_capacity(3);

        if let Some(value) = base_override.filter(|value| !value.is_empty()) {
            bases.push(normalize_base(value));
        }

        bases.push(CONVENTIONAL_API_PREFIX.to_string());
        bases.push(ROOT_BASE.to_string());

        Self { bases }
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.bases.get(index).map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.get(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.bases.iter().map(String::as_str)
    }

    /// Indices of the candidates in the order they should be tried.
    ///
    /// Without a resolved candidate this is the list as built. Otherwise the
    /// resolved one leads, followed by every other candidate whose value
    /// differs from it, in original order.
    pub fn try_order(&self, resolved: Option<usize>) -> Vec<usize> {
        let Some(resolved) = resolved.filter(|&index| index < self.bases.len()) else {
            return (0..self.bases.len()).collect();
        };

        let resolved_base = &self.bases[resolved];
        std::iter::once(resolved)
            .chain(
                self.bases
                    .iter()
                    .enumerate()
                    .filter(|(_, base)| base.as_str() != resolved_base.as_str())
                    .map(|(index, _)| index),
            )
            .collect()
    }
}

impl Index<usize> for CandidateBases {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.bases[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_candidates_without_override() {
        let candidates = CandidateBases::from_override(None);
        assert_eq!(candidates.iter().collect::<Vec<_>>(), vec!["/api", ""]);
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let candidates = CandidateBases::from_override(Some(""));
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates.first(), Some("/api"));
    }

    #[test]
    fn test_override_trailing_slash_is_trimmed() {
        let candidates = CandidateBases::from_override(Some("https://host/api/"));
        assert_eq!(
            candidates.iter().collect::<Vec<_>>(),
            vec!["https://host/api", "/api", ""]
        );
    }

    #[test]
    fn test_normalize_strips_only_one_slash() {
        assert_eq!(normalize_base("https://host//"), "https://host/");
        assert_eq!(normalize_base("/"), "");
        assert_eq!(normalize_base(""), "");
        assert_eq!(normalize_base("/v1"), "/v1");
    }

    #[test]
    fn test_join_path_adds_leading_slash() {
        assert_eq!(join_path("/api", "login"), "/api/login");
        assert_eq!(join_path("/api", "/login"), "/api/login");
        assert_eq!(join_path("", "login"), "/login");
        assert_eq!(join_path("https://host/api", "/feedback/3"), "https://host/api/feedback/3");
    }

    #[test]
    fn test_try_order_unresolved_keeps_list_order() {
        let candidates = CandidateBases::from_override(Some("https://host"));
        assert_eq!(candidates.try_order(None), vec![0, 1, 2]);
    }

    #[test]
    fn test_try_order_puts_resolved_first() {
        let candidates = CandidateBases::from_override(Some("https://host"));
        assert_eq!(candidates.try_order(Some(2)), vec![2, 0, 1]);
        assert_eq!(candidates.try_order(Some(1)), vec![1, 0, 2]);
        assert_eq!(candidates.try_order(Some(0)), vec![0, 1, 2]);
    }

    #[test]
    fn test_try_order_drops_duplicates_of_resolved() {
        // "/" normalizes to the root base, which is also the last candidate.
        let candidates = CandidateBases::from_override(Some("/"));
        assert_eq!(candidates.iter().collect::<Vec<_>>(), vec!["", "/api", ""]);
        assert_eq!(candidates.try_order(None), vec![0, 1, 2]);
        assert_eq!(candidates.try_order(Some(0)), vec![0, 1]);
    }

    #[test]
    fn test_try_order_ignores_out_of_range_index() {
        let candidates = CandidateBases::from_override(None);
        assert_eq!(candidates.try_order(Some(7)), vec![0, 1]);
    }
}
