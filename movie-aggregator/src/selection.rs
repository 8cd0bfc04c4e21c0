use crate::models::Candidate;

/// Release-year prefix preferred when picking among search candidates.
///
/// This value looks like a leftover from a demo against "Mars Attacks!"
/// rather than a real business rule. It is kept as the default so lookups
/// behave the same as before, but integrators should override it through
/// `RELEASE_YEAR_PREFIX` or [`SelectionPolicy::new`].
pub const DEFAULT_RELEASE_YEAR_PREFIX: &str = "1996";

/// Decides which search candidate the reviews are fetched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPolicy {
    release_year_prefix: String,
}

impl SelectionPolicy {
    pub fn new(release_year_prefix: impl Into<String>) -> Self {
        Self {
            release_year_prefix: release_year_prefix.into(),
        }
    }

    pub fn release_year_prefix(&self) -> &str {
        &self.release_year_prefix
    }

    pub fn is_default(&self) -> bool {
        self.release_year_prefix == DEFAULT_RELEASE_YEAR_PREFIX
    }

    /// First candidate released in the preferred year, otherwise the first
    /// candidate in provider order. `None` only for an empty list.
    pub fn select<'a>(&self, candidates: &'a [Candidate]) -> Option<&'a Candidate> {
        candidates
            .iter()
            .find(|c| c.release_date.starts_with(&self.release_year_prefix))
            .or_else(|| candidates.first())
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RELEASE_YEAR_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: i64, release_date: &str) -> Candidate {
        Candidate {
            id,
            title: format!("movie {}", id),
            release_date: release_date.to_string(),
        }
    }

    #[test]
    fn test_prefers_matching_release_year() {
        let candidates = vec![candidate(1, "1997-01-01"), candidate(2, "1996-12-13")];
        let selected = SelectionPolicy::default().select(&candidates).unwrap();
        assert_eq!(selected.id, 2);
    }

    #[test]
    fn test_first_match_wins_among_same_year() {
        let candidates = vec![
            candidate(1, "2001-05-05"),
            candidate(2, "1996-02-01"),
            candidate(3, "1996-12-13"),
        ];
        let selected = SelectionPolicy::default().select(&candidates).unwrap();
        assert_eq!(selected.id, 2);
    }

    #[test]
    fn test_falls_back_to_first_candidate() {
        let candidates = vec![candidate(7, "2010-03-01"), candidate(8, "")];
        let selected = SelectionPolicy::default().select(&candidates).unwrap();
        assert_eq!(selected.id, 7);
    }

    #[test]
    fn test_empty_list_selects_nothing() {
        assert!(SelectionPolicy::default().select(&[]).is_none());
    }

    #[test]
    fn test_custom_prefix() {
        let candidates = vec![candidate(1, "1996-12-13"), candidate(2, "2024-06-01")];
        let policy = SelectionPolicy::new("2024");
        assert!(!policy.is_default());
        assert_eq!(policy.select(&candidates).unwrap().id, 2);
    }
}
