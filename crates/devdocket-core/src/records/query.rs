//! Compound, read-only filters over a record list.

use super::Record;

/// Conjunction of a free-text match and any number of field predicates.
///
/// ```ignore
/// let query = Query::new()
///     .text("undefined")
///     .eq(|b: &Bug| b.tech_stack, TechStack::React);
/// let hits = bugs.query(&query);
/// ```
pub struct Query<'a, R> {
    needle: Option<String>,
    predicates: Vec<Box<dyn Fn(&R) -> bool + 'a>>,
}

impl<'a, R: Record> Query<'a, R> {
    /// Matches every record.
    pub fn new() -> Self {
        Self {
            needle: None,
            predicates: Vec::new(),
        }
    }

    /// Case-insensitive substring match on [`Record::search_text`].
    /// Blank text matches everything.
    pub fn text(mut self, needle: impl AsRef<str>) -> Self {
        let needle = needle.as_ref().trim().to_lowercase();
        self.needle = (!needle.is_empty()).then_some(needle);
        self
    }

    /// Require `field(record) == value`.
    pub fn eq<V, F>(self, field: F, value: V) -> Self
    where
        V: PartialEq + 'a,
        F: Fn(&R) -> V + 'a,
    {
        self.filter(move |r| field(r) == value)
    }

    /// Like [`Query::eq`], but `None` ("All") adds no constraint.
    pub fn eq_opt<V, F>(self, field: F, value: Option<V>) -> Self
    where
        V: PartialEq + 'a,
        F: Fn(&R) -> V + 'a,
    {
        match value {
            Some(value) => self.eq(field, value),
            None => self,
        }
    }

    /// Require an arbitrary predicate.
    pub fn filter(mut self, predicate: impl Fn(&R) -> bool + 'a) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    pub fn matches(&self, record: &R) -> bool {
        let text_ok = match &self.needle {
            Some(needle) => record.search_text().to_lowercase().contains(needle.as_str()),
            None => true,
        };
        text_ok && self.predicates.iter().all(|p| p(record))
    }
}

impl<R: Record> Default for Query<'_, R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Bug, BugDraft, BugStatus, ErrorType, RecordId, TechStack};
    use chrono::Utc;

    fn bug(id: u64, title: &str, stack: TechStack, kind: ErrorType) -> Bug {
        Bug::create(
            RecordId(id),
            Utc::now(),
            BugDraft {
                title: title.to_string(),
                tech_stack: stack,
                error_type: kind,
                solution: String::new(),
            },
        )
    }

    fn sample() -> Vec<Bug> {
        vec![
            bug(4, "TypeError: undefined is not a function", TechStack::React, ErrorType::Runtime),
            bug(3, "Cannot read property map of undefined", TechStack::JavaScript, ErrorType::Logic),
            bug(2, "Unexpected token <", TechStack::JavaScript, ErrorType::Syntax),
            bug(1, "UNDEFINED variable in hook", TechStack::React, ErrorType::Logic),
        ]
    }

    fn ids(bugs: &[Bug], query: &Query<'_, Bug>) -> Vec<u64> {
        bugs.iter().filter(|b| query.matches(b)).map(|b| b.id.0).collect()
    }

    #[test]
    fn empty_query_matches_everything() {
        assert_eq!(ids(&sample(), &Query::new()), [4, 3, 2, 1]);
        assert_eq!(ids(&sample(), &Query::new().text("   ")), [4, 3, 2, 1]);
    }

    #[test]
    fn text_is_case_insensitive_substring() {
        assert_eq!(ids(&sample(), &Query::new().text("Undefined")), [4, 3, 1]);
    }

    #[test]
    fn text_and_categories_combine() {
        let query = Query::new()
            .text("undefined")
            .eq(|b: &Bug| b.tech_stack, TechStack::React)
            .eq(|b: &Bug| b.error_type, ErrorType::Logic);
        assert_eq!(ids(&sample(), &query), [1]);
    }

    #[test]
    fn eq_opt_none_means_all() {
        let query = Query::new()
            .eq_opt(|b: &Bug| b.tech_stack, None)
            .eq_opt(|b: &Bug| b.error_type, Some(ErrorType::Logic));
        assert_eq!(ids(&sample(), &query), [3, 1]);
    }

    #[test]
    fn custom_predicate() {
        let query = Query::new().filter(|b: &Bug| b.status == BugStatus::Resolved);
        assert!(ids(&sample(), &query).is_empty());
    }
}
