//! Filter and search criteria for the author collection.

use crate::entities::Author;

/// A single author predicate derived from one active criterion.
type AuthorPredicate<'a> = Box<dyn Fn(&Author) -> bool + 'a>;

/// Normalized filter/search constraints for listing authors.
///
/// Construction trims each raw value. A value that is absent, empty, or
/// whitespace-only normalizes to `None`, so the query composer treats it as
/// "no constraint" rather than "match the empty string".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    main_category: Option<String>,
    search_query: Option<String>,
}

impl FilterCriteria {
    /// Normalize raw query-string values into criteria.
    pub fn new(main_category: Option<&str>, search_query: Option<&str>) -> Self {
        Self {
            main_category: normalize(main_category),
            search_query: normalize(search_query),
        }
    }

    /// Exact-match category constraint, if one survived normalization.
    pub fn main_category(&self) -> Option<&str> {
        self.main_category.as_deref()
    }

    /// Substring search constraint, if one survived normalization.
    pub fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref()
    }

    /// True when no constraint is active and every author matches.
    pub fn is_unconstrained(&self) -> bool {
        self.main_category.is_none() && self.search_query.is_none()
    }

    /// One predicate per active criterion.
    ///
    /// The category criterion requires a case-sensitive exact match on the
    /// author's main category. The search criterion matches when the query
    /// appears as a substring of the main category, the last name, or the
    /// first name.
    fn predicates(&self) -> Vec<AuthorPredicate<'_>> {
        let mut predicates: Vec<AuthorPredicate<'_>> = Vec::new();

        if let Some(category) = self.main_category.as_deref() {
            predicates.push(Box::new(move |author: &Author| {
                author.main_category.as_deref() == Some(category)
            }));
        }

        if let Some(query) = self.search_query.as_deref() {
            predicates.push(Box::new(move |author: &Author| {
                author
                    .main_category
                    .as_deref()
                    .is_some_and(|category| category.contains(query))
                    || author.last_name.contains(query)
                    || author.first_name.contains(query)
            }));
        }

        predicates
    }

    /// Evaluate the composed predicate: the logical AND of every active
    /// criterion. With no active criteria this matches every author.
    pub fn matches(&self, author: &Author) -> bool {
        self.predicates().iter().all(|predicate| predicate(author))
    }
}

fn normalize(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use uuid::Uuid;

    fn author(first: &str, last: &str, category: Option<&str>) -> Author {
        Author {
            id: Uuid::now_v7(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: date!(1980 - 05 - 10),
            main_category: category.map(str::to_owned),
        }
    }

    #[test]
    fn absent_empty_and_whitespace_normalize_identically() {
        let absent = FilterCriteria::new(None, None);
        let empty = FilterCriteria::new(Some(""), Some(""));
        let blank = FilterCriteria::new(Some("   "), Some("\t \n"));

        assert_eq!(absent, empty);
        assert_eq!(absent, blank);
        assert!(absent.is_unconstrained());
    }

    #[test]
    fn values_are_trimmed() {
        let criteria = FilterCriteria::new(Some("  History "), Some(" art\t"));
        assert_eq!(criteria.main_category(), Some("History"));
        assert_eq!(criteria.search_query(), Some("art"));
    }

    #[test]
    fn unconstrained_matches_every_author() {
        let criteria = FilterCriteria::new(None, None);
        assert!(criteria.matches(&author("Jane", "Doe", Some("History"))));
        assert!(criteria.matches(&author("Sam", "Hart", None)));
    }

    #[test]
    fn category_is_an_exact_case_sensitive_match() {
        let criteria = FilterCriteria::new(Some("History"), None);
        assert!(criteria.matches(&author("Jane", "Doe", Some("History"))));
        assert!(!criteria.matches(&author("Ann", "Lee", Some("history"))));
        assert!(!criteria.matches(&author("Ann", "Lee", Some("Art"))));
        assert!(!criteria.matches(&author("Ann", "Lee", None)));
    }

    #[test]
    fn search_matches_substring_across_category_and_names() {
        let criteria = FilterCriteria::new(None, Some("art"));
        // "art" is a substring of the last name "Hart"...
        assert!(criteria.matches(&author("Sam", "Hart", Some("Rum"))));
        // ...and of the category "Cartography"...
        assert!(criteria.matches(&author("Ann", "Lee", Some("Cartography"))));
        // ...and of the first name "Martha".
        assert!(criteria.matches(&author("Martha", "Lee", None)));
        // Case-sensitive: "Art" alone does not contain "art".
        assert!(!criteria.matches(&author("Ann", "Lee", Some("Art"))));
    }

    #[test]
    fn both_criteria_combine_with_logical_and() {
        let criteria = FilterCriteria::new(Some("Rum"), Some("art"));
        assert!(criteria.matches(&author("Sam", "Hart", Some("Rum"))));
        // Category matches, search does not.
        assert!(!criteria.matches(&author("Jane", "Doe", Some("Rum"))));
        // Search matches, category does not.
        assert!(!criteria.matches(&author("Sam", "Hart", Some("Ships"))));
    }
}
