//! Query matching against a catalog.
//!
//! Matching is a filter, not a ranked search: every entry either matches or
//! it does not, and results keep catalog order.

use regex::{Regex, RegexBuilder};
use sur_core::template::capitalize;
use sur_core::{Error, Result, Specification};

/// Filters applied on top of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Only match this exact version.
    pub version: Option<String>,
    /// Also treat the query as a case-insensitive regular expression.
    pub use_regex: bool,
    /// Also match entries tagged with the capitalized query.
    pub use_tags: bool,
}

impl SearchOptions {
    /// No filters: exact, case-insensitive name match only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one version.
    #[must_use]
    pub fn version(mut self, version: Option<impl Into<String>>) -> Self {
        self.version = version.map(Into::into);
        self
    }

    /// Enable regex matching.
    #[must_use]
    pub const fn regex(mut self, enabled: bool) -> Self {
        self.use_regex = enabled;
        self
    }

    /// Enable tag matching.
    #[must_use]
    pub const fn tags(mut self, enabled: bool) -> Self {
        self.use_tags = enabled;
        self
    }
}

/// A compiled query.
#[derive(Debug, Clone)]
pub struct Matcher {
    query: Option<String>,
    lowered: String,
    tag: String,
    pattern: Option<Regex>,
    version: Option<String>,
    use_tags: bool,
}

impl Matcher {
    /// Compile a query. A `None` query matches nothing.
    ///
    /// # Errors
    /// Returns [`Error::Pattern`] if regex matching is enabled and the query
    /// is not a valid pattern.
    pub fn new(query: Option<&str>, options: &SearchOptions) -> Result<Self> {
        let pattern = match query {
            Some(q) if options.use_regex => Some(
                RegexBuilder::new(q)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| Error::Pattern {
                        pattern: q.to_string(),
                        message: e.to_string(),
                    })?,
            ),
            _ => None,
        };

        Ok(Self {
            query: query.map(String::from),
            lowered: query.map(str::to_lowercase).unwrap_or_default(),
            tag: query.map(capitalize).unwrap_or_default(),
            pattern,
            version: options.version.clone(),
            use_tags: options.use_tags,
        })
    }

    /// Whether `spec` passes the query and the version filter.
    #[must_use]
    pub fn matches(&self, spec: &Specification) -> bool {
        if self.query.is_none() {
            return false;
        }

        let name = spec.name.to_lowercase();
        let hit = name == self.lowered
            || self.pattern.as_ref().is_some_and(|re| re.is_match(&name))
            || (self.use_tags && spec.tags.iter().any(|t| *t == self.tag));

        hit && self.version.as_ref().is_none_or(|v| spec.version == *v)
    }
}

/// All entries of `catalog` matching `query`, in catalog order.
///
/// # Errors
/// Same as [`Matcher::new`].
pub fn search<'a>(
    query: Option<&str>,
    catalog: &'a [Specification],
    options: &SearchOptions,
) -> Result<Vec<&'a Specification>> {
    let matcher = Matcher::new(query, options)?;
    Ok(catalog.iter().filter(|s| matcher.matches(s)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, version: &str, tags: &[&str]) -> Specification {
        Specification {
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            ..Specification::new(name, version)
        }
    }

    fn catalog() -> Vec<Specification> {
        vec![
            spec("clock", "0.1", &["Time"]),
            spec("clock", "0.3", &["Time"]),
            spec("cpu", "0.2", &["Sys"]),
            spec("terminal", "1.0", &["Term"]),
        ]
    }

    fn names(found: &[&Specification]) -> Vec<String> {
        found.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn exact_name_is_case_insensitive() {
        let catalog = catalog();
        let found = search(Some("Clock"), &catalog, &SearchOptions::new()).unwrap();
        assert_eq!(names(&found), ["clock-0.1", "clock-0.3"]);
    }

    #[test]
    fn pattern_requires_regex_flag() {
        let catalog = catalog();
        assert!(
            search(Some("cl.*"), &catalog, &SearchOptions::new())
                .unwrap()
                .is_empty()
        );

        let found = search(Some("C.*"), &catalog, &SearchOptions::new().regex(true)).unwrap();
        assert_eq!(names(&found), ["clock-0.1", "clock-0.3", "cpu-0.2"]);
    }

    #[test]
    fn tags_match_capitalized_query() {
        let catalog = catalog();
        let found = search(Some("term"), &catalog, &SearchOptions::new().tags(true)).unwrap();
        assert_eq!(names(&found), ["terminal-1.0"]);

        assert!(
            search(Some("term"), &catalog, &SearchOptions::new())
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn version_filter_is_exact() {
        let catalog = catalog();
        let found = search(
            Some("clock"),
            &catalog,
            &SearchOptions::new().version(Some("0.3")),
        )
        .unwrap();
        assert_eq!(names(&found), ["clock-0.3"]);

        let none = search(
            Some("clock"),
            &catalog,
            &SearchOptions::new().version(Some("0.30")),
        )
        .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn missing_query_matches_nothing() {
        let catalog = catalog();
        let options = SearchOptions::new().regex(true).tags(true);
        assert!(search(None, &catalog, &options).unwrap().is_empty());
    }

    #[test]
    fn invalid_pattern() {
        let catalog = catalog();
        assert!(matches!(
            search(Some("(clock"), &catalog, &SearchOptions::new().regex(true)),
            Err(Error::Pattern { .. })
        ));
        assert!(
            search(Some("(clock"), &catalog, &SearchOptions::new())
                .unwrap()
                .is_empty()
        );
    }
}
