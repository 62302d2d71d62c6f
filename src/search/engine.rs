//! Weighted multi-field search over an indexed version.

use super::matcher::Matcher;
use super::snippet::generate_snippet;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{IndexedPage, SearchResult};

/// Score multiplier for title matches.
pub const SCORE_TITLE: u32 = 10;
/// Score multiplier for keyword matches.
pub const SCORE_KEYWORDS: u32 = 5;
/// Score multiplier for metadata matches.
pub const SCORE_METADATA: u32 = 2;
/// Score multiplier for content matches.
pub const SCORE_CONTENT: u32 = 1;

/// Match offsets found in each searchable field of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMatches {
    pub title: Vec<usize>,
    pub keywords: Vec<usize>,
    pub metadata: Vec<usize>,
    pub content: Vec<usize>,
}

impl FieldMatches {
    /// Run `matcher` over every field of `page`.
    pub fn find(matcher: &Matcher, page: &IndexedPage) -> Self {
        Self {
            title: matcher.find_all(&page.title),
            keywords: matcher.find_all(&page.keywords),
            metadata: matcher.find_all(&page.metadata),
            content: matcher.find_all(&page.content),
        }
    }

    /// Weighted score; zero when nothing matched.
    pub fn score(&self) -> u32 {
        weighted(self.title.len(), SCORE_TITLE)
            .saturating_add(weighted(self.keywords.len(), SCORE_KEYWORDS))
            .saturating_add(weighted(self.metadata.len(), SCORE_METADATA))
            .saturating_add(weighted(self.content.len(), SCORE_CONTENT))
    }

    /// The field the snippet is drawn from and its first match offset.
    ///
    /// Fields are tried in priority order: title, keywords, metadata, content.
    pub fn snippet_source<'a>(&self, page: &'a IndexedPage) -> Option<(&'a str, usize)> {
        [
            (&self.title, page.title.as_str()),
            (&self.keywords, page.keywords.as_str()),
            (&self.metadata, page.metadata.as_str()),
            (&self.content, page.content.as_str()),
        ]
        .into_iter()
        .find_map(|(offsets, text)| offsets.first().map(|&pos| (text, pos)))
    }
}

fn weighted(count: usize, weight: u32) -> u32 {
    u32::try_from(count)
        .unwrap_or(u32::MAX)
        .saturating_mul(weight)
}

/// Executes queries against an index.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    min_length: usize,
    max_results: usize,
    snippet_length: usize,
}

impl SearchEngine {
    pub const fn new(min_length: usize, max_results: usize, snippet_length: usize) -> Self {
        Self {
            min_length,
            max_results,
            snippet_length,
        }
    }

    pub const fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.min_length, config.max_results, config.snippet_length)
    }

    /// Trim `query` and check it against the minimum length.
    pub fn validate<'q>(&self, query: &'q str) -> Result<&'q str, SearchError> {
        let query = query.trim();
        if query.is_empty() || query.chars().count() < self.min_length {
            return Err(SearchError::Validation {
                min_length: self.min_length,
            });
        }
        Ok(query)
    }

    /// Search every page of `index`, returning matches ranked by score.
    ///
    /// Equal scores keep index order. At most `max_results` results are
    /// returned.
    pub fn perform_search(
        &self,
        query: &str,
        index: &[IndexedPage],
    ) -> Result<Vec<SearchResult>, SearchError> {
        let query = self.validate(query)?;
        let matcher = Matcher::compile(query)?;

        let mut results: Vec<SearchResult> = index
            .iter()
            .filter_map(|page| self.score_page(&matcher, page))
            .collect();

        // Stable sort: ties keep index order
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(self.max_results);

        tracing::debug!(
            "Query '{}' ({}) matched {} of {} pages",
            query,
            if matcher.is_wildcard() { "wildcard" } else { "plain" },
            results.len(),
            index.len()
        );

        Ok(results)
    }

    fn score_page(&self, matcher: &Matcher, page: &IndexedPage) -> Option<SearchResult> {
        let matches = FieldMatches::find(matcher, page);
        let score = matches.score();
        if score == 0 {
            return None;
        }

        let snippet = matches
            .snippet_source(page)
            .map(|(text, pos)| generate_snippet(text, pos, self.snippet_length))
            .unwrap_or_default();

        Some(SearchResult {
            title: page.title.clone(),
            slug: page.slug.clone(),
            route: page.route.clone(),
            snippet,
            score,
            version: page.version.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    fn page(title: &str, keywords: &str, metadata: &str, content: &str) -> IndexedPage {
        IndexedPage {
            title: title.to_string(),
            slug: title.to_lowercase().replace(' ', "-"),
            route: format!("/6.0/{}", title.to_lowercase().replace(' ', "-")),
            content: content.to_string(),
            version: "6.0".to_string(),
            keywords: keywords.to_string(),
            metadata: metadata.to_string(),
        }
    }

    fn engine() -> SearchEngine {
        SearchEngine::new(3, 1000, 150)
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("ab")]
    #[case("  ab  ")]
    fn test_rejects_short_queries(#[case] query: &str) {
        let_assert!(
            Err(SearchError::Validation { min_length: 3 }) =
                engine().perform_search(query, &[])
        );
    }

    #[test]
    fn test_min_length_counts_characters() {
        // Three characters, six bytes
        check!(engine().validate("ééé").is_ok());
    }

    #[test]
    fn test_weighted_score() {
        let index = vec![page(
            "Route to route",
            "route router",
            "route",
            "route one, route two, route three",
        )];
        let results = engine().perform_search("route", &index).unwrap();

        let_assert!([result] = results.as_slice());
        // 2 title + 2 keyword + 1 metadata + 3 content
        check!(result.score == 2 * 10 + 2 * 5 + 2 + 3);
    }

    #[test]
    fn test_zero_score_excluded() {
        let index = vec![page("Alpha", "", "", "nothing here"), page("Beta", "", "", "beta")];
        let results = engine().perform_search("beta", &index).unwrap();
        check!(results.len() == 1);
        check!(results.iter().all(|r| r.score > 0));
    }

    #[test]
    fn test_ranking_is_stable_for_ties() {
        let index = vec![
            page("One", "", "", "match"),
            page("Two", "", "", "match match"),
            page("Three", "", "", "match"),
            page("Four", "", "", "match"),
        ];
        let results = engine().perform_search("match", &index).unwrap();

        let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
        check!(titles == vec!["Two", "One", "Three", "Four"]);
    }

    #[test]
    fn test_max_results_truncates() {
        let index: Vec<_> = (0..20)
            .map(|i| page(&format!("Page {}", i), "", "", "common"))
            .collect();
        let results = SearchEngine::new(3, 5, 150)
            .perform_search("common", &index)
            .unwrap();
        check!(results.len() == 5);
        check!(results[0].title == "Page 0");
    }

    #[rstest]
    #[case(page("Setup guide", "setup", "setup", "setup"), "Setup guide")]
    #[case(page("Guide", "install setup", "setup", "setup"), "install setup")]
    #[case(page("Guide", "install", "a setup note", "setup"), "a setup note")]
    #[case(page("Guide", "install", "note", "run the setup"), "run the setup")]
    fn test_snippet_source_priority(#[case] doc: IndexedPage, #[case] expected: &str) {
        let results = engine().perform_search("setup", &[doc]).unwrap();
        check!(results[0].snippet == expected);
    }

    #[test]
    fn test_snippet_window_in_content() {
        let content = format!("{} needle {}", "x".repeat(200), "y".repeat(200));
        let index = vec![page("Doc", "", "", &content)];
        let results = SearchEngine::new(3, 10, 10)
            .perform_search("needle", &index)
            .unwrap();

        check!(results[0].snippet == format!("...{} needle {}...", "x".repeat(9), "y".repeat(3)));
    }

    #[test]
    fn test_wildcard_query() {
        let index = vec![
            page("First page", "", "", "text"),
            page("Other", "", "", "pages everywhere"),
            page("Unrelated", "", "", "nothing"),
        ];
        let results = engine().perform_search("PAG*", &index).unwrap();
        let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
        check!(titles == vec!["First page", "Other"]);
        check!(results[0].score == 10);
        check!(results[1].score == 1);
    }

    #[test]
    fn test_field_matches_snippet_source_none() {
        let matches = FieldMatches::default();
        check!(matches.score() == 0);
        check!(matches.snippet_source(&page("a", "b", "c", "d")).is_none());
    }
}
