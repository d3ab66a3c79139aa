//! Line search.
//!
//! A [`Searcher`] scans the save buffer (rows joined with `'\n'`) and reports the lines that
//! contain a match. Positions are 1-based and the column is always 1: a result names a line,
//! not a span. [`SearchState`] keeps the last result set and walks it circularly for `n`/`p`.

use regex::bytes::{Regex, RegexBuilder};

use crate::config::DEFAULT_MAX_SEARCH_RESULTS;
use crate::error::SearchError;

/// Options that control how the query is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// If `true`, performs a case-sensitive search.
    pub case_sensitive: bool,
    /// If `true`, treats the query as a regex pattern; otherwise it is matched literally.
    pub regex: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            regex: true,
        }
    }
}

/// A matching line, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column (always 1).
    pub column: usize,
}

/// Search capability used by the editor.
pub trait Searcher {
    /// Return the lines of `content` matching `query`, in document order.
    ///
    /// An empty query yields no matches.
    fn search(&self, query: &str, content: &[u8]) -> Result<Vec<SearchMatch>, SearchError>;
}

/// [`Searcher`] backed by the `regex` crate, one match per line, capped at `max_results`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegexSearcher {
    options: SearchOptions,
    max_results: usize,
}

impl Default for RegexSearcher {
    fn default() -> Self {
        Self::new(SearchOptions::default(), DEFAULT_MAX_SEARCH_RESULTS)
    }
}

impl RegexSearcher {
    /// Create a searcher with the given options and result cap.
    pub fn new(options: SearchOptions, max_results: usize) -> Self {
        Self {
            options,
            max_results,
        }
    }

    /// Compile options.
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Maximum number of matches returned.
    pub fn max_results(&self) -> usize {
        self.max_results
    }
}

fn compile_search_regex(query: &str, options: SearchOptions) -> Result<Regex, SearchError> {
    let pattern = if options.regex {
        query.to_string()
    } else {
        regex::escape(query)
    };

    RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .build()
        .map_err(SearchError::InvalidPattern)
}

impl Searcher for RegexSearcher {
    fn search(&self, query: &str, content: &[u8]) -> Result<Vec<SearchMatch>, SearchError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let re = compile_search_regex(query, self.options)?;
        let matches = content
            .split_inclusive(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\n").unwrap_or(line))
            .enumerate()
            .filter(|(_, line)| re.is_match(line))
            .map(|(idx, _)| SearchMatch {
                line: idx + 1,
                column: 1,
            })
            .take(self.max_results)
            .collect();
        Ok(matches)
    }
}

/// The last result set plus the match the cursor was last sent to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    matches: Vec<SearchMatch>,
    current: Option<usize>,
}

impl SearchState {
    /// Replace the result set. The next [`SearchState::next`] yields the first match.
    pub fn set(&mut self, matches: Vec<SearchMatch>) {
        self.matches = matches;
        self.current = None;
    }

    /// Forget the result set.
    pub fn clear(&mut self) {
        self.matches.clear();
        self.current = None;
    }

    /// Advance to the next match, wrapping to the first.
    pub fn next(&mut self) -> Option<SearchMatch> {
        if self.matches.is_empty() {
            return None;
        }
        let idx = match self.current {
            Some(idx) => (idx + 1) % self.matches.len(),
            None => 0,
        };
        self.current = Some(idx);
        self.matches.get(idx).copied()
    }

    /// Step back to the previous match, wrapping to the last.
    pub fn prev(&mut self) -> Option<SearchMatch> {
        if self.matches.is_empty() {
            return None;
        }
        let last = self.matches.len() - 1;
        let idx = match self.current {
            Some(0) | None => last,
            Some(idx) => idx - 1,
        };
        self.current = Some(idx);
        self.matches.get(idx).copied()
    }

    /// Number of matches in the result set.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns `true` if the result set is empty.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Index of the match last navigated to.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// All matches in the result set.
    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }
}
