//! Keyword sanitizing for `query_string` queries.
//!
//! User keywords are turned into a conjunction of wildcard groups. Characters
//! that carry meaning in the query string syntax never reach the backend;
//! each one is replaced by an explicit ` AND ` so it splits the term instead.

use std::fmt;

/// Characters with special meaning in the Lucene query string syntax.
pub const RESERVED_CHARACTERS: [char; 21] = [
    '+', '-', '@', '!', '#', '%', '^', '<', '>', ':', '~', '*', '?', '\\', '/', '{', '}', '[',
    ']', '=', '&',
];

const TERM_BOUNDARY: &str = " AND ";

pub fn is_reserved(c: char) -> bool {
    RESERVED_CHARACTERS.contains(&c)
}

/// Replaces every reserved character in a single term with ` AND `.
pub fn escape_term(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if is_reserved(c) {
            escaped.push_str(TERM_BOUNDARY);
        } else {
            escaped.push(c);
        }
    }
    escaped
}

fn sanitized_terms(keyword: &str) -> impl Iterator<Item = String> + '_ {
    keyword.split(char::is_whitespace).map(escape_term)
}

/// Escapes every whitespace separated term of `keyword`.
///
/// ```
/// assert_eq!(search_client::sanitize_keyword("test@user"), "test AND user");
/// ```
pub fn sanitize_keyword(keyword: &str) -> String {
    sanitized_terms(keyword).collect::<Vec<_>>().join(" ")
}

/// A keyword that has been sanitized and wrapped into wildcard groups, ready
/// to be used as the `query` of a `query_string` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryString(String);

impl QueryString {
    /// ```
    /// use search_client::QueryString;
    ///
    /// let query = QueryString::from_keyword("test@user");
    /// assert_eq!(query.as_str(), "(*test*) AND (*user*)");
    /// ```
    pub fn from_keyword(keyword: &str) -> Self {
        let groups = sanitized_terms(keyword)
            .flat_map(|term| wildcard_groups(&term))
            .collect::<Vec<_>>();

        Self(groups.join(TERM_BOUNDARY))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Takes one already escaped term. An empty term still produces one (empty)
// group so that whitespace-only keywords keep their shape.
fn wildcard_groups(escaped: &str) -> Vec<String> {
    let parts = escaped
        .split(TERM_BOUNDARY)
        .filter(|part| !part.is_empty())
        .map(|part| format!("(*{part}*)"))
        .collect::<Vec<_>>();

    if parts.is_empty() {
        vec!["(**)".to_string()]
    } else {
        parts
    }
}
