//! Cursor-based pagination over unbounded server-side sequences.
//!
//! The token is opaque: the client never parses or synthesizes one beyond
//! the empty sentinel, and infers nothing from it but "empty vs. non-empty".
//! Fetching is the transport's job; [`collect_all`] only drives the
//! caller-supplied collaborator through the cursor chain.

use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// ContinuationToken
///
/// Opaque resume marker for a paged fetch. Empty means "no further data";
/// a non-empty token is passed back to the server verbatim.
///

#[derive(
    Clone, Debug, Default, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    /// The distinguished terminal token.
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for ContinuationToken {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for ContinuationToken {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

///
/// PagedData
///
/// One fetched page: a continuation token plus the items of this chunk, in
/// server order. The empty page (empty token, no items) is the terminal
/// value.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PagedData<T> {
    #[serde(rename = "ContinuationToken", default)]
    token: ContinuationToken,

    #[serde(rename = "Items", default = "Vec::new")]
    items: Vec<T>,
}

impl<T> PagedData<T> {
    #[must_use]
    pub const fn new(token: ContinuationToken, items: Vec<T>) -> Self {
        Self { token, items }
    }

    /// The terminal page: empty token, zero items.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(ContinuationToken::empty(), Vec::new())
    }

    #[must_use]
    pub const fn continuation_token(&self) -> &ContinuationToken {
        &self.token
    }

    /// True when no further fetch is needed.
    #[must_use]
    pub const fn is_last_page(&self) -> bool {
        self.token.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    #[must_use]
    pub fn into_parts(self) -> (ContinuationToken, Vec<T>) {
        (self.token, self.items)
    }
}

impl<T> Default for PagedData<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Drain a cursor chain through the caller-supplied fetch collaborator.
///
/// Starts from the empty token and re-fetches with each returned token
/// until a page comes back with an empty one. Concatenation is in call
/// order; no consistency guarantee is made if the server-side dataset
/// mutates between fetches.
pub fn collect_all<T, E, F>(mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(&ContinuationToken) -> Result<PagedData<T>, E>,
{
    let mut collected = Vec::new();
    let mut token = ContinuationToken::empty();

    loop {
        let page = fetch(&token)?;
        let (next, mut items) = page.into_parts();
        collected.append(&mut items);

        if next.is_empty() {
            return Ok(collected);
        }
        token = next;
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_is_terminal() {
        let page = PagedData::<u32>::empty();
        assert!(page.is_last_page());
        assert!(page.is_empty());
        assert!(page.continuation_token().is_empty());
    }

    #[test]
    fn collect_all_concatenates_in_call_order() {
        // Three-page chain: "" -> "A" -> "B" -> done.
        let items = collect_all::<u32, (), _>(|token| {
            Ok(match token.as_str() {
                "" => PagedData::new("A".into(), vec![1, 2]),
                "A" => PagedData::new("B".into(), vec![3]),
                "B" => PagedData::new(ContinuationToken::empty(), vec![4, 5]),
                other => panic!("unexpected token {other}"),
            })
        })
        .unwrap();
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn collect_all_stops_on_first_empty_token() {
        let mut calls = 0usize;
        let items = collect_all::<u32, (), _>(|_| {
            calls += 1;
            Ok(PagedData::new(ContinuationToken::empty(), vec![9]))
        })
        .unwrap();
        assert_eq!(items, vec![9]);
        assert_eq!(calls, 1);
    }

    #[test]
    fn collect_all_propagates_fetch_errors() {
        let result = collect_all::<u32, &str, _>(|_| Err("transport down"));
        assert_eq!(result, Err("transport down"));
    }

    #[test]
    fn paged_wire_shape_defaults_missing_token_to_empty() {
        let page: PagedData<u32> = serde_json::from_str(r#"{ "Items": [1, 2] }"#).unwrap();
        assert!(page.is_last_page());
        assert_eq!(page.items(), &[1, 2]);

        let page: PagedData<u32> =
            serde_json::from_str(r#"{ "ContinuationToken": "A", "Items": [] }"#).unwrap();
        assert_eq!(page.continuation_token().as_str(), "A");
        assert!(!page.is_last_page());
    }

    #[test]
    fn tokens_compare_structurally() {
        assert_eq!(ContinuationToken::from("A"), "A".into());
        assert_ne!(ContinuationToken::from("A"), ContinuationToken::empty());
    }
}
