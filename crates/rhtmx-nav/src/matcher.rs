//! Path matching against a [`RouteTable`].
//!
//! Matching never fails: every input resolves to [`MatchResult::Matched`] or
//! [`MatchResult::NoMatch`].

use crate::path::{route_path, split_segments};
use crate::route::RouteTable;
use serde::Serialize;
use std::collections::HashMap;

/// Parameter values captured from a matched path, keyed by parameter name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(HashMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

impl From<HashMap<String, String>> for Params {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Outcome of resolving one path
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult<V> {
    Matched {
        view: V,
        /// Normalized text of the pattern that matched
        pattern: String,
        params: Params,
    },
    NoMatch,
}

impl<V> MatchResult<V> {
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }

    pub fn view(&self) -> Option<&V> {
        match self {
            MatchResult::Matched { view, .. } => Some(view),
            MatchResult::NoMatch => None,
        }
    }

    pub fn pattern(&self) -> Option<&str> {
        match self {
            MatchResult::Matched { pattern, .. } => Some(pattern),
            MatchResult::NoMatch => None,
        }
    }

    pub fn params(&self) -> Option<&Params> {
        match self {
            MatchResult::Matched { params, .. } => Some(params),
            MatchResult::NoMatch => None,
        }
    }
}

/// Matches a path against all routes and returns the first match
///
/// Routes are checked in table order; there is no implicit specificity
/// ranking, so literal patterns must precede overlapping parameterized ones.
/// Query strings, fragments and trailing `/` are ignored. Only `/` splits
/// segments, so `/workflow//42` has an empty middle segment and cannot bind a
/// parameter. A path that is empty once the query is cut never matches.
///
/// # Examples
///
/// ```
/// use rhtmx_nav::{match_path, MatchResult, RouteTable};
///
/// let table = RouteTable::new([("/", "home"), ("/workflow/:workflowId", "home")]).unwrap();
///
/// let result = match_path("/workflow/42", &table);
/// assert_eq!(result.params().and_then(|p| p.get("workflowId")), Some("42"));
///
/// assert_eq!(match_path("/unknown", &table), MatchResult::NoMatch);
/// ```
pub fn match_path<V: Clone>(path: &str, table: &RouteTable<V>) -> MatchResult<V> {
    let Some(path) = route_path(path) else {
        return MatchResult::NoMatch;
    };
    let segments = split_segments(&path);

    table
        .iter()
        .find_map(|entry| {
            entry
                .pattern()
                .match_segments(&segments)
                .map(|params| MatchResult::Matched {
                    view: entry.view().clone(),
                    pattern: entry.pattern().as_str().to_string(),
                    params,
                })
        })
        .unwrap_or(MatchResult::NoMatch)
}
