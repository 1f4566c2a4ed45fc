//! Pattern parsing for route segments
//!
//! Pure functional parsing of `/`-separated route patterns into typed segments.
//! A segment beginning with `:` is a named parameter; everything else is literal.

use crate::error::ConfigError;
use crate::matcher::Params;
use crate::path::{decode_segment, normalize_path, split_segments};
use std::collections::{HashMap, HashSet};

/// One `/`-delimited token of a route pattern
///
/// # Examples
///
/// ```
/// use rhtmx_nav::route::pattern::{classify_segment, Segment};
///
/// assert_eq!(classify_segment("workflow"), Segment::Literal("workflow".into()));
/// assert_eq!(classify_segment(":workflowId"), Segment::Param("workflowId".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matched by exact, case-sensitive equality
    Literal(String),
    /// Matches any non-empty segment and binds it under this name
    Param(String),
}

/// Classifies a segment into a pattern type (pure function)
pub fn classify_segment(segment: &str) -> Segment {
    match segment.strip_prefix(':') {
        Some(name) => Segment::Param(name.to_string()),
        None => Segment::Literal(segment.to_string()),
    }
}

/// A parsed, validated route pattern such as `/workflow/:workflowId`
///
/// Immutable once parsed. Parameter names are unique within a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parses a pattern string
    ///
    /// A trailing `/` is normalized away, so `/workflow/` and `/workflow` are
    /// the same pattern. The root pattern `/` is one empty literal segment.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyPattern`] for `""`
    /// - [`ConfigError::MissingLeadingSlash`] for `workflow/:id`
    /// - [`ConfigError::EmptyParamName`] for `/workflow/:`
    /// - [`ConfigError::DuplicateParam`] for `/:id/:id`
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_nav::route::pattern::RoutePattern;
    ///
    /// let pattern = RoutePattern::parse("/workflow/:workflowId").unwrap();
    /// assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["workflowId"]);
    ///
    /// assert!(RoutePattern::parse("/:id/:id").is_err());
    /// ```
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        if pattern.is_empty() {
            return Err(ConfigError::EmptyPattern);
        }
        if !pattern.starts_with('/') {
            return Err(ConfigError::MissingLeadingSlash(pattern.to_string()));
        }

        let source = normalize_path(pattern).into_owned();
        let segments: Vec<Segment> = split_segments(&source)
            .into_iter()
            .map(classify_segment)
            .collect();

        let mut seen = HashSet::new();
        for segment in &segments {
            if let Segment::Param(name) = segment {
                if name.is_empty() {
                    return Err(ConfigError::EmptyParamName(pattern.to_string()));
                }
                if !seen.insert(name.as_str()) {
                    return Err(ConfigError::DuplicateParam {
                        pattern: pattern.to_string(),
                        name: name.clone(),
                    });
                }
            }
        }

        Ok(Self { source, segments })
    }

    /// The normalized pattern text
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in declaration order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// True when the pattern has no parameters
    pub fn is_static(&self) -> bool {
        self.param_names().next().is_none()
    }

    /// Matches already-split path segments against this pattern
    ///
    /// Segment counts must be equal (no wildcards). Literals compare exactly,
    /// case and encoding included; parameters bind the percent-decoded value
    /// and reject empty segments.
    pub fn match_segments(&self, path_segments: &[&str]) -> Option<Params> {
        if self.segments.len() != path_segments.len() {
            return None;
        }

        self.segments
            .iter()
            .zip(path_segments)
            .try_fold(HashMap::new(), |mut params, (segment, raw)| {
                match segment {
                    Segment::Literal(literal) => (literal == raw).then_some(params),
                    Segment::Param(_) if raw.is_empty() => None,
                    Segment::Param(name) => {
                        params.insert(name.clone(), decode_segment(raw).into_owned());
                        Some(params)
                    }
                }
            })
            .map(Params::from)
    }

    /// Builds a concrete path by filling in parameter values
    ///
    /// Values are percent-encoded. Returns `None` if any parameter is missing
    /// or empty.
    ///
    /// ```
    /// use rhtmx_nav::route::pattern::RoutePattern;
    /// use rhtmx_nav::Params;
    ///
    /// let pattern = RoutePattern::parse("/workflow/:workflowId").unwrap();
    /// let params = Params::from_iter([("workflowId", "build and test")]);
    /// assert_eq!(pattern.href(&params).as_deref(), Some("/workflow/build%20and%20test"));
    /// assert_eq!(pattern.href(&Params::default()), None);
    /// ```
    pub fn href(&self, params: &Params) -> Option<String> {
        if self.segments == [Segment::Literal(String::new())] {
            return Some("/".to_string());
        }

        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(literal) => Some(literal.clone()),
                Segment::Param(name) => params
                    .get(name)
                    .filter(|value| !value.is_empty())
                    .map(|value| urlencoding::encode(value).into_owned()),
            })
            .try_fold(String::new(), |mut url, segment| {
                url.push('/');
                url.push_str(&segment?);
                Some(url)
            })
    }
}

impl std::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_literal() {
        assert_eq!(classify_segment("about"), Segment::Literal("about".to_string()));
    }

    #[test]
    fn test_classify_param() {
        assert_eq!(classify_segment(":id"), Segment::Param("id".to_string()));
    }

    #[test]
    fn test_parse_root() {
        let pattern = RoutePattern::parse("/").unwrap();
        assert_eq!(pattern.segments(), &[Segment::Literal(String::new())]);
        assert!(pattern.is_static());
    }

    #[test]
    fn test_parse_trailing_slash_normalized() {
        let pattern = RoutePattern::parse("/workflow/:workflowId/").unwrap();
        assert_eq!(pattern.as_str(), "/workflow/:workflowId");
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("workflow".to_string()),
                Segment::Param("workflowId".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(RoutePattern::parse(""), Err(ConfigError::EmptyPattern));
        assert_eq!(
            RoutePattern::parse("workflow"),
            Err(ConfigError::MissingLeadingSlash("workflow".to_string()))
        );
        assert_eq!(
            RoutePattern::parse("/workflow/:"),
            Err(ConfigError::EmptyParamName("/workflow/:".to_string()))
        );
        assert_eq!(
            RoutePattern::parse("/:a/x/:a"),
            Err(ConfigError::DuplicateParam {
                pattern: "/:a/x/:a".to_string(),
                name: "a".to_string(),
            })
        );
    }

    #[test]
    fn test_match_segments_binds_params() {
        let pattern = RoutePattern::parse("/workflow/:workflowId").unwrap();
        let params = pattern.match_segments(&["workflow", "42"]).unwrap();
        assert_eq!(params.get("workflowId"), Some("42"));
    }

    #[test]
    fn test_match_segments_rejects_empty_param() {
        let pattern = RoutePattern::parse("/:id").unwrap();
        assert!(pattern.match_segments(&[""]).is_none());
    }

    #[test]
    fn test_match_segments_is_case_sensitive() {
        let pattern = RoutePattern::parse("/workflow").unwrap();
        assert!(pattern.match_segments(&["Workflow"]).is_none());
    }

    #[test]
    fn test_match_segments_literals_are_not_decoded() {
        let pattern = RoutePattern::parse("/workflow/:workflowId").unwrap();
        assert!(pattern.match_segments(&["work%66low", "42"]).is_none());
        assert!(pattern.match_segments(&["workflow", "42"]).is_some());
    }

    #[test]
    fn test_match_segments_decodes_params() {
        let pattern = RoutePattern::parse("/workflow/:workflowId").unwrap();
        let params = pattern.match_segments(&["workflow", "nightly%20build"]).unwrap();
        assert_eq!(params.get("workflowId"), Some("nightly build"));
    }

    #[test]
    fn test_href_root_and_static() {
        assert_eq!(
            RoutePattern::parse("/").unwrap().href(&Params::default()).as_deref(),
            Some("/")
        );
        assert_eq!(
            RoutePattern::parse("/about/team").unwrap().href(&Params::default()).as_deref(),
            Some("/about/team")
        );
    }
}
