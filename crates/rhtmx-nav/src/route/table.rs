//! Ordered, immutable route table.
//!
//! Built once at startup. Iteration order is insertion order and the first
//! matching entry wins, so the caller orders overlapping patterns from most
//! to least specific.

use super::pattern::RoutePattern;
use crate::error::ConfigError;
use std::collections::HashSet;

/// One route as declared by the caller, before validation
#[derive(Debug, Clone)]
pub struct RouteDef<V> {
    pub path: String,
    pub view: V,
    pub name: Option<String>,
}

impl<V> RouteDef<V> {
    pub fn new(path: impl Into<String>, view: V) -> Self {
        Self {
            path: path.into(),
            view,
            name: None,
        }
    }

    /// Names the route so URLs can be generated for it
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<S: Into<String>, V> From<(S, V)> for RouteDef<V> {
    fn from((path, view): (S, V)) -> Self {
        Self::new(path, view)
    }
}

/// A validated table entry
#[derive(Debug, Clone)]
pub struct RouteEntry<V> {
    pattern: RoutePattern,
    view: V,
    name: Option<String>,
}

impl<V> RouteEntry<V> {
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable<V> {
    entries: Vec<RouteEntry<V>>,
}

impl<V> RouteTable<V> {
    /// Builds a table from ordered `(pattern, view)` pairs
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_nav::RouteTable;
    ///
    /// let table = RouteTable::new([("/", "root"), ("/workflow/:workflowId", "root")]).unwrap();
    /// assert_eq!(table.len(), 2);
    ///
    /// assert!(RouteTable::new([("", "root")]).is_err());
    /// ```
    pub fn new<I, S>(routes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
    {
        Self::from_defs(routes.into_iter().map(RouteDef::from))
    }

    /// Builds a table from route definitions, which may carry names
    pub fn from_defs<I>(defs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = RouteDef<V>>,
    {
        let mut names = HashSet::new();
        let entries = defs
            .into_iter()
            .map(|def| {
                let pattern = RoutePattern::parse(&def.path)?;
                if let Some(name) = &def.name {
                    if !names.insert(name.clone()) {
                        return Err(ConfigError::DuplicateRouteName(name.clone()));
                    }
                }
                Ok(RouteEntry {
                    pattern,
                    view: def.view,
                    name: def.name,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteEntry<V>> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&RouteEntry<V>> {
        self.entries.get(index)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&RouteEntry<V>> {
        self.entries.iter().find(|entry| entry.name() == Some(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, V> IntoIterator for &'a RouteTable<V> {
    type Item = &'a RouteEntry<V>;
    type IntoIter = std::slice::Iter<'a, RouteEntry<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let table = RouteTable::new([("/b", 2), ("/a", 1), ("/", 0)]).unwrap();
        let patterns: Vec<&str> = table.iter().map(|e| e.pattern().as_str()).collect();
        assert_eq!(patterns, vec!["/b", "/a", "/"]);
        let views: Vec<i32> = table.iter().map(|e| *e.view()).collect();
        assert_eq!(views, vec![2, 1, 0]);
    }

    #[test]
    fn test_rejects_empty_pattern() {
        let err = RouteTable::new([("/", 0), ("", 1)]).unwrap_err();
        assert_eq!(err, ConfigError::EmptyPattern);
    }

    #[test]
    fn test_rejects_duplicate_param_names() {
        let err = RouteTable::new([("/:id/edit/:id", 0)]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateParam { name, .. } if name == "id"));
    }

    #[test]
    fn test_same_param_name_across_patterns_is_fine() {
        let table = RouteTable::new([("/a/:id", 0), ("/b/:id", 1)]).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_named_routes() {
        let table = RouteTable::from_defs([
            RouteDef::new("/", "root").named("home"),
            RouteDef::new("/workflow/:workflowId", "root").named("workflow"),
        ])
        .unwrap();

        let entry = table.find_by_name("workflow").unwrap();
        assert_eq!(entry.pattern().as_str(), "/workflow/:workflowId");
        assert!(table.find_by_name("missing").is_none());
    }

    #[test]
    fn test_rejects_duplicate_route_names() {
        let err = RouteTable::from_defs([
            RouteDef::new("/", 0).named("home"),
            RouteDef::new("/start", 1).named("home"),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateRouteName("home".to_string()));
    }
}
