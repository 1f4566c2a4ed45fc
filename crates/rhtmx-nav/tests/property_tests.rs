//! Property tests for path matching and navigation.

use proptest::prelude::*;
use rhtmx_nav::*;

fn workflow_table() -> RouteTable<&'static str> {
    RouteTable::new([("/", "root"), ("/about", "about"), ("/workflow/:workflowId", "root")])
        .unwrap()
}

/// Non-empty, separator-free segment text that survives the URL unchanged
fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9._~-]{1,16}"
}

/// Any non-empty text without `/`, query or fragment markers; `%` is left out
/// so the text has no escapes for the matcher to decode
fn raw_segment() -> impl Strategy<Value = String> {
    "[^/?#%]{1,16}"
}

proptest! {
    #[test]
    fn literal_paths_match_with_empty_params(literal in "[a-z]{1,12}") {
        let path = format!("/{}", literal);
        let table = RouteTable::new([(path.as_str(), "page")]).unwrap();

        let result = match_path(&path, &table);
        prop_assert!(result.is_matched());
        prop_assert!(result.params().unwrap().is_empty());
    }

    #[test]
    fn workflow_id_is_captured(id in raw_segment()) {
        let result = match_path(&format!("/workflow/{}", id), &workflow_table());
        prop_assert_eq!(result.pattern(), Some("/workflow/:workflowId"));
        prop_assert_eq!(result.params().and_then(|p| p.get("workflowId")), Some(id.as_str()));
    }

    #[test]
    fn encoded_ids_round_trip(id in "[^/?#]{1,16}") {
        let path = format!("/workflow/{}", urlencoding::encode(&id));
        let result = match_path(&path, &workflow_table());
        prop_assert_eq!(result.params().and_then(|p| p.get("workflowId")), Some(id.as_str()));
    }

    #[test]
    fn empty_interior_segment_never_binds(id in raw_segment()) {
        let path = format!("/workflow//{}", id);
        prop_assert_eq!(match_path(&path, &workflow_table()), MatchResult::NoMatch);
    }

    #[test]
    fn other_segment_counts_never_match(segments in prop::collection::vec(segment(), 3..6)) {
        let path = format!("/{}", segments.join("/"));
        prop_assert_eq!(match_path(&path, &workflow_table()), MatchResult::NoMatch);
    }

    #[test]
    fn navigate_is_idempotent(id in segment()) {
        let router = Router::new(workflow_table(), MemoryHistory::default());
        router.start().unwrap();

        let path = format!("/workflow/{}", id);
        router.navigate(&path).unwrap();
        prop_assert_eq!(router.history().current_path(), path.clone());
        let first = router.current();

        router.navigate(&path).unwrap();
        prop_assert_eq!(router.current(), first);
        prop_assert_eq!(router.history().entries().len(), 2);
    }
}
