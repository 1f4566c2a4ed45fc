//! # RHTMX Nav
//!
//! Client-side navigation for single-page RHTMX apps:
//! - Flat, ordered route tables (`/`, `/workflow/:workflowId`)
//! - Pure path matching with named parameter extraction
//! - Session history synchronisation behind the [`HistoryAdapter`] trait
//! - A single-subscriber [`Router`] holding the current route
//! - One-shot [`AppMount`] bootstrap
//!
//! Nested routes, guards and lazy loading are not supported: every pattern
//! resolves to one view mounted at one attachment point.
//!
//! ## Path Normalization
//!
//! - Trailing slashes: `/path/` → `/path`
//! - Only `/` separates segments; `/path//to` keeps its empty middle segment
//! - Query strings and fragments are ignored for matching
//!
//! ## Example
//!
//! ```
//! use rhtmx_nav::{MatchResult, MemoryHistory, RouteTable, Router};
//!
//! let table = RouteTable::new([
//!     ("/", "root"),
//!     ("/workflow/:workflowId", "root"),
//! ])
//! .unwrap();
//!
//! let router = Router::new(table, MemoryHistory::new("/"));
//! router.start().unwrap();
//!
//! router.navigate("/workflow/42").unwrap();
//! assert_eq!(router.current_params().get("workflowId"), Some("42"));
//!
//! router.back().unwrap();
//! assert!(router.current_params().is_empty());
//!
//! router.navigate("/unknown").unwrap();
//! assert_eq!(router.current().unwrap().outcome, MatchResult::NoMatch);
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod error;
pub mod history;
pub mod matcher;
pub mod mount;
pub mod path;
pub mod route;
pub mod router;

// Re-export public types
pub use config::{NavConfig, RouteConfig};
pub use error::{ConfigError, NavError};
pub use history::{ChangeCallback, HistoryAdapter, MemoryHistory};
pub use matcher::{match_path, MatchResult, Params};
pub use mount::{AppMount, RenderFn, Renderer};
pub use path::{normalize_path, route_path};
pub use route::{RouteDef, RouteEntry, RoutePattern, RouteTable, Segment};
pub use router::{CurrentRoute, RouteSubscriber, Router, RouterState};
