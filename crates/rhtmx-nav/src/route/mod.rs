//! Route module: pattern parsing and the route table
//!
//! Pure components; nothing here touches history or rendering.

pub mod pattern;
pub mod table;

pub use pattern::{classify_segment, RoutePattern, Segment};
pub use table::{RouteDef, RouteEntry, RouteTable};
