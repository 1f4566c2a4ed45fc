//! Error types for route configuration and navigation.
//!
//! `NoMatch` is deliberately absent here: an unmatched path is an ordinary
//! [`MatchResult`](crate::MatchResult), never an error.

use thiserror::Error;

/// A malformed route table. Fatal at bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("route pattern is empty")]
    EmptyPattern,

    #[error("route pattern `{0}` must start with `/`")]
    MissingLeadingSlash(String),

    #[error("route pattern `{0}` contains a parameter without a name")]
    EmptyParamName(String),

    #[error("route pattern `{pattern}` declares parameter `:{name}` more than once")]
    DuplicateParam { pattern: String, name: String },

    #[error("route name `{0}` is used by more than one route")]
    DuplicateRouteName(String),

    #[error("route `{pattern}` refers to unknown view `{view}`")]
    UnknownView { pattern: String, view: String },
}

/// Errors surfaced by the router, the history adapters and the mount.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("invalid route configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// The host has no usable session history (e.g. a non-browser embedding).
    #[error("environment unsupported: {0}")]
    EnvironmentUnsupported(String),

    #[error("router has not been started")]
    NotStarted,

    #[error("router has already been started")]
    AlreadyStarted,

    #[error("a route subscriber is already bound")]
    SubscriberAlreadyBound,

    #[error("navigation target is empty")]
    EmptyPath,

    /// The history API exists but refused the update (e.g. a cross-origin URL).
    #[error("history update rejected: {0}")]
    HistoryRejected(String),

    #[error("application is already mounted")]
    AlreadyMounted,

    #[error("mount target `#{0}` not found")]
    MountTargetMissing(String),
}

pub type Result<T> = std::result::Result<T, NavError>;
