use crate::scope::ScopeId;

use http::Method;
use std::fmt;

/// Represents errors detected at registration time, when a pattern spec
/// string has an invalid shape.
///
/// A valid spec is either `"/path"` or `"METHOD /path"`: an optional method
/// token, a single space, and a path beginning with `/`.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PatternError {
    /// The path part of the spec does not begin with a `/`.
    MissingLeadingSlash {
        /// The offending spec string, as passed to registration.
        spec: String,
    },
    /// The part before the space is not a valid HTTP method token, or the
    /// spec contains more than one space-separated part after the method.
    InvalidMethod {
        /// The offending spec string, as passed to registration.
        spec: String,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLeadingSlash { spec } => {
                write!(f, "path in pattern spec {:?} must begin with '/'", spec)
            }
            Self::InvalidMethod { spec } => {
                write!(
                    f,
                    "pattern spec {:?} is not of the form \"/path\" or \"METHOD /path\"",
                    spec
                )
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// Represents errors that can occur when flattening a scope tree into a
/// route table.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// Two scopes resolved to the same `(method, full path)` key.
    ///
    /// Route shadowing caused by overlapping prefixes is a configuration
    /// mistake that would otherwise only surface at request time, so the
    /// build fails instead of letting the second registration win.
    DuplicateRoute {
        /// Method of the colliding registrations; `None` is method-agnostic.
        method: Option<Method>,
        /// The full, normalized path both registrations resolved to.
        path: String,
        /// The scope that registered the key first, in traversal order.
        first: ScopeId,
        /// The scope whose registration collided.
        second: ScopeId,
    },
    /// The tree was already flattened by an earlier successful build.
    ///
    /// Registration against an external dispatcher sink is not safely
    /// repeatable, so a second build is rejected instead of re-traversing.
    AlreadyBuilt,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateRoute {
                method,
                path,
                first,
                second,
            } => {
                match method {
                    Some(m) => write!(f, "duplicate route {} {}", m, path)?,
                    None => write!(f, "duplicate route {}", path)?,
                }
                write!(f, ": registered by scope {} and scope {}", first, second)
            }
            Self::AlreadyBuilt => {
                write!(f, "scope tree was already built; build a fresh tree instead")
            }
        }
    }
}

impl std::error::Error for BuildError {}
