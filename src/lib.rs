//! A hierarchical scope tree builder for HTTP routing tables.
//!
//! `scopemux` assembles a tree of routing scopes, each contributing a path
//! prefix fragment and an ordered middleware chain, and flattens it into a
//! single method-and-path-keyed table for an external dispatcher. The crate
//! never dispatches requests itself: handlers and middleware are opaque
//! capabilities that are only ever composed, and the finished table is
//! handed to whatever actually serves traffic.
//!
//! Prefixes accumulate down the tree; middleware is inherited as a snapshot
//! when a subrouter is created, so later additions to an ancestor never
//! retroactively reach existing children. Two scopes resolving to the same
//! `(method, path)` key fail the build instead of silently shadowing each
//! other.
//!
//! ```
//! use scopemux::Scope;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut api: Scope<&'static str> = Scope::new();
//! api.prefix("api");
//! api.handle("GET /health", "health")?;
//!
//! let mut users = api.subrouter();
//! users.prefix("users");
//! users.handle("GET /{id}", "user_by_id")?;
//!
//! let table = api.build()?;
//! assert_eq!(table.patterns(), ["GET /api/health", "GET /api/users/{id}"]);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod error;
mod flatten;
mod middleware;
pub mod path;
mod pattern;
mod scope;
mod table;

pub use error::{BuildError, PatternError};
pub use middleware::Middleware;
pub use scope::{Scope, ScopeId};
pub use table::{Registry, RouteEntry, RouteTable};
