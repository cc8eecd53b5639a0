//! The flattened route table.
//!
//! A [`RouteTable`] is the immutable output of a build: one entry per
//! registration, in traversal order, with every handler already wrapped by
//! its scope's middleware chain. Nothing mutates a table after the build,
//! so it may be shared and read freely.

use crate::scope::ScopeId;

use http::Method;
use std::fmt;
use std::slice;

/// One finalized route.
#[derive(Clone, Debug)]
pub struct RouteEntry<H> {
    /// Method of the registration; `None` is method-agnostic.
    pub method: Option<Method>,
    /// Full, normalized path (effective prefix joined with the local path).
    pub path: String,
    /// The registered handler, wrapped by the scope's middleware chain.
    pub handler: H,
    /// The scope the registration was made on.
    pub scope: ScopeId,
}

impl<H> RouteEntry<H> {
    /// The entry's pattern string: `"METHOD /path"`, or `"/path"` for a
    /// method-agnostic entry.
    pub fn pattern(&self) -> String {
        match &self.method {
            Some(method) => format!("{} {}", method, self.path),
            None => self.path.clone(),
        }
    }
}

/// The collision-checked table produced by [`Scope::build`].
///
/// [`Scope::build`]: crate::Scope::build
pub struct RouteTable<H> {
    entries: Vec<RouteEntry<H>>,
}

impl<H> RouteTable<H> {
    pub(crate) fn new(entries: Vec<RouteEntry<H>>) -> Self {
        RouteTable { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in traversal order.
    pub fn iter(&self) -> slice::Iter<'_, RouteEntry<H>> {
        self.entries.iter()
    }

    /// The pattern strings actually registered, in traversal order.
    ///
    /// Handy for logging the final routing surface at startup.
    pub fn patterns(&self) -> Vec<String> {
        self.entries.iter().map(RouteEntry::pattern).collect()
    }

    /// Looks up the wrapped handler registered for a `(method, path)` key.
    ///
    /// This is an exact key lookup on the finalized table, not request
    /// dispatch; pattern matching belongs to the collaborator dispatcher.
    pub fn get(&self, method: Option<&Method>, path: &str) -> Option<&H> {
        self.entries
            .iter()
            .find(|e| e.method.as_ref() == method && e.path == path)
            .map(|e| &e.handler)
    }

    /// Drains the table into a registration sink, once per entry.
    pub fn register_into<R: Registry<H>>(self, registry: &mut R) {
        for entry in self.entries {
            registry.register(entry.method, entry.path, entry.handler);
        }
    }
}

impl<H> IntoIterator for RouteTable<H> {
    type Item = RouteEntry<H>;
    type IntoIter = std::vec::IntoIter<RouteEntry<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, H> IntoIterator for &'a RouteTable<H> {
    type Item = &'a RouteEntry<H>;
    type IntoIter = slice::Iter<'a, RouteEntry<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<H> fmt::Debug for RouteTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(RouteEntry::pattern))
            .finish()
    }
}

/// A registration sink provided by the collaborator dispatcher.
///
/// [`RouteTable::register_into`] calls [`Registry::register`] exactly once
/// per table entry; the sink is free to panic or error on its own terms if
/// it sees a pattern twice, but a collision-free build never produces one.
pub trait Registry<H> {
    fn register(&mut self, method: Option<Method>, path: String, handler: H);
}

impl<H, F> Registry<H> for F
where
    F: FnMut(Option<Method>, String, H),
{
    fn register(&mut self, method: Option<Method>, path: String, handler: H) {
        self(method, path, handler)
    }
}
