//! The scope tree and its configuration API.
//!
//! A tree of scopes is built once, single-threaded, and then flattened into
//! a [`RouteTable`] by [`Scope::build`]. Nodes live in an arena addressed by
//! stable [`ScopeId`] indices, so parent and root back-references are plain
//! ids instead of object cycles.

use crate::error::{BuildError, PatternError};
use crate::flatten;
use crate::middleware::Middleware;
use crate::path;
use crate::pattern;
use crate::table::RouteTable;

use http::Method;
use log::{debug, warn};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Stable identity of one scope within its tree.
///
/// Ids are arena indices: the root is always [`ScopeId::ROOT`] and children
/// get increasing ids in creation order. Ids are only meaningful within the
/// tree that created them.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ScopeId(pub(crate) usize);

impl ScopeId {
    /// The id of every tree's root scope.
    pub const ROOT: ScopeId = ScopeId(0);

    /// The arena index behind this id.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registration key: method (`None` is method-agnostic) plus path.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct RouteKey {
    pub(crate) method: Option<Method>,
    pub(crate) path: String,
}

pub(crate) struct Node<H> {
    /// Normalized local prefix fragment; empty if never set.
    pub(crate) prefix: String,
    /// Effective chain so far: parent snapshot plus local appends.
    pub(crate) middleware: Vec<Middleware<H>>,
    /// Local registrations in insertion order.
    pub(crate) routes: Vec<(RouteKey, H)>,
    /// The root's parent is itself; ancestor walks need no null checks.
    pub(crate) parent: ScopeId,
    pub(crate) children: Vec<ScopeId>,
}

pub(crate) struct Tree<H> {
    pub(crate) nodes: Vec<Node<H>>,
    pub(crate) built: bool,
}

impl<H> Tree<H> {
    fn new() -> Self {
        Tree {
            nodes: vec![Node {
                prefix: String::new(),
                middleware: Vec::new(),
                routes: Vec::new(),
                parent: ScopeId::ROOT,
                children: Vec::new(),
            }],
            built: false,
        }
    }

    /// Joins prefix fragments along the ancestor chain, root fragment first.
    ///
    /// Order-independent: the result depends only on the fragments of the
    /// ancestors, not on sibling scopes or on when registrations happened.
    pub(crate) fn effective_prefix(&self, id: ScopeId) -> String {
        let mut chain = Vec::new();
        let mut current = id;
        loop {
            chain.push(current);
            let parent = self.nodes[current.0].parent;
            if parent == current {
                break;
            }
            current = parent;
        }
        chain
            .iter()
            .rev()
            .fold(String::new(), |acc, id| path::join(&acc, &self.nodes[id.0].prefix))
    }
}

/// A handle to one scope in a routing tree.
///
/// [`Scope::new`] creates a tree with a single root scope; [`Scope::subrouter`]
/// derives child scopes. Handles are cheap to clone and all point into the
/// same tree. Configuration is single-threaded by contract: build the tree
/// once at startup, then call [`Scope::build`].
///
/// ```
/// use scopemux::{Middleware, Scope};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut router: Scope<String> = Scope::new();
/// router.prefix("v1");
/// router.use_middleware(Middleware::new(|h: String| format!("auth({h})")));
/// router.handle("GET /ping", "ping".to_owned())?;
///
/// let mut admin = router.subrouter();
/// admin.prefix("admin");
/// admin.use_fn(|h: String| format!("admin_only({h})"));
/// admin.handle("GET /secret", "secret".to_owned())?;
///
/// let table = router.build()?;
/// assert_eq!(table.patterns(), ["GET /v1/ping", "GET /v1/admin/secret"]);
/// assert_eq!(
///     table.get(Some(&http::Method::GET), "/v1/admin/secret"),
///     Some(&"auth(admin_only(secret))".to_owned()),
/// );
/// # Ok(())
/// # }
/// ```
pub struct Scope<H> {
    tree: Rc<RefCell<Tree<H>>>,
    id: ScopeId,
}

impl<H> Scope<H> {
    /// Creates a new tree and returns a handle to its root scope.
    pub fn new() -> Self {
        Scope {
            tree: Rc::new(RefCell::new(Tree::new())),
            id: ScopeId::ROOT,
        }
    }

    /// This scope's identity within its tree.
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// Whether this handle points at the tree's root scope.
    pub fn is_root(&self) -> bool {
        self.id == ScopeId::ROOT
    }

    /// Appends a middleware to this scope's chain.
    ///
    /// Call order is preserved in the final chain. Subrouters created
    /// *before* this call do not see the new middleware; subrouters created
    /// afterwards inherit it. After a successful [`Scope::build`] the call
    /// is ignored.
    pub fn use_middleware(&mut self, mw: Middleware<H>) {
        let mut tree = self.tree.borrow_mut();
        if tree.built {
            warn!("scope {}: tree already built, middleware ignored", self.id);
            return;
        }
        tree.nodes[self.id.0].middleware.push(mw);
    }

    /// Shorthand for [`Scope::use_middleware`] with a plain wrapper closure.
    pub fn use_fn(&mut self, wrap: impl Fn(H) -> H + 'static) {
        self.use_middleware(Middleware::new(wrap));
    }

    /// Sets this scope's prefix fragment.
    ///
    /// A leading `/` is inserted when absent. A scope has exactly one
    /// fragment: calling this again overwrites the previous value. After a
    /// successful [`Scope::build`] the call is ignored.
    pub fn prefix(&mut self, p: &str) {
        let mut tree = self.tree.borrow_mut();
        if tree.built {
            warn!("scope {}: tree already built, prefix {:?} ignored", self.id, p);
            return;
        }
        tree.nodes[self.id.0].prefix = path::normalize_prefix(p);
    }

    /// Registers a handler under this scope.
    ///
    /// The spec is either `"/path"` or `"METHOD /path"`; the path is
    /// relative to this scope's effective prefix. Registering the same
    /// `(method, path)` key twice on the same scope overwrites the handler
    /// (last call wins); collisions *across* scopes are detected at build
    /// time instead. Fails immediately with [`PatternError`] on a malformed
    /// spec. After a successful [`Scope::build`] a well-formed registration
    /// is ignored.
    pub fn handle(&mut self, spec: &str, handler: H) -> Result<(), PatternError> {
        let (method, path) = pattern::parse(spec)?;
        let key = RouteKey {
            method,
            path: path.to_owned(),
        };

        let mut tree = self.tree.borrow_mut();
        if tree.built {
            warn!("scope {}: tree already built, pattern {:?} ignored", self.id, spec);
            return Ok(());
        }
        debug!("scope {}: register {:?}", self.id, spec);

        let routes = &mut tree.nodes[self.id.0].routes;
        match routes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = handler,
            None => routes.push((key, handler)),
        }
        Ok(())
    }

    /// Registers many `(spec, handler)` pairs at once.
    ///
    /// Stops at the first malformed spec; pairs before it stay registered.
    pub fn handle_all<S, I>(&mut self, registrations: I) -> Result<(), PatternError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, H)>,
    {
        for (spec, handler) in registrations {
            self.handle(spec.as_ref(), handler)?;
        }
        Ok(())
    }

    /// Derives a child scope and returns a handle to it.
    ///
    /// The child's middleware chain is a snapshot of this scope's current
    /// effective chain; middleware added to this scope afterwards is not
    /// retroactively visible to the child. The child starts with no prefix
    /// fragment and no registrations.
    pub fn subrouter(&mut self) -> Scope<H> {
        let mut tree = self.tree.borrow_mut();
        if tree.built {
            warn!("scope {}: tree already built, subrouter has no effect on it", self.id);
        }
        let id = ScopeId(tree.nodes.len());
        let inherited = tree.nodes[self.id.0].middleware.clone();
        tree.nodes.push(Node {
            prefix: String::new(),
            middleware: inherited,
            routes: Vec::new(),
            parent: self.id,
            children: Vec::new(),
        });
        tree.nodes[self.id.0].children.push(id);
        Scope {
            tree: Rc::clone(&self.tree),
            id,
        }
    }

    /// The separator-normalized join of prefix fragments from the root down
    /// to this scope.
    pub fn effective_prefix(&self) -> String {
        self.tree.borrow().effective_prefix(self.id)
    }

    /// Flattens the tree into a [`RouteTable`].
    ///
    /// The whole tree is traversed breadth-first from the root, children in
    /// creation order, regardless of which handle the call is made through.
    /// Each registration's full path is its scope's effective prefix joined
    /// with the local path, and its handler is wrapped by the scope's
    /// effective middleware chain.
    ///
    /// Fails with [`BuildError::DuplicateRoute`] when two scopes resolve to
    /// the same `(method, full path)` key, and with
    /// [`BuildError::AlreadyBuilt`] on a second call after a successful
    /// build. A failed build leaves the tree untouched and registers
    /// nothing, so the configuration can be fixed and built again. After a
    /// successful build the tree is frozen: the returned table is an owned
    /// snapshot that later configuration calls can never affect.
    pub fn build(&mut self) -> Result<RouteTable<H>, BuildError>
    where
        H: Clone,
    {
        let mut tree = self.tree.borrow_mut();
        if tree.built {
            return Err(BuildError::AlreadyBuilt);
        }
        let table = flatten::flatten(&tree)?;
        tree.built = true;
        Ok(table)
    }
}

impl<H> Clone for Scope<H> {
    fn clone(&self) -> Self {
        Scope {
            tree: Rc::clone(&self.tree),
            id: self.id,
        }
    }
}

impl<H> Default for Scope<H> {
    fn default() -> Self {
        Scope::new()
    }
}

impl<H> fmt::Debug for Scope<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scope({})", self.id)
    }
}
