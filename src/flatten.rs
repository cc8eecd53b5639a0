//! The one-shot flattening pass.
//!
//! Walks a fully-built scope tree breadth-first and emits one table entry
//! per registration. Traversal order does not change which entries exist,
//! but it fixes which scope is reported first in a duplicate-route error,
//! so it is pinned: breadth-first from the root, children in creation order.

use crate::error::BuildError;
use crate::middleware::Middleware;
use crate::scope::{RouteKey, ScopeId, Tree};
use crate::table::{RouteEntry, RouteTable};

use log::debug;
use std::collections::{HashMap, VecDeque};

pub(crate) fn flatten<H: Clone>(tree: &Tree<H>) -> Result<RouteTable<H>, BuildError> {
    let mut entries = Vec::new();
    let mut seen: HashMap<RouteKey, ScopeId> = HashMap::new();

    // Nodes are created strictly as children of existing nodes, so the
    // child lists form a tree by construction and need no visited set.
    let mut queue = VecDeque::from([ScopeId::ROOT]);
    while let Some(id) = queue.pop_front() {
        let node = &tree.nodes[id.0];
        let prefix = tree.effective_prefix(id);

        for (key, handler) in &node.routes {
            let full_path = crate::path::join(&prefix, &key.path);
            let full_key = RouteKey {
                method: key.method.clone(),
                path: full_path.clone(),
            };
            if let Some(&first) = seen.get(&full_key) {
                return Err(BuildError::DuplicateRoute {
                    method: full_key.method,
                    path: full_key.path,
                    first,
                    second: id,
                });
            }
            seen.insert(full_key, id);

            debug!("scope {}: route {:?}", id, full_path);
            entries.push(RouteEntry {
                method: key.method.clone(),
                path: full_path,
                handler: Middleware::compose(&node.middleware, handler.clone()),
                scope: id,
            });
        }

        queue.extend(node.children.iter().copied());
    }

    Ok(RouteTable::new(entries))
}
