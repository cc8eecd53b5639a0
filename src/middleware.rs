//! Middleware capability and chain composition.
//!
//! The handler type `H` is opaque to this crate: it is only ever passed
//! through middleware, never inspected or invoked. A middleware is a
//! transform from one handler to another.

use std::fmt;
use std::rc::Rc;

/// A wrapper from one handler capability to another.
///
/// Middleware values are cheaply cloneable; a subrouter snapshots its
/// parent's chain by cloning it.
///
/// ```
/// use scopemux::Middleware;
///
/// let auth = Middleware::new(|h: String| format!("auth({h})"));
/// assert_eq!(auth.wrap("ping".to_owned()), "auth(ping)");
/// ```
pub struct Middleware<H> {
    wrap: Rc<dyn Fn(H) -> H>,
}

impl<H> Middleware<H> {
    /// Creates a middleware from a handler transform.
    pub fn new(wrap: impl Fn(H) -> H + 'static) -> Self {
        Middleware {
            wrap: Rc::new(wrap),
        }
    }

    /// Wraps the next handler in the chain.
    pub fn wrap(&self, next: H) -> H {
        (self.wrap)(next)
    }

    /// Composes an ordered chain around a handler.
    ///
    /// The chain is applied back to front: the last middleware wraps the
    /// handler first, so the first middleware ends up outermost and its
    /// logic runs first on a request, unwinding in reverse order after the
    /// handler. An empty chain returns the handler unchanged.
    pub fn compose(chain: &[Middleware<H>], handler: H) -> H {
        chain.iter().rev().fold(handler, |h, mw| mw.wrap(h))
    }
}

impl<H> Clone for Middleware<H> {
    fn clone(&self) -> Self {
        Middleware {
            wrap: Rc::clone(&self.wrap),
        }
    }
}

impl<H> fmt::Debug for Middleware<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Middleware")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(name: &'static str) -> Middleware<String> {
        Middleware::new(move |next| format!("{name}({next})"))
    }

    #[test]
    fn first_middleware_is_outermost() {
        let chain = [label("m0"), label("m1"), label("m2")];
        let wrapped = Middleware::compose(&chain, "h".to_owned());
        assert_eq!(wrapped, "m0(m1(m2(h)))");
    }

    #[test]
    fn empty_chain_is_identity() {
        let wrapped = Middleware::compose(&[], "h".to_owned());
        assert_eq!(wrapped, "h");
    }

    #[test]
    fn single_wrap() {
        let chain = [label("only")];
        assert_eq!(Middleware::compose(&chain, "h".to_owned()), "only(h)");
    }
}
