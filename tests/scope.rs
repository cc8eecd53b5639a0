use scopemux::{Middleware, PatternError, Scope, ScopeId};

fn label(name: &'static str) -> Middleware<String> {
    Middleware::new(move |next| format!("{name}({next})"))
}

#[test]
fn effective_prefix_joins_ancestor_chain() {
    let mut root: Scope<String> = Scope::new();
    root.prefix("v1");

    let mut child = root.subrouter();
    child.prefix("v2/{instance_id}");

    let mut grandchild = child.subrouter();
    grandchild.prefix("foobar");

    assert_eq!(root.effective_prefix(), "/v1");
    assert_eq!(child.effective_prefix(), "/v1/v2/{instance_id}");
    assert_eq!(grandchild.effective_prefix(), "/v1/v2/{instance_id}/foobar");
}

#[test]
fn scopes_without_fragment_contribute_nothing() {
    let mut root: Scope<String> = Scope::new();
    root.prefix("v1");

    let mut middle = root.subrouter();
    let mut leaf = middle.subrouter();
    leaf.prefix("leaf");

    assert_eq!(middle.effective_prefix(), "/v1");
    assert_eq!(leaf.effective_prefix(), "/v1/leaf");
}

#[test]
fn prefix_overwrites_instead_of_accumulating() {
    let mut root: Scope<String> = Scope::new();
    root.prefix("v1");
    root.prefix("v2");
    assert_eq!(root.effective_prefix(), "/v2");
}

#[test]
fn prefix_gets_leading_slash() {
    let mut root: Scope<String> = Scope::new();
    root.prefix("v1");
    assert_eq!(root.effective_prefix(), "/v1");

    let mut other: Scope<String> = Scope::new();
    other.prefix("/v1");
    assert_eq!(other.effective_prefix(), "/v1");
}

#[test]
fn middleware_inheritance_is_a_snapshot() {
    let mut root: Scope<String> = Scope::new();
    root.use_middleware(label("a"));

    // created while the chain is [a]
    let mut early = root.subrouter();
    early.handle("GET /early", "e".to_owned()).unwrap();

    root.use_middleware(label("b"));

    // created while the chain is [a, b]
    let mut late = root.subrouter();
    late.handle("GET /late", "l".to_owned()).unwrap();

    let table = root.build().unwrap();
    assert_eq!(
        table.get(Some(&http::Method::GET), "/early"),
        Some(&"a(e)".to_owned())
    );
    assert_eq!(
        table.get(Some(&http::Method::GET), "/late"),
        Some(&"a(b(l))".to_owned())
    );
}

#[test]
fn child_appends_to_inherited_chain() {
    let mut root: Scope<String> = Scope::new();
    root.use_middleware(label("auth"));

    let mut child = root.subrouter();
    child.use_fn(|h| format!("admin({h})"));
    child.handle("GET /secret", "s".to_owned()).unwrap();

    let table = root.build().unwrap();
    assert_eq!(
        table.get(Some(&http::Method::GET), "/secret"),
        Some(&"auth(admin(s))".to_owned())
    );
}

#[test]
fn grandchild_inherits_collapsed_chain() {
    let mut root: Scope<String> = Scope::new();
    root.use_middleware(label("a"));

    let mut child = root.subrouter();
    child.use_middleware(label("b"));

    let mut grandchild = child.subrouter();
    grandchild.use_middleware(label("c"));
    grandchild.handle("GET /deep", "h".to_owned()).unwrap();

    let table = root.build().unwrap();
    assert_eq!(
        table.get(Some(&http::Method::GET), "/deep"),
        Some(&"a(b(c(h)))".to_owned())
    );
}

#[test]
fn local_reregistration_overwrites() {
    let mut root: Scope<String> = Scope::new();
    root.handle("GET /x", "first".to_owned()).unwrap();
    root.handle("GET /x", "second".to_owned()).unwrap();

    let table = root.build().unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(
        table.get(Some(&http::Method::GET), "/x"),
        Some(&"second".to_owned())
    );
}

#[test]
fn invalid_specs_fail_at_registration() {
    let mut root: Scope<String> = Scope::new();
    assert_eq!(
        root.handle("GET test", "h".to_owned()),
        Err(PatternError::MissingLeadingSlash {
            spec: "GET test".to_owned()
        })
    );
    assert_eq!(
        root.handle("GET /a /b", "h".to_owned()),
        Err(PatternError::InvalidMethod {
            spec: "GET /a /b".to_owned()
        })
    );
    // nothing was registered
    assert!(root.build().unwrap().is_empty());
}

#[test]
fn ids_are_stable_and_root_is_zero() {
    let mut root: Scope<String> = Scope::new();
    assert!(root.is_root());
    assert_eq!(root.id(), ScopeId::ROOT);

    let a = root.subrouter();
    let b = root.subrouter();
    assert!(!a.is_root());
    assert_ne!(a.id(), b.id());
    assert_eq!(a.id().index(), 1);
    assert_eq!(b.id().index(), 2);
}

#[test]
fn handles_are_cloneable() {
    let mut root: Scope<String> = Scope::new();
    let mut alias = root.clone();
    alias.prefix("v1");
    root.handle("GET /x", "h".to_owned()).unwrap();

    let table = root.build().unwrap();
    assert_eq!(table.patterns(), ["GET /v1/x"]);
}

#[test]
fn frozen_tree_ignores_configuration() {
    let mut root: Scope<String> = Scope::new();
    root.handle("GET /x", "h".to_owned()).unwrap();
    let table = root.build().unwrap();

    // well-formed calls are ignored, malformed ones still report
    root.prefix("v9");
    root.use_middleware(label("late"));
    assert_eq!(root.handle("GET /y", "h".to_owned()), Ok(()));
    assert!(root.handle("nope", "h".to_owned()).is_err());

    assert_eq!(table.patterns(), ["GET /x"]);
    assert_eq!(root.effective_prefix(), "");
}
