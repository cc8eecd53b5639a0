//! Pure string helpers for prefix and path assembly.
//!
//! Everything here is total: no failures, no side effects. Registration
//! logic never does inline string surgery; it goes through these helpers.

/// Collapses every run of consecutive `/` in `p` to a single `/`.
///
/// The leading separator (if any) is preserved, never stripped.
///
/// ```
/// assert_eq!(scopemux::path::collapse_slashes("/v1//test"), "/v1/test");
/// assert_eq!(scopemux::path::collapse_slashes("///"), "/");
/// ```
pub fn collapse_slashes(p: &str) -> String {
    let mut out = String::with_capacity(p.len());
    let mut prev_slash = false;
    for c in p.chars() {
        if c == '/' {
            if !prev_slash {
                out.push(c);
            }
            prev_slash = true;
        } else {
            out.push(c);
            prev_slash = false;
        }
    }
    out
}

/// Joins two path fragments with exactly one separator between them.
///
/// Runs of separators anywhere in the result are collapsed. Empty fragments
/// contribute nothing; joining `""` with `"/a"` is just `"/a"`.
///
/// ```
/// assert_eq!(scopemux::path::join("/v1", "/test"), "/v1/test");
/// assert_eq!(scopemux::path::join("/v1//", "//test"), "/v1/test");
/// assert_eq!(scopemux::path::join("v1", "v2"), "v1/v2");
/// assert_eq!(scopemux::path::join("", "/test"), "/test");
/// ```
pub fn join(a: &str, b: &str) -> String {
    let mut out = String::with_capacity(a.len() + b.len() + 1);
    out.push_str(a);
    if !a.is_empty() && !b.is_empty() && !a.ends_with('/') && !b.starts_with('/') {
        out.push('/');
    }
    out.push_str(b);
    collapse_slashes(&out)
}

/// Normalizes a prefix fragment: a leading separator is inserted when
/// absent. The empty fragment stays empty.
pub(crate) fn normalize_prefix(p: &str) -> String {
    if p.is_empty() || p.starts_with('/') {
        p.to_owned()
    } else {
        let mut out = String::with_capacity(p.len() + 1);
        out.push('/');
        out.push_str(p);
        out
    }
}
