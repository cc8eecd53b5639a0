//! Pattern spec parsing.
//!
//! A registration string is either `"/path"` (method-agnostic) or
//! `"METHOD /path"` (method token, one space, path beginning with `/`).
//! Any other shape is rejected at registration time.

use crate::error::PatternError;

use http::Method;

/// Splits the optional leading method token from a pattern spec.
///
/// Returns the parsed method (`None` for a method-agnostic spec) and the
/// path part. The path must begin with `/`; the method token must be a
/// valid HTTP method token (standard or extension).
pub(crate) fn parse(spec: &str) -> Result<(Option<Method>, &str), PatternError> {
    let (method, path) = match spec.split_once(' ') {
        Some((token, rest)) => {
            if token.is_empty() || rest.contains(' ') {
                return Err(PatternError::InvalidMethod {
                    spec: spec.to_owned(),
                });
            }
            let method = Method::from_bytes(token.as_bytes()).map_err(|_| {
                PatternError::InvalidMethod {
                    spec: spec.to_owned(),
                }
            })?;
            (Some(method), rest)
        }
        None => (None, spec),
    };

    if !path.starts_with('/') {
        return Err(PatternError::MissingLeadingSlash {
            spec: spec.to_owned(),
        });
    }

    Ok((method, path))
}
