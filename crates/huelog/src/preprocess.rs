use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("field pattern"));

/// Rewrites every `${name}` into a `{lorg "name"}` directive so that host
/// fields survive style compilation and come out as `${name}` again.
///
/// Purely textual: `${}` and an unterminated `${name` are left alone, and a
/// name is not escaped.
pub fn preprocess(formatting: &str) -> Cow<'_, str> {
    FIELD.replace_all(formatting, r#"{lorg "$1"}"#)
}
