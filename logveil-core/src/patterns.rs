// logveil-core/src/patterns.rs
//! Textual-shape templates for sensitive field detection.
//!
//! One builder per supported shape, each producing a regex source string for
//! a single field name. The same logical key-value pair can appear in log
//! text as a JSON member, an object `toString()`-style pair, colon-delimited
//! free text, or a URL query/path segment; the detection engine applies every
//! shape in the fixed order of [`crate::compiler::compile_field`].
//!
//! Capture-group contract: the value to be masked is always the LAST capture
//! group of the produced pattern. Shapes with a literal prefix group (query
//! and path parameters) place the value in group 2; every other shape has
//! exactly one group. The field name must already be regex-escaped by the
//! caller.
//!
//! License: MIT OR Apache-2.0

/// JSON member with quoted value: `"field": "value"`.
pub(crate) fn json_quoted(name: &str) -> String {
    format!(r#""{name}"\s*:\s*"([^"]+)""#)
}

/// JSON member with unquoted value (number, boolean or null): `"field": value`.
///
/// The value class excludes `"` so a member already handled by the quoted
/// shape is not re-captured with its quote literals inside the value span.
pub(crate) fn json_unquoted(name: &str) -> String {
    format!(r#""{name}"\s*:\s*([^,}}"\s]+)"#)
}

/// `toString()`-style pair with double-quoted value: `field="value"`.
pub(crate) fn kv_double_quoted(name: &str) -> String {
    format!(r#"{name}\s*=\s*"([^"]+)""#)
}

/// `toString()`-style pair with single-quoted value: `field='value'`.
pub(crate) fn kv_single_quoted(name: &str) -> String {
    format!(r"{name}\s*=\s*'([^']+)'")
}

/// `toString()`-style pair with unquoted value: `field=value`.
///
/// The value stops at `,`, `]`, `}`, whitespace and `&`; the `&` stop keeps
/// a later query parameter's key out of the captured span.
pub(crate) fn kv_unquoted(name: &str) -> String {
    format!(r#"{name}\s*=\s*([^,\]}}\s&"']+)"#)
}

/// Colon-delimited free text with quoted value: `field: "value"`.
pub(crate) fn colon_quoted(name: &str) -> String {
    format!(r#"{name}\s*:\s*"([^"]+)""#)
}

/// Colon-delimited free text with unquoted value: `field: value`.
pub(crate) fn colon_unquoted(name: &str) -> String {
    format!(r#"{name}\s*:\s*([^,\s&"]+)"#)
}

/// URL query parameter: `?field=value` or `&field=value`.
/// Group 1 is the literal prefix, group 2 the value.
pub(crate) fn query_param(name: &str) -> String {
    format!(r"([?&]{name}=)([^&\s#]+)")
}

/// URL path parameter: `/field/value`.
/// Group 1 is the literal prefix, group 2 the value.
pub(crate) fn path_param(name: &str) -> String {
    format!(r"(/{name}/)([^/?#\s]+)")
}
