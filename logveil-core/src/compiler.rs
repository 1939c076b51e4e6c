// logveil-core/src/compiler.rs
//! Compilation of sensitive-field declarations into detection patterns.
//!
//! One field compiles into an ordered set of [`CompiledPattern`]s, one per
//! textual shape from [`crate::patterns`], plus an optional custom pattern.
//! The type pattern table compiles each auto-detect category's default
//! pattern as-is.
//!
//! License: MIT OR Apache-2.0

use log::{debug, warn};
use regex::{Regex, RegexBuilder};

use crate::config::{SensitiveField, MAX_PATTERN_LENGTH};
use crate::data_type::DataType;
use crate::errors::LogveilError;
use crate::patterns;

/// Compiled-regex size limit, bounding pathological pattern growth.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// The textual shape a compiled pattern detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    JsonQuoted,
    JsonUnquoted,
    KvDoubleQuoted,
    KvSingleQuoted,
    KvUnquoted,
    ColonQuoted,
    ColonUnquoted,
    QueryParam,
    PathParam,
    Custom,
}

/// A single compiled detection pattern.
///
/// `value_group` is the designated value capture group: the LAST capture
/// group of the pattern. Shapes with a literal prefix group (query and path
/// parameters) place the value in group 2; the other built-in shapes have
/// exactly one group. A custom pattern with no groups uses the whole match
/// (group 0).
#[derive(Debug)]
pub struct CompiledPattern {
    pub regex: Regex,
    pub value_group: usize,
    pub shape: Shape,
}

/// The built-in shapes for a field name, in the fixed application order.
fn shape_sources(escaped_name: &str) -> [(Shape, String); 9] {
    [
        (Shape::JsonQuoted, patterns::json_quoted(escaped_name)),
        (Shape::JsonUnquoted, patterns::json_unquoted(escaped_name)),
        (Shape::KvDoubleQuoted, patterns::kv_double_quoted(escaped_name)),
        (Shape::KvSingleQuoted, patterns::kv_single_quoted(escaped_name)),
        (Shape::KvUnquoted, patterns::kv_unquoted(escaped_name)),
        (Shape::ColonQuoted, patterns::colon_quoted(escaped_name)),
        (Shape::ColonUnquoted, patterns::colon_unquoted(escaped_name)),
        (Shape::QueryParam, patterns::query_param(escaped_name)),
        (Shape::PathParam, patterns::path_param(escaped_name)),
    ]
}

fn build(source: &str, case_sensitive: bool, field_name: &str) -> Result<Regex, LogveilError> {
    RegexBuilder::new(source)
        .case_insensitive(!case_sensitive)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|e| LogveilError::FieldPatternError(field_name.to_string(), e))
}

/// Compiles every detection pattern for one field, in fixed shape order.
///
/// The field name is regex-escaped, never interpreted as a sub-pattern, and
/// case-insensitivity is a compilation flag, not a literal rewrite. A custom
/// pattern that fails to compile (or exceeds [`MAX_PATTERN_LENGTH`]) fails
/// the whole field; the caller decides whether to exclude it.
pub fn compile_field(field: &SensitiveField) -> Result<Vec<CompiledPattern>, LogveilError> {
    let escaped = regex::escape(&field.name);
    debug!("Compiling detection patterns for field '{}'.", field.name);

    let mut compiled = Vec::with_capacity(10);
    for (shape, source) in shape_sources(&escaped) {
        let regex = build(&source, field.case_sensitive, &field.name)?;
        let value_group = match shape {
            Shape::QueryParam | Shape::PathParam => 2,
            _ => 1,
        };
        compiled.push(CompiledPattern { regex, value_group, shape });
    }

    if let Some(pattern) = field.custom_pattern.as_deref().filter(|p| !p.trim().is_empty()) {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(LogveilError::PatternLengthExceeded(
                field.name.clone(),
                pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
        }
        let regex = build(pattern, field.case_sensitive, &field.name)?;
        // Last capture group; the whole match when the pattern has none.
        let value_group = regex.captures_len() - 1;
        compiled.push(CompiledPattern { regex, value_group, shape: Shape::Custom });
    }

    Ok(compiled)
}

/// Compiles the default detection pattern of each auto-detect category, in
/// declaration order, deduplicated.
pub fn compile_type_patterns(types: &[DataType]) -> Result<Vec<(DataType, Regex)>, LogveilError> {
    let mut seen = std::collections::HashSet::new();
    let mut table = Vec::with_capacity(types.len());
    for &data_type in types {
        if !seen.insert(data_type) {
            warn!("Duplicate auto-detect type '{}' ignored.", data_type.key());
            continue;
        }
        let regex = RegexBuilder::new(data_type.default_pattern())
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|e| LogveilError::TypePatternError(data_type.key().to_string(), e))?;
        table.push((data_type, regex));
    }
    Ok(table)
}
