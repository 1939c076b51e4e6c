// logveil-core/src/resolve.rs
//! The resolution pipeline: decides how a matched raw value becomes its
//! masked replacement.
//!
//! Both entry points are pure functions of the value, its context and the
//! registries; each terminates in the default obfuscator, so resolution
//! always produces a deterministic, non-empty replacement and "no matching
//! formatter" is never an error.
//!
//! License: MIT OR Apache-2.0

use crate::config::{MaskingConfig, SensitiveField};
use crate::data_type::DataType;
use crate::obfuscators::{Obfuscator, PartialObfuscator, MIN_MASK_LENGTH};
use crate::registry::{FormatterRegistry, ObfuscatorRegistry};

/// Resolves a value matched by a configured field. Ordered fallback, first
/// applicable tier wins:
///
/// 1. the field's named formatter override,
/// 2. a formatter registered for the field's (non-generic) category,
/// 3. the partial mask, when the field keeps any characters visible,
/// 4. the default obfuscator.
pub(crate) fn resolve_field(
    value: &str,
    field: &SensitiveField,
    config: &MaskingConfig,
    formatters: &FormatterRegistry,
    obfuscators: &ObfuscatorRegistry,
) -> String {
    if let Some(name) = field.formatter_name.as_deref() {
        if let Some(formatter) = formatters.get_by_name(name) {
            return formatter.format(value);
        }
    }

    if field.data_type != DataType::Generic {
        if let Some(formatter) = formatters.get_by_type(field.data_type) {
            return formatter.format(value);
        }
    }

    if field.visible_chars_start > 0 || field.visible_chars_end > 0 {
        return PartialObfuscator::new(
            field.visible_chars_start,
            field.visible_chars_end,
            config.mask_char,
            MIN_MASK_LENGTH,
        )
        .obfuscate(value);
    }

    obfuscators.default_obfuscator().obfuscate(value)
}

/// Resolves a value matched by the type pass. Ordered fallback: category
/// formatter, category obfuscator, default obfuscator.
pub(crate) fn resolve_by_type(
    value: &str,
    data_type: DataType,
    formatters: &FormatterRegistry,
    obfuscators: &ObfuscatorRegistry,
) -> String {
    if let Some(formatter) = formatters.get_by_type(data_type) {
        return formatter.format(value);
    }

    if let Some(obfuscator) = obfuscators.get_by_type(data_type) {
        return obfuscator.obfuscate(value);
    }

    obfuscators.default_obfuscator().obfuscate(value)
}
