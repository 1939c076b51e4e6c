// logveil-core/src/masked_record.rs
//! Masked rendering of structured records.
//!
//! `MaskedRecord` builds a `Type[field=value, ...]` representation from
//! explicit per-field descriptors: the caller declares each field's name,
//! category and visibility at the call site, and sensitive values are masked
//! through the same formatter/obfuscator contracts the engine uses. No type
//! introspection is involved.
//!
//! License: MIT OR Apache-2.0

use std::fmt::Display;

use crate::data_type::DataType;
use crate::formatters::Formatter;
use crate::obfuscators::{Obfuscator, PartialObfuscator, MIN_MASK_LENGTH};
use crate::registry::FormatterRegistry;

/// Builder for a record rendering with per-field masking.
///
/// ```
/// use logveil_core::MaskedRecord;
///
/// let line = MaskedRecord::new("Customer")
///     .partial("documento", "12345678909", 3, 2)
///     .plain("status", "active")
///     .finish();
/// assert_eq!(line, "Customer[documento=123******09, status=active]");
/// ```
pub struct MaskedRecord<'a> {
    type_name: String,
    formatters: Option<&'a FormatterRegistry>,
    entries: Vec<(String, String)>,
}

impl<'a> MaskedRecord<'a> {
    /// Starts a record with no formatter registry; category masking falls
    /// back to the default partial mask.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            formatters: None,
            entries: Vec::new(),
        }
    }

    /// Starts a record whose category masking consults the given registry.
    pub fn with_registry(type_name: impl Into<String>, formatters: &'a FormatterRegistry) -> Self {
        Self {
            type_name: type_name.into(),
            formatters: Some(formatters),
            entries: Vec::new(),
        }
    }

    /// An unmasked field.
    pub fn plain(mut self, name: &str, value: impl Display) -> Self {
        self.entries.push((name.to_string(), value.to_string()));
        self
    }

    /// A sensitive field masked by category: the registry's formatter for
    /// the category when one is registered, the default partial mask
    /// otherwise.
    pub fn masked(mut self, name: &str, data_type: DataType, value: &str) -> Self {
        let rendered = self
            .formatters
            .and_then(|reg| reg.get_by_type(data_type))
            .map(|f| f.format(value))
            .unwrap_or_else(|| PartialObfuscator::default().obfuscate(value));
        self.entries.push((name.to_string(), rendered));
        self
    }

    /// A sensitive field masked by an explicit formatter.
    pub fn masked_by(mut self, name: &str, value: &str, formatter: &dyn Formatter) -> Self {
        self.entries.push((name.to_string(), formatter.format(value)));
        self
    }

    /// A sensitive field with a partial mask keeping `start`/`end`
    /// characters visible.
    pub fn partial(mut self, name: &str, value: &str, start: usize, end: usize) -> Self {
        let rendered = PartialObfuscator::new(start, end, '*', MIN_MASK_LENGTH).obfuscate(value);
        self.entries.push((name.to_string(), rendered));
        self
    }

    /// A field rendered as a fixed mask, hiding even the value's length.
    pub fn hidden(mut self, name: &str) -> Self {
        self.entries.push((name.to_string(), "***".to_string()));
        self
    }

    /// Renders `Type[field=value, ...]` in declaration order.
    pub fn finish(self) -> String {
        let mut out = String::with_capacity(self.type_name.len() + 2 + self.entries.len() * 16);
        out.push_str(&self.type_name);
        out.push('[');
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(name);
            out.push('=');
            out.push_str(value);
        }
        out.push(']');
        out
    }
}
