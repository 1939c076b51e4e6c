// logveil-core/src/engine.rs
//! The detection engine: two-pass scan and span-preserving substitution.
//!
//! `MaskingEngine` owns an atomically swapped configuration snapshot
//! (compiled field patterns plus the type pattern table) and shared
//! formatter/obfuscator registries. `sanitize` is the sole hot-path entry
//! point: synchronous, allocation-free when nothing matches, and total over
//! all inputs once configured.
//!
//! License: MIT OR Apache-2.0

use std::borrow::Cow;
use std::sync::{Arc, RwLock};

use log::warn;
use regex::Regex;

use crate::compiler::{compile_field, compile_type_patterns, CompiledPattern};
use crate::config::{MaskingConfig, SensitiveField};
use crate::data_type::DataType;
use crate::errors::LogveilError;
use crate::obfuscators::{is_already_masked, DefaultObfuscator};
use crate::registry::{FormatterRegistry, ObfuscatorRegistry};
use crate::resolve::{resolve_by_type, resolve_field};

/// Occurrence count for one rule (field name or auto-detected category) in a
/// single sanitization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskSummaryItem {
    pub rule_name: String,
    pub occurrences: usize,
}

/// One field with its compiled detection patterns, in shape order.
struct CompiledField {
    config: SensitiveField,
    patterns: Vec<CompiledPattern>,
}

/// The engine's immutable configuration snapshot. Recompiled wholesale on
/// every `configure`, never partially mutated.
struct Snapshot {
    config: MaskingConfig,
    fields: Vec<CompiledField>,
    type_patterns: Vec<(DataType, Regex)>,
}

/// Detection-and-substitution engine for sensitive values in log text.
///
/// Concurrency: `sanitize` takes a read lock only long enough to clone the
/// snapshot `Arc`; `configure` builds the complete replacement snapshot
/// before swapping it in under the write lock, so concurrent `sanitize`
/// calls observe either the fully-old or fully-new configuration.
pub struct MaskingEngine {
    snapshot: RwLock<Option<Arc<Snapshot>>>,
    formatters: Arc<FormatterRegistry>,
    obfuscators: Arc<ObfuscatorRegistry>,
}

impl Default for MaskingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskingEngine {
    /// Creates an unconfigured engine with empty registries.
    pub fn new() -> Self {
        Self::with_registries(
            Arc::new(FormatterRegistry::new()),
            Arc::new(ObfuscatorRegistry::new()),
        )
    }

    /// Creates an unconfigured engine over registries owned by the
    /// composition root.
    pub fn with_registries(
        formatters: Arc<FormatterRegistry>,
        obfuscators: Arc<ObfuscatorRegistry>,
    ) -> Self {
        Self {
            snapshot: RwLock::new(None),
            formatters,
            obfuscators,
        }
    }

    pub fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }

    pub fn obfuscators(&self) -> &ObfuscatorRegistry {
        &self.obfuscators
    }

    /// Replaces the active snapshot atomically. Idempotent and safe to call
    /// repeatedly (e.g. on configuration re-read).
    ///
    /// A field whose custom pattern fails to compile is excluded from the
    /// new snapshot; every other field stays active and the per-field errors
    /// are reported in the returned [`LogveilError::InvalidFields`]. The
    /// engine is configured either way.
    pub fn configure(&self, config: MaskingConfig) -> Result<(), LogveilError> {
        let mut fields = Vec::with_capacity(config.sensitive_fields.len());
        let mut errors = Vec::new();

        for field in &config.sensitive_fields {
            match compile_field(field) {
                Ok(patterns) => fields.push(CompiledField {
                    config: field.clone(),
                    patterns,
                }),
                Err(e) => {
                    warn!("Excluding sensitive field '{}': {e}", field.name);
                    errors.push(e);
                }
            }
        }

        let type_patterns = if config.auto_detect {
            compile_type_patterns(&config.auto_detect_types)?
        } else {
            Vec::new()
        };

        self.obfuscators.set_default(Arc::new(DefaultObfuscator::new(
            config.mask_char,
            config.default_mask.clone(),
        )));

        let snapshot = Arc::new(Snapshot {
            fields,
            type_patterns,
            config,
        });
        *self.snapshot.write().unwrap() = Some(snapshot);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(LogveilError::from_field_errors(errors))
        }
    }

    /// Whether `configure` has installed a snapshot.
    pub fn is_configured(&self) -> bool {
        self.snapshot.read().unwrap().is_some()
    }

    /// Clears the configuration and both registries back to the
    /// unconfigured state.
    pub fn reset(&self) {
        *self.snapshot.write().unwrap() = None;
        self.formatters.clear();
        self.obfuscators.clear();
    }

    /// Masks every detected sensitive value in `message`.
    ///
    /// Returns the input unchanged (borrowed, no allocation) when the engine
    /// is unconfigured, disabled, the input is empty, or nothing matches.
    /// Never fails.
    pub fn sanitize<'a>(&self, message: &'a str) -> Cow<'a, str> {
        let Some(snapshot) = self.snapshot.read().unwrap().clone() else {
            return Cow::Borrowed(message);
        };
        if !snapshot.config.enabled || message.is_empty() {
            return Cow::Borrowed(message);
        }
        self.scan(message, &snapshot, None)
    }

    /// Like [`sanitize`](Self::sanitize), additionally reporting how many
    /// substitutions each rule made, in scan order.
    pub fn sanitize_with_summary<'a>(&self, message: &'a str) -> (Cow<'a, str>, Vec<MaskSummaryItem>) {
        let mut summary = Vec::new();
        let Some(snapshot) = self.snapshot.read().unwrap().clone() else {
            return (Cow::Borrowed(message), summary);
        };
        if !snapshot.config.enabled || message.is_empty() {
            return (Cow::Borrowed(message), summary);
        }
        let masked = self.scan(message, &snapshot, Some(&mut summary));
        (masked, summary)
    }

    /// The two-pass scan. Pass 1 applies each configured field's patterns in
    /// declaration and shape order, compounding on the same buffer so later
    /// patterns see earlier replacements. Pass 2 scans what pass 1 produced,
    /// so a field-masked value cannot be re-flagged by a coincidental
    /// category pattern.
    fn scan<'a>(
        &self,
        message: &'a str,
        snapshot: &Snapshot,
        mut summary: Option<&mut Vec<MaskSummaryItem>>,
    ) -> Cow<'a, str> {
        let mut current: Cow<'a, str> = Cow::Borrowed(message);

        for field in &snapshot.fields {
            let mut occurrences = 0;
            for pattern in &field.patterns {
                if let Some((replaced, count)) =
                    self.apply_field_pattern(&current, pattern, &field.config, &snapshot.config)
                {
                    current = Cow::Owned(replaced);
                    occurrences += count;
                }
            }
            if occurrences > 0 {
                if let Some(items) = summary.as_mut() {
                    items.push(MaskSummaryItem {
                        rule_name: field.config.name.clone(),
                        occurrences,
                    });
                }
            }
        }

        if snapshot.config.auto_detect {
            for (data_type, regex) in &snapshot.type_patterns {
                if let Some((replaced, count)) =
                    self.apply_type_pattern(&current, *data_type, regex, &snapshot.config)
                {
                    current = Cow::Owned(replaced);
                    if let Some(items) = summary.as_mut() {
                        items.push(MaskSummaryItem {
                            rule_name: data_type.key().to_string(),
                            occurrences: count,
                        });
                    }
                }
            }
        }

        current
    }

    /// Applies one field pattern to the buffer, replacing only the value
    /// capture span of each non-overlapping match and preserving every
    /// literal character of the full match. Returns `None` when nothing
    /// matched, so the caller keeps the borrowed buffer.
    fn apply_field_pattern(
        &self,
        text: &str,
        pattern: &CompiledPattern,
        field: &SensitiveField,
        config: &MaskingConfig,
    ) -> Option<(String, usize)> {
        let mut out: Option<String> = None;
        let mut last = 0;
        let mut count = 0;

        for caps in pattern.regex.captures_iter(text) {
            let Some(value) = caps.get(pattern.value_group) else {
                continue;
            };
            if value.as_str().is_empty() {
                continue;
            }
            let masked = resolve_field(value.as_str(), field, config, &self.formatters, &self.obfuscators);
            let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
            buf.push_str(&text[last..value.start()]);
            buf.push_str(&masked);
            last = value.end();
            count += 1;
        }

        let mut buf = out?;
        buf.push_str(&text[last..]);
        Some((buf, count))
    }

    /// Applies one category pattern to the buffer. Type patterns have no
    /// key/value split: the entire match is the value. Values the field pass
    /// already masked are left untouched.
    fn apply_type_pattern(
        &self,
        text: &str,
        data_type: DataType,
        regex: &Regex,
        config: &MaskingConfig,
    ) -> Option<(String, usize)> {
        let mut out: Option<String> = None;
        let mut last = 0;
        let mut count = 0;

        for m in regex.find_iter(text) {
            if m.as_str().is_empty()
                || is_already_masked(m.as_str(), config.mask_char, config.already_masked_ratio)
            {
                continue;
            }
            let masked = resolve_by_type(m.as_str(), data_type, &self.formatters, &self.obfuscators);
            let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
            buf.push_str(&text[last..m.start()]);
            buf.push_str(&masked);
            last = m.end();
            count += 1;
        }

        let mut buf = out?;
        buf.push_str(&text[last..]);
        Some((buf, count))
    }
}
