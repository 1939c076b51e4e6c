// logveil-core/src/config.rs
//! Configuration management for `logveil-core`.
//!
//! Defines the sensitive-field and engine configuration structures, handles
//! YAML/JSON (de)serialization, and provides loading, merging and validation
//! utilities.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::data_type::DataType;
use crate::errors::LogveilError;
use crate::obfuscators::DEFAULT_ALREADY_MASKED_RATIO;

/// Maximum allowed length for a custom pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Configuration of one sensitive field to be masked wherever it appears in
/// a recognized textual shape. Identity is `name`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SensitiveField {
    /// Key whose associated value must be masked.
    pub name: String,
    /// Data category, used for formatter/obfuscator lookup and as the
    /// field's value shape.
    pub data_type: DataType,
    /// Optional extra detection pattern compiled alongside the built-in
    /// textual shapes. A compile failure excludes this field only.
    pub custom_pattern: Option<String>,
    /// Optional formatter override, looked up by name before any
    /// category-based resolution.
    pub formatter_name: Option<String>,
    /// Whether the field name matches case-sensitively.
    pub case_sensitive: bool,
    /// Leading characters left visible by the partial-mask tier.
    pub visible_chars_start: usize,
    /// Trailing characters left visible by the partial-mask tier.
    pub visible_chars_end: usize,
}

impl Default for SensitiveField {
    fn default() -> Self {
        Self {
            name: String::new(),
            data_type: DataType::Generic,
            custom_pattern: None,
            formatter_name: None,
            case_sensitive: false,
            visible_chars_start: 0,
            visible_chars_end: 0,
        }
    }
}

impl SensitiveField {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            ..Self::default()
        }
    }

    pub fn with_custom_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.custom_pattern = Some(pattern.into());
        self
    }

    pub fn with_formatter(mut self, name: impl Into<String>) -> Self {
        self.formatter_name = Some(name.into());
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_visible(mut self, start: usize, end: usize) -> Self {
        self.visible_chars_start = start;
        self.visible_chars_end = end;
        self
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MaskingConfig {
    /// Master switch; when false, `sanitize` is an identity function.
    pub enabled: bool,
    /// Character used for masking.
    pub mask_char: char,
    /// Mask emitted by the default obfuscator.
    pub default_mask: String,
    /// Whether the type pass (auto-detection by category) runs.
    pub auto_detect: bool,
    /// Sensitive fields, in declaration order; the field pass scans them in
    /// this order.
    pub sensitive_fields: Vec<SensitiveField>,
    /// Categories scanned by the type pass, in declaration order.
    pub auto_detect_types: Vec<DataType>,
    /// Threshold for the already-masked heuristic; a value whose mask-char
    /// fraction exceeds it is left untouched by the type pass.
    pub already_masked_ratio: f64,
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mask_char: '*',
            default_mask: "***".to_string(),
            auto_detect: true,
            sensitive_fields: Vec::new(),
            auto_detect_types: default_auto_detect_types(),
            already_masked_ratio: DEFAULT_ALREADY_MASKED_RATIO,
        }
    }
}

/// Categories auto-detected when a configuration does not name its own set.
/// Unbounded shapes (password, address, generic, name) are deliberately
/// absent: their patterns match nearly anything.
pub fn default_auto_detect_types() -> Vec<DataType> {
    vec![
        DataType::NationalId,
        DataType::TaxId,
        DataType::Email,
        DataType::CardNumber,
        DataType::IpAddress,
    ]
}

impl MaskingConfig {
    /// Loads a configuration from a YAML or JSON file, keyed on extension.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading masking config from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: MaskingConfig = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        } else {
            serde_yml::from_str(&text)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        };

        validate_config(&config)?;
        info!(
            "Loaded {} sensitive fields from {}.",
            config.sensitive_fields.len(),
            path.display()
        );
        Ok(config)
    }

    /// Loads the embedded default configuration.
    pub fn load_default_config() -> Result<Self> {
        debug!("Loading default masking config from embedded string...");
        let default_yaml = include_str!("../config/default_fields.yaml");
        let config: MaskingConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default config")?;
        debug!("Loaded {} default fields.", config.sensitive_fields.len());
        Ok(config)
    }

    /// Adds a sensitive field, builder-style.
    pub fn with_field(mut self, field: SensitiveField) -> Self {
        self.sensitive_fields.push(field);
        self
    }
}

/// Merges a user configuration over the defaults.
///
/// Scalar settings come from the user config. Fields keep the default
/// declaration order, with same-named user fields replacing default ones in
/// place; user-only fields are appended in their own order.
pub fn merge_configs(default_config: MaskingConfig, user_config: Option<MaskingConfig>) -> MaskingConfig {
    let Some(user) = user_config else {
        return default_config;
    };
    debug!(
        "Merging {} user fields over {} defaults.",
        user.sensitive_fields.len(),
        default_config.sensitive_fields.len()
    );

    let mut merged_fields = Vec::with_capacity(default_config.sensitive_fields.len());
    let default_names: HashSet<String> = default_config
        .sensitive_fields
        .iter()
        .map(|f| f.name.to_lowercase())
        .collect();

    for field in default_config.sensitive_fields {
        let replacement = user
            .sensitive_fields
            .iter()
            .find(|u| u.name.eq_ignore_ascii_case(&field.name));
        merged_fields.push(replacement.cloned().unwrap_or(field));
    }
    for field in &user.sensitive_fields {
        if !default_names.contains(&field.name.to_lowercase()) {
            merged_fields.push(field.clone());
        }
    }

    MaskingConfig {
        sensitive_fields: merged_fields,
        ..user
    }
}

/// Validates field integrity: non-empty unique names and well-formed custom
/// patterns. Strict load-time counterpart to `configure`'s lenient per-field
/// error scoping.
pub fn validate_config(config: &MaskingConfig) -> Result<(), LogveilError> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();

    for field in &config.sensitive_fields {
        if field.name.trim().is_empty() {
            errors.push("a sensitive field has an empty `name`".to_string());
        } else if !seen.insert(field.name.to_lowercase()) {
            errors.push(format!("duplicate sensitive field name: '{}'", field.name));
        }

        if let Some(pattern) = &field.custom_pattern {
            if pattern.len() > MAX_PATTERN_LENGTH {
                errors.push(format!(
                    "field '{}': custom pattern length ({}) exceeds maximum allowed ({})",
                    field.name,
                    pattern.len(),
                    MAX_PATTERN_LENGTH
                ));
            } else if let Err(e) = Regex::new(pattern) {
                errors.push(format!("field '{}' has an invalid custom pattern: {e}", field.name));
            }
        }
    }

    if !(0.0..=1.0).contains(&config.already_masked_ratio) {
        errors.push(format!(
            "already_masked_ratio must be within [0, 1], got {}",
            config.already_masked_ratio
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(LogveilError::ValidationError(errors.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_enabled_with_star_mask() {
        let cfg = MaskingConfig::default();
        assert!(cfg.enabled);
        assert_eq!(cfg.mask_char, '*');
        assert_eq!(cfg.default_mask, "***");
        assert!(cfg.auto_detect);
        assert_eq!(cfg.auto_detect_types, default_auto_detect_types());
    }

    #[test]
    fn merge_keeps_default_order_and_appends_new_fields() {
        let default_cfg = MaskingConfig::default()
            .with_field(SensitiveField::new("documento", DataType::NationalId))
            .with_field(SensitiveField::new("email", DataType::Email));
        let user_cfg = MaskingConfig::default()
            .with_field(SensitiveField::new("email", DataType::Email).with_visible(2, 2))
            .with_field(SensitiveField::new("token", DataType::Password));

        let merged = merge_configs(default_cfg, Some(user_cfg));
        let names: Vec<&str> = merged.sensitive_fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["documento", "email", "token"]);
        assert_eq!(merged.sensitive_fields[1].visible_chars_start, 2);
    }

    #[test]
    fn validation_rejects_duplicates_and_bad_patterns() {
        let cfg = MaskingConfig::default()
            .with_field(SensitiveField::new("cpf", DataType::NationalId))
            .with_field(SensitiveField::new("CPF", DataType::NationalId))
            .with_field(SensitiveField::new("broken", DataType::Generic).with_custom_pattern("(unclosed"));
        let err = validate_config(&cfg).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("duplicate sensitive field name"));
        assert!(msg.contains("broken"));
    }

    #[test]
    fn yaml_round_trip_uses_kebab_case_types() {
        let yaml = r#"
enabled: true
mask_char: '#'
sensitive_fields:
  - name: documento
    data_type: national-id
  - name: renda
    data_type: currency
    visible_chars_start: 1
"#;
        let cfg: MaskingConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(cfg.mask_char, '#');
        assert_eq!(cfg.sensitive_fields[0].data_type, DataType::NationalId);
        assert_eq!(cfg.sensitive_fields[1].visible_chars_start, 1);
        // Omitted sections fall back to defaults.
        assert_eq!(cfg.default_mask, "***");
        assert!(cfg.auto_detect);
    }
}
