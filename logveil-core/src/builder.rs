// logveil-core/src/builder.rs
//! Composition root for the masking engine.
//!
//! `EngineBuilder` assembles registries and configuration into a configured
//! [`MaskingEngine`]. Custom formatters and obfuscators are held in explicit
//! ordered lists and registered in insertion order after the built-in set,
//! so registration order is priority order (last write wins per key).
//!
//! License: MIT OR Apache-2.0

use std::sync::Arc;

use crate::config::{MaskingConfig, SensitiveField};
use crate::data_type::DataType;
use crate::engine::MaskingEngine;
use crate::errors::LogveilError;
use crate::formatters::{
    CardFormatter, CurrencyFormatter, DocumentFormatter, EmailFormatter, Formatter,
    NameFormatter, NationalIdFormatter, PhoneFormatter, TaxIdFormatter,
};
use crate::obfuscators::Obfuscator;
use crate::registry::{FormatterRegistry, ObfuscatorRegistry};

enum FormatterKey {
    Name(String),
    Type(DataType),
}

enum ObfuscatorKey {
    Name(String),
    Type(DataType),
}

/// Fluent builder producing a configured [`MaskingEngine`].
///
/// ```
/// use logveil_core::{DataType, EngineBuilder, SensitiveField};
///
/// let engine = EngineBuilder::new()
///     .mask_char('*')
///     .field(SensitiveField::new("documento", DataType::NationalId))
///     .field(SensitiveField::new("telefone", DataType::Generic).with_visible(2, 3))
///     .build()
///     .expect("valid configuration");
///
/// let masked = engine.sanitize(r#"{"documento": "12345678909"}"#);
/// assert!(!masked.contains("12345678909"));
/// ```
#[derive(Default)]
pub struct EngineBuilder {
    config: MaskingConfig,
    formatters: Vec<(FormatterKey, Arc<dyn Formatter>)>,
    obfuscators: Vec<(ObfuscatorKey, Arc<dyn Obfuscator>)>,
    builtin_formatters: bool,
}

impl EngineBuilder {
    /// Starts from the default configuration with the built-in formatter set
    /// enabled.
    pub fn new() -> Self {
        Self {
            builtin_formatters: true,
            ..Self::default()
        }
    }

    /// Starts from an existing configuration (e.g. loaded from a file).
    pub fn from_config(config: MaskingConfig) -> Self {
        Self {
            config,
            builtin_formatters: true,
            ..Self::default()
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    pub fn mask_char(mut self, mask_char: char) -> Self {
        self.config.mask_char = mask_char;
        self
    }

    pub fn default_mask(mut self, mask: impl Into<String>) -> Self {
        self.config.default_mask = mask.into();
        self
    }

    pub fn auto_detect(mut self, auto_detect: bool) -> Self {
        self.config.auto_detect = auto_detect;
        self
    }

    pub fn auto_detect_types(mut self, types: Vec<DataType>) -> Self {
        self.config.auto_detect_types = types;
        self
    }

    /// Adds a sensitive field, in declaration (scan) order.
    pub fn field(mut self, field: SensitiveField) -> Self {
        self.config.sensitive_fields.push(field);
        self
    }

    /// Shorthand for a field with only a name and category.
    pub fn field_named(self, name: impl Into<String>, data_type: DataType) -> Self {
        self.field(SensitiveField::new(name, data_type))
    }

    /// Skip registration of the built-in formatters.
    pub fn without_builtin_formatters(mut self) -> Self {
        self.builtin_formatters = false;
        self
    }

    /// Queues a custom formatter registration by name.
    pub fn formatter(mut self, name: impl Into<String>, formatter: Arc<dyn Formatter>) -> Self {
        self.formatters.push((FormatterKey::Name(name.into()), formatter));
        self
    }

    /// Queues a custom formatter registration by category.
    pub fn formatter_for(mut self, data_type: DataType, formatter: Arc<dyn Formatter>) -> Self {
        self.formatters.push((FormatterKey::Type(data_type), formatter));
        self
    }

    /// Queues a custom obfuscator registration by name.
    pub fn obfuscator(mut self, name: impl Into<String>, obfuscator: Arc<dyn Obfuscator>) -> Self {
        self.obfuscators.push((ObfuscatorKey::Name(name.into()), obfuscator));
        self
    }

    /// Queues a custom obfuscator registration by category.
    pub fn obfuscator_for(mut self, data_type: DataType, obfuscator: Arc<dyn Obfuscator>) -> Self {
        self.obfuscators.push((ObfuscatorKey::Type(data_type), obfuscator));
        self
    }

    /// Builds the registries, applies registrations in order, and configures
    /// the engine. Per-field pattern errors surface as
    /// [`LogveilError::InvalidFields`] while the engine stays usable with
    /// the remaining fields.
    pub fn build(self) -> Result<MaskingEngine, LogveilError> {
        let formatters = Arc::new(FormatterRegistry::new());
        let obfuscators = Arc::new(ObfuscatorRegistry::new());

        if self.builtin_formatters {
            register_builtin_formatters(&formatters);
        }
        for (key, formatter) in self.formatters {
            match key {
                FormatterKey::Name(name) => formatters.register_by_name(&name, formatter),
                FormatterKey::Type(t) => formatters.register_by_type(t, formatter),
            }
        }
        for (key, obfuscator) in self.obfuscators {
            match key {
                ObfuscatorKey::Name(name) => obfuscators.register_by_name(&name, obfuscator),
                ObfuscatorKey::Type(t) => obfuscators.register_by_type(t, obfuscator),
            }
        }

        let engine = MaskingEngine::with_registries(formatters, obfuscators);
        engine.configure(self.config)?;
        Ok(engine)
    }
}

/// Registers the built-in formatter set under both category and name keys.
pub fn register_builtin_formatters(registry: &FormatterRegistry) {
    registry.register_by_type(DataType::NationalId, Arc::new(NationalIdFormatter::default()));
    registry.register_by_type(DataType::TaxId, Arc::new(TaxIdFormatter::default()));
    registry.register_by_type(DataType::Email, Arc::new(EmailFormatter::default()));
    registry.register_by_type(DataType::Phone, Arc::new(PhoneFormatter::default()));
    registry.register_by_type(DataType::CardNumber, Arc::new(CardFormatter::default()));
    registry.register_by_type(DataType::Name, Arc::new(NameFormatter::default()));
    registry.register_by_type(DataType::Currency, Arc::new(CurrencyFormatter::default()));
    registry.register_by_name("documentFormatter", Arc::new(DocumentFormatter));
}

/// One-shot convenience: builds a throwaway engine with the built-in
/// formatters and masks a single message.
pub fn mask_once(config: MaskingConfig, message: &str) -> Result<String, LogveilError> {
    let engine = EngineBuilder::from_config(config).build()?;
    Ok(engine.sanitize(message).into_owned())
}
