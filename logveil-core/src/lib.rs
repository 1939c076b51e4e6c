// logveil-core/src/lib.rs
//! # Logveil Core Library
//!
//! `logveil-core` masks sensitive values embedded inside free-form log text
//! before it is emitted, without altering the surrounding text and without
//! parsing or re-serializing structured payloads. The same logical key-value
//! pair is recognized across the textual shapes that actually show up in log
//! lines: JSON members (quoted and unquoted), object `toString()`-style
//! `key=value` pairs in all three quote styles, colon-delimited free text,
//! and URL query/path segments.
//!
//! ## Modules
//!
//! * `config`: `SensitiveField` and `MaskingConfig`, plus loading, merging
//!   and validation of configuration files.
//! * `data_type`: the data categories and their default detection patterns.
//! * `patterns` / `compiler`: textual-shape templates and their compilation
//!   into per-field pattern sets with an explicit value-capture contract.
//! * `engine`: the two-pass detection engine and its atomically swapped
//!   configuration snapshot.
//! * `resolve`: the fallback pipeline that turns a matched value into its
//!   masked replacement.
//! * `formatters` / `obfuscators`: the pluggable masking transforms.
//! * `registry`: dual-keyed formatter/obfuscator lookup tables.
//! * `builder`: the composition root; `masked_record`: declarative masked
//!   rendering of structured records.
//!
//! ## Usage Example
//!
//! ```rust
//! use logveil_core::{DataType, EngineBuilder, LogveilError, SensitiveField};
//!
//! fn main() -> Result<(), LogveilError> {
//!     // 1. Declare the sensitive fields and build a configured engine.
//!     let engine = EngineBuilder::new()
//!         .field(SensitiveField::new("documento", DataType::NationalId))
//!         .field(SensitiveField::new("telefone", DataType::Generic).with_visible(2, 3))
//!         .build()?;
//!
//!     // 2. Sanitize log text on the hot path.
//!     let masked = engine.sanitize(r#"{"documento": "12345678909"}"#);
//!     assert_eq!(masked, r#"{"documento": "***456789**"}"#);
//!
//!     let masked = engine.sanitize("GET /api?telefone=6378273937");
//!     assert_eq!(masked, "GET /api?telefone=63*****937");
//!     Ok(())
//! }
//! ```
//!
//! ## Design Principles
//!
//! * **Total on the hot path:** `sanitize` never fails; unconfigured or
//!   disabled engines and empty input pass text through unchanged.
//! * **Deterministic resolution:** every match resolves through an ordered
//!   fallback that terminates in the default obfuscator, so a matched value
//!   is never left raw.
//! * **Explicit composition:** registries and the engine are plain instances
//!   owned by the caller; there is no global engine state.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod builder;
pub mod compiler;
pub mod config;
pub mod data_type;
pub mod engine;
pub mod errors;
pub mod formatters;
pub mod masked_record;
pub mod obfuscators;
pub(crate) mod patterns;
pub mod registry;
pub(crate) mod resolve;

/// Re-exports the configuration types and helpers.
pub use config::{
    default_auto_detect_types, merge_configs, validate_config, MaskingConfig, SensitiveField,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the data categories.
pub use data_type::{DataType, ALL_TYPES};

/// Re-exports the custom error type.
pub use errors::LogveilError;

/// Re-exports the detection engine and its summary item.
pub use engine::{MaskSummaryItem, MaskingEngine};

/// Re-exports the compiled-pattern types for advanced usage.
pub use compiler::{compile_field, compile_type_patterns, CompiledPattern, Shape};

/// Re-exports the pluggable transform traits and built-ins.
pub use formatters::{
    CardFormatter, CurrencyFormatter, DocumentFormatter, EmailFormatter, FnFormatter, Formatter,
    NameFormatter, NationalIdFormatter, PhoneFormatter, TaxIdFormatter,
};
pub use obfuscators::{
    is_already_masked, DefaultObfuscator, Obfuscator, PartialObfuscator,
    DEFAULT_ALREADY_MASKED_RATIO, MIN_MASK_LENGTH,
};

/// Re-exports the registries.
pub use registry::{FormatterRegistry, ObfuscatorRegistry};

/// Re-exports the composition root and one-shot helper.
pub use builder::{mask_once, register_builtin_formatters, EngineBuilder};

/// Re-exports the masked record renderer.
pub use masked_record::MaskedRecord;
