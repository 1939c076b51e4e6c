// logveil-core/src/registry.rs
//! Dual-keyed registries for formatters and obfuscators.
//!
//! Both registries are populated by the composition root before the first
//! `sanitize` call and read concurrently from the hot path afterwards.
//! Registration is last-write-wins per key. Lookups never observe a
//! partially-populated table: each map swap happens under its own write
//! lock, and writes only occur during composition or an explicit `reset`.
//!
//! License: MIT OR Apache-2.0

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::data_type::DataType;
use crate::formatters::Formatter;
use crate::obfuscators::{DefaultObfuscator, Obfuscator};

/// Terminal fallback used when no default obfuscator has been configured,
/// keeping the resolution pipeline total even before `configure`.
static FALLBACK_OBFUSCATOR: Lazy<Arc<dyn Obfuscator>> =
    Lazy::new(|| Arc::new(DefaultObfuscator::default()));

/// Registry of [`Formatter`]s, addressable by lowercased name and by data
/// category.
#[derive(Default)]
pub struct FormatterRegistry {
    by_name: RwLock<HashMap<String, Arc<dyn Formatter>>>,
    by_type: RwLock<HashMap<DataType, Arc<dyn Formatter>>>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a formatter under an explicit name. A formatter with a
    /// non-generic data category is also indexed by that category.
    pub fn register_by_name(&self, name: &str, formatter: Arc<dyn Formatter>) {
        if formatter.data_type() != DataType::Generic {
            self.by_type
                .write()
                .unwrap()
                .insert(formatter.data_type(), Arc::clone(&formatter));
        }
        self.by_name
            .write()
            .unwrap()
            .insert(name.to_lowercase(), formatter);
    }

    /// Registers a formatter under a data category, and under its own name.
    pub fn register_by_type(&self, data_type: DataType, formatter: Arc<dyn Formatter>) {
        self.by_name
            .write()
            .unwrap()
            .insert(formatter.name().to_lowercase(), Arc::clone(&formatter));
        self.by_type.write().unwrap().insert(data_type, formatter);
    }

    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn Formatter>> {
        if name.trim().is_empty() {
            return None;
        }
        self.by_name.read().unwrap().get(&name.to_lowercase()).cloned()
    }

    pub fn get_by_type(&self, data_type: DataType) -> Option<Arc<dyn Formatter>> {
        self.by_type.read().unwrap().get(&data_type).cloned()
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.by_name.read().unwrap().contains_key(&name.to_lowercase())
    }

    pub fn has_type(&self, data_type: DataType) -> bool {
        self.by_type.read().unwrap().contains_key(&data_type)
    }

    /// Removes a formatter by name, and its category index entry when the
    /// removed formatter carried a non-generic category.
    pub fn unregister(&self, name: &str) {
        let removed = self.by_name.write().unwrap().remove(&name.to_lowercase());
        if let Some(f) = removed {
            if f.data_type() != DataType::Generic {
                self.by_type.write().unwrap().remove(&f.data_type());
            }
        }
    }

    pub fn clear(&self) {
        self.by_name.write().unwrap().clear();
        self.by_type.write().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.by_name.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registry of [`Obfuscator`]s, addressable by lowercased name and by data
/// category, plus the distinguished default-obfuscator slot.
#[derive(Default)]
pub struct ObfuscatorRegistry {
    by_name: RwLock<HashMap<String, Arc<dyn Obfuscator>>>,
    by_type: RwLock<HashMap<DataType, Arc<dyn Obfuscator>>>,
    default: RwLock<Option<Arc<dyn Obfuscator>>>,
}

impl ObfuscatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_by_name(&self, name: &str, obfuscator: Arc<dyn Obfuscator>) {
        self.by_name
            .write()
            .unwrap()
            .insert(name.to_lowercase(), obfuscator);
    }

    pub fn register_by_type(&self, data_type: DataType, obfuscator: Arc<dyn Obfuscator>) {
        self.by_type.write().unwrap().insert(data_type, obfuscator);
    }

    /// Installs the terminal fallback of the resolution pipeline. Called by
    /// `configure` with the configured mask char and default mask.
    pub fn set_default(&self, obfuscator: Arc<dyn Obfuscator>) {
        *self.default.write().unwrap() = Some(obfuscator);
    }

    /// The default obfuscator. Always usable: before `configure` installs
    /// one, a process-wide `***` obfuscator stands in.
    pub fn default_obfuscator(&self) -> Arc<dyn Obfuscator> {
        self.default
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Arc::clone(&FALLBACK_OBFUSCATOR))
    }

    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn Obfuscator>> {
        if name.trim().is_empty() {
            return None;
        }
        self.by_name.read().unwrap().get(&name.to_lowercase()).cloned()
    }

    pub fn get_by_type(&self, data_type: DataType) -> Option<Arc<dyn Obfuscator>> {
        self.by_type.read().unwrap().get(&data_type).cloned()
    }

    /// The most specific obfuscator for a category: the registered one, or
    /// the default.
    pub fn obfuscator_for(&self, data_type: DataType) -> Arc<dyn Obfuscator> {
        self.get_by_type(data_type)
            .unwrap_or_else(|| self.default_obfuscator())
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.by_name.read().unwrap().contains_key(&name.to_lowercase())
    }

    pub fn has_type(&self, data_type: DataType) -> bool {
        self.by_type.read().unwrap().contains_key(&data_type)
    }

    pub fn unregister_name(&self, name: &str) {
        self.by_name.write().unwrap().remove(&name.to_lowercase());
    }

    pub fn unregister_type(&self, data_type: DataType) {
        self.by_type.write().unwrap().remove(&data_type);
    }

    /// Clears registrations and the default slot; the process-wide fallback
    /// keeps lookups total afterwards.
    pub fn clear(&self) {
        self.by_name.write().unwrap().clear();
        self.by_type.write().unwrap().clear();
        *self.default.write().unwrap() = None;
    }

    pub fn len(&self) -> usize {
        self.by_name.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
