// logveil-core/src/data_type.rs
//! Enumeration of the sensitive data categories understood by the engine.
//!
//! Each category carries a default detection pattern matching the bare value
//! shape in isolation (no surrounding key), used both for auto-detection and
//! as the fallback pattern of a field configured with that category.
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// A classification of sensitive value shape.
///
/// Categories serve two purposes: the type pass of the detection engine scans
/// for each auto-detect category's default pattern, and the resolution
/// pipeline uses the category to look up a registered formatter or obfuscator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataType {
    /// National identification number (11 digits, optionally punctuated).
    NationalId,
    /// Company tax identification number (14 digits, optionally punctuated).
    TaxId,
    /// Civil identity card number.
    IdCard,
    /// E-mail address.
    Email,
    /// Telephone number, with optional area code and separators.
    Phone,
    /// Payment card number.
    CardNumber,
    /// IPv4 address.
    IpAddress,
    /// Password or authentication token.
    Password,
    /// Full personal name.
    Name,
    /// Physical address.
    Address,
    /// Monetary amount.
    Currency,
    /// Bank account number.
    BankAccount,
    /// Bank branch number.
    BankBranch,
    /// Uncategorized sensitive data.
    #[default]
    Generic,
}

impl DataType {
    /// Stable configuration key for this category.
    pub fn key(&self) -> &'static str {
        match self {
            DataType::NationalId => "national-id",
            DataType::TaxId => "tax-id",
            DataType::IdCard => "id-card",
            DataType::Email => "email",
            DataType::Phone => "phone",
            DataType::CardNumber => "card-number",
            DataType::IpAddress => "ip-address",
            DataType::Password => "password",
            DataType::Name => "name",
            DataType::Address => "address",
            DataType::Currency => "currency",
            DataType::BankAccount => "bank-account",
            DataType::BankBranch => "bank-branch",
            DataType::Generic => "generic",
        }
    }

    /// Default regex matching this category's raw value shape in isolation.
    ///
    /// These patterns deliberately trade precision for coverage; categories
    /// whose shape is unbounded (`password`, `address`, `generic`) match any
    /// text and are therefore unsuitable for auto-detection.
    pub fn default_pattern(&self) -> &'static str {
        match self {
            DataType::NationalId => r"\d{11}|\d{3}\.\d{3}\.\d{3}-\d{2}",
            DataType::TaxId => r"\d{14}|\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}",
            DataType::IdCard => r"\d{7,9}",
            DataType::Email => r"[\w.-]+@[\w.-]+\.\w+",
            DataType::Phone => r"\(?\d{2}\)?\s?\d{4,5}-?\d{4}",
            DataType::CardNumber => r"\d{4}[\s-]?\d{4}[\s-]?\d{4}[\s-]?\d{4}",
            DataType::IpAddress => r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}",
            DataType::Password => r".*",
            DataType::Name => r"[A-Za-zÀ-ÿ\s]+",
            DataType::Address => r".*",
            DataType::Currency => r"\d+[,.]?\d*",
            DataType::BankAccount => r"\d{5,12}",
            DataType::BankBranch => r"\d{4,6}",
            DataType::Generic => r".*",
        }
    }

    /// Looks a category up by its configuration key, case-insensitively.
    /// Unknown or blank keys resolve to [`DataType::Generic`].
    pub fn from_key(key: &str) -> DataType {
        let key = key.trim();
        if key.is_empty() {
            return DataType::Generic;
        }
        ALL_TYPES
            .iter()
            .copied()
            .find(|t| t.key().eq_ignore_ascii_case(key))
            .unwrap_or(DataType::Generic)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Every category, in declaration order.
pub const ALL_TYPES: [DataType; 14] = [
    DataType::NationalId,
    DataType::TaxId,
    DataType::IdCard,
    DataType::Email,
    DataType::Phone,
    DataType::CardNumber,
    DataType::IpAddress,
    DataType::Password,
    DataType::Name,
    DataType::Address,
    DataType::Currency,
    DataType::BankAccount,
    DataType::BankBranch,
    DataType::Generic,
];
