// logveil-core/src/formatters.rs
//! Formatter trait and the built-in format-preserving formatters.
//!
//! A formatter produces a partial mask that keeps the recognizable structure
//! of a specific data category (document punctuation, e-mail shape, card
//! grouping), unlike an obfuscator which is format-blind. Formatters degrade
//! to a plain mask run when handed a value that does not fit their category.
//!
//! License: MIT OR Apache-2.0

use crate::data_type::DataType;
use crate::obfuscators::mask_run;

/// A pluggable transform producing a format-preserving partial mask for a
/// specific data category or registered name.
pub trait Formatter: Send + Sync {
    /// Formats and masks the given value. Total: invalid input yields a
    /// plain mask run, never the raw value.
    fn format(&self, value: &str) -> String;

    /// The data category this formatter supports.
    fn data_type(&self) -> DataType {
        DataType::Generic
    }

    /// Identifier under which this formatter is registered by name.
    fn name(&self) -> &str;

    /// Whether the value fits this formatter's category.
    fn is_valid(&self, value: &str) -> bool {
        !value.trim().is_empty()
    }
}

/// Adapts a plain function into a [`Formatter`], for custom registrations.
pub struct FnFormatter<F> {
    name: String,
    data_type: DataType,
    func: F,
}

impl<F> FnFormatter<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    pub fn new(name: impl Into<String>, data_type: DataType, func: F) -> Self {
        Self { name: name.into(), data_type, func }
    }
}

impl<F> Formatter for FnFormatter<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn format(&self, value: &str) -> String {
        (self.func)(value)
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Masks an 11-digit national identification number, keeping the middle six
/// digits visible: `12345678909` becomes `***456789**`.
#[derive(Debug, Clone)]
pub struct NationalIdFormatter {
    mask_char: char,
    /// Emit the punctuated form `***.456.789-**` instead of the plain run.
    punctuated: bool,
}

impl NationalIdFormatter {
    pub fn new(mask_char: char, punctuated: bool) -> Self {
        Self { mask_char, punctuated }
    }
}

impl Default for NationalIdFormatter {
    fn default() -> Self {
        Self::new('*', false)
    }
}

impl Formatter for NationalIdFormatter {
    fn format(&self, value: &str) -> String {
        let clean = digits(value);
        if clean.len() != 11 {
            return mask_run(self.mask_char, 3);
        }
        let m = self.mask_char;
        if self.punctuated {
            format!("{m}{m}{m}.{}.{}-{m}{m}", &clean[3..6], &clean[6..9])
        } else {
            format!("{}{}{}", mask_run(m, 3), &clean[3..9], mask_run(m, 2))
        }
    }

    fn data_type(&self) -> DataType {
        DataType::NationalId
    }

    fn name(&self) -> &str {
        "nationalIdFormatter"
    }

    fn is_valid(&self, value: &str) -> bool {
        digits(value).len() == 11
    }
}

/// Masks a 14-digit company tax identification number:
/// `12345678000190` becomes `**345678****90`.
#[derive(Debug, Clone)]
pub struct TaxIdFormatter {
    mask_char: char,
    punctuated: bool,
}

impl TaxIdFormatter {
    pub fn new(mask_char: char, punctuated: bool) -> Self {
        Self { mask_char, punctuated }
    }
}

impl Default for TaxIdFormatter {
    fn default() -> Self {
        Self::new('*', false)
    }
}

impl Formatter for TaxIdFormatter {
    fn format(&self, value: &str) -> String {
        let clean = digits(value);
        if clean.len() != 14 {
            return mask_run(self.mask_char, 3);
        }
        let m = self.mask_char;
        if self.punctuated {
            format!("{m}{m}.{}.{}/{m}{m}{m}{m}-{}", &clean[2..5], &clean[5..8], &clean[12..14])
        } else {
            format!("{}{}{}{}", mask_run(m, 2), &clean[2..8], mask_run(m, 4), &clean[12..14])
        }
    }

    fn data_type(&self) -> DataType {
        DataType::TaxId
    }

    fn name(&self) -> &str {
        "taxIdFormatter"
    }

    fn is_valid(&self, value: &str) -> bool {
        digits(value).len() == 14
    }
}

/// Masks an e-mail address, keeping the first characters of the user and
/// domain plus the extension: `usuario@dominio.com` becomes
/// `us***@dom***.com`.
#[derive(Debug, Clone)]
pub struct EmailFormatter {
    visible_user: usize,
    visible_domain: usize,
    mask_char: char,
}

impl EmailFormatter {
    pub fn new(visible_user: usize, visible_domain: usize, mask_char: char) -> Self {
        Self {
            visible_user: visible_user.max(1),
            visible_domain: visible_domain.max(1),
            mask_char,
        }
    }
}

impl Default for EmailFormatter {
    fn default() -> Self {
        Self::new(2, 3, '*')
    }
}

impl Formatter for EmailFormatter {
    fn format(&self, value: &str) -> String {
        let Some(at) = value.find('@') else {
            return mask_run(self.mask_char, 3);
        };
        if at == 0 || at == value.len() - 1 {
            return mask_run(self.mask_char, 3);
        }
        let user = &value[..at];
        let domain = &value[at + 1..];

        let mut out = String::new();
        let user_chars: Vec<char> = user.chars().collect();
        if user_chars.len() <= self.visible_user {
            out.push_str(&mask_run(self.mask_char, user_chars.len()));
        } else {
            out.extend(&user_chars[..self.visible_user]);
            out.push_str(&mask_run(self.mask_char, 3));
        }
        out.push('@');

        // Mask the domain name, keep the extension.
        match domain.rfind('.') {
            Some(dot) if dot > 0 => {
                let name_chars: Vec<char> = domain[..dot].chars().collect();
                if name_chars.len() <= self.visible_domain {
                    out.push_str(&mask_run(self.mask_char, name_chars.len()));
                } else {
                    out.extend(&name_chars[..self.visible_domain]);
                    out.push_str(&mask_run(self.mask_char, 3));
                }
                out.push_str(&domain[dot..]);
            }
            _ => out.push_str(&mask_run(self.mask_char, 3)),
        }
        out
    }

    fn data_type(&self) -> DataType {
        DataType::Email
    }

    fn name(&self) -> &str {
        "emailFormatter"
    }

    fn is_valid(&self, value: &str) -> bool {
        matches!(value.find('@'), Some(at) if at > 0 && at < value.len() - 1)
    }
}

/// Masks a telephone number, keeping the area code and the trailing digits
/// visible: `11987654321` becomes `(11) *****-4321`.
#[derive(Debug, Clone)]
pub struct PhoneFormatter {
    visible_end: usize,
    show_area_code: bool,
    mask_char: char,
}

impl PhoneFormatter {
    pub fn new(visible_end: usize, show_area_code: bool, mask_char: char) -> Self {
        Self { visible_end, show_area_code, mask_char }
    }
}

impl Default for PhoneFormatter {
    fn default() -> Self {
        Self::new(4, true, '*')
    }
}

impl Formatter for PhoneFormatter {
    fn format(&self, value: &str) -> String {
        let clean = digits(value);
        if !(10..=11).contains(&clean.len()) {
            return mask_run(self.mask_char, 3);
        }

        let mut out = String::new();
        if self.show_area_code {
            out.push('(');
            out.push_str(&clean[..2]);
            out.push_str(") ");
        } else {
            out.push('(');
            out.push_str(&mask_run(self.mask_char, 2));
            out.push_str(") ");
        }

        let number = &clean[2..];
        let mask_len = number.len().saturating_sub(self.visible_end);
        out.push_str(&mask_run(self.mask_char, mask_len));
        if self.visible_end > 0 && number.len() > mask_len {
            out.push('-');
            out.push_str(&number[mask_len..]);
        }
        out
    }

    fn data_type(&self) -> DataType {
        DataType::Phone
    }

    fn name(&self) -> &str {
        "phoneFormatter"
    }

    fn is_valid(&self, value: &str) -> bool {
        (10..=11).contains(&digits(value).len())
    }
}

/// Masks a payment card number keeping only the trailing digits, per the
/// usual acquirer display rule: `4111111111111111` becomes
/// `************1111`.
#[derive(Debug, Clone)]
pub struct CardFormatter {
    visible_end: usize,
    mask_char: char,
    /// Emit the grouped form `****-****-****-1111` for 16-digit numbers.
    grouped: bool,
}

impl CardFormatter {
    pub fn new(visible_end: usize, mask_char: char, grouped: bool) -> Self {
        Self { visible_end: visible_end.min(4), mask_char, grouped }
    }
}

impl Default for CardFormatter {
    fn default() -> Self {
        Self::new(4, '*', false)
    }
}

impl Formatter for CardFormatter {
    fn format(&self, value: &str) -> String {
        let clean = digits(value);
        if !(13..=19).contains(&clean.len()) {
            return mask_run(self.mask_char, 4);
        }

        let mask_len = clean.len() - self.visible_end;
        let visible = &clean[mask_len..];
        if self.grouped && clean.len() == 16 {
            let g = mask_run(self.mask_char, 4);
            return format!("{g}-{g}-{g}-{visible}");
        }
        format!("{}{}", mask_run(self.mask_char, mask_len), visible)
    }

    fn data_type(&self) -> DataType {
        DataType::CardNumber
    }

    fn name(&self) -> &str {
        "cardFormatter"
    }

    fn is_valid(&self, value: &str) -> bool {
        (13..=19).contains(&digits(value).len())
    }
}

/// Masks a personal name word by word, keeping initials visible:
/// `JOSE DA SILVA` becomes `J*** D* S****`.
#[derive(Debug, Clone)]
pub struct NameFormatter {
    visible_per_word: usize,
    mask_char: char,
    preserve_initials: bool,
}

impl NameFormatter {
    pub fn new(visible_per_word: usize, mask_char: char, preserve_initials: bool) -> Self {
        Self { visible_per_word, mask_char, preserve_initials }
    }
}

impl Default for NameFormatter {
    fn default() -> Self {
        Self::new(1, '*', true)
    }
}

impl Formatter for NameFormatter {
    fn format(&self, value: &str) -> String {
        if !self.is_valid(value) {
            return mask_run(self.mask_char, 3);
        }

        value
            .split_whitespace()
            .map(|word| {
                let chars: Vec<char> = word.chars().collect();
                let visible = if self.preserve_initials {
                    1
                } else {
                    self.visible_per_word.min(chars.len())
                };
                let mut w: String = chars[..visible.min(chars.len())].iter().collect();
                if chars.len() > visible {
                    w.push_str(&mask_run(self.mask_char, chars.len() - visible));
                }
                w
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn data_type(&self) -> DataType {
        DataType::Name
    }

    fn name(&self) -> &str {
        "nameFormatter"
    }
}

/// Masks a monetary amount. By default both the integer digits and the
/// decimals are hidden; the magnitude (leading digit) and the decimals can
/// each be kept visible.
#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    show_magnitude: bool,
    show_decimals: bool,
    mask_char: char,
}

impl CurrencyFormatter {
    pub fn new(show_magnitude: bool, show_decimals: bool, mask_char: char) -> Self {
        Self { show_magnitude, show_decimals, mask_char }
    }
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new(false, false, '*')
    }
}

impl Formatter for CurrencyFormatter {
    fn format(&self, value: &str) -> String {
        if !self.is_valid(value) {
            return mask_run(self.mask_char, 3);
        }

        let normalized = value.replace(',', ".");
        let (integer_part, decimal_part) = match normalized.rfind('.') {
            Some(dot) if dot > 0 => (&normalized[..dot], &normalized[dot..]),
            _ => (normalized.as_str(), ""),
        };
        let clean_integer = digits(integer_part);

        let mut out = String::new();
        if self.show_magnitude && !clean_integer.is_empty() {
            out.push_str(&clean_integer[..1]);
            out.push_str(&mask_run(self.mask_char, clean_integer.len() - 1));
        } else {
            out.push_str(&mask_run(self.mask_char, clean_integer.len().max(1)));
        }

        if !decimal_part.is_empty() {
            if self.show_decimals {
                out.push_str(decimal_part);
            } else {
                out.push('.');
                out.push_str(&mask_run(self.mask_char, decimal_part.len() - 1));
            }
        }
        out
    }

    fn data_type(&self) -> DataType {
        DataType::Currency
    }

    fn name(&self) -> &str {
        "currencyFormatter"
    }

    fn is_valid(&self, value: &str) -> bool {
        value.chars().any(|c| c.is_ascii_digit())
    }
}

/// Combined identification-document formatter: recognizes both the 11-digit
/// and 14-digit document lengths after stripping punctuation and emits a
/// punctuation-preserving mask. Unrecognized lengths collapse to `***`.
#[derive(Debug, Clone, Default)]
pub struct DocumentFormatter;

impl Formatter for DocumentFormatter {
    fn format(&self, value: &str) -> String {
        if value.trim().is_empty() {
            return "***".to_string();
        }

        // Strip punctuation only; letters survive so alphanumeric tax ids
        // keep their length.
        let clean: String = value.chars().filter(|c| !matches!(c, '.' | '-' | '/')).collect();

        match clean.len() {
            11 => format!("{}.***.***-{}", &clean[..3], &clean[9..11]),
            14 => format!("{}.***.***/***/{}", &clean[..2], &clean[12..14]),
            _ => "***".to_string(),
        }
    }

    fn name(&self) -> &str {
        "documentFormatter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn national_id_keeps_middle_digits() {
        let f = NationalIdFormatter::default();
        assert_eq!(f.format("12345678909"), "***456789**");
        assert_eq!(f.format("123.456.789-09"), "***456789**");
    }

    #[test]
    fn national_id_rejects_wrong_length() {
        let f = NationalIdFormatter::default();
        assert_eq!(f.format("123"), "***");
        assert_eq!(f.format(""), "***");
    }

    #[test]
    fn national_id_punctuated_form() {
        let f = NationalIdFormatter::new('*', true);
        assert_eq!(f.format("12345678909"), "***.456.789-**");
    }

    #[test]
    fn tax_id_masks_prefix_and_suffix() {
        let f = TaxIdFormatter::default();
        assert_eq!(f.format("12345678000190"), "**345678****90");
        assert_eq!(f.format("12.345.678/0001-90"), "**345678****90");
        assert_eq!(f.data_type(), DataType::TaxId);
    }

    #[test]
    fn email_keeps_user_prefix_and_extension() {
        let f = EmailFormatter::default();
        assert_eq!(f.format("usuario@dominio.com"), "us***@dom***.com");
    }

    #[test]
    fn email_short_user_fully_masked() {
        let f = EmailFormatter::default();
        assert_eq!(f.format("ab@dominio.com"), "**@dom***.com");
    }

    #[test]
    fn email_invalid_degrades_to_mask() {
        let f = EmailFormatter::default();
        assert_eq!(f.format("invalid-email"), "***");
    }

    #[test]
    fn phone_keeps_area_code_and_tail() {
        let f = PhoneFormatter::default();
        assert_eq!(f.format("11987654321"), "(11) *****-4321");
        assert_eq!(f.format("1133334444"), "(11) ****-4444");
        assert_eq!(f.format("(11) 98765-4321"), "(11) *****-4321");
    }

    #[test]
    fn phone_hidden_area_code() {
        let f = PhoneFormatter::new(4, false, '*');
        assert_eq!(f.format("11987654321"), "(**) *****-4321");
    }

    #[test]
    fn phone_invalid_degrades_to_mask() {
        let f = PhoneFormatter::default();
        assert_eq!(f.format("123"), "***");
    }

    #[test]
    fn card_keeps_last_four() {
        let f = CardFormatter::default();
        assert_eq!(f.format("4111111111111111"), "************1111");
        assert_eq!(f.format("4111-1111-1111-1111"), "************1111");
    }

    #[test]
    fn card_grouped_form() {
        let f = CardFormatter::new(4, '*', true);
        assert_eq!(f.format("4111111111111111"), "****-****-****-1111");
    }

    #[test]
    fn card_invalid_degrades_to_mask() {
        let f = CardFormatter::default();
        assert_eq!(f.format("1234"), "****");
    }

    #[test]
    fn name_keeps_initials() {
        let f = NameFormatter::default();
        assert_eq!(f.format("JOSE DA SILVA"), "J*** D* S****");
        assert_eq!(f.format("Ana"), "A**");
    }

    #[test]
    fn currency_masks_integer_and_decimals() {
        let f = CurrencyFormatter::default();
        assert_eq!(f.format("56789.98"), "*****.**");
        assert_eq!(f.format("1000"), "****");
    }

    #[test]
    fn currency_magnitude_and_decimals_visible() {
        let f = CurrencyFormatter::new(true, true, '*');
        assert_eq!(f.format("56789.98"), "5****.98");
        assert_eq!(f.format("56789,98"), "5****.98");
    }

    #[test]
    fn document_recognizes_both_lengths() {
        let f = DocumentFormatter;
        assert_eq!(f.format("234.567.890-20"), "234.***.***-20");
        assert_eq!(f.format("12345678000190"), "12.***.***/***/90");
        assert_eq!(f.format("123"), "***");
    }

    #[test]
    fn fn_formatter_adapts_closures() {
        let f = FnFormatter::new("customDoc", DataType::NationalId, |v: &str| {
            format!("***{}**", &v[3..9])
        });
        assert_eq!(f.format("12345678909"), "***456789**");
        assert_eq!(f.name(), "customDoc");
        assert_eq!(f.data_type(), DataType::NationalId);
    }
}
