//! Field-level input validation shared by the auth, profile and achievement inputs.
//!
//! Inputs are deserialized permissively (every field optional) and then checked
//! here, so a single response can report every problem with a payload at once.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

pub const REQUIRED: &str = "This field is required.";
pub const BAD_DATE: &str = "Date has wrong format. Use YYYY-MM-DD.";
pub const BAD_URL: &str = "Enter a valid URL.";
pub const BAD_EMAIL: &str = "Enter a valid email address.";

/// Deserializer for nullable fields in partial updates: an absent field stays
/// `None`, an explicit `null` becomes `Some(None)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Map from field name to the messages describing what is wrong with it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for a single error.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }

    /// Required, non-blank text no longer than `max` characters. Surrounding
    /// whitespace is stripped.
    pub fn required_text(&mut self, field: &str, value: Option<String>, max: usize) -> String {
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => {
                self.check_len(field, v, max);
                v.to_string()
            }
            _ => {
                self.add(field, REQUIRED);
                String::new()
            }
        }
    }

    /// Optional text; missing becomes the empty string.
    pub fn optional_text(&mut self, field: &str, value: Option<String>, max: usize) -> String {
        let v = value.as_deref().map_or("", str::trim).to_string();
        self.check_len(field, &v, max);
        v
    }

    /// Required text with no length limit.
    pub fn required_body(&mut self, field: &str, value: Option<String>) -> String {
        self.required_text(field, value, usize::MAX)
    }

    pub fn required_date(&mut self, field: &str, value: Option<String>) -> NaiveDate {
        match value.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => self.parse_date(field, raw),
            _ => {
                self.add(field, REQUIRED);
                NaiveDate::MIN
            }
        }
    }

    pub fn optional_date(&mut self, field: &str, value: Option<String>) -> Option<NaiveDate> {
        match value.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(self.parse_date(field, raw)),
            _ => None,
        }
    }

    /// Optional absolute http(s) URL; missing becomes the empty string.
    pub fn optional_url(&mut self, field: &str, value: Option<String>, max: usize) -> String {
        let v = value.as_deref().map_or("", str::trim).to_string();
        if v.is_empty() {
            return v;
        }
        if !is_valid_url(&v) {
            self.add(field, BAD_URL);
        }
        self.check_len(field, &v, max);
        v
    }

    fn parse_date(&mut self, field: &str, raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap_or_else(|_| {
            self.add(field, BAD_DATE);
            NaiveDate::MIN
        })
    }

    fn check_len(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(
                field,
                format!("Ensure this field has no more than {max} characters."),
            );
        }
    }
}

fn is_valid_url(raw: &str) -> bool {
    match url::Url::parse(raw) {
        Ok(u) => matches!(u.scheme(), "http" | "https") && u.host_str().is_some(),
        Err(_) => false,
    }
}

/// Loose structural email check: one `@`, non-empty local part, dotted domain.
pub fn is_valid_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !raw.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_missing_and_blank() {
        let mut errors = FieldErrors::new();
        errors.required_text("company", None, 200);
        errors.required_text("role", Some("   ".to_string()), 200);
        assert_eq!(errors.get("company"), Some(&[REQUIRED.to_string()][..]));
        assert_eq!(errors.get("role"), Some(&[REQUIRED.to_string()][..]));
    }

    #[test]
    fn test_text_is_trimmed() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.required_text("company", Some(" Acme ".to_string()), 200), "Acme");
        assert_eq!(errors.optional_text("location", Some("\tPune\n".to_string()), 100), "Pune");
        assert_eq!(
            errors.optional_url("github", Some(" https://github.com/ada ".to_string()), 200),
            "https://github.com/ada"
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_max_length_counts_characters() {
        let mut errors = FieldErrors::new();
        // 15 multi-byte characters fit in a 15-character limit.
        errors.required_text("phone", Some("é".repeat(15)), 15);
        assert!(errors.is_empty());
        errors.required_text("phone", Some("1".repeat(16)), 15);
        assert_eq!(
            errors.get("phone").unwrap()[0],
            "Ensure this field has no more than 15 characters."
        );
    }

    #[test]
    fn test_dates() {
        let mut errors = FieldErrors::new();
        let d = errors.required_date("start_date", Some("2024-03-01".to_string()));
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(errors.optional_date("end_date", Some(String::new())), None);
        assert!(errors.is_empty());

        errors.required_date("start_date", Some("03/01/2024".to_string()));
        assert_eq!(errors.get("start_date"), Some(&[BAD_DATE.to_string()][..]));
    }

    #[test]
    fn test_urls() {
        let mut errors = FieldErrors::new();
        errors.optional_url("github", Some("https://github.com/me".to_string()), 200);
        errors.optional_url("live_link", None, 200);
        assert!(errors.is_empty());

        errors.optional_url("linkedin", Some("linkedin.com/in/me".to_string()), 200);
        errors.optional_url("project_link", Some("ftp://files.example.com".to_string()), 200);
        assert_eq!(errors.get("linkedin"), Some(&[BAD_URL.to_string()][..]));
        assert_eq!(errors.get("project_link"), Some(&[BAD_URL.to_string()][..]));
    }

    #[test]
    fn test_emails() {
        assert!(is_valid_email("ada@example.com"));
        assert!(!is_valid_email("ada.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@localhost"));
        assert!(!is_valid_email("ada lovelace@example.com"));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let errors = FieldErrors::single("title", REQUIRED);
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "title": [REQUIRED] }));
    }
}
