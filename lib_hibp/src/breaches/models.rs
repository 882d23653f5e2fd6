//! # Breach and Paste Models
//!
//! Typed mirrors of the JSON records the v2 API returns. Field names on the
//! wire are PascalCase and case-sensitive. Records are only ever produced by
//! decoding a response and are never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// How many data classes `Breach::short_data_classes` keeps.
pub const SHORT_DATA_CLASSES: usize = 3;

/// A disclosed security incident.
///
/// Only `Name` is required. With `truncateResponse=true` the service sends
/// nothing else, so every other field falls back to its empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Breach {
    /// Unique identifier, used for `breach/{name}` lookups. Never empty.
    #[serde(deserialize_with = "non_empty_string")]
    pub name: String,
    /// Display title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Primary domain of the breached service; may be empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    /// Calendar date of the incident, as sent (e.g. `2013-10-04`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub breach_date: String,
    /// When the breach was loaded into the service.
    #[serde(default)]
    pub added_date: Option<DateTime<Utc>>,
    /// Last time the record was changed.
    #[serde(default)]
    pub modified_date: Option<DateTime<Utc>>,
    /// Number of compromised records.
    #[serde(default, deserialize_with = "null_as_default")]
    pub pwn_count: u64,
    /// Free-text overview, may contain HTML.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// URL of the service logo.
    #[serde(default, deserialize_with = "null_as_default")]
    pub logo_path: String,
    /// Compromised data categories, in server order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_classes: Vec<String>,
    /// The breach has been confirmed as legitimate.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_verified: bool,
    /// The data is believed to be fabricated.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_fabricated: bool,
    /// Hidden from public account searches.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_sensitive: bool,
    /// Permanently removed from the service.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_retired: bool,
    /// Sourced from a spam list rather than a breach.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_spam_list: bool,
}

impl Breach {
    /// The first few data classes, for one-line summaries.
    pub fn short_data_classes(&self) -> &[String] {
        let end = self.data_classes.len().min(SHORT_DATA_CLASSES);
        &self.data_classes[..end]
    }

    /// True when the response was truncated and only `Name` came back.
    pub fn is_truncated(&self) -> bool {
        self.title.is_empty() && self.added_date.is_none() && self.data_classes.is_empty()
    }
}

impl Display for Breach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_truncated() {
            return write!(f, "{}", self.name);
        }
        write!(
            f,
            "{} ({}) {} accounts, breached {}",
            self.name, self.domain, self.pwn_count, self.breach_date
        )?;
        if !self.data_classes.is_empty() {
            write!(f, ": {}", self.short_data_classes().join(", "))?;
            if self.data_classes.len() > SHORT_DATA_CLASSES {
                write!(f, ", ...")?;
            }
        }
        Ok(())
    }
}

/// An appearance of an email address in a public paste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Paste {
    /// Paste service the record came from (e.g. `Pastebin`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    /// Identifier of the paste at its source.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// The service sends `null` for untitled pastes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Publication date as sent; may be empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    /// Number of email addresses found in the paste.
    #[serde(default, deserialize_with = "null_as_default")]
    pub email_count: u64,
}

impl Display for Paste {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.source, self.id)?;
        if !self.title.is_empty() {
            write!(f, " \"{}\"", self.title)?;
        }
        if !self.date.is_empty() {
            write!(f, " on {}", self.date)?;
        }
        write!(f, " with {} emails", self.email_count)
    }
}

/// Category names of compromised data, e.g. `Email addresses`.
pub type DataClasses = Vec<String>;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.trim().is_empty() {
        return Err(serde::de::Error::custom("breach Name must not be empty"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ADOBE: &str = r#"{
        "Name": "Adobe",
        "Title": "Adobe",
        "Domain": "adobe.com",
        "BreachDate": "2013-10-04",
        "AddedDate": "2013-12-04T00:00:00Z",
        "ModifiedDate": "2022-05-15T23:52:49Z",
        "PwnCount": 152445165,
        "Description": "In October 2013, 153 million Adobe accounts were breached.",
        "LogoPath": "https://haveibeenpwned.com/Content/Images/PwnedLogos/Adobe.png",
        "DataClasses": ["Email addresses", "Password hints", "Passwords", "Usernames"],
        "IsVerified": true,
        "IsFabricated": false,
        "IsSensitive": false,
        "IsRetired": false,
        "IsSpamList": false
    }"#;

    #[test]
    fn full_breach_decodes_every_field() {
        let breach: Breach = serde_json::from_str(ADOBE).unwrap();
        assert_eq!(breach.name, "Adobe");
        assert_eq!(breach.title, "Adobe");
        assert_eq!(breach.domain, "adobe.com");
        assert_eq!(breach.breach_date, "2013-10-04");
        assert_eq!(
            breach.added_date.unwrap().to_rfc3339(),
            "2013-12-04T00:00:00+00:00"
        );
        assert_eq!(breach.pwn_count, 152445165);
        assert_eq!(
            breach.data_classes,
            vec!["Email addresses", "Password hints", "Passwords", "Usernames"]
        );
        assert!(breach.is_verified);
        assert!(!breach.is_sensitive);
        assert!(!breach.is_retired);
        assert!(!breach.is_truncated());
    }

    #[test]
    fn truncated_breach_only_needs_name() {
        let breach: Breach = serde_json::from_str(r#"{"Name":"Adobe"}"#).unwrap();
        assert_eq!(breach.name, "Adobe");
        assert_eq!(breach.pwn_count, 0);
        assert!(breach.data_classes.is_empty());
        assert!(breach.is_truncated());
        assert_eq!(breach.to_string(), "Adobe");
    }

    #[test]
    fn empty_or_missing_name_is_rejected() {
        assert!(serde_json::from_str::<Breach>(r#"{"Name":""}"#).is_err());
        assert!(serde_json::from_str::<Breach>(r#"{"Title":"Adobe"}"#).is_err());
    }

    #[test]
    fn null_fields_fall_back_to_empty() {
        let breach: Breach =
            serde_json::from_str(r#"{"Name":"X","Domain":null,"DataClasses":null}"#).unwrap();
        assert_eq!(breach.domain, "");
        assert!(breach.data_classes.is_empty());
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(serde_json::from_str::<Breach>(r#"{"Name":"X","PwnCount":"many"}"#).is_err());
    }

    #[test]
    fn summary_lists_short_data_classes() {
        let breach: Breach = serde_json::from_str(ADOBE).unwrap();
        assert_eq!(
            breach.to_string(),
            "Adobe (adobe.com) 152445165 accounts, breached 2013-10-04: Email addresses, Password hints, Passwords, ..."
        );
        assert_eq!(breach.short_data_classes().len(), SHORT_DATA_CLASSES);
    }

    #[test]
    fn paste_with_null_title() {
        let paste: Paste = serde_json::from_str(
            r#"{"Source":"Pastebin","Id":"8Q0BvKD8","Title":null,"Date":"2014-03-04T19:14:54Z","EmailCount":139}"#,
        )
        .unwrap();
        assert_eq!(paste.source, "Pastebin");
        assert_eq!(paste.id, "8Q0BvKD8");
        assert_eq!(paste.title, "");
        assert_eq!(paste.email_count, 139);
        assert_eq!(
            paste.to_string(),
            "Pastebin/8Q0BvKD8 on 2014-03-04T19:14:54Z with 139 emails"
        );
    }
}
