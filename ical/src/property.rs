// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Property lookup inside a single VEVENT block.
//!
//! Only a fixed set of properties is recognized, see [`PropertyKey`]. A lookup
//! matches a content line of the form `KEY[;NAME=VALUE...]:value` where `KEY`
//! is compared case-sensitively.

use std::collections::BTreeMap;

use crate::keyword::{KW_DATE, KW_TZID, KW_VALUE};

/// Properties of a VEVENT that the feed reader looks at.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[expect(missing_docs)]
pub enum PropertyKey {
    #[strum(serialize = "UID")]
    Uid,
    #[strum(serialize = "SUMMARY")]
    Summary,
    #[strum(serialize = "LOCATION")]
    Location,
    #[strum(serialize = "URL")]
    Url,
    #[strum(serialize = "DTSTART")]
    DtStart,
    #[strum(serialize = "DTEND")]
    DtEnd,
    #[strum(serialize = "RRULE")]
    RRule,
    #[strum(serialize = "EXDATE")]
    ExDate,
    #[strum(serialize = "RDATE")]
    RDate,
}

impl PropertyKey {
    /// The property name as it appears on a content line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Whether the property may legitimately occur more than once in a block.
    #[must_use]
    pub const fn is_repeatable(self) -> bool {
        matches!(self, PropertyKey::ExDate | PropertyKey::RDate)
    }
}

/// Property parameters, keyed by uppercased parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Parses the `;`-separated parameter section of a content line (without
    /// the leading `;`).
    #[must_use]
    pub fn parse(section: &str) -> Self {
        let map = section
            .split(';')
            .filter(|p| !p.is_empty())
            .map(|p| match p.split_once('=') {
                Some((name, value)) => (name.to_uppercase(), unquote(value).to_string()),
                None => (p.to_uppercase(), String::new()),
            })
            .collect();
        Self(map)
    }

    /// Returns the raw value of a parameter, the name is matched case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_uppercase()).map(String::as_str)
    }

    /// The `TZID` parameter, if present.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.get(KW_TZID).filter(|tz| !tz.is_empty())
    }

    /// Whether the parameters declare `VALUE=DATE`.
    #[must_use]
    pub fn is_date_value(&self) -> bool {
        self.get(KW_VALUE) == Some(KW_DATE)
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Inserts a parameter, the name is uppercased.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_uppercase(), value.into());
    }
}

/// A property occurrence: its trimmed value and its parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProperty {
    /// The trimmed property value.
    pub value: String,
    /// The parameters of the content line.
    pub params: Params,
}

impl RawProperty {
    /// Creates a property without parameters.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            params: Params::default(),
        }
    }

    /// Adds a parameter, builder style.
    #[must_use]
    pub fn with_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Matches a single (unfolded) content line against `key`.
    #[must_use]
    pub fn from_line(line: &str, key: PropertyKey) -> Option<Self> {
        let rest = line.strip_prefix(key.as_str())?;
        let (params, value) = if let Some(rest) = rest.strip_prefix(';') {
            let (params, value) = rest.split_once(':')?;
            if params.is_empty() {
                return None;
            }
            (Params::parse(params), value)
        } else {
            (Params::default(), rest.strip_prefix(':')?)
        };

        if value.is_empty() {
            return None;
        }

        Some(Self {
            value: value.trim().to_string(),
            params,
        })
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
