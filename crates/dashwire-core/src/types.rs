// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common identifier, identity, and interval types.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::DashwireError;

/// Unique identifier of a widget within a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(pub String);

impl WidgetId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WidgetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The closed set of widget types the renderer knows how to draw.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum WidgetType {
    StatsCard,
    DataTable,
    Chart,
    SearchBox,
    ProductCard,
    List,
    Text,
    Custom,
}

/// Identity of the person viewing a dashboard, supplied by the session system.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewer {
    pub id: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Viewer {
    pub fn new(id: impl Into<String>, roles: &[&str]) -> Self {
        Self {
            id: id.into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Parse a refresh interval of the form `<integer><s|m|h>` into seconds.
///
/// `"30s"` is 30, `"5m"` is 300, `"1h"` is 3600. Anything else, including
/// zero-length intervals, is a [`DashwireError::Config`].
pub fn parse_interval(raw: &str) -> Result<u64, DashwireError> {
    let trimmed = raw.trim();
    let invalid = || {
        DashwireError::Config(format!(
            "invalid refresh interval `{raw}`: expected <integer><s|m|h>, e.g. `30s`"
        ))
    };

    let (digits, multiplier) = if let Some(d) = trimmed.strip_suffix('s') {
        (d, 1)
    } else if let Some(d) = trimmed.strip_suffix('m') {
        (d, 60)
    } else if let Some(d) = trimmed.strip_suffix('h') {
        (d, 3600)
    } else {
        return Err(invalid());
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let count: u64 = digits.parse().map_err(|_| invalid())?;
    if count == 0 {
        return Err(DashwireError::Config(format!(
            "invalid refresh interval `{raw}`: interval must be greater than zero"
        )));
    }

    count.checked_mul(multiplier).ok_or_else(invalid)
}

/// A validated refresh interval that keeps its original wire spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RefreshInterval {
    raw: String,
    secs: u64,
}

impl RefreshInterval {
    pub fn as_secs(&self) -> u64 {
        self.secs
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.secs)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for RefreshInterval {
    type Err = DashwireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let secs = parse_interval(s)?;
        Ok(Self {
            raw: s.trim().to_string(),
            secs,
        })
    }
}

impl TryFrom<String> for RefreshInterval {
    type Error = DashwireError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RefreshInterval> for String {
    fn from(value: RefreshInterval) -> Self {
        value.raw
    }
}

impl fmt::Display for RefreshInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
