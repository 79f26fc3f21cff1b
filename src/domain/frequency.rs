// src/domain/frequency.rs

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// How often a chore repeats.
///
/// Values read back from storage never fail to load: anything outside the six
/// known names is kept as `Unrecognized` and treated as never overdue by the
/// due-date rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Biannually,
    Yearly,
    Unrecognized(String),
}

impl Frequency {
    pub const ALL: [Frequency; 6] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Biannually,
        Frequency::Yearly,
    ];

    /// Canonical interval in days. `None` for unrecognized values.
    pub fn interval_days(&self) -> Option<i64> {
        match self {
            Frequency::Daily => Some(1),
            Frequency::Weekly => Some(7),
            Frequency::Monthly => Some(30),
            Frequency::Quarterly => Some(91),
            Frequency::Biannually => Some(182),
            Frequency::Yearly => Some(365),
            Frequency::Unrecognized(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Biannually => "biannually",
            Frequency::Yearly => "yearly",
            Frequency::Unrecognized(raw) => raw,
        }
    }

    /// Lenient conversion used when loading rows.
    pub fn from_stored(raw: &str) -> Self {
        raw.parse()
            .unwrap_or_else(|_| Frequency::Unrecognized(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFrequency(pub String);

impl fmt::Display for UnknownFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known = Frequency::ALL;
        let expected: Vec<&str> = known.iter().map(Frequency::as_str).collect();
        write!(
            f,
            "unknown frequency '{}' (expected one of: {})",
            self.0,
            expected.join(", ")
        )
    }
}

impl std::error::Error for UnknownFrequency {}

/// Strict parse, for input coming from clients.
impl FromStr for Frequency {
    type Err = UnknownFrequency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "quarterly" => Ok(Frequency::Quarterly),
            "biannually" => Ok(Frequency::Biannually),
            "yearly" => Ok(Frequency::Yearly),
            _ => Err(UnknownFrequency(s.to_string())),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Frequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
