//! Core type definitions for huddle

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = crate::HuddleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(PostId)
            .map_err(|_| crate::HuddleError::Validation(format!("Invalid post ID: {}", s)))
    }
}

/// Unique identifier for a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CommentId(pub i64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category tag attached to every post
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flair {
    TradeHelp,
    WaiverWire,
    InjuryTalk,
    Other,
}

impl Flair {
    /// All known flairs in display order
    pub const ALL: [Flair; 4] = [
        Flair::TradeHelp,
        Flair::WaiverWire,
        Flair::InjuryTalk,
        Flair::Other,
    ];

    /// Stored/wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Flair::TradeHelp => "TRADE_HELP",
            Flair::WaiverWire => "WAIVER_WIRE",
            Flair::InjuryTalk => "INJURY_TALK",
            Flair::Other => "OTHER",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Flair::TradeHelp => "TRADE HELP",
            Flair::WaiverWire => "WAIVER WIRE ADVICE",
            Flair::InjuryTalk => "INJURY TALK",
            Flair::Other => "OTHER",
        }
    }

    /// Lenient parse for values already in storage.
    ///
    /// Anything outside the known set falls into `Other`, so per-flair counts
    /// always add up to the total.
    pub fn from_stored(s: &str) -> Self {
        match s.parse() {
            Ok(flair) => flair,
            Err(_) => {
                tracing::warn!("Unknown stored flair {:?}, treating as OTHER", s);
                Flair::Other
            }
        }
    }
}

impl Default for Flair {
    fn default() -> Self {
        Flair::Other
    }
}

impl fmt::Display for Flair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flair {
    type Err = crate::HuddleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Flair::ALL
            .iter()
            .copied()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::HuddleError::Validation(format!("Unknown flair: {}", s)))
    }
}

/// Flair constraint taken from a read query
///
/// Names must match the stored form exactly. A name outside the known set
/// is not an error; it simply matches no posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlairQuery {
    /// No flair given, or an empty one
    Any,
    /// A known flair
    Only(Flair),
    /// A name no post can carry
    Unknown,
}

impl FlairQuery {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => FlairQuery::Any,
            Some(name) => Flair::ALL
                .iter()
                .copied()
                .find(|f| f.as_str() == name)
                .map_or(FlairQuery::Unknown, FlairQuery::Only),
        }
    }
}

impl Serialize for Flair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Flair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Flair::from_stored(&raw))
    }
}

/// RFC 3339 timestamps in UTC with a `Z` suffix
pub mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }
}

/// Schema version for on-disk data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
}

impl SchemaVersion {
    pub const V1_0: Self = Self { major: 1, minor: 0 };

    /// Check if this version is compatible with another version
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.major == other.major
    }

    /// Parse a "major.minor" string
    pub fn parse(s: &str) -> Option<Self> {
        let (major, minor) = s.split_once('.')?;
        Some(Self {
            major: major.parse().ok()?,
            minor: minor.parse().ok()?,
        })
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::V1_0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flair_parse() {
        assert_eq!("TRADE_HELP".parse::<Flair>().unwrap(), Flair::TradeHelp);
        assert_eq!("waiver_wire".parse::<Flair>().unwrap(), Flair::WaiverWire);
        assert!("MEMES".parse::<Flair>().is_err());
    }

    #[test]
    fn test_flair_query_is_exact() {
        assert_eq!(FlairQuery::parse(None), FlairQuery::Any);
        assert_eq!(FlairQuery::parse(Some("")), FlairQuery::Any);
        assert_eq!(
            FlairQuery::parse(Some("INJURY_TALK")),
            FlairQuery::Only(Flair::InjuryTalk)
        );
        assert_eq!(FlairQuery::parse(Some("injury_talk")), FlairQuery::Unknown);
        assert_eq!(FlairQuery::parse(Some(" OTHER")), FlairQuery::Unknown);
        assert_eq!(FlairQuery::parse(Some("MEMES")), FlairQuery::Unknown);
    }

    #[test]
    fn test_flair_serialization() {
        let json = serde_json::to_string(&Flair::InjuryTalk).unwrap();
        assert_eq!(json, "\"INJURY_TALK\"");

        let flair: Flair = serde_json::from_str("\"INJURY_TALK\"").unwrap();
        assert_eq!(flair, Flair::InjuryTalk);
    }

    #[test]
    fn test_unknown_stored_flair_is_other() {
        let flair: Flair = serde_json::from_str("\"DYNASTY\"").unwrap();
        assert_eq!(flair, Flair::Other);
    }

    #[test]
    fn test_flair_labels() {
        assert_eq!(Flair::WaiverWire.label(), "WAIVER WIRE ADVICE");
        assert_eq!(Flair::Other.label(), "OTHER");
    }

    #[test]
    fn test_ids_serialize_as_numbers() {
        assert_eq!(serde_json::to_string(&PostId(3)).unwrap(), "3");
        assert_eq!(" 12 ".parse::<PostId>().unwrap(), PostId(12));
        assert!("abc".parse::<PostId>().is_err());
    }

    #[test]
    fn test_schema_version_compatibility() {
        let v1_0 = SchemaVersion::V1_0;
        let v1_1 = SchemaVersion::parse("1.1").unwrap();
        let v2_0 = SchemaVersion::parse("2.0").unwrap();

        assert!(v1_0.is_compatible(&v1_1));
        assert!(!v1_0.is_compatible(&v2_0));
        assert!(SchemaVersion::parse("one").is_none());
    }

    #[test]
    fn test_iso8601_uses_z_suffix() {
        use chrono::TimeZone;

        #[derive(Serialize, Deserialize)]
        struct Stamp {
            #[serde(with = "iso8601")]
            at: chrono::DateTime<chrono::Utc>,
        }

        let at = chrono::Utc.with_ymd_and_hms(2024, 9, 8, 17, 0, 0).unwrap();
        let json = serde_json::to_string(&Stamp { at }).unwrap();
        assert_eq!(json, r#"{"at":"2024-09-08T17:00:00Z"}"#);

        let back: Stamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back.at, at);
    }
}
