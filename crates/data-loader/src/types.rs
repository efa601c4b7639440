//! Core domain types for attraction data.
//!
//! An [`Attraction`] is one record from either backend list. Only the fields
//! that filtering and marker placement depend on are typed; everything else
//! the backend sends is kept in [`Attraction::extra`] so the record can be
//! passed on untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier of an attraction, as used for the keys of the backend payloads.
pub type AttractionId = String;

// =============================================================================
// Ownership
// =============================================================================

/// Who runs an attraction.
///
/// The backend sends a two-valued tag. Anything else is kept as
/// [`Ownership::Unknown`] so the record still loads; it simply never matches
/// an ownership filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ownership {
    /// Owned by the organisation itself.
    EhProperty,
    /// A third-party attraction listed alongside the properties.
    AssocAttraction,
    /// Unrecognised tag, preserved verbatim.
    Unknown(String),
}

impl Ownership {
    /// The two tags the backend is expected to send.
    pub const KNOWN: [Ownership; 2] = [Ownership::EhProperty, Ownership::AssocAttraction];

    /// Wire form of the tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::EhProperty => "ehProperty",
            Self::AssocAttraction => "assocAttraction",
            Self::Unknown(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// True for the empty tag a record gets when it has no `ownership` field.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unknown(tag) if tag.is_empty())
    }
}

impl Default for Ownership {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<String> for Ownership {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "ehProperty" => Self::EhProperty,
            "assocAttraction" => Self::AssocAttraction,
            _ => Self::Unknown(tag),
        }
    }
}

impl From<Ownership> for String {
    fn from(ownership: Ownership) -> Self {
        match ownership {
            Ownership::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Categories
// =============================================================================

/// The fixed set of categories a user can filter by.
///
/// Each category has a stable identifier (used for filter keys and on the
/// command line) and a display label. Records list categories by label, so
/// matching always goes through [`Category::label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Abbey,
    Castle,
    Church,
    Garden,
    HistoricHouse,
    Industrial,
    Prehistoric,
    Roman,
    Fort,
    Monument,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 10] = [
        Category::Abbey,
        Category::Castle,
        Category::Church,
        Category::Garden,
        Category::HistoricHouse,
        Category::Industrial,
        Category::Prehistoric,
        Category::Roman,
        Category::Fort,
        Category::Monument,
    ];

    /// Identifier used as the filter key.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Abbey => "abbey",
            Self::Castle => "castle",
            Self::Church => "church",
            Self::Garden => "garden",
            Self::HistoricHouse => "historicHouse",
            Self::Industrial => "industrial",
            Self::Prehistoric => "prehistoric",
            Self::Roman => "roman",
            Self::Fort => "fort",
            Self::Monument => "monument",
        }
    }

    /// Label as it appears in an attraction's category list.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Abbey => "Abbey",
            Self::Castle => "Castle",
            Self::Church => "Church",
            Self::Garden => "Garden",
            Self::HistoricHouse => "Historic House",
            Self::Industrial => "Industrial",
            Self::Prehistoric => "Prehistoric",
            Self::Roman => "Roman",
            Self::Fort => "Fort",
            Self::Monument => "Monument",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts either the identifier or the label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(s) || c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

// =============================================================================
// Attraction
// =============================================================================

/// One attraction record as served by the backend.
///
/// Records are immutable once loaded; visibility is derived separately and
/// never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    /// Filled from the payload key when the record body has no id.
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: AttractionId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Ownership::is_unset")]
    pub ownership: Ownership,
    #[serde(default)]
    pub popular: bool,
    /// Category labels, e.g. `"Castle"`.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Any other display fields the backend sends.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attraction {
    /// Create a bare attraction; mostly useful for fixtures.
    pub fn new(id: impl Into<AttractionId>, name: impl Into<String>, ownership: Ownership) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: None,
            lat: None,
            lng: None,
            ownership,
            popular: false,
            categories: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_popular(mut self, popular: bool) -> Self {
        self.popular = popular;
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_position(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    /// True when `label` appears verbatim in the category list.
    pub fn has_category(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c == label)
    }

    /// `(lat, lng)` when both coordinates are present.
    pub fn position(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lng)
    }
}

/// Ids show up as strings or numbers depending on the backend.
fn deserialize_id<'de, D>(deserializer: D) -> Result<AttractionId, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "id must be a string or number, found {other}"
        ))),
    }
}
