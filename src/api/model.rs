use std::fmt;

use serde::{Deserialize, Deserializer};

/// Which of the two search endpoints an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Part,
    Element,
}

impl SearchKind {
    pub fn path_segment(self) -> &'static str {
        match self {
            SearchKind::Part => "part",
            SearchKind::Element => "element",
        }
    }

    /// User-facing noun, as in "No part found".
    pub fn noun(self) -> &'static str {
        self.path_segment()
    }

    pub fn title(self) -> &'static str {
        match self {
            SearchKind::Part => "Part",
            SearchKind::Element => "Element",
        }
    }

    pub fn other(self) -> Self {
        match self {
            SearchKind::Part => SearchKind::Element,
            SearchKind::Element => SearchKind::Part,
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// A LEGO part design. Everything but `part_num` may be missing and the UI
/// degrades row by row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Part {
    pub part_num: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub part_img_url: Option<String>,
    #[serde(default, deserialize_with = "opt_id")]
    pub part_cat_id: Option<String>,
    #[serde(default)]
    pub part_material: Option<String>,
    #[serde(default)]
    pub year_from: Option<i32>,
    #[serde(default)]
    pub year_to: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElementColor {
    #[serde(deserialize_with = "id")]
    pub id: String,
    pub name: String,
    pub rgb: String,
}

/// A specific molded/colored instance of a part.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Element {
    #[serde(deserialize_with = "id")]
    pub id: String,
    pub part: Part,
    #[serde(default)]
    pub color: Option<ElementColor>,
    #[serde(default)]
    pub element_img_url: Option<String>,
}

/// Outcome of a successful search, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchHit {
    Part(Part),
    Element(Element),
}

impl SearchHit {
    pub fn kind(&self) -> SearchKind {
        match self {
            SearchHit::Part(_) => SearchKind::Part,
            SearchHit::Element(_) => SearchKind::Element,
        }
    }
}

/// The `{success, data, error}` wrapper every proxy response uses.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

// The upstream Rebrickable backend emits category and element/color ids as
// JSON numbers while the proxy contract types them as strings. Accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
        }
    }
}

fn id<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    RawId::deserialize(de).map(String::from)
}

fn opt_id<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(de)?.map(String::from))
}
