//! The result-document model.
//!
//! One retrieved item from the hosted index. The schema is owned by the
//! external service: fields are deserialized leniently and never validated.

use serde::{Deserialize, Serialize};

/// One search result document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hit {
    /// Document title.
    pub title: String,

    /// Document description snippet.
    #[serde(default)]
    pub desc: String,

    /// Canonical URL of the document, used for navigation on click.
    pub permalink: String,

    /// Service-assigned document identifier, forwarded with analytics events.
    #[serde(rename = "objectID", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,

    /// Pre-highlighted field values supplied by the service for the current
    /// query, when available.
    #[serde(
        rename = "_highlightResult",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub highlight: Option<HitHighlight>,
}

/// Service-supplied highlighted values for a hit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HitHighlight {
    /// Highlighted title markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Highlighted description markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

/// The hit fields the rendering template draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitField {
    /// The `title` field.
    Title,
    /// The `desc` field.
    Desc,
}

impl Hit {
    /// Create a hit from the three template fields.
    pub fn new(
        title: impl Into<String>,
        desc: impl Into<String>,
        permalink: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            desc: desc.into(),
            permalink: permalink.into(),
            object_id: None,
            highlight: None,
        }
    }

    /// Raw value of a template field.
    pub fn field(&self, field: HitField) -> &str {
        match field {
            HitField::Title => &self.title,
            HitField::Desc => &self.desc,
        }
    }

    /// Service-supplied highlighted value of a field, if present.
    pub fn highlighted(&self, field: HitField) -> Option<&str> {
        let highlight = self.highlight.as_ref()?;
        match field {
            HitField::Title => highlight.title.as_deref(),
            HitField::Desc => highlight.desc.as_deref(),
        }
    }
}
