//! Embed Document Model
//!
//! Rich content attached to a message: a classic Discord embed plus the
//! optional v2 component container (sections, separators, thumbnails).
//! These are value types stored inside `messages.embed_data`; they have
//! no identity of their own.
//!
//! Defaults are named constants on the type owning the field, wired into
//! serde through the `default_*` functions. Optional fields reject an
//! explicit `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::SeparatorSpacing;
use crate::validation::{non_null, parse, Document, ValidationError};

/// A name/value pair rendered in an embed or section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default = "EmbedField::default_inline")]
    pub inline: bool,
}

impl EmbedField {
    pub const DEFAULT_INLINE: bool = false;

    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: Self::DEFAULT_INLINE,
        }
    }

    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    fn default_inline() -> bool {
        Self::DEFAULT_INLINE
    }
}

impl Document for EmbedField {}

/// Thumbnail accessory of a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailData {
    pub url: String,
}

impl Document for ThumbnailData {}

/// A text block inside a component container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionData {
    #[serde(
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    pub fields: Vec<EmbedField>,
    #[serde(
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail: Option<ThumbnailData>,
}

impl Document for SectionData {}

/// A visual break between sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparatorData {
    pub spacing: SeparatorSpacing,
    pub divider: bool,
}

impl SeparatorData {
    pub const DEFAULT_SPACING: SeparatorSpacing = SeparatorSpacing::Medium;
    pub const DEFAULT_DIVIDER: bool = false;
}

impl Default for SeparatorData {
    fn default() -> Self {
        Self {
            spacing: Self::DEFAULT_SPACING,
            divider: Self::DEFAULT_DIVIDER,
        }
    }
}

impl Document for SeparatorData {}

/// Discord v2 component container
///
/// Sections and separators are kept as two independent ordered lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerData {
    #[serde(
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub accent_color: Option<String>,
    pub sections: Vec<SectionData>,
    pub separators: Vec<SeparatorData>,
}

impl Document for ContainerData {}

/// Embed payload of a message
///
/// `use_components` selects component rendering over the classic embed.
/// It is not tied to `container`: either may be set without the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmbedData {
    #[serde(
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// Colour as sent by the client, e.g. `#5865F2`
    #[serde(
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<String>,
    pub fields: Vec<EmbedField>,
    /// Image URL
    #[serde(
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    /// Render the current time in the footer
    pub timestamp: bool,
    pub use_components: bool,
    #[serde(
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub container: Option<ContainerData>,
}

impl EmbedData {
    pub const DEFAULT_TIMESTAMP: bool = false;
    pub const DEFAULT_USE_COMPONENTS: bool = false;

    /// Storage form written to `messages.embed_data`
    pub fn to_document(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Default for EmbedData {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            color: None,
            fields: Vec::new(),
            image: None,
            timestamp: Self::DEFAULT_TIMESTAMP,
            use_components: Self::DEFAULT_USE_COMPONENTS,
            container: None,
        }
    }
}

impl Document for EmbedData {}

/// Validate an untyped embed document
pub fn parse_embed_data(value: &Value) -> Result<EmbedData, ValidationError> {
    parse(value)
}
