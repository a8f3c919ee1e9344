//! SeparatorSpacing - Vertical gap of a component separator

use serde::{Deserialize, Serialize};

/// Spacing of a v2 component separator
///
/// Serialized with the variant names as written (`Small`, `Medium`, `Large`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum SeparatorSpacing {
    Small,
    #[default]
    Medium,
    Large,
}

impl SeparatorSpacing {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeparatorSpacing::Small => "Small",
            SeparatorSpacing::Medium => "Medium",
            SeparatorSpacing::Large => "Large",
        }
    }
}

impl std::fmt::Display for SeparatorSpacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
