use serde::{Deserialize, Serialize};

/// Layout of serialized wire text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireStyle {
    /// Single line, no whitespace.
    #[default]
    Compact,
    /// Indented, one field per line.
    Pretty,
}

/// Configuration for a [`Serializer`](crate::Serializer).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializerConfig {
    #[serde(default)]
    pub style: WireStyle,
}

impl SerializerConfig {
    pub fn pretty() -> Self {
        Self {
            style: WireStyle::Pretty,
        }
    }
}
