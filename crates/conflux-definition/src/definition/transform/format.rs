//! Data format definitions for marshalling.

use serde::{Deserialize, Serialize};

/// A data format used by [`MarshalDef`] and [`UnmarshalDef`].
///
/// Formats are owned nested definitions: copying a marshal node copies its
/// format as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum DataFormat {
    /// JSON encoding.
    Json {
        /// Library backing the format.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        library: Option<String>,
        /// Indents output.
        #[serde(default)]
        pretty_print: bool,
        /// Type name to unmarshal into.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unmarshal_type: Option<String>,
    },
    /// Comma separated values.
    Csv {
        /// Field delimiter; `,` when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delimiter: Option<String>,
        /// Column names written as the first record.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        header: Vec<String>,
    },
    /// Base64 encoding.
    Base64 {
        /// Maximum encoded line length.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line_length: Option<u32>,
    },
    /// A user supplied format looked up in the registry.
    Custom {
        /// Registry name of the format.
        reference: String,
    },
}

impl DataFormat {
    /// Creates a JSON format with defaults.
    pub fn json() -> Self {
        DataFormat::Json {
            library: None,
            pretty_print: false,
            unmarshal_type: None,
        }
    }

    /// Returns the format name used in labels.
    pub const fn name(&self) -> &'static str {
        match self {
            DataFormat::Json { .. } => "json",
            DataFormat::Csv { .. } => "csv",
            DataFormat::Base64 { .. } => "base64",
            DataFormat::Custom { .. } => "custom",
        }
    }
}

/// Encodes the message body with a data format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarshalDef {
    /// The format to encode with.
    pub data_format: DataFormat,
}

/// Decodes the message body with a data format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmarshalDef {
    /// The format to decode with.
    pub data_format: DataFormat,
}
