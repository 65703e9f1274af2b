//! Records held by the registry stores.
//!
//! These are the values that travel over the wire and through the
//! [`StreamStore`](crate::store::StreamStore) contract. How a store lays
//! them out at rest is its own business.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A named stream and its metadata.
///
/// Upserts replace the whole record; there is no partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    /// Unique stream name.
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Owning team or user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub owner: Option<String>,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 4096))]
    pub description: Option<String>,

    /// Schema compatibility mode (for example `BACKWARD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_compatibility: Option<String>,

    /// Latest key schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub latest_key_schema: Option<SchemaReference>,

    /// Latest value schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub latest_value_schema: Option<SchemaReference>,

    /// Arbitrary tags.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    /// VPCs the stream lives in.
    #[serde(default)]
    pub vpc_list: Vec<String>,

    /// VPCs the stream is replicated to.
    #[serde(default)]
    pub replicated_vpc_list: Vec<String>,

    /// Topic-level configuration overrides.
    #[serde(default)]
    pub topic_config: BTreeMap<String, String>,

    /// Partition count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub partitions: Option<u32>,

    /// Replication factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub replication_factor: Option<u32>,
}

impl Stream {
    /// A stream with the given name and no metadata.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Reference to a registered schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SchemaReference {
    /// Schema registry id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Schema version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,

    /// Schema document.
    #[validate(length(min = 1))]
    pub schema_string: String,
}

/// Kind of stream client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    /// Writes to the stream.
    Producer,
    /// Reads from the stream.
    Consumer,
}

impl ClientKind {
    /// Lowercase identifier, also the stored `kind` column value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Producer => "producer",
            Self::Consumer => "consumer",
        }
    }

    /// Capitalized label for messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Producer => "Producer",
            Self::Consumer => "Consumer",
        }
    }
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A producer or consumer registered against a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StreamClient {
    /// Client name, unique per stream and kind.
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Stream the client is attached to.
    #[serde(default)]
    pub stream_name: String,

    /// Region the client runs in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Owning team or user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub owner: Option<String>,

    /// Arbitrary tags.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl StreamClient {
    /// A client with the given names and no metadata.
    #[must_use]
    pub fn named(stream_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stream_name: stream_name.into(),
            ..Self::default()
        }
    }
}
