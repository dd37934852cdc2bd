//! Discriminator vocabulary for Notion API documents.
//!
//! API responses stay as `serde_json::Value`; what this module types is the
//! set of tags that select a rendering branch. Each vocabulary is closed and
//! carries an `Unknown` arm so new tags from the API degrade instead of
//! failing.

mod block;
mod json;
mod property_value;

pub use block::BlockType;
pub use json::JsonExt;
pub use property_value::PropertyType;

use serde_json::Value;

/// Declares a closed tag vocabulary with an `Unknown(String)` fallback arm.
macro_rules! tag_vocabulary {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => $tag:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
            Unknown(String),
        }

        impl $name {
            /// Maps a wire tag onto the vocabulary.
            pub fn from_tag(tag: &str) -> Self {
                match tag {
                    $( $tag => Self::$variant, )+
                    other => Self::Unknown(other.to_string()),
                }
            }

            /// The wire tag for this variant.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $tag, )+
                    Self::Unknown(tag) => tag.as_str(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}
pub(crate) use tag_vocabulary;

tag_vocabulary! {
    /// The `object` discriminator on every top-level API entity.
    pub enum ObjectKind {
        Page => "page",
        Database => "database",
        Block => "block",
        List => "list",
        User => "user",
        Comment => "comment",
    }
}

impl ObjectKind {
    /// Reads the `object` field; `None` when it is missing or not a string.
    pub fn of(entity: &Value) -> Option<Self> {
        entity.str_field("object").map(Self::from_tag)
    }
}
