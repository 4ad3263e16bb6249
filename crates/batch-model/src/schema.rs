//! Tag vocabulary for batch files.
//!
//! The cascade is driven entirely by this schema: the root tag, the element
//! tag each tier lists, and whether a tier holds nested elements or leaf
//! values. It is deployment configuration and can be loaded from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::Element;
use crate::error::SchemaError;

/// Default batch file root element.
pub const DEFAULT_ROOT_TAG: &str = "ComponentSets";

/// Attribute holding the display name of structured entries.
pub const DEFAULT_NAME_ATTRIBUTE: &str = "name";

/// How the entries of a tier are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TierKind {
    /// Entries are elements named by an attribute and may have children.
    #[default]
    Structured,
    /// Entries are elements whose text content is the entry itself.
    Leaf,
}

/// One level of the cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSpec {
    /// Element tag of the entries listed by this tier.
    pub tag: String,
    /// Display label for the list.
    pub label: String,
    #[serde(default)]
    pub kind: TierKind,
}

impl TierSpec {
    pub fn structured(tag: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            label: label.into(),
            kind: TierKind::Structured,
        }
    }

    pub fn leaf(tag: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            label: label.into(),
            kind: TierKind::Leaf,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.kind == TierKind::Leaf
    }

    /// Display name of an entry of this tier: the name attribute for
    /// structured tiers, the text content for leaf tiers.
    pub fn entry_name<'e>(&self, element: &'e Element, name_attribute: &str) -> Option<&'e str> {
        match self.kind {
            TierKind::Structured => element.attribute(name_attribute),
            TierKind::Leaf => element.text(),
        }
    }
}

/// Complete batch file vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSchema {
    pub root_tag: String,
    #[serde(default = "default_name_attribute")]
    pub name_attribute: String,
    pub tiers: Vec<TierSpec>,
}

fn default_name_attribute() -> String {
    DEFAULT_NAME_ATTRIBUTE.to_string()
}

impl Default for BatchSchema {
    fn default() -> Self {
        Self {
            root_tag: DEFAULT_ROOT_TAG.to_string(),
            name_attribute: default_name_attribute(),
            tiers: vec![
                TierSpec::structured("ComponentSet", "Component Sets"),
                TierSpec::structured("FileSet", "File Sets"),
                TierSpec::leaf("Value", "Files"),
            ],
        }
    }
}

impl BatchSchema {
    /// Parse and validate a schema from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SchemaError> {
        let schema: Self = toml::from_str(content)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Load and validate a schema file.
    pub fn load_from(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Render the schema as TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check the invariants the cascade relies on.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.root_tag.trim().is_empty() {
            return Err(SchemaError::Invalid("root tag is empty".to_string()));
        }
        if self.name_attribute.trim().is_empty() {
            return Err(SchemaError::Invalid("name attribute is empty".to_string()));
        }
        if self.tiers.is_empty() {
            return Err(SchemaError::Invalid(
                "at least one tier is required".to_string(),
            ));
        }
        let last = self.tiers.len() - 1;
        for (index, tier) in self.tiers.iter().enumerate() {
            if tier.tag.trim().is_empty() {
                return Err(SchemaError::Invalid(format!("tier {index} has an empty tag")));
            }
            if tier.is_leaf() && index != last {
                return Err(SchemaError::Invalid(format!(
                    "tier {index} ({}) is a leaf tier but is not the last tier",
                    tier.tag
                )));
            }
        }
        Ok(())
    }
}
