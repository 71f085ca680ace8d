//! Block definitions, raw block syntax resolution and the id catalog.
//!
//! The catalog maps the short ids used in pasted plot data (`"belt"`,
//! `"smelter"`) to one resolved [`BlockState`] per orientation. Raw entries
//! are written in block syntax (`oak_stairs[facing=east]`) and seeded with
//! the defaults of the block's first declared variant.

use crate::block_state::{namespaced, parse_property_list, split_block_syntax, BlockSyntaxError};
use crate::BlockState;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown catalog id {0:?}")]
    UnknownId(String),
    #[error("catalog id {0:?} has no block variants")]
    EmptyEntry(String),
    #[error("no block definition for {0:?}")]
    UnknownBlock(String),
    #[error(transparent)]
    Syntax(#[from] BlockSyntaxError),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// A blockstate definition as found in resource packs.
///
/// Only the order of `variants` keys matters here: the first key names the
/// default property set. Multipart definitions carry no variants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockDefinition {
    #[serde(default)]
    pub variants: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multipart: Option<serde_json::Value>,
}

impl BlockDefinition {
    /// Definition with the given variant keys, models left empty.
    pub fn with_variants<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variants = keys
            .into_iter()
            .map(|k| (k.into(), serde_json::Value::Object(Default::default())))
            .collect();
        Self {
            variants,
            multipart: None,
        }
    }

    pub fn first_variant(&self) -> Option<&str> {
        self.variants.keys().next().map(String::as_str)
    }

    /// Properties named by the first variant key.
    ///
    /// Keys like `""` or the legacy `"normal"` carry no `key=value` pairs and
    /// seed nothing.
    pub fn default_properties(&self) -> Vec<(SmolStr, SmolStr)> {
        let Some(variant) = self.first_variant() else {
            return Vec::new();
        };
        variant
            .split(',')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (SmolStr::new(k.trim()), SmolStr::new(v.trim())))
            .collect()
    }
}

/// Source of block definitions, normally backed by a resource pack.
pub trait ResourceProvider {
    fn block_definition(&self, id: &str) -> Option<&BlockDefinition>;
}

/// In-memory provider keyed by namespaced block id.
#[derive(Debug, Clone, Default)]
pub struct StaticResources {
    definitions: HashMap<SmolStr, BlockDefinition>,
}

impl StaticResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads an mcmeta-style `{ "stone": { "variants": { ... } } }` summary.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, BlockDefinition> = serde_json::from_str(json)?;
        Ok(Self::from_definitions(raw))
    }

    pub fn from_definitions(raw: HashMap<String, BlockDefinition>) -> Self {
        let definitions = raw
            .into_iter()
            .map(|(id, def)| (namespaced(&id), def))
            .collect();
        Self { definitions }
    }

    pub fn insert(&mut self, id: &str, definition: BlockDefinition) {
        self.definitions.insert(namespaced(id), definition);
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ResourceProvider for StaticResources {
    fn block_definition(&self, id: &str) -> Option<&BlockDefinition> {
        self.definitions.get(id)
    }
}

/// Resolves `name[key=value,...]` against `resources`.
///
/// Properties start from the block's first variant and are then overridden
/// by the bracketed pairs, if any.
pub fn raw_block_syntax_to_block_state(
    raw: &str,
    resources: &dyn ResourceProvider,
) -> Result<BlockState> {
    let (name, overrides) = split_block_syntax(raw)?;
    let id = namespaced(name);
    let definition = resources
        .block_definition(&id)
        .ok_or_else(|| CatalogError::UnknownBlock(id.to_string()))?;

    let mut block = BlockState::new(id).with_properties(definition.default_properties());
    if let Some(overrides) = overrides {
        for (key, value) in parse_property_list(overrides, raw)? {
            block.set_property(key, value);
        }
    }
    Ok(block)
}

/// Short id to orientation variants, resolved once at start-up.
#[derive(Debug, Clone, Default)]
pub struct BlockCatalog {
    entries: HashMap<SmolStr, Vec<BlockState>>,
}

impl BlockCatalog {
    /// Resolves every raw entry of `table`. Any unresolvable entry fails the
    /// whole catalog.
    pub fn from_table(
        table: &HashMap<String, Vec<String>>,
        resources: &dyn ResourceProvider,
    ) -> Result<Self> {
        let mut entries = HashMap::with_capacity(table.len());
        for (id, raws) in table {
            let variants = raws
                .iter()
                .map(|raw| raw_block_syntax_to_block_state(raw, resources))
                .collect::<Result<Vec<_>>>()?;
            entries.insert(SmolStr::new(id), variants);
        }
        log::debug!("resolved block catalog with {} ids", entries.len());
        Ok(Self { entries })
    }

    /// Parses a `{ "<id>": ["<raw syntax>", ...] }` table.
    pub fn from_json(json: &str, resources: &dyn ResourceProvider) -> Result<Self> {
        let table: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::from_table(&table, resources)
    }

    pub fn insert(&mut self, id: impl Into<SmolStr>, variants: Vec<BlockState>) {
        self.entries.insert(id.into(), variants);
    }

    pub fn variants(&self, id: &str) -> Option<&[BlockState]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    /// Picks `variants[direction mod len]`.
    pub fn resolve(&self, id: &str, direction: i32) -> Result<&BlockState> {
        let variants = self
            .entries
            .get(id)
            .ok_or_else(|| CatalogError::UnknownId(id.to_string()))?;
        if variants.is_empty() {
            return Err(CatalogError::EmptyEntry(id.to_string()));
        }
        let index = direction.rem_euclid(variants.len() as i32) as usize;
        Ok(&variants[index])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
