use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub const DEFAULT_NAMESPACE: &str = "minecraft";
pub const AIR: &str = "minecraft:air";

/// Malformed `name[key=value,...]` text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockSyntaxError {
    #[error("empty block name in {0:?}")]
    EmptyName(String),
    #[error("unterminated property list in {0:?}")]
    Unterminated(String),
    #[error("property {pair:?} in {input:?} is not key=value")]
    BadProperty { input: String, pair: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockState {
    pub name: SmolStr,
    pub properties: Vec<(SmolStr, SmolStr)>,
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.properties.is_empty() {
            write!(f, "[")?;
            for (i, (key, value)) in self.properties.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}={}", key, value)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl Hash for BlockState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        for (k, v) in &self.properties {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl FromStr for BlockState {
    type Err = BlockSyntaxError;

    /// Parses `name` or `name[key=value,...]`, splitting on the first `[`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, overrides) = split_block_syntax(s)?;
        let mut block = BlockState::new(namespaced(name));
        if let Some(overrides) = overrides {
            for (key, value) in parse_property_list(overrides, s)? {
                block.set_property(key, value);
            }
        }
        Ok(block)
    }
}

impl BlockState {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        BlockState {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn air() -> Self {
        BlockState::new(AIR)
    }

    pub fn is_air(&self) -> bool {
        self.name == AIR
    }

    pub fn with_property(mut self, key: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        self.set_property(key, value);
        self
    }

    pub fn with_properties(mut self, properties: Vec<(SmolStr, SmolStr)>) -> Self {
        self.properties = properties;
        self
    }

    pub fn set_property(&mut self, key: impl Into<SmolStr>, value: impl Into<SmolStr>) {
        let key = key.into();
        let value = value.into();
        for (k, v) in &mut self.properties {
            if *k == key {
                *v = value;
                return;
            }
        }
        self.properties.push((key, value));
    }

    pub fn get_property(&self, key: &str) -> Option<&SmolStr> {
        for (k, v) in &self.properties {
            if k == key {
                return Some(v);
            }
        }
        None
    }
}

/// Prefixes bare names with the default namespace.
pub fn namespaced(name: &str) -> SmolStr {
    if name.contains(':') {
        SmolStr::new(name)
    } else {
        SmolStr::new(format!("{}:{}", DEFAULT_NAMESPACE, name))
    }
}

/// Splits raw block syntax into its name and the text inside the brackets.
pub(crate) fn split_block_syntax(input: &str) -> Result<(&str, Option<&str>), BlockSyntaxError> {
    let trimmed = input.trim();
    let (name, rest) = match trimmed.split_once('[') {
        Some((name, rest)) => (name, Some(rest)),
        None => (trimmed, None),
    };
    if name.is_empty() {
        return Err(BlockSyntaxError::EmptyName(input.to_string()));
    }
    let overrides = match rest {
        Some(rest) => Some(
            rest.strip_suffix(']')
                .ok_or_else(|| BlockSyntaxError::Unterminated(input.to_string()))?,
        ),
        None => None,
    };
    Ok((name, overrides))
}

/// Parses `key=value,key=value`. Empty pairs are skipped.
pub(crate) fn parse_property_list<'a>(
    list: &'a str,
    input: &str,
) -> Result<Vec<(&'a str, &'a str)>, BlockSyntaxError> {
    let mut pairs = Vec::new();
    for pair in list.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| BlockSyntaxError::BadProperty {
                input: input.to_string(),
                pair: pair.to_string(),
            })?;
        pairs.push((key.trim(), value.trim()));
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_state_creation() {
        let block = BlockState::new("minecraft:stone").with_property("variant", "granite");

        assert_eq!(block.name, "minecraft:stone");
        assert_eq!(
            block.get_property("variant").map(|s| s.as_str()),
            Some("granite")
        );
    }

    #[test]
    fn test_parse_bare_name_gets_namespace() {
        let block: BlockState = "stone".parse().unwrap();
        assert_eq!(block.name, "minecraft:stone");
        assert!(block.properties.is_empty());
    }

    #[test]
    fn test_parse_and_display_agree() {
        let block: BlockState = "minecraft:oak_stairs[facing=east,half=top]".parse().unwrap();
        assert_eq!(block.get_property("facing").unwrap(), "east");
        assert_eq!(block.to_string(), "minecraft:oak_stairs[facing=east,half=top]");
    }

    #[test]
    fn test_set_property_replaces_in_place() {
        let mut block = BlockState::new("minecraft:hopper")
            .with_property("facing", "down")
            .with_property("enabled", "true");
        block.set_property("facing", "north");
        assert_eq!(block.properties[0].1, "north");
        assert_eq!(block.properties.len(), 2);
    }

    #[test]
    fn test_parse_rejects_malformed_syntax() {
        assert!(matches!(
            "stone[foo=bar".parse::<BlockState>(),
            Err(BlockSyntaxError::Unterminated(_))
        ));
        assert!(matches!(
            "stone[foo]".parse::<BlockState>(),
            Err(BlockSyntaxError::BadProperty { .. })
        ));
        assert!(matches!(
            "[foo=bar]".parse::<BlockState>(),
            Err(BlockSyntaxError::EmptyName(_))
        ));
    }

    #[test]
    fn test_empty_brackets_mean_no_properties() {
        let block: BlockState = "glass[]".parse().unwrap();
        assert!(block.properties.is_empty());
        assert!(!block.is_air());
        assert!(BlockState::air().is_air());
    }
}
