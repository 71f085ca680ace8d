//! Pasted plot data.
//!
//! Users paste the SNBT ("mojangson") list the game exports, e.g.
//! `[{id:"belt",x:1,y:1,z:3,direction:2b}]`. A plain JSON array of the same
//! records is accepted too.

use quartz_nbt::{NbtCompound, NbtList, NbtTag};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("invalid plot data syntax: {0}")]
    Syntax(String),
    #[error("entry {index}: missing field {field:?}")]
    MissingField { index: usize, field: &'static str },
    #[error("entry {index}: field {field:?} has the wrong type")]
    WrongType { index: usize, field: &'static str },
    #[error("entry {index} is not a compound")]
    NotAnEntry { index: usize },
}

/// One block the user placed on the plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedBlockEntry {
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub direction: i32,
}

impl PlacedBlockEntry {
    pub fn new(id: impl Into<String>, pos: (i32, i32, i32), direction: i32) -> Self {
        Self {
            id: id.into(),
            x: pos.0,
            y: pos.1,
            z: pos.2,
            direction,
        }
    }

    pub fn position(&self) -> (i32, i32, i32) {
        (self.x, self.y, self.z)
    }
}

/// Parses the whole paste. One bad record rejects everything.
pub fn parse_plot_data(text: &str) -> Result<Vec<PlacedBlockEntry>, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    if let Ok(entries) = serde_json::from_str::<Vec<PlacedBlockEntry>>(text) {
        return Ok(entries);
    }
    parse_snbt(text)
}

fn parse_snbt(text: &str) -> Result<Vec<PlacedBlockEntry>, InputError> {
    // The SNBT parser only accepts compounds at the top level.
    let wrapped = format!("{{entries:{}}}", text);
    let root = quartz_nbt::snbt::parse(&wrapped).map_err(|e| InputError::Syntax(e.to_string()))?;
    let list = root
        .get::<_, &NbtList>("entries")
        .map_err(|_| InputError::Syntax("plot data must be a list".to_string()))?;

    list.iter()
        .enumerate()
        .map(|(index, tag)| match tag {
            NbtTag::Compound(compound) => entry_from_compound(index, compound),
            _ => Err(InputError::NotAnEntry { index }),
        })
        .collect()
}

fn entry_from_compound(index: usize, compound: &NbtCompound) -> Result<PlacedBlockEntry, InputError> {
    let field = |name: &'static str| {
        compound
            .inner()
            .get(name)
            .ok_or(InputError::MissingField { index, field: name })
    };
    let int = |name: &'static str| {
        field(name).and_then(|tag| tag_to_i32(tag).ok_or(InputError::WrongType { index, field: name }))
    };

    let id = match field("id")? {
        NbtTag::String(s) => s.clone(),
        other => tag_to_i32(other)
            .map(|n| n.to_string())
            .ok_or(InputError::WrongType { index, field: "id" })?,
    };

    Ok(PlacedBlockEntry {
        id,
        x: int("x")?,
        y: int("y")?,
        z: int("z")?,
        direction: int("direction")?,
    })
}

fn tag_to_i32(tag: &NbtTag) -> Option<i32> {
    match tag {
        NbtTag::Byte(v) => Some(*v as i32),
        NbtTag::Short(v) => Some(*v as i32),
        NbtTag::Int(v) => Some(*v),
        NbtTag::Long(v) => i32::try_from(*v).ok(),
        NbtTag::Float(v) => whole_f64_to_i32(*v as f64),
        NbtTag::Double(v) => whole_f64_to_i32(*v),
        _ => None,
    }
}

fn whole_f64_to_i32(v: f64) -> Option<i32> {
    let in_range = (i32::MIN as f64..=i32::MAX as f64).contains(&v);
    (in_range && v.fract() == 0.0).then_some(v as i32)
}
