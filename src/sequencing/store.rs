use std::fmt;

use serde::{Deserialize, Serialize};

use super::pattern::Pattern;

pub const PATTERN_COUNT: usize = 4;

/// 1-based pattern slot number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PatternId(u8);

impl PatternId {
    pub const FIRST: PatternId = PatternId(1);

    /// `None` unless `1 <= id <= 4`.
    pub fn new(id: u8) -> Option<Self> {
        (1..=PATTERN_COUNT as u8).contains(&id).then_some(Self(id))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    fn slot(self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn all() -> impl Iterator<Item = PatternId> {
        (1..=PATTERN_COUNT as u8).map(PatternId)
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for PatternId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PatternId::new(value).ok_or_else(|| format!("pattern id {value} is not in 1..={PATTERN_COUNT}"))
    }
}

impl From<PatternId> for u8 {
    fn from(id: PatternId) -> Self {
        id.0
    }
}

/// The four pattern slots. Slots are created empty and never destroyed.
#[derive(Debug, Clone)]
pub struct PatternStore {
    slots: [Pattern; PATTERN_COUNT],
}

impl PatternStore {
    pub fn new(bars: u32, steps_per_bar: usize) -> Self {
        Self {
            slots: std::array::from_fn(|_| Pattern::empty(bars, steps_per_bar)),
        }
    }

    pub fn get(&self, id: PatternId) -> &Pattern {
        &self.slots[id.slot()]
    }

    pub fn get_mut(&mut self, id: PatternId) -> &mut Pattern {
        &mut self.slots[id.slot()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PatternId, &Pattern)> {
        PatternId::all().zip(self.slots.iter())
    }

    /// Resize every slot's lanes to `len` steps.
    pub fn resize_all(&mut self, len: usize) {
        for slot in &mut self.slots {
            slot.resize(len);
        }
    }
}
