//! The serializable form of a sequence, as exchanged with persistence.
//!
//! ```json
//! {
//!   "name": "Untitled Sequence", "bpm": 120, "steps": 16,
//!   "tracks":  { "drums": { "kick": [true, false, ...] }, "synths": { ... } },
//!   "volume":  { "master": 0.7, "drums": 0.75, "synths": 0.65,
//!                "perInstrument": { "drums": { "kick": 0.8 }, "synths": { ... } } },
//!   "effects": { "reverb": 0.2, "delay": 0.1, "filter": 0.0 },
//!   "removed": { "drums": { "kick": false }, "synths": { ... } },
//!   "pitches": { "synths": { "bass": [69, ...] } },
//!   "bars": 1,
//!   "timeSignature": { "numerator": 4, "denominator": 4 },
//!   "id": "..."
//! }
//! ```
//!
//! Maps are keyed by instrument name so that files written by other versions
//! load: unknown names are skipped and missing ones keep their defaults.
//! `pitches`, `bars`, `timeSignature` and `id` are optional.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    instruments::{Instrument, Section},
    mixer::{EffectLevels, MixLevels},
    sequencing::{Sequence, TimeSignature},
};

/// Per-section map keyed by instrument name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct SectionMap<T> {
    #[serde(default)]
    pub drums: BTreeMap<String, T>,
    #[serde(default)]
    pub synths: BTreeMap<String, T>,
}

impl<T> Default for SectionMap<T> {
    fn default() -> Self {
        Self {
            drums: BTreeMap::new(),
            synths: BTreeMap::new(),
        }
    }
}

impl<T> SectionMap<T> {
    pub fn section(&self, section: Section) -> &BTreeMap<String, T> {
        match section {
            Section::Drums => &self.drums,
            Section::Synths => &self.synths,
        }
    }

    pub fn insert(&mut self, instrument: Instrument, value: T) {
        let map = match instrument.section() {
            Section::Drums => &mut self.drums,
            Section::Synths => &mut self.synths,
        };
        map.insert(instrument.name().to_string(), value);
    }

    /// Entries whose name is a known instrument of the right section.
    pub fn known(&self) -> impl Iterator<Item = (Instrument, &T)> {
        Section::ALL.into_iter().flat_map(move |section| {
            self.section(section)
                .iter()
                .filter_map(move |(name, value)| {
                    Instrument::in_section(section, name).map(|inst| (inst, value))
                })
        })
    }

    pub fn get(&self, instrument: Instrument) -> Option<&T> {
        let map = self.section(instrument.section());
        map.get(instrument.name()).or_else(|| {
            // Files from before the arp rename still say "pluck".
            (instrument == Instrument::Arp)
                .then(|| map.get("pluck"))
                .flatten()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSnapshot {
    pub master: f32,
    pub drums: f32,
    pub synths: f32,
    #[serde(default)]
    pub per_instrument: SectionMap<f32>,
}

impl Default for VolumeSnapshot {
    fn default() -> Self {
        Self::from(&MixLevels::default())
    }
}

impl From<&MixLevels> for VolumeSnapshot {
    fn from(levels: &MixLevels) -> Self {
        let mut per_instrument = SectionMap::default();
        for inst in Instrument::ALL {
            per_instrument.insert(inst, levels.instrument(inst));
        }
        Self {
            master: levels.master(),
            drums: levels.section(Section::Drums),
            synths: levels.section(Section::Synths),
            per_instrument,
        }
    }
}

impl VolumeSnapshot {
    /// Clamped mixer levels; absent instruments keep the default level.
    pub fn to_levels(&self) -> MixLevels {
        let mut levels = MixLevels::default();
        levels.set_master(self.master);
        levels.set_section(Section::Drums, self.drums);
        levels.set_section(Section::Synths, self.synths);
        for (inst, &level) in self.per_instrument.known() {
            levels.set_instrument(inst, level);
        }
        levels
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PitchSnapshot {
    #[serde(default)]
    pub synths: BTreeMap<String, Vec<i32>>,
}

impl PitchSnapshot {
    pub fn get(&self, instrument: Instrument) -> Option<&Vec<i32>> {
        self.synths.get(instrument.name()).or_else(|| {
            (instrument == Instrument::Arp)
                .then(|| self.synths.get("pluck"))
                .flatten()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceSnapshot {
    pub name: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub bpm: u32,
    pub steps: usize,
    #[serde(default)]
    pub tracks: SectionMap<Vec<bool>>,
    #[serde(default)]
    pub volume: VolumeSnapshot,
    #[serde(default)]
    pub effects: EffectLevels,
    #[serde(default)]
    pub removed: SectionMap<bool>,
    #[serde(default)]
    pub pitches: PitchSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bars: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_signature: Option<TimeSignature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SequenceSnapshot {
    /// Capture the live sequence.
    pub fn capture(sequence: &Sequence, time_signature: TimeSignature) -> Self {
        let mut tracks = SectionMap::default();
        let mut removed = SectionMap::default();
        let mut pitches = PitchSnapshot::default();

        for inst in Instrument::ALL {
            let track = sequence.tracks.track(inst);
            tracks.insert(inst, track.steps().to_vec());
            removed.insert(inst, sequence.removed.contains(inst));
            if inst.is_synth() {
                pitches.synths.insert(
                    inst.name().to_string(),
                    track.pitches().iter().map(|&p| i32::from(p)).collect(),
                );
            }
        }

        Self {
            name: sequence.name.clone(),
            bpm: sequence.bpm(),
            steps: sequence.steps(),
            tracks,
            volume: VolumeSnapshot::from(&sequence.levels),
            effects: sequence.effects,
            removed,
            pitches,
            bars: Some(sequence.bars()),
            time_signature: Some(time_signature),
            id: sequence.id.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Accept `120`, `120.0` or `"120"`; anything else that is a number rounds.
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(u64),
        Float(f64),
        Text(String),
    }

    let value = match Number::deserialize(deserializer)? {
        Number::Int(n) => n.min(u64::from(u32::MAX)) as u32,
        Number::Float(f) if f.is_finite() => f.round().clamp(0.0, u32::MAX as f64) as u32,
        Number::Float(_) => 0,
        Number::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(|f| f.round().clamp(0.0, u32::MAX as f64) as u32)
            .map_err(serde::de::Error::custom)?,
    };
    Ok(value)
}
