//! The closed set of instruments the grid can play.
//!
//! Every lane in a pattern belongs to exactly one [`Instrument`]; the order
//! of [`Instrument::ALL`] is the firing order within a step (drums before
//! synths, catalog order inside each section).

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Drums,
    Synths,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Drums, Section::Synths];

    pub fn name(self) -> &'static str {
        match self {
            Section::Drums => "drums",
            Section::Synths => "synths",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "drums" => Some(Section::Drums),
            "synths" => Some(Section::Synths),
            _ => None,
        }
    }

    /// Instruments of this section in catalog order.
    pub fn instruments(self) -> &'static [Instrument] {
        match self {
            Section::Drums => &Instrument::DRUMS,
            Section::Synths => &Instrument::SYNTHS,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Kick,
    Snare,
    Hihat,
    Openhat,
    Crash,
    Clap,
    Bass,
    Lead,
    Pad,
    #[serde(alias = "pluck")]
    Arp,
}

impl Instrument {
    pub const COUNT: usize = 10;

    pub const DRUMS: [Instrument; 6] = [
        Instrument::Kick,
        Instrument::Snare,
        Instrument::Hihat,
        Instrument::Openhat,
        Instrument::Crash,
        Instrument::Clap,
    ];

    pub const SYNTHS: [Instrument; 4] = [
        Instrument::Bass,
        Instrument::Lead,
        Instrument::Pad,
        Instrument::Arp,
    ];

    pub const ALL: [Instrument; Self::COUNT] = [
        Instrument::Kick,
        Instrument::Snare,
        Instrument::Hihat,
        Instrument::Openhat,
        Instrument::Crash,
        Instrument::Clap,
        Instrument::Bass,
        Instrument::Lead,
        Instrument::Pad,
        Instrument::Arp,
    ];

    /// Position in [`Instrument::ALL`]; used to index per-instrument tables.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn section(self) -> Section {
        match self {
            Instrument::Kick
            | Instrument::Snare
            | Instrument::Hihat
            | Instrument::Openhat
            | Instrument::Crash
            | Instrument::Clap => Section::Drums,
            Instrument::Bass | Instrument::Lead | Instrument::Pad | Instrument::Arp => {
                Section::Synths
            }
        }
    }

    pub fn is_synth(self) -> bool {
        self.section() == Section::Synths
    }

    /// Wire name, as used in snapshots.
    pub fn name(self) -> &'static str {
        match self {
            Instrument::Kick => "kick",
            Instrument::Snare => "snare",
            Instrument::Hihat => "hihat",
            Instrument::Openhat => "openhat",
            Instrument::Crash => "crash",
            Instrument::Clap => "clap",
            Instrument::Bass => "bass",
            Instrument::Lead => "lead",
            Instrument::Pad => "pad",
            Instrument::Arp => "arp",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pluck" => Some(Instrument::Arp),
            _ => Self::ALL.into_iter().find(|inst| inst.name() == name),
        }
    }

    /// Parse a name that must belong to `section`.
    pub fn in_section(section: Section, name: &str) -> Option<Self> {
        Self::from_name(name).filter(|inst| inst.section() == section)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Instrument::Kick => "Kick Drum",
            Instrument::Snare => "Snare Drum",
            Instrument::Hihat => "Hi-Hat Closed",
            Instrument::Openhat => "Hi-Hat Open",
            Instrument::Crash => "Crash Cymbal",
            Instrument::Clap => "Hand Clap",
            Instrument::Bass => "Bass Synth",
            Instrument::Lead => "Lead Synth",
            Instrument::Pad => "Pad Synth",
            Instrument::Arp => "Arp Synth",
        }
    }

    /// Display colour as `#rrggbb`.
    pub fn color(self) -> &'static str {
        match self {
            Instrument::Kick => "#ff6b6b",
            Instrument::Snare => "#4ecdc4",
            Instrument::Hihat => "#45b7d1",
            Instrument::Openhat => "#96ceb4",
            Instrument::Crash => "#feca57",
            Instrument::Clap => "#ff9ff3",
            Instrument::Bass => "#e17055",
            Instrument::Lead => "#a29bfe",
            Instrument::Pad => "#6c5ce7",
            Instrument::Arp => "#ff6b81",
        }
    }

    /// Display colour as RGB components.
    pub fn rgb(self) -> (u8, u8, u8) {
        let hex = &self.color()[1..];
        let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
