//! Voice recipes, one per instrument.
//!
//! Each recipe is a ready-to-use node graph that ends by itself: drums decay
//! to silence, synths run a one-shot envelope fitted into a fixed duration.
//! Nothing ever sends a note-off.
//!
//! # Example
//!
//! ```ignore
//! use saavy_grid::{instruments::Instrument, voices};
//!
//! let kick = voices::kick();
//! let lead = voices::build(Instrument::Lead);
//! ```

mod arp;
mod bass;
mod clap;
mod crash;
mod hihat;
mod kick;
mod lead;
mod openhat;
mod pad;
mod snare;

pub use arp::arp;
pub use bass::bass;
pub use clap::clap;
pub use crash::crash;
pub use hihat::hihat;
pub use kick::kick;
pub use lead::lead;
pub use openhat::openhat;
pub use pad::pad;
pub use snare::snare;

use crate::{graph::GraphNode, instruments::Instrument};

/// Pitch used when a trigger carries no usable frequency.
pub const FALLBACK_FREQUENCY: f32 = 440.0;
pub const MIN_FREQUENCY: f32 = 20.0;
pub const MAX_FREQUENCY: f32 = 20_000.0;

/// Bring a trigger frequency into the audible range. Non-finite input falls
/// back to concert A.
pub fn sanitize_frequency(frequency: f32) -> f32 {
    if frequency.is_finite() {
        frequency.clamp(MIN_FREQUENCY, MAX_FREQUENCY)
    } else {
        FALLBACK_FREQUENCY
    }
}

/// Build the voice graph for `instrument`.
pub fn build(instrument: Instrument) -> Box<dyn GraphNode> {
    match instrument {
        Instrument::Kick => Box::new(kick()),
        Instrument::Snare => Box::new(snare()),
        Instrument::Hihat => Box::new(hihat()),
        Instrument::Openhat => Box::new(openhat()),
        Instrument::Crash => Box::new(crash()),
        Instrument::Clap => Box::new(clap()),
        Instrument::Bass => Box::new(bass()),
        Instrument::Lead => Box::new(lead()),
        Instrument::Pad => Box::new(pad()),
        Instrument::Arp => Box::new(arp()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::CONTROL_BLOCK, graph::RenderCtx};

    const SAMPLE_RATE: f32 = 48_000.0;

    /// Render until the voice finishes; returns (frames rendered, peak).
    fn run_to_end(instrument: Instrument, frequency: f32) -> (usize, f32) {
        let ctx = RenderCtx::from_freq(SAMPLE_RATE, sanitize_frequency(frequency), 1.0);
        let mut voice = build(instrument);
        voice.note_on(&ctx);

        let mut block = [0.0f32; CONTROL_BLOCK];
        let mut frames = 0;
        let mut peak = 0.0f32;
        let limit = (SAMPLE_RATE * 5.0) as usize;
        while voice.is_active() && frames < limit {
            voice.render_block(&mut block, &ctx.advanced(frames));
            for &s in &block {
                assert!(s.is_finite(), "{instrument} produced {s}");
                peak = peak.max(s.abs());
            }
            frames += CONTROL_BLOCK;
        }
        (frames, peak)
    }

    #[test]
    fn every_voice_is_audible_and_ends() {
        for instrument in Instrument::ALL {
            let (frames, peak) = run_to_end(instrument, 220.0);
            assert!(frames < (SAMPLE_RATE * 5.0) as usize, "{instrument} never ended");
            assert!(peak > 0.01, "{instrument} is silent");
        }
    }

    #[test]
    fn synth_voices_end_within_their_duration() {
        let expected = [
            (Instrument::Bass, 0.9),
            (Instrument::Lead, 0.6),
            (Instrument::Pad, 2.0),
            (Instrument::Arp, 0.3),
        ];
        for (instrument, seconds) in expected {
            let (frames, _) = run_to_end(instrument, 440.0);
            let limit = (seconds * SAMPLE_RATE) as usize + CONTROL_BLOCK;
            assert!(frames <= limit, "{instrument}: {frames} > {limit}");
        }
    }

    #[test]
    fn hostile_frequencies_are_sanitized() {
        assert_eq!(sanitize_frequency(f32::NAN), FALLBACK_FREQUENCY);
        assert_eq!(sanitize_frequency(f32::INFINITY), FALLBACK_FREQUENCY);
        assert_eq!(sanitize_frequency(-5.0), MIN_FREQUENCY);
        assert_eq!(sanitize_frequency(1.0e9), MAX_FREQUENCY);

        for frequency in [f32::NAN, 0.0, 1.0e9] {
            for instrument in Instrument::SYNTHS {
                run_to_end(instrument, frequency);
            }
        }
    }
}
