//! Lead voice.
//!
//! A square and a sawtooth detuned ±7 cents against each other, both with a
//! 5 Hz vibrato. A bright low-pass starts around 4 kHz and settles to 1.2 kHz
//! so the note speaks first and then sits back.

use crate::graph::{
    envelope::{DecayNode, EnvNode},
    extensions::NodeExt,
    filter::{FilterNode, FilterParam},
    lfo::LfoNode,
    oscillator::{OscNode, OscParam},
    GraphNode,
};

const VIBRATO_HZ: f32 = 5.0;
const VIBRATO_CENTS: f32 = 8.0;

/// Create a lead voice.
pub fn lead() -> impl GraphNode {
    let square = OscNode::square()
        .with_detune(-7.0)
        .modulate(LfoNode::sine(VIBRATO_HZ), OscParam::Detune, VIBRATO_CENTS);
    let saw = OscNode::sawtooth()
        .with_detune(7.0)
        .modulate(LfoNode::sine(VIBRATO_HZ), OscParam::Detune, VIBRATO_CENTS);

    square
        .mix(saw, 0.5)
        .through(
            FilterNode::lowpass(1_200.0)
                .modulate(DecayNode::new(0.4), FilterParam::Cutoff, 2_800.0),
        )
        .amplify(EnvNode::one_shot(0.05, 0.2, 0.5, 0.3, 0.6))
}
