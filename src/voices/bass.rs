//! Bass voice.
//!
//! Three layers on the step pitch:
//!
//! - sawtooth at pitch: the body
//! - sine one octave down: the sub
//! - square one octave up, quiet: harmonic bite
//!
//! The sum runs through a low-pass whose cutoff snaps open to 2 kHz and closes
//! to 400 Hz over 300 ms, the classic plucked bass sweep.

use crate::graph::{
    envelope::{DecayNode, EnvNode},
    extensions::NodeExt,
    filter::{FilterNode, FilterParam},
    oscillator::OscNode,
    GraphNode,
};

/// Create a bass voice.
pub fn bass() -> impl GraphNode {
    let body = OscNode::sawtooth();
    let sub = OscNode::sine().with_detune(-1_200.0);
    let bite = OscNode::square().with_detune(1_200.0).gain(0.5);

    body.mix(sub, 0.4)
        .mix(bite, 0.2)
        .through(
            FilterNode::lowpass(400.0)
                .with_resonance(0.3)
                .modulate(DecayNode::new(0.3), FilterParam::Cutoff, 1_600.0),
        )
        .amplify(EnvNode::one_shot(0.01, 0.3, 0.7, 0.5, 0.9))
        .gain(1.3)
}
