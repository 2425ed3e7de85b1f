//! Hi-hat voice (closed).
//!
//! A tight burst of noise. The high-pass strips everything below 7 kHz and a
//! resonant band-pass around 10 kHz adds the metallic ring.
//!
//! The open hat (`openhat.rs`) is the same chain with a longer decay.

use crate::graph::{
    envelope::DecayNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode, GraphNode,
};

pub(super) fn metallic_noise() -> impl GraphNode {
    OscNode::noise()
        .through(FilterNode::highpass(7_000.0))
        .through(FilterNode::bandpass(10_000.0).with_resonance(0.3))
        .gain(1.8)
}

/// Create a closed hi-hat voice.
pub fn hihat() -> impl GraphNode {
    metallic_noise().amplify(DecayNode::new(0.05))
}
