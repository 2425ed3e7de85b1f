//! Crash cymbal voice.
//!
//! A big wash of noise split across two bands: a bright high-passed layer and
//! a ringing band around 8 kHz. The amplitude is a two-stage one-shot: a fast
//! drop from the strike onto a lower plateau, then a long fade.
//!
//! # Variations
//!
//! - Shorter duration = "choke" effect
//! - Lower band-pass = darker, trashier crash

use crate::graph::{
    envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode, GraphNode,
};

/// Create a crash cymbal voice.
pub fn crash() -> impl GraphNode {
    let air = OscNode::noise().through(FilterNode::highpass(5_000.0));
    let ring = OscNode::noise()
        .through(FilterNode::bandpass(8_000.0).with_resonance(0.4));

    air.mix(ring, 0.5)
        .amplify(EnvNode::one_shot(0.001, 0.25, 0.35, 1.2, 1.5))
        .gain(1.2)
}
