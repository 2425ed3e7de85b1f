//! Clap voice.
//!
//! A real hand clap is several hands hitting a few milliseconds apart. Three
//! short bursts of band-passed noise, started 10 ms apart, give that flam;
//! the last burst rings longer and becomes the tail.
//!
//! # How It Works
//!
//! 1. Noise through a resonant band-pass at 1.5 kHz (the "crack" band)
//! 2. Bursts at 0, 10 and 20 ms
//! 3. Equal-weight mix, then gain to make up for the thirds

use crate::graph::{
    envelope::DecayNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode, GraphNode,
};

const SPACING_SECS: f32 = 0.01;

fn burst(start: f32, decay: f32) -> impl GraphNode {
    OscNode::noise()
        .through(FilterNode::bandpass(1_500.0).with_resonance(0.5))
        .amplify(DecayNode::new(decay))
        .starting_at(start)
}

/// Create a clap voice.
pub fn clap() -> impl GraphNode {
    burst(0.0, 0.03)
        .mix(burst(SPACING_SECS, 0.03), 0.5)
        .mix(burst(2.0 * SPACING_SECS, 0.15), 1.0 / 3.0)
        .gain(3.0)
}
