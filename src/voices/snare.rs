//! Snare drum voice.
//!
//! A short triangle "head" tone under a longer burst of high-passed noise for
//! the wires. Each layer has its own decay, which is what makes the snare
//! crack and then hiss.
//!
//! # How It Works
//!
//! 1. Triangle at 180 Hz, 100 ms decay: the drum head
//! 2. Noise through a 1 kHz high-pass, 200 ms decay: the wires
//! 3. Mixed with the wires on top
//!
//! # Variations
//!
//! - More noise = trashy, lo-fi snare
//! - Less noise = more "tom" like
//! - Higher tone = piccolo snare

use crate::graph::{
    envelope::DecayNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode, GraphNode,
};

/// Create a snare drum voice.
pub fn snare() -> impl GraphNode {
    let body = OscNode::triangle()
        .with_frequency(180.0)
        .amplify(DecayNode::new(0.1));

    let wires = OscNode::noise()
        .through(FilterNode::highpass(1_000.0))
        .amplify(DecayNode::new(0.2));

    body.mix(wires, 0.6).gain(1.4)
}
