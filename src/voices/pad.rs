//! Pad voice - sustained, atmospheric texture.
//!
//! Four oscillators spread around the step pitch: two sines ±6 cents apart
//! and two triangles, one an octave down. The slow attack and long release
//! make it swell in and hang after the step has passed.
//!
//! # Variations
//!
//! - More detune (20+ cents) = wider, more dramatic
//! - Lower filter cutoff = darker, more ambient

use crate::graph::{
    envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode, GraphNode,
};

/// Create a pad voice.
pub fn pad() -> impl GraphNode {
    OscNode::sine()
        .with_detune(-6.0)
        .mix(OscNode::sine().with_detune(6.0), 0.5)
        .mix(OscNode::triangle().with_detune(-3.0), 1.0 / 3.0)
        .mix(OscNode::triangle().with_detune(-1_200.0), 0.25)
        .through(FilterNode::lowpass(2_000.0))
        .amplify(EnvNode::one_shot(0.5, 0.3, 0.8, 1.0, 2.0))
        .gain(1.2)
}
