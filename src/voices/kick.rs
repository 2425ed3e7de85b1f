//! Kick drum voice.
//!
//! A sine body whose pitch falls exponentially from about 150 Hz onto a 50 Hz
//! fundamental while the amplitude decays over half a second. The fast pitch
//! drop is the "punch"; the long tail is the boom.
//!
//! # Variations
//!
//! - Longer amplitude decay = boomy 808-style kick
//! - Deeper pitch depth = more click on the attack
//! - Shorter pitch decay = tighter, more modern kick

use crate::graph::{
    envelope::DecayNode,
    extensions::NodeExt,
    oscillator::{OscNode, OscParam},
    GraphNode,
};

const FUNDAMENTAL_HZ: f32 = 50.0;
const PITCH_DROP_HZ: f32 = 100.0;

/// Create a kick drum voice.
///
/// The step pitch is ignored; the kick tunes itself.
pub fn kick() -> impl GraphNode {
    OscNode::sine()
        .with_frequency(FUNDAMENTAL_HZ)
        // 150 Hz → 50 Hz
        .modulate(DecayNode::new(0.1), OscParam::Frequency, PITCH_DROP_HZ)
        .amplify(DecayNode::new(0.5))
}
