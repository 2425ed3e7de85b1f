//! Arp voice.
//!
//! A single triangle with a fast pluck envelope. Short enough that sixteenth
//! notes at 200 BPM still separate.

use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode, GraphNode};

/// Create an arp voice.
pub fn arp() -> impl GraphNode {
    OscNode::triangle().amplify(EnvNode::one_shot(0.005, 0.1, 0.3, 0.15, 0.3))
}
