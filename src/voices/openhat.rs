//! Open hi-hat voice.
//!
//! Same metallic noise as the closed hat, left to ring for 300 ms.

use super::hihat::metallic_noise;
use crate::graph::{envelope::DecayNode, extensions::NodeExt, GraphNode};

/// Create an open hi-hat voice.
pub fn openhat() -> impl GraphNode {
    metallic_noise().amplify(DecayNode::new(0.3)).gain(0.8)
}
