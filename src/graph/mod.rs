//! Composable building blocks for constructing voice graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with what a voice recipe
//! needs: note events, modulation, block rendering and a notion of when the
//! voice has finished. The `extensions` module adds fluent helpers so recipes
//! read as a chain: `OscNode::noise().through(...).amplify(...)`.

/// Multiply two signals together (amplitude or ring modulation).
pub mod amplify;
/// Linear ADSR and exponential decay envelope nodes.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.mix()`, etc.).
pub mod extensions;
/// Topology-preserving filter node with multiple responses.
pub mod filter;
/// Fixed output scaling.
pub mod gain;
/// Low frequency oscillators for parameter modulation.
pub mod lfo;
/// Linear crossfade mixing for parallel layers.
pub mod mix;
/// Connect modulation sources to node parameters.
pub mod modulate;
/// Core traits shared by all graph nodes.
pub mod node;
/// Delayed start inside a voice.
pub mod offset;
/// Audio-band oscillators and noise sources.
pub mod oscillator;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use extensions::NodeExt;
pub use node::{midi_note_to_freq, GraphNode, Modulatable, RenderCtx};
