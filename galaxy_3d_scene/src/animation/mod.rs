//! Animation module — keyframe search and sampling.
//!
//! A [`Sampler`] owns one animated channel (times + values) and answers
//! "what is the value at time t". The bracketing keyframes come from a
//! [`KeyframeIndex`] built once at construction.

mod keyframe_index;
mod sampler;

pub use keyframe_index::{KeyframeEntry, KeyframeIndex, KeyframeIndexBuilder};
pub use sampler::{Interpolate, Interpolation, RepeatMode, Sampler};
