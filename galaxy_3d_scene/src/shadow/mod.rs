//! Shadow module — cascaded shadow map split fitting.

mod cascade;

pub use cascade::{Cascade, CascadeSplitter, CascadeSplitterDesc, CascadeUniform};
