//! Plain data handed from the engine to the rendering layer.

pub mod dashboard;
