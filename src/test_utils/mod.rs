//! Test utilities for `frame-color`
//!
//! Provides synthetic I420 frame generation and color grid message frames
//! for validating conversion and classification without a live video source.

pub mod frame_generator;

pub use frame_generator::*;
