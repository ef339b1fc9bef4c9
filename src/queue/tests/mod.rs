//! Test modules for the hand-off queue
//!
//! Tests are organized by functional area.
