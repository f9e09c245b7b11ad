//! # Timing Model Tests
