//! Tests for the gate decision engine

#[cfg(test)]
mod scoring_tests;
