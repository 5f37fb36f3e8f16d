//! Ecosynth CLI library.
//!
//! Command implementations for the `ecosynth` binary: running the full
//! environment-to-music pipeline, previewing the derivation offline, and
//! checking system dependencies.

pub mod commands;
