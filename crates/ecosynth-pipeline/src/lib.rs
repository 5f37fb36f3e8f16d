//! Ecosynth Pipeline Orchestrator
//!
//! Drives one run through the pipeline state machine:
//!
//! ```text
//! INIT -> FETCHING -> MAPPING -> GENERATING -> [RENDERING] -> PERSISTING -> DONE
//!             |                      |              |
//!             +----------------------+--------------+--> ABORTED
//! ```
//!
//! The rendering stage occurs only on the symbolic generation path. Stages
//! run strictly sequentially; the only retries happen inside the
//! environment client during fetching, and every other failure aborts the
//! run. Artifacts are staged in a temporary directory and only renamed into
//! the output root during persisting, so an aborted run never leaves a
//! partial waveform or metadata record visible.
//!
//! # Modules
//!
//! - [`orchestrator`]: The run state machine
//! - [`metadata`]: Durable metadata record writer
//! - [`error`]: Stage-tagged pipeline errors

pub mod metadata;
pub mod orchestrator;

mod error;

pub use error::PipelineError;
pub use metadata::MetadataWriter;
pub use orchestrator::{GenerationPath, Orchestrator, OrchestratorConfig};
