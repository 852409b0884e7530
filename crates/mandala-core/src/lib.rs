#![forbid(unsafe_code)]
//! mandala-core library.
//!
//! Holds the declarative side of a mandala: the motifs placed around the
//! rings, the global symmetry parameters, the saved-state document those are
//! loaded from, and the layered configuration files.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for fallible I/O and parsing. Structural
//!   problems in a state document are a [`error::StateError`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod model;
pub mod state;

pub use error::{ErrorCode, StateError};
pub use model::{CenterMotif, EdgeTopology, GlobalParams, LayerStrategy, Motif, RingMotif};
pub use state::{MandalaState, StateInput};
