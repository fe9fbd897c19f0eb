//! klokka - configurable terminal clock.
//!
//! Library side of the crate so the binaries and integration tests
//! share the same modules.

pub mod fonts;
pub mod input;
pub mod panel;
pub mod refresh;
pub mod settings;
pub mod surface;
pub mod theme;
