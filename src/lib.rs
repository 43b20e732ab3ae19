//! Guided installer for CNApy on top of a private Miniconda.

pub mod config;
pub mod install;
