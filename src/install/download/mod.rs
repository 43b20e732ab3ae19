//! Bootstrap installer download
//!
//! The pipeline only depends on [`ArtifactFetcher`]; [`HttpFetcher`] is the
//! blocking HTTP implementation used by the real installer.

mod core;

pub use self::core::{ArtifactFetcher, DownloadProgress, HttpFetcher};
