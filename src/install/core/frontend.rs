//! Presentation-layer seam

use super::progress::{InstallEvent, Notice};

/// What the orchestrator needs from a user interface.
///
/// Implementations render events and collect the two decisions the pipeline
/// depends on. They own no workflow logic.
pub trait Frontend {
    /// Ask for the installation folder. `None` means the user cancelled.
    fn choose_folder(&mut self, guidance: &Notice) -> Option<String>;

    /// Ask a yes/no question. Anything other than an explicit yes is a no.
    fn confirm(&mut self, question: &Notice) -> bool;

    fn on_event(&mut self, event: &InstallEvent);
}
