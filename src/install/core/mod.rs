//! Core installer types shared by the orchestrator and the frontends
//!
//! The orchestrator only talks to the outside world through these types:
//! state changes and notices flow out as [`InstallEvent`]s, user decisions
//! flow in through [`Frontend`].

mod frontend;
mod progress;
mod state;

pub use frontend::Frontend;
pub use progress::{InstallEvent, Notice, NoticeKind};
pub use state::InstallState;
