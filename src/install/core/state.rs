//! Installation state machine states

/// Position of a run in the installation pipeline.
///
/// The happy path visits every state from `Idle` to `Succeeded` in order.
/// `Aborted` can be entered from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InstallState {
    Idle,
    AwaitingFolderChoice,
    Validating,
    ConfirmPending,
    Downloading,
    Installing,
    Provisioning,
    WritingUninstaller,
    Succeeded,
    Aborted,
}

impl InstallState {
    pub fn is_terminal(self) -> bool {
        matches!(self, InstallState::Succeeded | InstallState::Aborted)
    }

    /// The only state reachable on success from `self`
    pub fn successor(self) -> Option<InstallState> {
        use InstallState::*;
        match self {
            Idle => Some(AwaitingFolderChoice),
            AwaitingFolderChoice => Some(Validating),
            Validating => Some(ConfirmPending),
            ConfirmPending => Some(Downloading),
            Downloading => Some(Installing),
            Installing => Some(Provisioning),
            Provisioning => Some(WritingUninstaller),
            WritingUninstaller => Some(Succeeded),
            Succeeded | Aborted => None,
        }
    }

    pub fn can_advance_to(self, next: InstallState) -> bool {
        if self.is_terminal() {
            return false;
        }
        next == InstallState::Aborted || self.successor() == Some(next)
    }

    /// Human-readable step name
    pub fn label(self) -> &'static str {
        match self {
            InstallState::Idle => "Ready",
            InstallState::AwaitingFolderChoice => "Choosing installation folder",
            InstallState::Validating => "Checking installation folder",
            InstallState::ConfirmPending => "Waiting for confirmation",
            InstallState::Downloading => "Downloading Miniconda",
            InstallState::Installing => "Installing Miniconda",
            InstallState::Provisioning => "Creating application environment",
            InstallState::WritingUninstaller => "Writing uninstall script",
            InstallState::Succeeded => "Installation complete",
            InstallState::Aborted => "Installation aborted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_is_strictly_linear() {
        let mut state = InstallState::Idle;
        let mut visited = vec![state];
        while let Some(next) = state.successor() {
            assert!(state.can_advance_to(next));
            assert!(next > state);
            state = next;
            visited.push(state);
        }
        assert_eq!(state, InstallState::Succeeded);
        assert_eq!(visited.len(), 9);
    }

    #[test]
    fn no_skipping_and_no_going_back() {
        assert!(!InstallState::Validating.can_advance_to(InstallState::Downloading));
        assert!(!InstallState::Installing.can_advance_to(InstallState::Downloading));
        assert!(!InstallState::Installing.can_advance_to(InstallState::Installing));
    }

    #[test]
    fn abort_is_reachable_until_terminal() {
        assert!(InstallState::Idle.can_advance_to(InstallState::Aborted));
        assert!(InstallState::WritingUninstaller.can_advance_to(InstallState::Aborted));
        assert!(!InstallState::Succeeded.can_advance_to(InstallState::Aborted));
        assert!(!InstallState::Aborted.can_advance_to(InstallState::Aborted));
    }
}
