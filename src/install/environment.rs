//! Terminal detection
//!
//! Decides whether the installer may prompt. Prompts need both an interactive
//! stdin (answers) and stdout (the prompt itself).

use std::io::IsTerminal;

/// Check if both stdin and stdout are attached to a terminal
///
/// Returns `false` under CI, when piped, or when launched without a console.
pub fn is_interactive_terminal() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Folder suggested as a starting point in the folder prompt
pub fn suggested_parent_folder() -> Option<String> {
    #[cfg(target_os = "windows")]
    {
        Some("C:\\Program Files".to_string())
    }

    #[cfg(not(target_os = "windows"))]
    {
        dirs::home_dir().map(|home| home.display().to_string())
    }
}
