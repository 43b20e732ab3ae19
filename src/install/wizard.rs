//! Interactive terminal frontend for `cnapy-installer`

use std::io::Write;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Confirm, Text};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use super::cli::Cli;
use super::core::{Frontend, InstallEvent, InstallState, Notice, NoticeKind};
use super::environment::suggested_parent_folder;
use crate::config::InstallerConfig;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Renders installer events on the terminal and asks questions with inquire
pub struct TerminalFrontend {
    preset_target: Option<String>,
    non_interactive: bool,
    assume_yes: bool,
    spinner: Option<ProgressBar>,
}

impl TerminalFrontend {
    pub fn new(cli: &Cli) -> Self {
        Self {
            preset_target: cli.target.clone(),
            non_interactive: cli.is_non_interactive(),
            assume_yes: cli.assume_yes(),
            spinner: None,
        }
    }

    fn clear_spinner(&mut self) {
        if let Some(bar) = self.spinner.take() {
            bar.finish_and_clear();
        }
    }

    fn start_spinner(&mut self, message: &str) {
        self.clear_spinner();
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(120));
        self.spinner = Some(bar);
    }

    fn start_download_bar(&mut self) {
        self.clear_spinner();
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("   [{bar:50.green/blue}] {bytes}/{total_bytes}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_message("📥 Miniconda");
        self.spinner = Some(bar);
    }

    /// Print outside of any running progress bar
    fn print(&self, f: impl FnOnce()) {
        match &self.spinner {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }
}

impl Frontend for TerminalFrontend {
    fn choose_folder(&mut self, guidance: &Notice) -> Option<String> {
        print_notice(guidance);

        if let Some(target) = &self.preset_target {
            log::info!("Using installation folder from command line: {target}");
            return Some(target.clone());
        }
        if self.non_interactive {
            log::warn!("No installation folder given and prompting is disabled");
            return None;
        }

        let mut prompt = Text::new("Installation folder:")
            .with_help_message("Must exist and be empty. Press Esc to cancel.");
        let suggestion = suggested_parent_folder();
        if let Some(suggestion) = suggestion.as_deref() {
            prompt = prompt.with_placeholder(suggestion);
        }

        match prompt.prompt() {
            Ok(folder) => Some(folder),
            Err(e) => {
                log::info!("Folder prompt cancelled: {e}");
                None
            }
        }
    }

    fn confirm(&mut self, question: &Notice) -> bool {
        print_notice(question);

        if self.assume_yes {
            log::info!("Confirmation pre-answered with yes");
            return true;
        }
        if self.non_interactive {
            return false;
        }

        Confirm::new("Proceed with the installation?")
            .with_default(true)
            .prompt()
            .unwrap_or(false)
    }

    fn on_event(&mut self, event: &InstallEvent) {
        match event {
            InstallEvent::State(state) => match state {
                InstallState::Downloading => self.start_download_bar(),
                InstallState::Installing
                | InstallState::Provisioning
                | InstallState::WritingUninstaller => self.start_spinner(state.label()),
                InstallState::Succeeded | InstallState::Aborted => self.clear_spinner(),
                _ => log::debug!("{}", state.label()),
            },
            InstallEvent::Download(progress) => {
                if let Some(bar) = &self.spinner {
                    if let Some(total) = progress.total {
                        bar.set_length(total);
                    }
                    bar.set_position(progress.downloaded);
                }
            }
            InstallEvent::Warning { step, message } => {
                self.print(|| {
                    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
                    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
                    let _ = writeln!(stderr, "⚠ [{}] {message}", step.label());
                    let _ = stderr.reset();
                });
            }
            InstallEvent::Notice(notice) => {
                self.clear_spinner();
                print_notice(notice);
            }
        }
    }
}

/// Display welcome banner
pub fn show_welcome(config: &InstallerConfig) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)));
    let _ = writeln!(stdout, "\n{RULE}");
    let _ = stdout.reset();

    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
    let _ = writeln!(
        stdout,
        "\n           {} {} installer",
        config.app_display_name, config.app_version
    );
    let _ = stdout.reset();

    let _ = writeln!(stdout, "\nThis will install:");
    let _ = writeln!(stdout, "  • Miniconda (private copy, no PATH or registry changes)");
    let _ = writeln!(
        stdout,
        "  • {} {} in the conda environment '{}'",
        config.app_display_name,
        config.app_version,
        config.environment_name()
    );
    let _ = writeln!(
        stdout,
        "  • {} to remove everything again",
        config.uninstall_script_name()
    );

    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)));
    let _ = writeln!(stdout, "\n{RULE}\n");
    let _ = stdout.reset();
}

fn print_notice(notice: &Notice) {
    let (mut stream, color, icon) = match notice.kind {
        NoticeKind::Info => (StandardStream::stdout(ColorChoice::Auto), Color::Cyan, "ℹ"),
        NoticeKind::Question => (StandardStream::stdout(ColorChoice::Auto), Color::Cyan, "?"),
        NoticeKind::Warning => (StandardStream::stderr(ColorChoice::Auto), Color::Yellow, "⚠"),
        NoticeKind::Error => (StandardStream::stderr(ColorChoice::Auto), Color::Red, "❌"),
        NoticeKind::Success => (StandardStream::stdout(ColorChoice::Auto), Color::Green, "✓"),
    };

    let boxed = matches!(notice.kind, NoticeKind::Success | NoticeKind::Error);
    if boxed {
        let _ = stream.set_color(ColorSpec::new().set_fg(Some(color)));
        let _ = writeln!(stream, "\n{RULE}");
        let _ = stream.reset();
    }

    let _ = stream.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = writeln!(stream, "\n{icon} {}", notice.title);
    let _ = stream.reset();
    for line in notice.body.lines() {
        let _ = writeln!(stream, "   {line}");
    }

    if boxed {
        let _ = stream.set_color(ColorSpec::new().set_fg(Some(color)));
        let _ = writeln!(stream, "\n{RULE}\n");
        let _ = stream.reset();
    }
}
