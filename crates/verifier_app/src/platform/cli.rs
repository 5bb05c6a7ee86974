use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use verifier_core::{ElementInfo, UiEvent, RECOMPILE_LABEL};

/// Sends a LaTeX document to the verification service and shows the verdict.
#[derive(Debug, Parser)]
#[command(name = "verifier_app", version)]
pub struct Cli {
    /// LaTeX document standing in for the editor contents.
    pub document: PathBuf,

    /// RON configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Overrides the configured verification endpoint.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// How the verification is triggered.
    #[arg(long, value_enum, default_value_t = TriggerKind::Shortcut)]
    pub trigger: TriggerKind,

    /// Milliseconds before the simulated editor becomes readable.
    #[arg(long, default_value_t = 0)]
    pub mount_delay_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TriggerKind {
    /// Ctrl+Enter.
    Shortcut,
    /// Click on the Recompile button label.
    Click,
}

impl TriggerKind {
    pub fn event(self) -> UiEvent {
        match self {
            TriggerKind::Shortcut => UiEvent::key_down("Enter", true, false),
            TriggerKind::Click => UiEvent::click(vec![
                ElementInfo::new("span", RECOMPILE_LABEL),
                ElementInfo::button(RECOMPILE_LABEL),
            ]),
        }
    }
}
