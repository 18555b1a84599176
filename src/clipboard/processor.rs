use std::fmt;
use std::io::BufRead;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use super::{watcher::MacEvent, ClipboardBackend};
use crate::mac::{convert_case, format_mac_address, MacReport, MacStyle};
use crate::{MacClipError, Result};

/// A user request against the current entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Format(MacStyle),
    ConvertCase,
}

impl FromStr for Action {
    type Err = MacClipError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "case" | "convert_case" | "c" => Ok(Action::ConvertCase),
            other => other
                .parse::<MacStyle>()
                .map(Action::Format)
                .map_err(|_| MacClipError::UnknownAction(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Format(style) => write!(f, "format as {style}"),
            Action::ConvertCase => f.write_str("convert case"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Rewrite every detected MAC in this style straight away.
    pub auto_format: Option<MacStyle>,
    /// Print the renderings of each detected MAC to stdout.
    pub print_renderings: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            auto_format: None,
            print_renderings: true,
        }
    }
}

pub struct MacProcessor {
    config: ProcessorConfig,
    clipboard: Arc<dyn ClipboardBackend>,
    entry: Option<String>,
    last_written: Option<String>,
}

impl MacProcessor {
    pub fn new(config: ProcessorConfig, clipboard: Arc<dyn ClipboardBackend>) -> Self {
        Self {
            config,
            clipboard,
            entry: None,
            last_written: None,
        }
    }

    pub fn entry(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    /// Takes a detected MAC as the new entry.
    ///
    /// Auto-format leaves text this processor copied itself alone, so an
    /// explicit format action is not undone on the next poll.
    pub fn handle_event(&mut self, event: MacEvent) -> Result<MacReport> {
        let report = MacReport::new(&event.mac);
        let own_output = self.last_written.as_deref() == Some(event.mac.as_str());
        self.entry = Some(event.mac);

        match self.config.auto_format {
            Some(style) if !own_output => {
                let formatted = format_mac_address(&report.input, style)?;
                if formatted != report.input {
                    self.copy(&formatted)?;
                    info!("Reformatted clipboard MAC as {}: {}", style, formatted);
                } else {
                    debug!("Clipboard MAC already in {} style", style);
                }
            }
            Some(_) => debug!("Clipboard holds our own output, not reformatting"),
            None => {}
        }

        Ok(report)
    }

    /// Applies `action` to the current entry and copies the result.
    pub fn apply(&mut self, action: Action) -> Result<String> {
        let entry = self.entry.as_deref().ok_or(MacClipError::NoEntry)?;

        let output = match action {
            Action::Format(style) => format_mac_address(entry, style)?,
            Action::ConvertCase => {
                let converted = convert_case(entry);
                self.entry = Some(converted.clone());
                converted
            }
        };

        self.copy(&output)?;
        info!("{}: copied {}", action, output);
        Ok(output)
    }

    fn copy(&mut self, text: &str) -> Result<()> {
        self.clipboard.write_text(text)?;
        self.last_written = Some(text.to_string());
        Ok(())
    }

    /// Serves detection events and user actions until both channels close.
    pub async fn run(
        mut self,
        mut event_rx: mpsc::Receiver<MacEvent>,
        mut action_rx: mpsc::Receiver<Action>,
    ) {
        info!("MAC processor started");

        let mut events_open = true;
        let mut actions_open = true;

        while events_open || actions_open {
            // A fresh detection replaces the entry before queued actions run.
            tokio::select! {
                biased;

                event = event_rx.recv(), if events_open => match event {
                    Some(event) => match self.handle_event(event) {
                        Ok(report) if self.config.print_renderings => print!("{report}"),
                        Ok(_) => {}
                        Err(e) => error!("Failed to handle clipboard MAC: {}", e),
                    },
                    None => events_open = false,
                },
                action = action_rx.recv(), if actions_open => match action {
                    Some(action) => match self.apply(action) {
                        Ok(output) => println!("{output}"),
                        Err(e) => error!("Failed to {}: {}", action, e),
                    },
                    None => actions_open = false,
                },
            }
        }

        info!("MAC processor stopped");
    }
}

/// Parses one action per line from `reader` and forwards it.
///
/// Blocking; run it on its own thread. Stops at `quit`, end of input, or
/// once the processor is gone. Blank lines are skipped and unknown words are
/// logged.
pub fn read_actions<R: BufRead>(reader: R, action_tx: mpsc::Sender<Action>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("q") {
            break;
        }

        match line.parse::<Action>() {
            Ok(action) => {
                if action_tx.blocking_send(action).is_err() {
                    break;
                }
            }
            Err(e) => error!("{}", e),
        }
    }

    info!("Interactive input closed");
}
