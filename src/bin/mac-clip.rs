use clap::{Parser, Subcommand};
use mac_clip::{
    clipboard::{
        processor::{read_actions, MacProcessor, ProcessorConfig},
        watcher::ClipboardWatcher,
        ClipboardBackend, ClipboardManager,
    },
    mac::{self, MacReport, MacStyle},
    MacClipError, Result, DEFAULT_POLL_INTERVAL_MS, EVENT_CHANNEL_CAPACITY,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "mac-clip",
    about = "Detects MAC addresses on the clipboard and reformats them",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the clipboard for MAC addresses
    Watch {
        /// Poll interval in milliseconds
        #[arg(short, long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
        interval_ms: u64,

        /// Rewrite detected MACs in this style (colons, dashes, none, dot)
        #[arg(short, long)]
        auto_format: Option<MacStyle>,

        /// Read actions (colons, dashes, none, dot, case, quit) from stdin
        #[arg(short = 'I', long)]
        interactive: bool,
    },

    /// Exit 0 if the text (or clipboard) is a MAC address, 1 otherwise
    Check {
        /// Text to check instead of the clipboard
        text: Option<String>,
    },

    /// Reformat a MAC address and copy it
    Format {
        /// Target style (colons, dashes, none, dot)
        style: MacStyle,

        /// MAC to format instead of the clipboard
        text: Option<String>,

        /// Print only, leave the clipboard alone
        #[arg(long)]
        no_copy: bool,
    },

    /// Toggle upper/lower case and copy the result
    Case {
        /// Text to convert instead of the clipboard
        text: Option<String>,

        /// Print only, leave the clipboard alone
        #[arg(long)]
        no_copy: bool,
    },

    /// Show every rendering of a MAC address
    Show {
        /// Text to inspect instead of the clipboard
        text: Option<String>,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the results.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mac_clip=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Watch {
            interval_ms,
            auto_format,
            interactive,
        } => {
            info!("Starting mac-clip clipboard watcher...");

            let clipboard: Arc<dyn ClipboardBackend> = Arc::new(ClipboardManager::new()?);

            let (watcher, event_rx) =
                ClipboardWatcher::new(clipboard.clone(), Duration::from_millis(interval_ms));

            let processor = MacProcessor::new(
                ProcessorConfig {
                    auto_format,
                    ..Default::default()
                },
                clipboard,
            );

            let (action_tx, action_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

            tokio::spawn(async move {
                watcher.start_watching().await;
            });

            if let Some(style) = auto_format {
                info!("Detected MACs will be rewritten as {}", style);
            }

            // Stdin is read on a plain thread: a pending read there does not
            // hold up runtime shutdown on Ctrl-C.
            let input_closed = if interactive {
                info!("Interactive mode: type colons, dashes, none, dot, case or quit");
                let (done_tx, done_rx) = oneshot::channel();
                std::thread::spawn(move || {
                    read_actions(std::io::stdin().lock(), action_tx);
                    let _ = done_tx.send(());
                });
                Some(done_rx)
            } else {
                // Nobody sends actions; closing the channel leaves the
                // processor serving detection events only.
                drop(action_tx);
                None
            };

            let processor_task = tokio::spawn(processor.run(event_rx, action_rx));

            tokio::select! {
                _ = tokio::signal::ctrl_c() => info!("Interrupted, shutting down"),
                result = processor_task => {
                    if let Err(e) = result {
                        error!("Processor task failed: {}", e);
                    }
                }
                _ = async {
                    match input_closed {
                        Some(done_rx) => {
                            if let Err(e) = done_rx.await {
                                error!("Input thread exited abnormally: {}", e);
                            }
                        }
                        None => std::future::pending::<()>().await,
                    }
                } => info!("Input closed, shutting down"),
            }
        }

        Commands::Check { text } => {
            let text = input_text(text)?;

            if mac::is_mac_address(&text) {
                println!("{}", text.trim());
            } else {
                error!("Not a MAC address: {}", text.trim());
                std::process::exit(1);
            }
        }

        Commands::Format {
            style,
            text,
            no_copy,
        } => {
            let text = input_text(text)?;

            match mac::format_mac_address(&text, style) {
                Ok(formatted) => {
                    if !no_copy {
                        ClipboardManager::new()?.write_text(&formatted)?;
                    }
                    println!("{formatted}");
                }
                Err(e) => {
                    error!("{}", MacClipError::from(e));
                    std::process::exit(1);
                }
            }
        }

        Commands::Case { text, no_copy } => {
            let text = input_text(text)?;
            let converted = mac::convert_case(&text);

            if !no_copy {
                ClipboardManager::new()?.write_text(&converted)?;
            }
            println!("{converted}");
        }

        Commands::Show { text, format } => {
            let text = input_text(text)?;
            let report = MacReport::new(&text);

            match format.as_str() {
                "json" => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                "text" => {
                    print!("{report}");
                }
                _ => {
                    error!("Unknown format: {}", format);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// The given text, or the clipboard's text when none was given.
fn input_text(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => ClipboardManager::new()?.read_text(),
    }
}
