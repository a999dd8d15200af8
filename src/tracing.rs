//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! composition, selection and gesture state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=ime=trace,selection=debug` - scoped filtering
//! - `RUST_LOG=preedit::editor=debug` - module-level filtering
//!
//! Targets used across the crate: `ime`, `selection`, `pointer`, `keys`,
//! `message`.
//!
//! # Log Files
//!
//! Logs are written to `~/.config/preedit/logs/preedit.log` with daily rotation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::ime::CompositionPhase;
use crate::selection::SelectionSet;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). The file layer logs at
/// debug level; it is skipped when the logs directory cannot be created.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "preedit.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A second init (tests, embedding hosts) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of selection and composition state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    /// (anchor, caret) per range, primary first
    pub ranges: Vec<(usize, usize)>,
    pub phase: CompositionPhase,
    pub doc_len: usize,
}

impl SelectionSnapshot {
    pub fn capture(selection: &SelectionSet, phase: CompositionPhase, doc_len: usize) -> Self {
        Self {
            ranges: selection
                .ranges()
                .map(|r| (r.anchor.position, r.caret.position))
                .collect(),
            phase,
            doc_len,
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &SelectionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.ranges.len() != other.ranges.len() {
            changes.push(format!(
                "range count: {} → {}",
                self.ranges.len(),
                other.ranges.len()
            ));
        } else {
            for (i, (before, after)) in self.ranges.iter().zip(&other.ranges).enumerate() {
                if before != after {
                    changes.push(format!(
                        "#{}: {}..{} → {}..{}",
                        i, before.0, before.1, after.0, after.1
                    ));
                }
            }
        }
        if self.phase != other.phase {
            changes.push(format!("composition: {:?} → {:?}", self.phase, other.phase));
        }
        if self.doc_len != other.doc_len {
            changes.push(format!("length: {} → {}", self.doc_len, other.doc_len));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
