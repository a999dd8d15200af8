//! Command-line argument parsing for the replay tool
//!
//! Supports:
//! - Replaying a JSON event script against an in-memory document
//! - Choosing the platform profile and config file
//! - JSON output for scripting
//! - Optional use of the OS clipboard

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::Platform;

/// Replay recorded keyboard, pointer, touch and input-method events
#[derive(Parser, Debug)]
#[command(name = "preedit", version, about = "Replay editor input events")]
pub struct CliArgs {
    /// Event script (JSON); reads stdin when omitted
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Input config file (defaults to the user config)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Platform profile to emulate
    #[arg(short, long, value_enum)]
    pub platform: Option<PlatformArg>,

    /// Print the final state as JSON
    #[arg(long)]
    pub json: bool,

    /// Also print every notification
    #[arg(short, long)]
    pub notifications: bool,

    /// Copy and paste through the OS clipboard instead of an in-memory one
    #[arg(long)]
    pub system_clipboard: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    Windows,
    Mac,
    X11,
    Android,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Windows => Platform::Windows,
            PlatformArg::Mac => Platform::Mac,
            PlatformArg::X11 => Platform::X11,
            PlatformArg::Android => Platform::Android,
        }
    }
}
