use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use preedit::cli::CliArgs;
use preedit::clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
use preedit::config::InputConfig;
use preedit::coords::GridMapper;
use preedit::document::RopeDocument;
use preedit::editor::Editor;
use preedit::messages::ReplayScript;
use preedit::notify::Notification;
use preedit::update::update;

/// Final state printed after a replay
#[derive(Serialize)]
struct Report {
    text: String,
    /// (anchor, caret) per range, primary first
    selections: Vec<(usize, usize)>,
    composing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    notifications: Option<Vec<Notification>>,
}

fn read_script(args: &CliArgs) -> Result<ReplayScript> {
    let source = match &args.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read script from stdin")?;
            buf
        }
    };
    serde_json::from_str(&source).context("Invalid event script")
}

fn main() -> Result<()> {
    preedit::tracing::init();

    let args = CliArgs::parse();
    let script = read_script(&args)?;

    // --config beats the script's embedded config, which beats the user file
    let mut config = match (&args.config, &script.config) {
        (Some(path), _) => InputConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        (None, Some(config)) => config.clone(),
        (None, None) => InputConfig::load(),
    };
    if let Some(platform) = args.platform {
        config.platform = platform.into();
    }

    let mut doc = RopeDocument::from_text(&script.text).with_max_length(config.max_document_length);
    for &(start, end) in &script.protected {
        doc.protect(start..end);
    }

    let clipboard: Box<dyn Clipboard> = if args.system_clipboard {
        Box::new(SystemClipboard::new())
    } else {
        Box::new(MemoryClipboard::new())
    };
    let mut editor = Editor::with_clipboard(doc, GridMapper::default(), config, clipboard);
    tracing::info!(events = script.events.len(), "replaying script");
    for msg in script.events {
        update(&mut editor, msg);
    }

    let notifications = editor.take_notifications();
    let report = Report {
        text: editor.text(),
        selections: editor
            .selection()
            .ranges()
            .map(|r| (r.anchor.position, r.caret.position))
            .collect(),
        composing: !editor.composition().is_idle(),
        notifications: args.notifications.then_some(notifications),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.text);
    for (i, (anchor, caret)) in report.selections.iter().enumerate() {
        println!("selection {}: {}..{}", i, anchor, caret);
    }
    if report.composing {
        println!("(composition in progress)");
    }
    for notification in report.notifications.iter().flatten() {
        println!("{:?}", notification);
    }
    Ok(())
}
