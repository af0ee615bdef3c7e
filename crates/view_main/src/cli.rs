//! Command line driver

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use view_core::{
    ChdirArgs, ChdirResult, FileView, FileViewConfig, Key, ViewError, ViewEvent, ViewKind,
};
use view_fs::{LocalScanner, ScanSummary};

const SCAN_TIMEOUT: Duration = Duration::from_secs(10);
const POLL_INTERVAL: Duration = Duration::from_millis(5);

#[derive(Parser, Debug, PartialEq)]
#[command(name = "dataview")]
#[command(about = "List a folder through a list, tree or icon view and replay key presses")]
pub struct Args {
    /// Folder to open (defaults to the configured path)
    pub path: Option<String>,

    /// View kind: list, tree or icon
    #[arg(long, short, value_parser = parse_kind)]
    pub kind: Option<ViewKind>,

    /// Keys to press, comma separated (up, down, left, right, enter)
    #[arg(long, value_delimiter = ',', value_parser = parse_key)]
    pub keys: Vec<Key>,

    /// Filename to select after listing
    #[arg(long)]
    pub select: Option<String>,

    /// Show dotfiles
    #[arg(long, short)]
    pub all: bool,

    #[arg(long, short)]
    pub verbose: bool,
}

fn parse_kind(value: &str) -> Result<ViewKind, String> {
    value.parse().map_err(|e: ViewError| e.to_string())
}

fn parse_key(value: &str) -> Result<Key, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("empty key name".to_string());
    }
    Ok(value.parse().unwrap_or(Key::Other))
}

pub fn run(args: Args, mut config: FileViewConfig) -> Result<()> {
    if let Some(kind) = args.kind {
        config.view.kind = kind;
    }
    if args.all {
        config.dotfiles = true;
    }

    let path = resolve_path(args.path.as_deref().unwrap_or(&config.default_path))?;
    let mut view = FileView::new(config, Arc::new(LocalScanner::new()));
    view.focus();

    open(&mut view, &path)?;
    view.take_events();

    if let Some(name) = &args.select {
        if !view.set_selected(&Value::from(name.as_str()), Some("filename"), true) {
            tracing::warn!("No entry named {} in {}", name, path);
        }
    }

    for key in args.keys {
        view.key_down(key);
        settle(&mut view)?;

        for event in view.take_events() {
            if let ViewEvent::Render { .. } = event {
                continue;
            }
            print_line(&serde_json::to_value(&event)?);

            if let Some(dir) = activated_dir(&event) {
                if let Err(e) = open(&mut view, &dir) {
                    if !report(&e) {
                        return Err(e);
                    }
                }
                view.take_events();
            }
        }
    }

    print_rows(&view);
    Ok(())
}

/// List `path` and wait for the result
fn open(view: &mut FileView, path: &str) -> Result<ScanSummary> {
    let done: Rc<RefCell<Option<ChdirResult>>> = Rc::default();
    let sink = done.clone();
    view.chdir(ChdirArgs::new(path), move |result| {
        *sink.borrow_mut() = Some(result);
    });

    let started = Instant::now();
    loop {
        view.poll();
        if let Some(result) = done.borrow_mut().take() {
            let summary = result?;
            print_line(&json!({ "path": path, "summary": summary }));
            return Ok(summary);
        }
        if started.elapsed() > SCAN_TIMEOUT {
            bail!("Timed out listing {}", path);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Wait for scans started by an interaction, such as a tree expand
fn settle(view: &mut FileView) -> Result<()> {
    let started = Instant::now();
    while view.has_pending() {
        view.poll();
        if started.elapsed() > SCAN_TIMEOUT {
            bail!("Timed out waiting for scans");
        }
        std::thread::sleep(POLL_INTERVAL);
    }
    Ok(())
}

/// Print a failure the way a user should read it
///
/// Returns `true` when the session can go on, as after a folder that
/// vanished between listing and activation.
pub fn report(err: &anyhow::Error) -> bool {
    let Some(view_err) = err.downcast_ref::<ViewError>() else {
        return false;
    };
    let recoverable = view_err.is_recoverable();
    if recoverable {
        tracing::warn!("{:#}", err);
    }
    print_line(&json!({ "error": view_err.user_message(), "recoverable": recoverable }));
    recoverable
}

fn activated_dir(event: &ViewEvent) -> Option<String> {
    let ViewEvent::Activate { entries } = event else {
        return None;
    };
    let payload = entries.first()?.payload.as_ref()?;
    if payload.get("type")?.as_str()? != "dir" {
        return None;
    }
    payload.get("path")?.as_str().map(str::to_string)
}

fn resolve_path(path: &str) -> Result<String> {
    let resolved = std::fs::canonicalize(path).with_context(|| format!("Cannot open {}", path))?;
    Ok(resolved.to_string_lossy().to_string())
}

fn print_rows(view: &FileView) {
    let child = view.child();
    for (position, row) in child.rows() {
        let cells: Vec<&str> = row.cells().iter().map(|c| c.label.as_str()).collect();
        print_line(&json!({
            "position": position,
            "depth": child.depth(position),
            "label": row.label(),
            "icon": row.icon(),
            "cells": cells,
            "active": row.active,
        }));
    }
}

fn print_line(value: &Value) {
    println!("{}", value);
}
