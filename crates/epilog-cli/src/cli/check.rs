use crate::{EngineArgs, COLOR_CYAN, COLOR_GREEN, COLOR_RED, COLOR_RESET, COLOR_YELLOW};
use notify::{recommended_watcher, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

pub fn run(args: &EngineArgs, files: &[PathBuf], watch: bool) {
    if files.is_empty() {
        eprintln!("No program files provided.");
        std::process::exit(1);
    }

    #[derive(Clone)]
    struct InputFile {
        canonical: PathBuf,
        display: String,
    }

    let mut seen = HashSet::new();
    let mut inputs = Vec::new();
    for file in files {
        if !file.exists() {
            eprintln!("File '{}' not found.", file.display());
            std::process::exit(1);
        }
        let canonical = file.canonicalize().unwrap_or_else(|_| file.clone());
        if seen.insert(canonical.clone()) {
            inputs.push(InputFile {
                canonical,
                display: file.display().to_string(),
            });
        }
    }

    let check_all = |inputs: &[InputFile]| {
        let mut clean = true;
        for (idx, file) in inputs.iter().enumerate() {
            clean &= check_file(args, &file.canonical, &file.display);
            if idx < inputs.len() - 1 {
                println!();
            }
        }
        clean
    };
    let clean = check_all(&inputs);

    if !watch {
        if !clean {
            std::process::exit(1);
        }
        return;
    }

    let file_list = inputs
        .iter()
        .map(|f| f.display.clone())
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "{}Watching {} for changes... Press Ctrl+C to stop.{}",
        COLOR_CYAN, file_list, COLOR_RESET
    );

    let (tx, rx) = mpsc::channel();
    let mut watcher: RecommendedWatcher = match recommended_watcher(move |res| {
        let _ = tx.send(res);
    }) {
        Ok(w) => w,
        Err(err) => {
            eprintln!("Failed to start file watcher: {}", err);
            std::process::exit(1);
        }
    };
    for file in &inputs {
        if let Err(err) = watcher.watch(&file.canonical, RecursiveMode::NonRecursive) {
            eprintln!("Failed to watch '{}': {}", file.display, err);
        }
    }

    let mut last_event = Instant::now();
    while let Ok(event) = rx.recv() {
        match event {
            Ok(event) => {
                if should_trigger(&event) && last_event.elapsed() >= Duration::from_millis(100) {
                    last_event = Instant::now();
                    println!("\n{}Detected change, checking again...{}", COLOR_CYAN, COLOR_RESET);
                    check_all(&inputs);
                }
            }
            Err(err) => eprintln!("Watch error: {}", err),
        }
    }
}

/// Print the diagnostics of one file. Returns whether it is clean.
fn check_file(args: &EngineArgs, path: &Path, display_name: &str) -> bool {
    let Some(session) = super::load_session(args, path) else {
        return false;
    };
    let diagnostics = session.check();
    println!(
        "{}Checking '{}' ({} sentences)...{}",
        COLOR_CYAN,
        display_name,
        session.sentences().len(),
        COLOR_RESET
    );
    for diagnostic in &diagnostics {
        println!("  {}{}{}", COLOR_RED, diagnostic, COLOR_RESET);
    }
    let (color, status) = if diagnostics.is_empty() {
        (COLOR_GREEN, "OK")
    } else {
        (COLOR_RED, "FAIL")
    };
    println!(
        "{}Summary:{} {} problem(s) | Status: {}{}{}",
        COLOR_YELLOW,
        COLOR_RESET,
        diagnostics.len(),
        color,
        status,
        COLOR_RESET
    );
    diagnostics.is_empty()
}

fn should_trigger(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) | EventKind::Any
    )
}
