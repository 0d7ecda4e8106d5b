use crate::repl::{EngineResponse, ReplEngine, ResponseKind, HELP_LINES};
use crate::{EngineArgs, COLOR_CYAN, COLOR_GREEN, COLOR_RED, COLOR_RESET, COLOR_YELLOW};
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{stdout, Stdout, Write};
use std::{fs, path::Path, time::Duration};

struct ReplState {
    input: String,
    history: Vec<String>,
    should_quit: bool,
    engine: ReplEngine,
}

impl ReplState {
    fn new(engine: ReplEngine) -> Self {
        Self {
            input: String::new(),
            history: Vec::new(),
            should_quit: false,
            engine,
        }
    }

    fn push_history(&mut self, line: impl Into<String>) {
        const MAX_LEN: usize = 500;
        self.history.push(line.into());
        if self.history.len() > MAX_LEN {
            let excess = self.history.len() - MAX_LEN;
            self.history.drain(0..excess);
        }
    }

    fn record_response(&mut self, response: EngineResponse) {
        let Some(first) = response.lines.first().cloned() else {
            return;
        };
        let color = match response.kind {
            ResponseKind::Info => COLOR_CYAN,
            ResponseKind::Output if first == "false." || first.starts_with("No ") => COLOR_RED,
            ResponseKind::Output if first == "true." => COLOR_GREEN,
            ResponseKind::Output => COLOR_YELLOW,
            ResponseKind::Error => COLOR_RED,
        };
        self.push_history(format!("{}{}{}", color, first, COLOR_RESET));
        for line in response.lines.into_iter().skip(1) {
            if response.kind == ResponseKind::Error {
                self.push_history(format!("{}{}{}", COLOR_RED, line, COLOR_RESET));
            } else {
                self.push_history(line);
            }
        }
    }

    fn submit(&mut self) {
        let trimmed = self.input.trim().to_string();
        self.input.clear();
        if trimmed.is_empty() {
            return;
        }
        self.push_history(format!("> {}", trimmed));
        match trimmed.as_str() {
            ":quit" | ":q" => {
                self.push_history("Goodbye!");
                self.should_quit = true;
            }
            ":help" | ":h" => {
                for (i, line) in HELP_LINES.iter().enumerate() {
                    if i == 0 {
                        self.push_history(format!("{}{}{}", COLOR_CYAN, line, COLOR_RESET));
                    } else {
                        self.push_history(*line);
                    }
                }
            }
            _ => {
                let response = self.engine.process_line(&trimmed);
                self.record_response(response);
            }
        }
    }

    fn draw(&self, out: &mut Stdout) -> std::io::Result<()> {
        let (width, height) = terminal::size()?;
        let rows = height.saturating_sub(2) as usize;
        queue!(out, Clear(ClearType::All))?;
        let start = self.history.len().saturating_sub(rows.max(1));
        for (row, line) in self.history.iter().skip(start).enumerate() {
            queue!(out, MoveTo(0, row as u16), Print(line))?;
        }
        let rule = "─".repeat(width as usize);
        let prompt_row = height.saturating_sub(1);
        queue!(
            out,
            MoveTo(0, prompt_row.saturating_sub(1)),
            Print(&rule),
            MoveTo(0, prompt_row),
            Print(format!("?> {}", self.input)),
            MoveTo(3 + self.input.chars().count() as u16, prompt_row)
        )?;
        out.flush()
    }
}

pub fn run(args: &EngineArgs, initial_file: Option<&Path>) -> std::io::Result<()> {
    let mut state = ReplState::new(ReplEngine::with_session(args.session()));
    state.push_history(format!(
        "{}Welcome to the Epilog REPL! Type :help for commands.{}",
        COLOR_CYAN, COLOR_RESET
    ));

    if let Some(path) = initial_file {
        let display_name = path.to_string_lossy().to_string();
        match fs::read_to_string(path) {
            Ok(content) => {
                state.push_history(format!("{}Loading file: {}{}", COLOR_CYAN, display_name, COLOR_RESET));
                let response = state.engine.process_line(&content);
                state.record_response(response);
            }
            Err(err) => {
                state.push_history(format!(
                    "{}Failed to read '{}': {}{}",
                    COLOR_RED, display_name, err, COLOR_RESET
                ));
            }
        }
    }

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;

    let res = event_loop(&mut state, &mut out);

    disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen)?;
    res
}

fn event_loop(state: &mut ReplState, out: &mut Stdout) -> std::io::Result<()> {
    loop {
        state.draw(out)?;
        if state.should_quit {
            return Ok(());
        }
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    state.should_quit = true;
                }
                KeyCode::Char(ch) => {
                    if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                        state.input.push(ch);
                    }
                }
                KeyCode::Backspace => {
                    state.input.pop();
                }
                KeyCode::Esc => state.should_quit = true,
                KeyCode::Enter => state.submit(),
                _ => {}
            }
        }
    }
}
