// SPDX-License-Identifier: MIT
// `taskd ui` ratatui terminal client.
//
// Full-screen interactive TUI over the REST API:
//   - Header: API endpoint + open/total counts
//   - Scrollable task list (Up/Down to select)
//   - Input line at the bottom (Enter to add, Ctrl+T toggle, Ctrl+D delete)
//
// Local state mirrors the server: the list is fetched once on startup and
// patched after each successful mutation. Failed calls are logged only; the
// list is not rolled back.

use anyhow::{Context as _, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Terminal,
};
use std::io;
use tokio::sync::mpsc;
use tracing::error;

use super::client::ApiClient;
use crate::tasks::Task;

/// Completion of a fire-and-forget API call, delivered back to the render loop.
enum UiEvent {
    Loaded(Vec<Task>),
    Created(Task),
    Replaced(Task),
    Deleted(i64),
}

/// Run one API call in the background. A completion updates local state via
/// `tx`; a failure is logged and the UI state is left as-is (no rollback).
fn spawn_call(
    tx: mpsc::UnboundedSender<UiEvent>,
    op: &'static str,
    fut: impl std::future::Future<Output = Result<UiEvent>> + Send + 'static,
) {
    tokio::spawn(async move {
        match fut.await {
            Ok(event) => {
                let _ = tx.send(event);
            }
            Err(e) => error!(op, err = %e, "task API call failed"),
        }
    });
}

/// ratatui-based interactive task list.
pub struct TaskUi {
    client: ApiClient,
    base_url: String,
}

impl TaskUi {
    pub fn new(client: ApiClient, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Start the interactive TUI loop.
    pub async fn run(self) -> Result<()> {
        // Set up terminal.
        enable_raw_mode().context("enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("create terminal")?;

        let result = self.event_loop(&mut terminal).await;

        // Restore terminal regardless of result.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<UiEvent>();

        // Initial load: fetch the list once. A failure is logged and leaves
        // the list empty.
        {
            let client = self.client.clone();
            spawn_call(tx.clone(), "load", async move {
                client.list().await.map(UiEvent::Loaded)
            });
        }

        let mut tasks: Vec<Task> = Vec::new();
        let mut input_buf = String::new();
        let mut selected: usize = 0;

        loop {
            // Draw UI.
            terminal.draw(|f| {
                draw_ui(f, &tasks, &input_buf, selected, &self.base_url);
            })?;

            // Poll for terminal events (non-blocking, 50ms timeout).
            if event::poll(std::time::Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    match (key.code, key.modifiers) {
                        // Ctrl+C or Esc: quit.
                        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => break,
                        // Ctrl+T: toggle the selected task's completed flag.
                        (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                            if let Some(task) = tasks.get(selected) {
                                let mut updated = task.clone();
                                updated.completed = !updated.completed;
                                let client = self.client.clone();
                                spawn_call(tx.clone(), "toggle", async move {
                                    client.replace(&updated).await?;
                                    Ok(UiEvent::Replaced(updated))
                                });
                            }
                        }
                        // Ctrl+D: delete the selected task.
                        (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                            if let Some(task) = tasks.get(selected) {
                                let id = task.id;
                                let client = self.client.clone();
                                spawn_call(tx.clone(), "delete", async move {
                                    client.delete(id).await?;
                                    Ok(UiEvent::Deleted(id))
                                });
                            }
                        }
                        // Enter: submit the new-task form (ignored while empty).
                        (KeyCode::Enter, _) => {
                            let title = input_buf.trim().to_owned();
                            if !title.is_empty() {
                                let client = self.client.clone();
                                spawn_call(tx.clone(), "create", async move {
                                    client.create(&title).await.map(UiEvent::Created)
                                });
                            }
                        }
                        (KeyCode::Up, _) => selected = selected.saturating_sub(1),
                        (KeyCode::Down, _) => {
                            if selected + 1 < tasks.len() {
                                selected += 1;
                            }
                        }
                        (KeyCode::Backspace, _) => {
                            input_buf.pop();
                        }
                        // Regular character input.
                        (KeyCode::Char(c), _) => {
                            input_buf.push(c);
                        }
                        _ => {}
                    }
                }
            }

            // Drain completed API calls; each one patches local state.
            while let Ok(ev) = rx.try_recv() {
                match ev {
                    UiEvent::Loaded(list) => {
                        tasks = list;
                        selected = 0;
                    }
                    UiEvent::Created(task) => {
                        tasks.push(task);
                        input_buf.clear();
                    }
                    UiEvent::Replaced(updated) => {
                        if let Some(t) = tasks.iter_mut().find(|t| t.id == updated.id) {
                            *t = updated;
                        }
                    }
                    UiEvent::Deleted(id) => {
                        tasks.retain(|t| t.id != id);
                        if selected >= tasks.len() {
                            selected = tasks.len().saturating_sub(1);
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

// ─── UI rendering ─────────────────────────────────────────────────────────────

fn draw_ui(f: &mut ratatui::Frame, tasks: &[Task], input: &str, selected: usize, base_url: &str) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(3),    // task list
            Constraint::Length(3), // input area
            Constraint::Length(1), // help line
        ])
        .split(area);

    render_header(f, chunks[0], tasks, base_url);
    render_tasks(f, chunks[1], tasks, selected);
    render_input(f, chunks[2], input);
    render_help(f, chunks[3]);
}

fn render_header(f: &mut ratatui::Frame, area: Rect, tasks: &[Task], base_url: &str) {
    let open = tasks.iter().filter(|t| !t.completed).count();
    let header = Paragraph::new(format!(
        " taskd  {base_url}  {open} open / {} total",
        tasks.len()
    ))
    .style(Style::default().bg(Color::Rgb(28, 28, 40)).fg(Color::White));
    f.render_widget(header, area);
}

fn render_tasks(f: &mut ratatui::Frame, area: Rect, tasks: &[Task], selected: usize) {
    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let marker = if t.completed { "[x]" } else { "[ ]" };
            let mut style = if t.completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(Color::White)
            };
            if i == selected {
                style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            ListItem::new(Line::from(Span::styled(
                format!(" {marker} {}", t.title),
                style,
            )))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Tasks"));
    f.render_widget(list, area);
}

fn render_input(f: &mut ratatui::Frame, area: Rect, input: &str) {
    let text = Paragraph::new(format!("> {input}▌"))
        .block(Block::default().borders(Borders::ALL).title("New task"))
        .style(Style::default().fg(Color::White));
    f.render_widget(text, area);
}

fn render_help(f: &mut ratatui::Frame, area: Rect) {
    let help = Paragraph::new(
        " Enter: add  |  Up/Down: select  |  Ctrl+T: toggle  |  Ctrl+D: delete  |  Ctrl+C: quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, area);
}
