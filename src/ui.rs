use crate::grid::TaskGrid;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::{io, sync::Arc, time::Duration};
use taskgrid::{
    loader::{load_tasks, TaskSource},
    Dispatcher, Store, TaskField, ToDoState,
};
use tracing::{debug, info};

const TICK: Duration = Duration::from_millis(50);

enum Flow {
    Continue,
    Quit,
}

fn spawn_load(source: &Arc<dyn TaskSource>, dispatcher: Dispatcher) {
    let source = Arc::clone(source);
    tokio::spawn(async move {
        load_tasks(source.as_ref(), &dispatcher).await;
    });
}

pub async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    store: &mut Store,
    grid: &mut TaskGrid,
    source: Arc<dyn TaskSource>,
) -> io::Result<()> {
    spawn_load(&source, store.dispatcher());

    loop {
        if store.drain() > 0 {
            grid.sync(store.state());
        }

        terminal.draw(|f| draw(f, store.state(), grid))?;

        if !event::poll(Duration::ZERO)? {
            // Let the loader make progress on this thread.
            tokio::time::sleep(TICK).await;
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Flow::Quit = handle_key(key, store, grid, &source) {
                info!("quit requested");
                return Ok(());
            }
            grid.sync(store.state());
        }
    }
}

fn handle_key(
    key: KeyEvent,
    store: &mut Store,
    grid: &mut TaskGrid,
    source: &Arc<dyn TaskSource>,
) -> Flow {
    if grid.editor.is_some() {
        match key.code {
            KeyCode::Enter => {
                if let Some(action) = grid.commit_edit(store.state()) {
                    store.dispatch(action);
                }
            }
            KeyCode::Esc => grid.cancel_edit(),
            KeyCode::Backspace => grid.backspace(),
            KeyCode::Char(c) => grid.input(c),
            _ => {}
        }
        return Flow::Continue;
    }

    let len = store.state().len();
    match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Char('r') => {
            debug!("reloading tasks");
            spawn_load(source, store.dispatcher());
        }
        // Rows can only be edited once the list is shown.
        _ if !store.state().tasks_loaded => {}
        KeyCode::Char('a') => {
            let action = grid.add_action();
            store.dispatch(action);
        }
        KeyCode::Char('d') => {
            if let Some(action) = grid.delete_action(store.state()) {
                store.dispatch(action);
            }
        }
        KeyCode::Char(' ') => grid.toggle_selected(store.state()),
        KeyCode::Char('e') => grid.begin_edit(store.state(), TaskField::Description),
        KeyCode::Char('t') => grid.begin_edit(store.state(), TaskField::DueDate),
        KeyCode::Char('s') => {
            if let Some(action) = grid.cycle_status_action(store.state()) {
                store.dispatch(action);
            }
        }
        KeyCode::Up => grid.move_cursor(-1, len),
        KeyCode::Down => grid.move_cursor(1, len),
        KeyCode::Left => grid.prev_page(),
        KeyCode::Right => grid.next_page(len),
        _ => {}
    }
    Flow::Continue
}

fn draw(f: &mut Frame, state: &ToDoState, grid: &TaskGrid) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled("Tasks", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("  ({} total, {} selected)", state.len(), grid.selected.len())),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    draw_body(f, state, grid, chunks[1]);
    draw_footer(f, grid, chunks[2]);
}

fn draw_body(f: &mut Frame, state: &ToDoState, grid: &TaskGrid, area: Rect) {
    if !state.tasks_loaded {
        let (text, style) = if state.error {
            ("Failed to load tasks. Press r to retry.", Style::default().fg(Color::Red))
        } else if state.tasks_loading {
            ("Loading tasks...", Style::default().fg(Color::Yellow))
        } else {
            ("No tasks loaded. Press r to load.", Style::default())
        };
        let message = Paragraph::new(Span::styled(text, style))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(message, area);
        return;
    }

    let range = grid.visible_range(state.len());
    let rows: Vec<Row> = state.tasks[range.clone()]
        .iter()
        .enumerate()
        .map(|(offset, task)| {
            let index = range.start + offset;
            let mark = if grid.selected.contains(&task.id) { "[x]" } else { "[ ]" };
            let style = if index == grid.cursor {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![
                Cell::from(mark),
                Cell::from(task.id.to_string()),
                Cell::from(task.description.clone()),
                Cell::from(task.due_date.clone()),
                Cell::from(task.status.to_string()),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec![
        "",
        "ID",
        TaskField::Description.title(),
        TaskField::DueDate.title(),
        TaskField::Status.title(),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let title = format!(
        "Page {}/{}",
        grid.page() + 1,
        grid.page_count(state.len())
    );
    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Percentage(50),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(if state.error {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Cyan)
            }),
    );

    f.render_widget(table, area);
}

fn draw_footer(f: &mut Frame, grid: &TaskGrid, area: Rect) {
    let line = match &grid.editor {
        Some(editor) => Line::from(vec![
            Span::styled(
                format!("{} #{}: ", editor.field.title(), editor.id),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(editor.buffer.clone()),
            Span::raw("_  (Enter save, Esc cancel)"),
        ]),
        None => Line::from(
            "a add  d delete  space select  e description  t due date  s status  r reload  ←/→ page  q quit",
        ),
    };
    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
