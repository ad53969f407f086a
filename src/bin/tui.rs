use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use taskflow::client::api::ApiClient;
use taskflow::client::cache::SnapshotCache;
use taskflow::client::store::BoardStore;
use taskflow::domain::task::Task;
use taskflow::domain::category::Category;

// Palette offered when creating a category, matching the color swatches of
// the web board.
const PRESET_COLORS: [&str; 8] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#1e293b", "#06b6d4",
];

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let api_url =
        std::env::var("TASKFLOW_API_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
    let store = BoardStore::new(ApiClient::new(api_url), SnapshotCache::from_env());

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, store).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Tasks,
    Categories,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    View,
    TaskForm,
    CategoryForm,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum TaskField {
    Title,
    Content,
    Deadline,
    Category,
}

struct App {
    store: BoardStore,
    tab: Tab,
    mode: Mode,
    selected: usize,
    list_state: ListState,
    notice: Option<String>,
    // Task form state; `editing` holds (id, created_at) of the task being
    // edited so both survive the save untouched.
    field: TaskField,
    draft_title: String,
    draft_content: String,
    draft_deadline: String,
    draft_category: usize,
    editing: Option<(String, String)>,
    // Category form state
    draft_name: String,
    draft_color: usize,
}

impl App {
    fn visible_len(&self) -> usize {
        match self.tab {
            Tab::Tasks => self.store.tasks().len(),
            Tab::Categories => self.store.categories().len(),
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            if self.selected >= len {
                self.selected = len - 1;
            }
            self.list_state.select(Some(self.selected));
        }
    }

    fn open_task_form(&mut self, task: Option<&Task>) {
        self.mode = Mode::TaskForm;
        self.field = TaskField::Title;
        match task {
            Some(t) => {
                self.draft_title = t.title.clone();
                self.draft_content = t.content.clone().unwrap_or_default();
                self.draft_deadline = t.deadline.clone().unwrap_or_default();
                self.draft_category = t
                    .category_id
                    .as_deref()
                    .and_then(|id| self.store.categories().iter().position(|c| c.id == id))
                    .unwrap_or(0);
                self.editing = Some((t.id.clone(), t.created_at.clone()));
            }
            None => {
                self.draft_title.clear();
                self.draft_content.clear();
                self.draft_deadline.clear();
                self.draft_category = 0;
                self.editing = None;
            }
        }
    }

    fn draft_task(&self) -> Task {
        let content = non_empty(&self.draft_content);
        let deadline = non_empty(&self.draft_deadline);
        let category_id = self
            .store
            .categories()
            .get(self.draft_category)
            .map(|c| c.id.clone());
        match &self.editing {
            Some((id, created_at)) => Task {
                id: id.clone(),
                title: self.draft_title.trim().to_string(),
                content,
                category_id,
                deadline,
                created_at: created_at.clone(),
            },
            None => Task::new(self.draft_title.trim(), content, category_id, deadline),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    store: BoardStore,
) -> Result<()> {
    let mut app = App {
        store,
        tab: Tab::Tasks,
        mode: Mode::View,
        selected: 0,
        list_state: ListState::default(),
        notice: None,
        field: TaskField::Title,
        draft_title: String::new(),
        draft_content: String::new(),
        draft_deadline: String::new(),
        draft_category: 0,
        editing: None,
        draft_name: String::new(),
        draft_color: 0,
    };
    app.store.refresh().await;
    app.clamp_selection();

    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Length(3),
                ])
                .split(f.size());

            let header = Paragraph::new(
                "Tasks/Categories (Tab: switch, n: new, e: edit, d: delete, r: refresh, q: quit)",
            )
            .block(Block::default().borders(Borders::ALL).title("taskflow"));
            f.render_widget(header, chunks[0]);

            let middle = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(chunks[1]);

            let (items, detail) = match app.tab {
                Tab::Tasks => {
                    let items: Vec<ListItem> = app
                        .store
                        .tasks()
                        .iter()
                        .map(|t| {
                            let cat = t
                                .category_id
                                .as_deref()
                                .and_then(|id| app.store.category(id))
                                .map(|c| c.name.as_str())
                                .unwrap_or("uncategorized");
                            let overdue = if t.is_overdue() { " !" } else { "" };
                            ListItem::new(format!("[{}] {}{}", cat, t.title, overdue))
                        })
                        .collect();
                    let detail = app
                        .store
                        .tasks()
                        .get(app.selected)
                        .map(|t| task_detail(&app.store, t))
                        .unwrap_or_default();
                    (items, detail)
                }
                Tab::Categories => {
                    let items: Vec<ListItem> = app
                        .store
                        .categories()
                        .iter()
                        .map(|c| ListItem::new(format!("{}  {}", c.color, c.name)))
                        .collect();
                    let detail = app
                        .store
                        .categories()
                        .get(app.selected)
                        .map(|c| category_detail(&app.store, c))
                        .unwrap_or_default();
                    (items, detail)
                }
            };

            if app.visible_len() == 0 {
                app.list_state.select(None);
            } else {
                app.list_state.select(Some(app.selected));
            }
            let title = match app.tab {
                Tab::Tasks => "tasks (newest first)",
                Tab::Categories => "categories",
            };
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(title))
                .highlight_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                )
                .highlight_symbol(">> ");
            f.render_stateful_widget(list, middle[0], &mut app.list_state);

            let details = Paragraph::new(detail)
                .block(Block::default().borders(Borders::ALL).title("details"));
            f.render_widget(details, middle[1]);

            let footer_text = match app.mode {
                Mode::View => app.notice.clone().unwrap_or_else(|| {
                    format!(
                        "TASKFLOW_API_URL={}",
                        std::env::var("TASKFLOW_API_URL").unwrap_or_default()
                    )
                }),
                Mode::TaskForm => {
                    let field_value = match app.field {
                        TaskField::Title => app.draft_title.clone(),
                        TaskField::Content => app.draft_content.clone(),
                        TaskField::Deadline => app.draft_deadline.clone(),
                        TaskField::Category => app
                            .store
                            .categories()
                            .get(app.draft_category)
                            .map(|c| c.name.clone())
                            .unwrap_or_else(|| "(none)".to_string()),
                    };
                    format!(
                        "{} — {}: {}_  |  (Tab: next field, ←/→: pick category, Enter: save, Esc: cancel)",
                        if app.editing.is_some() { "Edit task" } else { "New task" },
                        match app.field {
                            TaskField::Title => "Title",
                            TaskField::Content => "Content",
                            TaskField::Deadline => "Deadline YYYY-MM-DD",
                            TaskField::Category => "Category",
                        },
                        field_value
                    )
                }
                Mode::CategoryForm => format!(
                    "New category — Name: {}_  Color: {}  |  (←/→: pick color, Enter: save, Esc: cancel)",
                    app.draft_name, PRESET_COLORS[app.draft_color]
                ),
            };
            let footer = Paragraph::new(footer_text).block(
                Block::default().borders(Borders::ALL).title(match app.mode {
                    Mode::View => "info",
                    Mode::TaskForm => "task",
                    Mode::CategoryForm => "category",
                }),
            );
            f.render_widget(footer, chunks[2]);
        })?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Only act on key presses; ignore repeats and releases to prevent duplicate input
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match app.mode {
            Mode::View => match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Tab => {
                    app.tab = match app.tab {
                        Tab::Tasks => Tab::Categories,
                        Tab::Categories => Tab::Tasks,
                    };
                    app.selected = 0;
                    app.notice = None;
                    app.clamp_selection();
                }
                KeyCode::Up => {
                    if app.selected > 0 {
                        app.selected -= 1;
                    }
                }
                KeyCode::Down => {
                    if app.selected + 1 < app.visible_len() {
                        app.selected += 1;
                    }
                }
                KeyCode::Char('r') => {
                    app.store.refresh().await;
                    app.notice = None;
                    app.clamp_selection();
                }
                KeyCode::Char('n') => match app.tab {
                    Tab::Tasks => app.open_task_form(None),
                    Tab::Categories => {
                        app.mode = Mode::CategoryForm;
                        app.draft_name.clear();
                        app.draft_color = 0;
                    }
                },
                KeyCode::Char('e') | KeyCode::Enter => {
                    if app.tab == Tab::Tasks {
                        let task = app.store.tasks().get(app.selected).cloned();
                        if let Some(task) = task {
                            app.open_task_form(Some(&task));
                        }
                    }
                }
                KeyCode::Char('d') => {
                    match app.tab {
                        Tab::Tasks => {
                            let id = app.store.tasks().get(app.selected).map(|t| t.id.clone());
                            if let Some(id) = id {
                                if let Err(err) = app.store.delete_task(&id).await {
                                    app.notice = Some(err.to_string());
                                }
                            }
                        }
                        Tab::Categories => {
                            let id = app
                                .store
                                .categories()
                                .get(app.selected)
                                .map(|c| c.id.clone());
                            if let Some(id) = id {
                                // Refused while tasks still reference it
                                if let Err(err) = app.store.delete_category(&id).await {
                                    app.notice = Some(err.to_string());
                                }
                            }
                        }
                    }
                    app.clamp_selection();
                }
                _ => {}
            },
            Mode::TaskForm => match key.code {
                KeyCode::Esc => app.mode = Mode::View,
                KeyCode::Enter => {
                    let task = app.draft_task();
                    match app.store.save_task(task).await {
                        Ok(()) => app.notice = None,
                        Err(err) => app.notice = Some(err.to_string()),
                    }
                    app.mode = Mode::View;
                    app.clamp_selection();
                }
                KeyCode::Tab => {
                    app.field = match app.field {
                        TaskField::Title => TaskField::Content,
                        TaskField::Content => TaskField::Deadline,
                        TaskField::Deadline => TaskField::Category,
                        TaskField::Category => TaskField::Title,
                    };
                }
                KeyCode::Left => {
                    if app.field == TaskField::Category && app.draft_category > 0 {
                        app.draft_category -= 1;
                    }
                }
                KeyCode::Right => {
                    if app.field == TaskField::Category
                        && app.draft_category + 1 < app.store.categories().len()
                    {
                        app.draft_category += 1;
                    }
                }
                KeyCode::Backspace => match app.field {
                    TaskField::Title => {
                        app.draft_title.pop();
                    }
                    TaskField::Content => {
                        app.draft_content.pop();
                    }
                    TaskField::Deadline => {
                        app.draft_deadline.pop();
                    }
                    TaskField::Category => {}
                },
                KeyCode::Char(c) => match app.field {
                    TaskField::Title => app.draft_title.push(c),
                    TaskField::Content => app.draft_content.push(c),
                    TaskField::Deadline => app.draft_deadline.push(c),
                    TaskField::Category => {}
                },
                _ => {}
            },
            Mode::CategoryForm => match key.code {
                KeyCode::Esc => app.mode = Mode::View,
                KeyCode::Enter => {
                    let category =
                        Category::new(app.draft_name.trim(), PRESET_COLORS[app.draft_color]);
                    match app.store.save_category(category).await {
                        Ok(()) => app.notice = None,
                        Err(err) => app.notice = Some(err.to_string()),
                    }
                    app.mode = Mode::View;
                    app.clamp_selection();
                }
                KeyCode::Left => {
                    if app.draft_color > 0 {
                        app.draft_color -= 1;
                    }
                }
                KeyCode::Right => {
                    if app.draft_color + 1 < PRESET_COLORS.len() {
                        app.draft_color += 1;
                    }
                }
                KeyCode::Backspace => {
                    app.draft_name.pop();
                }
                KeyCode::Char(c) => app.draft_name.push(c),
                _ => {}
            },
        }
    }
    Ok(())
}

fn task_detail(store: &BoardStore, task: &Task) -> String {
    let category = task
        .category_id
        .as_deref()
        .and_then(|id| store.category(id))
        .map(|c| format!("{} ({})", c.name, c.color))
        .unwrap_or_else(|| "uncategorized".to_string());
    let deadline = match task.deadline.as_deref() {
        Some(d) if task.is_overdue() => format!("{d} (overdue)"),
        Some(d) => d.to_string(),
        None => "none".to_string(),
    };
    format!(
        "Title:\n{}\n\nCategory: {}\nDeadline: {}\nCreated: {}\n\nContent:\n{}",
        task.title,
        category,
        deadline,
        task.created_at,
        task.content.as_deref().unwrap_or("(no content)")
    )
}

fn category_detail(store: &BoardStore, category: &Category) -> String {
    let in_use = store
        .tasks()
        .iter()
        .filter(|t| t.category_id.as_deref() == Some(category.id.as_str()))
        .count();
    format!(
        "Name:\n{}\n\nColor: {}\nTasks assigned: {}",
        category.name, category.color, in_use
    )
}
