//! Main application logic for the terminal user interface.
//!
//! `App` borrows the task store from `main`, turns key presses into store operations and
//! draws the grouped task list, detail view, add/edit form, help and confirm dialogs.
//! Urgency is recomputed from the wall clock on every frame.

use std::io;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::debug;
use uuid::Uuid;

use crate::display::{format_age, format_created, format_status, group_by_duration, truncate, Show};
use crate::fields::DurationClass;
use crate::store::TaskStore;
use crate::task::Task;
use crate::tui::{
    colors::{urgency_color, ACCENT, DARK_RED, GOLD},
    enums::{AppState, FormField, ListEntry},
    task_form::TaskForm,
    utils::centered_rect,
};
use crate::urgency;

pub struct App<'a> {
    state: AppState,
    store: &'a mut TaskStore,
    entries: Vec<ListEntry>,
    list_state: ListState,
    /// Task shown in the detail view and targeted by edit.
    selected_task: Option<Uuid>,
    task_form: TaskForm,
    show_completed: bool,
    status_message: String,
    confirm_target: Option<Uuid>,
    /// Screen to return to when a dialog closes.
    previous_state: AppState,
}

impl<'a> App<'a> {
    pub fn new(store: &'a mut TaskStore) -> Self {
        let mut app = App {
            state: AppState::TaskList,
            store,
            entries: Vec::new(),
            list_state: ListState::default(),
            selected_task: None,
            task_form: TaskForm::new(),
            show_completed: false,
            status_message: String::new(),
            confirm_target: None,
            previous_state: AppState::TaskList,
        };
        app.update_entries();
        app
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Rebuild the grouped list from the store, keeping the highlighted task if it is still
    /// visible.
    fn update_entries(&mut self) {
        let old_selected = self.highlighted_task();
        let show = if self.show_completed { Show::All } else { Show::Active };

        self.entries.clear();
        for (class, tasks) in group_by_duration(&*self.store, show, None) {
            self.entries.push(ListEntry::Header(class, tasks.len()));
            if tasks.is_empty() {
                self.entries.push(ListEntry::Empty);
            }
            self.entries.extend(tasks.iter().map(|t| ListEntry::Task(t.id())));
        }

        let restored = old_selected
            .and_then(|id| self.entries.iter().position(|e| *e == ListEntry::Task(id)))
            .or_else(|| self.entries.iter().position(|e| e.task_id().is_some()));
        self.list_state.select(restored);
    }

    /// Task under the list cursor.
    pub fn highlighted_task(&self) -> Option<Uuid> {
        self.list_state
            .selected()
            .and_then(|i| self.entries.get(i))
            .and_then(ListEntry::task_id)
    }

    /// Move the list cursor to the next/previous task, skipping headers.
    fn move_selection(&mut self, forward: bool) {
        let is_task = |e: &ListEntry| e.task_id().is_some();
        let next = match self.list_state.selected() {
            Some(cur) if forward => self.entries[cur + 1..]
                .iter()
                .position(is_task)
                .map(|offset| cur + 1 + offset),
            Some(cur) => self.entries[..cur].iter().rposition(is_task),
            None => self.entries.iter().position(is_task),
        };
        if next.is_some() {
            self.list_state.select(next);
        }
    }

    fn selected(&self) -> Option<&Task> {
        self.selected_task.and_then(|id| self.store.get(id))
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn toggle(&mut self, id: Uuid) {
        self.store.toggle_completion(id);
        if let Some(task) = self.store.get(id) {
            let msg = format!("{}: {}", task.title(), format_status(task.is_completed()));
            self.set_status_message(msg);
        }
        self.update_entries();
    }

    fn ask_delete(&mut self, id: Uuid) {
        self.confirm_target = Some(id);
        self.previous_state = self.state;
        self.state = AppState::Confirm;
    }

    fn open_form(&mut self, edit: Option<Uuid>) {
        match edit.and_then(|id| self.store.get(id)) {
            Some(task) => {
                self.task_form = TaskForm::from_task(task);
                self.selected_task = Some(task.id());
                self.state = AppState::EditTask;
            }
            None => {
                self.task_form = TaskForm::new();
                self.state = AppState::AddTask;
            }
        }
    }

    /// Feed one key press to the current screen. Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            return true;
        }
        self.status_message.clear();
        match self.state {
            AppState::TaskList => self.handle_task_list_input(key),
            AppState::TaskDetail => self.handle_detail_input(key),
            AppState::AddTask => self.handle_form_input(key, false),
            AppState::EditTask => self.handle_form_input(key, true),
            AppState::Help => {
                self.state = self.previous_state;
                false
            }
            AppState::Confirm => self.handle_confirm_input(key),
        }
    }

    fn handle_task_list_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Enter => {
                if let Some(id) = self.highlighted_task() {
                    self.selected_task = Some(id);
                    self.state = AppState::TaskDetail;
                }
            }
            KeyCode::Char('a') => self.open_form(None),
            KeyCode::Char('e') => {
                if let Some(id) = self.highlighted_task() {
                    self.open_form(Some(id));
                }
            }
            KeyCode::Char(' ') | KeyCode::Char('t') => {
                if let Some(id) = self.highlighted_task() {
                    self.toggle(id);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.highlighted_task() {
                    self.ask_delete(id);
                }
            }
            KeyCode::Char('c') => {
                self.show_completed = !self.show_completed;
                self.update_entries();
                self.set_status_message(if self.show_completed {
                    "Showing completed tasks"
                } else {
                    "Hiding completed tasks"
                });
            }
            KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::F(1) => {
                self.previous_state = self.state;
                self.state = AppState::Help;
            }
            _ => {}
        }
        false
    }

    fn handle_detail_input(&mut self, key: KeyCode) -> bool {
        let Some(id) = self.selected().map(Task::id) else {
            self.state = AppState::TaskList;
            return false;
        };
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => self.state = AppState::TaskList,
            KeyCode::Char('e') => self.open_form(Some(id)),
            KeyCode::Char(' ') | KeyCode::Char('t') => self.toggle(id),
            KeyCode::Char('d') | KeyCode::Delete => self.ask_delete(id),
            KeyCode::Char('h') | KeyCode::Char('?') => {
                self.previous_state = self.state;
                self.state = AppState::Help;
            }
            _ => {}
        }
        false
    }

    fn handle_form_input(&mut self, key: KeyCode, is_edit: bool) -> bool {
        match key {
            KeyCode::Esc => {
                self.state = if is_edit { AppState::TaskDetail } else { AppState::TaskList };
            }
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            KeyCode::Left => self.task_form.handle_left_right(false),
            KeyCode::Right => self.task_form.handle_left_right(true),
            KeyCode::Home => {
                if self.task_form.current_field == FormField::Title {
                    self.task_form.title.move_home();
                } else if self.task_form.current_field == FormField::Description {
                    self.task_form.description.move_home();
                }
            }
            KeyCode::End => {
                if self.task_form.current_field == FormField::Title {
                    self.task_form.title.move_end();
                } else if self.task_form.current_field == FormField::Description {
                    self.task_form.description.move_end();
                }
            }
            KeyCode::Backspace => self.task_form.handle_backspace(),
            KeyCode::Delete => self.task_form.handle_delete(),
            KeyCode::Enter => self.submit_form(is_edit),
            KeyCode::Char(c) => self.task_form.handle_char(c),
            _ => {}
        }
        false
    }

    fn submit_form(&mut self, is_edit: bool) {
        let values = match self.task_form.submit() {
            Ok(values) => values,
            Err(e) => {
                self.set_status_message(e.to_string());
                return;
            }
        };

        if is_edit {
            if let Some(id) = self.selected_task {
                self.store.update_task(id, &values.title, &values.description, values.duration);
                debug!(%id, "task edited from ui");
            }
            self.state = AppState::TaskDetail;
            self.set_status_message("Task updated");
        } else {
            let task = self.store.add_task(&values.title, &values.description, values.duration);
            debug!(id = %task.id(), "task created from ui");
            self.update_entries();
            if let Some(pos) = self.entries.iter().position(|e| *e == ListEntry::Task(task.id())) {
                self.list_state.select(Some(pos));
            }
            self.state = AppState::TaskList;
            self.set_status_message("Task created");
        }
        self.update_entries();
    }

    fn handle_confirm_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(id) = self.confirm_target.take() {
                    self.store.delete_task(id);
                    if self.selected_task == Some(id) {
                        self.selected_task = None;
                    }
                    self.update_entries();
                    self.set_status_message("Task deleted");
                }
                self.state = AppState::TaskList;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_target = None;
                self.state = self.previous_state;
            }
            _ => {}
        }
        false
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
            }
        }
        Ok(false)
    }

    fn task_list_item(task: &Task, now: DateTime<Utc>) -> ListItem<'static> {
        let level = task.urgency_at(now);
        let title_style = if task.is_completed() {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let mut spans = vec![
            Span::styled("■ ", Style::default().fg(urgency_color(level))),
            Span::styled(truncate(task.title(), 40), title_style),
        ];
        if !task.description().is_empty() {
            spans.push(Span::styled(
                format!("  {}", truncate(task.description(), 30)),
                Style::default().fg(Color::Gray),
            ));
        }
        spans.push(Span::styled(
            format!("  {}", format_age(task.creation_timestamp(), now)),
            Style::default().fg(Color::DarkGray),
        ));
        if task.is_completed() {
            spans.push(Span::styled("  ✓", Style::default().fg(Color::Green)));
        }
        ListItem::new(Line::from(spans))
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect, now: DateTime<Utc>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let showing = if self.show_completed { "all tasks" } else { "active tasks" };
        let header = Paragraph::new(Line::from(vec![
            Span::styled("TICK", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("Showing {showing}"),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, chunks[0]);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| match entry {
                ListEntry::Header(class, count) => ListItem::new(Line::from(Span::styled(
                    format!("{} ({count})", class.label()),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))),
                ListEntry::Empty => ListItem::new(Line::from(Span::styled(
                    "  No tasks",
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                ))),
                ListEntry::Task(id) => match self.store.get(*id) {
                    Some(task) => Self::task_list_item(task, now),
                    None => ListItem::new(""),
                },
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Tasks ({}) - Press 'h' for help",
                self.store.len()
            )))
            .highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, chunks[1], &mut self.list_state);
    }

    fn render_task_detail(&mut self, f: &mut Frame, area: Rect, now: DateTime<Utc>) {
        let Some(task) = self.selected() else {
            return;
        };
        let level = task.urgency_at(now);
        let label = Style::default().add_modifier(Modifier::BOLD);

        let mut text = vec![
            Line::from(Span::styled(
                task.title().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "Created: {} ({} ago)",
                    format_created(task.creation_timestamp()),
                    format_age(task.creation_timestamp(), now)
                ),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(vec![Span::styled("Duration: ", label), Span::raw(task.duration_class().label())]),
            Line::from(vec![
                Span::styled("Status:   ", label),
                Span::raw(format_status(task.is_completed())),
            ]),
            Line::from(vec![
                Span::styled("Urgency:  ", label),
                Span::styled(level.label(), Style::default().fg(urgency_color(level))),
            ]),
            Line::from(""),
            Line::from(Span::styled("Description", label)),
        ];
        if task.description().is_empty() {
            text.push(Line::from(Span::styled(
                "No description provided",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        } else {
            text.push(Line::from(task.description().to_string()));
        }
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            format!(
                "[e] Edit  [space] Mark as {}  [d] Delete  [Esc] Back",
                if task.is_completed() { "Incomplete" } else { "Complete" }
            ),
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Task Details"))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_task_form(&mut self, f: &mut Frame, area: Rect, is_edit: bool) {
        let area = centered_rect(70, 80, area);
        f.render_widget(Clear, area);

        let outer = Block::default()
            .borders(Borders::ALL)
            .title(if is_edit { "Edit Task" } else { "New Task" });
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(1), // Error
                Constraint::Length(5), // Description
                Constraint::Length(3), // Duration
                Constraint::Min(0),    // Legend
            ])
            .split(inner);

        let focus = |field: FormField| {
            if self.task_form.current_field == field {
                Style::default().fg(GOLD)
            } else {
                Style::default()
            }
        };

        let title = Paragraph::new(self.task_form.title.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Title *")
                .border_style(focus(FormField::Title)),
        );
        f.render_widget(title, chunks[0]);

        if let Some(err) = &self.task_form.error {
            f.render_widget(
                Paragraph::new(Span::styled(err.as_str(), Style::default().fg(Color::Red))),
                chunks[1],
            );
        }

        let description = Paragraph::new(self.task_form.description.value.as_str())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Description")
                    .border_style(focus(FormField::Description)),
            );
        f.render_widget(description, chunks[2]);

        let mut choices = Vec::new();
        for class in DurationClass::ALL {
            let style = if class == self.task_form.duration {
                Style::default().bg(ACCENT).fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            choices.push(Span::styled(format!(" {} ", class.label()), style));
            choices.push(Span::raw("  "));
        }
        let duration = Paragraph::new(Line::from(choices)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Duration (←/→)")
                .border_style(focus(FormField::Duration)),
        );
        f.render_widget(duration, chunks[3]);

        let mut legend = vec![Line::from(Span::styled(
            "Task urgency will be calculated based on duration:",
            Style::default().fg(Color::Gray),
        ))];
        legend.extend(legend_lines());
        legend.push(Line::from(""));
        legend.push(Line::from(Span::styled(
            "Tab/↑↓ switch field  Enter save  Esc cancel",
            Style::default().fg(Color::DarkGray),
        )));
        f.render_widget(Paragraph::new(legend).wrap(Wrap { trim: true }), chunks[4]);

        let (cursor_area, field) = match self.task_form.current_field {
            FormField::Title => (chunks[0], Some(&self.task_form.title)),
            FormField::Description => (chunks[2], Some(&self.task_form.description)),
            FormField::Duration => (chunks[3], None),
        };
        if let Some(field) = field {
            let x = cursor_area.x.saturating_add(1).saturating_add(field.cursor_column());
            if x < cursor_area.x.saturating_add(cursor_area.width.saturating_sub(1)) {
                f.set_cursor_position((x, cursor_area.y + 1));
            }
        }
    }

    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut help_text = vec![
            Line::from(Span::styled("Tick Help", bold)),
            Line::from(""),
            Line::from(Span::styled("Task List:", bold)),
            Line::from("  ↑/k, ↓/j     Navigate tasks"),
            Line::from("  Enter        View task details"),
            Line::from("  a            Add new task"),
            Line::from("  e            Edit selected task"),
            Line::from("  Space/t      Toggle completion"),
            Line::from("  d            Delete selected task"),
            Line::from("  c            Show/hide completed tasks"),
            Line::from("  h/?          Show this help"),
            Line::from("  q/Esc/Ctrl+C Quit"),
            Line::from(""),
            Line::from(Span::styled("Form:", bold)),
            Line::from("  Tab/↑↓       Switch field"),
            Line::from("  ←/→          Move cursor or change duration"),
            Line::from("  Enter        Save"),
            Line::from("  Esc          Cancel"),
            Line::from(""),
            Line::from(Span::styled("Urgency:", bold)),
        ];
        help_text.extend(legend_lines());

        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Press any key to return"),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_confirm(&mut self, f: &mut Frame, area: Rect) {
        let title = self
            .confirm_target
            .and_then(|id| self.store.get(id))
            .map(|t| t.title().to_string())
            .unwrap_or_default();

        let block = Block::default()
            .title("Confirm Action")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 25, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Delete this task?",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(title),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::TaskList => {
                    let active = self.store.list_tasks().iter().filter(|t| !t.is_completed()).count();
                    format!("Active: {} | Total: {} | Press 'h' for help", active, self.store.len())
                }
                AppState::TaskDetail => "Task Details".to_string(),
                AppState::AddTask => "Add New Task".to_string(),
                AppState::EditTask => "Edit Task".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::Confirm => "Confirm Action".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(ACCENT).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Draw the current screen.
    pub fn render(&mut self, f: &mut Frame) {
        let now = Utc::now();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match self.state {
            AppState::TaskList => self.render_task_list(f, chunks[0], now),
            AppState::TaskDetail => self.render_task_detail(f, chunks[0], now),
            AppState::AddTask => {
                self.render_task_list(f, chunks[0], now);
                self.render_task_form(f, chunks[0], false);
            }
            AppState::EditTask => {
                self.render_task_detail(f, chunks[0], now);
                self.render_task_form(f, chunks[0], true);
            }
            AppState::Help => self.render_help(f, chunks[0]),
            AppState::Confirm => {
                match self.previous_state {
                    AppState::TaskDetail => self.render_task_detail(f, chunks[0], now),
                    _ => self.render_task_list(f, chunks[0], now),
                }
                self.render_confirm(f, chunks[0]);
            }
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop. Redraws at least every poll interval so ageing tasks change colour
    /// while the UI is open.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

fn legend_lines() -> Vec<Line<'static>> {
    DurationClass::ALL
        .iter()
        .map(|class| {
            Line::from(vec![
                Span::raw(format!("  • {}: ", class.label())),
                Span::styled(urgency::describe(*class), Style::default().fg(Color::Gray)),
            ])
        })
        .collect()
}
