//! Main application struct and run loop.
//!
//! This module provides the `App` struct which orchestrates the TUI
//! application lifecycle: translating input into state changes, queueing
//! store requests, applying their results, and rendering.

use chrono::Local;
use eisen_client::TaskStore;
use eisen_config::UiConfig;
use eisen_matrix::{Rgb, add_at};
use eisen_protocol::{Coordinate, Message, PointerButton, Task, TaskId};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info, warn};

use crate::{
    event::{InputMode, event_to_message, poll_event},
    form::{FormSubmission, TaskForm},
    interaction::{MenuAction, Modal, Press},
    layout::{MIN_HEIGHT, MIN_WIDTH, is_too_small, screen_areas},
    request::{StoreRequest, StoreResponse},
    state::{AppState, Direction, Notification, Page},
    terminal::AppTerminal,
    widgets::{
        chip_for, chips, grid_rect_for, is_over_grid, matrix_areas, menu_area, menu_entry_at,
        point_for_cell, render_confirm_delete, render_context_menu, render_help_overlay,
        render_matrix, render_profile, render_status_bar, render_task_form, task_at,
    },
};

/// The main application struct.
///
/// Owns the state and the task store. Store calls never block the UI: they
/// are queued by [`App::update`] and executed by [`App::run`].
#[derive(Debug)]
pub struct App {
    state: AppState,
    store: TaskStore,
    ui: UiConfig,
    should_quit: bool,
    /// Last known terminal area, used for pointer hit-testing.
    last_area: Rect,
    /// Requests waiting to be spawned.
    pending: Vec<StoreRequest>,
}

impl App {
    /// Creates an application backed by `store`.
    ///
    /// The first refresh is queued immediately.
    ///
    /// # Examples
    ///
    /// ```
    /// use eisen_client::{MemoryStore, TaskStore};
    /// use eisen_config::UiConfig;
    /// use eisen_tui::App;
    ///
    /// let app = App::new(TaskStore::Memory(MemoryStore::demo()), UiConfig::default());
    /// assert_eq!(app.state().source, "demo data");
    /// ```
    #[must_use]
    pub fn new(store: TaskStore, ui: UiConfig) -> Self {
        Self {
            state: AppState::new(store.describe()),
            store,
            ui,
            should_quit: false,
            last_area: Rect::default(),
            pending: vec![StoreRequest::Refresh],
        }
    }

    /// Returns a reference to the current application state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns `true` once the user asked to quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Takes every request queued since the last call.
    pub fn take_requests(&mut self) -> Vec<StoreRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Returns how key presses should be read right now.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        if self.state.help_visible {
            return InputMode::Board;
        }
        match self.state.interaction.modal() {
            Some(Modal::TaskForm(_)) => InputMode::Form,
            Some(Modal::ConfirmDelete { .. }) => InputMode::Confirm,
            _ => InputMode::Board,
        }
    }

    /// Applies a result coming back from the store.
    ///
    /// Task lists replace the board wholesale, whichever request they
    /// answer. Tasks that fail validation are dropped with a warning.
    pub fn handle_response(&mut self, response: StoreResponse) {
        match response {
            StoreResponse::Tasks(tasks) => self.state.replace_tasks(valid_tasks(tasks)),
            StoreResponse::Profile(profile) => self.state.profile = Some(*profile),
            StoreResponse::Notice(text) => self.state.notify(Notification::info(text)),
            StoreResponse::Failed { action, error } => self
                .state
                .notify(Notification::error(format!("Could not {action}: {error}"))),
        }
    }

    /// Updates the application state based on a message.
    pub fn update(&mut self, msg: Message) {
        if msg.is_terminating() {
            self.should_quit = true;
            return;
        }

        // Any key or click closes help; pointer motion does not.
        if self.state.help_visible {
            if !matches!(msg, Message::PointerMove { .. } | Message::PointerLeave) {
                self.state.help_visible = false;
            }
            return;
        }

        match self.state.interaction.modal() {
            Some(Modal::TaskForm(_)) => self.update_form(msg),
            Some(Modal::ContextMenu { .. }) => self.update_menu(msg),
            Some(Modal::ConfirmDelete { .. }) => self.update_confirm(msg),
            None => self.update_board(msg),
        }
    }

    fn update_board(&mut self, msg: Message) {
        if self.state.interaction.is_dragging() && msg.interrupts_drag() {
            debug!(?msg, "ignored during drag");
            return;
        }
        match msg {
            Message::Escape => {
                if let Some(task_id) = self.state.interaction.cancel_drag() {
                    debug!(task_id, "drag cancelled");
                } else if self.state.page == Page::Profile {
                    self.state.page = Page::Matrix;
                } else {
                    self.state.clear_selection();
                }
            }
            Message::NavigateLeft => self.navigate(Direction::Left),
            Message::NavigateRight => self.navigate(Direction::Right),
            Message::NavigateUp => self.navigate(Direction::Up),
            Message::NavigateDown => self.navigate(Direction::Down),
            Message::Select => {
                if let Some(form) = self.state.selected_task().map(TaskForm::edit) {
                    self.state.interaction.open_modal(Modal::TaskForm(form));
                }
            }
            Message::NewTask => {
                self.state.page = Page::Matrix;
                let form = TaskForm::new_at(Coordinate::CENTER);
                self.state.interaction.open_modal(Modal::TaskForm(form));
            }
            Message::CompleteSelected => {
                if let Some(task_id) = self.state.selected_task().map(|t| t.id) {
                    self.state.clear_selection();
                    self.pending.push(StoreRequest::Complete(task_id));
                }
            }
            Message::DeleteSelected => {
                if let Some(task_id) = self.state.selected_task().map(|t| t.id) {
                    self.state
                        .interaction
                        .open_modal(Modal::ConfirmDelete { task_id });
                }
            }
            Message::TogglePage => {
                self.state.toggle_page();
                if self.state.page == Page::Profile {
                    self.pending.push(StoreRequest::LoadProfile);
                }
            }
            Message::Refresh => {
                self.pending.push(StoreRequest::Refresh);
                if self.state.page == Page::Profile {
                    self.pending.push(StoreRequest::LoadProfile);
                }
            }
            Message::ToggleHelp => self.state.toggle_help(),
            msg if msg.is_pointer() => {
                if self.state.page == Page::Matrix {
                    self.handle_pointer(msg);
                }
            }
            _ => {}
        }
    }

    fn navigate(&mut self, direction: Direction) {
        if self.state.page == Page::Matrix {
            self.state.navigate(direction);
        }
    }

    fn handle_pointer(&mut self, msg: Message) {
        let grid = self.grid_area();
        let Some(rect) = grid_rect_for(grid) else {
            return;
        };

        match msg {
            Message::PointerDown {
                column,
                row,
                button,
            } => {
                if self.state.interaction.is_dragging() || !is_over_grid(grid, column, row) {
                    return;
                }
                let hit = task_at(
                    &chips(&self.state.tasks, self.state.interaction.drag(), grid),
                    column,
                    row,
                );
                match (button, hit) {
                    (PointerButton::Secondary, Some(task_id)) => {
                        self.state.selected = Some(task_id);
                        self.state
                            .interaction
                            .open_modal(Modal::context_menu(task_id));
                    }
                    (PointerButton::Secondary, None) => {}
                    (PointerButton::Primary, hit) => {
                        let point = point_for_cell(grid, column, row);
                        match self.state.interaction.pointer_down(point, hit) {
                            Press::StartedDrag(task_id) => self.state.selected = Some(task_id),
                            Press::AddAt(point) => {
                                let form = TaskForm::new_at(add_at(point, rect));
                                self.state.interaction.open_modal(Modal::TaskForm(form));
                            }
                            Press::Ignored => {}
                        }
                    }
                }
            }
            Message::PointerMove { column, row } => self.state.interaction.pointer_move(
                point_for_cell(grid, column, row),
                is_over_grid(grid, column, row),
            ),
            Message::PointerUp { column, row } => {
                let point = point_for_cell(grid, column, row);
                if let Some(drop) = self.state.interaction.pointer_up(point, rect) {
                    self.state.apply_drop(&drop);
                    self.pending.push(StoreRequest::UpdatePosition {
                        task_id: drop.task_id,
                        coordinate: drop.coordinate,
                    });
                }
            }
            Message::PointerLeave => {
                // Losing the pointer mid-drag abandons the drag.
                if let Some(task_id) = self.state.interaction.cancel_drag() {
                    debug!(task_id, "drag abandoned");
                }
                self.state.interaction.pointer_leave();
            }
            _ => {}
        }
    }

    fn update_form(&mut self, msg: Message) {
        let Some(Modal::TaskForm(form)) = self.state.interaction.modal_mut() else {
            return;
        };
        match msg {
            Message::Escape => {
                self.state.interaction.close_modal();
            }
            Message::FormInput { ch } => form.input_char(ch),
            Message::FormBackspace => form.backspace(),
            Message::FormNextField => form.next_field(),
            Message::FormPrevField => form.prev_field(),
            Message::FormAdjust { delta } => form.adjust(delta),
            Message::FormSubmit => {
                if let Some(submission) = form.submit() {
                    self.state.interaction.close_modal();
                    self.pending.push(match submission {
                        FormSubmission::Create(draft) => StoreRequest::Create(draft),
                        FormSubmission::Update { task_id, patch } => {
                            StoreRequest::Update { task_id, patch }
                        }
                    });
                }
            }
            _ => {}
        }
    }

    fn update_menu(&mut self, msg: Message) {
        let Some(&Modal::ContextMenu { task_id, selected }) = self.state.interaction.modal() else {
            return;
        };
        let count = MenuAction::ALL.len();
        match msg {
            Message::Escape => {
                self.state.interaction.close_modal();
            }
            Message::NavigateUp => self.select_menu_entry((selected + count - 1) % count),
            Message::NavigateDown => self.select_menu_entry((selected + 1) % count),
            Message::Select => {
                if let Some(&action) = MenuAction::ALL.get(selected) {
                    self.run_menu_action(task_id, action);
                }
            }
            Message::PointerDown {
                column,
                row,
                button: PointerButton::Primary,
            } => {
                let entry = self
                    .menu_rect(task_id)
                    .and_then(|menu| menu_entry_at(menu, column, row))
                    .and_then(|index| MenuAction::ALL.get(index).copied());
                match entry {
                    Some(action) => self.run_menu_action(task_id, action),
                    None => {
                        self.state.interaction.close_modal();
                    }
                }
            }
            Message::PointerDown { .. } => {
                self.state.interaction.close_modal();
            }
            _ => {}
        }
    }

    fn select_menu_entry(&mut self, index: usize) {
        if let Some(Modal::ContextMenu { selected, .. }) = self.state.interaction.modal_mut() {
            *selected = index;
        }
    }

    fn run_menu_action(&mut self, task_id: TaskId, action: MenuAction) {
        match action {
            MenuAction::Edit => match self.state.task(task_id).map(TaskForm::edit) {
                Some(form) => self.state.interaction.open_modal(Modal::TaskForm(form)),
                None => {
                    self.state.interaction.close_modal();
                }
            },
            MenuAction::Complete => {
                self.state.interaction.close_modal();
                self.state.clear_selection();
                self.pending.push(StoreRequest::Complete(task_id));
            }
            MenuAction::Delete => self
                .state
                .interaction
                .open_modal(Modal::ConfirmDelete { task_id }),
        }
    }

    fn update_confirm(&mut self, msg: Message) {
        let Some(task_id) = self.state.interaction.modal().and_then(Modal::task_id) else {
            return;
        };
        match msg {
            Message::Confirm => {
                self.state.interaction.close_modal();
                if self.state.selected == Some(task_id) {
                    self.state.clear_selection();
                }
                self.pending.push(StoreRequest::Delete(task_id));
            }
            Message::Escape => {
                self.state.interaction.close_modal();
            }
            _ => {}
        }
    }

    /// Returns the grid area of the last rendered frame.
    fn grid_area(&self) -> Rect {
        matrix_areas(screen_areas(self.last_area).content).grid
    }

    /// Returns where the context menu for `task_id` is drawn.
    fn menu_rect(&self, task_id: TaskId) -> Option<Rect> {
        let grid = self.grid_area();
        let chips = chips(&self.state.tasks, self.state.interaction.drag(), grid);
        let chip = chip_for(&chips, task_id)?;
        Some(menu_area(
            (chip.column, chip.row),
            screen_areas(self.last_area).content,
        ))
    }

    /// Renders the application UI.
    ///
    /// # Layout
    ///
    /// ```text
    /// ╭──────────────────────────────────────────────╮
    /// │ eisen - Priority Matrix · demo data  Press ? │  header
    /// ╰──────────────────────────────────────────────╯
    /// ╭ Priority Matrix ─────────────────────────────╮
    /// │                                              │  matrix or profile
    /// ╰──────────────────────────────────────────────╯
    ///  n New  p Profile ...              6 open · 2 done   status
    /// ```
    ///
    /// Modals and the help overlay are drawn on top.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.last_area = area;

        if is_too_small(area) {
            render_terminal_too_small(frame, area);
            return;
        }

        let areas = screen_areas(area);
        self.render_header(frame, areas.header);

        let buf = frame.buffer_mut();
        match self.state.page {
            Page::Matrix => render_matrix(
                &self.state,
                Rgb::from(self.ui.background),
                areas.content,
                buf,
            ),
            Page::Profile => render_profile(
                self.state.profile.as_ref(),
                Local::now().naive_local(),
                areas.content,
                buf,
            ),
        }
        render_status_bar(
            &self.state,
            self.ui.show_completed_count,
            areas.status,
            buf,
        );

        match self.state.interaction.modal() {
            Some(Modal::TaskForm(form)) => render_task_form(form, area, buf),
            Some(&Modal::ContextMenu { task_id, selected }) => {
                if let Some(menu) = self.menu_rect(task_id) {
                    render_context_menu(selected, menu, buf);
                }
            }
            Some(&Modal::ConfirmDelete { task_id }) => {
                let title = self
                    .state
                    .task(task_id)
                    .map_or("this task", |t| t.title.as_str());
                render_confirm_delete(title, area, buf);
            }
            None => {}
        }

        if self.state.help_visible {
            render_help_overlay(area, buf);
        }
    }

    /// Renders the header bar with title, task source and help cue.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [title_area, help_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(17)]).areas(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "eisen",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::styled("Priority Matrix", Style::default().fg(Color::White)),
            Span::styled(
                format!(" · {}", self.state.source),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        frame.render_widget(title, title_area);

        let help_cue = Paragraph::new(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" for help", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(help_cue, help_area);
    }

    /// Runs the main application loop.
    ///
    /// Each iteration spawns queued store requests, applies whatever
    /// results have arrived, renders, and handles at most one input event.
    /// Returns when the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use eisen_client::{MemoryStore, TaskStore};
    /// use eisen_config::UiConfig;
    /// use eisen_tui::{App, terminal};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut app = App::new(TaskStore::Memory(MemoryStore::demo()), UiConfig::default());
    ///     app.run(&mut terminal).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        info!(source = %self.state.source, "starting board");

        loop {
            self.dispatch(&tx);
            while let Ok(response) = rx.try_recv() {
                self.handle_response(response);
            }

            terminal.draw(|frame| self.view(frame))?;

            if let Some(event) = poll_event()? {
                if let Some(msg) = event_to_message(&event, self.input_mode()) {
                    self.update(msg);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Spawns every queued request on the runtime.
    fn dispatch(&mut self, tx: &UnboundedSender<StoreResponse>) {
        for request in self.take_requests() {
            let store = self.store.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                for response in request.execute(&store).await {
                    // The receiver only goes away once the app has quit.
                    let _ = tx.send(response);
                }
            });
        }
    }
}

/// Renders a message indicating the terminal is too small.
fn render_terminal_too_small(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );

    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    let vertical_offset = area.height.saturating_sub(2) / 2;
    let centered_area = Rect {
        x: area.x,
        y: area.y + vertical_offset,
        width: area.width,
        height: area.height.saturating_sub(vertical_offset),
    };

    frame.render_widget(paragraph, centered_area);
}

fn valid_tasks(tasks: Vec<Task>) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|task| match task.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!(task_id = task.id, error = %err, "ignoring invalid task");
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use eisen_client::MemoryStore;
    use eisen_matrix::GridRect;
    use eisen_protocol::dummy::demo_tasks;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::widgets::cell_for_point;

    fn demo_app() -> App {
        let mut app = App::new(TaskStore::Memory(MemoryStore::demo()), UiConfig::default());
        app.last_area = Rect::new(0, 0, 80, 24);
        app
    }

    /// Runs queued requests to completion, the way the run loop would.
    async fn settle(app: &mut App) {
        while !app.pending.is_empty() {
            let store = app.store.clone();
            for request in app.take_requests() {
                for response in request.execute(&store).await {
                    app.handle_response(response);
                }
            }
        }
    }

    async fn loaded_app() -> App {
        let mut app = demo_app();
        settle(&mut app).await;
        app
    }

    fn grid_and_rect(app: &App) -> (Rect, GridRect) {
        let grid = app.grid_area();
        (grid, grid_rect_for(grid).unwrap())
    }

    fn chip_cell(app: &App, task_id: TaskId) -> (u16, u16) {
        let grid = app.grid_area();
        let chips = chips(&app.state.tasks, app.state.interaction.drag(), grid);
        let chip = chip_for(&chips, task_id).unwrap();
        (chip.column, chip.row)
    }

    fn cell_of(app: &App, urgency: i64, importance: i64) -> (u16, u16) {
        let (grid, rect) = grid_and_rect(app);
        let coordinate = Coordinate::clamped(urgency, importance);
        cell_for_point(grid, rect.coordinate_to_position(coordinate)).unwrap()
    }

    fn screen(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol().chars().next().unwrap_or(' '))
            .collect()
    }

    #[test]
    fn app_new_queues_first_refresh() {
        let mut app = demo_app();
        assert!(!app.should_quit());
        assert_eq!(app.take_requests(), vec![StoreRequest::Refresh]);
        assert!(app.take_requests().is_empty());
    }

    #[tokio::test]
    async fn refresh_loads_every_task() {
        let app = loaded_app().await;
        assert_eq!(app.state.tasks.len(), demo_tasks().len());
        assert_eq!(app.state.open_tasks().count(), 6);
    }

    #[test]
    fn app_quit_message_sets_should_quit() {
        let mut app = demo_app();
        app.update(Message::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn app_quit_works_with_help_visible() {
        let mut app = demo_app();
        app.update(Message::ToggleHelp);
        app.update(Message::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn app_help_dismisses_on_any_key_but_not_on_motion() {
        let mut app = demo_app();
        app.update(Message::ToggleHelp);
        assert!(app.state.help_visible);

        app.update(Message::PointerMove { column: 10, row: 10 });
        assert!(app.state.help_visible);

        app.update(Message::NewTask);
        assert!(!app.state.help_visible);
        // The dismissing key does nothing else.
        assert!(app.state.interaction.modal().is_none());
    }

    #[tokio::test]
    async fn dragging_a_task_moves_and_persists_it() {
        let mut app = loaded_app().await;
        let (column, row) = chip_cell(&app, 4);
        let (to_column, to_row) = cell_of(&app, 11, 2);

        app.update(Message::PointerDown {
            column,
            row,
            button: PointerButton::Primary,
        });
        assert_eq!(app.state.interaction.dragged_task(), Some(4));
        assert_eq!(app.state.selected, Some(4));

        app.update(Message::PointerMove {
            column: to_column,
            row: to_row,
        });
        assert_eq!(chip_cell(&app, 4), (to_column, to_row));

        app.update(Message::PointerUp {
            column: to_column,
            row: to_row,
        });
        assert!(!app.state.interaction.is_dragging());

        let expected = Coordinate::clamped(11, 2);
        // The board moves before the store answers.
        assert_eq!(app.state.task(4).unwrap().coordinate(), expected);
        assert_eq!(
            app.pending,
            vec![StoreRequest::UpdatePosition {
                task_id: 4,
                coordinate: expected,
            }]
        );

        settle(&mut app).await;
        let task = app.state.task(4).unwrap();
        assert_eq!(task.coordinate(), expected);
        assert!(!task.completed);
        assert_eq!(
            app.state.notification,
            Some(Notification::info("Task moved"))
        );
    }

    #[tokio::test]
    async fn dropping_in_place_still_persists() {
        let mut app = loaded_app().await;
        let (column, row) = chip_cell(&app, 2);
        let before = app.state.task(2).unwrap().coordinate();

        app.update(Message::PointerDown {
            column,
            row,
            button: PointerButton::Primary,
        });
        app.update(Message::PointerUp { column, row });

        assert_eq!(
            app.take_requests(),
            vec![StoreRequest::UpdatePosition {
                task_id: 2,
                coordinate: before,
            }]
        );
    }

    #[tokio::test]
    async fn escape_cancels_a_drag_without_a_request() {
        let mut app = loaded_app().await;
        let before = app.state.task(3).unwrap().coordinate();
        let (column, row) = chip_cell(&app, 3);

        app.update(Message::PointerDown {
            column,
            row,
            button: PointerButton::Primary,
        });
        app.update(Message::PointerMove { column: 5, row: 5 });
        app.update(Message::Escape);

        assert!(!app.state.interaction.is_dragging());
        assert_eq!(app.state.task(3).unwrap().coordinate(), before);
        assert!(app.take_requests().is_empty());
    }

    #[tokio::test]
    async fn losing_the_pointer_abandons_a_drag() {
        let mut app = loaded_app().await;
        let (column, row) = chip_cell(&app, 3);

        app.update(Message::PointerDown {
            column,
            row,
            button: PointerButton::Primary,
        });
        app.update(Message::PointerLeave);
        app.update(Message::PointerUp { column: 5, row: 5 });

        assert!(!app.state.interaction.is_dragging());
        assert!(app.take_requests().is_empty());
    }

    #[tokio::test]
    async fn second_press_during_drag_is_ignored() {
        let mut app = loaded_app().await;
        let (column, row) = chip_cell(&app, 4);
        let (to_column, to_row) = cell_of(&app, 11, 2);

        app.update(Message::PointerDown {
            column,
            row,
            button: PointerButton::Primary,
        });
        app.update(Message::PointerMove {
            column: to_column,
            row: to_row,
        });
        // The dragged chip is under the pointer, so this lands on it.
        app.update(Message::PointerDown {
            column: to_column,
            row: to_row,
            button: PointerButton::Secondary,
        });
        assert_eq!(app.state.interaction.dragged_task(), Some(4));
        assert!(app.state.interaction.modal().is_none());

        app.update(Message::PointerUp {
            column: to_column,
            row: to_row,
        });
        assert!(!app.state.interaction.is_dragging());
        assert_eq!(
            app.take_requests(),
            vec![StoreRequest::UpdatePosition {
                task_id: 4,
                coordinate: Coordinate::clamped(11, 2),
            }]
        );
    }

    #[tokio::test]
    async fn overlay_keys_wait_for_the_drop() {
        let mut app = loaded_app().await;
        let (column, row) = chip_cell(&app, 2);
        let before = app.state.task(2).unwrap().coordinate();

        for key in [
            Message::ToggleHelp,
            Message::NewTask,
            Message::Select,
            Message::DeleteSelected,
        ] {
            app.update(Message::PointerDown {
                column,
                row,
                button: PointerButton::Primary,
            });
            app.update(key.clone());
            assert!(!app.state.help_visible, "{key:?}");
            assert!(app.state.interaction.modal().is_none(), "{key:?}");
            assert_eq!(app.state.interaction.dragged_task(), Some(2), "{key:?}");

            app.update(Message::PointerUp { column, row });
            assert!(!app.state.interaction.is_dragging(), "{key:?}");
            assert_eq!(
                app.take_requests(),
                vec![StoreRequest::UpdatePosition {
                    task_id: 2,
                    coordinate: before,
                }],
                "{key:?}"
            );
        }
    }

    #[tokio::test]
    async fn clicking_empty_grid_opens_a_prefilled_form() {
        let mut app = loaded_app().await;
        let grid = app.grid_area();

        // The bottom-left corner lies past the last row of chips.
        app.update(Message::PointerDown {
            column: grid.left(),
            row: grid.bottom() - 1,
            button: PointerButton::Primary,
        });

        let Some(Modal::TaskForm(form)) = app.state.interaction.modal() else {
            panic!("expected the task form");
        };
        assert_eq!(form.coordinate(), Coordinate::clamped(0, 1));
        assert_eq!(app.input_mode(), InputMode::Form);

        for ch in "Walk the dog".chars() {
            app.update(Message::FormInput { ch });
        }
        app.update(Message::FormSubmit);
        assert!(app.state.interaction.modal().is_none());

        settle(&mut app).await;
        assert_eq!(app.state.tasks.len(), demo_tasks().len() + 1);
        let created = app
            .state
            .tasks
            .iter()
            .find(|t| t.title == "Walk the dog")
            .unwrap();
        assert_eq!(created.urgency.value(), 0);
        assert_eq!(created.importance.value(), 1);
        assert_eq!(
            app.state.notification,
            Some(Notification::info("Task created"))
        );
    }

    #[test]
    fn clicks_outside_the_grid_are_ignored() {
        let mut app = demo_app();
        app.update(Message::PointerDown {
            column: 1,
            row: 1,
            button: PointerButton::Primary,
        });
        assert!(app.state.interaction.modal().is_none());
        assert!(!app.state.interaction.is_dragging());
    }

    #[test]
    fn empty_title_keeps_the_form_open() {
        let mut app = demo_app();
        app.update(Message::NewTask);
        app.update(Message::FormSubmit);

        let Some(Modal::TaskForm(form)) = app.state.interaction.modal() else {
            panic!("expected the task form");
        };
        assert!(form.error.is_some());
        assert!(app.take_requests().iter().all(|r| !r.is_mutation()));
    }

    #[test]
    fn escape_closes_the_form() {
        let mut app = demo_app();
        app.update(Message::NewTask);
        app.update(Message::Escape);
        assert!(app.state.interaction.modal().is_none());
    }

    #[tokio::test]
    async fn context_menu_completes_a_task() {
        let mut app = loaded_app().await;
        let (column, row) = chip_cell(&app, 2);

        app.update(Message::PointerDown {
            column,
            row,
            button: PointerButton::Secondary,
        });
        assert_eq!(
            app.state.interaction.modal(),
            Some(&Modal::context_menu(2))
        );

        app.update(Message::NavigateDown);
        app.update(Message::Select);
        assert!(app.state.interaction.modal().is_none());
        assert_eq!(app.pending, vec![StoreRequest::Complete(2)]);

        settle(&mut app).await;
        assert!(app.state.task(2).unwrap().completed);
        assert_eq!(app.state.open_tasks().count(), 5);
    }

    #[tokio::test]
    async fn context_menu_entries_are_clickable() {
        let mut app = loaded_app().await;
        let (column, row) = chip_cell(&app, 5);
        app.update(Message::PointerDown {
            column,
            row,
            button: PointerButton::Secondary,
        });

        let menu = app.menu_rect(5).unwrap();
        // First entry is Edit.
        app.update(Message::PointerDown {
            column: menu.x + 2,
            row: menu.y + 1,
            button: PointerButton::Primary,
        });
        let Some(Modal::TaskForm(form)) = app.state.interaction.modal() else {
            panic!("expected the task form");
        };
        assert_eq!(form.title, "Reply to newsletter");
    }

    #[tokio::test]
    async fn clicking_outside_the_menu_closes_it() {
        let mut app = loaded_app().await;
        let (column, row) = chip_cell(&app, 5);
        app.update(Message::PointerDown {
            column,
            row,
            button: PointerButton::Secondary,
        });
        app.update(Message::PointerDown {
            column: 0,
            row: 0,
            button: PointerButton::Primary,
        });
        assert!(app.state.interaction.modal().is_none());
        assert!(app.take_requests().is_empty());
    }

    #[tokio::test]
    async fn delete_asks_for_confirmation() {
        let mut app = loaded_app().await;
        app.state.selected = Some(3);

        app.update(Message::DeleteSelected);
        assert_eq!(app.input_mode(), InputMode::Confirm);
        assert!(app.take_requests().is_empty());

        app.update(Message::Confirm);
        assert_eq!(app.state.selected, None);
        assert_eq!(app.pending, vec![StoreRequest::Delete(3)]);

        settle(&mut app).await;
        assert!(app.state.task(3).is_none());
    }

    #[tokio::test]
    async fn declining_delete_keeps_the_task() {
        let mut app = loaded_app().await;
        app.state.selected = Some(3);
        app.update(Message::DeleteSelected);
        app.update(Message::Escape);

        assert!(app.state.interaction.modal().is_none());
        assert!(app.take_requests().is_empty());
        assert!(app.state.task(3).is_some());
    }

    #[tokio::test]
    async fn select_edits_the_selected_task() {
        let mut app = loaded_app().await;
        app.update(Message::NavigateRight);
        let selected = app.state.selected.unwrap();

        app.update(Message::Select);
        let Some(Modal::TaskForm(form)) = app.state.interaction.modal() else {
            panic!("expected the task form");
        };
        assert_eq!(form.title, app.state.task(selected).unwrap().title);
    }

    #[tokio::test]
    async fn profile_page_loads_on_demand() {
        let mut app = loaded_app().await;
        app.update(Message::TogglePage);
        assert_eq!(app.state.page, Page::Profile);
        assert_eq!(app.pending, vec![StoreRequest::LoadProfile]);

        settle(&mut app).await;
        let profile = app.state.profile.as_ref().unwrap();
        assert_eq!(profile.stats.total_tasks, 8);

        app.update(Message::Escape);
        assert_eq!(app.state.page, Page::Matrix);
    }

    #[test]
    fn failures_are_reported_on_the_status_line() {
        let mut app = demo_app();
        app.handle_response(StoreResponse::Failed {
            action: "move task",
            error: "request timed out".to_string(),
        });
        assert_eq!(
            app.state.notification,
            Some(Notification::error("Could not move task: request timed out"))
        );
    }

    #[test]
    fn latest_task_list_wins() {
        let mut app = demo_app();
        let tasks = demo_tasks();
        app.handle_response(StoreResponse::Tasks(tasks.clone()));
        app.handle_response(StoreResponse::Tasks(tasks[..2].to_vec()));
        assert_eq!(app.state.tasks.len(), 2);
    }

    #[test]
    fn invalid_tasks_are_dropped() {
        let mut app = demo_app();
        let mut tasks = demo_tasks();
        tasks[0].title = "   ".to_string();
        app.handle_response(StoreResponse::Tasks(tasks));
        assert_eq!(app.state.tasks.len(), demo_tasks().len() - 1);
        assert!(app.state.task(1).is_none());
    }

    #[test]
    fn app_view_shows_too_small_message() {
        let mut app = demo_app();
        let content = screen(&mut app, 30, 10);
        assert!(content.contains("Terminal too small"));
    }

    #[tokio::test]
    async fn app_view_renders_header_matrix_and_status() {
        let mut app = loaded_app().await;
        let content = screen(&mut app, 80, 24);

        assert!(content.contains("eisen - Priority Matrix · demo data"));
        assert!(content.contains("Press ? for help"));
        assert!(content.contains("6 open · 2 done"));
        assert_eq!(app.last_area, Rect::new(0, 0, 80, 24));
    }

    #[tokio::test]
    async fn app_view_draws_confirm_prompt() {
        let mut app = loaded_app().await;
        app.state.selected = Some(3);
        app.update(Message::DeleteSelected);

        let content = screen(&mut app, 80, 24);
        assert!(content.contains("Delete \"Book dentist\"?"));
    }
}
