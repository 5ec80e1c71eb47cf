//! Main TUI application state and event loop

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::api::{self, ApiClient};

use super::events::AppEvent;
use super::screens::{
    AddQuestionScreen, CmScreen, HelpScreen, MainMenuScreen, QuestionsScreen, SignedOutScreen,
    UsersScreen,
};
use super::ui::Styles;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    CmList,
    Questions,
    AddQuestion,
    Users,
    Help,
    SignedOut,
}

impl Screen {
    fn title(&self) -> &'static str {
        match self {
            Screen::MainMenu => "Main Menu",
            Screen::CmList => "Chief Ministers",
            Screen::Questions => "Questions",
            Screen::AddQuestion => "Add Question",
            Screen::Users => "Users",
            Screen::Help => "Help",
            Screen::SignedOut => "Signed Out",
        }
    }
}

/// Main TUI application state
pub struct App {
    pub current_screen: Screen,
    pub previous_screen: Option<Screen>,
    client: Arc<ApiClient>,
    events_tx: UnboundedSender<AppEvent>,

    // Screen states
    pub main_menu: MainMenuScreen,
    pub cm: CmScreen,
    pub questions: QuestionsScreen,
    pub add_question: AddQuestionScreen,
    pub users: UsersScreen,
    pub help: HelpScreen,
    pub signed_out: SignedOutScreen,

    // Global application state
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
}

impl App {
    pub fn new(client: ApiClient, events_tx: UnboundedSender<AppEvent>) -> Self {
        let current_screen = if client.is_signed_in() {
            Screen::MainMenu
        } else {
            Screen::SignedOut
        };

        Self {
            current_screen,
            previous_screen: None,
            client: Arc::new(client),
            events_tx,

            main_menu: MainMenuScreen::new(),
            cm: CmScreen::new(),
            questions: QuestionsScreen::new(),
            add_question: AddQuestionScreen::new(),
            users: UsersScreen::new(),
            help: HelpScreen::new(),
            signed_out: SignedOutScreen::new(),

            should_quit: false,
            status_message: None,
            error_message: None,
        }
    }

    /// Run the main application loop: draw, then consume key presses and API
    /// completions from one channel until quit.
    pub async fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut events_rx: UnboundedReceiver<AppEvent>,
    ) -> Result<()> {
        spawn_input_thread(self.events_tx.clone());

        terminal.draw(|f| self.draw(f))?;

        while let Some(event) = events_rx.recv().await {
            match event {
                AppEvent::Key(key) => self.handle_key_event(key),
                completion => self.apply_completion(completion),
            }

            if self.should_quit {
                info!("quit requested");
                break;
            }

            terminal.draw(|f| self.draw(f))?;
        }

        Ok(())
    }

    /// Navigate to a screen; resource screens refetch on entry.
    pub fn navigate_to(&mut self, screen: Screen) {
        self.previous_screen = Some(self.current_screen);
        self.current_screen = screen;
        self.clear_messages();

        match screen {
            Screen::CmList => self.refresh_cm(),
            Screen::Questions => self.refresh_questions(),
            Screen::Users => self.refresh_users(),
            Screen::AddQuestion => {
                self.add_question.form.reset();
                self.add_question.banner = None;
                self.add_question.submitting = false;
            }
            _ => {}
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.error_message = None;
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.status_message = None;
    }

    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }

    /// The API rejected the session: fall back to the signed-out guard.
    fn force_sign_out(&mut self) {
        warn!("session rejected by the API");
        self.signed_out.note = Some("Session expired or invalid.".to_string());
        self.current_screen = Screen::SignedOut;
    }

    // ----- fetch dispatch ---------------------------------------------------

    fn refresh_cm(&mut self) {
        let seq = self.cm.begin_fetch();
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api::cm::list(&client).await;
            let _ = tx.send(AppEvent::CmListed { seq, result });
        });
    }

    fn refresh_questions(&mut self) {
        let seq = self.questions.begin_fetch();
        let search = self.questions.search.trimmed().to_string();
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api::questions::list(&client, &search).await;
            let _ = tx.send(AppEvent::QuestionsListed { seq, result });
        });
    }

    fn refresh_users(&mut self) {
        let seq = self.users.begin_fetch();
        let filters = self.users.filters();
        let page = self.users.page;
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api::users::list(&client, &filters, page).await;
            let _ = tx.send(AppEvent::UsersListed { seq, result });
        });
    }

    // ----- completion handling ----------------------------------------------

    fn apply_completion(&mut self, event: AppEvent) {
        match event {
            AppEvent::CmListed { seq, result } => {
                if !self.cm.seq.is_latest(seq) {
                    debug!(seq, "dropping stale CM list response");
                    return;
                }
                self.cm.is_loading = false;
                match result {
                    Ok(records) => {
                        self.cm.fetch_error = None;
                        self.cm.list.set_items(records);
                    }
                    Err(e) if e.is_unauthorized() => self.force_sign_out(),
                    Err(e) => self.cm.fetch_error = Some(e.to_string()),
                }
            }

            AppEvent::QuestionsListed { seq, result } => {
                if !self.questions.seq.is_latest(seq) {
                    debug!(seq, "dropping stale questions response");
                    return;
                }
                self.questions.is_loading = false;
                match result {
                    Ok(page) => {
                        self.questions.fetch_error = None;
                        self.questions.total_questions = page.total_questions;
                        self.questions.list.set_items(page.questions);
                    }
                    Err(e) if e.is_unauthorized() => self.force_sign_out(),
                    Err(e) => self.questions.fetch_error = Some(e.to_string()),
                }
            }

            AppEvent::UsersListed { seq, result } => {
                if !self.users.seq.is_latest(seq) {
                    debug!(seq, "dropping stale users response");
                    return;
                }
                self.users.is_loading = false;
                match result {
                    Ok(page) => {
                        self.users.fetch_error = None;
                        self.users.page = page.current_page;
                        self.users.total_pages = page.total_pages.max(1);
                        self.users.list.set_items(page.users);
                    }
                    Err(e) if e.is_unauthorized() => self.force_sign_out(),
                    Err(e) => self.users.fetch_error = Some(e.to_string()),
                }
            }

            AppEvent::CmMutated { result } => match result {
                Ok(message) => {
                    if self.cm.modal.submit_succeeded() {
                        self.set_status(message);
                        self.refresh_cm();
                    }
                }
                Err(e) if e.is_unauthorized() => self.force_sign_out(),
                Err(e) => self.cm.modal.submit_failed(e.to_string()),
            },

            AppEvent::QuestionMutated { result } => match result {
                Ok(message) => {
                    if self.questions.modal.submit_succeeded() {
                        self.set_status(message);
                        self.refresh_questions();
                    }
                }
                Err(e) if e.is_unauthorized() => self.force_sign_out(),
                Err(e) => self.questions.modal.submit_failed(e.to_string()),
            },

            AppEvent::QuestionCreated { result } => match result {
                Ok(message) => self.add_question.apply_result(Ok(message)),
                Err(e) if e.is_unauthorized() => {
                    self.add_question.submitting = false;
                    self.force_sign_out();
                }
                Err(e) => self.add_question.apply_result(Err(e.to_string())),
            },

            AppEvent::Key(_) => unreachable!("key events are routed separately"),
        }
    }

    // ----- mutation dispatch ------------------------------------------------

    fn submit_cm_form(&mut self) {
        let payload = match self.cm.form.validate() {
            Ok(payload) => payload,
            Err(message) => {
                self.cm.modal.set_error(message);
                return;
            }
        };

        let target = self.cm.modal.selected().map(|cm| cm.id.clone());
        if !self.cm.modal.begin_submit() {
            return;
        }

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = match target {
                Some(id) => api::cm::update(&client, &id, &payload)
                    .await
                    .map(|_| "Chief Minister updated successfully!".to_string()),
                None => api::cm::create(&client, &payload)
                    .await
                    .map(|_| "Chief Minister added successfully!".to_string()),
            };
            let _ = tx.send(AppEvent::CmMutated { result });
        });
    }

    fn submit_cm_delete(&mut self) {
        let Some(id) = self.cm.modal.selected().map(|cm| cm.id.clone()) else {
            return;
        };
        if !self.cm.modal.begin_submit() {
            return;
        }

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api::cm::delete(&client, &id)
                .await
                .map(|_| "Chief Minister deleted successfully!".to_string());
            let _ = tx.send(AppEvent::CmMutated { result });
        });
    }

    fn submit_question_update(&mut self) {
        let payload = match self.questions.form.validate() {
            Ok(payload) => payload,
            Err(message) => {
                self.questions.modal.set_error(message);
                return;
            }
        };

        let Some(id) = self.questions.modal.selected().map(|q| q.id.clone()) else {
            return;
        };
        if !self.questions.modal.begin_submit() {
            return;
        }

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api::questions::update(&client, &id, &payload)
                .await
                .map(|_| "Question updated successfully!".to_string());
            let _ = tx.send(AppEvent::QuestionMutated { result });
        });
    }

    fn submit_question_delete(&mut self) {
        let Some(id) = self.questions.modal.selected().map(|q| q.id.clone()) else {
            return;
        };
        if !self.questions.modal.begin_submit() {
            return;
        }

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api::questions::delete(&client, &id)
                .await
                .map(|_| "Question deleted successfully!".to_string());
            let _ = tx.send(AppEvent::QuestionMutated { result });
        });
    }

    fn submit_question_create(&mut self) {
        let payload = match self.add_question.form.validate() {
            Ok(payload) => payload,
            Err(message) => {
                self.add_question.banner =
                    Some(crate::admin_tui::components::StatusMessage::error(message));
                return;
            }
        };

        self.add_question.submitting = true;
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api::questions::create(&client, &payload)
                .await
                .map(|_| "Question created successfully!".to_string());
            let _ = tx.send(AppEvent::QuestionCreated { result });
        });
    }

    // ----- key handling -----------------------------------------------------

    fn handle_key_event(&mut self, key: KeyEvent) {
        match self.current_screen {
            Screen::MainMenu => self.handle_main_menu_keys(key),
            Screen::CmList => self.handle_cm_keys(key),
            Screen::Questions => self.handle_questions_keys(key),
            Screen::AddQuestion => self.handle_add_question_keys(key),
            Screen::Users => self.handle_users_keys(key),
            Screen::Help => self.handle_help_keys(key),
            Screen::SignedOut => self.handle_signed_out_keys(key),
        }
    }

    fn handle_main_menu_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.main_menu.menu.previous(),
            KeyCode::Down => self.main_menu.menu.next(),
            KeyCode::Enter => {
                if let Some(option) = self.main_menu.menu.selected() {
                    let screen = option.screen;
                    self.navigate_to(screen);
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c) => {
                if let Some(screen) = self.main_menu.screen_for_shortcut(c) {
                    self.navigate_to(screen);
                }
            }
            _ => {}
        }
    }

    fn handle_cm_keys(&mut self, key: KeyEvent) {
        if self.cm.modal.is_editing() {
            if self.cm.modal.is_submitting() {
                return;
            }
            if self.cm.form.handle_key(key) {
                return;
            }
            match key.code {
                KeyCode::Enter => self.submit_cm_form(),
                KeyCode::Esc => self.cm.modal.cancel(),
                _ => {}
            }
            return;
        }

        if self.cm.modal.is_confirming_delete() {
            if self.cm.modal.is_submitting() {
                return;
            }
            match key.code {
                KeyCode::Enter => self.submit_cm_delete(),
                KeyCode::Esc => self.cm.modal.cancel(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Up => self.cm.list.previous(),
            KeyCode::Down => self.cm.list.next(),
            KeyCode::Char('a') => {
                self.cm.form.reset();
                self.cm.modal.open_create();
            }
            KeyCode::Char('e') => {
                if let Some(cm) = self.cm.list.selected().cloned() {
                    self.cm.form.load(&cm);
                    self.cm.modal.open_edit(cm);
                }
            }
            KeyCode::Char('d') => {
                if let Some(cm) = self.cm.list.selected().cloned() {
                    self.cm.modal.open_delete(cm);
                }
            }
            KeyCode::Char('r') => self.refresh_cm(),
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.navigate_to(Screen::MainMenu),
            _ => {}
        }
    }

    fn handle_questions_keys(&mut self, key: KeyEvent) {
        if self.questions.modal.is_editing() {
            if self.questions.modal.is_submitting() {
                return;
            }
            if self.questions.form.handle_key(key) {
                return;
            }
            match key.code {
                KeyCode::Enter => self.submit_question_update(),
                KeyCode::Esc => self.questions.modal.cancel(),
                _ => {}
            }
            return;
        }

        if self.questions.modal.is_confirming_delete() {
            if self.questions.modal.is_submitting() {
                return;
            }
            match key.code {
                KeyCode::Enter => self.submit_question_delete(),
                KeyCode::Esc => self.questions.modal.cancel(),
                _ => {}
            }
            return;
        }

        if self.questions.search_focused {
            match key.code {
                KeyCode::Enter => {
                    self.questions.set_search_focus(false);
                    self.refresh_questions();
                }
                KeyCode::Esc => self.questions.set_search_focus(false),
                KeyCode::Char(c) => self.questions.search.insert_char(c),
                KeyCode::Backspace => self.questions.search.delete_char(),
                KeyCode::Delete => self.questions.search.delete_char_forward(),
                KeyCode::Left => self.questions.search.move_cursor_left(),
                KeyCode::Right => self.questions.search.move_cursor_right(),
                KeyCode::Home => self.questions.search.move_cursor_to_start(),
                KeyCode::End => self.questions.search.move_cursor_to_end(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('/') => self.questions.set_search_focus(true),
            KeyCode::Up => self.questions.list.previous(),
            KeyCode::Down => self.questions.list.next(),
            KeyCode::Char('a') => self.navigate_to(Screen::AddQuestion),
            KeyCode::Char('e') => {
                if let Some(question) = self.questions.list.selected().cloned() {
                    self.questions.form.load(&question);
                    self.questions.modal.open_edit(question);
                }
            }
            KeyCode::Char('d') => {
                if let Some(question) = self.questions.list.selected().cloned() {
                    self.questions.modal.open_delete(question);
                }
            }
            KeyCode::Char('r') => self.refresh_questions(),
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.navigate_to(Screen::MainMenu),
            _ => {}
        }
    }

    fn handle_add_question_keys(&mut self, key: KeyEvent) {
        if self.add_question.submitting {
            return;
        }
        if self.add_question.form.handle_key(key) {
            return;
        }
        match key.code {
            KeyCode::Enter => self.submit_question_create(),
            KeyCode::Esc => self.navigate_to(Screen::Questions),
            _ => {}
        }
    }

    fn handle_users_keys(&mut self, key: KeyEvent) {
        // An open filter dropdown captures navigation keys
        if let Some(field) = self.users.focused_filter_mut() {
            if field.show_dropdown {
                match key.code {
                    KeyCode::Up => field.dropdown_up(),
                    KeyCode::Down => field.dropdown_down(),
                    KeyCode::Enter => field.select_dropdown_value(),
                    KeyCode::Esc => field.show_dropdown = false,
                    _ => {}
                }
                return;
            }
        }

        match key.code {
            KeyCode::Tab => self.users.next_focus(),
            KeyCode::BackTab => self.users.previous_focus(),
            KeyCode::Enter => {
                self.users.page = 1;
                self.refresh_users();
            }
            KeyCode::Left => {
                if self.users.has_previous_page() {
                    self.users.page -= 1;
                    self.refresh_users();
                }
            }
            KeyCode::Right => {
                if self.users.has_next_page() {
                    self.users.page += 1;
                    self.refresh_users();
                }
            }
            KeyCode::Up if self.users.table_focused() => self.users.list.previous(),
            KeyCode::Down if self.users.table_focused() => self.users.list.next(),
            KeyCode::Char('r') if self.users.table_focused() => self.refresh_users(),
            KeyCode::Char('q') if self.users.table_focused() => self.should_quit = true,
            KeyCode::Char(' ') => {
                if let Some(field) = self.users.focused_filter_mut() {
                    field.open_dropdown();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.users.focused_filter_mut() {
                    field.insert_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.users.focused_filter_mut() {
                    field.delete_char();
                }
            }
            KeyCode::Esc => self.navigate_to(Screen::MainMenu),
            _ => {}
        }
    }

    fn handle_help_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.help.sections.previous();
                self.help.scroll_offset = 0;
            }
            KeyCode::Down => {
                self.help.sections.next();
                self.help.scroll_offset = 0;
            }
            KeyCode::PageUp => {
                self.help.scroll_offset = self.help.scroll_offset.saturating_sub(5);
            }
            KeyCode::PageDown => self.help.scroll_offset += 5,
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.navigate_to(Screen::MainMenu),
            _ => {}
        }
    }

    fn handle_signed_out_keys(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            self.should_quit = true;
        }
    }

    // ----- drawing ----------------------------------------------------------

    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        match self.current_screen {
            Screen::MainMenu => self.main_menu.draw(f, chunks[0]),
            Screen::CmList => self.cm.draw(f, chunks[0]),
            Screen::Questions => self.questions.draw(f, chunks[0]),
            Screen::AddQuestion => self.add_question.draw(f, chunks[0]),
            Screen::Users => self.users.draw(f, chunks[0]),
            Screen::Help => self.help.draw(f, chunks[0]),
            Screen::SignedOut => self.signed_out.draw(f, chunks[0]),
        }

        self.draw_status_bar(f, chunks[1]);
    }

    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if let Some(ref msg) = self.status_message {
            msg.clone()
        } else if let Some(ref err) = self.error_message {
            format!("Error: {}", err)
        } else {
            format!(
                "Election Khelo Admin - {} | Esc: Back | q: Quit",
                self.current_screen.title()
            )
        };

        let style = if self.error_message.is_some() {
            Styles::error()
        } else if self.status_message.is_some() {
            Styles::success()
        } else {
            Styles::inactive()
        };

        let status_bar = Paragraph::new(status_text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(status_bar, area);
    }
}

/// Forward crossterm key presses into the application channel from a
/// dedicated thread; the blocking read never touches application state.
fn spawn_input_thread(tx: UnboundedSender<AppEvent>) {
    std::thread::spawn(move || loop {
        match crossterm::event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if tx.send(AppEvent::Key(key)).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(_) => break,
        }
    });
}
