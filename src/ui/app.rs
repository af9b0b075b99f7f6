use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::library::{Library, MAX_BORROW};
use crate::models::{Book, Member};
use crate::store::save_library;

use super::forms::{BookField, BookForm, LoanField, LoanForm, MemberField, MemberForm};
use super::helpers::{centered_rect, surface_error};
use super::screens::{CatalogScreen, MemberScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// High-level navigation states. Keeping this explicit makes it easy to reason
/// about which rendering path runs and what keyboard shortcuts should do.
enum Screen {
    Catalog(CatalogScreen),
    Members(MemberScreen),
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    AddingBook(BookForm),
    RegisteringMember(MemberForm),
    Borrowing(LoanForm),
    Returning(LoanForm),
    Searching(SearchState),
}

/// State for an active inline catalog search.
struct SearchState {
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. Owns the `Library`
/// aggregate for the lifetime of the process; every menu action funnels into
/// exactly one core operation.
pub struct App {
    library: Library,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(library: Library) -> Self {
        let catalog = CatalogScreen::new(library.books().to_vec());
        Self {
            library,
            screen: Screen::Catalog(catalog),
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingBook(form) => self.handle_add_book(code, form)?,
            Mode::RegisteringMember(form) => self.handle_register_member(code, form)?,
            Mode::Borrowing(form) => self.handle_borrow(code, form)?,
            Mode::Returning(form) => self.handle_return(code, form)?,
            Mode::Searching(state) => self.handle_search(code, state)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Catalog(ref mut catalog) => {
                let mut save_and_exit = false;
                let mut open_members = false;
                let mut clear_filter = false;

                {
                    let catalog = &mut *catalog;
                    match code {
                        KeyCode::Char('q') => {
                            save_and_exit = true;
                        }
                        KeyCode::Esc => {
                            if catalog.filter.is_some() {
                                clear_filter = true;
                            }
                        }
                        KeyCode::Up => catalog.move_selection(-1),
                        KeyCode::Down => catalog.move_selection(1),
                        KeyCode::PageUp => catalog.move_selection(-5),
                        KeyCode::PageDown => catalog.move_selection(5),
                        KeyCode::Home => catalog.select_first(),
                        KeyCode::End => catalog.select_last(),
                        KeyCode::Char('f') => {
                            return Ok(Mode::Searching(SearchState {
                                query: String::new(),
                            }));
                        }
                        KeyCode::Char('m') | KeyCode::Char('M') => {
                            open_members = true;
                        }
                        KeyCode::Char('+') => {
                            return Ok(Mode::AddingBook(BookForm::default()));
                        }
                        KeyCode::Char('b') | KeyCode::Char('B') => {
                            let form = match catalog.current_book() {
                                Some(book) if book.available => LoanForm::with_isbn(&book.isbn),
                                _ => LoanForm::default(),
                            };
                            return Ok(Mode::Borrowing(form));
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            let form = match catalog.current_book() {
                                Some(book) if !book.available => LoanForm::with_isbn(&book.isbn),
                                _ => LoanForm::default(),
                            };
                            return Ok(Mode::Returning(form));
                        }
                        _ => {}
                    }
                }

                if clear_filter {
                    self.apply_filter(None);
                    self.set_status("Search cleared.", StatusKind::Info);
                } else if open_members {
                    self.clear_status();
                    self.open_members_view();
                } else if save_and_exit {
                    self.persist().context("failed to save library data")?;
                    *exit = true;
                }

                Ok(Mode::Normal)
            }
            Screen::Members(ref mut members) => {
                let mut save_and_exit = false;
                let mut back_to_catalog = false;

                {
                    let members = &mut *members;
                    match code {
                        KeyCode::Char('q') => {
                            save_and_exit = true;
                        }
                        KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('M') => {
                            back_to_catalog = true;
                        }
                        KeyCode::Up => members.move_selection(-1),
                        KeyCode::Down => members.move_selection(1),
                        KeyCode::PageUp => members.move_selection(-5),
                        KeyCode::PageDown => members.move_selection(5),
                        KeyCode::Home => members.select_first(),
                        KeyCode::End => members.select_last(),
                        KeyCode::Char('+') => {
                            return Ok(Mode::RegisteringMember(MemberForm::default()));
                        }
                        KeyCode::Char('b') | KeyCode::Char('B') => {
                            let form = match members.current_member() {
                                Some(member) => LoanForm::with_member(&member.member_id),
                                None => LoanForm::default(),
                            };
                            return Ok(Mode::Borrowing(form));
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            let form = match members.current_member() {
                                Some(member) => LoanForm::with_member(&member.member_id),
                                None => LoanForm::default(),
                            };
                            return Ok(Mode::Returning(form));
                        }
                        _ => {}
                    }
                }

                if back_to_catalog {
                    self.clear_status();
                    self.open_catalog_view();
                } else if save_and_exit {
                    self.persist().context("failed to save library data")?;
                    *exit = true;
                }

                Ok(Mode::Normal)
            }
        }
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_book(&form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingBook(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_register_member(&mut self, code: KeyCode, mut form: MemberForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Registration cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.register_new_member(&form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::RegisteringMember(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_borrow(&mut self, code: KeyCode, mut form: LoanForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Borrow cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.perform_borrow(&form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::Borrowing(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_return(&mut self, code: KeyCode, mut form: LoanForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Return cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.perform_return(&form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::Returning(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.apply_filter(None);
                self.clear_status();
                Ok(Mode::Normal)
            }
            KeyCode::Enter => {
                // Keep the committed filter active; Esc from the list clears
                // it again.
                Ok(Mode::Normal)
            }
            KeyCode::Backspace => {
                state.query.pop();
                self.apply_filter(Some(state.query.clone()));
                Ok(Mode::Searching(state))
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                state.query.push(ch);
                self.apply_filter(Some(state.query.clone()));
                Ok(Mode::Searching(state))
            }
            _ => Ok(Mode::Searching(state)),
        }
    }

    /// Explicit save without leaving the application.
    pub(crate) fn handle_ctrl_s(&mut self) -> Result<()> {
        match self.persist() {
            Ok(()) => self.set_status("Data saved.", StatusKind::Info),
            Err(err) => {
                let message = surface_error(&err);
                self.set_status(message, StatusKind::Error);
            }
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        save_library(&self.library)
    }

    fn save_new_book(&mut self, form: &BookForm) -> Result<()> {
        let (title, author, isbn, year) = form.parse_inputs()?;
        self.library.add_book(Book::new(isbn, title.clone(), author, year))?;
        self.refresh_current_screen();
        self.set_status(format!("Added '{title}'."), StatusKind::Info);
        Ok(())
    }

    fn register_new_member(&mut self, form: &MemberForm) -> Result<()> {
        let (name, member_id) = form.parse_inputs()?;
        self.library
            .register_member(Member::new(member_id, name.clone()))?;
        self.refresh_current_screen();
        self.set_status(format!("Registered '{name}'."), StatusKind::Info);
        Ok(())
    }

    fn perform_borrow(&mut self, form: &LoanForm) -> Result<()> {
        let (member_id, isbn) = form.parse_inputs()?;
        let due = self.library.borrow_book(&member_id, &isbn)?;
        let title = self.book_title(&isbn);
        self.refresh_current_screen();
        self.set_status(
            format!("Borrowed '{}'. Due on {}.", title, due.format("%Y-%m-%d")),
            StatusKind::Info,
        );
        Ok(())
    }

    fn perform_return(&mut self, form: &LoanForm) -> Result<()> {
        let (member_id, isbn) = form.parse_inputs()?;
        let overdue_days = self.library.return_book(&member_id, &isbn)?;
        let title = self.book_title(&isbn);
        self.refresh_current_screen();
        let message = if overdue_days > 0 {
            format!("Returned '{title}' | Overdue days: {overdue_days}")
        } else {
            format!("Returned '{title}' on time.")
        };
        self.set_status(message, StatusKind::Info);
        Ok(())
    }

    fn book_title(&self, isbn: &str) -> String {
        self.library
            .book(isbn)
            .map(|book| book.title.clone())
            .unwrap_or_else(|| isbn.to_string())
    }

    fn open_catalog_view(&mut self) {
        let rows = self.library.books().to_vec();
        self.screen = Screen::Catalog(CatalogScreen::new(rows));
    }

    fn open_members_view(&mut self) {
        let rows = self.library.members().to_vec();
        self.screen = Screen::Members(MemberScreen::new(rows));
    }

    /// Re-snapshot the rows of whichever screen is visible, preserving the
    /// active search on the catalog. Called after every successful mutation.
    fn refresh_current_screen(&mut self) {
        let catalog_filter = match &self.screen {
            Screen::Catalog(catalog) => Some(catalog.filter.clone()),
            Screen::Members(_) => None,
        };

        match catalog_filter {
            Some(filter) => {
                let rows = self.catalog_rows(filter.as_deref());
                if let Screen::Catalog(catalog) = &mut self.screen {
                    catalog.set_rows(rows);
                }
            }
            None => {
                let rows = self.library.members().to_vec();
                if let Screen::Members(members) = &mut self.screen {
                    members.set_rows(rows);
                }
            }
        }
    }

    /// Narrow (or restore) the catalog rows for the given query.
    fn apply_filter(&mut self, filter: Option<String>) {
        let rows = self.catalog_rows(filter.as_deref());
        if let Screen::Catalog(catalog) = &mut self.screen {
            catalog.filter = filter;
            catalog.set_rows(rows);
        }
    }

    fn catalog_rows(&self, filter: Option<&str>) -> Vec<Book> {
        match filter {
            Some(query) if !query.trim().is_empty() => self
                .library
                .find_books(query)
                .into_iter()
                .cloned()
                .collect(),
            _ => self.library.books().to_vec(),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Catalog(catalog) => self.draw_catalog(frame, content_area, catalog),
            Screen::Members(members) => self.draw_members(frame, content_area, members),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingBook(form) => self.draw_book_form(frame, area, form),
            Mode::RegisteringMember(form) => self.draw_member_form(frame, area, form),
            Mode::Borrowing(form) => self.draw_loan_form(frame, area, "Borrow Book", form),
            Mode::Returning(form) => self.draw_loan_form(frame, area, "Return Book", form),
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::Normal => {}
        }
    }

    fn draw_catalog(&self, frame: &mut Frame, area: Rect, catalog: &CatalogScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(area);

        let stats = self.library.statistics();
        let mut header_lines = vec![Line::from(vec![
            Span::styled("Library", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(
                "  |  Total books: {}  |  Available: {}",
                stats.total_books, stats.available_books
            )),
        ])];
        if let Some(filter) = &catalog.filter {
            header_lines.push(Line::from(vec![
                Span::styled("Search: ", Style::default().fg(Color::Yellow)),
                Span::raw(filter.clone()),
                Span::styled("  (Esc to clear)", Style::default().fg(Color::DarkGray)),
            ]));
        } else {
            header_lines.push(Line::from(Span::styled(
                format!("Loan period: 14 days, max {MAX_BORROW} books per member"),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let header = Paragraph::new(header_lines)
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL).title("Statistics"));
        frame.render_widget(header, chunks[0]);

        if catalog.rows.is_empty() {
            let message = if catalog.filter.is_some() {
                "No books match the current search."
            } else {
                "No books yet. Press '+' to add one."
            };
            let paragraph = Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Catalog"));
            frame.render_widget(paragraph, chunks[1]);
            return;
        }

        let items: Vec<ListItem> = catalog
            .rows
            .iter()
            .map(|book| {
                let status_style = if book.available {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Yellow)
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} - {}  ", book.title, book.author)),
                    Span::styled(format!("[{}]", book.status_label()), status_style),
                    Span::styled(
                        format!("  ISBN {}", book.isbn),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Catalog"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(catalog.selected));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn draw_members(&self, frame: &mut Frame, area: Rect, members: &MemberScreen) {
        if members.rows.is_empty() {
            let paragraph = Paragraph::new("No members yet. Press '+' to register one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Members"));
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = members
            .rows
            .iter()
            .map(|member| {
                let mut lines = vec![Line::from(vec![
                    Span::raw(format!("{} (ID: {})  ", member.name, member.member_id)),
                    Span::styled(
                        format!("Loans: {}/{MAX_BORROW}", member.loan_count()),
                        Style::default().fg(Color::Cyan),
                    ),
                ])];
                if !member.borrowed_isbns.is_empty() {
                    lines.push(Line::from(Span::styled(
                        format!("    Borrowed: {}", member.borrowed_isbns.join(", ")),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Members"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(members.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let text = match self.screen {
            Screen::Catalog(_) => {
                "[+] add book  [b] borrow  [r] return  [f] search  [m] members  [Ctrl-S] save  [q] save & quit"
            }
            Screen::Members(_) => {
                "[+] register member  [b] borrow  [r] return  [Esc] back  [Ctrl-S] save  [q] save & quit"
            }
        };
        Line::from(Span::styled(text, Style::default().fg(Color::Gray)))
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title("Search");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let cursor_x = popup_area.x + 1 + "Search: ".len() as u16 + state.query.chars().count() as u16;
        let cursor_y = popup_area.y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, form: &BookForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Title", BookField::Title),
            form.build_line("Author", BookField::Author),
            form.build_line("ISBN", BookField::Isbn),
            form.build_line("Year", BookField::Year),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save - Tab to switch - Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, row) = match form.active {
            BookField::Title => ("Title: ", 0),
            BookField::Author => ("Author: ", 1),
            BookField::Isbn => ("ISBN: ", 2),
            BookField::Year => ("Year: ", 3),
        };
        let cursor_x = inner.x + prefix.len() as u16 + form.value_len(form.active) as u16;
        frame.set_cursor_position((cursor_x, inner.y + row));
    }

    fn draw_member_form(&self, frame: &mut Frame, area: Rect, form: &MemberForm) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Register Member")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Name", MemberField::Name),
            form.build_line("Member ID", MemberField::MemberId),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save - Tab to switch - Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, row) = match form.active {
            MemberField::Name => ("Name: ", 0),
            MemberField::MemberId => ("Member ID: ", 1),
        };
        let cursor_x = inner.x + prefix.len() as u16 + form.value_len(form.active) as u16;
        frame.set_cursor_position((cursor_x, inner.y + row));
    }

    fn draw_loan_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &LoanForm) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Member ID", LoanField::MemberId),
            form.build_line("ISBN", LoanField::Isbn),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to confirm - Tab to switch - Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, row) = match form.active {
            LoanField::MemberId => ("Member ID: ", 0),
            LoanField::Isbn => ("ISBN: ", 1),
        };
        let cursor_x = inner.x + prefix.len() as u16 + form.value_len(form.active) as u16;
        frame.set_cursor_position((cursor_x, inner.y + row));
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
