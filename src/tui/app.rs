use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tracing::{debug, info};

use super::theme::flexoki;
use super::to_color;
use super::widgets::{element_card, no_results_lines, part_card};
use crate::api::{ApiClient, SearchError, SearchHit, SearchKind};
use crate::search::{SearchController, SearchPoll};
use crate::term::SearchTerm;

#[cfg(test)]
mod tests;

/// The shared result surface: one region, one state, rendered from scratch
/// every frame. Any user action may re-enter Loading or Idle from any state.
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    Idle,
    Loading { kind: SearchKind, term: String },
    Result(SearchHit),
    NoResults { kind: SearchKind, term: String },
    Error(String),
}

pub struct AppState {
    tab: SearchKind,
    part_input: String,
    element_input: String,
    input_mode: bool,
    surface: Surface,
    controller: SearchController,
    throbber: ThrobberState,
}

impl AppState {
    pub fn new(client: ApiClient) -> Self {
        Self {
            tab: SearchKind::Part,
            part_input: String::new(),
            element_input: String::new(),
            input_mode: true,
            surface: Surface::Idle,
            controller: SearchController::new(client),
            throbber: ThrobberState::default(),
        }
    }

    fn buffer(&self) -> &str {
        match self.tab {
            SearchKind::Part => &self.part_input,
            SearchKind::Element => &self.element_input,
        }
    }

    fn buffer_mut(&mut self) -> &mut String {
        match self.tab {
            SearchKind::Part => &mut self.part_input,
            SearchKind::Element => &mut self.element_input,
        }
    }

    /// Activating a tab clears the surface unconditionally and discards any
    /// in-flight search, whatever kind it was for.
    fn switch_tab(&mut self, kind: SearchKind) {
        debug!(from = %self.tab, to = %kind, "Switching tab");
        self.tab = kind;
        self.surface = Surface::Idle;
        self.controller.reset();
    }

    /// Validate, then go to Loading and hand off to the controller. A
    /// validation failure shows the error and never reaches the network.
    fn run_search(&mut self) {
        match SearchTerm::parse(self.buffer()) {
            Err(e) => {
                debug!(kind = %self.tab, error = %e, "Rejected search term");
                self.surface = Surface::Error(e.to_string());
            }
            Ok(term) => {
                info!(kind = %self.tab, %term, "Submitting search");
                self.surface = Surface::Loading {
                    kind: self.tab,
                    term: term.as_str().to_string(),
                };
                self.controller.submit(self.tab, term);
            }
        }
    }

    /// Folds the latest controller poll into the surface.
    fn absorb(&mut self) {
        match self.controller.poll() {
            SearchPoll::Idle | SearchPoll::Pending => {}
            SearchPoll::Finished { result, .. } => {
                self.surface = match result {
                    Ok(hit) => Surface::Result(hit),
                    Err(SearchError::NotFound { kind, term }) => {
                        Surface::NoResults { kind, term }
                    }
                    Err(e) => Surface::Error(e.to_string()),
                };
            }
        }
    }

    /// Returns false when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        // Tab switching is available in both modes, like the original UI's
        // always-clickable tab headers.
        if code == KeyCode::Tab {
            self.switch_tab(self.tab.other());
            return true;
        }

        if self.input_mode {
            match code {
                KeyCode::Esc => self.input_mode = false,
                KeyCode::Enter => {
                    self.input_mode = false;
                    self.run_search();
                }
                KeyCode::Backspace => {
                    self.buffer_mut().pop();
                }
                KeyCode::Char(c) => self.buffer_mut().push(c),
                _ => {}
            }
            return true;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("TUI quit requested");
                return false;
            }
            KeyCode::Char('/') | KeyCode::Char('i') | KeyCode::Char('e') => {
                self.input_mode = true;
            }
            KeyCode::Enter => self.run_search(),
            KeyCode::Left | KeyCode::Right => self.switch_tab(self.tab.other()),
            KeyCode::Char('1') => self.switch_tab(SearchKind::Part),
            KeyCode::Char('2') => self.switch_tab(SearchKind::Element),
            _ => {}
        }
        true
    }
}

pub fn run_tui(client: ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting TUI application");
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new(client);
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(100);

    loop {
        app.absorb();

        terminal.draw(|f| draw(f, &app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !app.handle_key(key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.throbber.calc_next();
            last_tick = Instant::now();
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
    info!("TUI application exited");
    Ok(())
}

fn draw(f: &mut ratatui::Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Result surface
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    draw_tabs(f, chunks[0], app);
    draw_input(f, chunks[1], app);
    draw_surface(f, chunks[2], app);
    draw_footer(f, chunks[3], app);
}

fn draw_tabs(f: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let titles = [SearchKind::Part, SearchKind::Element]
        .iter()
        .map(|kind| Line::from(format!(" {} ", kind.title())));
    let selected = match app.tab {
        SearchKind::Part => 0,
        SearchKind::Element => 1,
    };
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::default().borders(Borders::ALL).title("LEGO Search"))
        .highlight_style(
            Style::default()
                .fg(to_color(flexoki::YELLOW_400))
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn draw_input(f: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let title = if app.input_mode {
        format!("{} number (Enter: search, ESC: stop typing)", app.tab.title())
    } else {
        format!("{} number", app.tab.title())
    };
    let display = if app.buffer().is_empty() && !app.input_mode {
        format!("Press / to type a {} number...", app.tab.noun())
    } else if app.input_mode {
        format!("{}\u{2588}", app.buffer())
    } else {
        app.buffer().to_string()
    };
    let input = Paragraph::new(display).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, area);
}

fn draw_surface(f: &mut ratatui::Frame, area: Rect, app: &AppState) {
    match &app.surface {
        Surface::Idle => {
            let hint = Paragraph::new(format!(
                "Search for a LEGO {} by its number.",
                app.tab.noun()
            ))
            .style(Style::default().fg(to_color(flexoki::BASE_500)))
            .block(Block::default().borders(Borders::ALL).title("Results"));
            f.render_widget(hint, area);
        }
        Surface::Loading { kind, term } => {
            let spinner = Throbber::default()
                .style(Style::default().fg(to_color(flexoki::CYAN_400)))
                .throbber_style(Style::default().fg(to_color(flexoki::CYAN_400)));
            let mut line = Line::default();
            line.spans.push(spinner.to_symbol_span(&app.throbber));
            line.spans
                .push(Span::raw(format!("Searching for {kind} \"{term}\"...")));
            let loading = Paragraph::new(line)
                .block(Block::default().borders(Borders::ALL).title("Results"));
            f.render_widget(loading, area);
        }
        Surface::Result(hit) => {
            let (title, lines) = match hit {
                SearchHit::Part(part) => ("Part", part_card(part)),
                SearchHit::Element(element) => ("Element", element_card(element)),
            };
            let card = Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(title)
                        .border_style(Style::default().fg(to_color(flexoki::GREEN_400))),
                );
            f.render_widget(card, area);
        }
        Surface::NoResults { kind, term } => {
            let none = Paragraph::new(no_results_lines(*kind, term))
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title("Results"));
            f.render_widget(none, area);
        }
        Surface::Error(message) => {
            let error = Paragraph::new(message.clone())
                .style(Style::default().fg(to_color(flexoki::RED_400)))
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title("Error"));
            f.render_widget(error, area);
        }
    }
}

fn draw_footer(f: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let instructions = if app.input_mode {
        "Type a term | Enter: Search | Tab: Switch tab | ESC: Stop typing"
    } else {
        "/: Type | Enter: Search | Tab/←/→/1/2: Switch tab | q: Quit"
    };
    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(to_color(flexoki::BASE_300)))
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    f.render_widget(footer, area);
}
