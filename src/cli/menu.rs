//! Selection menu (TUI popup)
//!
//! Displays a visual popup menu: a fixed header, a scrollable list mixing
//! static context lines with selectable options, and a key-hint footer.
//! `open()` blocks until the user picks an option or cancels.

use ratatui::{
    crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::io;

/// One entry in the menu.
#[derive(Debug, Clone)]
enum MenuItem {
    /// Non-selectable context line
    Static(String),
    /// Non-selectable blank line
    LineBreak,
    /// Selectable option; `open()` returns its key
    Choice { key: String, label: String },
}

/// A blocking popup menu.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    title: Option<String>,
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title shown in the header block.
    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Append a non-selectable text line.
    pub fn add_static(&mut self, line: impl Into<String>) -> &mut Self {
        self.items.push(MenuItem::Static(line.into()));
        self
    }

    /// Append a non-selectable blank line.
    pub fn add_line_break(&mut self) -> &mut Self {
        self.items.push(MenuItem::LineBreak);
        self
    }

    /// Append a selectable option.
    pub fn add_option(&mut self, key: impl Into<String>, label: impl Into<String>) -> &mut Self {
        self.items.push(MenuItem::Choice {
            key: key.into(),
            label: label.into(),
        });
        self
    }

    /// Append several selectable options, order-preserving.
    pub fn add_options<I, K, L>(&mut self, options: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: Into<String>,
    {
        for (key, label) in options {
            self.add_option(key, label);
        }
        self
    }

    /// Item indices of the selectable options.
    fn choices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| matches!(item, MenuItem::Choice { .. }))
            .map(|(i, _)| i)
            .collect()
    }

    fn key_at(&self, item_index: usize) -> Option<String> {
        match self.items.get(item_index) {
            Some(MenuItem::Choice { key, .. }) => Some(key.clone()),
            _ => None,
        }
    }

    /// Display the menu and block until the user selects an option key or
    /// cancels (Esc / q). Returns `None` on cancel, and also when the menu
    /// has no selectable options at all.
    pub fn open(&self) -> io::Result<Option<String>> {
        let choices = self.choices();
        if choices.is_empty() {
            return Ok(None);
        }

        // Setup terminal
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnableMouseCapture)?;

        let stdout = io::stdout();
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)?;

        let result = self.run_menu(&mut terminal, &choices);

        // Restore terminal
        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(io::stdout(), DisableMouseCapture)?;

        result
    }

    fn run_menu(
        &self,
        terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
        choices: &[usize],
    ) -> io::Result<Option<String>> {
        let mut cursor = 0usize;
        let mut state = ListState::default();

        loop {
            state.select(Some(choices[cursor]));
            terminal.draw(|f| self.ui(f, &mut state))?;

            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        return Ok(None);
                    }
                    KeyCode::Enter => {
                        return Ok(self.key_at(choices[cursor]));
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        if cursor < choices.len() - 1 {
                            cursor += 1;
                        }
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        if cursor > 0 {
                            cursor -= 1;
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    fn ui(&self, f: &mut Frame, state: &mut ListState) {
        let size = f.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Fixed header height
                Constraint::Min(5),    // Scrollable item list
                Constraint::Length(3), // Fixed help text
            ])
            .split(size);

        // Header block (fixed, doesn't scroll)
        let title = self.title.clone().unwrap_or_else(|| "Model-Forge".to_string());
        let header = Paragraph::new(vec![
            Line::from(format!(" {} ", title))
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Line::from(""),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Center);

        f.render_widget(header, chunks[0]);

        // Item list (scrollable); static lines render dimmed
        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| match item {
                MenuItem::Static(text) => ListItem::new(format!("  {}", text))
                    .style(Style::default().fg(Color::Gray)),
                MenuItem::LineBreak => ListItem::new(""),
                MenuItem::Choice { label, .. } => ListItem::new(format!("  {}", label)),
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(
                Style::default()
                    .add_modifier(Modifier::REVERSED)
                    .fg(Color::Black)
                    .bg(Color::Cyan),
            );

        f.render_stateful_widget(list, chunks[1], state);

        // Help text at bottom (fixed, doesn't scroll)
        let help_text = vec![Line::from(
            " ↑/k: Up  ↓/j: Down  Enter: Select  ESC/q: Cancel ",
        )
        .style(Style::default().fg(Color::Gray))];

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(help, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choices_skip_static_items() {
        let mut menu = Menu::new();
        menu.add_line_break()
            .add_static("Model: (none)")
            .add_option("addModel", "Add model")
            .add_static("Table: (none)")
            .add_option("quit", "Quit");

        let choices = menu.choices();
        assert_eq!(choices.len(), 2);
        assert_eq!(menu.key_at(choices[0]).as_deref(), Some("addModel"));
        assert_eq!(menu.key_at(choices[1]).as_deref(), Some("quit"));
    }

    #[test]
    fn test_open_without_choices_is_cancel() {
        let mut menu = Menu::new();
        menu.add_static("nothing to pick");
        assert!(menu.open().unwrap().is_none());
    }

    #[test]
    fn test_add_options_preserves_order() {
        let mut menu = Menu::new();
        menu.add_options([("a", "A"), ("b", "B"), ("c", "C")]);
        let keys: Vec<String> = menu
            .choices()
            .into_iter()
            .filter_map(|i| menu.key_at(i))
            .collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }
}
