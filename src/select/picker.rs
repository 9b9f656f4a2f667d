//! Key handling and rendering for the searchable picker

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use super::{visible_choices, Theme, Visible};
use crate::resolve::format::{EXEC_DISABLED_MARKER, EXEC_ENABLED_MARKER};

/// Maximum number of rows shown at once.
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerResult {
    Continue,
    Cancel,
    /// Index into the labels the picker was built with.
    Submit(usize),
}

pub struct Picker {
    message: String,
    labels: Vec<String>,
    input: Input,
    visible: Visible,
    cursor: usize,
}

impl Picker {
    pub fn new(message: impl Into<String>, labels: Vec<String>) -> Self {
        let visible = visible_choices(&labels, "");
        Self {
            message: message.into(),
            labels,
            input: Input::default(),
            visible,
            cursor: 0,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn query(&self) -> &str {
        self.input.value()
    }

    /// Indices of the rows currently on offer.
    pub fn visible(&self) -> &[usize] {
        &self.visible.indices
    }

    pub fn is_fallback(&self) -> bool {
        self.visible.fallback
    }

    /// Index of the highlighted choice, if there is anything to highlight.
    pub fn selected(&self) -> Option<usize> {
        self.visible.indices.get(self.cursor).copied()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Rows needed to draw the prompt, the rows and the footer.
    pub fn height(&self) -> u16 {
        (self.labels.len().min(PAGE_SIZE) + 2) as u16
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return PickerResult::Cancel,
            KeyCode::Char('c') if ctrl => return PickerResult::Cancel,
            KeyCode::Enter => {
                return match self.selected() {
                    Some(idx) => PickerResult::Submit(idx),
                    None => PickerResult::Continue,
                };
            }
            KeyCode::Up | KeyCode::BackTab => self.move_up(),
            KeyCode::Char('p') if ctrl => self.move_up(),
            KeyCode::Down | KeyCode::Tab => self.move_down(),
            KeyCode::Char('n') if ctrl => self.move_down(),
            _ => {
                let before = self.input.value().to_string();
                self.input.handle_event(&Event::Key(key));
                if self.input.value() != before {
                    self.refilter();
                }
            }
        }
        PickerResult::Continue
    }

    fn move_up(&mut self) {
        let len = self.visible.indices.len();
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 {
            len - 1
        } else {
            self.cursor - 1
        };
    }

    fn move_down(&mut self) {
        let len = self.visible.indices.len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    fn refilter(&mut self) {
        self.visible = visible_choices(&self.labels, self.input.value());
        self.cursor = 0;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let prompt_prefix = Line::from(vec![
            Span::styled("? ", Style::default().fg(theme.accent).bold()),
            Span::styled(self.message.clone(), Style::default().bold()),
            Span::raw(" "),
        ]);
        let prefix_width = prompt_prefix.width() as u16;

        let mut prompt = prompt_prefix;
        prompt.push_span(Span::styled(
            self.input.value().to_string(),
            Style::default().fg(theme.text),
        ));

        let mut lines = vec![prompt];

        let start = if self.cursor >= PAGE_SIZE {
            self.cursor + 1 - PAGE_SIZE
        } else {
            0
        };
        for (row, &idx) in self
            .visible
            .indices
            .iter()
            .enumerate()
            .skip(start)
            .take(PAGE_SIZE)
        {
            let is_selected = row == self.cursor;
            lines.push(self.render_row(&self.labels[idx], is_selected, theme));
        }

        let footer = if self.visible.fallback {
            Line::from(Span::styled(
                format!(
                    "No matches for \"{}\", showing all choices",
                    self.input.value()
                ),
                Style::default().fg(theme.hint).italic(),
            ))
        } else {
            Line::from(Span::styled(
                "↑↓ navigate • type to filter • enter to select",
                Style::default().fg(theme.dimmed),
            ))
        };
        lines.push(footer);

        frame.render_widget(Paragraph::new(lines), area);

        let cursor_x = area.x + prefix_width + self.input.visual_cursor() as u16;
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(1)), area.y));
    }

    fn render_row<'a>(&self, label: &'a str, is_selected: bool, theme: &Theme) -> Line<'a> {
        let (pointer, base) = if is_selected {
            ("❯ ", Style::default().fg(theme.selection).bold())
        } else {
            ("  ", Style::default().fg(theme.text))
        };

        let mut spans = vec![Span::styled(pointer, base)];
        spans.extend(marker_spans(label, base, theme));
        Line::from(spans)
    }
}

/// Splits `label` so the exec markers can be colored on their own.
fn marker_spans<'a>(label: &'a str, base: Style, theme: &Theme) -> Vec<Span<'a>> {
    for (marker, color) in [
        (EXEC_ENABLED_MARKER, theme.enabled),
        (EXEC_DISABLED_MARKER, theme.disabled),
    ] {
        if let Some(pos) = label.find(marker) {
            let end = pos + marker.len();
            return vec![
                Span::styled(&label[..pos], base),
                Span::styled(&label[pos..end], base.fg(color)),
                Span::styled(&label[end..], base),
            ];
        }
    }
    vec![Span::styled(label, base)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(picker: &mut Picker, text: &str) {
        for c in text.chars() {
            assert_eq!(picker.handle_key(key(KeyCode::Char(c))), PickerResult::Continue);
        }
    }

    fn containers() -> Picker {
        Picker::new(
            "Container:",
            vec!["app".to_string(), "envoy".to_string(), "datadog-agent".to_string()],
        )
    }

    #[test]
    fn test_enter_submits_first_row() {
        let mut picker = containers();
        assert_eq!(picker.handle_key(key(KeyCode::Enter)), PickerResult::Submit(0));
    }

    #[test]
    fn test_esc_and_ctrl_c_cancel() {
        let mut picker = containers();
        assert_eq!(picker.handle_key(key(KeyCode::Esc)), PickerResult::Cancel);
        assert_eq!(picker.handle_key(ctrl('c')), PickerResult::Cancel);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut picker = containers();
        picker.handle_key(key(KeyCode::Up));
        assert_eq!(picker.selected(), Some(2));
        picker.handle_key(key(KeyCode::Down));
        assert_eq!(picker.selected(), Some(0));
        picker.handle_key(ctrl('n'));
        picker.handle_key(key(KeyCode::Tab));
        assert_eq!(picker.selected(), Some(2));
        picker.handle_key(ctrl('p'));
        assert_eq!(picker.selected(), Some(1));
    }

    #[test]
    fn test_typing_narrows_to_single_match() {
        let mut picker = containers();
        type_str(&mut picker, "ENV");
        assert_eq!(picker.query(), "ENV");
        assert_eq!(picker.visible(), &[1]);
        assert!(!picker.is_fallback());
        assert_eq!(picker.handle_key(key(KeyCode::Enter)), PickerResult::Submit(1));
    }

    #[test]
    fn test_no_match_shows_everything() {
        let mut picker = containers();
        type_str(&mut picker, "redis");
        assert!(picker.is_fallback());
        assert_eq!(picker.visible(), &[0, 1, 2]);
    }

    #[test]
    fn test_backspace_restores_full_list() {
        let mut picker = containers();
        type_str(&mut picker, "d");
        assert_eq!(picker.visible(), &[2]);
        picker.handle_key(key(KeyCode::Backspace));
        assert_eq!(picker.query(), "");
        assert_eq!(picker.visible(), &[0, 1, 2]);
    }

    #[test]
    fn test_filter_change_resets_cursor() {
        let mut picker = Picker::new(
            "Service:",
            vec!["api-a".to_string(), "api-b".to_string(), "web".to_string()],
        );
        picker.handle_key(key(KeyCode::Down));
        assert_eq!(picker.selected(), Some(1));
        type_str(&mut picker, "api");
        assert_eq!(picker.selected(), Some(0));
    }

    #[test]
    fn test_height_is_capped() {
        let labels: Vec<String> = (0..25).map(|i| format!("task-{}", i)).collect();
        let picker = Picker::new("Task:", labels);
        assert_eq!(picker.height(), (PAGE_SIZE + 2) as u16);
        assert_eq!(containers().height(), 5);
    }

    #[test]
    fn test_marker_spans_split_marker() {
        let theme = Theme::default();
        let label = format!("#1 abc (v3) {} - started Jan 1, 12:00 PM", EXEC_ENABLED_MARKER);
        let spans = marker_spans(&label, Style::default(), &theme);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].content, EXEC_ENABLED_MARKER);
        assert_eq!(spans[1].style.fg, Some(theme.enabled));
    }

    #[test]
    fn test_render_draws_prompt_and_rows() {
        use ratatui::backend::TestBackend;

        let picker = containers();
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(60, picker.height())).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                picker.render(f, area, &theme);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect()
        };
        assert!(row(0).contains("Container:"));
        assert!(row(1).contains("app"));
        assert!(row(3).contains("datadog-agent"));
    }
}
