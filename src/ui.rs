use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::round::GameObserver;

const HORIZONTAL_MARGIN: u16 = 5;

/// Transient feedback from the last session event, with its display color.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Correct,
    Incorrect,
    TimedOut(String),
    EmptyGuess,
    Error(String),
}

impl Feedback {
    pub fn text(&self) -> String {
        match self {
            Feedback::Correct => "correct! well done".to_string(),
            Feedback::Incorrect => "wrong! try again".to_string(),
            Feedback::TimedOut(word) => format!("time's up! the word was \"{word}\""),
            Feedback::EmptyGuess => "please enter a word".to_string(),
            Feedback::Error(msg) => msg.clone(),
        }
    }

    fn color(&self) -> Color {
        match self {
            Feedback::Correct => Color::Green,
            Feedback::Incorrect | Feedback::Error(_) => Color::Red,
            Feedback::TimedOut(_) | Feedback::EmptyGuess => Color::Yellow,
        }
    }
}

/// Thin presentation adapter: subscribes to session callbacks and keeps
/// only what the screen shows. No game logic lives here.
#[derive(Debug, Default)]
pub struct Hud {
    pub scrambled: String,
    pub feedback: Option<Feedback>,
}

impl GameObserver for Hud {
    fn on_round_start(&mut self, scrambled: &[char]) {
        self.scrambled = scrambled.iter().collect();
    }

    fn on_timeout(&mut self, correct_word: &str) {
        self.feedback = Some(Feedback::TimedOut(correct_word.to_string()));
    }

    fn on_correct(&mut self, _new_score: u32) {
        self.feedback = Some(Feedback::Correct);
    }

    fn on_incorrect(&mut self) {
        self.feedback = Some(Feedback::Incorrect);
    }

    fn on_error(&mut self, message: &str) {
        self.feedback = Some(Feedback::Error(message.to_string()));
    }
}

/// One frame of the game, as plain data. Built fresh on every draw so the
/// widget borrows and never owns.
pub struct GameScreen<'a> {
    pub hud: &'a Hud,
    pub input: &'a str,
    pub time_left: u32,
    pub score: u32,
    pub difficulty: String,
    pub paused: bool,
    pub failed: bool,
    pub hint: Option<&'a str>,
    pub category: Option<&'a str>,
}

impl Widget for GameScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let dim_bold_style = Style::default().patch(bold_style).add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        if self.paused {
            let paused_message = Paragraph::new(Span::styled(
                "PAUSED - press ctrl-p to resume",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::ITALIC),
            ))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

            paused_message.render(area, buf);
            return;
        }

        if self.failed {
            let text = self
                .hud
                .feedback
                .as_ref()
                .map(|f| f.text())
                .unwrap_or_else(|| "could not load any words".to_string());
            let error_message = Paragraph::new(Span::styled(
                text,
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

            error_message.render(area, buf);
            return;
        }

        // Letters spaced out so the puzzle reads as tiles, not a word.
        let puzzle: String = self
            .hud
            .scrambled
            .chars()
            .map(|c| c.to_ascii_uppercase().to_string())
            .collect::<Vec<String>>()
            .join(" ");

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let puzzle_lines = ((puzzle.width() as f64 / max_chars_per_line as f64).ceil() as u16).max(1);

        let top_pad = (area.height.saturating_sub(puzzle_lines + 7)) / 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(top_pad),
                    Constraint::Length(puzzle_lines), // scrambled letters
                    Constraint::Length(1),            // timer
                    Constraint::Length(1),            // guess input
                    Constraint::Length(1),            // feedback
                    Constraint::Length(1),            // hint / category
                    Constraint::Length(1),            // score line
                    Constraint::Min(1),               // padding
                    Constraint::Length(1),            // key legend
                ]
                .as_ref(),
            )
            .split(area);

        let puzzle_widget = Paragraph::new(Span::styled(puzzle, bold_style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        puzzle_widget.render(chunks[1], buf);

        let timer_color = if self.time_left <= 10 {
            Color::Red
        } else {
            Color::Reset
        };
        let timer = Paragraph::new(Span::styled(
            format!("{}s", self.time_left),
            Style::default().fg(timer_color).patch(dim_bold_style),
        ))
        .alignment(Alignment::Center);
        timer.render(chunks[2], buf);

        let input_line = Line::from(vec![
            Span::styled("> ", dim_style),
            Span::styled(self.input.to_string(), bold_style),
            Span::styled("_", dim_style),
        ]);
        Paragraph::new(input_line)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        if let Some(feedback) = &self.hud.feedback {
            let msg = Paragraph::new(Span::styled(
                feedback.text(),
                Style::default().fg(feedback.color()).patch(italic_style),
            ))
            .alignment(Alignment::Center);
            msg.render(chunks[4], buf);
        }

        let aside = match (self.hint, self.category) {
            (Some(hint), _) => Some(format!("hint: {hint}")),
            (None, Some(category)) => Some(format!("category: {category}")),
            (None, None) => None,
        };
        if let Some(aside) = aside {
            Paragraph::new(Span::styled(aside, Style::default().fg(Color::Cyan).patch(italic_style)))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(chunks[5], buf);
        }

        let status = Paragraph::new(Span::styled(
            format!("score {}   difficulty {}", self.score, self.difficulty),
            dim_style,
        ))
        .alignment(Alignment::Center);
        status.render(chunks[6], buf);

        let legend = Paragraph::new(Span::styled(
            "enter submit  ctrl-n new word  ctrl-p pause  ctrl-d difficulty  ctrl-h hint  esc quit",
            dim_style,
        ))
        .alignment(Alignment::Center);
        legend.render(chunks[8], buf);
    }
}
