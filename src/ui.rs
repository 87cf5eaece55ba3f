use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    session::{Phase, Session, SlotState, ROW_LEN},
    typing_policy::{Outcome, SlotFeedback},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const SLOT_PADDING: usize = 2;

const LEGEND: [&str; 4] = [
    "(tab) new words",
    "(ctrl+l) language",
    "(ctrl+d) difficulty",
    "(esc)ape",
];

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let config = session.config();

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // settings
                Constraint::Length(2), // countdown
                Constraint::Min(0),
                Constraint::Length(1), // first row
                Constraint::Length(1), // second row
                Constraint::Length(1),
                Constraint::Length(1), // input or results
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            format!("{} · {}", config.language, config.difficulty),
            Style::default().fg(Color::Cyan).patch(bold_style),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(Span::styled(
            session.countdown().remaining_secs().to_string(),
            dim_bold_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        let width = slot_width(session);
        Paragraph::new(first_row_line(session, width))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
        Paragraph::new(Line::from(
            session
                .second_row()
                .iter()
                .map(|word| Span::styled(pad_center(word, width), dim_bold_style))
                .collect::<Vec<_>>(),
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

        match (session.phase(), session.results()) {
            (Phase::Finished, Some(results)) => {
                Paragraph::new(Span::styled(
                    format!(
                        "{} words   {:.0} wpm   {}% acc",
                        results.correct_words, results.wpm, results.accuracy
                    ),
                    Style::default().fg(Color::Green).patch(bold_style),
                ))
                .alignment(Alignment::Center)
                .render(chunks[6], buf);
            }
            _ => {
                let input = Line::from(vec![
                    Span::styled("> ", dim_bold_style),
                    Span::styled(session.input().to_string(), bold_style),
                    Span::styled(
                        " ",
                        Style::default().add_modifier(Modifier::UNDERLINED),
                    ),
                ]);
                Paragraph::new(input)
                    .alignment(Alignment::Center)
                    .render(chunks[6], buf);
            }
        }

        Paragraph::new(Span::styled(LEGEND.iter().join(" / "), italic_style))
            .render(chunks[8], buf);
    }
}

fn first_row_line(session: &Session, width: usize) -> Line<'static> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    Line::from(
        session
            .first_row()
            .iter()
            .take(ROW_LEN)
            .enumerate()
            .map(|(slot, word)| {
                let style = match session.slot_state(slot) {
                    SlotState::Done(Outcome::Correct) => bold_style.fg(Color::Green),
                    SlotState::Done(Outcome::Incorrect) => bold_style.fg(Color::Red),
                    SlotState::Active(SlotFeedback::Partial) => {
                        bold_style.bg(Color::DarkGray).fg(Color::White)
                    }
                    SlotState::Active(SlotFeedback::Mismatch) => {
                        bold_style.bg(Color::Red).fg(Color::White)
                    }
                    SlotState::Pending => bold_style,
                };
                Span::styled(pad_center(word, width), style)
            })
            .collect::<Vec<_>>(),
    )
}

/// Every slot gets the width of the widest word on screen so the rows line up.
fn slot_width(session: &Session) -> usize {
    session
        .first_row()
        .iter()
        .chain(session.second_row())
        .map(|word| word.width())
        .max()
        .unwrap_or(0)
        + SLOT_PADDING
}

fn pad_center(word: &str, width: usize) -> String {
    let free = width.saturating_sub(word.width());
    let left = free / 2;
    format!("{}{}{}", " ".repeat(left), word, " ".repeat(free - left))
}
