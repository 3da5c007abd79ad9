//! UI module: View components for the TUI.

pub mod results;
pub mod symptoms;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::i18n::{Labels, Language};
use crate::tui::styles::PlantTheme;

pub fn render_header(f: &mut Frame, area: Rect, language: Language) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", PlantTheme::header()),
        Span::styled(language.labels().title, PlantTheme::header()),
        Span::styled(format!("  [{}]", language.code()), PlantTheme::header()),
    ]))
    .style(PlantTheme::header());

    f.render_widget(header, area);
}

pub fn render_key_hints(f: &mut Frame, area: Rect, labels: &Labels) {
    let hints = [
        ("↑/↓", labels.move_cursor),
        ("Space", labels.toggle),
        ("Enter", labels.diagnose),
        ("R", labels.reset),
        ("L", labels.language),
        ("Q", labels.exit),
    ];

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, desc) in hints {
        spans.push(Span::styled(format!("[{key}] "), PlantTheme::key_hint()));
        spans.push(Span::styled(format!("{desc}  "), PlantTheme::key_desc()));
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(PlantTheme::border()),
    );

    f.render_widget(footer, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect, labels: &Labels) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(PlantTheme::border());

    let p = Paragraph::new(Line::from(Span::styled(
        labels.disclaimer,
        PlantTheme::text_muted(),
    )))
    .block(block)
    .wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
