//! Symptom checklist.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::domain::{display_name, SymptomSet, SymptomVocabulary};
use crate::tui::i18n::Labels;
use crate::tui::styles::PlantTheme;

/// Render the vocabulary as a multi-select list with the cursor row highlighted.
pub fn render_symptoms(
    f: &mut Frame,
    area: Rect,
    vocabulary: &SymptomVocabulary,
    selection: &SymptomSet,
    cursor: usize,
    labels: &Labels,
) {
    let items: Vec<ListItem> = vocabulary
        .names()
        .iter()
        .map(|name| {
            let checked = selection.contains(name);
            let (mark, style) = if checked {
                ("[x] ", PlantTheme::checked())
            } else {
                ("[ ] ", PlantTheme::text())
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::styled(display_name(name), style),
            ]))
        })
        .collect();

    let title = format!(
        " {} ({} {}) ",
        labels.select_symptoms,
        selection.len(),
        labels.selected
    );

    let list = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(title, PlantTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(PlantTheme::border_focused()),
        )
        .highlight_style(PlantTheme::cursor());

    let mut state = ListState::default().with_selected(Some(cursor));
    f.render_stateful_widget(list, area, &mut state);
}
