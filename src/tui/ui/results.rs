//! Diagnosis results table.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::domain::{ConfidenceTier, DiagnosisResult, Outcome, ResultList};
use crate::tui::i18n::Labels;
use crate::tui::styles::PlantTheme;

/// Format an optional percentage the way the table shows it.
fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}%"))
}

fn tier_label(tier: ConfidenceTier, labels: &Labels) -> &'static str {
    match tier {
        ConfidenceTier::High => labels.tier_high,
        ConfidenceTier::Medium => labels.tier_medium,
        ConfidenceTier::Low => labels.tier_low,
    }
}

/// Text of each column for one result row.
pub fn row_cells(result: &DiagnosisResult, labels: &Labels) -> [String; 7] {
    let name = match result.outcome() {
        Outcome::Healthy => labels.healthy.to_string(),
        Outcome::NoMatch => labels.no_match.to_string(),
        Outcome::Diagnosed => result.display_name(),
    };

    [
        name,
        percent(result.final_trust_score()),
        percent(result.ml_confidence()),
        percent(result.rule_confidence()),
        tier_label(result.tier(), labels).to_string(),
        result.treatment().to_string(),
        result.prevention().to_string(),
    ]
}

pub fn render_results(f: &mut Frame, area: Rect, results: &ResultList, labels: &Labels) {
    let (table_area, warning_area) = if results.is_degraded() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let header = Row::new(
        [
            labels.disease,
            labels.final_trust,
            labels.ml_confidence,
            labels.rule_confidence,
            labels.tier,
            labels.treatment,
            labels.prevention,
        ]
        .into_iter()
        .map(|h| Cell::from(Span::styled(h, PlantTheme::subtitle()))),
    );

    let rows: Vec<Row> = results
        .iter()
        .map(|r| Row::new(row_cells(r, labels).map(Cell::from)).style(PlantTheme::tier(r.tier())))
        .collect();

    let widths = [
        Constraint::Length(28),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Percentage(50),
        Constraint::Percentage(50),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(Span::styled(format!(" {} ", labels.results), PlantTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(PlantTheme::border()),
    );

    f.render_widget(table, table_area);

    if let Some(area) = warning_area {
        let sources = results
            .degraded_sources()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let warning = Paragraph::new(Line::from(Span::styled(
            format!(" ! {} ({sources})", labels.degraded),
            PlantTheme::warning(),
        )));
        f.render_widget(warning, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CareAdvice;
    use crate::tui::i18n::Language;

    #[test]
    fn test_diagnosed_row_cells() {
        let result = DiagnosisResult::diagnosed(
            "tomato-mosaic-virus",
            10.0,
            0.0,
            6.0,
            CareAdvice::new("Remove plants.", "Sanitize tools."),
        );
        let cells = row_cells(&result, Language::English.labels());
        assert_eq!(cells[0], "Tomato Mosaic Virus");
        assert_eq!(cells[1], "6.0%");
        assert_eq!(cells[2], "10.0%");
        assert_eq!(cells[3], "0.0%");
        assert_eq!(cells[4], "low");
        assert_eq!(cells[5], "Remove plants.");
    }

    #[test]
    fn test_no_match_row_shows_dashes() {
        let result = DiagnosisResult::no_match(CareAdvice::new("Monitor closely.", "Re-check symptoms."));
        let cells = row_cells(&result, Language::Spanish.labels());
        assert_eq!(cells[0], "No se encontró ninguna enfermedad coincidente");
        assert_eq!(cells[1], "-");
        assert_eq!(cells[2], "-");
        assert_eq!(cells[4], "bajo");
    }

    #[test]
    fn test_healthy_row() {
        let cells = row_cells(&DiagnosisResult::healthy(CareAdvice::placeholder()), Language::English.labels());
        assert_eq!(cells[0], "Healthy");
        assert_eq!(cells[1], "100.0%");
        assert_eq!(cells[4], "high");
    }
}
