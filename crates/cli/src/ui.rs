//! Rendering for the terminal viewer.
//!
//! Stateless: everything drawn comes from the [`App`] passed in.

use crate::app::{App, Status};
use deck_core::Slide;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

const ACCENT: Color = Color::Cyan;
const TEXT_SECONDARY: Color = Color::Gray;
const DISABLED: Color = Color::DarkGray;

pub fn render(frame: &mut Frame, app: &App) {
    let [slide_area, controls_area] =
        Layout::horizontal([Constraint::Min(40), Constraint::Length(34)]).areas(frame.area());

    render_slide(frame, slide_area, app);
    render_controls(frame, controls_area, app);
}

fn render_slide(frame: &mut Frame, area: Rect, app: &App) {
    let nav = app.nav();
    let Some(slide) = app.deck().get(nav.current()) else {
        return;
    };

    let block = Block::bordered()
        .title(Line::from(format!(" {} ", slide.kicker())).fg(TEXT_SECONDARY))
        .title(Line::from(format!(" {} ", nav.position_label())).fg(ACCENT).bold().right_aligned());

    let paragraph = Paragraph::new(slide_lines(slide))
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}

/// The slide body as styled lines, in on-screen order.
fn slide_lines(slide: &Slide) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(slide.title.clone()).bold().fg(Color::White)];

    if let Some(subtitle) = &slide.subtitle {
        lines.push(Line::default());
        lines.push(Line::from(subtitle.clone()).fg(TEXT_SECONDARY));
    }

    if !slide.bullets.is_empty() {
        lines.push(Line::default());
        for bullet in &slide.bullets {
            lines.push(Line::from(vec![
                Span::raw("  \u{2022} ").fg(ACCENT),
                Span::raw(bullet.clone()),
            ]));
        }
    }

    if !slide.stats.is_empty() {
        lines.push(Line::default());
        for stat in &slide.stats {
            lines.push(Line::from(vec![
                Span::raw(format!("  {:>10}  ", stat.value)).fg(ACCENT).bold(),
                Span::raw(stat.label.clone()).fg(TEXT_SECONDARY),
            ]));
        }
    }

    if !slide.spotlight.is_empty() {
        lines.push(Line::default());
        for item in &slide.spotlight {
            let mut spans = vec![
                Span::raw(format!("  {}  ", item.label.to_uppercase())).fg(TEXT_SECONDARY),
                Span::raw(item.value.clone()).fg(ACCENT).bold(),
            ];
            if let Some(description) = &item.description {
                spans.push(Span::raw(format!("  {}", description)).fg(TEXT_SECONDARY));
            }
            lines.push(Line::from(spans));
        }
    }

    if let Some(quote) = &slide.quote {
        lines.push(Line::default());
        lines.push(Line::from(format!("  {}", quote.quoted_text())).italic());
        lines.push(Line::from(format!("    {}", quote.attribution())).fg(ACCENT));
    }

    if let Some(footer) = &slide.footer {
        lines.push(Line::default());
        lines.push(Line::from(footer.clone()).fg(TEXT_SECONDARY));
    }

    lines
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let [buttons_area, timeline_area, export_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(4),
    ])
    .areas(area);

    let nav = app.nav();
    let button = |label: &'static str, enabled: bool| {
        let style = if enabled {
            Style::new().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(DISABLED)
        };
        Span::styled(label, style)
    };
    let buttons = Line::from(vec![
        button("[ \u{25C0} Prev ]", nav.can_previous()),
        Span::raw("  "),
        button("[ Next \u{25B6} ]", nav.can_next()),
    ])
    .centered();
    frame.render_widget(Paragraph::new(buttons).block(Block::bordered()), buttons_area);

    let timeline = nav.timeline(app.deck());
    let items: Vec<ListItem> = timeline
        .iter()
        .map(|entry| ListItem::new(entry.label.clone()))
        .collect();
    let list = List::new(items)
        .block(Block::bordered().title(" Slides "))
        .fg(TEXT_SECONDARY)
        .highlight_style(Style::new().fg(ACCENT).add_modifier(Modifier::BOLD))
        .highlight_symbol("\u{25B6} ");
    let mut state = ListState::default().with_selected(timeline.iter().position(|e| e.active));
    frame.render_stateful_widget(list, timeline_area, &mut state);

    let status = match app.status() {
        Some(Status::Saved(path)) => Line::from(format!("Saved {}", path.display())).fg(Color::Green),
        Some(Status::Failed(reason)) => Line::from(format!("Export failed: {}", reason)).fg(Color::Red),
        None => Line::from("\u{2190}/\u{2192} navigate, q quit").fg(DISABLED),
    };
    let export = Paragraph::new(vec![Line::from("[e] Download PPT").fg(ACCENT).bold(), status])
        .wrap(Wrap { trim: true })
        .block(Block::bordered());
    frame.render_widget(export, export_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Action;
    use deck_core::catalog;
    use deck_pptx::FileSink;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn rows(app: &App) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn has(rows: &[String], needle: &str) -> bool {
        rows.iter().any(|r| r.contains(needle))
    }

    #[test]
    fn test_renders_first_slide() {
        let deck = catalog::department_overview().unwrap();
        let app = App::new(&deck, FileSink::new("."));
        let rows = rows(&app);

        assert!(has(&rows, " COVER "));
        assert!(has(&rows, "F STSC Department"));
        assert!(has(&rows, " 1 / 10 "));
        assert!(has(&rows, "Future Science, Technology & Societal Change"));
        assert!(has(&rows, "Academic Year 2024-2025"));
        assert!(has(&rows, "[e] Download PPT"));
    }

    #[test]
    fn test_timeline_highlights_current_slide() {
        let deck = catalog::department_overview().unwrap();
        let mut app = App::new(&deck, FileSink::new("."));
        app.apply(Action::GoTo(2));
        let rows = rows(&app);

        assert!(has(&rows, "\u{25B6} 3. Strategic Pillars"));
        assert!(!has(&rows, "\u{25B6} 1. F STSC Department"));
        assert!(has(&rows, " 3 / 10 "));
        assert!(has(&rows, "ACADEMICS"));
    }

    #[test]
    fn test_renders_stats_and_quote() {
        let deck = catalog::department_overview().unwrap();
        let mut app = App::new(&deck, FileSink::new("."));

        app.apply(Action::GoTo(4));
        let rows_research = rows(&app);
        assert!(has(&rows_research, "$68M"));
        assert!(has(&rows_research, "External grants (FY24)"));

        app.apply(Action::Last);
        let rows_cta = rows(&app);
        assert!(has(&rows_cta, "Dr. Amina Rios \u{2014} Dean, F STSC Department"));
    }

    #[test]
    fn test_slide_lines_skip_absent_fields() {
        let lines = slide_lines(&Slide::new("bare", "Only a title"));
        assert_eq!(lines.len(), 1);
    }
}
