use std::borrow::Cow;

use super::state::{AppState, View};
use super::usmap;
use crate::charts::fmt;
use crate::charts::spec::{ChoroplethSpec, GroupedBarSpec, Mark, RankedSpec};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

/// Terminal approximation of the map's orange-red ramp, index = intensity
/// bucket (0 = no grants).
const MAP_RAMP: [Color; 5] = [
    Color::DarkGray,
    Color::Yellow,
    Color::LightRed,
    Color::Red,
    Color::LightMagenta,
];

const STATE_BAR_COLOR: Color = Color::Red;
const COUNT_COLOR: Color = Color::Red;
const BUDGET_COLOR: Color = Color::Green;
/// Category colors for the grouped comparisons: first category warm,
/// second cool, matching the source palette's orange/blue pairing.
const GROUP_COLORS: [Color; 2] = [Color::Yellow, Color::Blue];

pub fn draw(f: &mut Frame, state: &AppState) {
    let inner_width = f.area().width.saturating_sub(2) as usize;
    let needs_wrap = header_metrics_text(state).chars().count() > inner_width;
    let header_height = if needs_wrap { 4 } else { 3 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, state, chunks[0], needs_wrap);
    draw_tabs(f, state, chunks[1]);
    match state.view {
        View::Geography => draw_geography(f, state, chunks[2]),
        View::Institutions => draw_institutions(f, state, chunks[2]),
        View::Correlations => draw_correlations(f, state, chunks[2]),
        View::About => draw_about(f, state, chunks[2]),
    }
    draw_footer(f, chunks[3]);
}

/// Plain-text rendering of the headline metrics, used for width checks.
fn header_metrics_text(state: &AppState) -> String {
    let m = &state.metrics;
    format!(
        " Grants: {} | Budget Lost: {} | States: {} | Institutions: {} | Reinstated: {} ({}) | Loaded {}",
        fmt::thousands(m.total_grants as u64),
        fmt::dollars_compact(m.total_budget_cents),
        m.states_affected,
        m.institutions_affected,
        fmt::thousands(m.reinstated_count as u64),
        fmt::percent(m.reinstated_pct()),
        state.loaded_at,
    )
}

fn draw_header(f: &mut Frame, state: &AppState, area: Rect, needs_wrap: bool) {
    let m = &state.metrics;

    let totals: Vec<Span> = vec![
        Span::raw(" Grants: "),
        Span::styled(
            fmt::thousands(m.total_grants as u64),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | Budget Lost: "),
        Span::styled(
            fmt::dollars_compact(m.total_budget_cents),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" | States: {}", m.states_affected)),
        Span::raw(format!(" | Institutions: {}", m.institutions_affected)),
    ];

    let reinstated: Vec<Span> = vec![
        Span::raw(" | Reinstated: "),
        Span::styled(
            format!(
                "{} ({})",
                fmt::thousands(m.reinstated_count as u64),
                fmt::percent(m.reinstated_pct()),
            ),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!(" | Loaded {}", state.loaded_at),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let lines = if needs_wrap {
        vec![
            Line::from(totals),
            // drop the leading " | " when the tail starts its own line
            Line::from(
                reinstated
                    .into_iter()
                    .enumerate()
                    .map(|(i, s)| if i == 0 { Span::raw(" Reinstated: ") } else { s })
                    .collect::<Vec<_>>(),
            ),
        ]
    } else {
        vec![Line::from([totals, reinstated].concat())]
    };

    let block = Block::default()
        .title(format!(" grantboard [{}] ", state.source))
        .borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_tabs(f: &mut Frame, state: &AppState, area: Rect) {
    let titles: Vec<String> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{} {}", i + 1, v.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.view.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let hints = Paragraph::new(Line::from(Span::styled(
        " 1-4 views | Tab/\u{2190}\u{2192} switch | \u{2191}\u{2193} scroll | q quit",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(hints, area);
}

// --- Geography -----------------------------------------------------------

fn draw_geography(f: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(area);

    draw_map(f, &state.map, chunks[0]);
    draw_ranked(f, &state.top_states, chunks[1], STATE_BAR_COLOR, 0);
}

fn draw_map(f: &mut Frame, spec: &ChoroplethSpec, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", spec.title))
        .borders(Borders::ALL);
    let inner_width = area.width.saturating_sub(2);

    // Each tile is 3 chars plus a 1-char gap.
    if inner_width < usmap::GRID_COLS * 4 {
        let para = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Terminal too narrow for the map",
                Style::default().fg(Color::Yellow),
            )),
            Line::from(Span::styled(
                "widen the window or see Top States",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(para, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for row in 0..usmap::GRID_ROWS {
        let mut spans: Vec<Span> = vec![Span::raw(" ")];
        for col in 0..usmap::GRID_COLS {
            let code = usmap::TILE_GRID
                .iter()
                .find(|&&(_, r, c)| r == row && c == col)
                .map(|&(code, _, _)| code);
            match code {
                None => spans.push(Span::raw("    ")),
                Some(code) => match spec.tile(code) {
                    Some(tile) => {
                        let bucket = (tile.intensity as usize).min(MAP_RAMP.len() - 1);
                        spans.push(Span::styled(
                            format!(" {code}"),
                            Style::default()
                                .fg(Color::Black)
                                .bg(MAP_RAMP[bucket])
                                .add_modifier(Modifier::BOLD),
                        ));
                        spans.push(Span::raw(" "));
                    }
                    None => {
                        // state exists, zero grants in the data
                        spans.push(Span::styled(
                            format!(" {code}"),
                            Style::default().fg(Color::DarkGray),
                        ));
                        spans.push(Span::raw(" "));
                    }
                },
            }
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let mut legend: Vec<Span> = vec![Span::raw(" low ")];
    for color in &MAP_RAMP[1..] {
        legend.push(Span::styled("\u{25a0} ", Style::default().fg(*color)));
    }
    legend.push(Span::raw("high  "));
    legend.push(Span::styled(
        spec.legend.clone(),
        Style::default().fg(Color::DarkGray),
    ));
    lines.push(Line::from(legend));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

// --- Ranked charts -------------------------------------------------------

/// Clip a label to `width` characters.
fn clip(text: &str, width: usize) -> Cow<'_, str> {
    if text.chars().count() <= width {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().take(width).collect())
    }
}

/// Draw a ranked bar/lollipop chart: one line per datum, label column on
/// the left, scaled mark, printed value on the right.
fn draw_ranked(f: &mut Frame, spec: &RankedSpec, area: Rect, color: Color, scroll: usize) {
    let block = Block::default()
        .title(format!(" {} ", spec.title))
        .borders(Borders::ALL);
    let inner_width = area.width.saturating_sub(2) as usize;

    let value_w = spec
        .data
        .iter()
        .map(|d| d.formatted.chars().count())
        .max()
        .unwrap_or(0);
    let natural_label_w = spec
        .data
        .iter()
        .map(|d| d.label.chars().count())
        .max()
        .unwrap_or(0);
    // Leave at least a third of the row for the marks.
    let label_w = natural_label_w.min(inner_width.saturating_sub(value_w + 4) * 2 / 3);
    let mark_area = inner_width.saturating_sub(label_w + value_w + 4).max(1);

    let mut lines: Vec<Line> = Vec::new();
    for datum in spec.data.iter().skip(scroll) {
        let frac = if spec.max_value > 0.0 {
            (datum.value / spec.max_value).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mut len = (frac * mark_area as f64).round() as usize;
        if datum.value > 0.0 {
            len = len.max(1);
        }
        let mark = match spec.mark {
            Mark::Bar => "\u{2588}".repeat(len),
            Mark::Lollipop => {
                if len > 1 {
                    format!("{}\u{25cf}", "\u{2500}".repeat(len - 1))
                } else if len == 1 {
                    "\u{25cf}".to_string()
                } else {
                    String::new()
                }
            }
        };
        lines.push(Line::from(vec![
            Span::raw(format!(" {:<label_w$} ", clip(&datum.label, label_w))),
            Span::styled(mark, Style::default().fg(color)),
            Span::raw(" "),
            Span::styled(
                datum.formatted.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            " no data",
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(Span::styled(
        format!(" {}", spec.value_axis),
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

// --- Institutions --------------------------------------------------------

fn draw_institutions(f: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_ranked(
        f,
        &state.institutions_by_count,
        chunks[0],
        COUNT_COLOR,
        state.scroll_offset,
    );
    draw_ranked(
        f,
        &state.institutions_by_budget,
        chunks[1],
        BUDGET_COLOR,
        state.scroll_offset,
    );
}

// --- Correlations --------------------------------------------------------

fn draw_correlations(f: &mut Frame, state: &AppState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);

    draw_grouped(f, &state.flagged_by_count, left[0]);
    draw_grouped(f, &state.flagged_by_budget, left[1]);
    draw_grouped(f, &state.reinstatement, columns[1]);
}

/// Draw a small grouped comparison: category line, then a scaled bar with
/// the printed value (and group size where the chart is rate-based).
fn draw_grouped(f: &mut Frame, spec: &GroupedBarSpec, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", spec.title))
        .borders(Borders::ALL);
    let inner_width = area.width.saturating_sub(2) as usize;

    let value_w = spec
        .data
        .iter()
        .map(|d| d.formatted.chars().count())
        .max()
        .unwrap_or(0);
    let bar_area = inner_width.saturating_sub(value_w + 12).max(1);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(subtitle) = &spec.subtitle {
        lines.push(Line::from(Span::styled(
            format!(" {subtitle}"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (i, datum) in spec.data.iter().enumerate() {
        let color = GROUP_COLORS[i % GROUP_COLORS.len()];
        lines.push(Line::from(Span::styled(
            format!(" {}", datum.category),
            Style::default().fg(color),
        )));

        let frac = if spec.max_value > 0.0 {
            (datum.value / spec.max_value).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mut len = (frac * bar_area as f64).round() as usize;
        if datum.value > 0.0 {
            len = len.max(1);
        }

        let mut bar_spans: Vec<Span> = vec![
            Span::raw(" "),
            Span::styled("\u{2587}".repeat(len), Style::default().fg(color)),
            Span::raw(" "),
            Span::styled(
                datum.formatted.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(n) = datum.n {
            bar_spans.push(Span::styled(
                format!(" (n={n})"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(bar_spans));
    }

    lines.push(Line::from(Span::styled(
        format!(" {}", spec.value_axis),
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

// --- About ---------------------------------------------------------------

fn draw_about(f: &mut Frame, state: &AppState, area: Rect) {
    let lines: Vec<Line> = state
        .about
        .iter()
        .map(|text| {
            // section headers are the unindented non-empty lines
            if !text.is_empty() && !text.starts_with(' ') {
                Line::from(Span::styled(
                    format!(" {text}"),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!(" {text}"))
            }
        })
        .collect();

    let block = Block::default()
        .title(" About This Project ")
        .borders(Borders::ALL);
    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll_offset as u16, 0))
        .block(block);
    f.render_widget(para, area);
}
