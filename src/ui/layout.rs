use {
    crate::{
        market_core::{DateRange, QueryTable, RangeInput},
        pages::{CryptoView, Page, SnapshotView},
        state::{DashboardState, DateField, InputMode, StatusLevel},
        ui::renderer::{
            axis_bounds, date_x, format_price, long_series_points, metric_label, price_points, series_color,
        },
    },
    chrono::NaiveDate,
    ratatui::{
        layout::{Constraint, Direction, Layout as RatLayout, Rect},
        style::{Color, Modifier, Style},
        symbols,
        text::{Line, Span},
        widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, List, ListItem, ListState, Paragraph, Row, Table, Tabs},
        Frame,
    },
};

/// Render the full dashboard: page tabs, current page, status footer
pub fn render_layout(f: &mut Frame, state: &DashboardState<'_>) {
    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Page
            Constraint::Length(3), // Footer/Status
        ])
        .split(f.area());

    render_header(f, chunks[0], state.page());

    match state.page() {
        Page::Home => render_home(f, chunks[1], state),
        Page::MarketSnapshot => render_snapshot(f, chunks[1], state),
        Page::SqlAnalytics => render_analytics(f, chunks[1], state),
        Page::CryptoAnalysis => render_crypto(f, chunks[1], state),
    }

    render_footer(f, chunks[2], state);
}

fn render_header(f: &mut Frame, area: Rect, page: Page) {
    let titles: Vec<Line> = Page::all()
        .iter()
        .enumerate()
        .map(|(i, p)| Line::from(format!("{}:{}", i + 1, p.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(page.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("🚀 Cross Market Intelligence Dashboard"),
        );

    f.render_widget(tabs, area);
}

fn render_home(f: &mut Frame, area: Rect, state: &DashboardState<'_>) {
    let catalog = state.catalog();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let text = vec![
        Line::from(Span::styled("Project Overview", bold.fg(Color::Cyan))),
        Line::from(""),
        Line::from("This dashboard integrates:"),
        Line::from(format!("  - Cryptocurrency Data ({} coins)", catalog.crypto.len())),
        Line::from("  - Oil Market Data"),
        Line::from(format!("  - Stock Market Data ({} tickers)", catalog.equity.len())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Database: ", bold),
            Span::raw(state.store().path().display().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Snapshot backbone: ", bold),
            Span::raw(state.primary().to_string()),
        ]),
        Line::from(""),
        Line::from("Keys: 1-4/Tab switch page | s/e edit start/end date | Enter apply | Esc cancel"),
        Line::from("      ←/→ change coin | ↑/↓ pick query | q quit"),
    ];

    f.render_widget(
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Home")),
        area,
    );
}

fn render_snapshot(f: &mut Frame, area: Rect, state: &DashboardState<'_>) {
    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Range
            Constraint::Length(3),  // Metrics
            Constraint::Min(8),     // Chart
            Constraint::Length(10), // Raw table
        ])
        .split(area);

    let view = state.snapshot();
    let resolved = match view {
        Some(SnapshotView::Ready(snapshot)) => Some(snapshot.range),
        Some(SnapshotView::NoData { range, .. }) => *range,
        None => None,
    };
    render_range(f, chunks[0], state, resolved, "📈 Cross Market Snapshot");

    let Some(SnapshotView::Ready(snapshot)) = view else {
        render_empty(f, chunks[1].union(chunks[3]), "No data available for selected dates.");
        return;
    };

    // Metrics
    let metric_areas = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints(
            snapshot
                .series_names
                .iter()
                .map(|_| Constraint::Ratio(1, snapshot.series_names.len() as u32)),
        )
        .split(chunks[1]);

    for (i, name) in snapshot.series_names.iter().enumerate() {
        let mean = snapshot.means.get(name).copied().unwrap_or(0.0);
        let metric = Paragraph::new(Line::from(Span::styled(
            format_price(mean),
            Style::default().fg(series_color(i)).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title(metric_label(name)));
        f.render_widget(metric, metric_areas[i]);
    }

    // Chart, one line per series from the long-form rows
    let series_data: Vec<(String, Vec<(f64, f64)>)> = snapshot
        .series_names
        .iter()
        .map(|name| (name.clone(), long_series_points(&snapshot.long_rows, name)))
        .collect();

    let datasets: Vec<Dataset> = series_data
        .iter()
        .enumerate()
        .map(|(i, (name, data))| {
            Dataset::default()
                .name(name.as_str())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(series_color(i)))
                .data(data)
        })
        .collect();

    let y_bounds = axis_bounds(snapshot.long_rows.iter().map(|r| r.value));
    let chart = line_chart(datasets, snapshot.range, y_bounds, "Price", "Cross Market Comparison");
    f.render_widget(chart, chunks[2]);

    // Raw aligned rows
    let mut header = vec!["date".to_string()];
    header.extend(snapshot.series_names.iter().cloned());
    let rows: Vec<Row> = snapshot
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.date.to_string()];
            cells.extend(
                snapshot
                    .series_names
                    .iter()
                    .map(|name| format_price(row.get(name).unwrap_or(0.0))),
            );
            Row::new(cells)
        })
        .collect();

    render_table(f, chunks[3], header, rows, &format!("Aligned rows ({})", snapshot.rows.len()));
}

fn render_crypto(f: &mut Frame, area: Rect, state: &DashboardState<'_>) {
    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Range + coin
            Constraint::Min(8),     // Chart
            Constraint::Length(10), // Raw table
        ])
        .split(area);

    let view = state.crypto();
    let resolved = match view {
        Some(CryptoView::Ready(analysis)) => Some(analysis.range),
        Some(CryptoView::NoData { range, .. }) => *range,
        None => None,
    };
    let title = format!("🪙 Cryptocurrency Analysis: ◀ {} ▶", state.coin().unwrap_or("-"));
    render_range(f, chunks[0], state, resolved, &title);

    let Some(CryptoView::Ready(analysis)) = view else {
        render_empty(f, chunks[1].union(chunks[2]), "No data available.");
        return;
    };

    let data = price_points(&analysis.points);
    let dataset = Dataset::default()
        .name(analysis.coin.as_str())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(series_color(0)))
        .data(&data);

    let y_bounds = match analysis.min_max() {
        Some((lo, hi)) => axis_bounds([lo, hi]),
        None => axis_bounds(std::iter::empty()),
    };
    let chart = line_chart(vec![dataset], analysis.range, y_bounds, "price_inr", &analysis.title());
    f.render_widget(chart, chunks[1]);

    let rows: Vec<Row> = analysis
        .points
        .iter()
        .map(|p| Row::new(vec![p.date.to_string(), format_price(p.value)]))
        .collect();
    render_table(
        f,
        chunks[2],
        vec!["date".to_string(), "price_inr".to_string()],
        rows,
        &format!("Observations ({})", analysis.points.len()),
    );
}

fn render_analytics(f: &mut Frame, area: Rect, state: &DashboardState<'_>) {
    let chunks = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let page = state.analytics();
    let items: Vec<ListItem> = page.titles().into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("🧮 Select Query"))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .highlight_symbol("▶ ");
    let mut list_state = ListState::default().with_selected(Some(page.selected_index()));
    f.render_stateful_widget(list, chunks[0], &mut list_state);

    match page.result() {
        Some((query, table)) => render_query_table(f, chunks[1], table, &query.title(page.params())),
        None => render_empty(f, chunks[1], "Press Enter to run the selected query."),
    }
}

fn render_query_table(f: &mut Frame, area: Rect, table: &QueryTable, title: &str) {
    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|cells| Row::new(cells.iter().map(|c| c.to_string()).collect::<Vec<_>>()))
        .collect();
    render_table(f, area, table.columns.clone(), rows, title);
}

fn render_range(f: &mut Frame, area: Rect, state: &DashboardState<'_>, resolved: Option<DateRange>, title: &str) {
    let default_input = RangeInput::default();
    let input = state.range_input().unwrap_or(&default_input);
    let editing = match state.mode() {
        InputMode::Editing { field, buffer } => Some((*field, buffer.as_str())),
        InputMode::Normal => None,
    };

    let mut spans = Vec::new();
    for (field, entered, shown) in [
        (DateField::Start, input.start, resolved.map(|r| r.start())),
        (DateField::End, input.end, resolved.map(|r| r.end())),
    ] {
        spans.push(Span::styled(
            format!("{}: ", field.label()),
            Style::default().fg(Color::Cyan),
        ));
        match editing {
            Some((editing_field, buffer)) if editing_field == field => spans.push(Span::styled(
                format!("{}_", buffer),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            )),
            _ => spans.push(Span::raw(date_text(entered.or(shown)))),
        }
        spans.push(Span::raw("   "));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL).title(title.to_string())),
        area,
    );
}

fn line_chart<'a>(
    datasets: Vec<Dataset<'a>>,
    range: DateRange,
    y_bounds: [f64; 2],
    y_title: &'a str,
    title: &str,
) -> Chart<'a> {
    let muted = Style::default().fg(Color::Gray);
    let x_lo = date_x(range.start());
    let x_hi = date_x(range.end()).max(x_lo + 1.0);

    Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .x_axis(
            Axis::default()
                .title(Span::styled("date", muted))
                .style(muted)
                .bounds([x_lo, x_hi])
                .labels(vec![
                    Span::styled(range.start().to_string(), muted),
                    Span::styled(range.end().to_string(), muted),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(y_title, muted))
                .style(muted)
                .bounds(y_bounds)
                .labels(vec![
                    Span::styled(format!("{:.0}", y_bounds[0]), muted),
                    Span::styled(format!("{:.0}", y_bounds[1]), muted),
                ]),
        )
}

fn render_table(f: &mut Frame, area: Rect, header: Vec<String>, rows: Vec<Row>, title: &str) {
    let width = header.len().max(1) as u32;
    let widths: Vec<Constraint> = header.iter().map(|_| Constraint::Ratio(1, width)).collect();
    let header = Row::new(header).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    f.render_widget(table, area);
}

fn render_empty(f: &mut Frame, area: Rect, message: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Yellow))),
    ];
    f.render_widget(Paragraph::new(text).block(Block::default().borders(Borders::ALL)), area);
}

fn render_footer(f: &mut Frame, area: Rect, state: &DashboardState<'_>) {
    let line = match state.status() {
        Some((message, level)) => {
            let (label, color) = match level {
                StatusLevel::Info => ("Info: ", Color::Green),
                StatusLevel::Warning => ("Warning: ", Color::Yellow),
                StatusLevel::Error => ("Error: ", Color::Red),
            };
            Line::from(vec![
                Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw(message.clone()),
            ])
        }
        None => Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Green)),
            Span::raw("Ready"),
            Span::raw(" | "),
            Span::raw("Press 'q' to quit"),
        ]),
    };

    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Status")),
        area,
    );
}

fn date_text(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}
