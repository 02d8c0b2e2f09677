use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame, Terminal,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::io;

use crate::query::Breakdown;
use crate::ui::theme;
use crate::ui::util::{format_amount, percent, truncate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChartKind {
    /// Each label's share of the whole, the terminal stand-in for a pie.
    Share,
    /// Plain vertical bars, one per label.
    Bars,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Chart {
    pub(crate) title: String,
    pub(crate) kind: ChartKind,
    pub(crate) points: Vec<(String, Decimal)>,
}

impl Chart {
    pub(crate) fn share_of(breakdown: &Breakdown<String>) -> Self {
        Self {
            title: format!("Expense Summary for {}", breakdown.period),
            kind: ChartKind::Share,
            points: breakdown.labelled(),
        }
    }

    pub(crate) fn months_of(breakdown: &Breakdown<u32>) -> Self {
        Self {
            title: format!("Monthly Expenses for {}", breakdown.period),
            kind: ChartKind::Bars,
            points: breakdown.labelled_months(),
        }
    }

    pub(crate) fn total(&self) -> Decimal {
        self.points.iter().map(|(_, v)| *v).sum()
    }
}

/// Something that can show a chart to the user.
pub(crate) trait ChartRenderer {
    fn render(&mut self, chart: &Chart) -> Result<()>;
}

/// Draws charts full-screen and waits for a key press.
pub(crate) struct TerminalCharts {
    currency: String,
}

impl TerminalCharts {
    pub(crate) fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }
}

impl ChartRenderer for TerminalCharts {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        enable_raw_mode()?;
        let result = execute!(io::stdout(), EnterAlternateScreen)
            .map_err(anyhow::Error::from)
            .and_then(|()| Ok(Terminal::new(CrosstermBackend::new(io::stdout()))?))
            .and_then(|mut terminal| {
                let shown = show(&mut terminal, chart, &self.currency);
                shown.and(terminal.show_cursor().map_err(anyhow::Error::from))
            });

        let raw = disable_raw_mode();
        let screen = execute!(io::stdout(), LeaveAlternateScreen);
        first_failure(result, [raw, screen])
    }
}

/// Drawing outcome, then each teardown step, in order. Callers run every
/// teardown step before this sees them.
pub(crate) fn first_failure(drawn: Result<()>, teardown: [io::Result<()>; 2]) -> Result<()> {
    drawn?;
    for step in teardown {
        step?;
    }
    Ok(())
}

fn show(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    chart: &Chart,
    currency: &str,
) -> Result<()> {
    terminal.draw(|f| draw(f, chart, currency))?;
    loop {
        if let Event::Key(_) = event::read()? {
            return Ok(());
        }
    }
}

pub(crate) fn draw(f: &mut Frame, chart: &Chart, currency: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(f.area());

    match chart.kind {
        ChartKind::Share => draw_share(f, chunks[0], chart, currency),
        ChartKind::Bars => draw_bars(f, chunks[0], chart, currency),
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        format!(
            " Total {}  ·  press any key to return",
            format_amount(chart.total(), currency)
        ),
        theme::dim_style(),
    )));
    f.render_widget(footer, chunks[1]);
}

fn chart_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ))
}

/// Bar lengths in cents so small amounts still show.
fn bar_value(amount: Decimal) -> u64 {
    (amount * Decimal::ONE_HUNDRED).round().to_u64().unwrap_or(0)
}

pub(crate) fn share_bars(chart: &Chart, currency: &str) -> Vec<Bar<'static>> {
    let whole = chart.total();
    chart
        .points
        .iter()
        .enumerate()
        .map(|(i, (label, amount))| {
            Bar::default()
                .value(bar_value(*amount))
                .label(Line::from(format!(
                    "{} {:.1}%",
                    truncate(label, 14),
                    percent(*amount, whole)
                )))
                .text_value(format_amount(*amount, currency))
                .style(Style::default().fg(theme::slice_color(i)))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::slice_color(i))
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect()
}

fn draw_share(f: &mut Frame, area: Rect, chart: &Chart, currency: &str) {
    let bars = share_bars(chart, currency);
    let widget = BarChart::default()
        .block(chart_block(&chart.title))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(1);
    f.render_widget(widget, area);
}

const MONTH_BAR_WIDTH: u16 = 9;

pub(crate) fn month_bars(chart: &Chart, currency: &str) -> Vec<Bar<'static>> {
    chart
        .points
        .iter()
        .map(|(label, amount)| {
            Bar::default()
                .value(bar_value(*amount))
                .label(Line::from(truncate(label, MONTH_BAR_WIDTH as usize)))
                .text_value(truncate(
                    &format_amount(*amount, currency),
                    MONTH_BAR_WIDTH as usize,
                ))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect()
}

fn draw_bars(f: &mut Frame, area: Rect, chart: &Chart, currency: &str) {
    let bars = month_bars(chart, currency);
    let widget = BarChart::default()
        .block(chart_block(&chart.title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(MONTH_BAR_WIDTH)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));
    f.render_widget(widget, area);
}

#[cfg(test)]
#[path = "chart_tests.rs"]
mod tests;
