use crossterm::event::{KeyCode, KeyEvent};
use jiff::Zoned;
use jiff::civil::Date;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Sparkline},
};

use aquadesk_core::usage::{UsageProfile, monthly_usage};
use aquadesk_core::{UsagePoint, UsageSummary};

use super::Screen;
use crate::components::{Component, EventResult};
use crate::state::{AppState, ScreenId};

/// Months shown on the usage chart
const HISTORY_MONTHS: usize = 12;

/// Customer portal: a year of consumption with headline figures.
pub struct DashboardScreen {
    points: Vec<UsagePoint>,
    summary: Option<UsageSummary>,
    error: Option<String>,
    customer_id: Option<i64>,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            summary: None,
            error: None,
            customer_id: None,
        }
    }

    /// Rebuild the series for `customer_id` ending in the month of `today`
    pub fn refresh(&mut self, customer_id: i64, today: Date) {
        self.customer_id = Some(customer_id);
        match monthly_usage(customer_id, today, HISTORY_MONTHS, &UsageProfile::default()) {
            Ok(points) => {
                tracing::debug!(customer_id, months = points.len(), "Usage series built");
                self.summary = Some(UsageSummary::from_points(&points));
                self.points = points;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(customer_id, error = %e, "Usage series unavailable");
                self.points.clear();
                self.summary = None;
                self.error = Some(format!("Usage data unavailable: {e}"));
            }
        }
    }

    pub fn summary(&self) -> Option<&UsageSummary> {
        self.summary.as_ref()
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default().borders(Borders::ALL).title(" MY ACCOUNT ");

        let customer_id = self.customer_id.unwrap_or(state.config.customer_id);
        let holder = state
            .directory
            .user_name(customer_id)
            .map_or_else(|| format!("Customer #{customer_id}"), str::to_string);

        let mut lines = vec![Line::from(Span::styled(
            holder,
            Style::default().add_modifier(Modifier::BOLD),
        ))];

        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else if let Some(summary) = &self.summary {
            lines.push(Line::from(format!(
                "  Last {} months:  {:.1} m3 total, {:.1} m3 average",
                self.points.len(),
                summary.total,
                summary.average
            )));
            if let Some(peak) = &summary.peak {
                lines.push(Line::from(format!(
                    "  Peak month:      {} ({:.1} m3)",
                    peak.label(),
                    peak.cubic_metres
                )));
            }
            lines.push(trend_line(summary.trend_pct));
            lines.push(Line::from(format!(
                "  Estimated bill:  ${:.2}",
                summary.estimated_charge
            )));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" MONTHLY USAGE (m3) ");

        if self.points.is_empty() {
            frame.render_widget(Paragraph::new("No usage to display").block(block), area);
            return;
        }

        let average = self.summary.as_ref().map_or(0.0, |s| s.average);
        let bars: Vec<Bar> = self
            .points
            .iter()
            .map(|point| {
                let style = if point.cubic_metres > average * 1.15 {
                    Style::default().fg(Color::LightRed)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                Bar::default()
                    .value(point.cubic_metres.round().max(0.0) as u64)
                    .label(Line::from(point.label()))
                    .text_value(format!("{:.1}", point.cubic_metres))
                    .style(style)
                    .value_style(style.reversed())
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(6)
            .bar_gap(1)
            .direction(Direction::Vertical);

        frame.render_widget(chart, area);
    }

    fn render_trend(&self, frame: &mut Frame, area: Rect) {
        let data: Vec<u64> = self
            .points
            .iter()
            .map(|p| (p.cubic_metres * 10.0).round().max(0.0) as u64)
            .collect();
        let sparkline = Sparkline::default()
            .block(Block::default().borders(Borders::ALL).title(" TREND "))
            .data(data)
            .style(Style::default().fg(Color::Green));
        frame.render_widget(sparkline, area);
    }
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn trend_line(trend_pct: Option<f64>) -> Line<'static> {
    match trend_pct {
        Some(pct) => {
            let (arrow, color) = if pct >= 0.0 {
                ("up", Color::LightRed)
            } else {
                ("down", Color::Green)
            };
            Line::from(vec![
                Span::raw("  Versus last month: "),
                Span::styled(
                    format!("{arrow} {:.1}%", pct.abs()),
                    Style::default().fg(color),
                ),
            ])
        }
        None => Line::from("  Versus last month: n/a"),
    }
}

impl Component for DashboardScreen {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Char('r') => {
                self.refresh(state.config.customer_id, Zoned::now().date());
                EventResult::Handled
            }
            _ => EventResult::NotHandled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7), // Summary
                Constraint::Min(8),    // Bar chart
                Constraint::Length(5), // Sparkline
            ])
            .split(area);

        self.render_summary(frame, chunks[0], state);
        self.render_chart(frame, chunks[1]);
        self.render_trend(frame, chunks[2]);
    }
}

impl Screen for DashboardScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Dashboard
    }

    fn on_mount(&mut self, state: &mut AppState) {
        state.mounts.mount(ScreenId::Dashboard);
        self.refresh(state.config.customer_id, Zoned::now().date());
    }

    fn on_unmount(&mut self, state: &mut AppState) {
        state.mounts.unmount(ScreenId::Dashboard);
    }
}
