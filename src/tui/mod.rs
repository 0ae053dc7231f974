//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for choosing a product, rebate
//! percentage, and purchase volume, then renders the margin breakdown and a
//! gross-margin-vs-volume chart.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::{self, VOLUME_MAX, VOLUME_MIN};
use crate::cli::SimArgs;
use crate::data::Catalog;
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::MarginPlottersChart;

/// Rebate slider bounds (integer percent), matching the input surface contract.
const REBATE_MIN: i64 = 0;
const REBATE_MAX: i64 = 20;

/// Start the TUI.
pub fn run(args: SimArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: crate::domain::SimConfig,
    catalog: Catalog,
    selected_field: usize,
    status: String,
    run: Option<pipeline::RunOutput>,
}

impl App {
    fn new(args: SimArgs) -> Result<Self, AppError> {
        let mut app = Self {
            config: crate::app::sim_config_from_args(&args),
            catalog: Catalog::sample(),
            selected_field: 0,
            status: String::new(),
            run: None,
        };
        app.resimulate()?;
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < 2 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1)?,
            KeyCode::Right => self.adjust_field(1)?,
            KeyCode::Char('e') => {
                if let Some(run) = &self.run {
                    let path = std::path::Path::new("margin_sim.csv");
                    match crate::io::export::write_simulation_csv(path, run) {
                        Ok(()) => self.status = format!("Wrote {}", path.display()),
                        Err(err) => self.status = format!("Export failed: {err}"),
                    }
                }
            }
            KeyCode::Char('j') => {
                if let Some(run) = &self.run {
                    let path = std::path::Path::new("margin_sim.json");
                    match crate::io::export::write_simulation_json(path, run) {
                        Ok(()) => self.status = format!("Wrote {}", path.display()),
                        Err(err) => self.status = format!("Export failed: {err}"),
                    }
                }
            }
            _ => {}
        }

        Ok(false)
    }

    fn adjust_field(&mut self, delta: i64) -> Result<(), AppError> {
        match self.selected_field {
            0 => {
                self.cycle_product(delta);
                self.resimulate()?;
                self.status = format!("product: {}", self.config.product);
            }
            1 => {
                self.config.rebate_percent =
                    (self.config.rebate_percent + delta).clamp(REBATE_MIN, REBATE_MAX);
                self.resimulate()?;
                self.status = format!("rebate: {}%", self.config.rebate_percent);
            }
            2 => {
                self.config.volume = (self.config.volume + delta).clamp(VOLUME_MIN, VOLUME_MAX);
                self.resimulate()?;
                self.status = format!("volume: {}", self.config.volume);
            }
            _ => {}
        }
        Ok(())
    }

    fn cycle_product(&mut self, delta: i64) {
        let n = self.catalog.len() as i64;
        let cur = self.catalog.position(&self.config.product).unwrap_or(0) as i64;
        let next = (cur + delta).rem_euclid(n) as usize;
        self.config.product = self.catalog.products()[next].name.clone();
    }

    fn resimulate(&mut self) -> Result<(), AppError> {
        let run = pipeline::run_sim(&self.config, &self.catalog)?;
        self.run = Some(run);
        Ok(())
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("margin", Style::default().fg(Color::Cyan)),
            Span::raw(" — gross margin simulation"),
        ]));

        let gross = self
            .run
            .as_ref()
            .map(|r| r.result.gross_margin.to_string())
            .unwrap_or_else(|| "-".to_string());

        lines.push(Line::from(Span::styled(
            format!(
                "product: {} | rebate: {}% | volume: {} | gross margin: {gross}",
                self.config.product, self.config.rebate_percent, self.config.volume,
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(9)])
            .split(area);

        self.draw_chart(frame, chunks[0]);

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        self.draw_settings(frame, panels[0]);
        self.draw_results(frame, panels[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Gross Margin vs Volume").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("Waiting for data...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let (curve, selected, x_bounds, y_bounds) = chart_series(run);

        let widget = MarginPlottersChart {
            curve: &curve,
            selected: &selected,
            x_bounds,
            y_bounds,
            x_label: "volume",
            y_label: "gross margin",
            fmt_x: fmt_axis_x,
            fmt_y: fmt_axis_y,
        };

        frame.render_widget(widget, inner);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items = vec![
            ListItem::new(format!("Product: {}", self.config.product)),
            ListItem::new(format!("Rebate: {}%", self.config.rebate_percent)),
            ListItem::new(format!("Volume: {}", self.config.volume)),
        ];

        let list = List::new(items)
            .block(Block::default().title("Parameters").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_results(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Breakdown").borders(Borders::ALL);

        let Some(run) = &self.run else {
            frame.render_widget(block, area);
            return;
        };

        let rows = [
            ("Price", run.result.price),
            ("Rebate", run.result.rebate),
            ("Volume Discount", run.result.volume_discount),
            ("Gross Margin", run.result.gross_margin),
        ];

        let mut lines: Vec<Line> = rows
            .iter()
            .map(|(label, value)| {
                let style = if *value < 0 {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::Green)
                };
                Line::from(vec![
                    Span::raw(format!("{label:<16}")),
                    Span::styled(format!("{value:>8}"), style),
                ])
            })
            .collect();

        lines.push(Line::from(Span::styled(
            format!(
                "Category: {} | Department: {}",
                run.product.category, run.product.department
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(block);
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  e export csv  j export json  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Build chart series for Plotters.
fn chart_series(
    run: &pipeline::RunOutput,
) -> (Vec<(f64, f64)>, Vec<(f64, f64)>, [f64; 2], [f64; 2]) {
    let curve: Vec<(f64, f64)> = run
        .curve
        .iter()
        .map(|(v, r)| (*v as f64, r.gross_margin as f64))
        .collect();

    let selected: Vec<(f64, f64)> = curve
        .iter()
        .copied()
        .filter(|(v, _)| *v as i64 == run.input.volume)
        .collect();

    let x_bounds = [VOLUME_MIN as f64, VOLUME_MAX as f64];

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in &curve {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = 0.0;
        y_max = 1.0;
    } else if y_max <= y_min {
        // Flat curve (e.g., zero-price product): give the axis some room.
        y_min -= 1.0;
        y_max = y_min + 2.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1.0);
    let y_bounds = [y_min - pad, y_max + pad];

    (curve, selected, x_bounds, y_bounds)
}

fn fmt_axis_x(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.0}")
}
