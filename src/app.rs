use std::io;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use tracing::{debug, error, info, warn};

use crate::clock::{self, TimeFormat, Zone};
use crate::config::{Config, FORECAST_HOURS_UTC, NUMBER_OF_DAY_FORECASTS, NUMBER_OF_FORECASTS};
use crate::forecast::{aggregate, DaySummary, ForecastSample};
use crate::i18n::Language;
use crate::owm::{current::Current, forecast::Forecast, Query};
use crate::units::{direction::degree_to_compass, Units};
use crate::weather::Condition;

const MISSING: &str = "--";
const TICK: Duration = Duration::from_millis(250);

pub type DayForecasts = [Option<DaySummary>; NUMBER_OF_DAY_FORECASTS];

/// Data from one refresh cycle.
#[derive(Debug, Clone)]
pub struct Report {
    pub current: Current,
    pub days: DayForecasts,
    pub fetched_at: DateTime<Utc>,
}

/// Presentation settings resolved from the configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub location_name: String,
    pub zone: Zone,
    pub time_format: TimeFormat,
    pub units: Units,
    pub language: Language,
    pub update_interval: Duration,
}

impl Settings {
    pub fn from_config(config: &Config) -> Result<Self> {
        let minutes = config.general.update_interval_minutes;
        let update_interval = minutes
            .checked_mul(60)
            .map(Duration::from_secs)
            .with_context(|| format!("Update interval too large: {minutes} minutes"))?;
        Ok(Self {
            location_name: config.location.name.clone(),
            zone: config.zone()?,
            time_format: config.time_format(),
            units: config.units(),
            language: config.language()?,
            update_interval,
        })
    }
}

pub struct Station {
    settings: Settings,
    report: Option<Report>,
    last_error: Option<String>,
    last_refresh: Option<Instant>,
}

impl Station {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            report: None,
            last_error: None,
            last_refresh: None,
        }
    }

    pub fn refresh_due(&self, now: Instant) -> bool {
        match self.last_refresh {
            Some(last) => now.duration_since(last) >= self.settings.update_interval,
            None => true,
        }
    }

    pub fn force_refresh(&mut self) {
        self.last_refresh = None;
    }

    /// Run one refresh. A failure keeps the previous report on screen.
    pub fn refresh<F>(&mut self, now: Instant, fetch: &mut F)
    where
        F: FnMut() -> Result<Report>,
    {
        self.last_refresh = Some(now);
        match fetch() {
            Ok(report) => {
                info!("Weather updated");
                self.report = Some(report);
                self.last_error = None;
            }
            Err(err) => {
                error!("Weather update failed: {:#}", err);
                self.last_error = Some(format!("{err:#}"));
            }
        }
    }
}

pub fn run_app<B, F>(
    terminal: &mut Terminal<B>,
    station: &mut Station,
    mut fetch: F,
) -> io::Result<()>
where
    B: Backend,
    F: FnMut() -> Result<Report>,
{
    loop {
        let now = Instant::now();
        if station.refresh_due(now) {
            // Show the stale screen while the blocking requests run.
            terminal.draw(|f| ui(f, station, Utc::now()))?;
            station.refresh(now, &mut fetch);
        }

        terminal.draw(|f| ui(f, station, Utc::now()))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('r') => {
                        debug!("Manual refresh requested");
                        station.force_refresh();
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Fetch current conditions and the forecast, and condense the forecast into
/// day summaries.
pub fn fetch_report(query: &Query, zone: Zone) -> Result<Report> {
    info!("Fetching current weather...");
    let current = Current::fetch(query).context("Failed to fetch current weather")?;

    info!("Fetching forecast...");
    let forecast = Forecast::fetch(query).context("Failed to fetch forecast")?;
    let samples = forecast.samples(&FORECAST_HOURS_UTC, NUMBER_OF_FORECASTS)?;
    debug!("{} forecast samples after hour filter", samples.len());

    let now = Utc::now();
    if !clock::is_synchronized(&now) {
        warn!("System clock not set: {}", now);
        bail!("System clock is not set");
    }

    Ok(Report {
        current,
        days: summarize(&samples, zone, now),
        fetched_at: now,
    })
}

/// Aggregate `samples` relative to the local day of `now`.
pub fn summarize(samples: &[ForecastSample], zone: Zone, now: DateTime<Utc>) -> DayForecasts {
    let today = zone.weekday(now);
    match zone {
        Zone::Local => aggregate(samples, today, &Local),
        Zone::Fixed(offset) => aggregate(samples, today, &offset),
    }
}

fn block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::Yellow),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(BorderType::Rounded)
}

fn value_row<'a>(label: &'a str, value: String) -> Row<'a> {
    Row::new(vec![
        Cell::from(format!(" {label}")),
        Cell::from(value).style(Style::default().fg(Color::Green)),
    ])
}

fn display_current_conditions<'a>(current: Option<&'a Current>, settings: &Settings) -> Table<'a> {
    let units = settings.units;
    let mut rows = vec![Row::new(vec![Cell::from("")])];

    let Some(current) = current else {
        rows.push(value_row("Temperature", MISSING.to_string()));
        return Table::new(rows, [Constraint::Length(14), Constraint::Min(10)])
            .block(block("Current Conditions"));
    };

    let temp_label = units.temperature_label();
    rows.push(value_row(
        "Temperature",
        format!("{:.1} {temp_label}", current.main.temp),
    ));

    let feels = match current.main.feels_like {
        Some(feels) => format!("{feels:.1} {temp_label}"),
        None => MISSING.to_string(),
    };
    rows.push(value_row("Feels like", feels));

    let humid = match current.main.humidity {
        Some(humid) => format!("{humid:.0}%"),
        None => MISSING.to_string(),
    };
    rows.push(value_row("Humidity", humid));

    let pressure = match current.main.pressure {
        Some(pressure) => format!("{pressure:.0} hPa"),
        None => MISSING.to_string(),
    };
    rows.push(value_row("Pressure", pressure));

    let wind = match (current.wind.speed, current.wind.deg) {
        (Some(speed), Some(dir)) => format!(
            "{:.0} {} {}",
            units.wind_speed(speed),
            units.speed_label(),
            degree_to_compass(dir)
        ),
        (Some(speed), None) => format!("{:.0} {}", units.wind_speed(speed), units.speed_label()),
        _ => MISSING.to_string(),
    };
    rows.push(value_row("Wind", wind));

    let text = match current.condition() {
        Some(c) if !c.description.is_empty() => c.description.clone(),
        Some(c) => Condition::from_code(c.id).label().to_string(),
        None => MISSING.to_string(),
    };
    rows.push(value_row("Conditions", text));

    let time_pattern = settings.time_format.time_no_seconds();
    let sun = |at: Option<DateTime<Utc>>| match at {
        Some(at) => settings.zone.format(at, time_pattern),
        None => MISSING.to_string(),
    };
    rows.push(value_row("Sunrise", sun(current.sunrise())));
    rows.push(value_row("Sunset", sun(current.sunset())));

    Table::new(rows, [Constraint::Length(14), Constraint::Min(10)])
        .block(block("Current Conditions"))
}

fn display_forecast<'a>(days: Option<&DayForecasts>, settings: &Settings) -> Table<'a> {
    let temp_label = settings.units.temperature_label();
    let mut rows = vec![Row::new(vec![Cell::from("")])];

    for slot in 0..NUMBER_OF_DAY_FORECASTS {
        let row = match days.and_then(|days| days[slot]) {
            Some(day) => {
                let condition = Condition::from_code(day.condition_code);
                Row::new(vec![
                    Cell::from(format!(" {}", settings.language.weekday_abbr(day.weekday)))
                        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                    Cell::from(format!("{} {}", condition.glyph(), condition.label())),
                    Cell::from(format!(
                        "{:.0} / {:.0} {temp_label}",
                        day.min_temp, day.max_temp
                    ))
                    .style(Style::default().fg(Color::Green)),
                ])
            }
            None => Row::new(vec![
                Cell::from(format!(" {MISSING}")),
                Cell::from(MISSING),
                Cell::from(MISSING),
            ]),
        };
        rows.push(row);
    }

    Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(18),
            Constraint::Min(12),
        ],
    )
    .block(block("Forecast"))
}

fn display_headline<'a>(settings: &'a Settings, now: DateTime<Utc>) -> Paragraph<'a> {
    let zone = settings.zone;
    let weekday = settings.language.weekday(zone.weekday(now));
    Paragraph::new(vec![
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                settings.location_name.as_str(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" : "),
            Span::styled(
                format!("{weekday}, {}", zone.format(now, settings.time_format.date())),
                Style::default().fg(Color::Blue),
            ),
        ]),
        Line::from(format!(" {}", zone.format(now, settings.time_format.time()))),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .border_type(BorderType::Rounded),
    )
}

fn display_status<'a>(station: &'a Station) -> Paragraph<'a> {
    let settings = &station.settings;
    let line = match (&station.last_error, &station.report) {
        (Some(err), _) => Line::from(Span::styled(
            format!(" Update failed: {err}"),
            Style::default().fg(Color::Red),
        )),
        (None, Some(report)) => Line::from(format!(
            " Updated {}  (r refresh, q quit)",
            settings
                .zone
                .format(report.fetched_at, settings.time_format.time_no_seconds())
        )),
        (None, None) => Line::from(" Loading weather data..."),
    };
    Paragraph::new(line)
}

fn ui(f: &mut Frame, station: &Station, now: DateTime<Utc>) {
    let vert_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    f.render_widget(display_headline(&station.settings, now), vert_layout[0]);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(vert_layout[1]);

    let report = station.report.as_ref();
    f.render_widget(
        display_current_conditions(report.map(|r| &r.current), &station.settings),
        chunks[0],
    );
    f.render_widget(
        display_forecast(report.map(|r| &r.days), &station.settings),
        chunks[1],
    );
    f.render_widget(display_status(station), vert_layout[2]);
}
