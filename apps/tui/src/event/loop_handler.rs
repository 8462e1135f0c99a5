use crate::app::{handle_key, handle_mouse, App};
use crate::ui;
use crate::ui::widgets::tiles::format_count;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event};
use india_internship_map::api::MapApi;
use india_internship_map::config::AppConfig;
use india_internship_map::{Catalog, Controller, Dashboard, SummaryStat};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde::Serialize;
use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

/// One cycle's data as printed by `--headless` / `--json`.
#[derive(Debug, Serialize)]
struct HeadlessReport<'a> {
    fetched_at: Option<String>,
    database_empty: bool,
    summary: Option<&'a SummaryStat>,
    states: &'a Catalog,
}

impl<'a> HeadlessReport<'a> {
    fn from_dashboard(dashboard: &'a Dashboard) -> Self {
        Self {
            fetched_at: dashboard.last_updated().map(|at| at.to_rfc3339()),
            database_empty: dashboard.is_database_empty(),
            summary: dashboard.summary(),
            states: dashboard.catalog(),
        }
    }
}

/// Run one fetch cycle without a UI and print the result.
pub async fn run_headless(api: Arc<dyn MapApi>, config: &AppConfig, json: bool) -> Result<()> {
    let mut controller = Controller::new(api, Dashboard::new(&config.initial_state));
    let dashboard = controller.run_once().await;

    if let Some(failure) = dashboard.error() {
        return Err(eyre!("{} ({})", failure.message, failure.detail));
    }

    let report = HeadlessReport::from_dashboard(dashboard);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_headless_text(&report));
    }

    Ok(())
}

fn render_headless_text(report: &HeadlessReport<'_>) -> String {
    let mut lines = vec![
        String::new(),
        "India Internship Map".to_string(),
        "====================".to_string(),
    ];
    if let Some(at) = &report.fetched_at {
        lines.push(format!("Fetched at: {at}"));
    }

    lines.push(String::new());
    match report.summary {
        Some(summary) => {
            lines.push("Overview:".to_string());
            lines.extend(
                [
                    ("Total companies", summary.total_companies),
                    ("Total internships", summary.total_internships),
                    ("Active internships", summary.active_internships),
                    ("Closed internships", summary.closed_internships),
                    ("PM internships", summary.pm_internships),
                    ("Total applications", summary.total_applications),
                    ("Students hired", summary.students_hired),
                ]
                .into_iter()
                .map(|(label, value)| format!("- {label}: {}", format_count(value))),
            );
        }
        None => lines.push("Overview: unavailable".to_string()),
    }

    lines.push(String::new());
    if report.database_empty {
        lines.push(
            "Database is empty. The map will update when employers add internships.".to_string(),
        );
    } else {
        lines.push("States with activity:".to_string());
        lines.extend(
            report
                .states
                .iter()
                .filter(|(_, stats)| stats.has_activity())
                .map(|(code, stats)| {
                    format!(
                        "- {code} {} | companies {} | hired {} | pm {} | active {} | students hired {}",
                        stats.name,
                        format_count(stats.companies),
                        format_count(stats.hired_internships),
                        format_count(stats.pm_internships),
                        format_count(stats.active_internships),
                        format_count(stats.students_hired),
                    )
                }),
        );
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    app.start();

    while app.running {
        // Apply fetch results and advance spinners
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => handle_key(app, key),
                Ok(Event::Mouse(mouse)) => handle_mouse(app, mouse),
                Ok(Event::Resize(_, _)) => {
                    // Stale until the next draw
                    app.map_area.set(None);
                }
                Ok(Event::FocusGained | Event::FocusLost | Event::Paste(_)) => {}
                Err(e) => tracing::warn!(error = %e, "failed to read terminal event"),
            }
        }

        // Let fetch tasks make progress between frames.
        tokio::task::yield_now().await;
    }

    tracing::info!("event loop finished");
    Ok(())
}
