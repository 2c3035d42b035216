use crate::animation::DisplayRate;
use crate::display::chart::render_chart;
use crate::stats::{HistoryLog, RateTier, StatState, PRESETS};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::thread;
use std::time::Duration;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Total Matches")]
    matches: String,
    #[tabled(rename = "Total Wins")]
    wins: String,
    #[tabled(rename = "Total Losses")]
    losses: String,
    #[tabled(rename = "Win/Loss Ratio")]
    ratio: String,
}

#[derive(Tabled)]
struct PresetRow {
    #[tabled(rename = "#")]
    number: String,
    win_rate: String,
    record: String,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "#")]
    number: String,
    date: String,
    win_rate: String,
    record: String,
}

pub fn display_banner() {
    println!("\n{}", "⚡ WinRateZ".bold().yellow());
    println!("{}\n", "=".repeat(40).yellow());
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

fn tinted(text: String, tier: RateTier) -> ColoredString {
    match tier {
        RateTier::High => text.green(),
        RateTier::Even => text.yellow(),
        RateTier::Low => text.red(),
    }
}

fn record(wins: u64, losses: u64) -> String {
    format!("{}W - {}L", wins, losses)
}

/// Eases the gauge from `from` to the current win rate. With `animate` off
/// only the final value is printed.
pub fn display_win_rate(state: &StatState, from: f64, duration: Duration, steps: u32, animate: bool) {
    let target = state.current_win_rate();
    println!("{}", "Current Win Rate".bold().yellow());

    if animate {
        let mut display = DisplayRate::new(from, duration, steps);
        let interval = display.retarget(target);

        let pb = ProgressBar::new(10_000);
        if let Ok(style) = ProgressStyle::with_template("{bar:40.yellow/black} {msg}") {
            pb.set_style(style.progress_chars("█▓░"));
        }
        pb.set_position(gauge_position(from));
        pb.set_message(format!("{:.1}%", from));

        while let Some(value) = display.tick() {
            pb.set_position(gauge_position(value));
            pb.set_message(format!("{:.1}%", value));
            thread::sleep(interval);
        }
        pb.finish_and_clear();
    }

    println!(
        "{}\n",
        tinted(format!("{:.1}%", target), state.tier()).bold()
    );
}

fn gauge_position(rate: f64) -> u64 {
    (rate.clamp(0.0, 100.0) * 100.0).round() as u64
}

pub fn display_stats(state: &StatState) {
    let rows = vec![StatRow {
        matches: state.total_matches().to_string(),
        wins: state.total_wins().to_string(),
        losses: state.losses().to_string(),
        ratio: state.win_loss_ratio().to_string(),
    }];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_presets() {
    println!("\n{}", "🎮 Win Rate Simulator".bold().cyan());
    println!("{}\n", "=".repeat(40).cyan());

    let rows: Vec<PresetRow> = PRESETS
        .iter()
        .enumerate()
        .map(|(idx, preset)| PresetRow {
            number: format!("{}", idx + 1),
            win_rate: tinted(format!("{:.1}%", preset.win_rate()), RateTier::of(preset.win_rate()))
                .to_string(),
            record: record(preset.wins, preset.losses()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    println!("\nApply one with {}\n", "winratez preset <#>".bold());
}

pub fn display_history(history: &HistoryLog) {
    println!("\n{}", "📊 Win Rate History".bold().cyan());
    println!("{}\n", "=".repeat(40).cyan());

    let Some(chart) = render_chart(history) else {
        println!(
            "{}",
            "No history data available. Save your stats to see the chart.".yellow()
        );
        return;
    };

    let rows: Vec<HistoryRow> = history
        .iter()
        .enumerate()
        .map(|(idx, snap)| HistoryRow {
            number: format!("{}", idx + 1),
            date: snap.date.clone(),
            win_rate: tinted(format!("{:.2}%", snap.win_rate), RateTier::of(snap.win_rate))
                .to_string(),
            record: record(snap.wins, snap.losses()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);

    println!("{}", chart.yellow());
    println!(
        "{} {}/{} snapshots kept, oldest dropped first\n",
        "•".dimmed(),
        history.len(),
        history.cap()
    );
}
