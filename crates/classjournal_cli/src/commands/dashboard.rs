use super::{print_json, Context};
use clap::Args;
use classjournal_core::{local_today, AtmosphereStats, DashboardService};

#[derive(Args, Debug)]
pub struct Command {
    /// Print the dashboard as JSON
    #[clap(long)]
    json: bool,
}

#[derive(Args, Debug)]
pub struct AtmosphereCommand {
    /// Print the statistics as JSON
    #[clap(long)]
    json: bool,
}

pub fn handle(command: Command, context: &Context) -> anyhow::Result<()> {
    let mut store = context.open_store()?;
    let selected = context.selected_date(&store)?;
    let view = DashboardService::new(&mut store).dashboard(selected, local_today());

    if command.json {
        return print_json(&view);
    }

    println!("== {} ==", selected);
    println!("[오늘의 출결 현황]");
    if view.attendance.is_empty() {
        println!("  기록된 데이터가 없습니다.");
    }
    for slice in &view.attendance.slices {
        println!("  {:<4} {}", slice.label, slice.count);
    }

    println!("[최근 출석 인원 추이] (max {})", view.trend_ceiling);
    if view.trend.is_empty() {
        println!("  기록된 데이터가 없습니다.");
    }
    for point in &view.trend {
        println!(
            "  {} {:>3} {}",
            point.label,
            point.present_count,
            "#".repeat(point.present_count)
        );
    }

    print_atmosphere(&view.atmosphere);

    let summary = &view.summary;
    println!("[오늘의 요약]");
    match (summary.weather, summary.atmosphere) {
        (Some(weather), Some(atmosphere)) => {
            println!("  날씨   {} {}", weather.emoji(), weather.name());
            println!("  분위기 {} {}", atmosphere.emoji(), atmosphere.label());
        }
        _ => println!("  날씨/분위기 기록 없음"),
    }
    println!("  총 학생 수 {}명", summary.student_count);
    println!("  누적 기록 {}개", summary.record_count);
    Ok(())
}

pub fn handle_atmosphere(command: AtmosphereCommand, context: &Context) -> anyhow::Result<()> {
    let mut store = context.open_store()?;
    let stats = DashboardService::new(&mut store).recent_atmosphere();

    if command.json {
        return print_json(&stats);
    }
    print_atmosphere(&stats);
    Ok(())
}

fn print_atmosphere(stats: &AtmosphereStats) {
    println!("[최근 30일 교실 분위기] (since {})", stats.window_start);
    if stats.is_empty() {
        println!("  최근 기록이 없습니다.");
        return;
    }
    for entry in &stats.histogram {
        println!("  {} {:<4} {}회", entry.emoji, entry.label, entry.count);
    }
    let strip: Vec<_> = stats
        .days
        .iter()
        .map(|day| format!("{} {}", day.date.format("%m-%d"), day.atmosphere.emoji()))
        .collect();
    println!("  {}", strip.join("  "));
}
