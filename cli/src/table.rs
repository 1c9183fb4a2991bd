use rms_planner_core::{ImpactReport, Scenario};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LABEL_WIDTH: usize = 28;

#[derive(Tabled)]
struct ListRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Qty")]
    quantity: i64,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Days")]
    days: i64,
    #[tabled(rename = "Label")]
    label: String,
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Qty")]
    quantity: i64,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Days")]
    days: i64,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "At peak")]
    at_peak: String,
}

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Demand")]
    demand: i64,
    #[tabled(rename = "Remaining")]
    remaining: i64,
}

pub fn print_scenarios(scenarios: &[Scenario]) {
    let rows: Vec<ListRow> = scenarios
        .iter()
        .map(|s| ListRow {
            id: s.short_id(),
            quantity: s.quantity,
            start: s.start.format("%Y-%m-%d (%a)").to_string(),
            end: s.end.format("%Y-%m-%d (%a)").to_string(),
            days: s.days(),
            label: truncate(s.label.as_deref().unwrap_or("-"), LABEL_WIDTH),
        })
        .collect();
    println!("{}", styled(Table::new(rows)));
}

pub fn print_report(report: &ImpactReport) {
    let item = report.pool.item.as_deref().unwrap_or("Pool");
    println!(
        "\x1b[1;36m{}\x1b[0m (total: {}, available: {})",
        item, report.pool.total_capacity, report.pool.available_capacity
    );
    println!("  Peak demand:  {}", report.peak_demand);
    if let Some(date) = report.peak_date {
        println!("  Peak date:    {}", date.format("%Y-%m-%d (%a)"));
    }
    if report.oversubscribed {
        println!("  Remaining:    \x1b[1;31m{} (oversubscribed)\x1b[0m", report.remaining_capacity);
    } else {
        println!("  Remaining:    {}", report.remaining_capacity);
    }
    println!("  Utilization:  +{:.1}%", report.utilization_display);

    if report.scenarios.is_empty() {
        println!("\nNo scenarios in the working set.");
        return;
    }

    let rows: Vec<ReportRow> = report
        .scenarios
        .iter()
        .map(|s| ReportRow {
            id: s.short_id.clone(),
            quantity: s.quantity,
            start: s.start.format("%Y-%m-%d").to_string(),
            end: s.end.format("%Y-%m-%d").to_string(),
            days: s.days,
            label: truncate(s.label.as_deref().unwrap_or("-"), LABEL_WIDTH),
            at_peak: if s.active_at_peak { "✔".to_string() } else { String::new() },
        })
        .collect();
    println!("\n{}", styled(Table::new(rows)));

    let profile: Vec<ProfileRow> = report
        .profile
        .iter()
        .map(|p| ProfileRow {
            date: p.date.format("%Y-%m-%d (%a)").to_string(),
            demand: p.demand,
            remaining: report.pool.remaining_after(p.demand),
        })
        .collect();
    println!("\n{}", styled(Table::new(profile)));
}

fn styled(mut table: Table) -> Table {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table
}

/// Cuts `text` to at most `width` display columns, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Expo", 10), "Expo");
        assert_eq!(truncate("Spring trade fair", 8), "Spring …");
        // Wide characters take two columns each
        assert_eq!(truncate("展示会の準備", 5), "展示…");
    }
}
