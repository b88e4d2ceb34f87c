use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use latinum_daily::{StreakRecord, StreakState, StreakTransition, milestone_title};

use super::Context;

pub fn run(ctx: &Context) -> Result<(), String> {
    let store = ctx.open_store()?;
    let streak = StreakRecord::load(&store);

    // Preview today's check without saving it.
    let mut preview = streak.clone();
    let transition = preview.refresh(ctx.date, ctx.grace);

    let state = match preview.state() {
        StreakState::NoHistory => "no challenges yet".to_string(),
        StreakState::Active(n) => format!("active, {n} day(s)"),
        StreakState::GraceUsed(n) => format!("active, {n} day(s), grace used"),
        StreakState::Broken => "broken".to_string(),
    };

    let next_milestone = ctx
        .daily_config()
        .milestones
        .into_iter()
        .find(|m| *m > preview.current_streak)
        .map_or_else(
            || "—".to_string(),
            |m| format!("{m} days ({})", milestone_title(m)),
        );

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let last = streak
        .last_completed_date
        .map_or_else(|| "never".to_string(), |d| d.to_string());
    let grace = if preview.grace_period_used {
        "used"
    } else {
        "available"
    };
    let rows = [
        ("Status", state),
        ("Current streak", preview.current_streak.to_string()),
        ("Longest streak", preview.longest_streak.to_string()),
        ("Total completions", streak.total_completions.to_string()),
        ("Last completed", last),
        ("Grace period", grace.to_string()),
        ("Next milestone", next_milestone),
    ];
    for (label, value) in rows {
        table.add_row(vec![label.to_string(), value]);
    }

    println!("{table}");
    match transition {
        StreakTransition::CompletedToday => {
            println!("  {}", "Today's challenge is done.".green());
        }
        StreakTransition::GracePending => println!(
            "  {}",
            "You missed a day. Complete today's challenge to keep your streak.".yellow()
        ),
        _ => println!("  {}", "Today's challenge is waiting: latinum daily".dimmed()),
    }
    Ok(())
}
