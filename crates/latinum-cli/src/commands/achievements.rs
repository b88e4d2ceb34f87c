use comfy_table::{ContentArrangement, Table};

use latinum_achievements::{ACHIEVEMENTS, AchievementCategory, AchievementTracker};
use latinum_core::StatsSnapshot;

use super::Context;

pub fn run(ctx: &Context, category: Option<&str>) -> Result<(), String> {
    let category = match category {
        None | Some("all") => None,
        Some(name) => Some(
            name.parse::<AchievementCategory>()
                .map_err(|e| e.to_string())?,
        ),
    };

    let mut store = ctx.open_store()?;
    super::check_achievements(&mut store);
    let tracker = AchievementTracker::load(&store);
    let snapshot = StatsSnapshot::collect(&store);
    let rows = tracker.report(&snapshot, category);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Achievement", "Category", "Rarity", "Progress", ""]);
    for row in &rows {
        let a = row.achievement;
        table.add_row(vec![
            a.icon.to_string(),
            format!("{}\n{}", a.name, a.description),
            a.category.to_string(),
            a.rarity.to_string(),
            format!("{}%", row.percent),
            if row.unlocked { "unlocked" } else { "locked" }.to_string(),
        ]);
    }

    let progress = tracker.progress();
    println!("{table}");
    println!();
    println!(
        "  {}/{} unlocked ({}%), score {}",
        progress.unlocked_count(),
        ACHIEVEMENTS.len(),
        progress.completion_percent(),
        progress.total_score
    );
    Ok(())
}
