use comfy_table::{ContentArrangement, Table};

use latinum_core::{StatKey, StatsRecord, StatsSnapshot, THEME_COUNT};

use super::Context;

const SHOWN: [StatKey; 8] = [
    StatKey::RulesViewed,
    StatKey::Favorites,
    StatKey::Shares,
    StatKey::GamesPlayed,
    StatKey::HighScores,
    StatKey::MaxStreak,
    StatKey::EasterEggs,
    StatKey::ThemesUsed,
];

pub fn run(ctx: &Context) -> Result<(), String> {
    let store = ctx.open_store()?;
    let record = StatsRecord::load(&store);
    let snapshot = StatsSnapshot::collect(&store);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Statistic", "Value"]);
    table.add_row(vec!["total rule views".to_string(), record.total_views.to_string()]);
    for key in SHOWN {
        let value = match key {
            StatKey::ThemesUsed => format!("{}/{THEME_COUNT}", snapshot.get(key)),
            _ => snapshot.get(key).to_string(),
        };
        table.add_row(vec![key.label().to_string(), value]);
    }

    println!("{table}");
    if !record.favorites.is_empty() {
        let favorites: Vec<String> = record.favorites.iter().map(|n| format!("#{n}")).collect();
        println!("  Favorites: {}", favorites.join(", "));
    }
    Ok(())
}
