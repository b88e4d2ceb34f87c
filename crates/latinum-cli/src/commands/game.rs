use colored::Colorize;

use latinum_core::GameRecord;

use super::Context;

pub fn run(ctx: &Context, name: &str, score: Option<u32>) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("game name must not be empty".into());
    }

    let mut store = ctx.open_store()?;
    let mut games = GameRecord::load(&store);
    games.record_game_played();
    println!("  {name}: game #{} played.", games.games_played);
    if let Some(score) = score {
        if games.record_score(name, score) {
            println!("  {} {score}", "New high score!".yellow().bold());
        } else {
            let best = games.high_scores.get(name).copied().unwrap_or(0);
            println!("  Score {score} (best: {best})");
        }
    }
    games.save(&mut store);

    super::check_achievements(&mut store);
    Ok(())
}
