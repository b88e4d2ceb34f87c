use latinum_core::StatsRecord;

use super::Context;

pub fn favorite(ctx: &Context, number: u32) -> Result<(), String> {
    let corpus = ctx.load_corpus()?;
    if corpus.get(number).is_none() {
        return Err(format!("rule {number} is not in the corpus"));
    }
    let mut store = ctx.open_store()?;
    if StatsRecord::update(&mut store, |stats| stats.add_favorite(number)) {
        println!("  Rule #{number} added to favorites.");
    } else {
        println!("  Rule #{number} is already a favorite.");
    }
    super::check_achievements(&mut store);
    Ok(())
}

pub fn share(ctx: &Context) -> Result<(), String> {
    record(ctx, "Share recorded.", StatsRecord::add_share)
}

pub fn easter_egg(ctx: &Context) -> Result<(), String> {
    record(ctx, "Easter egg found!", StatsRecord::add_easter_egg)
}

pub fn theme(ctx: &Context) -> Result<(), String> {
    record(ctx, "Theme tried.", StatsRecord::add_theme_used)
}

fn record(ctx: &Context, message: &str, apply: fn(&mut StatsRecord)) -> Result<(), String> {
    let mut store = ctx.open_store()?;
    StatsRecord::update(&mut store, apply);
    println!("  {message}");
    super::check_achievements(&mut store);
    Ok(())
}
