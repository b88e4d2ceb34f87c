use comfy_table::{ContentArrangement, Table};

use latinum_daily::ChallengeHistory;

use super::Context;

pub fn run(ctx: &Context) -> Result<(), String> {
    let store = ctx.open_store()?;
    let history = ChallengeHistory::load(&store);

    if history.is_empty() {
        println!("  No challenges completed yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Date", "Type", "Score", "Questions", "Time left", "Finished"]);
    for entry in history.entries() {
        table.add_row(vec![
            entry.date.to_string(),
            entry.kind.to_string(),
            entry.score.to_string(),
            entry.questions.to_string(),
            format!("{}s", entry.time_left),
            if entry.completed { "yes" } else { "timed out" }.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} challenges", history.len());
    if let (Some(best), Some(average)) = (history.best(), history.average_score()) {
        println!("  Best: {} on {}, average: {average:.1}", best.score, best.date);
    }
    Ok(())
}
