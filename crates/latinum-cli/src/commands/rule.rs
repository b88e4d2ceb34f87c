use colored::Colorize;

use latinum_core::{OracleConfig, RuleOracle, StatsRecord};

use super::{ConsoleSink, Context};

pub fn run(ctx: &Context, seed: Option<u64>, number: Option<u32>) -> Result<(), String> {
    let corpus = ctx.load_corpus()?;
    let mut store = ctx.open_store()?;

    let config = match seed {
        Some(seed) => OracleConfig::default().with_seed(seed),
        None => OracleConfig::default(),
    };
    let mut oracle = RuleOracle::new(&corpus, config);
    let rule = match number {
        Some(n) => oracle
            .lookup(n, &mut ConsoleSink)
            .ok_or_else(|| format!("rule {n} is not in the corpus"))?,
        None => oracle
            .consult(&mut ConsoleSink)
            .ok_or("the rule corpus is empty")?,
    };

    println!();
    println!("  {}", format!("Rule of Acquisition #{}", rule.number).bold());
    println!("  \"{}\"", rule.text);
    println!("  {}", rule.category.label().dimmed());

    StatsRecord::update(&mut store, |stats| stats.view_rule(rule.number));
    super::check_achievements(&mut store);
    Ok(())
}
