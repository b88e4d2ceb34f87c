use colored::Colorize;

use latinum_daily::{
    Challenge, ChallengeHistory, ChallengeRun, DailyEngine, DailyError, DailyOutlook, SECONDS_PER_BONUS_POINT,
    StreakTransition,
};

use super::{ConsoleSink, Context};

pub fn run(ctx: &Context, answers: Option<&[usize]>, time_left: u32) -> Result<(), String> {
    let corpus = ctx.load_corpus()?;
    let mut store = ctx.open_store()?;
    let engine = DailyEngine::new(&corpus, ctx.daily_config());

    let challenge = match engine.today(&mut store, ctx.date, &mut ConsoleSink) {
        DailyOutlook::CompletedToday { streak } => {
            if answers.is_some() {
                return Err(DailyError::AlreadyCompleted(ctx.date).to_string());
            }
            let history = ChallengeHistory::load(&store);
            if let Some(entry) = history.for_date(ctx.date) {
                println!(
                    "  Today's challenge is already completed with a score of {}.",
                    entry.score
                );
            } else {
                println!("  Today's challenge is already completed.");
            }
            println!(
                "  Streak: {} day(s). Come back tomorrow!",
                streak.current_streak
            );
            return Ok(());
        }
        DailyOutlook::OutOfOrder { last } => {
            return Err(DailyError::OutOfOrder {
                date: ctx.date,
                last,
            }
            .to_string());
        }
        DailyOutlook::Available {
            challenge,
            transition,
        } => {
            print_transition(transition);
            challenge
        }
    };

    print_header(&challenge);
    let Some(answers) = answers else {
        print_questions(&challenge);
        return Ok(());
    };

    let mut run = ChallengeRun::new(&challenge);
    for (i, &choice) in answers.iter().enumerate() {
        let Some(question) = run.current_question() else {
            println!("  {}", format!("ignoring {} extra answer(s)", answers.len() - i).dimmed());
            break;
        };
        let outcome = run
            .answer(choice)
            .map_err(|e| format!("question {}: {e}", i + 1))?;
        if outcome.correct {
            println!("  {} {}  +{}", "✓".green().bold(), question.prompt, outcome.points);
        } else {
            println!(
                "  {} {}  (answer: {})",
                "✗".red().bold(),
                question.prompt,
                question.correct_option()
            );
        }
    }

    let answered = run.answered();
    let correct = run.correct_count();
    let result = run.finish(time_left);
    println!();
    if result.completed {
        println!("  {} Score: {}", "Challenge complete!".bold(), result.score);
    } else {
        println!(
            "  {} after {answered} of {} questions. Score: {}",
            "Time's up".bold(),
            result.questions,
            result.score
        );
    }
    println!(
        "  {correct} correct, time bonus {}",
        result.time_left / SECONDS_PER_BONUS_POINT
    );

    let completion = engine
        .complete(&mut store, result, &mut ConsoleSink)
        .map_err(|e| e.to_string())?;
    println!("  Streak: {} day(s)", completion.streak);
    if completion.grace_consumed {
        println!("  {}", "Grace period used to keep your streak alive.".yellow());
    }

    super::check_achievements(&mut store);
    Ok(())
}

fn print_transition(transition: StreakTransition) {
    match transition {
        StreakTransition::GracePending => println!(
            "  {}",
            "You missed a day. Complete today's challenge to keep your streak (grace period)."
                .yellow()
        ),
        StreakTransition::GraceApplied => {
            println!("  {}", "You missed a day. Your grace period saved the streak.".yellow());
        }
        StreakTransition::Broken { lost } if lost > 0 => {
            println!("  {}", format!("Your {lost}-day streak has ended.").red());
        }
        _ => {}
    }
}

fn print_header(challenge: &Challenge) {
    println!();
    println!(
        "  {} {}",
        challenge.title.bold(),
        format!("({})", challenge.date).dimmed()
    );
    println!("  {}", challenge.description);
    println!(
        "  {} question(s), {}s, {} pts each",
        challenge.questions.len(),
        challenge.time_limit,
        challenge.points_per_question
    );
    if let Some(rule) = &challenge.featured_rule {
        println!("  Featured: Rule #{} \"{}\"", rule.number, rule.text);
    }
    println!();
}

fn print_questions(challenge: &Challenge) {
    for (i, question) in challenge.questions.iter().enumerate() {
        println!("  {}. {}", i + 1, question.prompt);
        for (j, option) in question.options.iter().enumerate() {
            println!("     [{j}] {option}");
        }
    }
    println!();
    println!(
        "  {}",
        "Answer with: latinum daily --answers 0,1,... --time-left SECONDS".dimmed()
    );
}
