use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use doomsday_core::model::{History, Weekday};
use services::{QuizLoopService, QuizSession, RevealView, RoundState, RoundView, TotalsView};

type Input = Lines<BufReader<Stdin>>;

enum Reply {
    Quit,
    Line(String),
}

async fn prompt(input: &mut Input, text: &str) -> std::io::Result<Reply> {
    println!("{text}");
    match input.next_line().await? {
        None => Ok(Reply::Quit),
        Some(line) if line.trim().eq_ignore_ascii_case("q") => Ok(Reply::Quit),
        Some(line) => Ok(Reply::Line(line)),
    }
}

/// Accepts `1`..`7` (Monday first) or a weekday name.
fn parse_guess(raw: &str) -> Option<u8> {
    let raw = raw.trim();
    if let Ok(number) = raw.parse::<u8>() {
        return number.checked_sub(1).filter(|index| *index < 7);
    }
    raw.parse::<Weekday>().ok().map(Weekday::index)
}

fn print_challenge(view: &RoundView) {
    println!();
    println!("What day of the week is... {}", view.challenge);
    for (i, label) in view.weekday_labels.iter().enumerate() {
        println!("  {}) {label}", i + 1);
    }
}

fn print_reveal(reveal: &RevealView) {
    if reveal.correct {
        println!("✅ Correct! {} was a {}.", reveal.challenge, reveal.answer);
    } else {
        println!("❌ Incorrect! The correct day was {}.", reveal.answer);
    }
    println!("And doomsday for {} was {}.", reveal.year, reveal.doomsday);
}

fn print_totals(totals: &TotalsView) {
    println!("Total answers: {}", totals.total_guesses);
    println!("Total correct answers: {}", totals.total_correct);
    println!("Current streak: {}", totals.current_streak);
}

/// Interactive quiz loop on stdin/stdout until the player quits or input ends.
pub async fn play(quiz: &QuizLoopService, mut session: QuizSession) -> std::io::Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    println!("Day of the Week Test (q to quit)");
    if session.is_detached() {
        println!("warning: saved answers could not be loaded; new answers are kept until they can be merged");
    }

    loop {
        match session.state() {
            RoundState::AwaitingGuess => {
                let view = RoundView::from_session(&session);
                print_challenge(&view);
                let Reply::Line(line) = prompt(&mut input, "Your guess:").await? else {
                    break;
                };
                let Some(index) = parse_guess(&line) else {
                    println!("Enter a number from 1 to 7 or a weekday name.");
                    continue;
                };
                let outcome = match quiz.submit_index(&mut session, index).await {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                print_reveal(&RevealView::from_result(&outcome.result));
                if let Some(err) = &outcome.save_error {
                    println!("warning: your answer was not saved ({err})");
                }
                print_totals(&TotalsView::from_history(session.history()));
            }
            RoundState::Resolved => {
                if let Reply::Quit = prompt(&mut input, "Press Enter for a new date.").await? {
                    break;
                }
                if let Err(err) = session.reset() {
                    println!("{err}");
                }
            }
        }
    }

    Ok(())
}

pub fn print_stats(history: &History) {
    let totals = TotalsView::from_history(history);
    print_totals(&totals);
    println!("Best streak: {}", totals.best_streak);
}

pub fn print_history(history: &History, limit: usize) {
    if history.is_empty() {
        println!("No answers recorded yet.");
        return;
    }
    for entry in history.recent(limit) {
        let mark = if entry.is_correct() { "✅" } else { "❌" };
        println!(
            "{}  {mark} {} (guessed {})",
            entry.timestamp().format("%Y-%m-%d %H:%M"),
            entry.date_label(),
            entry.guess()
        );
    }
}
