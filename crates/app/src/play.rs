use std::io::{self, BufRead, Write};

use services::{QuestionView, QuizSessionService};
use trivia_core::session::{EditOutcome, OptionStatus, SubmitOutcome, Toggle};

/// One parsed line of the interactive loop.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Next,
    Previous,
    GoTo(usize),
    Select(String),
    Text(String),
    Reveal,
    Submit,
    Reset,
    Details,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(h, r)| (h, r.trim()));

        let cmd = match head {
            "n" | "next" => Command::Next,
            "p" | "prev" => Command::Previous,
            "g" | "goto" => Command::GoTo(rest.parse().ok()?),
            "s" | "select" if !rest.is_empty() => Command::Select(rest.to_string()),
            "t" | "type" if !rest.is_empty() => Command::Text(rest.to_string()),
            "r" | "reveal" => Command::Reveal,
            "submit" => Command::Submit,
            "reset" | "retake" => Command::Reset,
            "d" | "details" => Command::Details,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" => Command::Quit,
            _ => return None,
        };
        Some(cmd)
    }
}

const HELP: &str = "\
commands:
  n | p            next / previous question
  g <number>       go to question
  s <label>        press an option
  t <text>         type an answer
  r                show / hide answers
  submit           submit the quiz
  reset            retake the quiz
  d                show / hide detailed results
  q                quit";

/// Drive a session from line commands until `q` or end of input.
///
/// # Errors
///
/// Returns I/O errors from reading commands or writing output.
pub fn run<R: BufRead, W: Write>(
    svc: &mut QuizSessionService,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    if let Some(title) = svc.title() {
        writeln!(out, "== {title} ==")?;
    }
    render(svc, out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let Some(cmd) = Command::parse(&line) else {
            writeln!(out, "unknown command: {}", line.trim())?;
            continue;
        };
        if cmd == Command::Quit {
            break;
        }
        if cmd == Command::Help {
            writeln!(out, "{HELP}")?;
            continue;
        }
        apply(svc, cmd, out)?;
        render(svc, out)?;
    }
    Ok(())
}

fn apply<W: Write>(svc: &mut QuizSessionService, cmd: Command, out: &mut W) -> io::Result<()> {
    match cmd {
        Command::Next => {
            svc.next();
        }
        Command::Previous => {
            svc.previous();
        }
        Command::GoTo(number) => {
            if !svc.go_to_number(number) {
                writeln!(out, "no question {number}")?;
            }
        }
        Command::Select(label) => report_edit(svc.select(&label), out)?,
        Command::Text(text) => report_edit(svc.answer_text(&text), out)?,
        Command::Reveal => {
            svc.toggle_reveal();
        }
        Command::Submit => match svc.submit() {
            Ok(SubmitOutcome::Submitted(_)) => writeln!(out, "Quiz complete!")?,
            Ok(SubmitOutcome::Incomplete { unanswered }) => {
                writeln!(out, "answer every question first ({} left)", unanswered.len())?;
            }
            Ok(SubmitOutcome::AlreadyCompleted) => writeln!(out, "already submitted")?,
            Err(err) => writeln!(out, "submit failed: {err}")?,
        },
        Command::Reset => svc.reset(),
        Command::Details => {
            svc.toggle_details();
        }
        Command::Help | Command::Quit => {}
    }
    Ok(())
}

fn report_edit<W: Write>(outcome: EditOutcome, out: &mut W) -> io::Result<()> {
    let message = match outcome {
        EditOutcome::Toggled(Toggle::AtCapacity) => "deselect an option first",
        EditOutcome::Toggled(Toggle::UnknownOption) => "no such option",
        EditOutcome::Frozen => "answers are locked",
        EditOutcome::WrongKind => "this question takes a different kind of answer",
        EditOutcome::UnknownQuestion => "no question to answer",
        EditOutcome::Toggled(_) | EditOutcome::Stored => return Ok(()),
    };
    writeln!(out, "{message}")
}

fn render<W: Write>(svc: &QuizSessionService, out: &mut W) -> io::Result<()> {
    if let Some(result) = svc.result_view() {
        writeln!(out, "Score: {}", result.score_line)?;
        for row in &result.rows {
            let mark = if row.is_correct { "ok" } else { "x" };
            writeln!(out, "  Q{}: {} {mark}", row.number, row.prompt_preview)?;
        }
    }

    let Some(view) = svc.question_view() else {
        return writeln!(out, "No questions available");
    };
    render_question(&view, out)?;

    let pager = svc.pagination_view();
    if pager.visible {
        writeln!(out, "{} of {}", pager.counter, pager.total)?;
    }
    Ok(())
}

fn render_question<W: Write>(view: &QuestionView, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", view.prompt)?;
    if let Some(hint) = &view.hint {
        writeln!(out, "{hint}")?;
    }
    for option in &view.options {
        let badge = if option.is_own_pick { " YOU" } else { "" };
        writeln!(
            out,
            "  {} {}. {}{badge}",
            marker(option.status),
            option.label,
            option.text
        )?;
    }
    if let Some(response) = &view.response {
        writeln!(out, "  your answer: {response}")?;
    }
    if let Some(answer) = &view.correct_answer {
        writeln!(out, "Correct answer: {answer}")?;
    }
    if let Some(explanation) = view.explanation.as_deref().filter(|e| !e.is_empty()) {
        writeln!(out, "Explanation: {explanation}")?;
    }
    Ok(())
}

fn marker(status: OptionStatus) -> &'static str {
    match status {
        OptionStatus::Selected => "(*)",
        OptionStatus::Unselected | OptionStatus::Neutral => "( )",
        OptionStatus::SelectedCorrect => "[+]",
        OptionStatus::SelectedWrong => "[-]",
        OptionStatus::MissedCorrect => "[!]",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::Clock;
    use trivia_core::model::{QuestionDraft, QuestionOption, Quiz, QuizId};
    use trivia_core::time::fixed_now;

    fn service() -> QuizSessionService {
        let quiz = Quiz::new(
            QuizId::generate(),
            Some("Tiny".into()),
            vec![
                QuestionDraft::multiple_choice(
                    "2 + 2?",
                    vec![
                        QuestionOption::new("A", "3", false),
                        QuestionOption::new("B", "4", true),
                    ],
                ),
                QuestionDraft::multiple_choice(
                    "Even numbers?",
                    vec![
                        QuestionOption::new("A", "2", true),
                        QuestionOption::new("B", "3", false),
                        QuestionOption::new("C", "8", true),
                    ],
                ),
            ],
        )
        .unwrap();
        QuizSessionService::new(quiz, Clock::fixed(fixed_now()))
    }

    fn run_script(svc: &mut QuizSessionService, script: &str) -> String {
        let mut out = Vec::new();
        run(svc, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(Command::parse("g 3"), Some(Command::GoTo(3)));
        assert_eq!(Command::parse(" s  B "), Some(Command::Select("B".into())));
        assert_eq!(Command::parse("t New York"), Some(Command::Text("New York".into())));
        assert_eq!(Command::parse("g x"), None);
        assert_eq!(Command::parse("s"), None);
    }

    #[test]
    fn scripted_attempt_prints_score() {
        let mut svc = service();
        let output = run_script(&mut svc, "s B\nn\ns A\ns C\nsubmit\nq\n");

        assert!(output.contains("== Tiny =="));
        assert!(output.contains("Quiz complete!"));
        assert!(output.contains("Score: 2/2 (100%)"));
        assert!(svc.is_complete());
    }

    #[test]
    fn early_submit_is_refused() {
        let mut svc = service();
        let output = run_script(&mut svc, "submit\n");
        assert!(output.contains("answer every question first (2 left)"));
        assert!(!svc.is_complete());
    }

    #[test]
    fn over_cap_press_is_reported() {
        let mut svc = service();
        let output = run_script(&mut svc, "n\ns A\ns B\ns C\n");
        assert!(output.contains("deselect an option first"));
    }

    #[test]
    fn reveal_shows_badges_and_locks() {
        let mut svc = service();
        let output = run_script(&mut svc, "s A\nr\ns B\n");
        assert!(output.contains("[-] A. 3 YOU"));
        assert!(output.contains("[!] B. 4"));
        assert!(output.contains("answers are locked"));
    }

    #[test]
    fn unknown_command_keeps_going() {
        let mut svc = service();
        let output = run_script(&mut svc, "dance\nn\n");
        assert!(output.contains("unknown command: dance"));
        assert_eq!(svc.session().current_index(), 1);
    }
}
