use std::sync::Arc;

use services::{Clock, JsonQuizSource, QuizLauncher, QuizSource};
use trivia_core::session::{EditOutcome, OptionStatus, SubmitOutcome, Toggle};
use trivia_core::time::fixed_now;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/space_quiz.json");

fn launcher() -> QuizLauncher {
    let source = JsonQuizSource::from_path(FIXTURE).expect("fixture loads");
    QuizLauncher::new(Clock::fixed(fixed_now()), Arc::new(source))
}

#[test]
fn full_attempt_scores_and_resets() {
    let mut svc = launcher().start_first().unwrap();
    assert_eq!(svc.title(), Some("Space basics"));

    assert_eq!(svc.select("A"), EditOutcome::Toggled(Toggle::Replaced));
    svc.next();
    assert_eq!(svc.select("B"), EditOutcome::Toggled(Toggle::Added));
    assert_eq!(svc.select("C"), EditOutcome::Toggled(Toggle::Added));
    assert_eq!(svc.select("D"), EditOutcome::Toggled(Toggle::AtCapacity));
    svc.next();
    svc.select("A");

    let SubmitOutcome::Submitted(result) = svc.submit().unwrap() else {
        panic!("quiz should submit once every question is answered");
    };
    assert_eq!(result.total_correct, 2);
    assert_eq!(result.score_percent, 67);
    assert_eq!(svc.result_view().unwrap().score_line, "2/3 (67%)");

    svc.reset();
    assert!(svc.session().answers().is_empty());
    assert!(!svc.is_complete());
    assert_eq!(svc.session().current_index(), 0);
}

#[test]
fn revealing_freezes_answers_and_marks_options() {
    let mut svc = launcher().start_first().unwrap();
    svc.select("B");
    svc.toggle_reveal();

    assert_eq!(svc.select("A"), EditOutcome::Frozen);

    let view = svc.question_view().unwrap();
    let statuses: Vec<_> = view.options.iter().map(|o| o.status).collect();
    assert_eq!(
        statuses,
        vec![
            OptionStatus::MissedCorrect,
            OptionStatus::SelectedWrong,
            OptionStatus::Neutral,
            OptionStatus::Neutral,
        ]
    );
    assert!(view.explanation.unwrap().contains("Iron oxide"));
}

#[test]
fn submitted_answers_cannot_change() {
    let mut svc = launcher().start_first().unwrap();
    for label in ["A", "B", "D"] {
        svc.select(label);
        svc.next();
    }
    svc.go_to(1);
    svc.select("C");
    assert!(svc.can_submit());
    svc.submit().unwrap();

    let first = svc.session().questions()[0].id();
    let before = svc.session().answers().clone();
    assert_eq!(
        svc.set_selection(first, vec!["B".to_string()]),
        EditOutcome::Frozen
    );
    assert_eq!(svc.session().answers(), &before);
    assert_eq!(svc.summary().unwrap().score_percent(), 100);
}

#[test]
fn source_lists_fixture_quiz() {
    let source = JsonQuizSource::from_path(FIXTURE).unwrap();
    let items = source.list();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].question_count, 3);
    assert_eq!(
        items[0].id.to_string(),
        "3d0f6b8e-2c1a-4b7e-8f41-6a9c2d5e7b30"
    );
}
