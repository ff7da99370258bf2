mod play;

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use services::{Clock, JsonQuizSource, QuizLauncher};
use trivia_core::model::{Category, QuizId, TriviaRequest};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingQuiz,
    UnknownArg(String),
    UnknownSubcommand(String),
    InvalidNumber { flag: &'static str, raw: String },
    InvalidQuizId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingQuiz => write!(f, "no quiz file given (use --quiz or TRIVIA_QUIZ_FILE)"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownSubcommand(arg) => write!(f, "unknown subcommand: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidQuizId { raw } => write!(f, "invalid --quiz-id value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<u32, ArgsError> {
    let raw = require_value(args, flag)?;
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  trivia play    [--quiz <path>] [--quiz-id <uuid>] [--shuffle]");
    eprintln!("  trivia request --topic <text> [--category <id>] [--questions <n>] [--difficulty <0-100>]");
    eprintln!();
    eprintln!("Categories:");
    let ids: Vec<&str> = Category::ALL.iter().map(|c| c.id()).collect();
    eprintln!("  {}", ids.join(", "));
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRIVIA_QUIZ_FILE, TRIVIA_SHUFFLE, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Request,
}

impl Command {
    fn from_arg(arg: &str) -> Result<Self, ArgsError> {
        match arg {
            "play" => Ok(Self::Play),
            "request" => Ok(Self::Request),
            _ => Err(ArgsError::UnknownSubcommand(arg.to_string())),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct PlayArgs {
    quiz_file: PathBuf,
    quiz_id: Option<QuizId>,
    shuffle: bool,
}

impl PlayArgs {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env_file: Option<String>,
        env_shuffle: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut quiz_file = env_file.filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        let mut quiz_id = None;
        let mut shuffle = env_shuffle.is_some_and(|v| is_truthy(&v));

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--quiz" => quiz_file = Some(PathBuf::from(require_value(args, "--quiz")?)),
                "--quiz-id" => {
                    let raw = require_value(args, "--quiz-id")?;
                    let id = raw
                        .parse::<QuizId>()
                        .map_err(|_| ArgsError::InvalidQuizId { raw: raw.clone() })?;
                    quiz_id = Some(id);
                }
                "--shuffle" => shuffle = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            quiz_file: quiz_file.ok_or(ArgsError::MissingQuiz)?,
            quiz_id,
            shuffle,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[derive(Debug, PartialEq, Eq)]
struct RequestArgs {
    topic: String,
    category: Option<String>,
    questions: u32,
    difficulty: u32,
}

impl RequestArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            topic: String::new(),
            category: None,
            questions: TriviaRequest::DEFAULT_QUESTIONS,
            difficulty: TriviaRequest::DEFAULT_DIFFICULTY,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--topic" => parsed.topic = require_value(args, "--topic")?,
                "--category" => parsed.category = Some(require_value(args, "--category")?),
                "--questions" => parsed.questions = parse_number(args, "--questions")?,
                "--difficulty" => parsed.difficulty = parse_number(args, "--difficulty")?,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(parsed)
    }

    fn into_request(self) -> Result<TriviaRequest, trivia_core::Error> {
        let category = match self.category {
            Some(raw) => raw.parse::<Category>()?,
            None => Category::default(),
        };
        Ok(TriviaRequest::new(
            self.topic,
            category,
            self.questions,
            self.difficulty,
        )?)
    }
}

fn play(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let source = JsonQuizSource::from_path(&args.quiz_file)?;
    let launcher = QuizLauncher::new(Clock::system(), Arc::new(source))
        .with_shuffle_questions(args.shuffle);

    let mut svc = match args.quiz_id {
        Some(id) => launcher.start_session(id)?,
        None => launcher.start_first()?,
    };
    log::info!("playing quiz {}", svc.quiz_id());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    play::run(&mut svc, stdin.lock(), &mut stdout)?;

    if let Some(summary) = svc.summary() {
        log::info!(
            "attempt finished in {}s with {}%",
            summary.duration().num_seconds(),
            summary.score_percent()
        );
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);

    // `main` prints the error itself.
    let report = |e: ArgsError| {
        print_usage();
        e
    };

    let cmd = match argv.next().as_deref() {
        None | Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) => Command::from_arg(first).map_err(report)?,
    };

    match cmd {
        Command::Play => {
            let args = PlayArgs::parse(
                &mut argv,
                std::env::var("TRIVIA_QUIZ_FILE").ok(),
                std::env::var("TRIVIA_SHUFFLE").ok(),
            )
            .map_err(report)?;
            play(args)
        }
        Command::Request => {
            let request = RequestArgs::parse(&mut argv).map_err(report)?.into_request()?;
            println!("{}", serde_json::to_string_pretty(&request)?);
            Ok(())
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::model::RequestError;

    fn argv(items: &[&str]) -> std::vec::IntoIter<String> {
        items
            .iter()
            .map(|s| (*s).to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn play_flag_overrides_env_file() {
        let parsed = PlayArgs::parse(
            &mut argv(&["--quiz", "b.json"]),
            Some("a.json".into()),
            None,
        )
        .unwrap();
        assert_eq!(parsed.quiz_file, PathBuf::from("b.json"));
        assert!(!parsed.shuffle);
    }

    #[test]
    fn play_reads_env_fallbacks() {
        let parsed =
            PlayArgs::parse(&mut argv(&[]), Some("a.json".into()), Some("yes".into())).unwrap();
        assert_eq!(parsed.quiz_file, PathBuf::from("a.json"));
        assert!(parsed.shuffle);
    }

    #[test]
    fn play_without_quiz_is_an_error() {
        let err = PlayArgs::parse(&mut argv(&["--shuffle"]), None, None).unwrap_err();
        assert!(matches!(err, ArgsError::MissingQuiz));
    }

    #[test]
    fn play_rejects_bad_quiz_id() {
        let err = PlayArgs::parse(&mut argv(&["--quiz-id", "nope"]), Some("a.json".into()), None)
            .unwrap_err();
        assert!(matches!(err, ArgsError::InvalidQuizId { .. }));
    }

    #[test]
    fn request_defaults_and_overrides() {
        let args = RequestArgs::parse(&mut argv(&[
            "--topic",
            " Rivers ",
            "--category",
            "Geography",
            "--questions",
            "10",
        ]))
        .unwrap();
        let request = args.into_request().unwrap();
        assert_eq!(request.topic(), "Rivers");
        assert_eq!(request.category(), Category::Geography);
        assert_eq!(request.questions(), 10);
        assert_eq!(request.difficulty(), TriviaRequest::DEFAULT_DIFFICULTY);
    }

    #[test]
    fn request_validation_surfaces_form_messages() {
        let args = RequestArgs::parse(&mut argv(&["--topic", "x", "--questions", "21"])).unwrap();
        let err = args.into_request().unwrap_err();
        assert!(matches!(
            err,
            trivia_core::Error::Request(RequestError::TooManyQuestions)
        ));
        assert_eq!(err.to_string(), "Maximum 20 questions allowed");
    }

    #[test]
    fn request_rejects_non_numeric_counts() {
        let err = RequestArgs::parse(&mut argv(&["--difficulty", "hard"])).unwrap_err();
        assert!(matches!(err, ArgsError::InvalidNumber { flag: "--difficulty", .. }));
    }

    #[test]
    fn unknown_subcommand_carries_its_name() {
        let err = Command::from_arg("dance").unwrap_err();
        assert_eq!(err.to_string(), "unknown subcommand: dance");
        assert_eq!(Command::from_arg("play").unwrap(), Command::Play);
    }

    #[test]
    fn unknown_argument_is_reported() {
        let err = RequestArgs::parse(&mut argv(&["--colour"])).unwrap_err();
        assert_eq!(err.to_string(), "unknown argument: --colour");
    }
}
