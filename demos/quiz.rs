use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use logic_tutor::quiz::{PickFormula, QuizConfig, WriteFormula};

#[derive(Debug, Parser)]
#[command(author, version, about = "Generate quiz questions over random truth tables")]
struct Cli {
    /// Input names.
    #[arg(long, value_delimiter = ',', default_value = "A,B,C")]
    inputs: Vec<String>,

    /// Number of wrong choices.
    #[arg(long, value_name = "INT", default_value = "4")]
    distractors: usize,

    /// Tweaks tried per distractor.
    #[arg(long, value_name = "INT", default_value = "64")]
    max_attempts: usize,

    /// Random seed.
    #[arg(long, value_name = "INT", default_value = "42")]
    seed: u64,

    /// Answer to check against the "write the formula" question.
    #[arg(long, value_name = "FORMULA")]
    answer: Option<String>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    let config = QuizConfig::new(args.inputs)
        .with_distractors(args.distractors)
        .with_max_attempts(args.max_attempts);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    println!("== Write the formula");
    let question = WriteFormula::generate(&config, &mut rng)?;
    print!("{}", question.table());
    println!("model answer: {}", question.answer().to_latex());
    if let Some(answer) = &args.answer {
        match question.check(answer) {
            Ok(correct) => println!("{:?} is {}", answer, if correct { "correct" } else { "wrong" }),
            Err(e) => println!("{:?} is not a formula: {}", answer, e),
        }
    }

    println!();
    println!("== Pick the formula");
    let question = PickFormula::generate(&config, &mut rng)?;
    print!("{}", question.table());
    for (i, choice) in question.choices().iter().enumerate() {
        let mark = if question.check(i) { "*" } else { " " };
        println!("{} {}) {}", mark, i + 1, choice);
    }

    Ok(())
}
