use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use logic_tutor::parser::parse_formula;
use logic_tutor::quiz::find_distractor;
use logic_tutor::render::Notation;
use logic_tutor::table::TruthTable;

#[derive(Debug, Parser)]
#[command(author, version, about = "Print the truth table of a formula")]
struct Cli {
    /// Formula, e.g. "not (A or B) and C".
    #[arg(value_name = "FORMULA")]
    formula: String,

    /// Number of distractors to print.
    #[arg(long, value_name = "INT", default_value = "3")]
    distractors: usize,

    /// Random seed for distractors.
    #[arg(long, value_name = "INT", default_value = "42")]
    seed: u64,

    /// Tweaks tried per distractor.
    #[arg(long, value_name = "INT", default_value = "64")]
    max_attempts: usize,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    println!("args = {:?}", args);

    let formula = parse_formula(&args.formula)?;
    println!("text     = {}", formula);
    println!("latex    = {}", formula.to_latex());
    println!("symbolic = {}", formula.render(&Notation::SYMBOLIC));
    println!("inputs   = {:?}", formula.inputs());

    let table = TruthTable::from_formula(&formula)?;
    println!();
    print!("{}", table);
    println!();

    let canonical = table.synthesize();
    println!(
        "canonical = {} ({} term(s), matches: {})",
        canonical,
        table.term_count(),
        table.verify(&canonical)
    );

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    for i in 0..args.distractors {
        let distractor = find_distractor(&table, &formula, args.max_attempts, &mut rng);
        println!("distractor {} = {}", i + 1, distractor);
    }

    Ok(())
}
