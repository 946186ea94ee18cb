use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use arbora::config::{BenchmarkConfig, Config};
use arbora::harness::{self, report, Benchmark, WordCount};
use arbora::logger::initialize_logger;
use arbora::{Result, StructureFactory};

#[derive(Parser, Debug)]
#[command(author, version, about = "Word frequency and structure benchmarks", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count word frequencies in a text file
    Count {
        /// Text file to read
        file: PathBuf,

        /// avl, rb, open or chained
        #[arg(short, long, default_value = "rb")]
        structure: String,

        /// Number of most frequent words to print
        #[arg(short, long, default_value_t = 10)]
        top: usize,

        /// Dump the structure layout after counting
        #[arg(long)]
        show: bool,
    },

    /// Run the insert/search/remove benchmark
    Bench {
        /// JSON benchmark configuration; environment variables otherwise
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the CSV output path
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print each operation's counters as it completes
        #[arg(short, long)]
        verbose: bool,

        /// Also print the results as JSON
        #[arg(long)]
        json: bool,
    },
}

fn count(file: PathBuf, structure: &str, top: usize, show: bool) -> Result<()> {
    let words = harness::read_words(&file)?;
    let factory = StructureFactory::<WordCount>::with_defaults()?;
    let mut counts = factory.create(structure)?;

    let distinct = harness::count_words(counts.as_mut(), &words)?;
    println!(
        "{}: {} words, {} distinct",
        counts.name(),
        words.len(),
        distinct
    );
    for (word, n) in harness::top_words(counts.as_ref(), top) {
        println!("{:>8}  {}", n, word);
    }
    if show {
        counts.show();
    }
    Ok(())
}

fn bench(config: Option<PathBuf>, csv: Option<PathBuf>, verbose: bool, json: bool) -> Result<()> {
    let mut config = match config {
        Some(path) => BenchmarkConfig::load_from_file(path)?,
        None => BenchmarkConfig::from_env()?,
    };
    if let Some(path) = csv {
        config.csv_path = path;
    }
    config.verbose |= verbose;

    println!("========================================");
    println!("    ADVANCED DATA STRUCTURES BENCHMARK");
    println!("========================================");

    let csv_path = config.csv_path.clone();
    let mut benchmark = Benchmark::new(config)?;
    let results = benchmark.run()?;

    println!();
    println!("========================================");
    println!("           PERFORMANCE SUMMARY");
    println!("========================================");
    print!("{}", report::summary_table(results));

    report::save_csv(results, &csv_path)?;
    println!("\nResults saved to {}", csv_path.display());

    if json {
        println!("{}", report::to_json(results)?);
    }
    Ok(())
}

fn main() -> ExitCode {
    initialize_logger();
    arbora::init();

    let args = Args::parse();
    let outcome = match args.command {
        Command::Count {
            file,
            structure,
            top,
            show,
        } => count(file, &structure, top, show),
        Command::Bench {
            config,
            csv,
            verbose,
            json,
        } => bench(config, csv, verbose, json),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{} error: {}", e.category(), e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
