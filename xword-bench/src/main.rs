mod timer;

use std::error::Error;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;

use xword::dance::{solve, CallbackResult};
use xword::{strip_dict, Dictionary, Grid, GridEncoder, YIsVowel};

use timer::Timer;

const RUNS: usize = 10;
const TRIALS: usize = 10;

#[derive(Parser, Debug)]
#[clap(name = "xword-bench", about = "A program to benchmark grid-filling speed.")]
struct Args {
    /// Grid file, in the text format of a row per line, a blank line (or
    /// EOF) ending the grid.
    #[clap(short = 'g', long)]
    grid: PathBuf,

    /// Dictionary file.
    #[clap(short = 'd', long)]
    dict: PathBuf,

    /// Use the all-cells slicing method instead of the default
    /// unknown-cells-only method.
    #[clap(long)]
    naive: bool,

    /// Whether `y` counts as a vowel: `always`, `never`, or `both`.
    #[clap(long, default_value = "always")]
    y_is_vowel: String,
}

fn parse_y_is_vowel(s: &str) -> Result<YIsVowel, Box<dyn Error>> {
    match s {
        "always" => Ok(YIsVowel::Always),
        "never" => Ok(YIsVowel::Never),
        "both" => Ok(YIsVowel::Both),
        other => Err(format!("--y-is-vowel must be always, never, or both (got {other:?})").into()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let y_is_vowel = parse_y_is_vowel(&args.y_is_vowel)?;

    let grid_text = fs::read_to_string(&args.grid)?;
    let grid = Grid::parse(&grid_text)?;

    let dict = Dictionary::load(BufReader::new(File::open(&args.dict)?))?;
    let stripped = strip_dict(&dict, &grid, true, y_is_vowel);

    let mut measure_build = |t: &mut Timer| {
        for _ in 0..RUNS {
            t.start();
            let encoder = GridEncoder::new(&grid, args.naive);
            let _ = encoder.build(&stripped, y_is_vowel).unwrap();
            t.stop();
        }
    };

    let mut measure_first_solution = |t: &mut Timer| {
        for _ in 0..RUNS {
            let encoder = GridEncoder::new(&grid, args.naive);
            let (mut matrix, placements) = encoder.build(&stripped, y_is_vowel).unwrap();
            t.start();
            solve(&mut matrix, &mut |rows| {
                let _ = encoder.fill_from_solution(&placements, rows);
                CallbackResult::Bail
            });
            t.stop();
        }
    };

    let run_trials = |t: &mut Timer, measure: &mut dyn FnMut(&mut Timer)| {
        t.reset();
        measure(t);
        println!("Warmup: {}", t.average());

        let (mut min, mut max, mut avg) = (0.0, 0.0, 0.0);
        for _ in 0..TRIALS {
            t.reset();
            measure(t);
            t.discard_min();
            t.discard_max();
            min += t.min();
            avg += t.average();
            max += t.max();
        }
        min /= TRIALS as f64;
        avg /= TRIALS as f64;
        max /= TRIALS as f64;
        println!("Elapsed_seconds: [{min},{avg},{max}]");
    };

    let mut t = Timer::new();

    println!("{} cells, {} words in stripped dictionary", grid.cells().len(), stripped.len());

    println!("-- matrix construction --");
    run_trials(&mut t, &mut measure_build);

    println!("-- time to first solution --");
    run_trials(&mut t, &mut measure_first_solution);

    Ok(())
}
