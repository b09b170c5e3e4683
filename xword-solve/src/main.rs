use std::error::Error;
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use xword::dance::{solve, CallbackResult, BAIL_SENTINEL};
use xword::{duplicate, strip_dict, Cell, Dictionary, Grid, GridEncoder, YIsVowel};

#[derive(Parser, Debug)]
#[clap(name = "xword-solve", about = "A program to fill a crossword grid from a word list.")]
struct Args {
    /// Grid file, in the text format of a row per line, a blank line (or
    /// EOF) ending the grid.
    #[clap(short = 'g', long)]
    grid: PathBuf,

    /// Dictionary file.
    #[clap(short = 'd', long)]
    dict: PathBuf,

    /// File to which solved grids are written (default: stdout).
    #[clap(short = 'o', long)]
    output: Option<PathBuf>,

    /// Stop after printing this many solutions.
    #[clap(short = 'n', long)]
    limit: Option<usize>,

    /// Allow a word to be reused across more than one entry in a single
    /// solution, instead of rejecting such solutions.
    #[clap(long)]
    allow_duplicates: bool,

    /// Use the all-cells slicing method instead of the default
    /// unknown-cells-only method.
    #[clap(long)]
    naive: bool,

    /// Whether `y` counts as a vowel: `always`, `never`, or `both`.
    #[clap(long, default_value = "always")]
    y_is_vowel: String,

    /// Print extra progress and timing information to stderr.
    #[clap(long)]
    debug: bool,
}

fn parse_y_is_vowel(s: &str) -> Result<YIsVowel, Box<dyn Error>> {
    match s {
        "always" => Ok(YIsVowel::Always),
        "never" => Ok(YIsVowel::Never),
        "both" => Ok(YIsVowel::Both),
        other => Err(format!("--y-is-vowel must be always, never, or both (got {other:?})").into()),
    }
}

/// Rebuilds a grid from a solver fill, for the post-solve duplicate check.
fn filled_grid(original: &Grid, fill: &[u8]) -> Grid {
    let cells = original
        .cells()
        .iter()
        .zip(fill)
        .map(|(c, &b)| if *c == Cell::Black { Cell::Black } else { Cell::Letter(b) })
        .collect();
    Grid::from_cells(original.width(), original.height(), cells).unwrap()
}

fn write_grid(writer: &mut dyn Write, grid: &Grid, fill: &[u8]) -> std::io::Result<()> {
    for row in 0..grid.height() {
        let start = row * grid.width();
        let line = std::str::from_utf8(&fill[start..start + grid.width()]).unwrap();
        writeln!(writer, "{line}")?;
    }
    writeln!(writer)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let y_is_vowel = parse_y_is_vowel(&args.y_is_vowel)?;

    let grid_text = fs::read_to_string(&args.grid)?;
    let grid = Grid::parse(&grid_text)?;

    eprintln!("Loading dictionary...: {:?}", &args.dict);
    let dict = Dictionary::load(BufReader::new(File::open(&args.dict)?))?;
    if args.debug {
        eprintln!("{} words loaded", dict.len());
    }

    let reject_duplicates = !args.allow_duplicates;
    let stripped = strip_dict(&dict, &grid, reject_duplicates, y_is_vowel);
    if args.debug {
        eprintln!("{} words remain after stripping against the grid", stripped.len());
    }

    let encoder = GridEncoder::new(&grid, args.naive);
    let start = Instant::now();
    let (mut matrix, placements) = encoder.build(&stripped, y_is_vowel)?;
    if args.debug {
        eprintln!(
            "Matrix built in {} seconds: {} columns, {} rows",
            start.elapsed().as_secs_f64(),
            matrix.num_columns(),
            matrix.num_rows(),
        );
    }

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(std::io::stdout()),
    };

    let mut printed = 0usize;
    let mut io_err = None;
    let solve_start = Instant::now();
    let total = solve(&mut matrix, &mut |rows| {
        let fill = encoder.fill_from_solution(&placements, rows);
        if !args.allow_duplicates && duplicate::has_duplicates(&filled_grid(&grid, &fill)) {
            return CallbackResult::Continue(0);
        }
        if let Err(e) = write_grid(&mut out, &grid, &fill) {
            io_err = Some(e);
            return CallbackResult::Bail;
        }
        printed += 1;
        match args.limit {
            Some(limit) if printed >= limit => CallbackResult::Bail,
            _ => CallbackResult::Continue(1),
        }
    });
    if let Some(e) = io_err {
        return Err(e.into());
    }

    if args.debug {
        eprintln!(
            "Solve finished in {} seconds (raw exact covers counted: {})",
            solve_start.elapsed().as_secs_f64(),
            if total == BAIL_SENTINEL { printed as i64 } else { total },
        );
    }
    eprintln!("{printed} grid(s) printed");

    Ok(())
}
