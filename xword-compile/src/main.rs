use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use xword::YIsVowel;

#[derive(Parser, Debug)]
#[clap(name = "xword-compile", about = "A program to validate and (re)save a word dictionary.")]
struct Args {
    /// Input word list, one word (or `stem/suffix` record) per line.
    #[clap(short = 'i', long)]
    input: PathBuf,

    /// File to which the dictionary is written.
    #[clap(short = 'o', long)]
    output: PathBuf,

    /// Save using the morphological compression scheme instead of one word
    /// per line.
    #[clap(short = 'c', long)]
    compress: bool,

    /// Whether `y` counts as a vowel when classifying words for
    /// compression: `always`, `never`, or `both`.
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

    eprintln!("Loading dictionary...: {:?}", &args.input);
    let start = Instant::now();
    let dict = xword::Dictionary::load(BufReader::new(File::open(&args.input)?))?;
    eprintln!("{} seconds, {} words", start.elapsed().as_secs_f64(), dict.len());

    eprintln!("Writing dictionary...: {:?}", &args.output);
    let writer = BufWriter::new(File::create(&args.output)?);
    if args.compress {
        let conflicts = dict.save_compressed(writer, y_is_vowel)?;
        if conflicts > 0 {
            eprintln!(
                "Warning: {conflicts} word{} had an ambiguous morphological classification \
                 and were saved as plain plurals rather than guessed at.",
                if conflicts == 1 { "" } else { "s" }
            );
        }
    } else {
        dict.save_plain(writer)?;
    }

    Ok(())
}
