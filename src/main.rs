use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use structopt::StructOpt;

use spell::{accuracy, AccumulationMode, Alphabet, Config, ConfusionTable, SpellingCorrector};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "channel-spell",
    about = "Noisy-channel spelling correction trained on a corpus and labeled misspellings."
)]
struct Args {
    /// Text corpus the word frequencies are counted from
    #[structopt(long, parse(from_os_str))]
    corpus: PathBuf,

    /// Labeled misspellings, one `correct: miss1, miss2*count` line per word
    #[structopt(long, parse(from_os_str))]
    spell_errors: PathBuf,

    /// Words to correct, one per line
    #[structopt(long, parse(from_os_str))]
    misspelled: PathBuf,

    /// Expected corrections, one per line, for reporting accuracy
    #[structopt(long, parse(from_os_str))]
    correct: Option<PathBuf>,

    /// JSON config file; flags below switch options on over it
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Add-one smoothing of the error model
    #[structopt(long)]
    smooth: bool,

    /// Turn confusion counts into rates against the corpus text
    #[structopt(long)]
    normalize: bool,

    /// Charge only the first differing edit of each training pair
    #[structopt(long)]
    first_difference: bool,

    /// Also try `?` when generating candidates
    #[structopt(long)]
    extended_alphabet: bool,

    /// Where corrections are written, one per line
    #[structopt(short, long, parse(from_os_str), default_value = "output.txt")]
    output: PathBuf,

    /// Directory to write the four confusion tables into
    #[structopt(long, parse(from_os_str))]
    print_confusions: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => Config::default(),
        };

        config.smoothing |= self.smooth;
        config.normalize |= self.normalize;
        config.extended_alphabet |= self.extended_alphabet;
        if self.first_difference {
            config.mode = AccumulationMode::FirstDifference;
        }
        Ok(config)
    }
}

fn read_words(path: &Path) -> anyhow::Result<Vec<String>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(text
        .lines()
        .map(|line| {
            line.chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_lowercase()
        })
        .collect())
}

fn write_confusions(dir: &Path, corrector: &SpellingCorrector) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let tables = corrector.model().confusion();
    let named: [(&str, &ConfusionTable); 4] = [
        ("insertion.txt", &tables.insertion),
        ("deletion.txt", &tables.deletion),
        ("substitution.txt", &tables.substitution),
        ("transpose.txt", &tables.transposition),
    ];

    let letters = Alphabet::letters();
    for (name, table) in named {
        let path = dir.join(name);
        fs::write(&path, table.grid(&letters).to_string())
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote {} ({} entries)", path.display(), table.len());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::from_args();
    let config = args.config()?;
    log::debug!("{:?}", config);

    let corrector = SpellingCorrector::from_files(&args.corpus, &args.spell_errors, &config)?;
    log::info!(
        "trained on {} words",
        corrector.model().frequency().len()
    );

    if let Some(dir) = &args.print_confusions {
        write_confusions(dir, &corrector)?;
    }

    let misspelled = read_words(&args.misspelled)?;
    let corrected: Vec<Option<String>> = misspelled
        .iter()
        .map(|word| {
            let correction = corrector.correction(word);
            if correction.is_none() {
                log::debug!("no correction for {:?}", word);
            }
            correction
        })
        .collect();

    let mut out = fs::File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for predict in &corrected {
        writeln!(out, "{}", predict.as_deref().unwrap_or(""))?;
    }
    log::info!("wrote {} corrections to {}", corrected.len(), args.output.display());

    if let Some(path) = &args.correct {
        let expected = read_words(path)?;
        println!("Accuracy is {:.2}", accuracy(&expected, &corrected));
    }

    Ok(())
}
