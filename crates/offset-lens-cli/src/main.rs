mod report;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use offset_lens_config::{Config, LineEndingPreference};
use offset_lens_engine::{
    Document, LineEnding, OffsetKind, Position, TextSource, io, parse_code_point, parse_offset,
    resolve,
};
use std::path::{Path, PathBuf};

use report::ReportNamer;

#[derive(Parser)]
#[command(name = "offset-lens")]
#[command(about = "Navigate text by line/column, character offset and UTF-8 byte offset")]
struct Cli {
    /// Line-ending style used for byte offsets, overriding detection
    #[arg(long, value_enum, global = true)]
    line_ending: Option<LineEndingArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Jump to a byte or character offset and show what is there
    Goto {
        file: PathBuf,

        #[command(flatten)]
        target: Target,

        /// Cursor that relative offsets (+N / -N) are measured from
        #[arg(long, value_name = "LINE:COL", value_parser = parse_position, default_value = "0:0")]
        from: Position,
    },
    /// Print a per-character report
    Inspect {
        file: PathBuf,

        /// Position of the first character reported
        #[arg(long, value_name = "LINE:COL", value_parser = parse_position, default_value = "0:0")]
        from: Position,

        /// Number of characters to report
        #[arg(long, default_value_t = 16)]
        count: usize,

        /// Also save the report to the configured report directory
        #[arg(long)]
        save: bool,
    },
    /// Show a code point and its encodings
    Codepoint {
        /// Decimal, 0x.., \u.., \x.. or U+..
        value: String,
    },
    /// Print the start offsets of every line
    Lines { file: PathBuf },
    /// Show the saved defaults, or change them
    ///
    /// A global --line-ending given here becomes the saved default.
    Config {
        /// Characters shown in a goto preview
        #[arg(long)]
        preview_chars: Option<usize>,

        /// Directory that inspect --save writes into
        #[arg(long)]
        report_dir: Option<PathBuf>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Target {
    /// UTF-8 byte offset, decimal or 0x hex; a leading sign makes it relative
    #[arg(long, allow_hyphen_values = true)]
    byte: Option<String>,

    /// Character offset, decimal or 0x hex; a leading sign makes it relative
    #[arg(long, allow_hyphen_values = true)]
    char: Option<String>,
}

impl Target {
    fn kind_and_value(&self) -> (OffsetKind, &str) {
        match (&self.byte, &self.char) {
            (Some(byte), _) => (OffsetKind::Byte, byte),
            (None, Some(chars)) => (OffsetKind::Char, chars),
            (None, None) => (OffsetKind::Byte, ""),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LineEndingArg {
    Auto,
    Lf,
    Crlf,
}

impl From<LineEndingArg> for LineEndingPreference {
    fn from(arg: LineEndingArg) -> Self {
        match arg {
            LineEndingArg::Auto => LineEndingPreference::Auto,
            LineEndingArg::Lf => LineEndingPreference::Lf,
            LineEndingArg::Crlf => LineEndingPreference::Crlf,
        }
    }
}

/// Parse `LINE:COL`, both zero-based.
fn parse_position(input: &str) -> Result<Position, String> {
    let (line, column) = input
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COL, got {input:?}"))?;
    let line = line
        .trim()
        .parse()
        .map_err(|_| format!("invalid line in {input:?}"))?;
    let column = column
        .trim()
        .parse()
        .map_err(|_| format!("invalid column in {input:?}"))?;
    Ok(Position::new(line, column))
}

fn open_document(path: &Path, preference: LineEndingPreference) -> Result<Document> {
    let doc = io::read_document(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let doc = match preference {
        LineEndingPreference::Auto => doc,
        LineEndingPreference::Lf => doc.with_line_ending(LineEnding::Lf),
        LineEndingPreference::Crlf => doc.with_line_ending(LineEnding::Crlf),
    };
    log::debug!("opened {} as {doc:?}", path.display());
    Ok(doc)
}

/// Apply requested changes to `config`. Returns whether anything changed.
fn update_config(
    config: &mut Config,
    line_ending: Option<LineEndingPreference>,
    preview_chars: Option<usize>,
    report_dir: Option<PathBuf>,
) -> bool {
    let before = config.clone();
    if let Some(line_ending) = line_ending {
        config.line_ending = line_ending;
    }
    if let Some(preview_chars) = preview_chars {
        config.preview_chars = preview_chars;
    }
    if let Some(report_dir) = report_dir {
        config.report_dir = Some(report_dir);
    }
    *config != before
}

fn describe_config(config: &Config) -> String {
    let report_dir = config
        .report_dir
        .as_ref()
        .map_or_else(|| "(working directory)".to_string(), |dir| dir.display().to_string());
    format!(
        "line_ending   {}\npreview_chars {}\nreport_dir    {report_dir}\n",
        config.line_ending.as_str(),
        config.preview_chars
    )
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let config = Config::load_or_default().unwrap_or_else(|e| {
        log::warn!("{e}; using default settings");
        Config::default()
    });
    let line_ending = cli
        .line_ending
        .map(LineEndingPreference::from)
        .unwrap_or(config.line_ending);

    match cli.command {
        Commands::Goto { file, target, from } => {
            let (kind, value) = target.kind_and_value();
            let offset = parse_offset(value)?;
            let doc = open_document(&file, line_ending)?;
            let selection = resolve(&doc, kind, offset, from);
            print!(
                "{}",
                report::describe_selection(&doc, selection, config.preview_chars)
            );
        }
        Commands::Inspect {
            file,
            from,
            count,
            save,
        } => {
            let doc = open_document(&file, line_ending)?;
            let rows = report::collect_rows(&doc, from, count);
            let text = report::render(&rows);
            print!("{text}");

            if save {
                let dir = config.report_dir.unwrap_or_else(|| PathBuf::from("."));
                let namer = ReportNamer::new(dir);
                let path = namer.next_path().with_context(|| {
                    format!("Failed to scan report directory {}", namer.dir().display())
                })?;
                io::write_file(&path, &text)
                    .with_context(|| format!("Failed to save report to {}", path.display()))?;
                log::info!("saved report to {}", path.display());
                eprintln!("Saved {}", path.display());
            }
        }
        Commands::Codepoint { value } => {
            let code_point = parse_code_point(&value)?;
            let ch = char::from_u32(code_point)
                .ok_or_else(|| anyhow!("U+{code_point:04X} is a surrogate, not a character"))?;
            print!("{}", report::describe_code_point(ch));
        }
        Commands::Lines { file } => {
            let doc = open_document(&file, line_ending)?;
            println!("line ending: {}", doc.line_ending());
            print!("{}", report::render_line_table(&doc));
        }
        Commands::Config {
            preview_chars,
            report_dir,
        } => {
            // Never overwrite a config file that failed to load
            let mut saved = Config::load_or_default()?;
            let requested = cli.line_ending.map(LineEndingPreference::from);
            if update_config(&mut saved, requested, preview_chars, report_dir) {
                let path = saved.save()?;
                log::info!("saved config to {}", path.display());
                eprintln!("Saved {}", path.display());
            }
            print!("{}", describe_config(&saved));
        }
    }

    Ok(())
}
