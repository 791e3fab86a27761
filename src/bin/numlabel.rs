use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::debug;
use numlabel::{
    Accuracy, NegativeStyle, NumberFormat, NumberFormatBuilder, PositiveStyle, ScaleCut, config,
};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "numlabel",
    version,
    about = "Format numbers as human-readable axis and legend labels"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Format values into labels (one per line, `NA` for missing).
    Format(FormatArgs),
    /// Print the accuracy that would be inferred for the values.
    Precision(InputArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PositiveArg {
    None,
    Plus,
    Space,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum NegativeArg {
    Hyphen,
    Minus,
    Parens,
}

impl From<PositiveArg> for PositiveStyle {
    fn from(a: PositiveArg) -> Self {
        match a {
            PositiveArg::None => PositiveStyle::None,
            PositiveArg::Plus => PositiveStyle::Plus,
            PositiveArg::Space => PositiveStyle::Space,
        }
    }
}

impl From<NegativeArg> for NegativeStyle {
    fn from(a: NegativeArg) -> Self {
        match a {
            NegativeArg::Hyphen => NegativeStyle::Hyphen,
            NegativeArg::Minus => NegativeStyle::Minus,
            NegativeArg::Parens => NegativeStyle::Parens,
        }
    }
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Values to format; `NA`/`NaN` are missing, `Inf`/`-Inf` are accepted.
    /// If omitted, values are read from --input or stdin (one per line).
    #[arg(allow_negative_numbers = true)]
    values: Vec<String>,
    /// CSV file to read values from.
    #[arg(long)]
    input: Option<PathBuf>,
    /// CSV column holding the values (header name). Defaults to the first column.
    #[arg(long, requires = "input")]
    column: Option<String>,
}

#[derive(Args, Debug)]
struct FormatArgs {
    #[command(flatten)]
    input: InputArgs,
    /// JSON configuration file; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Rounding accuracy (e.g. 0.01) or `auto`.
    #[arg(long)]
    accuracy: Option<String>,
    /// Multiplier applied before formatting.
    #[arg(long)]
    scale: Option<f64>,
    #[arg(long)]
    prefix: Option<String>,
    #[arg(long)]
    suffix: Option<String>,
    /// Thousands separator (default: a space).
    #[arg(long)]
    big_mark: Option<String>,
    /// Decimal separator (default: `.`).
    #[arg(long)]
    decimal_mark: Option<String>,
    /// Take separators from a locale (en, de, fr, es, it, pt, nl, …).
    #[arg(long)]
    locale: Option<String>,
    #[arg(long, value_enum)]
    style_positive: Option<PositiveArg>,
    #[arg(long, value_enum)]
    style_negative: Option<NegativeArg>,
    /// Magnitude suffixes: short, long or si:<unit>.
    #[arg(long)]
    cut: Option<String>,
    /// Put a space between the number and the short/long scale suffix.
    #[arg(long, default_value_t = false, requires = "cut")]
    space: bool,
    /// Pad numbers to a common width.
    #[arg(long, default_value_t = false)]
    no_trim: bool,
    /// Print a JSON array (null for missing) instead of lines.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn parse_value(s: &str) -> Result<f64> {
    let t = s.trim();
    match t.to_ascii_lowercase().as_str() {
        "" | "na" | "nan" | "null" => Ok(f64::NAN),
        "inf" | "+inf" | "infinity" => Ok(f64::INFINITY),
        "-inf" | "-infinity" => Ok(f64::NEG_INFINITY),
        _ => t
            .parse::<f64>()
            .with_context(|| format!("invalid number `{t}`")),
    }
}

fn read_csv(path: &Path, column: Option<&str>) -> Result<Vec<f64>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let idx = match column {
        Some(name) => rdr
            .headers()?
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| anyhow::anyhow!("column `{name}` not found in {}", path.display()))?,
        None => 0,
    };
    let mut out = Vec::new();
    for record in rdr.records() {
        let record = record?;
        out.push(parse_value(record.get(idx).unwrap_or(""))?);
    }
    Ok(out)
}

fn read_values(args: &InputArgs) -> Result<Vec<f64>> {
    if !args.values.is_empty() {
        return args.values.iter().map(|v| parse_value(v)).collect();
    }
    if let Some(path) = args.input.as_ref() {
        return read_csv(path, args.column.as_deref());
    }
    let stdin = io::stdin();
    let mut out = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        out.push(parse_value(&line)?);
    }
    Ok(out)
}

fn scale_cut_arg(name: &str, space: bool) -> Result<ScaleCut> {
    let cut = match (name.trim(), space) {
        ("short", true) => ScaleCut::short_scale(true),
        ("long", true) => ScaleCut::long_scale(true),
        (other, _) => other.parse()?,
    };
    Ok(cut)
}

fn build_format(args: &FormatArgs) -> Result<NumberFormat> {
    let mut builder: NumberFormatBuilder = match args.config.as_ref() {
        Some(path) => config::from_path(path)?.to_builder(),
        None => NumberFormat::builder(),
    };
    if let Some(a) = args.accuracy.as_deref() {
        builder = if a.eq_ignore_ascii_case("auto") {
            builder.accuracy(Accuracy::Auto)
        } else {
            builder.accuracy(a.parse::<f64>().context("invalid --accuracy")?)
        };
    }
    if let Some(s) = args.scale {
        builder = builder.scale(s);
    }
    if let Some(p) = args.prefix.as_ref() {
        builder = builder.prefix(p.as_str());
    }
    if let Some(s) = args.suffix.as_ref() {
        builder = builder.suffix(s.as_str());
    }
    if let Some(tag) = args.locale.as_deref() {
        builder = builder.locale(tag);
    }
    if let Some(m) = args.big_mark.as_ref() {
        builder = builder.big_mark(m.as_str());
    }
    if let Some(m) = args.decimal_mark.as_ref() {
        builder = builder.decimal_mark(m.as_str());
    }
    if let Some(p) = args.style_positive {
        builder = builder.style_positive(p.into());
    }
    if let Some(n) = args.style_negative {
        builder = builder.style_negative(n.into());
    }
    if let Some(cut) = args.cut.as_deref() {
        builder = builder.scale_cut(scale_cut_arg(cut, args.space)?);
    }
    if args.no_trim {
        builder = builder.trim(false);
    }
    Ok(builder.build()?)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Format(args) => cmd_format(args),
        Command::Precision(args) => cmd_precision(args),
    }
}

fn cmd_format(args: FormatArgs) -> Result<()> {
    let fmt = build_format(&args)?;
    let values = read_values(&args.input)?;
    debug!("formatting {} value(s) with {:?}", values.len(), fmt);
    let labels = fmt.format(&values);

    if args.json {
        println!("{}", serde_json::to_string(&labels)?);
    } else {
        for label in labels {
            println!("{}", label.as_deref().unwrap_or("NA"));
        }
    }
    Ok(())
}

fn cmd_precision(args: InputArgs) -> Result<()> {
    let values = read_values(&args)?;
    if values.is_empty() {
        bail!("no values given");
    }
    println!("{}", numlabel::precision(&values));
    Ok(())
}
