use clap::{Args, Parser, Subcommand, ValueEnum};
use hoailib::{
    error::{HoaiError, Result},
    formats::{csv::Csv, json::Json, text::Text},
    model::{
        Discipline, FeeCalculationInput, FeeTable, Zone, DEFAULT_INCIDENTAL_COSTS_PERCENT,
        DEFAULT_TAX_PERCENT,
    },
    money::{format_percent, parse_amount},
    phases::{parse_phase_selection, phase_percentage, selected_percentage, Phase},
    tables,
    traits::{ReadTable, WriteBreakdown, WriteTable},
    FeeInterpolator,
};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum TableFmt {
    Csv,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ReportFmt {
    Text,
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "hoai", version, about = "Honorarberechnung nach HOAI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Honorar für anrechenbare Kosten und Honorarzone berechnen
    Calc(CalcArgs),
    /// Mitgelieferte Honorartafel exportieren
    Table(TableArgs),
    /// Leistungsphasen und ihre Anteile auflisten
    Phases {
        /// Fachbereich (gebaeude, innenraeume)
        #[arg(long, default_value = "gebaeude")]
        discipline: String,
    },
}

#[derive(Args, Debug)]
struct CalcArgs {
    /// Anrechenbare Kosten, z. B. 500000 oder 500.000,00
    #[arg(short = 'k', long = "cost")]
    cost: String,

    /// Honorarzone I bis V
    #[arg(short = 'z', long = "zone")]
    zone: String,

    /// Fachbereich (gebaeude, innenraeume)
    #[arg(long, default_value = "gebaeude")]
    discipline: String,

    /// Beauftragte Leistungsphasen, z. B. 1-9 oder 1-4,6
    #[arg(long, default_value = "1-9", conflicts_with = "phase_percentage")]
    phases: String,

    /// Leistungsanteil in Prozent statt Phasenauswahl
    #[arg(long = "phase-percentage")]
    phase_percentage: Option<String>,

    /// Umbauzuschlag in Prozent
    #[arg(long, default_value = "0")]
    umbau: String,

    /// Instandhaltungszuschlag in Prozent
    #[arg(long, default_value = "0")]
    instandhaltung: String,

    /// Nebenkosten in Prozent (Vorgabe 5)
    #[arg(long)]
    nebenkosten: Option<String>,

    /// Mehrwertsteuer in Prozent (Vorgabe 19)
    #[arg(long)]
    mwst: Option<String>,

    /// Eigene Honorartafel statt der mitgelieferten
    #[arg(long = "table", env = "HOAI_TABLE")]
    table: Option<PathBuf>,

    /// Format der eigenen Tafel (sonst nach Dateiendung)
    #[arg(long = "table-format", value_enum)]
    table_format: Option<TableFmt>,

    /// Ausgabeformat
    #[arg(long = "format", value_enum, default_value = "text")]
    format: ReportFmt,

    /// Ausgabedatei (Vorgabe stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Fachbereich (gebaeude, innenraeume)
    #[arg(long, default_value = "gebaeude")]
    discipline: String,

    /// Ausgabeformat
    #[arg(long = "out-format", value_enum, default_value = "csv")]
    out_format: TableFmt,

    /// Ausgabedatei (Vorgabe stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_logging();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let (message, code) = report(&e);
            eprintln!("{message}");
            ExitCode::from(code)
        }
    }
}

/// Meldung und Exit-Code: 2 für falsche Eingaben, sonst 1.
fn report(err: &HoaiError) -> (String, u8) {
    match err {
        HoaiError::InvalidInput(detail) => {
            (format!("Bitte prüfen Sie die Eingabewerte: {detail}"), 2)
        }
        other => (format!("Fehler: {other}"), 1),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("HOAI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Calc(args) => calc(args),
        Command::Table(args) => export_table(args),
        Command::Phases { discipline } => list_phases(discipline.parse()?),
    }
}

fn calc(args: CalcArgs) -> Result<()> {
    let discipline: Discipline = args.discipline.parse()?;
    let zone: Zone = args.zone.parse()?;
    let cost = parse_amount(&args.cost)?;

    let phase_pct = match &args.phase_percentage {
        Some(p) => parse_amount(p)?,
        None => selected_percentage(discipline, &parse_phase_selection(&args.phases)?),
    };

    let input = FeeCalculationInput::new(discipline, cost, zone)
        .with_phase_percentage(phase_pct)
        .with_conversion_surcharge(parse_amount(&args.umbau)?)
        .with_maintenance_surcharge(parse_amount(&args.instandhaltung)?)
        .with_incidental_costs(optional_percent(&args.nebenkosten, DEFAULT_INCIDENTAL_COSTS_PERCENT)?)
        .with_tax(optional_percent(&args.mwst, DEFAULT_TAX_PERCENT)?);
    debug!(?input, "calculation input");

    let interpolator = match &args.table {
        Some(path) => FeeInterpolator::new(load_table(path, args.table_format)?),
        None => FeeInterpolator::for_discipline(discipline)?,
    };
    let result = interpolator.breakdown(&input)?;

    let mut writer = open_output(args.output.as_deref())?;
    match args.format {
        ReportFmt::Text => Text::write_breakdown(&mut writer, &input, &result),
        ReportFmt::Json => Json::write_breakdown(&mut writer, &input, &result),
        ReportFmt::Csv => Csv::write_breakdown(&mut writer, &input, &result),
    }?;
    writer.flush().map_err(HoaiError::from)
}

fn export_table(args: TableArgs) -> Result<()> {
    let table = tables::fee_table(args.discipline.parse()?)?;
    let mut writer = open_output(args.output.as_deref())?;
    match args.out_format {
        TableFmt::Csv => Csv::write(&mut writer, &table),
        TableFmt::Json => Json::write(&mut writer, &table),
    }?;
    writer.flush().map_err(HoaiError::from)
}

fn list_phases(discipline: Discipline) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{discipline}")?;
    for phase in Phase::ALL {
        let pct = phase_percentage(discipline, phase);
        writeln!(out, "  {:<44} {:>6}", phase.to_string(), format_percent(&pct))?;
    }
    let total = selected_percentage(discipline, &Phase::ALL);
    writeln!(out, "  {:<44} {:>6}", "Summe", format_percent(&total))?;
    Ok(())
}

fn optional_percent(value: &Option<String>, default: Decimal) -> Result<Decimal> {
    value.as_deref().map(parse_amount).transpose().map(|v| v.unwrap_or(default))
}

fn load_table(path: &Path, fmt: Option<TableFmt>) -> Result<FeeTable> {
    let fmt = fmt.unwrap_or_else(|| match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => TableFmt::Json,
        _ => TableFmt::Csv,
    });
    let br = BufReader::new(File::open(path)?);
    let table = match fmt {
        TableFmt::Csv => Csv::read(br),
        TableFmt::Json => Json::read(br),
    }?;
    debug!(path = %path.display(), "custom fee table in use");
    Ok(table)
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    })
}
