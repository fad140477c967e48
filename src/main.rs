use ansiplot::csv_reader::{self, CsvData};
use ansiplot::{histogram, Canvas, GridBackend, GridConfig, Palette};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Scatter,
    Line,
    Bar,
    Hbar,
    Histogram,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PaletteChoice {
    Pretty,
    Plain,
}

#[derive(Parser, Debug)]
#[command(name = "ansiplot")]
#[command(about = "Plot CSV columns from stdin as colored terminal text", long_about = None)]
struct Args {
    #[arg(short = 'x', long = "x", help = "X column (name or 0-based index); defaults to the row number")]
    x_column: Option<String>,

    #[arg(short = 'y', long = "y", required = true, help = "Y column (name or 0-based index); repeat for more series")]
    y_columns: Vec<String>,

    #[arg(short = 'k', long = "kind", value_enum, default_value_t = Kind::Scatter, help = "Chart type")]
    kind: Kind,

    #[arg(long = "width", default_value = "60", help = "Plot width in characters")]
    width: usize,

    #[arg(long = "height", default_value = "20", help = "Plot height in characters")]
    height: usize,

    #[arg(long = "bins", default_value = "10", help = "Number of histogram bins")]
    bins: usize,

    #[arg(long = "symbol", help = "Draw every series with this symbol instead of the palette")]
    symbol: Option<String>,

    #[arg(long = "no-legend", help = "Omit the legend")]
    no_legend: bool,

    #[arg(long = "colorless", help = "Strip ANSI escape codes from the output")]
    colorless: bool,

    #[arg(long = "palette", value_enum, default_value_t = PaletteChoice::Pretty, help = "Color and symbol palette")]
    palette: PaletteChoice,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let csv_data = csv_reader::read_csv(io::stdin().lock())
        .context("Failed to read CSV from stdin")?;

    let positions = extract_positions(&csv_data, args.x_column.as_deref())?;

    let mut series = Vec::new();
    for column in &args.y_columns {
        let selector = csv_reader::parse_column_selector(column);
        let (name, values) = csv_reader::extract_column(&csv_data, selector)
            .with_context(|| format!("Failed to extract Y column '{}'", column))?;
        series.push((name, values));
    }

    let config = grid_config(&args, &positions, &series)?;
    info!(kind = ?args.kind, series = series.len(), rows = positions.len(), ?config, "plotting");

    let palette = Arc::new(match args.palette {
        PaletteChoice::Pretty => Palette::pretty(),
        PaletteChoice::Plain => Palette::plain(),
    });
    let backend = GridBackend::new(config).context("Invalid plot size")?;
    let mut canvas = Canvas::with_palette(backend, palette);
    let symbol = args.symbol.as_deref();

    for (name, values) in &series {
        let title = Some(name.as_str());
        match args.kind {
            Kind::Scatter => {
                canvas.scatter(&positions, values, title, symbol)?;
            }
            Kind::Line => {
                canvas.plot(&positions, values, title, symbol)?;
            }
            Kind::Bar | Kind::Hbar => {
                for (i, (&position, &value)) in positions.iter().zip(values).enumerate() {
                    // Every bar of a series shares the first bar's style and legend entry
                    if i > 0 && symbol.is_none() {
                        canvas.same();
                    }
                    let title = if i == 0 { title } else { None };
                    if args.kind == Kind::Bar {
                        canvas.bar(position, value, title, symbol)?;
                    } else {
                        canvas.hbar(value, position, title, symbol)?;
                    }
                }
            }
            Kind::Histogram => {
                canvas.histogram(values, args.bins, title, symbol)?;
            }
        }
    }

    canvas
        .show(!args.no_legend, args.colorless)
        .context("Failed to write plot to stdout")?;

    Ok(())
}

fn extract_positions(csv_data: &CsvData, x_column: Option<&str>) -> Result<Vec<f64>> {
    match x_column {
        Some(column) => {
            let selector = csv_reader::parse_column_selector(column);
            let (_, values) = csv_reader::extract_column(csv_data, selector)
                .context("Failed to extract X column")?;
            Ok(values)
        }
        None => Ok((0..csv_data.rows.len()).map(|i| i as f64).collect()),
    }
}

fn grid_config(args: &Args, positions: &[f64], series: &[(String, Vec<f64>)]) -> Result<GridConfig> {
    let all_values: Vec<f64> = series.iter().flat_map(|(_, v)| v.iter().copied()).collect();
    let config = GridConfig::new(args.width, args.height);

    let config = match args.kind {
        Kind::Scatter | Kind::Line => config.fit_x(positions, false).fit_y(&all_values, false),
        Kind::Bar => config.fit_x(positions, false).fit_y(&all_values, true),
        Kind::Hbar => config.fit_x(&all_values, true).fit_y(positions, false),
        Kind::Histogram => {
            let mut counts = Vec::new();
            for (_, values) in series {
                let bins = histogram::bins(values, args.bins).context("Invalid histogram")?;
                counts.extend(bins.iter().map(|b| b.count as f64));
            }
            config.fit_x(&all_values, false).fit_y(&counts, true)
        }
    };

    Ok(config)
}
