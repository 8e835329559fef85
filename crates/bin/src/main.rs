//! Regatlas CLI binary.
//!
//! Provides a command-line interface over the regional statistics engine.

use clap::{Args, Parser, Subcommand};
use regatlas::data::{DataTypeInfo, short_label};
use regatlas::legend::{MapReport, ValueTable, format_legend_number};
use regatlas::metrics::{BASE_YEAR, SectorClass};
use regatlas::{
    Atlas, Case, DataType, DeltaMode, DisplayMode, EntitySet, ExportFormat, Exporter,
    IndicatorKind, MapQuery,
};
use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "regatlas")]
#[command(about = "Regatlas: regional statistics for choropleth maps", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory with the indicator and CPI tables (overrides the config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Entity set: regions or districts
    #[arg(long, global = true, default_value = "regions")]
    set: EntitySet,

    #[command(subcommand)]
    command: Commands,
}

/// What a map layer shows.
#[derive(Args, Debug)]
struct LayerArgs {
    /// Data type: none, dominant_sector or an indicator id
    data_type: DataType,

    /// Displayed year (defaults to the latest configured year)
    #[arg(long)]
    year: Option<i32>,

    /// Comparison year
    #[arg(long)]
    compare: Option<i32>,

    /// Comparison mode: absolute or relative
    #[arg(long, default_value = "absolute")]
    mode: DeltaMode,

    /// Display mode: absolute or relative (share of total volume)
    #[arg(long, default_value = "absolute")]
    display: DisplayMode,

    /// Restate monetary values in this year's prices
    #[arg(long)]
    adjust_to: Option<i32>,
}

impl LayerArgs {
    fn query(&self, default_year: i32) -> MapQuery {
        let mut query = MapQuery::new(self.data_type.clone(), self.year.unwrap_or(default_year))
            .display(self.display);
        if let Some(year) = self.compare {
            query = query.compare(year, self.mode);
        }
        if let Some(year) = self.adjust_to {
            query = query.adjust_to(year);
        }
        query
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List selectable data types
    Indicators {
        /// Only data types of this case (eco, population, production)
        #[arg(long)]
        case: Option<Case>,
    },

    /// List analysis cases
    Cases,

    /// Show indicator values
    Values {
        /// Indicator id
        data_type: DataType,

        /// Year (defaults to the latest configured year)
        #[arg(long)]
        year: Option<i32>,

        /// Restate monetary values in this year's prices
        #[arg(long)]
        adjust_to: Option<i32>,

        /// Only the N largest values
        #[arg(long)]
        top: Option<usize>,

        /// Export format (csv, json, pretty)
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Write the export to a file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show shares of an indicator in total volume
    Share {
        /// Indicator id
        data_type: DataType,

        /// Year (defaults to the latest configured year)
        #[arg(long)]
        year: Option<i32>,

        /// Export format (csv, json, pretty)
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Write the export to a file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compare an indicator between two years
    Delta {
        /// Indicator id
        data_type: DataType,

        /// Current year (defaults to the latest configured year)
        #[arg(long)]
        year: Option<i32>,

        /// Comparison year
        #[arg(long)]
        compare: i32,

        /// Comparison mode: absolute or relative
        #[arg(long, default_value = "absolute")]
        mode: DeltaMode,

        /// Compare shares of total volume instead of raw values
        #[arg(long)]
        shares: bool,

        /// Export format (csv, json, pretty)
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Write the export to a file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show the dominant economic sector of every entity
    Dominant {
        /// Year (defaults to the latest configured year)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Cumulative price factor between two years
    Inflation {
        /// Entity name
        entity: String,

        /// Year of the observed prices
        #[arg(long)]
        from: i32,

        /// Year of the target prices
        #[arg(long, default_value_t = BASE_YEAR)]
        to: i32,
    },

    /// Yearly series of one entity
    Series {
        /// Indicator id
        data_type: DataType,

        /// Entity name
        entity: String,

        /// Restate monetary values in this year's prices
        #[arg(long, conflicts_with = "shares")]
        adjust_to: Option<i32>,

        /// Share of total volume instead of raw values (production sectors only)
        #[arg(long)]
        shares: bool,
    },

    /// Build the legend of a map layer
    Legend {
        #[command(flatten)]
        layer: LayerArgs,

        /// Include the layer values in a report
        #[arg(long)]
        report: bool,

        /// Export format (csv, json, pretty)
        #[arg(long, default_value = "pretty")]
        format: ExportFormat,

        /// Write the legend to a file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Attach layer values to the features of a GeoJSON file
    Annotate {
        /// GeoJSON FeatureCollection
        input: PathBuf,

        #[command(flatten)]
        layer: LayerArgs,

        /// Write the annotated GeoJSON to a file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let set = cli.set;

    if let Commands::Cases = cli.command {
        list_cases();
        return Ok(());
    }

    let mut config = regatlas::load_config(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let atlas = Atlas::load(config);
    let default_year = atlas.default_year();

    match cli.command {
        Commands::Cases => {}
        Commands::Indicators { case } => {
            list_data_types(&atlas.filtered_data_types(case));
        }
        Commands::Values {
            data_type,
            year,
            adjust_to,
            top,
            format,
            output,
        } => {
            let kind = indicator(&data_type)?;
            let year = year.unwrap_or(default_year);
            let mut values = atlas.get_value(kind, year, set);
            if let Some(target) = adjust_to.filter(|_| kind.is_monetary()) {
                values = atlas
                    .price_adjuster()
                    .adjust_values(&values, year, target, set);
            }

            if let Some(format) = format {
                let table = ValueTable::from_values(data_type.as_str(), year, &values);
                return emit(&table, format, output.as_deref());
            }

            print_header(&format!("{} ({} год)", data_type, year));
            if let Some(summary) = regatlas::metrics::summarize(&values) {
                println!("{}\n", summary);
            }
            match top {
                Some(n) => {
                    for ranked in regatlas::metrics::top_n(&values, n) {
                        println!(
                            "{:>3}. {:<45} {:>14}",
                            ranked.rank,
                            ranked.entity,
                            format_legend_number(ranked.value)
                        );
                    }
                }
                None => print_values(values.iter().map(|(e, v)| (e.as_str(), Some(*v)))),
            }
        }
        Commands::Share {
            data_type,
            year,
            format,
            output,
        } => {
            let kind = indicator(&data_type)?;
            let year = year.unwrap_or(default_year);
            let shares = atlas.relative_share(kind, year, set);

            if let Some(format) = format {
                let table = ValueTable::from_values(data_type.as_str(), year, &shares);
                return emit(&table, format, output.as_deref());
            }

            print_header(&format!("{}: доля в суммарном объеме, % ({} год)", data_type, year));
            print_values(shares.iter().map(|(e, v)| (e.as_str(), Some(*v))));
        }
        Commands::Delta {
            data_type,
            year,
            compare,
            mode,
            shares,
            format,
            output,
        } => {
            let kind = indicator(&data_type)?;
            let year = year.unwrap_or(default_year);
            let deltas = if shares {
                atlas.delta_on_shares(kind, year, compare, mode, set)
            } else {
                atlas.delta(kind, year, compare, mode, set)
            };

            if let Some(format) = format {
                return emit(&ValueTable::from_deltas(year, &deltas), format, output.as_deref());
            }

            print_header(&format!("{}: {} → {} ({})", data_type, compare, year, mode));
            print_values(deltas.iter().map(|(e, v)| (e.as_str(), *v)));
        }
        Commands::Dominant { year } => {
            let year = year.unwrap_or(default_year);
            let sectors = atlas.dominant_sector(year, set);

            print_header(&format!("Преобладающий сектор экономики ({} год)", year));
            for (entity, class) in &sectors {
                println!("  {:<45} {}", entity, class);
            }

            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for class in sectors.values() {
                *counts.entry(class.label()).or_default() += 1;
            }
            println!();
            for class in SectorClass::legend_classes()
                .into_iter()
                .chain([SectorClass::Undetermined])
            {
                let count = counts.get(class.label()).copied().unwrap_or(0);
                println!("  {:<25} {:3} ({})", class.label(), count, class.display_color());
            }
        }
        Commands::Inflation { entity, from, to } => {
            match atlas.try_cumulative_inflation(&entity, from, to, set) {
                Ok(factor) => println!("{}: {} → {}: {:.4}", entity, from, to, factor),
                Err(err) => println!(
                    "{}: {} → {}: 1.0000 (factor unavailable: {})",
                    entity, from, to, err
                ),
            }
            let years = atlas.price_adjuster().available_base_years(set);
            if let (Some(first), Some(last)) = (years.first(), years.last()) {
                println!("Base years: {}-{}", first, last);
            }
        }
        Commands::Series {
            data_type,
            entity,
            adjust_to,
            shares,
        } => {
            let kind = indicator(&data_type)?;
            let series = if shares {
                let series = atlas
                    .entity_share_series(kind, &entity, set)
                    .ok_or_else(|| format!("No share of total volume for {}", data_type))?;
                print_header(&format!("{}: {}, доля в суммарном объеме, %", data_type, entity));
                series
            } else {
                print_header(&format!("{}: {}", data_type, entity));
                atlas.entity_series(kind, &entity, set, adjust_to)
            };
            for point in series {
                let value = point.value.map_or_else(|| "-".to_string(), format_legend_number);
                println!("  {:<6} {:>14}", point.year, value);
            }
        }
        Commands::Legend {
            layer,
            report,
            format,
            output,
        } => {
            let query = layer.query(default_year);
            let legend = atlas.build_legend(&query.legend_request(set));
            tracing::debug!(title = %legend.title, classes = legend.classes.len(), "legend built");

            if report {
                let values = atlas.layer_table(&query, set);
                let report = MapReport::new(legend, values);
                emit(&report, format, output.as_deref())?;
            } else {
                emit(&legend, format, output.as_deref())?;
            }
        }
        Commands::Annotate {
            input,
            layer,
            output,
        } => {
            let query = layer.query(default_year);
            let mut geojson: serde_json::Value =
                serde_json::from_str(&std::fs::read_to_string(&input)?)?;
            let count = atlas.annotate_features(&mut geojson, &query, set)?;
            tracing::info!(features = count, input = %input.display(), "annotated GeoJSON");

            let content = serde_json::to_string(&geojson)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Wrote {} features to {}", count, path.display());
                }
                None => println!("{}", content),
            }
        }
    }

    Ok(())
}

fn indicator(data_type: &DataType) -> Result<&IndicatorKind, Box<dyn Error>> {
    data_type
        .indicator()
        .ok_or_else(|| format!("Not an indicator: {}", data_type).into())
}

/// Values shown by a layer, or its deltas when it has a comparison.
fn emit<T: Exporter>(
    item: &T,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    match output {
        Some(path) => {
            item.export_to_file(path, format)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", item.export_to_string(format)?),
    }
    Ok(())
}

fn print_header(title: &str) {
    println!("\n{}", title);
    println!("{}\n", "━".repeat(title.chars().count().min(64)));
}

fn print_values<'a>(rows: impl Iterator<Item = (&'a str, Option<f64>)>) {
    for (entity, value) in rows {
        let value = value.map_or_else(|| "-".to_string(), format_legend_number);
        println!("  {:<45} {:>14}", entity, value);
    }
}

fn list_cases() {
    println!("Cases:");
    println!("======\n");

    for case in Case::all() {
        println!("{:<12} {}", case.id(), case.name());
        println!("{:<12} {}", "", case.description());
        let allowed: Vec<String> = case
            .allowed_data_types()
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("{:<12} {}\n", "", allowed.join(", "));
    }
}

fn list_data_types(types: &[DataTypeInfo]) {
    println!("Data types:");
    println!("===========\n");

    for info in types {
        println!(
            "  {:<25} {:<35} {}",
            info.data_type.as_str(),
            short_label(&info.label),
            info.description
        );
    }
}
