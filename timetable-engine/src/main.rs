use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use timetable_engine::domain::{DayType, DirectionId};
use timetable_engine::feed::{
    FeedRegistry, RouteDocument, StopPageDocument, convert_calendars, convert_route,
    convert_stop_visits,
};
use timetable_engine::schedule::{
    EngineConfig, MidnightRollover, RouteSchedule, Selection, StopBoard, Timetable,
    UnclassifiedServicePolicy, classify_services, format_service_time, longest_trips, stop_list,
};

#[derive(Parser)]
#[command(name = "timetable")]
#[command(about = "Print rider timetables from a route or stop document", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Append "(+1)" to times after midnight
    #[arg(long, global = true)]
    mark_next_day: bool,

    /// Fail on trips whose service has no calendar instead of dropping them
    #[arg(long, global = true)]
    reject_unclassified: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a route's trips for one day type and direction
    Route {
        /// Route document (JSON)
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// weekday, saturday or sunday (defaults to the first with service)
        #[arg(short, long)]
        day: Option<DayType>,

        /// Direction id, 0 or 1 (defaults to the first direction)
        #[arg(short = 'r', long)]
        direction: Option<i64>,

        #[arg(short, long, value_enum, default_value_t = View::Grid)]
        view: View,

        /// Feed registry (JSON) used to print page paths
        #[arg(long)]
        feeds: Option<PathBuf>,
    },
    /// Show scheduled arrivals at a stop
    Stop {
        /// Stop page document (JSON)
        #[arg(value_name = "FILE")]
        source: PathBuf,

        #[arg(short, long, default_value = "weekday")]
        day: DayType,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum View {
    /// One block per trip
    List,
    /// Aligned timetable grid
    Grid,
    /// Stops along each direction
    Stops,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::new(
        if cli.mark_next_day {
            MidnightRollover::MarkNextDay
        } else {
            MidnightRollover::Clock
        },
        if cli.reject_unclassified {
            UnclassifiedServicePolicy::Reject
        } else {
            UnclassifiedServicePolicy::Drop
        },
    );

    match cli.command {
        Commands::Route {
            source,
            day,
            direction,
            view,
            feeds,
        } => {
            let registry = match feeds {
                Some(path) => read_json::<FeedRegistry>(&path)?,
                None => FeedRegistry::new(),
            };
            run_route(&source, day, direction, view, &registry, &config)
        }
        Commands::Stop { source, day } => run_stop(&source, day, &config),
    }
}

fn run_route(
    source: &Path,
    day: Option<DayType>,
    direction: Option<i64>,
    view: View,
    registry: &FeedRegistry,
    config: &EngineConfig,
) -> Result<()> {
    let doc: RouteDocument = read_json(source)?;
    let route = convert_route(&doc.route);
    let calendars = convert_calendars(&doc.service_calendars);
    info!(
        route = %route.short_name,
        trips = route.trips.len(),
        skipped = route.skipped_trips,
        "loaded route"
    );

    let schedule = RouteSchedule::build(&route.trips, &calendars, config)?;
    let Some(initial) = schedule.default_selection() else {
        bail!("route {} has no scheduled trips", route.short_name);
    };
    let selection = Selection::new(
        day.unwrap_or(initial.day),
        match direction {
            Some(d) => DirectionId::new(d)?,
            None => initial.direction,
        },
    );

    match route.long_name.as_deref() {
        Some(long) => println!("Route {} {}", route.short_name, long),
        None => println!("Route {}", route.short_name),
    }
    if let Some(path) = route
        .feed_index
        .and_then(|f| registry.route_path(f, &route.short_name))
    {
        println!("{path}");
    }

    let days: Vec<_> = schedule.day_types().map(|d| d.to_string()).collect();
    println!("Service: {}", days.join(", "));
    for (dir, headsign) in schedule.directions() {
        println!("Direction {dir}: to {headsign}");
    }
    println!();

    let headsign = schedule.headsign(selection.direction).unwrap_or_default();
    println!("{} trips to {}", selection.day, headsign);

    match view {
        View::Stops => {
            let longest = longest_trips(&route.trips);
            let Some(trip) = longest.get(&selection.direction) else {
                bail!("no trips in direction {}", selection.direction);
            };
            let feed = route.feed_index.and_then(|f| registry.get(f));
            for st in stop_list(trip, false) {
                let marker = if st.timepoint { "*" } else { " " };
                match feed {
                    Some(feed) => println!("{marker} {} #{}", st.stop.name, feed.label(&st.stop)),
                    None => println!("{marker} {}", st.stop.name),
                }
            }
        }
        View::List | View::Grid => {
            if schedule.trips(selection).is_empty() {
                println!("No {} service in this direction.", selection.day);
                return Ok(());
            }
            let timetable = schedule.timetable(selection)?;
            match view {
                View::List => print_list(&timetable, config),
                _ => print_grid(&timetable, config),
            }
        }
    }

    Ok(())
}

fn print_list(timetable: &Timetable<'_>, config: &EngineConfig) {
    for row in &timetable.trips {
        println!();
        println!("to: {}  [{}]", row.trip.headsign, row.trip.id);
        for st in row.trip.timepoints() {
            println!(
                "  {:>10}  {}",
                format_service_time(st.arrival, config.midnight_rollover),
                st.stop.name
            );
        }
    }
}

fn print_grid(timetable: &Timetable<'_>, config: &EngineConfig) {
    let cells: Vec<Vec<String>> = timetable
        .trips
        .iter()
        .map(|row| {
            row.slots()
                .iter()
                .map(|slot| match slot {
                    Some(t) => format_service_time(*t, config.midnight_rollover),
                    None => "-".to_string(),
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = timetable
        .columns
        .iter()
        .map(|col| {
            cells
                .iter()
                .map(|r| r[col.position].len())
                .chain(std::iter::once(col.stop.name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<_> = timetable
        .columns
        .iter()
        .map(|col| format!("{:>w$}", col.stop.name, w = widths[col.position]))
        .collect();
    println!("{}", header.join(" | "));

    for row in &cells {
        let line: Vec<_> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell:>w$}", w = *w))
            .collect();
        println!("{}", line.join(" | "));
    }
}

fn run_stop(source: &Path, day: DayType, config: &EngineConfig) -> Result<()> {
    let doc: StopPageDocument = read_json(source)?;
    let visits = convert_stop_visits(&doc.times);
    let calendars = convert_calendars(&doc.service_calendars);
    let service_days = classify_services(&calendars)?;
    let board = StopBoard::build(&visits, &service_days, config.unclassified_services)?;

    println!("Scheduled stops here");
    for route in board.routes() {
        let on_day = route.on(day);
        println!();
        println!("Route {}: {} {} trips", route.route, on_day.len(), day);
        let times: Vec<_> = on_day
            .iter()
            .map(|v| format_service_time(v.arrival, config.midnight_rollover))
            .collect();
        for chunk in times.chunks(5) {
            println!("  {}", chunk.join("  "));
        }
    }

    Ok(())
}
