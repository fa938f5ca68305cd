use std::path::PathBuf;

use clap::Parser;
use panel_optimizer::types::deserialize_u32_from_number;
use panel_optimizer::{
    BoardSpec, Demand, Grain, OptimizeError, Rect, Solution, Solver, SortStrategy, Variant,
};
use serde::Deserialize;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "panel_optimizer",
    about = "Guillotine cutting-stock optimizer for rectangular panels"
)]
struct Cli {
    /// Raw board dimensions (WxH, e.g. 2800x2070)
    #[arg(long, required_unless_present = "job")]
    board: Option<String>,

    /// Panels as WxH:qty[:grain] (e.g. 1000x600:5 400x300:2:length)
    #[arg(long = "panels", num_args = 1..)]
    panels: Vec<String>,

    /// Trim margin removed from every board edge, in mm
    #[arg(long, default_value_t = 0)]
    trim: u32,

    /// Blade kerf width in mm
    #[arg(long, default_value_t = 0)]
    kerf: u32,

    /// Sort strategy: area, perimeter, width, height, or aspect
    #[arg(long, default_value = "area", value_parser = parse_sort)]
    sort: SortStrategy,

    /// Placement variant: first-fit, best-fit, two-phase, or lookahead
    #[arg(long, default_value = "two-phase", value_parser = parse_variant)]
    variant: Variant,

    /// Try every variant and sort, keep the fewest boards
    #[arg(long)]
    best: bool,

    /// Read the job from a JSON file instead of the flags above
    #[arg(
        long,
        conflicts_with_all = ["board", "panels", "trim", "kerf", "sort", "variant"]
    )]
    job: Option<PathBuf>,

    /// Print the solution as JSON
    #[arg(long)]
    json: bool,

    /// Log per-run details to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// JSON job file, e.g.
/// `{"board": {"w": 2800, "h": 2070}, "kerf": 3, "panels": [{"rect": {"w": 1000, "h": 600}, "qty": 5}]}`
#[derive(Deserialize)]
struct Job {
    board: Rect,
    #[serde(default, deserialize_with = "deserialize_u32_from_number")]
    trim: u32,
    #[serde(default, deserialize_with = "deserialize_u32_from_number")]
    kerf: u32,
    panels: Vec<Demand>,
    #[serde(default)]
    sort: SortStrategy,
    #[serde(default)]
    variant: Variant,
}

fn parse_sort(s: &str) -> Result<SortStrategy, String> {
    s.parse().map_err(|e: OptimizeError| e.to_string())
}

fn parse_variant(s: &str) -> Result<Variant, String> {
    s.parse().map_err(|e: OptimizeError| e.to_string())
}

fn parse_panel(s: &str) -> Result<Demand, OptimizeError> {
    let mut parts = s.split(':');
    let (Some(dims), Some(qty)) = (parts.next(), parts.next()) else {
        return Err(OptimizeError::Parse(format!(
            "invalid panel '{s}', expected WxH:qty[:grain]"
        )));
    };
    let rect = dims.parse::<Rect>()?;
    let qty = qty
        .parse::<u32>()
        .map_err(|_| OptimizeError::Parse(format!("invalid quantity in '{s}'")))?;
    if qty == 0 {
        return Err(OptimizeError::Parse(format!(
            "quantity must be non-zero in '{s}'"
        )));
    }
    let grain = parts.next().map_or(Ok(Grain::None), str::parse)?;
    if parts.next().is_some() {
        return Err(OptimizeError::Parse(format!(
            "invalid panel '{s}', expected WxH:qty[:grain]"
        )));
    }
    Ok(Demand::new(rect, qty, grain))
}

fn load_job(cli: &Cli) -> Result<Job, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.job {
        let text = std::fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&text)?);
    }

    let board = cli
        .board
        .as_deref()
        .ok_or_else(|| OptimizeError::Parse("missing --board".to_string()))?
        .parse::<Rect>()?;
    let panels = cli
        .panels
        .iter()
        .map(|p| parse_panel(p))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Job {
        board,
        trim: cli.trim,
        kerf: cli.kerf,
        panels,
        sort: cli.sort,
        variant: cli.variant,
    })
}

fn run(cli: &Cli) -> Result<Solution, Box<dyn std::error::Error>> {
    let job = load_job(cli)?;
    let demands = job
        .panels
        .into_iter()
        .enumerate()
        .map(|(id, d)| Demand { id, ..d })
        .collect();
    let spec = BoardSpec::from_stock(job.board, job.trim, job.kerf);
    tracing::info!(
        board = %job.board,
        usable = %spec.rect(),
        kerf = spec.kerf,
        "optimizing"
    );

    let solver = Solver::new(spec, demands)
        .with_variant(job.variant)
        .with_sort(job.sort);
    let solution = if cli.best {
        solver.solve_best()?
    } else {
        solver.solve()?
    };
    Ok(solution)
}

fn print_solution(solution: &Solution) {
    for (i, board) in solution.boards.iter().enumerate() {
        println!(
            "Board {} ({:.1}% used):",
            i + 1,
            board.utilization * 100.0
        );
        for p in &board.placements {
            let rot = if p.rotated { " [rotated]" } else { "" };
            println!("  #{} {} @ ({}, {}){}", p.id, p.rect, p.x, p.y, rot);
        }
        println!();
    }

    println!(
        "Summary: {} board{} used, {:.1}% waste ({}, {} sort)",
        solution.board_count(),
        if solution.board_count() == 1 { "" } else { "s" },
        solution.total_waste_percent(),
        solution.variant,
        solution.sort,
    );
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let solution = run(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if cli.json {
        match serde_json::to_string_pretty(&solution) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_solution(&solution);
    }
}
