#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use maze_agent::config::{load_config, AppConfig};
use maze_agent::logging::{self, LogTarget};
use maze_agent::simulation::episode::{run_episode, tick, EpisodeEnd};
use maze_agent::simulation::{GameStatus, Maze, MazeAgent, Move, StepOutcome, World};
use maze_agent::ui::{
    field::{compute_belief_grid, compute_world_grid},
    render::{draw_ui, hud_line},
};

/// Autonomous maze agent: maps a partially observed maze, collects food and
/// heads for the exit.
#[derive(Parser, Debug)]
#[command(name = "maze_agent", version, about)]
struct Cli {
    /// Maze file (`X` wall, `o` food, `S` exit, `E` start). Defaults to a
    /// built-in 4x4 maze.
    #[arg(long, conflicts_with = "generate")]
    maze: Option<PathBuf>,

    /// Generate a random maze instead of loading one.
    #[arg(long, num_args = 3, value_names = ["ROWS", "COLS", "FOOD"])]
    generate: Option<Vec<usize>>,

    /// Seed for `--generate`. Random when omitted.
    #[arg(long, requires = "generate")]
    seed: Option<u64>,

    /// TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Food to plan for before heading to the exit. Defaults to the maze's
    /// food count.
    #[arg(long)]
    quota: Option<usize>,

    /// Milliseconds per tick in the terminal UI.
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Run without the terminal UI and print a summary.
    #[arg(long)]
    headless: bool,

    /// Tick cap for headless runs.
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Log file. Defaults to stderr when headless and to `maze_agent.log`
    /// under the terminal UI.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Start the terminal UI in manual mode (arrow keys drive the body).
    #[arg(long, conflicts_with = "headless")]
    manual: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_target = LogTarget::select(cli.log_file.as_deref(), cli.headless);
    logging::init(log_target).context("failed to initialise logging")?;

    let config = resolve_config(&cli)?;
    let mut maze = build_maze(&cli)?;
    let (rows, cols) = maze.dimensions();
    let quota = config.agent.resolve_quota(Some(maze.total_food()));
    let mut agent = MazeAgent::new(rows, cols, quota);
    info!(rows, cols, quota, food = maze.total_food(), "starting");

    if cli.headless {
        let summary = run_episode(&mut maze, &mut agent, config.max_ticks);
        let verdict = match summary.end {
            EpisodeEnd::Won => "won",
            EpisodeEnd::Lost => "lost",
            EpisodeEnd::Stalled => "stalled",
            EpisodeEnd::TickLimit => "hit tick limit",
        };
        println!(
            "{verdict} after {} ticks: {} steps, score {}, food left {}",
            summary.ticks, summary.steps, summary.score, summary.foods_left
        );
        return Ok(());
    }

    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let res = run_app(&mut terminal, &mut maze, &mut agent, tick_rate, cli.manual);

    // Restore Terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")
}

fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(quota) = cli.quota {
        config.agent.food_quota = Some(quota);
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_rate_ms = tick_ms;
    }
    if let Some(max_ticks) = cli.max_ticks {
        config.max_ticks = max_ticks;
    }
    config.validate()?;
    Ok(config)
}

fn build_maze(cli: &Cli) -> Result<Maze> {
    if let Some(dims) = &cli.generate {
        let &[rows, cols, food] = dims.as_slice() else {
            bail!("--generate takes ROWS COLS FOOD");
        };
        let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
        info!(seed, "generating maze");
        let mut rng = StdRng::seed_from_u64(seed);
        return Maze::generate(rows, cols, food, &mut rng).context("failed to generate maze");
    }

    match &cli.maze {
        Some(path) => Maze::load(path).with_context(|| format!("failed to load maze {}", path.display())),
        None => Ok(Maze::fallback()),
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    maze: &mut Maze,
    agent: &mut MazeAgent,
    tick_rate: Duration,
    mut manual: bool,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    let mut paused = false;
    let mut last = StepOutcome::default();
    loop {
        // 1. Update
        if last_tick.elapsed() >= tick_rate {
            if !manual && !paused && maze.status() == GameStatus::Running {
                last = tick(maze, agent);
            }
            last_tick = Instant::now();
        }

        // 2. Render
        terminal.draw(|f| {
            let route: Vec<_> = agent.waypoints().collect();
            let world = compute_world_grid(maze);
            let belief = compute_belief_grid(
                agent.knowledge(),
                maze.agent_position(),
                &route,
                maze.is_exit_unlocked(),
            );
            let mut hud = hud_line(maze, agent, last, paused);
            if manual {
                hud.push_str(" | MANUAL");
            }
            draw_ui(f, world, belief, &hud);
        })?;

        // 3. Input
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char(' ') => paused = !paused,
                    KeyCode::Char('m') => manual = !manual,
                    KeyCode::Char('r') => {
                        maze.reset();
                        agent.reset();
                        last = StepOutcome::default();
                    }
                    code if manual => {
                        if let Some(step) = arrow_move(code) {
                            last = maze.apply(step);
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}

const fn arrow_move(code: KeyCode) -> Option<Move> {
    match code {
        KeyCode::Up => Some(Move::UP),
        KeyCode::Down => Some(Move::DOWN),
        KeyCode::Left => Some(Move::LEFT),
        KeyCode::Right => Some(Move::RIGHT),
        _ => None,
    }
}
