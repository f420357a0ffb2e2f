use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::simulation::{GameStatus, Maze, MazeAgent, StepOutcome, World};

/// One-line status summary shown above the maze panels.
///
/// `last` is the outcome of the most recent move; a hunger death is called
/// out until the next move replaces it.
#[must_use]
pub fn hud_line(maze: &Maze, agent: &MazeAgent, last: StepOutcome, paused: bool) -> String {
    let goal = agent
        .current_goal()
        .map_or_else(|| "idle".to_string(), |g| format!("{} {}", g.kind, g.target));
    let exit = if maze.is_exit_unlocked() { "open" } else { "locked" };
    let lives = "♥".repeat(maze.lives() as usize);
    let state = match (maze.status(), paused) {
        (GameStatus::Won, _) => " | WON",
        (GameStatus::Lost, _) => " | GAME OVER",
        (GameStatus::Running, true) => " | PAUSED",
        (GameStatus::Running, false) => "",
    };
    let note = if last.starved { " | Starved: eat everything first" } else { "" };
    format!(
        "Tick: {} | Lives: {} | Score: {} | Food: {}/{} | Exit: {} | Goal: {} | Route: {} | Planned: {}/{}{}{}",
        agent.ticks(),
        lives,
        maze.score(),
        maze.foods_left(),
        maze.total_food(),
        exit,
        goal,
        agent.waypoints().count(),
        agent.foods_planned(),
        agent.food_quota(),
        state,
        note,
    )
}

pub fn draw_ui(f: &mut Frame, world_lines: Vec<String>, belief_lines: Vec<String>, hud_info: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // HUD
            Constraint::Min(0),    // Panels
        ])
        .split(f.area());

    let hud = Paragraph::new(Span::styled(
        hud_info,
        Style::default().add_modifier(Modifier::REVERSED),
    ));
    f.render_widget(hud, chunks[0]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    f.render_widget(panel(world_lines, " World "), panels[0]);
    f.render_widget(panel(belief_lines, " Belief "), panels[1]);
}

fn panel(lines: Vec<String>, title: &str) -> Paragraph<'_> {
    let text: Vec<Line> = lines.into_iter().map(|s| Line::from(Span::raw(s))).collect();
    Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(Color::White).bg(Color::Black))
}
