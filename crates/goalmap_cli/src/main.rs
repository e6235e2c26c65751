//! Terminal front end for goalmap.
//!
//! # Responsibility
//! - Drive a mind-map session and the goal list from line commands.
//! - Act as the presentation adapter: print node/edge updates as text.

mod terminal;

use goalmap_core::db::open_db;
use goalmap_core::{
    default_node_position, init_logging, AppConfig, CannedLabel, ConfirmGate, Goal, GoalFilter,
    GoalId, GoalService, GraphRenderer, GraphSession, LabelPrompt, NewGoalRequest, NodeId, Outcome,
    Position, RandomIds, SqliteKvRepository,
};
use log::{info, warn};
use std::error::Error;
use std::io::{Stdout, Write};
use std::process::ExitCode;
use terminal::{TerminalDialogs, TerminalPresentation};

type CliResult<T> = Result<T, Box<dyn Error>>;

const HELP: &str = "\
commands:
  add [title]                 add a node at the canvas center (prompts when no title)
  connect                     toggle connect mode
  down <node> <x> <y>         press on a node (#n index or uuid)
  move <x> <y>                move the pointer
  up | leave                  release the pointer
  clear                       clear the mind map (asks for confirmation)
  show                        redraw everything
  goal add <deadline_ms> <progress> <title>
  goal list [all|in-progress|completed]
  goal progress <goal> <value>
  goal due <day_start_ms>
  quit";

enum Flow {
    Continue,
    Quit,
}

struct App<'conn> {
    session: GraphSession<SqliteKvRepository<'conn>>,
    goals: GoalService<SqliteKvRepository<'conn>>,
    renderer: GraphRenderer<TerminalPresentation<Stdout>>,
    new_node_position: Position,
}

fn main() -> ExitCode {
    let config = AppConfig::from_env();
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("goalmap: logging disabled: {err}");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("goalmap: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig) -> CliResult<()> {
    let conn = open_db(&config.db_path)?;
    let mut app = App {
        session: GraphSession::open(SqliteKvRepository::try_new(&conn)?, Box::new(RandomIds))?,
        goals: GoalService::new(SqliteKvRepository::try_new(&conn)?, Box::new(RandomIds)),
        renderer: GraphRenderer::new(TerminalPresentation::new(std::io::stdout())),
        new_node_position: default_node_position(config.canvas_width, config.canvas_height),
    };
    let mut dialogs = TerminalDialogs::new(std::io::stdin().lock(), std::io::stdout());

    info!("event=cli_start module=cli status=ok db_path={}", config.db_path.display());
    println!("{HELP}");
    app.redraw();

    while let Some(line) = dialogs.read_line() {
        match app.execute(&line, &mut dialogs) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => {
                warn!("event=cli_command module=cli status=error error={err}");
                println!("error: {err}");
                // Memory stays authoritative; resync the view with it.
                app.redraw();
            }
        }
    }
    Ok(())
}

impl App<'_> {
    fn execute<D: LabelPrompt + ConfirmGate>(
        &mut self,
        line: &str,
        dialogs: &mut D,
    ) -> CliResult<Flow> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Ok(Flow::Continue);
        };

        let outcome = match command {
            "add" => {
                let title = line.trim_start()["add".len()..].trim();
                if title.is_empty() {
                    self.session.add_node(dialogs, self.new_node_position)?
                } else {
                    self.session
                        .add_node(&mut CannedLabel::answer(title), self.new_node_position)?
                }
            }
            "connect" => self.session.toggle_connect_mode(),
            "down" => {
                let node_id = self.resolve_node(parts.next())?;
                let pointer = parse_point(&mut parts)?;
                self.session.pointer_down(node_id, pointer)?
            }
            "move" => {
                let pointer = parse_point(&mut parts)?;
                self.session.pointer_move(pointer)
            }
            "up" => self.session.pointer_up()?,
            "leave" => self.session.pointer_leave()?,
            "clear" => self.session.clear_all(dialogs)?,
            "show" => {
                self.redraw();
                return Ok(Flow::Continue);
            }
            "goal" => {
                self.goal_command(&mut parts, line)?;
                return Ok(Flow::Continue);
            }
            "help" => {
                println!("{HELP}");
                return Ok(Flow::Continue);
            }
            "quit" | "exit" => return Ok(Flow::Quit),
            other => return Err(format!("unknown command `{other}`; try `help`").into()),
        };

        self.show(&outcome);
        Ok(Flow::Continue)
    }

    fn goal_command<'a>(
        &mut self,
        parts: &mut impl Iterator<Item = &'a str>,
        line: &str,
    ) -> CliResult<()> {
        match parts.next() {
            Some("add") => {
                let deadline_ms: i64 = parse_arg(parts.next(), "deadline_ms")?;
                let progress: i64 = parse_arg(parts.next(), "progress")?;
                let title = parts.collect::<Vec<_>>().join(" ");
                let goal = self.goals.create_goal(&NewGoalRequest {
                    title,
                    description: String::new(),
                    deadline_ms,
                    progress,
                })?;
                print_goals(&[goal]);
            }
            Some("list") | None => {
                let filter = match parts.next() {
                    Some(raw) => GoalFilter::parse(raw)
                        .ok_or_else(|| format!("unknown goal filter `{raw}`"))?,
                    None => GoalFilter::All,
                };
                print_goals(&self.goals.list_goals(filter)?);
            }
            Some("progress") => {
                let target = parts.next().ok_or("missing goal reference")?;
                let progress: i64 = parse_arg(parts.next(), "value")?;
                let id: GoalId = match target.strip_prefix('#') {
                    Some(index) => {
                        let index: usize = index.parse()?;
                        self.goals
                            .list_goals(GoalFilter::All)?
                            .get(index.wrapping_sub(1))
                            .map(|goal| goal.id)
                            .ok_or_else(|| format!("no goal at #{index}"))?
                    }
                    None => target.parse()?,
                };
                print_goals(&[self.goals.update_progress(id, progress)?]);
            }
            Some("due") => {
                let day_start_ms: i64 = parse_arg(parts.next(), "day_start_ms")?;
                print_goals(&self.goals.goals_due_on(day_start_ms)?);
            }
            Some(other) => {
                return Err(format!("unknown goal command `{other}` in `{}`", line.trim()).into())
            }
        }
        Ok(())
    }

    /// `#n` picks the n-th node in z-order; anything else must be a uuid.
    fn resolve_node(&self, reference: Option<&str>) -> CliResult<NodeId> {
        let reference = reference.ok_or("missing node reference")?;
        match reference.strip_prefix('#') {
            Some(index) => {
                let index: usize = index.parse()?;
                self.session
                    .model()
                    .nodes()
                    .get(index.wrapping_sub(1))
                    .map(|node| node.id)
                    .ok_or_else(|| format!("no node at #{index}").into())
            }
            None => Ok(NodeId::parse_str(reference)?),
        }
    }

    fn show(&mut self, outcome: &Outcome) {
        self.renderer.apply(self.session.model(), self.session.state(), outcome);
        let _ = std::io::stdout().flush();
    }

    fn redraw(&mut self) {
        self.renderer.render_all(self.session.model(), self.session.state());
        for (index, node) in self.session.model().nodes().iter().enumerate() {
            println!("  #{} {}", index + 1, node.title);
        }
    }
}

fn parse_point<'a>(parts: &mut impl Iterator<Item = &'a str>) -> CliResult<Position> {
    let x: f64 = parse_arg(parts.next(), "x")?;
    let y: f64 = parse_arg(parts.next(), "y")?;
    let point = Position::new(x, y);
    if !point.is_finite() {
        return Err(format!("coordinates must be finite numbers, got `{x} {y}`").into());
    }
    Ok(point)
}

fn parse_arg<T>(raw: Option<&str>, name: &str) -> CliResult<T>
where
    T: std::str::FromStr,
    T::Err: Error + 'static,
{
    let raw = raw.ok_or_else(|| format!("missing argument `{name}`"))?;
    Ok(raw.parse::<T>()?)
}

fn print_goals(goals: &[Goal]) {
    if goals.is_empty() {
        println!("no goals");
    }
    for (index, goal) in goals.iter().enumerate() {
        println!(
            "#{} {} [{}] {}% due {} {}",
            index + 1,
            goal.id,
            goal.status.as_str(),
            goal.progress,
            goal.deadline_ms,
            goal.title
        );
    }
}

#[cfg(test)]
mod tests {
    use super::parse_point;
    use goalmap_core::Position;

    #[test]
    fn parse_point_reads_two_numbers() {
        let mut parts = "15 12.5".split_whitespace();
        assert_eq!(parse_point(&mut parts).unwrap(), Position::new(15.0, 12.5));
    }

    #[test]
    fn parse_point_rejects_non_finite_values() {
        for raw in ["NaN 0", "0 inf", "-infinity 3"] {
            assert!(parse_point(&mut raw.split_whitespace()).is_err(), "{raw}");
        }
        assert!(parse_point(&mut "7".split_whitespace()).is_err());
    }
}
