use crossterm::{
    event::{self, Event},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{layout::Layout, prelude::*, widgets::*};
use skirmish_core::prelude::*;
use skirmish_flow::StartFlow;
use std::{
    collections::HashSet,
    io::{self, stdout},
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tracing::{info, warn, Level};
use tracing_subscriber::{self};

mod widgets;
use widgets::*;

mod settings;
use settings::*;

mod input;
use input::*;

/// Everything the interface remembers between frames
#[derive(Debug, Default)]
struct InterfaceState {
    settings: Settings,
    cursor: Coord,
    log: MessageLog,
    glyphs: Option<GlyphRegistry>,
    queue_paused: bool,
    queue_delay: u32,
    show_help: bool,
}

pub fn game_main(flow: StartFlow) -> io::Result<()> {
    let settings = match flow {
        StartFlow::PrintConfig { settings } => {
            let config = settings.to_string_pretty().map_err(io::Error::other)?;
            println!("{}", config);
            return Ok(());
        }
        StartFlow::NewGame { settings } => settings,
    };

    setup_tracing();
    initialize_panic_handler();

    let mut game = Game::new(&settings).map_err(io::Error::other)?;
    info!(target: "tui", "new game {}x{} seed {:?}", settings.width, settings.height, settings.seed);

    let mut interface_state = InterfaceState {
        settings: Settings::from_disk().unwrap_or_else(|| {
            let defaults = Settings::default();
            if let Err(err) = defaults.to_disk() {
                warn!(target: "settings", "can't write default settings: {}", err);
            }
            defaults
        }),
        ..Default::default()
    };
    if let Some(unit) = game.current_unit() {
        interface_state.cursor = unit.at;
    }
    interface_state.log.push(format!(
        "{}'s turn",
        game.current_unit().map_or("Nobody", |u| u.kind.name())
    ));

    let mut terminal = init_terminal()?;

    // main loop
    let mut is_running = true;
    while is_running {
        let mut event_list = vec![];
        if event::poll(std::time::Duration::from_millis(50))? {
            if let Ok(event) = event::read() {
                event_list.push(event);
            }
        }

        input(&mut is_running, &event_list, &mut game, &mut interface_state);

        render(&mut terminal, &game, &mut interface_state)?;
    }

    restore_terminal()
}

fn get_data_dir() -> Option<PathBuf> {
    let mut path = dirs::data_dir()?;
    path.push("skirmish/");
    let _ = std::fs::create_dir_all(path.clone());
    Some(path)
}

fn get_data_dir_sub(sub: &str) -> Option<PathBuf> {
    let mut path = get_data_dir()?;
    path.push(format!("{}/", sub));
    let _ = std::fs::create_dir_all(path.clone());
    Some(path)
}

fn setup_tracing() {
    let Some(mut path) = get_data_dir_sub("traces") else {
        return;
    };

    let epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    path.push(format!("trace_{}.txt", epoch));

    let Ok(log_file) = std::fs::File::create(path.clone()) else {
        println!("Can't create trace file at {:?}", path);
        return;
    };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_writer(log_file)
        .with_max_level(Level::TRACE)
        .with_line_number(true)
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber)
        .map_err(|_err| eprintln!("Unable to set global default subscriber"));
}

fn initialize_panic_handler() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::execute!(std::io::stderr(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
        original_hook(panic_info);
    }));
}

fn init_terminal() -> io::Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

fn input(
    is_running: &mut bool,
    event_list: &[Event],
    game: &mut Game,
    ui_state: &mut InterfaceState,
) {
    let game_input = GameInput::from_events(&ui_state.settings.keybinds, event_list);

    if game_input.quit {
        *is_running = false;
        return;
    }

    ui_state.cursor = (ui_state.cursor + game_input.acc).clamp(Coord::ZERO, game.size() - Coord::ONE);

    if game_input.toggle_help {
        ui_state.show_help = !ui_state.show_help;
    }

    if game_input.toggle_pause_queue {
        ui_state.queue_paused = !ui_state.queue_paused;
    }

    if game.outcome().is_some() {
        return;
    }

    let Some(unit) = game.current_unit().cloned() else {
        return;
    };

    let command = match unit.controller {
        Controller::Human => {
            if game_input.next_target {
                if let Some(at) = cycle_target(game, &unit, ui_state.cursor) {
                    ui_state.cursor = at;
                }
            }
            game_input.command(game, ui_state.cursor)
        }
        Controller::Machine => {
            let step = if game_input.step_queue {
                true
            } else if ui_state.queue_paused {
                false
            } else {
                match ui_state.settings.machine_speed.delay() {
                    Some(delay) => {
                        ui_state.queue_delay += 1;
                        if ui_state.queue_delay > delay {
                            ui_state.queue_delay = 0;
                            true
                        } else {
                            false
                        }
                    }
                    None => false,
                }
            };
            step.then(|| choose_command(game))
        }
    };

    if let Some(command) = command {
        issue(game, ui_state, command);
    }
}

fn issue(game: &mut Game, ui_state: &mut InterfaceState, command: Command) {
    match game.apply(command) {
        Ok(CommandOutcome::Applied(event)) => {
            ui_state.log.push(event.message(&game.units));
            if let GameEvent::TurnPassed { next } = event {
                if let Some(unit) = game.unit(next) {
                    if unit.controller == Controller::Human {
                        ui_state.cursor = unit.at;
                    }
                }
            }
        }
        Ok(CommandOutcome::GameOverTriggered(outcome)) => {
            ui_state.log.push(match outcome {
                GameOutcome::Victory => "Victory!",
                GameOutcome::Defeat => "Defeat!",
            });
            info!(target: "tui", "game over: {:?} dump: {}", outcome, game.view());
        }
        Err(err) => ui_state.log.push(err.to_string()),
    }
}

fn render<B: Backend>(
    terminal: &mut Terminal<B>,
    game: &Game,
    ui_state: &mut InterfaceState,
) -> io::Result<()> {
    let glyphs: &GlyphRegistry = ui_state.glyphs.get_or_insert_with(GlyphRegistry::build);
    let cursor = ui_state.cursor;
    let log = &ui_state.log;
    let queue_paused = ui_state.queue_paused;
    let help_key = settings::key_name(ui_state.settings.keybinds.help);
    let help_lines = ui_state
        .show_help
        .then(|| ui_state.settings.keybinds.help_lines());

    let reachable: HashSet<Coord> = match (game.turn.phase, game.current_unit()) {
        (Phase::AwaitingCommand(_), Some(unit)) if unit.controller == Controller::Human => {
            game.accessible_tiles(unit)
        }
        _ => HashSet::new(),
    };

    terminal.draw(|frame| {
        use Constraint::*;

        let [topbar, area] = Layout::vertical([Length(1), Min(0)]).areas(frame.size());
        let [board, sidebar] = Layout::horizontal([Fill(1), Length(32)]).areas(area);
        let [current, hovered, messages] = Layout::vertical([
            Length(UnitStatsWidget::HEIGHT),
            Length(UnitStatsWidget::HEIGHT),
            Min(0),
        ])
        .areas(sidebar);

        let phase_text = match game.turn.phase {
            Phase::AwaitingCommand(_) => "to act",
            Phase::TurnResolved => "done, end the turn",
            Phase::GameOver(_) => "game over",
        };
        let unit_text = game
            .current_unit()
            .map_or("Nobody".to_string(), |u| format!("{} {}", u.kind.name(), u.id));
        let queue_text = if queue_paused { " | machine paused" } else { "" };
        frame.render_widget(
            Paragraph::new(format!(
                " Turn {} | {} {}{} | {} | {} for keys",
                game.turn.round_counter,
                unit_text,
                phase_text,
                queue_text,
                cursor,
                help_key
            ))
            .style(Style::default().fg(Color::Black).bg(Color::Rgb(200, 200, 200))),
            topbar,
        );

        frame.render_widget(
            BoardWidget {
                game,
                glyphs,
                cursor,
                reachable: &reachable,
            },
            board,
        );

        if let Some(unit) = game.current_unit() {
            frame.render_widget(UnitStatsWidget { unit }, current);
        }
        match game.unit_at(&cursor) {
            Some(unit) if !game.is_concealed(unit) || unit.id == game.turn.current => {
                frame.render_widget(UnitStatsWidget { unit }, hovered)
            }
            _ => {
                let terrain = match game.map.get(&cursor) {
                    Some(Some(tile)) => format!(
                        "{}\ncost {}  sight {}{}",
                        tile.kind.name(),
                        tile.move_cost(),
                        tile.visibility(),
                        if tile.obstructs() { "\nblocked" } else { "" }
                    ),
                    _ => "Nothing".to_string(),
                };
                frame.render_widget(Clear, hovered);
                frame.render_widget(
                    Paragraph::new(terrain).block(
                        Block::bordered()
                            .border_type(BorderType::QuadrantOutside)
                            .title(" Terrain "),
                    ),
                    hovered,
                );
            }
        }
        frame.render_widget(MessageLogWidget { log }, messages);

        if let Some(outcome) = game.outcome() {
            let [_, inner, _] = Layout::vertical([Fill(1), Length(5), Fill(1)]).areas(board);
            let [_, inner, _] = Layout::horizontal([Fill(1), Length(30), Fill(1)]).areas(inner);
            let text = match outcome {
                GameOutcome::Victory => "Victory!",
                GameOutcome::Defeat => "Defeat!",
            };
            frame.render_widget(Clear, inner);
            frame.render_widget(
                Paragraph::new(vec![Line::from(text), Line::from(""), Line::from("Esc to quit")])
                    .alignment(Alignment::Center)
                    .block(Block::bordered().border_type(BorderType::QuadrantOutside)),
                inner,
            );
        }

        if let Some(help_lines) = &help_lines {
            let height = help_lines.len() as u16 + 2;
            let [_, inner, _] = Layout::vertical([Fill(1), Length(height), Fill(1)]).areas(board);
            let [_, inner, _] = Layout::horizontal([Fill(1), Length(64), Fill(1)]).areas(inner);
            frame.render_widget(Clear, inner);
            frame.render_widget(
                Paragraph::new(help_lines.iter().map(|line| Line::from(line.as_str())).collect::<Vec<_>>())
                    .block(
                        Block::bordered()
                            .border_type(BorderType::QuadrantOutside)
                            .title(" Keys "),
                    ),
                inner,
            );
        }
    })?;
    Ok(())
}
