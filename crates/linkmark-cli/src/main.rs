mod app;
mod convert;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use linkmark_config::Config;
use linkmark_engine::{InlinePlugin, LinkPlugin};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

use app::{App, Mode};

enum Command {
    Scratchpad,
    Convert(Option<PathBuf>),
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let command = match args.get(1).map(String::as_str) {
        None => Command::Scratchpad,
        Some("convert") if args.len() <= 3 => Command::Convert(args.get(2).map(PathBuf::from)),
        _ => {
            eprintln!("Usage: {} [convert [FILE]]", args[0]);
            process::exit(1);
        }
    };

    // Determine plugin options from the config file, if any
    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", config_path.display());
            process::exit(1);
        }
    };

    init_logging(&command, config.log_file.as_deref())?;
    log::info!("linkmark starting up, config path: {}", config_path.display());

    let options = config
        .link_options()
        .with_context(|| format!("Invalid settings in {}", config_path.display()))?;
    let plugin = LinkPlugin::new(&options)?;
    if plugin.markdown().is_none() {
        log::info!("markdown conversion is disabled");
    }

    match command {
        Command::Convert(file) => convert::run(file.as_deref(), plugin.markdown()),
        Command::Scratchpad => run_scratchpad(plugin),
    }
}

/// Logs go to stderr, except in the scratchpad where stderr is the screen:
/// there they go to the configured log file or nowhere.
fn init_logging(command: &Command, log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Info)
        .parse_default_env();

    if let Command::Scratchpad = command {
        let target: Box<dyn std::io::Write + Send> = match log_file {
            Some(path) => Box::new(
                std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open log file {}", path.display()))?,
            ),
            None => Box::new(std::io::sink()),
        };
        builder.target(env_logger::Target::Pipe(target));
    }

    builder.init();
    Ok(())
}

fn run_scratchpad(plugin: LinkPlugin) -> Result<()> {
    let mut app = App::new(plugin)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    } else {
        println!("{}", app.doc.to_markup());
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                let shift = key.modifiers.contains(KeyModifiers::SHIFT);
                let prompting = matches!(app.mode, Mode::LinkPrompt { .. });
                match (key.code, prompting) {
                    (KeyCode::Esc, false) => return Ok(()),
                    (KeyCode::Esc, true) => app.cancel_prompt()?,
                    (KeyCode::Enter, true) => app.confirm_link()?,
                    (KeyCode::Char('k'), false) if ctrl => app.toggle_link()?,
                    (KeyCode::Char(c), _) if !ctrl => app.type_char(c)?,
                    (KeyCode::Backspace, _) => app.backspace()?,
                    (KeyCode::Left, false) => app.move_caret(false, shift)?,
                    (KeyCode::Right, false) => app.move_caret(true, shift)?,
                    (KeyCode::Home, false) => app.home()?,
                    (KeyCode::End, false) => app.end()?,
                    _ => {}
                }
            }
            Event::Paste(text) => app.paste(&text)?,
            _ => {}
        }
    }
}
