use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use goban::config::{Cli, Config};
use goban::input::{handle_key, InputResult};
use goban::{draw_ui, logging, Session};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io;
use std::time::Duration;
use tracing::{info, warn};

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let loaded = Config::load();
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => Config::default(),
    };
    config.merge_cli(&cli);

    if cli.print_config {
        match config.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("goban: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // Bad sizes are a usage error, not something to retry
    if let Err(e) = config.validate() {
        eprintln!("goban: {}", e);
        std::process::exit(2);
    }

    match logging::init(&config) {
        Ok(path) => info!(path = %path.display(), "logging started"),
        Err(e) => eprintln!("goban: logging disabled: {}", e),
    }
    if let Err(e) = &loaded {
        warn!(error = %e, "config file ignored, using defaults");
    }

    let mut session = match Session::with_size(config.board_size) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("goban: {}", e);
            std::process::exit(2);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut session);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    if let Some(summary) = session.summary() {
        println!("{}", summary);
    }
    info!("goodbye");
    Ok(())
}

fn run<B: Backend>(terminal: &mut Terminal<B>, session: &mut Session) -> io::Result<()> {
    loop {
        terminal.draw(|frame| draw_ui(frame, session))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match handle_key(key, session) {
            InputResult::Continue => {}
            InputResult::Restart => {
                session
                    .restart()
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            }
            InputResult::Quit => return Ok(()),
        }
    }
}
