pub mod app;
pub mod ui;

use std::io;
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::intake::scan_audio_files;
use crate::models::AnalysisEvent;

use app::{App, View};

pub fn run(path: &Path) -> Result<()> {
    let files = scan_audio_files(path);
    if files.is_empty() {
        anyhow::bail!("No audio files found in {}", path.display());
    }

    let mut app = App::new(files, path.to_path_buf());

    // Results from scheduled analyses arrive on this channel
    let (tx, rx) = mpsc::channel::<AnalysisEvent>();

    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, tx, rx);

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tx: mpsc::Sender<AnalysisEvent>,
    rx: mpsc::Receiver<AnalysisEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;
        // Note: ui::render updates app.visible_rows each frame

        // Drain delivered results; stale generations are dropped by the session
        while let Ok(event) = rx.try_recv() {
            match event {
                AnalysisEvent::Completed { generation, result } => {
                    app.session.complete(generation, result);
                }
            }
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // A rejection notice blocks everything until dismissed
                if app.notice.is_some() {
                    if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                        app.notice = None;
                    }
                    continue;
                }

                match app.view {
                    View::Main => match key.code {
                        KeyCode::Char('q') => {
                            app.should_quit = true;
                            break;
                        }
                        KeyCode::Char('j') | KeyCode::Down => {
                            app.select_next();
                        }
                        KeyCode::Char('k') | KeyCode::Up => {
                            app.select_prev();
                        }
                        KeyCode::Enter => {
                            app.choose_selected();
                        }
                        KeyCode::Char('a') => {
                            app.request_analysis(&tx);
                        }
                        KeyCode::Char('r') => {
                            app.session.reset();
                        }
                        KeyCode::Char('?') => {
                            app.view = View::About;
                        }
                        _ => {}
                    },
                    View::About => match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => {
                            app.view = View::Main;
                        }
                        _ => {}
                    },
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
