use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use livenote_config::Config;
use livenote_engine::{
    BuildInput, CheckboxWidget, Document, LivePreview, PendingEdits, PreviewOptions, Selection,
    Span as ByteSpan, ViewUpdate, build_decorations, io, render_html,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

mod render;

enum Mode {
    View,
    Html,
    Decorations,
}

struct App {
    path: PathBuf,
    doc: Document,
    preview: LivePreview,
    /// 1-based line holding the cursor
    cursor_line: usize,
    /// 1-based first line on screen
    top: usize,
    height: usize,
    status: String,
}

impl App {
    fn new(path: PathBuf, doc: Document, options: PreviewOptions) -> Result<Self> {
        let mut app = Self {
            path,
            doc,
            preview: LivePreview::new(options)?,
            cursor_line: 1,
            top: 1,
            height: 20,
            status: String::new(),
        };
        app.refresh(true, true);
        Ok(app)
    }

    fn visible_range(&self) -> ByteSpan {
        let last = (self.top + self.height.saturating_sub(1)).min(self.doc.line_count());
        let start = self.doc.line(self.top).map_or(0, |l| l.span.start);
        let end = self.doc.line(last).map_or(self.doc.len(), |l| l.span.end);
        ByteSpan::new(start, end)
    }

    fn selection(&self) -> Selection {
        Selection::cursor(self.doc.line(self.cursor_line).map_or(0, |l| l.span.start))
    }

    fn refresh(&mut self, doc_changed: bool, viewport_changed: bool) {
        let ranges = [self.visible_range()];
        let update = ViewUpdate {
            doc: &self.doc,
            selection: self.selection(),
            visible_ranges: &ranges,
            doc_changed,
            viewport_changed,
            selection_set: true,
        };
        self.preview.update(&update);
    }

    fn set_height(&mut self, height: usize) {
        if height != self.height {
            self.height = height.max(1);
            self.scroll_to_cursor();
            self.refresh(false, true);
        }
    }

    fn scroll_to_cursor(&mut self) -> bool {
        let old = self.top;
        if self.cursor_line < self.top {
            self.top = self.cursor_line;
        } else if self.cursor_line >= self.top + self.height {
            self.top = self.cursor_line + 1 - self.height;
        }
        old != self.top
    }

    fn move_cursor(&mut self, delta: isize) {
        let max = self.doc.line_count() as isize;
        self.cursor_line = (self.cursor_line as isize + delta).clamp(1, max) as usize;
        let scrolled = self.scroll_to_cursor();
        self.refresh(false, scrolled);
    }

    fn page(&mut self, down: bool) {
        let step = self.height as isize;
        self.move_cursor(if down { step } else { -step });
    }

    fn toggle_checkbox(&mut self) {
        let Some(line) = self.doc.line(self.cursor_line) else {
            return;
        };
        let Some(widget) = CheckboxWidget::on_line(&line) else {
            self.status = "No checkbox on this line".to_string();
            return;
        };
        let mut host = PendingEdits::default();
        if !widget.toggle(&self.doc, &mut host) {
            return;
        }
        match host.apply_to(&self.doc) {
            Ok(doc) => {
                self.doc = doc;
                self.status = "Modified".to_string();
                self.refresh(true, false);
            }
            Err(e) => {
                log::warn!("checkbox edit rejected: {e}");
                self.status = format!("Edit failed: {e}");
            }
        }
    }

    fn save(&mut self) {
        self.status = match io::write_note(&self.path, &self.doc) {
            Ok(()) => format!("Saved {}", self.path.display()),
            Err(e) => format!("Save failed: {e}"),
        };
    }
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} [--html | --decorations] <note.md>");
    process::exit(1);
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let args: Vec<String> = env::args().collect();
    let (mode, name) = match args.as_slice() {
        [_, name] if !name.starts_with("--") => (Mode::View, name),
        [_, flag, name] if flag == "--html" => (Mode::Html, name),
        [_, flag, name] if flag == "--decorations" => (Mode::Decorations, name),
        _ => usage(args.first().map_or("livenote-cli", String::as_str)),
    };

    let config = match Config::load() {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", Config::config_path().display());
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let path = match io::resolve_note(name, config.notes_path.as_deref()) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    let doc = io::read_note(&path)?;

    match mode {
        Mode::Html => print!("{}", render_html(&doc.text())),
        Mode::Decorations => {
            let ranges = [ByteSpan::new(0, doc.len())];
            let input = BuildInput {
                doc: &doc,
                selection: Selection::cursor(0),
                visible_ranges: &ranges,
            };
            print!("{}", build_decorations(&input, &config.preview)?);
        }
        Mode::View => view(App::new(path, doc, config.preview)?)?,
    }
    Ok(())
}

fn view(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        let area = terminal.size()?;
        // borders and the help line
        app.set_height(usize::from(area.height).saturating_sub(3));
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
                KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
                KeyCode::PageDown => app.page(true),
                KeyCode::PageUp => app.page(false),
                KeyCode::Char(' ') | KeyCode::Char('x') => app.toggle_checkbox(),
                KeyCode::Char('s') => app.save(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let set = app.preview.decorations();
    let last = (app.top + app.height).min(app.doc.line_count() + 1);
    let lines: Vec<Line> = (app.top..last)
        .filter_map(|number| {
            let mut line = render::render_line(&app.doc, set, number)?;
            let gutter = if number == app.cursor_line { "▌ " } else { "  " };
            line.spans
                .insert(0, Span::styled(gutter, Style::default().fg(Color::Yellow)));
            Some(line)
        })
        .collect();

    let title = format!(
        "{} (v{}, {} decorations)",
        app.path.display(),
        app.doc.version(),
        set.len()
    );
    let content =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(content, chunks[0]);

    let help = Line::from(vec![
        Span::raw("q: Quit | ↑/k ↓/j: Line | PgUp/PgDn: Page | Space/x: Toggle | s: Save  "),
        Span::styled(app.status.clone(), Style::default().fg(Color::Yellow)),
    ]);
    f.render_widget(Paragraph::new(help), chunks[1]);
}
