use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Gauge, Paragraph};

use quizdr::app::{App, Screen};
use quizdr::catalog::Mode;
use quizdr::config::Config;
use quizdr::event::{AppEvent, EventHandler};
use quizdr::rank::rank_for;
use quizdr::session::QUIZ_LENGTH;
use quizdr::ui::components::menu::{Menu, MenuItem};
use quizdr::ui::components::question_card::QuestionCard;
use quizdr::ui::components::summary_card::SummaryCard;
use quizdr::ui::components::topic_list::TopicList;
use quizdr::ui::layout::{AppLayout, centered_rect};
use quizdr::ui::line_input::InputResult;
use quizdr::ui::theme::ThemeColors;

#[derive(Parser)]
#[command(name = "quizdr", version, about = "Terminal quiz trainer for logical reasoning")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Stats sync endpoint URL (empty string disables sync)")]
    script_url: Option<String>,

    #[arg(short, long, help = "Generation model name")]
    model: Option<String>,
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|err| {
        log::warn!("config unreadable, using defaults: {err}");
        Config::default()
    });
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(url) = cli.script_url {
        config.script_url = url;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));
    let mut app = App::new(config, events.sender());

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => {}
            AppEvent::Resize(_, _) => {}
            AppEvent::QuestionReady { seq, question } => app.on_question_ready(seq, *question),
            AppEvent::RemoteLoaded(stats) => app.on_remote_loaded(stats),
            AppEvent::SyncFinished => app.on_sync_finished(),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        Screen::Login => handle_login_key(app, key),
        Screen::Home => handle_home_key(app, key),
        Screen::ModeSelect => handle_mode_key(app, key),
        Screen::TopicSelect => handle_topic_key(app, key),
        Screen::Quiz => handle_quiz_key(app, key),
        Screen::Summary => handle_summary_key(app, key),
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    // Keystrokes still edit the field during a slow load, but a second
    // submit has to wait for the outstanding one.
    match app.email_input.handle(key) {
        InputResult::Submit => app.submit_identity(),
        InputResult::Cancel => app.should_quit = true,
        InputResult::Continue => {}
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter | KeyCode::Char('p') => app.enter_practice(),
        KeyCode::Char('i') => app.switch_identity(),
        _ => {}
    }
}

fn handle_mode_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.screen = Screen::Home,
        KeyCode::Char('1') => app.pick_mode(Mode::Quick),
        KeyCode::Char('2') => app.pick_mode(Mode::Deep),
        KeyCode::Up | KeyCode::Char('k') => app.mode_selected = 0,
        KeyCode::Down | KeyCode::Char('j') => app.mode_selected = 1,
        KeyCode::Enter => {
            let mode = if app.mode_selected == 0 { Mode::Quick } else { Mode::Deep };
            app.pick_mode(mode);
        }
        _ => {}
    }
}

fn handle_topic_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.back_to_mode_select(),
        KeyCode::Up | KeyCode::Char('k') => app.topic_cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.topic_cursor_down(),
        KeyCode::Enter => app.start_selected_topic(),
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_quiz(),
        KeyCode::Char(ch @ '1'..='5') => {
            app.select_option(ch as usize - '1' as usize);
        }
        KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char(' ') => app.advance(),
        _ => {}
    }
}

fn handle_summary_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.retry_quiz(),
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => app.return_to_topics(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        Screen::Login => render_login(frame, app),
        Screen::Home => render_home(frame, app),
        Screen::ModeSelect => render_mode_select(frame, app),
        Screen::TopicSelect => render_topic_select(frame, app),
        Screen::Quiz => render_quiz(frame, app),
        Screen::Summary => render_summary(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;

    let rank = rank_for(app.stats.total_correct());
    let identity = if app.email.is_empty() {
        String::new()
    } else {
        format!(" {} | {} | {} correct", app.email, rank.name, app.stats.total_correct())
    };
    let sync = if app.syncing { " | syncing..." } else { "" };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " quizdr ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            identity,
            Style::default().fg(colors.dim()).bg(colors.header_bg()),
        ),
        Span::styled(
            sync,
            Style::default().fg(colors.warning()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, hints: &str) {
    let colors = &app.theme.colors;
    let footer = Paragraph::new(Line::from(Span::styled(
        hints.to_string(),
        Style::default().fg(colors.dim()),
    )));
    frame.render_widget(footer, area);
}

fn render_login(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header);

    let card = centered_rect(60, 40, layout.main);
    let block = Block::bordered()
        .title(Span::styled(
            " Identify Yourself ",
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(colors.border()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let (before, cursor_ch, after) = app.email_input.render_parts();
    let mut input_spans = vec![
        Span::styled("  email> ", Style::default().fg(colors.accent())),
        Span::styled(before.to_string(), Style::default().fg(colors.fg())),
    ];
    match cursor_ch {
        Some(ch) => {
            input_spans.push(Span::styled(
                ch.to_string(),
                Style::default().fg(colors.bg()).bg(colors.fg()),
            ));
            input_spans.push(Span::styled(
                after.to_string(),
                Style::default().fg(colors.fg()),
            ));
        }
        None => {
            input_spans.push(Span::styled(
                " ",
                Style::default().bg(colors.fg()),
            ));
        }
    }

    let status = if app.syncing {
        "  Pulling your record from the mothership..."
    } else {
        "  Your email keys your progress record."
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(status, Style::default().fg(colors.dim()))),
        Line::from(""),
        Line::from(input_spans),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    render_footer(frame, app, layout.footer, " [Enter] Continue  [Esc] Quit ");
}

fn render_home(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header);

    let card = centered_rect(60, 60, layout.main);
    let block = Block::bordered()
        .border_style(Style::default().fg(colors.border()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let rank = rank_for(app.stats.total_correct());
    let attempted: u32 = app.stats.topics.values().map(|t| t.total).sum();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Welcome back, {}", app.email),
            Style::default().fg(colors.fg()),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Rank: ", Style::default().fg(colors.dim())),
            Span::styled(
                rank.name,
                Style::default()
                    .fg(ThemeColors::parse_color(rank.color))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                "  {} correct of {} attempted, across {} topics",
                app.stats.total_correct(),
                attempted,
                app.stats.topics.len(),
            ),
            Style::default().fg(colors.dim()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  [Enter] Start practice",
            Style::default().fg(colors.accent()),
        )),
        Line::from(Span::styled(
            "  [i]     Switch identity",
            Style::default().fg(colors.fg()),
        )),
        Line::from(Span::styled(
            "  [q]     Quit",
            Style::default().fg(colors.fg()),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    render_footer(frame, app, layout.footer, " [Enter] Practice  [i] Identity  [q] Quit ");
}

fn render_mode_select(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header);

    let mut menu = Menu::new("quizdr", "Choose your protocol", app.theme);
    menu.items = vec![
        MenuItem {
            key: "1".to_string(),
            label: Mode::Quick.label().to_string(),
            description: Mode::Quick.blurb().to_string(),
        },
        MenuItem {
            key: "2".to_string(),
            label: Mode::Deep.label().to_string(),
            description: Mode::Deep.blurb().to_string(),
        },
    ];
    menu.selected = app.mode_selected;

    let menu_area = centered_rect(50, 80, layout.main);
    frame.render_widget(&menu, menu_area);

    render_footer(frame, app, layout.footer, " [1/2] Pick  [Enter] Select  [Esc] Back ");
}

fn render_topic_select(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header);

    let list = TopicList {
        title: app.selected_mode.heading().to_string(),
        topics: app.topics(),
        selected: app.topic_selected,
        stats: &app.stats,
        theme: app.theme,
    };
    let list_area = centered_rect(70, 90, layout.main);
    frame.render_widget(&list, list_area);

    render_footer(frame, app, layout.footer, " [j/k] Move  [Enter] Start  [Esc] Back ");
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header);

    let Some(ref quiz) = app.quiz else {
        return;
    };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5)])
        .split(layout.main);

    let progress = Gauge::default()
        .gauge_style(Style::default().fg(colors.bar_filled()).bg(colors.bar_empty()))
        .ratio(quiz.progress())
        .label(format!("{}/{}", quiz.index + 1, QUIZ_LENGTH));
    frame.render_widget(progress, main_chunks[0]);

    if quiz.loading {
        let card = centered_rect(50, 30, main_chunks[1]);
        let loading = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Consulting the Oracle...",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(ratatui::layout::Alignment::Center)
        .block(
            Block::bordered()
                .border_style(Style::default().fg(colors.border()))
                .style(Style::default().bg(colors.bg())),
        );
        frame.render_widget(loading, card);
        render_footer(frame, app, layout.footer, " [Esc] Abort run ");
        return;
    }

    if let Some(ref question) = quiz.question {
        let card = QuestionCard {
            question,
            selected: quiz.selected,
            number: quiz.index + 1,
            total: QUIZ_LENGTH,
            theme: app.theme,
        };
        let card_area = centered_rect(80, 90, main_chunks[1]);
        frame.render_widget(&card, card_area);
    }

    let hints = if !quiz.answered() {
        " [1-5] Answer  [Esc] Abort run "
    } else if quiz.is_last() {
        " [Enter] Finish  [Esc] Abort run "
    } else {
        " [Enter] Next  [Esc] Abort run "
    };
    render_footer(frame, app, layout.footer, hints);
}

fn render_summary(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header);

    let Some(ref quiz) = app.quiz else {
        return;
    };
    let topic_name = app.selected_topic.map(|t| t.name).unwrap_or("");
    let card = SummaryCard {
        quiz,
        stats: &app.stats,
        topic_name,
        theme: app.theme,
    };
    let card_area = centered_rect(60, 80, layout.main);
    frame.render_widget(&card, card_area);

    render_footer(frame, app, layout.footer, " [r] Retry topic  [Enter] Topics ");
}
