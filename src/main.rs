use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use portview::api::mock::MockSource;
use portview::api::{ApiClient, PortfolioSource};
use portview::app::App;
use portview::config::{Config, DataSource};
use portview::event::EventHandler;
use portview::focus::FocusTarget;
use portview::logging::init_logging;
use portview::lookup::AccountLookup;
use portview::nav::routes::Route;
use portview::ui::components::account_form::{AccountForm, FORM_HEIGHT};
use portview::ui::components::confirm_dialog::ConfirmDialogView;
use portview::ui::components::info_page::{InfoPage, info_content};
use portview::ui::components::menu::Menu;
use portview::ui::components::portfolio_summary::PortfolioView;
use portview::ui::components::transaction_list::TransactionList;
use portview::ui::components::{button_span, link_span};
use portview::ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use portview::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "portview", version, about = "Keyboard-driven investment portfolio viewer")]
struct Cli {
    #[arg(long, help = "Backend base URL, e.g. http://localhost:8000/api")]
    api_url: Option<String>,

    #[arg(long, help = "Serve generated data instead of calling the backend")]
    mock: bool,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Stop arrow navigation at the ends of lists")]
    no_wrap: bool,

    #[arg(short, long, help = "Disable selection announcements")]
    quiet: bool,

    #[arg(short, long, help = "Path to config.toml")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_err) = match Config::load(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    if cli.mock {
        config.data_source = DataSource::Mock;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if cli.no_wrap {
        config.wrap_navigation = false;
    }
    if cli.quiet {
        config.announce_changes = false;
    }

    let _logging = init_logging(&config)?;
    if let Some(err) = config_err {
        tracing::warn!(error = %err, "config unreadable, using defaults");
    }

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.theme, "unknown theme, using default");
        Theme::default()
    });
    let source = build_source(&config)?;
    tracing::info!(
        source = ?config.data_source,
        api = %config.api_base_url,
        "starting portview"
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(50));
    let mut app = App::new(config, theme, source, events.sender());
    app.mount();

    let result = run_app(&mut terminal, &mut app, &events);

    app.unmount();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = ?err, "event loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn build_source(config: &Config) -> Result<Arc<dyn PortfolioSource>> {
    let source: Arc<dyn PortfolioSource> = match config.data_source {
        DataSource::Mock => Arc::new(MockSource::new(config.mock_latency())),
        DataSource::Api => Arc::new(ApiClient::new(
            &config.api_base_url,
            config.request_timeout(),
        )?),
    };
    Ok(source)
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        let event = events.next()?;
        app.handle_event(event, Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

fn hints_for(app: &App) -> Vec<&'static str> {
    if app.modal_open() {
        return vec!["[y] Confirm", "[n/Esc] Cancel", "[Tab/←→] Switch", "[Enter] Choose"];
    }
    match app.route {
        Route::MainMenu => vec![
            "[↑↓] Move",
            "[Enter] Open",
            "[1-7] Jump",
            "[Tab] Focus",
            "[Esc] Clear",
            "[q] Exit",
        ],
        Route::PortfolioInquiry | Route::TransactionHistory => {
            if app.focus == Some(FocusTarget::AccountInput) {
                vec!["[Enter] Search", "[Tab] Next", "[Esc] Leave field"]
            } else {
                vec![
                    "[Tab] Next",
                    "[Enter] Activate",
                    "[i] Edit",
                    "[n] New search",
                    "[d] Dismiss error",
                    "[Esc] Main menu",
                ]
            }
        }
        _ => vec!["[Tab] Focus", "[Enter] Activate", "[Esc] Main menu"],
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let hints = hints_for(app);
    let hint_lines = pack_hint_lines(&hints, area.width as usize);
    let layout = AppLayout::new(area, hint_lines.len() as u16 + 1);

    let source_label = match app.config.data_source {
        DataSource::Api => app.config.api_base_url.as_str(),
        DataSource::Mock => "mock data",
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " portview ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} | {}", app.route.title(), source_label),
            Style::default().fg(colors.text_muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    match app.route {
        Route::MainMenu => render_menu(frame, app, layout.main),
        Route::PortfolioInquiry => render_inquiry(frame, app, &layout),
        Route::TransactionHistory => render_history(frame, app, &layout),
        route => render_info(frame, app, route, layout.main),
    }

    let mut footer: Vec<Line> = hint_lines
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_muted()))))
        .collect();
    footer.push(Line::from(Span::styled(
        format!(" {}", app.announcer.current().unwrap_or("")),
        Style::default().fg(colors.accent()),
    )));
    frame.render_widget(Paragraph::new(footer), layout.footer);

    frame.render_widget(ConfirmDialogView::new(&app.dialog, app.focus, &app.theme), area);
}

fn render_menu(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let menu_area = centered_rect(60, 100, 56, 31, area);
    let menu = Menu::new(&app.menu.items, app.menu.nav.state(), &app.theme)
        .activated(app.menu.activated);
    frame.render_widget(&menu, menu_area);
}

/// Form on top, results in the middle, Back and the sibling link below.
fn split_lookup(area: Rect) -> (Rect, Rect, Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FORM_HEIGHT + 2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    (parts[0], parts[1], parts[2])
}

fn nav_row<T>(app: &App, lookup: &AccountLookup<T>) -> Line<'static> {
    let link = lookup.link();
    Line::from(vec![
        Span::raw("  "),
        button_span(
            "Back to Main Menu",
            app.focus == Some(FocusTarget::Back),
            &app.theme,
        ),
        Span::raw("   "),
        link_span(
            &format!("Go to {}", link.title()),
            app.focus == Some(FocusTarget::Link(link)),
            &app.theme,
        ),
    ])
}

fn render_inquiry(frame: &mut ratatui::Frame, app: &App, layout: &AppLayout) {
    let (form_area, results_area, nav_area) = split_lookup(layout.main);
    let loaded = app.inquiry.loaded();
    frame.render_widget(
        AccountForm::new(
            Route::PortfolioInquiry.title(),
            &app.inquiry,
            loaded.map(|p| p.account_number.as_str()),
            app.focus,
            &app.theme,
        ),
        form_area,
    );
    if let Some(summary) = loaded {
        frame.render_widget(
            PortfolioView::new(summary, layout.tier, &app.theme),
            results_area,
        );
    }
    frame.render_widget(Paragraph::new(nav_row(app, &app.inquiry)), nav_area);
}

fn render_history(frame: &mut ratatui::Frame, app: &App, layout: &AppLayout) {
    let (form_area, results_area, nav_area) = split_lookup(layout.main);
    let loaded = app.history.loaded();
    frame.render_widget(
        AccountForm::new(
            Route::TransactionHistory.title(),
            &app.history,
            loaded.map(|h| h.account_number.as_str()),
            app.focus,
            &app.theme,
        ),
        form_area,
    );
    if let Some(history) = loaded {
        frame.render_widget(
            TransactionList::new(history, layout.tier, &app.theme),
            results_area,
        );
    }
    frame.render_widget(Paragraph::new(nav_row(app, &app.history)), nav_area);
}

fn render_info(frame: &mut ratatui::Frame, app: &App, route: Route, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    if let Some(content) = info_content(route) {
        let page_area = centered_rect(80, 100, 60, 12, parts[0]);
        frame.render_widget(InfoPage::new(route, content, &app.theme), page_area);
    }

    let back = Line::from(vec![
        Span::raw("  "),
        button_span(
            "Back to Main Menu",
            app.focus == Some(FocusTarget::Back),
            &app.theme,
        ),
    ]);
    frame.render_widget(Paragraph::new(back), parts[1]);
}
