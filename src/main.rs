use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

use khelo_admin::admin_tui::components::table::{
    cm_row_cells, format_header, format_row, user_row_cells, CM_HEADER, CM_WIDTHS, USER_HEADER,
    USER_WIDTHS,
};
use khelo_admin::admin_tui::{App, AppEvent};
use khelo_admin::api::{self, ApiClient};
use khelo_admin::cli::{Cli, Commands};
use khelo_admin::config::Config;
use khelo_admin::models::UserFilters;
use khelo_admin::session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "khelo_admin=info");
    }
    init_logging(matches!(command, Commands::Tui))?;

    let config = Config::from_env()?;
    config.validate()?;
    let mut session = Session::load(&config.session_path)?;

    match command {
        Commands::Login { token } => {
            session.sign_in(&token)?;
            info!("token stored");
            println!("Signed in. Token stored at {}", config.session_path.display());
        }

        Commands::Logout => {
            session.sign_out()?;
            println!("Signed out.");
        }

        Commands::Cm => {
            let client = ApiClient::new(&config, session)?;
            print_cm_list(&client).await?;
        }

        Commands::Questions { search } => {
            let client = ApiClient::new(&config, session)?;
            print_questions(&client, &search).await?;
        }

        Commands::Users {
            page,
            role,
            username,
            email,
            verified,
        } => {
            let filters = UserFilters {
                username: username.unwrap_or_default(),
                email: email.unwrap_or_default(),
                role: role.as_deref().map(Commands::parse_role).transpose()?,
                verified,
            };
            let client = ApiClient::new(&config, session)?;
            print_users(&client, &filters, page).await?;
        }

        Commands::Tui => {
            run_tui(&config, session).await?;
        }
    }

    Ok(())
}

/// CLI commands log to stderr; the TUI logs to a file so tracing output
/// never corrupts the alternate screen.
fn init_logging(tui_mode: bool) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    if tui_mode {
        let file_appender = tracing_appender::rolling::never(".", "khelo-admin.log");
        tracing_subscriber::fmt()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    }

    Ok(())
}

async fn print_cm_list(client: &ApiClient) -> Result<()> {
    let records = api::cm::list(client).await?;

    if records.is_empty() {
        println!("No CM records found");
        return Ok(());
    }

    let header = format_header(&CM_HEADER, &CM_WIDTHS);
    println!("{}", header);
    println!("{}", "-".repeat(header.len()));
    for (i, cm) in records.iter().enumerate() {
        println!("{}", format_row(&cm_row_cells(i, cm), &CM_WIDTHS));
    }
    println!();
    println!("Total: {} records", records.len());

    Ok(())
}

async fn print_questions(client: &ApiClient, search: &str) -> Result<()> {
    let page = api::questions::list(client, search).await?;

    if page.questions.is_empty() {
        println!("No questions found.");
        return Ok(());
    }

    for (i, question) in page.questions.iter().enumerate() {
        println!("{}. {}", i + 1, question.question_text);
        for (j, option) in question.options.iter().enumerate() {
            let letter = (b'A' + j as u8) as char;
            let marker = if j == question.correct_option_index {
                " (correct)"
            } else {
                ""
            };
            println!("   {}. {}{}", letter, option, marker);
        }
        println!(
            "   Created at: {}",
            question.created_at.format("%Y-%m-%d %H:%M")
        );
        println!();
    }
    println!("Total questions: {}", page.total_questions);

    Ok(())
}

async fn print_users(client: &ApiClient, filters: &UserFilters, page: u32) -> Result<()> {
    let result = api::users::list(client, filters, page).await?;

    if result.users.is_empty() {
        println!("No users found");
        return Ok(());
    }

    let header = format_header(&USER_HEADER, &USER_WIDTHS);
    println!("{}", header);
    println!("{}", "-".repeat(header.len()));
    for user in &result.users {
        println!("{}", format_row(&user_row_cells(user), &USER_WIDTHS));
    }
    println!();
    println!("Page {} of {}", result.current_page, result.total_pages);

    Ok(())
}

async fn run_tui(config: &Config, session: Session) -> Result<()> {
    info!("starting admin TUI");

    let client = ApiClient::new(config, session)?;
    let (events_tx, events_rx) = tokio::sync::mpsc::unbounded_channel::<AppEvent>();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client, events_tx);
    let result = app.run(&mut terminal, events_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match result {
        Ok(()) => {
            info!("admin TUI exited successfully");
            Ok(())
        }
        Err(e) => {
            error!("admin TUI encountered an error: {}", e);
            Err(e)
        }
    }
}
