use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::history::DefaultHistory;
use tracing_subscriber::EnvFilter;

use aicompare_core::SessionStore;
use aicompare_core::auth::{AuthController, AuthForm};
use aicompare_core::comparison::ComparisonController;
use aicompare_infrastructure::load_client_config;
use aicompare_interaction::backend_from_config;

mod command;
mod helper;
mod render;

use command::ReplCommand;
use helper::CliHelper;
use render::{Osc52Clipboard, TerminalNotifier};

#[derive(Parser)]
#[command(name = "aicompare")]
#[command(about = "AICompare - ask several AI models and compare their answers", long_about = None)]
struct Cli {
    /// Backend origin (overrides config and AICOMPARE_API_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Use simulated answers instead of the backend
    #[arg(long)]
    offline: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Config file (defaults to ~/.config/aicompare/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

type ReplEditor = Editor<CliHelper, DefaultHistory>;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = load_client_config(cli.config.as_deref())?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }
    if cli.offline {
        config.offline = true;
    }
    if cli.timeout_secs.is_some() {
        config.timeout_secs = cli.timeout_secs;
    }

    let api = backend_from_config(&config)?;
    let sessions = SessionStore::global();
    let notifier = Arc::new(TerminalNotifier);
    let comparison = ComparisonController::new(
        api.clone(),
        sessions.clone(),
        notifier.clone(),
        Arc::new(Osc52Clipboard),
    );
    let auth = AuthController::new(api, sessions, notifier);

    let helper = CliHelper::new();
    let mut rl: ReplEditor = Editor::new()?;
    rl.set_helper(Some(helper.clone()));

    println!("{}", "=== AI Models Comparison ===".bright_magenta().bold());
    if config.offline {
        println!("{}", "Offline mode: answers are simulated.".bright_black());
    } else {
        println!("{}", format!("Backend: {}", config.base_url).bright_black());
    }
    println!(
        "{}",
        "Type a question, '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();

    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                tracing::error!(error = %err, "Reading input failed");
                break;
            }
        };

        let command = command::parse(&line);
        if !matches!(command, ReplCommand::Empty | ReplCommand::Login { .. }) {
            let _ = rl.add_history_entry(line.as_str());
        }

        match command {
            ReplCommand::Empty => continue,
            ReplCommand::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            ReplCommand::Help => render::render_help(),
            ReplCommand::Invalid(message) => println!("{}", message.bright_black()),
            ReplCommand::Ask(question) => {
                println!("{}", "Asking models...".yellow());
                let state = comparison.on_submit(question).await;
                helper.track_models(&state);
                render::render_answers(&state);
            }
            ReplCommand::Humanize(model) => {
                let before = comparison.snapshot().await;
                if !before.can_humanize(&model) {
                    println!(
                        "{}",
                        format!("Cannot humanize '{model}' right now.").bright_black()
                    );
                    continue;
                }
                println!("{}", format!("Humanizing {model}...").yellow());
                let state = comparison.humanize(&model).await;
                helper.track_models(&state);
                render::render_answers(&state);
            }
            ReplCommand::Copy(model) => {
                if comparison.snapshot().await.answer(&model).is_none() {
                    println!("{}", format!("No answer from '{model}'.").bright_black());
                    continue;
                }
                comparison.copy(&model).await;
            }
            ReplCommand::Answers => render::render_answers(&comparison.snapshot().await),
            ReplCommand::Login { email, password } => {
                let password = match password {
                    Some(password) => password,
                    None => match rl.readline("password: ") {
                        Ok(password) => password,
                        Err(_) => continue,
                    },
                };
                if let Ok(session) = auth.login(&AuthForm::login(email, password)).await {
                    println!(
                        "{}",
                        format!("Signed in as {}", session.user.display_name()).bright_green()
                    );
                }
            }
            ReplCommand::Register { email, name } => {
                let password = match rl.readline("password: ") {
                    Ok(password) => password,
                    Err(_) => continue,
                };
                if let Ok(session) = auth
                    .register(&AuthForm::register(email, password, name))
                    .await
                {
                    println!(
                        "{}",
                        format!("Welcome, {}", session.user.display_name()).bright_green()
                    );
                }
            }
            ReplCommand::Logout => {
                auth.logout();
                comparison.reset().await;
                helper.track_models(&comparison.snapshot().await);
                println!("{}", "Signed out.".bright_green());
            }
        }
    }

    Ok(())
}
