use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use distributed::{
    Application, CommentForm, Config, LoginForm, NewBoardForm, NewPostForm, SignupForm,
};

/// Command-line client for the Distributed message board.
#[derive(Parser, Debug)]
#[command(name = "distributed", version, about)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Print the page as HTML instead of text.
    #[arg(long, global = true)]
    html: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a page by fragment, e.g. `general`, `comments=42`, or nothing for all boards.
    Open {
        #[arg(default_value = "")]
        fragment: String,
    },
    /// Log in.
    Login {
        username: String,
        #[arg(long, env = "DISTRIBUTED_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and log in.
    Signup {
        username: String,
        email: String,
        #[arg(long, env = "DISTRIBUTED_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out.
    Logout,
    /// Write a post.
    Post {
        board: String,
        title: String,
        #[arg(long, default_value = "")]
        url: String,
        #[arg(long, default_value = "")]
        text: String,
    },
    /// Create a board.
    Board {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Comment on a post.
    Comment { post_id: String, content: String },
    /// Upvote a post.
    Upvote { post_id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load_with_env(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", cli.config.display());
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = distributed::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        distributed::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!(error = %e, "invalid configuration");
        return ExitCode::FAILURE;
    }

    let app = match Application::from_config(&config) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "failed to start");
            return ExitCode::FAILURE;
        }
    };
    info!(api = %app.api().root(), "Distributed client");

    run(&app, cli.command).await;
    app.settle().await;

    let doc = app.document();
    if cli.html {
        print!("{}", doc.render_html());
    } else {
        print!("{}", doc.render_text());
    }
    if doc.html(distributed::ElementId::Error).is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run(app: &Application, command: Command) {
    match command {
        Command::Open { fragment } => app.navigate(&fragment),
        Command::Login { username, password } => {
            open(app, "login").await;
            app.submit_login(LoginForm::new(username, password));
        }
        Command::Signup {
            username,
            email,
            password,
        } => {
            open(app, "login").await;
            app.submit_signup(SignupForm::new(username, password, email));
        }
        Command::Logout => app.navigate("logout"),
        Command::Post {
            board,
            title,
            url,
            text,
        } => {
            open(app, &format!("new-post={board}")).await;
            app.submit_post(NewPostForm::new(title, board, url, text));
        }
        Command::Board { name, description } => {
            open(app, "new-board").await;
            app.submit_board(NewBoardForm::new(name, description));
        }
        Command::Comment { post_id, content } => {
            open(app, &format!("comments={post_id}")).await;
            app.submit_comment(CommentForm::new(post_id, content));
        }
        Command::Upvote { post_id } => app.navigate(&format!("upvote={post_id}")),
    }
}

/// Show the page a form lives on before submitting it.
async fn open(app: &Application, fragment: &str) {
    app.navigate(fragment);
    app.settle().await;
}
