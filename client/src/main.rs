//! Command-line front end for the blog list API.
//!
//! The session returned by `login` is saved to a JSON file so later
//! invocations act as the same user until `logout`.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use reqwest::Url;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use bloglist_client::api::DEFAULT_TIMEOUT;
use bloglist_client::{
    ApiClient, Blog, ClientApp, ClientError, FileSessionStore, NewBlog, Notification,
    NotificationKind,
};

/// Blog list client.
#[derive(Debug, Parser)]
#[command(name = "bloglist", version, about)]
struct Cli {
    /// Server root URL.
    #[arg(long, env = "BLOGLIST_URL", default_value = "http://localhost:3003")]
    base_url: Url,
    /// File holding the saved session.
    #[arg(long, env = "BLOGLIST_SESSION_FILE", default_value = ".bloglist-session.json")]
    session_file: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and save the session.
    Login {
        /// Login name.
        #[arg(long)]
        username: String,
        /// Password.
        #[arg(long, env = "BLOGLIST_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the saved session.
    Logout,
    /// List every blog.
    List,
    /// Add a blog as the logged-in user.
    Add {
        /// Title.
        #[arg(long)]
        title: String,
        /// Author.
        #[arg(long, default_value = "")]
        author: String,
        /// Link to the post.
        #[arg(long)]
        url: String,
        /// Initial likes.
        #[arg(long)]
        likes: Option<u32>,
    },
    /// Show who is logged in.
    Whoami,
}

type App = ClientApp<ApiClient, FileSessionStore>;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprint_line(&format!("error: {err}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let api = ApiClient::new(cli.base_url, DEFAULT_TIMEOUT)?;
    let mut app: App = ClientApp::new(api, FileSessionStore::new(cli.session_file));
    app.restore_session()?;

    match cli.command {
        Command::Login { username, password } => {
            let result = app.login(&username, &password).await.map(|user| {
                format!("{} logged in", user.name)
            });
            report(&mut app);
            print_line(&result?);
        }
        Command::Logout => {
            app.logout()?;
            print_line("logged out");
        }
        Command::List => {
            for blog in app.refresh_blogs().await? {
                print_line(&describe(blog));
            }
        }
        Command::Add {
            title,
            author,
            url,
            likes,
        } => {
            let result = app
                .add_blog(NewBlog {
                    title,
                    author,
                    url,
                    likes,
                })
                .await
                .map(|_| ());
            report(&mut app);
            result?;
        }
        Command::Whoami => match app.user() {
            Some(user) => print_line(&format!("{} ({})", user.name, user.username)),
            None => print_line("not logged in"),
        },
    }
    Ok(())
}

fn describe(blog: &Blog) -> String {
    let owner = blog
        .user
        .as_ref()
        .map_or_else(String::new, |user| format!(" [{}]", user.username));
    format!(
        "{} by {} ({} likes) {}{owner}",
        blog.title, blog.author, blog.likes, blog.url
    )
}

fn report(app: &mut App) {
    match app.take_notification() {
        Some(Notification {
            message,
            kind: NotificationKind::Info,
        }) => print_line(&message),
        Some(Notification {
            message,
            kind: NotificationKind::Error,
        }) => eprint_line(&message),
        None => {}
    }
}

fn print_line(line: &str) {
    if let Err(err) = writeln!(std::io::stdout().lock(), "{line}") {
        warn!(error = %err, "writing to stdout failed");
    }
}

fn eprint_line(line: &str) {
    if let Err(err) = writeln!(std::io::stderr().lock(), "{line}") {
        warn!(error = %err, "writing to stderr failed");
    }
}
