//! sqlrag - chat with a SQLite database in natural language.

use std::io::Write as _;
use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use sqlrag::cli::Cli;
use sqlrag::config::Config;
use sqlrag::error::{Result, SqlRagError};
use sqlrag::session::Session;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    sqlrag::logging::init_stderr_logging();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;

    // CLI arguments take precedence over config file and environment.
    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }
    if let Some(provider) = &cli.provider {
        config.llm.provider = provider.clone();
    }
    if let Some(api_key) = &cli.api_key {
        config.llm.api_key = Some(api_key.clone());
    }
    config.llm.apply_env_defaults();

    let llm = sqlrag::llm::create_client(&config.llm)?;
    let mut session = Session::new(llm);

    if let Some(path) = &cli.database {
        load_database_file(&mut session, path).await?;
    }

    println!("sqlrag - ask questions about your SQLite database.");
    println!("Commands: .open <path>  .schema  .transcript  .help  .quit");

    repl(&mut session).await?;

    session.teardown().await;
    Ok(())
}

/// Reads a database file and installs it in the session.
async fn load_database_file(session: &mut Session, path: &Path) -> Result<()> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        SqlRagError::connection(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let schema_text = session.load_database(&bytes).await?;
    println!("Database loaded. Schema:");
    println!("{}", schema_text);
    Ok(())
}

/// The interactive chat loop.
///
/// Pipeline and upload errors are printed and the loop continues, so the
/// user can retry the same question.
async fn repl(session: &mut Session) -> Result<()> {
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    loop {
        print!("> ");
        std::io::stdout()
            .flush()
            .map_err(|e| SqlRagError::internal(format!("Failed to flush stdout: {e}")))?;

        let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| SqlRagError::internal(format!("Failed to read input: {e}")))?
        else {
            break;
        };

        let line = line.trim();
        match line {
            "" => {}
            ".quit" | ".exit" => break,
            ".help" => {
                println!(".open <path>  load a SQLite database file");
                println!(".schema       show the extracted schema");
                println!(".transcript   show the conversation so far");
                println!(".quit         exit");
                println!("Anything else is asked as a question about the database.");
            }
            ".schema" => match session.schema_text() {
                Some(schema) => println!("{}", schema),
                None => println!("No database loaded. Use .open <path> first."),
            },
            ".transcript" => {
                for message in session.transcript() {
                    println!("[{}] {}", message.role.as_str(), message.content);
                }
            }
            _ if line.starts_with(".open ") => {
                let path = line.trim_start_matches(".open ").trim();
                if let Err(e) = load_database_file(session, Path::new(path)).await {
                    eprintln!("{}: {}", e.category(), e);
                }
            }
            _ if line.starts_with('.') => {
                println!("Unknown command: {}. Try .help", line);
            }
            question => match session.ask(question).await {
                Ok(answer) => println!("{}", answer),
                Err(e) => eprintln!("{}: {}", e.category(), e),
            },
        }
    }

    Ok(())
}
