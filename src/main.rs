// main.rs
use anyhow::{bail, Context};
use chrono::Local;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use texta_primitives::texta_utils::local_heuristic::analyze_locally;
use texta_primitives::texta_utils::text_stats::compute_text_stats;
use texta_primitives::texta_utils::texta_logging::{init_default_tracing, texta_log, TextaLogLevel, TextaLogOption};
use texta_relay::client::session::{ClientSession, SessionError};
use texta_relay::client::ApiClient;
use texta_relay::network::node_api;
use texta_relay::utils::args::{parse_args, Command};
use texta_relay::utils::cli;
use texta_relay::utils::environment::{fetch_client_environment, fetch_relay_environment, ClientEnvironment};
use texta_relay::SentimentRelay;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_default_tracing();

    let args = parse_args();
    let api_url = args.api_url.clone();
    let client = || -> anyhow::Result<ApiClient> {
        let client_env = ClientEnvironment {
            api_url: api_url.clone(),
            ..fetch_client_environment()?
        };
        Ok(ApiClient::from_environment(&client_env)?)
    };

    match args.command {
        Command::Serve => serve().await?,
        Command::Health => {
            let client = client()?;
            let health = client.health_check().await?;
            print!("{}", cli::render_health(client.base_url(), &health));
        }
        Command::Models => {
            let models = client()?.list_models().await?;
            print!("{}", cli::render_models(&models));
        }
        Command::Analyze {
            text,
            file,
            model,
            offline,
        } => {
            let mut session = ClientSession::new(client()?);
            session.select_model(&model)?;
            match (text, file) {
                (Some(text), _) => session.set_text(&text),
                (None, Some(path)) => load_text(&mut session, &path)?,
                (None, None) => bail!("either --text or --file is required"),
            }
            analyze(&mut session, offline).await?;
        }
        Command::Batch { file, model, export } => {
            let mut session = ClientSession::new(client()?);
            session.select_model(&model)?;
            batch(&mut session, &file, export.as_deref()).await?;
        }
        Command::Compare { text } => {
            let mut session = ClientSession::new(client()?);
            session.set_text(&text);
            let table = session.compare_current_text().await?;
            print!("{}", cli::render_comparison(&table));
        }
        Command::Heuristic { text } => {
            print!("{}", cli::render_heuristic(&analyze_locally(&text)));
        }
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    let relay_env = fetch_relay_environment().context("invalid relay configuration")?;
    let address = relay_env.api_listen_address;

    if relay_env.hf_api_token.is_none() {
        texta_log(
            TextaLogOption::Relay,
            TextaLogLevel::Info,
            "HF_API_TOKEN is not set, provider calls will be anonymous",
        );
    }

    let relay = Arc::new(SentimentRelay::new(relay_env)?);
    node_api::run_api(relay, address).await;
    Ok(())
}

/// A CSV passed to `analyze` is read as one text, one row per line.
fn load_text(session: &mut ClientSession<ApiClient>, path: &Path) -> anyhow::Result<()> {
    session.load_file(path)?;
    if let Some(batch) = session.current_batch() {
        let joined = batch.texts.join("\n");
        session.set_text(&joined);
    }
    Ok(())
}

async fn analyze(session: &mut ClientSession<ApiClient>, offline: bool) -> anyhow::Result<()> {
    let text = session.text_to_analyze()?.to_string();

    let remote = if offline {
        None
    } else {
        match session.analyze_current_text().await {
            Ok(result) => Some(result),
            Err(SessionError::Disconnected) => {
                eprintln!("{}; falling back to the local heuristic", SessionError::Disconnected);
                None
            }
            Err(SessionError::Client(e)) if e.is_connectivity() => {
                eprintln!("{}; falling back to the local heuristic", e);
                None
            }
            Err(e) => return Err(e.into()),
        }
    };

    let result = match remote {
        Some(result) => result,
        None => analyze_locally(&text).into_analysis_result(&text),
    };
    print!("{}", cli::render_analysis(&result));
    print!("{}", cli::render_text_stats(&compute_text_stats(&text)));
    Ok(())
}

async fn batch(session: &mut ClientSession<ApiClient>, file: &Path, export: Option<&Path>) -> anyhow::Result<()> {
    session.load_file(file)?;
    match session.current_batch() {
        Some(batch) => {
            if let Some(warning) = &batch.warning {
                eprintln!("{}", warning);
            }
            if let Some(column) = batch.text_column_name() {
                eprintln!("Analyzing {} rows from column \"{}\"", batch.total_rows, column);
            }
        }
        None => bail!("{} is not a CSV file", file.display()),
    }

    let outcomes = session
        .analyze_current_batch(|progress| {
            eprint!("\r{}", cli::render_progress(&progress));
        })
        .await?;
    eprintln!();
    print!("{}", cli::render_batch(outcomes));

    if let Some(path) = export {
        let path = if path.is_dir() {
            path.join(cli::default_export_file_name(Local::now()))
        } else {
            path.to_path_buf()
        };
        fs::write(&path, session.export_results()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Results exported to {}", path.display());
    }
    Ok(())
}
