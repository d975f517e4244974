use std::path::Path;

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tripcast::config::{self, AppEnv};
use tripcast::recorder::RunRecorder;
use tripcast::{agent, weather};
use tripcast_openai::OpenAi;
use tripcast_wandb::Wandb;

/// Fixed task sent to the model on every run.
const USER_PROMPT: &str = "You are helping plan a 2-day trip.\n\
    Destination: Tokyo.\n\
    Dates: 2025-12-17 to 2025-12-18.\n\
    Budget: mid-range.\n\n\
    Call get_weather for Tokyo for 2025-12-17, then propose a 2-day itinerary that \
    adapts to the weather. Include 3 activities per day and a short packing list.";

#[derive(Debug, Parser)]
#[command(
    name = "tripcast",
    about = "Weather-aware trip planning smoke test with run tracking"
)]
struct Cli {
    /// Optional run display name (overrides WANDB_RUN_NAME if set).
    #[arg(long)]
    run_name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env file is fine; the variables may already be set.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let env = AppEnv::from_env(cli.run_name)?;
    let hparams = config::load_hparams(Path::new(config::HPARAMS_PATH))?;
    let system_prompt = config::load_system_prompt(Path::new(config::SYSTEM_PROMPT_PATH))?;

    let openai = OpenAi::new(env.openai_api_key.clone());
    let wandb = Wandb::new(env.wandb_api_key.clone());

    let recorder = RunRecorder::start(wandb, &env, &hparams, Path::new(".")).await?;

    if hparams.tool_choice.trim().to_lowercase() != "none" {
        let hint = json!({
            "tool": weather::TOOL_NAME,
            "location": "Tokyo",
            "date": "2025-12-17",
            "units": "C",
        });
        recorder.log_tool_hint(hint).await?;
    }

    let started_at = chrono::Utc::now();
    let answer = agent::generate(&openai, &hparams, &system_prompt, USER_PROMPT).await?;
    let ended_at = chrono::Utc::now();
    info!(chars = answer.len(), "answer received");

    let inputs = json!({
        "system_prompt": system_prompt,
        "user_prompt": USER_PROMPT,
        "model": hparams.model.as_str(),
        "temperature": hparams.temperature,
        "max_tokens": hparams.max_tokens,
        "top_p": hparams.top_p,
        "tool_choice": hparams.tool_choice,
    });
    recorder
        .log_generation_trace(inputs, &answer, started_at, ended_at)
        .await?;
    recorder
        .log_answer(&system_prompt, USER_PROMPT, &answer)
        .await?;
    recorder.finish().await?;

    Ok(())
}
