use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tracing::info;
use tripcast_wandb::{CodeSnapshot, Run, RunInit, TraceEvent, Wandb};

use crate::config::{AppEnv, GenerationConfig, HPARAMS_PATH, SYSTEM_PROMPT_PATH};

/// Job type label attached to every run from this binary.
const JOB_TYPE: &str = "git-patch-weave-smoketest";

/// Op name trace events are recorded under.
const GENERATION_OP: &str = "call_openai_once";

/// Records one run against the tracking backend: config and code
/// snapshot at start, key/value records during the run, one trace event
/// for the generation call, and a finish mark at the end.
pub struct RunRecorder {
    client: Wandb,
    run: Run,
    entity: String,
    weave_project: String,
}

impl RunRecorder {
    /// Create the run, attach the resolved generation config and upload
    /// a snapshot of the code under `code_root`.
    pub async fn start(
        client: Wandb,
        env: &AppEnv,
        config: &GenerationConfig,
        code_root: &Path,
    ) -> Result<Self> {
        let init = RunInit::builder()
            .entity(env.wandb_entity.clone())
            .project(env.wandb_project.clone())
            .maybe_name(env.run_name.clone())
            .job_type(JOB_TYPE)
            .config(json!({
                "model": config.model.as_str(),
                "temperature": config.temperature,
                "max_tokens": config.max_tokens,
                "top_p": config.top_p,
                "tool_choice": config.tool_choice,
                "system_prompt_path": SYSTEM_PROMPT_PATH,
                "hparams_path": HPARAMS_PATH,
            }))
            .build();
        let run = client.init_run(init).await?;
        info!(run_id = run.id(), "run created");

        let snapshot = CodeSnapshot::collect(code_root)
            .with_context(|| format!("failed to snapshot code under {}", code_root.display()))?;
        run.log_code(&snapshot).await?;
        info!(files = snapshot.len(), "code snapshot uploaded");

        Ok(Self {
            client,
            run,
            entity: env.wandb_entity.clone(),
            weave_project: env.weave_project.clone(),
        })
    }

    /// Id of the run being recorded.
    pub fn run_id(&self) -> &str {
        self.run.id()
    }

    /// Log an example tool input record so it shows up on the run page.
    pub async fn log_tool_hint(&self, hint: Value) -> Result<()> {
        self.run.log(&json!({ "tool_hint": hint })).await?;
        Ok(())
    }

    /// Log the prompts next to the final answer.
    pub async fn log_answer(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        answer: &str,
    ) -> Result<()> {
        let record = json!({
            "prompt/user_prompt": user_prompt,
            "prompt/system_prompt": system_prompt,
            "openai/answer": answer,
        });
        self.run.log(&record).await?;
        Ok(())
    }

    /// Record the generation call as a trace event under the trace
    /// project, which may differ from the run's project.
    pub async fn log_generation_trace(
        &self,
        inputs: Value,
        answer: &str,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Result<()> {
        let event = TraceEvent::builder()
            .op(GENERATION_OP)
            .inputs(inputs)
            .output(json!(answer))
            .started_at(started_at)
            .ended_at(ended_at)
            .build();
        self.client
            .log_trace(&self.entity, &self.weave_project, &event)
            .await?;
        Ok(())
    }

    /// Mark the run finished.
    pub async fn finish(self) -> Result<()> {
        self.run.finish().await?;
        info!(run_id = self.run.id(), "run finished");
        Ok(())
    }
}
