use bon::Builder;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::snapshot::CodeSnapshot;
use crate::{Wandb, WandbRequestError};

/// Settings for creating a run
#[derive(Debug, Clone, Serialize, Builder)]
pub struct RunInit {
    /// Entity (user or team) that owns the run
    #[builder(into)]
    pub entity: String,

    /// Project the run belongs to
    #[builder(into)]
    pub project: String,

    /// Display name; the backend picks one when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub name: Option<String>,

    /// Job type label shown on the run page
    #[builder(into)]
    pub job_type: String,

    /// Arbitrary config record attached to the run
    pub config: Value,
}

/// Wire body for run creation
#[derive(Debug, Serialize)]
pub(crate) struct CreateRunBody<'a> {
    pub id: &'a str,
    pub started_at: DateTime<Utc>,
    #[serde(flatten)]
    pub init: &'a RunInit,
}

#[derive(Debug, Serialize)]
struct FinishBody {
    exit_code: i32,
    finished_at: DateTime<Utc>,
}

/// Short client-generated run id, matching the backend's 8-character ids
pub(crate) fn new_run_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

/// Handle to a created run
#[derive(Debug, Clone)]
pub struct Run {
    client: Wandb,
    entity: String,
    project: String,
    id: String,
}

impl Run {
    pub(crate) fn new(client: Wandb, entity: String, project: String, id: String) -> Self {
        Self {
            client,
            entity,
            project,
            id,
        }
    }

    /// Run id within its entity/project
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Append one key/value record to the run history
    pub async fn log(&self, record: &Value) -> Result<(), WandbRequestError> {
        let url = format!("{}/log", self.run_url());
        self.client.post_json(&url, record).await
    }

    /// Upload a code snapshot, one multipart part per file. File names
    /// carry the path relative to the snapshot root.
    pub async fn log_code(&self, snapshot: &CodeSnapshot) -> Result<(), WandbRequestError> {
        let mut form = reqwest::multipart::Form::new();
        for file in snapshot.files() {
            let part = reqwest::multipart::Part::bytes(file.contents.clone())
                .file_name(file.rel_path.clone());
            form = form.part("files", part);
        }
        let url = format!("{}/files", self.run_url());
        self.client.post_multipart(&url, form).await
    }

    /// Mark the run finished with exit code 0
    pub async fn finish(&self) -> Result<(), WandbRequestError> {
        let body = FinishBody {
            exit_code: 0,
            finished_at: Utc::now(),
        };
        let url = format!("{}/finish", self.run_url());
        self.client.post_json(&url, &body).await
    }

    fn run_url(&self) -> String {
        format!(
            "{}/api/runs/{}/{}/{}",
            self.client.base_url(),
            self.entity,
            self.project,
            self.id
        )
    }
}
