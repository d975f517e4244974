use bon::Builder;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// One recorded operation call: name, structured inputs and output, and
/// the time span of the call.
#[derive(Debug, Clone, Serialize, Builder)]
pub struct TraceEvent {
    /// Operation name, e.g. "call_openai_once"
    #[builder(into)]
    pub op: String,

    /// Structured inputs of the call
    pub inputs: Value,

    /// Structured output of the call
    pub output: Value,

    pub started_at: DateTime<Utc>,

    pub ended_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_op_and_payloads() {
        let started = Utc::now();
        let event = TraceEvent::builder()
            .op("call_openai_once")
            .inputs(serde_json::json!({"user_prompt": "plan a trip"}))
            .output(serde_json::json!("an itinerary"))
            .started_at(started)
            .ended_at(started)
            .build();

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["op"], "call_openai_once");
        assert_eq!(value["inputs"]["user_prompt"], "plan a trip");
        assert_eq!(value["output"], "an itinerary");
        assert!(value["started_at"].is_string());
    }
}
