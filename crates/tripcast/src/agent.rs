use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;
use tripcast_openai::{ChatResponse, Message, OpenAi, Tool, ToolCall};

use crate::config::GenerationConfig;
use crate::weather::{self, TOOL_NAME};

/// What the model did with its first turn.
#[derive(Debug)]
pub enum FirstTurn {
    /// Plain text answer; the exchange is over.
    Text(String),
    /// The assistant asked for tool calls. Its message must be replayed
    /// verbatim, tool_calls included, before the tool results.
    ToolCalls {
        message: Message,
        calls: Vec<ToolCall>,
    },
}

/// Split the first response into its two outcomes.
///
/// A missing choice, null content and an empty tool-call list all
/// normalize to an empty text answer.
pub fn classify(response: &ChatResponse) -> FirstTurn {
    let Some(choice) = response.first_choice() else {
        return FirstTurn::Text(String::new());
    };
    match &choice.message.tool_calls {
        Some(calls) if !calls.is_empty() => FirstTurn::ToolCalls {
            message: choice.message.clone(),
            calls: calls.clone(),
        },
        _ => FirstTurn::Text(choice.message.content.clone().unwrap_or_default()),
    }
}

/// Arguments the model supplies for a forecast call.
///
/// Every field is optional; defaults apply at the call site, and a null
/// value behaves like a missing key.
#[derive(Debug, Default, Deserialize)]
pub struct WeatherArgs {
    pub location: Option<String>,
    pub date: Option<String>,
    pub units: Option<String>,
}

impl WeatherArgs {
    /// Decode the raw argument text of a tool call. An absent payload
    /// means no arguments; a present payload must be well-formed JSON.
    pub fn parse(arguments: Option<&str>) -> Result<Self> {
        match arguments {
            None => Ok(Self::default()),
            Some(raw) => serde_json::from_str(raw).context("malformed tool call arguments"),
        }
    }
}

/// Execute the requested tool calls and produce the tool-role replies,
/// one per recognized call, in the order the calls were received.
///
/// Calls for tools other than the forecast stub are skipped without a
/// reply; the model asked for something this binary does not have.
pub fn execute_tool_calls(calls: &[ToolCall]) -> Result<Vec<Message>> {
    let mut replies = Vec::with_capacity(calls.len());
    for call in calls {
        if call.function.name != TOOL_NAME {
            continue;
        }
        let args = WeatherArgs::parse(call.function.arguments.as_deref())?;
        let report = weather::get_weather(
            args.location.as_deref().unwrap_or(""),
            args.date.as_deref(),
            args.units.as_deref().unwrap_or("C"),
        );
        let content = serde_json::to_string(&report)?;
        replies.push(Message::tool(call.id.clone(), content));
    }
    Ok(replies)
}

/// Declaration of the forecast tool as offered to the model.
pub fn weather_tool() -> Tool {
    Tool::function_with_params(
        TOOL_NAME,
        "Get a brief weather summary for a location (demo stub; no external API).",
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "City/region name, e.g. 'Tokyo' or 'London'",
                },
                "date": {
                    "type": "string",
                    "description": "Optional date like '2025-12-17'",
                },
                "units": {
                    "type": "string",
                    "description": "Temperature unit: 'C' or 'F'",
                }
            },
            "required": ["location"],
            "additionalProperties": false,
        }),
    )
}

/// Ask the model for an answer, resolving at most one round of tool calls.
///
/// The first request offers the forecast tool unless `tool_choice`
/// normalizes to "none". When the model calls tools, their results are
/// appended after the assistant message and a second, tool-free request
/// produces the final text. Transport errors and malformed arguments
/// propagate to the caller; there are no retries.
pub async fn generate(
    client: &OpenAi,
    config: &GenerationConfig,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<String> {
    let tool_choice = config.tool_choice.trim().to_lowercase();
    let enable_tools = tool_choice != "none";

    let base = client
        .chat()
        .model(config.model.as_str())
        .temperature(config.temperature)
        .max_tokens(config.max_tokens)
        .top_p(config.top_p)
        .system_message(system_prompt)
        .user_message(user_prompt);
    let request = if enable_tools {
        base.tool(weather_tool()).tool_choice(tool_choice).build()
    } else {
        base.build()
    };

    let response = client.send(&request).await?;
    let (assistant, calls) = match classify(&response) {
        FirstTurn::Text(text) => return Ok(text),
        FirstTurn::ToolCalls { message, calls } => (message, calls),
    };

    let mut messages = vec![
        Message::system(system_prompt),
        Message::user(user_prompt),
        assistant,
    ];
    messages.extend(execute_tool_calls(&calls)?);

    let followup = client
        .chat()
        .model(config.model.as_str())
        .temperature(config.temperature)
        .max_tokens(config.max_tokens)
        .top_p(config.top_p)
        .messages(messages)
        .build();
    let response = client.send(&followup).await?;
    Ok(response.content().unwrap_or_default().to_string())
}
