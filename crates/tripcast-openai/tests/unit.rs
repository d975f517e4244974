#[cfg(test)]
mod tests {
    use serde_json::json;
    use tripcast_openai::{ChatRequest, Message, Model, OpenAi, Role, Tool, ToolCall};

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello");
        assert!(matches!(msg.role, Role::User));
        assert_eq!(msg.content, Some("Hello".to_string()));
        assert!(msg.tool_calls.is_none());
        assert!(msg.tool_call_id.is_none());
    }

    #[test]
    fn test_system_message() {
        let msg = Message::system("You are a travel assistant");
        assert!(matches!(msg.role, Role::System));
        assert_eq!(msg.content, Some("You are a travel assistant".to_string()));
    }

    #[test]
    fn test_tool_message() {
        let msg = Message::tool("call_123", r#"{"temperature":27.0}"#);
        assert!(matches!(msg.role, Role::Tool));
        assert_eq!(msg.tool_call_id, Some("call_123".to_string()));
        assert_eq!(msg.content, Some(r#"{"temperature":27.0}"#.to_string()));
    }

    #[test]
    fn test_assistant_message_with_tools() {
        let call = ToolCall::new("call_1", "get_weather", r#"{"location":"Tokyo"}"#);
        let msg = Message::assistant_with_tools(None, vec![call.clone()]);
        assert!(matches!(msg.role, Role::Assistant));
        assert!(msg.content.is_none());
        assert_eq!(msg.tool_calls, Some(vec![call]));
    }

    #[test]
    fn test_chat_request_builder() {
        let request = ChatRequest::builder()
            .model("gpt-4o-mini")
            .temperature(0.2)
            .max_tokens(128)
            .top_p(1.0)
            .system_message("system")
            .user_message("user")
            .build();

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.max_tokens, Some(128));
        assert_eq!(request.top_p, Some(1.0));
        assert_eq!(request.messages.len(), 2);
        assert!(matches!(request.messages[0].role, Role::System));
        assert!(matches!(request.messages[1].role, Role::User));
        assert!(request.tools.is_none());
        assert!(request.tool_choice.is_none());
    }

    #[test]
    fn test_request_without_tools_omits_keys() {
        let request = ChatRequest::builder()
            .model("gpt-4o-mini")
            .user_message("hi")
            .build();

        let value = serde_json::to_value(&request).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("tools"));
        assert!(!object.contains_key("tool_choice"));
        assert!(!object.contains_key("temperature"));
    }

    #[test]
    fn test_request_with_tool_serializes_schema() {
        let tool = Tool::function_with_params(
            "get_weather",
            "Get a brief weather summary",
            json!({
                "type": "object",
                "properties": {"location": {"type": "string"}},
                "required": ["location"],
                "additionalProperties": false,
            }),
        );
        let request = ChatRequest::builder()
            .model("gpt-4o-mini")
            .tool_choice("auto")
            .user_message("hi")
            .tool(tool)
            .build();

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["tool_choice"], json!("auto"));
        assert_eq!(value["tools"][0]["type"], json!("function"));
        assert_eq!(value["tools"][0]["function"]["name"], json!("get_weather"));
        assert_eq!(
            value["tools"][0]["function"]["parameters"]["required"],
            json!(["location"])
        );
        assert_eq!(
            value["tools"][0]["function"]["parameters"]["additionalProperties"],
            json!(false)
        );
    }

    #[test]
    fn test_assistant_null_content_round_trip() {
        let raw = json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_9",
                "type": "function",
                "function": {"name": "get_weather", "arguments": "{}"}
            }]
        });
        let msg: Message = serde_json::from_value(raw).unwrap();
        assert!(msg.content.is_none());
        let calls = msg.tool_calls.as_ref().unwrap();
        assert_eq!(calls[0].id, "call_9");
        assert_eq!(calls[0].function.arguments.as_deref(), Some("{}"));

        // None fields are dropped on the wire, not serialized as null
        let value = serde_json::to_value(&msg).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("content"));
        assert!(!object.contains_key("tool_call_id"));
    }

    #[test]
    fn test_tool_call_without_arguments() {
        let raw = json!({
            "id": "call_0",
            "type": "function",
            "function": {"name": "get_weather"}
        });
        let call: ToolCall = serde_json::from_value(raw).unwrap();
        assert!(call.function.arguments.is_none());
    }

    #[test]
    fn test_model_string_conversion() {
        let model: Model = "gpt-4o-mini".into();
        assert_eq!(model, Model::Gpt4oMini);
        assert_eq!(model.as_str(), "gpt-4o-mini");
        assert_eq!(model.to_string(), "gpt-4o-mini");
    }

    #[test]
    fn test_model_custom() {
        let model: Model = "llama-3.1-8b".into();
        assert!(matches!(model, Model::Custom(ref s) if s == "llama-3.1-8b"));
        assert_eq!(model.as_str(), "llama-3.1-8b");
        assert_eq!(model.to_string(), "llama-3.1-8b");
    }

    #[test]
    fn test_model_serde() {
        let model: Model = serde_json::from_value(json!("gpt-4o-mini")).unwrap();
        assert_eq!(model, Model::Gpt4oMini);
        let custom: Model = serde_json::from_value(json!("grok-2")).unwrap();
        assert_eq!(custom, Model::Custom("grok-2".to_string()));
        assert_eq!(serde_json::to_value(&custom).unwrap(), json!("grok-2"));
    }

    #[test]
    fn test_client_builder() {
        let client = OpenAi::builder()
            .api_key("test-key")
            .base_url("https://custom.api.com/v1")
            .build();
        assert_eq!(client.base_url(), "https://custom.api.com/v1");
    }

    #[test]
    fn test_client_default_base_url() {
        let client = OpenAi::new("test-key");
        assert_eq!(client.base_url(), "https://api.openai.com/v1");
    }
}
