use tripcast_openai::OpenAi;

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY and makes real API calls"]
async fn chat_completion_round_trip() {
    let client = OpenAi::from_env().expect("OPENAI_API_KEY must be set for live tests");

    let request = client
        .chat()
        .model("gpt-4o-mini")
        .user_message("Say 'hello' in one word")
        .max_tokens(5)
        .temperature(0.0)
        .build();

    let response = client.send(&request).await.unwrap();
    assert!(!response.choices.is_empty());
    assert!(response.content().is_some());
    assert!(response.usage.is_some());
}
