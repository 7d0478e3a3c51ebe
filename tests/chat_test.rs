use moodlens::server;

async fn spawn_server() -> Result<String, Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, server::routes())
            .await
            .expect("chat server crashed");
    });
    Ok(format!("http://{}/chat", addr))
}

#[tokio::test]
async fn test_chat_echoes_message() -> Result<(), Box<dyn std::error::Error>> {
    let url = spawn_server().await?;
    let client = reqwest::Client::new();

    let response = client
        .post(&url)
        .json(&serde_json::json!({ "message": "I feel low" }))
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: serde_json::Value = response.json().await?;
    let reply = body["reply"].as_str().expect("reply should be a string");
    assert!(reply.contains("I feel low"));
    Ok(())
}

#[tokio::test]
async fn test_chat_empty_message_gets_default_prompt() -> Result<(), Box<dyn std::error::Error>> {
    let url = spawn_server().await?;
    let client = reqwest::Client::new();

    let response = client
        .post(&url)
        .json(&serde_json::json!({ "message": "" }))
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["reply"], server::DEFAULT_PROMPT);
    Ok(())
}

#[tokio::test]
async fn test_chat_missing_message_gets_default_prompt() -> Result<(), Box<dyn std::error::Error>> {
    let url = spawn_server().await?;
    let client = reqwest::Client::new();

    let response = client
        .post(&url)
        .json(&serde_json::json!({}))
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["reply"], server::DEFAULT_PROMPT);
    Ok(())
}
