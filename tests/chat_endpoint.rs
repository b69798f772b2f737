#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chat_relay::error::RelayError;
    use chat_relay::llm::{ChatClient, CompletionResponse};
    use chat_relay::models::chat::{ChatErrorResponse, ChatResponse};
    use chat_relay::server::api;
    use chrono::DateTime;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    enum Script {
        Reply(&'static str),
        UpstreamStatus(u16, &'static str),
        Empty,
    }

    struct ScriptedClient {
        script: Script,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(script: Script) -> Arc<Self> {
            Arc::new(Self {
                script,
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatClient for ScriptedClient {
        async fn complete(&self, prompt: &str) -> Result<CompletionResponse, RelayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.script {
                Script::Reply(text) => Ok(CompletionResponse {
                    response: text.to_string(),
                }),
                Script::UpstreamStatus(status, body) => Err(RelayError::Upstream {
                    status,
                    body: body.to_string(),
                }),
                Script::Empty => Err(RelayError::UpstreamEmptyResponse),
            }
        }
    }

    async fn spawn_relay(client: Option<Arc<dyn ChatClient>>) -> String {
        let app = api::router(client);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app.into_make_service()).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn successful_reply_round_trips() {
        let upstream = ScriptedClient::new(Script::Reply("I'm fine"));
        let base = spawn_relay(Some(upstream.clone() as Arc<dyn ChatClient>)).await;

        let resp = reqwest::Client::new()
            .post(format!("{}/chat", base))
            .json(&json!({"message": "Hello"}))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );

        let body = resp.json::<ChatResponse>().await.unwrap();
        assert_eq!(body.response, "I'm fine");
        assert!(body.success);
        assert!(DateTime::parse_from_rfc3339(&body.timestamp).is_ok());

        assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);
        assert_eq!(upstream.prompts.lock().unwrap()[0], "Hello");
    }

    #[tokio::test]
    async fn history_is_retruncated_before_prompting() {
        let upstream = ScriptedClient::new(Script::Reply("ok"));
        let base = spawn_relay(Some(upstream.clone() as Arc<dyn ChatClient>)).await;

        let history: Vec<_> = (0..12)
            .map(|i| json!({"role": "user", "content": format!("h-{}", i)}))
            .collect();
        let resp = reqwest::Client::new()
            .post(format!("{}/chat", base))
            .json(&json!({"message": "latest", "conversationHistory": history}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let prompts = upstream.prompts.lock().unwrap();
        let lines: Vec<&str> = prompts[0].lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[1], "user: h-2");
        assert_eq!(lines[10], "user: h-11");
        assert!(!prompts[0].contains("h-1\n"));
    }

    #[tokio::test]
    async fn empty_message_never_reaches_upstream() {
        let upstream = ScriptedClient::new(Script::Reply("unused"));
        let base = spawn_relay(Some(upstream.clone() as Arc<dyn ChatClient>)).await;

        for body in [json!({"message": ""}), json!({})] {
            let resp = reqwest::Client::new()
                .post(format!("{}/chat", base))
                .json(&body)
                .send()
                .await
                .unwrap();

            assert_eq!(resp.status(), 500);
            let err = resp.json::<ChatErrorResponse>().await.unwrap();
            assert!(!err.success);
            assert_eq!(err.error, "Message is required");
            assert!(DateTime::parse_from_rfc3339(&err.timestamp).is_ok());
        }

        assert_eq!(upstream.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_credential_rejects_before_upstream() {
        let base = spawn_relay(None).await;

        let resp = reqwest::Client::new()
            .post(format!("{}/chat", base))
            .json(&json!({"message": "Hello"}))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 500);
        let err = resp.json::<ChatErrorResponse>().await.unwrap();
        assert!(!err.success);
        assert!(err.error.contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_status_in_error() {
        let upstream = ScriptedClient::new(Script::UpstreamStatus(503, "service unavailable"));
        let base = spawn_relay(Some(upstream as Arc<dyn ChatClient>)).await;

        let resp = reqwest::Client::new()
            .post(format!("{}/chat", base))
            .json(&json!({"message": "Hello"}))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 500);
        let err = resp.json::<ChatErrorResponse>().await.unwrap();
        assert!(!err.success);
        assert!(err.error.contains("503"));
        assert!(err.error.contains("service unavailable"));
    }

    #[tokio::test]
    async fn empty_upstream_candidates_surface_as_error() {
        let upstream = ScriptedClient::new(Script::Empty);
        let base = spawn_relay(Some(upstream as Arc<dyn ChatClient>)).await;

        let resp = reqwest::Client::new()
            .post(format!("{}/chat", base))
            .json(&json!({"message": "Hello"}))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 500);
        let err = resp.json::<ChatErrorResponse>().await.unwrap();
        assert_eq!(err.error, "No response from Gemini API");
    }

    #[tokio::test]
    async fn malformed_body_flows_through_error_envelope() {
        let upstream = ScriptedClient::new(Script::Reply("unused"));
        let base = spawn_relay(Some(upstream.clone() as Arc<dyn ChatClient>)).await;

        let resp = reqwest::Client::new()
            .post(format!("{}/chat", base))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 500);
        let err = resp.json::<ChatErrorResponse>().await.unwrap();
        assert!(!err.success);
        assert!(err.error.contains("Invalid chat request"));
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn preflight_skips_validation_and_upstream() {
        let upstream = ScriptedClient::new(Script::Reply("unused"));
        let base = spawn_relay(Some(upstream.clone() as Arc<dyn ChatClient>)).await;

        let resp = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("{}/chat", base))
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "POST")
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
        assert!(resp.text().await.unwrap().is_empty());
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn healthz_answers_ok() {
        let base = spawn_relay(None).await;
        let resp = reqwest::get(format!("{}/healthz", base)).await.unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.text().await.unwrap(), "OK");
    }
}
