//! Integration tests for clearing conversation history

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serial_test::serial;
    use tower::util::ServiceExt;

    use crate::test_utils::{
        body_to_json, completion_body, test_app_with, test_assistant_with_llm, test_config,
    };

    fn clear_request(body: Body) -> Request<Body> {
        Request::builder()
            .uri("/api/clear-history")
            .method("POST")
            .header("content-type", "application/json")
            .body(body)
            .unwrap()
    }

    /// Tests clearing a single conversation and then all of them
    #[tokio::test]
    #[serial]
    async fn it_clears_one_then_all_conversations() {
        let mut llm = mockito::Server::new_async().await;
        llm.mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(completion_body("¡Qué onda! ¿Qué se te antoja? 🍔"))
            .create_async()
            .await;

        let assistant = test_assistant_with_llm(&llm.url());
        for chat in ["a@c.us", "b@c.us", "c@c.us"] {
            assistant.handle_inbound_message(chat, "hola", chat, "Ana").await;
        }
        assert_eq!(assistant.conversations().len(), 3);
        let app = test_app_with(test_config(), assistant.clone());

        let response = app
            .clone()
            .oneshot(clear_request(Body::from(r#"{"chatId": "a@c.us"}"#)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response).await;
        assert_eq!(body["status"], "Historial de a@c.us limpiado");
        assert_eq!(body["cleared"], 1);
        assert!(assistant.conversations().get("a@c.us").is_none());
        assert_eq!(assistant.conversations().len(), 2);

        // No body at all clears everything
        let response = app.oneshot(clear_request(Body::empty())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response).await;
        assert_eq!(body["status"], "Todos los historiales limpiados");
        assert_eq!(body["cleared"], 2);
        assert!(assistant.conversations().is_empty());
    }
}
