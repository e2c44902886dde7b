//! Integration tests for the webhook API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use mockito::Matcher;
    use serial_test::serial;
    use tower::util::ServiceExt;

    use crate::test_utils::{
        IGNORED_CONTACT, body_to_json, completion_body, test_app, test_app_with,
        test_assistant, test_assistant_with_llm, test_config,
    };

    fn message_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .uri("/webhook/message")
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Tests the keyword responder answers when no model is configured
    #[tokio::test]
    async fn it_replies_with_fallback_without_model() {
        let app = test_app();

        let response = app
            .oneshot(message_request(serde_json::json!({
                "chatId": "5219221234567@c.us",
                "message": "hola",
                "sender": "5219221234567@c.us",
                "senderName": "Ana",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["auto_sent"], false);
        assert!(
            body["response"]
                .as_str()
                .unwrap()
                .contains("Bienvenido a *Sr y Sra Burger*")
        );
    }

    /// Tests an empty message is rejected
    #[tokio::test]
    async fn it_returns_400_for_empty_message() {
        let app = test_app();

        let response = app
            .oneshot(message_request(serde_json::json!({
                "chatId": "5219221234567@c.us",
                "message": "   ",
                "sender": "5219221234567@c.us",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_to_json(response).await;
        assert_eq!(body["error"], "Empty message");
    }

    /// Tests messages from ignored contacts are not answered
    #[tokio::test]
    async fn it_ignores_configured_contacts() {
        let assistant = test_assistant();
        let app = test_app_with(test_config(), assistant.clone());

        let response = app
            .oneshot(message_request(serde_json::json!({
                "chatId": "x@c.us",
                "message": "hola",
                "sender": format!("{}@c.us", IGNORED_CONTACT),
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response).await;
        assert_eq!(body["status"], "ignored");
        assert!(body.get("response").is_none());
    }

    /// Tests a reply is sent back through the bridge when auto reply
    /// is on and counted in the stats
    #[tokio::test]
    #[serial]
    async fn it_auto_sends_reply_through_bridge() {
        let mut bridge = mockito::Server::new_async().await;
        let mock = bridge
            .mock("POST", "/send")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "chatId": "5219221234567@c.us",
            })))
            .with_status(200)
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        let mut config = test_config();
        config.bridge_url = bridge.url();
        config.auto_reply = true;
        let app = test_app_with(config, test_assistant());

        let response = app
            .clone()
            .oneshot(message_request(serde_json::json!({
                "chatId": "5219221234567@c.us",
                "message": "menu",
                "sender": "5219221234567@c.us",
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response).await;
        assert_eq!(body["auto_sent"], true);
        mock.assert_async().await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let stats = body_to_json(response).await;
        assert_eq!(stats["messages_received"], 1);
        assert_eq!(stats["messages_sent"], 1);
        assert_eq!(stats["errors"], 0);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/messages/recent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response).await;
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["direction"], "incoming");
        assert_eq!(messages[0]["sender"], "5219221234567@c.us");
        assert_eq!(messages[0]["message"], "menu");
        assert_eq!(messages[1]["direction"], "outgoing");
        assert_eq!(messages[1]["sender"], "🤖 Bot");
        assert!(messages[1]["message"].as_str().unwrap().ends_with("..."));
    }

    /// Tests a bridge failure still returns the reply and counts an
    /// error
    #[tokio::test]
    #[serial]
    async fn it_counts_bridge_failures() {
        let mut bridge = mockito::Server::new_async().await;
        bridge
            .mock("POST", "/send")
            .with_status(503)
            .create_async()
            .await;

        let mut config = test_config();
        config.bridge_url = bridge.url();
        config.auto_reply = true;
        let app = test_app_with(config, test_assistant());

        let response = app
            .clone()
            .oneshot(message_request(serde_json::json!({
                "chatId": "a@c.us",
                "message": "horario",
                "sender": "a@c.us",
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let stats = body_to_json(response).await;
        assert_eq!(stats["messages_sent"], 0);
        assert_eq!(stats["errors"], 1);
    }

    /// Tests a confirmation from the model records an order that shows
    /// up in the orders API
    #[tokio::test]
    #[serial]
    async fn it_records_order_confirmed_by_model() {
        let mut llm = mockito::Server::new_async().await;
        let breakdown = "*Tu pedido:*\n• 2 Hot Dog Jumbo — $130\n• 1 Sencilla — $90\n──────\n*Total: $220* 💰";
        let confirmation = "¡Listo, *Ana*, tu pedido queda confirmado! ✅ En unos minutos te avisamos cuando esté listo 🍔";

        let assistant = test_assistant_with_llm(&llm.url());
        let app = test_app_with(test_config(), assistant.clone());

        // Each exchange gets its own scripted completion
        for (message, reply) in [
            ("2 hot dog jumbo y una sencilla para recoger", breakdown),
            ("pago con transferencia", confirmation),
        ] {
            let mock = llm
                .mock("POST", "/v1/chat/completions")
                .with_status(200)
                .with_body(completion_body(reply))
                .expect(1)
                .create_async()
                .await;

            let response = app
                .clone()
                .oneshot(message_request(serde_json::json!({
                    "chatId": "5219221234567@c.us",
                    "message": message,
                    "sender": "5219221234567@c.us",
                    "senderName": "Ana",
                })))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body = body_to_json(response).await;
            assert_eq!(body["response"], reply);

            mock.assert_async().await;
            mock.remove_async().await;
        }

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/orders")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_to_json(response).await;
        let orders = body["orders"].as_array().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0]["id"], 1);
        assert_eq!(orders[0]["customer_name"], "Ana");
        assert_eq!(orders[0]["items_breakdown"], breakdown);
        assert_eq!(orders[0]["payment_method"], "transfer");
        assert_eq!(orders[0]["delivery_type"], "pickup");
        assert_eq!(orders[0]["status"], "new");
    }

    /// Tests a model outage falls back to the keyword responder
    #[tokio::test]
    #[serial]
    async fn it_falls_back_when_model_fails() {
        let mut llm = mockito::Server::new_async().await;
        let mock = llm
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("internal error")
            .expect(1)
            .create_async()
            .await;

        let app = test_app_with(test_config(), test_assistant_with_llm(&llm.url()));
        let response = app
            .oneshot(message_request(serde_json::json!({
                "chatId": "a@c.us",
                "message": "dónde están?",
                "sender": "a@c.us",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response).await;
        assert!(
            body["response"]
                .as_str()
                .unwrap()
                .contains("Coahuila #36, Colonia Emiliano Zapata")
        );
        mock.assert_async().await;
    }
}
