//! Client Module Tests
//!
//! Drives the client façade through a scripted transport.
//!
//! ## Test Scopes
//! - **Schema calls**: Paths, methods and JSON payloads for index and frame management.
//! - **Queries**: Request envelope contents and response decoding.
//! - **Blocking bridge**: Synchronous calls over the async client, including host eviction.
//! - **Configuration**: Environment-driven settings.

#[cfg(test)]
mod tests {
    use crate::client::config::{DEFAULT_WORKER_THREADS, ENV_HOSTS, ENV_WORKER_THREADS};
    use crate::client::protocol::{
        self, AttrMessage, BitmapMessage, ColumnAttrSetMessage, PairMessage, QueryRequest,
        QueryResponseMessage, QueryResultMessage,
    };
    use crate::client::{BlockingClient, Client, ClientConfig, QueryOptions};
    use crate::cluster::mock::{ScriptedTransport, refused, respond};
    use crate::cluster::{Endpoint, HttpMethod};
    use crate::error::Error;
    use crate::orm::{AttributeValue, Index, IndexOptions, TimeQuantum};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn client_with(transport: Arc<ScriptedTransport>) -> Client {
        Client::with_transport(vec![Endpoint::default()], transport)
    }

    fn json_body(body: &Option<Vec<u8>>) -> serde_json::Value {
        serde_json::from_slice(body.as_deref().expect("request has a body")).unwrap()
    }

    // ============================================================
    // SCHEMA CALL TESTS
    // ============================================================

    #[tokio::test]
    async fn test_status_returns_body_text() {
        let transport = ScriptedTransport::new(vec![respond(200, b"{\"state\":\"NORMAL\"}")]);
        let client = client_with(transport.clone());

        let status = client.status().await.unwrap();

        assert_eq!(status, "{\"state\":\"NORMAL\"}");
        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].url, "http://localhost:10101/status");
    }

    #[tokio::test]
    async fn test_status_rejects_non_utf8_body() {
        let transport = ScriptedTransport::new(vec![respond(200, &[0xc3, 0x28])]);
        let client = client_with(transport);

        let result = client.status().await;
        assert!(matches!(result, Err(Error::DecodeFailed { status: 200, .. })));
    }

    #[tokio::test]
    async fn test_create_index_with_time_quantum_patches_after_create() {
        let transport = ScriptedTransport::new(vec![respond(200, b""), respond(200, b"")]);
        let client = client_with(transport.clone());
        let index = Index::with_options(
            "repos",
            IndexOptions {
                column_label: "repo_id".to_string(),
                time_quantum: TimeQuantum::YearMonth,
            },
        )
        .unwrap();

        client.create_index(&index).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].url, "http://localhost:10101/index/repos");
        assert_eq!(
            json_body(&requests[0].body),
            serde_json::json!({"options": {"columnLabel": "repo_id"}})
        );
        assert_eq!(requests[1].method, HttpMethod::Patch);
        assert_eq!(requests[1].url, "http://localhost:10101/index/repos/time-quantum");
        assert_eq!(
            json_body(&requests[1].body),
            serde_json::json!({"timeQuantum": "YM"})
        );
    }

    #[tokio::test]
    async fn test_create_index_without_quantum_sends_one_request() {
        let transport = ScriptedTransport::new(vec![respond(200, b"")]);
        let client = client_with(transport.clone());

        client.create_index(&Index::new("repos").unwrap()).await.unwrap();

        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_create_skips_time_quantum() {
        let transport = ScriptedTransport::new(vec![respond(409, b"index already exists\n")]);
        let client = client_with(transport.clone());
        let index = Index::with_options(
            "repos",
            IndexOptions {
                time_quantum: TimeQuantum::Day,
                ..IndexOptions::default()
            },
        )
        .unwrap();

        let result = client.create_index(&index).await;

        assert!(matches!(result, Err(Error::IndexAlreadyExists)));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_index_and_frame_tolerate_existing() {
        let transport = ScriptedTransport::new(vec![
            respond(409, b"index already exists\n"),
            respond(409, b"frame already exists\n"),
        ]);
        let client = client_with(transport.clone());
        let index = Index::new("repos").unwrap();
        let frame = index.frame("language").unwrap();

        client.ensure_index(&index).await.unwrap();
        client.ensure_frame(&frame).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[1].url, "http://localhost:10101/index/repos/frame/language");
        assert_eq!(
            json_body(&requests[1].body),
            serde_json::json!({"options": {"rowLabel": "rowID"}})
        );
    }

    #[tokio::test]
    async fn test_ensure_frame_surfaces_other_errors() {
        let transport = ScriptedTransport::new(vec![respond(500, b"disk full")]);
        let client = client_with(transport);
        let frame = Index::new("repos").unwrap().frame("language").unwrap();

        let result = client.ensure_frame(&frame).await;
        assert!(matches!(result, Err(Error::Server { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_delete_calls() {
        let transport = ScriptedTransport::new(vec![respond(200, b""), respond(200, b"")]);
        let client = client_with(transport.clone());
        let index = Index::new("repos").unwrap();
        let frame = index.frame("language").unwrap();

        client.delete_frame(&frame).await.unwrap();
        client.delete_index(&index).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Delete);
        assert_eq!(requests[0].url, "http://localhost:10101/index/repos/frame/language");
        assert!(requests[0].body.is_none());
        assert_eq!(requests[1].method, HttpMethod::Delete);
        assert_eq!(requests[1].url, "http://localhost:10101/index/repos");
    }

    // ============================================================
    // QUERY TESTS
    // ============================================================

    fn sample_response() -> QueryResponseMessage {
        QueryResponseMessage {
            err: String::new(),
            results: vec![QueryResultMessage {
                n: 3,
                bitmap: BitmapMessage {
                    bits: vec![1, 5, 9],
                    attrs: vec![
                        AttrMessage::new("name", &AttributeValue::from("rust")),
                        AttrMessage::new("stars", &AttributeValue::Integer(42)),
                    ],
                },
                pairs: vec![PairMessage { key: 7, count: 11 }],
            }],
            column_attr_sets: vec![ColumnAttrSetMessage {
                id: 5,
                attrs: vec![AttrMessage::new("active", &AttributeValue::Boolean(true))],
            }],
        }
    }

    #[tokio::test]
    async fn test_query_sends_envelope_and_decodes_response() {
        let body = protocol::encode(&sample_response()).unwrap();
        let transport = ScriptedTransport::new(vec![respond(200, &body)]);
        let client = client_with(transport.clone());
        let frame = Index::new("repos").unwrap().frame("language").unwrap();

        let response = client
            .query(
                frame.bitmap(1).union(frame.bitmap(2)),
                QueryOptions {
                    columns: true,
                    time_quantum: TimeQuantum::YearMonthDay,
                },
            )
            .await
            .unwrap();

        // ASSERT: request envelope
        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].url, "http://localhost:10101/index/repos/query");
        let sent: QueryRequest =
            protocol::decode(200, requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(
            sent.query,
            "Union(Bitmap(rowID=1, frame='language'), Bitmap(rowID=2, frame='language'))"
        );
        assert!(sent.column_attrs);
        assert_eq!(sent.quantum, "YMD");

        // ASSERT: decoded response
        let result = response.result().unwrap();
        assert_eq!(result.count, 3);
        assert_eq!(result.bitmap.bits, vec![1, 5, 9]);
        assert_eq!(
            result.bitmap.attributes["name"],
            AttributeValue::String("rust".to_string())
        );
        assert_eq!(result.bitmap.attributes["stars"], AttributeValue::Integer(42));
        assert_eq!(result.count_items[0].id, 7);
        assert_eq!(result.count_items[0].count, 11);
        assert_eq!(response.columns[0].id, 5);
        assert_eq!(
            response.columns[0].attributes["active"],
            AttributeValue::Boolean(true)
        );
        assert!(response.error.is_empty());
    }

    #[tokio::test]
    async fn test_query_unknown_attribute_type() {
        let mut message = sample_response();
        message.results[0].bitmap.attrs[0].attr_type = 9;
        let body = protocol::encode(&message).unwrap();
        let transport = ScriptedTransport::new(vec![respond(200, &body)]);
        let client = client_with(transport);
        let index = Index::new("repos").unwrap();

        let result = client
            .query(index.raw("Bitmap(rowID=1, frame='f')"), QueryOptions::default())
            .await;

        assert!(matches!(result, Err(Error::InvalidAttributeType(9))));
    }

    #[tokio::test]
    async fn test_query_malformed_body() {
        let transport = ScriptedTransport::new(vec![respond(200, b"\x01")]);
        let client = client_with(transport);
        let index = Index::new("repos").unwrap();

        let result = client.query(index.raw("Count(x)"), QueryOptions::default()).await;

        assert!(matches!(result, Err(Error::DecodeFailed { status: 200, .. })));
    }

    // ============================================================
    // BLOCKING BRIDGE TESTS
    // ============================================================

    #[test]
    fn test_blocking_client_returns_outcome() {
        let transport = ScriptedTransport::new(vec![respond(200, b"ok")]);
        let blocking = BlockingClient::with_client(client_with(transport), 1).unwrap();

        assert_eq!(blocking.status().unwrap(), "ok");
    }

    #[test]
    fn test_blocking_client_evicts_and_fails_over() {
        // ARRANGE: first host refuses, second answers
        let transport = ScriptedTransport::new(vec![refused(), respond(200, b"ok")]);
        let second = Endpoint::new("http", "node-b", 10101);
        let client = Client::with_transport(
            vec![Endpoint::new("http", "node-a", 10101), second.clone()],
            transport.clone(),
        );
        let blocking = BlockingClient::with_client(client, 1).unwrap();

        // ACT + ASSERT: the failing call reports the refusal
        assert!(matches!(blocking.status(), Err(Error::HostUnreachable(_))));

        // ACT + ASSERT: the next call lands on the surviving host
        assert_eq!(blocking.status().unwrap(), "ok");
        assert_eq!(transport.requests()[1].url, "http://node-b:10101/status");

        let hosts = blocking.client().hosts().clone();
        let remaining = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(async move { hosts.hosts().await });
        assert_eq!(remaining, vec![second]);
    }

    #[test]
    fn test_blocking_client_with_no_hosts() {
        let transport = ScriptedTransport::new(vec![]);
        let client = Client::with_transport(vec![], transport.clone());
        let blocking = BlockingClient::with_client(client, 1).unwrap();

        assert!(matches!(blocking.status(), Err(Error::NoHosts)));
        assert!(transport.requests().is_empty());
    }

    // ============================================================
    // CONFIGURATION TESTS
    // ============================================================

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.hosts, vec![Endpoint::default()]);
        assert_eq!(config.worker_threads, DEFAULT_WORKER_THREADS);
    }

    #[test]
    fn test_config_from_vars() {
        let config = ClientConfig::from_vars(vars(&[
            (ENV_HOSTS, "http://node1:10101, node2 ,,:9000"),
            (ENV_WORKER_THREADS, "4"),
        ]))
        .unwrap();

        assert_eq!(
            config.hosts,
            vec![
                Endpoint::new("http", "node1", 10101),
                Endpoint::new("http", "node2", 10101),
                Endpoint::new("http", "localhost", 9000),
            ]
        );
        assert_eq!(config.worker_threads, 4);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(matches!(
            ClientConfig::from_vars(vars(&[(ENV_HOSTS, "bad host!")])),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            ClientConfig::from_vars(vars(&[(ENV_WORKER_THREADS, "0")])),
            Err(Error::Validation(_))
        ));
    }
}
