use crate::domain::model::{CleanedRecord, LoadError, LoadResult, Row};
use crate::domain::ports::{ConfigProvider, TableWriter};
use crate::utils::error::Result;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;

/// Row inserts and updates against a PostgREST-style `/rest/v1/{table}` endpoint.
pub struct RestTable<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> RestTable<C> {
    pub fn new(config: C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;
        Ok(Self { config, client })
    }

    pub fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url().trim_end_matches('/'),
            self.config.table()
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.config.api_key();
        request
            .header("apikey", key)
            .header(AUTHORIZATION, format!("Bearer {}", key))
            .header(CONTENT_TYPE, "application/json")
    }
}

fn transport(err: reqwest::Error) -> LoadError {
    LoadError::Transport(err.to_string())
}

#[async_trait::async_trait]
impl<C: ConfigProvider> TableWriter for RestTable<C> {
    async fn insert_row(&self, row: &CleanedRecord) -> LoadResult<()> {
        let url = self.table_url();
        tracing::debug!("POST {} ({} fields)", url, row.data().len());

        let response = self
            .authorized(self.client.post(&url))
            .header("Prefer", "return=minimal")
            .json(row.data())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        tracing::debug!("Insert response status: {}", status);

        if status == StatusCode::OK || status == StatusCode::CREATED {
            return Ok(());
        }

        let body = response.text().await.map_err(transport)?;
        Err(LoadError::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    async fn update_row(&self, id: &str, changes: &Row) -> LoadResult<Option<serde_json::Value>> {
        let url = self.table_url();
        tracing::debug!("PATCH {} id={}", url, id);

        let response = self
            .authorized(self.client.patch(&url))
            .query(&[("id", format!("eq.{}", id)), ("select", "id,title".to_string())])
            .header("Prefer", "return=representation")
            .json(changes)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(transport)?;
            return Err(LoadError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let updated: serde_json::Value = response.json().await.map_err(transport)?;
        Ok(match updated {
            serde_json::Value::Array(mut rows) if !rows.is_empty() => Some(rows.swap_remove(0)),
            serde_json::Value::Array(_) | serde_json::Value::Null => None,
            single => Some(single),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cleaner::clean_record;
    use crate::domain::model::Record;
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use serde_json::json;

    struct MockConfig {
        base_url: String,
    }

    impl ConfigProvider for MockConfig {
        fn base_url(&self) -> &str {
            &self.base_url
        }

        fn api_key(&self) -> &str {
            "anon-key"
        }

        fn table(&self) -> &str {
            "projects"
        }

        fn timeout_seconds(&self) -> u64 {
            5
        }
    }

    fn table(base_url: String) -> RestTable<MockConfig> {
        RestTable::new(MockConfig { base_url }).unwrap()
    }

    fn cleaned(value: serde_json::Value) -> CleanedRecord {
        match value {
            serde_json::Value::Object(data) => clean_record(&Record { data }),
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn test_insert_sends_auth_headers_and_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/rest/v1/projects")
                .header("apikey", "anon-key")
                .header("authorization", "Bearer anon-key")
                .header("prefer", "return=minimal")
                .json_body(json!({"title": "Alpha", "deposit_amount": 0}));
            then.status(201);
        });

        let table = table(server.base_url());
        let result = table
            .insert_row(&cleaned(json!({"title": "Alpha", "notes": "", "deposit_amount": 0})))
            .await;

        api_mock.assert();
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_insert_accepts_200() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/rest/v1/projects");
            then.status(200).json_body(json!([]));
        });

        let table = table(format!("{}/", server.base_url()));
        assert!(table.insert_row(&cleaned(json!({"title": "A"}))).await.is_ok());
        api_mock.assert();
    }

    #[tokio::test]
    async fn test_insert_rejection_keeps_body_verbatim() {
        let server = MockServer::start();
        let body = r#"{"code":"23502","message":"null value in column \"title\""}"#;
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/rest/v1/projects");
            then.status(400).body(body);
        });

        let table = table(server.base_url());
        let err = table
            .insert_row(&cleaned(json!({"company_name": "Acme"})))
            .await
            .unwrap_err();

        api_mock.assert();
        assert_eq!(
            err,
            LoadError::Rejected {
                status: 400,
                body: body.to_string()
            }
        );
        assert_eq!(err.to_string(), body);
    }

    #[tokio::test]
    async fn test_insert_204_is_not_success() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/rest/v1/projects");
            then.status(204);
        });

        let table = table(server.base_url());
        let err = table.insert_row(&cleaned(json!({"title": "A"}))).await.unwrap_err();
        assert!(matches!(err, LoadError::Rejected { status: 204, .. }));
    }

    #[tokio::test]
    async fn test_transport_failures() {
        // nothing listens on port 1
        let table = table("http://127.0.0.1:1".to_string());
        let err = table.insert_row(&cleaned(json!({"title": "A"}))).await.unwrap_err();
        assert!(matches!(err, LoadError::Transport(_)));

        // missing base URL fails on first use rather than at construction
        let table = RestTable::new(MockConfig {
            base_url: String::new(),
        })
        .unwrap();
        assert_eq!(table.table_url(), "/rest/v1/projects");
        let err = table.insert_row(&cleaned(json!({"title": "A"}))).await.unwrap_err();
        assert!(matches!(err, LoadError::Transport(_)));
    }

    #[tokio::test]
    async fn test_update_returns_first_row_or_none() {
        let server = MockServer::start();
        let found = server.mock(|when, then| {
            when.method(PATCH)
                .path("/rest/v1/projects")
                .query_param("id", "eq.7")
                .query_param("select", "id,title")
                .header("prefer", "return=representation")
                .json_body(json!({"sales_source": "Referral"}));
            then.status(200).json_body(json!([{"id": 7, "title": "Alpha"}]));
        });
        let missing = server.mock(|when, then| {
            when.method(PATCH)
                .path("/rest/v1/projects")
                .query_param("id", "eq.8");
            then.status(200).json_body(json!([]));
        });

        let table = table(server.base_url());
        let mut changes = Row::new();
        changes.insert("sales_source".to_string(), json!("Referral"));

        let updated = table.update_row("7", &changes).await.unwrap();
        assert_eq!(updated, Some(json!({"id": 7, "title": "Alpha"})));

        let none = table.update_row("8", &changes).await.unwrap();
        assert_eq!(none, None);

        found.assert();
        missing.assert();
    }
}
