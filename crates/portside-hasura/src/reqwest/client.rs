//! Reqwest-based HTTP client for the gateway metadata API.

use std::sync::Arc;

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{Value, json};

use super::outcome::{
    RawResponse, classify_add_source, classify_create_permission, classify_drop_permission,
    classify_drop_source, classify_track_table, classify_untrack_table,
};
use super::{Error, HasuraConfig, TRACING_TARGET};
use crate::types::{
    AddSourceOutcome, CreatePermissionOutcome, DataSourceConfig, DropPermissionOutcome,
    DropSourceOutcome, GatewayHealth, QualifiedTable, RunSqlRequest, SourceKind, TableConfig,
    TrackTableOutcome, UntrackTableOutcome,
};
use crate::{CLEAR_METADATA_CONFIRMATION, MetadataProvider, MetadataService};

/// Inner client that holds the HTTP client, endpoints and configuration.
struct HasuraClientInner {
    http: Client,
    metadata_url: String,
    query_url: String,
    health_url: String,
}

/// Reqwest-based client for the gateway's administrative surface.
///
/// This client implements the [`MetadataProvider`] trait. Every request
/// carries the fixed admin role header and the admin secret; outcome
/// classification is shared across operations (see the `outcome` module).
#[derive(Clone)]
pub struct HasuraClient {
    inner: Arc<HasuraClientInner>,
}

impl std::fmt::Debug for HasuraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HasuraClient")
            .field("metadata_url", &self.inner.metadata_url)
            .finish_non_exhaustive()
    }
}

impl HasuraClient {
    /// Creates a new client from the given configuration.
    ///
    /// Fails with a configuration error when the admin secret cannot be
    /// carried in a header value.
    pub fn new(config: HasuraConfig) -> crate::Result<Self> {
        let base = config.base_url();
        let metadata_url = format!("{base}v1/metadata");
        let query_url = format!("{base}v2/query");
        let health_url = format!("{base}healthz");

        let mut headers = HeaderMap::new();
        headers.insert("X-Hasura-Role", HeaderValue::from_static("admin"));
        let mut admin_secret = HeaderValue::from_str(&config.admin_secret)
            .map_err(|err| crate::Error::config("invalid admin secret").with_source(err))?;
        admin_secret.set_sensitive(true);
        headers.insert("X-Hasura-Admin-Secret", admin_secret);

        tracing::debug!(
            target: TRACING_TARGET,
            metadata_url = %metadata_url,
            timeout_ms = config.effective_timeout().as_millis(),
            "Creating gateway client"
        );

        let http = Client::builder()
            .timeout(config.effective_timeout())
            .default_headers(headers)
            .build()
            .map_err(|err| crate::Error::config("failed to create HTTP client").with_source(err))?;

        let inner = HasuraClientInner {
            http,
            metadata_url,
            query_url,
            health_url,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Converts this client into a [`MetadataService`] for use with
    /// dependency injection.
    pub fn into_service(self) -> MetadataService {
        MetadataService::new(self)
    }

    /// Posts a metadata operation and returns the HTTP status plus the
    /// parsed response body.
    async fn post_metadata(&self, body: &Value) -> Result<(u16, Value), Error> {
        self.post_json(&self.inner.metadata_url, body).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<(u16, Value), Error> {
        tracing::debug!(
            target: TRACING_TARGET,
            url = %url,
            operation = body.get("type").and_then(serde_json::Value::as_str).unwrap_or("unknown"),
            "Calling gateway"
        );

        let response = self.inner.http.post(url).json(body).send().await?;
        let status = response.status().as_u16();
        // Error bodies are not guaranteed to be JSON; classification treats
        // an unreadable body like an absent one.
        let body = response.json::<Value>().await.unwrap_or(Value::Null);

        tracing::debug!(
            target: TRACING_TARGET,
            status,
            "Got gateway response"
        );

        Ok((status, body))
    }
}

#[async_trait::async_trait]
impl MetadataProvider for HasuraClient {
    async fn add_source(&self, source: &DataSourceConfig) -> crate::Result<AddSourceOutcome> {
        let body = json!({
            "type": format!("{}_add_source", source.kind.as_str()),
            "args": {
                "name": source.name,
                "configuration": source.configuration,
            },
        });

        let (status, body) = self.post_metadata(&body).await.map_err(crate::Error::from)?;
        Ok(classify_add_source(RawResponse::new(status, &body)))
    }

    async fn drop_source(&self, source: &DataSourceConfig) -> crate::Result<DropSourceOutcome> {
        let body = json!({
            "type": format!("{}_drop_source", source.kind.as_str()),
            "args": {
                "name": source.name,
                "cascade": false,
            },
        });

        let (status, body) = self.post_metadata(&body).await.map_err(crate::Error::from)?;
        Ok(classify_drop_source(RawResponse::new(status, &body)))
    }

    async fn track_table(&self, table: &TableConfig) -> crate::Result<TrackTableOutcome> {
        let body = json!({
            "type": format!("{}_track_table", table.kind.as_str()),
            "args": {
                "source": table.source_name,
                "table": table.table_spec(),
                "configuration": {
                    "custom_name": table.custom_table_name,
                    "custom_root_fields": {
                        "select": table.select_root_field,
                        "select_by_pk": table.select_by_pk_root_field,
                        "select_aggregate": table.select_aggregate_root_field,
                    },
                    "comment": table.comment,
                },
                "apollo_federation_config": {"enable": "v1"},
            },
        });

        let (status, body) = self.post_metadata(&body).await.map_err(crate::Error::from)?;
        Ok(classify_track_table(RawResponse::new(status, &body)))
    }

    async fn untrack_table(&self, table: &TableConfig) -> crate::Result<UntrackTableOutcome> {
        let body = json!({
            "type": format!("{}_untrack_table", table.kind.as_str()),
            "args": {
                "table": table.table_spec(),
                "source": table.source_name,
                "cascade": false,
            },
        });

        let (status, body) = self.post_metadata(&body).await.map_err(crate::Error::from)?;
        Ok(classify_untrack_table(RawResponse::new(status, &body)))
    }

    async fn create_select_permission(
        &self,
        table: &TableConfig,
        role_id: &str,
    ) -> crate::Result<CreatePermissionOutcome> {
        let body = json!({
            "type": format!("{}_create_select_permission", table.kind.as_str()),
            "args": {
                "table": table.table_spec(),
                "role": role_id,
                "permission": {
                    "columns": "*",
                    "filter": {},
                    "set": [],
                    "allow_aggregations": false,
                },
                "source": table.source_name,
            },
        });

        let (status, body) = self.post_metadata(&body).await.map_err(crate::Error::from)?;
        Ok(classify_create_permission(RawResponse::new(status, &body)))
    }

    async fn drop_select_permission(
        &self,
        table: &TableConfig,
        role_id: &str,
    ) -> crate::Result<DropPermissionOutcome> {
        let body = json!({
            "type": format!("{}_drop_select_permission", table.kind.as_str()),
            "args": {
                "table": table.table_spec(),
                "role": role_id,
                "source": table.source_name,
            },
        });

        let (status, body) = self.post_metadata(&body).await.map_err(crate::Error::from)?;
        Ok(classify_drop_permission(RawResponse::new(status, &body)))
    }

    async fn get_source_tables(
        &self,
        source: Option<&DataSourceConfig>,
    ) -> crate::Result<Vec<QualifiedTable>> {
        let (kind, name) = match source {
            Some(source) => (source.kind, source.name.as_str()),
            None => (SourceKind::Postgres, "default"),
        };

        let body = json!({
            "type": format!("{}_get_source_tables", kind.as_str()),
            "args": {"source": name},
        });

        let (status, body) = self.post_metadata(&body).await.map_err(crate::Error::from)?;
        if status != 200 {
            return Err(crate::Error::external(
                "hasura",
                format!("get_source_tables answered with status {status}"),
            ));
        }

        serde_json::from_value(body).map_err(|err| {
            crate::Error::protocol("hasura", "unexpected source table list shape").with_source(err)
        })
    }

    async fn run_sql(&self, request: &RunSqlRequest) -> crate::Result<Value> {
        let (kind, name) = match &request.source {
            Some(source) => (source.kind, source.name.as_str()),
            None => (SourceKind::Postgres, "default"),
        };

        let queries: Vec<Value> = request
            .statements
            .iter()
            .map(|statement| {
                json!({
                    "type": format!("{}_run_sql", kind.as_str()),
                    "args": {
                        "source": name,
                        "sql": statement,
                        "cascade": request.cascade,
                        "check_metadata_consistency": request.check_metadata_consistency,
                    },
                })
            })
            .collect();

        let body = json!({"type": "bulk", "args": queries});

        let (_, body) = self
            .post_json(&self.inner.query_url, &body)
            .await
            .map_err(crate::Error::from)?;
        Ok(body)
    }

    async fn health_check(&self) -> crate::Result<GatewayHealth> {
        let response = self
            .inner
            .http
            .get(&self.inner.health_url)
            .query(&[("strict", "false")])
            .send()
            .await
            .map_err(|err| crate::Error::from(Error::from(err)))?;

        if !response.status().is_success() {
            return Ok(GatewayHealth::Error);
        }

        let text = response
            .text()
            .await
            .map_err(|err| crate::Error::from(Error::from(err)))?;

        if text.contains("WARN") {
            Ok(GatewayHealth::MetadataWarning)
        } else {
            Ok(GatewayHealth::Ok)
        }
    }

    async fn clear_metadata(&self, confirmation: &str) -> crate::Result<Value> {
        if confirmation != CLEAR_METADATA_CONFIRMATION {
            return Err(crate::Error::precondition(
                "refusing to clear gateway metadata without the exact confirmation phrase",
            ));
        }

        let body = json!({"type": "clear_metadata", "args": {}});

        let (status, body) = self.post_metadata(&body).await.map_err(crate::Error::from)?;
        if status != 200 {
            return Err(crate::Error::external(
                "hasura",
                format!("clear_metadata answered with status {status}"),
            ));
        }

        Ok(body)
    }
}
