//! Axum extractor for the request scope.

use std::convert::Infallible;
use std::ops::Deref;
use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use dynamo_registry_core::{Application, Scope, ScopeId};
use uuid::Uuid;

use crate::aws::AwsConnection;

/// The scope of the current request.
///
/// The first extraction creates the scope and stores it in the request extensions;
/// every later extraction during the same request returns that same scope, so the
/// connection and tables are built at most once per request.
///
/// If an [`Application`] request extension is present (usually installed with
/// `Router::layer(Extension(app))`), it is attached to the new scope. An unbound
/// [`Registry`](crate::Registry) then serves whichever application the route belongs to.
#[derive(Debug)]
pub struct RequestScope<C = AwsConnection>(pub Arc<Scope<C>>);

impl<C> Clone for RequestScope<C> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<C> Deref for RequestScope<C> {
    type Target = Scope<C>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn extract_scope_id(headers: &HeaderMap) -> ScopeId {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(ScopeId::from_uuid)
        .unwrap_or_else(ScopeId::new)
}

impl<S, C> FromRequestParts<S> for RequestScope<C>
where
    S: Send + Sync,
    C: Send + Sync + 'static,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(scope) = parts.extensions.get::<Arc<Scope<C>>>() {
            return Ok(Self(Arc::clone(scope)));
        }

        let mut scope = Scope::with_id(extract_scope_id(&parts.headers));
        if let Some(app) = parts.extensions.get::<Application>() {
            scope = scope.with_app(app.clone());
        }

        let scope = Arc::new(scope);
        parts.extensions.insert(Arc::clone(&scope));
        Ok(Self(scope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockConnection, RecordingConnector};
    use crate::Registry;
    use axum::{
        body::Body,
        extract::State,
        http::{Request, StatusCode},
        routing::get,
        Extension, Router,
    };
    use dynamo_registry_core::tables::{KeyAttribute, TableDescriptor};
    use dynamo_registry_core::{Environment, RegistryError, Settings};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    type TestRegistry = Arc<Registry<RecordingConnector>>;

    fn application(name: &str, tables: &[&str]) -> Application {
        let settings = Settings::new().with_tables(
            tables
                .iter()
                .map(|t| TableDescriptor::new(*t, KeyAttribute::string("id"))),
        );
        Application::from_settings(name, settings, &Environment::empty()).unwrap()
    }

    fn registry() -> TestRegistry {
        Arc::new(
            Registry::with_connector(RecordingConnector::default())
                .with_app(application("api", &["users", "groups"])),
        )
    }

    fn unbound_registry() -> TestRegistry {
        Arc::new(Registry::with_connector(RecordingConnector::default()))
    }

    async fn same_scope(
        RequestScope(a): RequestScope<MockConnection>,
        RequestScope(b): RequestScope<MockConnection>,
    ) -> String {
        format!("{} {}", Arc::ptr_eq(&a, &b), a.id())
    }

    async fn tables(
        State(registry): State<TestRegistry>,
        scope: RequestScope<MockConnection>,
    ) -> Result<String, StatusCode> {
        let connection = registry
            .connection(&scope)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        let users = registry
            .table(&scope, "users")
            .await
            .map_err(|_| StatusCode::NOT_FOUND)?;
        let names: Vec<&str> = registry
            .tables(&scope)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .names()
            .collect();

        Ok(format!(
            "{} {}",
            Arc::ptr_eq(users.connection(), &connection),
            names.join(",")
        ))
    }

    async fn table_names(
        State(registry): State<TestRegistry>,
        scope: RequestScope<MockConnection>,
    ) -> Result<String, StatusCode> {
        match registry.tables(&scope).await {
            Ok(tables) => Ok(tables.names().collect::<Vec<_>>().join(",")),
            Err(RegistryError::NoApplication) => Err(StatusCode::SERVICE_UNAVAILABLE),
            Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    fn app(registry: TestRegistry) -> Router {
        Router::new()
            .route("/scope", get(same_scope))
            .route("/tables", get(tables))
            .with_state(registry)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[test]
    fn test_extract_scope_id_from_header() {
        let mut headers = HeaderMap::new();
        let id = "550e8400-e29b-41d4-a716-446655440000";
        headers.insert("x-request-id", id.parse().unwrap());

        assert_eq!(extract_scope_id(&headers).to_string(), id);
    }

    #[test]
    fn test_extract_scope_id_generates_when_invalid() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", "not-a-uuid".parse().unwrap());

        let scope_id = extract_scope_id(&headers);

        Uuid::parse_str(&scope_id.to_string()).expect("Should be valid UUID");
    }

    #[tokio::test]
    async fn test_extractors_share_the_request_scope() {
        let response = app(registry())
            .oneshot(
                Request::builder()
                    .uri("/scope")
                    .header("x-request-id", "550e8400-e29b-41d4-a716-446655440000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_string(response).await,
            "true 550e8400-e29b-41d4-a716-446655440000"
        );
    }

    async fn get_body(router: &Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, body_string(response).await)
    }

    #[tokio::test]
    async fn test_unbound_registry_uses_application_extension() {
        let registry = unbound_registry();
        let billing = Router::new()
            .route("/tables", get(table_names))
            .layer(Extension(application("billing", &["invoices"])));
        let accounts = Router::new()
            .route("/tables", get(table_names))
            .layer(Extension(application("accounts", &["users", "groups"])));
        let router = Router::new()
            .nest("/billing", billing)
            .nest("/accounts", accounts)
            .route("/orphan", get(table_names))
            .with_state(Arc::clone(&registry));

        assert_eq!(
            get_body(&router, "/billing/tables").await,
            (StatusCode::OK, "invoices".to_string())
        );
        assert_eq!(
            get_body(&router, "/accounts/tables").await,
            (StatusCode::OK, "users,groups".to_string())
        );
        assert_eq!(
            get_body(&router, "/orphan").await.0,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(registry.connector().connect_count(), 2);
    }

    #[tokio::test]
    async fn test_bound_application_wins_over_extension() {
        let router = Router::new()
            .route("/tables", get(table_names))
            .layer(Extension(application("other", &["invoices"])))
            .with_state(registry());

        assert_eq!(
            get_body(&router, "/tables").await,
            (StatusCode::OK, "users,groups".to_string())
        );
    }

    #[tokio::test]
    async fn test_one_connection_per_request() {
        let registry = registry();
        let router = app(Arc::clone(&registry));

        for _ in 0..2 {
            let response = router
                .clone()
                .oneshot(Request::builder().uri("/tables").body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_string(response).await, "true users,groups");
        }

        assert_eq!(registry.connector().connect_count(), 2);
    }
}
