mod auth_tests;
mod expense_tests;

use crate::api::ApiClient;
use crate::core::models::Group;

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_gateway(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn create_test_client(base_url: &str) -> ApiClient {
    let _ = env_logger::try_init();
    ApiClient::new(base_url).unwrap()
}

pub fn sample_group(id: &str, name: &str) -> Group {
    Group {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{} description", name),
        group_type: "trip".to_string(),
        created_by: "1".to_string(),
        created_at: None,
    }
}
