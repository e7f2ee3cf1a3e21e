//! Static file server for the generated page and JSON.

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use tower_http::services::ServeDir;

use crate::app::Result;

pub fn router(dir: &Path) -> Router {
    Router::new().fallback_service(ServeDir::new(dir))
}

/// Serve `dir` on all interfaces until the process is stopped.
pub async fn serve(dir: &Path, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(dir = %dir.display(), "Serving on http://localhost:{}", port);
    axum::serve(listener, router(dir)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_index_and_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Funnies</h1>").unwrap();
        std::fs::write(dir.path().join("comics.json"), "[]").unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let app = router(dir.path());
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let index = reqwest::get(format!("http://{}/", address)).await.unwrap();
        assert!(index.status().is_success());
        assert_eq!(index.text().await.unwrap(), "<h1>Funnies</h1>");

        let json = reqwest::get(format!("http://{}/comics.json", address)).await.unwrap();
        assert_eq!(json.text().await.unwrap(), "[]");

        let missing = reqwest::get(format!("http://{}/nope.txt", address)).await.unwrap();
        assert_eq!(missing.status().as_u16(), 404);

        server.abort();
    }
}
