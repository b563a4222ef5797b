use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET /
/// Serves the upload form with the resume and photo tabs.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
