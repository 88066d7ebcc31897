use axum::{
    http::{header, StatusCode, Uri},
    response::IntoResponse,
};
use rust_embed::RustEmbed;

/// The compiled web console (`trunk build` output)
#[derive(RustEmbed)]
#[folder = "ui/dist"]
#[allow_missing = true]
struct Asset;

pub struct UIHandler;

impl UIHandler {
    pub async fn serve(uri: Uri) -> impl IntoResponse {
        let path = uri.path().trim_start_matches('/');

        let path = if path.is_empty() { "index.html" } else { path };

        match Asset::get(path) {
            Some(content) => {
                let mime = mime_guess::from_path(path).first_or_octet_stream();
                ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
            }
            // Client-side routes such as /history resolve to the console shell
            None => match Asset::get("index.html") {
                Some(content) => ([(header::CONTENT_TYPE, "text/html")], content.data).into_response(),
                None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
            },
        }
    }
}
