use axum::response::{Html, IntoResponse};

use crate::presentation::ui::{lip_sync_blocks, render_page};

pub async fn index_handler() -> impl IntoResponse {
    Html(render_page(&lip_sync_blocks()))
}
