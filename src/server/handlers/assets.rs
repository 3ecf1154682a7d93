use std::path::{Component, Path as FsPath};

use axum::extract::{Extension, Path};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};

use crate::error::{invalid_input_error, Error};
use crate::server::StaticRoot;

pub async fn index(Extension(root): Extension<StaticRoot>) -> Result<Html<String>, Error> {
    let page = tokio::fs::read_to_string(root.0.join("index.html")).await?;

    Ok(Html(page))
}

pub async fn image(
    Extension(root): Extension<StaticRoot>,
    Path(file): Path<String>,
) -> Result<Response, Error> {
    let relative = FsPath::new(file.trim_start_matches('/'));

    if relative.as_os_str().is_empty()
        || !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
    {
        return Err(invalid_input_error());
    }

    let bytes = tokio::fs::read(root.0.join("Images").join(relative)).await?;

    Ok(([(header::CONTENT_TYPE, content_type(relative))], bytes).into_response())
}

fn content_type(path: &FsPath) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("gif") => "image/gif",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}
