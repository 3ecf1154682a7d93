mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};

use crate::api::DynAPI;
use crate::config::Config;
use crate::error::{server_error, Error};
use crate::server::handlers::{assets, spots};

/// Directory the page and its images are served from.
#[derive(Clone, Debug)]
pub struct StaticRoot(pub Arc<PathBuf>);

pub fn router(api: DynAPI, static_dir: PathBuf) -> Router {
    Router::new()
        .route("/", get(assets::index))
        .route("/Images/*file", get(assets::image))
        .route("/spots", get(spots::list).post(spots::create).put(spots::update))
        // `last` shares the segment with ids, see `spots::last`.
        .route("/spots/:id", get(spots::last).delete(spots::delete))
        .layer(Extension(api))
        .layer(Extension(StaticRoot(Arc::new(static_dir))))
}

pub async fn serve(api: DynAPI, config: &Config) -> Result<(), Error> {
    let app = router(api, config.static_dir.clone());

    let addr = config.addr();

    tracing::info!("listening on {}", addr);

    axum::Server::try_bind(&addr)
        .map_err(server_error)?
        .serve(app.into_make_service())
        .await
        .map_err(server_error)
}

#[test]
fn router_accepts_every_route() {
    use crate::external::spots::SpotsClient;

    let api = Arc::new(SpotsClient::new("http://localhost:5000", None)) as DynAPI;

    router(api, PathBuf::from("static"));
}
