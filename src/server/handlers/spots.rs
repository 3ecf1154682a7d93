use axum::extract::{Extension, Json, Path};

use crate::api::DynAPI;
use crate::entities::{MaxIdRecord, Spot, SpotId, SpotRecord};
use crate::error::{invalid_input_error, not_found_error, Error};

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<SpotRecord>>, Error> {
    let spots = api.list_spots().await?;

    Ok(spots.iter().map(Spot::to_record).collect::<Vec<_>>().into())
}

/// `GET /spots/last`. Any other segment in that position is not a readable
/// resource.
pub async fn last(
    Extension(api): Extension<DynAPI>,
    Path(segment): Path<String>,
) -> Result<Json<Vec<MaxIdRecord>>, Error> {
    if segment != "last" {
        return Err(not_found_error());
    }

    let max_id = api.find_max_id().await?;

    Ok(vec![MaxIdRecord { max_id }].into())
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(record): Json<SpotRecord>,
) -> Result<Json<()>, Error> {
    api.create_spot(&Spot::from(record)).await?;

    Ok(().into())
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    Json(record): Json<SpotRecord>,
) -> Result<Json<()>, Error> {
    api.update_spot(&Spot::from(record)).await?;

    Ok(().into())
}

pub async fn delete(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<()>, Error> {
    let id: SpotId = id.parse().map_err(|_| invalid_input_error())?;

    api.delete_spot(id).await?;

    Ok(().into())
}
