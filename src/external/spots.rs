use async_trait::async_trait;
use reqwest::Client;

use crate::{
    api::SpotsAPI,
    config::Config,
    entities::{MaxIdRecord, Spot, SpotId, SpotRecord},
    error::{invalid_input_error, upstream_error, Error},
};

/// HTTP client for the hosted spots API, optionally routed through a
/// CORS relay that takes the full upstream URL as its path.
#[derive(Clone, Debug)]
pub struct SpotsClient {
    client: Client,
    base: String,
    relay: Option<String>,
}

impl SpotsClient {
    pub fn new(base: impl Into<String>, relay: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
            relay,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.spots_api_base.clone(), config.spots_api_relay.clone())
    }

    pub fn url(&self, path: &str) -> String {
        match &self.relay {
            Some(relay) => format!("{}{}{}", relay, self.base, path),
            None => format!("{}{}", self.base, path),
        }
    }
}

fn check_status(status_code: u16) -> Result<(), Error> {
    if (400..500).contains(&status_code) {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error(status_code));
    }

    Ok(())
}

#[async_trait]
impl SpotsAPI for SpotsClient {
    #[tracing::instrument(skip(self))]
    async fn list_spots(&self) -> Result<Vec<Spot>, Error> {
        let res = self.client.get(self.url("/spots")).send().await?;

        check_status(res.status().as_u16())?;

        let records: Vec<SpotRecord> = res.json().await?;

        tracing::debug!(count = records.len(), "fetched spots");

        Ok(records.into_iter().map(Spot::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn find_max_id(&self) -> Result<Option<SpotId>, Error> {
        let res = self.client.get(self.url("/spots/last")).send().await?;

        check_status(res.status().as_u16())?;

        let rows: Vec<MaxIdRecord> = res.json().await?;

        Ok(rows.first().and_then(|row| row.max_id))
    }

    #[tracing::instrument(skip(self))]
    async fn create_spot(&self, spot: &Spot) -> Result<(), Error> {
        let res = self
            .client
            .post(self.url("/spots"))
            .json(&spot.to_record())
            .send()
            .await?;

        check_status(res.status().as_u16())?;

        tracing::info!(id = spot.id, "spot inserted");

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn update_spot(&self, spot: &Spot) -> Result<(), Error> {
        let res = self
            .client
            .put(self.url("/spots"))
            .json(&spot.to_record())
            .send()
            .await?;

        check_status(res.status().as_u16())?;

        tracing::info!(
            id = spot.id,
            x = spot.coordinates.x,
            y = spot.coordinates.y,
            "spot moved"
        );

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_spot(&self, id: SpotId) -> Result<(), Error> {
        let res = self
            .client
            .delete(self.url(&format!("/spots/{}", id)))
            .send()
            .await?;

        check_status(res.status().as_u16())?;

        tracing::info!(id, "spot deleted");

        Ok(())
    }
}
