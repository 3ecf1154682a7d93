use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{Spot, SpotId};
use crate::error::Error;

/// One method per operation of the remote spots store.
#[async_trait]
pub trait SpotsAPI {
    async fn list_spots(&self) -> Result<Vec<Spot>, Error>;

    /// Highest stored id, `None` when the store is empty.
    async fn find_max_id(&self) -> Result<Option<SpotId>, Error>;

    async fn create_spot(&self, spot: &Spot) -> Result<(), Error>;

    /// Overwrites the stored spot with the same id.
    async fn update_spot(&self, spot: &Spot) -> Result<(), Error>;

    async fn delete_spot(&self, id: SpotId) -> Result<(), Error>;

    /// Candidate id for a new spot. Two clients asking at the same time get
    /// the same answer; the store is the only arbiter.
    async fn next_spot_id(&self) -> Result<SpotId, Error> {
        Ok(self.find_max_id().await?.unwrap_or(0) + 1)
    }
}

pub type DynAPI = Arc<dyn SpotsAPI + Send + Sync>;
