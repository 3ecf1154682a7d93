mod event;

pub use event::Event;

use geo_types::Coord;
use uuid::Uuid;

use crate::{
    api::SpotsAPI,
    entities::{Layer, RasterOverlay, Spot, SpotId},
    error::{invalid_input_error, Error},
    projection::format_xy,
};

pub const READOUT_PRECISION: usize = 6;

#[derive(Clone, Debug, PartialEq)]
pub struct Popover {
    pub position: Coord<f64>,
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct Session {
    /// Spots fetched at load time plus those added since.
    pub spots: Vec<Spot>,
    pub selected: Option<SpotId>,
    pub popover: Option<Popover>,
    pub popup_visible: bool,
    pub add_mode: bool,
    pub layers: Vec<Layer>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            spots: vec![],
            selected: None,
            popover: None,
            popup_visible: false,
            add_mode: false,
            layers: vec![Layer::Base, Layer::Spots],
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spot(&self, id: SpotId) -> Option<&Spot> {
        self.spots.iter().find(|spot| spot.id == id)
    }

    fn spot_mut(&mut self, id: SpotId) -> Option<&mut Spot> {
        self.spots.iter_mut().find(|spot| spot.id == id)
    }

    #[tracing::instrument(skip_all)]
    pub async fn load<A>(&mut self, api: &A) -> Result<usize, Error>
    where
        A: SpotsAPI + Sync + ?Sized,
    {
        self.spots = api.list_spots().await?;

        tracing::info!(count = self.spots.len(), "spots loaded");

        Ok(self.spots.len())
    }

    /// A click on the map. `hit` is the spot under the pointer, if any.
    ///
    /// Selection and spot creation are independent: with add mode on, a
    /// click on an existing marker both selects it and creates a new spot.
    #[tracing::instrument(skip(self, api))]
    pub async fn map_click<A>(
        &mut self,
        api: &A,
        coordinate: Coord<f64>,
        hit: Option<SpotId>,
    ) -> Result<Option<Spot>, Error>
    where
        A: SpotsAPI + Sync + ?Sized,
    {
        self.dispose_popover();

        if let Some(id) = hit {
            self.select(id, coordinate);
        }

        if !self.add_mode {
            return Ok(None);
        }

        // Add mode is one-shot whatever the outcome of the requests.
        self.add_mode = false;

        let id = api.next_spot_id().await?;
        let spot = Spot::new(id, coordinate);

        // The marker stays even if the create call fails.
        self.spots.push(spot.clone());
        api.create_spot(&spot).await?;

        Ok(Some(spot))
    }

    fn select(&mut self, id: SpotId, coordinate: Coord<f64>) {
        self.popup_visible = true;
        self.selected = Some(id);
        self.popover = Some(Popover {
            position: coordinate,
            text: format!("{} X, {} Y", coordinate.x, coordinate.y),
        });
    }

    pub fn move_start(&mut self) {
        self.dispose_popover();
    }

    fn dispose_popover(&mut self) {
        self.popover = None;
    }

    /// A marker was dragged to `coordinate`. The local position is kept even
    /// if the store rejects the update.
    #[tracing::instrument(skip(self, api))]
    pub async fn modify_end<A>(
        &mut self,
        api: &A,
        id: SpotId,
        coordinate: Coord<f64>,
    ) -> Result<(), Error>
    where
        A: SpotsAPI + Sync + ?Sized,
    {
        let spot = match self.spot_mut(id) {
            Some(spot) => {
                spot.coordinates = coordinate;
                spot.clone()
            }
            None => Spot::new(id, coordinate),
        };

        api.update_spot(&spot).await
    }

    pub fn close_popover(&mut self) {
        self.popup_visible = false;
    }

    #[tracing::instrument(skip(self, api))]
    pub async fn delete_selected<A>(&mut self, api: &A) -> Result<Option<SpotId>, Error>
    where
        A: SpotsAPI + Sync + ?Sized,
    {
        let id = match self.selected {
            Some(id) => id,
            None => return Ok(None),
        };

        api.delete_spot(id).await?;

        self.spots.retain(|spot| spot.id != id);
        self.selected = None;
        self.popover = None;
        self.popup_visible = false;

        Ok(Some(id))
    }

    pub fn toggle_add_mode(&mut self) {
        self.add_mode = true;
    }

    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub fn upload_raster(&mut self, file_name: String, bytes: Vec<u8>) -> Result<Uuid, Error> {
        if !is_tiff(&bytes) {
            return Err(invalid_input_error());
        }

        let overlay = RasterOverlay::new(file_name, bytes);
        let id = overlay.id;

        self.layers.insert(1, Layer::Raster(overlay));

        tracing::info!(%id, "raster layer added");

        Ok(id)
    }

    pub fn overlays(&self) -> impl Iterator<Item = &RasterOverlay> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Raster(overlay) => Some(overlay),
            _ => None,
        })
    }

    pub fn pointer_readout(&self, coordinate: Coord<f64>) -> String {
        format_xy(coordinate, READOUT_PRECISION)
    }
}

/// Byte-order mark and magic number of classic TIFF (42) or BigTIFF (43).
fn is_tiff(bytes: &[u8]) -> bool {
    matches!(
        bytes,
        [b'I', b'I', 42 | 43, 0, ..] | [b'M', b'M', 0, 42 | 43, ..]
    )
}

#[cfg(test)]
mod tests;
