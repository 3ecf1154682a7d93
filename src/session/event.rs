use geo_types::Coord;

use super::Session;
use crate::{api::SpotsAPI, entities::SpotId};

/// UI events a map page reports to its session.
#[derive(Clone, Debug)]
pub enum Event {
    Load,
    MapClick {
        coordinate: Coord<f64>,
        hit: Option<SpotId>,
    },
    MoveStart,
    ModifyEnd {
        id: SpotId,
        coordinate: Coord<f64>,
    },
    ClosePopover,
    DeleteSelected,
    ToggleAddMode,
    UploadRaster {
        file_name: String,
        bytes: Vec<u8>,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::MapClick { .. } => "map_click",
            Self::MoveStart => "move_start",
            Self::ModifyEnd { .. } => "modify_end",
            Self::ClosePopover => "close_popover",
            Self::DeleteSelected => "delete_selected",
            Self::ToggleAddMode => "toggle_add_mode",
            Self::UploadRaster { .. } => "upload_raster",
        }
    }
}

impl Session {
    /// Runs the handler for `event`. Failures are logged and otherwise
    /// dropped; whatever state the handler reached before failing is kept.
    pub async fn dispatch<A>(&mut self, api: &A, event: Event)
    where
        A: SpotsAPI + Sync + ?Sized,
    {
        let name = event.name();

        let result = match event {
            Event::Load => self.load(api).await.map(|_| ()),
            Event::MapClick { coordinate, hit } => {
                self.map_click(api, coordinate, hit).await.map(|_| ())
            }
            Event::MoveStart => {
                self.move_start();
                Ok(())
            }
            Event::ModifyEnd { id, coordinate } => self.modify_end(api, id, coordinate).await,
            Event::ClosePopover => {
                self.close_popover();
                Ok(())
            }
            Event::DeleteSelected => self.delete_selected(api).await.map(|_| ()),
            Event::ToggleAddMode => {
                self.toggle_add_mode();
                Ok(())
            }
            Event::UploadRaster { file_name, bytes } => {
                self.upload_raster(file_name, bytes).map(|_| ())
            }
        };

        if let Err(err) = result {
            tracing::error!(event = name, code = err.code, "{}", err.message);
        }
    }
}
