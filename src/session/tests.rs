use std::sync::Mutex;

use async_trait::async_trait;
use geo_types::coord;
use tokio_test::block_on;

use super::*;
use crate::error::upstream_error;

#[derive(Default)]
struct FakeStore {
    spots: Mutex<Vec<Spot>>,
    failing: Mutex<Vec<&'static str>>,
    calls: Mutex<Vec<String>>,
}

impl FakeStore {
    fn with_spots(spots: Vec<Spot>) -> Self {
        Self {
            spots: Mutex::new(spots),
            ..Default::default()
        }
    }

    fn fail(self, operation: &'static str) -> Self {
        self.failing.lock().unwrap().push(operation);
        self
    }

    fn record(&self, operation: &'static str, detail: String) -> Result<(), Error> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {}", operation, detail).trim().to_string());

        if self.failing.lock().unwrap().contains(&operation) {
            return Err(upstream_error(500));
        }

        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn stored(&self) -> Vec<Spot> {
        self.spots.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpotsAPI for FakeStore {
    async fn list_spots(&self) -> Result<Vec<Spot>, Error> {
        self.record("list", "".into())?;
        Ok(self.stored())
    }

    async fn find_max_id(&self) -> Result<Option<SpotId>, Error> {
        self.record("last", "".into())?;
        Ok(self.spots.lock().unwrap().iter().map(|s| s.id).max())
    }

    async fn create_spot(&self, spot: &Spot) -> Result<(), Error> {
        self.record("create", spot.id.to_string())?;
        self.spots.lock().unwrap().push(spot.clone());
        Ok(())
    }

    async fn update_spot(&self, spot: &Spot) -> Result<(), Error> {
        self.record("update", spot.id.to_string())?;
        for stored in self.spots.lock().unwrap().iter_mut() {
            if stored.id == spot.id {
                *stored = spot.clone();
            }
        }
        Ok(())
    }

    async fn delete_spot(&self, id: SpotId) -> Result<(), Error> {
        self.record("delete", id.to_string())?;
        self.spots.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }
}

fn two_spots() -> FakeStore {
    FakeStore::with_spots(vec![
        Spot::new(1, coord! { x: 100.0, y: 200.0 }).with_label("dock"),
        Spot::new(4, coord! { x: -50.0, y: 75.5 }),
    ])
}

#[test]
fn new_session_has_base_and_spot_layers() {
    let session = Session::new();

    assert_eq!(session.layers, vec![Layer::Base, Layer::Spots]);
    assert!(!session.add_mode);
    assert!(session.selected.is_none());
}

#[test]
fn load_mirrors_the_store() {
    let store = two_spots();
    let mut session = Session::new();

    let count = block_on(session.load(&store)).unwrap();

    assert_eq!(count, 2);
    assert_eq!(session.spots, store.stored());
}

#[test]
fn failed_load_keeps_previous_mirror() {
    let store = two_spots().fail("list");
    let mut session = Session::new();
    session.spots = vec![Spot::new(9, coord! { x: 0.0, y: 0.0 })];

    block_on(session.dispatch(&store, Event::Load));

    assert_eq!(session.spots.len(), 1);
    assert_eq!(session.spots[0].id, 9);
}

#[test]
fn click_on_spot_selects_and_shows_popover() {
    let store = two_spots();
    let mut session = Session::new();
    block_on(session.load(&store)).unwrap();

    let click = coord! { x: 100.5, y: 199.0 };
    let created = block_on(session.map_click(&store, click, Some(1))).unwrap();

    assert!(created.is_none());
    assert_eq!(session.selected, Some(1));
    assert!(session.popup_visible);
    assert_eq!(
        session.popover,
        Some(Popover {
            position: coord! { x: 100.5, y: 199.0 },
            text: "100.5 X, 199 Y".into(),
        })
    );
    assert_eq!(store.calls(), vec!["list"]);
}

#[test]
fn click_on_empty_map_disposes_popover_but_keeps_selection() {
    let store = two_spots();
    let mut session = Session::new();

    block_on(session.map_click(&store, coord! { x: 1.0, y: 1.0 }, Some(4))).unwrap();
    block_on(session.map_click(&store, coord! { x: 9.0, y: 9.0 }, None)).unwrap();

    assert!(session.popover.is_none());
    assert_eq!(session.selected, Some(4));
}

#[test]
fn add_mode_creates_spot_with_next_id() {
    let store = two_spots();
    let mut session = Session::new();
    block_on(session.load(&store)).unwrap();

    session.toggle_add_mode();
    let created = block_on(session.map_click(&store, coord! { x: 3.0, y: 4.0 }, None))
        .unwrap()
        .unwrap();

    assert_eq!(created.id, 5);
    assert_eq!(created.label, "");
    assert!(!session.add_mode);
    assert_eq!(session.spot(5).map(|s| s.coordinates), Some(coord! { x: 3.0, y: 4.0 }));
    assert_eq!(store.calls(), vec!["list", "last", "create 5"]);
    assert_eq!(store.stored().len(), 3);
}

#[test]
fn first_spot_in_empty_store_gets_id_one() {
    let store = FakeStore::default();
    let mut session = Session::new();

    session.toggle_add_mode();
    let created = block_on(session.map_click(&store, coord! { x: 0.0, y: 0.0 }, None)).unwrap();

    assert_eq!(created.map(|s| s.id), Some(1));
}

#[test]
fn add_mode_is_one_shot() {
    let store = two_spots();
    let mut session = Session::new();

    session.toggle_add_mode();
    block_on(session.map_click(&store, coord! { x: 1.0, y: 1.0 }, None)).unwrap();
    let second = block_on(session.map_click(&store, coord! { x: 2.0, y: 2.0 }, None)).unwrap();

    assert!(second.is_none());
    assert_eq!(store.stored().len(), 3);
}

#[test]
fn add_mode_click_on_marker_selects_and_creates() {
    let store = two_spots();
    let mut session = Session::new();

    session.toggle_add_mode();
    block_on(session.map_click(&store, coord! { x: 1.0, y: 1.0 }, Some(1))).unwrap();

    assert_eq!(session.selected, Some(1));
    assert_eq!(store.calls(), vec!["last", "create 5"]);
}

#[test]
fn failed_create_keeps_optimistic_marker() {
    let store = two_spots().fail("create");
    let mut session = Session::new();

    session.toggle_add_mode();
    block_on(session.dispatch(
        &store,
        Event::MapClick {
            coordinate: coord! { x: 7.0, y: 8.0 },
            hit: None,
        },
    ));

    assert!(session.spot(5).is_some());
    assert!(!session.add_mode);
    assert_eq!(store.stored().len(), 2);
}

#[test]
fn failed_id_lookup_adds_nothing_and_clears_add_mode() {
    let store = two_spots().fail("last");
    let mut session = Session::new();

    session.toggle_add_mode();
    let result = block_on(session.map_click(&store, coord! { x: 7.0, y: 8.0 }, None));

    assert!(result.is_err());
    assert!(session.spots.is_empty());
    assert!(!session.add_mode);
}

#[test]
fn modify_end_moves_spot_and_keeps_label() {
    let store = two_spots();
    let mut session = Session::new();
    block_on(session.load(&store)).unwrap();

    block_on(session.modify_end(&store, 1, coord! { x: 111.0, y: 222.0 })).unwrap();

    let stored = store.stored();
    assert_eq!(stored[0].coordinates, coord! { x: 111.0, y: 222.0 });
    assert_eq!(stored[0].label, "dock");
    assert_eq!(session.spot(1).unwrap().coordinates, coord! { x: 111.0, y: 222.0 });
}

#[test]
fn modify_end_for_unknown_spot_still_updates() {
    let store = two_spots();
    let mut session = Session::new();

    block_on(session.modify_end(&store, 4, coord! { x: 0.5, y: 0.5 })).unwrap();

    assert_eq!(store.calls(), vec!["update 4"]);
    assert_eq!(store.stored()[1].coordinates, coord! { x: 0.5, y: 0.5 });
}

#[test]
fn failed_update_keeps_local_position() {
    let store = two_spots().fail("update");
    let mut session = Session::new();
    block_on(session.load(&store)).unwrap();

    block_on(session.dispatch(
        &store,
        Event::ModifyEnd {
            id: 4,
            coordinate: coord! { x: 1.0, y: 2.0 },
        },
    ));

    assert_eq!(session.spot(4).unwrap().coordinates, coord! { x: 1.0, y: 2.0 });
    assert_eq!(store.stored()[1].coordinates, coord! { x: -50.0, y: 75.5 });
}

#[test]
fn delete_without_selection_is_a_no_op() {
    let store = two_spots();
    let mut session = Session::new();

    let deleted = block_on(session.delete_selected(&store)).unwrap();

    assert!(deleted.is_none());
    assert!(store.calls().is_empty());
}

#[test]
fn delete_removes_selected_spot() {
    let store = two_spots();
    let mut session = Session::new();
    block_on(session.load(&store)).unwrap();
    block_on(session.map_click(&store, coord! { x: -50.0, y: 75.5 }, Some(4))).unwrap();

    let deleted = block_on(session.delete_selected(&store)).unwrap();

    assert_eq!(deleted, Some(4));
    assert!(session.spot(4).is_none());
    assert!(session.selected.is_none());
    assert!(!session.popup_visible);
    assert_eq!(store.stored().len(), 1);
}

#[test]
fn failed_delete_keeps_marker_and_selection() {
    let store = two_spots().fail("delete");
    let mut session = Session::new();
    block_on(session.load(&store)).unwrap();
    block_on(session.map_click(&store, coord! { x: 0.0, y: 0.0 }, Some(1))).unwrap();

    block_on(session.dispatch(&store, Event::DeleteSelected));

    assert!(session.spot(1).is_some());
    assert_eq!(session.selected, Some(1));
}

#[test]
fn close_and_move_start_hide_popup_pieces() {
    let store = two_spots();
    let mut session = Session::new();
    block_on(session.map_click(&store, coord! { x: 0.0, y: 0.0 }, Some(1))).unwrap();

    block_on(session.dispatch(&store, Event::MoveStart));
    assert!(session.popover.is_none());
    assert!(session.popup_visible);

    block_on(session.dispatch(&store, Event::ClosePopover));
    assert!(!session.popup_visible);
}

#[test]
fn upload_inserts_raster_above_base() {
    let mut session = Session::new();

    let first = session
        .upload_raster("a.tif".into(), b"II*\0rest".to_vec())
        .unwrap();
    let second = session
        .upload_raster("b.tif".into(), b"MM\0*rest".to_vec())
        .unwrap();

    let names: Vec<String> = session.layers.iter().map(Layer::name).collect();
    assert_eq!(names, vec!["base", "raster:b.tif", "raster:a.tif", "spots"]);

    let ids: Vec<Uuid> = session.overlays().map(|o| o.id).collect();
    assert_eq!(ids, vec![second, first]);
    assert!(session.overlays().all(|o| o.convert_to_rgb && o.size == 8));
}

#[test]
fn upload_accepts_bigtiff() {
    let mut session = Session::new();

    assert!(session
        .upload_raster("big.tif".into(), b"II+\0\x08\0\0\0".to_vec())
        .is_ok());
}

#[test]
fn upload_rejects_non_tiff() {
    let store = FakeStore::default();
    let mut session = Session::new();

    let err = session
        .upload_raster("photo.png".into(), b"\x89PNG\r\n".to_vec())
        .unwrap_err();
    assert_eq!(err.code, 101);

    block_on(session.dispatch(
        &store,
        Event::UploadRaster {
            file_name: "empty.tif".into(),
            bytes: vec![],
        },
    ));
    assert_eq!(session.layers.len(), 2);
}

#[test]
fn readout_has_six_decimals() {
    let session = Session::new();

    assert_eq!(
        session.pointer_readout(coord! { x: 1113194.9079327357, y: -0.5 }),
        "1113194.907933, -0.500000"
    );
}

#[tokio::test]
async fn dispatch_toggle_then_click_through_dyn_api() {
    let api: crate::api::DynAPI = std::sync::Arc::new(two_spots());
    let mut session = Session::new();

    session.dispatch(api.as_ref(), Event::ToggleAddMode).await;
    session
        .dispatch(
            api.as_ref(),
            Event::MapClick {
                coordinate: coord! { x: 5.0, y: 5.0 },
                hit: None,
            },
        )
        .await;

    assert_eq!(session.spots.len(), 1);
    assert_eq!(api.list_spots().await.unwrap().len(), 3);
}
