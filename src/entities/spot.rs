use geo_types::{coord, Coord};
use serde::{Deserialize, Serialize};

pub type SpotId = i64;

/// A user-placed marker. Coordinates are in the map's native projection
/// (EPSG:3857) and are stored and sent as-is.
#[derive(Clone, Debug, PartialEq)]
pub struct Spot {
    pub id: SpotId,
    pub coordinates: Coord<f64>,
    pub label: String,
}

/// Wire shape of a spot as the spots API reads and writes it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpotRecord {
    #[serde(rename = "CoordX")]
    pub coord_x: f64,
    #[serde(rename = "CoordY")]
    pub coord_y: f64,
    #[serde(rename = "ID")]
    pub id: SpotId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub label: String,
}

/// Element of the `GET /spots/last` answer. The column name is the raw SQL
/// aggregate and is null on an empty table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaxIdRecord {
    #[serde(rename = "MAX(ID)")]
    pub max_id: Option<SpotId>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Spot {
    pub fn new(id: SpotId, coordinates: Coord<f64>) -> Self {
        Self {
            id,
            coordinates,
            label: "".into(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn to_record(&self) -> SpotRecord {
        SpotRecord {
            coord_x: self.coordinates.x,
            coord_y: self.coordinates.y,
            id: self.id,
            label: self.label.clone(),
        }
    }
}

impl From<SpotRecord> for Spot {
    fn from(record: SpotRecord) -> Self {
        Self {
            id: record.id,
            coordinates: coord! { x: record.coord_x, y: record.coord_y },
            label: record.label,
        }
    }
}

impl From<&Spot> for SpotRecord {
    fn from(spot: &Spot) -> Self {
        spot.to_record()
    }
}

#[test]
fn record_uses_api_field_names() {
    let spot = Spot::new(5, coord! { x: 1.5, y: 2.5 }).with_label("home");
    let value = serde_json::to_value(spot.to_record()).unwrap();

    assert_eq!(
        value,
        serde_json::json!({ "CoordX": 1.5, "CoordY": 2.5, "ID": 5, "label": "home" })
    );
    assert_eq!(value.as_object().unwrap().len(), 4);
}

#[test]
fn missing_label_serializes_as_empty_string() {
    let value = serde_json::to_value(Spot::new(1, coord! { x: 0.0, y: 0.0 }).to_record()).unwrap();

    assert_eq!(value["label"], "");
}

#[test]
fn records_decode_with_null_or_absent_label() {
    let records: Vec<SpotRecord> = serde_json::from_str(
        r#"[
            {"CoordX": 10.0, "CoordY": -3.25, "ID": 1, "label": null},
            {"CoordX": 0, "CoordY": 0, "ID": 2},
            {"CoordX": 1, "CoordY": 2, "ID": 3, "label": "pier"}
        ]"#,
    )
    .unwrap();

    let spots: Vec<Spot> = records.into_iter().map(Spot::from).collect();

    assert_eq!(spots[0].label, "");
    assert_eq!(spots[0].coordinates, coord! { x: 10.0, y: -3.25 });
    assert_eq!(spots[1].label, "");
    assert_eq!(spots[2].label, "pier");
}

#[test]
fn max_id_reads_aggregate_column() {
    let rows: Vec<MaxIdRecord> = serde_json::from_str(r#"[{"MAX(ID)": 41}]"#).unwrap();
    assert_eq!(rows[0].max_id, Some(41));

    let rows: Vec<MaxIdRecord> = serde_json::from_str(r#"[{"MAX(ID)": null}]"#).unwrap();
    assert_eq!(rows[0].max_id, None);
}
