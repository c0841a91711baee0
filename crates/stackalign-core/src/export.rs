//! Export of per-layer placement records.
//!
//! The output feeds a downstream affine-warp routine, so the numeric fields
//! match what that routine expects: integer shifts of the bounding-box
//! top-left and a rotation rounded to two decimals. Both output formats are
//! deterministic byte-for-byte for a given store state.

use crate::store::LayerStore;
use serde::Serialize;
use thiserror::Error;

/// One exported layer placement. Field order here is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    pub filename: String,
    pub shift_x: i64,
    pub shift_y: i64,
    pub rotate: f64,
    /// 0-based index within the exported subset, not the full sequence.
    pub layer_order: usize,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// True when there is anything to export. The UI disables the export
/// trigger otherwise.
pub fn can_export(store: &LayerStore) -> bool {
    !store.layers().is_empty()
}

/// Build export records in sequence order. Checked layers only if any are
/// checked; the whole stack otherwise. Invisible layers still export.
pub fn export_records(store: &LayerStore) -> Vec<ExportRecord> {
    let checked = store.checked();
    store
        .layers()
        .iter()
        .filter(|layer| checked.is_empty() || checked.contains(&layer.id))
        .enumerate()
        .map(|(order, layer)| {
            let rotate = (layer.rotation * 100.0).round() / 100.0;
            ExportRecord {
                filename: layer.name.clone(),
                shift_x: layer.position.x.round() as i64,
                shift_y: layer.position.y.round() as i64,
                // Normalize -0.0 so it serializes as a plain zero.
                rotate: if rotate == 0.0 { 0.0 } else { rotate },
                layer_order: order,
            }
        })
        .collect()
}

/// Pretty-printed JSON array of records.
pub fn to_json(records: &[ExportRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// CSV with a fixed header; `filename` is the only free-text field and the
/// only quoted one (internal quotes doubled).
pub fn to_csv(records: &[ExportRecord]) -> String {
    let mut out = String::from("filename,shift_x,shift_y,rotate,layer_order\n");
    for record in records {
        let filename = record.filename.replace('"', "\"\"");
        out.push_str(&format!(
            "\"{}\",{},{},{},{}\n",
            filename, record.shift_x, record.shift_y, record.rotate, record.layer_order
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::DecodedImage;
    use crate::layer::{ImageHandle, LayerPatch};
    use kurbo::Point;

    fn store_with(names: &[&str]) -> LayerStore {
        let mut store = LayerStore::new();
        store.add_layers(
            names
                .iter()
                .map(|n| DecodedImage {
                    handle: ImageHandle::new(),
                    name: n.to_string(),
                    width: 100.0,
                    height: 50.0,
                })
                .collect(),
        );
        store
    }

    #[test]
    fn test_checked_subset_reindexes_layer_order() {
        let mut store = store_with(&["a.png", "b.png", "c.png"]);
        let id = store.layers()[1].id;
        store.toggle_checked(id);

        let records = export_records(&store);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].filename, "b.png");
        assert_eq!(records[0].layer_order, 0);
    }

    #[test]
    fn test_empty_checked_set_exports_all_in_sequence_order() {
        let store = store_with(&["a.png", "b.png", "c.png"]);
        let records = export_records(&store);
        assert_eq!(records.len(), 3);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.layer_order, i);
        }
        assert_eq!(records[2].filename, "c.png");
    }

    #[test]
    fn test_invisible_layers_still_export() {
        let mut store = store_with(&["a.png"]);
        let id = store.layers()[0].id;
        store.set_visible(id, false);
        assert_eq!(export_records(&store).len(), 1);
    }

    #[test]
    fn test_shift_rounding_is_half_away_from_zero() {
        let mut store = store_with(&["a.png"]);
        let id = store.layers()[0].id;
        store.move_layer_to(id, Point::new(10.5, -10.5));

        let records = export_records(&store);
        assert_eq!(records[0].shift_x, 11);
        assert_eq!(records[0].shift_y, -11);
    }

    #[test]
    fn test_rotate_rounds_to_two_decimals() {
        let mut store = store_with(&["a.png"]);
        store.toggle_all_checked();
        let id = store.layers()[0].id;
        store.update_layer(id, &LayerPatch::rotation(55.128_9));

        let records = export_records(&store);
        assert_eq!(records[0].rotate, 55.13);
    }

    #[test]
    fn test_json_key_order_and_shape() {
        let store = store_with(&["a.png"]);
        let json = to_json(&export_records(&store)).unwrap();

        let filename = json.find("\"filename\"").unwrap();
        let shift_x = json.find("\"shift_x\"").unwrap();
        let shift_y = json.find("\"shift_y\"").unwrap();
        let rotate = json.find("\"rotate\"").unwrap();
        let layer_order = json.find("\"layer_order\"").unwrap();
        assert!(filename < shift_x && shift_x < shift_y && shift_y < rotate && rotate < layer_order);

        assert!(json.trim_start().starts_with('['));
        assert!(json.trim_end().ends_with(']'));
    }

    #[test]
    fn test_csv_header_and_quoting() {
        let mut store = store_with(&["plain.png"]);
        store.add_layers(vec![DecodedImage {
            handle: ImageHandle::new(),
            name: "weird \"name\".png".to_string(),
            width: 10.0,
            height: 10.0,
        }]);

        let csv = to_csv(&export_records(&store));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "filename,shift_x,shift_y,rotate,layer_order");
        assert_eq!(lines[1], "\"plain.png\",0,0,0,0");
        assert_eq!(lines[2], "\"weird \"\"name\"\".png\",0,0,0,1");
    }

    #[test]
    fn test_empty_store_has_nothing_to_export() {
        let store = LayerStore::new();
        assert!(!can_export(&store));
        assert!(export_records(&store).is_empty());
        assert_eq!(to_csv(&[]), "filename,shift_x,shift_y,rotate,layer_order\n");
    }
}
