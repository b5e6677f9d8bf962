//! Export — Buy/Sell annotation partitions as CSV blobs.

use crate::annotations::{Annotation, AnnotationStore, Label};

/// Suggested file name for the Buy partition.
pub const BUY_FILE_NAME: &str = "buy.csv";
/// Suggested file name for the Sell partition.
pub const SELL_FILE_NAME: &str = "sell.csv";
/// Mime type for both blobs.
pub const EXPORT_MIME: &str = "text/csv";

/// CSV serialization failed. Should not happen when writing to memory, but
/// the writer API is fallible and the caller decides how to surface it.
#[derive(Debug, thiserror::Error)]
#[error("CSV export failed: {0}")]
pub struct ExportError(String);

/// The two exported blobs. An empty partition still yields a header-only
/// CSV, never a missing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    pub buy_csv: String,
    pub sell_csv: String,
}

/// Partition the store by label and serialize each group with an
/// `x,y,label` header, one row per annotation in insertion order. `x`
/// passes through in its source textual form; `y` is a plain decimal.
pub fn export(store: &AnnotationStore) -> Result<ExportBundle, ExportError> {
    Ok(ExportBundle {
        buy_csv: write_group(&store.filter_by_label(Label::Buy))?,
        sell_csv: write_group(&store.filter_by_label(Label::Sell))?,
    })
}

fn write_group(annotations: &[&Annotation]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["x", "y", "label"])
        .map_err(|e| ExportError(e.to_string()))?;
    for ann in annotations {
        writer
            .write_record([
                ann.x.to_string(),
                ann.y.to_string(),
                ann.label.to_string(),
            ])
            .map_err(|e| ExportError(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CellValue;

    fn ann(x: CellValue, y: f64, label: Label) -> Annotation {
        Annotation { x, y, label }
    }

    #[test]
    fn empty_store_exports_header_only_blobs() {
        let bundle = export(&AnnotationStore::new()).unwrap();
        assert_eq!(bundle.buy_csv, "x,y,label\n");
        assert_eq!(bundle.sell_csv, "x,y,label\n");
    }

    #[test]
    fn partitions_by_label_in_insertion_order() {
        let mut store = AnnotationStore::new();
        store.append(ann(
            CellValue::Date {
                raw: "2024-01-02".into(),
                value: chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            },
            100.5,
            Label::Buy,
        ));
        store.append(ann(CellValue::Number(7.0), 99.0, Label::Sell));
        store.append(ann(CellValue::Number(9.0), 101.0, Label::Buy));

        let bundle = export(&store).unwrap();
        assert_eq!(bundle.buy_csv, "x,y,label\n2024-01-02,100.5,Buy\n9,101,Buy\n");
        assert_eq!(bundle.sell_csv, "x,y,label\n7,99,Sell\n");
    }

    #[test]
    fn x_text_with_commas_is_quoted() {
        let mut store = AnnotationStore::new();
        store.append(ann(CellValue::Text("a,b".into()), 1.0, Label::Buy));
        let bundle = export(&store).unwrap();
        assert_eq!(bundle.buy_csv, "x,y,label\n\"a,b\",1,Buy\n");
    }
}
