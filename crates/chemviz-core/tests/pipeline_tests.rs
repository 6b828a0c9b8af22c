//! End-to-end tests of the upload, retention, and report pipeline
//!
//! Each test runs against its own temporary data directory, so no external
//! services are required:
//! ```bash
//! cargo test -p chemviz-core --test pipeline_tests
//! ```

use chemviz_common::types::HistoryLimit;
use chemviz_core::report::report_filename;
use chemviz_core::service::{UploadRequest, UploadedFile};
use chemviz_core::store::source_key;
use chemviz_core::{DatasetService, DatasetStore, ErrorKind, StoreConfig};
use tempfile::TempDir;

const HEADER: &str = "Equipment Name,Type,Flowrate,Pressure,Temperature\n";

/// Open a service over a fresh data directory
async fn setup() -> (TempDir, DatasetService) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = DatasetStore::open(&StoreConfig::for_data_dir(dir.path()))
        .await
        .expect("store should open");
    (dir, DatasetService::new(store))
}

fn csv_upload(filename: &str, body: &str) -> UploadRequest {
    UploadRequest {
        file: Some(UploadedFile {
            filename: filename.to_string(),
            content: format!("{}{}", HEADER, body).into_bytes(),
        }),
        name: None,
    }
}

// ============================================================================
// Upload
// ============================================================================

#[tokio::test]
async fn test_reference_upload() {
    let (_dir, service) = setup().await;

    let dataset = service
        .upload(csv_upload(
            "reference.csv",
            "Pump-1,Pump,10,5,20\nPump-2,Pump,20,7,22\nValve-1,Valve,5,3,18\n",
        ))
        .await
        .expect("upload should succeed");

    assert_eq!(dataset.summary.total_count, 3);
    assert_eq!(format!("{:.2}", dataset.summary.avg_flowrate), "11.67");
    assert!((dataset.summary.avg_pressure - 5.0).abs() < 1e-9);
    assert!((dataset.summary.avg_temperature - 20.0).abs() < 1e-9);
    assert_eq!(dataset.summary.type_distribution.get("Pump"), Some(&2));
    assert_eq!(dataset.summary.type_distribution.get("Valve"), Some(&1));
    assert!(dataset.name.starts_with("Dataset "));

    assert_eq!(service.get(dataset.id).await.expect("stored"), dataset);
}

#[tokio::test]
async fn test_invalid_uploads_are_classified() {
    let (_dir, service) = setup().await;

    let cases = [
        ("Equipment Name,Type\nP,Pump\n", ErrorKind::Validation),
        ("Equipment Name,Type,Flowrate,Pressure,Temperature\n", ErrorKind::EmptyDataset),
        ("Equipment Name,Type,Flowrate,Pressure,Temperature\nP,Pump,x,1,2\n", ErrorKind::Parse),
        ("Equipment Name,Type,Flowrate,Pressure,Temperature\nP,\"Pump,1,2,3\n", ErrorKind::Parse),
    ];

    for (content, expected) in cases {
        let request = UploadRequest {
            file: Some(UploadedFile {
                filename: "bad.csv".to_string(),
                content: content.as_bytes().to_vec(),
            }),
            name: None,
        };
        let err = service.upload(request).await.expect_err("upload should fail");
        assert_eq!(err.kind(), expected, "{content:?}: {err}");
        assert!(err.is_client_error());
    }

    assert_eq!(service.store().count().await.expect("count"), 0);
}

// ============================================================================
// Retention
// ============================================================================

#[tokio::test]
async fn test_six_uploads_keep_five_most_recent() {
    let (dir, service) = setup().await;

    let mut ids = Vec::new();
    for i in 0..6 {
        let dataset = service
            .upload(csv_upload(&format!("upload-{i}.csv"), &format!("P{i},Pump,{i},1,1\n")))
            .await
            .expect("upload should succeed");
        ids.push(dataset.id);
    }

    let history = service.history(HistoryLimit::new(10)).await.expect("history");
    let history_ids: Vec<_> = history.iter().map(|d| d.id).collect();
    let expected: Vec<_> = ids.iter().rev().take(5).copied().collect();
    assert_eq!(history_ids, expected);

    let blob_dir = dir.path().join("media").join("uploads");
    assert!(!blob_dir.join(source_key(&ids[0])).exists());
    for id in &ids[1..] {
        assert!(blob_dir.join(source_key(id)).exists());
    }

    let err = service.get(ids[0]).await.expect_err("pruned");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ============================================================================
// Reports
// ============================================================================

#[tokio::test]
async fn test_report_for_latest_and_pruned() {
    let (_dir, service) = setup().await;

    let missing = service.report(None).await.expect_err("empty store");
    assert_eq!(missing.kind(), ErrorKind::NotFound);

    let mut body = String::new();
    for i in 0..100 {
        body.push_str(&format!("unit-{i},Category {i:03},1,2,3\n"));
    }
    let dataset = service.upload(csv_upload("wide.csv", &body)).await.expect("upload");

    let report = service.report(None).await.expect("report");
    assert_eq!(report.dataset_id, dataset.id);
    assert_eq!(report.filename, report_filename(&dataset.id));

    let doc = lopdf::Document::load_mem(&report.bytes).expect("valid pdf");
    assert_eq!(doc.get_pages().len(), 3);

    let again = service.report(Some(dataset.id)).await.expect("report by id");
    assert_eq!(again.bytes, report.bytes);
}
