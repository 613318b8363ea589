//! Upload endpoint integration tests.
//!
//! Run with: `cargo test -p potvrzenka-api --test confirmations_test`

mod helpers;

use axum::http::StatusCode;
use axum_test::TestServer;
use std::io::Cursor;

const BOUNDARY: &str = "potvrzenka-test-boundary";
const HEADER: &str = "Datum zaúčtování,Částka,Měna,Zpráva pro příjemce,Variabilní symbol";

fn entry_names(archive_bytes: &[u8]) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(archive_bytes.to_vec())).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

#[tokio::test]
async fn upload_returns_zip_with_one_entry_per_accepted_row() {
    let server = TestServer::new(helpers::test_router()).unwrap();

    let csv = format!(
        "{}\n01.03.2024,100,CZK,Jan Novák fotbal,123456\n02.03.2024,-50,CZK,odchozí platba,111",
        HEADER
    );
    let body = helpers::multipart_body(BOUNDARY, "csv_file", "vypis.csv", &helpers::utf16(&csv));

    let response = server
        .post("/confirmations")
        .add_header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .bytes(body.into())
        .await;

    response.assert_status_ok();

    let content_type = response.header("content-type");
    assert_eq!(content_type.to_str().unwrap(), "application/zip");

    let disposition = response.header("content-disposition");
    assert!(disposition
        .to_str()
        .unwrap()
        .contains("pdf_confirmations.zip"));

    let archive_bytes = response.as_bytes().to_vec();
    assert_eq!(entry_names(&archive_bytes), vec!["row1_01-03-2024.pdf"]);
}

#[tokio::test]
async fn header_only_upload_returns_valid_empty_archive() {
    let server = TestServer::new(helpers::test_router()).unwrap();

    let body = helpers::multipart_body(BOUNDARY, "csv_file", "vypis.csv", &helpers::utf16(HEADER));
    let response = server
        .post("/confirmations")
        .add_header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .bytes(body.into())
        .await;

    response.assert_status_ok();
    assert_eq!(entry_names(&response.as_bytes().to_vec()).len(), 0);
}

#[tokio::test]
async fn missing_file_field_is_a_client_error() {
    let server = TestServer::new(helpers::test_router()).unwrap();

    // A multipart body whose only field is not the expected csv_file.
    let body = helpers::multipart_body(BOUNDARY, "note", "note.txt", b"no csv here");
    let response = server
        .post("/confirmations")
        .add_header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .bytes(body.into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.text().contains("No file uploaded"));
}

#[tokio::test]
async fn upload_form_is_served_at_root() {
    let server = TestServer::new(helpers::test_router()).unwrap();

    let response = server.get("/").await;
    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains("csv_file"));
    assert!(page.contains("/confirmations"));
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let server = TestServer::new(helpers::test_router()).unwrap();

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert!(response.text().contains("ok"));
}
