mod common;

use common::{register_user, setup_app};
use rta_backend::services::{UploadedFile, MAX_UPLOAD_BYTES};
use rta_backend::stores::Storage;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

fn docx(name: &str, data: Vec<u8>) -> UploadedFile {
    UploadedFile {
        name: name.to_string(),
        content_type: Some(DOCX_MIME.to_string()),
        data,
    }
}

#[tokio::test]
async fn test_upload_list_delete_download_cycle() {
    let fixture = setup_app().await;
    let app = &fixture.app;
    let alice = register_user(app, "alice", "secret123").await;

    // Upload a 1 KiB .docx
    let document = app
        .documents
        .upload(&alice, docx("quarterly.docx", vec![7u8; 1024]))
        .await
        .unwrap();
    assert_eq!(document.size, 1024);

    // It shows up in the owner's listing
    let listed = app.documents.list(&alice).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "quarterly.docx");

    // Delete it; a later download answers NotFound
    app.documents.delete(&alice, document.id).await.unwrap();
    let err = app.documents.download(&alice, document.id).await.unwrap_err();
    assert!(matches!(
        err,
        rta_backend::errors::InternalError::Resource(
            rta_backend::errors::ResourceError::NotFound { .. }
        )
    ));
    assert!(app.documents.list(&alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rejected_uploads_leave_no_record() {
    let fixture = setup_app().await;
    let app = &fixture.app;
    let alice = register_user(app, "alice", "secret123").await;

    // Unknown media type
    let err = app
        .documents
        .upload(
            &alice,
            UploadedFile {
                name: "notes.docx".to_string(),
                content_type: Some("text/plain".to_string()),
                data: vec![0u8; 64],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        rta_backend::errors::InternalError::Resource(
            rta_backend::errors::ResourceError::UploadRejected { .. }
        )
    ));

    // Oversized payload
    let err = app
        .documents
        .upload(&alice, docx("big.docx", vec![0u8; MAX_UPLOAD_BYTES + 1]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        rta_backend::errors::InternalError::Resource(
            rta_backend::errors::ResourceError::UploadRejected { .. }
        )
    ));

    assert!(app.documents.list(&alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_document_ownership_is_enforced() {
    let fixture = setup_app().await;
    let app = &fixture.app;
    let alice = register_user(app, "alice", "secret123").await;
    let bob = register_user(app, "bob", "hunter22").await;

    let document = app
        .documents
        .upload(
            &alice,
            UploadedFile {
                name: "grid.xlsx".to_string(),
                content_type: Some(XLSX_MIME.to_string()),
                data: vec![1u8; 256],
            },
        )
        .await
        .unwrap();

    assert!(app.documents.download(&bob, document.id).await.is_err());
    assert!(app.documents.delete(&bob, document.id).await.is_err());

    // Nonexistent ids are NotFound even across users
    let err = app.documents.download(&bob, 9999).await.unwrap_err();
    assert!(matches!(
        err,
        rta_backend::errors::InternalError::Resource(
            rta_backend::errors::ResourceError::NotFound { .. }
        )
    ));
}

#[tokio::test]
async fn test_download_records_activity() {
    let fixture = setup_app().await;
    let app = &fixture.app;
    let alice = register_user(app, "alice", "secret123").await;

    let document = app
        .documents
        .upload(&alice, docx("audit.docx", b"bytes on disk".to_vec()))
        .await
        .unwrap();

    let (meta, bytes) = app.documents.download(&alice, document.id).await.unwrap();
    assert_eq!(meta.name, "audit.docx");
    assert_eq!(bytes, b"bytes on disk");

    let activities = app.storage.get_activities_by_user(alice.id).await.unwrap();
    assert_eq!(activities[0].action, "Document Download");
    assert!(activities.iter().any(|a| a.action == "Document Upload"));
}
