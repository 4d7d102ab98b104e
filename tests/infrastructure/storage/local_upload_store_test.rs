use std::io;

use bytes::Bytes;
use futures::stream;
use uuid::Uuid;

use lipsync::application::ports::{UploadStore, UploadStoreError};
use lipsync::domain::{MediaKind, UploadPath};
use lipsync::infrastructure::storage::LocalUploadStore;

fn create_test_store() -> (tempfile::TempDir, LocalUploadStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalUploadStore::new(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

fn is_empty_dir(dir: &std::path::Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}

#[tokio::test]
async fn given_valid_stream_when_storing_then_file_is_readable_at_local_path() {
    let (_dir, store) = create_test_store();
    let path = UploadPath::new(Uuid::new_v4(), MediaKind::Video, "clip.mp4");

    let chunks = vec![Ok(Bytes::from("hello ")), Ok(Bytes::from("world"))];
    let size = store
        .store(&path, Box::pin(stream::iter(chunks)))
        .await
        .unwrap();

    assert_eq!(size, 11);
    let local = store.local_path(&path).unwrap();
    assert!(local.is_absolute());
    assert_eq!(std::fs::read(local).unwrap(), b"hello world");
}

#[tokio::test]
async fn given_chinese_file_name_when_storing_then_local_path_points_at_stored_bytes() {
    let (_dir, store) = create_test_store();
    let path = UploadPath::new(Uuid::new_v4(), MediaKind::Video, "视频.mp4");

    store
        .store(&path, Box::pin(stream::iter(vec![Ok(Bytes::from("frames"))])))
        .await
        .unwrap();

    let local = store.local_path(&path).unwrap();
    assert_eq!(std::fs::read(&local).unwrap(), b"frames");
}

#[tokio::test]
async fn given_stored_files_when_deleting_all_then_upload_dir_is_empty() {
    let (dir, store) = create_test_store();
    let id = Uuid::new_v4();
    let video = UploadPath::new(id, MediaKind::Video, "clip.mp4");
    let audio = UploadPath::new(id, MediaKind::Audio, "voice.wav");

    for path in [&video, &audio] {
        store
            .store(path, Box::pin(stream::iter(vec![Ok(Bytes::from("data"))])))
            .await
            .unwrap();
    }
    store.delete(&video).await.unwrap();

    assert!(!store.local_path(&video).unwrap().exists());
    assert!(store.local_path(&audio).unwrap().exists());

    store.delete(&audio).await.unwrap();

    assert!(is_empty_dir(dir.path()));
}

#[tokio::test]
async fn given_stream_error_when_storing_then_returns_error_and_leaves_no_directories() {
    let (dir, store) = create_test_store();
    let path = UploadPath::new(Uuid::new_v4(), MediaKind::Video, "clip.mp4");

    let chunks: Vec<Result<Bytes, io::Error>> = vec![
        Ok(Bytes::from("partial")),
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "network drop")),
    ];

    let result = store.store(&path, Box::pin(stream::iter(chunks))).await;
    assert!(matches!(result, Err(UploadStoreError::Io(_))));
    assert!(is_empty_dir(dir.path()));
}

#[tokio::test]
async fn given_nonexistent_path_when_deleting_then_returns_not_found() {
    let (_dir, store) = create_test_store();
    let path = UploadPath::new(Uuid::new_v4(), MediaKind::Audio, "missing.wav");

    let result = store.delete(&path).await;
    assert!(matches!(result, Err(UploadStoreError::NotFound(_))));
}
