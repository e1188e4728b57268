use super::*;

#[tokio::test]
async fn test_save_and_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let store = UploadStore::open(&dir.path().join("uploads")).await.unwrap();

    let first = store.save("1. e4 *", Color::White).await.unwrap();
    let second = store.save("1. d4 d5 *", Color::Black).await.unwrap();

    assert_eq!(store.count().await, 2);
    assert_eq!(store.get(first.id).await, Some(first.clone()));
    assert_eq!(store.latest().await.map(|u| u.id), Some(second.id));
    assert_eq!(store.read_pgn(&second).await.unwrap(), "1. d4 d5 *");
    assert!(first.path.starts_with(dir.path().join("uploads")));
    assert_eq!(second.size_bytes, 10);
}

#[tokio::test]
async fn test_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = UploadStore::open(dir.path()).await.unwrap();

    assert_eq!(store.latest().await, None);
    assert_eq!(store.get(Uuid::new_v4()).await, None);
}

#[test]
fn test_summary_uses_color_name() {
    let upload = UploadedFile {
        id: Uuid::nil(),
        path: PathBuf::from("x.pgn"),
        player_color: Color::Black,
        uploaded_at: Utc::now(),
        size_bytes: 3,
    };
    let summary = UploadSummary::from(&upload);
    assert_eq!(summary.player_color, "black");
    assert_eq!(summary.id, Uuid::nil());
}
