use photobook_layout::*;
use tempfile::tempdir;

#[tokio::test]
async fn test_load_csv_sorted_by_capture_time() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("album.csv");
    tokio::fs::write(
        &path,
        "id,width,height,rotated,caption,taken_at,kind\n\
         late,4000,3000,false,Dinner,2024-07-01T19:00:00Z,image\n\
         undated,3000,2000,,,,\n\
         early,3000,4000,true,,2024-07-01T07:15:00+02:00,image\n\
         clip,1920,1080,false,Waves,2024-07-01T12:00:00Z,video\n",
    )
    .await
    .unwrap();

    let assets = load_assets(&path).await.unwrap();
    let ids: Vec<&str> = assets.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["early", "clip", "late", "undated"]);
    assert!(assets[0].rotated);
    assert!(assets[1].is_video());
    assert_eq!(assets[2].caption_text(), Some("Dinner"));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_json_with_missing_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("album.json");
    tokio::fs::write(
        &path,
        r#"[
            { "id": "a", "width": 4000, "height": 3000 },
            { "id": "b", "kind": "video" },
            { "id": "a", "width": 1, "height": 1 }
        ]"#,
    )
    .await
    .unwrap();

    let assets = load_assets(&path).await.unwrap();
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0].width, 4000);
    assert_eq!((assets[1].width, assets[1].height), (0, 0));
    assert!(assets[1].is_video());
}

#[tokio::test]
async fn test_load_missing_file_fails() {
    let dir = tempdir().unwrap();
    let result = load_assets(dir.path().join("nope.csv")).await;
    assert!(matches!(result, Err(LayoutError::Io(_))));
}
