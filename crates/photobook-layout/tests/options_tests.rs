use photobook_layout::constants::*;
use photobook_layout::*;

#[test]
fn test_validation_rejects_missing_content_area() {
    let config = LayoutConfig {
        page: PageTarget::Custom {
            width_px: 800,
            height_px: 800,
        },
        margin_px: 400.0,
        ..Default::default()
    };
    match config.validate() {
        Err(LayoutError::Config(msg)) => assert!(msg.contains("no content area")),
        other => panic!("Expected Config error, got {:?}", other),
    }
    assert!(config.clamped().validate().is_ok());
}

#[test]
fn test_paper_targets_use_print_resolution() {
    let config = LayoutConfig {
        page: PageTarget::Paper {
            size: PaperSize::Letter,
            orientation: Orientation::Portrait,
        },
        ..Default::default()
    };
    assert_eq!(config.page_dimensions(), (2550.0, 3300.0));
    assert_eq!(mm_to_px(210.0), A4_PORTRAIT_PX.0);
    assert_eq!(mm_to_px(297.0), A4_PORTRAIT_PX.1);
}

#[test]
fn test_custom_page_sides_are_clamped() {
    let config = LayoutConfig {
        page: PageTarget::Custom {
            width_px: 10,
            height_px: 90_000,
        },
        ..Default::default()
    };
    assert_eq!(
        config.clamped().page.dimensions_px(),
        (MIN_PAGE_SIDE_PX, MAX_PAGE_SIDE_PX)
    );
}

#[test]
fn test_without_customizations_keeps_settings() {
    let mut config = LayoutConfig {
        margin_px: 42.0,
        combine_spreads: true,
        ..Default::default()
    };
    config.aspect_overrides.insert("a".into(), 1.5);
    config.manual_order.push("a".into());
    config.page_alignments.insert(2, Alignment::Center);

    let plain = config.without_customizations();
    assert_eq!(plain.margin_px, 42.0);
    assert!(plain.combine_spreads);
    assert!(plain.aspect_overrides.is_empty());
    assert!(plain.manual_order.is_empty());
    assert!(plain.page_alignments.is_empty());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_config() {
    use tempfile::NamedTempFile;

    let mut config = LayoutConfig {
        page: PageTarget::Paper {
            size: PaperSize::A4,
            orientation: Orientation::Landscape,
        },
        margin_px: 120.0,
        row_height_px: 480.0,
        combine_spreads: true,
        caption_position: CaptionPosition::Left,
        ..Default::default()
    };
    config.aspect_overrides.insert("beach".into(), 1.25);
    config
        .caption_positions
        .insert("pier".into(), CaptionPosition::Right);
    config.manual_order = vec!["pier".into(), "beach".into()];
    config.row_height_overrides.insert("beach".into(), 700.0);
    config.page_alignments.insert(3, Alignment::Right);

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    config.save(path).await.unwrap();
    let loaded = LayoutConfig::load(path).await.unwrap();

    assert_eq!(loaded, config);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_missing_file_loads_defaults_for_saving() {
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let path = dir.path().join("new-settings.json");
    assert!(matches!(
        LayoutConfig::load(&path).await,
        Err(LayoutError::Io(_))
    ));

    let mut config = LayoutConfig::load_or_default(&path).await.unwrap();
    assert_eq!(config, LayoutConfig::default());

    config.margin_px = 50.0;
    config.save(&path).await.unwrap();
    assert_eq!(LayoutConfig::load(&path).await.unwrap().margin_px, 50.0);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_malformed_file_is_not_replaced_by_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), "{ nope").await.unwrap();
    assert!(matches!(
        LayoutConfig::load_or_default(temp_file.path()).await,
        Err(LayoutError::Config(_))
    ));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_saved_values_are_clamped() {
    use tempfile::NamedTempFile;

    let config = LayoutConfig {
        row_height_px: 99_999.0,
        spacing_px: -3.0,
        ..Default::default()
    };
    let temp_file = NamedTempFile::new().unwrap();
    config.save(temp_file.path()).await.unwrap();

    let loaded = LayoutConfig::load(temp_file.path()).await.unwrap();
    // Capped at the 1800px content height of the default page
    assert_eq!(loaded.row_height_px, 1800.0);
    assert_eq!(loaded.spacing_px, 0.0);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_partial_record_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(
        temp_file.path(),
        r#"{ "spacing_px": 8.0, "theme": "dark", "page": { "kind": "custom", "width_px": 2000, "height_px": 2000 } }"#,
    )
    .await
    .unwrap();

    let loaded = LayoutConfig::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.spacing_px, 8.0);
    assert_eq!(loaded.page.dimensions_px(), (2000, 2000));
    assert_eq!(loaded.row_height_px, DEFAULT_ROW_HEIGHT_PX);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_rejects_malformed_json() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), "{ not json").await.unwrap();
    assert!(matches!(
        LayoutConfig::load(temp_file.path()).await,
        Err(LayoutError::Config(_))
    ));
}
