use photobook_layout::render::page_label;
use photobook_layout::*;

fn album() -> Vec<Asset> {
    vec![
        Asset::new("beach", 4000, 3000).with_caption("Morning swim"),
        Asset::new("clip", 1920, 1080).with_kind(MediaKind::Video),
        Asset::new("pier", 3000, 4000),
    ]
}

#[test]
fn test_preview_scales_page_geometry() {
    let assets = album();
    let mut config = LayoutConfig::default();
    config
        .caption_positions
        .insert("beach".into(), CaptionPosition::Left);
    let pages = compute_layout(&assets, &config);

    let scale = RenderScale::fit_width(pages[0].width, 600.0);
    let preview = preview_pages(&pages, &assets, scale);
    assert_eq!(preview.len(), pages.len());

    let page = &preview[0];
    assert!((page.width - 600.0).abs() < 1e-3);
    assert!((page.height - 400.0).abs() < 1e-3);
    assert_eq!(page.label, "Page 1");

    let beach = &page.frames[0];
    assert_eq!(beach.caption_text.as_deref(), Some("Morning swim"));
    let caption = beach.caption.unwrap();
    assert_eq!(caption.x, beach.frame.x);
    assert!((caption.width - beach.frame.width / 2.0).abs() < 1e-3);

    let clip = &page.frames[1];
    assert!(clip.is_video);
    assert_eq!(clip.caption, None);
    assert!((clip.frame.x - pages[0].boxes[1].x * scale.factor).abs() < 1e-3);
}

#[test]
fn test_preview_row_handles_follow_rows() {
    let assets = album();
    let pages = compute_layout(&assets, &LayoutConfig::default());
    let preview = preview_pages(&pages, &assets, RenderScale::new(1.0));

    let handles = &preview[0].row_handles;
    assert_eq!(handles.len(), pages[0].rows.len());
    let row = &pages[0].rows[0];
    assert_eq!(handles[0].y, row.y + row.height);
    assert!(!handles[0].overridden);
}

#[test]
fn test_spread_labels() {
    let assets: Vec<Asset> = (0..9)
        .map(|i| Asset::new(format!("sq-{}", i), 100, 100))
        .collect();
    let config = LayoutConfig {
        page: PageTarget::Custom {
            width_px: 1000,
            height_px: 400,
        },
        margin_px: 0.0,
        row_height_px: 300.0,
        spacing_px: 0.0,
        combine_spreads: true,
        ..Default::default()
    };
    let pages = compute_layout(&assets, &config);
    assert_eq!(page_label(&pages[0]), "Pages 1-2");
    assert_eq!(page_label(&pages[1]), "Page 3");
}

#[tokio::test]
async fn test_export_writes_pdf() {
    use tempfile::tempdir;

    let assets = album();
    let config = LayoutConfig {
        combine_spreads: true,
        ..Default::default()
    };
    let pages = compute_layout(&assets, &config);

    let dir = tempdir().unwrap();
    let path = dir.path().join("proof.pdf");
    export_pdf(&pages, &assets, "Summer", &path).await.unwrap();

    let bytes = tokio::fs::read(&path).await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_export_rejects_empty_layout() {
    let result = render::export_pdf_bytes(&[], &album(), "Empty");
    assert!(matches!(result, Err(LayoutError::Pdf(_))));
}
