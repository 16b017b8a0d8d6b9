use photobook_layout::*;

fn config_1000x400() -> LayoutConfig {
    LayoutConfig {
        page: PageTarget::Custom {
            width_px: 1000,
            height_px: 400,
        },
        margin_px: 0.0,
        row_height_px: 300.0,
        spacing_px: 0.0,
        ..Default::default()
    }
}

fn squares(count: usize) -> Vec<Asset> {
    (0..count)
        .map(|i| Asset::new(format!("sq-{}", i), 500, 500))
        .collect()
}

#[test]
fn test_statistics_for_single_pages() {
    let assets = squares(5);
    let config = config_1000x400();
    let pages = compute_layout(&assets, &config);
    let stats = calculate_statistics(&assets, &pages, &config);

    assert_eq!(stats.assets, 5);
    assert_eq!(stats.logical_pages, 2);
    assert_eq!(stats.output_pages, 2);
    assert_eq!(stats.rows, 2);
    // One justified row at 250 and the trailing row at 300
    assert!((stats.average_row_height_px - 275.0).abs() < 0.01);
}

#[test]
fn test_statistics_for_spreads() {
    let assets = squares(9);
    let config = LayoutConfig {
        combine_spreads: true,
        ..config_1000x400()
    };
    let pages = compute_layout(&assets, &config);
    let stats = calculate_statistics(&assets, &pages, &config);

    assert_eq!(stats.logical_pages, 3);
    assert_eq!(stats.output_pages, 2);
}

#[test]
fn test_statistics_count_customizations() {
    let mut assets = squares(3);
    assets[0].caption = Some("First light".into());
    assets[1].caption = Some("   ".into());

    let mut config = config_1000x400();
    config.caption_position = CaptionPosition::Right;
    config.aspect_overrides.insert("sq-0".into(), 1.5);
    config.row_height_overrides.insert("sq-0".into(), 320.0);
    config.aspect_overrides.insert("gone".into(), 2.0);
    config
        .caption_positions
        .insert("sq-2".into(), CaptionPosition::Overlay);

    let pages = compute_layout(&assets, &config);
    let stats = calculate_statistics(&assets, &pages, &config);

    // sq-0 and sq-2 are customized; "gone" is not in the album
    assert_eq!(stats.customized_assets, 2);
    // Only sq-0 has caption text beside its image
    assert_eq!(stats.side_captions, 1);
}

#[test]
fn test_statistics_for_empty_album() {
    let config = LayoutConfig::default();
    let stats = calculate_statistics(&[], &[], &config);
    assert_eq!(stats.output_pages, 0);
    assert_eq!(stats.rows, 0);
    assert_eq!(stats.average_row_height_px, 0.0);
}
