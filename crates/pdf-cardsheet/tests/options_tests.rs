use pdf_cardsheet::*;

#[test]
fn test_default_options_are_valid() {
    let options = SheetOptions::default();
    assert!(options.validate().is_ok());
    assert_eq!(options.paper_size, PaperSize::A4);
    assert_eq!(options.dpi, 300);
    assert!(options.parallel_pages >= 1);
}

#[test]
fn test_validation_zero_dpi() {
    let options = SheetOptions {
        dpi: 0,
        ..Default::default()
    };
    match options.validate() {
        Err(SheetError::Config(msg)) => assert!(msg.contains("DPI")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_validation_non_positive_lengths() {
    let mut options = SheetOptions::default();

    options.card_width_in = 0.0;
    assert!(options.validate().is_err());

    options.card_width_in = -2.5;
    assert!(options.validate().is_err());

    options.card_width_in = f64::NAN;
    assert!(options.validate().is_err());

    options.card_width_in = 2.5;
    options.card_height_in = f64::INFINITY;
    assert!(options.validate().is_err());

    options.card_height_in = 3.5;
    options.paper_size = PaperSize::Custom {
        width_in: 8.5,
        height_in: 0.0,
    };
    match options.validate() {
        Err(SheetError::Config(msg)) => assert!(msg.contains("Page height")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_validation_margin() {
    let mut options = SheetOptions::default();

    options.margin_in = 0.0;
    assert!(options.validate().is_ok());

    options.margin_in = -0.1;
    assert!(options.validate().is_err());
}

#[test]
fn test_validation_parallel_pages() {
    let options = SheetOptions {
        parallel_pages: 0,
        ..Default::default()
    };
    assert!(matches!(options.validate(), Err(SheetError::Config(_))));
}

#[test]
fn test_geometry_runs_validation() {
    let options = SheetOptions {
        dpi: 0,
        ..Default::default()
    };
    assert!(matches!(
        Geometry::from_options(&options),
        Err(SheetError::Config(_))
    ));
}

#[test]
fn test_paper_orientation() {
    assert_eq!(
        PaperSize::Letter.dimensions_with_orientation(Orientation::Portrait),
        (8.5, 11.0)
    );
    assert_eq!(
        PaperSize::Letter.dimensions_with_orientation(Orientation::Landscape),
        (11.0, 8.5)
    );
    let options = SheetOptions {
        paper_size: PaperSize::A5,
        orientation: Orientation::Landscape,
        ..Default::default()
    };
    assert_eq!(options.page_dimensions_in(), (8.27, 5.83));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let options = SheetOptions {
        paper_size: PaperSize::Custom {
            width_in: 12.0,
            height_in: 18.0,
        },
        orientation: Orientation::Landscape,
        dpi: 600,
        card_width_in: 2.48,
        card_height_in: 3.46,
        margin_in: 0.0625,
        background: [0, 0, 0],
        resample: ResampleFilter::Lanczos3,
        decode_policy: DecodePolicy::Skip,
        output_format: OutputFormat::PngSequence,
        parallel_pages: 3,
    };

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    options.save(path).await.unwrap();
    let loaded = SheetOptions::load(path).await.unwrap();

    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_options_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), r#"{ "dpi": 150, "paper_size": "Letter" }"#).unwrap();

    let loaded = SheetOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.dpi, 150);
    assert_eq!(loaded.paper_size, PaperSize::Letter);
    assert_eq!(loaded.card_width_in, SheetOptions::default().card_width_in);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_malformed_options() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), "{ not json").unwrap();

    match SheetOptions::load(temp_file.path()).await {
        Err(SheetError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}
