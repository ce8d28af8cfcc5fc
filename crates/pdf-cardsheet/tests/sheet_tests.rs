use image::{Rgb, RgbImage};
use lopdf::Document;
use pdf_cardsheet::*;
use std::path::Path;

/// 10x10 inch page at 10 dpi with 2x3 inch cards and half inch margins:
/// 100x100px page, 20x30px cells, 5px margin, 3 columns by 2 rows
fn small_options() -> SheetOptions {
    SheetOptions {
        paper_size: PaperSize::Custom {
            width_in: 10.0,
            height_in: 10.0,
        },
        dpi: 10,
        card_width_in: 2.0,
        card_height_in: 3.0,
        margin_in: 0.5,
        resample: ResampleFilter::Nearest,
        parallel_pages: 2,
        ..Default::default()
    }
}

fn color_for(number: usize) -> [u8; 3] {
    [(number * 10) as u8, 255 - number as u8, 7]
}

/// Write `card_1.png` .. `card_<count>.png`, each filled with `color_for(n)`
fn write_cards(dir: &Path, count: usize) {
    for number in 1..=count {
        RgbImage::from_pixel(8, 12, Rgb(color_for(number)))
            .save(dir.join(format!("card_{}.png", number)))
            .unwrap();
    }
}

/// Collects pages in memory
#[derive(Default)]
struct CollectingWriter {
    pages: std::sync::Arc<std::sync::Mutex<Vec<CompositePage>>>,
}

impl PageWriter for CollectingWriter {
    fn append(&mut self, page: CompositePage) -> Result<()> {
        self.pages.lock().unwrap().push(page);
        Ok(())
    }

    fn pages_written(&self) -> usize {
        self.pages.lock().unwrap().len()
    }

    fn finish(self) -> Result<()> {
        Ok(())
    }
}

/// Write a noisy 200x300 PNG and cut it in half, inside the image data.
/// The header stays readable; decoding the pixels fails.
fn write_truncated_png(path: &Path) {
    RgbImage::from_fn(200, 300, |x, y| {
        Rgb([(x * 31 ^ y * 17) as u8, (x * y) as u8, (x + y * 7) as u8])
    })
    .save(path)
    .unwrap();
    let bytes = std::fs::read(path).unwrap();
    std::fs::write(path, &bytes[..bytes.len() / 2]).unwrap();
}

fn pdf_page_count(path: &Path) -> usize {
    Document::load(path).unwrap().get_pages().len()
}

#[tokio::test]
async fn test_load_images_natural_order() {
    let dir = tempfile::tempdir().unwrap();
    write_cards(dir.path(), 12);

    let images = load_images(dir.path(), DecodePolicy::Abort).await.unwrap();
    let names: Vec<&str> = images.iter().map(|i| i.name()).collect();
    let expected: Vec<String> = (1..=12).map(|n| format!("card_{}", n)).collect();
    assert_eq!(names, expected);
    assert_eq!(images[0].dimensions(), (8, 12));
}

#[tokio::test]
async fn test_load_images_skips_hidden_and_directories() {
    let dir = tempfile::tempdir().unwrap();
    write_cards(dir.path(), 2);
    RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]))
        .save(dir.path().join(".thumbnail.png"))
        .unwrap();
    std::fs::create_dir(dir.path().join("backs")).unwrap();

    let images = load_images(dir.path(), DecodePolicy::Abort).await.unwrap();
    assert_eq!(images.len(), 2);
}

#[tokio::test]
async fn test_load_images_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let images = load_images(dir.path(), DecodePolicy::Abort).await.unwrap();
    assert!(images.is_empty());
}

#[tokio::test]
async fn test_load_images_undecodable_aborts() {
    let dir = tempfile::tempdir().unwrap();
    write_cards(dir.path(), 2);
    std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

    match load_images(dir.path(), DecodePolicy::Abort).await {
        Err(SheetError::Decode { path, .. }) => {
            assert_eq!(path.file_name().unwrap(), "notes.txt");
        }
        other => panic!("Expected Decode error, got {:?}", other.map(|v| v.len())),
    }
}

#[tokio::test]
async fn test_load_images_undecodable_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_cards(dir.path(), 2);
    std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

    let images = load_images(dir.path(), DecodePolicy::Skip).await.unwrap();
    assert_eq!(images.len(), 2);
}

#[tokio::test]
async fn test_load_images_skips_corrupt_pixel_data() {
    let dir = tempfile::tempdir().unwrap();
    write_cards(dir.path(), 3);
    write_truncated_png(&dir.path().join("card_2.png"));

    // The header alone still parses
    assert!(ImageHandle::probe(dir.path().join("card_2.png")).is_ok());

    let images = load_images(dir.path(), DecodePolicy::Skip).await.unwrap();
    let names: Vec<&str> = images.iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["card_1", "card_3"]);
}

#[tokio::test]
async fn test_generate_skips_corrupt_pixel_data() {
    let input = tempfile::tempdir().unwrap();
    write_cards(input.path(), 3);
    write_truncated_png(&input.path().join("card_2.png"));
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("cards.png");

    let options = SheetOptions {
        decode_policy: DecodePolicy::Skip,
        output_format: OutputFormat::PngSequence,
        ..small_options()
    };
    let stats = generate_sheets(input.path(), &output, &options).await.unwrap();
    assert_eq!(stats.source_images, 2);
    assert_eq!(stats.output_pages, 1);

    // Slots stay dense: card_3 takes the second slot
    let geometry = Geometry::from_options(&options).unwrap();
    let page = image::open(out_dir.path().join("cards-001.png"))
        .unwrap()
        .to_rgb8();
    let (x, y) = geometry.slot_origin(1);
    assert_eq!(*page.get_pixel(x, y), Rgb(color_for(3)));
    let (x, y) = geometry.slot_origin(2);
    assert_eq!(*page.get_pixel(x, y), Rgb([255, 255, 255]));
}

#[tokio::test]
async fn test_load_images_only_undecodable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "one").unwrap();
    std::fs::write(dir.path().join("b.txt"), "two").unwrap();

    assert!(matches!(
        load_images(dir.path(), DecodePolicy::Skip).await,
        Err(SheetError::NoDecodableImages { .. })
    ));
    assert!(matches!(
        load_images(dir.path(), DecodePolicy::Abort).await,
        Err(SheetError::Decode { .. })
    ));
}

#[tokio::test]
async fn test_write_sheets_preserves_natural_order() {
    let dir = tempfile::tempdir().unwrap();
    write_cards(dir.path(), 13);

    let options = small_options();
    let geometry = Geometry::from_options(&options).unwrap();
    assert_eq!(geometry.images_per_page, 6);

    let images = load_images(dir.path(), options.decode_policy).await.unwrap();
    let writer = CollectingWriter::default();
    let pages = writer.pages.clone();

    let written = write_sheets(&images, &geometry, &options, writer).await.unwrap();
    assert_eq!(written, 3);

    let pages = pages.lock().unwrap();
    let indices: Vec<usize> = pages.iter().map(|p| p.page_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    let placed: Vec<usize> = pages.iter().map(|p| p.placed).collect();
    assert_eq!(placed, vec![6, 6, 1]);

    // Sorted index i is card_{i+1}, on page i / 6 at slot i % 6
    for i in 0..13 {
        let page = &pages[i / geometry.images_per_page];
        let (x, y) = geometry.slot_origin(i % geometry.images_per_page);
        assert_eq!(
            *page.image.get_pixel(x, y),
            Rgb(color_for(i + 1)),
            "image {}",
            i
        );
    }

    // Unused cells on the last page keep the background
    let (x, y) = geometry.slot_origin(1);
    assert_eq!(*pages[2].image.get_pixel(x, y), Rgb([255, 255, 255]));
}

#[tokio::test]
async fn test_generate_pdf() {
    let input = tempfile::tempdir().unwrap();
    write_cards(input.path(), 20);
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("nested").join("cards.pdf");

    let stats = generate_sheets(input.path(), &output, &small_options())
        .await
        .unwrap();

    assert_eq!(stats.source_images, 20);
    assert_eq!(stats.output_pages, 4);
    assert_eq!(stats.empty_cells, 4);
    assert_eq!(pdf_page_count(&output), 4);
}

#[tokio::test]
async fn test_generate_pdf_page_holds_full_page_image() {
    let input = tempfile::tempdir().unwrap();
    write_cards(input.path(), 1);
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("single.pdf");

    let stats = generate_sheets(input.path(), &output, &small_options())
        .await
        .unwrap();
    assert_eq!(stats.output_pages, 1);

    let doc = Document::load(&output).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1);

    let page_id = *pages.values().next().unwrap();
    let page = doc.get_dictionary(page_id).unwrap();
    let xobjects = page
        .get(b"Resources")
        .and_then(|r| r.as_dict())
        .and_then(|r| r.get(b"XObject"))
        .and_then(|x| x.as_dict())
        .unwrap();
    let image_id = xobjects.get(b"Im0").and_then(|o| o.as_reference()).unwrap();
    let image = doc.get_object(image_id).and_then(|o| o.as_stream()).unwrap();

    assert_eq!(image.dict.get(b"Width").and_then(|w| w.as_i64()).unwrap(), 100);
    assert_eq!(image.dict.get(b"Height").and_then(|h| h.as_i64()).unwrap(), 100);
}

#[tokio::test]
async fn test_generate_no_images_writes_nothing() {
    let input = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("empty.pdf");

    let stats = generate_sheets(input.path(), &output, &small_options())
        .await
        .unwrap();

    assert_eq!(stats.output_pages, 0);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_generate_no_images_removes_previous_pdf() {
    let input = tempfile::tempdir().unwrap();
    write_cards(input.path(), 8);
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("cards.pdf");

    generate_sheets(input.path(), &output, &small_options())
        .await
        .unwrap();
    assert_eq!(pdf_page_count(&output), 2);

    let empty = tempfile::tempdir().unwrap();
    let stats = generate_sheets(empty.path(), &output, &small_options())
        .await
        .unwrap();
    assert_eq!(stats.output_pages, 0);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_generate_png_sequence_removes_previous_extra_pages() {
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("sheet.png");
    let options = SheetOptions {
        output_format: OutputFormat::PngSequence,
        ..small_options()
    };

    let large = tempfile::tempdir().unwrap();
    write_cards(large.path(), 20);
    let stats = generate_sheets(large.path(), &output, &options).await.unwrap();
    assert_eq!(stats.output_pages, 4);
    assert!(out_dir.path().join("sheet-004.png").exists());

    let small = tempfile::tempdir().unwrap();
    write_cards(small.path(), 7);
    let stats = generate_sheets(small.path(), &output, &options).await.unwrap();
    assert_eq!(stats.output_pages, 2);

    assert!(out_dir.path().join("sheet-001.png").exists());
    assert!(out_dir.path().join("sheet-002.png").exists());
    assert!(!out_dir.path().join("sheet-003.png").exists());
    assert!(!out_dir.path().join("sheet-004.png").exists());
}

#[tokio::test]
async fn test_generate_png_sequence() {
    let input = tempfile::tempdir().unwrap();
    write_cards(input.path(), 7);
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("sheet.png");

    let options = SheetOptions {
        output_format: OutputFormat::PngSequence,
        ..small_options()
    };
    let stats = generate_sheets(input.path(), &output, &options).await.unwrap();
    assert_eq!(stats.output_pages, 2);

    let first = image::open(out_dir.path().join("sheet-001.png"))
        .unwrap()
        .to_rgb8();
    let second = image::open(out_dir.path().join("sheet-002.png"))
        .unwrap()
        .to_rgb8();
    assert_eq!(first.dimensions(), (100, 100));
    assert_eq!(*first.get_pixel(5, 5), Rgb(color_for(1)));
    assert_eq!(*second.get_pixel(5, 5), Rgb(color_for(7)));
    assert!(!out_dir.path().join("sheet-003.png").exists());
}

#[tokio::test]
async fn test_generate_card_too_large_fails_before_io() {
    let options = SheetOptions {
        card_width_in: 9.5,
        ..small_options()
    };

    // The input directory does not exist; geometry is checked first
    let result = generate_sheets("/nonexistent/cards", "/nonexistent/out.pdf", &options).await;
    assert!(matches!(
        result,
        Err(SheetError::CellDoesNotFit {
            axis: Axis::Horizontal,
            ..
        })
    ));
}

#[tokio::test]
async fn test_generate_undecodable_writes_nothing() {
    let input = tempfile::tempdir().unwrap();
    write_cards(input.path(), 3);
    std::fs::write(input.path().join("card_2b.png"), "truncated").unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("cards.pdf");

    let result = generate_sheets(input.path(), &output, &small_options()).await;
    assert!(matches!(result, Err(SheetError::Decode { .. })));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_handle_probe_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, [0u8; 16]).unwrap();

    match ImageHandle::probe(&path) {
        Err(SheetError::Decode { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("Expected Decode error, got {:?}", other),
    }
}
