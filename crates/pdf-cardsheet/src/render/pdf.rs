//! PDF output
//!
//! Each composed page becomes an RGB image XObject drawn over the full
//! media box. The page size in points follows from the pixel size and DPI,
//! so the printed page has the intended physical size.

use crate::compose::CompositePage;
use crate::constants::{PAGE_IMAGE_NAME, px_to_pt};
use crate::types::Result;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use super::PageWriter;

/// Builds a multi-page PDF in memory and saves it on [`PageWriter::finish`].
///
/// Nothing is written to disk until every page has been appended, so a run
/// that fails part way never leaves a document behind.
pub struct PdfPageWriter {
    doc: Document,
    pages_id: ObjectId,
    page_refs: Vec<Object>,
    dpi: u32,
    output: PathBuf,
}

impl PdfPageWriter {
    pub fn new(output: impl Into<PathBuf>, dpi: u32) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_refs: Vec::new(),
            dpi,
            output: output.into(),
        }
    }

    fn finalize_page_tree(&mut self) {
        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(std::mem::take(&mut self.page_refs))),
            ("Count", Object::Integer(count)),
        ]);
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        self.doc.trailer.set("Root", catalog_id);
    }
}

impl PageWriter for PdfPageWriter {
    fn append(&mut self, page: CompositePage) -> Result<()> {
        let (width_px, height_px) = page.image.dimensions();
        let width_pt = px_to_pt(width_px, self.dpi) as f32;
        let height_pt = px_to_pt(height_px, self.dpi) as f32;

        let image_id = self.doc.add_object(image_xobject(page)?);

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(width_pt),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Real(height_pt),
                        Object::Integer(0),
                        Object::Integer(0),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(PAGE_IMAGE_NAME.as_bytes().to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.encode()?));

        let mut xobjects = Dictionary::new();
        xobjects.set(PAGE_IMAGE_NAME, Object::Reference(image_id));
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let page_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(self.pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(width_pt),
                    Object::Real(height_pt),
                ]),
            ),
            ("Resources", Object::Dictionary(resources)),
            ("Contents", Object::Reference(content_id)),
        ]));
        self.page_refs.push(Object::Reference(page_id));

        Ok(())
    }

    fn pages_written(&self) -> usize {
        self.page_refs.len()
    }

    /// Save the document. A writer that never received a page writes nothing
    /// and removes a document left at the output path by an earlier run.
    fn finish(mut self) -> Result<()> {
        if self.page_refs.is_empty() {
            match std::fs::remove_file(&self.output) {
                Ok(()) => log::info!(
                    "No pages to write, removed stale {}",
                    self.output.display()
                ),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    log::info!("No pages to write, skipping {}", self.output.display())
                }
                Err(err) => return Err(err.into()),
            }
            return Ok(());
        }

        let page_count = self.page_refs.len();
        self.finalize_page_tree();
        let mut writer = BufWriter::new(File::create(&self.output)?);
        self.doc.save_to(&mut writer)?;

        log::info!("Wrote {} page(s) to {}", page_count, self.output.display());
        Ok(())
    }
}

/// Flate-compressed DeviceRGB image stream holding the page pixels
fn image_xobject(page: CompositePage) -> Result<Stream> {
    let (width, height) = page.image.dimensions();

    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(width as i64));
    dict.set("Height", Object::Integer(height as i64));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));

    let mut stream = Stream::new(dict, page.image.into_raw());
    stream.compress()?;
    Ok(stream)
}
