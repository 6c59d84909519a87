//! Classification report rendering (PDF)
//!
//! Produces the downloadable report for a completed resolution: the
//! identified taxon, the full taxonomic hierarchy, the submitted trait
//! values, family details, and the fixed educational disclaimer and
//! acknowledgment paragraphs. Letter-sized pages, built-in Helvetica.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use thiserror::Error;

use plantify_core::{Attribute, Resolution, TraitSelection};

const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_LEFT_MM: f32 = 25.0;
const INDENT_MM: f32 = 32.0;
const TOP_START_MM: f32 = 260.0;
const BOTTOM_MARGIN_MM: f32 = 20.0;
const LINE_STEP_MM: f32 = 6.0;
const WRAP_COLUMNS: usize = 90;

const DISCLAIMER: &str = "Disclaimer: This classification report is generated for educational \
purposes to aid in the study of South Indian medicinal herbs. It should not be used for \
professional field identification without consulting a trained botanist.";

const ACKNOWLEDGMENT: &str = "Acknowledgment: Information in this report is based on publicly \
available botanical studies with proper attribution to sources like FRLHT and The Plant List.";

/// Report rendering errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// PDF document assembly failed
    #[error("PDF rendering failed: {0}")]
    Pdf(#[from] printpdf::Error),
}

/// Download filename for a species' report
pub fn report_filename(species: &str) -> String {
    format!("{}_classification_report.pdf", species.replace(' ', "_"))
}

/// Render the classification report for one resolution
pub fn render_report(
    resolution: &Resolution,
    selection: &TraitSelection,
) -> Result<Vec<u8>, ReportError> {
    let (doc, page, layer) = PdfDocument::new(
        "PLANTIFY! Classification Report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut cursor = PageCursor {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        y: TOP_START_MM,
    };

    cursor.line("PLANTIFY! Classification Report", 16.0, MARGIN_LEFT_MM, &bold);
    cursor.gap(4.0);
    cursor.line(&format!("Species: {}", resolution.species), 12.0, MARGIN_LEFT_MM, &font);
    cursor.line(&format!("Family: {}", resolution.family), 12.0, MARGIN_LEFT_MM, &font);
    cursor.line(
        &format!("Confidence: {:.2}%", resolution.confidence * 100.0),
        12.0,
        MARGIN_LEFT_MM,
        &font,
    );
    cursor.gap(4.0);

    cursor.line("Taxonomic Hierarchy:", 12.0, MARGIN_LEFT_MM, &bold);
    let taxonomy = &resolution.taxonomy;
    let ranks = [
        ("Kingdom", taxonomy.kingdom.as_str()),
        ("Division", taxonomy.division.as_str()),
        ("Class", taxonomy.class_name.as_str()),
        ("Order", taxonomy.order.as_str()),
        ("Family", taxonomy.family.as_str()),
        ("Genus", taxonomy.genus.as_str()),
        ("Species", taxonomy.epithet.as_str()),
    ];
    for (rank, value) in ranks {
        cursor.line(&format!("{rank}: {value}"), 12.0, INDENT_MM, &font);
    }
    cursor.paragraph(
        &format!("Description: {}", taxonomy.description),
        12.0,
        INDENT_MM,
        &font,
    );
    cursor.gap(4.0);

    cursor.line("Morphological Characteristics Used:", 12.0, MARGIN_LEFT_MM, &bold);
    for attribute in Attribute::ALL {
        cursor.line(
            &format!("{}: {}", attribute.label(), selection.get(attribute)),
            12.0,
            INDENT_MM,
            &font,
        );
    }
    cursor.gap(4.0);

    cursor.line("Family Details:", 12.0, MARGIN_LEFT_MM, &bold);
    let family_info = &resolution.family_info;
    cursor.paragraph(
        &format!("Description: {}", family_info.description),
        12.0,
        INDENT_MM,
        &font,
    );
    cursor.paragraph(
        &format!("Ethnobotanical Uses: {}", family_info.ethnobotanical_uses),
        12.0,
        INDENT_MM,
        &font,
    );
    cursor.paragraph(
        &format!("Reference: {}", family_info.reference),
        12.0,
        INDENT_MM,
        &font,
    );
    cursor.gap(4.0);

    cursor.paragraph(DISCLAIMER, 12.0, MARGIN_LEFT_MM, &font);
    cursor.gap(2.0);
    cursor.paragraph(ACKNOWLEDGMENT, 12.0, MARGIN_LEFT_MM, &font);

    Ok(doc.save_to_bytes()?)
}

/// Tracks the write position, adding pages as lines run past the margin
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageCursor<'_> {
    fn line(&mut self, text: &str, size: f32, x: f32, font: &IndirectFontRef) {
        if self.y < BOTTOM_MARGIN_MM {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP_START_MM;
        }
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
        self.y -= LINE_STEP_MM;
    }

    /// Word-wrapped multi-line text
    fn paragraph(&mut self, text: &str, size: f32, x: f32, font: &IndirectFontRef) {
        for line in wrap_text(text, WRAP_COLUMNS) {
            self.line(&line, size, x, font);
        }
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }
}

/// Greedy word wrap at a character limit; words longer than the limit
/// get a line of their own
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
