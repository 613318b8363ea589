//! Fixed-layout rendering of one payment confirmation per record.
//!
//! The page is composed top-to-bottom with a vertical cursor: letterhead,
//! rule, centered title, body lines, then a footer anchored a fixed
//! distance above the bottom edge (issue date and signature image). All
//! metrics are A4 millimetres.

use crate::error::RenderError;
use crate::extractor::{columns, FieldRecord};
use chrono::NaiveDate;
use potvrzenka_core::{FontSource, TemplateAssets};
use printpdf::image_crate::codecs::jpeg::JpegDecoder;
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point,
};
use std::io::Cursor;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_LEFT_MM: f32 = 10.0;
const MARGIN_TOP_MM: f32 = 10.0;
const RULE_RIGHT_MM: f32 = 200.0;

const LETTERHEAD_FONT_PT: f32 = 10.0;
const TITLE_FONT_PT: f32 = 16.0;
const BODY_FONT_PT: f32 = 12.0;

const LETTERHEAD_LINE_MM: f32 = 8.0;
const TITLE_LINE_MM: f32 = 10.0;
const BODY_LINE_MM: f32 = 10.0;
const BLOCK_GAP_MM: f32 = 5.0;

/// Footer block top edge, measured from the bottom of the page.
const FOOTER_OFFSET_MM: f32 = 40.0;
const SIGNATURE_X_MM: f32 = 150.0;
const SIGNATURE_WIDTH_MM: f32 = 40.0;
const SIGNATURE_DPI: f32 = 300.0;

const MM_PER_PT: f32 = 0.352_778;

const TITLE: &str = "Potvrzení o přijaté platbě";
const INTRO: &str =
    "Potvrzujeme přijetí platby ve prospěch naší jednoty za níže uvedeného člena\n a pohybovou aktivitu.";
const RECIPIENT_LINE: &str =
    "Příjemce: Tělocvičná jednota Sokol Brno – Jundrov, IČO: 44995989";

/// Derive the archive entry name for an accepted record.
///
/// `sequence` counts accepted records only, starting at 1. The date
/// segment comes from the RAW posting-date value (dots replaced with
/// dashes); an absent or empty value leaves the segment empty.
pub fn derive_filename(sequence: usize, raw_posting_date: Option<&str>) -> String {
    let date_segment = raw_posting_date.unwrap_or("").replace('.', "-");
    format!("row{}_{}.pdf", sequence, date_segment)
}

/// Vertical text cursor over one page layer. Tracks the offset from the
/// top edge and converts to PDF bottom-left coordinates on placement.
struct PageCursor<'a> {
    layer: &'a PdfLayerReference,
    y_mm: f32,
}

impl<'a> PageCursor<'a> {
    fn new(layer: &'a PdfLayerReference) -> Self {
        PageCursor {
            layer,
            y_mm: MARGIN_TOP_MM,
        }
    }

    fn baseline(&self, size_pt: f32) -> Mm {
        Mm(PAGE_HEIGHT_MM - self.y_mm - size_pt * MM_PER_PT)
    }

    fn advance(&mut self, mm: f32) {
        self.y_mm += mm;
    }

    /// Jump to an absolute position measured from the bottom edge.
    fn anchor_from_bottom(&mut self, mm: f32) {
        self.y_mm = PAGE_HEIGHT_MM - mm;
    }

    fn text_line(&mut self, text: &str, size_pt: f32, line_mm: f32, font: &IndirectFontRef) {
        self.layer
            .use_text(text, size_pt, Mm(MARGIN_LEFT_MM), self.baseline(size_pt), font);
        self.advance(line_mm);
    }

    /// Left-aligned multi-line block; each `\n`-separated line is one row.
    fn text_block(&mut self, text: &str, size_pt: f32, line_mm: f32, font: &IndirectFontRef) {
        for line in text.lines() {
            self.text_line(line, size_pt, line_mm, font);
        }
    }

    fn centered_text_line(
        &mut self,
        text: &str,
        size_pt: f32,
        line_mm: f32,
        font: &IndirectFontRef,
    ) {
        // Average-glyph-width estimate; exact centering would need full
        // font metrics and the layout contract does not require it.
        let width_mm = text.chars().count() as f32 * size_pt * 0.5 * MM_PER_PT;
        let x = ((PAGE_WIDTH_MM - width_mm) / 2.0).max(MARGIN_LEFT_MM);
        self.layer
            .use_text(text, size_pt, Mm(x), self.baseline(size_pt), font);
        self.advance(line_mm);
    }

    /// Horizontal rule across the content width at the current offset.
    fn rule(&mut self) {
        let y = Mm(PAGE_HEIGHT_MM - self.y_mm);
        let line = Line {
            points: vec![
                (Point::new(Mm(MARGIN_LEFT_MM), y), false),
                (Point::new(Mm(RULE_RIGHT_MM), y), false),
            ],
            is_closed: false,
        };
        self.layer.add_line(line);
    }
}

/// Renders one confirmation page per normalized record.
pub struct ConfirmationRenderer<'a> {
    assets: &'a TemplateAssets,
}

impl<'a> ConfirmationRenderer<'a> {
    pub fn new(assets: &'a TemplateAssets) -> Self {
        ConfirmationRenderer { assets }
    }

    /// Render a single-page confirmation for one record.
    ///
    /// `issue_date` is the clock input for the footer, passed in so the
    /// caller owns time.
    pub fn render(
        &self,
        record: &FieldRecord,
        issue_date: NaiveDate,
    ) -> Result<Vec<u8>, RenderError> {
        let (doc, page_index, layer_index) =
            PdfDocument::new(TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let font = self.add_font(&doc)?;
        let layer = doc.get_page(page_index).get_layer(layer_index);
        let mut cursor = PageCursor::new(&layer);

        // Header: letterhead, rule just below it, centered title.
        cursor.text_block(
            &self.assets.letterhead,
            LETTERHEAD_FONT_PT,
            LETTERHEAD_LINE_MM,
            &font,
        );
        cursor.advance(2.0);
        cursor.rule();
        cursor.advance(BLOCK_GAP_MM);
        cursor.centered_text_line(TITLE, TITLE_FONT_PT, TITLE_LINE_MM, &font);
        cursor.advance(BLOCK_GAP_MM);

        // Body: intro sentence and the labeled fields of this payment.
        cursor.text_block(INTRO, BODY_FONT_PT, BODY_LINE_MM, &font);
        cursor.text_line(
            &format!(
                "Jméno a pohybová aktivita: {}",
                record.field(columns::ZPRAVA_PRO_PRIJEMCE)
            ),
            BODY_FONT_PT,
            BODY_LINE_MM,
            &font,
        );
        cursor.text_line(
            &format!(
                "Rodné číslo (var. symbol): {}",
                record.field(columns::VARIABILNI_SYMBOL)
            ),
            BODY_FONT_PT,
            BODY_LINE_MM,
            &font,
        );
        cursor.advance(BLOCK_GAP_MM);
        cursor.text_line("Detail platby:", BODY_FONT_PT, BODY_LINE_MM, &font);
        cursor.text_line(
            &format!("Přijato dne: {}", record.field(columns::DATUM_ZAUCTOVANI)),
            BODY_FONT_PT,
            BODY_LINE_MM,
            &font,
        );
        cursor.text_line(
            &format!(
                "Částka: {} {}",
                record.field(columns::CASTKA),
                record.field(columns::MENA)
            ),
            BODY_FONT_PT,
            BODY_LINE_MM,
            &font,
        );
        cursor.text_line(RECIPIENT_LINE, BODY_FONT_PT, BODY_LINE_MM, &font);

        // Footer: anchored above the bottom edge, not flowed with the body.
        cursor.anchor_from_bottom(FOOTER_OFFSET_MM);
        let footer_top_mm = cursor.y_mm;
        cursor.text_line(
            &format!("Datum vystavení: {}", issue_date.format("%d.%m.%Y")),
            BODY_FONT_PT,
            BODY_LINE_MM,
            &font,
        );
        self.place_signature(&layer, footer_top_mm)?;

        doc.save_to_bytes()
            .map_err(|e| RenderError::Pdf(e.to_string()))
    }

    fn add_font(&self, doc: &printpdf::PdfDocumentReference) -> Result<IndirectFontRef, RenderError> {
        match &self.assets.font {
            FontSource::Embedded(bytes) => doc
                .add_external_font(bytes.as_slice())
                .map_err(|e| RenderError::Font(e.to_string())),
            FontSource::Builtin => doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| RenderError::Font(e.to_string())),
        }
    }

    /// Decode the signature image and stamp it right of the footer text,
    /// top-aligned with it.
    fn place_signature(
        &self,
        layer: &PdfLayerReference,
        footer_top_mm: f32,
    ) -> Result<(), RenderError> {
        let bytes = self.assets.signature.as_slice();
        let image = if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
            let decoder = PngDecoder::new(Cursor::new(bytes))
                .map_err(|e| RenderError::Image(e.to_string()))?;
            Image::try_from(decoder).map_err(|e| RenderError::Image(e.to_string()))?
        } else {
            let decoder = JpegDecoder::new(Cursor::new(bytes))
                .map_err(|e| RenderError::Image(e.to_string()))?;
            Image::try_from(decoder).map_err(|e| RenderError::Image(e.to_string()))?
        };

        let px_width = image.image.width.0 as f32;
        let px_height = image.image.height.0 as f32;
        if px_width <= 0.0 {
            return Err(RenderError::Image("signature image has zero width".to_string()));
        }
        let natural_width_mm = px_width * 25.4 / SIGNATURE_DPI;
        let natural_height_mm = px_height * 25.4 / SIGNATURE_DPI;
        let scale = SIGNATURE_WIDTH_MM / natural_width_mm;
        let rendered_height_mm = natural_height_mm * scale;

        image.add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(SIGNATURE_X_MM)),
                translate_y: Some(Mm(PAGE_HEIGHT_MM - footer_top_mm - rendered_height_mm)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(SIGNATURE_DPI),
                ..Default::default()
            },
        );
        Ok(())
    }
}
