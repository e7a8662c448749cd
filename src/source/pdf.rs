//! PDF span source built on lopdf content-stream decoding.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use super::layout::{build_page, is_spaceless_script_char, PositionedSpan};
use super::SpanSource;
use crate::detect::{sniff_bytes, sniff_path};
use crate::error::{Error, Result};
use crate::model::PageLayout;
use crate::options::ErrorMode;

/// TJ adjustment (thousandths of text space) treated as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Reads spans with font sizes from a PDF document.
pub struct PdfSpanSource {
    doc: LopdfDocument,
    page_ids: Vec<ObjectId>,
    error_mode: ErrorMode,
}

impl PdfSpanSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        sniff_path(path)?;
        let doc = LopdfDocument::load(path)?;
        Ok(Self::from_document(doc))
    }

    /// Read a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        sniff_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::from_document(doc))
    }

    /// Read a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn from_document(doc: LopdfDocument) -> Self {
        if doc.is_encrypted() {
            log::warn!("document is encrypted; text may not decode");
        }
        let page_ids = doc.get_pages().into_values().collect();
        Self {
            doc,
            page_ids,
            error_mode: ErrorMode::Strict,
        }
    }

    /// Set how undecodable pages are handled.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// PDF version string from the file header.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        // A page without a content stream is blank
        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(Object::Stream(s)) => Ok(s
                    .decompressed_content()
                    .unwrap_or_else(|_| s.content.clone())),
                Ok(Object::Array(arr)) => Ok(self.concat_streams(arr)),
                _ => Err(Error::PdfParse("Invalid content stream".to_string())),
            },
            Object::Array(arr) => Ok(self.concat_streams(arr)),
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn concat_streams(&self, refs: &[Object]) -> Vec<u8> {
        let mut content = Vec::new();
        for obj in refs {
            if let Object::Reference(r) = obj {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    let data = s.decompressed_content().unwrap_or_else(|_| s.content.clone());
                    content.extend_from_slice(&data);
                    content.push(b' ');
                }
            }
        }
        content
    }

    fn page_spans(&self, page_id: ObjectId) -> Result<Vec<PositionedSpan>> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let content = self.page_content(page_id)?;
        if content.is_empty() {
            return Ok(Vec::new());
        }
        self.decode_spans(&content, &fonts)
    }

    fn decode_spans(
        &self,
        content: &[u8],
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
    ) -> Result<Vec<PositionedSpan>> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut spans = Vec::new();
        let mut font_name: Vec<u8> = Vec::new();
        let mut font_size: f32 = 12.0;
        let mut matrix = TextMatrix::default();
        let mut in_text = false;

        for op in &content.operations {
            let operands = &op.operands;
            let shown = match op.operator.as_str() {
                "BT" => {
                    in_text = true;
                    matrix = TextMatrix::default().with_leading(matrix.leading);
                    None
                }
                "ET" => {
                    in_text = false;
                    None
                }
                "Tf" if operands.len() >= 2 => {
                    if let Object::Name(name) = &operands[0] {
                        font_name = name.clone();
                    }
                    font_size = get_number(&operands[1]).unwrap_or(12.0);
                    None
                }
                "TL" => {
                    matrix.leading = operands.first().and_then(get_number).unwrap_or(0.0);
                    None
                }
                "Td" | "TD" if operands.len() >= 2 => {
                    let tx = get_number(&operands[0]).unwrap_or(0.0);
                    let ty = get_number(&operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        matrix.leading = -ty;
                    }
                    matrix.translate(tx, ty);
                    None
                }
                "Tm" if operands.len() >= 6 => {
                    let n = |i: usize, default: f32| get_number(&operands[i]).unwrap_or(default);
                    matrix.set(n(0, 1.0), n(1, 0.0), n(2, 0.0), n(3, 1.0), n(4, 0.0), n(5, 0.0));
                    None
                }
                "T*" => {
                    matrix.next_line();
                    None
                }
                "Tj" => match operands.first() {
                    Some(Object::String(bytes, _)) => Some(self.decode(fonts, &font_name, bytes)),
                    _ => None,
                },
                "TJ" => match operands.first() {
                    Some(Object::Array(items)) => Some(self.decode_tj(fonts, &font_name, items)),
                    _ => None,
                },
                "'" | "\"" => {
                    matrix.next_line();
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    match operands.get(text_idx) {
                        Some(Object::String(bytes, _)) => {
                            Some(self.decode(fonts, &font_name, bytes))
                        }
                        _ => None,
                    }
                }
                _ => None,
            };

            if let Some(text) = shown {
                if in_text && !text.trim().is_empty() {
                    let (x, y) = matrix.position();
                    spans.push(PositionedSpan {
                        text,
                        x,
                        y,
                        font_size: font_size * matrix.scale(),
                    });
                }
            }
        }

        Ok(spans)
    }

    fn decode_tj(
        &self,
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
        font_name: &[u8],
        items: &[Object],
    ) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => {
                    combined.push_str(&self.decode(fonts, font_name, bytes));
                }
                Object::Integer(_) | Object::Real(_) => {
                    // Large negative adjustments advance past a word gap
                    let adjustment = -get_number(item).unwrap_or(0.0);
                    if adjustment > TJ_SPACE_THRESHOLD
                        && !combined.is_empty()
                        && !combined.ends_with(' ')
                        && !combined.ends_with('\u{00A0}')
                        && !combined.chars().last().is_some_and(is_spaceless_script_char)
                    {
                        combined.push(' ');
                    }
                }
                _ => {}
            }
        }
        combined
    }

    fn decode(
        &self,
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
        font_name: &[u8],
        bytes: &[u8],
    ) -> String {
        if let Some(font) = fonts.get(font_name) {
            if let Ok(encoding) = font.get_font_encoding(&self.doc) {
                if let Ok(text) = LopdfDocument::decode_text(&encoding, bytes) {
                    return text;
                }
            }
        }
        decode_text_simple(bytes)
    }
}

impl SpanSource for PdfSpanSource {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn page(&self, index: usize) -> Result<PageLayout> {
        let page_id = *self
            .page_ids
            .get(index)
            .ok_or(Error::PageOutOfRange(index, self.page_ids.len()))?;

        match self.page_spans(page_id) {
            Ok(spans) => Ok(build_page(index, spans)),
            Err(e) if self.error_mode == ErrorMode::Lenient => {
                log::warn!("Failed to extract spans from page {}: {}", index, e);
                Ok(PageLayout::new(index))
            }
            Err(e) => Err(e),
        }
    }
}

/// Text matrix and leading, tracked across text operators.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            leading: 0.0,
        }
    }
}

impl TextMatrix {
    fn with_leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Without a TL operator, fall back to a 12pt leading
        let leading = if self.leading != 0.0 { self.leading } else { 12.0 };
        self.translate(0.0, -leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Fallback decoding when the font has no usable encoding.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}
