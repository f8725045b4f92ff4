/////////////////////////////////////////////////////////////////////////////////////
//
// Epitools - epidemic model utilities
//
// report module
//
// collects figures into a single multi-page pdf and reshapes two-level
// result tables for export
//
////////////////////////////////////////////////////////////////////////////////////

use printpdf::{BuiltinFont, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use std::collections::HashMap;
use std::error;
use std::fmt;
use std::fs::File;
use std::hash::Hash;
use std::io;
use std::io::BufWriter;
use std::path::Path;

// A4 portrait
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;

/// Anything that can draw itself onto one pdf page.
pub trait Figure {
    fn render(
        &self,
        doc: &PdfDocumentReference,
        layer: &PdfLayerReference,
    ) -> Result<(), ReportError>;
}

/// Plain text page - a title line and a body of lines in Helvetica.
pub struct TextFigure {
    title: String,
    lines: Vec<String>,
}

impl TextFigure {
    pub fn new(title: &str, lines: Vec<String>) -> TextFigure {
        TextFigure {
            title: title.to_string(),
            lines,
        }
    }
}

impl Figure for TextFigure {
    fn render(
        &self,
        doc: &PdfDocumentReference,
        layer: &PdfLayerReference,
    ) -> Result<(), ReportError> {
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Document(e.to_string()))?;
        layer.use_text(
            self.title.clone(),
            18.0,
            Mm(20.0),
            Mm(PAGE_HEIGHT_MM - 30.0),
            &font,
        );
        let mut y = PAGE_HEIGHT_MM - 45.0;
        for line in &self.lines {
            layer.use_text(line.clone(), 11.0, Mm(20.0), Mm(y), &font);
            y -= 6.0;
        }
        Ok(())
    }
}

/// Ordered collection of figures with pdf export. Insertion order is page
/// order unless a position is given.
pub struct PdfDeck {
    figs: Vec<Box<dyn Figure>>,
}

impl PdfDeck {
    pub fn new() -> PdfDeck {
        PdfDeck { figs: Vec::new() }
    }

    pub fn from_figures(figs: Vec<Box<dyn Figure>>) -> PdfDeck {
        PdfDeck { figs }
    }

    /// Append, or insert at position shifting later figures right. An
    /// out-of-range position fails the way Vec::insert fails.
    pub fn add_figure(&mut self, fig: Box<dyn Figure>, position: Option<usize>) {
        match position {
            Some(index) => self.figs.insert(index, fig),
            None => self.figs.push(fig),
        }
    }

    pub fn len(&self) -> usize {
        self.figs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figs.is_empty()
    }

    /// Write every figure as one A4 page, in deck order. A figure failure
    /// stops rendering but the document - with the pages completed so far -
    /// is still finalized to disk before the failure propagates.
    pub fn make(&self, fpath: &Path) -> Result<(), ReportError> {
        let title = fpath
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("figures");
        let doc = PdfDocument::empty(title);

        let mut failure: Option<ReportError> = None;
        for fig in &self.figs {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "figure");
            let layer = doc.get_page(page).get_layer(layer);
            if let Err(e) = fig.render(&doc, &layer) {
                failure = Some(e);
                break;
            }
        }

        let file = File::create(fpath).map_err(ReportError::Io)?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| ReportError::Document(e.to_string()))?;

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Build a deck from figs and write it to fpath in one call.
    pub fn save_as_pdf(figs: Vec<Box<dyn Figure>>, fpath: &Path) -> Result<(), ReportError> {
        PdfDeck::from_figures(figs).make(fpath)
    }
}

impl Default for PdfDeck {
    fn default() -> PdfDeck {
        PdfDeck::new()
    }
}

/// Swap the levels of a two-level table: outer -> inner -> value becomes
/// inner -> outer -> value. The inner-key set is read from the first outer
/// entry the map yields; an outer entry missing one of those keys fails the
/// transform, and extra inner keys elsewhere are dropped.
pub fn swaplevel<K1, K2, V>(
    table: &HashMap<K1, HashMap<K2, V>>,
) -> Result<HashMap<K2, HashMap<K1, V>>, ReportError>
where
    K1: Clone + Eq + Hash,
    K2: Clone + Eq + Hash + fmt::Display,
    V: Clone,
{
    let inner_keys: Vec<K2> = match table.values().next() {
        Some(first) => first.keys().cloned().collect(),
        None => return Ok(HashMap::new()),
    };

    let mut swapped: HashMap<K2, HashMap<K1, V>> = HashMap::with_capacity(inner_keys.len());
    for in_key in inner_keys {
        let mut row: HashMap<K1, V> = HashMap::with_capacity(table.len());
        for (out_key, inner) in table {
            let value = inner
                .get(&in_key)
                .ok_or_else(|| ReportError::KeyNotFound(in_key.to_string()))?;
            row.insert(out_key.clone(), value.clone());
        }
        swapped.insert(in_key, row);
    }
    Ok(swapped)
}

#[derive(Debug)]
pub enum ReportError {
    KeyNotFound(String),
    Render(String),
    Document(String),
    Io(io::Error),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReportError::KeyNotFound(key) => write!(f, "no value under key '{}'", key),
            ReportError::Render(msg) => write!(f, "could not render figure - {}", msg),
            ReportError::Document(msg) => write!(f, "could not build document - {}", msg),
            ReportError::Io(e) => write!(f, "could not write document - {}", e),
        }
    }
}

impl error::Error for ReportError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ReportError::Io(e) => Some(e),
            _ => None,
        }
    }
}
