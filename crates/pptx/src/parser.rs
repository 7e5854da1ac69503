//! PPTX file decoding into the closed shape-tree model.
//!
//! Walks the OOXML slide markup once and classifies each shape exactly
//! once: `p:sp` with a text body becomes a text frame, `a:tbl` inside a
//! `p:graphicFrame` becomes a table grid, everything else becomes an
//! opaque shape. Title detection relies on the `p:ph` placeholder type.

use crate::error::{Error, Result};
use decksum_core::{Deck, Shape, Slide};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PPTX file from a reader into a [`Deck`].
    pub fn parse<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<Deck> {
        let mut archive =
            ZipArchive::new(reader).map_err(|e| Error::Zip(format!("Failed to open ZIP: {}", e)))?;

        let mut deck = Deck::new(filename);

        // Get the slide order from presentation.xml.rels
        let slide_order = self.get_slide_order(&mut archive)?;

        for slide_path in &slide_order {
            let content = self.read_file_from_archive(&mut archive, slide_path)?;
            deck.add_slide(build_slide_from_xml(&content));
        }

        Ok(deck)
    }

    /// Get the ordered list of slide paths from the presentation relationships.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_path = "ppt/_rels/presentation.xml.rels";

        let rels_content = self.read_file_from_archive(archive, rels_path)?;
        let mut slides: Vec<(String, Option<usize>)> = Vec::new();

        let mut reader = Reader::from_str(&rels_content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let mut rel_type = String::new();
                    let mut target = String::new();
                    let mut id = String::new();

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Type" => {
                                rel_type = String::from_utf8_lossy(&attr.value).to_string();
                            }
                            b"Target" => {
                                target = String::from_utf8_lossy(&attr.value).to_string();
                            }
                            b"Id" => {
                                id = String::from_utf8_lossy(&attr.value).to_string();
                            }
                            _ => {}
                        }
                    }

                    // Check if this is a slide relationship
                    if rel_type.contains("/slide")
                        && !rel_type.contains("slideLayout")
                        && !rel_type.contains("slideMaster")
                    {
                        // Extract slide number from rId or target for ordering
                        let order_num =
                            extract_slide_number(&id).or_else(|| extract_slide_number(&target));
                        let full_path = if target.starts_with('/') {
                            target[1..].to_string()
                        } else {
                            format!("ppt/{}", target)
                        };
                        slides.push((full_path, order_num));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml {
                        part: rels_path.to_string(),
                        message: e.to_string(),
                    });
                }
                _ => {}
            }
        }

        // Sort slides by their number
        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = match archive.by_name(path) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(Error::MissingPart(path.to_string()));
            }
            Err(e) => {
                return Err(Error::Zip(format!("Failed to open '{}': {}", path, e)));
            }
        };

        let mut content = String::new();
        file.read_to_string(&mut content)?;

        Ok(content)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a [`Slide`] from slide XML.
///
/// Malformed XML is logged and the remaining slide content skipped; the
/// shapes decoded so far are kept.
pub fn build_slide_from_xml(xml_content: &str) -> Slide {
    let mut slide = Slide::new();
    // No trim_text here: it would eat significant whitespace between
    // adjacent text runs in the same paragraph.
    let mut reader = Reader::from_str(xml_content);

    // Shape under construction (p:sp)
    let mut in_shape = false;
    let mut shape_is_title = false;
    let mut shape_has_text_body = false;
    let mut paragraphs: Vec<String> = Vec::new();

    // Table under construction (p:graphicFrame > a:tbl)
    let mut in_graphic_frame = false;
    let mut grid: Option<Vec<Vec<String>>> = None;
    let mut current_row: Vec<String> = Vec::new();
    let mut in_cell = false;
    let mut cell_paragraphs: Vec<String> = Vec::new();

    // Paragraph under construction (a:p), shared by text frames and cells
    let mut current_paragraph: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    in_shape = true;
                    shape_is_title = false;
                    shape_has_text_body = false;
                    paragraphs.clear();
                }
                b"pic" if !in_shape => {
                    // Pictures carry no extractable content
                    slide.add_shape(Shape::other());
                }
                b"graphicFrame" => {
                    in_graphic_frame = true;
                    grid = None;
                }
                b"ph" => {
                    if in_shape && placeholder_is_title(e) {
                        shape_is_title = true;
                    }
                }
                b"txBody" if in_shape => {
                    shape_has_text_body = true;
                }
                b"tbl" if in_graphic_frame => {
                    grid = Some(Vec::new());
                }
                b"tr" if grid.is_some() => {
                    current_row.clear();
                }
                b"tc" if grid.is_some() => {
                    in_cell = true;
                    cell_paragraphs.clear();
                }
                b"p" if in_cell || (in_shape && shape_has_text_body) => {
                    current_paragraph = Some(String::new());
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"ph" => {
                    if in_shape && placeholder_is_title(e) {
                        shape_is_title = true;
                    }
                }
                b"pic" if !in_shape => {
                    slide.add_shape(Shape::other());
                }
                b"p" if in_cell => {
                    // Empty cell paragraph
                    cell_paragraphs.push(String::new());
                }
                b"p" if in_shape && shape_has_text_body => {
                    paragraphs.push(String::new());
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if let Some(ref mut paragraph) = current_paragraph {
                    let text = e.unescape().unwrap_or_default();
                    paragraph.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"p" => {
                    if let Some(paragraph) = current_paragraph.take() {
                        if in_cell {
                            cell_paragraphs.push(paragraph);
                        } else if in_shape {
                            paragraphs.push(paragraph);
                        }
                    }
                }
                b"tc" => {
                    if in_cell {
                        current_row.push(join_cell_paragraphs(&cell_paragraphs));
                        in_cell = false;
                    }
                }
                b"tr" => {
                    if let Some(ref mut rows) = grid {
                        rows.push(std::mem::take(&mut current_row));
                    }
                }
                b"graphicFrame" => {
                    let shape = match grid.take() {
                        Some(rows) => Shape::table(rows),
                        // Charts, diagrams, embedded objects
                        None => Shape::other(),
                    };
                    slide.add_shape(shape);
                    in_graphic_frame = false;
                }
                b"sp" => {
                    if in_shape {
                        let shape = if shape_has_text_body {
                            Shape::text_frame(std::mem::take(&mut paragraphs))
                        } else {
                            Shape::other()
                        };
                        let index = slide.add_shape(shape);
                        if shape_is_title && slide.title_index.is_none() {
                            slide.title_index = Some(index);
                        }
                        in_shape = false;
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("XML parsing error, skipping rest of slide: {}", e);
                break;
            }
            _ => {}
        }
    }

    slide
}

/// Check whether a `p:ph` placeholder element marks the slide title.
fn placeholder_is_title(e: &quick_xml::events::BytesStart) -> bool {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"type" {
            return matches!(attr.value.as_ref(), b"title" | b"ctrTitle");
        }
    }
    false
}

/// Join a table cell's paragraphs the way python-pptx renders cell text:
/// all paragraphs, newline-separated, then trimmed as a whole.
fn join_cell_paragraphs(paragraphs: &[String]) -> String {
    paragraphs.join("\n").trim().to_string()
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    // Remove common extensions first
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    // Try to find digits at the end
    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
