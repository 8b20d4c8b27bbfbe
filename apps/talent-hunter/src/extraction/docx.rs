use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use crate::extraction::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extracts the body paragraphs of a .docx in document order, skipping blank
/// ones, joined with `\n`. Paragraphs inside tables are not part of the body
/// paragraph sequence and are left out.
pub fn extract_docx_text(path: &Path) -> Result<String, ExtractionError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Docx(format!("{DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)?;

    let paragraphs = body_paragraphs(&xml)?;
    debug!(path = %path.display(), paragraphs = paragraphs.len(), "DOCX text extracted");
    Ok(paragraphs.join("\n"))
}

/// Walks WordprocessingML and collects the text of each top-level `w:p`.
fn body_paragraphs(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut table_depth = 0usize;
    let mut in_paragraph = false;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:p" if !in_paragraph => {
                    in_paragraph = true;
                    current.clear();
                }
                b"w:r" => in_run = true,
                b"w:t" => in_text = true,
                _ => {}
            },
            // tab stops in w:pPr are also empty w:tab elements; only run content counts
            Ok(Event::Empty(e)) if in_paragraph && in_run => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractionError::Docx(e.to_string()))?;
                current.push_str(&text);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:r" => in_run = false,
                b"w:t" => in_text = false,
                b"w:p" if in_paragraph => {
                    in_paragraph = false;
                    if table_depth == 0 && !current.trim().is_empty() {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::Docx(format!(
                    "malformed {DOCUMENT_PART} at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{docx_body, write_docx};

    fn para(text: &str) -> String {
        format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
    }

    #[test]
    fn test_paragraphs_in_document_order() {
        let xml = docx_body(&[&para("Carla Souza"), &para("Analista de Dados"), &para("SQL")]);
        assert_eq!(
            body_paragraphs(&xml).unwrap(),
            vec!["Carla Souza", "Analista de Dados", "SQL"]
        );
    }

    #[test]
    fn test_blank_paragraphs_are_skipped() {
        let xml = docx_body(&[&para("Topo"), "<w:p/>", &para("   "), &para("Fim")]);
        assert_eq!(body_paragraphs(&xml).unwrap(), vec!["Topo", "Fim"]);
    }

    #[test]
    fn test_runs_are_concatenated_within_a_paragraph() {
        let xml = docx_body(&[
            "<w:p><w:r><w:t>Engenheiro </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>Sênior</w:t></w:r></w:p>",
        ]);
        assert_eq!(body_paragraphs(&xml).unwrap(), vec!["Engenheiro Sênior"]);
    }

    #[test]
    fn test_tabs_breaks_and_entities() {
        let xml = docx_body(&[
            "<w:p><w:r><w:t>Python</w:t><w:tab/><w:t>R &amp; SQL</w:t><w:br/><w:t>Spark</w:t></w:r></w:p>",
        ]);
        assert_eq!(body_paragraphs(&xml).unwrap(), vec!["Python\tR & SQL\nSpark"]);
    }

    #[test]
    fn test_tab_stop_definitions_add_no_text() {
        let xml = docx_body(&[concat!(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="right" w:pos="9000"/></w:tabs></w:pPr>"#,
            "<w:r><w:t>Carla Souza</w:t></w:r></w:p>"
        )]);
        assert_eq!(body_paragraphs(&xml).unwrap(), vec!["Carla Souza"]);
    }

    #[test]
    fn test_table_paragraphs_are_left_out() {
        let table = format!("<w:tbl><w:tr><w:tc>{}</w:tc></w:tr></w:tbl>", para("Célula"));
        let xml = docx_body(&[&para("Antes"), &table, &para("Depois")]);
        assert_eq!(body_paragraphs(&xml).unwrap(), vec!["Antes", "Depois"]);
    }

    #[test]
    fn test_extract_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carla.docx");
        write_docx(&path, &docx_body(&[&para("Carla Souza"), &para("Python")]));
        assert_eq!(extract_docx_text(&path).unwrap(), "Carla Souza\nPython");
    }

    #[test]
    fn test_zip_without_document_part_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.docx");
        {
            let file = File::create(&path).unwrap();
            let mut archive = zip::ZipWriter::new(file);
            archive
                .start_file("docProps/app.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            archive.finish().unwrap();
        }
        assert!(matches!(
            extract_docx_text(&path),
            Err(ExtractionError::Docx(_))
        ));
    }

    #[test]
    fn test_plain_text_renamed_to_docx_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.docx");
        std::fs::write(&path, "not a zip archive").unwrap();
        assert!(extract_docx_text(&path).is_err());
    }
}
