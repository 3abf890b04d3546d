//! PDF text extraction.
//!
//! The uploaded buffer is written to a scratch file because the extraction
//! library takes a path. `NamedTempFile` removes the file on drop, so the
//! success and error paths both clean up.

use std::io::Write;

use tracing::debug;

use crate::pipeline::PipelineError;

/// Extracts the concatenated page text of a PDF byte buffer.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, PipelineError> {
    let mut scratch = tempfile::Builder::new()
        .prefix("screenpilot-resume-")
        .suffix(".pdf")
        .tempfile()
        .map_err(|e| PipelineError::Extraction(format!("scratch file: {e}")))?;

    scratch
        .write_all(bytes)
        .and_then(|_| scratch.flush())
        .map_err(|e| PipelineError::Extraction(format!("scratch file write: {e}")))?;

    let text = pdf_extract::extract_text(scratch.path())
        .map_err(|e| PipelineError::Extraction(e.to_string()))?;

    debug!(chars = text.len(), "extracted resume text");
    Ok(text)
}

#[cfg(test)]
pub(crate) mod pdf_fixture {
    //! Hand-assembled single-page PDF with a correct xref table, so extraction
    //! tests run against real parser input instead of canned strings.

    pub fn minimal_pdf(text: &str) -> Vec<u8> {
        let stream = format!("BT /F1 24 Tf 72 720 Td ({text}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
                .to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                stream.len(),
                stream
            ),
        ];

        let mut pdf = String::from("%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
        }

        let xref_offset = pdf.len();
        pdf.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
        pdf.push_str("0000000000 65535 f \n");
        for offset in offsets {
            pdf.push_str(&format!("{offset:010} 00000 n \n"));
        }
        pdf.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF",
            objects.len() + 1,
            xref_offset
        ));

        pdf.into_bytes()
    }
}
