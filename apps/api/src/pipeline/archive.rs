//! In-memory zip packaging of screening results.

use std::io::{Cursor, Write};

use zip::{write::FileOptions, CompressionMethod, ZipWriter};

use crate::pipeline::PipelineError;

/// Builds the downloadable results archive. One applicant contributes two
/// entries under `{group}/{name}/`: the original PDF and the raw model
/// response text. Write failures abort the whole run, not just one resume.
pub struct ArchiveBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    pub fn add_applicant(
        &mut self,
        group: &str,
        applicant_name: &str,
        pdf_bytes: &[u8],
        response_text: &str,
    ) -> Result<(), PipelineError> {
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        self.zip.start_file(
            format!("{group}/{applicant_name}/{applicant_name}.pdf"),
            options,
        )?;
        self.zip.write_all(pdf_bytes)?;

        self.zip.start_file(
            format!("{group}/{applicant_name}/{applicant_name}_response.txt"),
            options,
        )?;
        self.zip.write_all(response_text.as_bytes())?;

        Ok(())
    }

    pub fn finish(mut self) -> Result<Vec<u8>, PipelineError> {
        Ok(self.zip.finish()?.into_inner())
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn entry_names(bytes: &[u8]) -> Vec<String> {
        let archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        archive.file_names().map(str::to_string).collect()
    }

    fn read_entry(bytes: &[u8], name: &str) -> Vec<u8> {
        let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        content
    }

    #[test]
    fn one_applicant_produces_exactly_two_entries() {
        let mut builder = ArchiveBuilder::new();
        builder
            .add_applicant("best", "alice", b"%PDF-1.4 fake", "0.9\nGreat fit.")
            .unwrap();
        let bytes = builder.finish().unwrap();

        let mut names = entry_names(&bytes);
        names.sort();
        assert_eq!(
            names,
            vec!["best/alice/alice.pdf", "best/alice/alice_response.txt"]
        );
    }

    #[test]
    fn pdf_entry_round_trips_byte_for_byte() {
        let original: Vec<u8> = (0u8..=255).cycle().take(4096).collect();
        let mut builder = ArchiveBuilder::new();
        builder
            .add_applicant("good", "bob", &original, "0.7\nDecent.")
            .unwrap();
        let bytes = builder.finish().unwrap();

        assert_eq!(read_entry(&bytes, "good/bob/bob.pdf"), original);
    }

    #[test]
    fn response_entry_stores_the_raw_text() {
        let mut builder = ArchiveBuilder::new();
        builder
            .add_applicant("rest", "carol", b"pdf", "0.2\nLittle overlap with the role.")
            .unwrap();
        let bytes = builder.finish().unwrap();

        let content = read_entry(&bytes, "rest/carol/carol_response.txt");
        assert_eq!(content, b"0.2\nLittle overlap with the role.");
    }

    #[test]
    fn applicants_in_different_groups_do_not_collide() {
        let mut builder = ArchiveBuilder::new();
        builder.add_applicant("best", "dana", b"a", "0.9\nx").unwrap();
        builder.add_applicant("rest", "dana", b"b", "0.1\ny").unwrap();
        let bytes = builder.finish().unwrap();

        assert_eq!(entry_names(&bytes).len(), 4);
        assert_eq!(read_entry(&bytes, "best/dana/dana.pdf"), b"a");
        assert_eq!(read_entry(&bytes, "rest/dana/dana.pdf"), b"b");
    }
}
