use std::{fs, io};
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::content::front_matter::parse_document;
use crate::post::Document;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentFormat {
    Markdown,
    AsciiDoc,
}

pub struct ContentFile {
    pub link: String,
    pub file_path: PathBuf,
    pub format: ContentFormat,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(link: String, file_path: PathBuf) -> io::Result<ContentFile> {
        let format = match Self::guess_type(&file_path) {
            None => return Err(io::Error::new(ErrorKind::Unsupported, format!("Could not guess the type of the file {}", file_path.display()))),
            Some(format) => format,
        };

        let raw_content = fs::read_to_string(&file_path)?;

        Ok(ContentFile {
            link,
            file_path,
            format,
            raw_content,
        })
    }

    /// Splits the front-matter from the body. The body is kept verbatim, whatever the format.
    pub fn to_document(&self) -> io::Result<Document> {
        parse_document(&self.link, &self.file_path, &self.raw_content)
    }

    pub fn guess_type(file_name: &PathBuf) -> Option<ContentFormat> {
        match file_name.extension()?.to_str()? {
            "md" | "markdown" => Some(ContentFormat::Markdown),
            "adoc" | "asciidoc" => Some(ContentFormat::AsciiDoc),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_type() {
        assert_eq!(ContentFile::guess_type(&PathBuf::from("posts/mbo.md")), Some(ContentFormat::Markdown));
        assert_eq!(ContentFile::guess_type(&PathBuf::from("posts/trampolines/index.adoc")), Some(ContentFormat::AsciiDoc));
        assert_eq!(ContentFile::guess_type(&PathBuf::from("posts/image.png")), None);
        assert_eq!(ContentFile::guess_type(&PathBuf::from("posts/README")), None);
    }

    #[test]
    fn test_unsupported_file() {
        let res = ContentFile::from_file("logo".to_string(), PathBuf::from("res/posts/logo.png"));
        assert_eq!(res.err().map(|e| e.kind()), Some(ErrorKind::Unsupported));
    }

    #[test]
    fn test_from_file() -> io::Result<()> {
        let file = ContentFile::from_file("mbo".to_string(), PathBuf::from("res/posts/mbo.md"))?;
        assert_eq!(file.format, ContentFormat::Markdown);
        let doc = file.to_document()?;
        assert_eq!(doc.id, "mbo");
        assert_eq!(doc.published_at.as_deref(), Some("2015-12-22"));
        Ok(())
    }
}
