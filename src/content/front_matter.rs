use std::io;
use std::io::ErrorKind;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::post::Document;

/// Header values found before the body.
#[derive(Debug, Default, PartialEq)]
struct HeaderFields {
    id: Option<String>,
    title: Option<String>,
    date: Option<String>,
    tags: Option<String>,
    hero_image: Option<String>,
}

impl HeaderFields {
    fn is_empty(&self) -> bool {
        *self == HeaderFields::default()
    }
}

/// Example of a document
/// ```text
/// <!--
/// [ID]: # (trampolines)
/// [DATE]: # (2016-07-15)
/// [TAGS]: # (scala, recursion, fp)
/// [HERO_IMAGE]: # (https://example.com/trampoline.jpg)
/// -->
///
/// # Trampolines in Scala
/// ```
///
/// Only the header is interpreted. Without a `TITLE` key the first `# ` line is
/// taken as the title. Everything after that is the body, untouched.
pub fn parse_document(link: &str, file_name: &Path, raw: &str) -> io::Result<Document> {
    let mut cursor = LineCursor::new(raw);
    let header = parse_header(file_name, &mut cursor)?;

    let title = match header.title {
        Some(title) => title,
        None => parse_title(&mut cursor),
    };

    Ok(Document {
        id: header.id.unwrap_or_else(|| link.to_string()),
        title,
        published_at: header.date,
        tags: header.tags.unwrap_or_default(),
        hero_image: header.hero_image,
        body: cursor.rest().to_string(),
    })
}

/// Walks `raw` line by line, remembering the byte offset of the current line
/// so the remainder can be taken verbatim.
struct LineCursor<'a> {
    raw: &'a str,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new(raw: &'a str) -> Self {
        LineCursor { raw, pos: 0 }
    }

    /// Current line without its `\n` or `\r\n` terminator.
    fn line(&self) -> Option<&'a str> {
        let rest = self.rest();
        if rest.is_empty() {
            return None;
        }
        let line = match rest.find('\n') {
            Some(end) => &rest[..end],
            None => rest,
        };
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    fn advance(&mut self) {
        self.pos = match self.rest().find('\n') {
            Some(end) => self.pos + end + 1,
            None => self.raw.len(),
        };
    }

    fn rest(&self) -> &'a str {
        &self.raw[self.pos..]
    }
}

fn parse_header(file_name: &Path, cursor: &mut LineCursor) -> io::Result<HeaderFields> {
    let mut header = HeaderFields::default();

    // Skip optional HTML comment in the beginning
    let mut start_with_comment = false;

    while let Some(line) = cursor.line() {
        let line = line.trim();

        // Empty lines are ok
        if line.is_empty() {
            cursor.advance();
            continue;
        }

        if line == "<!--" {
            cursor.advance();
            start_with_comment = true;
        }
        break;
    }

    let mut comment_closed = false;
    while let Some(line) = cursor.line() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            cursor.advance();
            continue;
        }

        if start_with_comment && trimmed == "-->" {
            cursor.advance();
            comment_closed = true;
            break;
        }

        match extract_header(line) {
            Some((key, val)) => {
                let val = Some(val.trim().to_string());
                match key.to_uppercase().as_str() {
                    "ID" => header.id = val,
                    "TITLE" => header.title = val,
                    "DATE" | "PUBLISHED_AT" => header.date = val,
                    "TAGS" => header.tags = val,
                    "HERO_IMAGE" | "IMAGE" => header.hero_image = val,
                    _ => {}
                }
            }
            // Inside the comment anything goes until `-->`
            None if start_with_comment => {}
            None => break,
        }
        cursor.advance();
    }

    if start_with_comment && !comment_closed {
        return Err(io::Error::new(
            ErrorKind::InvalidData,
            format!("End of comment in the header is missing - file={}", file_name.display())),
        );
    }

    if header.is_empty() {
        return Err(io::Error::new(
            ErrorKind::InvalidData,
            format!("Missing front-matter header - file={}", file_name.display())),
        );
    }

    Ok(header)
}

/// Takes a `# ` line as the title. Without one the cursor is left where it was.
fn parse_title(cursor: &mut LineCursor) -> String {
    let start = cursor.pos;

    // Blank lines between the header and the title don't belong to the body
    while let Some(line) = cursor.line() {
        if !line.trim().is_empty() {
            break;
        }
        cursor.advance();
    }

    match cursor.line() {
        Some(line) if line.starts_with("# ") => {
            let title = line[2..].trim().to_string();
            cursor.advance();
            title
        }
        _ => {
            cursor.pos = start;
            "".to_string()
        }
    }
}

fn extract_header(line: &str) -> Option<(&str, &str)> {
    lazy_static! {
        static ref HEADER_REGEX: Regex = Regex::new(r"^\s*\[(?P<key>\w+)\]: # \((?P<value>.*)\)\s*$").unwrap();
    }

    HEADER_REGEX.captures(line).and_then(|cap| {
        let key = cap.name("key").map(|key| key.as_str());
        let val = cap.name("value").map(|val| val.as_str());
        match (key, val) {
            (Some(key), Some(val)) => Some((key, val)),
            _ => None
        }
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::test_data::{MBO_DATA, TRAMPOLINES_DATA};

    use super::*;

    #[test]
    fn test_extract_header() {
        let res = extract_header("[ID]: # (a63bd715-a3fe-4788-b0e1-2a3153778544)");
        assert_eq!(res, Some(("ID", "a63bd715-a3fe-4788-b0e1-2a3153778544")));
        let res = extract_header("[DATE]: # (2022-04-02 12:05:00.000)");
        assert_eq!(res, Some(("DATE", "2022-04-02 12:05:00.000")));
        let res = extract_header("[TAGS]: # (rust something-else)");
        assert_eq!(res, Some(("TAGS", "rust something-else")));

        let res = extract_header("[AUTHOR]: (thiago)");
        assert!(res.is_none());
        let res = extract_header("Some text [ID]: # (x)");
        assert!(res.is_none());
    }

    #[test]
    fn test_parse_commented_header() {
        let file_name = PathBuf::from("posts/trampolines/index.md");
        let doc = parse_document("trampolines-dir", &file_name, TRAMPOLINES_DATA).unwrap();

        assert_eq!(doc.id, "trampolines");
        assert_eq!(doc.title, "Trampolines in Scala");
        assert_eq!(doc.published_at.as_deref(), Some("2016-07-15"));
        assert_eq!(doc.tags, "scala, recursion, fp");
        assert_eq!(doc.hero_image.as_deref(), Some("https://example.com/images/trampoline.jpg"));
        assert!(doc.body.starts_with("Recursion is the natural way"));
        assert!(doc.body.contains("<!-- more -->"));
        assert!(doc.body.ends_with("tailcall(odd(n - 1))\n```\n"));
    }

    #[test]
    fn test_parse_plain_header() {
        let file_name = PathBuf::from("posts/mbo.md");
        let doc = parse_document("mbo", &file_name, MBO_DATA).unwrap();

        // No ID in the header, the link is used
        assert_eq!(doc.id, "mbo");
        assert_eq!(doc.title, "We are joining forces");
        assert_eq!(doc.published_at.as_deref(), Some("2015-12-22 09:30:00.000"));
        assert_eq!(doc.tags, "company");
        assert_eq!(doc.hero_image, None);
        assert_eq!(doc.body, "Today we announce that the team is joining a bigger company.\n");
    }

    #[test]
    fn test_missing_title() {
        let file_name = PathBuf::from("posts/note.md");
        let content = "[DATE]: # (2020-01-01)\n\nJust a note\n";
        let doc = parse_document("note", &file_name, content).unwrap();
        assert_eq!(doc.title, "");
        assert_eq!(doc.body, "Just a note\n");
    }

    #[test]
    fn test_unterminated_comment() {
        let file_name = PathBuf::from("posts/broken.md");
        let content = "<!--\n[ID]: # (broken)\n[DATE]: # (2020-01-01)\n\n# Title\n";
        let err = parse_document("broken", &file_name, content).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert_eq!(err.to_string(), "End of comment in the header is missing - file=posts/broken.md");
    }

    #[test]
    fn test_no_header() {
        let file_name = PathBuf::from("posts/plain.md");
        let err = parse_document("plain", &file_name, "# Just a title\n\nText\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_header_without_date_still_parses() {
        // Rejecting it is up to the store
        let file_name = PathBuf::from("posts/draft.md");
        let doc = parse_document("draft", &file_name, "[TAGS]: # (draft)\n# Draft\n").unwrap();
        assert_eq!(doc.published_at, None);
        assert_eq!(doc.title, "Draft");
        assert_eq!(doc.body, "");
    }

    #[test]
    fn test_body_is_kept_verbatim() {
        let file_name = PathBuf::from("posts/windows.md");
        let content = "[DATE]: # (2020-01-01)\r\n\r\nLine one\r\nLine two";
        let doc = parse_document("windows", &file_name, content).unwrap();
        assert_eq!(doc.published_at.as_deref(), Some("2020-01-01"));
        assert_eq!(doc.body, "Line one\r\nLine two");

        let content = "[DATE]: # (2020-01-01)\r\n# Title\r\n\r\n\r\nText";
        let doc = parse_document("windows", &file_name, content).unwrap();
        assert_eq!(doc.title, "Title");
        assert_eq!(doc.body, "\r\n\r\nText");
    }

    #[test]
    fn test_stray_line_inside_comment() {
        let file_name = PathBuf::from("posts/stray.md");
        let content = "<!--\n[ID]: # (stray)\nnot a header line\n[DATE]: # (2020-01-01)\n[TAGS]: # (misc)\n-->\n# Stray\nBody\n";
        let doc = parse_document("stray", &file_name, content).unwrap();
        assert_eq!(doc.id, "stray");
        assert_eq!(doc.published_at.as_deref(), Some("2020-01-01"));
        assert_eq!(doc.tags, "misc");
        assert_eq!(doc.title, "Stray");
        assert_eq!(doc.body, "Body\n");
    }
}
