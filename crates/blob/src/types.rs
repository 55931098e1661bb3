use serde::{Deserialize, Serialize};

/// Opaque reference (URL) to a stored attachment.
///
/// Produced once per upload and never mutated. The blob it points to
/// outlives the dispatch that created it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentLocator(String);

impl AttachmentLocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for AttachmentLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content type and optional content encoding guessed from a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentType {
    /// MIME type (e.g. `"application/pdf"`).
    pub mime: &'static str,
    /// Compression encoding implied by the extension (e.g. `"gzip"`).
    pub encoding: Option<&'static str>,
}

const ENCODINGS: &[(&str, &str)] = &[
    (".gz", "gzip"),
    (".bz2", "bzip2"),
    (".xz", "xz"),
    (".br", "br"),
];

const FALLBACK_MIME: &str = "application/octet-stream";

/// Guess the content type of a file from its name.
///
/// A compression suffix is peeled off first and reported as the encoding,
/// so `report.csv.gz` is `text/csv` with `gzip` encoding. Unknown types fall
/// back to `application/octet-stream`.
pub fn guess_content_type(filename: &str) -> ContentType {
    let lower = filename.to_ascii_lowercase();
    let (stem, encoding) = ENCODINGS
        .iter()
        .find_map(|(suffix, encoding)| {
            lower
                .strip_suffix(suffix)
                .map(|stem| (stem.to_owned(), Some(*encoding)))
        })
        .unwrap_or((lower, None));

    let mime = mime_guess::from_path(&stem)
        .first_raw()
        .unwrap_or(FALLBACK_MIME);

    ContentType { mime, encoding }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_serializes_as_plain_string() {
        let loc = AttachmentLocator::new("https://example.com/a.pdf");
        assert_eq!(
            serde_json::to_value(&loc).unwrap(),
            serde_json::json!("https://example.com/a.pdf")
        );
        assert_eq!(loc.to_string(), "https://example.com/a.pdf");
    }

    #[test]
    fn guesses_plain_types() {
        assert_eq!(guess_content_type("report.pdf").mime, "application/pdf");
        assert_eq!(guess_content_type("photo.PNG").mime, "image/png");
        assert!(guess_content_type("report.pdf").encoding.is_none());
    }

    #[test]
    fn peels_compression_suffix() {
        let ct = guess_content_type("data.csv.gz");
        assert_eq!(ct.mime, "text/csv");
        assert_eq!(ct.encoding, Some("gzip"));
    }

    #[test]
    fn unknown_extension_falls_back() {
        let ct = guess_content_type("blob.herald-unknown");
        assert_eq!(ct.mime, "application/octet-stream");
        assert!(ct.encoding.is_none());
    }
}
