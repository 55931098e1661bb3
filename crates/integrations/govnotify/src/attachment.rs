/// Decides whether an attachment is sent inline through Notify's document
/// upload or offloaded to the attachment store and linked.
///
/// # Examples
///
/// ```
/// use herald_govnotify::AttachmentPolicy;
///
/// let policy = AttachmentPolicy::default();
/// assert!(policy.should_inline(Some("letter.pdf"), 1_999_999));
/// assert!(!policy.should_inline(Some("letter.pdf"), 2_000_000));
/// assert!(!policy.should_inline(Some("photo.png"), 10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPolicy {
    /// Filename suffix eligible for inlining.
    pub inline_extension: String,
    /// Decoded size, in bytes, at or above which attachments are offloaded.
    pub inline_limit: usize,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            inline_extension: ".pdf".to_owned(),
            inline_limit: 2_000_000,
        }
    }
}

impl AttachmentPolicy {
    #[must_use]
    pub fn with_inline_limit(mut self, limit: usize) -> Self {
        self.inline_limit = limit;
        self
    }

    #[must_use]
    pub fn with_inline_extension(mut self, extension: impl Into<String>) -> Self {
        self.inline_extension = extension.into();
        self
    }

    pub fn should_inline(&self, filename: Option<&str>, decoded_len: usize) -> bool {
        filename.is_some_and(|name| name.ends_with(&self.inline_extension))
            && decoded_len < self.inline_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_attachment_is_never_inlined() {
        assert!(!AttachmentPolicy::default().should_inline(None, 1));
    }

    #[test]
    fn extension_match_is_exact() {
        let policy = AttachmentPolicy::default();
        assert!(!policy.should_inline(Some("scan.PDF"), 1));
        assert!(!policy.should_inline(Some("pdf"), 1));
    }

    #[test]
    fn custom_policy() {
        let policy = AttachmentPolicy::default()
            .with_inline_extension(".csv")
            .with_inline_limit(10);
        assert!(policy.should_inline(Some("data.csv"), 9));
        assert!(!policy.should_inline(Some("data.csv"), 10));
        assert!(!policy.should_inline(Some("data.pdf"), 1));
    }
}
