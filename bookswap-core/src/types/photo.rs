//! Photo files as selected by the user and as sent to the backend

/// A binary image with the name and media type it is declared under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFile {
    /// Filename, e.g. "cover.heic"
    pub file_name: String,

    /// Declared media type; may be empty when the source did not provide one
    pub content_type: String,

    /// Raw file contents, sent as the multipart `photo` part
    pub bytes: Vec<u8>,
}

impl PhotoFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Build a file whose media type is guessed from its name
    pub fn from_name(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// The filename extension, lowercased, without the dot
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_guesses_type() {
        let file = PhotoFile::from_name("cover.png", vec![1, 2, 3]);
        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.extension().as_deref(), Some("png"));
    }

    #[test]
    fn test_unknown_extension_falls_back() {
        let file = PhotoFile::from_name("cover", vec![1]);
        assert_eq!(file.content_type, "application/octet-stream");
        assert_eq!(file.extension(), None);
    }
}
