use anyhow::Result;
use ropey::Rope;
use std::fs;
use std::path::{Path, PathBuf};

/// The open text, backed by a rope with a per-line string cache the
/// renderer and edit ops work against. Files are stored with a trailing
/// newline; the cache never carries a phantom empty last line for it.
#[derive(Debug, Clone)]
pub struct Document {
    text: Rope,
    pub lines: Vec<String>,
    pub file_path: Option<PathBuf>,
    pub modified: bool,
}

impl Document {
    pub fn new() -> Self {
        Self {
            text: Rope::from("\n"),
            lines: vec![String::new()],
            file_path: None,
            modified: false,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)?;
        if metadata.len() > 10 * 1024 * 1024 {
            return Err(anyhow::anyhow!("File too large to open (max 10MB)"));
        }

        let bytes = fs::read(path)?;
        let content = decode_text(bytes);

        if content.contains('\0') {
            return Err(anyhow::anyhow!("Cannot open binary file"));
        }

        let lines = split_lines(&content);
        let text = Rope::from(lines.join("\n") + "\n");

        Ok(Self {
            text,
            lines,
            file_path: Some(path.to_path_buf()),
            modified: false,
        })
    }

    /// Write the full buffer as UTF-8, overwriting whatever is at the
    /// path. On success the document adopts the path.
    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        fs::write(path, self.get_content())?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Suggested filename for a buffer that has never been saved.
    pub fn default_save_name() -> String {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        format!("scratch_{}.py", timestamp)
    }

    /// Rebuild the rope from the lines cache (call after modifying lines)
    pub fn sync_rope(&mut self) {
        self.text = Rope::from(self.lines.join("\n") + "\n");
    }

    pub fn get_content(&self) -> String {
        self.text.to_string()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn filename(&self) -> String {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| String::from("[scratch]"))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn split_lines(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = content
        .split('\n')
        .map(|s| s.trim_end_matches('\r').to_string())
        .collect();
    // split leaves an empty tail element for a trailing newline
    if content.ends_with('\n') && lines.len() > 1 {
        lines.pop();
    }
    lines
}

/// Decode file bytes: UTF-8 first, Latin-1 on failure. Latin-1 maps every
/// byte to the code point of equal value, so the fallback cannot fail.
fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => e.as_bytes().iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn save_then_open_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snippet.py");

        let mut doc = Document::new();
        doc.lines = vec![
            String::from("def main():"),
            String::from("    print(\"hi\")"),
        ];
        doc.sync_rope();
        doc.save_to(&path).unwrap();
        assert!(!doc.modified);

        let reopened = Document::from_file(&path).unwrap();
        assert_eq!(reopened.lines, doc.lines);
    }

    #[test]
    fn blank_lines_survive_the_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gaps.py");

        let mut doc = Document::new();
        doc.lines = vec![String::from("a"), String::new(), String::from("b")];
        doc.sync_rope();
        doc.save_to(&path).unwrap();

        let reopened = Document::from_file(&path).unwrap();
        assert_eq!(reopened.lines, doc.lines);
    }

    #[test]
    fn latin1_fallback_decodes_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.txt");
        // 0xE9 is é in Latin-1 and invalid as a standalone UTF-8 byte
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"caf\xe9\n").unwrap();
        drop(file);

        let doc = Document::from_file(&path).unwrap();
        assert_eq!(doc.lines, vec![String::from("café")]);
    }

    #[test]
    fn utf8_content_decoded_as_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unicode.py");
        fs::write(&path, "name = \"héllo\"\n").unwrap();

        let doc = Document::from_file(&path).unwrap();
        assert_eq!(doc.lines, vec![String::from("name = \"héllo\"")]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Document::from_file(&dir.path().join("absent.py")).is_err());
    }

    #[test]
    fn binary_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, b"ab\0cd").unwrap();
        assert!(Document::from_file(&path).is_err());
    }

    #[test]
    fn empty_file_becomes_one_blank_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.py");
        fs::write(&path, "").unwrap();

        let doc = Document::from_file(&path).unwrap();
        assert_eq!(doc.lines, vec![String::new()]);
    }

    #[test]
    fn default_save_name_is_a_python_file() {
        let name = Document::default_save_name();
        assert!(name.starts_with("scratch_"));
        assert!(name.ends_with(".py"));
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("target.py");
        fs::write(&path, "old contents\n").unwrap();

        let mut doc = Document::new();
        doc.lines = vec![String::from("new contents")];
        doc.sync_rope();
        doc.save_to(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new contents\n");
    }
}
