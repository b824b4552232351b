/// Whether a yank was line-wise or character-wise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YankType {
    Line,
    Char,
}

/// Single source of truth for clipboard state. Owns the system clipboard
/// handle, internal yank buffer, and yank type.
pub struct Clipboard {
    system: Option<arboard::Clipboard>,
    yank_buffer: String,
    yank_type: YankType,
}

impl Clipboard {
    pub fn new() -> Self {
        Self {
            system: arboard::Clipboard::new().ok(),
            yank_buffer: String::new(),
            yank_type: YankType::Char,
        }
    }

    /// Copy text into the clipboard with an explicit yank type.
    /// Always syncs to the system clipboard.
    pub fn copy(&mut self, text: &str, yank_type: YankType) {
        self.yank_buffer = text.to_string();
        self.yank_type = yank_type;

        // CLI tools (wl-copy/xclip) persist clipboard contents beyond the
        // process lifetime, which arboard alone does not on Linux
        if !Self::copy_with_cli(text) {
            if let Some(ref mut cb) = self.system {
                let _ = cb.set_text(text.to_string());
            }
        }
    }

    /// Copy using CLI tools (wl-copy / xclip). Returns true if successful.
    fn copy_with_cli(text: &str) -> bool {
        use std::io::Write;
        use std::process::{Command, Stdio};

        let commands: &[&[&str]] = &[&["wl-copy"], &["xclip", "-selection", "clipboard"]];

        for cmd in commands {
            if let Ok(mut child) = Command::new(cmd[0])
                .args(&cmd[1..])
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            {
                if let Some(ref mut stdin) = child.stdin {
                    let _ = stdin.write_all(text.as_bytes());
                }
                if let Ok(status) = child.wait() {
                    if status.success() {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Paste from clipboard. External copies (system content differing
    /// from the last yank) come back character-wise.
    pub fn paste(&mut self) -> Option<(String, YankType)> {
        let system_text = self.system.as_mut().and_then(|cb| cb.get_text().ok());

        match system_text {
            Some(text) if !text.is_empty() => {
                let yank_type = if text == self.yank_buffer {
                    self.yank_type
                } else {
                    YankType::Char
                };
                Some((text, yank_type))
            }
            _ if !self.yank_buffer.is_empty() => {
                Some((self.yank_buffer.clone(), self.yank_type))
            }
            _ => None,
        }
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}
