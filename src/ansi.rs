// ANSI escape handling

use regex::Regex;
use std::sync::OnceLock;

// ESC [ parameter bytes, intermediate bytes, one final byte
const CSI_PATTERN: &str = r"\x1B\[[0-?]*[ -/]*[@-~]";

fn csi() -> &'static Regex {
    static CSI: OnceLock<Regex> = OnceLock::new();
    CSI.get_or_init(|| Regex::new(CSI_PATTERN).expect("CSI pattern is a valid regex"))
}

/// Remove every complete CSI escape sequence; unterminated ones are left as-is
pub fn strip(text: &str) -> String {
    csi().replace_all(text, "").into_owned()
}
