const SEPARATOR: &str = "━━━━━━━━━━━━━━━";

/// Wrap a summary in the channel header and separators.
#[must_use]
pub fn format_for_channel(summary: &str) -> String {
    format!("📢 *Channel summary*\n{SEPARATOR}\n{}\n{SEPARATOR}", summary.trim())
}
