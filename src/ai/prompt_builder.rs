/// Separator placed between partial summaries in the reduction prompt.
pub const PARTIAL_SEPARATOR: &str = "\n---\n";

const CHUNK_INSTRUCTIONS: &str = "The following is a conversation log from a Slack channel.\n\
Summarize the key points, decisions made, and next actions concisely, using this format:\n\n\
# Output format\n\
- Key points:\n\
- Decisions:\n\
- Next actions:\n\n\
# Conversation log:\n";

const REDUCTION_INSTRUCTIONS: &str = "The following are summaries of consecutive parts of one Slack conversation.\n\
Combine them into a single summary of the key points, decisions, and next actions, \
using the same format (Key points / Decisions / Next actions).\n\n";

/// Drop control characters from transcript text before it is embedded in a prompt.
/// Newlines and tabs carry message structure and are kept.
#[must_use]
pub fn sanitize_transcript(raw: &str) -> String {
    raw.chars()
        .filter(|&c| c == '\n' || c == '\t' || !c.is_control())
        .collect()
}

/// Prompt for one chunk of the transcript.
#[must_use]
pub fn chunk_prompt(chunk: &str) -> String {
    format!("{CHUNK_INSTRUCTIONS}{}\n", sanitize_transcript(chunk))
}

/// Prompt that merges per-chunk summaries, in chunk order, into one.
#[must_use]
pub fn reduction_prompt<S: AsRef<str>>(partials: &[S]) -> String {
    let joined = partials
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(PARTIAL_SEPARATOR);
    format!("{REDUCTION_INSTRUCTIONS}{joined}\n")
}
