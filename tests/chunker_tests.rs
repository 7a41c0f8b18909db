use channel_summary::summarize::chunker::{clip, split};

#[test]
fn test_split_round_trips_various_inputs() {
    let inputs = [
        "a",
        "short line",
        "line one\nline two\nline three",
        "日本語のテキストと English mixed 🎉 emoji",
        "exactly-16-chars",
    ];

    for input in inputs {
        for size in [1, 2, 3, 7, 16, 800] {
            let chunks = split(input, size);
            assert_eq!(chunks.concat(), input, "round trip failed for size {size}");
            assert!(chunks.iter().all(|c| c.chars().count() <= size));
            assert!(chunks.iter().all(|c| !c.is_empty()));
        }
    }
}

#[test]
fn test_split_chunk_count_is_ceiling() {
    let text = "x".repeat(2000);
    assert_eq!(split(&text, 800).len(), 3);
    assert_eq!(split(&text, 1000).len(), 2);
    assert_eq!(split(&text, 2000).len(), 1);
    assert_eq!(split(&text, 1).len(), 2000);
}

#[test]
fn test_split_empty_text_yields_no_chunks() {
    assert!(split("", 800).is_empty());
}

#[test]
fn test_split_zero_chunk_size_treated_as_one() {
    assert_eq!(split("abc", 0), vec!["a", "b", "c"]);
}

#[test]
fn test_split_is_restartable() {
    let text = "the same input twice";
    assert_eq!(split(text, 4), split(text, 4));
}

#[test]
fn test_clip_bounds_length() {
    let text = "0123456789".repeat(250);
    let clipped = clip(&text, 2000);
    assert_eq!(clipped.chars().count(), 2000);
    assert!(text.starts_with(clipped));
}

#[test]
fn test_clip_is_noop_when_text_fits() {
    let text = "fits comfortably";
    assert_eq!(clip(text, 2000), text);
    assert_eq!(clip(text, text.chars().count()), text);
}

#[test]
fn test_clip_counts_characters_not_bytes() {
    let text = "あ".repeat(10);
    let clipped = clip(&text, 4);
    assert_eq!(clipped, "ああああ");
    assert_eq!(clipped.chars().count(), 4);
}
