//! Lyrics → verses normalization

use songbook_common::Verse;

/// Split raw lyrics into ordered, non-empty verses
///
/// Verses are separated by two or more consecutive line breaks (`\n` or
/// `\r\n`); a longer run is still one separator. Each segment is trimmed
/// and otherwise left as written. Segments that end up empty are dropped
/// and the survivors are numbered from 0 in input order.
pub fn text_to_verses(text: &str) -> Vec<Verse> {
    split_on_blank_lines(text)
        .into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(index, segment)| Verse::new(index as i64, segment))
        .collect()
}

/// Segments of `text` between runs of at least two line breaks
fn split_on_blank_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        let (breaks, run_end) = line_break_run(bytes, pos);
        if breaks >= 2 {
            // Run boundaries are ASCII, so both slices stay on char boundaries
            segments.push(&text[start..pos]);
            start = run_end;
            pos = run_end;
        } else if breaks == 1 {
            pos = run_end;
        } else {
            pos += 1;
        }
    }
    segments.push(&text[start..]);

    segments
}

/// Number of consecutive line breaks starting at `pos`, and the index just past them
fn line_break_run(bytes: &[u8], pos: usize) -> (usize, usize) {
    let mut breaks = 0;
    let mut end = pos;

    loop {
        match (bytes.get(end), bytes.get(end + 1)) {
            (Some(b'\n'), _) => end += 1,
            (Some(b'\r'), Some(b'\n')) => end += 2,
            _ => return (breaks, end),
        }
        breaks += 1;
    }
}
