//! Commit-message trailers: the trailing contiguous block of `Key: Value`
//! lines, split on the first `": "`, with whitespace-led continuation lines
//! folded into the preceding value.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    pub key: String,
    pub value: String,
}

/// What a single trailer asks the changelog to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailerDirective {
    Update,
    New,
    Fix,
    Ignored,
}

pub fn classify(trailer: &Trailer) -> TrailerDirective {
    if trailer.key != "Changelog" {
        return TrailerDirective::Ignored;
    }
    match trailer.value.to_lowercase().as_str() {
        "update" => TrailerDirective::Update,
        "new" => TrailerDirective::New,
        "fix" => TrailerDirective::Fix,
        _ => TrailerDirective::Ignored,
    }
}

/// Parse the trailers of a commit body, in the order they appear.
pub fn parse_trailers(body: &str) -> Vec<Trailer> {
    let lines: Vec<&str> = body.lines().collect();
    match trailer_block(&lines) {
        Some((start, end)) => fold_trailers(&lines[start..end]),
        None => Vec::new(),
    }
}

/// Rebuild the commit body with its trailer block normalized: continuation
/// lines rejoined, empty-valued trailers dropped, free text kept verbatim.
pub fn unfold_message(body: &str) -> String {
    let lines: Vec<&str> = body.lines().collect();
    let Some((start, end)) = trailer_block(&lines) else {
        return body.to_string();
    };

    let mut out = String::new();
    for line in &lines[..start] {
        out.push_str(line);
        out.push('\n');
    }
    for trailer in fold_trailers(&lines[start..end]) {
        if trailer.value.is_empty() {
            continue;
        }
        out.push_str(&trailer.key);
        out.push_str(": ");
        out.push_str(&trailer.value);
        out.push('\n');
    }
    out
}

fn fold_trailers(block: &[&str]) -> Vec<Trailer> {
    let mut trailers: Vec<Trailer> = Vec::new();
    for &line in block {
        if is_continuation(line) {
            if let Some(last) = trailers.last_mut() {
                last.value.push(' ');
                last.value.push_str(line.trim());
            }
        } else if let Some((key, value)) = split_trailer(line) {
            trailers.push(Trailer {
                key: key.to_string(),
                value: value.trim().to_string(),
            });
        }
    }
    trailers
}

/// The block is the trailing run of non-blank trailer (or continuation)
/// lines; a blank line or a prose line above it ends the scan.
fn trailer_block(lines: &[&str]) -> Option<(usize, usize)> {
    let mut end = lines.len();
    while end > 0 && lines[end - 1].trim().is_empty() {
        end -= 1;
    }
    if end == 0 {
        return None;
    }

    let mut start = end;
    while start > 0 {
        let line = lines[start - 1];
        if line.trim().is_empty() {
            break;
        }
        if split_trailer(line).is_some() || is_continuation(line) {
            start -= 1;
        } else {
            break;
        }
    }
    // A leading continuation has no trailer to extend; it belongs to the
    // text above the block.
    while start < end && is_continuation(lines[start]) {
        start += 1;
    }
    if start == end {
        return None;
    }
    Some((start, end))
}

fn split_trailer(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(": ")?;
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }
    Some((key, value))
}

fn is_continuation(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t')
}
