/*!
 * WebVTT track serialization.
 *
 * Renders a cue store to a WebVTT text body and parses such a body back into
 * a validated store. Both directions are pure text transformations: byte
 * persistence belongs to the file utilities, never to this module.
 */

use log::debug;

use crate::cue_store::{CueStore, RawCue};
use crate::errors::{FormatError, ValidationError};
use crate::time_codec;

/// Header token every track body must open with.
pub const HEADER_TOKEN: &str = "WEBVTT";

/// Render a cue store as a WebVTT document: header line, then one block per
/// cue in store order (id line, timing line, text lines, blank line).
///
/// Output is deterministic byte-for-byte for a given store. The id line is a
/// regular WebVTT cue identifier and is what lets [`parse`] hand back the
/// same ids it was given.
pub fn render(store: &CueStore) -> String {
    let mut out = String::new();
    out.push_str(HEADER_TOKEN);
    out.push('\n');
    out.push('\n');

    for cue in store.iter() {
        out.push_str(&cue.id.to_string());
        out.push('\n');
        // Store times are millisecond-exact by construction, so scaling back
        // to whole milliseconds is lossless here.
        out.push_str(&time_codec::format_ms((cue.start * 1000.0).round() as u64));
        out.push_str(" --> ");
        out.push_str(&time_codec::format_ms((cue.end * 1000.0).round() as u64));
        out.push('\n');
        out.push_str(&cue.text);
        out.push('\n');
        out.push('\n');
    }

    out
}

/// Parse a WebVTT document back into a cue store.
///
/// Requires the `WEBVTT` header (a leading BOM is tolerated). Between blocks
/// any number of blank lines is fine; cue identifier lines are optional
/// (numeric ones carry the cue id, non-numeric ones are ignored); cue
/// settings after the end timestamp are ignored; `NOTE`, `STYLE` and
/// `REGION` blocks are skipped as non-cue content. Everything else that is
/// structurally off fails with a [`FormatError`] naming the 1-based cue
/// block, never by silently dropping the block.
pub fn parse(text: &str) -> Result<CueStore, FormatError> {
    let body = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = body.lines();

    match lines.next() {
        Some(first) if is_header_line(first) => {}
        _ => return Err(FormatError::MissingHeader),
    }

    let mut raw_cues: Vec<RawCue> = Vec::new();
    let mut block: Vec<&str> = Vec::new();
    let mut cue_blocks = 0usize;

    for line in lines {
        if line.trim().is_empty() {
            flush_block(&block, &mut cue_blocks, &mut raw_cues)?;
            block.clear();
        } else {
            block.push(line);
        }
    }
    flush_block(&block, &mut cue_blocks, &mut raw_cues)?;

    debug!("Parsed {} cue block(s) from track text", raw_cues.len());

    // Records are pushed in block order, so a residual validation failure
    // maps straight back to its 1-based block index.
    CueStore::build(raw_cues).map_err(validation_to_format)
}

fn is_header_line(line: &str) -> bool {
    let trimmed = line.trim_end();
    trimmed == HEADER_TOKEN
        || trimmed.starts_with("WEBVTT ")
        || trimmed.starts_with("WEBVTT\t")
}

fn is_comment_block(first_line: &str) -> bool {
    let trimmed = first_line.trim();
    trimmed == "NOTE"
        || trimmed.starts_with("NOTE ")
        || trimmed.starts_with("NOTE\t")
        || trimmed == "STYLE"
        || trimmed == "REGION"
}

fn flush_block(
    block: &[&str],
    cue_blocks: &mut usize,
    raw_cues: &mut Vec<RawCue>,
) -> Result<(), FormatError> {
    if block.is_empty() {
        return Ok(());
    }
    if is_comment_block(block[0]) {
        return Ok(());
    }

    *cue_blocks += 1;
    raw_cues.push(parse_cue_block(block, *cue_blocks)?);
    Ok(())
}

fn parse_cue_block(block: &[&str], index: usize) -> Result<RawCue, FormatError> {
    // An identifier line is anything before a line carrying the arrow.
    let (id, timing_line, text_lines) = if block[0].contains("-->") {
        (None, block[0], &block[1..])
    } else if block.len() >= 2 && block[1].contains("-->") {
        (block[0].trim().parse::<u32>().ok(), block[1], &block[2..])
    } else {
        return Err(FormatError::MalformedBlock {
            block: index,
            reason: "missing timing line".to_string(),
        });
    };

    let (start, end) = parse_timing_line(timing_line, index)?;
    if start >= end {
        return Err(FormatError::MalformedBlock {
            block: index,
            reason: format!("start {}s is not earlier than end {}s", start, end),
        });
    }

    let text = text_lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n");
    if text.trim().is_empty() {
        return Err(FormatError::MalformedBlock {
            block: index,
            reason: "cue has no text".to_string(),
        });
    }

    Ok(RawCue { id, start, end, text })
}

fn parse_timing_line(line: &str, index: usize) -> Result<(f64, f64), FormatError> {
    let (left, right) = line
        .split_once("-->")
        .ok_or_else(|| FormatError::MalformedBlock {
            block: index,
            reason: "missing timing line".to_string(),
        })?;

    let start = time_codec::decode(left.trim()).map_err(|err| FormatError::MalformedBlock {
        block: index,
        reason: err.to_string(),
    })?;

    // Cue settings may trail the end timestamp; only the first token counts.
    let end_token = right
        .split_whitespace()
        .next()
        .ok_or_else(|| FormatError::MalformedBlock {
            block: index,
            reason: "missing end timestamp".to_string(),
        })?;
    let end = time_codec::decode(end_token).map_err(|err| FormatError::MalformedBlock {
        block: index,
        reason: err.to_string(),
    })?;

    Ok((start, end))
}

fn validation_to_format(err: ValidationError) -> FormatError {
    let (index, reason) = match err {
        ValidationError::InvalidInterval { index, start, end } => (
            index,
            format!("start {}s is not earlier than end {}s", start, end),
        ),
        ValidationError::InvalidTime { index, .. } => {
            (index, "timestamp out of range".to_string())
        }
        ValidationError::EmptyText { index } => (index, "cue has no text".to_string()),
        ValidationError::ReservedSeparator { index } => {
            (index, "unexpected timing separator inside cue text".to_string())
        }
        ValidationError::NonPositiveId { index } => {
            (index, "cue id must be a positive integer".to_string())
        }
        ValidationError::DuplicateId { index, id } => (index, format!("duplicate cue id {}", id)),
    };

    FormatError::MalformedBlock {
        block: index + 1,
        reason,
    }
}
