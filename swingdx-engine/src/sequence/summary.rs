//! Templated sequence summaries

use super::{ErrorTiming, SequenceError};
use swingdx_common::models::BodySegment;

fn join_names(segments: &[BodySegment]) -> String {
    let names: Vec<&str> = segments.iter().map(|s| s.display_name()).collect();
    match names.len() {
        0 => String::new(),
        1 => names[0].to_string(),
        n => format!("{} and {}", names[..n - 1].join(", "), names[n - 1]),
    }
}

fn segments_with(errors: &[SequenceError], timing: ErrorTiming) -> Vec<BodySegment> {
    errors
        .iter()
        .filter(|e| e.timing == timing)
        .map(|e| e.segment)
        .collect()
}

pub(super) fn describe(sequence_match: bool, score: u8, errors: &[SequenceError]) -> String {
    if sequence_match {
        return format!(
            "Ideal kinematic sequence: energy flows from rear leg to bat. Sequence score {}/100.",
            score
        );
    }

    let mut parts = Vec::new();
    let early = segments_with(errors, ErrorTiming::Early);
    if !early.is_empty() {
        parts.push(format!("{} {}", capitalize(&join_names(&early)), ErrorTiming::Early.as_str()));
    }
    let late = segments_with(errors, ErrorTiming::Late);
    if !late.is_empty() {
        parts.push(format!("{} {}", join_names(&late), ErrorTiming::Late.as_str()));
    }
    let together = segments_with(errors, ErrorTiming::Simultaneous);
    if !together.is_empty() {
        parts.push(format!(
            "{} {}",
            join_names(&together),
            ErrorTiming::Simultaneous.as_str()
        ));
    }

    let out_of_place = if errors.len() == 1 { "segment" } else { "segments" };
    format!(
        "{} {} out of sequence. {}. Sequence score {}/100.",
        errors.len(),
        out_of_place,
        capitalize(&parts.join("; ")),
        score
    )
}

pub(super) fn describe_missing(missing: &[BodySegment]) -> String {
    format!(
        "Sequence not scored: missing {} data.",
        join_names(missing)
    )
}

pub(super) fn describe_duplicate(segment: BodySegment) -> String {
    format!("Sequence not scored: {} reported more than once.", segment)
}

pub(super) fn describe_non_finite(segment: BodySegment) -> String {
    format!("Sequence not scored: {} has no valid peak time.", segment)
}

pub(super) fn describe_no_motion() -> String {
    "Sequence not scored: no segment motion detected.".to_string()
}

pub(super) fn describe_simultaneous() -> String {
    "Sequence not scored: all segments peaked at the same instant.".to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
