//! # Text Composition
//!
//! Small pure functions that rewrite and join trader-facing sentences.
//! Each is a behavioural contract on exact output strings, so each is
//! tested on its own.

/// Strip a single trailing period, ignoring trailing whitespace.
pub fn strip_trailing_period(text: &str) -> &str {
    let trimmed = text.trim_end();
    trimmed.strip_suffix('.').unwrap_or(trimmed)
}

/// Lower-case the first whitespace-delimited word of `text`.
pub fn lower_first_word(text: &str) -> String {
    let split = text.find(char::is_whitespace).unwrap_or(text.len());
    let (head, tail) = text.split_at(split);
    format!("{}{}", head.to_lowercase(), tail)
}

/// Whether `text` starts with `prefix`, ignoring ASCII case.
fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Rewrite a leading "you need" (any case) to "Check if you need".
///
/// Used when a measure offers more than one certificate, so each reads as
/// something to check rather than an unconditional requirement.
pub fn decorate_certificate(text: &str) -> String {
    const NEED: &str = "you need";
    if starts_with_ignore_case(text, NEED) {
        format!("Check if you need{}", &text[NEED.len()..])
    } else {
        text.to_string()
    }
}

/// Rewrite an exception declaration into an exemption sentence.
///
/// `"Your goods are for scientific purposes."` becomes
/// `"If your goods are for scientific purposes, then your goods are exempt."`.
/// Only a case-sensitive leading `"Your"` triggers the rewrite.
pub fn rewrite_exception(text: &str) -> String {
    match strip_trailing_period(text).strip_prefix("Your") {
        Some(rest) => format!("If your{rest}, then your goods are exempt."),
        None => text.to_string(),
    }
}

/// Replace a leading "your" (any case) with "If your".
pub fn conditionalise(text: &str) -> String {
    const YOUR: &str = "your";
    if starts_with_ignore_case(text, YOUR) {
        format!("If your{}", &text[YOUR.len()..])
    } else {
        text.to_string()
    }
}

/// Join two certificate descriptions into one sentence.
///
/// Both present: the first loses its trailing period, the second its
/// leading capital, joined by `conjunction` (e.g. `" and "`). One blank:
/// the other verbatim. Both blank: nothing.
pub fn join_certificate_texts(
    first: Option<&str>,
    second: Option<&str>,
    conjunction: &str,
) -> Option<String> {
    let first = first.filter(|t| !t.trim().is_empty());
    let second = second.filter(|t| !t.trim().is_empty());
    match (first, second) {
        (Some(a), Some(b)) => Some(format!(
            "{}{conjunction}{}",
            strip_trailing_period(a),
            lower_first_word(b)
        )),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}

/// Join an exception text and a threshold sentence.
///
/// The exception loses its trailing period and gains "If your"; the
/// threshold sentence loses its locale boilerplate prefix. The two halves
/// are joined by `conjunction`.
pub fn join_exception_and_threshold(
    exception: &str,
    threshold: &str,
    threshold_prefix: &str,
    conjunction: &str,
) -> String {
    let head = conditionalise(strip_trailing_period(exception));
    let tail = threshold.strip_prefix(threshold_prefix).unwrap_or(threshold);
    format!("{head}{conjunction}{tail}")
}

/// Repair `" ,"` spacing artifacts left by template assembly.
pub fn repair_comma_spacing(text: &str) -> String {
    text.replace(" ,", ",")
}
