//! Extracting JSON payloads from model responses.
//!
//! Models asked for JSON sometimes wrap it in a markdown code fence. The
//! fence is the only decoration tolerated; everything else must parse as-is.

/// Strip a surrounding markdown code fence (```` ```json ```` or ```` ``` ````).
///
/// Text without a leading fence is returned trimmed and otherwise untouched.
///
/// # Examples
///
/// ```
/// use storypal_narrative::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
/// ```
pub fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the language tag on the opening line
    let body = match rest.find('\n') {
        Some(newline) if rest[..newline].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            &rest[newline + 1..]
        }
        Some(_) => rest,
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    // A missing closing fence means a truncated response; keep what we have
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}
