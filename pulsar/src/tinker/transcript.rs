//! Recovery of a clean result from a tinker transcript.
//!
//! Tinker mixes echoed prompts, its banner and `= value` lines with whatever
//! the snippet itself printed. Lines are classified by structural markers
//! only, so banner wording changes between PsySH releases do not matter.

/// Prompt prefixes echoed by the REPL (`>>>` for input, `...` for continuation).
pub const PROMPT_MARKERS: [&str; 2] = [">>>", "..."];

/// Prefix of a line holding the value of the evaluated expression.
pub const VALUE_MARKER: &str = "= ";

/// Fragments that only ever appear in interpreter noise.
pub const BANNER_MARKERS: [&str; 3] = ["Psy Shell", "Xdebug:", "Goodbye."];

pub const EXIT_COMMAND: &str = "exit";

/// Result text when a snippet produced nothing to show.
pub const EMPTY_RESULT: &str = "null";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptLine<'a> {
    Blank,
    Banner,
    Exit,
    /// Echoed input following a prompt.
    Prompt,
    /// Evaluated value, marker stripped.
    Value(&'a str),
    /// Anything the snippet printed itself.
    Output(&'a str),
}

impl<'a> TranscriptLine<'a> {
    /// Text this line contributes to the result, if any.
    pub fn kept_text(&self) -> Option<&'a str> {
        match *self {
            TranscriptLine::Value(text) | TranscriptLine::Output(text) => Some(text),
            _ => None,
        }
    }
}

fn starts_with_prompt(text: &str) -> bool {
    PROMPT_MARKERS.iter().any(|marker| text.starts_with(marker))
}

fn strip_prompts(mut text: &str) -> &str {
    while let Some(rest) = PROMPT_MARKERS
        .iter()
        .find_map(|marker| text.strip_prefix(marker))
    {
        text = rest.trim();
    }
    text
}

fn is_lone_punctuation(text: &str) -> bool {
    let mut chars = text.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_punctuation())
}

pub fn classify_line(line: &str) -> TranscriptLine<'_> {
    let trimmed = line.trim();
    let core = strip_prompts(trimmed);

    if core.is_empty() || is_lone_punctuation(core) {
        return TranscriptLine::Blank;
    }
    if BANNER_MARKERS.iter().any(|marker| core.contains(marker)) {
        return TranscriptLine::Banner;
    }
    if core == EXIT_COMMAND {
        return TranscriptLine::Exit;
    }
    if let Some(value) = core.strip_prefix(VALUE_MARKER) {
        return TranscriptLine::Value(value);
    }
    if starts_with_prompt(trimmed) {
        return TranscriptLine::Prompt;
    }
    TranscriptLine::Output(core)
}

/// Turn a raw combined stdout/stderr transcript into the text shown to the user.
pub fn parse_transcript(transcript: &str) -> String {
    let kept: Vec<&str> = transcript
        .lines()
        .filter_map(|line| classify_line(line).kept_text())
        .collect();

    let joined = kept.join("\n");
    let result = joined.trim();
    if result.is_empty() {
        EMPTY_RESULT.to_string()
    } else {
        result.to_string()
    }
}

/// Looser filter used for live streaming: drops only raw prompt lines.
pub fn is_streamed_line(line: &str) -> bool {
    !starts_with_prompt(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_blank_and_punctuation() {
        assert_eq!(classify_line(""), TranscriptLine::Blank);
        assert_eq!(classify_line("   \t"), TranscriptLine::Blank);
        assert_eq!(classify_line(">>>"), TranscriptLine::Blank);
        assert_eq!(classify_line(">>> ;"), TranscriptLine::Blank);
        assert_eq!(classify_line("... }"), TranscriptLine::Blank);
    }

    #[test]
    fn classify_banner_regardless_of_version_text() {
        assert_eq!(
            classify_line("Psy Shell v0.12.4 (PHP 8.3.7 — cli) by Justin Hileman"),
            TranscriptLine::Banner
        );
        assert_eq!(
            classify_line("Xdebug: [Step Debug] Could not connect to debugging client."),
            TranscriptLine::Banner
        );
        assert_eq!(classify_line("   INFO  Goodbye."), TranscriptLine::Banner);
    }

    #[test]
    fn classify_exit_with_and_without_prompt() {
        assert_eq!(classify_line("exit"), TranscriptLine::Exit);
        assert_eq!(classify_line(">>> exit"), TranscriptLine::Exit);
    }

    #[test]
    fn classify_value_line() {
        assert_eq!(classify_line("= 42"), TranscriptLine::Value("42"));
        assert_eq!(
            classify_line("  = \"hello\"  "),
            TranscriptLine::Value("\"hello\"")
        );
    }

    #[test]
    fn classify_value_after_prompt() {
        assert_eq!(classify_line(">>> = 3"), TranscriptLine::Value("3"));
    }

    #[test]
    fn classify_repeated_prompts_are_stripped() {
        assert_eq!(classify_line(">>> ... >>> = true"), TranscriptLine::Value("true"));
        assert_eq!(classify_line(">>> ... $x = 1;"), TranscriptLine::Prompt);
    }

    #[test]
    fn classify_echoed_input_as_prompt() {
        assert_eq!(classify_line(">>> User::count()"), TranscriptLine::Prompt);
        assert_eq!(classify_line("... ->first()"), TranscriptLine::Prompt);
    }

    #[test]
    fn classify_plain_output_is_kept_trimmed() {
        assert_eq!(
            classify_line("   array:2 [  "),
            TranscriptLine::Output("array:2 [")
        );
    }

    #[test]
    fn classify_equals_without_space_is_output() {
        assert_eq!(classify_line("=>foo"), TranscriptLine::Output("=>foo"));
    }

    #[test]
    fn parse_side_effect_only_is_null() {
        let transcript = "Psy Shell v0.12.4 (PHP 8.3.7 — cli) by Justin Hileman\n>>> $x = 1;\n>>> exit\n   INFO  Goodbye.\n";
        assert_eq!(parse_transcript(transcript), "null");
    }

    #[test]
    fn parse_empty_transcript_is_null() {
        assert_eq!(parse_transcript(""), "null");
        assert_eq!(parse_transcript("\n\n  \n"), "null");
    }

    #[test]
    fn parse_single_value_returns_remainder() {
        let transcript = "Psy Shell v0.12.4\n>>> 1 + 1\n= 2\n>>> exit\n";
        assert_eq!(parse_transcript(transcript), "2");
    }

    #[test]
    fn parse_keeps_multiline_dump_output_without_bracket_artifacts() {
        let transcript = concat!(
            "Psy Shell v0.12.4\n",
            ">>> dump(['a' => 1, 'b' => 2]);\n",
            "array:2 [\n",
            "  \"a\" => 1\n",
            "  \"b\" => 2\n",
            "]\n",
            "= null\n",
        );
        assert_eq!(
            parse_transcript(transcript),
            "array:2 [\n\"a\" => 1\n\"b\" => 2\nnull"
        );
    }

    #[test]
    fn parse_handles_crlf_transcripts() {
        let transcript = ">>> 'x'\r\n= \"x\"\r\n";
        assert_eq!(parse_transcript(transcript), "\"x\"");
    }

    #[test]
    fn parse_keeps_stderr_errors() {
        let transcript = ">>> nope()\n   Error  Call to undefined function nope().\n";
        assert_eq!(
            parse_transcript(transcript),
            "Error  Call to undefined function nope()."
        );
    }

    #[test]
    fn streamed_filter_drops_only_raw_prompts() {
        assert!(!is_streamed_line(">>> 1 + 1"));
        assert!(!is_streamed_line("... ;"));
        assert!(is_streamed_line("  >>> indented prompt survives"));
        assert!(is_streamed_line("Psy Shell v0.12.4"));
        assert!(is_streamed_line("= 2"));
    }
}
