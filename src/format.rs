//! Output line formatting for the command-line tool.

/// Collate a word and its transcriptions into one output line.
///
/// The line is `word<TAB>count<TAB>alt1|alt2|...`, without a trailing newline.
pub fn format_line(word: &str, transcriptions: &[String]) -> String {
	format!(
		"{word}\t{}\t{}",
		transcriptions.len(),
		transcriptions.join("|")
	)
}
