/// Every whole-word transcription of the given segments.
///
/// The first segment varies slowest and the last varies fastest.
pub(crate) fn expand(segments: &[&[String]]) -> Vec<String> {
	match segments.split_first() {
		None => Vec::new(),
		Some((head, [])) => head.to_vec(),
		Some((head, rest)) => {
			let rest = expand(rest);
			head.iter()
				.flat_map(|alt| rest.iter().map(move |tail| format!("{alt} {tail}")))
				.collect()
		}
	}
}

/// The first transcription `expand` would produce.
pub(crate) fn first(segments: &[&[String]]) -> String {
	join(segments.iter().filter_map(|alts| alts.first()))
}

/// The last transcription `expand` would produce.
pub(crate) fn last(segments: &[&[String]]) -> String {
	join(segments.iter().filter_map(|alts| alts.last()))
}

fn join<'a>(parts: impl Iterator<Item = &'a String>) -> String {
	parts.map(String::as_str).collect::<Vec<_>>().join(" ")
}
