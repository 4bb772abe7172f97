/// Words that never make it into a stored chirp
const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

const REPLACEMENT: &str = "****";

/// Replace profane words with `****`.
///
/// Words are split on single spaces and compared case-insensitively. A word
/// with punctuation attached (`Sharbert!`) is left alone.
pub fn clean_chirp(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            let lowered = word.to_lowercase();
            if PROFANE_WORDS.contains(&lowered.as_str()) {
                REPLACEMENT
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
