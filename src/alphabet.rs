/// Category table for the spoken-letter clips. Iterated in declared order so
/// tool invocation order is reproducible across runs.
const SPOKEN_CATEGORIES: [(&str, &str); 3] = [
    ("capital", "ABCDEFGHIJKLMNOPQRSTUVWXYZ"),
    ("lower case letter", "abcdefghijklmnopqrstuvwxyz"),
    ("number", "1234567890"),
];

/// Glyph alphabet with visually ambiguous characters (I, L, O, 0, 1, o)
/// left out.
pub const GLYPH_ALPHABET: &str = "ABCDEFGHJKMNPQRSTUVWXYZ23456789abcdefghijklmnpqrstuvwxyz";

/// One work item for the audio pipeline. The category is only used to build
/// the spoken phrase; the output document is keyed by the bare symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpokenSymbol {
    pub category: &'static str,
    pub symbol: char,
}

impl SpokenSymbol {
    /// The phrase handed to the TTS tool, e.g. "capital A".
    pub fn phrase(&self) -> String {
        format!("{} {}", self.category, self.symbol)
    }
}

/// All (category, symbol) pairs for the audio pipeline, in declared order.
pub fn spoken_symbols() -> impl Iterator<Item = SpokenSymbol> {
    SPOKEN_CATEGORIES.iter().flat_map(|&(category, chars)| {
        chars.chars().map(move |symbol| SpokenSymbol { category, symbol })
    })
}

/// All symbols for the glyph pipeline, in declared order.
pub fn glyph_symbols() -> impl Iterator<Item = char> {
    GLYPH_ALPHABET.chars()
}
