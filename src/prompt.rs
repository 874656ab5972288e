use crate::types::DetailLevel;

/// Every prompt opens with the response-language directive so summaries come
/// back in Croatian regardless of the document's language.
pub const LANGUAGE_DIRECTIVE: &str = "Odgovori na hrvatskom jeziku. ";

const BRIEF_INSTRUCTION: &str = "Analiziraj i pruži kratak sažetak u jednom odlomku za sljedeći dokument vezan uz natječajnu prijavu:";
const MEDIUM_INSTRUCTION: &str = "Analiziraj i pruži sažet sažetak sljedećeg dokumenta vezanog uz natječajnu prijavu:";
const DETAILED_INSTRUCTION: &str = "Analiziraj i pruži detaljan sažetak u više odlomaka, ističući ključne točke, zahtjeve i rokove iz sljedećeg dokumenta vezanog uz natječajnu prijavu:";

/// Map a detail level to the instruction text sent ahead of the document.
///
/// Pure and total: every level yields a fixed string, shared by all files in
/// a batch.
pub fn select_prompt(level: DetailLevel) -> String {
    let instruction = match level {
        DetailLevel::Brief => BRIEF_INSTRUCTION,
        DetailLevel::Medium => MEDIUM_INSTRUCTION,
        DetailLevel::Detailed => DETAILED_INSTRUCTION,
    };
    format!("{}{}", LANGUAGE_DIRECTIVE, instruction)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_LEVELS: [DetailLevel; 3] = [
        DetailLevel::Brief,
        DetailLevel::Medium,
        DetailLevel::Detailed,
    ];

    #[test]
    fn every_level_yields_nonempty_prompt_with_language_prefix() {
        for level in ALL_LEVELS {
            let prompt = select_prompt(level);
            assert!(!prompt.is_empty());
            assert!(
                prompt.starts_with(LANGUAGE_DIRECTIVE),
                "prompt for {:?} missing language directive",
                level
            );
            assert!(prompt.len() > LANGUAGE_DIRECTIVE.len());
        }
    }

    #[test]
    fn levels_produce_distinct_instructions() {
        assert_ne!(select_prompt(DetailLevel::Brief), select_prompt(DetailLevel::Medium));
        assert_ne!(select_prompt(DetailLevel::Medium), select_prompt(DetailLevel::Detailed));
        assert_ne!(select_prompt(DetailLevel::Brief), select_prompt(DetailLevel::Detailed));
    }

    #[test]
    fn unrecognized_level_string_behaves_like_medium() {
        let fallback = select_prompt(DetailLevel::from_str_lossy("no-such-level"));
        assert_eq!(fallback, select_prompt(DetailLevel::Medium));
    }
}
