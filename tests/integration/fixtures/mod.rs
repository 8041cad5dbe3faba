// Input documents with known sentence structure
// WHY: property checks need texts whose sentences are known in advance

/// One sentence, no trailing whitespace
pub const SINGLE_SENTENCE: &str = "The city council approved a new budget for public libraries.";

/// Ten sentences, each starting with a distinct word
pub const TEN_SENTENCES: [&str; 10] = [
    "Coral reefs cover less than one percent of the ocean floor.",
    "Yet they support roughly a quarter of all marine species.",
    "Warming water causes corals to expel the algae living in their tissues.",
    "This process, known as bleaching, leaves reefs white and fragile.",
    "Repeated bleaching events give reefs little time to recover.",
    "Scientists are breeding heat tolerant corals in laboratories.",
    "Some teams transplant these corals onto damaged reefs.",
    "Local fishing limits also help reefs rebuild their populations.",
    "Tourism revenue often funds monitoring of reef health.",
    "Protecting reefs ultimately depends on reducing global emissions.",
];

pub fn ten_sentence_paragraph() -> String {
    TEN_SENTENCES.join(" ")
}

/// Two paragraphs separated by a heading and blank lines
pub const STRUCTURED_TEXT: &str = "BACKGROUND
Dr. Smith studied volcanic soils for a decade. Her samples came from Iceland and Chile.

FINDINGS
Soils near active vents held unusual microbes.
The microbes survived extreme heat. Some of them even consumed sulfur.
";

/// Sentences of STRUCTURED_TEXT, headings excluded
pub const STRUCTURED_SENTENCES: [&str; 5] = [
    "Dr. Smith studied volcanic soils for a decade.",
    "Her samples came from Iceland and Chile.",
    "Soils near active vents held unusual microbes.",
    "The microbes survived extreme heat.",
    "Some of them even consumed sulfur.",
];

/// Non-English input
pub const NON_ENGLISH_TEXT: &str = "Der Hund läuft schnell. Die Katze schläft. 猫が寝ている。";

/// A long document built from repeated sentences
pub fn generate_long_text(sentences: usize) -> String {
    (1..=sentences)
        .map(|i| format!("Paragraph item {i} describes measurement number {} in detail.", i * 7))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A long document whose sentences draw on a vocabulary of a thousand
/// made-up words, so every sentence has its own mix of terms
pub fn generate_varied_text(sentences: usize) -> String {
    const SYLLABLES: [&str; 10] = ["ka", "lo", "mi", "ne", "ru", "sa", "ti", "vo", "ze", "pa"];
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next_word = || {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        let n = (state >> 33) as usize % 1000;
        format!("{}{}{}", SYLLABLES[n / 100], SYLLABLES[n / 10 % 10], SYLLABLES[n % 10])
    };

    (0..sentences)
        .map(|_| {
            let words: Vec<String> = (0..8).map(|_| next_word()).collect();
            let mut sentence = words.join(" ");
            sentence[..1].make_ascii_uppercase();
            sentence.push('.');
            sentence
        })
        .collect::<Vec<_>>()
        .join(" ")
}
