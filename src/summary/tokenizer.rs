//! Spanish sentence and word tokenization.
//!
//! Sentences end at `.`, `!`, `?` or `…` (plus any closing quotes) followed
//! by whitespace and an uppercase letter, digit or opening mark. A period
//! after a known abbreviation, a single-letter initial or a dotted acronym
//! (`EE.UU.`) does not end a sentence.
//!
//! Words are runs of letters (apostrophes and hyphens allowed inside),
//! lowercased, with Spanish stop words removed.

use crate::utils::collapse_whitespace;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{L}+(?:['’-]\p{L}+)*").expect("static regex"));

const ABBREVIATIONS: &[&str] = &[
    "sr", "sra", "srta", "sres", "dr", "dra", "lic", "ing", "arq", "prof", "gral", "cnel", "tte",
    "cap", "ud", "uds", "vd", "vds", "av", "avda", "pág", "págs", "núm", "nro", "nº", "art",
    "arts", "inc", "cía", "ej", "aprox", "dpto", "depto", "tel", "etc", "vs", "min", "máx", "mín",
    "ee", "uu", "jr", "ed", "vol", "fig", "pp",
];

const STOP_WORDS: &[&str] = &[
    "a", "al", "algo", "algunas", "algunos", "ante", "antes", "aquel", "aquella", "aquellas",
    "aquellos", "aqui", "aquí", "así", "aun", "aún", "bajo", "bien", "cada", "casi", "como",
    "cómo", "con", "contra", "cual", "cuales", "cuando", "cuándo", "cuanto", "de", "del", "desde",
    "donde", "dónde", "dos", "durante", "e", "el", "él", "ella", "ellas", "ellos", "en", "entre",
    "era", "eran", "es", "esa", "esas", "ese", "eso", "esos", "esta", "está", "estaba", "estaban",
    "estado", "estamos", "están", "estar", "estas", "este", "esto", "estos", "fue", "fueron",
    "ha", "había", "habían", "han", "hasta", "hay", "la", "las", "le", "les", "lo", "los", "más",
    "me", "mi", "mis", "mucho", "muy", "nada", "ni", "no", "nos", "nosotros", "o", "otra", "otras",
    "otro", "otros", "para", "pero", "poco", "por", "porque", "qué", "que", "quien", "quienes",
    "se", "sea", "según", "ser", "si", "sí", "sido", "siempre", "sin", "sino", "sobre", "su",
    "sus", "también", "tan", "tanto", "te", "tiene", "tienen", "todo", "todos", "tras", "tu",
    "tus", "u", "un", "una", "unas", "uno", "unos", "usted", "y", "ya", "yo",
];

/// Tokenizer resources for Spanish text.
///
/// Built once per process by [`super::init`].
#[derive(Debug)]
pub struct SpanishTokenizer {
    abbreviations: HashSet<&'static str>,
    stop_words: HashSet<&'static str>,
}

impl SpanishTokenizer {
    pub(super) fn build() -> Self {
        Lazy::force(&WORD);
        Self {
            abbreviations: ABBREVIATIONS.iter().copied().collect(),
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Split `text` into trimmed sentences, whitespace collapsed.
    pub fn sentences(&self, text: &str) -> Vec<String> {
        let text = collapse_whitespace(text);
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (pos, c) = chars[i];
            if !is_terminator(c) {
                i += 1;
                continue;
            }
            let mut j = i + 1;
            while j < chars.len() && (is_terminator(chars[j].1) || is_closer(chars[j].1)) {
                j += 1;
            }
            // After collapsing, a space is the only whitespace left.
            if j < chars.len() && chars[j].1 == ' ' {
                let next = chars.get(j + 1).map(|&(_, n)| n);
                if self.is_boundary(&text[start..pos], c, next) {
                    let sentence = text[start..chars[j].0].trim();
                    if !sentence.is_empty() {
                        sentences.push(sentence.to_string());
                    }
                    start = chars[j].0 + 1;
                }
            }
            i = j;
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }
        sentences
    }

    /// Lowercased content words of `sentence`, stop words removed.
    pub fn words(&self, sentence: &str) -> Vec<String> {
        WORD.find_iter(sentence)
            .map(|m| m.as_str().to_lowercase())
            .filter(|w| !self.stop_words.contains(w.as_str()))
            .collect()
    }

    fn is_boundary(&self, before: &str, terminator: char, next: Option<char>) -> bool {
        let Some(next) = next else {
            return false;
        };
        if !(next.is_uppercase() || next.is_ascii_digit() || is_opener(next)) {
            return false;
        }
        if terminator != '.' {
            return true;
        }
        let last = before
            .rsplit(' ')
            .next()
            .unwrap_or("")
            .trim_start_matches(is_opener);
        !self.is_abbreviation(last)
    }

    fn is_abbreviation(&self, token: &str) -> bool {
        let mut letters = token.chars();
        let single_letter = matches!((letters.next(), letters.next()), (Some(c), None) if c.is_alphabetic());
        single_letter
            || token.contains('.')
            || self.abbreviations.contains(token.to_lowercase().as_str())
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | '”' | '’' | '»' | ')' | ']')
}

fn is_opener(c: char) -> bool {
    matches!(c, '¿' | '¡' | '"' | '\'' | '“' | '‘' | '«' | '(' | '[' | '-' | '—')
}
