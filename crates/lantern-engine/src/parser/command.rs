//! Splitting player input into verb, object, and indirect object.

/// Raw parser output: three possibly empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    /// The first word, lowercased.
    pub verb: String,
    /// The direct object phrase.
    pub object: String,
    /// The indirect object phrase.
    pub iobject: String,
}

/// Turns a line of player input into a [`ParsedCommand`].
pub trait CommandParser {
    /// Parse `input`.
    fn parse(&self, input: &str) -> ParsedCommand;
}

/// Prepositions that separate the direct from the indirect object.
const PREPOSITIONS: &[&str] = &[
    "on", "with", "in", "into", "to", "at", "from", "using", "under", "onto", "inside",
];

/// Articles dropped from the front of object phrases.
const ARTICLES: &[&str] = &["the", "a", "an"];

/// Drop a single leading article from a phrase.
pub fn strip_article(phrase: &str) -> &str {
    let phrase = phrase.trim();
    match phrase.split_once(char::is_whitespace) {
        Some((first, rest)) if ARTICLES.iter().any(|a| a.eq_ignore_ascii_case(first)) => {
            rest.trim_start()
        }
        _ => phrase,
    }
}

/// The default word-based parser.
///
/// The first word is the verb. The rest is split at the first preposition
/// into object and indirect object. A phrase that starts with a preposition
/// (`look at box`) keeps its noun as the direct object.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordParser;

impl CommandParser for WordParser {
    fn parse(&self, input: &str) -> ParsedCommand {
        let words: Vec<&str> = input.split_whitespace().collect();
        let Some((verb, rest)) = words.split_first() else {
            return ParsedCommand::default();
        };

        let split = rest
            .iter()
            .position(|w| PREPOSITIONS.iter().any(|p| p.eq_ignore_ascii_case(w)));
        let (object, iobject) = match split {
            Some(pos) => (rest[..pos].join(" "), rest[pos + 1..].join(" ")),
            None => (rest.join(" "), String::new()),
        };

        let object = strip_article(&object).to_string();
        let iobject = strip_article(&iobject).to_string();
        let (object, iobject) = if object.is_empty() {
            (iobject, String::new())
        } else {
            (object, iobject)
        };

        ParsedCommand {
            verb: verb.to_lowercase(),
            object,
            iobject,
        }
    }
}
