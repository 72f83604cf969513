//! Documents and the preprocessing that turns raw records into token sets.
use std::io::BufRead;

use hashbrown::HashSet;

use crate::errors::{KMedoidsError, Result};
use crate::token_set::TokenSet;

const FIELD_DELIMITER: char = '|';
const URL_PREFIX: &str = "http";

/// A document to be clustered: an identifier and the set of its distinct tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Identifier of the document, opaque to the clustering.
    pub id: String,
    /// Token set derived from the document text.
    pub tokens: TokenSet,
}

impl Document {
    /// Creates a document from an already tokenized set.
    pub fn new<S>(id: S, tokens: TokenSet) -> Self
    where
        S: Into<String>,
    {
        Self {
            id: id.into(),
            tokens,
        }
    }

    /// Creates a document from cleaned text, splitting it on whitespace.
    pub fn from_text<S, T>(id: S, text: T) -> Self
    where
        S: Into<String>,
        T: AsRef<str>,
    {
        Self::new(id, TokenSet::from_text(text))
    }
}

/// Cleans a tweet before tokenization.
///
/// Mentions (`@` followed by word characters) and URLs (`http` with at least one
/// attached character, up to the next whitespace) are removed, the text is
/// lowercased, and hashtag markers are deleted while the tag word itself is kept.
///
/// # Examples
///
/// ```
/// use jaccard_kmedoids::normalize;
///
/// let text = "Flu season is here @CDCgov #FluShot http://t.co/abc";
/// assert_eq!(normalize(text), "flu season is here  flushot ");
/// ```
pub fn normalize(text: &str) -> String {
    let text = remove_urls(&remove_mentions(text));
    text.to_lowercase().replace('#', "")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn remove_mentions(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '@' && chars.peek().map_or(false, |&n| is_word_char(n)) {
            while chars.peek().map_or(false, |&n| is_word_char(n)) {
                chars.next();
            }
        } else {
            cleaned.push(c);
        }
    }
    cleaned
}

fn remove_urls(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut offset = 0;
    let mut search = 0;
    while let Some(len) = text[search..].find(URL_PREFIX) {
        let start = search + len;
        let rest = start + URL_PREFIX.len();
        // A bare prefix without anything attached is an ordinary word.
        match text[rest..].chars().next() {
            Some(c) if !c.is_whitespace() => {
                cleaned.push_str(&text[offset..start]);
                offset = text[rest..]
                    .find(char::is_whitespace)
                    .map_or(text.len(), |end| rest + end);
                search = offset;
            }
            _ => search = rest,
        }
    }
    cleaned.push_str(&text[offset..]);
    cleaned
}

/// Parses one `id|timestamp|text` record into a document.
///
/// Everything after the second delimiter is the text, so it may contain the
/// delimiter itself. Returns `None` if the line has fewer than three fields.
pub fn parse_record(line: &str, normalizes: bool) -> Option<Document> {
    let mut fields = line.splitn(3, FIELD_DELIMITER);
    let id = fields.next()?;
    let _timestamp = fields.next()?;
    let text = fields.next()?;
    let tokens = if normalizes {
        TokenSet::from_text(normalize(text))
    } else {
        TokenSet::from_text(text)
    };
    Some(Document::new(id.trim(), tokens))
}

/// Loads documents from `id|timestamp|text` lines.
///
/// Blank lines are skipped. Malformed lines and duplicate identifiers are
/// rejected with an error naming the 1-based line number.
///
/// # Arguments
///
/// * `rdr` - Reader of the records.
/// * `normalizes` - Cleans the text with [`normalize`] before tokenization?
pub fn load_documents<R>(rdr: R, normalizes: bool) -> Result<Vec<Document>>
where
    R: BufRead,
{
    let mut documents = vec![];
    let mut ids = HashSet::new();
    for (i, line) in rdr.lines().enumerate() {
        let line = line.map_err(|e| KMedoidsError::input(format!("line {}: {e}", i + 1)))?;
        if line.trim().is_empty() {
            continue;
        }
        let document = parse_record(&line, normalizes).ok_or_else(|| {
            KMedoidsError::input(format!(
                "line {} must have the form id|timestamp|text.",
                i + 1
            ))
        })?;
        if !ids.insert(document.id.clone()) {
            return Err(KMedoidsError::input(format!(
                "line {} repeats the identifier {}.",
                i + 1,
                document.id
            )));
        }
        documents.push(document);
    }
    log::debug!("Loaded {} documents", documents.len());
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_mentions() {
        assert_eq!(remove_mentions("thanks @nih_news!"), "thanks !");
        assert_eq!(remove_mentions("mail me @ noon"), "mail me @ noon");
        assert_eq!(remove_mentions("@a@b c"), " c");
    }

    #[test]
    fn test_remove_urls() {
        assert_eq!(
            remove_urls("read http://x.co/1 and https://y.co/2"),
            "read  and "
        );
        assert_eq!(remove_urls("tail http://x.co"), "tail ");
        assert_eq!(remove_urls("no links"), "no links");
    }

    #[test]
    fn test_bare_url_prefix_is_kept() {
        assert_eq!(
            remove_urls("learn http basics http"),
            "learn http basics http"
        );
        assert_eq!(
            remove_urls("learn http basics http httpx a"),
            "learn http basics http  a"
        );
        assert_eq!(
            normalize("learn http basics http"),
            "learn http basics http"
        );
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize("RT @usnews: #Obesity rates RISE http://bit.ly/x"),
            "rt : obesity rates rise "
        );
    }

    #[test]
    fn test_normalize_keeps_unicode() {
        assert_eq!(normalize("Café #Über"), "café über");
    }

    #[test]
    fn test_parse_record() {
        let doc = parse_record(
            "586266687948881920|Thu Apr 09 21:37:19 +0000 2015|Gene therapy #trial http://x.co",
            true,
        )
        .unwrap();
        assert_eq!(doc.id, "586266687948881920");
        assert_eq!(doc.tokens, TokenSet::from_text("gene therapy trial"));
    }

    #[test]
    fn test_parse_record_keeps_delimiter_in_text() {
        let doc = parse_record("7|ts|a | b", false).unwrap();
        assert_eq!(doc.tokens, TokenSet::from_text("a | b"));
    }

    #[test]
    fn test_parse_record_without_text() {
        assert_eq!(parse_record("7|ts", false), None);
        assert_eq!(parse_record("7", false), None);
    }

    #[test]
    fn test_load_documents() {
        let input = "1|t|Flu Season\n\n2|t|flu shots\n3|t|\n";
        let docs = load_documents(input.as_bytes(), true).unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].tokens, TokenSet::from_text("flu season"));
        assert_eq!(docs[1].id, "2");
        assert!(docs[2].tokens.is_empty());
    }

    #[test]
    fn test_load_documents_without_normalization() {
        let docs = load_documents("1|t|Flu #Season".as_bytes(), false).unwrap();
        assert_eq!(docs[0].tokens, TokenSet::from_text("Flu #Season"));
    }

    #[test]
    fn test_load_malformed_documents() {
        let err = load_documents("1|t|ok\nbroken\n".as_bytes(), true).unwrap_err();
        assert_eq!(
            err.to_string(),
            "InputError: line 2 must have the form id|timestamp|text."
        );
    }

    #[test]
    fn test_load_duplicate_documents() {
        let err = load_documents("1|t|a\n1|t|b\n".as_bytes(), true).unwrap_err();
        assert_eq!(
            err.to_string(),
            "InputError: line 2 repeats the identifier 1."
        );
    }
}
