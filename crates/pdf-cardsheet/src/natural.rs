//! Natural ordering of names
//!
//! Names are split into alternating text and digit runs. Digit runs compare
//! by numeric value, so `card_2` sorts before `card_10`.

use std::cmp::Ordering;

/// One run of a split name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyPart<'a> {
    Text(&'a str),
    Number(NumberRun<'a>),
}

/// A maximal run of ASCII digits, compared by value
///
/// Digits are kept as text so runs of any length compare without overflow.
#[derive(Debug, Clone, Copy)]
pub struct NumberRun<'a>(&'a str);

impl<'a> NumberRun<'a> {
    fn significant(&self) -> &'a str {
        let trimmed = self.0.trim_start_matches('0');
        if trimmed.is_empty() { "0" } else { trimmed }
    }

    /// The digits as written, leading zeros included
    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

impl Ord for NumberRun<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.significant(), other.significant());
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}

impl PartialOrd for NumberRun<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NumberRun<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NumberRun<'_> {}

/// Sort key of a name: text and number runs, always starting with a
/// (possibly empty) text run and alternating from there
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey<'a>(Vec<KeyPart<'a>>);

impl<'a> NaturalKey<'a> {
    pub fn parts(&self) -> &[KeyPart<'a>] {
        &self.0
    }
}

/// Split a name into its natural sort key.
///
/// `"card_10.png"` becomes `[Text("card_"), Number(10), Text(".png")]`.
/// A name that starts or ends with digits gets an empty text run on that
/// side, so text and number runs line up position by position.
pub fn natural_key(name: &str) -> NaturalKey<'_> {
    let mut parts = Vec::new();
    let mut rest = name;

    loop {
        let text_end = rest
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(rest.len());
        parts.push(KeyPart::Text(&rest[..text_end]));
        rest = &rest[text_end..];
        if rest.is_empty() {
            break;
        }

        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        parts.push(KeyPart::Number(NumberRun(&rest[..digits_end])));
        rest = &rest[digits_end..];
        if rest.is_empty() {
            parts.push(KeyPart::Text(""));
            break;
        }
    }

    NaturalKey(parts)
}

/// Compare two names in natural order
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b))
}

/// Sort names in natural order. The sort is stable.
pub fn natural_sort<S: AsRef<str>>(names: &mut [S]) {
    natural_sort_by_key(names, |name| name.as_ref());
}

/// Sort items in natural order of a name borrowed from each item.
///
/// Stable: items whose names compare equal (`"01"` and `"1"`) keep their
/// relative order.
pub fn natural_sort_by_key<T, F>(items: &mut [T], name: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| natural_cmp(name(a), name(b)));
}
