/// The set of spellings under which one declared parameter can be
/// addressed: a short name, a long name, a short/long pair, a positional
/// index, or the catch-all that stands for every positional index.
///
/// Declaration-time rules: a short name is exactly one character, a long
/// name at least two, and no spelling may begin with a hyphen. Violations
/// are programmer errors and panic.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    short: Option<char>,
    long: Option<String>,
    pos: Option<usize>,
    all: bool,
}

impl Identifier {
    /// Single spelling: one character becomes the short name, anything
    /// longer the long name.
    pub fn named(name: &str) -> Self {
        check_spelling(name);
        if name.chars().count() == 1 {
            Self {
                short: name.chars().next(),
                long: None,
                pos: None,
                all: false,
            }
        } else {
            Self {
                short: None,
                long: Some(name.to_string()),
                pos: None,
                all: false,
            }
        }
    }

    /// Short and long spelling for the same parameter.
    pub fn pair(short: char, long: &str) -> Self {
        assert!(
            short != '-',
            "argument {short} hyphens must not prefix declaration"
        );
        assert!(
            long.chars().count() >= 2,
            "long name must contain at least two characters"
        );
        check_spelling(long);
        Self {
            short: Some(short),
            long: Some(long.to_string()),
            pos: None,
            all: false,
        }
    }

    /// Positional spelling, addressed by 0-based index.
    pub fn index(pos: usize) -> Self {
        Self {
            short: None,
            long: None,
            pos: Some(pos),
            all: false,
        }
    }

    /// The catch-all spelling, resolved as the ordered sequence of every
    /// positional argument.
    pub fn all() -> Self {
        Self {
            short: None,
            long: None,
            pos: None,
            all: true,
        }
    }

    pub(crate) fn is_all(&self) -> bool {
        self.all
    }

    pub(crate) fn pos(&self) -> Option<usize> {
        self.pos
    }

    /// Exact-match test against a stripped token name.
    pub fn contains_name(&self, name: &str) -> bool {
        if let Some(short) = self.short {
            let mut chars = name.chars();
            if chars.next() == Some(short) && chars.next().is_none() {
                return true;
            }
        }
        self.long.as_deref() == Some(name)
    }

    /// Exact-match test against a positional index.
    pub fn contains_pos(&self, pos: usize) -> bool {
        self.pos == Some(pos)
    }

    /// True when the two identifiers share a short name, a long name, or a
    /// positional index. The catch-all overlaps nothing explicitly.
    pub fn overlaps(&self, other: &Identifier) -> bool {
        if self.short.is_some() && self.short == other.short {
            return true;
        }
        if self.long.is_some() && self.long == other.long {
            return true;
        }
        if self.pos.is_some() && self.pos == other.pos {
            return true;
        }
        false
    }

    /// Verbose display form, listing both spellings when present.
    pub fn help(&self) -> String {
        match (self.short, &self.long) {
            (Some(s), Some(l)) => format!("-{s}|--{l}"),
            (None, Some(l)) => format!("--{l}"),
            (Some(s), None) => format!("-{s}"),
            (None, None) => match self.pos {
                Some(p) => format!("<{p}>"),
                None => "...".to_string(),
            },
        }
    }

    /// Canonical display form, preferring the long spelling.
    pub fn longer(&self) -> String {
        if let Some(l) = &self.long {
            return format!("--{l}");
        }
        if let Some(s) = self.short {
            return format!("-{s}");
        }
        match self.pos {
            Some(p) => format!("<{p}>"),
            None => "...".to_string(),
        }
    }

    /// Ordering key for help display: long name, else short name, else
    /// empty (positional and catch-all identifiers).
    pub(crate) fn sort_key(&self) -> String {
        if let Some(l) = &self.long {
            return l.clone();
        }
        if let Some(s) = self.short {
            return s.to_string();
        }
        String::new()
    }
}

fn check_spelling(name: &str) {
    assert!(!name.is_empty(), "name must contain at least one character");
    assert!(
        !name.starts_with('-'),
        "argument {name} hyphens must not prefix declaration"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_dispatches_on_length() {
        let short = Identifier::named("v");
        assert!(short.contains_name("v"));
        assert!(!short.contains_name("verbose"));
        assert_eq!(short.longer(), "-v");

        let long = Identifier::named("verbose");
        assert!(long.contains_name("verbose"));
        assert!(!long.contains_name("v"));
        assert_eq!(long.longer(), "--verbose");
    }

    #[test]
    fn test_pair_matches_both_spellings() {
        let id = Identifier::pair('v', "verbose");
        assert!(id.contains_name("v"));
        assert!(id.contains_name("verbose"));
        assert_eq!(id.help(), "-v|--verbose");
        assert_eq!(id.longer(), "--verbose");
    }

    #[test]
    fn test_positional_and_catch_all_forms() {
        let id = Identifier::index(2);
        assert!(id.contains_pos(2));
        assert!(!id.contains_pos(1));
        assert_eq!(id.longer(), "<2>");
        assert_eq!(Identifier::all().longer(), "...");
    }

    #[test]
    fn test_overlap_rules() {
        let pair = Identifier::pair('v', "verbose");
        assert!(pair.overlaps(&Identifier::named("v")));
        assert!(pair.overlaps(&Identifier::named("verbose")));
        assert!(!pair.overlaps(&Identifier::named("quiet")));

        assert!(Identifier::index(0).overlaps(&Identifier::index(0)));
        assert!(!Identifier::index(0).overlaps(&Identifier::index(1)));
        assert!(!Identifier::all().overlaps(&Identifier::all()));
        assert!(!Identifier::all().overlaps(&pair));
    }

    #[test]
    #[should_panic(expected = "hyphens must not prefix declaration")]
    fn test_hyphen_prefix_rejected() {
        Identifier::named("--verbose");
    }

    #[test]
    #[should_panic(expected = "at least one character")]
    fn test_empty_name_rejected() {
        Identifier::named("");
    }

    #[test]
    #[should_panic(expected = "at least two characters")]
    fn test_short_long_pair_rejected() {
        Identifier::pair('v', "x");
    }
}
