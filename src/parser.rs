use log::debug;

use crate::error::Error;

/// Number of leading hyphens on a token.
pub(crate) fn count_hyphens(token: &str) -> usize {
    token.chars().take_while(|&c| c == '-').count()
}

/// Split the raw token stream into named-shaped and positional buckets.
///
/// A token with one or more leading hyphens is named-shaped. It absorbs
/// the following bare token as its value only when it has two or more
/// hyphens or a single-character name, and carries no `=` assignment;
/// `-abc` is three bundled short flags, not a value-taking parameter. In
/// positional mode no absorption happens at all, so values must be
/// attached with `=`.
///
/// Any token with a leading hyphen is named-shaped, including `-5`, so
/// negative numbers cannot be passed as positional arguments.
pub(crate) fn separate_named_positional(
    raw: &[String],
    positional_mode: bool,
) -> (Vec<String>, Vec<String>) {
    let mut named = Vec::new();
    let mut positional = Vec::new();

    let mut to_named = false;
    for token in raw {
        let hyphens = count_hyphens(token);
        let name_len = token.chars().count() - hyphens;
        if hyphens >= 1 {
            named.push(token.clone());
            to_named = (hyphens >= 2 || name_len == 1) && !token.contains('=');
            continue;
        }
        if !positional_mode && to_named {
            named.push(token.clone());
            to_named = false;
            continue;
        }
        positional.push(token.clone());
    }

    debug!(
        "separated {} named and {} positional tokens",
        named.len(),
        positional.len()
    );
    (named, positional)
}

/// Split `--name=value` tokens into a name token followed by a bare value
/// token, preserving order. Splitting requires two hyphens or a
/// single-character name; a single-hyphen multi-character name with `=`
/// is recorded as an error and dropped.
pub(crate) fn split_equations(named: Vec<String>, errors: &mut Vec<Error>) -> Vec<String> {
    let mut split = Vec::new();

    for token in named {
        let Some(eq) = token.find('=') else {
            split.push(token);
            continue;
        };
        let hyphens = count_hyphens(&token);
        let name_len = token[..eq].chars().count() - hyphens;

        if name_len != 1 && hyphens < 2 {
            errors.push(Error::SingleHyphenValue { token });
            continue;
        }
        split.push(token[..eq].to_string());
        split.push(token[eq + 1..].to_string());
    }

    split
}

/// Turn the split token list into ordered (name, value) pairs. Two or
/// more hyphens yield one pair; exactly one hyphen expands into one pair
/// per character (bundled short flags); a bare token becomes the value of
/// the immediately preceding pair. Duplicate names are kept as separate
/// pairs.
pub(crate) fn assign_named_values(
    split: Vec<String>,
    errors: &mut Vec<Error>,
) -> Vec<(String, Option<String>)> {
    let mut pairs: Vec<(String, Option<String>)> = Vec::new();

    for token in split {
        let hyphens = count_hyphens(&token);
        let name = token.trim_start_matches('-').to_string();
        if hyphens >= 2 {
            if name.chars().count() < 2 {
                errors.push(Error::ShortNameDoubleHyphen { name: name.clone() });
            }
            pairs.push((name, None));
        } else if hyphens == 1 {
            for c in name.chars() {
                pairs.push((c.to_string(), None));
            }
        } else if let Some(last) = pairs.last_mut() {
            // a bare token only enters the named list behind its name
            last.1 = Some(name);
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_count_hyphens() {
        assert_eq!(count_hyphens("value"), 0);
        assert_eq!(count_hyphens("-v"), 1);
        assert_eq!(count_hyphens("--verbose"), 2);
        assert_eq!(count_hyphens("---"), 3);
    }

    #[test]
    fn test_separate_absorbs_value_after_long_name() {
        let (named, positional) =
            separate_named_positional(&raw(&["--output", "out.txt", "--verbose"]), false);
        assert_eq!(named, raw(&["--output", "out.txt", "--verbose"]));
        assert!(positional.is_empty());
    }

    #[test]
    fn test_separate_short_single_char_absorbs() {
        let (named, positional) = separate_named_positional(&raw(&["-o", "out.txt"]), false);
        assert_eq!(named, raw(&["-o", "out.txt"]));
        assert!(positional.is_empty());
    }

    #[test]
    fn test_separate_bundled_flags_do_not_absorb() {
        let (named, positional) = separate_named_positional(&raw(&["-abc", "stray"]), false);
        assert_eq!(named, raw(&["-abc"]));
        assert_eq!(positional, raw(&["stray"]));
    }

    #[test]
    fn test_separate_equation_does_not_absorb() {
        let (named, positional) =
            separate_named_positional(&raw(&["--output=out.txt", "stray"]), false);
        assert_eq!(named, raw(&["--output=out.txt"]));
        assert_eq!(positional, raw(&["stray"]));
    }

    #[test]
    fn test_separate_positional_mode_never_absorbs() {
        let (named, positional) =
            separate_named_positional(&raw(&["--output", "first", "second"]), true);
        assert_eq!(named, raw(&["--output"]));
        assert_eq!(positional, raw(&["first", "second"]));
    }

    #[test]
    fn test_separate_negative_number_is_named_shaped() {
        let (named, positional) = separate_named_positional(&raw(&["-5"]), true);
        assert_eq!(named, raw(&["-5"]));
        assert!(positional.is_empty());
    }

    #[test]
    fn test_split_equations() {
        let mut errors = Vec::new();
        let split = split_equations(raw(&["--name=value", "-x=1", "--flag"]), &mut errors);
        assert_eq!(split, raw(&["--name", "value", "-x", "1", "--flag"]));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_split_rejects_single_hyphen_multi_char_equation() {
        let mut errors = Vec::new();
        let split = split_equations(raw(&["-ab=1", "--ok=2"]), &mut errors);
        assert_eq!(split, raw(&["--ok", "2"]));
        assert_eq!(
            errors,
            vec![Error::SingleHyphenValue {
                token: "-ab=1".to_string()
            }]
        );
    }

    #[test]
    fn test_assign_expands_bundled_flags() {
        let mut errors = Vec::new();
        let pairs = assign_named_values(raw(&["-abc"]), &mut errors);
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), None),
                ("b".to_string(), None),
                ("c".to_string(), None),
            ]
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_assign_attaches_value_to_preceding_pair() {
        let mut errors = Vec::new();
        let pairs = assign_named_values(raw(&["--output", "out.txt", "-v"]), &mut errors);
        assert_eq!(
            pairs,
            vec![
                ("output".to_string(), Some("out.txt".to_string())),
                ("v".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_assign_rejects_double_hyphen_short_name() {
        let mut errors = Vec::new();
        let pairs = assign_named_values(raw(&["--x"]), &mut errors);
        // the pair is still emitted so later lookups see it
        assert_eq!(pairs, vec![("x".to_string(), None)]);
        assert_eq!(
            errors,
            vec![Error::ShortNameDoubleHyphen {
                name: "x".to_string()
            }]
        );
    }

    #[test]
    fn test_assign_keeps_duplicate_names() {
        let mut errors = Vec::new();
        let pairs = assign_named_values(raw(&["--x", "1", "--x", "2"]), &mut errors);
        assert_eq!(
            pairs,
            vec![
                ("x".to_string(), Some("1".to_string())),
                ("x".to_string(), Some("2".to_string())),
            ]
        );
    }
}
