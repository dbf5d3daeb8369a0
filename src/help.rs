use std::cmp::Ordering;

use crate::identifier::Identifier;

/// One logged declaration, recorded as the host resolves its parameters.
#[derive(Debug, Clone)]
pub(crate) struct LogEntry {
    pub id: Identifier,
    pub descr: String,
    /// Type placeholder shown in help; empty for flags and sequences.
    pub type_name: &'static str,
    /// Default value rendered as text; empty when none was declared.
    pub default: String,
    pub optional: bool,
}

/// Passively gathers declared parameters for later help display. Not part
/// of the resolution algorithm.
#[derive(Debug, Default)]
pub(crate) struct HelpLogger {
    params: Vec<LogEntry>,
}

impl HelpLogger {
    pub fn log(&mut self, mut entry: LogEntry) {
        entry.optional |= !entry.default.is_empty();
        self.params.push(entry);
    }

    /// Render the usage and options blocks shown for `-h`/`--help`.
    /// Required parameters sort before optional ones, the catch-all and
    /// bare positionals last, the rest by name.
    pub fn render(&self, executable: &str) -> String {
        let mut printed: Vec<&LogEntry> = self.params.iter().collect();
        printed.sort_by(|a, b| {
            if a.optional != b.optional {
                return a.optional.cmp(&b.optional);
            }
            let (ka, kb) = (a.id.sort_key(), b.id.sort_key());
            match (ka.is_empty(), kb.is_empty()) {
                (false, true) => Ordering::Less,
                (true, false) => Ordering::Greater,
                _ => ka.cmp(&kb),
            }
        });

        let margin = printed
            .iter()
            .map(|entry| printable(entry, true).chars().count())
            .max()
            .unwrap_or(0);

        let mut usage = format!("    Usage:\n      {executable}");
        let mut options = String::from("    Options:\n");
        for entry in &printed {
            usage.push(' ');
            usage.push_str(&printable(entry, false));

            let line = printable(entry, true);
            options.push_str("      ");
            options.push_str(&line);
            options.push_str(&" ".repeat(2 + margin - line.chars().count()));
            options.push_str(&entry.descr);
            if !entry.default.is_empty() {
                options.push_str(&format!(" [default: {}]", entry.default));
            }
            options.push('\n');
        }

        format!("\n{usage}\n\n\n{options}")
    }
}

fn printable(entry: &LogEntry, verbose: bool) -> String {
    let mut out = String::new();
    let bracketed = entry.optional || entry.type_name.is_empty();
    if bracketed {
        out.push('[');
    }
    out.push_str(&if verbose {
        entry.id.help()
    } else {
        entry.id.longer()
    });
    if !entry.type_name.is_empty() {
        out.push_str("=<");
        out.push_str(entry.type_name);
        out.push('>');
    }
    if bracketed {
        out.push(']');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: Identifier, type_name: &'static str, default: &str, optional: bool) -> LogEntry {
        LogEntry {
            id,
            descr: "descr".to_string(),
            type_name,
            default: default.to_string(),
            optional,
        }
    }

    #[test]
    fn test_required_sort_before_optional_and_catch_all_last() {
        let mut logger = HelpLogger::default();
        logger.log(entry(Identifier::all(), "", "", true));
        logger.log(entry(Identifier::named("beta"), "INTEGER", "7", false));
        logger.log(entry(Identifier::named("alpha"), "STRING", "", false));

        let help = logger.render("prog");
        let alpha = help.find("--alpha").unwrap();
        let beta = help.find("--beta").unwrap();
        let dots = help.find("[...]").unwrap();
        assert!(alpha < beta, "help text:\n{help}");
        assert!(beta < dots, "help text:\n{help}");
        assert!(help.contains("[default: 7]"));
    }

    #[test]
    fn test_usage_line_shows_executable_and_types() {
        let mut logger = HelpLogger::default();
        logger.log(entry(Identifier::pair('c', "count"), "INTEGER", "", false));

        let help = logger.render("prog");
        assert!(help.contains("      prog --count=<INTEGER>"));
        assert!(help.contains("-c|--count=<INTEGER>"));
    }
}
