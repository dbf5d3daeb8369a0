mod error;
mod help;
mod identifier;
mod parser;

pub use error::{Error, FAILURE_CODE, Result};
pub use identifier::Identifier;

use std::env;
use std::fmt;

use log::debug;

use help::{HelpLogger, LogEntry};
use parser::{assign_named_values, separate_named_positional, split_equations};

/// A default value attached to a declaration
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// An integer default
    Int(i64),
    /// A real-number default
    Float(f64),
    /// A string default
    Str(String),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Int(v) => write!(f, "{v}"),
            DefaultValue::Float(v) => write!(f, "{v}"),
            DefaultValue::Str(v) => f.write_str(v),
        }
    }
}

impl From<i64> for DefaultValue {
    fn from(v: i64) -> Self {
        DefaultValue::Int(v)
    }
}

impl From<f64> for DefaultValue {
    fn from(v: f64) -> Self {
        DefaultValue::Float(v)
    }
}

impl From<&str> for DefaultValue {
    fn from(v: &str) -> Self {
        DefaultValue::Str(v.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(v: String) -> Self {
        DefaultValue::Str(v)
    }
}

/// Declaration of a single parameter: its spellings, a description shown
/// in help output, and an optional default value
#[derive(Debug, Clone)]
pub struct Arg {
    id: Identifier,
    descr: String,
    default: Option<DefaultValue>,
}

impl Arg {
    /// Create a declaration for the given identifier
    pub fn new(id: Identifier) -> Self {
        Self {
            id,
            descr: String::new(),
            default: None,
        }
    }

    /// Set the help description
    pub fn help(mut self, descr: impl Into<String>) -> Self {
        self.descr = descr.into();
        self
    }

    /// Set the default value used when no matching token is present
    pub fn default(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Convenience function declaring a named parameter; a single character
/// is a short name, anything longer a long name
#[inline]
pub fn arg(name: &str) -> Arg {
    Arg::new(Identifier::named(name))
}

/// Convenience function declaring a short/long spelling pair
#[inline]
pub fn pair(short: char, long: &str) -> Arg {
    Arg::new(Identifier::pair(short, long))
}

/// Convenience function declaring a positional parameter by 0-based index
#[inline]
pub fn pos(index: usize) -> Arg {
    Arg::new(Identifier::index(index))
}

/// Convenience function declaring the catch-all over every positional
/// argument
#[inline]
pub fn all() -> Arg {
    Arg::new(Identifier::all())
}

/// Outcome of looking an identifier up in the parsed buckets
#[derive(Debug, Clone, PartialEq)]
enum Resolved {
    /// Matched a pair carrying a value
    Value(String),
    /// Matched a bare flag
    Present,
    /// No matching token
    Absent,
}

/// Types a token can be coerced into
///
/// Implemented for `i64`, `f64` and `String`. Booleans are structurally
/// different and go through [`Resolver::get_flag`]; sequences through
/// [`Resolver::get_list`].
pub trait FromToken: Sized + Default {
    /// Type placeholder shown in help output
    const TYPE_NAME: &'static str;

    /// Strict parse of a raw token; the whole token must be consumed
    fn parse_token(token: &str) -> Result<Self>;

    /// Extract this type from a declared default, if compatible
    fn from_default(default: &DefaultValue) -> Option<Self>;
}

impl FromToken for i64 {
    const TYPE_NAME: &'static str = "INTEGER";

    fn parse_token(token: &str) -> Result<Self> {
        token.parse().map_err(|_| Error::NotAnInteger {
            value: token.to_string(),
        })
    }

    fn from_default(default: &DefaultValue) -> Option<Self> {
        match default {
            DefaultValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromToken for f64 {
    const TYPE_NAME: &'static str = "REAL";

    fn parse_token(token: &str) -> Result<Self> {
        token.parse().map_err(|_| Error::NotAReal {
            value: token.to_string(),
        })
    }

    fn from_default(default: &DefaultValue) -> Option<Self> {
        match default {
            DefaultValue::Float(v) => Some(*v),
            DefaultValue::Int(v) => Some(*v as f64),
            DefaultValue::Str(_) => None,
        }
    }
}

impl FromToken for String {
    const TYPE_NAME: &'static str = "STRING";

    fn parse_token(token: &str) -> Result<Self> {
        Ok(token.to_string())
    }

    fn from_default(default: &DefaultValue) -> Option<Self> {
        match default {
            DefaultValue::Str(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// Resolution state for one process invocation
///
/// Holds the parsed named/positional buckets, the set of identifiers
/// queried so far, and the deferred error log. Constructed once per
/// invocation, threaded through every declaration call, and finished with
/// [`Resolver::finish`] once the declared parameter count is exhausted.
///
/// Buckets are read-only after construction; the query set and error log
/// only grow.
#[derive(Debug)]
pub struct Resolver {
    executable: String,
    positional: Vec<String>,
    named: Vec<(String, Option<String>)>,
    queried: Vec<Identifier>,
    deferred: Vec<Error>,
    remaining: usize,
    positional_mode: bool,
    help_flag: bool,
    checked: bool,
    help: HelpLogger,
}

impl Resolver {
    /// Build a resolver from the process arguments. `declared` is the
    /// number of parameters the host will resolve; `positional_mode`
    /// chooses whether free positional arguments are accepted at all.
    pub fn from_env(declared: usize, positional_mode: bool) -> Self {
        Self::new(env::args().collect(), declared, positional_mode)
    }

    /// Build a resolver from an explicit argument vector. Token 0 is the
    /// executable name, used only for help display.
    pub fn new(argv: Vec<String>, declared: usize, positional_mode: bool) -> Self {
        let mut argv = argv.into_iter();
        let executable = argv.next().unwrap_or_default();
        let raw: Vec<String> = argv.collect();

        let mut deferred = Vec::new();
        let (named, positional) = separate_named_positional(&raw, positional_mode);
        let named = split_equations(named, &mut deferred);
        let named = assign_named_values(named, &mut deferred);

        if !positional_mode && !positional.is_empty() {
            deferred.push(Error::PositionalNotAccepted);
        }

        let mut resolver = Self {
            executable,
            positional,
            named,
            queried: Vec::new(),
            deferred,
            remaining: declared,
            positional_mode,
            help_flag: false,
            checked: false,
            help: HelpLogger::default(),
        };

        // claims -h/--help so validation never flags them as unclaimed
        let help_id = Identifier::pair('h', "help");
        resolver.help_flag = resolver.lookup(&help_id) != Resolved::Absent;
        resolver.checkpoint(false);
        resolver
    }

    /// Executable name from token 0
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Number of free positional tokens parsed for this invocation
    pub fn positional_len(&self) -> usize {
        self.positional.len()
    }

    /// Deferred user-input errors accumulated so far
    pub fn deferred(&self) -> &[Error] {
        &self.deferred
    }

    /// Resolve a declared parameter as an integer. Missing without a
    /// default is a deferred error; the zero value is returned to keep
    /// the host's flow going.
    pub fn get_integer(&mut self, arg: Arg) -> i64 {
        self.log_declaration(&arg, i64::TYPE_NAME, false);
        self.convert(&arg, true)
    }

    /// Resolve as an optional integer. The declaration must not carry a
    /// default.
    pub fn get_integer_opt(&mut self, arg: Arg) -> Option<i64> {
        self.log_declaration(&arg, i64::TYPE_NAME, true);
        self.convert_optional(&arg)
    }

    /// Resolve a declared parameter as a real number. An integer default
    /// satisfies it.
    pub fn get_float(&mut self, arg: Arg) -> f64 {
        self.log_declaration(&arg, f64::TYPE_NAME, false);
        self.convert(&arg, true)
    }

    /// Resolve as an optional real number. The declaration must not carry
    /// a default.
    pub fn get_float_opt(&mut self, arg: Arg) -> Option<f64> {
        self.log_declaration(&arg, f64::TYPE_NAME, true);
        self.convert_optional(&arg)
    }

    /// Resolve a declared parameter as a string.
    pub fn get_string(&mut self, arg: Arg) -> String {
        self.log_declaration(&arg, String::TYPE_NAME, false);
        self.convert(&arg, true)
    }

    /// Resolve as an optional string. The declaration must not carry a
    /// default.
    pub fn get_string_opt(&mut self, arg: Arg) -> Option<String> {
        self.log_declaration(&arg, String::TYPE_NAME, true);
        self.convert_optional(&arg)
    }

    /// Resolve a boolean flag: true iff the flag is present on the
    /// command line. A flag takes no value and must not declare a default.
    pub fn get_flag(&mut self, arg: Arg) -> bool {
        assert!(
            arg.default.is_none(),
            "{} flag parameter must not have default value",
            arg.id.longer()
        );
        self.log_declaration(&arg, "", true);
        let resolved = self.lookup(&arg.id);
        if matches!(resolved, Resolved::Value(_)) {
            self.deferred.push(Error::FlagWithValue {
                id: arg.id.longer(),
            });
        }
        self.checkpoint(true);
        resolved == Resolved::Present
    }

    /// Resolve the catch-all declaration as the ordered sequence of every
    /// positional argument, each coerced to `T`. This queries every
    /// positional index, so the final validation sees them all claimed.
    pub fn get_list<T: FromToken>(&mut self, arg: Arg) -> Vec<T> {
        assert!(
            arg.id.is_all(),
            "sequence conversion requires the catch-all identifier"
        );
        let count = self.positional.len();
        let mut items = Vec::with_capacity(count);
        for index in 0..count {
            items.push(self.convert::<T>(&Arg::new(Identifier::index(index)), false));
        }
        self.log_declaration(&arg, "", true);
        self.checkpoint(true);
        items
    }

    /// Finalize and report: runs the end-of-parsing validation if the
    /// declared count never exhausted it, then returns the rendered help
    /// text if `-h`/`--help` was given, the first deferred error
    /// otherwise, or success.
    pub fn finish(mut self) -> Result<()> {
        if !self.checked {
            self.remaining = 0;
            self.checkpoint(false);
        }
        if self.help_flag {
            return Err(Error::Help(self.help.render(&self.executable)));
        }
        match self.deferred.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Look an identifier up across the buckets and add it to the query
    /// set. Overlapping a previously queried identifier is a programmer
    /// error and panics.
    fn lookup(&mut self, id: &Identifier) -> Resolved {
        if !self.positional_mode && id.pos().is_some() {
            self.deferred.push(Error::PositionalQuery { id: id.longer() });
        }

        for queried in &self.queried {
            assert!(
                !queried.overlaps(id),
                "double query for argument {}",
                id.longer()
            );
        }
        self.queried.push(id.clone());

        for (name, value) in &self.named {
            if id.contains_name(name) {
                return match value {
                    Some(value) => Resolved::Value(value.clone()),
                    None => Resolved::Present,
                };
            }
        }

        if let Some(pos) = id.pos()
            && let Some(value) = self.positional.get(pos)
        {
            return Resolved::Value(value.clone());
        }

        Resolved::Absent
    }

    /// Decrement the remaining-parameter counter and, once it reaches
    /// zero, validate that every parsed token was claimed by some queried
    /// identifier. The validation runs at most once.
    fn checkpoint(&mut self, decrement: bool) {
        if decrement {
            self.remaining = self.remaining.saturating_sub(1);
        }
        if self.remaining > 0 || self.checked {
            return;
        }
        self.checked = true;

        let mut unclaimed: Vec<String> = Vec::new();
        for (name, _) in &self.named {
            if !self.queried.iter().any(|id| id.contains_name(name)) {
                unclaimed.push(name.clone());
            }
        }
        for (pos, token) in self.positional.iter().enumerate() {
            if !self.queried.iter().any(|id| id.contains_pos(pos)) {
                unclaimed.push(token.clone());
            }
        }

        if !unclaimed.is_empty() {
            debug!("unclaimed tokens at checkpoint: {unclaimed:?}");
            self.deferred
                .push(Error::InvalidArguments { tokens: unclaimed });
        }
    }

    /// Required coercion: missing with no default defers an error and
    /// yields the zero value.
    fn convert<T: FromToken>(&mut self, arg: &Arg, decrement: bool) -> T {
        let value = self.convert_raw::<T>(arg);
        if value.is_none() {
            self.deferred.push(Error::MissingRequired {
                id: arg.id.longer(),
            });
        }
        self.checkpoint(decrement);
        value.unwrap_or_default()
    }

    /// Optional coercion: declaring a default alongside it is a
    /// programmer error.
    fn convert_optional<T: FromToken>(&mut self, arg: &Arg) -> Option<T> {
        assert!(
            arg.default.is_none(),
            "optional argument {} must not have default value",
            arg.id.longer()
        );
        let value = self.convert_raw::<T>(arg);
        self.checkpoint(true);
        value
    }

    /// Coercion core: look the identifier up, strictly parse a carried
    /// value, fall back to the declared default. A parse failure is
    /// recorded once and yields the zero value rather than cascading into
    /// a missing-argument error.
    fn convert_raw<T: FromToken>(&mut self, arg: &Arg) -> Option<T> {
        match self.lookup(&arg.id) {
            Resolved::Value(value) => match T::parse_token(&value) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    self.deferred.push(err);
                    Some(T::default())
                }
            },
            Resolved::Present => {
                self.deferred.push(Error::MissingValue {
                    id: arg.id.longer(),
                });
                arg.default.as_ref().and_then(T::from_default)
            }
            Resolved::Absent => arg.default.as_ref().and_then(T::from_default),
        }
    }

    fn log_declaration(&mut self, arg: &Arg, type_name: &'static str, optional: bool) {
        self.help.log(LogEntry {
            id: arg.id.clone(),
            descr: arg.descr.clone(),
            type_name,
            default: arg
                .default
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            optional,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_parse_is_strict() {
        assert_eq!(i64::parse_token("12"), Ok(12));
        assert!(i64::parse_token("12.5").is_err());
        assert!(i64::parse_token("12x").is_err());
    }

    #[test]
    fn test_real_parse_accepts_integer_text() {
        assert_eq!(f64::parse_token("12"), Ok(12.0));
        assert_eq!(f64::parse_token("12.5"), Ok(12.5));
        assert!(f64::parse_token("twelve").is_err());
    }

    #[test]
    fn test_default_value_compatibility() {
        assert_eq!(i64::from_default(&DefaultValue::Int(3)), Some(3));
        assert_eq!(i64::from_default(&DefaultValue::Float(3.0)), None);
        assert_eq!(f64::from_default(&DefaultValue::Int(3)), Some(3.0));
        assert_eq!(
            String::from_default(&DefaultValue::Str("s".to_string())),
            Some("s".to_string())
        );
        assert_eq!(String::from_default(&DefaultValue::Int(3)), None);
    }
}
