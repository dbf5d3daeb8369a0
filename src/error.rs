use thiserror::Error;

/// Result type for argument resolution
pub type Result<T> = std::result::Result<T, Error>;

/// Exit code used when a resolution failure is reported
pub const FAILURE_CODE: i32 = 1;

/// An error recorded while resolving the argument set
///
/// These are user-input errors: they are collected in the resolver's
/// deferred log and only the first one is surfaced once the full argument
/// set has been declared. Programmer errors (malformed declarations,
/// double-queried identifiers) panic instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Free positional tokens were given but the invocation accepts none
    #[error("positional arguments given, but not accepted")]
    PositionalNotAccepted,

    /// A positional identifier was queried while positional mode is off
    #[error("positional argument {id} used in non-positional mode")]
    PositionalQuery { id: String },

    /// A single-hyphen multi-character token carried an `=` assignment
    #[error("expanding single-hyphen arguments must not have value")]
    SingleHyphenValue { token: String },

    /// A single-character name was spelled with two hyphens
    #[error("single character parameter {name} must have exactly one hyphen")]
    ShortNameDoubleHyphen { name: String },

    /// A bare flag match was coerced into a value-bearing type
    #[error("argument {id} must have value")]
    MissingValue { id: String },

    /// Integer coercion did not consume the whole token
    #[error("value {value} is not an integer")]
    NotAnInteger { value: String },

    /// Real-number coercion failed
    #[error("value {value} is not a real number")]
    NotAReal { value: String },

    /// A boolean flag carried a value
    #[error("flag {id} must not have value")]
    FlagWithValue { id: String },

    /// No matching token and no declared default
    #[error("Required argument {id} not provided")]
    MissingRequired { id: String },

    /// Tokens left unclaimed by every declared identifier
    #[error("{}", list_unclaimed(.tokens))]
    InvalidArguments { tokens: Vec<String> },

    /// Help was requested; carries the rendered usage text
    #[error("{0}")]
    Help(String),
}

fn list_unclaimed(tokens: &[String]) -> String {
    let plural = if tokens.len() == 1 { "" } else { "s" };
    format!("Invalid argument{} {}", plural, tokens.join(" "))
}

impl Error {
    /// Returns true if this is a help request
    pub fn is_help(&self) -> bool {
        matches!(self, Error::Help(_))
    }

    /// Exit the program with the appropriate status code
    ///
    /// Prints help to stderr with exit code 0, prints errors to stderr
    /// with the failure code.
    pub fn exit(&self) -> ! {
        if self.is_help() {
            eprintln!("{}", self);
            std::process::exit(0);
        }
        eprintln!("Error: {}", self);
        std::process::exit(FAILURE_CODE)
    }
}
