//! Interpretation of the raw command-line token list.
//!
//! The first token decides the operation: a flag selects a store mutation or
//! the listing, a plain input names an alias to invoke, and no tokens at all
//! is a no-op. Tokens after the first are taken verbatim.

use crate::error::{LalError, Result};
use crate::segment::parse_non_negative;

/// Upper bound on the number of tokens accepted in one invocation.
pub const MAX_SUB_COMMANDS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubCommandKind {
    Input,
    Flag,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCommand {
    pub kind: SubCommandKind,
    /// The token as typed.
    pub raw: String,
}

impl SubCommand {
    /// Token text with exactly one leading `-` removed from flags.
    pub fn contents(&self) -> &str {
        match self.kind {
            SubCommandKind::Flag => &self.raw[1..],
            SubCommandKind::Input | SubCommandKind::Empty => &self.raw,
        }
    }
}

/// Classify raw arguments (program name already removed).
pub fn tokenize(args: &[String]) -> Result<Vec<SubCommand>> {
    if args.len() > MAX_SUB_COMMANDS {
        return Err(LalError::TooManySubcommands {
            max: MAX_SUB_COMMANDS,
            got: args.len(),
        });
    }
    if args.is_empty() {
        return Ok(vec![SubCommand {
            kind: SubCommandKind::Empty,
            raw: String::new(),
        }]);
    }
    Ok(args
        .iter()
        .map(|raw| SubCommand {
            kind: if raw.starts_with('-') {
                SubCommandKind::Flag
            } else {
                SubCommandKind::Input
            },
            raw: raw.clone(),
        })
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Append,
    Truncate,
    Delete,
    Rename,
    Overwrite,
    List,
}

impl Flag {
    /// Match flag contents (one `-` already stripped) against the long and
    /// short spellings, e.g. `-append` or `a`.
    pub fn from_contents(contents: &str) -> Result<Self> {
        match contents {
            "-append" | "a" => Ok(Flag::Append),
            "-truncate" | "t" => Ok(Flag::Truncate),
            "-delete" | "d" => Ok(Flag::Delete),
            "-rename" | "rn" => Ok(Flag::Rename),
            "-overwrite" | "ow" => Ok(Flag::Overwrite),
            "-list" | "l" => Ok(Flag::List),
            other => Err(LalError::UnknownFlag(other.to_string())),
        }
    }

    /// Minimum and maximum number of tokens following the flag.
    fn arity(self) -> (usize, Option<usize>) {
        match self {
            Flag::Append | Flag::Overwrite => (2, None),
            Flag::Truncate => (1, Some(2)),
            Flag::Delete => (1, Some(1)),
            Flag::Rename => (2, Some(2)),
            Flag::List => (0, Some(0)),
        }
    }
}

/// One fully interpreted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Noop,
    List,
    Append { name: String, lines: Vec<String> },
    Truncate { name: String, count: usize },
    Delete { name: String },
    Rename { name: String, new_name: String },
    Overwrite { name: String, lines: Vec<String> },
    Invoke { name: String, args: Vec<String> },
}

impl Request {
    pub fn parse(args: &[String]) -> Result<Self> {
        Self::from_sub_commands(&tokenize(args)?)
    }

    pub fn from_sub_commands(cmds: &[SubCommand]) -> Result<Self> {
        let Some((first, rest)) = cmds.split_first() else {
            return Ok(Request::Noop);
        };
        let rest: Vec<String> = rest.iter().map(|c| c.raw.clone()).collect();

        match first.kind {
            SubCommandKind::Empty => Ok(Request::Noop),
            SubCommandKind::Input => Ok(Request::Invoke {
                name: first.raw.clone(),
                args: rest,
            }),
            SubCommandKind::Flag => {
                let flag = Flag::from_contents(first.contents())?;
                check_arity(flag, rest.len())?;
                build(flag, rest)
            }
        }
    }

    /// Whether a successful run of this request must rewrite the store.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Request::Append { .. }
                | Request::Truncate { .. }
                | Request::Delete { .. }
                | Request::Rename { .. }
                | Request::Overwrite { .. }
        )
    }
}

fn check_arity(flag: Flag, got: usize) -> Result<()> {
    let (min, max) = flag.arity();
    if got < min {
        return Err(LalError::InsufficientInputs { expected: min, got });
    }
    if let Some(max) = max {
        if got > max {
            return Err(LalError::TooManySubcommands { max, got });
        }
    }
    Ok(())
}

fn build(flag: Flag, rest: Vec<String>) -> Result<Request> {
    let request = match (flag, rest.as_slice()) {
        (Flag::List, []) => Request::List,
        (Flag::Delete, [name]) => Request::Delete { name: name.clone() },
        (Flag::Rename, [name, new_name]) => Request::Rename {
            name: name.clone(),
            new_name: new_name.clone(),
        },
        (Flag::Truncate, [name]) => Request::Truncate {
            name: name.clone(),
            count: 1,
        },
        (Flag::Truncate, [name, count]) => Request::Truncate {
            name: name.clone(),
            count: parse_count(count)?,
        },
        (Flag::Append, [name, lines @ ..]) => Request::Append {
            name: name.clone(),
            lines: lines.to_vec(),
        },
        (Flag::Overwrite, [name, lines @ ..]) => Request::Overwrite {
            name: name.clone(),
            lines: lines.to_vec(),
        },
        (_, _) => {
            return Err(LalError::InsufficientInputs {
                expected: flag.arity().0,
                got: rest.len(),
            })
        }
    };
    Ok(request)
}

fn parse_count(raw: &str) -> Result<usize> {
    parse_non_negative(raw.as_bytes()).ok_or_else(|| LalError::BadNumericalInput(raw.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn parse(list: &[&str]) -> Result<Request> {
        Request::parse(&args(list))
    }

    #[test]
    fn no_tokens_is_single_empty_token() {
        let cmds = tokenize(&[]).unwrap();
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].kind, SubCommandKind::Empty);
        assert_eq!(parse(&[]).unwrap(), Request::Noop);
    }

    #[test]
    fn flag_contents_drop_one_dash() {
        let cmds = tokenize(&args(&["--append", "-a", "x"])).unwrap();
        assert_eq!(cmds[0].kind, SubCommandKind::Flag);
        assert_eq!(cmds[0].contents(), "-append");
        assert_eq!(cmds[1].contents(), "a");
        assert_eq!(cmds[2].kind, SubCommandKind::Input);
    }

    #[test]
    fn long_and_short_spellings() {
        for (spelling, flag) in [
            ("--append", Flag::Append),
            ("-a", Flag::Append),
            ("--truncate", Flag::Truncate),
            ("-t", Flag::Truncate),
            ("--delete", Flag::Delete),
            ("-d", Flag::Delete),
            ("--rename", Flag::Rename),
            ("-rn", Flag::Rename),
            ("--overwrite", Flag::Overwrite),
            ("-ow", Flag::Overwrite),
            ("--list", Flag::List),
            ("-l", Flag::List),
        ] {
            assert_eq!(Flag::from_contents(&spelling[1..]).unwrap(), flag, "{spelling}");
        }
    }

    #[test]
    fn unknown_flag() {
        assert!(matches!(
            parse(&["-x", "a"]).unwrap_err(),
            LalError::UnknownFlag(f) if f == "x"
        ));
        // Single-dash long spelling is not accepted.
        assert!(parse(&["-append", "a", "b"]).is_err());
    }

    #[test]
    fn append_request() {
        assert_eq!(
            parse(&["-a", "build", "gcc <<0>>", "./a.out"]).unwrap(),
            Request::Append {
                name: "build".into(),
                lines: args(&["gcc <<0>>", "./a.out"]),
            }
        );
    }

    #[test]
    fn append_needs_a_line() {
        assert!(matches!(
            parse(&["-a", "build"]).unwrap_err(),
            LalError::InsufficientInputs {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn line_tokens_keep_leading_dash() {
        assert_eq!(
            parse(&["build", "-o", "out"]).unwrap(),
            Request::Invoke {
                name: "build".into(),
                args: args(&["-o", "out"]),
            }
        );
    }

    #[test]
    fn truncate_defaults_to_one() {
        assert_eq!(
            parse(&["-t", "build"]).unwrap(),
            Request::Truncate {
                name: "build".into(),
                count: 1
            }
        );
        assert_eq!(
            parse(&["--truncate", "build", "3"]).unwrap(),
            Request::Truncate {
                name: "build".into(),
                count: 3
            }
        );
    }

    #[test]
    fn truncate_rejects_bad_count() {
        for bad in ["x", "-1", "1.5", ""] {
            assert!(
                matches!(
                    parse(&["-t", "build", bad]).unwrap_err(),
                    LalError::BadNumericalInput(_)
                ),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn extra_tokens_rejected() {
        assert!(matches!(
            parse(&["-d", "a", "b"]).unwrap_err(),
            LalError::TooManySubcommands { max: 1, got: 2 }
        ));
        assert!(matches!(
            parse(&["-l", "a"]).unwrap_err(),
            LalError::TooManySubcommands { max: 0, got: 1 }
        ));
    }

    #[test]
    fn rename_needs_two_names() {
        assert!(matches!(
            parse(&["-rn", "a"]).unwrap_err(),
            LalError::InsufficientInputs { .. }
        ));
        assert_eq!(
            parse(&["-rn", "a", "b"]).unwrap(),
            Request::Rename {
                name: "a".into(),
                new_name: "b".into()
            }
        );
    }

    #[test]
    fn token_capacity() {
        let many = vec!["x".to_string(); MAX_SUB_COMMANDS + 1];
        assert!(matches!(
            Request::parse(&many).unwrap_err(),
            LalError::TooManySubcommands { .. }
        ));
    }

    #[test]
    fn mutation_classification() {
        assert!(parse(&["-d", "a"]).unwrap().is_mutation());
        assert!(!parse(&["-l"]).unwrap().is_mutation());
        assert!(!parse(&["a"]).unwrap().is_mutation());
        assert!(!parse(&[]).unwrap().is_mutation());
    }
}
