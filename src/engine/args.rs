//! Creation arguments.
//!
//! Operators are created from a short list of atoms, the way they would be
//! typed into an object box: `dust~ -seed 12 40` is a dust generator seeded
//! with 12 and firing 40 times per second. Flags come first, then positional
//! numbers. Anything else fails construction with a single diagnostic.
//!
//! Each operator names the flags it takes: `-seed <n>` for the random
//! generators, `-exp <n>` for `glide2~`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::BuildError;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Float(f32),
    Symbol(String),
}

impl From<f32> for Atom {
    fn from(value: f32) -> Self {
        Atom::Float(value)
    }
}

impl From<&str> for Atom {
    fn from(value: &str) -> Self {
        Atom::Symbol(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Seed,
    Exp,
}

impl Flag {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-seed" => Some(Flag::Seed),
            "-exp" => Some(Flag::Exp),
            _ => None,
        }
    }
}

/// Arguments after flag extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    pub seed: Option<f32>,
    pub exp: Option<f32>,
    pub floats: Vec<f32>,
}

impl ParsedArgs {
    /// Positional float `index`, or `default` when it was not given.
    pub fn float(&self, index: usize, default: f32) -> f32 {
        self.floats.get(index).copied().unwrap_or(default)
    }
}

/// Split `args` into the leading `flags` the operator accepts and at most
/// `max_floats` positional numbers.
pub fn parse(
    object: &'static str,
    args: &[Atom],
    flags: &[Flag],
    max_floats: usize,
) -> Result<ParsedArgs, BuildError> {
    let result = parse_inner(object, args, flags, max_floats);
    if let Err(err) = &result {
        log::error!("{err}");
    }
    result
}

fn parse_inner(
    object: &'static str,
    args: &[Atom],
    flags: &[Flag],
    max_floats: usize,
) -> Result<ParsedArgs, BuildError> {
    let mut parsed = ParsedArgs::default();
    let mut rest = args;

    while let Some(Atom::Symbol(flag)) = rest.first() {
        if !flag.starts_with('-') {
            return Err(BuildError::ImproperArgs { object });
        }
        let kind = match Flag::from_symbol(flag) {
            Some(kind) if flags.contains(&kind) => kind,
            _ => {
                return Err(BuildError::UnknownFlag {
                    object,
                    flag: flag.clone(),
                })
            }
        };
        let Some(Atom::Float(value)) = rest.get(1) else {
            return Err(BuildError::ImproperArgs { object });
        };
        match kind {
            Flag::Seed => {
                if !value.is_finite() || *value < 0.0 {
                    return Err(BuildError::InvalidSeed {
                        object,
                        value: *value,
                    });
                }
                parsed.seed = Some(*value);
            }
            Flag::Exp => parsed.exp = Some(*value),
        }
        rest = &rest[2..];
    }

    for atom in rest {
        match atom {
            Atom::Float(value) => parsed.floats.push(*value),
            Atom::Symbol(_) => return Err(BuildError::ImproperArgs { object }),
        }
    }

    if parsed.floats.len() > max_floats {
        return Err(BuildError::ImproperArgs { object });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_flag_then_floats() {
        let args = [Atom::from("-seed"), Atom::Float(12.0), Atom::Float(40.0)];
        let parsed = parse("dust~", &args, &[Flag::Seed], 1).unwrap();
        assert_eq!(parsed.seed, Some(12.0));
        assert_eq!(parsed.floats, vec![40.0]);
        assert_eq!(parsed.float(0, 0.0), 40.0);
        assert_eq!(parsed.float(1, 7.0), 7.0);
    }

    #[test]
    fn out_of_range_seed_fails() {
        let args = [Atom::from("-seed"), Atom::Float(-1.0)];
        assert_eq!(
            parse("gray~", &args, &[Flag::Seed], 0),
            Err(BuildError::InvalidSeed {
                object: "gray~",
                value: -1.0
            })
        );

        let args = [Atom::from("-seed"), Atom::Float(f32::INFINITY)];
        assert!(matches!(
            parse("gray~", &args, &[Flag::Seed], 0),
            Err(BuildError::InvalidSeed { .. })
        ));
    }

    #[test]
    fn malformed_flags_fail() {
        let missing_value = [Atom::from("-seed")];
        assert_eq!(
            parse("dust~", &missing_value, &[Flag::Seed], 1),
            Err(BuildError::ImproperArgs { object: "dust~" })
        );

        let unknown = [Atom::from("-db")];
        assert!(matches!(
            parse("lag~", &unknown, &[], 1),
            Err(BuildError::UnknownFlag { .. })
        ));

        let seed_not_accepted = [Atom::from("-seed"), Atom::Float(3.0)];
        assert!(matches!(
            parse("lag~", &seed_not_accepted, &[], 1),
            Err(BuildError::UnknownFlag { .. })
        ));
    }

    #[test]
    fn exp_flag_takes_a_float() {
        let args = [Atom::from("-exp"), Atom::Float(2.0), Atom::Float(10.0)];
        let parsed = parse("glide2~", &args, &[Flag::Exp], 2).unwrap();
        assert_eq!(parsed.exp, Some(2.0));
        assert_eq!(parsed.seed, None);
        assert_eq!(parsed.floats, vec![10.0]);

        let missing_value = [Atom::from("-exp")];
        assert_eq!(
            parse("glide2~", &missing_value, &[Flag::Exp], 2),
            Err(BuildError::ImproperArgs { object: "glide2~" })
        );

        let symbol_value = [Atom::from("-exp"), Atom::from("fast")];
        assert!(parse("glide2~", &symbol_value, &[Flag::Exp], 2).is_err());

        let not_accepted = [Atom::from("-exp"), Atom::Float(2.0)];
        assert!(matches!(
            parse("dust~", &not_accepted, &[Flag::Seed], 1),
            Err(BuildError::UnknownFlag { .. })
        ));
    }

    #[test]
    fn too_many_or_misplaced_args_fail() {
        let too_many = [Atom::Float(1.0), Atom::Float(2.0)];
        assert!(parse("lag~", &too_many, &[], 1).is_err());

        let symbol_after_float = [Atom::Float(1.0), Atom::from("-seed"), Atom::Float(2.0)];
        assert!(parse("dust~", &symbol_after_float, &[Flag::Seed], 2).is_err());

        let bare_symbol = [Atom::from("fast")];
        assert!(parse("lag~", &bare_symbol, &[], 1).is_err());
    }
}
