use crate::value::Value;
use derive_more::Display;

///
/// Constraint
///
/// Acceptance check on a single schema field. Constraints only apply to
/// non-null values of the matching shape; a constraint on the wrong shape
/// fails.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum Constraint {
    /// Text of `prefix` followed by exactly `len` ASCII digits.
    #[display("digits({prefix}, {len})")]
    Digits { prefix: &'static str, len: usize },
    #[display("ge({_0})")]
    Ge(i64),
    #[display("le({_0})")]
    Le(i64),
    /// Maximum length, in characters for text and elements for lists.
    #[display("max_len({_0})")]
    MaxLen(usize),
    #[display("min_len({_0})")]
    MinLen(usize),
    #[display("one_of({})", _0.join(", "))]
    OneOf(&'static [&'static str]),
}

impl Constraint {
    pub fn check(&self, value: &Value) -> Result<(), String> {
        match *self {
            Self::Digits { prefix, len } => {
                let text = require_text(value, self)?;
                let ok = text
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.len() == len && rest.bytes().all(|b| b.is_ascii_digit()));

                if ok {
                    Ok(())
                } else {
                    Err(format!("'{text}' must be '{prefix}' followed by {len} digits"))
                }
            }
            Self::Ge(min) => match value.as_int() {
                Some(n) if n >= min => Ok(()),
                Some(n) => Err(format!("{n} must be >= {min}")),
                None => Err(wrong_shape(value, self)),
            },
            Self::Le(max) => match value.as_int() {
                Some(n) if n <= max => Ok(()),
                Some(n) => Err(format!("{n} must be <= {max}")),
                None => Err(wrong_shape(value, self)),
            },
            Self::MaxLen(max) => {
                let len = length(value, self)?;
                if len <= max {
                    Ok(())
                } else {
                    Err(format!("length {len} exceeds {max}"))
                }
            }
            Self::MinLen(min) => {
                let len = length(value, self)?;
                if len >= min {
                    Ok(())
                } else {
                    Err(format!("length {len} is below {min}"))
                }
            }
            Self::OneOf(allowed) => {
                let text = require_text(value, self)?;
                if allowed.contains(&text) {
                    Ok(())
                } else {
                    Err(format!("'{text}' is not one of the allowed values"))
                }
            }
        }
    }
}

fn require_text<'a>(value: &'a Value, constraint: &Constraint) -> Result<&'a str, String> {
    value.as_text().ok_or_else(|| wrong_shape(value, constraint))
}

fn length(value: &Value, constraint: &Constraint) -> Result<usize, String> {
    match value {
        Value::Text(s) => Ok(s.chars().count()),
        Value::List(items) => Ok(items.len()),
        _ => Err(wrong_shape(value, constraint)),
    }
}

fn wrong_shape(value: &Value, constraint: &Constraint) -> String {
    format!("{constraint} does not apply to {}", value.type_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_digits() {
        let phone = Constraint::Digits {
            prefix: "09",
            len: 9,
        };

        assert!(phone.check(&Value::from("09123456789")).is_ok());
        assert!(phone.check(&Value::from("0912345678")).is_err());
        assert!(phone.check(&Value::from("08123456789")).is_err());
        assert!(phone.check(&Value::from("09a23456789")).is_err());
        assert!(phone.check(&Value::from(9_123_456_789_i64)).is_err());
    }

    #[test]
    fn integer_bounds() {
        assert!(Constraint::Ge(1).check(&Value::from(1)).is_ok());
        assert!(Constraint::Ge(1).check(&Value::from(0)).is_err());
        assert!(Constraint::Le(100).check(&Value::from(101)).is_err());
        assert!(Constraint::Le(100).check(&Value::from("1")).is_err());
    }

    #[test]
    fn length_counts_characters() {
        assert!(Constraint::MaxLen(4).check(&Value::from("مهند")).is_ok());
        assert!(Constraint::MinLen(1).check(&Value::List(vec![])).is_err());
    }

    #[test]
    fn one_of_literals() {
        let role = Constraint::OneOf(&["employer", "seeker"]);

        assert!(role.check(&Value::from("seeker")).is_ok());
        assert!(role.check(&Value::from("admin")).is_err());
    }
}
