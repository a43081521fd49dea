//! Rendering of cone types.
//!
//! Class ids are rendered in `package/path/Name` notation. A flexible type
//! whose upper bound is the nullable lower bound renders as `L!`; any other
//! flexible pair renders as `(L..U)`.

use crate::cone::{ConeType, TypeProjection};
use jfir_common::Variance;
use std::fmt;

impl fmt::Display for ConeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConeType::ClassLike(class) => {
                write!(f, "{}", class.class_id)?;
                if !class.arguments.is_empty() {
                    f.write_str("<")?;
                    for (index, argument) in class.arguments.iter().enumerate() {
                        if index > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{argument}")?;
                    }
                    f.write_str(">")?;
                }
                if class.nullable {
                    f.write_str("?")?;
                }
                Ok(())
            }
            ConeType::TypeParameter(parameter) => {
                write!(f, "{}", parameter.symbol.name())?;
                if parameter.nullable {
                    f.write_str("?")?;
                }
                Ok(())
            }
            ConeType::Flexible(flexible) => {
                if flexible.upper == flexible.lower.clone().with_nullability(true) && !flexible.lower.is_marked_nullable() {
                    write!(f, "{}!", flexible.lower)
                } else {
                    write!(f, "({}..{})", flexible.lower, flexible.upper)
                }
            }
            ConeType::Raw(flexible) => write!(f, "raw ({}..{})", flexible.lower, flexible.upper),
            ConeType::DefinitelyNotNull(inner) => write!(f, "{inner} & Any"),
            ConeType::Error { reason } => write!(f, "ERROR({reason})"),
        }
    }
}

impl fmt::Display for TypeProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeProjection::Star => f.write_str("*"),
            TypeProjection::Projected { variance, ty } => match variance {
                Variance::Invariant => write!(f, "{ty}"),
                Variance::In | Variance::Out => write!(f, "{} {ty}", variance.label()),
            },
        }
    }
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
