//! Reglas laborales y emparejamiento: validador de asignaciones y
//! comprobación de elegibilidad mutua entre solicitudes.

mod matching;
mod types;
mod util;
mod validate;

pub use matching::check_match;
pub use types::{RuleOptions, Violation};
pub use validate::validate_assignment;
