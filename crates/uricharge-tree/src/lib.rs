//! Value trees for URI Charge notation.
//!
//! Two receivers turn parsed input into values: [`ValueBuilder`] builds a
//! plain [`Value`], [`ChargeBuilder`] an immutable [`Charge`] that can be
//! navigated without knowing its shape.

mod builder;
mod charge;
mod charge_builder;
mod value;

pub use builder::ValueBuilder;
pub use charge::{Charge, ChargeType, NONE, Single};
pub use charge_builder::ChargeBuilder;
pub use uricharge_parse::{Parser, Registry, Scalar, ScalarKind};
pub use value::{Directive, Entity, Value};

/// Parse a plain value.
pub fn parse(input: &str) -> Value {
    Parser::new().parse(input, &mut ValueBuilder).charge
}

/// Parse a plain value continuing `base`.
///
/// Maps are merged entry by entry, recursively; anything else is replaced.
pub fn parse_into(base: Value, input: &str) -> Value {
    Parser::new()
        .parse_into(input, &mut ValueBuilder, base)
        .charge
}

/// Parse a generic charge.
pub fn parse_charge(input: &str) -> Charge {
    Parser::new().parse(input, &mut ChargeBuilder).charge
}
