//! Token resolution.
//!
//! Saturation produces `Node`s: spans paired with intermediate tokens.
//! Resolution turns a node into a `ResolvedToken` carrying the
//! recognizer-facing type name and a [`Resolution`] payload:
//!
//! ```text
//! Token ──┬─ Numeral      -> "number"        Value { value, subtype }
//!         ├─ Ordinal      -> "ordinal"       Value { value }
//!         ├─ Percentage   -> "percentage"    Value { value: "<n>%" }
//!         ├─ Quantity     -> age | currency | dimension | temperature
//!         │                                  Value { value, unit, isoCurrency? }
//!         ├─ TimeExpr     -> "datetimeV2.*"  Values [ candidates ]
//!         ├─ PhoneNumber  -> "phonenumber"   Value { value: matched text }
//!         ├─ Email        -> "email"         Value { value: matched text }
//!         └─ RegexMatch   -> None (not a semantic value)
//! ```
//!
//! Dimension-specific formatting lives next to the rule families; this
//! module only dispatches.

use crate::api::Context;
use crate::model::{Resolution, ValueResolution};
use crate::rules::numeral::helpers::format_number;
use crate::rules::time::normalize::resolve_time;
use crate::{Node, ResolvedToken, TokenKind, UnitFamily};
use tracing::trace;

pub(crate) fn resolve_node(context: &Context, input: &str, node: Node) -> Option<ResolvedToken> {
    let (type_name, resolution) = resolve(context, input, &node)?;

    trace!(
        target: "text_recognizer::engine",
        dim = ?node.token.dim,
        start = node.range.start,
        end = node.range.end,
        type_name = type_name.as_str(),
        resolution = ?resolution,
        "resolve"
    );

    Some(ResolvedToken { node, type_name, resolution })
}

fn resolve(context: &Context, input: &str, node: &Node) -> Option<(String, Resolution)> {
    let matched_text = || input.get(node.range.start..node.range.end).map(str::to_string);

    match &node.token.kind {
        TokenKind::Numeral(data) => {
            let subtype = if data.value.fract() == 0.0 { "integer" } else { "decimal" };
            let resolution = Resolution::Value(ValueResolution {
                value: format_number(data.value),
                subtype: Some(subtype.to_string()),
                ..ValueResolution::default()
            });
            Some(("number".to_string(), resolution))
        }
        TokenKind::Ordinal(data) => Some(("ordinal".to_string(), Resolution::value(data.value.to_string()))),
        TokenKind::Percentage(data) => {
            Some(("percentage".to_string(), Resolution::value(format!("{}%", format_number(data.value)))))
        }
        TokenKind::Quantity(data) => {
            let type_name = match data.family {
                UnitFamily::Age => "age",
                UnitFamily::Currency => "currency",
                UnitFamily::Measure => "dimension",
                UnitFamily::Temperature => "temperature",
            };
            let resolution = Resolution::Value(ValueResolution {
                value: format_number(data.value),
                unit: Some(data.unit.to_string()),
                subtype: None,
                iso_currency: data.iso_currency.map(str::to_string),
            });
            Some((type_name.to_string(), resolution))
        }
        TokenKind::TimeExpr(expr) => {
            let (subtype, values) = resolve_time(expr, context.reference_time)?;
            Some((format!("datetimeV2.{subtype}"), Resolution::Values { values }))
        }
        TokenKind::PhoneNumber(_) => Some(("phonenumber".to_string(), Resolution::value(matched_text()?))),
        TokenKind::Email(_) => Some(("email".to_string(), Resolution::value(matched_text()?))),
        TokenKind::RegexMatch(_) => None,
    }
}
