//! Diagnostic rendering of attribute tables
use super::attribute::Attribute;
use std::fmt;
use tracing::debug;

/// Render `attrs` as a tab-separated table, one line per attribute.
///
/// Static values are shown as uppercase hex; dynamic attributes have no
/// fixed payload and are marked instead. Works against any `fmt::Write`
/// sink, so tests can capture the output in a `String`.
pub fn dump_attributes<W: fmt::Write>(attrs: &[Attribute], out: &mut W) -> fmt::Result {
    writeln!(out, "handle\tend\ttype\tvalue")?;
    for attr in attrs {
        match attr.static_value() {
            Some(bytes) => writeln!(
                out,
                "{:#06x}\t{:#06x}\t{}\t{}",
                attr.handle,
                attr.ending_handle,
                attr.attr_type,
                hex::encode_upper(bytes)
            )?,
            None => writeln!(
                out,
                "{:#06x}\t{:#06x}\t{}\t(dynamic)",
                attr.handle, attr.ending_handle, attr.attr_type
            )?,
        }
    }
    Ok(())
}

/// Emit one debug event per attribute through `tracing`.
pub fn log_attributes(attrs: &[Attribute]) {
    debug!(count = attrs.len(), "attribute table");
    for attr in attrs {
        match attr.static_value() {
            Some(bytes) => debug!(
                handle = attr.handle,
                end = attr.ending_handle,
                attr_type = %attr.attr_type,
                value = %hex::encode_upper(bytes),
                "attribute"
            ),
            None => debug!(
                handle = attr.handle,
                end = attr.ending_handle,
                attr_type = %attr.attr_type,
                dynamic = true,
                "attribute"
            ),
        }
    }
}
