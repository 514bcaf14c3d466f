//! Opt-in packet hex dumps, enabled by a non-empty `IPMI_DEBUG`.

pub(crate) fn enabled() -> bool {
    std::env::var("IPMI_DEBUG")
        .map(|v| !v.is_empty())
        .unwrap_or(false)
}

pub(crate) fn dump_hex(label: &str, bytes: &[u8]) {
    if !enabled() {
        return;
    }
    let out = format_hex(label, bytes);

    #[cfg(feature = "tracing")]
    tracing::trace!("{out}");

    #[cfg(not(feature = "tracing"))]
    eprintln!("{out}");
}

fn format_hex(label: &str, bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(label.len() + bytes.len() * 3 + 8);
    let _ = write!(out, "{label} ({}):", bytes.len());
    for b in bytes {
        let _ = write!(out, " {b:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_hex_lists_bytes() {
        assert_eq!(
            format_hex("trailer", &[0x00, 0xAB, 0x7F]),
            "trailer (3): 00 ab 7f"
        );
        assert_eq!(format_hex("empty", &[]), "empty (0):");
    }
}
