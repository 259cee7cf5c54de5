//! Audible completion alert

use std::io::{self, Write};

const BELL: &[u8] = b"\x07";

/// Ring the terminal bell
pub fn ring_bell<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(BELL)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_writes_bel_character() {
        let mut out = Vec::new();
        ring_bell(&mut out).unwrap();
        assert_eq!(out, vec![0x07]);
    }
}
