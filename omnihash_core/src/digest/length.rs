//! The LENGTH pseudo-algorithm

use super::traits::Digester;

/// Counts input bytes instead of hashing them.
///
/// When the source declared its length up front, the counter trusts the
/// declaration and `update` is a no-op (the engine still drains the content
/// past it). A declared length of 0 is distinct from an undeclared length.
pub struct LengthDigester {
    declared: Option<u64>,
    counted: u64,
}

impl LengthDigester {
    pub fn new(declared: Option<u64>) -> Self {
        Self {
            declared,
            counted: 0,
        }
    }
}

impl Digester for LengthDigester {
    fn update(&mut self, chunk: &[u8]) {
        if self.declared.is_none() {
            self.counted += chunk.len() as u64;
        }
    }

    fn finalize(self: Box<Self>) -> String {
        self.declared.unwrap_or(self.counted).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_bytes_when_undeclared() {
        let mut digester = LengthDigester::new(None);
        digester.update(b"hash");
        digester.update(b"me");
        assert_eq!(Box::new(digester).finalize(), "6");
    }

    #[test]
    fn test_empty_input_is_zero() {
        let digester = LengthDigester::new(None);
        assert_eq!(Box::new(digester).finalize(), "0");
    }

    #[test]
    fn test_declared_length_wins_over_updates() {
        let mut digester = LengthDigester::new(Some(42));
        digester.update(b"these bytes are drained but not counted");
        assert_eq!(Box::new(digester).finalize(), "42");
    }

    #[test]
    fn test_declared_length_needs_no_updates() {
        let digester = LengthDigester::new(Some(42));
        assert_eq!(Box::new(digester).finalize(), "42");
    }

    #[test]
    fn test_declared_zero_is_not_unknown() {
        let mut digester = LengthDigester::new(Some(0));
        digester.update(b"ignored");
        assert_eq!(Box::new(digester).finalize(), "0");
    }
}
