use num_enum::{FromPrimitive, IntoPrimitive};
use strum::{Display, EnumString};

/// Jump condition of a compute instruction. Variant order matches the
/// 3-bit encoding (LT=bit2, EQ=bit1, GT=bit0).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    FromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
pub enum Jump {
    #[default]
    None,
    JGT,
    JEQ,
    JGE,
    JLT,
    JNE,
    JLE,
    JMP,
}

impl Jump {
    /// An absent jump field parses as `Jump::None`; the literal text
    /// "None" is not a mnemonic.
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Ok(Jump::None);
        }
        match s.parse::<Self>() {
            Ok(j) if j != Jump::None => Ok(j),
            _ => Err(format!("Unknown jump mnemonic: {s}")),
        }
    }

    /// Whether the condition holds for the ALU output.
    pub fn taken(self, out: i16) -> bool {
        match self {
            Jump::None => false,
            Jump::JGT => out > 0,
            Jump::JEQ => out == 0,
            Jump::JGE => out >= 0,
            Jump::JLT => out < 0,
            Jump::JNE => out != 0,
            Jump::JLE => out <= 0,
            Jump::JMP => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(u8::from(Jump::None), 0b000);
        assert_eq!(u8::from(Jump::JGT), 0b001);
        assert_eq!(u8::from(Jump::JNE), 0b101);
        assert_eq!(u8::from(Jump::JMP), 0b111);
    }

    #[test]
    fn parse() {
        assert_eq!(Jump::parse(""), Ok(Jump::None));
        assert_eq!(Jump::parse("JLE"), Ok(Jump::JLE));
        assert!(Jump::parse("JXX").is_err());
        assert!(Jump::parse("None").is_err());
    }

    #[test]
    fn conditions() {
        assert!(Jump::JGT.taken(1));
        assert!(!Jump::JGT.taken(0));
        assert!(Jump::JEQ.taken(0));
        assert!(Jump::JLT.taken(-1));
        assert!(Jump::JNE.taken(-1));
        assert!(Jump::JLE.taken(0));
        assert!(Jump::JMP.taken(12345));
        assert!(!Jump::None.taken(0));
    }

    #[test]
    fn from_bits() {
        assert_eq!(Jump::from(0b111u8), Jump::JMP);
        assert_eq!(Jump::from(0b000u8), Jump::None);
        assert_eq!(Jump::from(0b100u8), Jump::JLT);
    }
}
