use num_enum::{FromPrimitive, IntoPrimitive};
use strum::{Display, EnumString};

/// Destination mask of a compute instruction. Variant order matches the
/// 3-bit encoding (A=bit2, D=bit1, M=bit0).
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
pub enum Dest {
    #[default]
    None,
    M,
    D,
    MD,
    A,
    AM,
    AD,
    AMD,
}

impl Dest {
    /// An absent destination field parses as `Dest::None`; the literal
    /// text "None" is not a mnemonic.
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Ok(Dest::None);
        }
        match s.parse::<Self>() {
            Ok(d) if d != Dest::None => Ok(d),
            _ => Err(format!("Unknown dest mnemonic: {s}")),
        }
    }

    pub fn writes_a(self) -> bool {
        u8::from(self) & 0b100 != 0
    }

    pub fn writes_d(self) -> bool {
        u8::from(self) & 0b010 != 0
    }

    pub fn writes_m(self) -> bool {
        u8::from(self) & 0b001 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(u8::from(Dest::None), 0b000);
        assert_eq!(u8::from(Dest::M), 0b001);
        assert_eq!(u8::from(Dest::MD), 0b011);
        assert_eq!(u8::from(Dest::AMD), 0b111);
    }

    #[test]
    fn parse() {
        assert_eq!(Dest::parse(""), Ok(Dest::None));
        assert_eq!(Dest::parse("AD"), Ok(Dest::AD));
        assert!(Dest::parse("X").is_err());
        assert!(Dest::parse("None").is_err());
        assert!(Dest::parse("md").is_err());
    }

    #[test]
    fn write_flags() {
        assert!(Dest::AM.writes_a());
        assert!(Dest::AM.writes_m());
        assert!(!Dest::AM.writes_d());
    }
}
