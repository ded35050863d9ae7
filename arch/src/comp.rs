use std::fmt;

use strum::EnumIter;

/// Comp expression of a compute instruction: the ALU operation applied
/// to the D register and either A (register forms) or M = RAM[A]
/// (memory forms). The set is closed; anything else is not an
/// instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Comp {
    Zero,
    One,
    NegOne,
    D,
    A,
    M,
    NotD,
    NotA,
    NotM,
    NegD,
    NegA,
    NegM,
    DPlusOne,
    APlusOne,
    MPlusOne,
    DMinusOne,
    AMinusOne,
    MMinusOne,
    DPlusA,
    DPlusM,
    DMinusA,
    DMinusM,
    AMinusD,
    MMinusD,
    DAndA,
    DAndM,
    DOrA,
    DOrM,
}

impl Comp {
    pub fn parse(s: &str) -> Result<Self, String> {
        use Comp::*;
        let comp = match s {
            "0" => Zero,
            "1" => One,
            "-1" => NegOne,
            "D" => D,
            "A" => A,
            "M" => M,
            "!D" => NotD,
            "!A" => NotA,
            "!M" => NotM,
            "-D" => NegD,
            "-A" => NegA,
            "-M" => NegM,
            "D+1" => DPlusOne,
            "A+1" => APlusOne,
            "M+1" => MPlusOne,
            "D-1" => DMinusOne,
            "A-1" => AMinusOne,
            "M-1" => MMinusOne,
            "D+A" => DPlusA,
            "D+M" => DPlusM,
            "D-A" => DMinusA,
            "D-M" => DMinusM,
            "A-D" => AMinusD,
            "M-D" => MMinusD,
            "D&A" => DAndA,
            "D&M" => DAndM,
            "D|A" => DOrA,
            "D|M" => DOrM,
            _ => return Err(format!("Unknown comp mnemonic: {s}")),
        };
        Ok(comp)
    }

    /// Operand selector bit: 0 reads the A register, 1 reads RAM[A].
    pub fn a_bit(self) -> u16 {
        use Comp::*;
        match self {
            M | NotM | NegM | MPlusOne | MMinusOne | DPlusM | DMinusM | MMinusD | DAndM
            | DOrM => 1,
            _ => 0,
        }
    }

    /// The six ALU control bits (zx nx zy ny f no), MSB first.
    pub fn func(self) -> u16 {
        use Comp::*;
        match self {
            Zero => 0b101010,
            One => 0b111111,
            NegOne => 0b111010,
            D => 0b001100,
            A | M => 0b110000,
            NotD => 0b001101,
            NotA | NotM => 0b110001,
            NegD => 0b001111,
            NegA | NegM => 0b110011,
            DPlusOne => 0b011111,
            APlusOne | MPlusOne => 0b110111,
            DMinusOne => 0b001110,
            AMinusOne | MMinusOne => 0b110010,
            DPlusA | DPlusM => 0b000010,
            DMinusA | DMinusM => 0b010011,
            AMinusD | MMinusD => 0b000111,
            DAndA | DAndM => 0b000000,
            DOrA | DOrM => 0b010101,
        }
    }
}

impl fmt::Display for Comp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Comp::*;
        let s = match self {
            Zero => "0",
            One => "1",
            NegOne => "-1",
            D => "D",
            A => "A",
            M => "M",
            NotD => "!D",
            NotA => "!A",
            NotM => "!M",
            NegD => "-D",
            NegA => "-A",
            NegM => "-M",
            DPlusOne => "D+1",
            APlusOne => "A+1",
            MPlusOne => "M+1",
            DMinusOne => "D-1",
            AMinusOne => "A-1",
            MMinusOne => "M-1",
            DPlusA => "D+A",
            DPlusM => "D+M",
            DMinusA => "D-A",
            DMinusM => "D-M",
            AMinusD => "A-D",
            MMinusD => "M-D",
            DAndA => "D&A",
            DAndM => "D&M",
            DOrA => "D|A",
            DOrM => "D|M",
        };
        write!(f, "{s}")
    }
}
