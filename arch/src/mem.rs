use once_cell::sync::Lazy;

/// Fixed RAM registers of the calling convention.
pub struct Reg;

impl Reg {
    pub const SP: u16 = 0;
    pub const LCL: u16 = 1;
    pub const ARG: u16 = 2;
    pub const THIS: u16 = 3;
    pub const THAT: u16 = 4;
    /// Base of the 8-register temp block (R5..R12).
    pub const TEMP: u16 = 5;
    pub const R13: u16 = 13;
    pub const R14: u16 = 14;
    pub const R15: u16 = 15;
}

pub const TEMP_SIZE: u16 = 8;

/// First RAM slot handed out to assembler-allocated variables, right
/// after the 16 general registers. Static VM variables land here too.
pub const VAR_BASE: u16 = 16;

pub const SCREEN: u16 = 16384;
pub const KBD: u16 = 24576;

/// Offsets (in words) back from a saved-frame base. A call site pushes
/// the return address and four segment pointers, so the frame is
/// `RET` words deep.
pub struct FrameOffset;

impl FrameOffset {
    pub const THAT: u16 = 1;
    pub const THIS: u16 = 2;
    pub const ARG: u16 = 3;
    pub const LCL: u16 = 4;
    pub const RET: u16 = 5;
}

/// Symbols every assembly unit starts with, seeded before pass 1.
pub static PREDEFINED: Lazy<Vec<(String, u16)>> = Lazy::new(|| {
    let mut table: Vec<(String, u16)> = (0..16).map(|n| (format!("R{n}"), n)).collect();
    for (name, address) in [
        ("SP", Reg::SP),
        ("LCL", Reg::LCL),
        ("ARG", Reg::ARG),
        ("THIS", Reg::THIS),
        ("THAT", Reg::THAT),
        ("SCREEN", SCREEN),
        ("KBD", KBD),
    ] {
        table.push((name.to_string(), address));
    }
    table
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predefined_layout() {
        let get = |name: &str| {
            PREDEFINED
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, a)| *a)
                .unwrap()
        };
        assert_eq!(get("R0"), 0);
        assert_eq!(get("R15"), 15);
        assert_eq!(get("SP"), get("R0"));
        assert_eq!(get("THAT"), 4);
        assert_eq!(get("SCREEN"), 16384);
        assert_eq!(get("KBD"), 24576);
        assert_eq!(PREDEFINED.len(), 23);
    }

    #[test]
    fn frame_layout() {
        // Saved order at a call site: return address, LCL, ARG, THIS, THAT.
        assert_eq!(FrameOffset::RET, 5);
        assert_eq!(FrameOffset::LCL, 4);
        assert_eq!(FrameOffset::ARG, 3);
        assert_eq!(FrameOffset::THIS, 2);
        assert_eq!(FrameOffset::THAT, 1);
    }
}
