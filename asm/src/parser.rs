use arch::comp::Comp;
use arch::dest::Dest;
use arch::inst::{Addr, CInst, Inst};
use arch::jump::Jump;

use crate::error::Error;

/// One line of an assembly unit: either a real instruction or a label
/// pseudo-line, which occupies no code space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Code(Inst),
    Label(String),
}

impl Stmt {
    /// Parse one pre-cleaned line (no whitespace, no comments).
    pub fn parse(code: &str) -> Result<Stmt, Error> {
        // (name)
        if let Some(inner) = code.strip_prefix('(') {
            let name = inner
                .strip_suffix(')')
                .filter(|name| is_symbol(name))
                .ok_or_else(|| Error::Malformed(code.to_string()))?;
            return Ok(Stmt::Label(name.to_string()));
        }

        // @literal or @symbol
        if let Some(operand) = code.strip_prefix('@') {
            if !operand.is_empty() && operand.chars().all(|c| c.is_ascii_digit()) {
                let value = operand
                    .parse::<u32>()
                    .ok()
                    .filter(|v| *v <= 0x7FFF)
                    .ok_or_else(|| Error::AddressOutOfRange(operand.to_string()))?;
                return Ok(Stmt::Code(Inst::A(Addr::Literal(value as u16))));
            }
            if is_symbol(operand) {
                return Ok(Stmt::Code(Inst::A(Addr::Symbol(operand.to_string()))));
            }
            return Err(Error::Malformed(code.to_string()));
        }

        // [dest=]comp[;jump]
        let (dest, rest) = match code.split_once('=') {
            Some((dest, rest)) => (dest, rest),
            None => ("", code),
        };
        let (comp, jump) = match rest.split_once(';') {
            Some((comp, jump)) => (comp, jump),
            None => (rest, ""),
        };
        let dest = Dest::parse(dest).map_err(|_| Error::UnknownDest(dest.to_string()))?;
        let comp = Comp::parse(comp).map_err(|_| Error::UnknownComp(comp.to_string()))?;
        let jump = Jump::parse(jump).map_err(|_| Error::UnknownJump(jump.to_string()))?;
        Ok(Stmt::Code(Inst::C(CInst { comp, dest, jump })))
    }
}

/// Strip comments and every whitespace character. Hack assembly has no
/// significant spaces inside an instruction, so `D = A` and `D=A` are
/// the same line.
pub fn clean_line(raw: &str) -> String {
    strip_comments(raw)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

fn strip_comments(raw: &str) -> String {
    let mut line = raw.to_string();
    while let (Some(open), Some(close)) = (line.find("/*"), line.find("*/")) {
        if close < open {
            break;
        }
        line.replace_range(open..close + 2, "");
    }
    if let Some(idx) = line.find("//") {
        line.truncate(idx);
    }
    line
}

fn is_symbol(s: &str) -> bool {
    let symbol_char = |c: char| c.is_ascii_alphanumeric() || "_.$:".contains(c);
    match s.chars().next() {
        Some(c) if !c.is_ascii_digit() && symbol_char(c) => s.chars().all(symbol_char),
        _ => false,
    }
}
