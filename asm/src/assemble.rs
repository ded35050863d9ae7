use arch::inst::{self, Addr, Inst};

use crate::error::Diag;
use crate::parser::Stmt;
use crate::symbols::SymbolTable;

/// One pre-cleaned source line with its origin, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct Line {
    pub file: String,
    pub num: usize,
    pub text: String,
}

#[derive(Debug)]
pub struct Parsed {
    pub line: Line,
    pub stmt: Stmt,
}

pub fn parse(lines: &[Line]) -> Result<Vec<Parsed>, Diag> {
    lines
        .iter()
        .filter(|line| !line.text.is_empty())
        .map(|line| {
            Stmt::parse(&line.text)
                .map(|stmt| Parsed {
                    line: line.clone(),
                    stmt,
                })
                .map_err(|error| Diag::at(line, error))
        })
        .collect()
}

/// Pass 1: collect label addresses. A label resolves to the index of
/// the next real instruction; label pseudo-lines do not advance the
/// count.
pub fn pass1(parsed: &[Parsed]) -> Result<SymbolTable, Diag> {
    let mut table = SymbolTable::with_predefined();
    let mut pc: u16 = 0;
    for p in parsed {
        match &p.stmt {
            Stmt::Label(name) => table
                .define_label(name, pc)
                .map_err(|error| Diag::at(&p.line, error))?,
            Stmt::Code(_) => pc += 1,
        }
    }
    Ok(table)
}

/// Pass 2: resolve every symbolic operand (allocating variables on
/// first sight) and encode each real instruction into a machine word.
pub fn pass2(parsed: &[Parsed], table: &mut SymbolTable) -> Result<Vec<u16>, Diag> {
    let mut words = Vec::new();
    for p in parsed {
        let word = match &p.stmt {
            Stmt::Label(_) => continue,
            Stmt::Code(Inst::A(Addr::Literal(value))) => inst::encode_a(*value),
            Stmt::Code(Inst::A(Addr::Symbol(name))) => {
                let address = table
                    .resolve(name)
                    .map_err(|error| Diag::at(&p.line, error))?;
                inst::encode_a(address)
            }
            Stmt::Code(Inst::C(c)) => c.encode(),
        };
        words.push(word);
    }
    Ok(words)
}

/// Run both passes over a cleaned unit and render the words. Any error
/// aborts the whole unit; no partial output.
pub fn assemble(lines: &[Line]) -> Result<Vec<String>, Diag> {
    let parsed = parse(lines)?;
    let mut table = pass1(&parsed)?;
    let words = pass2(&parsed, &mut table)?;
    Ok(words.iter().map(|word| inst::bit_string(*word)).collect())
}
