use color_print::cprintln;
use thiserror::Error;

use crate::assemble::Line;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown comp mnemonic: `{0}`")]
    UnknownComp(String),

    #[error("Unknown dest mnemonic: `{0}`")]
    UnknownDest(String),

    #[error("Unknown jump mnemonic: `{0}`")]
    UnknownJump(String),

    #[error("Cannot parse instruction: `{0}`")]
    Malformed(String),

    #[error("Address literal out of range: `{0}`")]
    AddressOutOfRange(String),

    #[error("Re-defined label: `{0}`")]
    RedefinedLabel(String),

    #[error("Cannot allocate variable `{0}`: address space exhausted")]
    VariableSpaceExhausted(String),
}

/// An error bound to the source line that caused it.
#[derive(Debug)]
pub struct Diag {
    pub file: String,
    pub line: usize,
    pub text: String,
    pub error: Error,
}

impl Diag {
    pub fn at(line: &Line, error: Error) -> Self {
        Diag {
            file: line.file.clone(),
            line: line.num,
            text: line.text.clone(),
            error,
        }
    }

    pub fn print(&self) {
        cprintln!("<red,bold>error</>: {}", self.error);
        cprintln!("     <blue>--></> <underline>{}:{}</>", self.file, self.line);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", self.line, self.text);
        cprintln!("      <blue>|</>");
    }
}
