use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown command: `{0}`")]
    UnknownCommand(String),

    #[error("Unknown segment: `{0}`")]
    UnknownSegment(String),

    #[error("More argument required")]
    MissingArgument,

    #[error("Cannot parse `{0}` as an index")]
    BadIndex(String),

    #[error("Cannot pop into the constant segment")]
    PopConstant,

    #[error("Pointer index out of range: {0}")]
    PointerIndex(u16),

    #[error("Temp index out of range: {0}")]
    TempIndex(u16),

    #[error("Invalid name: `{0}`")]
    BadName(String),
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
    pub fn print(&self) {
        cprintln!("<red,bold>error</>: {}", self.error);
        cprintln!("     <blue>--></> <underline>{}:{}</>", self.file, self.line);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", self.line, self.text);
        cprintln!("      <blue>|</>");
    }
}
