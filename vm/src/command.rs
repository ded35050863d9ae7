use std::fmt;

use arch::mem;
use strum::{Display, EnumString};

use crate::error::Error;

/// Memory segment of a push/pop command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Segment {
    Constant,
    Local,
    Argument,
    This,
    That,
    Pointer,
    Temp,
    Static,
}

/// One stack-machine command, one per source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmCommand {
    Push(Segment, u16),
    Pop(Segment, u16),
    Add,
    Sub,
    And,
    Or,
    Neg,
    Not,
    Eq,
    Gt,
    Lt,
    Label(String),
    Goto(String),
    IfGoto(String),
    Function(String, u16),
    Call(String, u16),
    Return,
}

impl VmCommand {
    /// Parse one pre-cleaned line (single spaces between tokens).
    pub fn parse(code: &str) -> Result<VmCommand, Error> {
        use VmCommand::*;

        let words: Vec<&str> = code.split_whitespace().collect();
        let Some((&op, args)) = words.split_first() else {
            return Err(Error::UnknownCommand(code.to_string()));
        };

        macro_rules! arg {
            ($index:expr) => {
                *args.get($index).ok_or(Error::MissingArgument)?
            };
        }

        match op {
            "push" | "pop" => {
                let segment = arg!(0);
                let segment: Segment = segment
                    .parse()
                    .map_err(|_| Error::UnknownSegment(segment.to_string()))?;
                let index = parse_index(arg!(1))?;
                match segment {
                    Segment::Constant if op == "pop" => return Err(Error::PopConstant),
                    Segment::Pointer if index > 1 => return Err(Error::PointerIndex(index)),
                    Segment::Temp if index >= mem::TEMP_SIZE => {
                        return Err(Error::TempIndex(index))
                    }
                    _ => {}
                }
                Ok(match op {
                    "push" => Push(segment, index),
                    _ => Pop(segment, index),
                })
            }
            "add" => Ok(Add),
            "sub" => Ok(Sub),
            "and" => Ok(And),
            "or" => Ok(Or),
            "neg" => Ok(Neg),
            "not" => Ok(Not),
            "eq" => Ok(Eq),
            "gt" => Ok(Gt),
            "lt" => Ok(Lt),
            "label" => Ok(Label(parse_name(arg!(0))?)),
            "goto" => Ok(Goto(parse_name(arg!(0))?)),
            "if-goto" => Ok(IfGoto(parse_name(arg!(0))?)),
            "function" => Ok(Function(parse_name(arg!(0))?, parse_index(arg!(1))?)),
            "call" => Ok(Call(parse_name(arg!(0))?, parse_index(arg!(1))?)),
            "return" => Ok(Return),
            _ => Err(Error::UnknownCommand(op.to_string())),
        }
    }
}

fn parse_index(s: &str) -> Result<u16, Error> {
    s.parse::<u16>().map_err(|_| Error::BadIndex(s.to_string()))
}

fn parse_name(s: &str) -> Result<String, Error> {
    let name_char = |c: char| c.is_ascii_alphanumeric() || "_.$:".contains(c);
    match s.chars().next() {
        Some(c) if !c.is_ascii_digit() && name_char(c) && s.chars().all(name_char) => {
            Ok(s.to_string())
        }
        _ => Err(Error::BadName(s.to_string())),
    }
}

impl fmt::Display for VmCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use VmCommand::*;
        match self {
            Push(segment, index) => write!(f, "push {segment} {index}"),
            Pop(segment, index) => write!(f, "pop {segment} {index}"),
            Add => write!(f, "add"),
            Sub => write!(f, "sub"),
            And => write!(f, "and"),
            Or => write!(f, "or"),
            Neg => write!(f, "neg"),
            Not => write!(f, "not"),
            Eq => write!(f, "eq"),
            Gt => write!(f, "gt"),
            Lt => write!(f, "lt"),
            Label(name) => write!(f, "label {name}"),
            Goto(name) => write!(f, "goto {name}"),
            IfGoto(name) => write!(f, "if-goto {name}"),
            Function(name, n_vars) => write!(f, "function {name} {n_vars}"),
            Call(name, n_args) => write!(f, "call {name} {n_args}"),
            Return => write!(f, "return"),
        }
    }
}

/// Strip comments and collapse whitespace runs to single spaces.
pub fn clean_line(raw: &str) -> String {
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
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}
