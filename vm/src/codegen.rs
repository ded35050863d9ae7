use arch::mem::{FrameOffset, Reg};

use crate::command::{Segment, VmCommand};

/// Translates VM commands into Hack assembly lines.
///
/// One value lives for a whole translation run. The label counter is
/// the only mutable state besides the output itself and must never
/// reset mid-run: every minted label in the output stream derives its
/// uniqueness from it.
#[derive(Debug)]
pub struct CodeGen {
    output: Vec<String>,
    label_counter: usize,
    file_stem: String,
}

impl CodeGen {
    pub fn new(file_stem: &str) -> Self {
        CodeGen {
            output: Vec::new(),
            label_counter: 0,
            file_stem: file_stem.to_string(),
        }
    }

    /// Switch the static-variable namespace when crossing a file
    /// boundary. The label counter carries over.
    pub fn set_file(&mut self, file_stem: &str) {
        self.file_stem = file_stem.to_string();
    }

    pub fn finish(self) -> Vec<String> {
        self.output
    }

    /// Append the assembly for one command, prefixed with a `//` echo
    /// of the source command. Downstream cleaning drops the echo.
    pub fn gen(&mut self, cmd: &VmCommand) {
        use VmCommand::*;

        self.emit(format!("// {cmd}"));
        match cmd {
            Push(segment, index) => self.gen_push(*segment, *index),
            Pop(segment, index) => self.gen_pop(*segment, *index),
            Add => self.gen_binary("D+M"),
            Sub => self.gen_binary("M-D"),
            And => self.gen_binary("D&M"),
            Or => self.gen_binary("D|M"),
            Neg => self.gen_unary("-M"),
            Not => self.gen_unary("!M"),
            Eq => self.gen_compare("JEQ"),
            Gt => self.gen_compare("JGT"),
            Lt => self.gen_compare("JLT"),
            Label(name) => self.emit(format!("({name})")),
            Goto(name) => {
                self.emit(format!("@{name}"));
                self.emit("0;JMP");
            }
            IfGoto(name) => {
                self.emit_pop_d();
                self.emit(format!("@{name}"));
                self.emit("D;JNE");
            }
            Function(name, n_vars) => self.gen_function(name, *n_vars),
            Call(name, n_args) => self.gen_call(name, *n_args),
            Return => self.gen_return(),
        }
    }

    fn emit(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    fn emit_all(&mut self, lines: &[&str]) {
        for line in lines {
            self.emit(*line);
        }
    }

    /// Mint the next unique label suffix.
    fn fresh_seq(&mut self) -> usize {
        let seq = self.label_counter;
        self.label_counter += 1;
        seq
    }

    /// Write D to the cell SP points at, then increment SP.
    fn emit_push_d(&mut self) {
        self.emit_all(&["@SP", "A=M", "M=D", "@SP", "M=M+1"]);
    }

    /// Decrement SP, then read the cell it now points at into D.
    /// Leaves A addressing the popped cell.
    fn emit_pop_d(&mut self) {
        self.emit_all(&["@SP", "AM=M-1", "D=M"]);
    }

    fn gen_push(&mut self, segment: Segment, index: u16) {
        match segment {
            Segment::Constant => {
                self.emit(format!("@{index}"));
                self.emit("D=A");
            }
            Segment::Local | Segment::Argument | Segment::This | Segment::That => {
                self.emit(format!("@{index}"));
                self.emit("D=A");
                self.emit(format!("@{}", base_name(segment)));
                self.emit("A=D+M");
                self.emit("D=M");
            }
            Segment::Pointer => {
                self.emit(format!("@{}", pointer_name(index)));
                self.emit("D=M");
            }
            Segment::Temp => {
                self.emit(format!("@R{}", Reg::TEMP + index));
                self.emit("D=M");
            }
            Segment::Static => {
                self.emit(format!("@{}_{index}", self.file_stem));
                self.emit("D=M");
            }
        }
        self.emit_push_d();
    }

    fn gen_pop(&mut self, segment: Segment, index: u16) {
        match segment {
            Segment::Constant => unreachable!("pop constant is rejected by the parser"),
            Segment::Local | Segment::Argument | Segment::This | Segment::That => {
                self.emit(format!("@{index}"));
                self.emit("D=A");
                self.emit(format!("@{}", base_name(segment)));
                self.emit("D=D+M");
                self.emit(format!("@R{}", Reg::R13));
                self.emit("M=D");
                self.emit_pop_d();
                self.emit(format!("@R{}", Reg::R13));
                self.emit_all(&["A=M", "M=D"]);
            }
            Segment::Pointer => {
                self.emit_pop_d();
                self.emit(format!("@{}", pointer_name(index)));
                self.emit("M=D");
            }
            Segment::Temp => {
                self.emit_pop_d();
                self.emit(format!("@R{}", Reg::TEMP + index));
                self.emit("M=D");
            }
            Segment::Static => {
                self.emit_pop_d();
                self.emit(format!("@{}_{index}", self.file_stem));
                self.emit("M=D");
            }
        }
    }

    /// Combine the two topmost words in place: pop the top into D,
    /// address the new top, overwrite it. Net stack depth shrinks by
    /// one word.
    fn gen_binary(&mut self, comp: &str) {
        self.emit_pop_d();
        self.emit("A=A-1");
        self.emit(format!("M={comp}"));
    }

    fn gen_unary(&mut self, comp: &str) {
        self.emit_all(&["@SP", "A=M-1"]);
        self.emit(format!("M={comp}"));
    }

    /// Pop y into D, compute x-y against the new top, and branch into
    /// one of two minted blocks that write all-ones or all-zeros over
    /// the top. All three labels share one counter value, so no other
    /// comparison in the run can collide with them.
    fn gen_compare(&mut self, jump: &str) {
        let seq = self.fresh_seq();
        let true_label = format!("TRUE_{seq}");
        let false_label = format!("FALSE_{seq}");
        let continue_label = format!("CONTINUE_{seq}");

        self.emit_pop_d();
        self.emit("A=A-1");
        self.emit("D=M-D");
        self.emit(format!("@{true_label}"));
        self.emit(format!("D;{jump}"));
        self.emit(format!("@{false_label}"));
        self.emit("0;JMP");
        self.emit(format!("({true_label})"));
        self.emit_all(&["@SP", "A=M-1", "M=-1"]);
        self.emit(format!("@{continue_label}"));
        self.emit("0;JMP");
        self.emit(format!("({false_label})"));
        self.emit_all(&["@SP", "A=M-1", "M=0"]);
        self.emit(format!("@{continue_label}"));
        self.emit("0;JMP");
        self.emit(format!("({continue_label})"));
    }

    /// Entry label, then one `push constant 0` per local so the locals
    /// occupy ascending stack slots.
    fn gen_function(&mut self, name: &str, n_vars: u16) {
        self.emit(format!("({name})"));
        for _ in 0..n_vars {
            self.emit("@0");
            self.emit("D=A");
            self.emit_push_d();
        }
    }

    /// Push the return address and the caller's four segment pointers,
    /// rebase ARG and LCL for the callee, and jump. The return label is
    /// minted per call site, not per callee, so repeated calls to the
    /// same function never collide.
    fn gen_call(&mut self, name: &str, n_args: u16) {
        let ret_label = format!("RET_{}_{}", name, self.fresh_seq());

        self.emit(format!("@{ret_label}"));
        self.emit("D=A");
        self.emit_push_d();
        for saved in ["LCL", "ARG", "THIS", "THAT"] {
            self.emit(format!("@{saved}"));
            self.emit("D=M");
            self.emit_push_d();
        }
        // ARG = SP - frame - n_args
        self.emit_all(&["@SP", "D=M"]);
        self.emit(format!("@{}", FrameOffset::RET));
        self.emit("D=D-A");
        self.emit(format!("@{n_args}"));
        self.emit("D=D-A");
        self.emit_all(&["@ARG", "M=D", "@SP", "D=M", "@LCL", "M=D"]);
        self.emit(format!("@{name}"));
        self.emit("0;JMP");
        self.emit(format!("({ret_label})"));
    }

    fn gen_return(&mut self) {
        // Capture the frame base first; every restore offset below is
        // relative to the original LCL, not the pointers being rebuilt.
        self.emit_all(&["@LCL", "D=M"]);
        self.emit(format!("@R{}", Reg::R13));
        self.emit("M=D");
        // With zero arguments the return-value slot aliases the
        // return-address slot, so grab the address before writing
        // through ARG.
        self.emit(format!("@{}", FrameOffset::RET));
        self.emit("A=D-A");
        self.emit("D=M");
        self.emit(format!("@R{}", Reg::R14));
        self.emit("M=D");
        // *ARG = return value; SP = ARG + 1
        self.emit_pop_d();
        self.emit_all(&["@ARG", "A=M", "M=D", "D=A+1", "@SP", "M=D"]);
        self.gen_restore("THAT", FrameOffset::THAT);
        self.gen_restore("THIS", FrameOffset::THIS);
        self.gen_restore("ARG", FrameOffset::ARG);
        self.gen_restore("LCL", FrameOffset::LCL);
        self.emit(format!("@R{}", Reg::R14));
        self.emit_all(&["A=M", "0;JMP"]);
    }

    fn gen_restore(&mut self, pointer: &str, offset: u16) {
        self.emit(format!("@{offset}"));
        self.emit("D=A");
        self.emit(format!("@R{}", Reg::R13));
        self.emit("A=M-D");
        self.emit("D=M");
        self.emit(format!("@{pointer}"));
        self.emit("M=D");
    }
}

fn base_name(segment: Segment) -> &'static str {
    match segment {
        Segment::Local => "LCL",
        Segment::Argument => "ARG",
        Segment::This => "THIS",
        Segment::That => "THAT",
        _ => unreachable!("segment has no base pointer"),
    }
}

fn pointer_name(index: u16) -> &'static str {
    match index {
        0 => "THIS",
        1 => "THAT",
        _ => unreachable!("pointer index is validated by the parser"),
    }
}
