use hackasm::assemble::{self, Line};
use hackasm::error::{Diag, Error};
use hackasm::parser::clean_line;

fn lines(src: &[&str]) -> Vec<Line> {
    src.iter()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let text = clean_line(raw);
            (!text.is_empty()).then(|| Line {
                file: "test.asm".to_string(),
                num: idx + 1,
                text,
            })
        })
        .collect()
}

fn assemble(src: &[&str]) -> Result<Vec<String>, Diag> {
    assemble::assemble(&lines(src))
}

fn address_of(word: &str) -> u16 {
    u16::from_str_radix(word, 2).unwrap() & 0x7FFF
}

#[test]
fn literal_round_trip() {
    for n in [0u16, 1, 5, 256, 12345, 32767] {
        let out = assemble(&[&format!("@{n}")]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].len(), 16);
        assert!(out[0].starts_with('0'));
        assert_eq!(address_of(&out[0]), n);
    }
}

#[test]
fn assembly_is_idempotent() {
    let src = [
        "@start", "D=A", "(start)", "@counter", "M=M+1", "@start", "0;JMP",
    ];
    assert_eq!(assemble(&src).unwrap(), assemble(&src).unwrap());
}

#[test]
fn labels_occupy_no_code_space() {
    let src = ["(L1)", "@0", "D=A", "(L2)", "@0", "D=A"];
    let parsed = assemble::parse(&lines(&src)).unwrap();
    let table = assemble::pass1(&parsed).unwrap();
    assert_eq!(table.get("L1").unwrap().address, 0);
    assert_eq!(table.get("L2").unwrap().address, 2);
    // Only real instructions produce words.
    assert_eq!(assemble(&src).unwrap().len(), 4);
}

#[test]
fn forward_references_resolve() {
    let src = ["@END", "0;JMP", "D=A", "(END)", "@END", "0;JMP"];
    let out = assemble(&src).unwrap();
    assert_eq!(address_of(&out[0]), 3);
    assert_eq!(address_of(&out[3]), 3);
}

#[test]
fn variables_allocate_from_16() {
    let out = assemble(&["@foo", "@bar", "@foo"]).unwrap();
    assert_eq!(address_of(&out[0]), 16);
    assert_eq!(address_of(&out[1]), 17);
    assert_eq!(out[2], out[0]);
}

#[test]
fn labels_shadow_variable_allocation() {
    // `counter` is a label, not a variable; `x` still gets slot 16.
    let src = ["@counter", "@x", "(counter)", "D=A"];
    let out = assemble(&src).unwrap();
    assert_eq!(address_of(&out[0]), 2);
    assert_eq!(address_of(&out[1]), 16);
}

#[test]
fn predefined_symbols_resolve() {
    let out = assemble(&["@SP", "@R13", "@SCREEN", "@KBD"]).unwrap();
    assert_eq!(address_of(&out[0]), 0);
    assert_eq!(address_of(&out[1]), 13);
    assert_eq!(address_of(&out[2]), 16384);
    assert_eq!(address_of(&out[3]), 24576);
}

#[test]
fn known_program() {
    // Adds 2 and 3 into R0.
    let src = ["@2", "D=A", "@3", "D=D+A", "@0", "M=D"];
    let expected = [
        "0000000000000010",
        "1110110000010000",
        "0000000000000011",
        "1110000010010000",
        "0000000000000000",
        "1110001100001000",
    ];
    assert_eq!(assemble(&src).unwrap(), expected);
}

#[test]
fn comments_and_whitespace_are_no_ops() {
    let src = [
        "// stack pointer setup",
        "  @ SP ",
        "",
        "M = M + 1  // bump",
    ];
    let out = assemble(&src).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(address_of(&out[0]), 0);
}

#[test]
fn unknown_comp_aborts_with_no_output() {
    let diag = assemble(&["@5", "D=X"]).unwrap_err();
    assert_eq!(diag.error, Error::UnknownComp("X".to_string()));
    assert_eq!(diag.line, 2);

    let diag = assemble(&["M=D;XYZ"]).unwrap_err();
    assert_eq!(diag.error, Error::UnknownJump("XYZ".to_string()));

    let diag = assemble(&["Q=D"]).unwrap_err();
    assert_eq!(diag.error, Error::UnknownDest("Q".to_string()));
}

#[test]
fn label_collision_is_rejected() {
    let diag = assemble(&["(END)", "@0", "(END)"]).unwrap_err();
    assert_eq!(diag.error, Error::RedefinedLabel("END".to_string()));
    assert_eq!(diag.line, 3);

    let diag = assemble(&["(SP)"]).unwrap_err();
    assert_eq!(diag.error, Error::RedefinedLabel("SP".to_string()));
}

#[test]
fn literal_out_of_range_is_rejected() {
    let diag = assemble(&["@32768"]).unwrap_err();
    assert_eq!(diag.error, Error::AddressOutOfRange("32768".to_string()));
}
