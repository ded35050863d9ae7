use color_print::{cformat, cprintln};
use hackasm::assemble::{self, Line};
use hackasm::parser::{clean_line, Stmt};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input files
    #[clap(default_value = "main.asm")]
    input: Vec<String>,

    /// Output file
    #[clap(short, long, default_value = "main.hack")]
    output: String,

    /// Dump the encoded listing
    #[clap(short, long)]
    dump: bool,

    /// Write the resolved symbol table as YAML
    #[clap(long)]
    dump_symbols: Option<String>,
}

fn main() {
    use clap::Parser;
    use std::io::{BufRead, Write};

    let args: Args = Args::parse();
    println!("Hack Assembler");

    println!("1. Read Files and Parse Lines");

    let mut lines = vec![];
    for path in &args.input {
        println!("  < {}", path);
        let file =
            std::fs::File::open(path).expect(&cformat!("<r,s>Failed to open file</>: {}", path));
        for (idx, raw) in std::io::BufReader::new(file).lines().enumerate() {
            let raw = raw.expect(&cformat!("<r,s>Failed to read line</>: {}", path));
            let text = clean_line(&raw);
            if !text.is_empty() {
                lines.push(Line {
                    file: path.clone(),
                    num: idx + 1,
                    text,
                });
            }
        }
    }

    println!("2. Resolve Symbols and Encode");

    let parsed = assemble::parse(&lines).unwrap_or_else(|diag| abort(diag));
    let mut table = assemble::pass1(&parsed).unwrap_or_else(|diag| abort(diag));
    let words = assemble::pass2(&parsed, &mut table).unwrap_or_else(|diag| abort(diag));

    println!("  > {}", &args.output);
    let mut file = std::fs::File::create(&args.output)
        .expect(&cformat!("<r,s>Failed to create file</>: {}", &args.output));
    for word in &words {
        writeln!(file, "{}", arch::inst::bit_string(*word))
            .expect(&cformat!("<r,s>Failed to write file</>: {}", &args.output));
    }

    if let Some(path) = &args.dump_symbols {
        println!("  > {}", path);
        let yaml =
            serde_yaml::to_string(table.symbols()).expect("Failed to serialize symbol table");
        std::fs::write(path, yaml).expect(&cformat!("<r,s>Failed to write file</>: {}", path));
    }

    if args.dump {
        let mut at = 0;
        for p in &parsed {
            match &p.stmt {
                Stmt::Label(name) => cprintln!("{:24}| <green>({})</>", "", name),
                Stmt::Code(_) => {
                    cprintln!(
                        "[<yellow>{:04X}</>] {} | {}",
                        at,
                        arch::inst::bit_string(words[at]),
                        p.line.text
                    );
                    at += 1;
                }
            }
        }
    }
}

fn abort(diag: hackasm::error::Diag) -> ! {
    diag.print();
    std::process::exit(1);
}
