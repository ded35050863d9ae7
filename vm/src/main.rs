use color_print::cformat;
use hackvm::codegen::CodeGen;
use hackvm::command::{clean_line, VmCommand};
use hackvm::error::Diag;

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
    #[clap(default_value = "main.vm")]
    input: Vec<String>,

    /// Output file
    #[clap(short, long, default_value = "main.asm")]
    output: String,

    /// Dump the generated assembly
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    use clap::Parser;
    use std::io::{BufRead, Write};

    let args: Args = Args::parse();
    println!("Hack VM Translator");

    println!("1. Translate Commands");

    let mut codegen = CodeGen::new("main");
    let mut diags: Vec<Diag> = vec![];
    for path in &args.input {
        println!("  < {}", path);
        // Each file gets its own static-variable namespace.
        let stem = std::path::Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("main");
        codegen.set_file(stem);
        let file =
            std::fs::File::open(path).expect(&cformat!("<r,s>Failed to open file</>: {}", path));
        for (idx, raw) in std::io::BufReader::new(file).lines().enumerate() {
            let raw = raw.expect(&cformat!("<r,s>Failed to read line</>: {}", path));
            let text = clean_line(&raw);
            if text.is_empty() {
                continue;
            }
            match VmCommand::parse(&text) {
                Ok(cmd) => codegen.gen(&cmd),
                Err(error) => diags.push(Diag {
                    file: path.clone(),
                    line: idx + 1,
                    text,
                    error,
                }),
            }
        }
    }

    // A failed command aborts the whole unit; nothing is written.
    if !diags.is_empty() {
        for diag in &diags {
            diag.print();
        }
        std::process::exit(1);
    }

    println!("2. Write Assembly");
    println!("  > {}", &args.output);

    let lines = codegen.finish();
    let mut file = std::fs::File::create(&args.output)
        .expect(&cformat!("<r,s>Failed to create file</>: {}", &args.output));
    for line in &lines {
        writeln!(file, "{}", line)
            .expect(&cformat!("<r,s>Failed to write file</>: {}", &args.output));
    }

    if args.dump {
        for line in &lines {
            println!("{}", line);
        }
    }
}
