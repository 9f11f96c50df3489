use std::{
    error::Error,
    fs,
    io::{self, Write},
    process,
    time::Instant,
};

use clap::{Arg, ArgMatches, Command};
use tracing::Level;
use tpc::{
    error::CompilerResult,
    frontend::{lexer::Lexer, parser::Parser},
    Compiler, CompilerOptions,
};

fn main() {
    let matches = Command::new("tpc")
        .version("1.0.0")
        .author("David Voigt <david.voigt@student.uni-tuebingen.de>\nLars Vogtmann <lars.vogtmann@studen.uni-tuebingen.de")
        .about("A three pass compiler from arithmetic expressions to stack machine instructions.")
        .arg(Arg::new("compile")
            .value_name("FILE")
            .short('c')
            .long("compile")
            .help("Path to the source file that will be compiled.")
            .takes_value(true))
        .arg(Arg::new("verbose")
            .short('v')
            .help("Output tokens as well as the AST and enable debug logging.")
            .takes_value(false))
        .arg(Arg::new("optimize")
            .short('o')
            .takes_value(false)
            .help("Activate constant folding."))
        .arg(Arg::new("no-peephole")
            .long("no-peephole")
            .takes_value(false)
            .help("Keep push/pop pairs that cancel each other out."))
        .get_matches();

    tracing_subscriber::fmt()
        .with_max_level(if matches.is_present("verbose") {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_writer(io::stderr)
        .init();

    let result = match matches.value_of("compile") {
        Some(path) => Runner::run_with_mode(RunMode::File(path), &matches),
        None => Runner::run_with_mode(RunMode::Prompt, &matches),
    };
    if let Err(err) = result {
        match matches.value_of("compile") {
            Some(path) => eprintln!("{}: {}", err, path),
            None => eprintln!("{}", err),
        }
        process::exit(1);
    }
}

/// Indicate whether the compiler shall be run in prompt mode or
/// to compile a source file.
enum RunMode<'a> {
    Prompt,
    File(&'a str),
}

/// Simple struct responsible for coordinating the compilation of either the
/// prompt input or a source file.
struct Runner<'a> {
    args: &'a ArgMatches,
    compiler: Compiler,
}

impl<'a> Runner<'a> {
    pub fn run_with_mode(mode: RunMode, args: &'a ArgMatches) -> Result<(), Box<dyn Error>> {
        let runner = Self {
            args,
            compiler: Compiler::new(CompilerOptions {
                optimize: args.is_present("optimize"),
                peephole: !args.is_present("no-peephole"),
            }),
        };
        match mode {
            RunMode::File(path) => {
                let src = fs::read_to_string(path)?;
                runner.run(&src)?;
            }
            RunMode::Prompt => runner.run_prompt()?,
        }
        Ok(())
    }

    /// Starts a prompt compiling one program per line. Useful for interactive debugging.
    fn run_prompt(&self) -> Result<(), io::Error> {
        let mut inpt = String::new();
        println!("tpc 1.0.0\
        \nA three pass compiler from arithmetic expressions to stack machine instructions.\
        \nPress ctrl+d or ctrl+c to exit.");
        loop {
            print!("\u{1b}[0;38;5;171m> \u{1b}[0m");
            io::stdout().flush()?;
            let num_bytes = io::stdin().read_line(&mut inpt)?;
            if num_bytes == 0 {
                // Terminate line
                println!();
                return Ok(());
            }
            let line = inpt.trim_end();
            if !line.is_empty() {
                if let Err(e) = self.run(line) {
                    eprintln!("{}", e);
                }
            }
            inpt.clear();
        }
    }

    /// Compiles a program and prints one instruction per line.
    pub fn run(&self, src: &str) -> CompilerResult<()> {
        // Time the compilation duration
        let start = Instant::now();
        if self.args.is_present("verbose") {
            let tokens = Lexer::new(src).tokenize()?;
            println!("Tokens:");
            tokens.iter().for_each(|token| println!("\t{}", token));
            let ast = Parser::new(tokens).parse()?;
            println!("AST:");
            println!("\t{}", ast);
            if self.compiler.options().optimize {
                println!("Folded AST:");
                println!("\t{}", self.compiler.build_ast(src)?);
            }
        }
        let code = self.compiler.compile(src)?;
        for instr in &code {
            println!("{}", instr);
        }
        if self.args.is_present("verbose") {
            println!("\ntook \u{1b}[32;40m{:.2?}\u{1b}[0m", start.elapsed());
        }
        Ok(())
    }
}
