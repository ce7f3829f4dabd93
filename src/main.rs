#[macro_use]
extern crate clap;

use clap::Arg;
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum IOErrorContext {
    ReadInput,
    WriteOutput,
}

#[derive(Debug)]
enum Error {
    /// The library's diagnostics borrow from the source buffer; since that
    /// buffer is local to [`palasm`], any assembly error is rendered to an
    /// owned string before it escapes that function.
    Palasm(String),
    Io(std::io::Error, IOErrorContext, PathBuf),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err, context, path) => writeln!(
                f,
                "{} file \"{}\" failed: {}",
                match context {
                    IOErrorContext::ReadInput => "Reading input",
                    IOErrorContext::WriteOutput => "Writing output",
                },
                path.display(),
                err
            ),
            Error::Palasm(msg) => {
                writeln!(f, "Assembly failed:")?;
                write!(f, "{}", msg)
            }
        }
    }
}

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the input source file to assemble")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .required(true)
                .value_name("OUTPUT")
                .help("Sets the object tape file to write to"),
        )
        .arg(
            Arg::with_name("static")
                .long("static")
                .help("Accepted for compatibility; has no effect"),
        )
        .get_matches();

    let input = matches.value_of("INPUT").unwrap();
    let output = matches.value_of("output").unwrap();

    if let Err(err) = palasm(input, output) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn palasm(input: &str, output: &str) -> Result<(), Error> {
    let input_path = Path::new(input);

    let input_file = File::open(input_path)
        .map_err(|err| Error::Io(err, IOErrorContext::ReadInput, input_path.to_owned()))?;
    let mut buf_reader = BufReader::new(input_file);
    let mut source = String::new();
    buf_reader
        .read_to_string(&mut source)
        .map_err(|err| Error::Io(err, IOErrorContext::ReadInput, input_path.to_owned()))?;

    let image =
        palasm::assemble(&source, input).map_err(|err| Error::Palasm(err.to_string()))?;

    let output_path = PathBuf::from(output);
    let output_file = File::create(&output_path)
        .map_err(|err| Error::Io(err, IOErrorContext::WriteOutput, output_path.clone()))?;
    let mut writer = BufWriter::new(output_file);
    palasm::object::write(&mut writer, &image)
        .map_err(|err| Error::Io(err, IOErrorContext::WriteOutput, output_path))?;

    Ok(())
}
