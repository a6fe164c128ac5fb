#![forbid(unsafe_code)]
use std::io::{Read, Write};
use std::path::PathBuf;
use std::{env, ffi, fs, io, process};

use lzwcore::{Codec, Config, Decoder, Encoder, Lzw};

fn main() -> CodingResult {
    env_logger::init();
    CodingResult::catch_panic(|| {
        let flags = Flags::from_args(env::args_os()).unwrap_or_else(|ParamError| explain());
        run_coding(flags)
    })
}

fn run_coding(flags: Flags) -> Result<(), io::Error> {
    let config = Config::with_code_sizes(flags.min_code, flags.max_code)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let out = io::stdout();
    let out = out.lock();

    let input = read_input(&flags.input)?;
    log::info!("read {} bytes from {:?}", input.len(), flags.input);

    match flags.operation {
        Operation::Encode => {
            if flags.stats {
                eprintln!("{}", Lzw::with_config(config).compress(&input));
            }

            let mut encoder = Encoder::with_config(config);
            encoder.into_stream(out).encode_all(input.as_slice()).status
        }
        Operation::Decode => {
            let mut decoder = Decoder::with_config(config);
            decoder.into_stream(out).decode_all(input.as_slice()).status
        }
    }
}

fn read_input(input: &Input) -> io::Result<Vec<u8>> {
    match input {
        Input::File(file) => fs::read(file),
        Input::Stdin => {
            let mut data = vec![];
            io::stdin().lock().read_to_end(&mut data)?;
            Ok(data)
        }
    }
}

struct Flags {
    input: Input,
    operation: Operation,
    min_code: u8,
    max_code: u8,
    stats: bool,
}

struct ParamError;

#[derive(Debug)]
enum Input {
    File(PathBuf),
    Stdin,
}

#[derive(Debug)]
enum Operation {
    Encode,
    Decode,
}

fn explain<T>() -> T {
    let _ = writeln!(
        io::stderr(),
        "Usage: lzw [-e|-d] [-w <bits>] [-W <bits>] [--stats] <file>\n\
        Arguments:\n\
        -e\t operation encode\n\
        -d\t operation decode\n\
        -w\t initial code width, 9 to 16 (default 9)\n\
        -W\t maximum code width, 9 to 16 (default 16)\n\
        <file>\tfilepath or '-' for stdin"
    );
    process::exit(1);
}

impl Default for Flags {
    fn default() -> Flags {
        let config = Config::default();
        Flags {
            input: Input::Stdin,
            operation: Operation::Encode,
            min_code: config.min_code_size(),
            max_code: config.max_code_size(),
            stats: false,
        }
    }
}

fn command() -> clap::Command {
    clap::Command::new("lzw")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compress and decompress with variable width LZW")
        .arg(
            clap::Arg::new("decode")
                .short('d')
                .long("decode")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("encode")
                .short('e')
                .long("encode")
                .action(clap::ArgAction::SetTrue),
        )
        .group(
            clap::ArgGroup::new("operation")
                .args(["decode", "encode"])
                .multiple(false)
                .required(true),
        )
        .arg(
            clap::Arg::new("min_code")
                .short('w')
                .long("min-width")
                .value_parser(clap::value_parser!(u8).range(9..=16)),
        )
        .arg(
            clap::Arg::new("max_code")
                .short('W')
                .long("max-width")
                .value_parser(clap::value_parser!(u8).range(9..=16)),
        )
        .arg(
            clap::Arg::new("stats")
                .long("stats")
                .help("Print compression statistics to stderr when encoding")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("file")
                .default_value("-")
                .value_parser(clap::builder::ValueParser::path_buf()),
        )
}

impl Flags {
    fn from_args(args: impl Iterator<Item = ffi::OsString>) -> Result<Self, ParamError> {
        let mut flags = Flags::default();
        let matches = command()
            .try_get_matches_from(args)
            .map_err(|err| match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    err.exit()
                }
                _ => {
                    let _ = err.print();
                    ParamError
                }
            })?;

        if matches.get_flag("decode") {
            flags.operation = Operation::Decode;
        } else if matches.get_flag("encode") {
            flags.operation = Operation::Encode;
        }

        if let Some(&m) = matches.get_one::<u8>("min_code") {
            flags.min_code = m;
        }

        if let Some(&m) = matches.get_one::<u8>("max_code") {
            flags.max_code = m;
        }

        flags.stats = matches.get_flag("stats");

        match matches.get_one::<PathBuf>("file") {
            None => flags.input = Input::Stdin,
            Some(p) if *p == PathBuf::from("-") => flags.input = Input::Stdin,
            Some(p) => flags.input = Input::File(p.clone()),
        }

        Ok(flags)
    }
}

enum CodingResult {
    Ok,
    Err(io::Error),
    Panic,
}

impl CodingResult {
    fn catch_panic(op: impl FnOnce() -> Result<(), io::Error> + std::panic::UnwindSafe) -> Self {
        std::panic::catch_unwind(|| match op() {
            Ok(()) => CodingResult::Ok,
            Err(err) => CodingResult::Err(err),
        })
        .unwrap_or(CodingResult::Panic)
    }
}

impl process::Termination for CodingResult {
    fn report(self) -> process::ExitCode {
        match self {
            CodingResult::Ok => process::ExitCode::SUCCESS,
            CodingResult::Err(err) => {
                eprintln!("{}", err);
                process::ExitCode::FAILURE
            }
            CodingResult::Panic => {
                eprintln!(
                    "The process failed irrecoverably! This should never happen and is a bug."
                );
                process::ExitCode::from(128)
            }
        }
    }
}
