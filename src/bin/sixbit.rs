/*
 * Copyright (C) 2026 taylor.fish <contact@taylor.fish>
 *
 * This file is part of sixbit.
 *
 * sixbit is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * sixbit is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with sixbit. If not, see <https://www.gnu.org/licenses/>.
 */

use std::convert::TryFrom;
use std::ffi::OsStr;
use std::fmt::{Debug, Display};
use std::fs::File;
use std::io::{stdin, stdout, Read, Write};
use std::path::Path;
use std::process::exit;

use sixbit::decode::{decode_bytes_with, DecodeConfig};
use sixbit::encode::encode_to_vec;

const USAGE: &str = "\
Usage: sixbit [options] [file]

Encodes or decodes base64 data from [file] and writes the result to standard
output. If [file] is missing or \"-\", the data is read from standard input.

When decoding, trailing whitespace in the input is ignored.

Options:
  -d --decode   Decode data instead of encoding
  --no-padding  When decoding, accept input without '=' padding
  -h --help     Show this help message
  -v --version  Show program version
";

#[macro_use]
mod error_exit {
    use super::{exit, Display};

    macro_rules! error_exit {
        ($($args:tt)*) => {
            crate::error_exit::__run(format_args!($($args)*));
        };
    }

    #[doc(hidden)]
    pub fn __run(args: impl Display) -> ! {
        eprintln!("error: {}", args);
        if cfg!(feature = "cli-panic") {
            panic!("error: {}", args);
        } else {
            exit(1);
        }
    }
}

fn expect<T, E: Debug>(result: Result<T, E>, msg: impl Display) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("error: {}", msg);
        if cfg!(feature = "cli-panic") {
            panic!("error: {}: {:?}", msg, e);
        } else {
            exit(1);
        }
    })
}

#[derive(Clone, Copy)]
enum Mode {
    Encode,
    Decode(DecodeConfig),
}

struct ParsedArgs<'a> {
    pub mode: Mode,
    pub path: Option<&'a Path>,
}

fn show_usage() -> ! {
    print!("{}", USAGE);
    exit(0);
}

fn show_version() -> ! {
    println!("{}", env!("CARGO_PKG_VERSION"));
    exit(0);
}

macro_rules! args_error {
    ($($args:tt)*) => {
        error_exit!(
            "{}\n{}",
            format_args!($($args)*),
            "See `sixbit --help` for usage information.",
        );
    };
}

fn parse_args<'a, Args>(args: Args) -> ParsedArgs<'a>
where
    Args: IntoIterator<Item = &'a OsStr>,
{
    let mut should_decode = false;
    let mut config = DecodeConfig::new();
    let mut file: Option<&'a OsStr> = None;
    let mut options_done = false;

    let mut process_arg = |arg: &'a OsStr, astr: &str| {
        match astr {
            _ if options_done => {}
            "-" => {}
            "--" => {
                options_done = true;
                return;
            }
            "--help" => show_usage(),
            "--version" => show_version(),
            "--decode" => {
                should_decode = true;
                return;
            }
            "--no-padding" => {
                config.require_padding = false;
                return;
            }
            s if s.starts_with("--") => {
                args_error!("unrecognized option: {}", s);
            }
            s if s.starts_with('-') => {
                s.chars().skip(1).for_each(|c| match c {
                    'h' => show_usage(),
                    'v' => show_version(),
                    'd' => {
                        should_decode = true;
                    }
                    c => {
                        args_error!("unrecognized option: -{}", c);
                    }
                });
                return;
            }
            _ => {}
        }
        if file.replace(arg).is_some() {
            args_error!("unexpected argument: {}", astr);
        }
    };

    args.into_iter()
        .map(|a| (a, a.to_string_lossy()))
        .for_each(|(arg, astr)| process_arg(arg, &*astr));

    ParsedArgs {
        mode: if should_decode {
            Mode::Decode(config)
        } else {
            Mode::Encode
        },
        path: file.map(Path::new),
    }
}

/// Reads a whole file, sizing the buffer from the file's length up front.
fn read_file(path: &Path) -> Vec<u8> {
    let mut file = File::open(path).unwrap_or_else(|e| {
        error_exit!("could not open file '{}': {}", path.display(), e);
    });
    let size = file
        .metadata()
        .ok()
        .and_then(|m| usize::try_from(m.len()).ok())
        .unwrap_or(0);
    let mut data = Vec::with_capacity(size);
    expect(file.read_to_end(&mut data), "could not read input");
    data
}

fn read_stdin() -> Vec<u8> {
    let mut data = Vec::new();
    expect(stdin().lock().read_to_end(&mut data), "could not read input");
    data
}

fn write_stdout(data: &[u8]) {
    let mut writer = stdout();
    expect(
        writer.write_all(data).and_then(|_| writer.flush()),
        "could not write to standard output",
    );
}

fn encode(input: &[u8]) {
    let mut encoded = encode_to_vec(input);
    encoded.push(b'\n');
    write_stdout(&encoded);
}

fn decode(input: &[u8], config: DecodeConfig) {
    let end = input
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    let decoded: Vec<u8> = decode_bytes_with(&input[..end], config)
        .unwrap_or_else(|e| {
            error_exit!("input is not valid base64 data: {}", e);
        })
        .collect();
    write_stdout(&decoded);
}

fn main() {
    let args: Vec<_> = std::env::args_os().skip(1).collect();
    let ParsedArgs {
        mode,
        path,
    } = parse_args(args.iter().map(|s| s.as_os_str()));

    let input = path.map_or_else(read_stdin, read_file);
    match mode {
        Mode::Encode => encode(&input),
        Mode::Decode(config) => decode(&input, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> (Mode, Option<String>) {
        let args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();
        let parsed = parse_args(args);
        let path = parsed.path.map(|p| p.display().to_string());
        (parsed.mode, path)
    }

    fn require_padding(mode: Mode) -> Option<bool> {
        match mode {
            Mode::Encode => None,
            Mode::Decode(config) => Some(config.require_padding),
        }
    }

    #[test]
    fn modes() {
        let (mode, path) = parse(&[]);
        assert_eq!(require_padding(mode), None);
        assert_eq!(path, None);

        let (mode, path) = parse(&["-d", "in.b64"]);
        assert_eq!(require_padding(mode), Some(true));
        assert_eq!(path.as_deref(), Some("in.b64"));

        let (mode, _) = parse(&["--no-padding", "--decode"]);
        assert_eq!(require_padding(mode), Some(false));

        let (mode, path) = parse(&["--", "-d"]);
        assert_eq!(require_padding(mode), None);
        assert_eq!(path.as_deref(), Some("-d"));
    }

    #[test]
    fn reads_whole_file() {
        let mut path = std::env::temp_dir();
        path.push(format!("sixbit-read-{}.bin", std::process::id()));
        let data: Vec<u8> = (0..=255).cycle().take(5000).collect();
        std::fs::write(&path, &data).unwrap();
        let read = read_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(read, data);
    }
}
