use std::fs::OpenOptions;
use std::process::ExitCode;

use tlz::Error;

fn run() -> Result<(), Error> {
    let path = std::env::args().nth(1).ok_or(Error::MissingArgument)?;

    let input = std::fs::read(&path).map_err(|source| Error::InputUnreadable {
        path: path.clone(),
        source,
    })?;

    let output_path = format!("{path}.gama.lz");
    let mut output = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&output_path)
        .map_err(Error::OutputFailed)?;

    tlz::compress(&input, &mut output)
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tlz: {err}");
            ExitCode::FAILURE
        }
    }
}
