//! Interactive scope menu.

use std::io::{self, BufRead, Write};

use usage_report_core::CutoffMode;

const OPTIONS: [&str; 6] = [
    "1. Daily",
    "2. Weekly",
    "3. Monthly",
    "4. All the time",
    "5. Enter the date",
    "6. Exit",
];

/// What the operator picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Run one batch with this mode.
    Run(CutoffMode),
    /// Leave without reading anything.
    Exit,
}

/// Show the menu on `output` and read a choice from `input`.
///
/// Invalid options and malformed dates are reported and asked again. End of
/// input counts as exit.
///
/// # Errors
///
/// Returns any I/O error from reading or writing the terminal.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<MenuChoice> {
    loop {
        writeln!(output, "Please choose one of the following options:")?;
        for option in OPTIONS {
            writeln!(output, "{option}")?;
        }
        let Some(choice) = read_answer(input, output, "Enter your choice: ")? else {
            return Ok(MenuChoice::Exit);
        };

        let mode = match choice.as_str() {
            "1" => CutoffMode::Daily,
            "2" => CutoffMode::Weekly,
            "3" => CutoffMode::Monthly,
            "4" => CutoffMode::AllTime,
            "5" => match prompt_date(input, output)? {
                Some(mode) => mode,
                None => return Ok(MenuChoice::Exit),
            },
            "6" => {
                writeln!(output, "Exiting.")?;
                return Ok(MenuChoice::Exit);
            }
            _ => {
                writeln!(output, "Invalid option, please try again.")?;
                continue;
            }
        };
        return Ok(MenuChoice::Run(mode));
    }
}

fn prompt_date<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<CutoffMode>> {
    loop {
        let Some(answer) = read_answer(input, output, "Enter the start date (YYYY-MM-DD): ")?
        else {
            return Ok(None);
        };
        match CutoffMode::explicit(&answer) {
            Ok(mode) => return Ok(Some(mode)),
            Err(err) => writeln!(output, "{err}, please try again.")?,
        }
    }
}

fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<Option<String>> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
