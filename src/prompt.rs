use std::io::{self, BufRead, Write};

/// Interactive capabilities the authentication flows need from the user.
///
/// The terminal implementation blocks on standard input; tests supply canned
/// answers instead.
pub trait Prompt {
    /// Shows `message` and waits for the user to confirm.
    ///
    /// Returns `false` when the user cancels (enters `q` or closes stdin).
    fn confirm(&mut self, message: &str) -> io::Result<bool>;

    fn input(&mut self, label: &str) -> io::Result<String>;

    /// Reads a secret without echoing it to the terminal.
    fn password(&mut self, label: &str) -> io::Result<String>;

    /// Tries to open `url` in a browser. Returns whether that worked.
    fn open_url(&mut self, url: &str) -> bool;
}

pub struct TerminalPrompt;

impl TerminalPrompt {
    fn read_line(&self, message: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{message} ")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl Prompt for TerminalPrompt {
    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        Ok(match self.read_line(message)? {
            Some(answer) => !answer.trim().eq_ignore_ascii_case("q"),
            None => false,
        })
    }

    fn input(&mut self, label: &str) -> io::Result<String> {
        self.read_line(label)?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"))
    }

    fn password(&mut self, label: &str) -> io::Result<String> {
        rpassword::prompt_password(format!("{label} "))
    }

    fn open_url(&mut self, url: &str) -> bool {
        webbrowser::open(url).is_ok()
    }
}
