use std::io::{self, BufRead, Write};

use anyhow::Context;

use nxprof_common::device::credentials::Credentials;

/// Asks for the SSH login. A username given on the command line skips its prompt.
pub fn credentials(username: Option<String>) -> anyhow::Result<Credentials> {
    let username = match username {
        Some(name) => name,
        None => read_line("Username: ")?,
    };
    let password = rpassword::prompt_password("Password: ").context("reading password")?;
    Ok(Credentials::new(username.trim(), password))
}

fn read_line(prompt: &str) -> anyhow::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading username")?;
    Ok(line.trim().to_string())
}
