use std::io::{self, Write};

pub fn write_stdout_text(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_line(&mut stdout, text)
}

pub fn write_stderr_text(text: &str) -> io::Result<()> {
    let mut stderr = io::stderr().lock();
    write_line(&mut stderr, text)
}

// A closed pipe (`namesake batch rows.csv | head`) is not an error.
fn write_line(writer: &mut dyn Write, text: &str) -> io::Result<()> {
    let mut body = text.to_string();
    if !body.ends_with('\n') {
        body.push('\n');
    }
    match writer.write_all(body.as_bytes()).and_then(|()| writer.flush()) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::write_line;

    struct ClosedPipe;

    impl io::Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn appends_single_trailing_newline() {
        let mut buffer = Vec::new();
        assert!(write_line(&mut buffer, "1").is_ok());
        assert!(write_line(&mut buffer, "2\n").is_ok());
        assert_eq!(buffer, b"1\n2\n");
    }

    #[test]
    fn broken_pipe_is_ignored() {
        assert!(write_line(&mut ClosedPipe, "1").is_ok());
    }
}
