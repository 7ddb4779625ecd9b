//! prompting helpers; reads validated numbers from any `BufRead`,
//! writes results to one sink and diagnostics to another

use std::io::{self, BufRead, Stderr, StdinLock, Stdout, Write};

pub struct Console<R, W, E>
{
    input : R,
    out   : W,
    err   : E,
}

pub type StdConsole = Console<StdinLock<'static>, Stdout, Stderr>;

impl StdConsole
{
    pub fn stdio() -> Self
    {
        Console::new(io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R : BufRead, W : Write, E : Write> Console<R, W, E>
{
    pub fn new(input : R, out : W, err : E) -> Self
    {
        Self { input, out, err }
    }

    /// sink for regular output (tables, status messages)
    pub fn out(&mut self) -> &mut W
    {
        &mut self.out
    }

    pub fn msgln(&mut self, line : &str) -> io::Result<()>
    {
        writeln!(self.out, "{}", line)
    }

    /// one line diagnostic on the error sink
    pub fn errln(&mut self, line : &str) -> io::Result<()>
    {
        writeln!(self.err, "{}", line)?;
        self.err.flush()
    }

    /// print prompt, return the trimmed next line;
    /// end of input is `UnexpectedEof`
    fn ask(&mut self, prompt : &str) -> io::Result<String>
    {
        write!(self.out, "{} ", prompt)?;
        self.out.flush()?;

        let mut line = String::new(); // read_line() appends, start fresh
        if self.input.read_line(&mut line)? == 0
        {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }

        Ok(line.trim().to_string())
    }

    /// read an integer within `min..=max`, asking again until one is given
    pub fn read_int_in(&mut self, prompt : &str, min : i64, max : i64)
        -> io::Result<i64>
    {
        loop
        {
            let answer = self.ask(prompt)?;

            match answer.parse::<i64>() {
                Ok(v) if (min..=max).contains(&v) => return Ok(v),
                _ => writeln!(self.out,
                              "Please enter an integer between {} and {}.",
                              min, max)?,
            }
        }
    }

    /// read any integer
    pub fn read_int(&mut self, prompt : &str) -> io::Result<i64>
    {
        loop
        {
            let answer = self.ask(prompt)?;

            match answer.parse::<i64>() {
                Ok(v) => return Ok(v),
                Err(_) => writeln!(self.out, "Please enter an integer.")?,
            }
        }
    }

    /// read a finite decimal; both `.` and `,` work as separator
    pub fn read_decimal(&mut self, prompt : &str) -> io::Result<f64>
    {
        loop
        {
            let answer = self.ask(prompt)?.replace(',', ".");

            match answer.parse::<f64>() {
                Ok(v) if v.is_finite() => return Ok(v),
                _ => writeln!(self.out, "Please enter a decimal number.")?,
            }
        }
    }

    pub fn into_parts(self) -> (R, W, E)
    {
        (self.input, self.out, self.err)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::test;

    #[test]
    fn int_in_range_reprompts_until_valid()
    {
        let mut console = test::console("abc\n7\n-1\n 3 \n");

        assert_eq!(console.read_int_in("Option:", 0, 4).unwrap(), 3);

        let (_, out, _) = console.into_parts();
        let out = test::text(out);
        assert_eq!(out.matches("Option:").count(), 4);
        assert_eq!(out.matches("between 0 and 4").count(), 3);
    }

    #[test]
    fn int_accepts_negative_values()
    {
        let mut console = test::console("x\n-25\n");
        assert_eq!(console.read_int("Code:").unwrap(), -25);
    }

    #[test]
    fn decimal_accepts_comma()
    {
        let mut console = test::console("7,5\n");
        assert_eq!(console.read_decimal("Distance:").unwrap(), 7.5);
    }

    #[test]
    fn decimal_rejects_garbage_and_infinity()
    {
        let mut console = test::console("far\ninf\nNaN\n12\n");
        assert_eq!(console.read_decimal("Distance:").unwrap(), 12.0);

        let (_, out, _) = console.into_parts();
        assert_eq!(test::text(out).matches("decimal number").count(), 3);
    }

    #[test]
    fn end_of_input_is_an_error()
    {
        let mut console = test::console("nope\n");

        let err = console.read_int("Code:").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn diagnostics_go_to_error_sink()
    {
        let mut console = test::console("");
        console.msgln("fine").unwrap();
        console.errln("broken").unwrap();

        let (_, out, err) = console.into_parts();
        assert_eq!(test::text(out), "fine\n");
        assert_eq!(test::text(err), "broken\n");
    }
}
