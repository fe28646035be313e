/*!
Provides convenience routines for escaping text in error messages.

Parsed input and pattern strings are embedded in error messages. Control
characters are escaped so that a message always renders on one line and
unambiguously shows what was given.
*/

/// Provides a convenient `Display` implementation for a `char`.
///
/// Printable characters are emitted as is. Everything else is emitted as an
/// escape sequence.
#[derive(Clone, Copy)]
pub(crate) struct Char(pub(crate) char);

impl core::fmt::Display for Char {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.0 {
            '\0' => write!(f, "\\0"),
            // ASCII control characters except \0, \n, \r, \t
            '\x01'..='\x08' | '\x0b' | '\x0c' | '\x0e'..='\x1f' | '\x7f' => {
                write!(f, "\\x{:02x}", u32::from(self.0))
            }
            ch => write!(f, "{}", ch.escape_debug()),
        }
    }
}

impl core::fmt::Debug for Char {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"")?;
        core::fmt::Display::fmt(self, f)?;
        write!(f, "\"")?;
        Ok(())
    }
}

/// Provides a convenient `Display` implementation for a string.
pub(crate) struct Str<'a>(pub(crate) &'a str);

impl<'a> core::fmt::Display for Str<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        for ch in self.0.chars() {
            core::fmt::Display::fmt(&Char(ch), f)?;
        }
        Ok(())
    }
}

impl<'a> core::fmt::Debug for Str<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"")?;
        core::fmt::Display::fmt(self, f)?;
        write!(f, "\"")?;
        Ok(())
    }
}
