use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy)]
/// A leveled debug label, attachable to an [crate::nfa::Nfa] simulation, a
/// [crate::lexer::Lexer], or a [crate::grammar::Grammar]'s FIRST fixed point,
/// to trace their internal resolution steps.
///
/// Disabled (release) builds never pay for the tracing: every call site that
/// reads a `Log` value is gated by `cfg(debug_assertions)`.
pub enum Log<T> {
    None,
    Default(T),
    Success(T),
    Result(T),
    Verbose(T),
}

impl<T> Log<T> {
    pub fn order(&self) -> u8 {
        match self {
            Log::None => 0,
            Log::Default(_) => 1,
            Log::Success(_) => 2,
            Log::Result(_) => 3,
            Log::Verbose(_) => 4,
        }
    }
}

impl<T: Display> Display for Log<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Log::None => Ok(()),
            Log::Default(s) | Log::Success(s) | Log::Result(s) | Log::Verbose(s) => {
                write!(f, "{}", s)
            }
        }
    }
}
