//! Character classes: the leaves of a regex's abstract syntax and the label
//! carried by each consuming [crate::nfa::Nfa] transition.

use once_cell::unsync::Lazy;
use regex::Regex;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{InvalidClassError, RegexError};

/// A compiled host-regex class (`[...]`, `\d`, `\s`, `\w`, `\D`, `\S`, `\W`),
/// interned by its source text so that two identical class bodies share one
/// compiled [Regex] and compare equal by pointer identity.
#[derive(Debug, Clone)]
pub struct DelegatedClass {
    pub source: Rc<str>,
    regex: Rc<Regex>,
}

impl DelegatedClass {
    fn contains(&self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.regex.is_match(ch.encode_utf8(&mut buf))
    }
}

impl PartialEq for DelegatedClass {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.regex, &other.regex)
    }
}
impl Eq for DelegatedClass {}

thread_local! {
    // Single-threaded cooperative model (see spec.md §5): no need for
    // once_cell::sync or a Mutex here, matching the teacher's own
    // once_cell::unsync usage throughout.
    static INTERNED: Lazy<RefCell<HashMap<String, Rc<Regex>>>> =
        Lazy::new(|| RefCell::new(HashMap::new()));
}

/// Compile (or reuse) the host regex behind a class body. `source` is the
/// verbatim bracket/escape text, e.g. `"[a-z]"` or `"\\d"`.
pub(crate) fn intern_class(source: &str) -> Result<DelegatedClass, RegexError> {
    if let Some(regex) = INTERNED.with(|cache| cache.borrow().get(source).cloned()) {
        return Ok(DelegatedClass {
            source: Rc::from(source),
            regex,
        });
    }
    let anchored = format!("^(?s:{})$", source);
    let regex = Rc::new(Regex::new(&anchored).map_err(|_| {
        RegexError::from(InvalidClassError {
            source: source.to_string(),
        })
    })?);
    INTERNED.with(|cache| {
        cache
            .borrow_mut()
            .insert(source.to_string(), regex.clone())
    });
    Ok(DelegatedClass {
        source: Rc::from(source),
        regex,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single character-matching primitive: a literal character, the `.`
/// metacharacter, or a class delegated to the host regex engine.
pub enum CharClass {
    Literal(char),
    /// Matches any character except `\n`.
    Any,
    Delegated(DelegatedClass),
}

impl CharClass {
    pub fn literal(ch: char) -> Self {
        CharClass::Literal(ch)
    }

    pub fn delegated(source: &str) -> Result<Self, RegexError> {
        Ok(CharClass::Delegated(intern_class(source)?))
    }

    /// Whether this class matches `ch`.
    pub fn contains(&self, ch: char) -> bool {
        match self {
            CharClass::Literal(c) => *c == ch,
            CharClass::Any => ch != '\n',
            CharClass::Delegated(d) => d.contains(ch),
        }
    }
}
