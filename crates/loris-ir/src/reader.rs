//! Reader for the line-oriented plant format.
//!
//! The format is positional: state count, alphabet, observable events,
//! unobservable events, fault events, a transition block, initial
//! states, final states. `%`-prefixed lines and blank lines are
//! comments, except that a blank line (or an `Initial state` marker
//! line) terminates the transition block. A literal `-` denotes an
//! empty event or state set.

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::alphabet::AlphabetTable;
use crate::automaton::{Automaton, AutomatonBuilder, ModelError, StateId};

/// A failure of the read stage. The pipeline never starts on any of
/// these; each carries a span pointing at the offending input line.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    #[error("cannot open file '{path}': {source}")]
    #[diagnostic(code(loris::read::open))]
    CannotOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid state count: '{found}'")]
    #[diagnostic(code(loris::read::state_count))]
    InvalidStateCount {
        found: String,
        #[label("expected a positive integer")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("invalid transition line: '{line}'")]
    #[diagnostic(
        code(loris::read::transition),
        help("expected three columns: <src> <event> <dst>")
    )]
    InvalidTransitionLine {
        line: String,
        #[label("here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("invalid state id: '{found}'")]
    #[diagnostic(code(loris::read::state_id))]
    InvalidStateId {
        found: String,
        #[label("expected a state number")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("state out of range: {state} (the plant has {bound} states)")]
    #[diagnostic(code(loris::read::state_range))]
    StateOutOfRange {
        state: usize,
        bound: usize,
        #[label("out of range")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("event not in alphabet: '{symbol}'")]
    #[diagnostic(code(loris::read::unknown_event))]
    EventNotInAlphabet {
        symbol: String,
        #[label("unknown event")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("missing required section: {section}")]
    #[diagnostic(code(loris::read::missing_section))]
    MissingSection { section: &'static str },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Model(#[from] ModelError),
}

/// Read and parse a plant file.
pub fn read_file(path: impl AsRef<Path>) -> Result<Automaton, ParseError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| ParseError::CannotOpen {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_source(&source, &path.display().to_string())
}

/// Parse a plant description from an in-memory string.
pub fn parse_source(source: &str, filename: &str) -> Result<Automaton, ParseError> {
    Parser::new(source, filename).parse()
}

struct Parser<'a> {
    source: &'a str,
    filename: &'a str,
    lines: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, filename: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut offset = 0;
        for raw in source.split_inclusive('\n') {
            let text = raw.trim_end_matches(['\n', '\r']);
            lines.push((offset, text));
            offset += raw.len();
        }
        Self {
            source,
            filename,
            lines,
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<Automaton, ParseError> {
        let num_states = self.state_count()?;
        let symbols = self.symbol_line("alphabet")?;
        let declared: HashSet<&str> = symbols.iter().map(String::as_str).collect();
        let observable = self.event_set("observable events", &declared)?;
        let unobservable = self.event_set("unobservable events", &declared)?;
        let faults = self.event_set("fault events", &declared)?;

        let alphabet = AlphabetTable::build(symbols, &observable, &unobservable, &faults)?;
        let mut builder = AutomatonBuilder::new(num_states, alphabet);
        self.transition_block(&mut builder, num_states)?;
        builder.initial(self.state_set("initial states", num_states)?);
        builder.marked(self.final_states(num_states)?);
        Ok(builder.finish()?)
    }

    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.filename, self.source.to_string())
    }

    fn line_span(&self, line: usize) -> SourceSpan {
        let (offset, text) = self.lines[line];
        (offset, text.len().max(1)).into()
    }

    fn token_span(&self, line: usize, token_offset: usize, token: &str) -> SourceSpan {
        let (offset, _) = self.lines[line];
        (offset + token_offset, token.len()).into()
    }

    /// Advance past comment and blank lines; return the next content
    /// line index, or `None` at end of input.
    fn next_significant(&mut self) -> Option<usize> {
        while self.pos < self.lines.len() {
            let line = self.pos;
            let trimmed = self.lines[line].1.trim();
            self.pos += 1;
            if !trimmed.is_empty() && !trimmed.starts_with('%') {
                return Some(line);
            }
        }
        None
    }

    fn require_significant(&mut self, section: &'static str) -> Result<usize, ParseError> {
        self.next_significant()
            .ok_or(ParseError::MissingSection { section })
    }

    fn state_count(&mut self) -> Result<usize, ParseError> {
        let line = self.require_significant("state count")?;
        let text = self.lines[line].1.trim();
        text.parse::<usize>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| ParseError::InvalidStateCount {
                found: text.to_string(),
                span: self.line_span(line),
                src: self.named_source(),
            })
    }

    fn symbol_line(&mut self, section: &'static str) -> Result<Vec<String>, ParseError> {
        let line = self.require_significant(section)?;
        Ok(tokens(self.lines[line].1)
            .into_iter()
            .map(|(_, t)| t.to_string())
            .collect())
    }

    /// A space-separated event list; a single `-` denotes the empty set.
    fn event_set(
        &mut self,
        section: &'static str,
        declared: &HashSet<&str>,
    ) -> Result<Vec<String>, ParseError> {
        let line = self.require_significant(section)?;
        let toks = tokens(self.lines[line].1);
        if let [(_, "-")] = toks.as_slice() {
            return Ok(Vec::new());
        }
        let mut out = Vec::with_capacity(toks.len());
        for (off, tok) in toks {
            if !declared.contains(tok) {
                return Err(ParseError::EventNotInAlphabet {
                    symbol: tok.to_string(),
                    span: self.token_span(line, off, tok),
                    src: self.named_source(),
                });
            }
            out.push(tok.to_string());
        }
        Ok(out)
    }

    /// The transition block: one `src sym dst` per line, ended by a
    /// blank line, an `Initial state` marker line, or end of input.
    fn transition_block(
        &mut self,
        builder: &mut AutomatonBuilder,
        num_states: usize,
    ) -> Result<(), ParseError> {
        while self.pos < self.lines.len() {
            let line = self.pos;
            let trimmed = self.lines[line].1.trim();
            self.pos += 1;
            if trimmed.starts_with('%') {
                continue;
            }
            if trimmed.is_empty() || is_initial_marker(trimmed) {
                break;
            }

            let toks = tokens(self.lines[line].1);
            let [(src_off, src_tok), (sym_off, sym_tok), (dst_off, dst_tok)] = toks.as_slice()
            else {
                return Err(self.invalid_transition(line));
            };
            let src = src_tok
                .parse::<usize>()
                .map_err(|_| self.invalid_transition(line))?;
            let dst = dst_tok
                .parse::<usize>()
                .map_err(|_| self.invalid_transition(line))?;
            let src = self.check_range(src, num_states, line, *src_off, src_tok)?;
            let dst = self.check_range(dst, num_states, line, *dst_off, dst_tok)?;

            let event = match builder.alphabet().resolve(sym_tok) {
                Some(event) => event,
                None => {
                    return Err(ParseError::EventNotInAlphabet {
                        symbol: sym_tok.to_string(),
                        span: self.token_span(line, *sym_off, sym_tok),
                        src: self.named_source(),
                    });
                }
            };
            builder.transition(src, event, dst);
        }
        Ok(())
    }

    fn invalid_transition(&self, line: usize) -> ParseError {
        ParseError::InvalidTransitionLine {
            line: self.lines[line].1.trim().to_string(),
            span: self.line_span(line),
            src: self.named_source(),
        }
    }

    /// Convert a 1-based file state id into the internal 0-based id.
    fn check_range(
        &self,
        state: usize,
        num_states: usize,
        line: usize,
        off: usize,
        tok: &str,
    ) -> Result<StateId, ParseError> {
        if state == 0 || state > num_states {
            return Err(ParseError::StateOutOfRange {
                state,
                bound: num_states,
                span: self.token_span(line, off, tok),
                src: self.named_source(),
            });
        }
        Ok(state - 1)
    }

    /// A space-separated state list; a single `-` denotes the empty set.
    fn state_set(
        &mut self,
        section: &'static str,
        num_states: usize,
    ) -> Result<Vec<StateId>, ParseError> {
        let line = self.require_significant(section)?;
        self.state_tokens(line, num_states)
    }

    /// Final states; a missing section at end of input counts as empty.
    fn final_states(&mut self, num_states: usize) -> Result<Vec<StateId>, ParseError> {
        match self.next_significant() {
            Some(line) => self.state_tokens(line, num_states),
            None => Ok(Vec::new()),
        }
    }

    fn state_tokens(&self, line: usize, num_states: usize) -> Result<Vec<StateId>, ParseError> {
        let toks = tokens(self.lines[line].1);
        if let [(_, "-")] = toks.as_slice() {
            return Ok(Vec::new());
        }
        let mut out = Vec::with_capacity(toks.len());
        for (off, tok) in toks {
            let state = tok.parse::<usize>().map_err(|_| ParseError::InvalidStateId {
                found: tok.to_string(),
                span: self.token_span(line, off, tok),
                src: self.named_source(),
            })?;
            out.push(self.check_range(state, num_states, line, off, tok)?);
        }
        Ok(out)
    }
}

fn is_initial_marker(trimmed: &str) -> bool {
    let lower = trimmed.to_ascii_lowercase();
    lower.starts_with("initial state")
}

fn tokens(line: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, ch) in line.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                out.push((s, &line[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push((s, &line[s..]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_description() {
        let source = "\
% detectable fault
2
a f
a
f
f
1 f 2
1 a 1
2 a 2

1
-
";
        let plant = parse_source(source, "test.fsm").unwrap();
        assert_eq!(plant.num_states(), 2);
        assert_eq!(plant.transitions().len(), 3);
        assert_eq!(plant.initial(), &[0]);
        assert!(plant.marked().is_empty());
        let f = plant.alphabet().resolve("f").unwrap();
        assert!(plant.alphabet().is_fault(f));
        assert!(!plant.alphabet().is_observable(f));
    }

    #[test]
    fn initial_state_marker_terminates_the_block() {
        let source = "\
1
a
a
-
-
1 a 1
Initial states
1
-
";
        let plant = parse_source(source, "test.fsm").unwrap();
        assert_eq!(plant.transitions().len(), 1);
        assert_eq!(plant.initial(), &[0]);
    }

    #[test]
    fn comments_are_ignored_inside_the_block() {
        let source = "\
1
a
a
-
-
% the only loop
1 a 1

1
1
";
        let plant = parse_source(source, "test.fsm").unwrap();
        assert_eq!(plant.transitions().len(), 1);
        assert_eq!(plant.marked(), &[0]);
    }

    #[test]
    fn empty_transition_block_is_allowed() {
        let source = "\
1
a
a
-
-

1
-
";
        let plant = parse_source(source, "test.fsm").unwrap();
        assert!(plant.transitions().is_empty());
    }

    #[test]
    fn rejects_malformed_transition_line() {
        let source = "\
1
a
a
-
-
1 a
";
        let err = parse_source(source, "test.fsm").unwrap_err();
        assert!(matches!(err, ParseError::InvalidTransitionLine { line, .. } if line == "1 a"));
    }

    #[test]
    fn rejects_state_out_of_range() {
        let source = "\
1
a
a
-
-
1 a 2

1
";
        let err = parse_source(source, "test.fsm").unwrap_err();
        assert!(matches!(
            err,
            ParseError::StateOutOfRange { state: 2, bound: 1, .. }
        ));
    }

    #[test]
    fn rejects_unknown_transition_event() {
        let source = "\
1
a
a
-
-
1 b 1

1
";
        let err = parse_source(source, "test.fsm").unwrap_err();
        assert!(matches!(err, ParseError::EventNotInAlphabet { symbol, .. } if symbol == "b"));
    }

    #[test]
    fn rejects_unknown_classified_event() {
        let source = "\
1
a
a x
-
-
1 a 1

1
";
        let err = parse_source(source, "test.fsm").unwrap_err();
        assert!(matches!(err, ParseError::EventNotInAlphabet { symbol, .. } if symbol == "x"));
    }

    #[test]
    fn rejects_missing_sections() {
        let err = parse_source("2\na b\n", "test.fsm").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingSection {
                section: "observable events"
            }
        ));
    }

    #[test]
    fn empty_initial_set_is_a_model_error() {
        let source = "\
1
a
a
-
-
1 a 1

-
";
        let err = parse_source(source, "test.fsm").unwrap_err();
        assert!(matches!(err, ParseError::Model(ModelError::EmptyInitialSet)));
    }

    #[test]
    fn observable_fault_is_not_rejected() {
        let source = "\
1
a f
a f
-
f
1 f 1

1
";
        let plant = parse_source(source, "test.fsm").unwrap();
        let f = plant.alphabet().resolve("f").unwrap();
        assert!(plant.alphabet().is_observable(f));
        assert!(plant.alphabet().is_fault(f));
    }
}
