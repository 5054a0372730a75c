//! Recursive-descent parser for URI Charge values.

use uricharge_tokenizer::{
    CharClass, Cursor, StrCursor, TokenKind, Tokenizer, classify, is_strict_boundary,
};

use crate::receiver::{Receiver, ValueRx};
use crate::registry::{DEFAULT_REGISTRY, Registry};
use crate::{OpaqueRx, Scalar, decode_key, decode_scalar, percent_decode};
#[allow(unused_imports)]
use crate::{debug, trace};

/// Nesting depth beyond which groups are kept as raw text.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parser configuration.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'r> {
    registry: &'r Registry,
    max_depth: usize,
}

/// The outcome of a parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    /// The parsed value.
    pub charge: T,
    /// Byte offset where parsing stopped: an unmatched `)` or the end of
    /// input.
    pub end: usize,
}

impl Default for Parser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<'static> {
    /// A parser using [`DEFAULT_REGISTRY`].
    pub fn new() -> Self {
        Self {
            registry: &DEFAULT_REGISTRY,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl<'r> Parser<'r> {
    /// Use `registry` to resolve entities and directives.
    pub fn with_registry<'a>(self, registry: &'a Registry) -> Parser<'a> {
        Parser {
            registry,
            max_depth: self.max_depth,
        }
    }

    /// Set the nesting depth beyond which groups are kept as raw text.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse a value from `input`.
    pub fn parse<R: Receiver>(&self, input: &str, rx: &mut R) -> Parsed<R::Charge> {
        self.parse_cursor(StrCursor::new(input), rx, None)
    }

    /// Parse a value from `input`, continuing `base`.
    ///
    /// A map continues a map base: entries are added to it, and entries
    /// already present are continued in turn. Any other value replaces the
    /// base.
    pub fn parse_into<R: Receiver>(
        &self,
        input: &str,
        rx: &mut R,
        base: R::Charge,
    ) -> Parsed<R::Charge> {
        self.parse_cursor(StrCursor::new(input), rx, Some(base))
    }

    /// Parse a value from any cursor.
    pub fn parse_cursor<'src, C: Cursor<'src>, R: Receiver>(
        &self,
        cursor: C,
        rx: &mut R,
        base: Option<R::Charge>,
    ) -> Parsed<R::Charge> {
        let mut parser = ValueParser {
            registry: self.registry,
            max_depth: self.max_depth,
            tokens: Tokenizer::new(cursor),
        };
        let charge = parser.parse_value(rx, 0, base);
        let end = parser.tokens.position();
        trace!("Parsed value ending at {}", end);
        Parsed { charge, end }
    }

    /// Skip over one value in `input`, returning the offset where it ends.
    pub fn skip(&self, input: &str) -> usize {
        self.parse(input, &mut OpaqueRx).end
    }
}

/// Where parsed items of a comma-separated sequence go.
trait Sink<R: Receiver> {
    fn add(&mut self, rx: &mut R, value: R::Charge);

    /// A comma was seen.
    fn mark_list(&mut self, _rx: &mut R) {}

    fn take_base(&mut self) -> Option<R::Charge> {
        None
    }

    /// The receiver refused the list these items would form.
    fn declined(&self) -> bool {
        false
    }
}

impl<R: Receiver> Sink<R> for ValueRx<R> {
    fn add(&mut self, rx: &mut R, value: R::Charge) {
        ValueRx::add(self, rx, value);
    }

    fn mark_list(&mut self, rx: &mut R) {
        self.as_list(rx);
    }

    fn take_base(&mut self) -> Option<R::Charge> {
        ValueRx::take_base(self)
    }

    fn declined(&self) -> bool {
        self.is_declined()
    }
}

struct ListSink<L>(L);

impl<R: Receiver> Sink<R> for ListSink<R::List> {
    fn add(&mut self, rx: &mut R, value: R::Charge) {
        rx.add(&mut self.0, value);
    }
}

struct ArgSink<D>(D);

impl<R: Receiver> Sink<R> for ArgSink<R::Directive> {
    fn add(&mut self, rx: &mut R, value: R::Charge) {
        rx.add_arg(&mut self.0, value);
    }
}

/// The entry or suffix a map starts with, already read by the caller.
enum FirstKey {
    None,
    Entry(String),
    Suffix(String),
}

/// An item of a sequence, and whether it ended with a closing parenthesis.
struct Item<T> {
    value: T,
    closed: bool,
}

struct ValueParser<'p, 'src, C> {
    registry: &'p Registry,
    max_depth: usize,
    tokens: Tokenizer<'src, C>,
}

impl<'p, 'src, C: Cursor<'src>> ValueParser<'p, 'src, C> {
    fn parse_value<R: Receiver>(
        &mut self,
        rx: &mut R,
        depth: usize,
        base: Option<R::Charge>,
    ) -> R::Charge {
        let mut value = rx.rx_value(base);
        self.parse_items(rx, &mut value, depth);
        value.end(rx)
    }

    /// Parse items until an unmatched `)` or the end of input.
    fn parse_items<R: Receiver, S: Sink<R>>(&mut self, rx: &mut R, sink: &mut S, depth: usize) {
        let mut seen_comma = false;
        let mut segment_empty = true;
        let mut after_close = false;

        loop {
            let newline = self.tokens.skip_trivia();
            match self.tokens.peek_kind() {
                TokenKind::Eof | TokenKind::RParen => break,
                TokenKind::Comma => {
                    self.tokens.next_token();
                    if seen_comma && segment_empty {
                        let empty = rx.create_value(Scalar::empty());
                        sink.add(rx, empty);
                    }
                    seen_comma = true;
                    segment_empty = true;
                    after_close = false;
                    sink.mark_list(rx);
                }
                TokenKind::LParen => {
                    self.tokens.next_token();
                    let list = self.parse_nested_list(rx, depth);
                    sink.add(rx, list);
                    sink.mark_list(rx);
                    segment_empty = false;
                    after_close = true;
                }
                TokenKind::Text if after_close && !newline => {
                    trace!("Map juxtaposed after a closed item");
                    let map = self.parse_map(rx, None, FirstKey::None, depth);
                    sink.add(rx, map);
                    segment_empty = false;
                    after_close = false;
                }
                _ => {
                    let base = sink.take_base();
                    let item = self.parse_item(rx, depth, base);
                    sink.add(rx, item.value);
                    segment_empty = false;
                    after_close = item.closed;
                }
            }

            if sink.declined() {
                debug!("Receiver declined a list, skipping its items");
                self.skip_items(depth);
                break;
            }
        }
    }

    /// Parse items through [`OpaqueRx`], discarding them.
    fn skip_items(&mut self, depth: usize) {
        let mut rest = ValueRx::<OpaqueRx>::new(None);
        self.parse_items(&mut OpaqueRx, &mut rest, depth);
    }

    /// Parse the content of a `(` group as a list. The `(` is consumed.
    fn parse_nested_list<R: Receiver>(&mut self, rx: &mut R, depth: usize) -> R::Charge {
        if depth >= self.max_depth {
            debug!("Nesting too deep, keeping group as text");
            let raw = self.raw_group();
            return rx.create_value(Scalar::String(format!("({raw})")));
        }
        let Some(list) = rx.rx_list() else {
            debug!("Receiver declined a nested list, skipping it");
            self.skip_items(depth + 1);
            self.expect_close();
            return rx.none();
        };
        let mut list = ListSink(list);
        self.parse_items(rx, &mut list, depth + 1);
        self.expect_close();
        rx.end_list(list.0)
    }

    /// Parse an item starting with a text token.
    fn parse_item<R: Receiver>(
        &mut self,
        rx: &mut R,
        depth: usize,
        base: Option<R::Charge>,
    ) -> Item<R::Charge> {
        let first = self.tokens.peek_token().text.chars().next().map(classify);
        match first {
            Some(CharClass::Apostrophe) => {
                let (raw, _) = self.raw_run();
                let value = percent_decode(&raw[1..]);
                trace!("Quoted string {:?}", value);
                Item {
                    value: rx.create_value(Scalar::String(value)),
                    closed: false,
                }
            }
            Some(CharClass::Exclamation) => self.parse_bang(rx, depth, base),
            Some(CharClass::Dollar) => {
                let key = self.text_run();
                let first = if self.opens_entry() {
                    FirstKey::Entry(decode_key(&key))
                } else if key != "$" {
                    FirstKey::Suffix(decode_key(&key))
                } else {
                    FirstKey::None
                };
                Item {
                    value: self.parse_map(rx, base, first, depth),
                    closed: false,
                }
            }
            _ => {
                let run = self.text_run();
                if self.opens_entry() {
                    let first = FirstKey::Entry(decode_key(&run));
                    Item {
                        value: self.parse_map(rx, base, first, depth),
                        closed: false,
                    }
                } else {
                    Item {
                        value: rx.create_value(decode_scalar(&run)),
                        closed: false,
                    }
                }
            }
        }
    }

    /// Parse an item starting with `!`: a directive, an entity or `true`.
    fn parse_bang<R: Receiver>(
        &mut self,
        rx: &mut R,
        depth: usize,
        base: Option<R::Charge>,
    ) -> Item<R::Charge> {
        let first = self.tokens.next_token();
        let name = &first.text[1..];
        if !name.is_empty()
            && self.tokens.peek_kind() == TokenKind::LParen
            && self.registry.is_directive(name)
            && depth < self.max_depth
        {
            trace!("Directive {:?}", name);
            self.tokens.next_token();
            let value = match rx.rx_directive(name) {
                Some(directive) => {
                    let mut args = ArgSink(directive);
                    self.parse_items(rx, &mut args, depth + 1);
                    self.expect_close();
                    rx.end_directive(args.0)
                }
                None => {
                    debug!("Receiver declined directive {:?}, skipping it", name);
                    self.skip_items(depth + 1);
                    self.expect_close();
                    rx.none()
                }
            };
            return Item {
                value,
                closed: true,
            };
        }

        let (rest, open) = self.raw_run();
        let mut raw = first.text.into_owned();
        raw.push_str(&rest);
        for _ in 0..open {
            raw.push(')');
        }
        trace!("Entity {:?}", raw);

        let value = match raw.as_str() {
            "!" => rx.create_value(Scalar::Bool(true)),
            "!!" => match rx.rx_list() {
                Some(list) => rx.end_list(list),
                None => rx.none(),
            },
            "!()" => match rx.rx_map(base) {
                Some(map) => rx.end_map(map),
                None => rx.none(),
            },
            raw => match self.registry.entity(raw) {
                Some(scalar) => rx.create_value(scalar),
                None => rx.create_entity(raw),
            },
        };
        Item {
            value,
            closed: false,
        }
    }

    /// Parse a map starting with `first`, or skip it if the receiver declines
    /// one.
    fn parse_map<R: Receiver>(
        &mut self,
        rx: &mut R,
        base: Option<R::Charge>,
        first: FirstKey,
        depth: usize,
    ) -> R::Charge {
        match rx.rx_map(base) {
            Some(mut map) => {
                self.parse_map_entries(rx, &mut map, first, depth);
                rx.end_map(map)
            }
            None => {
                debug!("Receiver declined a map, skipping it");
                self.parse_map_entries(&mut OpaqueRx, &mut (), first, depth);
                rx.none()
            }
        }
    }

    fn parse_map_entries<R: Receiver>(
        &mut self,
        rx: &mut R,
        map: &mut R::Map,
        first: FirstKey,
        depth: usize,
    ) {
        match first {
            FirstKey::None => {}
            FirstKey::Entry(key) => self.parse_entry(rx, map, key, depth),
            FirstKey::Suffix(key) => rx.add_suffix(map, key),
        }
        self.parse_map_tail(rx, map, depth);
    }

    /// Parse entries following the first one, until something that is not a
    /// key shows up.
    fn parse_map_tail<R: Receiver>(&mut self, rx: &mut R, map: &mut R::Map, depth: usize) {
        loop {
            self.tokens.skip_trivia();
            if self.tokens.peek_kind() != TokenKind::Text {
                break;
            }
            let key = decode_key(&self.text_run());
            if self.opens_entry() {
                self.parse_entry(rx, map, key, depth);
            } else {
                trace!("Suffix {:?}", key);
                rx.add_suffix(map, key);
            }
        }
    }

    /// Parse `(value)` of an entry. The next token is the `(`.
    fn parse_entry<R: Receiver>(&mut self, rx: &mut R, map: &mut R::Map, key: String, depth: usize) {
        trace!("Entry {:?}", key);
        self.tokens.next_token();

        if depth >= self.max_depth {
            debug!("Nesting too deep, keeping entry value as text");
            let raw = self.raw_group();
            let value = rx.create_value(Scalar::String(raw));
            rx.put(map, key, value);
            return;
        }

        if key.is_empty() && self.tokens.peek_kind() == TokenKind::RParen {
            // `$()` is an empty map
            self.tokens.next_token();
            return;
        }

        let base = rx.take_entry(map, &key);
        let value = self.parse_value(rx, depth + 1, base);
        self.expect_close();
        rx.put(map, key, value);
    }

    /// Whether the next token opens an entry for the key just read.
    ///
    /// In-line whitespace may separate a key from its `(`, a line break may
    /// not.
    fn opens_entry(&mut self) -> bool {
        let newline = self.tokens.skip_trivia();
        self.tokens.peek_kind() == TokenKind::LParen && is_strict_boundary('(', newline)
    }

    /// Text tokens joined by the in-line whitespace between them, up to a
    /// boundary or a line break.
    fn text_run(&mut self) -> String {
        let mut run = String::new();
        let mut gap = String::new();
        loop {
            match self.tokens.peek_kind() {
                TokenKind::Text => {
                    run.push_str(&gap);
                    gap.clear();
                    run.push_str(&self.tokens.next_token().text);
                }
                TokenKind::Whitespace => gap.push_str(&self.tokens.next_token().text),
                _ => return run,
            }
        }
    }

    /// Raw text up to a depth-zero `,` or line break, an unmatched `)` or the
    /// end of input, with parentheses balanced. Returns the text and the
    /// number of groups left open.
    fn raw_run(&mut self) -> (String, usize) {
        let mut raw = String::new();
        let mut depth = 0usize;
        loop {
            match self.tokens.peek_kind() {
                TokenKind::Eof => break,
                TokenKind::Comma | TokenKind::Newline | TokenKind::RParen if depth == 0 => break,
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth -= 1,
                _ => {}
            }
            raw.push_str(&self.tokens.next_token().text);
        }
        let trimmed = raw.trim_end_matches(|c: char| c.is_ascii_whitespace()).len();
        raw.truncate(trimmed);
        (raw, depth)
    }

    /// Raw text up to the `)` matching an already consumed `(`, which is
    /// consumed too.
    fn raw_group(&mut self) -> String {
        let mut raw = String::new();
        let mut depth = 0usize;
        loop {
            match self.tokens.peek_kind() {
                TokenKind::Eof => break,
                TokenKind::RParen if depth == 0 => {
                    self.tokens.next_token();
                    break;
                }
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth -= 1,
                _ => {}
            }
            raw.push_str(&self.tokens.next_token().text);
        }
        raw
    }

    /// Consume the `)` closing a group, if the input has one.
    fn expect_close(&mut self) {
        if self.tokens.peek_kind() == TokenKind::RParen {
            self.tokens.next_token();
        }
    }
}
