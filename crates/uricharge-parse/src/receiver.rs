//! The protocol between the parser and whatever it builds.

use crate::Scalar;

/// Receives parsed values from the [`Parser`](crate::Parser).
///
/// The parser never constructs values itself. It asks the receiver for an
/// accumulator whenever a map, list or directive starts, feeds it the parsed
/// children, and hands it back to be finished into a [`Receiver::Charge`].
///
/// A receiver may decline a shape by returning `None` from `rx_map`,
/// `rx_list` or `rx_directive`. The parser then skips the construct and
/// receives [`Receiver::none`] in its place.
pub trait Receiver {
    /// A finished value.
    type Charge;
    /// Accumulator for map entries.
    type Map;
    /// Accumulator for list items.
    type List;
    /// Accumulator for directive arguments.
    type Directive;

    /// The absent value. Stands in for constructs the receiver declined.
    fn none(&mut self) -> Self::Charge;

    /// A scalar value.
    fn create_value(&mut self, value: Scalar) -> Self::Charge;

    /// An entity not known to the registry. `raw` includes the leading `!`.
    fn create_entity(&mut self, raw: &str) -> Self::Charge;

    /// Start a value made of comma-separated items.
    ///
    /// `base` is the value this one continues, if any.
    fn rx_value(&mut self, base: Option<Self::Charge>) -> ValueRx<Self>
    where
        Self: Sized,
    {
        ValueRx::new(base)
    }

    /// Start a map, continuing `base` if it is one.
    fn rx_map(&mut self, base: Option<Self::Charge>) -> Option<Self::Map>;

    /// Set an entry of a map.
    fn put(&mut self, map: &mut Self::Map, key: String, value: Self::Charge);

    /// Set an entry written as a bare key without a value.
    fn add_suffix(&mut self, map: &mut Self::Map, key: String) {
        let value = self.create_value(Scalar::empty());
        self.put(map, key, value);
    }

    /// Take the current value of a map entry out, to be continued by the
    /// entry about to be parsed.
    fn take_entry(&mut self, map: &mut Self::Map, key: &str) -> Option<Self::Charge> {
        let _ = (map, key);
        None
    }

    /// Finish a map.
    fn end_map(&mut self, map: Self::Map) -> Self::Charge;

    /// Start a list.
    fn rx_list(&mut self) -> Option<Self::List>;

    /// Append an item to a list.
    fn add(&mut self, list: &mut Self::List, value: Self::Charge);

    /// Finish a list.
    fn end_list(&mut self, list: Self::List) -> Self::Charge;

    /// Start a directive. `name` excludes the leading `!`.
    fn rx_directive(&mut self, name: &str) -> Option<Self::Directive>;

    /// Append an argument to a directive.
    fn add_arg(&mut self, directive: &mut Self::Directive, value: Self::Charge);

    /// Finish a directive.
    fn end_directive(&mut self, directive: Self::Directive) -> Self::Charge;
}

/// Accumulator for a value that turns into a list as soon as a second item
/// or a comma shows up.
pub struct ValueRx<R: Receiver> {
    base: Option<R::Charge>,
    state: ValueState<R>,
}

enum ValueState<R: Receiver> {
    Empty,
    Single(R::Charge),
    List(R::List),
    /// The receiver refused to start a list.
    Declined,
}

impl<R: Receiver> ValueRx<R> {
    /// Start accumulating a value continuing `base`.
    pub fn new(base: Option<R::Charge>) -> Self {
        Self {
            base,
            state: ValueState::Empty,
        }
    }

    /// Take the base out. Only the first item continues it.
    pub fn take_base(&mut self) -> Option<R::Charge> {
        self.base.take()
    }

    /// Add an item. Items are dropped once the receiver declined the list.
    pub fn add(&mut self, rx: &mut R, value: R::Charge) {
        self.state = match std::mem::replace(&mut self.state, ValueState::Empty) {
            ValueState::Empty => ValueState::Single(value),
            ValueState::Single(first) => match rx.rx_list() {
                Some(mut list) => {
                    rx.add(&mut list, first);
                    rx.add(&mut list, value);
                    ValueState::List(list)
                }
                None => ValueState::Declined,
            },
            ValueState::List(mut list) => {
                rx.add(&mut list, value);
                ValueState::List(list)
            }
            ValueState::Declined => ValueState::Declined,
        };
    }

    /// Make the value a list, whatever the number of items.
    pub fn as_list(&mut self, rx: &mut R) {
        self.state = match std::mem::replace(&mut self.state, ValueState::Empty) {
            ValueState::Empty => match rx.rx_list() {
                Some(list) => ValueState::List(list),
                None => ValueState::Declined,
            },
            ValueState::Single(first) => match rx.rx_list() {
                Some(mut list) => {
                    rx.add(&mut list, first);
                    ValueState::List(list)
                }
                None => ValueState::Declined,
            },
            state @ (ValueState::List(_) | ValueState::Declined) => state,
        };
    }

    /// Whether the receiver refused to turn this value into a list.
    pub fn is_declined(&self) -> bool {
        matches!(self.state, ValueState::Declined)
    }

    /// Finish the value. A value without items is the empty string, a
    /// declined list is [`Receiver::none`].
    pub fn end(self, rx: &mut R) -> R::Charge {
        match self.state {
            ValueState::Empty => rx.create_value(Scalar::empty()),
            ValueState::Single(value) => value,
            ValueState::List(list) => rx.end_list(list),
            ValueState::Declined => rx.none(),
        }
    }
}

/// A receiver that discards everything. Used to skip over a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpaqueRx;

impl Receiver for OpaqueRx {
    type Charge = ();
    type Map = ();
    type List = ();
    type Directive = ();

    fn none(&mut self) {}

    fn create_value(&mut self, _value: Scalar) {}

    fn create_entity(&mut self, _raw: &str) {}

    fn rx_map(&mut self, _base: Option<()>) -> Option<()> {
        Some(())
    }

    fn put(&mut self, _map: &mut (), _key: String, _value: ()) {}

    fn add_suffix(&mut self, _map: &mut (), _key: String) {}

    fn end_map(&mut self, _map: ()) {}

    fn rx_list(&mut self) -> Option<()> {
        Some(())
    }

    fn add(&mut self, _list: &mut (), _value: ()) {}

    fn end_list(&mut self, _list: ()) {}

    fn rx_directive(&mut self, _name: &str) -> Option<()> {
        Some(())
    }

    fn add_arg(&mut self, _directive: &mut (), _value: ()) {}

    fn end_directive(&mut self, _directive: ()) {}
}
