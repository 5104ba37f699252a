#![allow(missing_docs)]

use parking_lot::Once;

pub(crate) fn init() {
    static SET_LOGGER_ONCE: Once = Once::new();
    SET_LOGGER_ONCE.call_once(env_logger::init);
}

crate::schema! {
    @(crate)
    /// The default test schema.
    pub TestSchema { Comp1, Comp2, Comp3 }

    @(crate)
    /// A schema whose masks span more than one byte.
    pub WideSchema(index = u16) {
        Comp1, Tag<1>, Tag<2>, Tag<3>, Tag<4>, Tag<5>, Tag<6>, Tag<7>, Tag<8>, Comp2,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comp1(pub i32);

#[derive(Debug, Clone, PartialEq)]
pub struct Comp2(pub i32);

#[derive(Debug, Clone, PartialEq)]
pub struct Comp3(pub String);

/// A marker component distinguished by its parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tag<const N: usize>;
