//! Leaf decoders and the decoding combinators.
//!
//! Each function returns a fresh [`Decoder`]; none of them keep state, so the
//! result can be stored in a `static` `LazyLock`, a struct field, or rebuilt
//! on demand.
//!
//! ```
//! use msgpack_combinators::decode;
//!
//! #[derive(Debug, PartialEq)]
//! struct User {
//!     name: String,
//!     admin: bool,
//!     karma: i32,
//! }
//!
//! let user = decode::combine3(
//!     |name, admin, karma| User { name, admin, karma },
//!     decode::str(),
//!     decode::bool(),
//!     decode::int(),
//! );
//! let bytes = [0x93, 0xa3, b'b', b'o', b'b', 0xc3, 0x2a];
//! assert_eq!(
//!     user.decode(&bytes).unwrap(),
//!     User { name: "bob".into(), admin: true, karma: 42 }
//! );
//! ```

use crate::combine::{for_each_arity, read_record_header, skip_surplus, FieldCount};
use crate::decoder::Decoder;
use crate::value::{self, DynamicValue, ValueOptions};
use crate::wire::WireTag;

pub fn nil() -> Decoder<()> {
    Decoder::new(|unpacker| unpacker.unpack_nil())
}

pub fn bool() -> Decoder<bool> {
    Decoder::new(|unpacker| unpacker.unpack_bool())
}

/// Any integer that fits `i32`; wider values fail with `IntegerOverflow`.
pub fn int() -> Decoder<i32> {
    Decoder::new(|unpacker| unpacker.unpack_int())
}

pub fn long() -> Decoder<i64> {
    Decoder::new(|unpacker| unpacker.unpack_long())
}

/// Any wire integer, `i64::MIN..=u64::MAX`.
pub fn big_int() -> Decoder<i128> {
    Decoder::new(|unpacker| unpacker.unpack_big_int())
}

/// A float32 or float64, narrowed to `f32`.
pub fn float() -> Decoder<f32> {
    Decoder::new(|unpacker| unpacker.unpack_float())
}

pub fn double() -> Decoder<f64> {
    Decoder::new(|unpacker| unpacker.unpack_double())
}

pub fn str() -> Decoder<String> {
    Decoder::new(|unpacker| unpacker.unpack_string())
}

pub fn binary() -> Decoder<Vec<u8>> {
    Decoder::new(|unpacker| unpacker.unpack_binary())
}

/// An array whose every element is read with `decoder`.
pub fn list_of<T: 'static>(decoder: Decoder<T>) -> Decoder<Vec<T>> {
    Decoder::new(move |unpacker| {
        let count = unpacker.unpack_array_header()?;
        (0..count).map(|_| decoder.unpack(unpacker)).collect()
    })
}

/// A map read as key/value pairs in wire order.
pub fn map_of<K: 'static, V: 'static>(
    keys: Decoder<K>,
    values: Decoder<V>,
) -> Decoder<Vec<(K, V)>> {
    Decoder::new(move |unpacker| {
        let count = unpacker.unpack_map_header()?;
        (0..count)
            .map(|_| Ok((keys.unpack(unpacker)?, values.unpack(unpacker)?)))
            .collect()
    })
}

/// `None` for a nil value, otherwise whatever `decoder` reads.
pub fn nullable<T: 'static>(decoder: Decoder<T>) -> Decoder<Option<T>> {
    Decoder::new(move |unpacker| {
        if unpacker.next_tag()? == WireTag::Nil {
            unpacker.unpack_nil()?;
            Ok(None)
        } else {
            decoder.unpack(unpacker).map(Some)
        }
    })
}

/// Reads nothing and yields `value`.
pub fn succeed<T>(value: T) -> Decoder<T>
where
    T: Clone + Send + Sync + 'static,
{
    Decoder::new(move |_| Ok(value.clone()))
}

/// Any value, decoded into a [`DynamicValue`] with default options.
pub fn value() -> Decoder<DynamicValue> {
    value_with(ValueOptions::default())
}

pub fn value_with(options: ValueOptions) -> Decoder<DynamicValue> {
    Decoder::new(move |unpacker| value::read_value(unpacker, &options, 0))
}

macro_rules! combine_decoder {
    (@body $policy:expr, $n:literal, $f:ident; $($d:ident),+) => {
        Decoder::new(move |unpacker| {
            let surplus = read_record_header(unpacker, $n, $policy)?;
            $(let $d = $d.unpack(unpacker)?;)+
            skip_surplus(unpacker, surplus)?;
            Ok($f($($d),+))
        })
    };
    ($n:literal, $name:ident, $exact:ident, $record:ident; $($v:ident $d:ident $i:tt),+) => {
        #[doc = concat!(
            "Decodes a ", stringify!($n), "-field record and combines the fields with `f`.\n\n",
            "The array may carry extra trailing elements; they are skipped."
        )]
        #[allow(clippy::too_many_arguments)]
        pub fn $name<$($v,)+ T, F>(f: F, $($d: Decoder<$v>),+) -> Decoder<T>
        where
            $($v: 'static,)+
            T: 'static,
            F: Fn($($v),+) -> T + Send + Sync + 'static,
        {
            combine_decoder!(@body FieldCount::AtLeast, $n, f; $($d),+)
        }

        #[doc = concat!(
            "Like [`", stringify!($name), "`], but the array must hold exactly ",
            stringify!($n), " element(s)."
        )]
        #[allow(clippy::too_many_arguments)]
        pub fn $exact<$($v,)+ T, F>(f: F, $($d: Decoder<$v>),+) -> Decoder<T>
        where
            $($v: 'static,)+
            T: 'static,
            F: Fn($($v),+) -> T + Send + Sync + 'static,
        {
            combine_decoder!(@body FieldCount::Exact, $n, f; $($d),+)
        }
    };
}

for_each_arity!(combine_decoder);
