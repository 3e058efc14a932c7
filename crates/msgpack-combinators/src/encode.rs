//! Leaf encoders and the encoding combinators.
//!
//! Two styles are supported. Typed encoders (`int()`, `list_of(..)`,
//! `record3(..)`) describe how a Rust value is written. [`array`] and [`map`]
//! instead assemble already-captured [`Emit`]s, which is handy when the shape
//! is only known at the call site:
//!
//! ```
//! use msgpack_combinators::encode;
//!
//! let row = encode::array(vec![
//!     encode::bool().emit(true),
//!     encode::str().emit("hi".to_owned()),
//!     encode::int().emit(42),
//! ]);
//! assert_eq!(row.to_vec().unwrap(), [0x93, 0xc3, 0xa2, b'h', b'i', 0x2a]);
//! ```

use crate::combine::for_each_arity;
use crate::encoder::{Emit, Encoder};
use crate::value::{self, DynamicValue, ValueOptions};

/// Writes a nil.
pub fn nil() -> Emit {
    Emit::new(|packer| {
        packer.pack_nil();
        Ok(())
    })
}

pub fn bool() -> Encoder<bool> {
    Encoder::new(|value, packer| {
        packer.pack_bool(*value);
        Ok(())
    })
}

pub fn short() -> Encoder<i16> {
    Encoder::new(|value, packer| {
        packer.pack_short(*value);
        Ok(())
    })
}

pub fn int() -> Encoder<i32> {
    Encoder::new(|value, packer| {
        packer.pack_int(*value);
        Ok(())
    })
}

pub fn long() -> Encoder<i64> {
    Encoder::new(|value, packer| {
        packer.pack_long(*value);
        Ok(())
    })
}

/// Fails with `IntegerOverflow` outside `i64::MIN..=u64::MAX`.
pub fn big_int() -> Encoder<i128> {
    Encoder::new(|value, packer| packer.pack_big_int(*value))
}

/// Always a float32.
pub fn float() -> Encoder<f32> {
    Encoder::new(|value, packer| {
        packer.pack_float(*value);
        Ok(())
    })
}

/// Always a float64.
pub fn double() -> Encoder<f64> {
    Encoder::new(|value, packer| {
        packer.pack_double(*value);
        Ok(())
    })
}

pub fn str() -> Encoder<String> {
    Encoder::new(|value: &String, packer| packer.pack_string(value))
}

pub fn binary() -> Encoder<Vec<u8>> {
    Encoder::new(|value: &Vec<u8>, packer| packer.pack_binary(value))
}

pub fn list_of<T: 'static>(encoder: Encoder<T>) -> Encoder<Vec<T>> {
    Encoder::new(move |items: &Vec<T>, packer| {
        packer.pack_array_header(items.len())?;
        items.iter().try_for_each(|item| encoder.pack(item, packer))
    })
}

/// Writes key/value pairs as a map, in the order given.
pub fn map_of<K: 'static, V: 'static>(
    keys: Encoder<K>,
    values: Encoder<V>,
) -> Encoder<Vec<(K, V)>> {
    Encoder::new(move |entries: &Vec<(K, V)>, packer| {
        packer.pack_map_header(entries.len())?;
        for (key, value) in entries {
            keys.pack(key, packer)?;
            values.pack(value, packer)?;
        }
        Ok(())
    })
}

/// Writes nil for `None`, otherwise delegates to `encoder`.
pub fn nullable<T: 'static>(encoder: Encoder<T>) -> Encoder<Option<T>> {
    Encoder::new(move |value: &Option<T>, packer| match value {
        Some(inner) => encoder.pack(inner, packer),
        None => {
            packer.pack_nil();
            Ok(())
        }
    })
}

pub fn value() -> Encoder<DynamicValue> {
    value_with(ValueOptions::default())
}

pub fn value_with(options: ValueOptions) -> Encoder<DynamicValue> {
    Encoder::new(move |value, packer| value::write_value(value, packer, &options, 0))
}

/// Writes the emits as one array.
pub fn array(items: Vec<Emit>) -> Emit {
    Emit::new(move |packer| {
        packer.pack_array_header(items.len())?;
        items.iter().try_for_each(|item| item.write(packer))
    })
}

/// Writes the emit pairs as one map.
pub fn map(entries: Vec<(Emit, Emit)>) -> Emit {
    Emit::new(move |packer| {
        packer.pack_map_header(entries.len())?;
        for (key, value) in &entries {
            key.write(packer)?;
            value.write(packer)?;
        }
        Ok(())
    })
}

macro_rules! record_encoder {
    ($n:literal, $combine:ident, $exact:ident, $name:ident; $($v:ident $e:ident $i:tt),+) => {
        #[doc = concat!(
            "Writes a ", stringify!($n), "-field record: `project` splits the value ",
            "into its fields, which are written as one array in order.\n\n",
            "The bytes are what `decode::", stringify!($combine), "` reads."
        )]
        #[allow(clippy::too_many_arguments)]
        pub fn $name<$($v,)+ T, P>(project: P, $($e: Encoder<$v>),+) -> Encoder<T>
        where
            $($v: 'static,)+
            T: 'static,
            P: Fn(&T) -> ($($v,)+) + Send + Sync + 'static,
        {
            Encoder::new(move |value, packer| {
                let fields = project(value);
                packer.pack_array_header($n)?;
                $($e.pack(&fields.$i, packer)?;)+
                Ok(())
            })
        }
    };
}

for_each_arity!(record_encoder);
