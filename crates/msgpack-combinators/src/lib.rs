//! Typed MessagePack decoders and encoders built from small combinators.
//!
//! A [`Decoder<T>`] reads one `T` from an [`Unpacker`]; an [`Encoder<T>`]
//! writes one `T` to a [`Packer`]. Leaves for the wire types live in
//! [`decode`] and [`encode`]; records of up to [`MAX_ARITY`] fields are read
//! with `decode::combineN` and written with `encode::recordN`. Payloads of
//! unknown shape go through [`DynamicValue`].
//!
//! # Example
//!
//! ```
//! use msgpack_combinators::{decode, encode};
//!
//! let row = decode::combine3(
//!     |flag, label, n| (flag, label, n),
//!     decode::bool(),
//!     decode::str(),
//!     decode::int(),
//! );
//! let bytes = encode::array(vec![
//!     encode::bool().emit(true),
//!     encode::str().emit("hi".to_owned()),
//!     encode::int().emit(42),
//! ])
//! .to_vec()
//! .unwrap();
//! assert_eq!(row.decode(&bytes).unwrap(), (true, "hi".to_owned(), 42));
//! ```

mod decoder;
mod encoder;
mod json;
mod trace;
mod value;

pub mod combine;
pub mod decode;
pub mod encode;
pub mod error;
pub mod wire;

pub use combine::{FieldCount, MAX_ARITY};
pub use decoder::Decoder;
pub use encoder::{Emit, Encoder};
pub use error::CodecError;
pub use json::BIN_URI_START;
pub use trace::{tracing_hook, TraceEvent, TraceHook};
pub use value::{DynamicValue, ValueOptions};
pub use wire::{Packer, Unpacker, WireTag};
