//! [`Encoder`] and [`Emit`], the writing side of the combinators.

use std::fmt;
use std::sync::Arc;

use crate::error::CodecError;
use crate::wire::Packer;

type PackFn<T> = dyn Fn(&T, &mut Packer) -> Result<(), CodecError> + Send + Sync;
type EmitFn = dyn Fn(&mut Packer) -> Result<(), CodecError> + Send + Sync;

/// Writes a `T` to a [`Packer`].
///
/// Like [`Decoder`](crate::Decoder), an encoder is immutable and cheap to
/// clone. The same value always produces the same bytes.
pub struct Encoder<T> {
    run: Arc<PackFn<T>>,
}

impl<T> Clone for Encoder<T> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<T> fmt::Debug for Encoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder")
            .field("input", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: 'static> Encoder<T> {
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&T, &mut Packer) -> Result<(), CodecError> + Send + Sync + 'static,
    {
        Self { run: Arc::new(run) }
    }

    /// Writes `value` to `packer`.
    pub fn pack(&self, value: &T, packer: &mut Packer) -> Result<(), CodecError> {
        (self.run)(value, packer)
    }

    /// Encodes `value` into a fresh buffer.
    pub fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let mut packer = Packer::new();
        self.pack(value, &mut packer)?;
        Ok(packer.into_bytes())
    }

    /// Builds an encoder for `U` by first projecting it to `T`.
    ///
    /// ```
    /// use msgpack_combinators::encode;
    ///
    /// struct UserId(i32);
    /// let user_id = encode::int().contramap(|id: &UserId| id.0);
    /// assert_eq!(user_id.encode(&UserId(7)).unwrap(), [0x07]);
    /// ```
    pub fn contramap<U, F>(self, f: F) -> Encoder<U>
    where
        U: 'static,
        F: Fn(&U) -> T + Send + Sync + 'static,
    {
        Encoder::new(move |value, packer| self.pack(&f(value), packer))
    }

    /// Captures `value` into a deferred write.
    pub fn emit(&self, value: T) -> Emit
    where
        T: Send + Sync,
    {
        let encoder = self.clone();
        Emit::new(move |packer| encoder.pack(&value, packer))
    }
}

/// A deferred write of one or more already-chosen values.
///
/// `Emit`s are what [`encode::array`](crate::encode::array) and
/// [`encode::map`](crate::encode::map) assemble; they let a caller list the
/// fields of a record without naming a Rust type for it.
#[derive(Clone)]
pub struct Emit {
    run: Arc<EmitFn>,
}

impl fmt::Debug for Emit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Emit")
    }
}

impl Emit {
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&mut Packer) -> Result<(), CodecError> + Send + Sync + 'static,
    {
        Self { run: Arc::new(run) }
    }

    pub fn write(&self, packer: &mut Packer) -> Result<(), CodecError> {
        (self.run)(packer)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, CodecError> {
        let mut packer = Packer::new();
        self.write(&mut packer)?;
        Ok(packer.into_bytes())
    }
}
