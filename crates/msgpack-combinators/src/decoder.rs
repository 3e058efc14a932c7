//! [`Decoder`]: a reusable, composable reader of one typed value.

use std::fmt;
use std::sync::Arc;

use crate::error::CodecError;
use crate::wire::Unpacker;

type UnpackFn<T> = dyn Fn(&mut Unpacker<'_>) -> Result<T, CodecError> + Send + Sync;

/// Reads a `T` from an [`Unpacker`], advancing it past the consumed bytes.
///
/// Decoders hold no per-call state: build them once, clone them freely (a
/// clone is an `Arc` bump) and run them from any thread, each call with its
/// own cursor.
///
/// ```
/// use msgpack_combinators::decode;
///
/// let point = decode::combine2(|x, y| (x, y), decode::int(), decode::int());
/// assert_eq!(point.decode(&[0x92, 0x01, 0x02]).unwrap(), (1, 2));
/// ```
pub struct Decoder<T> {
    run: Arc<UnpackFn<T>>,
}

impl<T> Clone for Decoder<T> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<T> fmt::Debug for Decoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("output", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: 'static> Decoder<T> {
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&mut Unpacker<'_>) -> Result<T, CodecError> + Send + Sync + 'static,
    {
        Self { run: Arc::new(run) }
    }

    /// Runs the decoder against `unpacker`.
    pub fn unpack(&self, unpacker: &mut Unpacker<'_>) -> Result<T, CodecError> {
        (self.run)(unpacker)
    }

    /// Decodes one value from the start of `bytes`. Trailing bytes are ignored.
    pub fn decode(&self, bytes: &[u8]) -> Result<T, CodecError> {
        self.unpack(&mut Unpacker::new(bytes))
    }

    /// Applies `f` to every decoded value.
    pub fn map<U, F>(self, f: F) -> Decoder<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Decoder::new(move |unpacker| self.unpack(unpacker).map(&f))
    }

    /// Decodes a value, then continues with the decoder `f` picks for it.
    ///
    /// The second decoder reads from the same cursor, right after the bytes
    /// consumed by the first one.
    pub fn and_then<U, F>(self, f: F) -> Decoder<U>
    where
        U: 'static,
        F: Fn(T) -> Decoder<U> + Send + Sync + 'static,
    {
        Decoder::new(move |unpacker| {
            let value = self.unpack(unpacker)?;
            f(value).unpack(unpacker)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;

    #[test]
    fn map_transforms_the_result() {
        let doubled = decode::int().map(|n| n * 2);
        assert_eq!(doubled.decode(&[0x15]), Ok(42));
    }

    #[test]
    fn map_keeps_inner_failure() {
        let len = decode::str().map(|s| s.len());
        assert!(matches!(
            len.decode(&[0xc3]),
            Err(CodecError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn and_then_reads_from_the_advanced_cursor() {
        // discriminator 1 selects a string, anything else a bool
        let tagged = decode::int().and_then(|tag| match tag {
            1 => decode::str().map(Some),
            _ => decode::bool().map(|_| None),
        });
        let data = [0x01, 0xa2, b'o', b'k', 0x07];
        let mut unpacker = Unpacker::new(&data);
        assert_eq!(tagged.unpack(&mut unpacker), Ok(Some("ok".to_owned())));
        assert_eq!(unpacker.position(), 4);
        assert_eq!(tagged.decode(&[0x02, 0xc2]), Ok(None));
    }

    #[test]
    fn decoders_are_reusable_across_threads() {
        let d = decode::list_of(decode::int());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let d = d.clone();
                std::thread::spawn(move || d.decode(&[0x92, i, i + 1]))
            })
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            let i = i as i32;
            assert_eq!(h.join().unwrap(), Ok(vec![i, i + 1]));
        }
    }
}
