//! Fixed-shape records: the arity table behind `combineN` and `recordN`.
//!
//! A record travels as an array whose elements are its fields in order. The
//! decode side (`decode::combine1` .. `decode::combine12`) and the encode side
//! (`encode::record1` .. `encode::record12`) are stamped out from the single
//! table in `for_each_arity!`, so every arity shares one template.

use crate::error::CodecError;
use crate::wire::Unpacker;

/// Largest record width covered by the generated combinators.
pub const MAX_ARITY: usize = 12;

/// How strictly a record decoder checks the announced array length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldCount {
    /// At least N elements. Extra trailing elements are skipped, so records
    /// written by a newer schema with appended fields still decode.
    #[default]
    AtLeast,
    /// Exactly N elements.
    Exact,
}

/// Reads the array header of an `expected`-field record.
///
/// Returns the number of surplus elements the caller must skip once the
/// fields are decoded.
pub fn read_record_header(
    unpacker: &mut Unpacker<'_>,
    expected: usize,
    policy: FieldCount,
) -> Result<usize, CodecError> {
    let found = unpacker.unpack_array_header()?;
    let fits = match policy {
        FieldCount::AtLeast => found >= expected,
        FieldCount::Exact => found == expected,
    };
    if !fits {
        return Err(CodecError::FieldCount { expected, found });
    }
    Ok(found - expected)
}

/// Skips the surplus elements reported by [`read_record_header`].
pub fn skip_surplus(unpacker: &mut Unpacker<'_>, surplus: usize) -> Result<(), CodecError> {
    for _ in 0..surplus {
        unpacker.skip_value()?;
    }
    Ok(())
}

/// Invokes `$m!` once per supported arity.
///
/// Each row is `arity, combine name, exact-combine name, record name;` and the
/// list of `(type parameter, binding, tuple index)` triples for the fields.
macro_rules! for_each_arity {
    ($m:ident) => {
        $m!(1, combine1, combine1_exact, record1; V1 d1 0);
        $m!(2, combine2, combine2_exact, record2; V1 d1 0, V2 d2 1);
        $m!(3, combine3, combine3_exact, record3; V1 d1 0, V2 d2 1, V3 d3 2);
        $m!(4, combine4, combine4_exact, record4; V1 d1 0, V2 d2 1, V3 d3 2, V4 d4 3);
        $m!(5, combine5, combine5_exact, record5;
            V1 d1 0, V2 d2 1, V3 d3 2, V4 d4 3, V5 d5 4);
        $m!(6, combine6, combine6_exact, record6;
            V1 d1 0, V2 d2 1, V3 d3 2, V4 d4 3, V5 d5 4, V6 d6 5);
        $m!(7, combine7, combine7_exact, record7;
            V1 d1 0, V2 d2 1, V3 d3 2, V4 d4 3, V5 d5 4, V6 d6 5, V7 d7 6);
        $m!(8, combine8, combine8_exact, record8;
            V1 d1 0, V2 d2 1, V3 d3 2, V4 d4 3, V5 d5 4, V6 d6 5, V7 d7 6, V8 d8 7);
        $m!(9, combine9, combine9_exact, record9;
            V1 d1 0, V2 d2 1, V3 d3 2, V4 d4 3, V5 d5 4, V6 d6 5, V7 d7 6, V8 d8 7,
            V9 d9 8);
        $m!(10, combine10, combine10_exact, record10;
            V1 d1 0, V2 d2 1, V3 d3 2, V4 d4 3, V5 d5 4, V6 d6 5, V7 d7 6, V8 d8 7,
            V9 d9 8, V10 d10 9);
        $m!(11, combine11, combine11_exact, record11;
            V1 d1 0, V2 d2 1, V3 d3 2, V4 d4 3, V5 d5 4, V6 d6 5, V7 d7 6, V8 d8 7,
            V9 d9 8, V10 d10 9, V11 d11 10);
        $m!(12, combine12, combine12_exact, record12;
            V1 d1 0, V2 d2 1, V3 d3 2, V4 d4 3, V5 d5 4, V6 d6 5, V7 d7 6, V8 d8 7,
            V9 d9 8, V10 d10 9, V11 d11 10, V12 d12 11);
    };
}

pub(crate) use for_each_arity;
