//! Combinator matrix: every arity of the record family, the lenient and exact
//! field-count policies, and the composition laws of `map` / `and_then`.

use msgpack_combinators::decode::{self, int};
use msgpack_combinators::{encode, CodecError, Decoder, Unpacker, WireTag, MAX_ARITY};

/// A fixarray announcing `announced` elements followed by the integers
/// `1..=present`.
fn ints(announced: u8, present: u8) -> Vec<u8> {
    let mut bytes = vec![0x90 | announced];
    bytes.extend(1..=present);
    bytes
}

fn check_arity(n: u8, lenient: Decoder<Vec<i32>>, exact: Decoder<Vec<i32>>) {
    let expected: Vec<i32> = (1..=i32::from(n)).collect();

    // exact length
    assert_eq!(lenient.decode(&ints(n, n)), Ok(expected.clone()));
    assert_eq!(exact.decode(&ints(n, n)), Ok(expected.clone()));

    // one surplus element is skipped by the lenient form only
    let mut with_tail = ints(n + 1, n + 1);
    with_tail.push(0xc3);
    let mut unpacker = Unpacker::new(&with_tail);
    assert_eq!(lenient.unpack(&mut unpacker), Ok(expected));
    assert_eq!(unpacker.unpack_bool(), Ok(true));
    assert_eq!(
        exact.decode(&ints(n + 1, n + 1)),
        Err(CodecError::FieldCount {
            expected: usize::from(n),
            found: usize::from(n) + 1,
        })
    );

    // one element short
    let short = ints(n - 1, n - 1);
    for decoder in [&lenient, &exact] {
        assert_eq!(
            decoder.decode(&short),
            Err(CodecError::FieldCount {
                expected: usize::from(n),
                found: usize::from(n) - 1,
            })
        );
    }
}

// ---------------------------------------------------------------------------
// combine1 .. combine12
// ---------------------------------------------------------------------------

#[test]
fn combine1_reads_1_field() {
    check_arity(
        1,
        decode::combine1(|a| vec![a], int()),
        decode::combine1_exact(|a| vec![a], int()),
    );
}

#[test]
fn combine2_reads_2_fields() {
    check_arity(
        2,
        decode::combine2(|a, b| vec![a, b], int(), int()),
        decode::combine2_exact(|a, b| vec![a, b], int(), int()),
    );
}

#[test]
fn combine3_reads_3_fields() {
    check_arity(
        3,
        decode::combine3(|a, b, c| vec![a, b, c], int(), int(), int()),
        decode::combine3_exact(|a, b, c| vec![a, b, c], int(), int(), int()),
    );
}

#[test]
fn combine4_reads_4_fields() {
    check_arity(
        4,
        decode::combine4(|a, b, c, d| vec![a, b, c, d], int(), int(), int(), int()),
        decode::combine4_exact(|a, b, c, d| vec![a, b, c, d], int(), int(), int(), int()),
    );
}

#[test]
fn combine5_reads_5_fields() {
    check_arity(
        5,
        decode::combine5(|a, b, c, d, e| vec![a, b, c, d, e], int(), int(), int(), int(), int()),
        decode::combine5_exact(
            |a, b, c, d, e| vec![a, b, c, d, e],
            int(),
            int(),
            int(),
            int(),
            int(),
        ),
    );
}

#[test]
fn combine6_reads_6_fields() {
    check_arity(
        6,
        decode::combine6(
            |a, b, c, d, e, f| vec![a, b, c, d, e, f],
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
        ),
        decode::combine6_exact(
            |a, b, c, d, e, f| vec![a, b, c, d, e, f],
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
        ),
    );
}

#[test]
fn combine7_reads_7_fields() {
    check_arity(
        7,
        decode::combine7(
            |a, b, c, d, e, f, g| vec![a, b, c, d, e, f, g],
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
        ),
        decode::combine7_exact(
            |a, b, c, d, e, f, g| vec![a, b, c, d, e, f, g],
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
        ),
    );
}

#[test]
fn combine8_reads_8_fields() {
    check_arity(
        8,
        decode::combine8(
            |a, b, c, d, e, f, g, h| vec![a, b, c, d, e, f, g, h],
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
        ),
        decode::combine8_exact(
            |a, b, c, d, e, f, g, h| vec![a, b, c, d, e, f, g, h],
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
        ),
    );
}

#[test]
fn combine9_reads_9_fields() {
    check_arity(
        9,
        decode::combine9(
            |a, b, c, d, e, f, g, h, i| vec![a, b, c, d, e, f, g, h, i],
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
        ),
        decode::combine9_exact(
            |a, b, c, d, e, f, g, h, i| vec![a, b, c, d, e, f, g, h, i],
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
        ),
    );
}

#[test]
fn combine10_reads_10_fields() {
    check_arity(
        10,
        decode::combine10(
            |a, b, c, d, e, f, g, h, i, j| vec![a, b, c, d, e, f, g, h, i, j],
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
        ),
        decode::combine10_exact(
            |a, b, c, d, e, f, g, h, i, j| vec![a, b, c, d, e, f, g, h, i, j],
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
        ),
    );
}

#[test]
fn combine11_reads_11_fields() {
    check_arity(
        11,
        decode::combine11(
            |a, b, c, d, e, f, g, h, i, j, k| vec![a, b, c, d, e, f, g, h, i, j, k],
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
        ),
        decode::combine11_exact(
            |a, b, c, d, e, f, g, h, i, j, k| vec![a, b, c, d, e, f, g, h, i, j, k],
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
        ),
    );
}

#[test]
fn combine12_reads_12_fields() {
    check_arity(
        12,
        decode::combine12(
            |a, b, c, d, e, f, g, h, i, j, k, l| vec![a, b, c, d, e, f, g, h, i, j, k, l],
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
        ),
        decode::combine12_exact(
            |a, b, c, d, e, f, g, h, i, j, k, l| vec![a, b, c, d, e, f, g, h, i, j, k, l],
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
            int(),
        ),
    );
}

#[test]
fn max_arity_is_twelve() {
    assert_eq!(MAX_ARITY, 12);
}

// ---------------------------------------------------------------------------
// record encoders
// ---------------------------------------------------------------------------

#[test]
fn record1_matches_combine1() {
    let record = encode::record1(|v: &Vec<i32>| (v[0],), encode::int());
    let fields: Vec<i32> = (1..=1).collect();
    let bytes = record.encode(&fields).unwrap();
    assert_eq!(bytes, ints(1, 1));
    let back = decode::combine1_exact(|a| vec![a], int());
    assert_eq!(back.decode(&bytes), Ok(fields));
}

#[test]
fn record2_matches_combine2() {
    let record = encode::record2(|v: &Vec<i32>| (v[0], v[1]), encode::int(), encode::int());
    let fields: Vec<i32> = (1..=2).collect();
    let bytes = record.encode(&fields).unwrap();
    assert_eq!(bytes, ints(2, 2));
    let back = decode::combine2_exact(|a, b| vec![a, b], int(), int());
    assert_eq!(back.decode(&bytes), Ok(fields));
}

#[test]
fn record5_matches_combine5() {
    let record = encode::record5(
        |v: &Vec<i32>| (v[0], v[1], v[2], v[3], v[4]),
        encode::int(),
        encode::int(),
        encode::int(),
        encode::int(),
        encode::int(),
    );
    let fields: Vec<i32> = (1..=5).collect();
    let bytes = record.encode(&fields).unwrap();
    assert_eq!(bytes, ints(5, 5));
    let back = decode::combine5_exact(
        |a, b, c, d, e| vec![a, b, c, d, e],
        int(),
        int(),
        int(),
        int(),
        int(),
    );
    assert_eq!(back.decode(&bytes), Ok(fields));
}

#[test]
fn record12_matches_combine12() {
    let record = encode::record12(
        |v: &Vec<i32>| (v[0], v[1], v[2], v[3], v[4], v[5], v[6], v[7], v[8], v[9], v[10], v[11]),
        encode::int(),
        encode::int(),
        encode::int(),
        encode::int(),
        encode::int(),
        encode::int(),
        encode::int(),
        encode::int(),
        encode::int(),
        encode::int(),
        encode::int(),
        encode::int(),
    );
    let fields: Vec<i32> = (1..=12).collect();
    let bytes = record.encode(&fields).unwrap();
    assert_eq!(bytes, ints(12, 12));
    let back = decode::combine12_exact(
        |a, b, c, d, e, f, g, h, i, j, k, l| vec![a, b, c, d, e, f, g, h, i, j, k, l],
        int(),
        int(),
        int(),
        int(),
        int(),
        int(),
        int(),
        int(),
        int(),
        int(),
        int(),
        int(),
    );
    assert_eq!(back.decode(&bytes), Ok(fields));
}

#[test]
fn record_fields_may_have_mixed_types() {
    let record = encode::record3(
        |v: &(bool, String, i32)| v.clone(),
        encode::bool(),
        encode::str(),
        encode::int(),
    );
    let bytes = record.encode(&(true, "hi".to_owned(), 42)).unwrap();
    assert_eq!(bytes, [0x93, 0xc3, 0xa2, b'h', b'i', 0x2a]);
}

// ---------------------------------------------------------------------------
// end-to-end record
// ---------------------------------------------------------------------------

#[test]
fn bool_string_int_record() {
    let bytes = [0x93, 0xc3, 0xa2, b'h', b'i', 0x2a];
    let row = decode::combine3(
        |flag, label, n| (flag, label, n),
        decode::bool(),
        decode::str(),
        int(),
    );
    assert_eq!(row.decode(&bytes), Ok((true, "hi".to_owned(), 42)));

    let written = encode::array(vec![
        encode::bool().emit(true),
        encode::str().emit("hi".to_owned()),
        encode::int().emit(42),
    ])
    .to_vec()
    .unwrap();
    assert_eq!(written, bytes);
}

#[test]
fn map_header_where_array_expected() {
    let row = decode::combine2(|a, b| (a, b), int(), int());
    assert_eq!(
        row.decode(&[0x81, 0x01, 0x02]),
        Err(CodecError::TypeMismatch {
            expected: WireTag::Array,
            found: WireTag::Map,
            offset: 0,
        })
    );
}

#[test]
fn field_error_aborts_the_record() {
    let row = decode::combine2(|a, b| (a, b), int(), decode::str());
    assert_eq!(
        row.decode(&[0x92, 0x01, 0x02]),
        Err(CodecError::TypeMismatch {
            expected: WireTag::String,
            found: WireTag::Integer,
            offset: 2,
        })
    );
}

#[test]
fn truncated_record_is_unexpected_end() {
    let row = decode::combine2(|a, b| (a, b), int(), decode::long());
    assert_eq!(
        row.decode(&[0x92, 0x01, 0xcd, 0x01]),
        Err(CodecError::UnexpectedEnd { offset: 3 })
    );
}

#[test]
fn nested_records() {
    let point = decode::combine2(|x, y| (x, y), int(), int());
    let segment = decode::combine2(|from, to| (from, to), point.clone(), point);
    let bytes = [0x92, 0x92, 0x01, 0x02, 0x92, 0x03, 0x04];
    assert_eq!(segment.decode(&bytes), Ok(((1, 2), (3, 4))));
}

// ---------------------------------------------------------------------------
// composition laws
// ---------------------------------------------------------------------------

#[test]
fn map_with_identity_changes_nothing() {
    let inputs: [&[u8]; 3] = [&[0x05], &[0xd0, 0x80], &[0xc3]];
    for bytes in inputs {
        assert_eq!(int().map(|n| n).decode(bytes), int().decode(bytes));
    }
}

#[test]
fn map_composes() {
    let f = |n: i32| n + 1;
    let g = |n: i32| n * 3;
    let lhs = int().map(f).map(g);
    let rhs = int().map(move |n| g(f(n)));
    assert_eq!(lhs.decode(&[0x04]), rhs.decode(&[0x04]));
    assert_eq!(lhs.decode(&[0x04]), Ok(15));
}

#[test]
fn and_then_with_succeed_is_map() {
    let via_and_then = int().and_then(|n| decode::succeed(n * 2));
    let via_map = int().map(|n| n * 2);
    for bytes in [[0x07], [0xc0]] {
        assert_eq!(via_and_then.decode(&bytes), via_map.decode(&bytes));
    }
}

#[test]
fn and_then_selects_by_discriminator() {
    #[derive(Debug, PartialEq)]
    enum Shape {
        Circle(f64),
        Rect(i32, i32),
    }
    let shape = int().and_then(|kind| match kind {
        0 => decode::double().map(Shape::Circle),
        _ => decode::combine2(Shape::Rect, int(), int()),
    });
    let circle = [0x00, 0xcb, 0x3f, 0xf0, 0, 0, 0, 0, 0, 0];
    assert_eq!(shape.decode(&circle), Ok(Shape::Circle(1.0)));
    assert_eq!(shape.decode(&[0x01, 0x92, 0x02, 0x03]), Ok(Shape::Rect(2, 3)));
}

// ---------------------------------------------------------------------------
// nullable
// ---------------------------------------------------------------------------

#[test]
fn nullable_round_trip() {
    let enc = encode::nullable(encode::str());
    let dec = decode::nullable(decode::str());
    for value in [None, Some(String::new()), Some("x".repeat(40))] {
        let bytes = enc.encode(&value).unwrap();
        assert_eq!(dec.decode(&bytes), Ok(value));
    }
}

#[test]
fn nullable_inside_a_record() {
    let row = decode::combine2(|a, b| (a, b), decode::nullable(int()), int());
    assert_eq!(row.decode(&[0x92, 0xc0, 0x01]), Ok((None, 1)));
    assert_eq!(row.decode(&[0x92, 0x09, 0x01]), Ok((Some(9), 1)));
}

#[test]
fn list_of_records() {
    let point = decode::combine2(|x, y| (x, y), int(), int());
    let points = decode::list_of(point);
    let bytes = [0x92, 0x92, 0x01, 0x02, 0x93, 0x03, 0x04, 0x05];
    assert_eq!(points.decode(&bytes), Ok(vec![(1, 2), (3, 4)]));
}
