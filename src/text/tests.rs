#![cfg(test)]

use std::fmt::{self, Display, Formatter, Write};
use std::hash::BuildHasher;

use proptest::prelude::*;

use super::*;
use crate::Arena;
use crate::collections::contiguous::Vector;
use crate::util::hash::Fnv1aBuildHasher;
use crate::util::panic::assert_panics;

#[test]
fn test_compare() {
    let s = Str::new("Hello, World");
    assert_eq!(s, "Hello, World");
    assert!(s.eq_ignore_case(Str::new("hello, world")), "Case should be ignored.");
    assert!(s.starts_with(Str::new("Hello, ")));
    assert!(s.ends_with(Str::new(", World")));

    assert!(s.contains(Str::new("Hell")));
    assert!(!s.contains(Str::new("TEST")));
    assert!(s.contains(Str::new("")), "Every Str should contain the empty Str.");

    assert!(s.includes(b'H'));
    assert!(!s.includes(b'T'));

    assert!(!s.is_empty());
    assert!(Str::new("").is_empty());
}

#[test]
fn test_ordering() {
    assert!(Str::new("ab") < Str::new("abc"), "A prefix should sort first.");
    assert!(Str::new("b") > Str::new("abc"));
    assert_eq!(Str::new("same").cmp(&Str::new("same")), std::cmp::Ordering::Equal);
}

#[test]
fn test_constructors() {
    assert_eq!(Str::from_cstr(c"Hello"), "Hello");
    assert_eq!(Str::from(&b"bytes"[..]), "bytes");
    assert_eq!(Str::new("Hello").get(1), Some(b'e'));
    assert_eq!(Str::new("Hello").get(5), None);
    assert_eq!(Str::new("Hello").to_str(), Some("Hello"));
    assert_eq!(Str::from_bytes(b"\xff").to_str(), None);
}

#[test]
fn test_transform() {
    let arena = Arena::new();
    let s = Str::new("Hello, World");
    assert_eq!(s.to_lower(&arena).unwrap(), "hello, world");
    assert_eq!(s.to_upper(&arena).unwrap(), "HELLO, WORLD");
    assert_eq!(s, "Hello, World", "Transformations shouldn't touch their input.");
}

#[test]
fn test_copy() {
    let arena = Arena::new();
    let copy;
    {
        let owned = String::from("Hello, World");
        copy = Str::new(&owned).copy(&arena).unwrap();
    }
    assert_eq!(copy, "Hello, World", "A copy should outlive the original bytes.");
    assert_eq!(copy.get(7), Some(b'W'));
}

#[test]
fn test_append() {
    let arena = Arena::new();
    let append = Str::new("filename").append(Str::new(".c"), &arena).unwrap();
    assert_eq!(append, "filename.c");

    let prepend = Str::new("filename.c").prepend(Str::new("used_mark__"), &arena).unwrap();
    assert_eq!(prepend, "used_mark__filename.c");

    let wrap = Str::new("command here").wrap(Str::new("'"), &arena).unwrap();
    assert_eq!(wrap, "'command here'");
}

#[test]
fn test_trim() {
    let dirty = Str::new("\t  Hello World  \n");
    assert_eq!(dirty.trim_left(), "Hello World  \n");
    assert_eq!(dirty.trim_right(), "\t  Hello World");
    assert_eq!(dirty.trim(), "Hello World");
    assert_eq!(Str::new(" \x0b\x0c\r ").trim(), "", "Every ASCII space should be trimmed.");

    let path = Str::new("//usr/lib//");
    assert_eq!(path.trim_by_delim(b'/'), "usr/lib");
    assert_eq!(path.trim_left_by_delim(b'/'), "usr/lib//");
    assert_eq!(path.trim_right_by_delim(b'/'), "//usr/lib");
    assert_eq!(Str::new("123abc456").trim_by_predicate(|b| b.is_ascii_digit()), "abc");
}

#[test]
fn test_chop() {
    let mut text = Str::new("Hello\nThis\nis\n\ntext");
    assert_eq!(text.chop_by_delim(b'\n'), "Hello");
    assert_eq!(text.chop_by_predicate(is_space), "This");
    assert_eq!(text.chop_by_predicate(is_space), "is");
    assert_eq!(
        text.chop_by_predicate(is_space),
        "text",
        "A run of delimiters should be consumed as one."
    );
    assert!(text.is_empty());
    assert_eq!(text.chop_by_delim(b'\n'), "", "Chopping an empty Str should give an empty Str.");
}

#[test]
fn test_try_chop() {
    let mut text = Str::new("Hello\nThis\nis\n\ntext");
    assert_eq!(text.try_chop_by_delim(b'\n'), Some(Str::new("Hello")));
    assert_eq!(text.try_chop_by_predicate(is_space), Some(Str::new("This")));
    assert_eq!(text.try_chop_by_predicate(is_space), Some(Str::new("is")));
    assert_eq!(text.try_chop_by_predicate(is_space), Some(Str::new("text")));
    assert_eq!(text.try_chop_by_delim(b'\n'), None);
}

#[test]
fn test_chop_right() {
    let mut text = Str::new("Hello\nThis is  text");
    assert_eq!(text.chop_right_by_predicate(is_space), "text");
    assert_eq!(text.chop_right_by_delim(b'\n'), "This is");
    assert_eq!(text.chop_right_by_delim(b'\n'), "Hello");
    assert_eq!(text.chop_right_by_delim(b'\n'), "");
}

#[test]
fn test_split_by_delim() {
    let pieces: Vec<_> = Str::new("a,b,,c").split_by_delim(b',').collect();
    assert_eq!(pieces, ["a", "b", "c"]);
    assert_eq!(Str::new("").split_by_delim(b',').count(), 0);
}

#[test]
fn test_take() {
    let mut s = Str::new("what a wonderful string");
    assert_eq!(s.take(2), "wh");
    assert_eq!(s.take_right(2), "ng");
    assert_eq!(s.take(8), "at a won");
    assert_eq!(s.take_right(5), " stri");
    assert_eq!(s, "derful");
    assert_eq!(s.take(100), "derful", "Taking too much should take everything.");
    assert!(s.is_empty());
}

#[test]
fn test_try_take() {
    let mut s = Str::new("what a wonderful string");
    assert_eq!(s.try_take(7), Some(Str::new("what a ")));
    assert_eq!(s.try_take_right(7), Some(Str::new(" string")));
    assert_eq!(s, "wonderful");
    assert_eq!(s.try_take_right(9), Some(Str::new("wonderful")));
    assert_eq!(s.try_take_right(2), None);
    assert_eq!(s.try_take(2), None);
}

#[test]
fn test_substring() {
    let s = Str::new("Hello, World");
    assert_eq!(s.substring(0, 4), "Hell");
    assert_eq!(s.substring(7, 12), "World");
    assert_eq!(s.substring(4, 2), "", "A reversed range should be empty.");
    assert_eq!(s.substring(s.len(), 2), "");
    assert_eq!(s.substring(3, 3), "");
    assert_eq!(s.substring(0, 13), "", "A range past the end should be empty.");
}

#[test]
fn test_find_and_count() {
    let s = Str::new("Hello, World");
    assert_eq!(s.find(Str::new("Hello")), Some(0));
    assert_eq!(s.find_last(Str::new("Hello")), Some(0));
    assert_eq!(s.find(Str::new("World")), Some(7));
    assert_eq!(s.find_last(Str::new("o")), Some(8));
    assert_eq!(s.find(Str::new("TEST")), None);
    assert_eq!(s.find(Str::new("")), Some(0));
    assert_eq!(s.find_last(Str::new("")), Some(s.len()));

    assert_eq!(s.count(Str::new("o")), 2);
    assert_eq!(s.count(Str::new("TEST")), 0);
    assert_eq!(Str::new("--help").count(Str::new("-")), 2);
    assert_eq!(Str::new("aaaa").count(Str::new("aa")), 2, "Matches shouldn't overlap.");
    assert_eq!(s.count(Str::new("")), 0);
}

#[test]
fn test_replace() {
    let arena = Arena::new();
    let s = Str::new("Hello, World");
    let goodbye = s.replace(Str::new("Hello"), Str::new("Goodbye"), &arena).unwrap();
    let all = s.replace(Str::new("World"), Str::new("All!"), &arena).unwrap();
    assert_eq!(s, "Hello, World");
    assert_eq!(goodbye, "Goodbye, World");
    assert_eq!(all, "Hello, All!");

    let test = Str::new("test test test");
    assert_eq!(
        test.replace(Str::new("test"), Str::new("result"), &arena).unwrap(),
        "result result result"
    );
    assert_eq!(
        Str::new("c-language").replace(Str::new("-"), Str::new(""), &arena).unwrap(),
        "clanguage"
    );
    assert_eq!(
        Str::new("-language").replace(Str::new("-"), Str::new(""), &arena).unwrap(),
        "language"
    );
    assert_eq!(
        s.replace(Str::new(""), Str::new("x"), &arena).unwrap(),
        "Hello, World",
        "An empty pattern should match nothing."
    );
}

#[test]
fn test_join() {
    let arena = Arena::new();
    let parts = [Str::new("Hello"), Str::new("World")];
    let sep = Str::new(", ");
    assert_eq!(sep.join(&parts, &arena).unwrap(), "Hello, World");
    assert_eq!(sep.join_suffix(&parts, &arena).unwrap(), "Hello, World, ");
    assert_eq!(sep.join_prefix(&parts, &arena).unwrap(), ", Hello, World");

    let words = [Str::new("One"), Str::new("Two")];
    assert_eq!(
        Str::new(" ").join_wrap(Str::new("'"), &words, &arena).unwrap(),
        "'One' 'Two'"
    );
    assert_eq!(Str::new(" ").join(&[], &arena).unwrap(), "");
    assert_eq!(sep.join(&parts[..1], &arena).unwrap(), "Hello");
}

#[test]
fn test_justify() {
    let arena = Arena::new();
    let hello = Str::new("Hello");
    assert_eq!(hello.center(10, b' ', &arena).unwrap(), "  Hello   ");
    assert_eq!(hello.ljust(10, b' ', &arena).unwrap(), "Hello     ");
    assert_eq!(hello.rjust(10, b'*', &arena).unwrap(), "*****Hello");
    assert_eq!(
        hello.center(3, b' ', &arena).unwrap(),
        "Hello",
        "A Str wider than the width should be copied unchanged."
    );
}

#[test]
fn test_repeat_and_reverse() {
    let arena = Arena::new();
    assert_eq!(
        Str::new("|-#-| ").repeat(4, &arena).unwrap(),
        "|-#-| |-#-| |-#-| |-#-| "
    );
    assert_eq!(Str::new("abc").repeat(0, &arena).unwrap(), "");
    assert!(
        Str::new("abc").repeat(usize::MAX, &arena).unwrap_err().is_capacity_overflow(),
        "An impossible length should be reported, not allocated."
    );

    assert_eq!(Str::new("Hello, World").reverse(&arena).unwrap(), "dlroW ,olleH");
}

#[test]
fn test_sort() {
    let arena = Arena::new();
    let fruits = ["Banana", "Strawberry", "Apple", "Lemon"].map(Str::new);
    let mut vec = Vector::from_slice(&arena, &fruits).unwrap();

    vec.sort_by(comparator(SortOrder::Ascending));
    assert_eq!(vec.as_slice(), ["Apple", "Banana", "Lemon", "Strawberry"].map(Str::new));

    vec.sort_by(comparator(SortOrder::Descending));
    assert_eq!(vec.as_slice(), ["Strawberry", "Lemon", "Banana", "Apple"].map(Str::new));
}

#[test]
fn test_hash() {
    let cases: [(&str, u64); 3] = [
        ("Hello", 0x63f0bfacf2c00f6b),
        ("This is a very long string", 0xf276220f1fa71f6b),
        ("Another", 0x90c0e53673f3e9f4),
    ];
    for (text, expected) in cases {
        let s = Str::new(text);
        assert_eq!(s.hash64(), expected, "Wrong hash for {:?}.", s);
        assert_eq!(
            Fnv1aBuildHasher.hash_one(s),
            expected,
            "Hashing through Hash should match hash64."
        );
    }
}

#[test]
fn test_format() {
    let arena = Arena::new();
    let s = Str::format(&arena, format_args!("{} {}", 420, 69)).unwrap();
    assert_eq!(s, "420 69");

    let padded = Str::new("ab");
    let escaped = Str::new("c\n");
    let macro_s = crate::str_format!(&arena, "{:>5}|{:?}", padded, escaped).unwrap();
    assert_eq!(macro_s, "   ab|\"c\\n\"");

    assert_eq!(crate::str_format!(&arena, "").unwrap(), "");
}

struct Broken;

impl Display for Broken {
    fn fmt(&self, _: &mut Formatter<'_>) -> fmt::Result {
        Err(fmt::Error)
    }
}

#[test]
fn test_format_error_panics() {
    let arena = Arena::new();
    assert_panics!({ Str::format(&arena, format_args!("{}", Broken)) });
}

#[test]
fn test_display_and_debug() {
    assert_eq!(Str::new("plain").to_string(), "plain");
    assert_eq!(
        Str::from_bytes(b"ab\xffc").to_string(),
        "ab\u{FFFD}c",
        "Invalid UTF-8 should be displayed lossily."
    );
    assert_eq!(format!("{:?}", Str::new("tab\there")), "\"tab\\there\"");

    assert_eq!(format!("{:>5}", Str::new("ab")), "   ab");
    assert_eq!(
        format!("{:>5}", Str::from_bytes(b"ab\xff")),
        "  ab\u{FFFD}",
        "Padding should apply to lossy output too."
    );
}

#[test]
fn test_parse_integers() {
    let arena = Arena::new();
    let number = crate::str_format!(&arena, "{}", 64_u64).unwrap();
    let mut n = number.append(Str::new(" bytes"), &arena).unwrap();
    assert_eq!(n, "64 bytes");

    assert_eq!(n.parse_u64(), Ok(64));
    assert_eq!(n.chop_u64(), Ok(64));
    assert_eq!(n.len(), 6, "Chopping should only consume the number.");
    assert_eq!(n, " bytes");

    assert_eq!(Str::new(" \t+12x").parse_u64(), Ok(12));
    assert_eq!(Str::new("-5").parse_u64(), Err(ParseNumberError::NoDigits));
    assert_eq!(Str::new("18446744073709551615").parse_u64(), Ok(u64::MAX));
    assert_eq!(Str::new("18446744073709551616").parse_u64(), Err(ParseNumberError::Overflow));

    assert_eq!(Str::new("-9223372036854775808").parse_i64(), Ok(i64::MIN));
    assert_eq!(Str::new("9223372036854775807").parse_i64(), Ok(i64::MAX));
    assert_eq!(Str::new("9223372036854775808").parse_i64(), Err(ParseNumberError::Overflow));
    assert_eq!(Str::new("  -42,").parse_i64(), Ok(-42));
    assert!(Str::new("-").parse_i64().unwrap_err().is_no_digits());
}

#[test]
fn test_parse_floats() {
    let mut f = Str::new("420.69");
    assert_eq!(f.parse_f64(), Ok(420.69));
    assert_eq!(f.chop_f64(), Ok(420.69));
    assert_eq!(f.len(), 0);

    assert_eq!(Str::new(".5").parse_f64(), Ok(0.5));
    assert_eq!(Str::new("  -2.5e3kg").parse_f64(), Ok(-2500.0));
    assert_eq!(Str::new("-inf").parse_f64(), Ok(f64::NEG_INFINITY));
    assert!(Str::new("NaN").parse_f64().is_ok_and(f64::is_nan));
    assert_eq!(Str::new(".").parse_f64(), Err(ParseNumberError::NoDigits));
    assert_eq!(Str::new("1e400").parse_f64(), Err(ParseNumberError::Overflow));

    let mut rest = Str::new("1e");
    assert_eq!(rest.chop_f64(), Ok(1.0));
    assert_eq!(rest, "e", "An exponent without digits shouldn't be consumed.");
}

#[test]
fn test_chop_number_error_keeps_input() {
    let mut s = Str::new("  abc");
    assert!(s.chop_u64().is_err());
    assert!(s.chop_i64().is_err());
    assert!(s.chop_f64().is_err());
    assert_eq!(s, "  abc", "A failed chop shouldn't advance the Str.");
}

#[test]
fn test_parse_error_display() {
    assert_eq!(ParseNumberError::NoDigits.to_string(), "No digits to parse!");
    assert!(ParseNumberError::Overflow.is_overflow());
}

#[test]
fn test_bytes_hex() {
    let arena = Arena::new();
    let b = Bytes::new(&[0x02, 0xff, 0xaa, 0xbb]);
    assert_eq!(b.to_hex(&arena).unwrap(), "02ffaabb");
    assert_eq!(Bytes::from(Str::new("ABC")).to_hex(&arena).unwrap(), "414243");
    assert_eq!(Bytes::new(&[]).to_hex(&arena).unwrap(), "");

    let decoded = Bytes::from_hex(Str::new("02ffaabb"), &arena).unwrap();
    assert_eq!(decoded, b);
    assert_eq!(Bytes::from_hex(Str::new("0x1"), &arena).unwrap().as_slice(), &[0x01]);
    assert_eq!(Bytes::from_hex(Str::new("0xABC"), &arena).unwrap().as_slice(), &[0x0a, 0xbc]);
    assert_eq!(
        Bytes::from_hex(Str::new("zz"), &arena).unwrap().as_slice(),
        &[0x00],
        "Non-hex digits should count as zero."
    );
    assert!(Bytes::from_hex(Str::new("0x"), &arena).unwrap().is_empty());
}

#[test]
fn test_bytes_views() {
    let arena = Arena::new();
    let mut b = Bytes::new(b"binary");
    assert_eq!(b.slice(1, 3).as_slice(), b"in");
    assert!(b.slice(3, 1).is_empty());
    assert_eq!(b.hash64(), Str::new("binary").hash64());
    assert_eq!(b.to_str(), "binary");

    let copy = b.copy(&arena).unwrap();
    assert_eq!(copy, b);
    assert_ne!(copy.as_slice().as_ptr(), b.as_slice().as_ptr());

    assert_eq!(b.take(3).as_slice(), b"bin");
    assert_eq!(b.as_slice(), b"ary");
    assert_eq!(format!("{:?}", Bytes::new(&[2, 255])), "[0x02, 0xff]");
}

#[test]
fn test_builder() {
    let arena = Arena::new();
    let mut sb = StringBuilder::new(&arena);
    assert!(sb.is_empty());

    sb.append_str(Str::new("Hello")).unwrap();
    sb.push(b',').unwrap();
    sb.append_bytes(b" ").unwrap();
    let written = sb.append_fmt(format_args!("{}-{}", "World", 42)).unwrap();
    assert_eq!(written, 8, "append_fmt should return the number of bytes written.");
    assert_eq!(sb.as_str(), "Hello, World-42");

    write!(sb, "!{}", 1).unwrap();
    assert_eq!(sb.len(), 17);

    let finished = sb.finish();
    assert_eq!(finished, "Hello, World-42!1");
}

#[test]
fn test_builder_reuse() {
    let arena = Arena::new();
    let mut sb = StringBuilder::with_cap(&arena, 16).unwrap();
    sb.append_str(Str::new("first")).unwrap();
    sb.clear();
    assert!(sb.is_empty());
    sb.append_str(Str::new("second")).unwrap();
    assert_eq!(
        format!("{:?}", sb),
        "StringBuilder { contents: \"second\", len: 6, cap: 16 }"
    );
}

#[test]
fn test_builder_outlives_in_arena() {
    let arena = Arena::new();
    let joined = {
        let mut sb = StringBuilder::new(&arena);
        for word in Str::new("a b c").split_by_delim(b' ') {
            sb.append_str(word).unwrap();
        }
        sb.finish()
    };
    assert_eq!(joined, "abc", "Finished text should live as long as the arena.");
}

proptest! {
    #[test]
    fn prop_chop_collapses_delimiter_runs(
        pieces in prop::collection::vec("[a-z]{1,5}", 1..8),
        runs in prop::collection::vec(1_usize..4, 8),
    ) {
        let mut text = String::new();
        for (i, piece) in pieces.iter().enumerate() {
            if i != 0 {
                text.push_str(&",".repeat(runs[i]));
            }
            text.push_str(piece);
        }

        let chopped: Vec<_> = Str::new(&text).split_by_delim(b',').collect();
        prop_assert_eq!(chopped.len(), pieces.len());
        for (chop, piece) in chopped.iter().zip(&pieces) {
            prop_assert_eq!(*chop, piece.as_str());
        }
    }

    #[test]
    fn prop_replace_removes_every_match(text in "[ab ]{0,32}") {
        let arena = Arena::new();
        let s = Str::new(&text);
        let replaced = s.replace(Str::new("ab"), Str::new("X"), &arena).unwrap();
        prop_assert_eq!(replaced.count(Str::new("ab")), 0);
        prop_assert_eq!(replaced.count(Str::new("X")), s.count(Str::new("ab")));
        prop_assert_eq!(replaced.len(), s.len() - s.count(Str::new("ab")));
    }
}
