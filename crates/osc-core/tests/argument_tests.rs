//! Argument type tests

use bytes::BytesMut;
use osc_core::argument::tag;
use osc_core::{parse_argument, Argument, Error};

#[test]
fn test_readers_per_variant() {
    assert_eq!(Argument::Int32(-12).read_int32().unwrap(), -12);
    assert_eq!(Argument::Float32(2.5).read_float32().unwrap(), 2.5);
    assert!(Argument::Bool(true).read_bool().unwrap());
    assert!(!Argument::Bool(false).read_bool().unwrap());
    assert_eq!(Argument::from("hi").read_string().unwrap(), "hi");
    assert_eq!(Argument::from(&b"\x01\x02"[..]).read_blob().unwrap(), &[1, 2]);
}

#[test]
fn test_wrong_reader_is_recoverable() {
    let arg = Argument::Float32(1.0);
    assert!(arg.read_int32().unwrap_err().is_invalid_type_tag());
    assert!(arg.read_bool().unwrap_err().is_invalid_type_tag());
    assert!(arg.read_string().unwrap_err().is_invalid_type_tag());
    assert!(arg.read_blob().unwrap_err().is_invalid_type_tag());

    // A failed probe leaves the value untouched
    assert_eq!(arg.read_float32().unwrap(), 1.0);
}

#[test]
fn test_bool_tags() {
    assert_eq!(Argument::Bool(true).type_tag(), tag::TRUE);
    assert_eq!(Argument::Bool(false).type_tag(), tag::FALSE);
    assert_eq!(Argument::Bool(true), Argument::Bool(true));
    assert_ne!(Argument::Bool(true), Argument::Bool(false));
}

#[test]
fn test_cross_variant_equality() {
    assert_eq!(Argument::Int32(5), Argument::Int32(5));
    assert_ne!(Argument::Int32(5), Argument::Int32(6));
    assert_ne!(Argument::Int32(5), Argument::Float32(5.0));
    assert_ne!(Argument::Int32(1), Argument::Bool(true));
    assert_ne!(Argument::from(""), Argument::from(Vec::<u8>::new()));
}

#[test]
fn test_parse_int_and_float() {
    let (arg, n) = parse_argument(tag::INT32, &[0x00, 0x00, 0x03, 0xe8, 0xff]).unwrap();
    assert_eq!(arg, Argument::Int32(1000));
    assert_eq!(n, 4);

    let (arg, n) = parse_argument(tag::FLOAT32, &0.5f32.to_be_bytes()).unwrap();
    assert_eq!(arg, Argument::Float32(0.5));
    assert_eq!(n, 4);
}

#[test]
fn test_parse_string_consumes_padding() {
    let (arg, n) = parse_argument(tag::STRING, b"osc\0next").unwrap();
    assert_eq!(arg, Argument::from("osc"));
    assert_eq!(n, 4);

    let (arg, n) = parse_argument(tag::STRING, b"data\0\0\0\0").unwrap();
    assert_eq!(arg, Argument::from("data"));
    assert_eq!(n, 8);
}

#[test]
fn test_parse_blob_consumes_prefix_and_padding() {
    let data = [0, 0, 0, 5, 1, 2, 3, 4, 5, 0, 0, 0];
    let (arg, n) = parse_argument(tag::BLOB, &data).unwrap();
    assert_eq!(arg, Argument::Blob(vec![1, 2, 3, 4, 5]));
    assert_eq!(n, 12);
}

#[test]
fn test_parse_empty_blob() {
    let (arg, n) = parse_argument(tag::BLOB, &[0, 0, 0, 0]).unwrap();
    assert_eq!(arg, Argument::Blob(Vec::new()));
    assert_eq!(n, 4);
}

#[test]
fn test_parse_unknown_tag() {
    match parse_argument(b'h', &[0; 8]).unwrap_err() {
        Error::InvalidTypeTag { expected, found } => {
            assert_eq!(expected, None);
            assert_eq!(found, b'h');
        }
        e => panic!("Expected InvalidTypeTag, got {:?}", e),
    }
}

#[test]
fn test_encode_payloads() {
    let mut buf = BytesMut::new();
    Argument::Int32(1).encode(&mut buf).unwrap();
    Argument::Bool(true).encode(&mut buf).unwrap();
    Argument::from("ab").encode(&mut buf).unwrap();
    Argument::Blob(vec![9]).encode(&mut buf).unwrap();

    assert_eq!(
        buf.as_ref(),
        &[0, 0, 0, 1, b'a', b'b', 0, 0, 0, 0, 0, 1, 9, 0, 0, 0]
    );
}

#[test]
fn test_diagnostic_text_is_not_wire_format() {
    let arg = Argument::Int32(1000);
    let mut text = Vec::new();
    arg.write_to(&mut text).unwrap();
    assert_eq!(text, b"1000");

    let mut wire = BytesMut::new();
    arg.encode(&mut wire).unwrap();
    assert_eq!(wire.as_ref(), &1000i32.to_be_bytes());
}

#[test]
fn test_argument_json() {
    let json = serde_json::to_string(&Argument::Float32(0.5)).unwrap();
    assert_eq!(json, r#"{"type":"float32","value":0.5}"#);

    let arg: Argument = serde_json::from_str(r#"{"type":"bool","value":true}"#).unwrap();
    assert_eq!(arg, Argument::Bool(true));
}
