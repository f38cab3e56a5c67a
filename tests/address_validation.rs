use proptest::prelude::*;
use switchcmd::address::{is_valid_ipv4, validate_ipv4};
use switchcmd::errors::SwitchcmdError;

#[test]
fn accepts_dotted_decimal_addresses() {
    for addr in [
        "0.0.0.0",
        "255.255.255.255",
        "192.168.1.1",
        "10.0.0.254",
        "010.001.1.1",
        "1.2.3.04",
    ] {
        assert!(is_valid_ipv4(addr), "expected {addr:?} to be valid");
    }
}

#[test]
fn rejects_everything_else() {
    for addr in [
        "",
        "256.1.1.1",
        "1.1.300.1",
        "1.1.1",
        "1.1.1.1.1",
        "1..1.1",
        "0001.1.1.1",
        "1.1.1.-1",
        " 1.1.1.1",
        "1.1.1.1 ",
        "1.1.1.1\n",
        "::1",
        "fe80::1",
        "switch01.lab.local",
        "1.1.1.1/24",
        "1.1.1.1:22",
    ] {
        assert!(!is_valid_ipv4(addr), "expected {addr:?} to be invalid");
    }
}

#[test]
fn validate_reports_invalid_address_error() {
    match validate_ipv4("256.1.1.1") {
        Err(SwitchcmdError::InvalidAddress(addr)) => assert_eq!(addr, "256.1.1.1"),
        other => panic!("expected InvalidAddress, got {other:?}"),
    }
    assert!(validate_ipv4("192.0.2.1").is_ok());
}

proptest! {
    #[test]
    fn any_four_octets_are_valid(a: u8, b: u8, c: u8, d: u8) {
        let plain = format!("{a}.{b}.{c}.{d}");
        let padded = format!("{a:03}.{b:03}.{c:03}.{d:03}");
        prop_assert!(is_valid_ipv4(&plain));
        prop_assert!(is_valid_ipv4(&padded));
    }

    #[test]
    fn out_of_range_octet_is_invalid(
        big in 256u32..1000,
        pos in 0usize..4,
        rest in proptest::array::uniform3(any::<u8>()),
    ) {
        let mut octets: Vec<String> = rest.iter().map(|o| o.to_string()).collect();
        octets.insert(pos, big.to_string());
        prop_assert!(!is_valid_ipv4(&octets.join(".")));
    }

    #[test]
    fn hostnames_are_invalid(name in "[a-z][a-z0-9-]{0,20}(\\.[a-z]{2,5}){0,2}") {
        prop_assert!(!is_valid_ipv4(&name));
    }
}
