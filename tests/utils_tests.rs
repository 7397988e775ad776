//! Tests for utils and descriptor functionality.

use tally::utils::format_bytes;
use tally::Descriptor;

mod common;
use common::helpers::*;

#[test]
fn test_format_bytes() {
    assert_eq!(format_bytes(0), "0 B");
    assert_eq!(format_bytes(1023), "1023 B");
    assert_eq!(format_bytes(1024), "1.00 KiB");
    assert_eq!(format_bytes(1536), "1.50 KiB");
    assert_eq!(format_bytes(3 * 1024 * 1024), "3.00 MiB");
}

#[test]
fn test_descriptor_short_digest() {
    let descriptor = Descriptor::new(TEST_DIGEST, 3);
    assert_eq!(descriptor.short_digest(), "2c26b46b");
    assert_eq!(
        descriptor.encoded(),
        TEST_DIGEST.trim_start_matches("sha256:")
    );
    assert_eq!(descriptor.digest(), TEST_DIGEST);
    assert_eq!(descriptor.size(), 3);
}

#[test]
fn test_descriptor_short_digest_edge_cases() {
    assert_eq!(Descriptor::new("sha256:abc", 0).short_digest(), "abc");
    assert_eq!(Descriptor::new("0123456789", 0).short_digest(), "01234567");
    assert_eq!(Descriptor::new("", 0).short_digest(), "");
}

#[test]
fn test_descriptor_display() {
    let descriptor = Descriptor::new("sha256:abc", 12);
    assert_eq!(descriptor.to_string(), "sha256:abc (12 bytes)");
}
