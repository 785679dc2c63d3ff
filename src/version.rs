// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

//! Build identification for eircode-kit.

/// The version string from Cargo.toml (e.g., "0.3.0")
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The version string as raw bytes.
pub const VERSION_STRING: &[u8] = VERSION.as_bytes();

/// Project version number, `major.minor` as a float (e.g., `0.3`).
///
/// The patch component is dropped, and minors that differ only in trailing
/// zeros collide: `1.1.x` and `1.10.x` both map to `1.1`. Use [`VERSION`]
/// when an exact comparison is needed.
pub const VERSION_NUMBER: f64 = version_number(
    env!("CARGO_PKG_VERSION_MAJOR"),
    env!("CARGO_PKG_VERSION_MINOR"),
);

/// User agent sent with every API request.
pub fn user_agent() -> String {
    format!("eircode-kit/{}", VERSION)
}

const fn parse_u32(s: &str) -> (u32, u32) {
    let bytes = s.as_bytes();
    let mut value = 0u32;
    let mut digits = 0u32;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < b'0' || b > b'9' {
            break;
        }
        value = value * 10 + (b - b'0') as u32;
        digits += 1;
        i += 1;
    }
    (value, digits)
}

const fn version_number(major: &str, minor: &str) -> f64 {
    let (major, _) = parse_u32(major);
    let (minor, digits) = parse_u32(minor);
    let mut scale = 1.0f64;
    let mut i = 0;
    while i < digits {
        scale *= 10.0;
        i += 1;
    }
    major as f64 + minor as f64 / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_present() {
        assert!(!VERSION.is_empty());
        assert!(!VERSION_STRING.is_empty());
        assert_eq!(VERSION_STRING, VERSION.as_bytes());
    }

    #[test]
    fn test_version_number_matches_manifest() {
        let mut parts = VERSION.split('.');
        let expected: f64 = format!(
            "{}.{}",
            parts.next().unwrap(),
            parts.next().unwrap()
        )
        .parse()
        .unwrap();
        assert!(close(VERSION_NUMBER, expected));
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_version_number() {
        assert!(close(version_number("0", "3"), 0.3));
        assert!(close(version_number("1", "0"), 1.0));
        assert!(close(version_number("1", "12"), 1.12));
        assert!(close(version_number("2", "105"), 2.105));
        assert!(close(version_number("", ""), 0.0));
    }

    #[test]
    fn test_version_number_trailing_zero_minor_collides() {
        assert!(close(version_number("1", "1"), version_number("1", "10")));
        assert!(!close(version_number("1", "1"), version_number("1", "11")));
    }

    #[test]
    fn test_user_agent() {
        assert_eq!(user_agent(), format!("eircode-kit/{}", VERSION));
    }
}
