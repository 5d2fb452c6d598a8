//! Allow-list membership test.

use super::address::ClientAddress;
use super::allow_list::AllowList;

/// Check whether `address` is permitted by `allow_list`.
///
/// Exact textual match first, then the first containing range wins.
/// The empty allow-list permits nothing.
pub fn is_allowed(address: &ClientAddress, allow_list: &AllowList) -> bool {
    if allow_list.addresses().contains(address.as_str()) {
        return true;
    }

    allow_list
        .ranges()
        .iter()
        .any(|range| range.contains(address))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> ClientAddress {
        s.parse().unwrap()
    }

    fn list(s: &str) -> AllowList {
        AllowList::parse(s).unwrap()
    }

    #[test]
    fn test_exact_match() {
        let allow = list("10.0.0.1");
        assert!(is_allowed(&addr("10.0.0.1"), &allow));
        assert!(!is_allowed(&addr("10.0.0.2"), &allow));
    }

    #[test]
    fn test_range_match() {
        let allow = list("10.0.0.1,192.168.1.0/24");
        assert!(is_allowed(&addr("10.0.0.1"), &allow));
        assert!(is_allowed(&addr("192.168.1.55"), &allow));
        assert!(!is_allowed(&addr("8.8.8.8"), &allow));
    }

    #[test]
    fn test_empty_list_denies() {
        let allow = AllowList::default();
        for a in ["127.0.0.1", "::1", "0.0.0.0", "10.0.0.1"] {
            assert!(!is_allowed(&addr(a), &allow));
        }
    }

    #[test]
    fn test_exact_match_is_textual() {
        // Same address, different spelling: only a range can match it
        let allow = list("::1");
        assert!(is_allowed(&addr("::1"), &allow));
        assert!(!is_allowed(&addr("0:0:0:0:0:0:0:1"), &allow));

        let allow = list("::1/128");
        assert!(is_allowed(&addr("0:0:0:0:0:0:0:1"), &allow));
    }

    #[test]
    fn test_overlapping_ranges() {
        let allow = list("10.0.0.0/8,10.1.0.0/16");
        assert!(is_allowed(&addr("10.1.2.3"), &allow));
        assert!(is_allowed(&addr("10.200.0.1"), &allow));
        assert!(!is_allowed(&addr("11.0.0.1"), &allow));
    }
}
