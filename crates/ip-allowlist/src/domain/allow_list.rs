//! Immutable allow-list: exact addresses plus CIDR ranges.

use super::address::{AddressRange, ClientAddress};
use super::error::ParseError;
use std::collections::HashSet;
use std::str::FromStr;

/// Addresses and ranges permitted to pass the gate.
///
/// Built once from configuration and never mutated afterwards, so a single
/// instance can be shared across concurrent requests without locking.
/// An empty list denies everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    addresses: HashSet<String>,
    ranges: Vec<AddressRange>,
}

impl AllowList {
    /// Build an allow-list from a comma-separated definition.
    ///
    /// Entries containing `/` are CIDR blocks, all others plain addresses.
    /// Entries are taken exactly as split, whitespace included. Only the
    /// empty string yields the empty list. The first invalid entry, left to
    /// right, aborts the whole parse.
    pub fn parse(definition: &str) -> Result<Self, ParseError> {
        let mut list = AllowList::default();
        if definition.is_empty() {
            return Ok(list);
        }

        for entry in definition.split(',') {
            if entry.contains('/') {
                let range = entry
                    .parse::<AddressRange>()
                    .map_err(|e| ParseError::InvalidCidr {
                        entry: entry.to_string(),
                        reason: e.to_string(),
                    })?;
                list.ranges.push(range);
            } else {
                let addr = entry
                    .parse::<ClientAddress>()
                    .map_err(|e| ParseError::InvalidAddress {
                        entry: entry.to_string(),
                        reason: e.to_string(),
                    })?;
                list.addresses.insert(addr.into_string());
            }
        }

        Ok(list)
    }

    /// Exact-match entries, in their configured textual form
    pub fn addresses(&self) -> &HashSet<String> {
        &self.addresses
    }

    pub fn ranges(&self) -> &[AddressRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty() && self.ranges.is_empty()
    }

    /// Total number of entries (duplicate exact addresses count once)
    pub fn len(&self) -> usize {
        self.addresses.len() + self.ranges.len()
    }
}

impl FromStr for AllowList {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_definition() {
        let list = AllowList::parse("").unwrap();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_blank_definition_is_invalid() {
        let err = AllowList::parse("   ").unwrap_err();
        assert!(matches!(err, ParseError::InvalidAddress { ref entry, .. } if entry == "   "));
    }

    #[test]
    fn test_mixed_definition() {
        let list = AllowList::parse("10.0.0.1,192.168.1.0/24,::1,fd00::/8").unwrap();
        assert_eq!(list.addresses().len(), 2);
        assert!(list.addresses().contains("10.0.0.1"));
        assert!(list.addresses().contains("::1"));
        assert_eq!(list.ranges().len(), 2);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_entries_are_not_trimmed() {
        let err = AllowList::parse(" 10.0.0.1").unwrap_err();
        assert!(matches!(err, ParseError::InvalidAddress { ref entry, .. } if entry == " 10.0.0.1"));

        let err = AllowList::parse("10.0.0.1, 192.168.1.0/24").unwrap_err();
        assert!(matches!(err, ParseError::InvalidCidr { ref entry, .. } if entry == " 192.168.1.0/24"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let list = AllowList::parse("10.0.0.1,10.0.0.1").unwrap();
        assert_eq!(list.addresses().len(), 1);
    }

    #[test]
    fn test_invalid_address() {
        let err = AllowList::parse("not-an-ip").unwrap_err();
        assert!(matches!(err, ParseError::InvalidAddress { ref entry, .. } if entry == "not-an-ip"));
    }

    #[test]
    fn test_invalid_cidr() {
        let err = AllowList::parse("10.0.0.0/99").unwrap_err();
        assert!(matches!(err, ParseError::InvalidCidr { ref entry, .. } if entry == "10.0.0.0/99"));
    }

    #[test]
    fn test_first_invalid_entry_reported() {
        let err = AllowList::parse("10.0.0.1,bad/8,also-bad").unwrap_err();
        assert_eq!(err.entry(), "bad/8");

        let err = AllowList::parse("10.0.0.1,also-bad,bad/8").unwrap_err();
        assert_eq!(err.entry(), "also-bad");
    }

    #[test]
    fn test_trailing_comma_is_invalid() {
        let err = AllowList::parse("10.0.0.1,").unwrap_err();
        assert!(matches!(err, ParseError::InvalidAddress { ref entry, .. } if entry.is_empty()));
    }

    #[test]
    fn test_from_str() {
        let list: AllowList = "10.0.0.0/8".parse().unwrap();
        assert_eq!(list.ranges().len(), 1);
        assert!("10.0.0.0/8,nope".parse::<AllowList>().is_err());
    }
}
