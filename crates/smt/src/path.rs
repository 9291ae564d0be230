//! Node addressing by `(depth, path)`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::SmtError, MAX_DEPTH};

/// Address of a single node: `depth` counts from the root (0) down to the
/// leaves, `path` is the node index within that level, read left to right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MerklePath {
    /// Node index within its level
    pub path: u32,
    /// Distance from the root
    pub depth: u8,
}

impl MerklePath {
    /// The root node
    pub const ROOT: Self = Self { path: 0, depth: 0 };

    /// Create a path, checking that `path` exists at `depth`.
    pub fn new(path: u32, depth: u8) -> Result<Self, SmtError> {
        if depth > MAX_DEPTH {
            return Err(SmtError::PathTooDeep);
        }
        if u64::from(path) > max_index(depth) {
            return Err(SmtError::IndexOutOfRange { index: path.into(), depth });
        }
        Ok(Self { path, depth })
    }

    /// Parse a bit string where each bit picks the left (`0`) or right (`1`)
    /// child on the way down. The empty string is the root.
    pub fn from_bits(bits: &str) -> Result<Self, SmtError> {
        if bits.is_empty() {
            return Ok(Self::ROOT);
        }
        if bits.len() > MAX_DEPTH as usize {
            return Err(SmtError::PathTooDeep);
        }
        if !bits.bytes().all(|bit| bit == b'0' || bit == b'1') {
            return Err(SmtError::InvalidPathBits(bits.to_owned()));
        }
        let path = u32::from_str_radix(bits, 2)
            .map_err(|_| SmtError::InvalidPathBits(bits.to_owned()))?;
        Ok(Self { path, depth: bits.len() as u8 })
    }

    /// Parent node
    pub fn parent(&self) -> Result<Self, SmtError> {
        if self.depth == 0 {
            return Err(SmtError::RootHasNoParent);
        }
        Ok(Self { path: self.path >> 1, depth: self.depth - 1 })
    }

    /// Left (`right == false`) or right child
    pub fn child(&self, right: bool) -> Result<Self, SmtError> {
        if self.depth >= MAX_DEPTH {
            return Err(SmtError::PathTooDeep);
        }
        Ok(Self { path: (self.path << 1) | u32::from(right), depth: self.depth + 1 })
    }

    /// Move `value` nodes to the right on the same level.
    pub fn add(&self, value: u32) -> Result<Self, SmtError> {
        let index = u64::from(self.path) + u64::from(value);
        if index > max_index(self.depth) {
            return Err(SmtError::IndexOutOfRange { index, depth: self.depth });
        }
        Ok(Self { path: index as u32, depth: self.depth })
    }

    /// Move `value` nodes to the left on the same level.
    pub fn sub(&self, value: u32) -> Result<Self, SmtError> {
        let path = self
            .path
            .checked_sub(value)
            .ok_or(SmtError::IndexOutOfRange { index: 0, depth: self.depth })?;
        Ok(Self { path, depth: self.depth })
    }

    /// The other child of this node's parent
    pub fn sibling(&self) -> Result<Self, SmtError> {
        if self.depth == 0 {
            return Err(SmtError::RootHasNoParent);
        }
        Ok(Self { path: self.path ^ 1, depth: self.depth })
    }

    /// Whether this node is the left child of its parent
    pub const fn is_left(&self) -> bool {
        self.path & 1 == 0
    }

    /// Whether this node is the right child of its parent
    pub const fn is_right(&self) -> bool {
        !self.is_left()
    }

    /// Sibling paths from this node up to (but excluding) the root.
    pub fn witness_paths(&self) -> Result<Vec<Self>, SmtError> {
        let mut witnesses = Vec::with_capacity(self.depth as usize);
        let mut current = *self;
        while current.depth > 0 {
            witnesses.push(current.sibling()?);
            current = current.parent()?;
        }
        Ok(witnesses)
    }

    /// 5-byte storage key: `depth ∥ path (little-endian)`.
    pub fn to_bytes(&self) -> [u8; 5] {
        let mut bytes = [0u8; 5];
        bytes[0] = self.depth;
        bytes[1..5].copy_from_slice(&self.path.to_le_bytes());
        bytes
    }

    /// Inverse of [`MerklePath::to_bytes`]
    pub fn from_bytes(data: &[u8]) -> Result<Self, SmtError> {
        let bytes: [u8; 5] = data.try_into().map_err(|_| SmtError::InvalidPathLength(data.len()))?;
        let path = u32::from_le_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);
        Self::new(path, bytes[0])
    }
}

impl fmt::Display for MerklePath {
    /// Bit-string form accepted by [`MerklePath::from_bits`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.depth == 0 {
            return Ok(());
        }
        write!(f, "{:0width$b}", self.path, width = self.depth as usize)
    }
}

const fn max_index(depth: u8) -> u64 {
    (1u64 << depth) - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bits() {
        assert_eq!(MerklePath::from_bits("").unwrap(), MerklePath::ROOT);
        assert_eq!(MerklePath::from_bits("0110").unwrap(), MerklePath { path: 6, depth: 4 });
        assert_eq!(MerklePath::from_bits("1").unwrap(), MerklePath { path: 1, depth: 1 });
        assert!(matches!(MerklePath::from_bits("012"), Err(SmtError::InvalidPathBits(_))));
        assert!(matches!(MerklePath::from_bits("+1"), Err(SmtError::InvalidPathBits(_))));
        assert!(matches!(MerklePath::from_bits(&"1".repeat(33)), Err(SmtError::PathTooDeep)));
    }

    #[test]
    fn test_display_round_trips_bits() {
        for bits in ["", "0", "1", "0110", "10000000000000000000000000000001"] {
            assert_eq!(MerklePath::from_bits(bits).unwrap().to_string(), bits);
        }
    }

    #[test]
    fn test_parent_and_child() {
        let path = MerklePath::from_bits("101").unwrap();
        assert_eq!(path.parent().unwrap(), MerklePath::from_bits("10").unwrap());
        assert_eq!(path.child(false).unwrap(), MerklePath::from_bits("1010").unwrap());
        assert_eq!(path.child(true).unwrap(), MerklePath::from_bits("1011").unwrap());
        assert!(matches!(MerklePath::ROOT.parent(), Err(SmtError::RootHasNoParent)));

        let deepest = MerklePath::new(0, MAX_DEPTH).unwrap();
        assert!(matches!(deepest.child(true), Err(SmtError::PathTooDeep)));
    }

    #[test]
    fn test_sibling() {
        let left = MerklePath::from_bits("100").unwrap();
        let right = MerklePath::from_bits("101").unwrap();
        assert!(left.is_left());
        assert!(right.is_right());
        assert_eq!(left.sibling().unwrap(), right);
        assert_eq!(right.sibling().unwrap(), left);
    }

    #[test]
    fn test_add_and_sub_stay_on_level() {
        let path = MerklePath::new(2, 2).unwrap();
        assert_eq!(path.add(1).unwrap(), MerklePath { path: 3, depth: 2 });
        assert!(matches!(path.add(2), Err(SmtError::IndexOutOfRange { index: 4, depth: 2 })));
        assert_eq!(path.sub(2).unwrap(), MerklePath { path: 0, depth: 2 });
        assert!(path.sub(3).is_err());

        let widest = MerklePath::new(u32::MAX - 1, 32).unwrap();
        assert_eq!(widest.add(1).unwrap().path, u32::MAX);
        assert!(widest.add(2).is_err());
    }

    #[test]
    fn test_new_rejects_missing_nodes() {
        assert!(MerklePath::new(4, 2).is_err());
        assert!(MerklePath::new(0, 33).is_err());
        assert!(MerklePath::new(u32::MAX, 32).is_ok());
    }

    #[test]
    fn test_witness_paths() {
        let path = MerklePath::from_bits("011").unwrap();
        let witnesses = path.witness_paths().unwrap();
        let expected: Vec<_> = ["010", "00", "1"]
            .into_iter()
            .map(|bits| MerklePath::from_bits(bits).unwrap())
            .collect();
        assert_eq!(witnesses, expected);
        assert!(MerklePath::ROOT.witness_paths().unwrap().is_empty());
    }

    #[test]
    fn test_bytes_round_trip() {
        let path = MerklePath::new(0xdead_beef, 32).unwrap();
        let bytes = path.to_bytes();
        assert_eq!(bytes, [32, 0xef, 0xbe, 0xad, 0xde]);
        assert_eq!(MerklePath::from_bytes(&bytes).unwrap(), path);
        assert!(matches!(MerklePath::from_bytes(&bytes[..4]), Err(SmtError::InvalidPathLength(4))));
    }
}
