// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The coordinate type addressing one chunk of the host's world.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one fixed-size partition ("chunk") of the host's addressable
/// space.
///
/// Equality and hashing are purely structural, so the coordinate can be used
/// directly as a map or set key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// Chunk index along the x axis.
    pub x: i32,
    /// Chunk index along the z axis.
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a coordinate from its two chunk indices.
    #[must_use]
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from((x, z): (i32, i32)) -> Self {
        Self { x, z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn structural_equality_and_hashing() {
        let mut set = HashSet::new();
        set.insert(ChunkCoord::new(3, -7));
        set.insert(ChunkCoord::new(3, -7));
        set.insert(ChunkCoord::new(-7, 3));

        assert_eq!(set.len(), 2);
        assert!(set.contains(&ChunkCoord::from((3, -7))));
    }

    #[test]
    fn display_format() {
        assert_eq!(ChunkCoord::new(12, -4).to_string(), "(12, -4)");
    }
}
