//! Vector swizzles (`v.xyz`, `v.rg`, `v.stp`)

const SETS: [&str; 3] = ["xyzw", "rgba", "stpq"];

/// A parsed swizzle: component indices plus the letter set it was written in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swizzle {
    indices: Vec<u8>,
    set: usize,
}

impl Swizzle {
    /// Parse `member` as a swizzle of a vector with `width` components.
    ///
    /// All letters must come from one naming set and address existing
    /// components; anything else is a field access, not a swizzle.
    pub fn parse(member: &str, width: u8) -> Option<Self> {
        if member.is_empty() || member.len() > 4 {
            return None;
        }
        let first = member.chars().next()?;
        let set = SETS.iter().position(|letters| letters.contains(first))?;

        let mut indices = Vec::with_capacity(member.len());
        for c in member.chars() {
            let index = SETS[set].find(c)? as u8;
            if index >= width {
                return None;
            }
            indices.push(index);
        }
        Some(Self { indices, set })
    }

    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// True when the swizzle reads `width` consecutive components from `offset`, in order
    pub fn is_exact_range(&self, offset: u8, width: u8) -> bool {
        self.indices.len() == width as usize
            && self
                .indices
                .iter()
                .enumerate()
                .all(|(i, index)| *index == offset + i as u8)
    }

    /// True when every component lies in `offset..offset + width`
    pub fn within_range(&self, offset: u8, width: u8) -> bool {
        self.indices
            .iter()
            .all(|index| *index >= offset && *index < offset + width)
    }

    /// Same components shifted down by `offset`, rendered in the original letter set
    pub fn shifted(&self, offset: u8) -> Option<String> {
        self.indices
            .iter()
            .map(|index| {
                let shifted = index.checked_sub(offset)? as usize;
                SETS[self.set].as_bytes().get(shifted).map(|&letter| char::from(letter))
            })
            .collect()
    }
}
