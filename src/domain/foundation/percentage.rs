//! Percentage value object (0-100 scale).

/// A value between 0 and 100 inclusive.
///
/// Used for the share of attendees that must be free for a slot to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage(u8);

impl Percentage {
    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_is_everyone() {
        assert_eq!(Percentage::HUNDRED.value(), 100);
    }
}
