/// A QR Code version number, between 1 and 40 (inclusive).
///
/// The version determines the symbol side: `21 + 4*(version-1)` modules.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Version(u8);

impl Version {
    /// The smallest version defined by the standard.
    pub const MIN: Version = Version(1);

    /// The largest version defined by the standard.
    pub const MAX: Version = Version(40);

    /// Creates a version from the given number.
    ///
    /// Panics if the number is outside the range `[1, 40]`. Callers taking a
    /// version from untrusted input should use [`Version::try_new`] instead.
    pub fn new(ver: u8) -> Self {
        Self::try_new(ver).expect("version number out of range")
    }

    /// Creates a version from the given number, returning `None` if it is
    /// outside the range `[1, 40]`.
    pub fn try_new(ver: u8) -> Option<Self> {
        (Version::MIN.0..=Version::MAX.0).contains(&ver).then_some(Version(ver))
    }

    /// The version number, in the range `[1, 40]`.
    pub fn value(self) -> u8 {
        self.0
    }

    /// The side length of the core (non-quiet-zone) symbol, in modules.
    pub fn size(self) -> u16 {
        21 + 4 * (u16::from(self.0) - 1)
    }

    /// The next higher version, if any.
    pub fn next(self) -> Option<Version> {
        Version::try_new(self.0 + 1)
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn compute_symbol_size_from_version() {
        assert_eq!(Version::new(1).size(), 21);
        assert_eq!(Version::new(2).size(), 25);
        assert_eq!(Version::new(40).size(), 177);
    }

    #[test]
    fn reject_out_of_range_versions() {
        assert_eq!(Version::try_new(0), None);
        assert_eq!(Version::try_new(41), None);
        assert!(Version::try_new(1).is_some());
        assert!(Version::try_new(40).is_some());
    }

    #[test]
    #[should_panic]
    fn panic_on_invalid_version_via_new() {
        Version::new(41);
    }

    #[test]
    fn stop_advancing_past_max() {
        assert_eq!(Version::MAX.next(), None);
        assert_eq!(Version::new(6).next(), Some(Version::new(7)));
    }
}
