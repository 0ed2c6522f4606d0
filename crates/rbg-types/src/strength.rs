use crate::RbgError;

/// Security strength classes (NIST SP 800-57 Part 1, Table 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SecurityStrength {
    Bits112,
    Bits128,
    Bits192,
    Bits256,
}

impl SecurityStrength {
    /// All classes in ascending order.
    pub const ALL: [SecurityStrength; 4] = [
        SecurityStrength::Bits112,
        SecurityStrength::Bits128,
        SecurityStrength::Bits192,
        SecurityStrength::Bits256,
    ];

    /// The highest strength any DRBG can be instantiated at.
    pub const MAX_BITS: u32 = 256;

    /// Round a requested strength up to the smallest supported class.
    ///
    /// A request of 0 yields 112. Requests above 256 bits cannot be honored.
    pub fn round_up(requested: u32) -> Result<Self, RbgError> {
        Self::ALL
            .into_iter()
            .find(|class| requested <= class.bits())
            .ok_or(RbgError::InvalidStrength {
                requested,
                max: Self::MAX_BITS,
            })
    }

    /// Strength in bits.
    pub fn bits(self) -> u32 {
        match self {
            Self::Bits112 => 112,
            Self::Bits128 => 128,
            Self::Bits192 => 192,
            Self::Bits256 => 256,
        }
    }
}

impl std::fmt::Display for SecurityStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} bits", self.bits())
    }
}
