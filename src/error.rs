use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscreteError {
    #[error("Invalid digit '{digit}' for base {base}")]
    InvalidDigit { digit: char, base: u32 },

    #[error("Unsupported base {0}, expected one of 2, 8, 10, 16")]
    UnsupportedBase(u32),

    #[error("Invalid element '{0}', expected an integer")]
    InvalidElement(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("'{0}' does not fit the supported integer range")]
    Overflow(String),

    #[error("Binary search requires ascending input, order breaks at index {index}")]
    NotSorted { index: usize },
}

pub type Result<T> = std::result::Result<T, DiscreteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        let err = DiscreteError::InvalidDigit {
            digit: '8',
            base: 8,
        };
        assert_eq!(err.to_string(), "Invalid digit '8' for base 8");
        assert_eq!(
            DiscreteError::UnsupportedBase(3).to_string(),
            "Unsupported base 3, expected one of 2, 8, 10, 16"
        );
    }
}
