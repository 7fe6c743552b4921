use std::fmt;

/// Canonical identifier of a conversation peer
///
/// Phone numbers are a leading `+` followed by digits only; anything containing `@`
/// with text on both sides is an email address. Construct through [`Self::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConversationAddress {
    Phone(String),
    Email(String),
}

impl ConversationAddress {
    /// Parse a canonical address, returning `None` for anything in neither form
    ///
    /// # Examples
    ///
    /// ```
    /// use message_history_explorer::models::ConversationAddress;
    ///
    /// assert!(matches!(ConversationAddress::parse("+61400000000"), Some(ConversationAddress::Phone(_))));
    /// assert!(matches!(ConversationAddress::parse("a@b.com"), Some(ConversationAddress::Email(_))));
    /// assert_eq!(ConversationAddress::parse("James"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        if let Some(digits) = input.strip_prefix('+') {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return Some(Self::Phone(input.to_string()));
            }
            return None;
        }

        match input.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Some(Self::Email(input.to_string()))
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Phone(value) | Self::Email(value) => value,
        }
    }

    pub fn is_phone(&self) -> bool {
        matches!(self, Self::Phone(_))
    }
}

impl fmt::Display for ConversationAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_phone() {
        let address = ConversationAddress::parse("+14155550123").unwrap();
        assert!(address.is_phone());
        assert_eq!(address.as_str(), "+14155550123");
    }

    #[test]
    fn test_parse_email() {
        let address = ConversationAddress::parse("a@b.com").unwrap();
        assert!(!address.is_phone());
        assert_eq!(address.to_string(), "a@b.com");
    }

    #[test]
    fn test_parse_rejects_formatted_phone() {
        assert_eq!(ConversationAddress::parse("+61 400 000 000"), None);
        assert_eq!(ConversationAddress::parse("+"), None);
        assert_eq!(ConversationAddress::parse("0400000000"), None);
    }

    #[test]
    fn test_parse_rejects_partial_email() {
        assert_eq!(ConversationAddress::parse("@b.com"), None);
        assert_eq!(ConversationAddress::parse("a@"), None);
        assert_eq!(ConversationAddress::parse("a@b@c"), None);
    }

    #[test]
    fn test_parse_plain_name() {
        assert_eq!(ConversationAddress::parse("James"), None);
        assert_eq!(ConversationAddress::parse(""), None);
    }
}
