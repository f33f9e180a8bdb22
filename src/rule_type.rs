//! Rule type definitions.

use std::fmt;

/// RuleType is the tag written in front of every rule line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleType {
    /// Matches a domain and all of its subdomains
    DomainSuffix,
    /// Matches any domain containing the content as a substring
    DomainKeyword,
    /// Matches an IP address block
    IpCidr,
    /// Matches the destination against a regular expression
    Regex,
}

impl RuleType {
    /// All rule types, in tag order.
    pub const ALL: [RuleType; 4] = [
        RuleType::DomainSuffix,
        RuleType::DomainKeyword,
        RuleType::IpCidr,
        RuleType::Regex,
    ];

    /// Parse a rule type from a string (case-insensitive, `_` and `-` interchangeable).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace('_', "-").as_str() {
            "DOMAIN-SUFFIX" => Some(RuleType::DomainSuffix),
            "DOMAIN-KEYWORD" => Some(RuleType::DomainKeyword),
            "IP-CIDR" | "IPCIDR" => Some(RuleType::IpCidr),
            "REGEX" => Some(RuleType::Regex),
            _ => None,
        }
    }

    /// Get the canonical tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::DomainSuffix => "DOMAIN-SUFFIX",
            RuleType::DomainKeyword => "DOMAIN-KEYWORD",
            RuleType::IpCidr => "IP-CIDR",
            RuleType::Regex => "REGEX",
        }
    }

    /// Whether the content of this rule type is a domain name or fragment.
    pub fn is_domain(&self) -> bool {
        matches!(self, RuleType::DomainSuffix | RuleType::DomainKeyword)
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
