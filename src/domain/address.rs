use {
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Stored in place of any address field the customer left blank.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    Billing,
    Shipping,
}

impl AddressKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Billing => "billing",
            Self::Shipping => "shipping",
        }
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Address fields as received, before fallbacks. Empty strings count as absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddressParts<'a> {
    pub name: Option<&'a str>,
    pub street: Option<&'a str>,
    pub city: Option<&'a str>,
    pub postal_code: Option<&'a str>,
    pub country: Option<&'a str>,
    pub region: Option<&'a str>,
}

/// For INSERT; a fresh record is created on every payment completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAddress {
    kind: AddressKind,
    name: String,
    street: String,
    city: String,
    postal_code: String,
    country: String,
    region: Option<String>,
}

impl NewAddress {
    /// Every missing field becomes [`UNKNOWN`] except `region`, which stays absent.
    pub fn from_parts(kind: AddressKind, parts: AddressParts<'_>) -> Self {
        Self {
            kind,
            name: or_unknown(parts.name),
            street: or_unknown(parts.street),
            city: or_unknown(parts.city),
            postal_code: or_unknown(parts.postal_code),
            country: or_unknown(parts.country),
            region: present(parts.region).map(str::to_string),
        }
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn or_unknown(value: Option<&str>) -> String {
    present(value).unwrap_or(UNKNOWN).to_string()
}
