//! Order lifecycle status and user roles.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// The happy path is `pending → confirmed → shipping → delivered`, with a
/// terminal side branch `pending → cancelled`. No transition skips a stage,
/// and terminal states have no outgoing transitions.
///
/// [`OrderStatus::Unknown`] is never written by this system: it is the
/// explicit indicator for a stored value outside the five recognized
/// statuses, so unrecognized data renders as "unknown" instead of silently
/// defaulting to a real state. [`OrderStatus::parse`] rejects it, which
/// keeps it out of transition requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipping,
    Delivered,
    Cancelled,
    /// Stored value outside the recognized set.
    Unknown,
}

impl OrderStatus {
    /// Parse a status from a transition request.
    ///
    /// Only the five real statuses are accepted; anything else (including
    /// `"unknown"`) is rejected so invalid values never reach storage.
    ///
    /// # Errors
    ///
    /// Returns the offending input on failure.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "shipping" => Ok(Self::Shipping),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("invalid order status: {other}")),
        }
    }

    /// Decode a stored status value.
    ///
    /// Unlike [`OrderStatus::parse`], an out-of-set value maps to
    /// [`OrderStatus::Unknown`] so historical rows with bad data still
    /// render, flagged explicitly.
    #[must_use]
    pub fn from_stored(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Unknown)
    }

    /// The canonical string form, as stored and serialized.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipping => "shipping",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Unknown)
    }

    /// Whether a transition from `self` to `next` is legal.
    ///
    /// Stages cannot be skipped and terminal states are final. `Unknown`
    /// admits nothing in either direction.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Shipping)
                | (Self::Shipping, Self::Delivered)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User role.
///
/// Assigned at registration (`user`) or by an operator (`admin`); never
/// changes at runtime. Admin-only operations check this server-side on
/// every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// The canonical string form, as stored.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Whether this role grants admin privileges.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_the_five_statuses() {
        for (input, expected) in [
            ("pending", OrderStatus::Pending),
            ("confirmed", OrderStatus::Confirmed),
            ("shipping", OrderStatus::Shipping),
            ("delivered", OrderStatus::Delivered),
            ("cancelled", OrderStatus::Cancelled),
        ] {
            assert_eq!(OrderStatus::parse(input).unwrap(), expected);
        }
    }

    #[test]
    fn test_parse_rejects_everything_else() {
        assert!(OrderStatus::parse("shipped").is_err());
        assert!(OrderStatus::parse("PENDING").is_err());
        assert!(OrderStatus::parse("unknown").is_err());
        assert!(OrderStatus::parse("").is_err());
    }

    #[test]
    fn test_from_stored_maps_bad_data_to_unknown() {
        assert_eq!(OrderStatus::from_stored("pending"), OrderStatus::Pending);
        assert_eq!(OrderStatus::from_stored("refunded"), OrderStatus::Unknown);
        assert_eq!(OrderStatus::from_stored(""), OrderStatus::Unknown);
    }

    #[test]
    fn test_happy_path_transitions() {
        use OrderStatus::{Confirmed, Delivered, Pending, Shipping};
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Shipping));
        assert!(Shipping.can_transition_to(Delivered));
    }

    #[test]
    fn test_no_stage_skipping() {
        use OrderStatus::{Confirmed, Delivered, Pending, Shipping};
        assert!(!Pending.can_transition_to(Shipping));
        assert!(!Pending.can_transition_to(Delivered));
        assert!(!Confirmed.can_transition_to(Delivered));
        assert!(!Shipping.can_transition_to(Confirmed));
    }

    #[test]
    fn test_cancel_only_from_pending() {
        use OrderStatus::{Cancelled, Confirmed, Pending, Shipping};
        assert!(Pending.can_transition_to(Cancelled));
        assert!(!Confirmed.can_transition_to(Cancelled));
        assert!(!Shipping.can_transition_to(Cancelled));
    }

    #[test]
    fn test_terminal_states_are_final() {
        use OrderStatus::{Cancelled, Confirmed, Delivered, Pending, Unknown};
        for terminal in [Delivered, Cancelled, Unknown] {
            assert!(terminal.is_terminal());
            for next in [Pending, Confirmed, Delivered, Cancelled] {
                assert!(!terminal.can_transition_to(next));
            }
        }
        assert!(!Pending.can_transition_to(Unknown));
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&OrderStatus::Shipping).unwrap();
        assert_eq!(json, "\"shipping\"");
        let json = serde_json::to_string(&OrderStatus::Unknown).unwrap();
        assert_eq!(json, "\"unknown\"");
    }

    #[test]
    fn test_role_parse_and_display() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert!("superuser".parse::<Role>().is_err());
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}
