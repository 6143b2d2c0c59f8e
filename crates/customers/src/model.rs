//! Customer records, approval states, and the merge-on-update patch.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use velora_core::CustomerId;

/// Approval workflow state of a customer record.
///
/// Every record starts out `Pending` and moves to `Approved` or `Rejected`
/// exactly once; both outcomes are terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Pending,
    Approved,
    Rejected,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl core::fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access role recorded on a customer row.
///
/// Creation always assigns `Customer`; `Admin` only ever comes back from
/// rows provisioned outside this engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerRole {
    Customer,
    Admin,
}

impl CustomerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(Self::Customer),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl core::fmt::Display for CustomerRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of reviewing a pending customer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    /// Status the record transitions to when the decision is applied.
    pub fn status(self) -> CustomerStatus {
        match self {
            Self::Approved => CustomerStatus::Approved,
            Self::Rejected => CustomerStatus::Rejected,
        }
    }
}

/// A customer record as stored.
///
/// The password hash is deliberately excluded from serialization so it can
/// never leak through a response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub status: CustomerStatus,
    pub role: CustomerRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Normalized data for an insert.
///
/// `status` and `role` are set by the lifecycle service, never taken from
/// the caller, and the password arrives here already hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub status: CustomerStatus,
    pub role: CustomerRole,
}

/// The mutable subset of customer fields.
///
/// `email`, the password, `status` and `role` cannot change through the
/// update path, so they have no slot here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.birth_date.is_none()
    }

    /// Overlay the supplied fields onto `current`.
    ///
    /// Fields absent from the patch keep their current value exactly;
    /// `updated_at` is left for the store to refresh at write time.
    pub fn apply_to(&self, current: &Customer) -> Customer {
        let mut merged = current.clone();
        if let Some(first_name) = &self.first_name {
            merged.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            merged.last_name = last_name.clone();
        }
        if let Some(phone) = &self.phone {
            merged.phone = Some(phone.clone());
        }
        if let Some(birth_date) = self.birth_date {
            merged.birth_date = Some(birth_date);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_customer() -> Customer {
        Customer {
            id: CustomerId::from_i64(1),
            first_name: "Ana".to_string(),
            last_name: "Lopez".to_string(),
            email: "ana@x.com".to_string(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
            phone: Some("1234567890".to_string()),
            birth_date: NaiveDate::from_ymd_opt(2000, 5, 5),
            status: CustomerStatus::Pending,
            role: CustomerRole::Customer,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn patch_overlays_only_supplied_fields() {
        let current = sample_customer();
        let patch = CustomerPatch {
            phone: Some("+15551234567".to_string()),
            ..CustomerPatch::default()
        };

        let merged = patch.apply_to(&current);

        assert_eq!(merged.phone.as_deref(), Some("+15551234567"));
        assert_eq!(merged.first_name, current.first_name);
        assert_eq!(merged.last_name, current.last_name);
        assert_eq!(merged.birth_date, current.birth_date);
        assert_eq!(merged.email, current.email);
        assert_eq!(merged.password_hash, current.password_hash);
        assert_eq!(merged.status, current.status);
        assert_eq!(merged.role, current.role);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let current = sample_customer();
        let patch = CustomerPatch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.apply_to(&current), current);
    }

    #[test]
    fn patch_never_clears_optional_fields() {
        let current = sample_customer();
        let patch = CustomerPatch {
            first_name: Some("Maria".to_string()),
            ..CustomerPatch::default()
        };

        let merged = patch.apply_to(&current);

        assert_eq!(merged.first_name, "Maria");
        assert!(merged.phone.is_some());
        assert!(merged.birth_date.is_some());
    }

    #[test]
    fn decision_maps_to_terminal_status() {
        assert_eq!(Decision::Approved.status(), CustomerStatus::Approved);
        assert_eq!(Decision::Rejected.status(), CustomerStatus::Rejected);
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            CustomerStatus::Pending,
            CustomerStatus::Approved,
            CustomerStatus::Rejected,
        ] {
            assert_eq!(CustomerStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CustomerStatus::parse("archived"), None);
    }

    #[test]
    fn password_hash_never_serializes() {
        let json = serde_json::to_value(sample_customer()).expect("customer serializes");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "ana@x.com");
        assert_eq!(json["status"], "pending");
    }
}
