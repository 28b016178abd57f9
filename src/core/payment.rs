//! Payment records, aggregate stats and their display labels

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency assigned to payments created through the workflow
pub const DEFAULT_CURRENCY: &str = "COP";

/// Upper bound (inclusive) accepted for `order_amount`
pub const MAX_ORDER_AMOUNT: f64 = 1_000_000_000.0;

/// Lifecycle status of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Rejected,
}

impl PaymentStatus {
    /// Wire name (`pending`, `completed`, `rejected`)
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Rejected => "rejected",
        }
    }

    /// Human-facing label shown in tables and invoices
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pendiente",
            PaymentStatus::Completed => "Completada",
            PaymentStatus::Rejected => "Rechazado",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Funding method category of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentScheme {
    Limit,
    Credit,
    Wallet,
}

impl PaymentScheme {
    /// All schemes, in form order
    pub const ALL: [PaymentScheme; 3] = [
        PaymentScheme::Limit,
        PaymentScheme::Credit,
        PaymentScheme::Wallet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentScheme::Limit => "limit",
            PaymentScheme::Credit => "credit",
            PaymentScheme::Wallet => "wallet",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentScheme::Limit => "Limit",
            PaymentScheme::Credit => "Credit",
            PaymentScheme::Wallet => "Wallet",
        }
    }
}

impl fmt::Display for PaymentScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentScheme::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == s)
            .ok_or_else(|| format!("unknown payment scheme '{}'", s))
    }
}

/// A value/label pair offered by a form select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Wallets offered by the creation form
pub const WALLET_OPTIONS: [SelectOption; 3] = [
    SelectOption {
        value: "provedores-pay",
        label: "Provedores Pay",
    },
    SelectOption {
        value: "business-wallet",
        label: "Business Wallet",
    },
    SelectOption {
        value: "corporate-funds",
        label: "Corporate Funds",
    },
];

/// A payment record
///
/// Records are immutable once admitted to a store. The `id` is an opaque
/// internal key while `identification` is the transaction code users see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub identification: String,
    pub recipient: String,
    pub order_amount: f64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub status: PaymentStatus,
    pub scheme: PaymentScheme,
}

impl Payment {
    /// Calendar date of `created_at`, time-of-day stripped
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

/// Aggregate account figures displayed above the payment table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStats {
    /// Account balance, decremented by every created payment
    pub balance: f64,

    /// Running count of payments, incremented per creation
    pub payment_count: u64,

    /// Running sum of created amounts
    pub total_paid: f64,
}

impl PaymentStats {
    /// Stats after admitting a payment of `amount`
    pub fn record_payment(self, amount: f64) -> Self {
        Self {
            balance: self.balance - amount,
            payment_count: self.payment_count + 1,
            total_paid: self.total_paid + amount,
        }
    }
}

/// A validated creation request handed to a repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    pub scheme: PaymentScheme,
    pub handle: String,
    pub amount: f64,
    pub wallet: String,
}

impl NewPayment {
    /// The handle with exactly one leading `@`
    pub fn recipient(&self) -> String {
        normalize_handle(&self.handle)
    }
}

/// Prefix a handle with `@` unless it already has one
pub fn normalize_handle(handle: &str) -> String {
    if handle.starts_with('@') {
        handle.to_string()
    } else {
        format!("@{}", handle)
    }
}
