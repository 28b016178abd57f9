//! Initial dashboard data

use crate::core::payment::{Payment, PaymentScheme, PaymentStats, PaymentStatus};
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::core::payment::PaymentScheme::{Credit, Limit, Wallet};
use crate::core::payment::PaymentStatus::{Completed, Pending, Rejected};

type SeedRow = (
    &'static str,
    &'static str,
    f64,
    (i32, u32, u32, u32, u32),
    PaymentStatus,
    PaymentScheme,
);

// identification, recipient, amount, created (y, m, d, h, min), status, scheme
const SEED_ROWS: [SeedRow; 15] = [
    ("TX-2025-001-A7B9", "@matbaelo", 65_000.0, (2024, 12, 15, 10, 30), Pending, Limit),
    ("TX-2025-002-K3M5", "@edugarcia", 95_000.0, (2024, 12, 10, 9, 15), Completed, Limit),
    ("TX-2025-003-P8R2", "@samarahfelipez", 45_000.0, (2024, 12, 1, 8, 20), Completed, Limit),
    ("TX-2025-004-L9N1", "@joenslegend", 125_000.0, (2024, 11, 28, 7, 45), Rejected, Limit),
    ("TX-2025-005-Q4F7", "@jocolmerardz", 75_000.0, (2024, 11, 22, 16, 30), Completed, Limit),
    ("TX-2025-006-X6T3", "@nullfran", 85_000.0, (2024, 11, 15, 15, 20), Completed, Limit),
    ("TX-2025-007-B2H8", "@carlosmendez", 175_000.0, (2024, 11, 8, 14, 10), Completed, Credit),
    ("TX-2025-008-W5G9", "@anarodriguez", 55_000.0, (2024, 10, 30, 13, 0), Pending, Wallet),
    ("TX-2025-009-E1D4", "@luismartinez", 155_000.0, (2024, 10, 25, 18, 45), Completed, Limit),
    ("TX-2025-010-V7C6", "@marialopez", 195_000.0, (2024, 10, 18, 17, 30), Rejected, Credit),
    ("TX-2025-011-Z3J5", "@pedrosanchez", 220_000.0, (2024, 10, 12, 16, 0), Completed, Wallet),
    ("TX-2025-012-M8U2", "@lauragonzalez", 35_000.0, (2024, 10, 5, 14, 20), Completed, Limit),
    ("TX-2025-013-S4I7", "@diegoramirez", 180_000.0, (2024, 9, 28, 18, 0), Pending, Credit),
    ("TX-2025-014-R9O1", "@sofiacastro", 105_000.0, (2024, 9, 20, 16, 45), Completed, Limit),
    ("TX-2025-015-Y6A3", "@andresmejia", 270_000.0, (2024, 9, 15, 15, 30), Completed, Limit),
];

/// The fifteen seed payments, newest first, ids `"1"` to `"15"`
///
/// Every seed payment completed thirty minutes after it was created.
pub fn seed_payments() -> Vec<Payment> {
    SEED_ROWS
        .iter()
        .enumerate()
        .map(
            |(index, &(identification, recipient, amount, created, status, scheme))| {
                let created_at = timestamp(created);
                Payment {
                    id: (index + 1).to_string(),
                    identification: identification.to_string(),
                    recipient: recipient.to_string(),
                    order_amount: amount,
                    currency: "COP".to_string(),
                    created_at,
                    completed_at: created_at + Duration::minutes(30),
                    status,
                    scheme,
                }
            },
        )
        .collect()
}

/// Stats matching the seed collection
pub fn seed_stats() -> PaymentStats {
    PaymentStats {
        balance: 1_250_000.0,
        payment_count: 15,
        total_paid: 980_000.0,
    }
}

fn timestamp((year, month, day, hour, minute): (i32, u32, u32, u32, u32)) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("seed timestamps are valid calendar dates")
}
