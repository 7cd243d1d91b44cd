// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Giving statistics shown at the top of the newsletter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialStats {
    /// Dollars received toward the goal
    pub gifts_received: u64,
    /// Giving goal in dollars
    pub giving_goal: u64,
    /// Number of gifts
    pub total_gifts: u64,
    /// First-time givers
    pub new_givers: u64,
    /// Distinct givers
    pub unique_givers: u64,
    /// Goal for the number of gifts
    pub total_gifts_goal: Option<u64>,
    /// Goal for first-time givers
    pub new_givers_goal: Option<u64>,
    /// Goal for distinct givers
    pub unique_givers_goal: Option<u64>,
}

impl FinancialStats {
    /// Dollars still needed to reach the goal, never negative.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.giving_goal.saturating_sub(self.gifts_received)
    }
}

/// Formats a count with thousands separators, e.g. `1,234`.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats whole dollars, e.g. `$15,000`.
#[must_use]
pub fn format_usd(dollars: u64) -> String {
    format!("${}", group_thousands(dollars))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_is_floored_at_zero() {
        let stats = FinancialStats {
            gifts_received: 30_000,
            giving_goal: 45_000,
            ..Default::default()
        };
        assert_eq!(stats.remaining(), 15_000);
        let over = FinancialStats {
            gifts_received: 50_000,
            giving_goal: 45_000,
            ..Default::default()
        };
        assert_eq!(over.remaining(), 0);
    }

    #[test]
    fn formatting() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(format_usd(15_000), "$15,000");
    }
}
