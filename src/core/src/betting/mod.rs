mod slip;

pub use slip::*;

use std::fmt::{Display, Formatter};

/// Why a betting operation was refused. The slip is left untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetRejection {
    NotAcceptingBets,
    NoSelection,
    NoStake,
    NegativeStake,
    InsufficientBalance,
}

impl Display for BetRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            BetRejection::NotAcceptingBets => "bets are only accepted before kick off",
            BetRejection::NoSelection => "no outcome selected",
            BetRejection::NoStake => "stake must be greater than zero",
            BetRejection::NegativeStake => "stake cannot drop below zero",
            BetRejection::InsufficientBalance => "stake exceeds balance",
        };

        write!(f, "{}", message)
    }
}

impl std::error::Error for BetRejection {}
