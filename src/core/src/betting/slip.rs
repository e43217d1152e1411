use crate::betting::BetRejection;
use crate::r#match::MatchOutcome;
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetSlip {
    balance: u64,
    stake: u64,
    selection: Option<MatchOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub outcome: MatchOutcome,
    pub won: bool,
    /// Amount added back to the balance: returned stake plus winnings.
    pub credited: u64,
}

impl BetSlip {
    pub fn new(balance: u64) -> Self {
        BetSlip {
            balance,
            stake: 0,
            selection: None,
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn stake(&self) -> u64 {
        self.stake
    }

    pub fn selection(&self) -> Option<MatchOutcome> {
        self.selection
    }

    pub fn select(&mut self, outcome: MatchOutcome) {
        self.selection = Some(outcome);
    }

    /// Adds `delta` (which may be negative) to the stake. The stake can never
    /// go below zero or above the current balance.
    pub fn adjust_stake(&mut self, delta: i64) -> Result<u64, BetRejection> {
        let stake = self.stake as i128 + delta as i128;

        if stake < 0 {
            return Err(BetRejection::NegativeStake);
        }

        if stake > self.balance as i128 {
            return Err(BetRejection::InsufficientBalance);
        }

        self.stake = stake as u64;

        Ok(self.stake)
    }

    /// Validates the slip and takes the stake out of the balance.
    pub fn place(&mut self) -> Result<u64, BetRejection> {
        if self.selection.is_none() {
            return Err(BetRejection::NoSelection);
        }

        if self.stake == 0 {
            return Err(BetRejection::NoStake);
        }

        if self.stake > self.balance {
            return Err(BetRejection::InsufficientBalance);
        }

        self.balance -= self.stake;

        debug!("bet placed: {} on {:?}", self.stake, self.selection);

        Ok(self.stake)
    }

    /// Pays out a placed bet. A losing bet credits nothing, the stake was
    /// already deducted by `place`.
    pub fn settle(&mut self, outcome: MatchOutcome) -> Settlement {
        let won = self.selection == Some(outcome);

        let credited = if won {
            self.stake
                .saturating_mul(outcome.payout_multiplier())
                .saturating_add(self.stake)
        } else {
            0
        };

        self.balance = self.balance.saturating_add(credited);

        Settlement {
            outcome,
            won,
            credited,
        }
    }

    pub fn clear(&mut self) {
        self.stake = 0;
        self.selection = None;
    }
}
