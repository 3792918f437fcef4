//! Pure bet resolution: win determination, payout lookup, and net math.
//!
//! Everything here is a deterministic function of its inputs except for the
//! entropy drawn through the [`DiceRoller`]; no balance is read or written.
//! Applying the resulting settlement is the ledger's job.

use crate::bet::dice::DiceRoller;
use crate::bet::types::Settlement;
use crate::config::PayoutTable;
use crate::errors::BetError;

/// Check a guess and wager before any die is rolled.
///
/// Returns the base multiplier for the guessed sum so the caller does not
/// look it up twice. Rejections here consume no entropy.
pub fn validate_bet(guess: u8, wagered: u64, table: &PayoutTable) -> Result<f64, BetError> {
    let base_multiplier = table
        .multiplier(guess)
        .ok_or(BetError::InvalidGuess { guess })?;
    if wagered < 1 {
        return Err(BetError::InvalidWager { wagered });
    }
    Ok(base_multiplier)
}

/// A bet wins only on exact equality of guess and roll.
pub fn is_winner(guess: u8, roll: u8) -> bool {
    guess == roll
}

/// Multiplier applied to the wager: the table entry for the guessed sum on
/// a win, a sentinel 1.0 on a loss.
///
/// The loss sentinel is emitted for history symmetry only; it never feeds a
/// positive payout because [`calculate_net`] ignores it on the loss branch.
pub fn determine_payout(base_multiplier: f64, is_winner: bool) -> f64 {
    if is_winner {
        base_multiplier
    } else {
        1.0
    }
}

/// Signed coin change for one settled bet.
///
/// On a win, `wagered * payout` truncated toward zero (a 33-coin wager at
/// 7.2x settles as 237, not 238). On a loss, exactly `-wagered`: the player
/// forfeits what was staked, no more.
pub fn calculate_net(wagered: u64, payout: f64, is_winner: bool) -> i64 {
    if is_winner {
        (wagered as f64 * payout) as i64
    } else {
        -(wagered as i64)
    }
}

/// Resolve one bet: validate, roll two independent dice, and settle.
///
/// The payout multiplier is looked up by the GUESS, never the rolled sum;
/// the guess fixed the odds the player accepted. Validation failures return
/// before any entropy is consumed.
pub fn settle_bet<R: DiceRoller>(
    guess: u8,
    wagered: u64,
    table: &PayoutTable,
    roller: &mut R,
) -> Result<Settlement, BetError> {
    let base_multiplier = validate_bet(guess, wagered, table)?;

    let die_1 = roller.roll_die();
    let die_2 = roller.roll_die();
    let roll = die_1 + die_2;

    let won = is_winner(guess, roll);
    let payout = determine_payout(base_multiplier, won);
    let net = calculate_net(wagered, payout, won);

    Ok(Settlement {
        guess,
        die_1,
        die_2,
        roll,
        wagered,
        payout,
        net,
        is_winner: won,
    })
}
