// rosterhub/src/store/payments.rs
//
// Payment ledger over the entity store. A player's paid total always equals
// the sum of their entries; status is the three-way threshold against the
// period's due amount and is recomputed on every entry add/remove and on
// due-amount edits.

use super::TeamStore;
use crate::models::{PaymentEntry, PaymentPeriod, PaymentStatus, PlayerPayment};
use chrono::{DateTime, Utc};
use log::{debug, info};

impl TeamStore {
    pub fn create_payment_period(
        &mut self,
        title: &str,
        amount_cents: i64,
        player_ids: &[String],
    ) -> Option<String> {
        let team = self.active_team_mut()?;
        let period = PaymentPeriod::new(title, amount_cents, player_ids);
        let period_id = period.id.clone();
        info!(
            "Created payment period '{}' ({} players)",
            title,
            player_ids.len()
        );
        team.payment_periods.push(period);
        Some(period_id)
    }

    // Append a payment entry, creating the player's record on first use.
    // Returns the new entry's id.
    pub fn add_payment_entry(
        &mut self,
        period_id: &str,
        player_id: &str,
        amount_cents: i64,
        date: DateTime<Utc>,
        note: Option<String>,
    ) -> Option<String> {
        let team = self.active_team_mut()?;
        if team.player(player_id).is_none() {
            debug!("add_payment_entry: no player with id {}", player_id);
            return None;
        }
        let period = match team.payment_periods.iter_mut().find(|p| p.id == period_id) {
            Some(p) => p,
            None => {
                debug!("add_payment_entry: no period with id {}", period_id);
                return None;
            }
        };

        let due = period.amount_cents;
        let payment = period
            .payments
            .entry(player_id.to_string())
            .or_insert_with(PlayerPayment::default);

        let entry = PaymentEntry::new(amount_cents, date, note);
        let entry_id = entry.id.clone();
        payment.entries.push(entry);
        recompute(payment, due);
        Some(entry_id)
    }

    // Symmetric to add: removing an entry may move status backward
    pub fn remove_payment_entry(&mut self, period_id: &str, player_id: &str, entry_id: &str) {
        let team = match self.active_team_mut() {
            Some(t) => t,
            None => return,
        };
        let period = match team.payment_periods.iter_mut().find(|p| p.id == period_id) {
            Some(p) => p,
            None => {
                debug!("remove_payment_entry: no period with id {}", period_id);
                return;
            }
        };
        let due = period.amount_cents;
        if let Some(payment) = period.payments.get_mut(player_id) {
            let before = payment.entries.len();
            payment.entries.retain(|e| e.id != entry_id);
            if payment.entries.len() == before {
                debug!("remove_payment_entry: no entry with id {}", entry_id);
                return;
            }
            recompute(payment, due);
        }
    }

    // Edit the due amount only. Entries are untouched; every enrolled
    // player's status is refreshed from their stored total and the new due.
    pub fn update_payment_period(&mut self, period_id: &str, amount_cents: i64) {
        let team = match self.active_team_mut() {
            Some(t) => t,
            None => return,
        };
        let period = match team.payment_periods.iter_mut().find(|p| p.id == period_id) {
            Some(p) => p,
            None => {
                debug!("update_payment_period: no period with id {}", period_id);
                return;
            }
        };
        period.amount_cents = amount_cents;
        for payment in period.payments.values_mut() {
            recompute(payment, amount_cents);
        }
    }

    pub fn delete_payment_period(&mut self, period_id: &str) {
        if let Some(team) = self.active_team_mut() {
            team.payment_periods.retain(|p| p.id != period_id);
        }
    }

    pub fn payment_period(&self, period_id: &str) -> Option<&PaymentPeriod> {
        self.active_team()?
            .payment_periods
            .iter()
            .find(|p| p.id == period_id)
    }
}

// Re-derive total and status from the entry list; stamp `paid_at` exactly
// when the record first reaches Paid, clear it when it drops back.
fn recompute(payment: &mut PlayerPayment, due_cents: i64) {
    payment.paid_cents = payment.entries.iter().map(|e| e.amount_cents).sum();
    let status = PaymentStatus::for_amounts(payment.paid_cents, due_cents);
    if status == PaymentStatus::Paid && payment.status != PaymentStatus::Paid {
        payment.paid_at = Some(Utc::now());
    } else if status != PaymentStatus::Paid {
        payment.paid_at = None;
    }
    payment.status = status;
}
